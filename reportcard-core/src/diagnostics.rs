//! Non-fatal pipeline conditions and the [`Outcome`] that carries them.
//!
//! Report generation is best effort: every stage records what went wrong
//! and the pipeline keeps going. Callers get the artifact path plus the full
//! list of diagnostics and decide for themselves what counts as failure.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One recorded problem. Carried as data; never returned as `Err`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A slot group held more values than its configured cap.
    #[error("{group}: {count} values supplied but only {limit} are supported; extend the templates to raise the limit")]
    CapacityExceeded {
        group: String,
        limit: usize,
        count: usize,
    },

    /// Template load, substitution, or markup write failed.
    #[error("rendering {template} failed: {message}")]
    Render { template: String, message: String },

    /// The typesetting collaborator reported failure.
    #[error("typesetting {} failed: {message}", .markup.display())]
    Typeset { markup: PathBuf, message: String },

    /// Directory creation or other filesystem access failed.
    #[error("I/O error at {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

impl Diagnostic {
    pub fn is_capacity(&self) -> bool {
        matches!(self, Diagnostic::CapacityExceeded { .. })
    }

    /// Render and typeset failures leave no fresh artifact behind.
    pub fn is_stage_failure(&self) -> bool {
        matches!(self, Diagnostic::Render { .. } | Diagnostic::Typeset { .. })
    }
}

/// Coarse classification of an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No diagnostics.
    Success,
    /// Diagnostics were recorded but every stage produced its output.
    Partial,
    /// A render or typeset stage failed; `path` may not exist.
    Failed,
}

/// Best-effort result of a composer call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Absolute path of the produced markup or final document.
    pub path: PathBuf,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl Outcome {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            diagnostics: Vec::new(),
        }
    }

    /// Record a diagnostic and log it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for d in diagnostics {
            self.push(d);
        }
    }

    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn status(&self) -> Status {
        if self.diagnostics.is_empty() {
            Status::Success
        } else if self.diagnostics.iter().any(Diagnostic::is_stage_failure) {
            Status::Failed
        } else {
            Status::Partial
        }
    }

    pub fn capacity_exceeded(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_capacity())
    }
}
