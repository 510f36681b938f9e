//! Error types for reportcard-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from template rendering operations.
#[derive(Debug, Error)]
pub enum RenderError {
    /// No `<name>.tex` in the template directory.
    #[error("template not found at {path}")]
    TemplateNotFound { path: PathBuf },

    /// Tera template engine error (parse failure, undefined placeholder, ...).
    #[error("template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// Filesystem error while reading a template or writing markup.
    #[error("template io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// The message plus every `source()` below it, joined with `: `.
    ///
    /// Tera keeps the interesting part (line, column, missing variable) in
    /// the nested causes, so the top-level `Display` alone is not enough for
    /// a diagnostic.
    pub fn detail(&self) -> String {
        let mut out = self.to_string();
        let mut cause = std::error::Error::source(self);
        while let Some(err) = cause {
            let msg = err.to_string();
            if !out.contains(&msg) {
                out.push_str(": ");
                out.push_str(&msg);
            }
            cause = err.source();
        }
        out
    }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io {
        path: path.into(),
        source,
    }
}
