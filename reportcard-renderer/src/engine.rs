//! Tera rendering engine over a directory of `.tex` templates.
//!
//! # Layout
//!
//! | Template name | File                          |
//! |---------------|-------------------------------|
//! | `reportCard`  | `<template_dir>/reportCard.tex` |
//! | `basic`       | `<template_dir>/basic.tex`      |
//! | `<section>`   | `<template_dir>/<section>.tex`  |
//!
//! Each render loads only the template it needs, so one malformed section
//! cannot take the others down with it.

use std::path::{Path, PathBuf};

use tera::Tera;

use reportcard_core::SlotSet;

use crate::context::to_tera_context;
use crate::error::{io_err, RenderError};

pub const TEMPLATE_EXT: &str = "tex";

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn normalize_template_name(name: &str) -> String {
    format!("{}.{TEMPLATE_EXT}", name.replace('\\', "/"))
}

fn build_tera(name: &str, source: &str) -> Result<Tera, RenderError> {
    let mut tera = Tera::default();
    // escaping already happened in the binder
    tera.autoescape_on(vec![]);
    tera.add_raw_template(name, source)?;
    Ok(tera)
}

/// Write `content` via a `.tmp` sibling and a rename.
fn write_atomic(path: &Path, content: &str) -> Result<(), RenderError> {
    let tmp = PathBuf::from(format!("{}.tmp", path.display()));
    std::fs::write(&tmp, content).map_err(|e| io_err(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(io_err(path, e));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Renders named templates from a fixed template directory.
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    template_dir: PathBuf,
}

impl TemplateEngine {
    pub fn new(template_dir: impl Into<PathBuf>) -> Self {
        TemplateEngine {
            template_dir: template_dir.into(),
        }
    }

    pub fn template_dir(&self) -> &Path {
        &self.template_dir
    }

    /// `<template_dir>/<name>.tex`: pure, no I/O.
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.template_dir.join(format!("{name}.{TEMPLATE_EXT}"))
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.template_path(name).is_file()
    }

    /// Render template `name` with `slots` and return the markup.
    pub fn render_str(&self, name: &str, slots: &SlotSet) -> Result<String, RenderError> {
        let path = self.template_path(name);
        if !path.is_file() {
            return Err(RenderError::TemplateNotFound { path });
        }
        let source = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;

        let tera_name = normalize_template_name(name);
        let tera = build_tera(&tera_name, &source)?;
        let ctx = to_tera_context(slots)?;
        let rendered = tera.render(&tera_name, &ctx)?;
        tracing::debug!("rendered {} ({} slots)", path.display(), slots.len());
        Ok(rendered)
    }

    /// Render template `name` and write the markup to `output`.
    ///
    /// The parent directory of `output` must already exist.
    pub fn render_to(
        &self,
        name: &str,
        slots: &SlotSet,
        output: &Path,
    ) -> Result<PathBuf, RenderError> {
        let content = self.render_str(name, slots)?;
        write_atomic(output, &content)?;
        tracing::info!("wrote: {}", output.display());
        Ok(output.to_path_buf())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
