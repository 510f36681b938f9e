//! Typesetting collaborator: markup in, final document out.
//!
//! [`LatexTypesetter`] shells out to a LaTeX engine (`pdflatex` by default):
//!
//! ```text
//! TEXINPUTS=<resource_dir>: <program> -interaction=nonstopmode -halt-on-error \
//!     -output-directory=<output_dir> [extra args] <markup>
//! ```
//!
//! The trailing separator in `TEXINPUTS` keeps the engine's default search
//! path after the template directory.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use reportcard_core::TypesetterConfig;

use crate::error::TypesetError;

/// Lines of engine output kept in [`TypesetError::Failed`].
const LOG_TAIL_LINES: usize = 20;

/// Converts a markup file into a final document.
pub trait Typesetter {
    /// Typeset `markup` into `output_dir`, resolving `\input`/`\includegraphics`
    /// against `resource_dir`. Returns the path of the produced document.
    fn typeset(
        &self,
        markup: &Path,
        output_dir: &Path,
        resource_dir: &Path,
    ) -> Result<PathBuf, TypesetError>;
}

impl<T: Typesetter + ?Sized> Typesetter for &T {
    fn typeset(
        &self,
        markup: &Path,
        output_dir: &Path,
        resource_dir: &Path,
    ) -> Result<PathBuf, TypesetError> {
        (**self).typeset(markup, output_dir, resource_dir)
    }
}

impl<T: Typesetter + ?Sized> Typesetter for Box<T> {
    fn typeset(
        &self,
        markup: &Path,
        output_dir: &Path,
        resource_dir: &Path,
    ) -> Result<PathBuf, TypesetError> {
        (**self).typeset(markup, output_dir, resource_dir)
    }
}

/// `<output_dir>/<markup stem>.pdf`: pure, no I/O.
pub fn document_path(markup: &Path, output_dir: &Path) -> PathBuf {
    let stem = markup
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{stem}.pdf"))
}

// ---------------------------------------------------------------------------
// LatexTypesetter
// ---------------------------------------------------------------------------

/// Runs a LaTeX engine as a child process and waits for it.
#[derive(Debug, Clone)]
pub struct LatexTypesetter {
    program: String,
    args: Vec<String>,
}

impl Default for LatexTypesetter {
    fn default() -> Self {
        Self::from_config(&TypesetterConfig::default())
    }
}

impl LatexTypesetter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn from_config(config: &TypesetterConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Locate the program without running it.
    pub fn probe(&self) -> Result<PathBuf, TypesetError> {
        which::which(&self.program).map_err(|source| TypesetError::NotFound {
            program: self.program.clone(),
            source,
        })
    }

    fn command(
        &self,
        program: &Path,
        markup: &Path,
        output_dir: &Path,
        resource_dir: &Path,
    ) -> Command {
        let mut out_arg = OsString::from("-output-directory=");
        out_arg.push(output_dir.as_os_str());

        let mut cmd = Command::new(program);
        cmd.arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg(out_arg)
            .args(&self.args)
            .arg(markup)
            .env("TEXINPUTS", texinputs(resource_dir))
            .current_dir(output_dir);
        cmd
    }
}

impl Typesetter for LatexTypesetter {
    fn typeset(
        &self,
        markup: &Path,
        output_dir: &Path,
        resource_dir: &Path,
    ) -> Result<PathBuf, TypesetError> {
        let program = self.probe()?;
        tracing::debug!(
            "typesetting {} with {} into {}",
            markup.display(),
            program.display(),
            output_dir.display()
        );

        let output = self
            .command(&program, markup, output_dir, resource_dir)
            .output()
            .map_err(|source| TypesetError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            let mut log = String::from_utf8_lossy(&output.stdout).into_owned();
            log.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(TypesetError::Failed {
                program,
                status: output.status.to_string(),
                log: tail(&log, LOG_TAIL_LINES),
            });
        }

        let document = document_path(markup, output_dir);
        if !document.is_file() {
            return Err(TypesetError::MissingOutput { path: document });
        }
        tracing::info!("typeset: {}", document.display());
        Ok(document)
    }
}

fn texinputs(resource_dir: &Path) -> OsString {
    let mut value = resource_dir.as_os_str().to_owned();
    value.push(if cfg!(windows) { ";" } else { ":" });
    value
}

fn tail(text: &str, lines: usize) -> String {
    let all: Vec<&str> = text.lines().collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
