//! Error types for reportcard-compose.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the external typesetting toolchain.
#[derive(Debug, Error)]
pub enum TypesetError {
    /// The configured program is not on `$PATH` (or not executable).
    #[error("typesetter '{program}' not found: {source}")]
    NotFound {
        program: String,
        #[source]
        source: which::Error,
    },

    /// The process could not be started.
    #[error("failed to run {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully.
    #[error("{} exited with {status}\n{log}", .program.display())]
    Failed {
        program: PathBuf,
        status: String,
        /// Tail of the combined stdout/stderr.
        log: String,
    },

    /// The process claimed success but the document is not there.
    #[error("typesetter finished but {} was not produced", .path.display())]
    MissingOutput { path: PathBuf },
}
