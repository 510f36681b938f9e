//! Error types for reportcard-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or resolving paths.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (permission denied, etc.).
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `dirs::home_dir()` returned `None`: cannot locate `~/.reportcard/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// A `package://` path named a package nobody knows about.
    #[error("cannot resolve package '{package}' (add it under `packages:` in the config)")]
    PackageNotFound { package: String },

    /// A `package://` path with no package component.
    #[error("malformed package path '{0}'; expected package://<package>/<path>")]
    MalformedPackagePath(String),
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
