//! YAML configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.reportcard/
//!   config.yaml     (optional: every field has a default)
//! ```
//!
//! # API pattern
//!
//! - `load_at(home: &Path)`: explicit home; used in tests with `TempDir`
//! - `load()`: derives home from `dirs::home_dir()`, delegates to `_at`
//! - `load_from(path)`: an explicit `--config` file, which must exist

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::resolve::{resolve_path, MapResolver};
use crate::types::CapacityLimits;

pub const DEFAULT_TEMPLATE_DIR: &str = "package://report_card/report_card/tex_templates";
pub const DEFAULT_TYPESETTER: &str = "pdflatex";

/// Root of `config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Plain path or `package://<package>/<path>`.
    pub template_dir: String,
    /// Package name → package root, for `package://` resolution.
    pub packages: BTreeMap<String, PathBuf>,
    pub typesetter: TypesetterConfig,
    pub limits: CapacityLimits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_dir: DEFAULT_TEMPLATE_DIR.to_string(),
            packages: BTreeMap::new(),
            typesetter: TypesetterConfig::default(),
            limits: CapacityLimits::default(),
        }
    }
}

/// External LaTeX toolchain invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypesetterConfig {
    /// Program name (looked up on `$PATH`) or absolute path.
    pub program: String,
    /// Extra arguments placed before the markup file.
    pub args: Vec<String>,
}

impl Default for TypesetterConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_TYPESETTER.to_string(),
            args: Vec::new(),
        }
    }
}

impl Config {
    /// Resolve `template_dir` against the `packages` table.
    pub fn resolve_template_dir(&self) -> Result<PathBuf, ConfigError> {
        let resolver = MapResolver::new(self.packages.clone());
        resolve_path(&self.template_dir, &resolver)
    }
}

// ---------------------------------------------------------------------------
// Load
// ---------------------------------------------------------------------------

/// `<home>/.reportcard/config.yaml`: pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".reportcard").join("config.yaml")
}

/// Load `<home>/.reportcard/config.yaml`, or defaults if it does not exist.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    load_from(&path)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Config, ConfigError> {
    load_at(&home()?)
}

/// Load an explicit config file. Missing files are an error here.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_path_is_correct() {
        let home = TempDir::new().expect("tempdir");
        assert!(config_path_at(home.path()).ends_with(".reportcard/config.yaml"));
    }

    #[test]
    fn missing_config_yields_defaults() {
        let home = TempDir::new().expect("tempdir");
        let config = load_at(home.path()).expect("load");
        assert_eq!(config, Config::default());
        assert_eq!(config.limits.sections, 10);
        assert_eq!(config.typesetter.program, "pdflatex");
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let home = TempDir::new().expect("tempdir");
        let path = config_path_at(home.path());
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(&path, "limits:\n  sections: 12\ntypesetter:\n  program: xelatex\n")
            .expect("write");

        let config = load_at(home.path()).expect("load");
        assert_eq!(config.limits.sections, 12);
        assert_eq!(config.limits.arguments, 20);
        assert_eq!(config.typesetter.program, "xelatex");
        assert_eq!(config.template_dir, DEFAULT_TEMPLATE_DIR);
    }

    #[test]
    fn explicit_missing_file_is_io_error() {
        let home = TempDir::new().expect("tempdir");
        let err = load_from(&home.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn resolve_template_dir_uses_packages() {
        let mut config = Config::default();
        config
            .packages
            .insert("report_card".into(), PathBuf::from("/ws/report_card"));
        assert_eq!(
            config.resolve_template_dir().expect("resolve"),
            PathBuf::from("/ws/report_card/report_card/tex_templates")
        );
    }

    #[test]
    fn default_template_dir_without_packages_fails() {
        let err = Config::default().resolve_template_dir().unwrap_err();
        assert!(err.to_string().contains("report_card"));
    }
}
