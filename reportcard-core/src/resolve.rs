//! `package://` path resolution.
//!
//! `package://report_card/report_card/tex_templates` resolves to the root of
//! package `report_card` with `/report_card/tex_templates` appended. Anything
//! that does not start with `package://` is a plain filesystem path and is
//! returned as-is.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const SCHEME: &str = "package://";

/// A parsed `package://<package>/<rest>` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagePath<'a> {
    pub package: &'a str,
    /// Remainder after the package name, without the leading slash.
    pub rest: &'a str,
}

impl<'a> PackagePath<'a> {
    /// `None` if `spec` is not a `package://` URL.
    pub fn parse(spec: &'a str) -> Option<Result<Self, ConfigError>> {
        let tail = spec.strip_prefix(SCHEME)?;
        let (package, rest) = match tail.split_once('/') {
            Some((package, rest)) => (package, rest),
            None => (tail, ""),
        };
        if package.is_empty() {
            return Some(Err(ConfigError::MalformedPackagePath(spec.to_owned())));
        }
        Some(Ok(PackagePath { package, rest }))
    }
}

/// Locates the root directory of a named package.
pub trait PackageResolver {
    fn find(&self, package: &str) -> Option<PathBuf>;
}

/// Resolver backed by the `packages:` table of the config file.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    roots: BTreeMap<String, PathBuf>,
}

impl MapResolver {
    pub fn new(roots: BTreeMap<String, PathBuf>) -> Self {
        Self { roots }
    }
}

impl PackageResolver for MapResolver {
    fn find(&self, package: &str) -> Option<PathBuf> {
        self.roots.get(package).cloned()
    }
}

/// Turn a config path spec into a filesystem path.
pub fn resolve_path(spec: &str, resolver: &dyn PackageResolver) -> Result<PathBuf, ConfigError> {
    match PackagePath::parse(spec) {
        None => Ok(PathBuf::from(spec)),
        Some(parsed) => {
            let parsed = parsed?;
            let root = resolver
                .find(parsed.package)
                .ok_or_else(|| ConfigError::PackageNotFound {
                    package: parsed.package.to_owned(),
                })?;
            tracing::debug!("resolved package '{}' to {}", parsed.package, root.display());
            Ok(join_rest(&root, parsed.rest))
        }
    }
}

fn join_rest(root: &Path, rest: &str) -> PathBuf {
    rest.split('/')
        .filter(|c| !c.is_empty())
        .fold(root.to_path_buf(), |acc, c| acc.join(c))
}
