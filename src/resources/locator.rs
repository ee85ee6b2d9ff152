//! Multi-strategy resource resolution.
//!
//! Installed distributions, development checkouts, and frozen bundles all
//! expose packaged data files differently. The locator hides that behind a
//! fixed fallback order: a native-style package provider, the crate's own
//! package directory, then a short list of conventional relative locations.
//! The first strategy that produces a path wins; only total exhaustion is
//! reported to the caller.

use std::path::PathBuf;

use thiserror::Error;

use crate::defaults;
use crate::resources::config::LocatorConfig;
use crate::resources::strategy::{
    PackageApiStrategy, PackageDirStrategy, ProbeStrategy, ResolutionStrategy,
};

/// Errors that can occur during resource resolution.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// Every strategy was exhausted without locating the resource.
    #[error("resource '{resource}' not found in package '{package}'")]
    NotFound { package: String, resource: String },

    /// The package identifier was empty.
    #[error("empty package identifier")]
    EmptyPackage,
}

pub type Result<T> = std::result::Result<T, ResolveError>;

/// Resolves logical (package, resource) pairs to absolute paths.
///
/// Calls are stateless and re-entrant: each performs read-only filesystem
/// probes, constructs a local path value, and caches nothing.
pub struct ResourceLocator {
    strategies: Vec<Box<dyn ResolutionStrategy>>,
}

impl ResourceLocator {
    /// Create a locator with detected capabilities and default probe roots.
    pub fn new() -> Self {
        Self::with_config(LocatorConfig::default())
    }

    /// Create a locator from explicit configuration.
    pub fn with_config(config: LocatorConfig) -> Self {
        let mut strategies: Vec<Box<dyn ResolutionStrategy>> = Vec::new();
        if let Some(provider) = config.provider {
            strategies.push(Box::new(PackageApiStrategy::new(provider)));
        }
        strategies.push(Box::new(PackageDirStrategy::new(config.package_dir)));
        strategies.push(Box::new(ProbeStrategy::new(config.probe_roots)));
        Self { strategies }
    }

    /// Resolve a resource within a logical package to an absolute path.
    ///
    /// `resource` is a relative, `/`-delimited path; an empty string means
    /// the package's own root data area. Strategies run in fixed order and
    /// the first hit wins; whatever fails inside an individual strategy
    /// stays there.
    pub fn resolve(&self, package: &str, resource: &str) -> Result<PathBuf> {
        if package.is_empty() {
            return Err(ResolveError::EmptyPackage);
        }

        for strategy in &self.strategies {
            match strategy.attempt(package, resource) {
                Some(path) => {
                    log::debug!(
                        "Resolved '{}' in '{}' via {} strategy: {:?}",
                        resource,
                        package,
                        strategy.name(),
                        path
                    );
                    return Ok(absolute(path));
                }
                None => {
                    log::debug!(
                        "Strategy {} missed '{}' in '{}'",
                        strategy.name(),
                        resource,
                        package
                    );
                }
            }
        }

        Err(ResolveError::NotFound {
            package: package.to_string(),
            resource: resource.to_string(),
        })
    }

    /// Resolve a path under the crate's own `data/` area.
    ///
    /// An empty subpath resolves the data root itself.
    pub fn data_path(&self, subpath: &str) -> Result<PathBuf> {
        let resource = if subpath.is_empty() {
            defaults::DATA_DIR.to_string()
        } else {
            format!("{}/{}", defaults::DATA_DIR, subpath)
        };
        self.resolve(defaults::PACKAGE_NAME, &resource)
    }
}

impl Default for ResourceLocator {
    fn default() -> Self {
        Self::new()
    }
}

fn absolute(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(&path))
            .unwrap_or(path)
    }
}

/// Resolve a resource with a default locator.
pub fn resolve(package: &str, resource: &str) -> Result<PathBuf> {
    ResourceLocator::new().resolve(package, resource)
}

/// Resolve a data subpath with a default locator.
pub fn data_path(subpath: &str) -> Result<PathBuf> {
    ResourceLocator::new().data_path(subpath)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::provider::PackageProvider;

    fn isolated_config(probe_roots: Vec<PathBuf>) -> LocatorConfig {
        LocatorConfig {
            provider: None,
            package_dir: PathBuf::from("/nonexistent-package-dir"),
            probe_roots,
        }
    }

    #[test]
    fn test_provider_hit_short_circuits() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/asset.txt"), "x").unwrap();

        let mut provider = PackageProvider::new();
        provider.register("mypkg", dir.path());

        let locator = ResourceLocator::with_config(LocatorConfig {
            provider: Some(provider),
            ..isolated_config(Vec::new())
        });

        let path = locator.resolve("mypkg", "data/asset.txt").unwrap();
        assert!(path.is_absolute());
        assert_eq!(path, dir.path().join("data/asset.txt"));
    }

    #[test]
    fn test_package_dir_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/asset.txt"), "x").unwrap();

        let locator = ResourceLocator::with_config(LocatorConfig {
            provider: None,
            package_dir: dir.path().to_path_buf(),
            probe_roots: Vec::new(),
        });

        let path = locator.resolve("whatever", "data/asset.txt").unwrap();
        assert_eq!(path, dir.path().join("data/asset.txt"));
    }

    #[test]
    fn test_probe_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/asset.txt"), "x").unwrap();

        let locator =
            ResourceLocator::with_config(isolated_config(vec![dir.path().to_path_buf()]));

        let path = locator.resolve("mypkg", "data/asset.txt").unwrap();
        assert!(path.is_absolute());
        assert!(path.exists());
    }

    #[test]
    fn test_not_found_carries_inputs() {
        let locator = ResourceLocator::with_config(isolated_config(Vec::new()));

        let err = locator.resolve("mypkg", "data/missing.txt").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("mypkg"));
        assert!(message.contains("data/missing.txt"));
    }

    #[test]
    fn test_empty_package_rejected() {
        let locator = ResourceLocator::with_config(isolated_config(Vec::new()));
        assert!(matches!(
            locator.resolve("", "data"),
            Err(ResolveError::EmptyPackage)
        ));
    }

    #[test]
    fn test_data_path_prefixes_data_segment() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("data/bin")).unwrap();

        let mut provider = PackageProvider::new();
        provider.register(defaults::PACKAGE_NAME, dir.path());
        let config = LocatorConfig {
            provider: Some(provider),
            ..isolated_config(Vec::new())
        };
        let locator = ResourceLocator::with_config(config);

        assert_eq!(
            locator.data_path("").unwrap(),
            locator.resolve(defaults::PACKAGE_NAME, "data").unwrap()
        );
        assert_eq!(
            locator.data_path("bin").unwrap(),
            locator.resolve(defaults::PACKAGE_NAME, "data/bin").unwrap()
        );
    }
}
