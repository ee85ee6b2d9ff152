//! Package provider capability.
//!
//! The provider plays the role of a runtime-native package-resource API: it
//! knows where logical package namespaces live on disk. Availability is
//! checked once via [`PackageProvider::detect`] and handed to the locator as
//! configuration; a provider with no roots simply never answers, and
//! resolution falls through to the later strategies.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::defaults;

/// Maps dotted logical package names to filesystem roots.
#[derive(Debug, Clone, Default)]
pub struct PackageProvider {
    roots: HashMap<String, PathBuf>,
}

impl PackageProvider {
    /// Create an empty provider with no registered roots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover the package roots available in this environment.
    ///
    /// The `REPSEQ_RESOURCE_ROOT` override is checked first, then the
    /// compiled-in manifest directory for development checkouts.
    pub fn detect() -> Self {
        let mut provider = Self::new();

        if let Ok(root) = std::env::var(defaults::RESOURCE_ROOT_ENV) {
            let root = PathBuf::from(root);
            if root.is_dir() {
                log::debug!("Registering resource root from environment: {:?}", root);
                provider.register(defaults::PACKAGE_NAME, root);
            } else {
                log::warn!(
                    "{} points at {:?}, which is not a directory",
                    defaults::RESOURCE_ROOT_ENV,
                    root
                );
            }
        }

        if !provider.contains(defaults::PACKAGE_NAME) {
            let manifest_dir = PathBuf::from(defaults::MANIFEST_DIR);
            if manifest_dir.is_dir() {
                provider.register(defaults::PACKAGE_NAME, manifest_dir);
            }
        }

        provider
    }

    /// Register a root directory for a top-level package name.
    pub fn register(&mut self, package: impl Into<String>, root: impl Into<PathBuf>) {
        self.roots.insert(package.into(), root.into());
    }

    /// Whether a top-level package name has a registered root.
    pub fn contains(&self, package: &str) -> bool {
        self.roots.contains_key(package)
    }

    /// True when no roots are registered at all.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Resolve a dotted package name to a directory.
    ///
    /// The leading component selects a registered root; the remaining
    /// components are nested directories under it. The provider verifies
    /// its own resolution: a missing directory is a miss, not an error.
    pub fn resolve_package(&self, dotted: &str) -> Option<PathBuf> {
        let mut components = dotted.split('.');
        let top = components.next().filter(|c| !c.is_empty())?;
        let root = self.roots.get(top)?;

        let mut dir = root.clone();
        for component in components {
            if component.is_empty() {
                return None;
            }
            dir.push(component);
        }

        if dir.is_dir() {
            Some(dir)
        } else {
            None
        }
    }
}
