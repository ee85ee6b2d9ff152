//! Resolution strategies for bundled resources.
//!
//! Each mechanism for turning a (package identifier, resource path) pair
//! into a filesystem path is one member of a closed, ordered set. A
//! strategy either produces a path or it does not; whatever goes wrong
//! internally stays internal, so the locator can move on to the next
//! member.

use std::path::{Path, PathBuf};

use crate::resources::provider::PackageProvider;

/// One fallback procedure for locating a resource.
pub trait ResolutionStrategy {
    /// Short name used in debug logging.
    fn name(&self) -> &'static str;

    /// Attempt to resolve; `None` means "try the next strategy".
    fn attempt(&self, package: &str, resource: &str) -> Option<PathBuf>;
}

/// Join a `/`-separated resource path onto a base directory.
fn join_resource(base: &Path, resource: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for segment in resource.split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path
}

/// Segmented package resolution through the provider capability.
///
/// Splits the resource path on `/`, folds all but the last segment into the
/// package name as nested sub-package components, and asks the provider for
/// the resulting package directory before joining the leaf filename. An
/// empty leaf denotes the package directory itself.
pub struct PackageApiStrategy {
    provider: PackageProvider,
}

impl PackageApiStrategy {
    pub fn new(provider: PackageProvider) -> Self {
        Self { provider }
    }
}

impl ResolutionStrategy for PackageApiStrategy {
    fn name(&self) -> &'static str {
        "package-api"
    }

    fn attempt(&self, package: &str, resource: &str) -> Option<PathBuf> {
        if self.provider.is_empty() {
            return None;
        }

        let (subpackages, leaf) = match resource.rsplit_once('/') {
            Some((head, leaf)) => (Some(head), leaf),
            None => (None, resource),
        };

        let full_package = match subpackages {
            Some(head) => format!("{}.{}", package, head.replace('/', ".")),
            None => package.to_string(),
        };

        let dir = self.provider.resolve_package(&full_package)?;
        if leaf.is_empty() {
            return Some(dir);
        }

        let path = dir.join(leaf);
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }
}

/// Lookup relative to the crate's own package directory.
///
/// The directory comes from build metadata rather than any installed
/// package registry, which is what makes this work for development
/// checkouts the provider does not know about. The requested package
/// identifier is not consulted; this strategy only ever searches the
/// crate's own tree.
pub struct PackageDirStrategy {
    package_dir: PathBuf,
}

impl PackageDirStrategy {
    pub fn new(package_dir: impl Into<PathBuf>) -> Self {
        Self {
            package_dir: package_dir.into(),
        }
    }
}

impl ResolutionStrategy for PackageDirStrategy {
    fn name(&self) -> &'static str {
        "package-dir"
    }

    fn attempt(&self, _package: &str, resource: &str) -> Option<PathBuf> {
        let path = join_resource(&self.package_dir, resource);
        if path.exists() {
            Some(path)
        } else {
            None
        }
    }
}

/// Fixed relative-location probing.
///
/// Tries each configured root in order and accepts the first join that
/// exists on disk. The conventional roots are relative to the working
/// directory; accepted paths are canonicalized.
pub struct ProbeStrategy {
    roots: Vec<PathBuf>,
}

impl ProbeStrategy {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl ResolutionStrategy for ProbeStrategy {
    fn name(&self) -> &'static str {
        "probe"
    }

    fn attempt(&self, _package: &str, resource: &str) -> Option<PathBuf> {
        for root in &self.roots {
            let candidate = join_resource(root, resource);
            if !candidate.exists() {
                continue;
            }
            match candidate.canonicalize() {
                Ok(path) => return Some(path),
                Err(err) => {
                    // A racing removal can fail canonicalization; treat it
                    // as a miss like any other.
                    log::debug!("Failed to canonicalize {:?}: {}", candidate, err);
                }
            }
        }
        None
    }
}
