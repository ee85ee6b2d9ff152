//! Locator configuration.

use std::path::PathBuf;

use crate::defaults;
use crate::resources::provider::PackageProvider;

/// Configuration for a [`crate::resources::locator::ResourceLocator`].
///
/// The probe roots encode install-layout conventions, not an algorithmic
/// requirement, so they are data here rather than code.
#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Provider capability for native package resolution. `None` disables
    /// the first strategy entirely.
    pub provider: Option<PackageProvider>,
    /// The crate's own package directory, searched by the second strategy.
    pub package_dir: PathBuf,
    /// Roots probed by the final strategy, in order.
    pub probe_roots: Vec<PathBuf>,
}

impl LocatorConfig {
    /// Detect capabilities once and install the default probe roots.
    pub fn new() -> Self {
        Self {
            provider: Some(PackageProvider::detect()),
            package_dir: PathBuf::from(defaults::MANIFEST_DIR),
            probe_roots: defaults::default_probe_roots(),
        }
    }
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self::new()
    }
}
