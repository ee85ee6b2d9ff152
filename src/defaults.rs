//! Fixed names and layout conventions for bundled assets.

use std::path::PathBuf;

/// Logical package name under which bundled assets are organized.
pub const PACKAGE_NAME: &str = "repseq";

/// Name of the data area inside the package.
pub const DATA_DIR: &str = "data";

/// Environment variable pointing at a relocated resource root.
pub const RESOURCE_ROOT_ENV: &str = "REPSEQ_RESOURCE_ROOT";

/// Environment variable overriding the bundled igblastn binary.
pub const IGBLAST_ENV: &str = "REPSEQ_IGBLAST";

/// Development-layout directory probed relative to the working directory.
pub const DEV_LAYOUT_DIR: &str = "repseq";

/// Installed-layout directory probed relative to the working directory.
pub const INSTALLED_LAYOUT_DIR: &str = "share/repseq";

/// The crate's own source location, compiled in at build time.
pub const MANIFEST_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// Probe roots tried by the final resolution strategy, in order.
pub fn default_probe_roots() -> Vec<PathBuf> {
    vec![
        PathBuf::from(DEV_LAYOUT_DIR),
        PathBuf::from(INSTALLED_LAYOUT_DIR),
        PathBuf::from(MANIFEST_DIR),
    ]
}
