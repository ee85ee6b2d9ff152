//! Integration coverage for resource resolution.

use std::path::{Path, PathBuf};

use repseq::{LocatorConfig, PackageProvider, ResolveError, ResourceLocator};

/// A config whose first two strategies cannot accidentally hit the crate's
/// own tree, so only the given probe roots matter.
fn probe_only(probe_roots: Vec<PathBuf>) -> LocatorConfig {
    LocatorConfig {
        provider: None,
        package_dir: PathBuf::from("/nonexistent-package-dir"),
        probe_roots,
    }
}

fn make_package_root(root: &Path) {
    std::fs::create_dir_all(root.join("data/germlines")).unwrap();
    std::fs::write(root.join("data/germlines/readme.txt"), "germlines\n").unwrap();
}

#[test]
fn resolves_from_probe_location_without_package_metadata() {
    let dir = tempfile::tempdir().unwrap();
    make_package_root(dir.path());

    let locator = ResourceLocator::with_config(probe_only(vec![dir.path().to_path_buf()]));

    let path = locator
        .resolve("unknown.pkg", "data/germlines/readme.txt")
        .unwrap();
    assert!(path.is_absolute());
    assert!(path.exists());
    assert!(path.ends_with("germlines/readme.txt"));
}

#[test]
fn not_found_names_package_and_resource() {
    let locator = ResourceLocator::with_config(probe_only(Vec::new()));

    let err = locator.resolve("some.pkg", "data/missing.txt").unwrap_err();
    assert!(matches!(err, ResolveError::NotFound { .. }));

    let message = err.to_string();
    assert!(message.contains("some.pkg"));
    assert!(message.contains("data/missing.txt"));
}

#[test]
fn data_path_matches_explicit_resolution() {
    let locator = ResourceLocator::new();

    assert_eq!(
        locator.data_path("").unwrap(),
        locator.resolve("repseq", "data").unwrap()
    );
    assert_eq!(
        locator.data_path("bin").unwrap(),
        locator.resolve("repseq", "data/bin").unwrap()
    );
}

#[test]
fn bundled_germlines_readme_resolves() {
    let path = repseq::resolve("repseq", "data/germlines/readme.txt").unwrap();
    assert!(path.is_absolute());
    assert!(path.exists());
    assert!(path.ends_with("germlines/readme.txt"));
}

#[test]
fn resolution_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    make_package_root(dir.path());

    let locator = ResourceLocator::with_config(probe_only(vec![dir.path().to_path_buf()]));

    let first = locator
        .resolve("pkg", "data/germlines/readme.txt")
        .unwrap();
    let second = locator
        .resolve("pkg", "data/germlines/readme.txt")
        .unwrap();
    assert_eq!(
        first.canonicalize().unwrap(),
        second.canonicalize().unwrap()
    );
}

#[test]
fn provider_outranks_probe_roots() {
    let provider_root = tempfile::tempdir().unwrap();
    let probe_root = tempfile::tempdir().unwrap();
    make_package_root(provider_root.path());
    make_package_root(probe_root.path());

    let mut provider = PackageProvider::new();
    provider.register("pkg", provider_root.path());
    let locator = ResourceLocator::with_config(LocatorConfig {
        provider: Some(provider),
        ..probe_only(vec![probe_root.path().to_path_buf()])
    });

    let path = locator
        .resolve("pkg", "data/germlines/readme.txt")
        .unwrap();
    assert_eq!(
        path,
        provider_root.path().join("data/germlines/readme.txt")
    );
}

#[test]
fn empty_resource_resolves_package_root() {
    let dir = tempfile::tempdir().unwrap();
    make_package_root(dir.path());

    let mut provider = PackageProvider::new();
    provider.register("pkg", dir.path());
    let locator = ResourceLocator::with_config(LocatorConfig {
        provider: Some(provider),
        ..probe_only(Vec::new())
    });

    let path = locator.resolve("pkg", "").unwrap();
    assert_eq!(path, dir.path());
}

#[test]
fn default_locator_finds_bundled_data_root() {
    let path = repseq::data_path("").unwrap();
    assert!(path.is_absolute());
    assert!(path.is_dir());
    assert!(path.ends_with("data"));
}
