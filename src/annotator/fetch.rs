//! Reference bundle fetching and installation.
//!
//! Germline databases are distributed as versioned tar.gz bundles listed in
//! a remote manifest. The fetcher downloads a bundle, verifies its
//! checksum, and unpacks it into a per-user directory. Network access
//! lives only here; the resource locator itself never touches it.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use flate2::read::GzDecoder;
use reqwest::Client;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tar::Archive;
use thiserror::Error;

use crate::defaults;

const MANIFEST_URL: &str = "https://downloads.repseq.org/germlines/manifest.json";
const REQUEST_TIMEOUT_SECS: u64 = 30;
const DOWNLOAD_TIMEOUT_SECS: u64 = 600;
const MAX_RETRIES: u32 = 3;

/// Errors that can occur while fetching reference bundles.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    Integrity { expected: String, actual: String },

    #[error("Extract error: {0}")]
    Extract(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Deserialize)]
struct Manifest {
    bundles: HashMap<String, BundleInfo>,
}

#[derive(Debug, Deserialize)]
struct BundleInfo {
    latest: String,
    versions: HashMap<String, VersionInfo>,
}

#[derive(Debug, Deserialize)]
struct VersionInfo {
    url: String,
    sha256: Option<String>,
}

/// Germline bundle fetcher.
///
/// Downloads, verifies, and unpacks versioned reference bundles into a
/// per-user home directory.
pub struct DatabaseFetcher {
    client: Client,
    home: PathBuf,
}

impl DatabaseFetcher {
    /// Create a fetcher with the default home directory.
    pub fn new() -> Self {
        let home = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("/tmp"))
            .join(".repseq");
        Self::with_home(home)
    }

    /// Create a fetcher with a custom home directory.
    pub fn with_home(home: PathBuf) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, home }
    }

    /// Directory bundles are unpacked into.
    pub fn bundle_root(&self) -> PathBuf {
        self.home.join(defaults::DATA_DIR)
    }

    /// Get the path of an unpacked bundle, downloading it if necessary.
    pub async fn ensure_bundle(&self, bundle: &str) -> Result<PathBuf> {
        let target = self.bundle_root().join(bundle);
        if target.is_dir() {
            return Ok(target);
        }

        self.download_bundle(bundle, None).await?;

        if !target.is_dir() {
            return Err(FetchError::Network(
                "Download completed but bundle not found".into(),
            ));
        }
        Ok(target)
    }

    /// Download and unpack one bundle.
    pub async fn download_bundle(&self, bundle: &str, version: Option<&str>) -> Result<()> {
        let manifest = self.fetch_manifest().await?;

        let info = manifest.bundles.get(bundle).ok_or_else(|| {
            let mut available: Vec<&str> = manifest.bundles.keys().map(String::as_str).collect();
            available.sort_unstable();
            FetchError::InvalidManifest(format!(
                "Bundle {} not in manifest. Available: {}",
                bundle,
                available.join(", ")
            ))
        })?;

        let version = version.unwrap_or(&info.latest).to_string();
        let entry = info.versions.get(&version).ok_or_else(|| {
            FetchError::InvalidManifest(format!(
                "Version {} not found for bundle {}",
                version, bundle
            ))
        })?;

        log::info!("Downloading germline bundle {} {}", bundle, version);
        let content = self
            .download_with_retry(&entry.url, entry.sha256.as_deref())
            .await?;

        self.extract_bundle(&content, bundle, &version)?;

        log::info!("Installed germline bundle {} {}", bundle, version);
        Ok(())
    }

    /// Installed version of a bundle, if any.
    pub fn installed_version(&self, bundle: &str) -> Option<String> {
        let version_file = self.bundle_root().join(bundle).join("version.txt");
        std::fs::read_to_string(version_file)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Check whether a newer version of an installed bundle exists.
    pub async fn check_for_updates(&self, bundle: &str) -> Option<String> {
        let installed = self.installed_version(bundle)?;

        let manifest = self.fetch_manifest().await.ok()?;
        let latest = &manifest.bundles.get(bundle)?.latest;

        if *latest != installed {
            Some(latest.clone())
        } else {
            None
        }
    }

    async fn fetch_manifest(&self) -> Result<Manifest> {
        let response = self
            .client
            .get(MANIFEST_URL)
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .query(&[("os", std::env::consts::OS), ("arch", std::env::consts::ARCH)])
            .send()
            .await
            .map_err(|e| FetchError::InvalidManifest(format!("Failed to fetch manifest: {}", e)))?;

        if !response.status().is_success() {
            return Err(FetchError::InvalidManifest(format!(
                "Server returned {}",
                response.status()
            )));
        }

        response
            .json::<Manifest>()
            .await
            .map_err(|e| FetchError::InvalidManifest(format!("Invalid manifest format: {}", e)))
    }

    async fn download_with_retry(
        &self,
        url: &str,
        expected_sha256: Option<&str>,
    ) -> Result<Vec<u8>> {
        for attempt in 0..MAX_RETRIES {
            match self.download_file(url).await {
                Ok(content) => {
                    if let Some(expected) = expected_sha256 {
                        verify_checksum(&content, expected)?;
                    }
                    return Ok(content);
                }
                Err(e) => {
                    if attempt == MAX_RETRIES - 1 {
                        return Err(e);
                    }
                    log::warn!("Download attempt {} failed: {}, retrying...", attempt + 1, e);
                }
            }
        }

        Err(FetchError::Network(
            "Download failed after maximum retries".into(),
        ))
    }

    async fn download_file(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Network(format!("HTTP {}", response.status())));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    fn extract_bundle(&self, content: &[u8], bundle: &str, version: &str) -> Result<()> {
        let target = self.bundle_root().join(bundle);

        // Clean the target for an atomic replacement.
        if target.exists() {
            std::fs::remove_dir_all(&target)?;
        }
        std::fs::create_dir_all(&target)?;

        let decoder = GzDecoder::new(content);
        let mut archive = Archive::new(decoder);

        for entry in archive.entries()? {
            let mut entry = entry?;
            let path = entry.path()?;

            let path_str = path.to_string_lossy();
            if path_str.starts_with('/') || path_str.contains("..") {
                return Err(FetchError::Extract(format!(
                    "Unsafe path in archive: {}",
                    path_str
                )));
            }

            let dest = target.join(&*path);

            if let Some(parent) = dest.parent() {
                std::fs::create_dir_all(parent)?;
            }

            if entry.header().entry_type().is_file() {
                let mut file = std::fs::File::create(&dest)?;
                io::copy(&mut entry, &mut file)?;
            }
        }

        let version_file = target.join("version.txt");
        std::fs::write(version_file, version)?;

        Ok(())
    }
}

impl Default for DatabaseFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn verify_checksum(content: &[u8], expected: &str) -> Result<()> {
    let actual = hex::encode(Sha256::digest(content));
    if actual != expected {
        return Err(FetchError::Integrity {
            expected: expected.to_string(),
            actual,
        });
    }
    Ok(())
}
