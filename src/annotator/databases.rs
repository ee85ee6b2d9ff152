//! Germline reference database discovery.
//!
//! Bundled references live under the package data area:
//! `data/databases/<species>/<receptor>/` holds the BLAST database prefixes
//! `V`, `D` and `J` for one species and receptor family, and
//! `data/germlines/` holds the tool's internal and auxiliary data.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::resources::locator::{Result as ResolveResult, ResourceLocator};

/// Receptor families with bundled references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Receptor {
    /// Immunoglobulin (B-cell receptor)
    Ig,
    /// T-cell receptor
    Tcr,
}

impl Receptor {
    /// Directory name used in the bundled data layout.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Self::Ig => "Ig",
            Self::Tcr => "TCR",
        }
    }
}

impl fmt::Display for Receptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Germline segment databases within one receptor directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    V,
    D,
    J,
}

impl Segment {
    /// BLAST database prefix inside a receptor directory.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::V => "V",
            Self::D => "D",
            Self::J => "J",
        }
    }
}

/// One discovered database set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GermlineDatabase {
    pub species: String,
    pub receptor: Receptor,
    pub path: PathBuf,
}

impl GermlineDatabase {
    /// BLAST database prefix for one segment, e.g. `.../human/Ig/V`.
    pub fn segment(&self, segment: Segment) -> PathBuf {
        self.path.join(segment.prefix())
    }
}

/// Registry of bundled germline databases.
#[derive(Debug)]
pub struct GermlineRegistry {
    germline_root: PathBuf,
    databases: HashMap<(String, Receptor), GermlineDatabase>,
}

impl GermlineRegistry {
    /// Discover bundled databases through the locator.
    pub fn discover(locator: &ResourceLocator) -> ResolveResult<Self> {
        let germline_root = locator.data_path("germlines")?;
        let database_root = locator.data_path("databases")?;

        let mut databases = HashMap::new();
        let species_dirs = match std::fs::read_dir(&database_root) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("Failed to read {:?}: {}", database_root, err);
                return Ok(Self {
                    germline_root,
                    databases,
                });
            }
        };

        for entry in species_dirs.flatten() {
            let species_path = entry.path();
            if !species_path.is_dir() {
                continue;
            }
            let species = entry.file_name().to_string_lossy().to_string();

            for receptor in [Receptor::Ig, Receptor::Tcr] {
                let path = species_path.join(receptor.dir_name());
                if path.is_dir() {
                    databases.insert(
                        (species.clone(), receptor),
                        GermlineDatabase {
                            species: species.clone(),
                            receptor,
                            path,
                        },
                    );
                }
            }
        }

        log::debug!("Discovered {} germline database sets", databases.len());
        Ok(Self {
            germline_root,
            databases,
        })
    }

    /// Root passed to the tool via the `IGDATA` environment variable.
    pub fn germline_root(&self) -> &Path {
        &self.germline_root
    }

    /// Database set for a species and receptor.
    pub fn get(&self, species: &str, receptor: Receptor) -> Option<&GermlineDatabase> {
        self.databases.get(&(species.to_string(), receptor))
    }

    /// Auxiliary data file for a species, if bundled.
    pub fn aux_data(&self, species: &str) -> Option<PathBuf> {
        let path = self
            .germline_root
            .join("aux_data")
            .join(format!("{}_gl.aux", species));
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }

    /// All discovered database sets, ordered by species then receptor.
    pub fn list(&self) -> Vec<&GermlineDatabase> {
        let mut sets: Vec<&GermlineDatabase> = self.databases.values().collect();
        sets.sort_by(|a, b| {
            (a.species.as_str(), a.receptor.dir_name())
                .cmp(&(b.species.as_str(), b.receptor.dir_name()))
        });
        sets
    }
}
