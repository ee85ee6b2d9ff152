//! External annotation tool invocation.
//!
//! The runner locates the bundled `igblastn` binary and germline data
//! through the resource locator, builds the child command, and turns the
//! tool's output into structured records.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::annotator::databases::{GermlineRegistry, Receptor, Segment};
use crate::annotator::records::{AnnotationOutput, RecordError};
use crate::defaults;
use crate::resources::locator::{ResolveError, ResourceLocator};

/// Errors that can occur while running the annotation tool.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("igblastn binary not found at {0:?}")]
    MissingBinary(PathBuf),

    #[error("no germline database for species '{species}' and receptor '{receptor}'")]
    MissingDatabase { species: String, receptor: String },

    #[error("igblastn exited with {status}: {stderr}")]
    ToolFailed {
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RunnerError>;

/// Sequence type submitted to the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceType {
    Nucleotide,
    Protein,
}

impl SequenceType {
    fn arg(&self) -> &'static str {
        match self {
            Self::Nucleotide => "nucl",
            Self::Protein => "prot",
        }
    }
}

/// Options for one annotation run.
#[derive(Debug, Clone)]
pub struct AnnotationOptions {
    pub species: String,
    pub receptor: Receptor,
    pub sequence_type: SequenceType,
    pub num_threads: usize,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            species: "human".to_string(),
            receptor: Receptor::Ig,
            sequence_type: SequenceType::Nucleotide,
            num_threads: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

/// Runs the bundled igblastn binary against a query file.
#[derive(Debug)]
pub struct IgBlastRunner {
    binary: PathBuf,
    registry: GermlineRegistry,
}

impl IgBlastRunner {
    /// Create a runner with a default locator.
    pub fn new() -> Result<Self> {
        Self::with_locator(&ResourceLocator::new())
    }

    /// Create a runner resolving paths through the given locator.
    pub fn with_locator(locator: &ResourceLocator) -> Result<Self> {
        let binary = Self::locate_binary(locator)?;
        let registry = GermlineRegistry::discover(locator)?;
        Ok(Self { binary, registry })
    }

    fn locate_binary(locator: &ResourceLocator) -> Result<PathBuf> {
        if let Ok(override_path) = std::env::var(defaults::IGBLAST_ENV) {
            let path = PathBuf::from(override_path);
            if path.is_file() {
                log::debug!("Using igblastn override: {:?}", path);
                return Ok(path);
            }
            return Err(RunnerError::MissingBinary(path));
        }

        let path = locator.data_path("bin/igblastn")?;
        if !path.is_file() {
            return Err(RunnerError::MissingBinary(path));
        }
        Ok(path)
    }

    /// Path of the binary this runner will invoke.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// The discovered database registry.
    pub fn registry(&self) -> &GermlineRegistry {
        &self.registry
    }

    /// Build the child command for a query without running it.
    pub fn command(&self, query: &Path, options: &AnnotationOptions) -> Result<Command> {
        let db = self
            .registry
            .get(&options.species, options.receptor)
            .ok_or_else(|| RunnerError::MissingDatabase {
                species: options.species.clone(),
                receptor: options.receptor.to_string(),
            })?;

        let mut command = Command::new(&self.binary);
        command.env("IGDATA", self.registry.germline_root());
        command.arg("-query").arg(query);
        command.arg("-germline_db_V").arg(db.segment(Segment::V));
        command.arg("-germline_db_D").arg(db.segment(Segment::D));
        command.arg("-germline_db_J").arg(db.segment(Segment::J));
        if let Some(aux) = self.registry.aux_data(&options.species) {
            command.arg("-auxiliary_data").arg(aux);
        }
        command.arg("-organism").arg(&options.species);
        command.arg("-ig_seqtype").arg(options.receptor.dir_name());
        command.arg("-seqtype").arg(options.sequence_type.arg());
        command.arg("-num_threads").arg(options.num_threads.to_string());
        // AIRR rearrangement rows, one per query sequence.
        command.arg("-outfmt").arg("19");
        command.stdout(Stdio::piped()).stderr(Stdio::piped());
        Ok(command)
    }

    /// Run the tool on a query file and parse its output records.
    pub fn annotate(&self, query: &Path, options: &AnnotationOptions) -> Result<AnnotationOutput> {
        let mut command = self.command(query, options)?;

        log::info!("Running igblastn from {:?}", self.binary);
        let output = command.output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(RunnerError::ToolFailed {
                status: output.status,
                stderr,
            });
        }

        let records = AnnotationOutput::from_reader(output.stdout.as_slice())?;
        log::info!("Annotated {} sequences", records.len());
        Ok(records)
    }
}
