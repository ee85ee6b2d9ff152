//! Repseq - IgBLAST wrapper with robust bundled-resource resolution.

mod defaults;
pub mod error;

pub mod annotator;
pub mod resources;

pub use error::{Error, Result};

pub use resources::config::LocatorConfig;
pub use resources::locator::{data_path, resolve, ResolveError, ResourceLocator};
pub use resources::provider::PackageProvider;
pub use resources::strategy::ResolutionStrategy;

pub use annotator::databases::{GermlineDatabase, GermlineRegistry, Receptor, Segment};
pub use annotator::fetch::{DatabaseFetcher, FetchError};
pub use annotator::records::{AnnotationOutput, AnnotationRecord, RecordError};
pub use annotator::runner::{AnnotationOptions, IgBlastRunner, RunnerError, SequenceType};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
