//! Running the bundled annotation tool.
//!
//! This module provides:
//! - Germline database discovery (`databases`)
//! - External tool invocation (`runner`)
//! - Structured output records (`records`)
//! - Reference bundle fetching (`fetch`)

pub mod databases;
pub mod fetch;
pub mod records;
pub mod runner;

pub use databases::{GermlineDatabase, GermlineRegistry, Receptor, Segment};
pub use fetch::{DatabaseFetcher, FetchError};
pub use records::{AnnotationOutput, AnnotationRecord, RecordError};
pub use runner::{AnnotationOptions, IgBlastRunner, RunnerError, SequenceType};
