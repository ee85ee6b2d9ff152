//! Error types for repseq.

use thiserror::Error;

/// Repseq error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Resource resolution error
    #[error("Resolve error: {0}")]
    Resolve(#[from] crate::resources::locator::ResolveError),

    /// Annotation tool error
    #[error("Runner error: {0}")]
    Runner(#[from] crate::annotator::runner::RunnerError),

    /// Output record error
    #[error("Record error: {0}")]
    Record(#[from] crate::annotator::records::RecordError),

    /// Bundle fetch error
    #[error("Fetch error: {0}")]
    Fetch(#[from] crate::annotator::fetch::FetchError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for repseq operations.
pub type Result<T> = std::result::Result<T, Error>;
