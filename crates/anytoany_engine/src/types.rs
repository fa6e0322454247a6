use std::io;
use std::path::PathBuf;

use anytoany_core::{SubmissionId, TransportError, TransportResponse};
use thiserror::Error;

#[derive(Debug)]
pub enum EngineEvent {
    UploadCompleted {
        submission_id: SubmissionId,
        result: Result<TransportResponse, UploadError>,
    },
}

/// Failures before a complete HTTP response was in hand.
///
/// Display strings end up in the user-facing banner, so they stay short.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("invalid endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("could not read {name}: {source}")]
    ReadFile {
        name: String,
        #[source]
        source: io::Error,
    },
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("upload engine stopped")]
    EngineStopped,
    #[error("response too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64, actual: Option<u64> },
}

impl From<UploadError> for TransportError {
    fn from(err: UploadError) -> Self {
        TransportError::new(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("download directory {dir:?} unusable: {reason}")]
    OutputDir { dir: PathBuf, reason: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("no free name for {0}")]
    NameExhausted(String),
}
