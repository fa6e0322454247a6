//! AnyToAny engine: upload IO and download materialization.
mod download;
mod engine;
mod types;
mod upload;

pub use download::{ensure_output_dir, sanitize_filename, ArtifactSaver};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use types::{EngineEvent, SaveError, UploadError};
pub use upload::{ReqwestUploader, UploadSettings, Uploader, DEFAULT_ENDPOINT_PATH};
