//! AnyToAny core: pure upload-session state machine and view-model helpers.
mod disposition;
mod effect;
mod file;
mod interpret;
mod msg;
mod state;
mod surface;
mod update;
mod view_model;

pub use disposition::parse_content_disposition_filename;
pub use effect::{Effect, SubmissionId, SubmissionRequest};
pub use file::{FileData, SelectedFile};
pub use interpret::{
    derive_download_name, interpret, Outcome, TransportError, TransportResponse,
    DEFAULT_DOWNLOAD_STEM, GENERIC_FAILURE_MESSAGE,
};
pub use msg::Msg;
pub use state::{
    AppState, ControllerConfig, FormatCatalog, SessionState, DEFAULT_FORMATS, DEFAULT_MAX_FILES,
};
pub use surface::{render, UiSurface};
pub use update::update;
pub use view_model::{
    count_label, limit_warning, Alert, AlertKind, AppViewModel, BUSY_CAPTION, IDLE_CAPTION,
    PROCESSING_NOTICE, SUCCESS_MESSAGE,
};
