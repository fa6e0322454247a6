use crate::{SelectedFile, SubmissionId, TransportError, TransportResponse};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked or dropped files; replaces the whole selection.
    FilesSelected(Vec<SelectedFile>),
    /// User asked to drop the current selection.
    SelectionCleared,
    /// User chose a target format from the catalog.
    FormatChosen(String),
    /// User clicked Convert.
    SubmitClicked,
    /// Engine finished the request issued for `submission_id`.
    UploadFinished {
        submission_id: SubmissionId,
        result: Result<TransportResponse, TransportError>,
    },
    /// Download sink stored the artifact.
    ArtifactSaved { location: String },
    /// Download sink could not store the artifact.
    ArtifactSaveFailed { filename: String, message: String },
    /// Fallback for placeholder wiring.
    NoOp,
}
