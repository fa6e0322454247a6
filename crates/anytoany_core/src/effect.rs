use std::fmt;

use crate::SelectedFile;

/// Monotonic id tying an upload completion back to the submission that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SubmissionId(pub u64);

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything needed to issue one conversion request.
///
/// `files` is already truncated to the configured maximum, in selection order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub submission_id: SubmissionId,
    pub target_format: String,
    pub files: Vec<SelectedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the multipart request to the conversion endpoint.
    Upload(SubmissionRequest),
    /// Hand the converted payload to the download sink.
    SaveArtifact { filename: String, bytes: Vec<u8> },
    /// Reset the file-picker control so the same files can be picked again.
    ResetFilePicker,
}
