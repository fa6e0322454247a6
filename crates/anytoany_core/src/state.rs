use crate::view_model::{
    count_label, limit_warning, Alert, AlertKind, AppViewModel, BUSY_CAPTION, IDLE_CAPTION,
    PROCESSING_NOTICE,
};
use crate::{SelectedFile, SubmissionId, SubmissionRequest};

/// Maximum number of files sent in one conversion request.
pub const DEFAULT_MAX_FILES: usize = 50;

/// Formats the conversion backend accepts out of the box.
pub const DEFAULT_FORMATS: &[&str] = &["jpg", "png", "webp", "gif", "bmp", "tiff", "ico", "pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Submitting,
}

/// The externally supplied list of target formats, lowercased and de-duplicated.
///
/// Never empty: an empty input falls back to [`DEFAULT_FORMATS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatCatalog {
    formats: Vec<String>,
}

impl FormatCatalog {
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cleaned: Vec<String> = Vec::new();
        for format in formats {
            let format = normalize_format(format.as_ref());
            if !format.is_empty() && !cleaned.contains(&format) {
                cleaned.push(format);
            }
        }
        if cleaned.is_empty() {
            return Self::default();
        }
        Self { formats: cleaned }
    }

    pub fn contains(&self, format: &str) -> bool {
        let format = normalize_format(format);
        self.formats.iter().any(|known| *known == format)
    }

    pub fn first(&self) -> &str {
        &self.formats[0]
    }

    pub fn as_slice(&self) -> &[String] {
        &self.formats
    }
}

impl Default for FormatCatalog {
    fn default() -> Self {
        Self {
            formats: DEFAULT_FORMATS.iter().map(|f| (*f).to_string()).collect(),
        }
    }
}

fn normalize_format(format: &str) -> String {
    format.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerConfig {
    pub max_files: usize,
    pub formats: FormatCatalog,
    pub default_format: Option<String>,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_files: DEFAULT_MAX_FILES,
            formats: FormatCatalog::default(),
            default_format: None,
        }
    }
}

/// Bookkeeping for the one request that may be in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingSubmission {
    pub(crate) submission_id: SubmissionId,
    pub(crate) submitted_count: usize,
    pub(crate) target_format: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    max_files: usize,
    formats: FormatCatalog,
    target_format: String,
    selection: Vec<SelectedFile>,
    pending: Option<PendingSubmission>,
    next_submission_id: u64,
    alert: Option<Alert>,
    last_download: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(ControllerConfig::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ControllerConfig) -> Self {
        let formats = config.formats;
        let target_format = config
            .default_format
            .as_deref()
            .filter(|format| formats.contains(format))
            .map(normalize_format)
            .unwrap_or_else(|| formats.first().to_string());
        Self {
            max_files: config.max_files.max(1),
            formats,
            target_format,
            selection: Vec::new(),
            pending: None,
            next_submission_id: 1,
            alert: None,
            last_download: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let submitting = self.pending.is_some();
        let file_count = self.selection.len();
        AppViewModel {
            session: self.session(),
            file_count,
            count_label: count_label(file_count),
            submit_enabled: file_count > 0 && !submitting,
            submit_caption: (if submitting { BUSY_CAPTION } else { IDLE_CAPTION }).to_string(),
            busy: submitting,
            processing_notice: submitting.then(|| PROCESSING_NOTICE.to_string()),
            alert: self.alert.clone(),
            target_format: self.target_format.clone(),
            formats: self.formats.as_slice().to_vec(),
            max_files: self.max_files,
            last_download: self.last_download.clone(),
            dirty: self.dirty,
        }
    }

    pub fn session(&self) -> SessionState {
        if self.pending.is_some() {
            SessionState::Submitting
        } else {
            SessionState::Idle
        }
    }

    pub fn selection(&self) -> &[SelectedFile] {
        &self.selection
    }

    pub fn target_format(&self) -> &str {
        &self.target_format
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub(crate) fn pending_submission(&self) -> Option<&PendingSubmission> {
        self.pending.as_ref()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replaces the selection wholesale and republishes the limit banner.
    pub(crate) fn replace_selection(&mut self, files: Vec<SelectedFile>) {
        self.selection = files;
        self.republish_limit_alert();
        self.mark_dirty();
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selection.clear();
        self.republish_limit_alert();
        self.mark_dirty();
    }

    fn republish_limit_alert(&mut self) {
        if self.selection.len() > self.max_files {
            self.show_alert(AlertKind::Warning, limit_warning(self.max_files));
        } else {
            self.alert = None;
        }
    }

    pub(crate) fn show_alert(&mut self, kind: AlertKind, message: impl Into<String>) {
        self.alert = Some(Alert {
            kind,
            message: message.into(),
        });
        self.mark_dirty();
    }

    pub(crate) fn choose_format(&mut self, format: &str) -> bool {
        if !self.formats.contains(format) {
            return false;
        }
        let format = normalize_format(format);
        if format != self.target_format {
            self.target_format = format;
            self.mark_dirty();
        }
        true
    }

    /// Moves Idle -> Submitting and builds the (truncated) request.
    ///
    /// Returns `None` when already submitting or nothing is selected.
    pub(crate) fn begin_submission(&mut self) -> Option<SubmissionRequest> {
        if self.pending.is_some() || self.selection.is_empty() {
            return None;
        }
        let submission_id = SubmissionId(self.next_submission_id);
        self.next_submission_id += 1;

        let files: Vec<SelectedFile> = self
            .selection
            .iter()
            .take(self.max_files)
            .cloned()
            .collect();
        self.pending = Some(PendingSubmission {
            submission_id,
            submitted_count: files.len(),
            target_format: self.target_format.clone(),
        });
        self.mark_dirty();

        Some(SubmissionRequest {
            submission_id,
            target_format: self.target_format.clone(),
            files,
        })
    }

    /// Moves Submitting -> Idle if `submission_id` is the one in flight.
    pub(crate) fn finish_submission(
        &mut self,
        submission_id: SubmissionId,
    ) -> Option<PendingSubmission> {
        match &self.pending {
            Some(pending) if pending.submission_id == submission_id => {
                self.mark_dirty();
                self.pending.take()
            }
            _ => None,
        }
    }

    pub(crate) fn set_last_download(&mut self, location: String) {
        self.last_download = Some(location);
        self.mark_dirty();
    }
}
