use crate::SessionState;

pub const IDLE_CAPTION: &str = "Convert Files";
pub const BUSY_CAPTION: &str = "Converting...";
pub const PROCESSING_NOTICE: &str = "Processing your files, please wait...";
pub const SUCCESS_MESSAGE: &str = "Conversion successful! Download started.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Warning,
    Danger,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub file_count: usize,
    pub count_label: String,
    pub submit_enabled: bool,
    pub submit_caption: String,
    pub busy: bool,
    pub processing_notice: Option<String>,
    pub alert: Option<Alert>,
    pub target_format: String,
    pub formats: Vec<String>,
    pub max_files: usize,
    pub last_download: Option<String>,
    pub dirty: bool,
}

/// Human label for the selection size, with singular/plural agreement.
pub fn count_label(count: usize) -> String {
    match count {
        0 => "No files selected".to_string(),
        1 => "1 file selected".to_string(),
        n => format!("{n} files selected"),
    }
}

pub fn limit_warning(max_files: usize) -> String {
    format!(
        "AnyToAny supports a maximum of {max_files} images per conversion. \
         The first {max_files} files will be processed."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_label_agrees_with_count() {
        assert_eq!(count_label(0), "No files selected");
        assert_eq!(count_label(1), "1 file selected");
        assert_eq!(count_label(2), "2 files selected");
        assert_eq!(count_label(73), "73 files selected");
    }

    #[test]
    fn limit_warning_states_the_maximum() {
        assert_eq!(
            limit_warning(50),
            "AnyToAny supports a maximum of 50 images per conversion. The first 50 files will be processed."
        );
    }
}
