use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use anytoany_core::{ControllerConfig, FormatCatalog, DEFAULT_FORMATS, DEFAULT_MAX_FILES};
use anytoany_engine::{UploadSettings, DEFAULT_ENDPOINT_PATH};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub(crate) const SETTINGS_FILENAME: &str = "anytoany.ron";

/// User-editable settings, read from `./anytoany.ron`.
///
/// Every field is optional in the file; missing ones take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub base_url: String,
    pub endpoint_path: String,
    pub max_files: usize,
    pub formats: Vec<String>,
    pub default_format: Option<String>,
    pub download_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_response_mb: u64,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            max_files: DEFAULT_MAX_FILES,
            formats: DEFAULT_FORMATS.iter().map(|f| (*f).to_string()).collect(),
            default_format: Some("png".to_string()),
            download_dir: PathBuf::from("downloads"),
            connect_timeout_secs: 10,
            request_timeout_secs: 300,
            max_response_mb: 512,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            max_files: self.max_files,
            formats: FormatCatalog::new(&self.formats),
            default_format: self.default_format.clone(),
        }
    }

    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            base_url: self.base_url.clone(),
            endpoint_path: self.endpoint_path.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs.max(1)),
            request_timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
            max_response_bytes: self.max_response_mb.saturating_mul(1024 * 1024),
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        convert_logging::parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

/// Loads settings from `path`; a missing file means defaults.
pub(crate) fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Settings::default());
        }
        Err(err) => {
            return Err(err).with_context(|| format!("failed to read settings from {path:?}"));
        }
    };

    ron::from_str(&content).with_context(|| format!("failed to parse settings in {path:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(&temp.path().join(SETTINGS_FILENAME)).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SETTINGS_FILENAME);
        fs::write(
            &path,
            r#"(base_url: "https://convert.example.com", max_files: 10, formats: ["png", "webp"])"#,
        )
        .unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.base_url, "https://convert.example.com");
        assert_eq!(settings.max_files, 10);
        assert_eq!(settings.download_dir, PathBuf::from("downloads"));

        let config = settings.controller_config();
        assert_eq!(config.max_files, 10);
        assert!(config.formats.contains("webp"));
        assert!(!config.formats.contains("pdf"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(SETTINGS_FILENAME);
        fs::write(&path, "(max_files: \"lots\")").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse settings"));
    }

    #[test]
    fn upload_settings_are_derived() {
        let settings = Settings {
            request_timeout_secs: 0,
            max_response_mb: 2,
            log_level: "bogus".to_string(),
            ..Settings::default()
        };
        let upload = settings.upload_settings();
        assert_eq!(upload.request_timeout, Duration::from_secs(1));
        assert_eq!(upload.max_response_bytes, 2 * 1024 * 1024);
        assert_eq!(settings.level_filter(), LevelFilter::Info);
    }
}
