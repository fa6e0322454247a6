use std::time::Duration;

use anytoany_core::{FileData, SelectedFile, SubmissionRequest, TransportResponse};
use convert_logging::{convert_debug, convert_info};
use futures_util::StreamExt;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::UploadError;

pub const DEFAULT_ENDPOINT_PATH: &str = "upload-and-convert";

#[derive(Debug, Clone)]
pub struct UploadSettings {
    pub base_url: String,
    pub endpoint_path: String,
    pub connect_timeout: Duration,
    /// Upper bound for the whole request, so a hung server cannot pin the
    /// controller in its busy state.
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            endpoint_path: DEFAULT_ENDPOINT_PATH.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_response_bytes: 512 * 1024 * 1024,
        }
    }
}

impl UploadSettings {
    pub fn endpoint_url(&self) -> Result<Url, UploadError> {
        let invalid = |reason: String| UploadError::InvalidEndpoint {
            url: self.base_url.clone(),
            reason,
        };
        let mut base = Url::parse(&self.base_url).map_err(|err| invalid(err.to_string()))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(self.endpoint_path.trim_start_matches('/'))
            .map_err(|err| invalid(err.to_string()))
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Sends one conversion request.
    ///
    /// Non-2xx statuses are returned as `Ok`; deciding what they mean is left
    /// to the caller.
    async fn upload(&self, request: &SubmissionRequest) -> Result<TransportResponse, UploadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    settings: UploadSettings,
}

impl ReqwestUploader {
    pub fn new(settings: UploadSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, UploadError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| UploadError::Network(err.to_string()))
    }

    async fn build_form(&self, request: &SubmissionRequest) -> Result<Form, UploadError> {
        let mut form = Form::new().text("target_format", request.target_format.clone());
        for file in &request.files {
            form = form.part("files", file_part(file).await?);
        }
        Ok(form)
    }
}

async fn file_part(file: &SelectedFile) -> Result<Part, UploadError> {
    let bytes = match &file.data {
        FileData::Disk(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| UploadError::ReadFile {
                    name: file.name.clone(),
                    source,
                })?
        }
        FileData::Memory(bytes) => bytes.to_vec(),
    };
    Part::bytes(bytes)
        .file_name(file.name.clone())
        .mime_str("application/octet-stream")
        .map_err(|err| UploadError::Network(err.to_string()))
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(&self, request: &SubmissionRequest) -> Result<TransportResponse, UploadError> {
        let url = self.settings.endpoint_url()?;
        let client = self.build_client()?;
        let form = self.build_form(request).await?;

        convert_info!(
            "Upload {} files={} target_format={} url={}",
            request.submission_id,
            request.files.len(),
            request.target_format,
            url
        );

        let response = client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(UploadError::TooLarge {
                    max_bytes,
                    actual: Some(content_len),
                });
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(UploadError::TooLarge {
                    max_bytes,
                    actual: Some(next_len),
                });
            }
            body.extend_from_slice(&chunk);
        }

        convert_debug!(
            "Upload {} finished status={} bytes={} disposition={:?}",
            request.submission_id,
            status,
            body.len(),
            content_disposition
        );

        Ok(TransportResponse {
            status,
            content_disposition,
            body,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::Timeout;
    }
    UploadError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_base_and_path() {
        let settings = UploadSettings::default();
        assert_eq!(
            settings.endpoint_url().unwrap().as_str(),
            "http://127.0.0.1:8000/upload-and-convert"
        );

        let settings = UploadSettings {
            base_url: "https://tools.example.com/anytoany".to_string(),
            endpoint_path: "/upload-and-convert".to_string(),
            ..UploadSettings::default()
        };
        assert_eq!(
            settings.endpoint_url().unwrap().as_str(),
            "https://tools.example.com/anytoany/upload-and-convert"
        );
    }

    #[test]
    fn endpoint_url_rejects_garbage() {
        let settings = UploadSettings {
            base_url: "not a url".to_string(),
            ..UploadSettings::default()
        };
        assert!(matches!(
            settings.endpoint_url(),
            Err(UploadError::InvalidEndpoint { .. })
        ));
    }
}
