use serde_json::Value;

use crate::parse_content_disposition_filename;

/// Message used when the backend rejects a request without a usable `detail`.
pub const GENERIC_FAILURE_MESSAGE: &str = "Conversion failed";

/// Download stem used when the response carries no filename.
pub const DEFAULT_DOWNLOAD_STEM: &str = "converted_files";

/// Raw transport result handed back by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response, or its body could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success {
        artifact: Vec<u8>,
        suggested_filename: String,
    },
    Failure {
        message: String,
    },
}

/// Turns a finished request into an [`Outcome`].
///
/// `submitted_count` is the number of files actually sent (after truncation);
/// it picks between `.zip` and `.{target_format}` when the server names no
/// extension.
pub fn interpret(
    result: Result<TransportResponse, TransportError>,
    submitted_count: usize,
    target_format: &str,
) -> Outcome {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            return Outcome::Failure {
                message: err.message,
            }
        }
    };

    if !response.is_success() {
        return Outcome::Failure {
            message: failure_message(&response.body),
        };
    }

    let suggested_filename = derive_download_name(
        response.content_disposition.as_deref(),
        submitted_count,
        target_format,
    );
    Outcome::Success {
        artifact: response.body,
        suggested_filename,
    }
}

/// Resolves the name the artifact is saved under.
pub fn derive_download_name(
    content_disposition: Option<&str>,
    submitted_count: usize,
    target_format: &str,
) -> String {
    let mut name = content_disposition
        .and_then(parse_content_disposition_filename)
        .unwrap_or_else(|| DEFAULT_DOWNLOAD_STEM.to_string());
    if !name.contains('.') {
        if submitted_count > 1 {
            name.push_str(".zip");
        } else {
            name.push('.');
            name.push_str(target_format);
        }
    }
    name
}

fn failure_message(body: &[u8]) -> String {
    let Ok(json) = serde_json::from_slice::<Value>(body) else {
        return GENERIC_FAILURE_MESSAGE.to_string();
    };
    match json.get("detail") {
        None | Some(Value::Null) => GENERIC_FAILURE_MESSAGE.to_string(),
        Some(Value::String(detail)) if detail.is_empty() => GENERIC_FAILURE_MESSAGE.to_string(),
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(entries)) => validation_messages(entries)
            .unwrap_or_else(|| Value::Array(entries.clone()).to_string()),
        Some(other) => other.to_string(),
    }
}

/// Joins the `msg` fields of a validation-error list, if every entry has one.
fn validation_messages(entries: &[Value]) -> Option<String> {
    if entries.is_empty() {
        return None;
    }
    let messages = entries
        .iter()
        .map(|entry| entry.get("msg").and_then(Value::as_str))
        .collect::<Option<Vec<_>>>()?;
    Some(messages.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_message_shapes() {
        assert_eq!(failure_message(br#"{"detail":"Unsupported format"}"#), "Unsupported format");
        assert_eq!(failure_message(br#"{"detail":null}"#), GENERIC_FAILURE_MESSAGE);
        assert_eq!(failure_message(br#"{"other":1}"#), GENERIC_FAILURE_MESSAGE);
        assert_eq!(failure_message(b"<html>502</html>"), GENERIC_FAILURE_MESSAGE);
        assert_eq!(failure_message(b""), GENERIC_FAILURE_MESSAGE);
        assert_eq!(failure_message(br#"{"detail":42}"#), "42");
        assert_eq!(
            failure_message(
                br#"{"detail":[{"loc":["body","files"],"msg":"field required"},{"msg":"too many"}]}"#
            ),
            "field required; too many"
        );
        assert_eq!(failure_message(br#"{"detail":[1,2]}"#), "[1,2]");
    }
}
