//! cvdeval-transcribe
//!
//! Audio-to-text transcription via the remote speech-to-text API.

pub mod error;

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::TranscribeError;

/// Model the transcription endpoint is asked to run.
const TRANSCRIPTION_MODEL: &str = "gpt-4o-transcribe";

/// Hint so dictation in other languages still comes back in English.
const LANGUAGE_PROMPT: &str = "Always generate in english";

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Client for the speech-to-text endpoint. Uploads a finished recording
/// as multipart form data and returns the transcript text.
pub struct Transcriber {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl Transcriber {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, TranscribeError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| TranscribeError::Network(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Transcribe a recorded audio file.
    ///
    /// Reads the file, uploads it along with the fixed model id and
    /// language prompt, and returns the transcript. The file's extension
    /// decides the MIME type; unsupported extensions fail before any
    /// upload happens.
    pub async fn transcribe_file(&self, path: &Path) -> Result<String, TranscribeError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("m4a")
            .to_lowercase();
        let mime = mime_type_for_extension(&ext)
            .ok_or_else(|| TranscribeError::UnsupportedFormat(ext.clone()))?;

        let bytes = tokio::fs::read(path).await?;
        info!(path = %path.display(), size = bytes.len(), "uploading audio for transcription");

        let file_part = reqwest::multipart::Part::bytes(bytes)
            .file_name(format!("recording.{ext}"))
            .mime_str(mime)
            .map_err(|e| TranscribeError::Api(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .part("file", file_part)
            .text("model", TRANSCRIPTION_MODEL)
            .text("prompt", LANGUAGE_PROMPT);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscribeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscribeError::Api(extract_error_message(&body)));
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscribeError::Parse(e.to_string()))?;

        info!(text_len = body.text.len(), "transcription complete");
        Ok(body.text)
    }
}

/// Pull the human-readable message out of the provider's error body.
///
/// The error format is:
/// ```json
/// { "error": { "message": "why it failed" } }
/// ```
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Unknown transcription error".to_string())
}

/// Map a recording's file extension to its upload MIME type.
///
/// Returns `None` for extensions the endpoint doesn't accept.
pub fn mime_type_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_lowercase().as_str() {
        "m4a" => Some("audio/m4a"),
        "mp4" => Some("audio/mp4"),
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "webm" => Some("audio/webm"),
        "ogg" => Some("audio/ogg"),
        "flac" => Some("audio/flac"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map() {
        assert_eq!(mime_type_for_extension("m4a"), Some("audio/m4a"));
        assert_eq!(mime_type_for_extension("WAV"), Some("audio/wav"));
        assert_eq!(mime_type_for_extension("txt"), None);
    }

    #[test]
    fn error_message_extracted_from_provider_body() {
        let body = r#"{"error": {"message": "Invalid file format."}}"#;
        assert_eq!(extract_error_message(body), "Invalid file format.");
    }

    #[test]
    fn unparseable_error_body_falls_back() {
        assert_eq!(extract_error_message("<html>"), "Unknown transcription error");
        assert_eq!(extract_error_message("{}"), "Unknown transcription error");
    }
}
