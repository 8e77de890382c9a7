//! Interview service trait and wire structures

use crate::error::{ApiError, ConfigError, Result};
use crate::interview::{Evaluation, Stage, Summary};
use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Trait for interview service clients
#[async_trait]
pub trait InterviewApi: Send + Sync {
    /// Open a session without a resume
    async fn start(&self) -> Result<SessionOpened>;

    /// Open a session from an uploaded resume
    async fn upload_resume(&self, resume: ResumeUpload) -> Result<SessionOpened>;

    /// Submit a candidate response and receive the next interviewer turn
    async fn respond(&self, session_id: &str, response: &str) -> Result<TurnResponse>;

    /// Fetch the aggregate evaluation of a session
    async fn summary(&self, session_id: &str) -> Result<Summary>;

    /// Terminate a session
    async fn end(&self, session_id: &str) -> Result<EndResponse>;

    /// Where the service lives, for logging
    fn base_url(&self) -> &str;
}

/// Response of `start` and `upload-resume`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOpened {
    /// Opaque session identifier
    pub session_id: String,

    /// Interviewer greeting
    pub message: String,

    /// Initial stage, when the service reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,

    /// Base64 encoded audio rendition of the greeting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// Body of a `respond` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondRequest {
    pub session_id: String,
    pub response: String,
}

/// Response of `respond`: the next interviewer turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    /// Next interviewer question
    pub question: String,

    /// Stage after processing the response
    pub stage: Stage,

    /// Scoring of the submitted response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,

    /// Base64 encoded audio rendition of the question
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// Response of `end`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EndResponse {
    /// Service acknowledgement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Final summary, when the service produced one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

/// A resume file ready to be sent as a multipart part
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    /// File name reported to the service
    pub file_name: String,

    /// Raw file contents
    pub bytes: Vec<u8>,

    /// Content type of the part
    pub content_type: mime::Mime,
}

impl ResumeUpload {
    /// Create an upload from in-memory contents
    pub fn new<S: Into<String>>(file_name: S, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name);
        Self {
            file_name,
            bytes,
            content_type,
        }
    }

    /// Read an upload from disk
    pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "resume".to_string(),
                value: path.display().to_string(),
            })?;
        let bytes = tokio::fs::read(path).await?;

        Ok(Self::new(file_name, bytes))
    }
}

/// Guess the content type of a resume from its extension
fn content_type_for(file_name: &str) -> mime::Mime {
    let extension = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());

    match extension.as_deref() {
        Some("pdf") => mime::APPLICATION_PDF,
        Some("txt") => mime::TEXT_PLAIN,
        Some("doc") => "application/msword"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            .parse()
            .unwrap_or(mime::APPLICATION_OCTET_STREAM),
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

/// Whether a session id can travel as exactly one URL path segment
///
/// URL normalization resolves `.` and `..` away instead of encoding them, and
/// a blank id would address the collection route.
pub fn is_valid_session_id(session_id: &str) -> bool {
    !session_id.trim().is_empty() && session_id != "." && session_id != ".."
}

/// Decode an optional base64 audio payload
pub fn decode_audio(audio: Option<&str>) -> Result<Option<Vec<u8>>> {
    match audio {
        Some(encoded) if !encoded.is_empty() => base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map(Some)
            .map_err(|e| {
                ApiError::Decode {
                    message: format!("Invalid audio payload: {}", e),
                }
                .into()
            }),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(
            ResumeUpload::new("cv.PDF", vec![]).content_type,
            mime::APPLICATION_PDF
        );
        assert_eq!(
            ResumeUpload::new("cv.docx", vec![])
                .content_type
                .essence_str(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        );
        assert_eq!(
            ResumeUpload::new("cv", vec![]).content_type,
            mime::APPLICATION_OCTET_STREAM
        );
    }

    #[tokio::test]
    async fn test_upload_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        tokio::fs::write(&path, b"%PDF-1.4").await.unwrap();

        let upload = ResumeUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, "resume.pdf");
        assert_eq!(upload.bytes, b"%PDF-1.4");
    }

    #[test]
    fn test_decode_audio() {
        assert_eq!(decode_audio(None).unwrap(), None);
        assert_eq!(decode_audio(Some("")).unwrap(), None);
        assert_eq!(decode_audio(Some("aGk=")).unwrap(), Some(b"hi".to_vec()));
        assert!(decode_audio(Some("!!not base64!!")).is_err());
    }

    #[test]
    fn test_session_id_must_be_a_single_segment() {
        assert!(is_valid_session_id("abc123"));
        assert!(is_valid_session_id("a/b"));
        assert!(is_valid_session_id("..."));
        assert!(!is_valid_session_id(""));
        assert!(!is_valid_session_id("  "));
        assert!(!is_valid_session_id("."));
        assert!(!is_valid_session_id(".."));
    }

    #[test]
    fn test_turn_response_without_evaluation() {
        let json = r#"{"question": "Why Rust?", "stage": "technical", "evaluation": null}"#;
        let turn: TurnResponse = serde_json::from_str(json).unwrap();
        assert_eq!(turn.stage.as_str(), "technical");
        assert!(turn.evaluation.is_none());
    }
}
