//! Optional speech capability
//!
//! Speech synthesis and recognition depend on what the host can do. The
//! session controller only talks to this trait; targets without audio use
//! [`SilentSpeech`].

use crate::api::decode_audio;
use crate::error::Result;
use async_trait::async_trait;

/// Something the interviewer says aloud
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    /// Text to speak
    pub text: String,

    /// Pre-rendered audio from the service, if any
    pub audio: Option<Vec<u8>>,
}

impl Utterance {
    /// Create a text-only utterance
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            audio: None,
        }
    }

    /// Create an utterance from service text and an optional base64 payload
    ///
    /// An undecodable payload is dropped; the text is still spoken.
    pub fn from_service<S: Into<String>>(text: S, audio: Option<&str>) -> Self {
        let audio = match decode_audio(audio) {
            Ok(audio) => audio,
            Err(e) => {
                tracing::warn!("Ignoring audio payload: {}", e);
                None
            }
        };
        Self {
            text: text.into(),
            audio,
        }
    }
}

/// Host speech synthesis and recognition
#[async_trait]
pub trait SpeechCapability: Send + Sync {
    /// Name of the capability, for logging
    fn name(&self) -> &str;

    /// Speak an interviewer utterance
    async fn speak(&self, utterance: &Utterance) -> Result<()>;

    /// Capture one spoken candidate response
    ///
    /// `None` means no transcript is available and typed input should be used.
    async fn listen(&self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Speech capability that does nothing
pub struct SilentSpeech;

#[async_trait]
impl SpeechCapability for SilentSpeech {
    fn name(&self) -> &str {
        "silent"
    }

    async fn speak(&self, _utterance: &Utterance) -> Result<()> {
        Ok(())
    }
}
