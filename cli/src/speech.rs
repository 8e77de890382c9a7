//! Speech synthesis through an external command
//!
//! The configured command is run through `sh -c` once per interviewer
//! message with the message text on stdin, e.g. `say`, `espeak --stdin` or
//! `piper --output-raw | aplay`.

use async_trait::async_trait;
use interview_core::error::{Error, Result};
use interview_core::speech::{SpeechCapability, Utterance};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

/// Speech capability backed by a shell command
pub struct CommandSpeech {
    command: String,
    shell: String,
}

impl CommandSpeech {
    /// Create a capability that pipes text into `command`
    pub fn new<S: Into<String>>(command: S) -> Self {
        Self {
            command: command.into(),
            shell: "sh".to_string(),
        }
    }
}

#[async_trait]
impl SpeechCapability for CommandSpeech {
    fn name(&self) -> &str {
        &self.command
    }

    async fn speak(&self, utterance: &Utterance) -> Result<()> {
        debug!(
            "Speaking {} characters via {}",
            utterance.text.len(),
            self.command
        );

        let mut child = Command::new(&self.shell)
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            // A command that ignores its input may exit before reading it
            let written = match stdin.write_all(utterance.text.as_bytes()).await {
                Ok(()) => stdin.shutdown().await,
                Err(e) => Err(e),
            };
            match written {
                Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e.into()),
                _ => {}
            }
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(Error::Generic(format!(
                "Speech command exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_text_is_piped_to_command() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("spoken.txt");
        let speech = CommandSpeech::new(format!("cat > '{}'", out.display()));

        speech
            .speak(&Utterance::text("Tell me about yourself."))
            .await
            .unwrap();

        let spoken = tokio::fs::read_to_string(&out).await.unwrap();
        assert_eq!(spoken, "Tell me about yourself.");
    }

    #[tokio::test]
    async fn test_failing_command_is_an_error() {
        let speech = CommandSpeech::new("echo broken >&2; exit 3");
        let err = speech.speak(&Utterance::text("hi")).await.unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[tokio::test]
    async fn test_listen_defaults_to_typed_input() {
        let speech = CommandSpeech::new("true");
        assert_eq!(speech.listen().await.unwrap(), None);
    }
}
