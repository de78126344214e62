//! Speech recognizer backed by an external command.
//!
//! The configured program is run once per `/voice` request with its
//! configured arguments followed by the locale. Whatever it prints on stdout
//! is the transcript.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use suki_core::speech::SpeechRecognizer;
use suki_types::config::SpeechConfig;
use suki_types::error::SpeechError;

/// Runs a speech-to-text program and reads its stdout.
#[derive(Debug, Clone, Default)]
pub struct CommandSpeechRecognizer {
    command: Option<String>,
    args: Vec<String>,
}

impl CommandSpeechRecognizer {
    pub fn new(command: Option<String>, args: Vec<String>) -> Self {
        Self { command, args }
    }

    pub fn from_config(config: &SpeechConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }

    /// Whether a command is configured at all.
    pub fn is_configured(&self) -> bool {
        self.command.is_some()
    }
}

impl SpeechRecognizer for CommandSpeechRecognizer {
    async fn recognize(&self, locale: &str) -> Result<String, SpeechError> {
        let Some(program) = self.command.as_deref() else {
            return Err(SpeechError::Unavailable);
        };

        debug!(program, locale, "running speech command");
        let output = Command::new(program)
            .args(&self.args)
            .arg(locale)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await;

        let output = match output {
            Ok(output) => output,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(program, "speech command not found");
                return Err(SpeechError::Unavailable);
            }
            Err(e) => return Err(SpeechError::Failed(e.to_string())),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::Failed(format!(
                "{}: {}",
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| SpeechError::Failed("transcript is not valid UTF-8".to_string()))
    }
}
