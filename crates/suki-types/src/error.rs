use thiserror::Error;

use crate::chat::ChatPhase;

/// Reasons the turn controller refuses an operation.
///
/// A refused operation leaves the conversation untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("message is empty")]
    EmptyInput,

    #[error("still answering the previous message ({0})")]
    Busy(ChatPhase),

    #[error("no reply is awaited (phase: {0})")]
    NotSubmitting(ChatPhase),

    #[error("no reply is being revealed (phase: {0})")]
    NotRevealing(ChatPhase),

    #[error("no suggestion number {0}")]
    UnknownSuggestion(usize),
}

/// Errors from the speech-to-text capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("speech recognition is not available")]
    Unavailable,

    #[error("speech recognition failed: {0}")]
    Failed(String),

    #[error("nothing was recognized")]
    EmptyTranscript,
}

/// Errors from loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {message}")]
    Io { path: String, message: String },

    #[error("invalid config: {0}")]
    Parse(String),
}
