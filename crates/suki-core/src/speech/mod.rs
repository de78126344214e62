//! Speech-to-text port.
//!
//! Voice input is an external capability: given a locale it produces one
//! transcript or fails. The transcript is then submitted through the same
//! path as typed text, with no special casing.

use std::future::Future;

use tracing::debug;

use suki_types::error::SpeechError;

/// Trait for speech-to-text backends.
///
/// Implementations live in suki-infra (e.g., `CommandSpeechRecognizer`).
pub trait SpeechRecognizer: Send + Sync {
    /// Listen once and return the raw transcript.
    fn recognize(&self, locale: &str) -> impl Future<Output = Result<String, SpeechError>> + Send;
}

/// Recognize once and normalize the transcript for submission.
///
/// Surrounding whitespace is stripped; an empty result is an error rather
/// than a silent no-op so the user gets a notice.
pub async fn transcribe<R: SpeechRecognizer>(
    recognizer: &R,
    locale: &str,
) -> Result<String, SpeechError> {
    let raw = recognizer.recognize(locale).await?;
    let transcript = raw.trim();
    if transcript.is_empty() {
        return Err(SpeechError::EmptyTranscript);
    }
    debug!(locale, chars = transcript.chars().count(), "speech recognized");
    Ok(transcript.to_string())
}
