//! Turn controller: the conversation and its request/reveal state machine.
//!
//! ```text
//! Idle --submit--> Submitting --resolve--> Revealing --tick*--> Idle
//! ```
//!
//! The controller performs no I/O and never sleeps. Callers run the
//! assembler between `submit` and `resolve`, and call `tick` once per reveal
//! interval. Every refused operation leaves the conversation untouched.

use tracing::debug;

use suki_types::chat::{ChatPhase, Theme, Turn};
use suki_types::error::TurnError;

use super::suggestions;

/// Result of one reveal tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealStep {
    /// One more character is visible in the pending reveal.
    Typed(char),
    /// The reveal finished; the assistant turn was appended.
    Committed,
}

/// Reply being disclosed; `cursor` is the byte offset already revealed.
#[derive(Debug)]
struct Reveal {
    text: String,
    cursor: usize,
}

/// Owns the conversation, the pending reveal, and the theme flag.
#[derive(Debug)]
pub struct TurnController {
    conversation: Vec<Turn>,
    pending_reveal: String,
    phase: ChatPhase,
    reveal: Option<Reveal>,
    theme: Theme,
}

impl TurnController {
    /// Start a conversation seeded with one assistant greeting turn.
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            conversation: vec![Turn::assistant(greeting)],
            pending_reveal: String::new(),
            phase: ChatPhase::Idle,
            reveal: None,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// All committed turns, in creation order.
    pub fn conversation(&self) -> &[Turn] {
        &self.conversation
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.conversation.last()
    }

    /// Visible prefix of the reply being revealed; empty outside `Revealing`.
    pub fn pending_reveal(&self) -> &str {
        &self.pending_reveal
    }

    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and return the new one.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Accept a user message.
    ///
    /// Appends the user turn immediately and moves to `Submitting`. Returns
    /// the text the assembler must be called with.
    pub fn submit(&mut self, text: &str) -> Result<String, TurnError> {
        if self.phase.is_busy() {
            return Err(TurnError::Busy(self.phase));
        }
        if text.trim().is_empty() {
            return Err(TurnError::EmptyInput);
        }

        self.conversation.push(Turn::user(text));
        self.phase = ChatPhase::Submitting;
        debug!(turns = self.conversation.len(), "user turn appended");
        Ok(text.to_string())
    }

    /// Submit the catalog prompt at `index` (zero-based) through [`submit`](Self::submit).
    pub fn submit_suggestion(&mut self, index: usize) -> Result<String, TurnError> {
        let prompt = suggestions::get(index).ok_or(TurnError::UnknownSuggestion(index))?;
        self.submit(prompt)
    }

    /// Hand over the assembled reply and start revealing it.
    pub fn resolve(&mut self, reply: String) -> Result<(), TurnError> {
        if self.phase != ChatPhase::Submitting {
            return Err(TurnError::NotSubmitting(self.phase));
        }

        debug!(chars = reply.chars().count(), "reply received, revealing");
        self.pending_reveal.clear();
        self.reveal = Some(Reveal {
            text: reply,
            cursor: 0,
        });
        self.phase = ChatPhase::Revealing;
        Ok(())
    }

    /// Advance the reveal by one character.
    ///
    /// The tick after the last character commits the assistant turn, clears
    /// the pending reveal, and returns to `Idle`.
    pub fn tick(&mut self) -> Result<RevealStep, TurnError> {
        let reveal = self
            .reveal
            .as_mut()
            .ok_or(TurnError::NotRevealing(self.phase))?;

        if let Some(c) = reveal.text[reveal.cursor..].chars().next() {
            reveal.cursor += c.len_utf8();
            self.pending_reveal.push(c);
            return Ok(RevealStep::Typed(c));
        }

        if let Some(done) = self.reveal.take() {
            self.conversation.push(Turn::assistant(done.text));
        }
        self.pending_reveal.clear();
        self.phase = ChatPhase::Idle;
        debug!(turns = self.conversation.len(), "assistant turn committed");
        Ok(RevealStep::Committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suki_types::chat::Speaker;

    fn controller() -> TurnController {
        TurnController::new("¡Hola! Soy Suki")
    }

    #[test]
    fn test_seeded_with_greeting() {
        let c = controller();
        assert_eq!(c.conversation().len(), 1);
        assert_eq!(c.conversation()[0].speaker, Speaker::Assistant);
        assert_eq!(c.phase(), ChatPhase::Idle);
        assert!(c.pending_reveal().is_empty());
    }

    #[test]
    fn test_submit_appends_user_turn_synchronously() {
        let mut c = controller();
        let prompt = c.submit("Cuéntame un cuento").unwrap();
        assert_eq!(prompt, "Cuéntame un cuento");
        assert_eq!(c.conversation().len(), 2);
        assert_eq!(c.last_turn().unwrap(), &Turn::user("Cuéntame un cuento"));
        assert_eq!(c.phase(), ChatPhase::Submitting);
    }

    #[test]
    fn test_blank_submit_is_noop() {
        let mut c = controller();
        for text in ["", "   ", "\n\t "] {
            assert_eq!(c.submit(text), Err(TurnError::EmptyInput));
        }
        assert_eq!(c.conversation().len(), 1);
        assert_eq!(c.phase(), ChatPhase::Idle);
    }

    #[test]
    fn test_submit_rejected_while_submitting() {
        let mut c = controller();
        c.submit("uno").unwrap();
        assert_eq!(c.submit("dos"), Err(TurnError::Busy(ChatPhase::Submitting)));
        assert_eq!(c.conversation().len(), 2);
    }

    #[test]
    fn test_submit_rejected_while_revealing() {
        let mut c = controller();
        c.submit("uno").unwrap();
        c.resolve("Hola".to_string()).unwrap();
        c.tick().unwrap();
        assert_eq!(c.submit("dos"), Err(TurnError::Busy(ChatPhase::Revealing)));
        assert_eq!(c.conversation().len(), 2);
        assert_eq!(c.pending_reveal(), "H");
    }

    #[test]
    fn test_reveal_sequence_then_commit() {
        let mut c = controller();
        c.submit("saluda").unwrap();
        c.resolve("Hola".to_string()).unwrap();
        assert_eq!(c.phase(), ChatPhase::Revealing);

        let mut seen = Vec::new();
        loop {
            match c.tick().unwrap() {
                RevealStep::Typed(_) => seen.push(c.pending_reveal().to_string()),
                RevealStep::Committed => break,
            }
        }

        assert_eq!(seen, vec!["H", "Ho", "Hol", "Hola"]);
        assert_eq!(c.last_turn().unwrap(), &Turn::assistant("Hola"));
        assert!(c.pending_reveal().is_empty());
        assert_eq!(c.phase(), ChatPhase::Idle);
        assert_eq!(c.conversation().len(), 3);
    }

    #[test]
    fn test_reveal_multibyte_characters() {
        let mut c = controller();
        c.submit("x").unwrap();
        c.resolve("¡Sí! 💛".to_string()).unwrap();
        let mut typed = Vec::new();
        while let RevealStep::Typed(ch) = c.tick().unwrap() {
            typed.push(ch);
        }
        assert_eq!(typed, vec!['¡', 'S', 'í', '!', ' ', '💛']);
        assert_eq!(c.last_turn().unwrap().text, "¡Sí! 💛");
    }

    #[test]
    fn test_empty_reply_commits_on_first_tick() {
        let mut c = controller();
        c.submit("x").unwrap();
        c.resolve(String::new()).unwrap();
        assert_eq!(c.tick().unwrap(), RevealStep::Committed);
        assert_eq!(c.last_turn().unwrap(), &Turn::assistant(""));
        assert_eq!(c.phase(), ChatPhase::Idle);
    }

    #[test]
    fn test_resolve_requires_submitting() {
        let mut c = controller();
        assert_eq!(
            c.resolve("huh".to_string()),
            Err(TurnError::NotSubmitting(ChatPhase::Idle))
        );
        assert_eq!(c.tick(), Err(TurnError::NotRevealing(ChatPhase::Idle)));
    }

    #[test]
    fn test_accepts_again_after_commit() {
        let mut c = controller();
        c.submit("uno").unwrap();
        c.resolve("a".to_string()).unwrap();
        while c.tick().unwrap() != RevealStep::Committed {}
        assert!(c.submit("dos").is_ok());
        assert_eq!(c.conversation().len(), 4);
    }

    #[test]
    fn test_submit_suggestion() {
        let mut c = controller();
        let prompt = c.submit_suggestion(0).unwrap();
        assert_eq!(prompt, suggestions::get(0).unwrap());
        assert_eq!(c.last_turn().unwrap().speaker, Speaker::User);

        let mut c = controller();
        assert_eq!(
            c.submit_suggestion(10_000),
            Err(TurnError::UnknownSuggestion(10_000))
        );
        assert_eq!(c.conversation().len(), 1);
    }

    #[test]
    fn test_theme_toggle_independent_of_conversation() {
        let mut c = controller();
        c.submit("uno").unwrap();
        let start = c.theme();
        assert_eq!(c.toggle_theme(), start.toggled());
        assert_eq!(c.toggle_theme(), start);
        assert_eq!(c.phase(), ChatPhase::Submitting);
        assert_eq!(c.conversation().len(), 2);
    }

    #[test]
    fn test_with_theme() {
        let c = controller().with_theme(Theme::Dark);
        assert_eq!(c.theme(), Theme::Dark);
    }
}
