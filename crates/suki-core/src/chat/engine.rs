//! A complete turn for callers that do not multiplex other input.
//!
//! The interactive chat loop drives the controller itself so it can keep
//! reading input while busy; one-shot callers use [`TurnEngine::respond`].

use std::sync::Arc;
use std::time::Duration;

use suki_types::config::ChatConfig;
use suki_types::error::TurnError;

use super::assembler::ResponseAssembler;
use super::controller::TurnController;
use super::reveal::RevealDriver;

pub struct TurnEngine {
    assembler: Arc<ResponseAssembler>,
    driver: RevealDriver,
}

impl TurnEngine {
    pub fn new(assembler: Arc<ResponseAssembler>, reveal_delay: Duration) -> Self {
        Self {
            assembler,
            driver: RevealDriver::new(reveal_delay),
        }
    }

    pub fn from_config(assembler: Arc<ResponseAssembler>, chat: &ChatConfig) -> Self {
        Self::new(assembler, Duration::from_millis(chat.reveal_delay_ms))
    }

    pub fn driver(&self) -> RevealDriver {
        self.driver
    }

    /// Submit `text`, assemble the reply, and reveal it to completion.
    ///
    /// The user turn is appended before any network work starts. Returns the
    /// committed assistant text.
    pub async fn respond(
        &self,
        controller: &mut TurnController,
        text: &str,
        on_update: impl FnMut(&str),
    ) -> Result<String, TurnError> {
        let prompt = controller.submit(text)?;
        let reply = self.assembler.assemble(&prompt).await;
        controller.resolve(reply)?;
        self.driver.run(controller, on_update).await?;

        Ok(controller
            .last_turn()
            .map(|turn| turn.text.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::assembler::tests::{assembler, ScriptedClient, FALLBACK};
    use suki_types::chat::{ChatPhase, Speaker, Turn};

    fn engine(client: ScriptedClient) -> TurnEngine {
        TurnEngine::new(Arc::new(assembler(client)), Duration::ZERO)
    }

    #[tokio::test]
    async fn test_respond_full_turn() {
        let engine = engine(ScriptedClient::lines(&[
            r#"{"response":"Ho"}"#,
            r#"{"response":"la"}"#,
        ]));
        let mut c = TurnController::new("¡Hola!");
        let mut seen = Vec::new();

        let reply = engine
            .respond(&mut c, "saluda", |p| seen.push(p.to_string()))
            .await
            .unwrap();

        assert_eq!(reply, "Hola");
        assert_eq!(seen, vec!["H", "Ho", "Hol", "Hola"]);
        let speakers: Vec<Speaker> = c.conversation().iter().map(|t| t.speaker).collect();
        assert_eq!(
            speakers,
            vec![Speaker::Assistant, Speaker::User, Speaker::Assistant]
        );
        assert_eq!(c.phase(), ChatPhase::Idle);
    }

    #[tokio::test]
    async fn test_respond_with_unreachable_endpoint_reveals_fallback() {
        let engine = engine(ScriptedClient::unreachable());
        let mut c = TurnController::new("¡Hola!");
        let reply = engine.respond(&mut c, "hola", |_| {}).await.unwrap();
        assert_eq!(reply, FALLBACK);
        assert_eq!(c.last_turn().unwrap(), &Turn::assistant(FALLBACK));
    }

    #[tokio::test]
    async fn test_respond_blank_is_noop() {
        let engine = engine(ScriptedClient::lines(&[r#"{"response":"x"}"#]));
        let mut c = TurnController::new("¡Hola!");
        assert_eq!(
            engine.respond(&mut c, "  ", |_| {}).await,
            Err(TurnError::EmptyInput)
        );
        assert_eq!(c.conversation().len(), 1);
    }

    #[test]
    fn test_from_config_uses_reveal_delay() {
        let chat = ChatConfig {
            reveal_delay_ms: 40,
            ..ChatConfig::default()
        };
        let engine = TurnEngine::from_config(
            Arc::new(assembler(ScriptedClient::chunks(Vec::new()))),
            &chat,
        );
        assert_eq!(engine.driver().delay(), Duration::from_millis(40));
    }
}
