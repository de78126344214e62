//! Application state wiring the configured services together.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::{Span, info_span};
use uuid::Uuid;

use suki_core::chat::assembler::ResponseAssembler;
use suki_core::chat::controller::TurnController;
use suki_core::chat::engine::TurnEngine;
use suki_infra::config::{default_config_path, load_config};
use suki_infra::llm::create_client;
use suki_infra::speech::CommandSpeechRecognizer;
use suki_observe::genai_attrs::{GEN_AI_RESPONSE_CHARS, SUKI_RESPONSE_FALLBACK};
use suki_types::config::SukiConfig;

use crate::cli::Cli;

/// Everything a command handler needs.
pub struct AppState {
    pub config: SukiConfig,
    pub config_path: PathBuf,
    pub assembler: Arc<ResponseAssembler>,
    pub recognizer: CommandSpeechRecognizer,
    pub session_id: Uuid,
}

impl AppState {
    /// Load the config file, apply CLI overrides, build the client.
    pub async fn init(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = cli.config.clone().unwrap_or_else(default_config_path);
        let mut config = load_config(&config_path)
            .await
            .with_context(|| format!("loading {}", config_path.display()))?;
        cli.apply_overrides(&mut config);
        Self::from_config(config, config_path)
    }

    pub fn from_config(config: SukiConfig, config_path: PathBuf) -> anyhow::Result<Self> {
        let client = create_client(&config.endpoint)?;
        let assembler = Arc::new(ResponseAssembler::from_config(
            client,
            &config.endpoint,
            &config.chat,
        ));
        let recognizer = CommandSpeechRecognizer::from_config(&config.speech);

        Ok(Self {
            config,
            config_path,
            assembler,
            recognizer,
            session_id: Uuid::now_v7(),
        })
    }

    /// A fresh conversation seeded with the configured greeting.
    pub fn new_controller(&self) -> TurnController {
        TurnController::new(self.config.chat.greeting.clone()).with_theme(self.config.chat.theme)
    }

    pub fn engine(&self) -> TurnEngine {
        TurnEngine::from_config(Arc::clone(&self.assembler), &self.config.chat)
    }

    /// Span covering one turn, from submission to the committed reply.
    pub fn turn_span(&self, operation: &'static str) -> Span {
        info_span!(
            "gen_ai.turn",
            gen_ai.operation.name = operation,
            gen_ai.request.model = %self.assembler.model(),
            gen_ai.agent.name = %self.config.chat.bot_name,
            session.id = %self.session_id,
            gen_ai.response.chars = tracing::field::Empty,
            suki.response.fallback = tracing::field::Empty,
        )
    }

    pub fn is_fallback(&self, reply: &str) -> bool {
        reply == self.assembler.fallback_reply()
    }
}

/// Fill in the reply fields declared by [`AppState::turn_span`].
pub fn record_reply(span: &Span, reply: &str, fallback: bool) {
    span.record(GEN_AI_RESPONSE_CHARS, reply.chars().count());
    span.record(SUKI_RESPONSE_FALLBACK, fallback);
}
