//! Configuration types for Suki.
//!
//! `SukiConfig` represents `config.toml`. Every field has a default matching
//! the stock companion setup (a local Ollama with `llama2`, Spanish replies,
//! 25 ms typing delay), so an empty or missing file is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::chat::Theme;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SukiConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub speech: SpeechConfig,
}

/// Where and how to reach the inference endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the endpoint (without `/api/...`).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Prepended verbatim to every user prompt.
    #[serde(default = "default_instruction_prefix")]
    pub instruction_prefix: String,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama2".to_string()
}

fn default_instruction_prefix() -> String {
    "Responde en español: ".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            instruction_prefix: default_instruction_prefix(),
        }
    }
}

/// Conversation presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    /// Seed assistant turn of every conversation.
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Reply used when nothing could be generated.
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,

    /// Shown while a request is in flight.
    #[serde(default = "default_typing_indicator")]
    pub typing_indicator: String,

    /// Delay between revealed characters, in milliseconds.
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,

    #[serde(default)]
    pub theme: Theme,
}

fn default_bot_name() -> String {
    "Suki".to_string()
}

fn default_greeting() -> String {
    "🌟 ¡Hola! Soy Suki tu Acompañante virtual. Estoy aquí para contarte historias y acompañarte 💛"
        .to_string()
}

fn default_fallback_reply() -> String {
    "🤔 No pude generar respuesta.".to_string()
}

fn default_typing_indicator() -> String {
    "✍️ Suki está escribiendo...".to_string()
}

fn default_reveal_delay_ms() -> u64 {
    25
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            bot_name: default_bot_name(),
            greeting: default_greeting(),
            fallback_reply: default_fallback_reply(),
            typing_indicator: default_typing_indicator(),
            reveal_delay_ms: default_reveal_delay_ms(),
            theme: Theme::default(),
        }
    }
}

/// External speech-to-text command.
///
/// With no `command`, voice input reports itself unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    #[serde(default)]
    pub command: Option<String>,

    /// Extra arguments; the locale is appended after them.
    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default = "default_locale")]
    pub locale: String,
}

fn default_locale() -> String {
    "es-ES".to_string()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            command: None,
            args: Vec::new(),
            locale: default_locale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = SukiConfig::default();
        assert_eq!(config.endpoint.base_url, "http://localhost:11434");
        assert_eq!(config.endpoint.model, "llama2");
        assert_eq!(config.endpoint.instruction_prefix, "Responde en español: ");
        assert_eq!(config.chat.reveal_delay_ms, 25);
        assert_eq!(config.chat.fallback_reply, "🤔 No pude generar respuesta.");
        assert_eq!(config.chat.theme, Theme::Light);
        assert!(config.speech.command.is_none());
        assert_eq!(config.speech.locale, "es-ES");
    }

    #[test]
    fn test_deserialize_empty() {
        let config: SukiConfig = toml::from_str("").unwrap();
        assert_eq!(config.endpoint.model, "llama2");
        assert!(config.chat.greeting.starts_with("🌟"));
    }

    #[test]
    fn test_deserialize_partial_sections() {
        let toml_str = r#"
[endpoint]
model = "mistral"

[chat]
reveal_delay_ms = 0
theme = "dark"

[speech]
command = "whisper-listen"
args = ["--seconds", "5"]
"#;
        let config: SukiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.endpoint.model, "mistral");
        assert_eq!(config.endpoint.base_url, "http://localhost:11434");
        assert_eq!(config.chat.reveal_delay_ms, 0);
        assert_eq!(config.chat.theme, Theme::Dark);
        assert_eq!(config.chat.bot_name, "Suki");
        assert_eq!(config.speech.command.as_deref(), Some("whisper-listen"));
        assert_eq!(config.speech.args, vec!["--seconds", "5"]);
        assert_eq!(config.speech.locale, "es-ES");
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let result: Result<SukiConfig, _> = toml::from_str("[chat]\ntheme = \"sepia\"\n");
        assert!(result.is_err());
    }
}
