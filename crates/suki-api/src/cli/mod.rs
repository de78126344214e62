//! CLI command definitions for the `suki` binary.
//!
//! Uses clap derive macros for argument parsing. Running `suki` with no
//! subcommand starts the interactive chat.

pub mod ask;
pub mod chat;
pub mod check;
pub mod suggestions;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use suki_types::config::SukiConfig;

/// Suki, your virtual companion, in the terminal.
#[derive(Parser)]
#[command(name = "suki", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Also export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    /// Config file (default: $SUKI_DATA_DIR/config.toml or ~/.suki/config.toml).
    #[arg(long, global = true, env = "SUKI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Model to request, overriding `[endpoint].model`.
    #[arg(long, global = true, env = "SUKI_MODEL")]
    pub model: Option<String>,

    /// Inference endpoint base URL, overriding `[endpoint].base_url`.
    #[arg(long, global = true, env = "SUKI_ENDPOINT")]
    pub endpoint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Apply `--model` / `--endpoint` on top of the loaded file.
    pub fn apply_overrides(&self, config: &mut SukiConfig) {
        if let Some(model) = &self.model {
            config.endpoint.model = model.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.base_url = endpoint.clone();
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive conversation (the default).
    Chat {
        /// Start with the dark theme regardless of the config file.
        #[arg(long)]
        dark: bool,
    },

    /// Send one message, print the reply and exit.
    Ask {
        /// The message; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List the suggested prompts.
    #[command(alias = "ideas")]
    Suggestions,

    /// Check that the inference endpoint is reachable and the model installed.
    Check,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_chat() {
        let cli = Cli::try_parse_from(["suki"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_ask_joins_words() {
        let cli = Cli::try_parse_from(["suki", "ask", "Cuéntame", "un", "cuento"]).unwrap();
        match cli.command {
            Some(Commands::Ask { text }) => assert_eq!(text.join(" "), "Cuéntame un cuento"),
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn test_ask_requires_text() {
        assert!(Cli::try_parse_from(["suki", "ask"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["suki", "check", "--json", "-vv", "--model", "mistral"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.model.as_deref(), Some("mistral"));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let cli = Cli::try_parse_from([
            "suki",
            "--model",
            "mistral",
            "--endpoint",
            "http://10.0.0.2:11434",
        ])
        .unwrap();
        let mut config = SukiConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.endpoint.model, "mistral");
        assert_eq!(config.endpoint.base_url, "http://10.0.0.2:11434");
        assert_eq!(config.endpoint.instruction_prefix, "Responde en español: ");
    }

    #[test]
    fn test_suggestions_alias() {
        let cli = Cli::try_parse_from(["suki", "ideas"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Suggestions)));
    }
}
