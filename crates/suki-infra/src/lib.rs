//! Infrastructure layer for Suki.
//!
//! Contains implementations of the ports defined in `suki-core`: the HTTP
//! client for an Ollama-style inference endpoint and the external-command
//! speech recognizer. Also loads `config.toml` from the data directory.

pub mod config;
pub mod llm;
pub mod speech;
