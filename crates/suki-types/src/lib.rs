//! Shared domain types for Suki.
//!
//! This crate contains the types passed between the Suki layers: conversation
//! turns, controller phases, the inference wire format, configuration, and
//! the associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
