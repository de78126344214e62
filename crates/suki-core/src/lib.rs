//! Core logic and port trait definitions for Suki.
//!
//! This crate defines the ports (inference client, speech recognizer) that
//! the infrastructure layer implements, plus everything that can be tested
//! without a network: stream fragment decoding, response assembly, and the
//! turn controller with its reveal driver. It depends only on `suki-types`.

pub mod chat;
pub mod llm;
pub mod speech;
