//! Conversation logic for Suki.
//!
//! - `assembler`: one request in, one complete reply string out
//! - `controller`: the turn list and its Idle/Submitting/Revealing machine
//! - `reveal`: timed character-by-character reveal driver
//! - `engine`: a whole turn (submit, assemble, reveal) for one-shot callers
//! - `suggestions`: the static catalog of suggested prompts

pub mod assembler;
pub mod controller;
pub mod engine;
pub mod reveal;
pub mod suggestions;
