//! Interactive terminal chat with Suki.
//!
//! Typed lines, suggestions and voice transcripts all go through the turn
//! controller. Replies are revealed character by character while input stays
//! live. Entry point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
