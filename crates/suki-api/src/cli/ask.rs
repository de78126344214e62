//! `suki ask`: one full turn without the interactive loop.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Instrument;

use suki_core::chat::engine::TurnEngine;
use suki_observe::genai_attrs::OP_TEXT_COMPLETION;

use crate::state::{AppState, record_reply};

/// Send `text`, reveal the reply on stdout, and exit.
///
/// With `--json` or `--quiet` the reply is printed at once instead of being
/// revealed character by character.
pub async fn ask(state: &AppState, text: &str, json: bool, quiet: bool) -> Result<()> {
    let mut controller = state.new_controller();
    let span = state.turn_span(OP_TEXT_COMPLETION);

    if json || quiet {
        let engine = TurnEngine::new(Arc::clone(&state.assembler), Duration::ZERO);
        let reply = engine
            .respond(&mut controller, text, |_| {})
            .instrument(span.clone())
            .await?;
        let fallback = state.is_fallback(&reply);
        record_reply(&span, &reply, fallback);

        if json {
            let out = serde_json::json!({
                "prompt": text,
                "reply": reply,
                "model": state.assembler.model(),
                "fallback": fallback,
                "session_id": state.session_id.to_string(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("{reply}");
        }
        return Ok(());
    }

    let chat = &state.config.chat;
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.magenta} {msg}")?);
    spinner.set_message(chat.typing_indicator.clone());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let label = style(&chat.bot_name).magenta().bold().to_string();
    let mut stdout = std::io::stdout();
    let mut shown = 0;

    let reply = state
        .engine()
        .respond(&mut controller, text, |pending| {
            if shown == 0 {
                spinner.finish_and_clear();
                print!("\n  {label} ");
            }
            print!("{}", &pending[shown..]);
            let _ = stdout.flush();
            shown = pending.len();
        })
        .instrument(span.clone())
        .await?;

    spinner.finish_and_clear();
    println!();
    println!();
    record_reply(&span, &reply, state.is_fallback(&reply));
    Ok(())
}
