//! Main chat loop orchestration.
//!
//! One task owns the [`TurnController`] and multiplexes three event sources:
//! the next input line, the in-flight assembly (a spawned task), and the
//! reveal ticker. Input stays live while Suki answers; submissions arriving
//! meanwhile are refused by the controller.
//!
//! Notices go through the readline `SharedWriter`, which only emits complete
//! lines. The reveal is drawn straight to the terminal instead, one redraw
//! per tick.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use console::style;
use tokio::task::{JoinError, JoinHandle};
use tokio::time::MissedTickBehavior;
use tracing::{Instrument, Span, info, warn};

use suki_core::chat::controller::{RevealStep, TurnController};
use suki_core::chat::suggestions;
use suki_core::speech::transcribe;
use suki_observe::genai_attrs::OP_CHAT;
use suki_types::chat::{ChatPhase, Speaker, Theme};
use suki_types::error::{SpeechError, TurnError};

use crate::state::{AppState, record_reply};

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::renderer::ChatRenderer;

/// What the user asked to send.
enum Submission {
    Text(String),
    /// Zero-based catalog index.
    Suggestion(usize),
}

enum Flow {
    Continue,
    Exit,
}

/// Per-session state driven by the loop.
///
/// `writer` carries whole lines printed above the prompt; `terminal` receives
/// the character-by-character reveal.
struct ChatSession<'a, W: Write, T: Write> {
    state: &'a AppState,
    controller: TurnController,
    renderer: ChatRenderer,
    writer: W,
    terminal: T,
    in_flight: Option<JoinHandle<String>>,
    turn_span: Option<Span>,
}

impl<'a, W: Write, T: Write> ChatSession<'a, W, T> {
    fn bot_name(&self) -> &'a str {
        &self.state.config.chat.bot_name
    }

    fn notice(&mut self, marker: &str, message: impl std::fmt::Display) -> anyhow::Result<()> {
        writeln!(self.writer, "\n  {} {message}\n", style(marker).yellow().bold())?;
        Ok(())
    }

    /// Hand a message to the controller and start assembling the reply.
    fn submit(&mut self, submission: Submission) -> anyhow::Result<()> {
        let result = match submission {
            Submission::Text(text) => self.controller.submit(&text),
            Submission::Suggestion(index) => {
                let result = self.controller.submit_suggestion(index);
                if let Ok(prompt) = &result {
                    let user = self.renderer.user_prompt();
                    writeln!(self.writer, "{user}{prompt}")?;
                }
                result
            }
        };

        let prompt = match result {
            Ok(prompt) => prompt,
            Err(TurnError::EmptyInput) => return Ok(()),
            Err(TurnError::Busy(_)) => {
                return self.notice(
                    "…",
                    format!("{} is still answering. Send it again when the reply is done.", self.bot_name()),
                );
            }
            Err(e) => return self.notice("?", e),
        };

        let indicator = style(&self.state.config.chat.typing_indicator).dim().italic();
        writeln!(self.writer, "  {indicator}")?;

        let span = self.state.turn_span(OP_CHAT);
        let assembler = Arc::clone(&self.state.assembler);
        self.in_flight = Some(tokio::spawn(
            async move { assembler.assemble(&prompt).await }.instrument(span.clone()),
        ));
        self.turn_span = Some(span);
        Ok(())
    }

    /// The assembly task finished: start revealing.
    fn on_reply(&mut self, joined: Result<String, JoinError>) -> anyhow::Result<()> {
        self.in_flight = None;
        let reply = joined.unwrap_or_else(|e| {
            warn!(error = %e, "assembly task failed");
            self.state.assembler.fallback_reply().to_string()
        });

        if let Some(span) = &self.turn_span {
            record_reply(span, &reply, self.state.is_fallback(&reply));
        }
        self.controller.resolve(reply)?;
        self.draw_reveal()?;
        Ok(())
    }

    fn draw_reveal(&mut self) -> anyhow::Result<()> {
        let label = self.renderer.bot_label(self.bot_name());
        self.renderer
            .draw_reveal_line(&mut self.terminal, &label, self.controller.pending_reveal())?;
        Ok(())
    }

    fn on_tick(&mut self) -> anyhow::Result<()> {
        match self.controller.tick()? {
            RevealStep::Typed(c) => {
                if c == '\n' {
                    self.terminal.write_all(b"\r\n")?;
                }
                self.draw_reveal()?;
            }
            RevealStep::Committed => {
                self.terminal.write_all(b"\r\n")?;
                self.terminal.flush()?;
                // Lets readline redraw its prompt below the reply.
                writeln!(self.writer)?;
                if let Some(span) = self.turn_span.take() {
                    span.in_scope(|| info!(turns = self.controller.conversation().len(), "turn complete"));
                }
            }
        }
        Ok(())
    }

    async fn voice(&mut self) -> anyhow::Result<()> {
        if self.controller.phase().is_busy() {
            return self.notice("…", TurnError::Busy(self.controller.phase()));
        }

        writeln!(self.writer, "  {}", style("🎙️  Escuchando...").dim())?;
        let locale = &self.state.config.speech.locale;
        match transcribe(&self.state.recognizer, locale).await {
            Ok(transcript) => {
                let prompt = self.renderer.user_prompt();
                writeln!(self.writer, "{prompt}{transcript}")?;
                self.submit(Submission::Text(transcript))
            }
            Err(SpeechError::Unavailable) => self.notice(
                "!",
                format!(
                    "{}. Set [speech].command in {}",
                    SpeechError::Unavailable,
                    self.state.config_path.display()
                ),
            ),
            Err(e) => self.notice("!", e),
        }
    }

    fn toggle_theme(&mut self, input: &mut ChatInput) -> anyhow::Result<()> {
        let theme = self.controller.toggle_theme();
        self.renderer = ChatRenderer::new(theme);
        input.update_prompt(&self.renderer.user_prompt());
        writeln!(self.writer, "\n  {} Theme: {}\n", style("◐").bold(), style(theme).cyan())?;
        Ok(())
    }

    fn print_suggestions(&mut self) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        for (number, prompt) in suggestions::numbered() {
            writeln!(self.writer, "  {:>3}  {prompt}", style(number).cyan())?;
        }
        writeln!(self.writer, "\n  {}\n", style("Send one with /s <n>").dim())?;
        Ok(())
    }

    fn print_history(&mut self) -> anyhow::Result<()> {
        let bot_label = self.renderer.bot_label(self.bot_name());
        let user_label = self.renderer.user_label();
        let lines: Vec<String> = self
            .controller
            .conversation()
            .iter()
            .map(|turn| {
                let label = match turn.speaker {
                    Speaker::User => &user_label,
                    Speaker::Assistant => &bot_label,
                };
                format!("  {label} {}", preview(&turn.text, 100))
            })
            .collect();

        writeln!(self.writer)?;
        for line in lines {
            writeln!(self.writer, "{line}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    async fn handle_command(&mut self, command: ChatCommand, input: &mut ChatInput) -> anyhow::Result<Flow> {
        match command {
            ChatCommand::Help => commands::print_help(&mut self.writer)?,
            ChatCommand::Clear => input.clear(),
            ChatCommand::Exit => return Ok(Flow::Exit),
            ChatCommand::Theme => self.toggle_theme(input)?,
            ChatCommand::Suggestions => self.print_suggestions()?,
            ChatCommand::Suggest(number) => self.submit(Submission::Suggestion(number - 1))?,
            ChatCommand::Voice => self.voice().await?,
            ChatCommand::History => self.print_history()?,
            ChatCommand::Unknown(name) => {
                self.notice(
                    "?",
                    format!("Unknown command: {}. Type /help for available commands.", style(name).dim()),
                )?;
            }
        }
        Ok(Flow::Continue)
    }
}

/// Shorten `text` to `max` characters for one-line listings.
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{cut}...")
}

/// Resolves with the in-flight reply; never resolves while nothing is in flight.
async fn join_reply(in_flight: &mut Option<JoinHandle<String>>) -> Result<String, JoinError> {
    match in_flight.as_mut() {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

/// Run the interactive chat loop.
pub async fn run_chat_loop(state: &AppState, theme_override: Option<Theme>) -> anyhow::Result<()> {
    let chat = &state.config.chat;
    let mut controller = state.new_controller();
    if let Some(theme) = theme_override {
        controller = controller.with_theme(theme);
    }
    let renderer = ChatRenderer::new(controller.theme());

    print_welcome_banner(
        &chat.bot_name,
        state.assembler.model(),
        &state.config.endpoint.base_url,
        controller.theme(),
        &state.session_id.to_string(),
    );
    if let Some(greeting) = controller.last_turn() {
        println!(
            "  {} {}",
            renderer.bot_label(&chat.bot_name),
            renderer.render_final(&greeting.text).trim()
        );
        println!();
    }

    let (mut input, writer) = ChatInput::new(renderer.user_prompt())
        .map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    let mut session = ChatSession {
        state,
        controller,
        renderer,
        writer,
        terminal: std::io::stdout(),
        in_flight: None,
        turn_span: None,
    };

    // `interval` rejects a zero period.
    let delay = Duration::from_millis(chat.reveal_delay_ms.max(1));
    let mut ticker = tokio::time::interval(delay);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(session = %state.session_id, "chat session started");

    loop {
        let revealing = session.controller.phase() == ChatPhase::Revealing;

        tokio::select! {
            event = input.read_line() => match event {
                InputEvent::Eof => break,
                InputEvent::Interrupted => {
                    writeln!(session.writer, "\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim())?;
                }
                InputEvent::Message(text) => {
                    if text.is_empty() {
                        continue;
                    }
                    match commands::parse(&text) {
                        Some(command) => {
                            if let Flow::Exit = session.handle_command(command, &mut input).await? {
                                break;
                            }
                        }
                        None => session.submit(Submission::Text(text))?,
                    }
                }
            },
            joined = join_reply(&mut session.in_flight) => session.on_reply(joined)?,
            _ = ticker.tick(), if revealing => session.on_tick()?,
        }
    }

    writeln!(session.writer, "\n  {}", style("Session ended. ¡Hasta pronto! 💛").dim())?;
    info!(turns = session.controller.conversation().len(), "chat session ended");
    Ok(())
}
