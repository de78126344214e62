//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`. Spanish aliases are accepted next to the English
//! names.

use std::io::{self, Write};

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the terminal screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Toggle between the light and dark theme.
    Theme,
    /// List the suggested prompts.
    Suggestions,
    /// Send suggestion number `n` (1-based).
    Suggest(usize),
    /// Listen once and send the transcript.
    Voice,
    /// Show the conversation so far.
    History,
    /// Unknown or malformed command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let (cmd, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((cmd, arg)) => (cmd.to_lowercase(), Some(arg.trim())),
        None => (trimmed.to_lowercase(), None),
    };

    let command = match cmd.as_str() {
        "/help" | "/h" | "/?" | "/ayuda" => ChatCommand::Help,
        "/clear" | "/cls" | "/limpiar" => ChatCommand::Clear,
        "/exit" | "/quit" | "/q" | "/salir" => ChatCommand::Exit,
        "/theme" | "/tema" => ChatCommand::Theme,
        "/suggestions" | "/sugerencias" | "/ideas" => ChatCommand::Suggestions,
        "/s" | "/suggest" => parse_suggestion_number(arg),
        "/voice" | "/voz" | "/v" => ChatCommand::Voice,
        "/history" | "/historial" => ChatCommand::History,
        other => ChatCommand::Unknown(other.to_string()),
    };
    Some(command)
}

fn parse_suggestion_number(arg: Option<&str>) -> ChatCommand {
    match arg.map(str::parse::<usize>) {
        Some(Ok(n)) if n > 0 => ChatCommand::Suggest(n),
        Some(Ok(_)) => ChatCommand::Unknown("suggestion numbers start at 1".to_string()),
        _ => ChatCommand::Unknown("/s requires a suggestion number".to_string()),
    }
}

/// Write the help text listing all available commands.
pub fn print_help(out: &mut impl Write) -> io::Result<()> {
    let rows = [
        ("/help", "Show this help message"),
        ("/clear", "Clear the screen"),
        ("/exit", "End the chat session"),
        ("/theme", "Toggle light/dark theme"),
        ("/suggestions", "List suggested prompts"),
        ("/s <n>", "Send suggestion number n"),
        ("/voice", "Speak your message"),
        ("/history", "Show the conversation so far"),
    ];

    writeln!(out)?;
    writeln!(out, "  {}", style("Available commands:").bold())?;
    writeln!(out)?;
    for (name, description) in rows {
        writeln!(out, "  {:<14} {}", style(name).cyan(), description)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style("Ctrl+D to exit. Messages sent while Suki is answering are not accepted.").dim()
    )?;
    writeln!(out)
}
