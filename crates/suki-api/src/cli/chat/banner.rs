//! Welcome banner display for chat sessions.

use console::style;

use suki_types::chat::Theme;

/// Print the welcome banner at the start of a chat session.
pub fn print_welcome_banner(name: &str, model: &str, endpoint: &str, theme: Theme, session_id: &str) {
    println!();
    println!("  💛 {}", style(name).magenta().bold());
    println!("  {}", style("tu acompañante virtual").dim());
    println!();
    println!("  {}     {}", style("Model:").bold(), style(model).dim());
    println!("  {}  {}", style("Endpoint:").bold(), style(endpoint).dim());
    println!("  {}     {}", style("Theme:").bold(), style(theme).dim());
    println!(
        "  {}   {}",
        style("Session:").bold(),
        style(&session_id[..8.min(session_id.len())]).dim()
    );
    println!();
    println!(
        "  {}",
        style("Type /help for commands, /s <n> for a suggestion, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}
