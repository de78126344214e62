//! `suki suggestions`: list the suggested prompts.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use suki_core::chat::suggestions;

/// Print the catalog as a table, or as JSON with `--json`.
pub fn list_suggestions(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions_json())?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::White),
        Cell::new("Suggestion").fg(Color::White),
    ]);

    for (number, prompt) in suggestions::numbered() {
        table.add_row(vec![
            Cell::new(number).fg(Color::Cyan),
            Cell::new(prompt),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {}",
        style(format!(
            "{} suggestions. Send one in chat with /s <n>.",
            suggestions::len()
        ))
        .dim()
    );
    println!();
    Ok(())
}

fn suggestions_json() -> serde_json::Value {
    suggestions::numbered()
        .map(|(number, text)| serde_json::json!({ "number": number, "text": text }))
        .collect()
}
