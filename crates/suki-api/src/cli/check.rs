//! `suki check`: endpoint reachability and model availability.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use suki_infra::llm::probe_endpoint;

use crate::state::AppState;

pub async fn check(state: &AppState, json: bool) -> Result<()> {
    let endpoint = &state.config.endpoint;
    let probe = probe_endpoint(state.assembler.client(), &endpoint.model).await;
    let config_exists = tokio::fs::try_exists(&state.config_path).await.unwrap_or(false);
    let speech = state.recognizer.is_configured();

    let (reachable, model_installed, models, error) = match probe {
        Ok(status) => (true, status.model_installed, status.models, None),
        Err(e) => (false, false, Vec::new(), Some(e.to_string())),
    };

    if json {
        let check = serde_json::json!({
            "endpoint": endpoint.base_url,
            "model": endpoint.model,
            "reachable": reachable,
            "model_installed": model_installed,
            "models": models.iter().map(|m| m.name.clone()).collect::<Vec<_>>(),
            "error": error,
            "config_path": state.config_path.display().to_string(),
            "config_exists": config_exists,
            "speech_configured": speech,
            "healthy": reachable && model_installed,
        });
        println!("{}", serde_json::to_string_pretty(&check)?);
        return Ok(());
    }

    let check_mark = |ok: bool| {
        if ok {
            format!("{}", style("✓").green())
        } else {
            format!("{}", style("✗").red())
        }
    };

    println!();
    println!(
        "  {} Health check for {}",
        style("🔍").bold(),
        style(&endpoint.base_url).cyan()
    );
    println!();
    println!("  {} Endpoint reachable", check_mark(reachable));
    if let Some(error) = &error {
        println!("      {}", style(error).dim());
    }
    println!(
        "  {} Model '{}' installed",
        check_mark(model_installed),
        endpoint.model
    );
    println!(
        "  {} Speech command configured",
        check_mark(speech)
    );
    println!(
        "  {} Config file {}",
        check_mark(config_exists),
        style(state.config_path.display()).dim()
    );

    if !models.is_empty() {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Model").fg(Color::White),
            Cell::new("Size").fg(Color::White),
        ]);
        for model in &models {
            table.add_row(vec![
                Cell::new(&model.name).fg(Color::Cyan),
                Cell::new(model.size.map(format_size).unwrap_or_default()).fg(Color::DarkGrey),
            ]);
        }
        println!();
        println!("{table}");
    }
    println!();
    Ok(())
}

fn format_size(bytes: u64) -> String {
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    let bytes = bytes as f64;
    if bytes >= GB {
        format!("{:.1} GB", bytes / GB)
    } else {
        format!("{:.0} MB", bytes / MB)
    }
}
