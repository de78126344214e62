//! Suki terminal chat client entry point.
//!
//! Binary name: `suki`
//!
//! Parses CLI arguments, sets up tracing, loads the configuration, then
//! dispatches to the chat loop or a one-shot command.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;

use suki_observe::tracing_setup::{init_tracing, shutdown_tracing, verbosity_filter};
use suki_types::chat::Theme;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(verbosity_filter(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Neither needs configuration or a client.
    match &cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            generate(*shell, &mut cmd, "suki", &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Suggestions) => return cli::suggestions::list_suggestions(cli.json),
        _ => {}
    }

    let state = AppState::init(&cli).await?;

    match cli.command {
        None => cli::chat::loop_runner::run_chat_loop(&state, None).await?,
        Some(Commands::Chat { dark }) => {
            cli::chat::loop_runner::run_chat_loop(&state, dark.then_some(Theme::Dark)).await?
        }
        Some(Commands::Ask { text }) => {
            cli::ask::ask(&state, &text.join(" "), cli.json, cli.quiet).await?
        }
        Some(Commands::Check) => cli::check::check(&state, cli.json).await?,
        Some(Commands::Suggestions) | Some(Commands::Completions { .. }) => {
            unreachable!("handled above")
        }
    }

    Ok(())
}
