//! Stride CLI application
//!
//! Command-line interface for the stride goal execution tool.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use stride_core::SessionBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args { database_file, no_color, command } = Args::parse();

    let session = SessionBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize session")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Stride started");

    let cli = Cli::new(session, renderer);
    match command {
        Some(Commands::Plan { command }) => cli.handle_plan_command(command).await,
        Some(Commands::Task { command }) => cli.handle_task_command(command).await,
        Some(Commands::Streak) => cli.streak().await,
        Some(Commands::Calendar) => cli.calendar().await,
        // Bare `stride` shows what to work on right now.
        Some(Commands::Today) | None => cli.today().await,
    }
}
