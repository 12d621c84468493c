//! Watchwave - movie and TV discovery from the terminal
//!
//! # Usage
//!
//! ```bash
//! watchwave browse popular --kind tv
//! watchwave browse top-rated --genre action --page 2
//! watchwave search "dune" --year 2021 --json
//! watchwave home
//! ```

// The binary compiles the shared modules directly; not all library surface
// is exercised from the CLI.
#![allow(dead_code)]

mod api;
mod cli;
mod commands;
mod config;
mod models;
mod store;

use clap::Parser;

use crate::cli::{Cli, Command, ExitCode, Output};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let exit_code = run(cli).await;
    std::process::exit(exit_code.into());
}

/// Dispatch one command and return its exit code.
async fn run(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    match cli.command {
        Command::Browse(cmd) => commands::browse_cmd(cmd, &output).await,
        Command::Home(cmd) => commands::home_cmd(cmd, &output).await,
        Command::Search(cmd) => commands::search_cmd(cmd, &output).await,
        Command::Discover(cmd) => commands::discover_cmd(cmd, &output).await,
        Command::Info(cmd) => commands::info_cmd(cmd, &output).await,
        Command::Credits(cmd) => commands::credits_cmd(cmd, &output).await,
        Command::Videos(cmd) => commands::videos_cmd(cmd, &output).await,
        Command::Similar(cmd) => commands::similar_cmd(cmd, &output).await,
        Command::Reviews(cmd) => commands::reviews_cmd(cmd, &output).await,
        Command::Providers(cmd) => commands::providers_cmd(cmd, &output).await,
        Command::Season(cmd) => commands::season_cmd(cmd, &output).await,
        Command::Episode(cmd) => commands::episode_cmd(cmd, &output).await,
        Command::Person(cmd) => commands::person_cmd(cmd, &output).await,
        Command::Genres(cmd) => commands::genres_cmd(cmd, &output).await,
        Command::Favorites(cmd) => commands::favorites_cmd(cmd, &output).await,
        Command::Theme(cmd) => commands::theme_cmd(cmd, &output).await,
    }
}
