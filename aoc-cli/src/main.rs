//! AOC CLI - Command-line client for Advent of Code puzzles

mod cli;
mod commands;
mod config;
mod error;
mod session;

use aoc_http_client::AocClient;
use clap::Parser;
use cli::Args;
use config::{Config, Mode};
use error::CliError;
use session::SessionStore;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides `-v`
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), CliError> {
    let store = SessionStore::from_environment();
    let config = Config::from_args(args)?;
    tracing::debug!(mode = config.mode.name(), "configuration resolved");

    match config.mode {
        Mode::SaveSession { session } => commands::save_session(&store, &session),
        Mode::DownloadInput { puzzle, output } => {
            let client = connect(&store, &config.base_url)?;
            commands::download_input(&client, puzzle, &output)
        }
        Mode::DownloadDescription {
            puzzle,
            format,
            output,
        } => {
            let client = connect(&store, &config.base_url)?;
            let extractor = aoc_http_client::default_extractor();
            commands::download_description(&client, extractor.as_ref(), puzzle, format, &output)
        }
        Mode::Submit {
            puzzle,
            part,
            answer,
        } => {
            let client = connect(&store, &config.base_url)?;
            commands::submit(&client, puzzle, part, &answer).map(|_| ())
        }
        Mode::Check { puzzle } => {
            let client = connect(&store, &config.base_url)?;
            commands::check(&client, puzzle);
            Ok(())
        }
    }
}

/// Resolve the session cookie and build a client carrying it
fn connect(store: &SessionStore, base_url: &str) -> Result<AocClient, CliError> {
    let session = store.resolve()?.ok_or_else(|| CliError::MissingSession {
        home_file: store.home_file_display(),
    })?;

    let client = AocClient::builder()
        .base_url(base_url)?
        .session(&session)
        .build()?;
    tracing::debug!(base_url = %client.base_url(), "client ready");
    Ok(client)
}
