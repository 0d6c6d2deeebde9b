//! Shelf CLI - Markdown content server.
//!
//! Provides commands for:
//! - `serve`: Start the content server

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};

use commands::ServeArgs;
use error::CliError;
use output::Output;

/// Shelf - Markdown content server.
#[derive(Parser)]
#[command(name = "shelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the content server.
    Serve(ServeArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let result = match cli.command {
        Commands::Serve(args) => match tokio::runtime::Runtime::new() {
            Ok(rt) => rt.block_on(args.execute()),
            Err(err) => Err(CliError::Io(err)),
        },
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
