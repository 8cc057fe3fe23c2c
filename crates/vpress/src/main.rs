//! vpress CLI - VitePress site configuration generator.
//!
//! Provides commands for:
//! - `generate`: Emit the VitePress configuration JSON
//! - `check`: Validate the configuration and summarize the sidebar

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, GenerateArgs};
use output::Output;

/// vpress - Sidebar and site configuration generator for research notes.
#[derive(Parser)]
#[command(name = "vpress", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the VitePress configuration JSON.
    Generate(GenerateArgs),
    /// Validate the configuration and summarize the sidebar.
    Check(CheckArgs),
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let output = Output::new();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
