//! FeedExposure CLI - Command-line interface
//!
//! Replays recorded scroll traces through the exposure engine and offers a
//! few helpers for inspecting stage classification and configuration.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod trace;

use commands::{classify, config, replay};

#[derive(Debug, Parser)]
#[command(name = "feedexposure")]
#[command(version, about = "Exposure tracking for scrolling feeds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Replay a recorded scroll trace and print the emitted events
    Replay(replay::ReplayArgs),

    /// Print the exposure stage for a visibility ratio
    Classify(classify::ClassifyArgs),

    /// Show the effective engine configuration
    Config(config::ConfigArgs),
}

fn main() {
    // Logs go to stderr so replay output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedexposure=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Replay(args) => replay::run(args),
        Commands::Classify(args) => classify::run(args),
        Commands::Config(args) => config::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
