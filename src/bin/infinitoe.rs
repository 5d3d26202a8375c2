//! infinitoe CLI - Infinite Tic-Tac-Toe against a minimax engine
//!
//! This CLI provides a unified interface for:
//! - Playing interactive games against the engine
//! - Analyzing positions and the engine's move choice
//! - Running oracle-vs-oracle selfplay batches

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "infinitoe")]
#[command(version, about = "Infinite Tic-Tac-Toe: 3 marks per side, oldest evicted", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game against the CPU
    Play(infinitoe::cli::commands::play::PlayArgs),

    /// Analyze a position from the engine's perspective
    Analyze(infinitoe::cli::commands::analyze::AnalyzeArgs),

    /// Run oracle-vs-oracle games and summarize the outcomes
    Selfplay(infinitoe::cli::commands::selfplay::SelfplayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => infinitoe::cli::commands::play::execute(args),
        Commands::Analyze(args) => infinitoe::cli::commands::analyze::execute(args),
        Commands::Selfplay(args) => infinitoe::cli::commands::selfplay::execute(args),
    }
}
