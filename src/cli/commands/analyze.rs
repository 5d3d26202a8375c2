//! Analyze command - Score a position and explain the engine's choice

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::output,
    engine::{self, MoveReason},
    game::{Game, MoveList, Side},
};

#[derive(Parser, Debug)]
#[command(about = "Analyze a position from the engine's perspective")]
pub struct AnalyzeArgs {
    /// Player move history, oldest first (e.g. "0,4,8")
    #[arg(long, default_value = "")]
    pub player: String,

    /// CPU move history, oldest first
    #[arg(long, default_value = "")]
    pub cpu: String,

    /// Export the analysis as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[derive(Serialize)]
struct AnalysisExport {
    player: Vec<usize>,
    cpu: Vec<usize>,
    chosen: usize,
    reason: MoveReason,
    scores: Vec<CandidateScore>,
}

#[derive(Serialize)]
struct CandidateScore {
    position: usize,
    score: i32,
}

pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let player: MoveList = args.player.parse()?;
    let cpu: MoveList = args.cpu.parse()?;

    let game = Game::from_histories(player.clone(), cpu.clone(), Side::Cpu)?;

    output::print_section("Position Analysis");
    output::print_kv("Player (X)", &player.to_string());
    output::print_kv("CPU (O)", &cpu.to_string());
    println!();
    output::print_board(&game);

    if let Some(outcome) = game.outcome() {
        println!(
            "\nPosition is already decided: {} wins on {:?}.",
            outcome.winner.label(),
            outcome.line
        );
        return Ok(());
    }

    let (chosen, reason) = engine::select_move_explained(&player, &cpu)?;

    output::print_subsection("Engine decision");
    output::print_kv("Chosen move", &format!("{chosen} (row {}, col {})", chosen / 3, chosen % 3));
    output::print_kv(
        "Decided by",
        match reason {
            MoveReason::OpeningBook => "opening book (center)",
            MoveReason::ImmediateWin => "immediate win",
            MoveReason::ImmediateBlock => "immediate block",
            MoveReason::Search => "minimax search",
        },
    );

    let scores = engine::score_moves(&player, &cpu)?;
    output::print_subsection("Search scores per candidate");
    for &(pos, score) in &scores {
        println!("  position {pos} (row {}, col {}): {score:>4}", pos / 3, pos % 3);
    }

    if let Some(path) = args.export {
        let export = AnalysisExport {
            player: player.as_slice().to_vec(),
            cpu: cpu.as_slice().to_vec(),
            chosen,
            reason,
            scores: scores
                .iter()
                .map(|&(position, score)| CandidateScore { position, score })
                .collect(),
        };
        let json = serde_json::to_string_pretty(&export)?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write analysis to {}", path.display()))?;
        println!("\nAnalysis exported to: {}", path.display());
    }

    Ok(())
}
