//! Selfplay command - Oracle-vs-oracle batches

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::output,
    game::{Game, Side},
    oracle::{MoveOracle, OracleKind, Validated},
};

#[derive(Parser, Debug)]
#[command(about = "Run oracle-vs-oracle games and summarize the outcomes")]
pub struct SelfplayArgs {
    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games: usize,

    /// Ply bound per game; the infinite variant has no draws, so a game that
    /// reaches the bound is recorded as unfinished
    #[arg(long, default_value_t = 60)]
    pub max_plies: usize,

    /// Move source for the CPU side
    #[arg(long, value_enum, default_value = "engine")]
    pub cpu_oracle: OracleKind,

    /// Move source standing in for the human side
    #[arg(long, value_enum, default_value = "random")]
    pub human_oracle: OracleKind,

    /// Which side makes the first move
    #[arg(long, value_enum, default_value = "human")]
    pub first: crate::cli::commands::play::FirstSide,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Export per-game results as CSV
    #[arg(long)]
    pub export: Option<PathBuf>,
}

struct GameRecord {
    index: usize,
    winner: Option<Side>,
    plies: usize,
}

pub fn execute(args: SelfplayArgs) -> Result<()> {
    let mut cpu_oracle = Validated::new(args.cpu_oracle.into_boxed_oracle(args.seed));
    let mut human_oracle = Validated::new(
        args.human_oracle
            .into_boxed_oracle(args.seed.map(|s| s.wrapping_add(1))),
    );

    output::print_section("Selfplay");
    output::print_kv("Games", &args.games.to_string());
    output::print_kv("CPU oracle", cpu_oracle.name());
    output::print_kv("Human oracle", human_oracle.name());
    output::print_kv("Ply bound", &args.max_plies.to_string());
    println!();

    let pb = output::create_selfplay_progress(args.games as u64);
    let mut records = Vec::with_capacity(args.games);
    let mut cpu_wins = 0usize;
    let mut human_wins = 0usize;

    for index in 0..args.games {
        let record = play_one(
            index,
            args.first.to_side(),
            args.max_plies,
            &mut human_oracle,
            &mut cpu_oracle,
        )?;

        match record.winner {
            Some(Side::Cpu) => cpu_wins += 1,
            Some(Side::Human) => human_wins += 1,
            None => {}
        }
        records.push(record);

        pb.set_message(format!("cpu {cpu_wins} / human {human_wins}"));
        pb.inc(1);
    }
    pb.finish_and_clear();

    let unfinished = args.games - cpu_wins - human_wins;
    let total_plies: usize = records.iter().map(|r| r.plies).sum();
    let mean_plies = if args.games > 0 {
        total_plies as f64 / args.games as f64
    } else {
        0.0
    };

    output::print_subsection("Results");
    output::print_kv("CPU wins", &cpu_wins.to_string());
    output::print_kv("Human wins", &human_wins.to_string());
    output::print_kv("Unfinished", &unfinished.to_string());
    output::print_kv("Mean plies", &format!("{mean_plies:.1}"));

    if let Some(path) = args.export {
        export_csv(&records, &path)?;
        println!("\nResults exported to: {}", path.display());
    }

    Ok(())
}

fn play_one<'a>(
    index: usize,
    first: Side,
    max_plies: usize,
    human_oracle: &'a mut dyn MoveOracle,
    cpu_oracle: &'a mut dyn MoveOracle,
) -> Result<GameRecord> {
    let mut game = Game::new(first);
    let mut plies = 0;

    while !game.is_over() && plies < max_plies {
        let side = game.turn();
        let oracle = match side {
            Side::Human => &mut *human_oracle,
            Side::Cpu => &mut *cpu_oracle,
        };
        let pos = oracle.best_move(game.moves(side.opponent()), game.moves(side))?;
        game.play(pos)?;
        plies += 1;
    }

    Ok(GameRecord {
        index,
        winner: game.winner(),
        plies,
    })
}

fn export_csv(records: &[GameRecord], path: &PathBuf) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record(["game", "winner", "plies"])?;
    for record in records {
        writer.write_record([
            record.index.to_string(),
            output::outcome_label(record.winner).to_string(),
            record.plies.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
