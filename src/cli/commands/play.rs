//! Play command - Interactive game against an oracle

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::{
    cli::output,
    game::{Game, Side},
    oracle::{MoveOracle, OracleKind, Validated},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FirstSide {
    Human,
    Cpu,
}

impl FirstSide {
    pub fn to_side(self) -> Side {
        match self {
            FirstSide::Human => Side::Human,
            FirstSide::Cpu => Side::Cpu,
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play an interactive game against the CPU")]
pub struct PlayArgs {
    /// Which side makes the first move
    #[arg(long, value_enum, default_value = "human")]
    pub first: FirstSide,

    /// Move source for the CPU side
    #[arg(long, short = 'o', value_enum, default_value = "engine")]
    pub opponent: OracleKind,

    /// Random seed (only affects the random oracle)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let mut oracle = Validated::new(args.opponent.into_boxed_oracle(args.seed));
    let mut game = Game::new(args.first.to_side());

    output::print_section("Infinite Tic-Tac-Toe");
    println!("You play X; the CPU plays O.");
    println!("Each side keeps 3 marks: a 4th placement removes the oldest.");
    println!("Enter a cell index (0-8, row-major) to move.\n");
    output::print_board(&game);

    let stdin = io::stdin();
    while !game.is_over() {
        match game.turn() {
            Side::Human => {
                print!("\nYour move: ");
                io::stdout().flush()?;

                let mut line = String::new();
                if stdin.lock().read_line(&mut line)? == 0 {
                    println!("\nInput closed, leaving the game.");
                    return Ok(());
                }

                let pos = match line.trim().parse::<usize>() {
                    Ok(pos) => pos,
                    Err(_) => {
                        println!("Please enter a cell index between 0 and 8.");
                        continue;
                    }
                };
                if let Err(e) = game.play(pos) {
                    println!("{e}");
                    continue;
                }
            }
            Side::Cpu => {
                let pos = oracle.best_move(game.moves(Side::Human), game.moves(Side::Cpu))?;
                let mv = game.play(pos)?;
                match mv.evicted {
                    Some(old) => println!("\nCPU plays {pos} (its mark at {old} vanishes)"),
                    None => println!("\nCPU plays {pos}"),
                }
            }
        }
        println!();
        output::print_board(&game);
    }

    let winner = game.winner().expect("finished game has a winner");
    let line = game.winning_line().expect("finished game has a line");
    output::print_subsection("Game over");
    println!(
        "{} wins on line {:?} after {} moves.",
        winner.label(),
        line,
        game.history().len()
    );

    Ok(())
}
