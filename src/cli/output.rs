//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::game::{Game, Side};

/// Create a progress bar for selfplay batches
pub fn create_selfplay_progress(total_games: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_games);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Print the board with cell indices in the empty cells
///
/// The mark the side to move is about to lose is shown lowercase.
pub fn print_board(game: &Game) {
    let fading = game.fading_mark();
    for row in 0..3 {
        print!("  ");
        for col in 0..3 {
            let pos = row * 3 + col;
            let c = match game.cell(pos) {
                Some(side) if fading == Some(pos) => side.to_char().to_ascii_lowercase(),
                Some(side) => side.to_char(),
                None => char::from_digit(pos as u32, 10).unwrap_or('?'),
            };
            print!("{c} ");
        }
        println!();
    }
    if let Some(pos) = fading {
        println!(
            "  ({}'s mark at {pos} vanishes with their next placement)",
            game.turn().label()
        );
    }
}

/// One-word description of a finished game for summaries
pub fn outcome_label(winner: Option<Side>) -> &'static str {
    match winner {
        Some(Side::Human) => "human",
        Some(Side::Cpu) => "cpu",
        None => "unfinished",
    }
}
