//! CPU move selection
//!
//! Depth-bounded minimax with alpha-beta pruning over the infinite variant's
//! state space. Eviction makes the space non-monotonic: marks disappear, the
//! board never fills, and positions can repeat, so there is no draw terminal
//! and no sound position cache without also keying on each side's placement
//! order. The search therefore recomputes nodes and cuts off at a fixed depth.
//!
//! Selection runs cheap stages before the search: an opening-book answer for
//! the first CPU move, then single-ply win and block scans. Each stage
//! enumerates candidate cells in ascending index order and takes the first
//! hit, which keeps the whole engine deterministic.

use serde::Serialize;

use crate::game::{empty_cells, ensure_disjoint, LineAnalyzer, MoveList};

/// Search horizon in plies; beyond it an undecided branch scores 0
const MAX_DEPTH: i32 = 8;

/// Score of a win at the root; wins deeper in the tree score lower
const WIN_SCORE: i32 = 100;

/// The center cell, strongest opening on a 3x3 board
const CENTER: usize = 4;

/// Which stage of [`select_move`] produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveReason {
    /// Opening book: take the center while it is open
    OpeningBook,
    /// A single move completes a CPU line
    ImmediateWin,
    /// A single move would complete a player line; take that cell
    ImmediateBlock,
    /// Full minimax search decided
    Search,
}

/// Select the CPU's next move
///
/// `player` and `cpu` are the two ordered histories, oldest first. The result
/// is always a currently unoccupied cell index.
///
/// # Errors
///
/// Returns error if the histories share a cell or no cell is empty. Both are
/// contract violations by the caller; the engine refuses rather than guess.
pub fn select_move(player: &MoveList, cpu: &MoveList) -> Result<usize, crate::Error> {
    select_move_explained(player, cpu).map(|(pos, _)| pos)
}

/// Select the CPU's next move along with the stage that decided it
///
/// Same contract as [`select_move`]; the reason is reported for analysis
/// output and does not affect the choice.
pub fn select_move_explained(
    player: &MoveList,
    cpu: &MoveList,
) -> Result<(usize, MoveReason), crate::Error> {
    ensure_disjoint(player, cpu)?;

    if player.is_empty() && cpu.is_empty() {
        return Ok((CENTER, MoveReason::OpeningBook));
    }
    if cpu.is_empty() && !player.contains(CENTER) {
        return Ok((CENTER, MoveReason::OpeningBook));
    }

    let available = empty_cells(player, cpu);
    if available.is_empty() {
        return Err(crate::Error::NoValidMoves);
    }

    // Single ply ahead: win now if possible, otherwise deny the player's win.
    for &pos in &available {
        if LineAnalyzer::has_line(&cpu.push_evict(pos)) {
            return Ok((pos, MoveReason::ImmediateWin));
        }
    }
    for &pos in &available {
        if LineAnalyzer::has_line(&player.push_evict(pos)) {
            return Ok((pos, MoveReason::ImmediateBlock));
        }
    }

    let mut best_score = i32::MIN;
    let mut best_move = available[0];

    for &pos in &available {
        let score = minimax(&cpu.push_evict(pos), player, 0, false, i32::MIN, i32::MAX);
        if score > best_score {
            best_score = score;
            best_move = pos;
        }
    }

    Ok((best_move, MoveReason::Search))
}

/// Score every empty cell with the full search, skipping the fast-path stages
///
/// Returns `(cell, score)` pairs in ascending cell order. The cell
/// [`select_move`] would pick in its search stage is the first maximum.
///
/// # Errors
///
/// Same contract violations as [`select_move`].
pub fn score_moves(
    player: &MoveList,
    cpu: &MoveList,
) -> Result<Vec<(usize, i32)>, crate::Error> {
    ensure_disjoint(player, cpu)?;

    let available = empty_cells(player, cpu);
    if available.is_empty() {
        return Err(crate::Error::NoValidMoves);
    }

    Ok(available
        .into_iter()
        .map(|pos| {
            let score = minimax(&cpu.push_evict(pos), player, 0, false, i32::MIN, i32::MAX);
            (pos, score)
        })
        .collect())
}

/// Minimax evaluator with alpha-beta pruning
///
/// `depth` counts plies from the root search call and is shared by both
/// sides. Wins score `WIN_SCORE - depth` (prefer faster wins), losses
/// `-WIN_SCORE + depth` (prefer slower losses), and branches still undecided
/// at `MAX_DEPTH` score 0.
fn minimax(
    cpu: &MoveList,
    player: &MoveList,
    depth: i32,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    if LineAnalyzer::has_line(cpu) {
        return WIN_SCORE - depth;
    }
    if LineAnalyzer::has_line(player) {
        return -WIN_SCORE + depth;
    }
    if depth >= MAX_DEPTH {
        return 0;
    }

    let available = empty_cells(cpu, player);
    if available.is_empty() {
        // Unreachable with the 3-mark limit; scored as undecided.
        return 0;
    }

    if maximizing {
        let mut max_eval = i32::MIN;
        for &pos in &available {
            let next = cpu.push_evict(pos);
            // A move that wins on the spot needs no deeper confirmation.
            if LineAnalyzer::has_line(&next) {
                return WIN_SCORE - depth;
            }
            let eval = minimax(&next, player, depth + 1, false, alpha, beta);
            max_eval = max_eval.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        max_eval
    } else {
        let mut min_eval = i32::MAX;
        for &pos in &available {
            let next = player.push_evict(pos);
            if LineAnalyzer::has_line(&next) {
                return -WIN_SCORE + depth;
            }
            let eval = minimax(cpu, &next, depth + 1, true, alpha, beta);
            min_eval = min_eval.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        min_eval
    }
}
