//! Pluggable move sources
//!
//! The engine is one implementation of a narrower contract: given the two
//! histories, produce one legal cell index. [`MoveOracle`] is that seam. A
//! front end can swap in another source (a remote service, a learned policy)
//! as long as answers are validated and an illegal or failed answer degrades
//! to a deterministic legal fallback; [`Validated`] enforces exactly that.

use clap::ValueEnum;
use rand::{prelude::IndexedRandom, rngs::StdRng, SeedableRng};

use crate::game::{empty_cells, MoveList};

/// A source of moves for one side
///
/// `opponent` and `own` are the two ordered histories, oldest first, from the
/// oracle's perspective: the side it plays for owns `own`.
pub trait MoveOracle {
    /// Short name for display in CLI output
    fn name(&self) -> &'static str;

    /// Choose a currently unoccupied cell
    fn best_move(&mut self, opponent: &MoveList, own: &MoveList) -> Result<usize, crate::Error>;
}

impl<O: MoveOracle + ?Sized> MoveOracle for Box<O> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn best_move(&mut self, opponent: &MoveList, own: &MoveList) -> Result<usize, crate::Error> {
        (**self).best_move(opponent, own)
    }
}

/// The minimax search engine as an oracle
#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOracle;

impl MoveOracle for EngineOracle {
    fn name(&self) -> &'static str {
        "engine"
    }

    fn best_move(&mut self, opponent: &MoveList, own: &MoveList) -> Result<usize, crate::Error> {
        crate::engine::select_move(opponent, own)
    }
}

/// Uniform random legal moves
///
/// Seedable for reproducible batches; an unseeded oracle draws its seed from
/// the OS.
#[derive(Debug, Clone)]
pub struct RandomOracle {
    rng: StdRng,
}

impl RandomOracle {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        RandomOracle { rng }
    }
}

impl MoveOracle for RandomOracle {
    fn name(&self) -> &'static str {
        "random"
    }

    fn best_move(&mut self, opponent: &MoveList, own: &MoveList) -> Result<usize, crate::Error> {
        empty_cells(opponent, own)
            .choose(&mut self.rng)
            .copied()
            .ok_or(crate::Error::NoValidMoves)
    }
}

/// Wrapper that guarantees a legal answer
///
/// The inner oracle's answer is checked against the current occupancy; an
/// out-of-range, occupied, or failed answer falls back to the lowest-index
/// empty cell. Untrusted oracles (anything outside this crate) should be
/// driven through this wrapper.
#[derive(Debug, Clone)]
pub struct Validated<O> {
    inner: O,
}

impl<O: MoveOracle> Validated<O> {
    pub fn new(inner: O) -> Self {
        Validated { inner }
    }
}

impl<O: MoveOracle> MoveOracle for Validated<O> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn best_move(&mut self, opponent: &MoveList, own: &MoveList) -> Result<usize, crate::Error> {
        let available = empty_cells(opponent, own);
        let fallback = available.first().copied().ok_or(crate::Error::NoValidMoves)?;

        match self.inner.best_move(opponent, own) {
            Ok(pos) if available.contains(&pos) => Ok(pos),
            Ok(_) | Err(_) => Ok(fallback),
        }
    }
}

/// Selectable oracle kinds for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OracleKind {
    /// Minimax search engine
    Engine,
    /// Uniform random legal moves
    Random,
}

impl OracleKind {
    /// Construct a boxed oracle of this kind
    pub fn into_boxed_oracle(self, seed: Option<u64>) -> Box<dyn MoveOracle> {
        match self {
            OracleKind::Engine => Box::new(EngineOracle),
            OracleKind::Random => Box::new(RandomOracle::new(seed)),
        }
    }
}
