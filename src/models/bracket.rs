//! Full single-elimination bracket and BracketError.

use crate::models::clash::Clash;
use serde::{Deserialize, Serialize};

/// Errors that can occur while building a bracket. All of them abort the generation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Bad input (negative participant count, duplicate competitor name...).
    InvalidArgument(String),
    /// A first-round clash index outside the bracket.
    IndexOutOfRange { index: usize, len: usize },
    /// Reserving or placing into a clash that is already full.
    IllegalState(String),
    /// No legal first-round spot is left for this competitor.
    UnplaceableCompetitor { name: String },
    /// A declared but unimplemented bracket feature was requested.
    Unsupported(&'static str),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            BracketError::IndexOutOfRange { index, len } => {
                write!(f, "Clash index {} out of range (bracket has {} clashes)", index, len)
            }
            BracketError::IllegalState(msg) => write!(f, "Illegal state: {}", msg),
            BracketError::UnplaceableCompetitor { name } => {
                write!(f, "No legal slot left for competitor {}", name)
            }
            BracketError::Unsupported(feature) => write!(f, "{} is not supported", feature),
        }
    }
}

impl std::error::Error for BracketError {}

/// Rounds of a single-elimination bracket. `rounds[0]` is the first round, the last round
/// holds the final.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SingleElimination {
    rounds: Vec<Vec<Clash>>,
}

impl SingleElimination {
    pub(crate) fn from_rounds(rounds: Vec<Vec<Clash>>) -> Self {
        Self { rounds }
    }

    pub fn rounds(&self) -> &[Vec<Clash>] {
        &self.rounds
    }

    /// Clashes of round `idx` (0-based).
    pub fn round(&self, idx: usize) -> Option<&[Clash]> {
        self.rounds.get(idx).map(Vec::as_slice)
    }

    pub fn first_round(&self) -> &[Clash] {
        self.round(0).unwrap_or(&[])
    }

    pub fn final_clash(&self) -> Option<&Clash> {
        self.rounds.last().and_then(|r| r.first())
    }

    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// All clashes, round after round.
    pub fn all(&self) -> impl Iterator<Item = &Clash> {
        self.rounds.iter().flatten()
    }

    /// Position of `rounds[round][idx]` in [`SingleElimination::all`].
    pub fn flat_index(&self, round: usize, idx: usize) -> Option<usize> {
        let len = self.rounds.get(round)?.len();
        if idx >= len {
            return None;
        }
        Some(self.rounds[..round].iter().map(Vec::len).sum::<usize>() + idx)
    }

    /// Competitors placed in the first round.
    pub fn competitor_count(&self) -> usize {
        self.first_round().iter().map(Clash::occupant_count).sum()
    }
}
