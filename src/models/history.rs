//! Team pairing history: how often two teams (or a team and a bye) have been matched.
//!
//! The history is owned by the caller and threaded through every generation call by `&mut`.
//! It is typically kept for a whole season so repeated team-vs-team matchups get rarer.

use crate::models::competitor::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key of a history entry.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamPair {
    /// A team drew a bye.
    Bye(TeamId),
    /// Two teams faced each other. Always stored with the smaller id first.
    Teams(TeamId, TeamId),
}

impl TeamPair {
    /// Unordered pair of teams.
    pub fn teams(a: &str, b: &str) -> Self {
        if a <= b {
            TeamPair::Teams(a.to_string(), b.to_string())
        } else {
            TeamPair::Teams(b.to_string(), a.to_string())
        }
    }

    pub fn bye(team: &str) -> Self {
        TeamPair::Bye(team.to_string())
    }
}

/// Serialized form of one history entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairingEntry {
    pub pair: TeamPair,
    pub count: u32,
}

/// Counts of prior matchups per team pair.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<PairingEntry>", into = "Vec<PairingEntry>")]
pub struct TeamPairingCount {
    counts: HashMap<TeamPair, u32>,
}

impl TeamPairingCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Times `a` and `b` have been paired (order does not matter).
    pub fn pairing(&self, a: &str, b: &str) -> u32 {
        self.get(&TeamPair::teams(a, b))
    }

    /// Times `team` has drawn a bye.
    pub fn byes(&self, team: &str) -> u32 {
        self.get(&TeamPair::bye(team))
    }

    pub fn get(&self, pair: &TeamPair) -> u32 {
        self.counts.get(pair).copied().unwrap_or(0)
    }

    /// Increment the count of `pair`, returning the new value.
    pub fn increment(&mut self, pair: TeamPair) -> u32 {
        let count = self.counts.entry(pair).or_insert(0);
        *count += 1;
        *count
    }

    pub fn record_pairing(&mut self, a: &str, b: &str) -> u32 {
        self.increment(TeamPair::teams(a, b))
    }

    pub fn record_bye(&mut self, team: &str) -> u32 {
        self.increment(TeamPair::bye(team))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TeamPair, u32)> {
        self.counts.iter().map(|(pair, count)| (pair, *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl From<Vec<PairingEntry>> for TeamPairingCount {
    fn from(entries: Vec<PairingEntry>) -> Self {
        let mut history = Self::new();
        for entry in entries {
            *history.counts.entry(entry.pair).or_insert(0) += entry.count;
        }
        history
    }
}

impl From<TeamPairingCount> for Vec<PairingEntry> {
    fn from(history: TeamPairingCount) -> Self {
        let mut entries: Vec<PairingEntry> = history
            .counts
            .into_iter()
            .map(|(pair, count)| PairingEntry { pair, count })
            .collect();
        entries.sort_by(|a, b| a.pair.cmp(&b.pair));
        entries
    }
}
