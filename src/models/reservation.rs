//! Team reservations: clash spots claimed by a team before individuals are named.

use crate::models::competitor::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per first-round clash, the teams (0 to 2) holding a pending reservation there.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamReservations {
    slots: Vec<Vec<TeamId>>,
}

impl TeamReservations {
    /// No reservations for `clash_count` clashes.
    pub fn empty(clash_count: usize) -> Self {
        Self {
            slots: vec![Vec::new(); clash_count],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Teams holding a reservation in clash `idx` (empty for an unknown index).
    pub fn at(&self, idx: usize) -> &[TeamId] {
        self.slots.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &[TeamId]> {
        self.slots.iter().map(Vec::as_slice)
    }

    /// True if `team` holds a reservation in clash `idx`.
    pub fn holds(&self, idx: usize, team: &str) -> bool {
        self.at(idx).iter().any(|t| t == team)
    }

    pub(crate) fn push(&mut self, idx: usize, team: TeamId) {
        self.slots[idx].push(team);
    }

    /// Release one reservation of `team` in clash `idx`. Returns false if there was none.
    pub fn release(&mut self, idx: usize, team: &str) -> bool {
        let Some(slot) = self.slots.get_mut(idx) else {
            return false;
        };
        match slot.iter().position(|t| t == team) {
            Some(pos) => {
                slot.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Number of pending reservations per team.
    pub fn team_count(&self) -> HashMap<TeamId, usize> {
        let mut counts = HashMap::new();
        for team in self.slots.iter().flatten() {
            *counts.entry(team.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// Pending reservations held by `team`.
    pub fn count_for(&self, team: &str) -> usize {
        self.slots.iter().flatten().filter(|t| *t == team).count()
    }
}

impl From<Vec<Vec<TeamId>>> for TeamReservations {
    fn from(slots: Vec<Vec<TeamId>>) -> Self {
        Self { slots }
    }
}
