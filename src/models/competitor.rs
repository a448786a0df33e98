//! Competitor value object.

use serde::{Deserialize, Serialize};

/// Identifier of a team (club, school, academy...). Compared and ordered as plain text.
pub type TeamId = String;

/// A competitor to be placed in a bracket. Immutable once created.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    name: String,
    #[serde(default)]
    team: Option<TeamId>,
    rating: i32,
}

impl Competitor {
    /// Create a competitor. `rating` is higher for better competitors.
    pub fn new(name: impl Into<String>, team: Option<TeamId>, rating: i32) -> Self {
        Self {
            name: name.into(),
            team,
            rating,
        }
    }

    /// Competitor that belongs to `team`.
    pub fn with_team(name: impl Into<String>, team: impl Into<TeamId>, rating: i32) -> Self {
        Self::new(name, Some(team.into()), rating)
    }

    /// Competitor without a team.
    pub fn solo(name: impl Into<String>, rating: i32) -> Self {
        Self::new(name, None, rating)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> Option<&TeamId> {
        self.team.as_ref()
    }

    pub fn rating(&self) -> i32 {
        self.rating
    }
}

impl std::fmt::Display for Competitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.team {
            Some(team) => write!(f, "{} ({}, {})", self.name, team, self.rating),
            None => write!(f, "{} ({})", self.name, self.rating),
        }
    }
}
