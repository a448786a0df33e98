//! Season: a run of brackets sharing one team pairing history.

use crate::logic::{ClashGenerator, SingleEliminationGenerator};
use crate::models::bracket::{BracketError, SingleElimination};
use crate::models::competitor::Competitor;
use crate::models::history::TeamPairingCount;
use crate::models::options::GeneratorOptions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a season.
pub type SeasonId = Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub created_at: DateTime<Utc>,
    /// Brackets successfully generated in this season.
    pub brackets_generated: u32,
    pub history: TeamPairingCount,
}

impl Season {
    pub fn new() -> Self {
        Self::with_history(TeamPairingCount::new())
    }

    /// Continue a season from a previously stored history.
    pub fn with_history(history: TeamPairingCount) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            brackets_generated: 0,
            history,
        }
    }

    /// Generate a bracket, feeding and updating this season's pairing history.
    pub fn generate(
        &mut self,
        competitors: &[Competitor],
        options: GeneratorOptions,
    ) -> Result<SingleElimination, BracketError> {
        let mut generator = SingleEliminationGenerator::new(options);
        let bracket = generator.generate(competitors, &mut self.history)?;
        self.brackets_generated += 1;
        log::info!(
            "Season {}: bracket #{} generated for {} competitors",
            self.id,
            self.brackets_generated,
            competitors.len()
        );
        Ok(bracket)
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::new()
    }
}
