//! Generator configuration.

use serde::{Deserialize, Serialize};

/// Options for [`crate::SingleEliminationGenerator`]. Missing fields take their defaults when
/// deserialized, so request bodies only need the fields they change.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Reserve spots per team to keep teammates apart.
    #[serde(default = "default_true")]
    pub use_teams: bool,
    /// Seed by rating (maximal separation of strong competitors) instead of at random.
    #[serde(default = "default_true")]
    pub use_rating: bool,
    /// Seed for reproducible brackets; wall-clock derived when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Extension point: three-way final when only three competitors remain. Not implemented.
    #[serde(default)]
    pub three_way_final: bool,
    /// Extension point: extra clash for third and fourth place. Not implemented.
    #[serde(default)]
    pub third_place_clash: bool,
}

fn default_true() -> bool {
    true
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            use_teams: true,
            use_rating: true,
            seed: None,
            three_way_final: false,
            third_place_clash: false,
        }
    }
}

impl GeneratorOptions {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Seed derived from the wall clock, used when the caller gives none.
pub fn time_seed() -> u64 {
    chrono::Utc::now().timestamp_micros() as u64
}
