//! Clash: a single matchup slot for up to two competitors.

use crate::models::bracket::BracketError;
use crate::models::competitor::Competitor;
use serde::{Deserialize, Serialize};

/// One matchup. A bye clash holds a single competitor who advances automatically.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Clash {
    pub competitor_a: Option<Competitor>,
    pub competitor_b: Option<Competitor>,
    pub is_bye: bool,
    /// Index, in the next round, of the clash the winner advances to.
    pub winner_to: Option<usize>,
    /// Reserved for loser-bracket wiring; single elimination leaves it unset.
    pub loser_to: Option<usize>,
}

impl Clash {
    /// Empty clash with two open spots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty bye clash: only `competitor_a` can be filled.
    pub fn bye() -> Self {
        Self {
            is_bye: true,
            ..Self::default()
        }
    }

    /// True if another competitor can still be placed here.
    pub fn has_spot(&self) -> bool {
        self.competitor_a.is_none() || (self.competitor_b.is_none() && !self.is_bye)
    }

    /// Place a competitor in the first free spot.
    pub fn add_competitor(&mut self, competitor: Competitor) -> Result<(), BracketError> {
        if self.competitor_a.is_none() {
            self.competitor_a = Some(competitor);
        } else if self.competitor_b.is_none() && !self.is_bye {
            self.competitor_b = Some(competitor);
        } else {
            return Err(BracketError::IllegalState(format!(
                "clash has no spot left for {}",
                competitor.name()
            )));
        }
        Ok(())
    }

    /// Competitors currently placed in this clash.
    pub fn occupants(&self) -> impl Iterator<Item = &Competitor> {
        self.competitor_a.iter().chain(self.competitor_b.iter())
    }

    pub fn occupant_count(&self) -> usize {
        self.occupants().count()
    }
}

impl std::fmt::Display for Clash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let side = |c: &Option<Competitor>| match c {
            Some(c) => c.name().to_string(),
            None => "-".to_string(),
        };
        if self.is_bye {
            write!(f, "{} (bye)", side(&self.competitor_a))
        } else {
            write!(f, "{} vs {}", side(&self.competitor_a), side(&self.competitor_b))
        }
    }
}
