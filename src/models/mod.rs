//! Data structures for brackets: competitors, clashes, pairing history, options.

mod bracket;
mod clash;
mod competitor;
mod history;
mod options;
mod reservation;
mod season;

pub use bracket::{BracketError, SingleElimination};
pub use clash::Clash;
pub use competitor::{Competitor, TeamId};
pub use history::{PairingEntry, TeamPair, TeamPairingCount};
pub use options::{time_seed, GeneratorOptions};
pub use reservation::TeamReservations;
pub use season::{Season, SeasonId};
