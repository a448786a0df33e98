//! Single-elimination bracket generator: library with models and bracket logic.
//!
//! Competitors are placed into first-round clashes so that teammates are kept apart, repeated
//! team-vs-team matchups get rarer across a season, and strong competitors meet as late as
//! possible.

pub mod logic;
pub mod models;

pub use logic::{
    brackets_depth_distance, brackets_max_depth_distance, build_rounds,
    create_reserved_teams_bracket_clashes, generate_first_round_clashes, read_roster,
    ClashGenerator, PairingsGenerator, RosterError, SingleEliminationGenerator,
};
pub use models::{
    BracketError, Clash, Competitor, GeneratorOptions, PairingEntry, Season, SeasonId,
    SingleElimination, TeamId, TeamPair, TeamPairingCount, TeamReservations,
};
