//! Bracket logic: topology, team reservations, pairings, round tree, roster import.

mod pairings;
mod reservations;
mod roster;
mod single_elimination;
mod topology;

pub use pairings::{
    assign_clash, find_competitor_clash_options, further_from_others, ClashGenerator,
    OpenSlotPlanner, PairingStrategy, PairingsGenerator, RandomPairing, RatingPairing,
    SlotPlanner, TeamSlotPlanner,
};
pub use reservations::{
    assign_team_to_clash, create_reserved_teams_bracket_clashes, rate_clash_for_team,
    reserve_slots_for_team, reserve_team_slots, shuffle_teams_sorted_by_slots, SlotCost,
};
pub use roster::{read_roster, RosterError};
pub use single_elimination::{build_rounds, SingleEliminationGenerator};
pub use topology::{
    brackets_depth_distance, brackets_max_depth_distance, bye_indices,
    generate_first_round_clashes,
};
