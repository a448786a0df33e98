//! Team slot reservations.
//!
//! Before individuals are placed, every team with several competitors claims as many
//! first-round spots as it has members. Spots are chosen one at a time with a cost that
//! punishes a team facing itself, and weighs prior matchups against other teams by how early
//! in the bracket they could happen.

use crate::logic::topology::{depth_distance, generate_first_round_clashes, max_depth};
use crate::models::{BracketError, Clash, Competitor, TeamId, TeamPairingCount, TeamReservations};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

/// Cost of reserving a clash for a team. Lower is better; compared field by field.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct SlotCost {
    /// The team already holds a reservation in this clash. Dominates any history cost.
    pub same_team_clash: bool,
    /// Weighted count of prior matchups against the teams already reserved.
    pub history: u64,
}

/// Create the first-round clashes for `competitors` and reserve team spots in them.
///
/// Planning runs against a copy of `history`: the caller's history is only incremented when
/// competitors are actually placed.
pub fn create_reserved_teams_bracket_clashes<R: Rng + ?Sized>(
    competitors: &[Competitor],
    history: &TeamPairingCount,
    rng: &mut R,
    assign_single_competitor_teams: bool,
) -> Result<(Vec<Clash>, TeamReservations), BracketError> {
    let clashes = generate_first_round_clashes(competitors.len() as i64)?;
    let mut planning = history.clone();
    let reservations = reserve_team_slots(
        &clashes,
        competitors,
        &mut planning,
        rng,
        assign_single_competitor_teams,
    )?;
    Ok((clashes, reservations))
}

/// Reserve spots for every team in `competitors`, largest teams first.
///
/// With `assign_single_competitor_teams` off, one-member teams get no reservation and are left
/// to the pairing strategy. An empty bracket gets no reservations.
pub fn reserve_team_slots<R: Rng + ?Sized>(
    clashes: &[Clash],
    competitors: &[Competitor],
    history: &mut TeamPairingCount,
    rng: &mut R,
    assign_single_competitor_teams: bool,
) -> Result<TeamReservations, BracketError> {
    let mut reservations = TeamReservations::empty(clashes.len());
    if clashes.is_empty() {
        return Ok(reservations);
    }

    let mut required: Vec<(TeamId, usize)> = Vec::new();
    for team in competitors.iter().filter_map(Competitor::team) {
        match required.iter_mut().find(|(t, _)| t == team) {
            Some((_, count)) => *count += 1,
            None => required.push((team.clone(), 1)),
        }
    }

    for (team, count) in shuffle_teams_sorted_by_slots(&required, rng) {
        if count == 1 && !assign_single_competitor_teams {
            break;
        }
        reserve_slots_for_team(&mut reservations, clashes, &team, count, history)?;
    }
    Ok(reservations)
}

/// Teams ordered by required spots (descending); teams with the same count are shuffled.
pub fn shuffle_teams_sorted_by_slots<R: Rng + ?Sized>(
    required: &[(TeamId, usize)],
    rng: &mut R,
) -> Vec<(TeamId, usize)> {
    let mut by_count: BTreeMap<usize, Vec<TeamId>> = BTreeMap::new();
    for (team, count) in required {
        by_count.entry(*count).or_default().push(team.clone());
    }
    let mut sorted = Vec::with_capacity(required.len());
    for (count, mut teams) in by_count.into_iter().rev() {
        teams.shuffle(rng);
        sorted.extend(teams.into_iter().map(|t| (t, count)));
    }
    sorted
}

/// Reserve `required_slots` spots for `team`, re-rating all clashes after each reservation.
pub fn reserve_slots_for_team(
    reservations: &mut TeamReservations,
    clashes: &[Clash],
    team: &str,
    required_slots: usize,
    history: &mut TeamPairingCount,
) -> Result<(), BracketError> {
    for _ in 0..required_slots {
        let mut best: Option<(SlotCost, usize)> = None;
        for idx in 0..clashes.len() {
            let Some(cost) = rate_clash_for_team(reservations, clashes, idx, team, history) else {
                continue;
            };
            if best.map_or(true, |(best_cost, _)| cost < best_cost) {
                best = Some((cost, idx));
            }
        }
        let (cost, idx) = best.ok_or_else(|| {
            BracketError::IllegalState(format!("no clash left to reserve for team {}", team))
        })?;
        log::debug!("team {} reserves clash {} ({:?})", team, idx, cost);
        assign_team_to_clash(clashes, reservations, idx, team, history)?;
    }
    Ok(())
}

/// Cost of reserving clash `clash_idx` for `team`, or `None` if it has no room left.
pub fn rate_clash_for_team(
    reservations: &TeamReservations,
    clashes: &[Clash],
    clash_idx: usize,
    team: &str,
    history: &TeamPairingCount,
) -> Option<SlotCost> {
    let clash = clashes.get(clash_idx)?;
    let reserved = reservations.at(clash_idx);
    if reserved.len() == 2 || (reserved.len() == 1 && clash.is_bye) {
        return None;
    }

    let clash_count = clashes.len() as u64;
    let same_team_factor = clash_count * clash_count * 4;
    let reach = u64::from(max_depth(clashes.len())) + 1;

    let mut cost = SlotCost {
        same_team_clash: reserved.iter().any(|t| t == team),
        history: 0,
    };
    if clash.is_bye {
        cost.history += u64::from(history.byes(team));
    }
    for (other_idx, other_reserved) in reservations.iter().enumerate() {
        let distance = u64::from(depth_distance(clashes.len(), other_idx, clash_idx));
        for other_team in other_reserved {
            let mut penalty = u64::from(history.pairing(team, other_team));
            if other_team == team {
                penalty += same_team_factor;
            }
            cost.history += (reach - distance) * penalty;
        }
    }
    Some(cost)
}

/// Record a reservation of `team` in clash `clash_idx` and update `history` with the pairing
/// (or bye) it implies.
pub fn assign_team_to_clash(
    clashes: &[Clash],
    reservations: &mut TeamReservations,
    clash_idx: usize,
    team: &str,
    history: &mut TeamPairingCount,
) -> Result<(), BracketError> {
    let clash = clashes.get(clash_idx).ok_or(BracketError::IndexOutOfRange {
        index: clash_idx,
        len: clashes.len(),
    })?;
    let reserved = reservations.at(clash_idx);
    match reserved {
        [] if clash.is_bye => {
            history.record_bye(team);
        }
        [] => {}
        [other] if !clash.is_bye => {
            history.record_pairing(other, team);
        }
        _ => {
            return Err(BracketError::IllegalState(format!(
                "no empty space in clash {}",
                clash_idx
            )))
        }
    }
    reservations.push(clash_idx, team.to_string());
    Ok(())
}
