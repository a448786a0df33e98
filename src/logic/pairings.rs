//! First-round pairings: place concrete competitors into reserved or free clash spots.
//!
//! A [`PairingsGenerator`] is composed of a [`SlotPlanner`] (topology plus optional team
//! reservations) and a [`PairingStrategy`] (by rating or at random). All randomness comes
//! from one seeded generator per [`PairingsGenerator`].

use crate::logic::reservations::create_reserved_teams_bracket_clashes;
use crate::logic::topology::{depth_distance, generate_first_round_clashes};
use crate::models::{
    time_seed, BracketError, Clash, Competitor, TeamPairingCount, TeamReservations,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Something that lays out clashes for a list of competitors.
pub trait ClashGenerator {
    type Output;

    /// Build the clashes, reading and incrementing the caller's pairing `history`.
    fn generate(
        &mut self,
        competitors: &[Competitor],
        history: &mut TeamPairingCount,
    ) -> Result<Self::Output, BracketError>;
}

/// Produces empty first-round clashes and the team reservations to honour when filling them.
pub trait SlotPlanner {
    fn plan(
        &self,
        competitors: &[Competitor],
        history: &TeamPairingCount,
        rng: &mut ChaCha8Rng,
    ) -> Result<(Vec<Clash>, TeamReservations), BracketError>;
}

/// Fills planned clashes with competitors.
pub trait PairingStrategy {
    fn assign(
        &self,
        clashes: &mut [Clash],
        competitors: &[Competitor],
        reservations: &mut TeamReservations,
        history: &mut TeamPairingCount,
        rng: &mut ChaCha8Rng,
    ) -> Result<(), BracketError>;
}

/// Plans with team reservations so teammates are kept apart.
#[derive(Clone, Copy, Debug, Default)]
pub struct TeamSlotPlanner {
    /// Also reserve spots for teams with a single competitor.
    pub assign_single_competitor_teams: bool,
}

impl SlotPlanner for TeamSlotPlanner {
    fn plan(
        &self,
        competitors: &[Competitor],
        history: &TeamPairingCount,
        rng: &mut ChaCha8Rng,
    ) -> Result<(Vec<Clash>, TeamReservations), BracketError> {
        create_reserved_teams_bracket_clashes(
            competitors,
            history,
            rng,
            self.assign_single_competitor_teams,
        )
    }
}

/// Plans the bare topology, without reservations.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenSlotPlanner;

impl SlotPlanner for OpenSlotPlanner {
    fn plan(
        &self,
        competitors: &[Competitor],
        _history: &TeamPairingCount,
        _rng: &mut ChaCha8Rng,
    ) -> Result<(Vec<Clash>, TeamReservations), BracketError> {
        let clashes = generate_first_round_clashes(competitors.len() as i64)?;
        let reservations = TeamReservations::empty(clashes.len());
        Ok((clashes, reservations))
    }
}

/// Strongest competitors first, each as far as possible from those already placed.
#[derive(Clone, Copy, Debug, Default)]
pub struct RatingPairing;

impl PairingStrategy for RatingPairing {
    fn assign(
        &self,
        clashes: &mut [Clash],
        competitors: &[Competitor],
        reservations: &mut TeamReservations,
        history: &mut TeamPairingCount,
        _rng: &mut ChaCha8Rng,
    ) -> Result<(), BracketError> {
        let team_count = reservations.team_count();
        let reserved = |c: &Competitor| c.team().and_then(|t| team_count.get(t)).copied().unwrap_or(0);
        let mut sorted: Vec<&Competitor> = competitors.iter().collect();
        sorted.sort_by(|a, b| {
            b.rating()
                .cmp(&a.rating())
                .then_with(|| reserved(*b).cmp(&reserved(*a)))
        });

        for competitor in sorted {
            let options = find_competitor_clash_options(competitor, reservations, clashes);
            let idx = further_from_others(&options, clashes).ok_or_else(|| {
                BracketError::UnplaceableCompetitor {
                    name: competitor.name().to_string(),
                }
            })?;
            assign_clash(competitor, clashes, idx, reservations, history)?;
        }
        Ok(())
    }
}

/// Competitors in input order, each in a uniformly random legal clash.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPairing;

impl PairingStrategy for RandomPairing {
    fn assign(
        &self,
        clashes: &mut [Clash],
        competitors: &[Competitor],
        reservations: &mut TeamReservations,
        history: &mut TeamPairingCount,
        rng: &mut ChaCha8Rng,
    ) -> Result<(), BracketError> {
        for competitor in competitors {
            let options = find_competitor_clash_options(competitor, reservations, clashes);
            let idx = *options.choose(rng).ok_or_else(|| BracketError::UnplaceableCompetitor {
                name: competitor.name().to_string(),
            })?;
            assign_clash(competitor, clashes, idx, reservations, history)?;
        }
        Ok(())
    }
}

/// First-round pairings generator.
pub struct PairingsGenerator {
    planner: Box<dyn SlotPlanner>,
    strategy: Box<dyn PairingStrategy>,
    rng: ChaCha8Rng,
}

impl PairingsGenerator {
    /// `use_teams` keeps teammates apart through reservations; `use_rating` seeds by rating
    /// instead of at random. Without a `seed`, one is derived from the wall clock.
    pub fn new(use_teams: bool, use_rating: bool, seed: Option<u64>) -> Self {
        let planner: Box<dyn SlotPlanner> = if use_teams {
            // Rating mode places lone team members itself, so only random mode reserves them.
            Box::new(TeamSlotPlanner {
                assign_single_competitor_teams: !use_rating,
            })
        } else {
            Box::new(OpenSlotPlanner)
        };
        let strategy: Box<dyn PairingStrategy> = if use_rating {
            Box::new(RatingPairing)
        } else {
            Box::new(RandomPairing)
        };
        Self::with_components(planner, strategy, seed)
    }

    pub fn with_components(
        planner: Box<dyn SlotPlanner>,
        strategy: Box<dyn PairingStrategy>,
        seed: Option<u64>,
    ) -> Self {
        let seed = seed.unwrap_or_else(time_seed);
        Self {
            planner,
            strategy,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl ClashGenerator for PairingsGenerator {
    type Output = Vec<Clash>;

    /// Filled first-round clashes. On error the caller's history is left untouched.
    fn generate(
        &mut self,
        competitors: &[Competitor],
        history: &mut TeamPairingCount,
    ) -> Result<Vec<Clash>, BracketError> {
        check_unique_names(competitors)?;
        let (mut clashes, mut reservations) =
            self.planner.plan(competitors, history, &mut self.rng)?;
        if clashes.is_empty() {
            return Ok(clashes);
        }
        let mut updated = history.clone();
        self.strategy.assign(
            &mut clashes,
            competitors,
            &mut reservations,
            &mut updated,
            &mut self.rng,
        )?;
        *history = updated;
        log::debug!(
            "placed {} competitors in {} first-round clashes",
            competitors.len(),
            clashes.len()
        );
        Ok(clashes)
    }
}

fn check_unique_names(competitors: &[Competitor]) -> Result<(), BracketError> {
    let mut seen = HashSet::with_capacity(competitors.len());
    for competitor in competitors {
        if !seen.insert(competitor.name()) {
            return Err(BracketError::InvalidArgument(format!(
                "duplicate competitor name {}",
                competitor.name()
            )));
        }
    }
    Ok(())
}

/// Clash indices where `competitor` may be placed.
///
/// A competitor whose team holds an open reservation may only use those clashes. Otherwise
/// any clash with a free spot not promised to another team is legal.
pub fn find_competitor_clash_options(
    competitor: &Competitor,
    reservations: &TeamReservations,
    clashes: &[Clash],
) -> Vec<usize> {
    if let Some(team) = competitor.team() {
        let reserved: Vec<usize> = (0..clashes.len())
            .filter(|&idx| reservations.holds(idx, team) && clashes[idx].has_spot())
            .collect();
        if !reserved.is_empty() {
            return reserved;
        }
    }

    clashes
        .iter()
        .enumerate()
        .filter(|(idx, clash)| match reservations.at(*idx).len() {
            0 => clash.has_spot(),
            // the only spot left belongs to the reserving team
            1 => !clash.is_bye && clash.competitor_a.is_none(),
            _ => false,
        })
        .map(|(idx, _)| idx)
        .collect()
}

/// Option with the largest summed distance to every placed competitor; ties go to the
/// highest index.
pub fn further_from_others(options: &[usize], clashes: &[Clash]) -> Option<usize> {
    options
        .iter()
        .map(|&opt| {
            let spread: u64 = clashes
                .iter()
                .enumerate()
                .map(|(idx, clash)| {
                    u64::from(depth_distance(clashes.len(), opt, idx))
                        * clash.occupant_count() as u64
                })
                .sum();
            (spread, opt)
        })
        .max()
        .map(|(_, opt)| opt)
}

/// Place `competitor` in clash `clash_idx`, consuming its team's reservation there and
/// recording the resulting matchup in `history`.
pub fn assign_clash(
    competitor: &Competitor,
    clashes: &mut [Clash],
    clash_idx: usize,
    reservations: &mut TeamReservations,
    history: &mut TeamPairingCount,
) -> Result<(), BracketError> {
    let len = clashes.len();
    let clash = clashes
        .get_mut(clash_idx)
        .ok_or(BracketError::IndexOutOfRange {
            index: clash_idx,
            len,
        })?;
    clash.add_competitor(competitor.clone())?;
    if let Some(team) = competitor.team() {
        reservations.release(clash_idx, team);
    }
    log::debug!("{} placed in clash {}", competitor, clash_idx);

    if clash.is_bye {
        if let Some(team) = competitor.team() {
            history.record_bye(team);
        }
    } else if !clash.has_spot() {
        let teams = (
            clash.competitor_a.as_ref().and_then(Competitor::team),
            clash.competitor_b.as_ref().and_then(Competitor::team),
        );
        if let (Some(a), Some(b)) = teams {
            history.record_pairing(a, b);
        }
    }
    Ok(())
}
