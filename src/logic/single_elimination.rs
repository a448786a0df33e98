//! Single-elimination bracket: first-round pairings plus the rounds that follow.

use crate::logic::pairings::{ClashGenerator, PairingsGenerator};
use crate::models::{
    time_seed, BracketError, Clash, Competitor, GeneratorOptions, SingleElimination,
    TeamPairingCount,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Extend a filled first round into the full bracket.
///
/// Each round halves the previous one (rounding up); clashes `2k` and `2k + 1` send their
/// winners to clash `k` of the next round. Stops at the final.
pub fn build_rounds(first_round: Vec<Clash>) -> SingleElimination {
    if first_round.is_empty() {
        return SingleElimination::default();
    }
    let mut rounds = vec![first_round];
    loop {
        let last = rounds.len() - 1;
        let previous = &mut rounds[last];
        if previous.len() <= 1 {
            break;
        }
        for (idx, clash) in previous.iter_mut().enumerate() {
            clash.winner_to = Some(idx / 2);
        }
        let next_len = (previous.len() + 1) / 2;
        rounds.push(vec![Clash::new(); next_len]);
    }
    SingleElimination::from_rounds(rounds)
}

/// Generates complete single-elimination brackets.
pub struct SingleEliminationGenerator {
    options: GeneratorOptions,
    rng: ChaCha8Rng,
}

impl SingleEliminationGenerator {
    pub fn new(options: GeneratorOptions) -> Self {
        let seed = options.seed.unwrap_or_else(time_seed);
        Self {
            options,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl ClashGenerator for SingleEliminationGenerator {
    type Output = SingleElimination;

    fn generate(
        &mut self,
        competitors: &[Competitor],
        history: &mut TeamPairingCount,
    ) -> Result<SingleElimination, BracketError> {
        if self.options.third_place_clash && competitors.len() >= 4 {
            return Err(BracketError::Unsupported("third place clash"));
        }
        let pairing_seed = self.rng.gen_range(0..1u64 << 31);
        let mut pairings =
            PairingsGenerator::new(self.options.use_teams, self.options.use_rating, Some(pairing_seed));

        let mut updated = history.clone();
        let first_round = pairings.generate(competitors, &mut updated)?;
        if self.options.three_way_final
            && first_round.len() == 2
            && first_round.iter().any(|c| c.is_bye)
        {
            return Err(BracketError::Unsupported("three-way final"));
        }
        *history = updated;

        let bracket = build_rounds(first_round);
        log::info!(
            "single elimination bracket: {} competitors, {} rounds",
            competitors.len(),
            bracket.round_count()
        );
        Ok(bracket)
    }
}
