//! Integration tests for full single-elimination brackets and seasons.

use bracketeer::{
    BracketError, ClashGenerator, Competitor, GeneratorOptions, Season, SingleEliminationGenerator,
    TeamPairingCount,
};

fn players(n: usize) -> Vec<Competitor> {
    (0..n)
        .map(|i| {
            let team = ["wolves", "bears", "owls"][i % 3];
            Competitor::with_team(format!("p{i}"), team, 2000 - i as i32 * 25)
        })
        .collect()
}

#[test]
fn rounds_link_winners_forward() {
    let mut generator = SingleEliminationGenerator::new(GeneratorOptions::seeded(8));
    let bracket = generator
        .generate(&players(5), &mut TeamPairingCount::new())
        .unwrap();
    let sizes: Vec<usize> = bracket.rounds().iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![4, 2, 1]);
    assert_eq!(bracket.competitor_count(), 5);

    for (round_idx, round) in bracket.rounds().iter().enumerate() {
        for (idx, clash) in round.iter().enumerate() {
            assert_eq!(clash.loser_to, None);
            match bracket.round(round_idx + 1) {
                Some(next) => {
                    let to = clash.winner_to.expect("winner link");
                    assert_eq!(to, idx / 2);
                    assert!(to < next.len());
                }
                None => assert_eq!(clash.winner_to, None),
            }
        }
    }
    assert_eq!(bracket.all().count(), 7);
    assert_eq!(bracket.flat_index(1, 1), Some(5));
    assert_eq!(bracket.flat_index(2, 0), Some(6));
    assert_eq!(bracket.flat_index(2, 1), None);
}

#[test]
fn seeded_generation_is_reproducible() {
    let options = GeneratorOptions {
        use_rating: false,
        ..GeneratorOptions::seeded(1234)
    };
    let first = SingleEliminationGenerator::new(options.clone())
        .generate(&players(11), &mut TeamPairingCount::new())
        .unwrap();
    let second = SingleEliminationGenerator::new(options)
        .generate(&players(11), &mut TeamPairingCount::new())
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn tiny_fields() {
    let mut history = TeamPairingCount::new();
    let empty = SingleEliminationGenerator::new(GeneratorOptions::seeded(0))
        .generate(&players(1), &mut history)
        .unwrap();
    assert_eq!(empty.round_count(), 0);
    assert!(empty.final_clash().is_none());

    let final_only = SingleEliminationGenerator::new(GeneratorOptions::seeded(0))
        .generate(&players(2), &mut history)
        .unwrap();
    assert_eq!(final_only.round_count(), 1);
    assert_eq!(final_only.final_clash().unwrap().occupant_count(), 2);
    assert_eq!(history.pairing("wolves", "bears"), 1);
}

#[test]
fn lone_teamed_competitor_gives_an_empty_bracket() {
    let rosters = [vec![], vec![Competitor::with_team("ana", "wolves", 1500)]];
    for roster in &rosters {
        for (use_teams, use_rating) in [(true, true), (true, false), (false, true), (false, false)] {
            let options = GeneratorOptions {
                use_teams,
                use_rating,
                ..GeneratorOptions::seeded(0)
            };
            let mut history = TeamPairingCount::new();
            let bracket = SingleEliminationGenerator::new(options)
                .generate(roster, &mut history)
                .unwrap();
            assert_eq!(bracket.round_count(), 0);
            assert!(history.is_empty());
        }
    }
}

#[test]
fn three_way_final_is_an_unimplemented_extension() {
    let options = GeneratorOptions {
        three_way_final: true,
        ..GeneratorOptions::seeded(2)
    };
    let mut history = TeamPairingCount::new();
    let result = SingleEliminationGenerator::new(options.clone()).generate(&players(3), &mut history);
    assert_eq!(result, Err(BracketError::Unsupported("three-way final")));
    assert!(history.is_empty());

    // does not apply to larger fields
    assert!(SingleEliminationGenerator::new(options)
        .generate(&players(6), &mut history)
        .is_ok());
}

#[test]
fn third_place_clash_is_an_unimplemented_extension() {
    let options = GeneratorOptions {
        third_place_clash: true,
        ..GeneratorOptions::seeded(2)
    };
    let result =
        SingleEliminationGenerator::new(options).generate(&players(4), &mut TeamPairingCount::new());
    assert!(matches!(result, Err(BracketError::Unsupported(_))));
}

#[test]
fn season_threads_its_history() {
    let mut season = Season::new();
    for seed in 0..5 {
        season
            .generate(&players(9), GeneratorOptions::seeded(seed))
            .unwrap();
    }
    assert_eq!(season.brackets_generated, 5);
    let total: u32 = season.history.iter().map(|(_, count)| count).sum();
    assert!(total > 0);

    let bad = vec![Competitor::solo("x", 1), Competitor::solo("x", 2)];
    assert!(season.generate(&bad, GeneratorOptions::seeded(0)).is_err());
    assert_eq!(season.brackets_generated, 5);
}

#[test]
fn options_fill_in_defaults() {
    let options: GeneratorOptions = serde_json::from_str(r#"{ "seed": 5 }"#).unwrap();
    assert_eq!(options, GeneratorOptions::seeded(5));
    assert!(options.use_teams && options.use_rating);
}
