//! Integration tests for team slot reservations.

use bracketeer::logic::{reserve_slots_for_team, reserve_team_slots};
use bracketeer::{
    create_reserved_teams_bracket_clashes, generate_first_round_clashes, Competitor,
    TeamPairingCount, TeamReservations,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn roster(teams: &[(&str, usize)], solos: usize) -> Vec<Competitor> {
    let mut competitors = Vec::new();
    for (team, size) in teams {
        for i in 0..*size {
            competitors.push(Competitor::with_team(format!("{team}{i}"), *team, 1500));
        }
    }
    for i in 0..solos {
        competitors.push(Competitor::solo(format!("solo{i}"), 1500));
    }
    competitors
}

#[test]
fn team_never_reserves_the_same_clash_twice_when_avoidable() {
    let competitors = roster(&[("wolves", 4)], 4);
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let (clashes, reservations) =
        create_reserved_teams_bracket_clashes(&competitors, &TeamPairingCount::new(), &mut rng, false)
            .unwrap();
    assert_eq!(clashes.len(), 4);
    assert_eq!(reservations.count_for("wolves"), 4);
    for slot in reservations.iter() {
        assert!(slot.len() <= 1);
    }
}

#[test]
fn each_team_reserves_one_spot_per_member() {
    let competitors = roster(&[("wolves", 3), ("bears", 2), ("owls", 1)], 2);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let (_, with_singles) =
        create_reserved_teams_bracket_clashes(&competitors, &TeamPairingCount::new(), &mut rng, true)
            .unwrap();
    assert_eq!(with_singles.count_for("wolves"), 3);
    assert_eq!(with_singles.count_for("bears"), 2);
    assert_eq!(with_singles.count_for("owls"), 1);

    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let (_, without_singles) =
        create_reserved_teams_bracket_clashes(&competitors, &TeamPairingCount::new(), &mut rng, false)
            .unwrap();
    assert_eq!(without_singles.count_for("owls"), 0);
    assert_eq!(without_singles.count_for("bears"), 2);
}

#[test]
fn planning_leaves_the_caller_history_alone() {
    let competitors = roster(&[("wolves", 2), ("bears", 2)], 0);
    let mut history = TeamPairingCount::new();
    history.record_pairing("wolves", "bears");
    let before = history.clone();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    create_reserved_teams_bracket_clashes(&competitors, &history, &mut rng, true).unwrap();
    assert_eq!(history, before);
}

#[test]
fn planning_is_reproducible_with_a_seed() {
    let competitors = roster(&[("a", 2), ("b", 2), ("c", 2), ("d", 1), ("e", 1)], 3);
    let plan = |seed| {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        create_reserved_teams_bracket_clashes(&competitors, &TeamPairingCount::new(), &mut rng, true)
            .unwrap()
            .1
    };
    assert_eq!(plan(42), plan(42));
}

#[test]
fn history_pushes_rivals_apart() {
    let clashes = generate_first_round_clashes(8).unwrap();
    let reservations = TeamReservations::from(vec![
        vec!["bears".to_string()],
        vec!["owls".to_string()],
        vec![],
        vec![],
    ]);

    // no history: the first clash is as good as any
    let mut fresh = reservations.clone();
    reserve_slots_for_team(&mut fresh, &clashes, "wolves", 1, &mut TeamPairingCount::new()).unwrap();
    assert!(fresh.holds(0, "wolves"));

    let mut history = TeamPairingCount::new();
    for _ in 0..4 {
        history.record_pairing("wolves", "bears");
    }
    let mut steered = reservations.clone();
    reserve_slots_for_team(&mut steered, &clashes, "wolves", 1, &mut history).unwrap();
    assert!(steered.holds(2, "wolves"));
    assert_eq!(history.pairing("wolves", "bears"), 4);
}

#[test]
fn reserving_next_to_a_team_counts_the_pairing() {
    let clashes = generate_first_round_clashes(4).unwrap();
    let competitors = roster(&[("wolves", 2), ("bears", 2)], 0);
    let mut history = TeamPairingCount::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let reservations = reserve_team_slots(&clashes, &competitors, &mut history, &mut rng, true).unwrap();
    for slot in reservations.iter() {
        assert_eq!(slot.len(), 2);
        assert_ne!(slot[0], slot[1]);
    }
    assert_eq!(history.pairing("wolves", "bears"), 2);
}

#[test]
fn bye_reservations_prefer_teams_with_fewer_byes() {
    // 3 competitors: clash 0 is a bye
    let competitors = vec![
        Competitor::with_team("w", "wolves", 1500),
        Competitor::with_team("b", "bears", 1500),
        Competitor::with_team("o", "owls", 1500),
    ];
    let clashes = generate_first_round_clashes(3).unwrap();
    let mut history = TeamPairingCount::new();
    history.record_bye("wolves");
    history.record_bye("bears");
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let reservations = reserve_team_slots(&clashes, &competitors, &mut history, &mut rng, true).unwrap();
    assert_eq!(reservations.at(0), ["owls".to_string()]);
}

#[test]
fn empty_bracket_gets_no_reservations() {
    let competitors = roster(&[("wolves", 1)], 0);
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let (clashes, reservations) =
        create_reserved_teams_bracket_clashes(&competitors, &TeamPairingCount::new(), &mut rng, true)
            .unwrap();
    assert!(clashes.is_empty());
    assert!(reservations.is_empty());
}
