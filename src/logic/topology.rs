//! First-round topology: clash count, bye distribution, and tree distances between slots.
//!
//! The first round forms an implicit binary elimination tree: clashes `2k` and `2k + 1` feed
//! the same second-round clash, blocks of four feed the same third-round clash, and so on.

use crate::models::{BracketError, Clash};

/// Create the first-round clashes for `num_participants`, with byes marked.
///
/// The slot count is the next power of two; every missing participant becomes a bye.
/// Byes are spread by recursive halving so two bye holders never meet in round one.
pub fn generate_first_round_clashes(num_participants: i64) -> Result<Vec<Clash>, BracketError> {
    if num_participants < 0 {
        return Err(BracketError::InvalidArgument(format!(
            "number of participants must be 0 or greater, got {}",
            num_participants
        )));
    }
    if num_participants < 2 {
        return Ok(Vec::new());
    }
    let participants = num_participants as usize;
    let slots = participants.next_power_of_two();
    let num_clashes = slots / 2;
    let num_byes = slots - participants;

    let mut clashes = vec![Clash::new(); num_clashes];
    for idx in bye_indices(0, num_clashes, num_byes) {
        clashes[idx].is_bye = true;
    }
    log::debug!(
        "{} participants: {} clashes, {} byes",
        participants,
        num_clashes,
        num_byes
    );
    Ok(clashes)
}

/// Clash indices in `begin..end` that receive one of `num_byes` byes.
///
/// The left half gets `num_byes / 2`, the right half the rest, until a single bye lands on the
/// first index of its range.
pub fn bye_indices(begin: usize, end: usize, num_byes: usize) -> Vec<usize> {
    match num_byes {
        0 => Vec::new(),
        1 => vec![begin],
        _ => {
            let mid = begin + (end - begin) / 2;
            let left = num_byes / 2;
            let mut indices = bye_indices(begin, mid, left);
            indices.extend(bye_indices(mid, end, num_byes - left));
            indices
        }
    }
}

/// Number of rounds a first-round competitor must win to take the bracket.
pub fn brackets_max_depth_distance(clashes: &[Clash]) -> u32 {
    max_depth(clashes.len())
}

/// Round in which the winners of first-round clashes `idx_a` and `idx_b` could meet.
///
/// A clash is at distance 1 from itself; neighbours `2k`/`2k + 1` are at distance 2.
pub fn brackets_depth_distance(
    clashes: &[Clash],
    idx_a: usize,
    idx_b: usize,
) -> Result<u32, BracketError> {
    let len = clashes.len();
    for index in [idx_a, idx_b] {
        if index >= len {
            return Err(BracketError::IndexOutOfRange { index, len });
        }
    }
    Ok(depth_distance(len, idx_a, idx_b))
}

pub(crate) fn max_depth(clash_count: usize) -> u32 {
    if clash_count == 0 {
        return 0;
    }
    clash_count.next_power_of_two().trailing_zeros() + 1
}

/// Unchecked distance; both indices must be below `clash_count`.
pub(crate) fn depth_distance(clash_count: usize, idx_a: usize, idx_b: usize) -> u32 {
    if idx_a == idx_b {
        return 1;
    }
    let mut distance = max_depth(clash_count);
    let mut block = clash_count / 2;
    while block > 0 && idx_a / block == idx_b / block {
        distance -= 1;
        block /= 2;
    }
    distance
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byes_split_floor_left() {
        assert_eq!(bye_indices(0, 4, 3), vec![0, 2, 3]);
        assert_eq!(bye_indices(0, 2, 1), vec![0]);
        assert_eq!(bye_indices(0, 8, 2), vec![0, 4]);
        assert!(bye_indices(0, 4, 0).is_empty());
    }

    #[test]
    fn max_depth_of_small_brackets() {
        assert_eq!(max_depth(0), 0);
        assert_eq!(max_depth(1), 1);
        assert_eq!(max_depth(2), 2);
        assert_eq!(max_depth(8), 4);
    }

    #[test]
    fn neighbours_meet_in_second_round() {
        assert_eq!(depth_distance(8, 0, 1), 2);
        assert_eq!(depth_distance(8, 2, 3), 2);
        assert_eq!(depth_distance(8, 1, 2), 3);
        assert_eq!(depth_distance(8, 3, 4), 4);
    }
}
