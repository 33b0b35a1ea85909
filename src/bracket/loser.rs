use anyhow::anyhow;

use crate::{
    bracket::{graph::Graph, seat::Seat},
    types::{AppResult, Round, SeatMap, SeatPosition},
};

impl Graph {
    /// Builds the consolation bracket matching a winner tree of `size`
    /// starting seats.
    ///
    /// The bracket has `2 * log2(size) - 1` rounds. Round 0 holds the
    /// `size / 2` seats fed by the first winner round; after that, rounds
    /// pair up as one drop-in round (new losers enter next to carried
    /// survivors) and one consolidation round (survivors pair off), each
    /// pair halving the field until a single seat remains.
    ///
    /// Positions are assigned root-first from `2 * size + 2`, ascending
    /// within each round, so the whole range sits strictly above the
    /// grand-final position and lookups can route on a single comparison.
    pub fn loser_bracket(size: usize) -> AppResult<Self> {
        Self::check_size(size)?;
        if size < 2 {
            return Err(anyhow!("A loser bracket needs at least 2 starting seats"));
        }

        let levels = size.ilog2() as usize;
        let mut counts = vec![size / 2];
        for level in 1..levels {
            counts.push(size >> level);
            counts.push(size >> (level + 1));
        }

        // counts[r] seats in round r; rounds are laid out top-down so the
        // first position of round r skips every round above it.
        let base = 2 * size + 2;
        let first = |round: Round| -> SeatPosition {
            base + counts[round + 1..].iter().sum::<usize>()
        };

        let mut seats = SeatMap::new();
        for index in 0..counts[0] {
            let position = first(0) + index;
            seats.insert(position, Seat::new(position, 0));
        }

        for level in 1..levels {
            let drop_in_round = 2 * level - 1;
            build_drop_in_round(&mut seats, drop_in_round, counts[drop_in_round], &first);

            let consolidation_round = 2 * level;
            build_consolidation_round(
                &mut seats,
                consolidation_round,
                counts[consolidation_round],
                &first,
            );
        }

        log::debug!(
            "Built loser bracket: {} seats over {} rounds",
            seats.len(),
            counts.len()
        );

        Ok(Self {
            size,
            root: base,
            seats,
        })
    }
}

// A drop-in round interleaves newly entered starting seats with match seats
// consuming the previous round, one of each per pair. Which side of the pair
// the drop-in takes alternates along the round: every pair when the round
// width is an odd power of two, every other pair when even. The braid keeps
// entrants from immediately meeting the survivor of their own half.
fn build_drop_in_round(
    seats: &mut SeatMap,
    round: Round,
    width: usize,
    first: &dyn Fn(Round) -> SeatPosition,
) {
    let block = if width.ilog2() % 2 == 1 { 1 } else { 2 };
    for pair in 0..width / 2 {
        let pair_base = first(round) + 2 * pair;
        let drop_in_left = (pair / block) % 2 == 0;
        let (drop_in_position, match_position) = if drop_in_left {
            (pair_base, pair_base + 1)
        } else {
            (pair_base + 1, pair_base)
        };

        seats.insert(drop_in_position, Seat::new(drop_in_position, round));

        let feed_base = first(round - 1) + 2 * pair;
        insert_match_seat(seats, match_position, round, feed_base);
    }
}

// A consolidation round pairs off the previous round with no new entries.
fn build_consolidation_round(
    seats: &mut SeatMap,
    round: Round,
    width: usize,
    first: &dyn Fn(Round) -> SeatPosition,
) {
    for index in 0..width {
        let position = first(round) + index;
        let feed_base = first(round - 1) + 2 * index;
        insert_match_seat(seats, position, round, feed_base);
    }
}

fn insert_match_seat(seats: &mut SeatMap, position: SeatPosition, round: Round, feed_base: SeatPosition) {
    let mut seat = Seat::new(position, round);
    seat.from = vec![feed_base, feed_base + 1];
    for child in [feed_base, feed_base + 1] {
        seats
            .get_mut(&child)
            .expect("Feeding seat was created with the previous round")
            .to = Some(position);
    }
    seats.insert(position, seat);
}
