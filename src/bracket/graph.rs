use anyhow::anyhow;
use itertools::Itertools;
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{
    bracket::seat::{Seat, SeatNode},
    types::{AppResult, EntrantId, Round, SeatMap, SeatPosition},
};

/// A bracket: an arena of seats keyed by position, with a single root.
///
/// The same shape serves both sub-brackets of a double elimination:
/// [`Graph::single_elimination`] builds the winner tree,
/// [`Graph::loser_bracket`] (in `loser.rs`) builds the consolation bracket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Graph {
    pub(crate) size: usize,
    pub(crate) root: SeatPosition,
    pub(crate) seats: SeatMap,
}

impl Graph {
    pub(crate) fn check_size(size: usize) -> AppResult<()> {
        if size == 0 || !size.is_power_of_two() {
            return Err(anyhow!("Bracket size {} is not a power of two", size));
        }
        Ok(())
    }

    /// Builds a complete single-elimination tree with `size` starting seats.
    ///
    /// Starts from a lone root and expands every frontier seat into two
    /// children until the frontier reaches `size`. Rounds fall out of depth:
    /// the root sits in round `log2(size)`, the leaves in round 0. Leaves
    /// take the positions `0..size`, each level above follows contiguously,
    /// so the root ends up at `2 * size - 2`.
    pub fn single_elimination(size: usize) -> AppResult<Self> {
        Self::check_size(size)?;

        let rounds = size.ilog2() as Round;
        let root_position = 2 * size - 2;
        let mut seats = SeatMap::new();
        seats.insert(root_position, Seat::new(root_position, rounds));

        let mut frontier = vec![(root_position, rounds)];
        while frontier.len() < size {
            let mut next = Vec::with_capacity(frontier.len() * 2);
            for (position, round) in frontier {
                let index = position - Self::first_position_in_round(size, round);
                let child_base = Self::first_position_in_round(size, round - 1) + 2 * index;
                for child_position in [child_base, child_base + 1] {
                    let mut child = Seat::new(child_position, round - 1);
                    child.to = Some(position);
                    seats.insert(child_position, child);
                    next.push((child_position, round - 1));
                }
                if let Some(seat) = seats.get_mut(&position) {
                    seat.from = vec![child_base, child_base + 1];
                }
            }
            frontier = next;
        }

        log::debug!(
            "Built single elimination tree: {} starting seats, {} rounds",
            size,
            rounds + 1
        );

        Ok(Self {
            size,
            root: root_position,
            seats,
        })
    }

    // First position of a round in the winner tree: the level of round r
    // holds size >> r seats, stacked above all lower levels.
    fn first_position_in_round(size: usize, round: Round) -> SeatPosition {
        if round == 0 {
            0
        } else {
            2 * size - (size >> (round - 1))
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn root(&self) -> &Seat {
        &self.seats[&self.root]
    }

    pub(crate) fn root_mut(&mut self) -> &mut Seat {
        self.seats
            .get_mut(&self.root)
            .expect("Root seat should be in the arena")
    }

    pub(crate) fn seat_mut(&mut self, position: SeatPosition) -> Option<&mut Seat> {
        self.seats.get_mut(&position)
    }

    pub(crate) fn seats_mut(&mut self) -> impl Iterator<Item = &mut Seat> {
        self.seats.values_mut()
    }

    /// All seats, ascending by position.
    pub fn seats(&self) -> Vec<&Seat> {
        self.seats
            .values()
            .sorted_by_key(|seat| seat.position)
            .collect()
    }

    /// Seats with no incoming matches, ascending by position.
    pub fn starting_seats(&self) -> Vec<&Seat> {
        self.seats
            .values()
            .filter(|seat| seat.is_starting())
            .sorted_by_key(|seat| seat.position)
            .collect()
    }

    pub fn at(&self, position: SeatPosition) -> AppResult<&Seat> {
        self.seats
            .get(&position)
            .ok_or(anyhow!("No seat at position {}", position))
    }

    /// Assigns entrants to the starting seats in standard 1-vs-N order:
    /// the top two seeds can only meet in the final, the top seed opens
    /// against the lowest-ranked entrant. Seats left over stay byes.
    pub fn seed(&mut self, entrants: &[EntrantId]) -> AppResult<()> {
        if entrants.len() > self.size {
            return Err(anyhow!(
                "Cannot seed {} entrants into {} starting seats",
                entrants.len(),
                self.size
            ));
        }

        let slots = self
            .starting_seats()
            .iter()
            .map(|seat| seat.position)
            .collect_vec();
        for (slot, seed) in slots.iter().zip(seeding_order(self.size)) {
            if let Some(seat) = self.seats.get_mut(slot) {
                seat.entrant = entrants.get(seed - 1).copied();
            }
        }

        Ok(())
    }

    /// Same as [`Graph::seed`], with the entrant order shuffled first.
    pub fn seed_shuffled<R: Rng>(&mut self, entrants: &[EntrantId], rng: &mut R) -> AppResult<()> {
        let mut shuffled = entrants.to_vec();
        shuffled.shuffle(rng);
        self.seed(&shuffled)
    }

    /// Recursive dump of the subtree rooted at `position`.
    pub(crate) fn node_at(&self, position: SeatPosition) -> AppResult<SeatNode> {
        let seat = self.at(position)?;
        let from = seat
            .from
            .iter()
            .map(|&child| self.node_at(child))
            .collect::<AppResult<Vec<SeatNode>>>()?;
        Ok(SeatNode {
            position: seat.position,
            round: seat.round,
            loser_to: seat.loser_to,
            entrant: seat.entrant,
            from,
        })
    }

    pub fn to_node(&self) -> AppResult<SeatNode> {
        self.node_at(self.root)
    }

    /// Rebuilds a bracket wrapper by walking the `from` links of a dumped
    /// subtree. Rounds, positions and loser links are taken as found; only
    /// the shape is validated.
    pub(crate) fn from_node(
        node: &SeatNode,
        size: usize,
        expected_starting: usize,
    ) -> AppResult<Self> {
        Self::check_size(size)?;

        let mut seats = SeatMap::new();
        let mut stack = vec![(node, None::<SeatPosition>)];
        while let Some((current, to)) = stack.pop() {
            if !current.from.is_empty() && current.from.len() != 2 {
                return Err(anyhow!(
                    "Seat {} should have 0 or 2 feeding seats, found {}",
                    current.position,
                    current.from.len()
                ));
            }
            let mut seat = Seat::new(current.position, current.round);
            seat.to = to;
            seat.loser_to = current.loser_to;
            seat.entrant = current.entrant;
            seat.from = current.from.iter().map(|child| child.position).collect();
            if seats.insert(current.position, seat).is_some() {
                return Err(anyhow!("Duplicate seat position {}", current.position));
            }
            for child in &current.from {
                stack.push((child, Some(current.position)));
            }
        }

        let graph = Self {
            size,
            root: node.position,
            seats,
        };
        let starting = graph.starting_seats().len();
        if starting != expected_starting {
            return Err(anyhow!(
                "Bracket of size {} should have {} starting seats, found {}",
                size,
                expected_starting,
                starting
            ));
        }

        Ok(graph)
    }
}

// Standard seeding order of a bracket: the entry at slot i is the seed
// (1-based) placed on the i-th starting seat. Doubling the bracket pairs
// every seed with its complement, so 1 meets 2 only in the final.
fn seeding_order(size: usize) -> Vec<usize> {
    let mut order = vec![1];
    while order.len() < size {
        let next_len = order.len() * 2;
        order = order
            .iter()
            .flat_map(|&seed| [seed, next_len + 1 - seed])
            .collect();
    }
    order
}
