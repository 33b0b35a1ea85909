use anyhow::anyhow;
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use strum::{Display, EnumString};

use crate::{
    bracket::{
        graph::Graph,
        seat::{Seat, SeatNode},
    },
    types::{AppResult, EntrantId, SeatPosition},
};

/// Policy routing each winner-bracket match's loser to a loser-bracket
/// starting seat.
#[derive(
    Debug, Default, Clone, Copy, Serialize_repr, Deserialize_repr, PartialEq, Display, EnumString,
)]
#[repr(u8)]
#[strum(serialize_all = "snake_case")]
pub enum LoserSeedingStyle {
    /// Drop losers in ascending order on odd rounds, descending on even
    /// rounds.
    #[default]
    Classic,
    /// Flip each half of the candidate list internally before consuming it,
    /// on rounds whose width is an even power of two.
    AlternateHalfReverse,
}

/// A double-elimination bracket: a winner tree and a loser bracket on a
/// shared round timeline, joined by the grand-final seat.
///
/// The whole graph is built once by [`DoubleEliminationGraph::new`] and is
/// structurally immutable afterwards; only seeding touches seat payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoubleEliminationGraph {
    winner: Graph,
    loser: Graph,
    root: Seat,
    loser_seeding_style: LoserSeedingStyle,
}

impl DoubleEliminationGraph {
    pub fn new(size: usize, loser_seeding_style: LoserSeedingStyle) -> AppResult<Self> {
        let mut winner = Graph::single_elimination(size)?;
        let mut loser = Graph::loser_bracket(size)?;

        sync_winner_rounds(&mut winner);
        sync_loser_rounds(&mut loser);

        let mut root = Seat::new(size * 2, loser.root().round + 1);
        root.from = vec![winner.root().position, loser.root().position];
        winner.root_mut().to = Some(root.position);
        loser.root_mut().to = Some(root.position);

        let mut graph = Self {
            winner,
            loser,
            root,
            loser_seeding_style,
        };
        graph.assign_loser_links();

        log::debug!(
            "Composed double elimination graph for {} entrants, {} loser seeding",
            size,
            loser_seeding_style
        );

        Ok(graph)
    }

    /// Walks every winner round holding matches and links each match to the
    /// loser-bracket starting seat that will receive its eliminated entrant.
    /// Candidates are consumed from the end of the reordered list, so an
    /// untouched ascending list yields descending assignments.
    fn assign_loser_links(&mut self) {
        for round in 1..=self.winner.root().round {
            let matches = self
                .winner
                .seats()
                .iter()
                .filter(|seat| seat.round == round && !seat.is_starting())
                .map(|seat| seat.position)
                .collect_vec();
            if matches.is_empty() {
                continue;
            }

            let mut candidates = self
                .loser
                .starting_seats()
                .iter()
                .filter(|seat| seat.round == round)
                .map(|seat| seat.position)
                .collect_vec();

            // Round alignment is the loser-bracket builder's contract; a
            // mismatch here is a bug, not bad input.
            assert_eq!(
                matches.len(),
                candidates.len(),
                "winner round {} holds {} matches but the loser bracket enters {} seats",
                round,
                matches.len(),
                candidates.len()
            );

            match self.loser_seeding_style {
                LoserSeedingStyle::Classic => {
                    if round % 2 == 0 {
                        candidates.reverse();
                    }
                }
                LoserSeedingStyle::AlternateHalfReverse => {
                    reorder_alternate_half_reverse(&mut candidates);
                }
            }

            for position in matches {
                let target = candidates.pop().expect("Counts were matched above");
                if let Some(seat) = self.winner.seat_mut(position) {
                    seat.loser_to = Some(target);
                }
            }
        }
    }

    pub fn size(&self) -> usize {
        self.winner.size()
    }

    /// The grand-final seat.
    pub fn root(&self) -> &Seat {
        &self.root
    }

    pub fn winner_graph(&self) -> &Graph {
        &self.winner
    }

    pub fn loser_graph(&self) -> &Graph {
        &self.loser
    }

    pub fn winner_root(&self) -> &Seat {
        self.winner.root()
    }

    pub fn loser_root(&self) -> &Seat {
        self.loser.root()
    }

    pub fn loser_seeding_style(&self) -> LoserSeedingStyle {
        self.loser_seeding_style
    }

    /// Routes on the grand-final position: the winner tree sits strictly
    /// below it, the loser bracket strictly above.
    pub fn at(&self, position: SeatPosition) -> AppResult<&Seat> {
        if position == self.root.position {
            Ok(&self.root)
        } else if position < self.root.position {
            self.winner.at(position)
        } else {
            self.loser.at(position)
        }
    }

    /// The grand-final seat followed by every seat of both sub-brackets.
    pub fn seats(&self) -> Vec<&Seat> {
        let mut seats = vec![&self.root];
        seats.extend(self.winner.seats());
        seats.extend(self.loser.seats());
        seats
    }

    /// Winner starting seats followed by loser starting seats.
    pub fn starting_seats(&self) -> Vec<&Seat> {
        let mut seats = self.winner.starting_seats();
        seats.extend(self.loser.starting_seats());
        seats
    }

    pub fn seed(&mut self, entrants: &[EntrantId]) -> AppResult<()> {
        self.winner.seed(entrants)
    }

    pub fn seed_shuffled<R: Rng>(&mut self, entrants: &[EntrantId], rng: &mut R) -> AppResult<()> {
        self.winner.seed_shuffled(entrants, rng)
    }

    /// Tree-shaped dump rooted at the grand final, recursively embedding
    /// each seat's feeding seats.
    pub fn to_node(&self) -> AppResult<SeatNode> {
        Ok(SeatNode {
            position: self.root.position,
            round: self.root.round,
            loser_to: self.root.loser_to,
            entrant: self.root.entrant,
            from: vec![self.winner.to_node()?, self.loser.to_node()?],
        })
    }

    /// Rebuilds a graph from a dumped grand-final seat by walking `from`,
    /// without re-running round synchronization or link assignment. The
    /// seeding style is not part of the dump (its effect is already baked
    /// into the links) and comes back as the default.
    pub fn from_node(node: &SeatNode) -> AppResult<Self> {
        if node.from.len() != 2 {
            return Err(anyhow!(
                "A grand-final seat joins exactly 2 brackets, found {}",
                node.from.len()
            ));
        }

        let (winner_node, loser_node) = (&node.from[0], &node.from[1]);
        if winner_node.position >= node.position || loser_node.position <= node.position {
            return Err(anyhow!(
                "Sub-bracket positions must straddle the grand-final position {}",
                node.position
            ));
        }

        let size = winner_node.starting_count();
        let mut winner = Graph::from_node(winner_node, size, size)?;
        let mut loser = Graph::from_node(loser_node, size, size - 1)?;
        winner.root_mut().to = Some(node.position);
        loser.root_mut().to = Some(node.position);

        let mut root = Seat::new(node.position, node.round);
        root.from = vec![winner_node.position, loser_node.position];
        root.entrant = node.entrant;

        Ok(Self {
            winner,
            loser,
            root,
            loser_seeding_style: LoserSeedingStyle::default(),
        })
    }
}

// Stretches the winner cadence so each winner round lands right before the
// loser round that consumes its losers: rounds 0-2 keep their index, every
// round above moves to 2 + (round - 2) * 2.
fn sync_winner_rounds(winner: &mut Graph) {
    for seat in winner.seats_mut() {
        if seat.round >= 3 {
            seat.round = 2 + (seat.round - 2) * 2;
        }
    }
}

// Shifts the loser bracket up by one round, reserving round 0 of the shared
// timeline for winner starting seats.
fn sync_loser_rounds(loser: &mut Graph) {
    for seat in loser.seats_mut() {
        seat.round += 1;
    }
}

// Splits the ascending candidate list in two halves, flips each half in
// place, then flips the whole sequence. Left untouched when the width's
// log2 is odd or there is a single candidate.
fn reorder_alternate_half_reverse(candidates: &mut [SeatPosition]) {
    let power = candidates.len().next_power_of_two().ilog2();
    let half = candidates.len() / 2;
    if power % 2 == 1 || half == 0 {
        return;
    }
    for chunk in candidates.chunks_mut(half) {
        chunk.reverse();
    }
    candidates.reverse();
}
