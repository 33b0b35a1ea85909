use serde::{Deserialize, Serialize};

use crate::types::{EntrantId, Round, SeatPosition};

/// A slot in a bracket: either a starting position or the outcome of a match.
///
/// Seats only hold positions of their neighbours, never references: each
/// sub-bracket owns its seats in an arena keyed by position, and the
/// `to`/`from`/`loser_to` links are resolved through lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Seat {
    pub position: SeatPosition,
    pub round: Round,
    /// The 0 or 2 seats whose outcome feeds this one.
    pub from: Vec<SeatPosition>,
    /// The seat this one feeds into. Absent only for the grand final.
    pub to: Option<SeatPosition>,
    /// The loser-bracket starting seat receiving the entrant eliminated
    /// here. Set only on winner-bracket match seats.
    pub loser_to: Option<SeatPosition>,
    pub entrant: Option<EntrantId>,
}

impl Seat {
    pub fn new(position: SeatPosition, round: Round) -> Self {
        Self {
            position,
            round,
            from: vec![],
            to: None,
            loser_to: None,
            entrant: None,
        }
    }

    pub fn is_starting(&self) -> bool {
        self.from.is_empty()
    }
}

/// Recursive dump of a seat and everything feeding it. This is the
/// tree-shaped interchange format rooted at the grand final, and the input
/// for rebuilding a graph without re-running composition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatNode {
    pub position: SeatPosition,
    pub round: Round,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loser_to: Option<SeatPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrant: Option<EntrantId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub from: Vec<SeatNode>,
}

impl SeatNode {
    /// Number of starting seats in this subtree.
    pub fn starting_count(&self) -> usize {
        if self.from.is_empty() {
            1
        } else {
            self.from.iter().map(|child| child.starting_count()).sum()
        }
    }
}
