use crate::bracket::seat::Seat;
use std::collections::HashMap;

// A position is the opaque handle of a seat within the composed graph.
// Unique across winner bracket, loser bracket and grand final; never reused.
pub type SeatPosition = usize;

// Round 0 holds the starting seats, rounds increase toward the final.
pub type Round = usize;

pub type EntrantId = uuid::Uuid;

pub type AppResult<T> = Result<T, anyhow::Error>;

pub type SeatMap = HashMap<SeatPosition, Seat>;
