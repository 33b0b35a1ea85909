pub mod double_elimination;
pub mod graph;
pub mod loser;
pub mod seat;

pub use double_elimination::{DoubleEliminationGraph, LoserSeedingStyle};
pub use graph::Graph;
pub use seat::{Seat, SeatNode};
