use crate::bracket::LoserSeedingStyle;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(name = "bracket_graph", about = "Double-elimination bracket builder", author, version, long_about = None)]
pub struct AppArgs {
    #[clap(help = "Number of starting seats (a power of two)")]
    pub size: usize,
    #[clap(long, short = 's', action=ArgAction::Set, default_value = "classic", help = "Loser seeding style: classic or alternate_half_reverse")]
    pub seeding_style: LoserSeedingStyle,
    #[clap(long, short = 'e', action=ArgAction::Set, help = "Seed this many random entrants into the winner bracket")]
    pub entrants: Option<usize>,
    #[clap(long, short = 'o', action=ArgAction::Set, help = "Write the composed bracket as JSON to this path")]
    pub output: Option<PathBuf>,
}
