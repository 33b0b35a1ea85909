use bracket_graph::args::AppArgs;
use bracket_graph::bracket::DoubleEliminationGraph;
use bracket_graph::store::save_to_json;
use bracket_graph::types::{AppResult, EntrantId};
use clap::Parser;
use itertools::Itertools;

fn main() -> AppResult<()> {
    env_logger::init();
    let args = AppArgs::parse();

    let mut graph = DoubleEliminationGraph::new(args.size, args.seeding_style)?;

    if let Some(count) = args.entrants {
        let entrants = (0..count).map(|_| EntrantId::new_v4()).collect_vec();
        graph.seed_shuffled(&entrants, &mut rand::rng())?;
        log::info!("Seeded {} entrants", count);
    }

    for (round, seats) in &graph
        .seats()
        .into_iter()
        .sorted_by_key(|seat| (seat.round, seat.position))
        .chunk_by(|seat| seat.round)
    {
        let positions = seats
            .map(|seat| {
                if let Some(target) = seat.loser_to {
                    format!("{}>{}", seat.position, target)
                } else {
                    seat.position.to_string()
                }
            })
            .join(" ");
        println!("round {:>2}: {}", round, positions);
    }

    if let Some(path) = args.output.as_ref() {
        save_to_json(path, &graph.to_node()?)?;
        log::info!("Bracket written to {}", path.display());
    }

    Ok(())
}
