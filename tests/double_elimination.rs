#[cfg(test)]
mod tests {
    use bracket_graph::bracket::{DoubleEliminationGraph, LoserSeedingStyle, SeatNode};
    use bracket_graph::types::{AppResult, EntrantId, Round, SeatPosition};
    use itertools::Itertools;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // The loser_to targets of a winner round, in ascending match-position
    // order: the order in which losers are dropped into the loser bracket.
    fn drop_targets(graph: &DoubleEliminationGraph, round: Round) -> Vec<SeatPosition> {
        graph
            .winner_graph()
            .seats()
            .iter()
            .filter(|seat| !seat.is_starting() && seat.round == round)
            .filter_map(|seat| seat.loser_to)
            .collect_vec()
    }

    #[test]
    fn test_counts_for_any_size() -> AppResult<()> {
        for size in [2, 4, 8, 16, 32, 64] {
            let graph = DoubleEliminationGraph::new(size, LoserSeedingStyle::Classic)?;
            assert_eq!(graph.winner_graph().size(), size);
            assert_eq!(graph.loser_graph().size(), size);
            assert_eq!(graph.winner_graph().seats().len(), 2 * size - 1);
            assert_eq!(graph.winner_graph().starting_seats().len(), size);
            assert_eq!(graph.starting_seats().len(), 2 * size - 1);
            assert_eq!(graph.root().position, 2 * size);
        }
        Ok(())
    }

    #[test]
    fn test_loser_links_form_a_bijection() -> AppResult<()> {
        for style in [
            LoserSeedingStyle::Classic,
            LoserSeedingStyle::AlternateHalfReverse,
        ] {
            let graph = DoubleEliminationGraph::new(32, style)?;
            let matches = graph
                .winner_graph()
                .seats()
                .into_iter()
                .filter(|seat| !seat.is_starting())
                .collect_vec();
            assert!(matches.iter().all(|seat| seat.loser_to.is_some()));

            let targets = matches
                .iter()
                .filter_map(|seat| seat.loser_to)
                .sorted()
                .collect_vec();
            let loser_starts = graph
                .loser_graph()
                .starting_seats()
                .iter()
                .map(|seat| seat.position)
                .collect_vec();
            assert_eq!(targets, loser_starts);
        }
        Ok(())
    }

    #[test]
    fn test_classic_alternates_order_by_round_parity() -> AppResult<()> {
        let graph = DoubleEliminationGraph::new(16, LoserSeedingStyle::Classic)?;
        for round in 1..=graph.winner_root().round {
            let targets = drop_targets(&graph, round);
            let sorted = targets.iter().copied().sorted().collect_vec();
            if round % 2 == 1 {
                assert_eq!(
                    targets,
                    sorted.into_iter().rev().collect_vec(),
                    "round {round}"
                );
            } else {
                assert_eq!(targets, sorted, "round {round}");
            }
        }
        Ok(())
    }

    #[test]
    fn test_alternate_half_reverse_with_16_entrants() -> AppResult<()> {
        let graph = DoubleEliminationGraph::new(16, LoserSeedingStyle::AlternateHalfReverse)?;
        assert_eq!(drop_targets(&graph, 1), vec![62, 61, 60, 59, 58, 57, 56, 55]);
        assert_eq!(drop_targets(&graph, 2), vec![50, 47, 54, 51]);
        assert_eq!(drop_targets(&graph, 3), Vec::<SeatPosition>::new());
        assert_eq!(drop_targets(&graph, 4), vec![41, 39]);
        assert_eq!(drop_targets(&graph, 5), Vec::<SeatPosition>::new());
        assert_eq!(drop_targets(&graph, 6), vec![35]);
        Ok(())
    }

    #[test]
    fn test_alternate_half_reverse_with_32_entrants() -> AppResult<()> {
        let graph = DoubleEliminationGraph::new(32, LoserSeedingStyle::AlternateHalfReverse)?;
        assert_eq!(
            drop_targets(&graph, 1),
            vec![118, 117, 116, 115, 114, 113, 112, 111, 126, 125, 124, 123, 122, 121, 120, 119]
        );
        assert_eq!(
            drop_targets(&graph, 2),
            vec![110, 108, 105, 103, 102, 100, 97, 95]
        );
        assert_eq!(drop_targets(&graph, 4), vec![82, 79, 86, 83]);
        assert_eq!(drop_targets(&graph, 6), vec![73, 71]);
        assert_eq!(drop_targets(&graph, 8), vec![67]);
        Ok(())
    }

    #[test]
    fn test_json_dump_embeds_the_feeding_seats() -> AppResult<()> {
        let graph = DoubleEliminationGraph::new(4, LoserSeedingStyle::Classic)?;
        let node = graph.to_node()?;
        assert_eq!(node.position, 8);
        assert_eq!(node.from.len(), 2);

        let json = serde_json::to_value(&node)?;
        assert!(json.get("from").is_some_and(|from| from.is_array()));
        Ok(())
    }

    #[test]
    fn test_reconstruction_from_a_dumped_grand_final() -> AppResult<()> {
        let mut graph = DoubleEliminationGraph::new(16, LoserSeedingStyle::AlternateHalfReverse)?;
        let entrants: Vec<EntrantId> = (0..16).map(|_| EntrantId::new_v4()).collect();
        graph.seed_shuffled(&entrants, &mut ChaCha8Rng::seed_from_u64(3))?;

        let json = serde_json::to_string(&graph.to_node()?)?;
        let node: SeatNode = serde_json::from_str(&json)?;
        let restored = DoubleEliminationGraph::from_node(&node)?;

        assert_eq!(restored.size(), graph.size());
        assert_eq!(restored.seats().len(), graph.seats().len());
        assert_eq!(
            restored.starting_seats().len(),
            graph.starting_seats().len()
        );
        for round in 1..=graph.winner_root().round {
            assert_eq!(drop_targets(&restored, round), drop_targets(&graph, round));
        }
        for (seat, original) in restored
            .starting_seats()
            .iter()
            .zip(graph.starting_seats())
        {
            assert_eq!(seat.entrant, original.entrant);
        }
        Ok(())
    }

    #[test]
    fn test_graph_serde_round_trip_keeps_the_style() -> AppResult<()> {
        let graph = DoubleEliminationGraph::new(8, LoserSeedingStyle::AlternateHalfReverse)?;
        let json = serde_json::to_string(&graph)?;
        let restored: DoubleEliminationGraph = serde_json::from_str(&json)?;
        assert_eq!(restored, graph);
        assert_eq!(
            restored.loser_seeding_style(),
            LoserSeedingStyle::AlternateHalfReverse
        );
        Ok(())
    }

    #[test]
    fn test_reconstruction_rejects_malformed_roots() -> AppResult<()> {
        let graph = DoubleEliminationGraph::new(4, LoserSeedingStyle::Classic)?;
        let mut node = graph.to_node()?;
        node.from.pop();
        assert!(matches!(
            DoubleEliminationGraph::from_node(&node),
            Err(e) if e.to_string() == "A grand-final seat joins exactly 2 brackets, found 1"
        ));
        Ok(())
    }

    #[test]
    fn test_seed_delegates_to_the_winner_bracket() -> AppResult<()> {
        let mut graph = DoubleEliminationGraph::new(8, LoserSeedingStyle::Classic)?;
        let entrants: Vec<EntrantId> = (0..8).map(|_| EntrantId::new_v4()).collect();
        graph.seed(&entrants)?;

        assert!(graph
            .winner_graph()
            .starting_seats()
            .iter()
            .all(|seat| seat.entrant.is_some()));
        assert!(graph
            .loser_graph()
            .starting_seats()
            .iter()
            .all(|seat| seat.entrant.is_none()));
        Ok(())
    }

    #[test]
    fn test_invalid_size_produces_no_graph() {
        assert!(DoubleEliminationGraph::new(6, LoserSeedingStyle::Classic).is_err());
        assert!(DoubleEliminationGraph::new(0, LoserSeedingStyle::Classic).is_err());
        assert!(DoubleEliminationGraph::new(1, LoserSeedingStyle::Classic).is_err());
    }
}
