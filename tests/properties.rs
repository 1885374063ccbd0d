//! Property tests over randomly generated instances.

use geo_tsp_ga::cost::{CostCalculator, Node};
use geo_tsp_ga::engine::{compare_tours, EngineConfig, GeneticEngine};
use geo_tsp_ga::random::RandomSource;
use geo_tsp_ga::tour::Tour;
use proptest::prelude::*;
use std::cmp::Ordering;

fn nodes_from(coords: &[(f64, f64)]) -> Vec<Node> {
    coords
        .iter()
        .enumerate()
        .map(|(i, &(lat, lon))| Node::new(format!("n{i}"), lat, lon))
        .collect()
}

fn coords(min: usize, max: usize) -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-60.0f64..60.0, -170.0f64..170.0), min..=max)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_operators_preserve_permutation(
        coords in coords(2, 14),
        seed in any::<i32>(),
        start_pick in any::<prop::sample::Index>(),
    ) {
        let nodes = nodes_from(&coords);
        let start = nodes[start_pick.index(nodes.len())].id.clone();
        let mut costs = CostCalculator::new(&nodes).unwrap();
        let mut rng = RandomSource::new(seed);
        let origin = Tour::origin(&nodes, &start, &mut costs).unwrap();
        prop_assert!(origin.is_valid_for(&nodes));

        let mut current = origin.spawn_shuffle(&mut rng, &mut costs).unwrap();
        for _ in 0..20 {
            let other = origin.spawn_shuffle(&mut rng, &mut costs).unwrap();
            let children = [
                current.spawn_shuffle(&mut rng, &mut costs).unwrap(),
                current.spawn_transpose_local(&mut rng, &mut costs).unwrap(),
                current.spawn_shift_segment(&mut rng, &mut costs).unwrap(),
                current.spawn_reverse_segment(&mut rng, &mut costs).unwrap(),
                current.cross_from_other(&other, &mut rng, &mut costs).unwrap(),
            ];
            for child in &children {
                prop_assert!(child.is_valid_for(&nodes), "invalid: {}", child);
                prop_assert_eq!(child.start(), start.as_str());
                let recomputed = costs.path_cost(child.path()).unwrap();
                prop_assert_eq!(child.cost().to_bits(), recomputed.to_bits());
            }
            current = children[4].clone();
        }
    }

    #[test]
    fn prop_cost_symmetric_and_cached(coords in coords(2, 10)) {
        let nodes = nodes_from(&coords);
        let mut costs = CostCalculator::new(&nodes).unwrap();
        for a in &nodes {
            prop_assert_eq!(costs.compute_cost(&a.id, &a.id).unwrap(), 0.0);
            for b in &nodes {
                let ab = costs.compute_cost(&a.id, &b.id).unwrap();
                let ba = costs.compute_cost(&b.id, &a.id).unwrap();
                let again = costs.compute_cost(&a.id, &b.id).unwrap();
                prop_assert_eq!(ab.to_bits(), ba.to_bits());
                prop_assert_eq!(ab.to_bits(), again.to_bits());
                prop_assert!(ab >= 0.0);
            }
        }
        let n = nodes.len();
        prop_assert_eq!(costs.cached_pairs(), n * (n - 1) / 2);
    }

    #[test]
    fn prop_engine_invariants(
        coords in coords(3, 10),
        seed in any::<i32>(),
        population_size in 2usize..8,
        attempts in 1usize..6,
        min_lifetime in 0u32..4,
    ) {
        let nodes = nodes_from(&coords);
        let config = EngineConfig::default()
            .with_population_size(population_size)
            .with_attempts_per_iteration(attempts)
            .with_min_lifetime(min_lifetime)
            .with_seed(seed);
        let mut engine = GeneticEngine::new(&nodes, "n0", config).unwrap();

        engine.run_generation().unwrap();
        let mut best = engine.best().cost();
        for _ in 0..8 {
            let report = engine.run_generation().unwrap();
            prop_assert!(report.best_cost <= best);
            best = report.best_cost;

            let population = engine.population();
            prop_assert_eq!(population.len(), population_size);
            for pair in population.windows(2) {
                prop_assert_ne!(compare_tours(&pair[0], &pair[1]), Ordering::Greater);
            }
            for t in population {
                prop_assert!(t.is_valid_for(&nodes));
            }
        }
    }

    #[test]
    fn prop_same_seed_same_population(coords in coords(4, 9), seed in any::<i32>()) {
        let nodes = nodes_from(&coords);
        let config = EngineConfig::default()
            .with_population_size(4)
            .with_attempts_per_iteration(4)
            .with_min_lifetime(1)
            .with_seed(seed);
        let mut a = GeneticEngine::new(&nodes, "n0", config.clone()).unwrap();
        let mut b = GeneticEngine::new(&nodes, "n0", config).unwrap();
        for _ in 0..6 {
            a.run_generation().unwrap();
            b.run_generation().unwrap();
        }
        prop_assert_eq!(a.population(), b.population());
    }
}
