//! Genetic-algorithm optimizer for round trips over geographic nodes.
//!
//! Given a set of nodes with latitude/longitude and a start node, the
//! optimizer evolves a population of closed tours toward lower total
//! great-circle distance (or travel time):
//!
//! - **Random source**: a single seeded generator; equal seeds reproduce
//!   runs exactly.
//! - **Cost model**: memoized symmetric haversine costs.
//! - **Tours**: immutable closed paths with transpose, shift, reverse,
//!   shuffle and crossover operators that return new tours.
//! - **Engine**: cull → mutate/cross → sort, one generation per call.
//! - **Solver**: a caller-side loop with longevity, generation, time and
//!   cancellation stopping rules.
//! - **Scenario**: JSON problem files.
//!
//! # Example
//!
//! ```
//! use geo_tsp_ga::cost::Node;
//! use geo_tsp_ga::engine::{EngineConfig, GeneticEngine};
//! use geo_tsp_ga::solver::{RunLimits, Solver};
//!
//! let nodes = vec![
//!     Node::new("A", 0.0, 0.0),
//!     Node::new("B", 0.0, 1.0),
//!     Node::new("C", 1.0, 1.0),
//!     Node::new("D", 1.0, 0.0),
//! ];
//! let config = EngineConfig::default()
//!     .with_population_size(4)
//!     .with_attempts_per_iteration(5)
//!     .with_min_lifetime(2);
//! let mut engine = GeneticEngine::new(&nodes, "A", config).unwrap();
//! let limits = RunLimits::default().with_generation_limit(5).with_max_generations(50);
//! let report = Solver::run(&mut engine, &limits).unwrap();
//! assert_eq!(report.best.path().len(), 5);
//! ```

pub mod cost;
pub mod engine;
pub mod error;
pub mod random;
pub mod scenario;
pub mod solver;
pub mod tour;

pub use error::{Result, TspError};
