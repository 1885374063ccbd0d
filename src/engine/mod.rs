//! Genetic optimizer for round trips.
//!
//! Each generation runs three phases in a fixed order:
//!
//! 1. **Cull**: later copies of a genotype, and tours that outlived
//!    `min_lifetime` while still worse than the best, are replaced by fresh
//!    shuffles of the origin tour. The best tour is never culled.
//! 2. **Mutate/cross**: every individual tries `attempts_per_iteration`
//!    children (30% transpose, 30% shift, 30% reverse, 10% crossover with a
//!    different individual) and is replaced by the cheapest one if it is
//!    strictly cheaper; otherwise its longevity grows by one.
//! 3. **Sort**: by cost, then longevity (descending), then genotype
//!    (descending).
//!
//! All random draws come from the engine's own
//! [`RandomSource`](crate::random::RandomSource) in that order, so a seed
//! fully determines a run.
//!
//! # Key Types
//!
//! - [`EngineConfig`]: population size, attempts, minimum lifetime, speed, seed
//! - [`GeneticEngine`]: owns the population and advances it
//! - [`GenerationReport`]: per-generation counters

mod config;
mod runner;

pub use config::EngineConfig;
pub use runner::{compare_tours, GenerationReport, GeneticEngine, TourStats};
