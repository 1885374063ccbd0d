//! Generation loop.
//!
//! [`GeneticEngine`] owns the population, the cost cache and the random
//! source, and advances the population one generation at a time:
//! cull → mutate/cross → sort.

use super::config::EngineConfig;
use crate::cost::{CostCalculator, Node};
use crate::error::{Result, TspError};
use crate::random::RandomSource;
use crate::tour::{Mutation, Tour};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, instrument, trace};

/// Cost and longevity of one individual, for charts and summaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TourStats {
    pub cost: f64,
    pub longevity: u32,
}

/// What happened during one call to [`GeneticEngine::run_generation`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Generation number just completed (1-based).
    pub generation: usize,

    /// Slots replaced because an earlier slot held the same genotype.
    pub culled_duplicates: usize,

    /// Slots replaced because they outlived `min_lifetime` without
    /// matching the best cost.
    pub culled_stale: usize,

    /// Individuals replaced by a strictly cheaper child.
    pub improved: usize,

    /// Cost of the best tour after sorting.
    pub best_cost: f64,

    /// Longevity of the best tour after sorting.
    pub best_longevity: u32,
}

/// Population ordering: cost ascending, then longevity descending, then
/// genotype descending.
pub fn compare_tours(a: &Tour, b: &Tour) -> Ordering {
    a.cost()
        .total_cmp(&b.cost())
        .then_with(|| b.longevity().cmp(&a.longevity()))
        .then_with(|| b.genotype().cmp(a.genotype()))
}

/// Genetic optimizer for round trips over a fixed node set.
///
/// The engine never decides when to stop; callers inspect
/// [`best`](Self::best) after each generation (see
/// [`Solver`](crate::solver::Solver) for a ready-made loop).
///
/// # Usage
///
/// ```
/// use geo_tsp_ga::cost::Node;
/// use geo_tsp_ga::engine::{EngineConfig, GeneticEngine};
///
/// let nodes = vec![
///     Node::new("A", 0.0, 0.0),
///     Node::new("B", 0.0, 1.0),
///     Node::new("C", 1.0, 1.0),
///     Node::new("D", 1.0, 0.0),
/// ];
/// let config = EngineConfig::default().with_population_size(4);
/// let mut engine = GeneticEngine::new(&nodes, "A", config).unwrap();
/// engine.run_generation().unwrap();
/// assert_eq!(engine.best().path().first().map(String::as_str), Some("A"));
/// ```
#[derive(Debug, Clone)]
pub struct GeneticEngine {
    config: EngineConfig,
    costs: CostCalculator,
    rng: RandomSource,
    origin: Tour,
    population: Vec<Tour>,
    generation: usize,
}

impl GeneticEngine {
    /// Builds the origin tour and an initial population of shuffles of it.
    ///
    /// The initial population is left in creation order; it is first
    /// sorted at the end of generation 1.
    ///
    /// # Errors
    /// [`TspError::InvalidConfig`] for fewer than two nodes or an invalid
    /// `config`; node errors from [`CostCalculator::new`];
    /// [`TspError::UnknownStartNode`] if `start` is not a node id.
    pub fn new(nodes: &[Node], start: &str, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        if nodes.len() < 2 {
            return Err(TspError::InvalidConfig(format!(
                "at least 2 nodes are required, got {}",
                nodes.len()
            )));
        }

        let mut costs = CostCalculator::new(nodes)?.with_speed(config.speed)?;
        let mut rng = RandomSource::new(config.seed);
        let origin = Tour::origin(nodes, start, &mut costs)?;
        let population = (0..config.population_size)
            .map(|_| origin.spawn_shuffle(&mut rng, &mut costs))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            nodes = nodes.len(),
            population_size = config.population_size,
            seed = config.seed,
            origin_cost = origin.cost(),
            "engine initialized"
        );

        Ok(Self {
            config,
            costs,
            rng,
            origin,
            population,
            generation: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The current population, sorted after every generation.
    pub fn population(&self) -> &[Tour] {
        &self.population
    }

    /// The first individual of the population.
    pub fn best(&self) -> &Tour {
        &self.population[0]
    }

    /// The reference tour in input node order.
    pub fn origin(&self) -> &Tour {
        &self.origin
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn cost_calculator(&self) -> &CostCalculator {
        &self.costs
    }

    /// Cost and longevity of every individual, in population order.
    pub fn stats(&self) -> Vec<TourStats> {
        self.population
            .iter()
            .map(|t| TourStats {
                cost: t.cost(),
                longevity: t.longevity(),
            })
            .collect()
    }

    /// Restarts the random sequence without touching the population.
    pub fn reseed(&mut self, seed: i32) {
        self.rng.reseed(seed);
    }

    /// Advances the population by one generation.
    #[instrument(level = "debug", skip(self), fields(generation = self.generation + 1))]
    pub fn run_generation(&mut self) -> Result<GenerationReport> {
        let (culled_duplicates, culled_stale) = self.cull()?;
        let improved = self.mutate()?;
        self.sort();
        self.generation += 1;

        let best = self.best();
        let report = GenerationReport {
            generation: self.generation,
            culled_duplicates,
            culled_stale,
            improved,
            best_cost: best.cost(),
            best_longevity: best.longevity(),
        };
        debug!(
            culled_duplicates,
            culled_stale,
            improved,
            best_cost = report.best_cost,
            best_longevity = report.best_longevity,
            "generation complete"
        );
        Ok(report)
    }

    // ------------------------------------------------------------------
    // Phases
    // ------------------------------------------------------------------

    /// Marks slots to replace, returning the marks and the number of
    /// duplicate and stale marks.
    ///
    /// Assumes the population is in its sorted order, so the first
    /// occurrence of a genotype is the best-ranked one and slot 0 holds the
    /// best cost.
    fn cull_marks(&self) -> (Vec<bool>, usize, usize) {
        let n = self.population.len();
        let mut marks = vec![false; n];

        let mut seen = HashSet::with_capacity(n);
        let mut duplicates = 0;
        for (i, tour) in self.population.iter().enumerate() {
            if !seen.insert(tour.genotype()) {
                marks[i] = true;
                duplicates += 1;
            }
        }

        let best_cost = self.population[0].cost();
        let mut stale = 0;
        for i in (1..n).rev() {
            let tour = &self.population[i];
            if !marks[i] && tour.longevity() > self.config.min_lifetime && tour.cost() > best_cost {
                marks[i] = true;
                stale += 1;
            }
        }

        (marks, duplicates, stale)
    }

    fn cull(&mut self) -> Result<(usize, usize)> {
        let (marks, duplicates, stale) = self.cull_marks();
        for (i, marked) in marks.into_iter().enumerate() {
            if marked {
                trace!(slot = i, genotype = self.population[i].genotype(), "culled");
                self.population[i] = self.origin.spawn_shuffle(&mut self.rng, &mut self.costs)?;
            }
        }
        Ok((duplicates, stale))
    }

    /// Tries `attempts_per_iteration` children per individual and keeps the
    /// cheapest if it beats its parent. Returns the number of replacements.
    fn mutate(&mut self) -> Result<usize> {
        let n = self.population.len();
        let roll = RandomSource::uniform_int(1, 100)?;
        let partner = RandomSource::uniform_int(0, n - 2)?;
        let mut improved = 0;

        for i in 0..n {
            let mut best_child: Option<Tour> = None;
            for _ in 0..self.config.attempts_per_iteration {
                let parent = &self.population[i];
                let child = match Mutation::from_roll(roll.sample(&mut self.rng)) {
                    Mutation::TransposeLocal => {
                        parent.spawn_transpose_local(&mut self.rng, &mut self.costs)?
                    }
                    Mutation::ShiftSegment => {
                        parent.spawn_shift_segment(&mut self.rng, &mut self.costs)?
                    }
                    Mutation::ReverseSegment => {
                        parent.spawn_reverse_segment(&mut self.rng, &mut self.costs)?
                    }
                    Mutation::Crossover => {
                        // skip over self without rejection sampling
                        let mut o = partner.sample(&mut self.rng);
                        if o >= i {
                            o += 1;
                        }
                        parent.cross_from_other(&self.population[o], &mut self.rng, &mut self.costs)?
                    }
                };
                if best_child.as_ref().map_or(true, |b| child.cost() < b.cost()) {
                    best_child = Some(child);
                }
            }

            match best_child {
                Some(child) if child.cost() < self.population[i].cost() => {
                    trace!(
                        slot = i,
                        from = self.population[i].cost(),
                        to = child.cost(),
                        "improved"
                    );
                    self.population[i] = child;
                    improved += 1;
                }
                _ => self.population[i].increase_longevity(),
            }
        }

        Ok(improved)
    }

    fn sort(&mut self) {
        self.population.sort_by(compare_tours);
    }
}

// ============================================================================
// Tests
// ============================================================================
