//! Caller-side run loop.
//!
//! The engine has no notion of "done". [`Solver`] drives it the way an
//! interactive front end would: keep advancing until the best tour has
//! survived `generation_limit` generations unchanged, with optional
//! generation and wall-clock caps and an external cancellation flag.

use crate::cost::Node;
use crate::engine::{EngineConfig, GenerationReport, GeneticEngine};
use crate::error::{Result, TspError};
use crate::tour::Tour;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Stopping rules evaluated between generations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunLimits {
    /// Stop once the best tour's longevity reaches this value.
    pub generation_limit: u32,

    /// Hard cap on generations. `None` means no cap.
    pub max_generations: Option<usize>,

    /// Wall-clock budget in milliseconds, checked before each generation.
    pub time_limit_ms: Option<u64>,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            generation_limit: 100,
            max_generations: None,
            time_limit_ms: None,
        }
    }
}

impl RunLimits {
    pub fn with_generation_limit(mut self, n: u32) -> Self {
        self.generation_limit = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = Some(n);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the limits.
    pub fn validate(&self) -> Result<()> {
        if self.generation_limit == 0 {
            return Err(TspError::InvalidConfig(
                "generation_limit must be at least 1".into(),
            ));
        }
        if self.max_generations == Some(0) {
            return Err(TspError::InvalidConfig(
                "max_generations must be positive or None".into(),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(TspError::InvalidConfig(
                "time_limit_ms must be positive or None".into(),
            ));
        }
        Ok(())
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// The best tour reached the longevity target.
    Converged,
    /// `max_generations` was reached first.
    GenerationCap,
    /// `time_limit_ms` elapsed.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Outcome of a [`Solver`] run.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Best tour at the end of the run.
    pub best: Tour,

    /// Generations executed during this run.
    pub generations: usize,

    pub termination: Termination,

    /// Best cost before the first generation, then after each one.
    pub cost_history: Vec<f64>,

    /// Time spent inside `run_generation`.
    pub elapsed: Duration,

    /// Seed of the engine that produced this report.
    pub seed: i32,
}

impl SolveReport {
    /// Average time per generation.
    pub fn time_per_generation(&self) -> Duration {
        if self.generations == 0 {
            Duration::ZERO
        } else {
            self.elapsed.div_f64(self.generations as f64)
        }
    }
}

/// Drives a [`GeneticEngine`] to a stopping condition.
pub struct Solver;

impl Solver {
    /// Runs `engine` until one of `limits` triggers.
    pub fn run(engine: &mut GeneticEngine, limits: &RunLimits) -> Result<SolveReport> {
        Self::run_with_cancel(engine, limits, None)
    }

    /// Runs with an optional cancellation flag, checked before every
    /// generation.
    pub fn run_with_cancel(
        engine: &mut GeneticEngine,
        limits: &RunLimits,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SolveReport> {
        Self::run_observed(engine, limits, cancel, |_, _| {})
    }

    /// Like [`run_with_cancel`](Self::run_with_cancel), calling
    /// `on_generation` after every completed generation, before the
    /// convergence check.
    pub fn run_observed<F>(
        engine: &mut GeneticEngine,
        limits: &RunLimits,
        cancel: Option<Arc<AtomicBool>>,
        mut on_generation: F,
    ) -> Result<SolveReport>
    where
        F: FnMut(&GeneticEngine, &GenerationReport),
    {
        limits.validate()?;
        info!(
            seed = engine.config().seed,
            population_size = engine.config().population_size,
            generation_limit = limits.generation_limit,
            "solver started"
        );

        let started = Instant::now();
        let mut elapsed = Duration::ZERO;
        let mut generations = 0usize;
        let mut cost_history = vec![engine.best().cost()];

        let termination = loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break Termination::Cancelled;
                }
            }
            if let Some(ms) = limits.time_limit_ms {
                if started.elapsed() >= Duration::from_millis(ms) {
                    break Termination::TimeLimit;
                }
            }
            if limits.max_generations.is_some_and(|cap| generations >= cap) {
                break Termination::GenerationCap;
            }

            let t0 = Instant::now();
            let report = engine.run_generation()?;
            elapsed += t0.elapsed();
            generations += 1;
            cost_history.push(report.best_cost);
            on_generation(engine, &report);

            if report.best_longevity >= limits.generation_limit {
                break Termination::Converged;
            }
        };

        let best = engine.best().clone();
        info!(
            ?termination,
            generations,
            best_cost = best.cost(),
            elapsed_ms = elapsed.as_millis() as u64,
            "solver finished"
        );

        Ok(SolveReport {
            best,
            generations,
            termination,
            cost_history,
            elapsed,
            seed: engine.config().seed,
        })
    }

    /// Runs one independent engine per seed and returns the reports in
    /// seed order.
    ///
    /// With the `parallel` feature the engines run on the rayon pool; each
    /// engine is still advanced sequentially, so results are identical to
    /// the sequential build.
    pub fn compare_seeds(
        nodes: &[Node],
        start: &str,
        config: &EngineConfig,
        limits: &RunLimits,
        seeds: &[i32],
    ) -> Result<Vec<SolveReport>> {
        let solve_one = |seed: i32| -> Result<SolveReport> {
            let mut engine = GeneticEngine::new(nodes, start, config.clone().with_seed(seed))?;
            Self::run(&mut engine, limits)
        };

        #[cfg(feature = "parallel")]
        let reports: Result<Vec<SolveReport>> = {
            use rayon::prelude::*;
            seeds.par_iter().map(|&s| solve_one(s)).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let reports: Result<Vec<SolveReport>> = seeds.iter().map(|&s| solve_one(s)).collect();

        reports
    }
}
