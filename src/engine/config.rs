//! Engine configuration.
//!
//! [`EngineConfig`] holds every parameter the generation loop reads.

use crate::error::{Result, TspError};
use crate::random::RandomSource;
use serde::{Deserialize, Serialize};

/// Configuration for the [`GeneticEngine`](super::GeneticEngine).
///
/// # Defaults
///
/// ```
/// use geo_tsp_ga::engine::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.seed, 4);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use geo_tsp_ga::engine::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_population_size(40)
///     .with_attempts_per_iteration(250)
///     .with_min_lifetime(5)
///     .with_seed(1234);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of tours kept in the population. At least 2.
    pub population_size: usize,

    /// Candidate mutations tried per individual per generation. At least 1.
    pub attempts_per_iteration: usize,

    /// Generations a tour may go unimproved before it becomes eligible for
    /// culling, provided it is also worse than the current best.
    pub min_lifetime: u32,

    /// Travel speed. When positive, costs are travel times
    /// (`miles / speed`); zero keeps raw distances in miles.
    pub speed: f64,

    /// Seed of the engine's random source.
    pub seed: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            population_size: 10,
            attempts_per_iteration: 100,
            min_lifetime: 10,
            speed: 0.0,
            seed: RandomSource::DEFAULT_SEED,
        }
    }
}

impl EngineConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of mutation attempts per individual.
    pub fn with_attempts_per_iteration(mut self, n: usize) -> Self {
        self.attempts_per_iteration = n;
        self
    }

    /// Sets the minimum lifetime before stale tours may be culled.
    pub fn with_min_lifetime(mut self, generations: u32) -> Self {
        self.min_lifetime = generations;
        self
    }

    /// Sets the travel speed (0 for distance).
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    /// [`TspError::InvalidConfig`] describing the first invalid parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(TspError::InvalidConfig(
                "population_size must be at least 2".into(),
            ));
        }
        if self.attempts_per_iteration == 0 {
            return Err(TspError::InvalidConfig(
                "attempts_per_iteration must be at least 1".into(),
            ));
        }
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(TspError::InvalidConfig(
                "speed must be a finite non-negative number".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.population_size, 10);
        assert_eq!(config.attempts_per_iteration, 100);
        assert_eq!(config.min_lifetime, 10);
        assert_eq!(config.speed, 0.0);
        assert_eq!(config.seed, 4);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_population_size(30)
            .with_attempts_per_iteration(7)
            .with_min_lifetime(0)
            .with_speed(60.0)
            .with_seed(-9);

        assert_eq!(config.population_size, 30);
        assert_eq!(config.attempts_per_iteration, 7);
        assert_eq!(config.min_lifetime, 0);
        assert_eq!(config.speed, 60.0);
        assert_eq!(config.seed, -9);
    }

    #[test]
    fn test_validate_ok() {
        assert!(EngineConfig::default().validate().is_ok());
        assert!(EngineConfig::default()
            .with_population_size(2)
            .with_attempts_per_iteration(1)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = EngineConfig::default().with_population_size(1);
        assert!(matches!(config.validate(), Err(TspError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_attempts() {
        let config = EngineConfig::default().with_attempts_per_iteration(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_speed() {
        assert!(EngineConfig::default().with_speed(-3.0).validate().is_err());
        assert!(EngineConfig::default()
            .with_speed(f64::NAN)
            .validate()
            .is_err());
    }

    #[test]
    fn test_serde_fills_missing_fields() {
        let config: EngineConfig = serde_json::from_str(r#"{"population_size": 25}"#).unwrap();
        assert_eq!(config.population_size, 25);
        assert_eq!(config.attempts_per_iteration, 100);
    }
}
