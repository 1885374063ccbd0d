//! Scenario files.
//!
//! A scenario bundles the nodes, the start node and suggested parameters:
//!
//! ```json
//! {
//!   "startNode": "K",
//!   "params": { "populationSize": 10, "numMutations": 1000, "minLifetime": 10, "genLimit": 100 },
//!   "nodes": [ { "id": "K", "name": "Kansas City", "lat": 39.1, "lon": -94.6 }, ... ]
//! }
//! ```
//!
//! Keys the optimizer does not use (camera settings and the like) are
//! ignored. Every `params` entry is optional and falls back to the
//! [`EngineConfig`] / [`RunLimits`] defaults.

use crate::cost::Node;
use crate::engine::{EngineConfig, GeneticEngine};
use crate::error::Result;
use crate::solver::RunLimits;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Suggested optimizer parameters stored in a scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population_size: Option<usize>,

    /// Mutation attempts per individual per generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_mutations: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_lifetime: Option<u32>,

    /// Longevity of the best tour at which a run is considered finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gen_limit: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// A problem instance loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub nodes: Vec<Node>,
    pub start_node: String,
    #[serde(default)]
    pub params: ScenarioParams,
}

impl Scenario {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(json)?;
        debug!(
            nodes = scenario.nodes.len(),
            start = %scenario.start_node,
            "scenario parsed"
        );
        Ok(scenario)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Engine configuration from the scenario's params, seeded with `seed`.
    pub fn engine_config(&self, seed: i32) -> EngineConfig {
        let mut config = EngineConfig::default().with_seed(seed);
        if let Some(n) = self.params.population_size {
            config = config.with_population_size(n);
        }
        if let Some(n) = self.params.num_mutations {
            config = config.with_attempts_per_iteration(n);
        }
        if let Some(n) = self.params.min_lifetime {
            config = config.with_min_lifetime(n);
        }
        if let Some(speed) = self.params.speed {
            config = config.with_speed(speed);
        }
        config
    }

    /// Run limits from the scenario's `genLimit`.
    pub fn run_limits(&self) -> RunLimits {
        match self.params.gen_limit {
            Some(n) => RunLimits::default().with_generation_limit(n),
            None => RunLimits::default(),
        }
    }

    /// Builds an engine over this scenario's nodes.
    pub fn build_engine(&self, config: EngineConfig) -> Result<GeneticEngine> {
        GeneticEngine::new(&self.nodes, &self.start_node, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TspError;

    const SAMPLE: &str = r#"{
        "startNode": "K",
        "globe": { "startView": { "lat": 38.0, "lon": -97.0, "alt": 5000000 } },
        "params": { "populationSize": 8, "numMutations": 30, "minLifetime": 4, "genLimit": 25 },
        "nodes": [
            { "id": "K", "name": "Kansas City", "lat": 39.0997, "lon": -94.5786 },
            { "id": "D", "name": "Denver", "lat": 39.7392, "lon": -104.9903 },
            { "id": "O", "name": "Omaha", "lat": 41.2565, "lon": -95.9345 },
            { "id": "T", "name": "Tulsa", "lat": 36.1540, "lon": -95.9928 },
            { "id": "W", "lat": 37.6872, "lon": -97.3301 }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let scenario = Scenario::from_json_str(SAMPLE).unwrap();
        assert_eq!(scenario.start_node, "K");
        assert_eq!(scenario.nodes.len(), 5);
        assert_eq!(scenario.nodes[0].name.as_deref(), Some("Kansas City"));
        assert_eq!(scenario.nodes[4].name, None);
        assert_eq!(scenario.params.num_mutations, Some(30));
    }

    #[test]
    fn test_engine_config_from_params() {
        let scenario = Scenario::from_json_str(SAMPLE).unwrap();
        let config = scenario.engine_config(12);
        assert_eq!(config.population_size, 8);
        assert_eq!(config.attempts_per_iteration, 30);
        assert_eq!(config.min_lifetime, 4);
        assert_eq!(config.speed, 0.0);
        assert_eq!(config.seed, 12);
        assert_eq!(scenario.run_limits().generation_limit, 25);
    }

    #[test]
    fn test_missing_params_use_defaults() {
        let json = r#"{"startNode": "A", "nodes": [
            {"id": "A", "lat": 0, "lon": 0}, {"id": "B", "lat": 1, "lon": 1}
        ]}"#;
        let scenario = Scenario::from_json_str(json).unwrap();
        assert_eq!(scenario.params, ScenarioParams::default());
        let defaults = EngineConfig::default();
        let config = scenario.engine_config(defaults.seed);
        assert_eq!(config, defaults);
        assert_eq!(scenario.run_limits(), RunLimits::default());
    }

    #[test]
    fn test_build_engine() {
        let scenario = Scenario::from_json_str(SAMPLE).unwrap();
        let mut engine = scenario.build_engine(scenario.engine_config(1)).unwrap();
        engine.run_generation().unwrap();
        assert!(engine.best().is_valid_for(&scenario.nodes));
        assert_eq!(engine.best().start(), "K");
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Scenario::from_json_str("{\"nodes\": ["),
            Err(TspError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Scenario::load("/nonexistent/scenario.json"),
            Err(TspError::Io(_))
        ));
    }
}
