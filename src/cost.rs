//! Geographic nodes and the memoized travel-cost model.
//!
//! [`CostCalculator`] prices the leg between two nodes as the great-circle
//! (haversine) distance in miles, or as travel time when a positive speed is
//! configured. Costs are symmetric and cached per unordered pair.

use crate::error::{Result, TspError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mean Earth radius in miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// A location to visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
    /// Display name, not used by the optimizer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
            name: None,
        }
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| TspError::InvalidNode {
            id: self.id.clone(),
            reason: reason.into(),
        };
        if self.id.is_empty() {
            return Err(invalid("id must not be empty"));
        }
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(invalid("latitude must be within [-90, 90]"));
        }
        if !self.lon.is_finite() {
            return Err(invalid("longitude must be finite"));
        }
        Ok(())
    }
}

/// Great-circle distance in miles between two points given in degrees.
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lat2 = lat2.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    c * EARTH_RADIUS_MILES
}

/// Memoized pairwise cost over a fixed node set.
///
/// Assumes symmetric, time-invariant legs. The cache key orders the two
/// ids so the smaller one comes first, which makes `cost(a, b)` and
/// `cost(b, a)` share one entry.
#[derive(Debug, Clone)]
pub struct CostCalculator {
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    cache: HashMap<(usize, usize), f64>,
    speed: f64,
}

impl CostCalculator {
    /// Builds a distance calculator (miles) over `nodes`.
    ///
    /// # Errors
    /// [`TspError::DuplicateNode`] if two nodes share an id, or
    /// [`TspError::InvalidNode`] for bad coordinates.
    pub fn new(nodes: &[Node]) -> Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            node.validate()?;
            if index.insert(node.id.clone(), i).is_some() {
                return Err(TspError::DuplicateNode(node.id.clone()));
            }
        }
        Ok(Self {
            nodes: nodes.to_vec(),
            index,
            cache: HashMap::new(),
            speed: 0.0,
        })
    }

    /// Converts costs to travel time at `speed` miles per unit of time.
    ///
    /// A speed of zero keeps raw distances.
    pub fn with_speed(mut self, speed: f64) -> Result<Self> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(TspError::InvalidConfig(format!(
                "speed must be a finite non-negative number, got {speed}"
            )));
        }
        self.speed = speed;
        self.cache.clear();
        Ok(self)
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Number of distinct pairs priced so far.
    pub fn cached_pairs(&self) -> usize {
        self.cache.len()
    }

    /// Cost of travelling between `a` and `b`.
    ///
    /// # Errors
    /// [`TspError::NodeNotFound`] if either id is unknown.
    pub fn compute_cost(&mut self, a: &str, b: &str) -> Result<f64> {
        let ia = self.lookup(a)?;
        let ib = self.lookup(b)?;
        if a == b {
            return Ok(0.0);
        }
        let key = if a < b { (ia, ib) } else { (ib, ia) };
        if let Some(&cost) = self.cache.get(&key) {
            return Ok(cost);
        }

        let (p, q) = (&self.nodes[key.0], &self.nodes[key.1]);
        let mut cost = haversine_miles(p.lat, p.lon, q.lat, q.lon);
        if self.speed > 0.0 {
            cost /= self.speed;
        }
        self.cache.insert(key, cost);
        Ok(cost)
    }

    /// Total cost of walking `path` leg by leg.
    pub fn path_cost<S: AsRef<str>>(&mut self, path: &[S]) -> Result<f64> {
        let mut total = 0.0;
        for leg in path.windows(2) {
            total += self.compute_cost(leg[0].as_ref(), leg[1].as_ref())?;
        }
        Ok(total)
    }

    fn lookup(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| TspError::NodeNotFound(id.to_string()))
    }
}
