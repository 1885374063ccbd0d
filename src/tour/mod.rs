//! Candidate round trips and the operators that derive new ones.
//!
//! A [`Tour`] is a closed path `[start, .., start]` whose interior visits
//! every other node exactly once. Tours are immutable: each operator
//! returns a brand-new tour with its cost computed eagerly, leaving the
//! parent untouched. Only the engine may bump a tour's longevity.
//!
//! # Operators
//!
//! With `L` the interior length, the random choices are drawn in this
//! order and from these inclusive ranges:
//!
//! | operator                 | draws                                                   |
//! |--------------------------|---------------------------------------------------------|
//! | [`Tour::spawn_shuffle`]  | Fisher–Yates, one draw per interior position            |
//! | [`Tour::spawn_transpose_local`] | size `[1, L/2]`, first `[0, L-2·size]`           |
//! | [`Tour::spawn_shift_segment`]   | size `[1, L/2]`, first `[0, L-size]`, insert `[0, L-size-1]` |
//! | [`Tour::spawn_reverse_segment`] | length `[2, L-1]`, start `[0, L-length]`         |
//! | [`Tour::cross_from_other`]      | size `[2, L/2]`, offset `[1, L-size+1]`          |
//!
//! An operator whose range is empty for a short interior returns an
//! unchanged copy and draws nothing. See [`Mutation::min_interior`].

pub mod operators;

use crate::cost::{CostCalculator, Node};
use crate::error::{Result, TspError};
use crate::random::RandomSource;
use std::collections::HashSet;
use std::fmt;

/// The variation applied to an individual in one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    TransposeLocal,
    ShiftSegment,
    ReverseSegment,
    Crossover,
}

impl Mutation {
    /// Maps a roll in `[1, 100]` onto the fixed probability bands:
    /// 30% transpose, 30% shift, 30% reverse, 10% crossover.
    pub fn from_roll(roll: usize) -> Self {
        match roll {
            0..=30 => Mutation::TransposeLocal,
            31..=60 => Mutation::ShiftSegment,
            61..=90 => Mutation::ReverseSegment,
            _ => Mutation::Crossover,
        }
    }

    /// Smallest interior length for which the operator's size range is
    /// non-empty.
    pub fn min_interior(self) -> usize {
        match self {
            Mutation::TransposeLocal | Mutation::ShiftSegment => 2,
            Mutation::ReverseSegment => 3,
            Mutation::Crossover => 4,
        }
    }
}

/// One candidate round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    path: Vec<String>,
    genotype: String,
    cost: f64,
    longevity: u32,
}

impl Tour {
    /// Builds a tour from a closed path and prices it.
    ///
    /// # Errors
    /// [`TspError::MalformedTour`] if the path has fewer than two entries or
    /// does not end where it starts; [`TspError::NodeNotFound`] if a node is
    /// unknown to `costs`.
    pub fn new(path: Vec<String>, costs: &mut CostCalculator) -> Result<Self> {
        match (path.first(), path.last()) {
            (Some(first), Some(last)) if path.len() >= 2 && first == last => {}
            _ => {
                return Err(TspError::MalformedTour(format!(
                    "path must start and end on the same node: {path:?}"
                )))
            }
        }
        let cost = costs.path_cost(&path)?;
        let genotype = path.concat();
        Ok(Self {
            path,
            genotype,
            cost,
            longevity: 0,
        })
    }

    /// The tour `[start, every other node in input order, start]`.
    pub fn origin(nodes: &[Node], start: &str, costs: &mut CostCalculator) -> Result<Self> {
        if !nodes.iter().any(|n| n.id == start) {
            return Err(TspError::UnknownStartNode(start.to_string()));
        }
        let mut path = Vec::with_capacity(nodes.len() + 1);
        path.push(start.to_string());
        path.extend(nodes.iter().filter(|n| n.id != start).map(|n| n.id.clone()));
        path.push(start.to_string());
        Self::new(path, costs)
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Concatenated path, used as a content-equality key.
    ///
    /// Ids are joined without a separator, so node sets whose ids differ in
    /// length can map two distinct paths to one genotype (`S`, `1`, `12` and
    /// `S`, `11`, `2` both give `S112`). The engine then treats them as
    /// duplicates. Use ids of equal width to keep genotypes unique.
    pub fn genotype(&self) -> &str {
        &self.genotype
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Consecutive generations survived without being improved upon.
    pub fn longevity(&self) -> u32 {
        self.longevity
    }

    pub fn start(&self) -> &str {
        &self.path[0]
    }

    /// The path without the start node at either end.
    pub fn interior(&self) -> &[String] {
        &self.path[1..self.path.len() - 1]
    }

    pub(crate) fn increase_longevity(&mut self) {
        self.longevity += 1;
    }

    /// Whether this tour is a closed trip from its start through every other
    /// node of `nodes` exactly once.
    pub fn is_valid_for(&self, nodes: &[Node]) -> bool {
        let start = self.start();
        if self.path.len() != nodes.len() + 1 || self.path.last().map(String::as_str) != Some(start) {
            return false;
        }
        let expected: HashSet<&str> = nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|&id| id != start)
            .collect();
        if expected.len() + 1 != nodes.len() {
            // start is not among the nodes
            return false;
        }
        let mut seen = HashSet::with_capacity(expected.len());
        self.interior()
            .iter()
            .all(|id| expected.contains(id.as_str()) && seen.insert(id.as_str()))
            && seen.len() == expected.len()
    }

    // ------------------------------------------------------------------
    // Operators
    // ------------------------------------------------------------------

    /// A tour with the interior uniformly shuffled.
    pub fn spawn_shuffle(&self, rng: &mut RandomSource, costs: &mut CostCalculator) -> Result<Tour> {
        let mut interior = self.interior().to_vec();
        operators::shuffle(&mut interior, rng)?;
        self.rebuild(interior, costs)
    }

    /// Swaps two adjacent interior segments of equal size.
    pub fn spawn_transpose_local(
        &self,
        rng: &mut RandomSource,
        costs: &mut CostCalculator,
    ) -> Result<Tour> {
        let interior = self.interior();
        let n = interior.len();
        if n < Mutation::TransposeLocal.min_interior() {
            return Ok(self.unchanged());
        }
        let size = rng.int_in(1, n / 2)?;
        let first = rng.int_in(0, n - 2 * size)?;
        self.rebuild(operators::swap_adjacent_segments(interior, first, size), costs)
    }

    /// Moves an interior segment to another position.
    pub fn spawn_shift_segment(
        &self,
        rng: &mut RandomSource,
        costs: &mut CostCalculator,
    ) -> Result<Tour> {
        let interior = self.interior();
        let n = interior.len();
        if n < Mutation::ShiftSegment.min_interior() {
            return Ok(self.unchanged());
        }
        let size = rng.int_in(1, n / 2)?;
        let first = rng.int_in(0, n - size)?;
        let insert_at = rng.int_in(0, n - size - 1)?;
        self.rebuild(operators::shift_segment(interior, first, size, insert_at), costs)
    }

    /// Reverses an interior sub-sequence of at least two nodes.
    pub fn spawn_reverse_segment(
        &self,
        rng: &mut RandomSource,
        costs: &mut CostCalculator,
    ) -> Result<Tour> {
        let interior = self.interior();
        let n = interior.len();
        if n < Mutation::ReverseSegment.min_interior() {
            return Ok(self.unchanged());
        }
        let len = rng.int_in(2, n - 1)?;
        let start = rng.int_in(0, n - len)?;
        self.rebuild(operators::reverse_segment(interior, start, len), costs)
    }

    /// Order-preserving crossover: takes a segment of `other`'s path and
    /// splices it into this tour's interior at the same offset.
    ///
    /// # Errors
    /// [`TspError::MalformedTour`] if the two tours differ in length, start
    /// node or node set.
    pub fn cross_from_other(
        &self,
        other: &Tour,
        rng: &mut RandomSource,
        costs: &mut CostCalculator,
    ) -> Result<Tour> {
        if other.path.len() != self.path.len() {
            return Err(TspError::MalformedTour(format!(
                "cannot cross tours of length {} and {}",
                self.path.len(),
                other.path.len()
            )));
        }
        if other.start() != self.start() {
            return Err(TspError::MalformedTour(format!(
                "cannot cross a tour from {} with one from {}",
                self.start(),
                other.start()
            )));
        }
        let interior = self.interior();
        let own: HashSet<&str> = interior.iter().map(String::as_str).collect();
        let theirs: HashSet<&str> = other.interior().iter().map(String::as_str).collect();
        if own != theirs {
            return Err(TspError::MalformedTour(
                "cannot cross tours over different node sets".into(),
            ));
        }
        let n = interior.len();
        if n < Mutation::Crossover.min_interior() {
            return Ok(self.unchanged());
        }
        let size = rng.int_in(2, n / 2)?;
        let offset = rng.int_in(1, n - size + 1)?;
        let donor = &other.path[offset..offset + size];
        self.rebuild(operators::splice_donor(interior, donor, offset), costs)
    }

    fn rebuild(&self, interior: Vec<String>, costs: &mut CostCalculator) -> Result<Tour> {
        let start = self.start().to_string();
        let mut path = Vec::with_capacity(interior.len() + 2);
        path.push(start.clone());
        path.extend(interior);
        path.push(start);
        Tour::new(path, costs)
    }

    fn unchanged(&self) -> Tour {
        Tour {
            longevity: 0,
            ..self.clone()
        }
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[path: {}, cost: {:.2}, longevity: {}]",
            self.genotype, self.cost, self.longevity
        )
    }
}
