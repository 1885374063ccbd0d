//! Slice-level permutation edits behind the tour operators.
//!
//! These functions take the interior of a tour (everything between the
//! fixed start node at both ends) and build a new sequence from slices of
//! it. They never alias the input, so a parent tour is left untouched.
//! Random choices are made by the caller in [`Tour`](super::Tour); the
//! functions here are deterministic given their indices.
//!
//! # Edits
//!
//! - [`shuffle`]: Fisher–Yates permutation, in place on a scratch buffer
//! - [`swap_adjacent_segments`]: exchange `[f, f+s)` with `[f+s, f+2s)`
//! - [`shift_segment`]: cut a segment and reinsert it elsewhere
//! - [`reverse_segment`]: reverse a sub-sequence (2-opt move)
//! - [`splice_donor`]: order-preserving insertion of a donor segment
//!
//! # References
//!
//! - Knuth (1997), *TAOCP Vol. 2*, Algorithm P (shuffling)
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use crate::error::Result;
use crate::random::RandomSource;
use std::collections::HashSet;
use std::hash::Hash;

// ============================================================================
// Shuffle
// ============================================================================

/// Uniform Fisher–Yates shuffle driven by `rng`.
///
/// Position `i` is swapped with a uniform pick from `[i, len-1]`, for every
/// `i` in order, so the number of draws equals the slice length.
pub fn shuffle<T>(items: &mut [T], rng: &mut RandomSource) -> Result<()> {
    let n = items.len();
    for i in 0..n {
        let r = rng.int_in(i, n - 1)?;
        items.swap(i, r);
    }
    Ok(())
}

// ============================================================================
// Segment edits
// ============================================================================

/// Exchanges the adjacent segments `[first, first+size)` and
/// `[first+size, first+2*size)`.
///
/// # Panics
/// Panics if `first + 2 * size > seq.len()`.
pub fn swap_adjacent_segments<T: Clone>(seq: &[T], first: usize, size: usize) -> Vec<T> {
    let second = first + size;
    let end = second + size;
    assert!(end <= seq.len(), "segments exceed sequence length");

    let mut out = Vec::with_capacity(seq.len());
    out.extend_from_slice(&seq[..first]);
    out.extend_from_slice(&seq[second..end]);
    out.extend_from_slice(&seq[first..second]);
    out.extend_from_slice(&seq[end..]);
    out
}

/// Removes `[first, first+size)` and reinserts it at `insert_at`, an index
/// into the sequence that remains after the removal.
///
/// # Panics
/// Panics if the segment exceeds the sequence or `insert_at` is past the
/// end of the remainder.
pub fn shift_segment<T: Clone>(seq: &[T], first: usize, size: usize, insert_at: usize) -> Vec<T> {
    let end = first + size;
    assert!(end <= seq.len(), "segment exceeds sequence length");

    let mut rest = Vec::with_capacity(seq.len() - size);
    rest.extend_from_slice(&seq[..first]);
    rest.extend_from_slice(&seq[end..]);
    assert!(insert_at <= rest.len(), "insertion point out of range");

    let mut out = Vec::with_capacity(seq.len());
    out.extend_from_slice(&rest[..insert_at]);
    out.extend_from_slice(&seq[first..end]);
    out.extend_from_slice(&rest[insert_at..]);
    out
}

/// Reverses `[start, start+len)`.
///
/// # Panics
/// Panics if the segment exceeds the sequence.
pub fn reverse_segment<T: Clone>(seq: &[T], start: usize, len: usize) -> Vec<T> {
    let end = start + len;
    assert!(end <= seq.len(), "segment exceeds sequence length");

    let mut out = Vec::with_capacity(seq.len());
    out.extend_from_slice(&seq[..start]);
    out.extend(seq[start..end].iter().rev().cloned());
    out.extend_from_slice(&seq[end..]);
    out
}

// ============================================================================
// Crossover helpers
// ============================================================================

/// Elements of `seq` not present in `exclude`, in their original order.
pub fn set_difference<T: Clone + Eq + Hash>(seq: &[T], exclude: &[T]) -> Vec<T> {
    let excluded: HashSet<&T> = exclude.iter().collect();
    seq.iter()
        .filter(|item| !excluded.contains(item))
        .cloned()
        .collect()
}

/// Drops the donor's elements from `seq` and splices the donor back in at
/// `at`, clamped to the length of what remains.
///
/// If `donor` holds distinct elements of `seq`, the result is a
/// permutation of `seq`.
pub fn splice_donor<T: Clone + Eq + Hash>(seq: &[T], donor: &[T], at: usize) -> Vec<T> {
    let rest = set_difference(seq, donor);
    let at = at.min(rest.len());

    let mut out = Vec::with_capacity(rest.len() + donor.len());
    out.extend_from_slice(&rest[..at]);
    out.extend_from_slice(donor);
    out.extend_from_slice(&rest[at..]);
    out
}

// ============================================================================
// Tests
// ============================================================================
