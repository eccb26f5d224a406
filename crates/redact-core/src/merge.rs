//! Span merger
//!
//! Reconciles pattern and contextual candidates into one [`DetectionSet`].
//!
//! 1. Contextual candidates below the confidence floor are dropped.
//!    Pattern candidates are never floor-filtered.
//! 2. A contextual candidate that overlaps a pattern candidate survives only
//!    if it strictly contains every pattern span it touches. Equal or
//!    partial overlaps go to the pattern.
//! 3. Survivors are sorted by start ASC, length DESC, confidence DESC,
//!    pattern before contextual, then type and recognizer name.
//! 4. A left-to-right sweep keeps each candidate that starts at or after
//!    the end of the last kept one.
//!
//! The output depends only on the candidate multiset, never on arrival order.

use std::cmp::Ordering;

use crate::{Detection, DetectionSet, Source};

/// Default floor for contextual candidates.
pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergePolicy {
    pub confidence_floor: f64,
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self {
            confidence_floor: DEFAULT_CONFIDENCE_FLOOR,
        }
    }
}

/// Merge candidates from both recognizer families.
pub fn merge(candidates: Vec<Detection>, policy: &MergePolicy) -> DetectionSet {
    let (mut patterns, contextual): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|d| d.source() == Source::Pattern);

    patterns.sort_by(rank);

    let mut pool: Vec<Detection> = contextual
        .into_iter()
        .filter(|d| d.confidence() >= policy.confidence_floor)
        .filter(|d| !conflicts_with_pattern(d, &patterns))
        .collect();
    pool.extend(patterns);
    pool.sort_by(rank);

    let mut accepted = Vec::with_capacity(pool.len());
    let mut frontier = 0;
    for candidate in pool {
        if candidate.start() >= frontier {
            frontier = candidate.end();
            accepted.push(candidate);
        }
    }

    DetectionSet::from_sorted_unchecked(accepted)
}

/// Sweep order.
fn rank(a: &Detection, b: &Detection) -> Ordering {
    a.start()
        .cmp(&b.start())
        .then_with(|| b.span().len().cmp(&a.span().len()))
        .then_with(|| b.confidence().total_cmp(&a.confidence()))
        .then_with(|| a.source().cmp(&b.source()))
        .then_with(|| a.entity_type().cmp(&b.entity_type()))
        .then_with(|| a.recognizer().cmp(b.recognizer()))
}

/// `patterns` must be sorted by start.
fn conflicts_with_pattern(contextual: &Detection, patterns: &[Detection]) -> bool {
    let span = contextual.span();
    patterns
        .iter()
        .take_while(|p| p.start() < span.end())
        .filter(|p| p.span().overlaps(&span))
        .any(|p| !span.strictly_contains(&p.span()))
}
