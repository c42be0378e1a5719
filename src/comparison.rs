//! Crowded comparison of ranked candidates.

use std::cmp::Ordering;

use crate::ranking::{CandidateIndex, CrowdingDistance, Rank};

/// A candidate paired with its front rank and crowding distance.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ParetoRecord {
  /// Index of the candidate in the population.
  pub candidate: CandidateIndex,
  /// Index of the candidate's front, `0` for the non-dominated one.
  pub rank: Rank,
  /// Crowding distance of the candidate inside its front. Always
  /// non-negative, infinite for boundary candidates.
  pub crowding_distance: CrowdingDistance,
}

impl ParetoRecord {
  /// Creates a record with zero crowding distance.
  pub fn new(candidate: CandidateIndex, rank: Rank) -> Self {
    Self {
      candidate,
      rank,
      crowding_distance: 0.0,
    }
  }

  /// Returns `true` if `self` is better than `other`, i.e. it lies in a
  /// better front or in the same front but in a less crowded region.
  pub fn better_than(&self, other: &Self) -> bool {
    crowded_cmp(self, other) == Ordering::Less
  }
}

/// Crowded comparison operator. Returns `Less` if `a` is better than `b`.
///
/// Lower rank always wins, within the same rank larger crowding distance
/// wins. Records with equal rank and distance compare as `Equal`, so a stable
/// sort keeps their relative order.
pub fn crowded_cmp(a: &ParetoRecord, b: &ParetoRecord) -> Ordering {
  a.rank
    .cmp(&b.rank)
    .then_with(|| b.crowding_distance.total_cmp(&a.crowding_distance))
}

/// Stably sorts records from the best to the worst by [`crowded_cmp`].
pub fn sort_crowded(records: &mut [ParetoRecord]) {
  records.sort_by(crowded_cmp);
}
