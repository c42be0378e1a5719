//! Fast non-dominated sorting.
//!
//! Partitions candidates into fronts of mutual non-dominance. Front 0 holds
//! candidates no one dominates, front `i + 1` holds candidates that are
//! dominated only by members of fronts `0..=i`.
//!
//! Bookkeeping lives in side tables indexed by candidate, created anew by
//! every call, so nothing leaks between calls.

use std::cmp::Ordering;

use itertools::Itertools;
use log::{debug, trace};
use rayon::prelude::*;

use crate::{
  ranking::{CandidateIndex, Front},
  score::{ParetoDominance, Scores},
};

// number of solutions dominating a candidate
type DominanceCounter = usize;
// indices of candidates dominated by a candidate
type DominanceList = Vec<CandidateIndex>;

/// Sorts candidates with given oriented `scores` into fronts, the best front
/// first.
///
/// Runs in `O(n² · N)`. Candidates inside each front are ordered by their
/// index in the first front and by order of discovery in the following ones,
/// so the result is fully determined by the order of `scores`.
///
/// # Examples
/// ```
/// # use nsga_rank::sorting::non_dominated_sort;
/// let scores = [[1.0, 5.0], [2.0, 3.0], [3.0, 1.0], [2.0, 2.0]];
/// let fronts = non_dominated_sort(&scores);
/// assert_eq!(fronts, vec![vec![0, 2, 3], vec![1]]);
/// ```
pub fn non_dominated_sort<const N: usize>(scores: &[Scores<N>]) -> Vec<Front> {
  let mut dominance_lists: Vec<DominanceList> = vec![Vec::new(); scores.len()];
  let mut dominance_counters: Vec<DominanceCounter> = vec![0; scores.len()];

  // for each unique pair of candidates `p` and `q`...
  for (p_idx, q_idx) in (0..scores.len()).tuple_combinations() {
    match scores[p_idx].dominance(&scores[q_idx]) {
      // if `p` dominates `q`, put `q` into list of candidates dominated by `p`
      // and increment counter of candidates dominating `q`
      Ordering::Less => {
        dominance_lists[p_idx].push(q_idx);
        dominance_counters[q_idx] += 1;
      }
      // and vice versa
      Ordering::Greater => {
        dominance_lists[q_idx].push(p_idx);
        dominance_counters[p_idx] += 1;
      }
      Ordering::Equal => {}
    }
  }

  extract_fronts(dominance_lists, dominance_counters)
}

/// Does the same as [`non_dominated_sort`], but computes dominance relations
/// in parallel with [rayon].
///
/// Each candidate gathers its own dominance list and counter, so no candidate
/// is ever written by two threads. Every pair is compared twice, which pays
/// off only for large populations or expensive comparisons. The result is
/// identical to the one of [`non_dominated_sort`].
pub fn par_non_dominated_sort<const N: usize>(
  scores: &[Scores<N>],
) -> Vec<Front> {
  let (dominance_lists, dominance_counters): (Vec<_>, Vec<_>) = scores
    .par_iter()
    .enumerate()
    .map(|(p_idx, p_sc)| {
      let mut dominated = DominanceList::new();
      let mut counter: DominanceCounter = 0;
      for (q_idx, q_sc) in scores.iter().enumerate() {
        if q_idx == p_idx {
          continue;
        }
        match p_sc.dominance(q_sc) {
          Ordering::Less => dominated.push(q_idx),
          Ordering::Greater => counter += 1,
          Ordering::Equal => {}
        }
      }
      (dominated, counter)
    })
    .unzip();

  extract_fronts(dominance_lists, dominance_counters)
}

/// Peels fronts off one by one, propagating ranks through dominance lists.
fn extract_fronts(
  dominance_lists: Vec<DominanceList>,
  mut dominance_counters: Vec<DominanceCounter>,
) -> Vec<Front> {
  let population_size = dominance_counters.len();
  let mut fronts: Vec<Front> = Vec::new();
  let mut current: Front = dominance_counters
    .iter()
    .positions(|&counter| counter == 0)
    .collect();

  while !current.is_empty() {
    let mut next = Front::new();
    // for each candidate `p` in current front...
    for &p_idx in &current {
      // for each candidate `q` dominated by `p`...
      for &q_idx in &dominance_lists[p_idx] {
        dominance_counters[q_idx] -= 1;
        // if no more candidates dominate `q`, it belongs to the next front
        if dominance_counters[q_idx] == 0 {
          next.push(q_idx);
        }
      }
    }
    trace!("front {} has {} candidates", fronts.len(), current.len());
    fronts.push(std::mem::replace(&mut current, next));
  }

  debug_assert_eq!(
    fronts.iter().map(Vec::len).sum::<usize>(),
    population_size,
    "each candidate must belong to exactly one front"
  );
  debug!(
    "sorted {} candidates into {} fronts",
    population_size,
    fronts.len()
  );

  fronts
}
