//! Crowding distance assignment.
//!
//! Crowding distance estimates how sparse the neighbourhood of a candidate is
//! inside its front: for each objective the candidates are sorted by score
//! and every interior candidate accumulates the normalized distance between
//! its two neighbours. Boundary candidates get an infinite distance.

use log::trace;
use rayon::prelude::*;

use crate::{
  comparison::{sort_crowded, ParetoRecord},
  ranking::{CandidateIndex, CrowdingDistance, Rank},
  score::Scores,
};

/// Assigns crowding distance to each member of `front`.
///
/// `scores` are oriented scores of the whole population, `front` holds
/// indices into them. Returned records are sorted from the least to the most
/// crowded one, ties keep the order of `front`.
///
/// Every candidate whose score equals the minimum or the maximum of some
/// objective within the front is a boundary candidate. Thus fronts of one or
/// two candidates, and fronts with a constant objective, consist of boundary
/// candidates only. With no objectives at all every distance stays `0`.
///
/// Scores are expected to be finite, as checked by
/// [`Ranking::new`](crate::ranking::Ranking::new). Distances computed from
/// NaN scores are meaningless.
///
/// # Panics
///
/// Panics if a member of `front` is out of bounds of `scores`.
///
/// # Examples
/// ```
/// # use nsga_rank::crowding::crowding_distances;
/// let scores = [[0.0, 4.0], [1.0, 2.0], [2.0, 1.0], [4.0, 0.0]];
/// let records = crowding_distances(&[0, 1, 2, 3], &scores, 0);
/// let order: Vec<_> = records.iter().map(|r| r.candidate).collect();
/// assert_eq!(order, [0, 3, 1, 2]);
/// assert_eq!(records[2].crowding_distance, 1.25);
/// ```
pub fn crowding_distances<const N: usize>(
  front: &[CandidateIndex],
  scores: &[Scores<N>],
  rank: Rank,
) -> Vec<ParetoRecord> {
  let contributions =
    (0..N).map(|objective| objective_contributions(front, scores, objective));
  accumulate(front, rank, contributions)
}

/// Does the same as [`crowding_distances`], but processes objectives in
/// parallel with [rayon].
///
/// Contributions are summed up in objective order, so the result is
/// identical to the one of [`crowding_distances`].
pub fn par_crowding_distances<const N: usize>(
  front: &[CandidateIndex],
  scores: &[Scores<N>],
  rank: Rank,
) -> Vec<ParetoRecord> {
  let contributions: Vec<_> = (0..N)
    .into_par_iter()
    .map(|objective| objective_contributions(front, scores, objective))
    .collect();
  accumulate(front, rank, contributions)
}

/// Sums up per-objective contributions into records and sorts them.
fn accumulate<I>(
  front: &[CandidateIndex],
  rank: Rank,
  contributions: I,
) -> Vec<ParetoRecord>
where
  I: IntoIterator<Item = Vec<CrowdingDistance>>,
{
  let mut records: Vec<_> = front
    .iter()
    .map(|&candidate| ParetoRecord::new(candidate, rank))
    .collect();
  for objective in contributions {
    // once infinite, a distance stays infinite
    for (record, contribution) in records.iter_mut().zip(objective) {
      record.crowding_distance += contribution;
    }
  }
  sort_crowded(&mut records);
  trace!("assigned crowding distances to front {rank}");
  records
}

/// Returns a contribution of one objective to the crowding distance of each
/// front member, aligned with `front`.
fn objective_contributions<const N: usize>(
  front: &[CandidateIndex],
  scores: &[Scores<N>],
  objective: usize,
) -> Vec<CrowdingDistance> {
  let value = |pos: usize| scores[front[pos]][objective];

  let mut contributions = vec![0.0; front.len()];
  // positions of front members, stably sorted by score of the objective
  let mut sorted: Vec<usize> = (0..front.len()).collect();
  sorted.sort_by(|&a, &b| value(a).total_cmp(&value(b)));

  let (Some(&first), Some(&last)) = (sorted.first(), sorted.last()) else {
    return contributions;
  };
  let (min, max) = (value(first), value(last));
  // halved so that differences of finite scores cannot overflow
  let range = max * 0.5 - min * 0.5;

  for (i, &pos) in sorted.iter().enumerate() {
    let score = value(pos);
    let neighbours = i
      .checked_sub(1)
      .and_then(|prev| Some((sorted[prev], *sorted.get(i + 1)?)));
    contributions[pos] = match neighbours {
      // for finite scores `min < score < max`, so `range > 0`
      Some((prev, next)) if score != min && score != max => {
        (value(next) * 0.5 - value(prev) * 0.5) / range
      }
      _ => CrowdingDistance::INFINITY,
    };
  }
  contributions
}
