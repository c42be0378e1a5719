//! Selection of candidates by crowded comparison.

use rand::Rng;

use crate::ranking::{CandidateIndex, Ranking};

/// Truncation selection. Returns indices of at most `count` best candidates
/// of `ranking`, from the best to the worst.
///
/// This is how NSGA-II picks the next generation out of a combined pool of
/// parents and offspring.
pub fn truncate<const N: usize>(
  ranking: &Ranking<N>,
  count: usize,
) -> Vec<CandidateIndex> {
  ranking.best(count)
}

/// Tournament selection driven by crowded comparison.
///
/// Each tournament draws `size` candidates uniformly at random, with
/// replacement, and the best of them by crowded comparison wins. Among equally
/// good contestants the one drawn first wins. A tournament of size `0` is
/// treated as a tournament of size `1`.
///
/// # Examples
/// ```
/// # use nsga_rank::{ranking::Ranking, selection::CrowdedTournament};
/// # use rand::{rngs::StdRng, SeedableRng};
/// let ranking = Ranking::new(vec![[0.0, 0.0], [1.0, 1.0]], false).unwrap();
/// let mut rng = StdRng::seed_from_u64(0);
/// let parents = CrowdedTournament(2).select(&ranking, 10, &mut rng);
/// assert_eq!(parents.len(), 10);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CrowdedTournament(pub usize);

impl Default for CrowdedTournament {
  /// Binary tournament.
  fn default() -> Self {
    Self(2)
  }
}

impl CrowdedTournament {
  /// Runs `count` tournaments over candidates of `ranking` and returns the
  /// winners' indices. An empty ranking yields no winners.
  pub fn select<const N: usize, R: Rng>(
    &self,
    ranking: &Ranking<N>,
    count: usize,
    rng: &mut R,
  ) -> Vec<CandidateIndex> {
    if ranking.is_empty() {
      return Vec::new();
    }
    (0..count).map(|_| self.tournament(ranking, rng)).collect()
  }

  fn tournament<const N: usize, R: Rng>(
    &self,
    ranking: &Ranking<N>,
    rng: &mut R,
  ) -> CandidateIndex {
    let mut winner = ranking.record(rng.gen_range(0..ranking.len()));
    for _ in 1..self.0 {
      let contestant = ranking.record(rng.gen_range(0..ranking.len()));
      if contestant.better_than(winner) {
        winner = contestant;
      }
    }
    winner.candidate
  }
}

#[cfg(test)]
mod tests {
  use rand::{rngs::StdRng, SeedableRng};

  use super::*;

  fn ranking() -> Ranking<2> {
    Ranking::new(
      vec![
        [4.0, 4.0], // front 1
        [0.0, 3.0], // front 0, boundary
        [1.0, 1.5], // front 0, interior
        [3.0, 0.0], // front 0, boundary
        [5.0, 5.0], // front 2
      ],
      false,
    )
    .unwrap()
  }

  #[test]
  fn test_truncate() {
    let ranking = ranking();
    assert_eq!(truncate(&ranking, 3), vec![1, 3, 2]);
    assert_eq!(truncate(&ranking, 0), Vec::<usize>::new());
    assert_eq!(truncate(&ranking, 10), vec![1, 3, 2, 0, 4]);
  }

  #[test]
  fn test_tournament_of_one_is_uniform_draw() {
    let ranking = ranking();
    let mut rng = StdRng::seed_from_u64(42);
    let winners = CrowdedTournament(1).select(&ranking, 1000, &mut rng);
    for candidate in 0..ranking.len() {
      assert!(winners.contains(&candidate));
    }
  }

  #[test]
  fn test_tournament_never_picks_worst_with_large_tournaments() {
    let ranking = ranking();
    let mut rng = StdRng::seed_from_u64(7);
    let winners = CrowdedTournament(64).select(&ranking, 100, &mut rng);
    assert_eq!(winners.len(), 100);
    // the worst candidate wins only if it is drawn 64 times in a row
    assert!(!winners.contains(&4));
  }

  #[test]
  fn test_tournament_is_deterministic_for_seeded_rng() {
    let ranking = ranking();
    let select = |seed| {
      let mut rng = StdRng::seed_from_u64(seed);
      CrowdedTournament::default().select(&ranking, 20, &mut rng)
    };
    assert_eq!(select(3), select(3));
  }

  #[test]
  fn test_tournament_on_empty_ranking() {
    let ranking = Ranking::<2>::new(vec![], false).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(CrowdedTournament(0).select(&ranking, 5, &mut rng).is_empty());
  }

  #[test]
  fn test_tournament_of_zero_size() {
    let ranking = ranking();
    let mut rng = StdRng::seed_from_u64(0);
    let winners = CrowdedTournament(0).select(&ranking, 5, &mut rng);
    assert_eq!(winners.len(), 5);
  }
}
