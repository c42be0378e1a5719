//! Ranking of a population: non-dominated sorting followed by crowding
//! distance assignment, and the configurable [`Nsga2Ranker`] that evaluates
//! and ranks populations of candidates.

use std::marker::PhantomData;

use log::debug;
use typed_builder::TypedBuilder;

use crate::{
  comparison::{sort_crowded, ParetoRecord},
  crowding::{crowding_distances, par_crowding_distances},
  error::RankingError,
  evaluation::executor::EvaluationExecutor,
  score::Scores,
  sorting::{non_dominated_sort, par_non_dominated_sort},
};

/// Index of a candidate in its population.
pub type CandidateIndex = usize;
/// Index of a front. The lower - the better, `0` is the non-dominated front.
pub type Rank = usize;
/// Crowding distance of a candidate.
pub type CrowdingDistance = f64;
/// Indices of candidates of a front.
pub type Front = Vec<CandidateIndex>;

/// A ranked population.
///
/// Holds oriented scores of each candidate, the fronts they were sorted
/// into and a [`ParetoRecord`] per candidate.
#[derive(Clone, Debug)]
pub struct Ranking<const N: usize> {
  scores: Vec<Scores<N>>,
  fronts: Vec<Front>,
  // records in crowded order, from the best to the worst
  records: Vec<ParetoRecord>,
  // position of each candidate's record in `records`
  positions: Vec<usize>,
}

impl<const N: usize> Ranking<N> {
  /// Ranks candidates with given oriented scores.
  ///
  /// # Examples
  /// ```
  /// # use nsga_rank::ranking::Ranking;
  /// let ranking = Ranking::new(vec![[1.0, 5.0], [2.0, 3.0], [3.0, 1.0]], false)
  ///   .unwrap();
  /// assert_eq!(ranking.fronts(), &[vec![0, 1, 2]]);
  /// assert_eq!(ranking.best(1), vec![0]);
  /// ```
  pub fn new(
    scores: Vec<Scores<N>>,
    parallel: bool,
  ) -> Result<Self, RankingError> {
    check_finite(&scores)?;
    let options = RankingOptions {
      parallel_sorting: parallel,
      parallel_crowding: parallel,
    };
    Ok(Self::rank(scores, options))
  }

  fn rank(scores: Vec<Scores<N>>, options: RankingOptions) -> Self {
    let fronts = if options.parallel_sorting {
      par_non_dominated_sort(&scores)
    } else {
      non_dominated_sort(&scores)
    };

    let mut records = Vec::with_capacity(scores.len());
    for (rank, front) in fronts.iter().enumerate() {
      let front_records = if options.parallel_crowding {
        par_crowding_distances(front, &scores, rank)
      } else {
        crowding_distances(front, &scores, rank)
      };
      records.extend(front_records);
    }
    // fronts are already in order, this only guards the invariant
    sort_crowded(&mut records);

    let mut positions = vec![0; scores.len()];
    for (position, record) in records.iter().enumerate() {
      positions[record.candidate] = position;
    }

    Self {
      scores,
      fronts,
      records,
      positions,
    }
  }

  /// Returns the number of ranked candidates.
  pub fn len(&self) -> usize {
    self.scores.len()
  }

  /// Returns `true` if no candidates were ranked.
  pub fn is_empty(&self) -> bool {
    self.scores.is_empty()
  }

  /// Returns oriented scores of each candidate.
  pub fn scores(&self) -> &[Scores<N>] {
    &self.scores
  }

  /// Returns fronts, the non-dominated one first.
  pub fn fronts(&self) -> &[Front] {
    &self.fronts
  }

  /// Returns records of all candidates in crowded order, from the best to
  /// the worst.
  pub fn records(&self) -> &[ParetoRecord] {
    &self.records
  }

  /// Returns the record of `candidate`.
  ///
  /// # Panics
  ///
  /// Panics if `candidate` is out of bounds.
  pub fn record(&self, candidate: CandidateIndex) -> &ParetoRecord {
    &self.records[self.positions[candidate]]
  }

  /// Returns the rank of each candidate.
  pub fn ranks(&self) -> Vec<Rank> {
    self.positions.iter().map(|&p| self.records[p].rank).collect()
  }

  /// Returns the crowding distance of each candidate.
  pub fn crowding_distances(&self) -> Vec<CrowdingDistance> {
    self
      .positions
      .iter()
      .map(|&p| self.records[p].crowding_distance)
      .collect()
  }

  /// Returns indices of at most `count` best candidates in crowded order.
  pub fn best(&self, count: usize) -> Vec<CandidateIndex> {
    self
      .records
      .iter()
      .take(count)
      .map(|r| r.candidate)
      .collect()
  }
}

/// Fails on the first non-finite score.
fn check_finite<const N: usize>(
  scores: &[Scores<N>],
) -> Result<(), RankingError> {
  for (candidate, s) in scores.iter().enumerate() {
    if let Some((objective, &value)) =
      s.iter().enumerate().find(|(_, v)| !v.is_finite())
    {
      return Err(RankingError::NonFiniteScore {
        candidate,
        objective,
        value,
      });
    }
  }
  Ok(())
}

/// Parallelization switches of ranking stages.
#[derive(Clone, Copy, Debug, Default)]
struct RankingOptions {
  parallel_sorting: bool,
  parallel_crowding: bool,
}

/// Evaluates and ranks populations the way NSGA-II does.
///
/// The ranker is built with a builder verified at compile time. The only
/// required field is `objectives`: an [`ObjectiveSet`], optionally
/// parallelized with [`par_each()`] or [`par_batch()`].
///
/// # Examples
/// ```
/// # use nsga_rank::ranking::Nsga2Ranker;
/// // objective functions `f1(x) = x^2` and `f2(x) = (x - 2)^2`, both minimized
/// let ranker = Nsga2Ranker::builder()
///   .objectives(|x: &f64| [x.powi(2), (x - 2.0).powi(2)])
///   .parallel_sorting(true)
///   .build();
/// let ranking = ranker.rank(&[0.0, 1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(ranking.fronts(), &[vec![0, 1, 2], vec![3]]);
///
/// let survivors = ranker.select_survivors(vec![0.0, 1.0, 2.0, 3.0], 2).unwrap();
/// assert_eq!(survivors, vec![0.0, 2.0]);
/// ```
///
/// [`ObjectiveSet`]: crate::objective::ObjectiveSet
/// [`par_each()`]: crate::execution::Parallelize::par_each
/// [`par_batch()`]: crate::execution::Parallelize::par_batch
#[derive(TypedBuilder, Debug)]
pub struct Nsga2Ranker<
  Solution,
  Obj: EvaluationExecutor<Solution, OBJECTIVE_NUM, ObjExecStrat>,
  ObjExecStrat,
  const OBJECTIVE_NUM: usize,
> {
  /// Objectives to evaluate candidates against.
  objectives: Obj,
  /// Whether to compute dominance relations in parallel. Defaults to
  /// `false`.
  #[builder(default = false)]
  parallel_sorting: bool,
  /// Whether to compute crowding distances of each front's objectives in
  /// parallel. Defaults to `false`.
  #[builder(default = false)]
  parallel_crowding: bool,
  #[builder(setter(skip), default)]
  _solution: PhantomData<fn(&Solution)>,
  #[builder(setter(skip), default)]
  _obj_es: PhantomData<ObjExecStrat>,
}

impl<Solution, Obj, ObjExecStrat, const OBJECTIVE_NUM: usize>
  Nsga2Ranker<Solution, Obj, ObjExecStrat, OBJECTIVE_NUM>
where
  Obj: EvaluationExecutor<Solution, OBJECTIVE_NUM, ObjExecStrat>,
{
  /// Evaluates oriented scores of each candidate of `population`.
  ///
  /// Fails on the first candidate an objective fails to evaluate or scores
  /// with a non-finite value.
  pub fn evaluate(
    &self,
    population: &[Solution],
  ) -> Result<Vec<Scores<OBJECTIVE_NUM>>, RankingError> {
    self.objectives.execute_evaluation(population)
  }

  /// Evaluates and ranks `population`.
  pub fn rank(
    &self,
    population: &[Solution],
  ) -> Result<Ranking<OBJECTIVE_NUM>, RankingError> {
    debug!("ranking population of {} candidates", population.len());
    let scores = self.evaluate(population)?;
    self.rank_scores(scores)
  }

  /// Ranks candidates with already evaluated oriented scores, such as the
  /// ones returned by [`Self::evaluate`].
  ///
  /// Fails with [`RankingError::NonFiniteScore`] if any score is NaN or
  /// infinite.
  pub fn rank_scores(
    &self,
    scores: Vec<Scores<OBJECTIVE_NUM>>,
  ) -> Result<Ranking<OBJECTIVE_NUM>, RankingError> {
    check_finite(&scores)?;
    Ok(Ranking::rank(
      scores,
      RankingOptions {
        parallel_sorting: self.parallel_sorting,
        parallel_crowding: self.parallel_crowding,
      },
    ))
  }

  /// Truncates `population`, usually a combined pool of parents and their
  /// offspring, to `count` best candidates in crowded order.
  ///
  /// Survivors are returned from the best to the worst. If `count` exceeds
  /// the size of the population, all candidates survive.
  pub fn select_survivors(
    &self,
    population: Vec<Solution>,
    count: usize,
  ) -> Result<Vec<Solution>, RankingError> {
    let ranking = self.rank(&population)?;
    let survivors = ranking.best(count);
    debug!(
      "{} of {} candidates survived",
      survivors.len(),
      population.len()
    );

    let mut some_solutions: Vec<_> = population.into_iter().map(Some).collect();
    Ok(
      survivors
        .into_iter()
        .filter_map(|idx| some_solutions[idx].take())
        .collect(),
    )
  }
}

#[cfg(test)]
mod tests {
  use std::{fmt, sync::atomic::AtomicUsize, sync::atomic::Ordering};

  use proptest::prelude::*;

  use super::*;
  use crate::{execution::Parallelize, objective::*};

  type Solution = (f64, f64);

  #[derive(Debug)]
  struct Invalid;

  impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "invalid candidate")
    }
  }

  impl std::error::Error for Invalid {}

  fn identity(s: &Solution) -> [f64; 2] {
    [s.0, s.1]
  }

  #[test]
  fn test_rank_example_population() {
    // A=(1,5), B=(2,3), C=(3,1), D=(2,2)
    let population = [(1.0, 5.0), (2.0, 3.0), (3.0, 1.0), (2.0, 2.0)];
    let ranker = Nsga2Ranker::builder().objectives(identity).build();
    let ranking = ranker.rank(&population).unwrap();
    assert_eq!(ranking.fronts(), &[vec![0, 2, 3], vec![1]]);
    assert_eq!(ranking.ranks(), vec![0, 1, 0, 0]);
    assert_eq!(ranking.len(), 4);
    // D lies between A and C on both objectives
    let d = ranking.crowding_distances();
    assert!(d[0].is_infinite() && d[2].is_infinite());
    assert_eq!(d[3], 2.0 / 2.0 + 4.0 / 4.0);
    assert!(d[1].is_infinite());
    assert_eq!(ranking.best(4), vec![0, 2, 3, 1]);
    assert_eq!(ranking.record(1).rank, 1);
  }

  #[test]
  fn test_rank_with_maximized_objective() {
    let objectives: [Box<dyn Objective<Solution> + Sync>; 2] = [
      Box::new(Minimize(|s: &Solution| s.0)),
      Box::new(Maximize(|s: &Solution| s.1)),
    ];
    let ranker = Nsga2Ranker::builder().objectives(objectives).build();
    let population = [(1.0, 1.0), (2.0, 3.0), (1.0, 2.0)];
    let ranking = ranker.rank(&population).unwrap();
    assert_eq!(ranking.fronts(), &[vec![1, 2], vec![0]]);
    assert_eq!(ranking.scores()[1], [2.0, -3.0]);
  }

  #[test]
  fn test_all_equal_population() {
    let ranker = Nsga2Ranker::builder().objectives(identity).build();
    let ranking = ranker.rank(&[(1.0, 1.0); 5]).unwrap();
    assert_eq!(ranking.fronts(), &[vec![0, 1, 2, 3, 4]]);
    assert!(ranking.crowding_distances().iter().all(|d| d.is_infinite()));
  }

  #[test]
  fn test_empty_population() {
    let ranker = Nsga2Ranker::builder().objectives(identity).build();
    let ranking = ranker.rank(&[]).unwrap();
    assert!(ranking.is_empty());
    assert!(ranking.fronts().is_empty());
    assert!(ranking.records().is_empty());
    assert!(ranker.select_survivors(vec![], 10).unwrap().is_empty());
  }

  #[test]
  fn test_empty_objective_set() {
    let objectives: [Minimize<fn(&Solution) -> f64>; 0] = [];
    let ranker = Nsga2Ranker::builder().objectives(objectives).build();
    let ranking = ranker.rank(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]).unwrap();
    assert_eq!(ranking.fronts(), &[vec![0, 1, 2]]);
    assert_eq!(ranking.crowding_distances(), vec![0.0; 3]);
  }

  #[test]
  fn test_evaluation_failure_aborts_ranking() {
    let evaluated = AtomicUsize::new(0);
    let objective = |s: &Solution| -> Result<f64, Invalid> {
      evaluated.fetch_add(1, Ordering::Relaxed);
      if s.0 < 0.0 {
        Err(Invalid)
      } else {
        Ok(s.0)
      }
    };
    let ranker = Nsga2Ranker::builder()
      .objectives([Minimize(objective)])
      .build();
    let population = vec![(0.0, 0.0), (-1.0, 0.0), (1.0, 0.0)];
    match ranker.select_survivors(population, 2) {
      Err(RankingError::Evaluation { candidate, .. }) => {
        assert_eq!(candidate, 1)
      }
      other => panic!("unexpected result: {other:?}"),
    }
    // sequential evaluation stops at the failing candidate
    assert_eq!(evaluated.load(Ordering::Relaxed), 2);
  }

  #[test]
  fn test_ranking_rejects_non_finite_scores() {
    let result = Ranking::new(vec![[0.0, 1.0], [f64::NAN, 1.0]], false);
    assert!(matches!(
      result,
      Err(RankingError::NonFiniteScore {
        candidate: 1,
        objective: 0,
        ..
      })
    ));
  }

  #[test]
  fn test_rank_scores_rejects_non_finite_scores() {
    let ranker = Nsga2Ranker::builder()
      .objectives(identity)
      .parallel_crowding(true)
      .build();
    let nan = vec![[f64::NAN, 0.0], [0.0, 1.0], [1.0, 0.5], [2.0, 2.0]];
    assert!(matches!(
      ranker.rank_scores(nan),
      Err(RankingError::NonFiniteScore {
        candidate: 0,
        objective: 0,
        ..
      })
    ));
    let infinite = vec![[0.0, 1.0], [1.0, 0.5], [2.0, f64::NEG_INFINITY]];
    assert!(matches!(
      ranker.rank_scores(infinite),
      Err(RankingError::NonFiniteScore {
        candidate: 2,
        objective: 1,
        ..
      })
    ));
    let ranking = ranker.rank_scores(vec![[0.0, 1.0], [1.0, 0.5]]).unwrap();
    assert_eq!(ranking.fronts(), &[vec![0, 1]]);
  }

  #[test]
  fn test_select_survivors() {
    let population: Vec<Solution> = vec![
      (4.0, 4.0), // front 3
      (0.0, 3.0), // front 0, boundary
      (2.0, 2.0), // front 1
      (1.0, 1.5), // front 0, interior
      (3.0, 0.0), // front 0, boundary
      (2.5, 2.5), // front 2
    ];
    let ranker = Nsga2Ranker::builder()
      .objectives(identity.par_batch())
      .parallel_crowding(true)
      .build();
    let survivors = ranker.select_survivors(population.clone(), 4).unwrap();
    assert_eq!(
      survivors,
      vec![(0.0, 3.0), (3.0, 0.0), (1.0, 1.5), (2.0, 2.0)]
    );
    let all = ranker.select_survivors(population.clone(), 100).unwrap();
    assert_eq!(all.len(), population.len());
  }

  proptest! {
    #[test]
    fn test_ranking_configurations_agree(
      population in prop::collection::vec((0u8..8, 0u8..8), 0..50)
    ) {
      let population: Vec<Solution> = population
        .into_iter()
        .map(|(a, b)| (a.into(), b.into()))
        .collect();
      let sequential = Nsga2Ranker::builder()
        .objectives(identity)
        .build()
        .rank(&population)
        .unwrap();
      let parallel = Nsga2Ranker::builder()
        .objectives(identity.par_each())
        .parallel_sorting(true)
        .parallel_crowding(true)
        .build()
        .rank(&population)
        .unwrap();
      prop_assert_eq!(sequential.fronts(), parallel.fronts());
      prop_assert_eq!(sequential.records(), parallel.records());
      // every candidate has exactly one record
      let mut candidates: Vec<_> =
        sequential.records().iter().map(|r| r.candidate).collect();
      candidates.sort_unstable();
      prop_assert_eq!(candidates, (0..population.len()).collect::<Vec<_>>());
    }
  }
}
