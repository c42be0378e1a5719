//! Evaluation of a population against an objective set.
//!
//! Evaluation happens before any ranking. Raw objective values are checked
//! to be finite and oriented so that lower is better, see
//! [`Direction::orient`](crate::objective::Direction::orient).

use executor::EvaluationExecutor;
use rayon::prelude::*;

use crate::{
  error::RankingError,
  execution::{batch_size, strategy::*, ParBatchOperator, ParEachOperator},
  objective::ObjectiveSet,
  score::Scores,
};

/// This private module prevents exposing the `Executor` to a user.
pub(crate) mod executor {
  use crate::{error::RankingError, score::Scores};

  /// An internal evaluation executor.
  pub trait EvaluationExecutor<S, const N: usize, ExecutionStrategy> {
    /// Evaluates each candidate optionally parallelizing objectives'
    /// application. Returned scores are oriented and aligned with
    /// `population`.
    fn execute_evaluation(
      &self,
      population: &[S],
    ) -> Result<Vec<Scores<N>>, RankingError>;
  }
}

/// Evaluates one candidate and orients its scores.
fn evaluate_candidate<S, const N: usize, O>(
  objectives: &O,
  candidate: usize,
  solution: &S,
) -> Result<Scores<N>, RankingError>
where
  O: ObjectiveSet<S, N>,
{
  let raw = objectives
    .evaluate(solution)
    .map_err(|source| RankingError::Evaluation { candidate, source })?;
  orient(objectives, candidate, raw)
}

/// Checks that each score is finite and orients it according to the
/// objective's direction.
fn orient<S, const N: usize, O>(
  objectives: &O,
  candidate: usize,
  raw: Scores<N>,
) -> Result<Scores<N>, RankingError>
where
  O: ObjectiveSet<S, N>,
{
  let directions = objectives.directions();
  let mut scores = raw;
  for (objective, (score, direction)) in
    scores.iter_mut().zip(directions).enumerate()
  {
    if !score.is_finite() {
      return Err(RankingError::NonFiniteScore {
        candidate,
        objective,
        value: *score,
      });
    }
    *score = direction.orient(*score);
  }
  Ok(scores)
}

impl<S, const N: usize, O> EvaluationExecutor<S, N, SequentialExecutionStrategy>
  for O
where
  O: ObjectiveSet<S, N>,
{
  fn execute_evaluation(
    &self,
    population: &[S],
  ) -> Result<Vec<Scores<N>>, RankingError> {
    population
      .iter()
      .enumerate()
      .map(|(i, s)| evaluate_candidate(self, i, s))
      .collect()
  }
}

impl<S, const N: usize, O>
  EvaluationExecutor<S, N, ParallelEachExecutionStrategy>
  for ParEachOperator<O>
where
  S: Sync,
  O: ObjectiveSet<S, N> + Sync,
{
  fn execute_evaluation(
    &self,
    population: &[S],
  ) -> Result<Vec<Scores<N>>, RankingError> {
    population
      .par_iter()
      .enumerate()
      .map(|(i, s)| evaluate_candidate(self.operator(), i, s))
      .collect()
  }
}

impl<S, const N: usize, O>
  EvaluationExecutor<S, N, ParallelBatchExecutionStrategy>
  for ParBatchOperator<O>
where
  S: Sync,
  O: ObjectiveSet<S, N> + Sync,
{
  fn execute_evaluation(
    &self,
    population: &[S],
  ) -> Result<Vec<Scores<N>>, RankingError> {
    let chunk_size = batch_size(population.len());
    let batches = population
      .par_chunks(chunk_size)
      .enumerate()
      .map(|(batch, chunk)| {
        chunk
          .iter()
          .enumerate()
          .map(|(i, s)| {
            evaluate_candidate(self.operator(), batch * chunk_size + i, s)
          })
          .collect::<Result<Vec<_>, _>>()
      })
      .collect::<Result<Vec<_>, _>>()?;
    Ok(batches.into_iter().flatten().collect())
  }
}

#[cfg(test)]
mod tests {
  use std::{fmt, sync::atomic::AtomicUsize, sync::atomic::Ordering};

  use super::*;
  use crate::{execution::Parallelize, objective::*};

  type Solution = f64;

  fn evaluate<ES, const N: usize, E: EvaluationExecutor<Solution, N, ES>>(
    e: &E,
    population: &[Solution],
  ) -> Result<Vec<Scores<N>>, RankingError> {
    e.execute_evaluation(population)
  }

  #[derive(Debug)]
  struct Negative;

  impl fmt::Display for Negative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      write!(f, "negative candidate")
    }
  }

  impl std::error::Error for Negative {}

  fn sqrt(v: &Solution) -> Result<f64, Negative> {
    if *v < 0.0 {
      Err(Negative)
    } else {
      Ok(v.sqrt())
    }
  }

  #[test]
  fn test_evaluation_strategies_agree() {
    let population: Vec<Solution> = (0..100).map(f64::from).collect();
    let objectives = |v: &Solution| [v * 2.0, (v - 50.0).powi(2)];
    let sequential = evaluate(&objectives, &population).unwrap();
    let each = evaluate(&objectives.par_each(), &population).unwrap();
    let batch = evaluate(&objectives.par_batch(), &population).unwrap();
    assert_eq!(sequential.len(), population.len());
    assert_eq!(sequential, each);
    assert_eq!(sequential, batch);
  }

  #[test]
  fn test_evaluation_orients_maximized_objectives() {
    let objectives: [&(dyn Objective<Solution> + Sync); 2] =
      [&Minimize(|v: &Solution| *v), &Maximize(|v: &Solution| *v)];
    let scores = evaluate(&objectives, &[1.0, 2.0]).unwrap();
    assert_eq!(scores, vec![[1.0, -1.0], [2.0, -2.0]]);
  }

  #[test]
  fn test_evaluation_failure_propagates() {
    let objectives = [Minimize(sqrt)];
    let population = [4.0, 1.0, -1.0, 9.0];
    for result in [
      evaluate(&objectives, &population),
      evaluate(&objectives.par_each(), &population),
      evaluate(&objectives.par_batch(), &population),
    ] {
      match result {
        Err(RankingError::Evaluation { candidate, source }) => {
          assert_eq!(candidate, 2);
          assert_eq!(source.objective, 0);
        }
        other => panic!("unexpected result: {other:?}"),
      }
    }
  }

  #[test]
  fn test_evaluation_rejects_non_finite_scores() {
    let objectives = |v: &Solution| [1.0, 1.0 / v];
    match evaluate(&objectives, &[1.0, 0.0]) {
      Err(RankingError::NonFiniteScore {
        candidate, objective, ..
      }) => {
        assert_eq!(candidate, 1);
        assert_eq!(objective, 1);
      }
      other => panic!("unexpected result: {other:?}"),
    }
  }

  #[test]
  fn test_evaluation_of_empty_population() {
    let calls = AtomicUsize::new(0);
    let objectives = |_: &Solution| {
      calls.fetch_add(1, Ordering::Relaxed);
      [0.0]
    };
    assert!(evaluate(&objectives, &[]).unwrap().is_empty());
    assert!(evaluate(&objectives.par_batch(), &[]).unwrap().is_empty());
    assert_eq!(calls.load(Ordering::Relaxed), 0);
  }
}
