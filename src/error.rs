//! Errors reported by the ranking engine.

use thiserror::Error;

use crate::{ranking::CandidateIndex, score::Score};

/// An error returned by an objective that failed to evaluate a candidate.
pub type ObjectiveError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A failure of one objective of an objective set.
#[derive(Debug, Error)]
#[error("objective {objective} failed to evaluate a candidate")]
pub struct ObjectiveFailure {
  /// Position of the failed objective in its objective set.
  pub objective: usize,
  /// The error the objective returned.
  #[source]
  pub source: ObjectiveError,
}

/// An error that aborts ranking of a population.
///
/// Ranking never silently treats an unevaluated candidate as dominated or
/// non-dominated, the whole call fails instead.
#[derive(Debug, Error)]
pub enum RankingError {
  /// An objective failed to evaluate a candidate.
  #[error("evaluation of candidate {candidate} failed")]
  Evaluation {
    /// Index of the candidate in the population.
    candidate: CandidateIndex,
    /// The underlying objective failure.
    #[source]
    source: ObjectiveFailure,
  },
  /// An objective produced NaN or an infinite value.
  #[error("objective {objective} scored candidate {candidate} with {value}")]
  NonFiniteScore {
    /// Index of the candidate in the population.
    candidate: CandidateIndex,
    /// Position of the objective in its objective set.
    objective: usize,
    /// The offending value.
    value: Score,
  },
}
