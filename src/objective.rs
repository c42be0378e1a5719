//! Objectives and objective sets.
//!
//! The ranking engine does not care how a fitness value is computed. It only
//! needs each [`Objective`] to produce a score for a candidate and to tell in
//! which direction that score improves.

use crate::{
  error::{ObjectiveError, ObjectiveFailure},
  score::{Score, Scores},
};

/// Optimization direction of an objective.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Direction {
  /// Lower values are better.
  #[default]
  Minimize,
  /// Higher values are better.
  Maximize,
}

impl Direction {
  /// Maps a raw objective value into the lower-is-better form used by
  /// dominance tests and crowding distance.
  pub fn orient(self, value: Score) -> Score {
    match self {
      Direction::Minimize => value,
      // `+ 0.0` turns `-0.0` back into `0.0`
      Direction::Maximize => -value + 0.0,
    }
  }
}

/// Conversion of an objective function's return value into a score.
///
/// Implemented for plain `f64` and `f32` values and for `Result<f64, E>`,
/// which lets fallible closures report evaluation errors.
pub trait IntoScore {
  /// Converts `self` into a score or an evaluation error.
  fn into_score(self) -> Result<Score, ObjectiveError>;
}

impl IntoScore for f64 {
  fn into_score(self) -> Result<Score, ObjectiveError> {
    Ok(self)
  }
}

impl IntoScore for f32 {
  fn into_score(self) -> Result<Score, ObjectiveError> {
    Ok(self.into())
  }
}

impl<E> IntoScore for Result<f64, E>
where
  E: std::error::Error + Send + Sync + 'static,
{
  fn into_score(self) -> Result<Score, ObjectiveError> {
    self.map_err(Into::into)
  }
}

/// A scalar evaluation function with an optimization direction.
///
/// Usually you would wrap a closure into [`Minimize`] or [`Maximize`] instead
/// of implementing this trait.
pub trait Objective<S> {
  /// Direction in which scores of this objective improve.
  fn direction(&self) -> Direction;

  /// Evaluates a raw fitness value of `solution`.
  fn evaluate(&self, solution: &S) -> Result<Score, ObjectiveError>;
}

impl<S, O: Objective<S> + ?Sized> Objective<S> for &O {
  fn direction(&self) -> Direction {
    (**self).direction()
  }

  fn evaluate(&self, solution: &S) -> Result<Score, ObjectiveError> {
    (**self).evaluate(solution)
  }
}

impl<S, O: Objective<S> + ?Sized> Objective<S> for Box<O> {
  fn direction(&self) -> Direction {
    (**self).direction()
  }

  fn evaluate(&self, solution: &S) -> Result<Score, ObjectiveError> {
    (**self).evaluate(solution)
  }
}

/// An objective that is minimized.
///
/// # Examples
/// ```
/// # use nsga_rank::objective::*;
/// let o = Minimize(|x: &f64| x.powi(2));
/// assert_eq!(o.direction(), Direction::Minimize);
/// assert_eq!(o.evaluate(&3.0).unwrap(), 9.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Minimize<F>(pub F);

/// An objective that is maximized.
///
/// # Examples
/// ```
/// # use nsga_rank::objective::*;
/// let o = Maximize(|x: &f64| -> Result<f64, std::num::ParseFloatError> {
///   Ok(x.sqrt())
/// });
/// assert_eq!(o.direction(), Direction::Maximize);
/// assert_eq!(o.evaluate(&4.0).unwrap(), 2.0);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Maximize<F>(pub F);

impl<S, F, R> Objective<S> for Minimize<F>
where
  F: Fn(&S) -> R,
  R: IntoScore,
{
  fn direction(&self) -> Direction {
    Direction::Minimize
  }

  fn evaluate(&self, solution: &S) -> Result<Score, ObjectiveError> {
    (self.0)(solution).into_score()
  }
}

impl<S, F, R> Objective<S> for Maximize<F>
where
  F: Fn(&S) -> R,
  R: IntoScore,
{
  fn direction(&self) -> Direction {
    Direction::Maximize
  }

  fn evaluate(&self, solution: &S) -> Result<Score, ObjectiveError> {
    (self.0)(solution).into_score()
  }
}

/// An ordered set of `N` objectives.
///
/// Implemented for arrays of [`Objective`]s and for closures of type
/// `Fn(&S) -> [f64; N]`, in which case every objective is minimized. Objectives
/// of different types can be put into one array as trait objects:
/// ```
/// # use nsga_rank::objective::*;
/// let objectives: [&dyn Objective<f64>; 2] =
///   [&Minimize(|x: &f64| x * 2.0), &Maximize(|x: &f64| x - 1.0)];
/// let scores = objectives.evaluate(&2.0).unwrap();
/// assert_eq!(scores, [4.0, 1.0]);
/// ```
pub trait ObjectiveSet<S, const N: usize> {
  /// Returns optimization direction of each objective.
  fn directions(&self) -> [Direction; N];

  /// Returns raw values of each objective for `solution`, stopping at the
  /// first objective that fails.
  fn evaluate(&self, solution: &S) -> Result<Scores<N>, ObjectiveFailure>;
}

impl<S, const N: usize, O> ObjectiveSet<S, N> for [O; N]
where
  O: Objective<S>,
{
  fn directions(&self) -> [Direction; N] {
    self.each_ref().map(|o| o.direction())
  }

  fn evaluate(&self, solution: &S) -> Result<Scores<N>, ObjectiveFailure> {
    let mut scores = [0.0; N];
    for (objective, (o, score)) in self.iter().zip(&mut scores).enumerate() {
      *score = o
        .evaluate(solution)
        .map_err(|source| ObjectiveFailure { objective, source })?;
    }
    Ok(scores)
  }
}

impl<S, const N: usize, F> ObjectiveSet<S, N> for F
where
  F: Fn(&S) -> Scores<N>,
{
  fn directions(&self) -> [Direction; N] {
    [Direction::Minimize; N]
  }

  fn evaluate(&self, solution: &S) -> Result<Scores<N>, ObjectiveFailure> {
    Ok(self(solution))
  }
}
