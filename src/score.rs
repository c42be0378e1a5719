//! Type aliases for fitness scores and Pareto dominance between them.

use std::cmp::Ordering;

/// An alias for a fitness score.
///
/// Scores handled by the ranking engine are always oriented so that lower is
/// better. Objectives that are maximized are negated during evaluation, see
/// [`Direction::orient`](crate::objective::Direction::orient).
pub type Score = f64;

/// An alias for an array of `N` values of `Score` type.
pub type Scores<const N: usize> = [Score; N];

/// Describes pareto dominance for arrays of `Score`s.
pub trait ParetoDominance {
  /// Returns `Less` if `self` dominates `other`, `Greater` if `other`
  /// dominates `self`, otherwise `Equal`. `self` dominates `other` if none of
  /// `self` values are worse than respective `other` values and at least one
  /// is strictly better.
  fn dominance(&self, other: &Self) -> Ordering;
}

impl ParetoDominance for [Score] {
  fn dominance(&self, other: &Self) -> Ordering {
    let mut ord = Ordering::Equal;
    for (a, b) in self.iter().zip(other) {
      // scores are validated to be finite before ranking
      match (ord, a.partial_cmp(b).unwrap_or(Ordering::Equal)) {
        (Ordering::Equal, next_ord) => ord = next_ord,
        (Ordering::Greater, Ordering::Less)
        | (Ordering::Less, Ordering::Greater) => return Ordering::Equal,
        _ => {}
      }
    }
    ord
  }
}

/// Returns `true` if `a` dominates `b`.
///
/// Dominance is tested component-wise, objective by objective. Equal vectors
/// never dominate each other and neither do empty ones.
pub fn dominates(a: &[Score], b: &[Score]) -> bool {
  a.dominance(b) == Ordering::Less
}
