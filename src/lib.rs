//! **nsga-rank** is the selection core of [NSGA-II] style multi-objective
//! evolutionary optimizers: it ranks a population of candidate solutions,
//! each scored by several competing objectives, and orders candidates for
//! survivor selection.
//!
//! Here's a [quick start example](#example) for the impatient.
//!
//! Ranking is done in four steps:
//! 1. **Evaluate** each candidate against an [`ObjectiveSet`], yielding one
//!    score per objective. Maximized objectives are negated, so afterwards
//!    lower scores are always better
//! 2. **Sort** candidates into fronts of mutual [Pareto dominance] with
//!    [`non_dominated_sort`]. Front 0 holds candidates no one dominates, each
//!    following front holds candidates dominated only by the fronts before it
//! 3. **Crowd** each front with [`crowding_distances`], estimating how isolated
//!    each candidate is among its front neighbours in objective space
//! 4. **Compare** candidates with [`crowded_cmp`]: a lower front wins, within
//!    a front a larger crowding distance wins
//!
//! [`Nsga2Ranker`] runs all of them at once and can truncate a combined pool
//! of parents and offspring to the next generation. [`CrowdedTournament`]
//! picks parents for recombination using the same comparison.
//!
//! This crate deliberately knows nothing about how candidates are encoded,
//! recombined or mutated. Candidates are just items of a slice, and they are
//! identified by their index in it.
//!
//! # Objectives
//!
//! An [`ObjectiveSet`] is either an array of [`Objective`]s, or a closure of
//! type `Fn(&S) -> [f64; N]` that minimizes every value it returns. Closures
//! become objectives when wrapped into [`Minimize`] or [`Maximize`]. They may
//! return a plain `f64` or a `Result<f64, E>`: a failed evaluation aborts
//! ranking with [`RankingError::Evaluation`] instead of ranking a candidate
//! that could not be scored. NaN and infinite scores are rejected as well.
//!
//! # Parallelization
//!
//! Evaluation can be parallelized by calling [`par_each()`] or [`par_batch()`]
//! on an objective set. Dominance relations and crowding distances are
//! computed in parallel when enabled in the [`Nsga2Ranker`] builder. Parallel
//! and sequential computations produce identical results.
//!
//! Parallelization is implemented with [rayon]. For small populations and
//! cheap objectives it usually only decreases performance. Benchmark, if in
//! doubt.
//!
//! # Logging
//!
//! The crate logs through the [log] facade: a summary of each ranking at the
//! `debug` level and per-front details at the `trace` level. Install any
//! logger implementation to see them.
//!
//! # Example
//!
//! Ranking a population for the textbook *Schaffer's Problem No.1*.
//! ```
//! use nsga_rank::{
//!   execution::Parallelize,
//!   objective::Minimize,
//!   ranking::Nsga2Ranker,
//! };
//! // candidates are plain numbers between -5 and 5
//! let population: Vec<f64> = (-5..=5).map(f64::from).collect();
//! // objective functions `f1(x) = x^2` and `f2(x) = (x - 2)^2`
//! let f1: fn(&f64) -> f64 = |x| x.powi(2);
//! let f2: fn(&f64) -> f64 = |x| (x - 2.0).powi(2);
//! // objectives are evaluated for each candidate in parallel
//! let ranker = Nsga2Ranker::builder()
//!   .objectives([Minimize(f1), Minimize(f2)].par_each())
//!   .build();
//! let ranking = ranker.rank(&population).unwrap();
//! // Pareto optimal solutions lie between 0 and 2
//! let mut front: Vec<f64> =
//!   ranking.fronts()[0].iter().map(|&i| population[i]).collect();
//! front.sort_by(f64::total_cmp);
//! assert_eq!(front, vec![0.0, 1.0, 2.0]);
//! // and the next generation keeps the best half of the population
//! let survivors = ranker.select_survivors(population, 5).unwrap();
//! assert_eq!(survivors.len(), 5);
//! ```
//!
//! [NSGA-II]: https://sci2s.ugr.es/sites/default/files/files/Teaching/OtherPostGraduateCourses/Metaheuristicas/Deb_NSGAII.pdf
//! [Pareto dominance]: https://en.wikipedia.org/wiki/Pareto_front
//! [`ObjectiveSet`]: crate::objective::ObjectiveSet
//! [`Objective`]: crate::objective::Objective
//! [`Minimize`]: crate::objective::Minimize
//! [`Maximize`]: crate::objective::Maximize
//! [`RankingError::Evaluation`]: crate::error::RankingError::Evaluation
//! [`non_dominated_sort`]: crate::sorting::non_dominated_sort
//! [`crowding_distances`]: crate::crowding::crowding_distances
//! [`crowded_cmp`]: crate::comparison::crowded_cmp
//! [`Nsga2Ranker`]: crate::ranking::Nsga2Ranker
//! [`CrowdedTournament`]: crate::selection::CrowdedTournament
//! [`par_each()`]: crate::execution::Parallelize::par_each
//! [`par_batch()`]: crate::execution::Parallelize::par_batch

#![warn(missing_docs)]

pub mod comparison;
pub mod crowding;
pub mod error;
mod evaluation;
pub mod execution;
pub mod objective;
pub mod ranking;
pub mod score;
pub mod selection;
pub mod sorting;
