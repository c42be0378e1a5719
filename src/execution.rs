//! Execution strategy markers and parallelized operator wrappers.

pub(crate) mod strategy {
  /// Sequential execution strategy, i.e. no parallelization involved.
  pub enum SequentialExecutionStrategy {}

  /// Parallel execution strategy, executes an operator for **each** candidate
  /// in parallel.
  pub enum ParallelEachExecutionStrategy {}

  /// Parallel execution strategy, executes an operator for **batches** of
  /// candidates in parallel. The crate tries to split the work equally for
  /// each available thread.
  pub enum ParallelBatchExecutionStrategy {}
}

/// A wrapper around an operator that marks it to be executed in parallel for
/// **each** candidate.
#[derive(Clone, Copy, Debug)]
pub struct ParEachOperator<O>(O);

impl<O> ParEachOperator<O> {
  /// Returns a reference to the wrapped operator.
  pub fn operator(&self) -> &O {
    &self.0
  }
}

/// A wrapper around an operator that marks it to be executed in parallel for
/// each **batch** of candidates.
#[derive(Clone, Copy, Debug)]
pub struct ParBatchOperator<O>(O);

impl<O> ParBatchOperator<O> {
  /// Returns a reference to the wrapped operator.
  pub fn operator(&self) -> &O {
    &self.0
  }
}

/// Conversion of an operator into a parallelized one.
///
/// **Parallelization is implemented with [rayon]. As a result, for cheap
/// operators, parallelization may only decrease performance because of
/// additional overhead introduced. Benchmark if in doubt.**
pub trait Parallelize: Sized + Sync {
  /// Creates a wrapper around given operator that marks it to be executed in
  /// parallel for **each** candidate.
  fn par_each(self) -> ParEachOperator<Self> {
    ParEachOperator(self)
  }

  /// Creates a wrapper around given operator that marks it to be executed in
  /// parallel for each **batch** of candidates. The size of a batch is chosen
  /// to distribute the work evenly across all available threads.
  fn par_batch(self) -> ParBatchOperator<Self> {
    ParBatchOperator(self)
  }
}

impl<O: Sync> Parallelize for O {}

/// Returns the size of a batch that splits `len` items evenly between rayon
/// threads.
pub(crate) fn batch_size(len: usize) -> usize {
  (len / rayon::current_num_threads()).max(1)
}
