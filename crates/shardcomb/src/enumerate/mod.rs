mod worker;
pub use worker::WorkerReport;

#[cfg(test)]
mod tests;

use crate::{CombinationSink, Count, Error, Result, Shard, partition, total_combinations};
use std::{panic, thread};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Upper bound on worker threads used by [`enumerate`].
pub const DEFAULT_MAX_WORKERS: usize = 256;

/// How the rank space of a `k`-of-`n` enumeration is split across workers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    n: usize,
    k: usize,
    total: Count,
    shards: Vec<Shard>,
}

impl Plan {
    /// Size of the full set.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Size of each combination.
    pub fn k(&self) -> usize {
        self.k
    }

    /// `C(n, k)`.
    pub fn total(&self) -> &Count {
        &self.total
    }

    /// One shard per worker, in worker order.
    pub fn shards(&self) -> &[Shard] {
        &self.shards
    }
}

/// Result of a completed enumeration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
    total: Count,
    workers: Vec<WorkerReport>,
}

impl Summary {
    /// `C(n, k)`.
    pub fn total(&self) -> &Count {
        &self.total
    }

    /// Per-worker outcomes, in worker order.
    pub fn workers(&self) -> &[WorkerReport] {
        &self.workers
    }

    /// Combinations handed to the sink across all workers.
    pub fn emitted(&self) -> Count {
        self.workers
            .iter()
            .fold(Count::zero(), |acc, report| acc + &report.emitted)
    }

    /// Returns `true` if no sink cut its shard short.
    pub fn is_complete(&self) -> bool {
        self.workers.iter().all(|report| !report.stopped)
    }
}

/// Sharded, multi-threaded enumeration of `k`-combinations.
///
/// The rank space `[0, C(n, k))` is split into contiguous shards, one per
/// worker thread. Each worker unranks its first combination and walks the
/// rest with [`advance`](crate::advance), so worker `i` always sees the `i`-th
/// block of the lexicographic ordering, in order. Nothing is shared between
/// workers apart from their read-only inputs and the sink.
///
/// The number of workers is `min(threads, C(n, k), max_workers)`.
///
/// ```
/// use shardcomb::{CollectingSink, Combinations, Enumerator};
///
/// let sink = CollectingSink::new(3);
/// let summary = Enumerator::new(3).run(10, 5, &sink).unwrap();
/// assert_eq!(summary.workers().len(), 3);
///
/// let sequential: Vec<_> = Combinations::new(10, 5).unwrap().collect();
/// assert_eq!(sink.into_ordered(), sequential);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enumerator {
    threads: usize,
    max_workers: usize,
}

impl Enumerator {
    /// Creates an enumerator requesting `threads` workers, capped at
    /// [`DEFAULT_MAX_WORKERS`].
    pub fn new(threads: usize) -> Self {
        Self {
            threads,
            max_workers: DEFAULT_MAX_WORKERS,
        }
    }

    /// Overrides the cap on worker threads.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Requested number of workers.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Cap on worker threads.
    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Computes the shard layout without running anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] when `k > n`, or when the thread
    /// count or the worker cap is zero.
    pub fn plan(&self, n: usize, k: usize) -> Result<Plan> {
        if self.threads == 0 {
            return Err(Error::invalid("thread count must be positive"));
        }
        if self.max_workers == 0 {
            return Err(Error::invalid("worker cap must be positive"));
        }
        let total = total_combinations(n, k)?;
        let shards = partition(&total, self.threads.min(self.max_workers));
        Ok(Plan {
            n,
            k,
            total,
            shards,
        })
    }

    /// Enumerates every `k`-combination of `n`, handing each to `sink` on the
    /// worker thread that produced it.
    ///
    /// Blocks until every worker has finished its shard or been stopped by the
    /// sink. A [`Flow::Stop`](crate::Flow::Stop) only ends the shard of the
    /// worker that received it and is reported in the [`Summary`], not as an
    /// error. A panic inside the sink is propagated to the caller once all
    /// workers have been joined.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidArguments`] exactly when [`plan`](Self::plan)
    /// does, before any worker starts.
    #[cfg_attr(feature = "tracing", instrument(level = "debug", skip(self, sink), fields(threads = self.threads)))]
    pub fn run<S>(&self, n: usize, k: usize, sink: &S) -> Result<Summary>
    where
        S: CombinationSink + ?Sized,
    {
        let Plan {
            total, shards, ..
        } = self.plan(n, k)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Enumerating {} combinations of {} from {} across {} workers",
            total,
            k,
            n,
            shards.len()
        );

        let workers = thread::scope(|scope| {
            let handles: Vec<_> = shards
                .into_iter()
                .map(|shard| scope.spawn(move || worker::walk(n, k, shard, sink)))
                .collect();

            handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(report) => report,
                    Err(payload) => panic::resume_unwind(payload),
                })
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(Summary { total, workers })
    }
}

/// Enumerates every `k`-combination of `n` across `thread_count` workers.
///
/// Shorthand for [`Enumerator::new(thread_count).run(n, k, sink)`](Enumerator::run)
/// when the per-worker [`Summary`] is not needed.
///
/// # Errors
///
/// Returns [`Error::InvalidArguments`] when `k > n` or `thread_count == 0`.
///
/// ```
/// use shardcomb::{CountingSink, enumerate};
///
/// let sink = CountingSink::new(4);
/// enumerate(4, 24, 3, &sink).unwrap();
/// assert_eq!(sink.total(), 2024);
/// ```
pub fn enumerate<S>(thread_count: usize, n: usize, k: usize, sink: &S) -> Result<()>
where
    S: CombinationSink + ?Sized,
{
    Enumerator::new(thread_count).run(n, k, sink).map(|_| ())
}
