use core::sync::atomic::{AtomicU64, Ordering};
use parking_lot::Mutex;

/// What a worker should do after handing a combination to its sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep walking the shard.
    Continue,
    /// Stop this worker's shard. Sibling workers are unaffected.
    Stop,
}

impl Flow {
    /// Returns `true` for [`Flow::Stop`].
    pub fn is_stop(self) -> bool {
        matches!(self, Self::Stop)
    }
}

impl From<bool> for Flow {
    /// `true` continues, `false` stops.
    fn from(keep_going: bool) -> Self {
        if keep_going { Self::Continue } else { Self::Stop }
    }
}

/// Receives every combination produced during sharded enumeration.
///
/// [`accept`](Self::accept) is called synchronously on the worker thread that
/// produced the combination, so one sink is invoked concurrently from all
/// workers. Implementations that touch shared state must synchronize it
/// themselves. The combination is only borrowed for the duration of the call.
pub trait CombinationSink: Sync {
    /// Handles one combination of `k` positions out of `n` emitted by
    /// `worker`.
    fn accept(&self, worker: usize, n: usize, k: usize, combination: &[usize]) -> Flow;
}

impl<F> CombinationSink for F
where
    F: Fn(usize, usize, usize, &[usize]) -> bool + Sync,
{
    fn accept(&self, worker: usize, n: usize, k: usize, combination: &[usize]) -> Flow {
        self(worker, n, k, combination).into()
    }
}

/// A sink built from a closure. See [`from_fn`].
#[derive(Clone, Copy, Debug)]
pub struct FnSink<F>(F);

/// Wraps a closure as a [`CombinationSink`].
///
/// Closures already implement the trait; this helper only pins down the
/// closure's argument types so they need not be annotated.
///
/// ```
/// use shardcomb::{enumerate, sink};
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let seen = AtomicUsize::new(0);
/// enumerate(2, 6, 3, &sink::from_fn(|_, _, _, _| {
///     seen.fetch_add(1, Ordering::Relaxed);
///     true
/// }))
/// .unwrap();
/// assert_eq!(seen.into_inner(), 20);
/// ```
pub fn from_fn<F>(f: F) -> FnSink<F>
where
    F: Fn(usize, usize, usize, &[usize]) -> bool + Sync,
{
    FnSink(f)
}

impl<F> CombinationSink for FnSink<F>
where
    F: Fn(usize, usize, usize, &[usize]) -> bool + Sync,
{
    fn accept(&self, worker: usize, n: usize, k: usize, combination: &[usize]) -> Flow {
        (self.0)(worker, n, k, combination).into()
    }
}

/// Collects combinations in memory, one bucket per worker.
///
/// Each bucket sits behind its own lock, so workers never contend with each
/// other. Combinations from workers at or beyond the configured capacity are
/// refused with [`Flow::Stop`].
#[derive(Debug, Default)]
pub struct CollectingSink {
    buckets: Vec<Mutex<Vec<Vec<usize>>>>,
}

impl CollectingSink {
    /// Creates a sink with room for `workers` workers.
    pub fn new(workers: usize) -> Self {
        Self {
            buckets: (0..workers).map(|_| Mutex::new(Vec::new())).collect(),
        }
    }

    /// Total number of combinations collected so far.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.lock().len()).sum()
    }

    /// Returns `true` if nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-worker buckets, indexed by worker.
    pub fn into_buckets(self) -> Vec<Vec<Vec<usize>>> {
        self.buckets.into_iter().map(Mutex::into_inner).collect()
    }

    /// All combinations, concatenated in worker order.
    ///
    /// For a complete enumeration this is the global lexicographic order.
    pub fn into_ordered(self) -> Vec<Vec<usize>> {
        self.into_buckets().into_iter().flatten().collect()
    }
}

impl CombinationSink for CollectingSink {
    fn accept(&self, worker: usize, _n: usize, _k: usize, combination: &[usize]) -> Flow {
        match self.buckets.get(worker) {
            Some(bucket) => {
                bucket.lock().push(combination.to_vec());
                Flow::Continue
            }
            None => Flow::Stop,
        }
    }
}

/// Counts combinations per worker without retaining them.
#[derive(Debug, Default)]
pub struct CountingSink {
    counts: Vec<AtomicU64>,
}

impl CountingSink {
    /// Creates a sink with room for `workers` workers.
    pub fn new(workers: usize) -> Self {
        Self {
            counts: (0..workers).map(|_| AtomicU64::new(0)).collect(),
        }
    }

    /// Combinations counted for `worker`.
    pub fn count(&self, worker: usize) -> u64 {
        self.counts
            .get(worker)
            .map_or(0, |count| count.load(Ordering::Relaxed))
    }

    /// Combinations counted across all workers.
    pub fn total(&self) -> u64 {
        self.counts
            .iter()
            .map(|count| count.load(Ordering::Relaxed))
            .sum()
    }
}

impl CombinationSink for CountingSink {
    fn accept(&self, worker: usize, _n: usize, _k: usize, _combination: &[usize]) -> Flow {
        match self.counts.get(worker) {
            Some(count) => {
                count.fetch_add(1, Ordering::Relaxed);
                Flow::Continue
            }
            None => Flow::Stop,
        }
    }
}
