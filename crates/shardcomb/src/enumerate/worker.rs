use crate::{CombinationSink, Count, Result, Shard, advance, unrank};

/// Outcome of walking one shard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkerReport {
    /// The shard the worker walked.
    pub shard: Shard,
    /// Combinations handed to the sink, including the one it stopped on.
    pub emitted: Count,
    /// Whether the sink cut the shard short.
    pub stopped: bool,
}

/// Main loop of a worker.
///
/// Unranks the shard's first combination, then alternates between handing the
/// current combination to the sink and stepping to its successor until the
/// shard is exhausted or the sink returns [`Flow::Stop`].
///
/// Shard lengths are arbitrary-precision, so the countdown runs in `u64`
/// batches and only touches the big integer once per batch.
///
/// [`Flow::Stop`]: crate::Flow::Stop
pub(crate) fn walk<S>(n: usize, k: usize, shard: Shard, sink: &S) -> Result<WorkerReport>
where
    S: CombinationSink + ?Sized,
{
    let worker = shard.worker();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Worker {} started at rank {} for {} combinations",
        worker,
        shard.start(),
        shard.len()
    );

    let mut combination = unrank(n, k, shard.start())?;
    let mut remaining = shard.len().clone();
    let mut emitted = Count::zero();

    while !remaining.is_zero() {
        let batch = remaining.to_u64().unwrap_or(u64::MAX);
        for taken in 1..=batch {
            if sink.accept(worker, n, k, &combination).is_stop() {
                emitted += taken;

                #[cfg(feature = "tracing")]
                tracing::debug!("Worker {} stopped by sink after {}", worker, emitted);

                return Ok(WorkerReport {
                    shard,
                    emitted,
                    stopped: true,
                });
            }
            // Past the end of the shard the successor is never emitted, so
            // rolling over after the global last combination is harmless.
            advance(&mut combination, n);
        }
        emitted += batch;
        remaining -= batch;
    }

    #[cfg(feature = "tracing")]
    tracing::debug!("Worker {} finished after {}", worker, emitted);

    Ok(WorkerReport {
        shard,
        emitted,
        stopped: false,
    })
}
