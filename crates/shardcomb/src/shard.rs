use crate::Count;

/// A contiguous block of ranks `[start, start + len)` owned by one worker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shard {
    worker: usize,
    start: Count,
    len: Count,
}

impl Shard {
    /// Index of the worker that walks this shard.
    pub fn worker(&self) -> usize {
        self.worker
    }

    /// Rank of the first combination in the shard.
    pub fn start(&self) -> &Count {
        &self.start
    }

    /// Number of combinations in the shard.
    pub fn len(&self) -> &Count {
        &self.len
    }

    /// Returns `true` if the shard holds no ranks.
    pub fn is_empty(&self) -> bool {
        self.len.is_zero()
    }

    /// One past the rank of the last combination in the shard.
    pub fn end(&self) -> Count {
        &self.start + &self.len
    }
}

/// Splits `[0, total)` into `min(workers, total)` contiguous shards whose
/// lengths differ by at most one.
///
/// The first `total % w` shards receive one extra rank. No empty shard is
/// produced, so a zero `total` or zero `workers` yields no shards.
///
/// ```
/// use shardcomb::{Count, partition};
///
/// let shards = partition(&Count::from(10u32), 4);
/// let lens: Vec<_> = shards.iter().map(|s| s.len().to_u64().unwrap()).collect();
/// assert_eq!(lens, [3, 3, 2, 2]);
/// assert_eq!(shards[2].start(), &Count::from(6u32));
/// ```
pub fn partition(total: &Count, workers: usize) -> Vec<Shard> {
    let workers = match total.to_usize() {
        Some(total) => workers.min(total),
        None => workers,
    };
    if workers == 0 {
        return Vec::new();
    }

    let divisor = Count::from(workers);
    let base = total / &divisor;
    // Strictly below `workers`, so it fits.
    let extra = (total % &divisor).to_usize().unwrap_or_default();

    let mut start = Count::zero();
    (0..workers)
        .map(|worker| {
            let len = if worker < extra {
                &base + 1u64
            } else {
                base.clone()
            };
            let shard = Shard {
                worker,
                start: start.clone(),
                len,
            };
            start += &shard.len;
            shard
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lens(shards: &[Shard]) -> Vec<u64> {
        shards.iter().map(|s| s.len().to_u64().unwrap()).collect()
    }

    #[test]
    fn ten_choose_five_splits_into_three_equal_shards() {
        let shards = partition(&Count::from(252u32), 3);
        assert_eq!(lens(&shards), [84, 84, 84]);
        assert_eq!(shards[1].start(), &Count::from(84u32));
        assert_eq!(shards[2].end(), Count::from(252u32));
    }

    #[test]
    fn earlier_shards_absorb_the_remainder() {
        let shards = partition(&Count::from(11u32), 4);
        assert_eq!(lens(&shards), [3, 3, 3, 2]);
    }

    #[test]
    fn shards_tile_the_range_exactly() {
        for total in 0u32..40 {
            for workers in 1..12 {
                let shards = partition(&Count::from(total), workers);
                assert_eq!(shards.len(), workers.min(total as usize));

                let mut expected_start = Count::zero();
                for (i, shard) in shards.iter().enumerate() {
                    assert_eq!(shard.worker(), i);
                    assert_eq!(shard.start(), &expected_start);
                    assert!(!shard.is_empty());
                    expected_start = shard.end();
                }
                assert_eq!(expected_start, Count::from(total));

                let sizes = lens(&shards);
                if let (Some(max), Some(min)) = (sizes.iter().max(), sizes.iter().min()) {
                    assert!(max - min <= 1);
                }
            }
        }
    }

    #[test]
    fn fewer_ranks_than_workers_avoids_empty_shards() {
        let shards = partition(&Count::one(), 8);
        assert_eq!(shards.len(), 1);
        assert_eq!(shards[0].len(), &Count::one());
    }

    #[test]
    fn huge_totals_split_without_loss() {
        let total: Count = "90548514656103281165404177077484163874504589675413336841320"
            .parse()
            .unwrap();
        let shards = partition(&total, 7);
        assert_eq!(shards.len(), 7);
        assert_eq!(shards[6].end(), total);
    }

    #[test]
    fn zero_workers_yield_no_shards() {
        assert!(partition(&Count::from(5u32), 0).is_empty());
    }
}
