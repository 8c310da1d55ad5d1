use crate::{
    CollectingSink, Combinations, Count, CountingSink, Enumerator, Error, Flow, advance,
    enumerate, sink, total_combinations,
};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

fn sequential(n: usize, k: usize) -> Vec<Vec<usize>> {
    Combinations::new(n, k).unwrap().collect()
}

fn run_collect(threads: usize, n: usize, k: usize) -> Vec<Vec<Vec<usize>>> {
    let sink = CollectingSink::new(threads);
    enumerate(threads, n, k, &sink).unwrap();
    sink.into_buckets()
}

#[test]
fn ten_choose_five_across_three_threads_reproduces_sequential_order() {
    let buckets = run_collect(3, 10, 5);

    let sizes: Vec<_> = buckets.iter().map(Vec::len).collect();
    assert_eq!(sizes, [84, 84, 84]);

    let concatenated: Vec<_> = buckets.into_iter().flatten().collect();
    assert_eq!(concatenated, sequential(10, 5));
}

#[test]
fn partition_is_complete_for_every_thread_count() {
    let (n, k) = (9, 4);
    let expected: HashSet<_> = sequential(n, k).into_iter().collect();

    for threads in 1..=20 {
        let sink = CollectingSink::new(threads);
        enumerate(threads, n, k, &sink).unwrap();

        let emitted = sink.into_ordered();
        let unique: HashSet<_> = emitted.iter().cloned().collect();
        assert_eq!(emitted.len(), expected.len(), "threads={threads}");
        assert_eq!(unique, expected, "threads={threads}");
    }
}

#[test]
fn each_worker_emits_successive_combinations() {
    let n = 12;
    for bucket in run_collect(5, n, 6) {
        for pair in bucket.windows(2) {
            let mut stepped = pair[0].clone();
            assert!(advance(&mut stepped, n));
            assert_eq!(stepped, pair[1]);
        }
    }
}

#[test]
fn worker_blocks_follow_the_global_ordering() {
    let all = sequential(8, 3);
    let buckets = run_collect(4, 8, 3);

    let mut offset = 0;
    for bucket in buckets {
        assert_eq!(bucket[..], all[offset..offset + bucket.len()]);
        offset += bucket.len();
    }
    assert_eq!(offset, all.len());
}

#[test]
fn sink_sees_worker_index_and_shape() {
    let seen = Mutex::new(HashSet::new());
    enumerate(
        3,
        7,
        2,
        &sink::from_fn(|worker, n, k, combination| {
            assert_eq!((n, k), (7, 2));
            assert_eq!(combination.len(), 2);
            seen.lock().unwrap().insert(worker);
            true
        }),
    )
    .unwrap();
    assert_eq!(seen.into_inner().unwrap(), HashSet::from([0, 1, 2]));
}

#[test]
fn workers_run_on_separate_threads() {
    let ids = Mutex::new(HashSet::new());
    enumerate(
        4,
        10,
        3,
        &sink::from_fn(|_, _, _, _| {
            ids.lock().unwrap().insert(thread::current().id());
            true
        }),
    )
    .unwrap();
    assert_eq!(ids.into_inner().unwrap().len(), 4);
}

#[test]
fn stop_only_ends_the_rejecting_shard() {
    let per_worker: Vec<_> = (0..3).map(|_| AtomicUsize::new(0)).collect();
    let summary = Enumerator::new(3)
        .run(
            10,
            5,
            &sink::from_fn(|worker, _, _, _| {
                let seen = per_worker[worker].fetch_add(1, Ordering::Relaxed) + 1;
                // Worker 1 gives up on its fifth combination.
                !(worker == 1 && seen == 5)
            }),
        )
        .unwrap();

    let counts: Vec<_> = per_worker.iter().map(|c| c.load(Ordering::Relaxed)).collect();
    assert_eq!(counts, [84, 5, 84]);

    let stopped: Vec<_> = summary.workers().iter().map(|r| r.stopped).collect();
    assert_eq!(stopped, [false, true, false]);
    assert_eq!(summary.workers()[1].emitted, Count::from(5u32));
    assert_eq!(summary.emitted(), Count::from(173u32));
    assert!(!summary.is_complete());
}

#[test]
fn stopping_on_the_first_combination_emits_exactly_one() {
    let calls = AtomicUsize::new(0);
    let summary = Enumerator::new(1)
        .run(
            6,
            3,
            &sink::from_fn(|_, _, _, _| {
                calls.fetch_add(1, Ordering::Relaxed);
                false
            }),
        )
        .unwrap();
    assert_eq!(calls.into_inner(), 1);
    assert_eq!(summary.emitted(), Count::one());
}

#[test]
fn empty_subset_is_delivered_once() {
    let sink = CollectingSink::new(4);
    let summary = Enumerator::new(4).run(5, 0, &sink).unwrap();
    assert_eq!(summary.total(), &Count::one());
    assert_eq!(summary.workers().len(), 1);
    assert_eq!(sink.into_ordered(), [Vec::<usize>::new()]);
}

#[test]
fn full_subset_is_delivered_once() {
    let sink = CollectingSink::new(2);
    enumerate(2, 4, 4, &sink).unwrap();
    assert_eq!(sink.into_ordered(), [vec![0, 1, 2, 3]]);
}

#[test]
fn more_threads_than_combinations_clamps_to_total() {
    let plan = Enumerator::new(50).plan(5, 4).unwrap();
    assert_eq!(plan.total(), &Count::from(5u32));
    assert_eq!(plan.shards().len(), 5);

    let sink = CountingSink::new(50);
    enumerate(50, 5, 4, &sink).unwrap();
    for worker in 0..5 {
        assert_eq!(sink.count(worker), 1);
    }
    assert_eq!(sink.total(), 5);
}

#[test]
fn worker_cap_limits_shard_count() {
    let enumerator = Enumerator::new(64).with_max_workers(3);
    let plan = enumerator.plan(10, 5).unwrap();
    assert_eq!(plan.shards().len(), 3);

    let sink = CountingSink::new(3);
    let summary = enumerator.run(10, 5, &sink).unwrap();
    assert_eq!(sink.total(), 252);
    assert!(summary.is_complete());
}

#[test]
fn invalid_arguments_fail_before_any_worker_starts() {
    let called = AtomicBool::new(false);
    let sink = sink::from_fn(|_, _, _, _| {
        called.store(true, Ordering::Relaxed);
        true
    });

    assert!(matches!(
        enumerate(2, 3, 4, &sink),
        Err(Error::InvalidArguments { .. })
    ));
    assert!(matches!(
        enumerate(0, 5, 2, &sink),
        Err(Error::InvalidArguments { .. })
    ));
    assert!(matches!(
        Enumerator::new(2).with_max_workers(0).run(5, 2, &sink),
        Err(Error::InvalidArguments { .. })
    ));
    assert!(!called.load(Ordering::Relaxed));
}

#[test]
fn summary_reports_every_shard() {
    let summary = Enumerator::new(4)
        .run(12, 5, &CountingSink::new(4))
        .unwrap();
    let total = total_combinations(12, 5).unwrap();
    assert_eq!(summary.total(), &total);
    assert_eq!(summary.emitted(), total);

    let mut next_start = Count::zero();
    for (i, report) in summary.workers().iter().enumerate() {
        assert_eq!(report.shard.worker(), i);
        assert_eq!(report.shard.start(), &next_start);
        assert_eq!(&report.emitted, report.shard.len());
        next_start = report.shard.end();
    }
}

#[test]
fn huge_spaces_can_be_sampled_per_shard() {
    // C(100, 50) is far beyond u64; take only the first of each shard.
    let (n, k, threads) = (100, 50, 4);
    let plan = Enumerator::new(threads).plan(n, k).unwrap();
    let firsts = Mutex::new(vec![None; threads]);

    Enumerator::new(threads)
        .run(
            n,
            k,
            &sink::from_fn(|worker, _, _, combination| {
                firsts.lock().unwrap()[worker] = Some(combination.to_vec());
                false
            }),
        )
        .unwrap();

    for (shard, first) in plan.shards().iter().zip(firsts.into_inner().unwrap()) {
        let expected = crate::unrank(n, k, shard.start()).unwrap();
        assert_eq!(first, Some(expected));
    }
}

#[test]
fn sink_panics_propagate_after_join() {
    let result = std::panic::catch_unwind(|| {
        let _ = enumerate(
            2,
            6,
            2,
            &sink::from_fn(|worker, _, _, _| {
                assert_ne!(worker, 1, "boom");
                true
            }),
        );
    });
    assert!(result.is_err());
}

#[test]
fn flow_from_closure_matches_bool() {
    let seen = AtomicUsize::new(0);
    let closure = |_: usize, _: usize, _: usize, _: &[usize]| {
        seen.fetch_add(1, Ordering::Relaxed);
        true
    };
    enumerate(2, 5, 2, &closure).unwrap();
    assert_eq!(seen.load(Ordering::Relaxed), 10);
    assert_eq!(Flow::from(true), Flow::Continue);
}
