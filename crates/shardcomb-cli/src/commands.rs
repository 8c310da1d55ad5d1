use crate::config::{Command, Config};
use anyhow::{Context, bail};
use shardcomb::{
    CollectingSink, Combinations, Count, CountingSink, Enumerator, Summary, rank, sink,
    total_combinations, unrank,
};
use std::hint::black_box;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Runs the configured subcommand, writing results to stdout.
pub fn execute(config: &Config) -> anyhow::Result<()> {
    match &config.command {
        Command::Count { n, k } => count(*n, *k),
        Command::Unrank { n, k, index } => unrank_one(*n, *k, index),
        Command::Rank { n, combination } => rank_one(*n, combination),
        Command::Run { n, k, print } => run(config, *n, *k, *print),
        Command::Verify { n, k } => verify(config, *n, *k),
        Command::Bench { n, k, up_to } => bench(config, *n, *k, *up_to),
    }
}

/// Formats a combination as `{a, b, c}`.
pub fn format_combination(combination: &[usize]) -> String {
    let positions: Vec<_> = combination.iter().map(ToString::to_string).collect();
    format!("{{{}}}", positions.join(", "))
}

fn count(n: usize, k: usize) -> anyhow::Result<()> {
    println!("{}", total_combinations(n, k)?);
    Ok(())
}

fn unrank_one(n: usize, k: usize, index: &Count) -> anyhow::Result<()> {
    let combination = unrank(n, k, index)?;
    println!("{}", format_combination(&combination));
    Ok(())
}

fn rank_one(n: usize, combination: &[usize]) -> anyhow::Result<()> {
    println!("{}", rank(n, combination)?);
    Ok(())
}

fn run(config: &Config, n: usize, k: usize, print: bool) -> anyhow::Result<()> {
    let enumerator = config.enumerator();
    let start = Instant::now();

    let summary = if print {
        let stdout = io::stdout();
        // A closed pipe stops each worker instead of failing the run.
        enumerator.run(
            n,
            k,
            &sink::from_fn(|worker, _, _, combination| {
                writeln!(stdout.lock(), "{worker}: {}", format_combination(combination)).is_ok()
            }),
        )?
    } else {
        let workers = enumerator.plan(n, k)?.shards().len();
        enumerator.run(n, k, &CountingSink::new(workers))?
    };

    report(&summary, start.elapsed());
    Ok(())
}

fn report(summary: &Summary, elapsed: Duration) {
    for worker in summary.workers() {
        tracing::info!(
            "Worker {} walked ranks [{}, {}): emitted {}{}",
            worker.shard.worker(),
            worker.shard.start(),
            worker.shard.end(),
            worker.emitted,
            if worker.stopped { " (stopped)" } else { "" }
        );
    }
    tracing::info!(
        "Enumerated {} of {} combinations with {} workers in {}ms",
        summary.emitted(),
        summary.total(),
        summary.workers().len(),
        elapsed.as_millis()
    );
}

fn verify(config: &Config, n: usize, k: usize) -> anyhow::Result<()> {
    let enumerator = config.enumerator();
    let workers = enumerator.plan(n, k)?.shards().len();

    let sink = CollectingSink::new(workers);
    enumerator.run(n, k, &sink)?;
    let parallel = sink.into_ordered();

    let mut checked = 0usize;
    for (index, expected) in Combinations::new(n, k)?.enumerate() {
        let actual = parallel
            .get(index)
            .with_context(|| format!("sharded enumeration ended after {index} combinations"))?;
        if *actual != expected {
            bail!(
                "combination at rank {index} differs: expected {}, got {}",
                format_combination(&expected),
                format_combination(actual)
            );
        }
        checked += 1;
    }

    if parallel.len() != checked {
        bail!(
            "sharded enumeration produced {} combinations, expected {checked}",
            parallel.len()
        );
    }

    println!("verified {checked} combinations of {k} from {n} across {workers} workers");
    Ok(())
}

fn bench(config: &Config, n: usize, k: usize, up_to: usize) -> anyhow::Result<()> {
    let total = total_combinations(n, k)?;
    let sink = sink::from_fn(|_, _, _, combination| {
        black_box(combination);
        true
    });

    for threads in 1..=up_to {
        let enumerator = Enumerator::new(threads).with_max_workers(config.max_workers);
        let start = Instant::now();
        enumerator.run(n, k, &sink)?;
        println!(
            "{:>3} thread(s): {:>8}ms for {} combinations",
            threads,
            start.elapsed().as_millis(),
            total
        );
    }
    Ok(())
}
