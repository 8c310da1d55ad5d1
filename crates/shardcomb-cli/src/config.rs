use anyhow::bail;
use clap::{Parser, Subcommand};
use shardcomb::{Count, DEFAULT_MAX_WORKERS, Enumerator};

/// Command-line arguments for the `shardcomb` binary.
///
/// Thread settings can also come from the environment (or a `.env` file), so a
/// machine-wide default can be pinned without repeating flags.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "shardcomb",
    version,
    about = "Count, rank and enumerate k-combinations across worker threads"
)]
pub struct CliArgs {
    /// Number of worker threads to request.
    ///
    /// Defaults to the number of logical CPUs. The effective number of workers
    /// never exceeds the number of combinations or `--max-workers`.
    ///
    /// Environment variable: `SHARDCOMB_THREADS`
    #[arg(short, long, env = "SHARDCOMB_THREADS", global = true)]
    pub threads: Option<usize>,

    /// Hard cap on worker threads, regardless of `--threads`.
    ///
    /// Environment variable: `SHARDCOMB_MAX_WORKERS`
    #[arg(long, env = "SHARDCOMB_MAX_WORKERS", global = true, default_value_t = DEFAULT_MAX_WORKERS)]
    pub max_workers: usize,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print C(N, K).
    Count { n: usize, k: usize },

    /// Print the combination at INDEX of the lexicographic order.
    Unrank {
        n: usize,
        k: usize,
        /// Decimal rank, of any size.
        index: Count,
    },

    /// Print the rank of a strictly ascending combination.
    Rank {
        n: usize,
        #[arg(num_args = 0..)]
        combination: Vec<usize>,
    },

    /// Enumerate all combinations and report per-worker counts.
    Run {
        n: usize,
        k: usize,
        /// Print every combination, prefixed with its worker.
        #[arg(long)]
        print: bool,
    },

    /// Check that the sharded order matches sequential stepping.
    Verify { n: usize, k: usize },

    /// Time enumeration with 1 through UP_TO threads.
    Bench {
        n: usize,
        k: usize,
        #[arg(long, default_value_t = 4)]
        up_to: usize,
    },
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub threads: usize,
    pub max_workers: usize,
    pub command: Command,
}

impl Config {
    /// An enumerator honoring the configured thread count and cap.
    pub fn enumerator(&self) -> Enumerator {
        Enumerator::new(self.threads).with_max_workers(self.max_workers)
    }
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let threads = args.threads.unwrap_or_else(num_cpus::get);

        if threads == 0 {
            bail!("SHARDCOMB_THREADS must be greater than 0");
        }

        if args.max_workers == 0 {
            bail!("SHARDCOMB_MAX_WORKERS must be greater than 0");
        }

        if let Command::Bench { up_to: 0, .. } = args.command {
            bail!("--up-to must be greater than 0");
        }

        Ok(Self {
            threads,
            max_workers: args.max_workers,
            command: args.command,
        })
    }
}
