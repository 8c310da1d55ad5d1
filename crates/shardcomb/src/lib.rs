//! # shardcomb
//!
//! Parallel enumeration of k-element combinations of an n-element set.
//!
//! All `C(n, k)` combinations are placed in one global lexicographic order,
//! `[0, 1, .., k - 1]` first. That rank space is cut into contiguous shards,
//! one per worker thread. Each worker jumps straight to its first combination
//! by *unranking* it, then walks the rest of its shard with a constant
//! amortized successor step. Counts and ranks are arbitrary-precision, so the
//! size of the space is never limited by a machine integer.
//!
//! ## Building blocks
//!
//! - [`total_combinations`]: exact `C(n, k)` as a [`Count`].
//! - [`unrank`] / [`rank`]: rank to combination and back.
//! - [`advance`]: in-place lexicographic successor; [`Combinations`] iterates
//!   with it sequentially.
//! - [`partition`]: splits `[0, C(n, k))` into balanced [`Shard`]s.
//! - [`enumerate`] / [`Enumerator`]: runs the shards on worker threads and
//!   feeds a [`CombinationSink`].
//!
//! ## Example
//!
//! ```
//! use shardcomb::{CollectingSink, Count, enumerate, unrank};
//!
//! assert_eq!(unrank(5, 2, &Count::from(7u32)).unwrap(), vec![2, 3]);
//!
//! let sink = CollectingSink::new(2);
//! enumerate(2, 5, 2, &sink).unwrap();
//! let buckets = sink.into_buckets();
//! assert_eq!(buckets[0], [[0, 1], [0, 2], [0, 3], [0, 4], [1, 2]]);
//! assert_eq!(buckets[1], [[1, 3], [1, 4], [2, 3], [2, 4], [3, 4]]);
//! ```
//!
//! ## Features
//!
//! - `tracing`: emits spans and debug events for planning and per-worker
//!   progress through the [`tracing`](https://docs.rs/tracing) crate.

mod count;
mod enumerate;
mod error;
mod rank;
mod shard;
pub mod sink;
mod step;

pub use crate::count::*;
pub use crate::enumerate::*;
pub use crate::error::*;
pub use crate::rank::{rank, unrank};
pub use crate::shard::*;
pub use crate::sink::{CollectingSink, CombinationSink, CountingSink, Flow, FnSink};
pub use crate::step::*;
