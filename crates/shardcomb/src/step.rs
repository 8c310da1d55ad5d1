use crate::{Count, Error, Result, unrank};
use core::iter::FusedIterator;

/// Advances `combination` to its lexicographic successor among the
/// `combination.len()`-combinations of `n`.
///
/// Scans from the right for the first position `i` that is still below its
/// ceiling `n - k + i`, increments it, and resets everything to its right to
/// the smallest ascending continuation. The amortized cost is constant.
///
/// Returns `false` when `combination` was the last one (the top `k` values of
/// `[0, n)`). Like an odometer rolling over, the sequence is then reset to the
/// first combination `[0, 1, .., k - 1]`. An empty combination has no
/// successor. If `k > n` there is nothing to step and the sequence is left
/// untouched.
///
/// The input must be strictly ascending within `[0, n)`.
///
/// ```
/// use shardcomb::advance;
///
/// let mut combination = vec![0, 4];
/// assert!(advance(&mut combination, 5));
/// assert_eq!(combination, [1, 2]);
///
/// let mut combination = vec![3, 4];
/// assert!(!advance(&mut combination, 5));
/// assert_eq!(combination, [0, 1]);
/// ```
pub fn advance(combination: &mut [usize], n: usize) -> bool {
    let k = combination.len();
    if k == 0 || k > n {
        return false;
    }
    debug_assert!(combination.windows(2).all(|pair| pair[0] < pair[1]));

    let offset = n - k;
    let Some(pivot) = (0..k).rev().find(|&i| combination[i] < offset + i) else {
        for (i, slot) in combination.iter_mut().enumerate() {
            *slot = i;
        }
        return false;
    };

    combination[pivot] += 1;
    for i in pivot + 1..k {
        combination[i] = combination[i - 1] + 1;
    }
    true
}

/// The lexicographically smallest `k`-combination: `[0, 1, .., k - 1]`.
pub fn first(k: usize) -> Vec<usize> {
    (0..k).collect()
}

/// The lexicographically greatest `k`-combination of `n`: `[n - k, .., n - 1]`.
///
/// Empty when `k > n`.
pub fn last(n: usize, k: usize) -> Vec<usize> {
    if k > n {
        return Vec::new();
    }
    (n - k..n).collect()
}

/// Sequential iterator over `k`-combinations of `n` in lexicographic order.
///
/// Yields owned combinations, stepping with [`advance`]. This is the
/// single-threaded reference ordering that sharded enumeration reproduces.
///
/// ```
/// use shardcomb::{Combinations, Count};
///
/// let all: Vec<_> = Combinations::new(4, 2).unwrap().collect();
/// assert_eq!(all.len(), 6);
/// assert_eq!(all[0], [0, 1]);
///
/// let tail: Vec<_> = Combinations::from_rank(4, 2, &Count::from(4u32)).unwrap().collect();
/// assert_eq!(tail, [[1, 3], [2, 3]]);
/// ```
#[derive(Clone, Debug)]
pub struct Combinations {
    n: usize,
    current: Vec<usize>,
    done: bool,
}

impl Combinations {
    /// Starts at rank zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] when `k > n`.
    pub fn new(n: usize, k: usize) -> Result<Self> {
        if k > n {
            return Err(Error::subset_too_large(n, k));
        }
        Ok(Self {
            n,
            current: first(k),
            done: false,
        })
    }

    /// Starts at rank `index`.
    ///
    /// # Errors
    ///
    /// Fails exactly when [`unrank`] does.
    pub fn from_rank(n: usize, k: usize, index: &Count) -> Result<Self> {
        Ok(Self {
            n,
            current: unrank(n, k, index)?,
            done: false,
        })
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.current.clone();
        self.done = !advance(&mut self.current, self.n);
        Some(item)
    }
}

impl FusedIterator for Combinations {}
