//! Conversions between ranks and combinations.
//!
//! Both directions use the combinatorial number system on the *complement* of
//! the rank. The plain number system orders combinations co-lexicographically;
//! mapping every position `a` to `n - 1 - a` and every rank `r` to
//! `C(n, k) - 1 - r` turns that into the lexicographic order produced by
//! [`advance`](crate::advance).

use crate::{Count, Error, Result, binomial, total_combinations};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Returns the combination at position `index` of the lexicographic ordering
/// of all `k`-combinations of `n`, without enumerating any other combination.
///
/// Costs `O(k log n)` binomial evaluations: each slot binary-searches the
/// largest candidate whose coefficient fits in what is left of the rank.
///
/// # Errors
///
/// - [`Error::InvalidArguments`] when `k > n`.
/// - [`Error::IndexOutOfRange`] when `index >= C(n, k)`.
///
/// ```
/// use shardcomb::{Count, unrank};
///
/// assert_eq!(unrank(5, 2, &Count::from(7u32)).unwrap(), vec![2, 3]);
/// assert!(unrank(5, 2, &Count::from(10u32)).is_err());
/// ```
#[cfg_attr(feature = "tracing", instrument(level = "trace"))]
pub fn unrank(n: usize, k: usize, index: &Count) -> Result<Vec<usize>> {
    let total = total_combinations(n, k)?;
    if index >= &total {
        return Err(Error::IndexOutOfRange {
            index: index.clone(),
            total,
        });
    }

    let mut dual = &total - index - 1u64;
    let mut combination = Vec::with_capacity(k);
    // Candidates for the current slot lie strictly below `bound`.
    let mut bound = n;

    for slots in (1..=k).rev() {
        // C(slots - 1, slots) == 0, so `lo` always satisfies the predicate.
        let (mut lo, mut hi) = (slots - 1, bound - 1);
        while lo < hi {
            let mid = lo + (hi - lo).div_ceil(2);
            if binomial(mid, slots) <= dual {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }

        dual -= &binomial(lo, slots);
        combination.push(n - 1 - lo);
        bound = lo;
    }

    debug_assert!(dual.is_zero());
    Ok(combination)
}

/// Returns the position of `combination` in the lexicographic ordering of all
/// `combination.len()`-combinations of `n`. Inverse of [`unrank`].
///
/// # Errors
///
/// Returns [`Error::InvalidArguments`] when the combination is longer than
/// `n`, is not strictly ascending, or holds a position `>= n`.
///
/// ```
/// use shardcomb::{Count, rank};
///
/// assert_eq!(rank(5, &[2, 3]).unwrap(), Count::from(7u32));
/// assert!(rank(5, &[3, 2]).is_err());
/// ```
#[cfg_attr(feature = "tracing", instrument(level = "trace"))]
pub fn rank(n: usize, combination: &[usize]) -> Result<Count> {
    let k = combination.len();
    let total = total_combinations(n, k)?;
    validate(n, combination)?;

    let mut dual = Count::zero();
    for (i, &position) in combination.iter().enumerate() {
        dual += &binomial(n - 1 - position, k - i);
    }
    Ok(total - 1u64 - dual)
}

/// Checks that `combination` is strictly ascending within `[0, n)`.
pub(crate) fn validate(n: usize, combination: &[usize]) -> Result<()> {
    if let Some(&position) = combination.iter().find(|&&position| position >= n) {
        return Err(Error::invalid(format!(
            "position {position} is outside a set of {n} elements"
        )));
    }
    if combination.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(Error::invalid(format!(
            "combination {combination:?} is not strictly ascending"
        )));
    }
    Ok(())
}
