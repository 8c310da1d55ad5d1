use crate::{Count, Error, Result};
use num_bigint::BigUint;
use num_traits::One;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Computes `C(n, k)`, the number of `k`-element combinations of an
/// `n`-element set.
///
/// The value is exact for any input: the multiplicative recurrence
/// `C(n, j) = C(n, j - 1) * (n - j + 1) / j` is accumulated in arbitrary
/// precision, running over the smaller of `k` and `n - k`. Every intermediate
/// value is itself a binomial coefficient, so each division is exact.
///
/// # Errors
///
/// Returns [`Error::InvalidArguments`] when `k > n`.
///
/// ```
/// use shardcomb::{Count, total_combinations};
///
/// assert_eq!(total_combinations(5, 2).unwrap(), Count::from(10u32));
/// assert_eq!(total_combinations(7, 0).unwrap(), Count::one());
/// assert!(total_combinations(2, 5).is_err());
/// ```
#[cfg_attr(feature = "tracing", instrument(level = "trace"))]
pub fn total_combinations(n: usize, k: usize) -> Result<Count> {
    if k > n {
        return Err(Error::subset_too_large(n, k));
    }
    Ok(binomial(n, k))
}

/// Total counterpart of [`total_combinations`]: `C(n, k)` with `C(n, k) = 0`
/// for `k > n`.
///
/// This is the convention of the combinatorial number system, where the
/// ranking engine probes `C(v, slots)` for candidates `v` below `slots`.
pub fn binomial(n: usize, k: usize) -> Count {
    if k > n {
        return Count::zero();
    }

    let k = k.min(n - k);
    let mut acc = BigUint::one();
    for j in 1..=k {
        acc *= n - j + 1;
        acc /= j;
    }
    Count::from(acc)
}
