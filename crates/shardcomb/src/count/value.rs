use core::{
    fmt,
    ops::{Add, AddAssign, Div, Mul, Rem, Sub, SubAssign},
    str::FromStr,
};
use num_bigint::{BigUint, ParseBigIntError};
use num_traits::{One, ToPrimitive, Zero};

/// An arbitrary-precision, non-negative integer used for combination counts,
/// ranks and shard lengths.
///
/// `Count` wraps a [`BigUint`] so that callers never see a width limit:
/// `C(200, 100)` is representable exactly, as is any rank below it. Only the
/// arithmetic the ranking engine and the shard planner need is exposed.
///
/// Subtraction follows the unsigned semantics of the underlying integer and
/// panics on underflow.
///
/// ```
/// use shardcomb::Count;
///
/// let total = Count::from(252u32);
/// let per_worker = &total / &Count::from(3u32);
/// assert_eq!(per_worker, Count::from(84u32));
/// assert_eq!(per_worker.to_u64(), Some(84));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Count(BigUint);

impl Count {
    /// Returns zero.
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Returns one.
    pub fn one() -> Self {
        Self(BigUint::one())
    }

    /// Returns `true` when the value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns the value as a `u64` if it fits.
    pub fn to_u64(&self) -> Option<u64> {
        self.0.to_u64()
    }

    /// Returns the value as a `u128` if it fits.
    pub fn to_u128(&self) -> Option<u128> {
        self.0.to_u128()
    }

    /// Returns the value as a `usize` if it fits.
    pub fn to_usize(&self) -> Option<usize> {
        self.0.to_usize()
    }

    /// Number of bits needed to represent the value.
    pub fn bits(&self) -> u64 {
        self.0.bits()
    }

    /// Borrows the underlying big integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    /// Consumes the count and returns the underlying big integer.
    pub fn into_biguint(self) -> BigUint {
        self.0
    }
}

impl From<BigUint> for Count {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

macro_rules! impl_from_primitive {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Count {
                fn from(value: $ty) -> Self {
                    Self(BigUint::from(value))
                }
            }
        )*
    };
}

impl_from_primitive!(u8, u16, u32, u64, u128, usize);

impl FromStr for Count {
    type Err = ParseBigIntError;

    /// Parses a decimal string of any length.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigUint::from_str(s).map(Self)
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

macro_rules! forward_binop {
    ($($trait:ident :: $method:ident),*) => {
        $(
            impl $trait for Count {
                type Output = Count;

                fn $method(self, rhs: Count) -> Count {
                    Count($trait::$method(self.0, rhs.0))
                }
            }

            impl $trait<&Count> for &Count {
                type Output = Count;

                fn $method(self, rhs: &Count) -> Count {
                    Count($trait::$method(&self.0, &rhs.0))
                }
            }

            impl $trait<&Count> for Count {
                type Output = Count;

                fn $method(self, rhs: &Count) -> Count {
                    Count($trait::$method(self.0, &rhs.0))
                }
            }

            impl $trait<u64> for Count {
                type Output = Count;

                fn $method(self, rhs: u64) -> Count {
                    Count($trait::$method(self.0, BigUint::from(rhs)))
                }
            }

            impl $trait<u64> for &Count {
                type Output = Count;

                fn $method(self, rhs: u64) -> Count {
                    Count($trait::$method(&self.0, BigUint::from(rhs)))
                }
            }
        )*
    };
}

forward_binop!(Add::add, Sub::sub, Mul::mul, Div::div, Rem::rem);

impl AddAssign<&Count> for Count {
    fn add_assign(&mut self, rhs: &Count) {
        self.0 += &rhs.0;
    }
}

impl AddAssign<u64> for Count {
    fn add_assign(&mut self, rhs: u64) {
        self.0 += BigUint::from(rhs);
    }
}

impl SubAssign<&Count> for Count {
    fn sub_assign(&mut self, rhs: &Count) {
        self.0 -= &rhs.0;
    }
}

impl SubAssign<u64> for Count {
    fn sub_assign(&mut self, rhs: u64) {
        self.0 -= BigUint::from(rhs);
    }
}
