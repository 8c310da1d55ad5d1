use crate::Count;
use thiserror::Error;

/// A result type defaulting to the crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// All errors `shardcomb` can produce.
///
/// Every error is detected synchronously, before any enumeration work starts,
/// and is returned to the immediate caller. The operations are pure, so
/// repeating a failed call with the same arguments fails the same way.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The shape of the request is invalid: `k > n`, a zero thread count, or a
    /// combination that is not strictly ascending within `[0, n)`.
    #[error("invalid arguments: {reason}")]
    InvalidArguments { reason: String },

    /// A rank is not below the number of combinations.
    #[error("index {index} is out of range for {total} combinations")]
    IndexOutOfRange { index: Count, total: Count },
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArguments {
            reason: reason.into(),
        }
    }

    pub(crate) fn subset_too_large(n: usize, k: usize) -> Self {
        Self::invalid(format!("subset size {k} exceeds set size {n}"))
    }
}
