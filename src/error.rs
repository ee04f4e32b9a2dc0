use std::collections::TryReserveError;
use std::fmt;

/// Failures surfaced by the tree and its facades.
///
/// Absent keys on lookup or removal are not errors; only operations that
/// require the key to be present report [`Error::KeyNotFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The key required by the operation is not in the container.
    KeyNotFound,
    /// Every index representable by the index type is in use.
    CapacityExceeded,
    /// The node arena could not grow.
    Alloc(TryReserveError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyNotFound => f.write_str("key not found"),
            Error::CapacityExceeded => f.write_str("reached maximum number of nodes"),
            Error::Alloc(err) => write!(f, "node allocation failed: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Alloc(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TryReserveError> for Error {
    #[inline]
    fn from(err: TryReserveError) -> Self {
        Error::Alloc(err)
    }
}
