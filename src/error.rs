//! Error type for the fallible (`try_*`) vector operations.
//!
//! The panicking operations are thin wrappers over their `try_*` twins: a caller
//! that violates a precondition gets a panic carrying the same message that the
//! fallible form would have returned.

use core::fmt;

/// Reasons a vector operation can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorError {
    /// An index was outside the valid range for the operation.
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// The length of the vector at the time of the call.
        len: usize,
    },
    /// The operation needs at least one element.
    Empty,
    /// No element matched the searched value.
    NotFound,
    /// `slice` bounds do not satisfy `start < len` and `end <= len`.
    InvalidSlice {
        /// Requested start index.
        start: usize,
        /// Requested end index (exclusive).
        end: usize,
        /// The length of the vector at the time of the call.
        len: usize,
    },
    /// `slice` was called with a step of zero.
    ZeroStep,
    /// The default capacity policy cannot work with a floor of zero.
    ZeroInitialCapacity,
    /// The requested capacity does not fit in the address space.
    CapacityOverflow,
    /// A custom capacity policy returned fewer slots than the vector needs.
    PolicyTooSmall {
        /// Capacity returned by the policy.
        target: usize,
        /// Minimum capacity the operation required.
        required: usize,
    },
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index out of bounds: the len is {len} but the index is {index}")
            }
            Self::Empty => f.write_str("vector is empty"),
            Self::NotFound => f.write_str("value not found in vector"),
            Self::InvalidSlice { start, end, len } => {
                write!(f, "invalid slice bounds {start}..{end} for vector of len {len}")
            }
            Self::ZeroStep => f.write_str("slice step must be greater than zero"),
            Self::ZeroInitialCapacity => f.write_str("initial capacity must be greater than zero"),
            Self::CapacityOverflow => f.write_str("capacity overflow"),
            Self::PolicyTooSmall { target, required } => write!(
                f,
                "capacity policy returned {target} but at least {required} slots are required"
            ),
        }
    }
}

impl std::error::Error for VectorError {}

/// Unwraps the result of a `try_*` operation, turning a rejected precondition
/// into a panic at the caller's location.
#[inline]
#[track_caller]
pub(crate) fn enforce<R>(result: Result<R, VectorError>) -> R {
    match result {
        Ok(value) => value,
        Err(err) => violation(err),
    }
}

#[cold]
#[inline(never)]
#[track_caller]
fn violation(err: VectorError) -> ! {
    panic!("{err}");
}
