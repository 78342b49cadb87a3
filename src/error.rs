//! Error kinds surfaced by the array primitives.

use thiserror::Error;

/// Errors returned by the argument-validating entry points.
///
/// The engines themselves are infallible once their inputs are validated. Nothing here is
/// retryable, the operations are deterministic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArrayError {
    /// A required pointer was null.
    #[error("argument `{argument}` must not be null")]
    NullArgument {
        /// Name of the offending argument
        argument: &'static str,
    },

    /// A negative offset/count, or a range that can't be resolved against the buffer.
    #[error("argument `{argument}` is out of range: {message}")]
    InvalidArgumentRange {
        /// Name of the offending argument
        argument: &'static str,
        /// What was wrong with it
        message: String,
    },

    /// `offset + count` exceeds the buffer length, or the addition overflowed.
    #[error("range out of bounds: offset {offset} + count {count} exceeds length {len}")]
    OutOfBounds {
        /// Requested start
        offset: usize,
        /// Requested element count
        count: usize,
        /// Length of the buffer the range was checked against
        len: usize,
    },

    /// The destination of a copy is shorter than the source run.
    #[error("insufficient capacity: {required} elements required, {available} available")]
    InsufficientCapacity {
        /// Elements the copy needs to write
        required: usize,
        /// Elements the destination can hold
        available: usize,
    },

    /// An engine invariant did not hold. Only raised by the self checks, see `self_check!`.
    #[error("internal invariant violated: {invariant}")]
    InternalInvariantViolation {
        /// The invariant that failed
        invariant: &'static str,
    },
}

impl ArrayError {
    pub(crate) fn invalid_range(argument: &'static str, message: impl Into<String>) -> Self {
        ArrayError::InvalidArgumentRange {
            argument,
            message: message.into(),
        }
    }
}

/// Result type for the array primitives.
pub type Result<T> = std::result::Result<T, ArrayError>;
