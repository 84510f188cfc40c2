use thiserror::Error;

/// Why a buffer operation could not complete.
///
/// Operations that fail with one of these leave the buffer in a documented
/// state: construction, assignment and concatenation drop the buffer to the
/// invalid (unallocated) state, while [`TextBuffer::replace`] leaves it
/// untouched.
///
/// [`TextBuffer::replace`]: crate::TextBuffer::replace
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// The allocator could not provide `requested` bytes of capacity.
    #[error("allocation of {requested} bytes failed")]
    AllocationFailed {
        /// Content capacity that was asked for.
        requested: usize,
    },
    /// Growth beyond [`BufferOptions::capacity_limit`](crate::BufferOptions).
    #[error("capacity {requested} exceeds the configured limit of {limit}")]
    CapacityLimit {
        /// Content capacity that was asked for.
        requested: usize,
        /// The configured ceiling.
        limit: usize,
    },
    /// The resulting length is not representable.
    #[error("requested length overflows usize")]
    Overflow,
    /// The source operand is in the invalid state.
    #[error("source buffer is invalid")]
    InvalidSource,
}

/// Failure reported by a [`Print`](crate::Print) sink.
#[derive(Error, Debug)]
pub enum PrintError {
    /// The wrapped stream failed.
    #[cfg(feature = "std")]
    #[error("flush failed: {0}")]
    Flush(#[from] std::io::Error),
    /// The sink lost content it had accepted.
    #[error("sink rejected the flush")]
    Rejected,
}
