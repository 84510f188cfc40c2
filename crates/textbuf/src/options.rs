/// Configuration for a [`TextBuffer`](crate::TextBuffer).
///
/// # Examples
///
/// ```rust
/// use textbuf::{BufferError, BufferOptions, TextBuffer};
///
/// let mut buf = TextBuffer::with_options(BufferOptions {
///     capacity_limit: Some(8),
/// });
/// assert!(buf.concat_str("12345678").is_ok());
/// assert_eq!(
///     buf.concat_str("9"),
///     Err(BufferError::CapacityLimit { requested: 9, limit: 8 })
/// );
/// // A failed concatenation drops the buffer to the invalid state.
/// assert!(!buf.is_valid());
/// ```
///
/// # Default
///
/// No limit: growth is bounded only by the allocator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferOptions {
    /// Largest capacity, in bytes and excluding the terminator, the buffer
    /// may grow to.
    ///
    /// Growth past the limit fails with
    /// [`BufferError::CapacityLimit`](crate::BufferError::CapacityLimit) and
    /// is handled exactly like an allocation failure. Useful for bounding
    /// memory in constrained environments and for exercising failure paths.
    ///
    /// # Default
    ///
    /// `None`
    pub capacity_limit: Option<usize>,
}

impl BufferOptions {
    /// Check a prospective capacity against the configured limit.
    pub(crate) fn admits(&self, capacity: usize) -> Result<(), crate::BufferError> {
        match self.capacity_limit {
            Some(limit) if capacity > limit => Err(crate::BufferError::CapacityLimit {
                requested: capacity,
                limit,
            }),
            _ => Ok(()),
        }
    }
}
