//! The owned byte string at the heart of the crate.
//!
//! A [`TextBuffer`] tracks its logical `capacity` separately from the
//! allocation backing it, so growth is exact and never implicit: capacity only
//! moves when [`TextBuffer::reserve`] (or an operation built on it) asks for
//! more room, and it never shrinks as a side effect of content shrinking.
//!
//! The storage always ends with a NUL terminator at offset `len`, so the
//! content can be handed to anything expecting a C string through
//! [`TextBuffer::as_bytes_with_nul`].
//!
//! # Invalid state
//!
//! A buffer with no allocation is *invalid*. It reports `len() == 0` and
//! `capacity() == 0` and compares equal to an empty buffer, but some
//! operations distinguish it (concatenating an invalid buffer fails, for
//! example). Every operation that cannot allocate what it needs drops the
//! buffer to this state instead of leaving partial content behind.
use alloc::vec::Vec;
use core::{fmt, hash, ops::Index};

use bstr::BStr;

use crate::{BufferError, BufferOptions};

/// A growable, NUL-terminated byte string with value semantics.
pub struct TextBuffer {
    /// Content followed by a single NUL; `None` in the invalid state.
    data: Option<Vec<u8>>,
    /// Longest content the current allocation is sized for.
    capacity: usize,
    options: BufferOptions,
}

impl TextBuffer {
    /// A buffer in the invalid (unallocated) state.
    #[must_use]
    pub const fn invalid() -> Self {
        Self {
            data: None,
            capacity: 0,
            options: BufferOptions {
                capacity_limit: None,
            },
        }
    }

    /// An empty, allocated buffer.
    ///
    /// Falls back to the invalid state if even the terminator cannot be
    /// allocated.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(BufferOptions::default())
    }

    /// An empty, allocated buffer governed by `options`.
    #[must_use]
    pub fn with_options(options: BufferOptions) -> Self {
        let mut buf = Self {
            options,
            ..Self::invalid()
        };
        // Failure leaves the buffer invalid, which is the documented fallback.
        let _ = buf.reserve(0);
        buf
    }

    /// Copy `bytes` into a freshly sized buffer.
    ///
    /// On allocation failure the result is the invalid buffer; use
    /// [`TextBuffer::try_from_bytes`] to observe the error.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::try_from_bytes(bytes).unwrap_or_else(|_| Self::invalid())
    }

    /// Copy `bytes` into a freshly sized buffer, reporting allocation failure.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::AllocationFailed`] if the allocator refuses.
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self, BufferError> {
        Self::from_bytes_with(bytes, BufferOptions::default())
    }

    /// Copy `bytes` into a buffer governed by `options`.
    ///
    /// # Errors
    ///
    /// Fails when the content does not fit the capacity limit or the
    /// allocator refuses.
    pub fn from_bytes_with(bytes: &[u8], options: BufferOptions) -> Result<Self, BufferError> {
        let mut buf = Self {
            options,
            ..Self::invalid()
        };
        buf.assign_bytes(bytes)?;
        Ok(buf)
    }

    /// A one-byte buffer.
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        Self::from_bytes(&[byte])
    }

    /// The options this buffer was built with.
    #[must_use]
    pub fn options(&self) -> BufferOptions {
        self.options
    }

    /// Content length in bytes, excluding the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, |data| data.len() - 1)
    }

    /// Whether the buffer holds no content (valid-empty or invalid).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Longest content the buffer can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the buffer owns an allocation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.data.is_some()
    }

    /// The content, without the terminator. Empty when invalid.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            Some(data) => &data[..data.len() - 1],
            None => &[],
        }
    }

    /// The content including its NUL terminator.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        match &self.data {
            Some(data) => data,
            None => b"\0",
        }
    }

    /// Address of the allocation, or null when invalid.
    ///
    /// Only meaningful for identity comparisons: it changes whenever the
    /// buffer reallocates.
    #[must_use]
    pub fn as_ptr(&self) -> *const u8 {
        self.data.as_ref().map_or(core::ptr::null(), |data| data.as_ptr())
    }

    /// Panic if the representation is inconsistent.
    #[cfg(any(test, feature = "fuzzing"))]
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        match &self.data {
            Some(data) => {
                assert_eq!(data.last(), Some(&0), "content must be terminated");
                assert!(self.len() <= self.capacity, "length exceeds capacity");
                assert!(data.capacity() > self.capacity, "allocation smaller than capacity");
            }
            None => assert_eq!(self.capacity, 0, "invalid buffer reports capacity"),
        }
    }

    /// Ensure `capacity() >= min_capacity`, growing the allocation if needed.
    ///
    /// Never shrinks. Reserving on an invalid buffer allocates it and makes it
    /// a valid empty buffer.
    ///
    /// # Errors
    ///
    /// Reports allocation failure or a breached capacity limit; the buffer is
    /// left as it was.
    pub fn reserve(&mut self, min_capacity: usize) -> Result<(), BufferError> {
        self.storage_for(min_capacity).map(|_| ())
    }

    /// Release the allocation and enter the invalid state.
    pub fn invalidate(&mut self) {
        self.data = None;
        self.capacity = 0;
    }

    /// Replace the content with a copy of `source`, reusing the allocation
    /// when it is large enough.
    ///
    /// Assigning an invalid buffer invalidates `self`.
    ///
    /// # Errors
    ///
    /// On growth failure the buffer is invalidated and the error returned.
    pub fn assign(&mut self, source: &TextBuffer) -> Result<(), BufferError> {
        if source.is_valid() {
            self.assign_bytes(source.as_bytes())
        } else {
            self.invalidate();
            Ok(())
        }
    }

    /// Replace the content with a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// On growth failure the buffer is invalidated and the error returned.
    pub fn assign_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        match self.storage_for(bytes.len()) {
            Ok(data) => {
                data.clear();
                data.extend_from_slice(bytes);
                data.push(0);
                Ok(())
            }
            Err(err) => {
                log::debug!("assignment of {} bytes failed: {err}", bytes.len());
                self.invalidate();
                Err(err)
            }
        }
    }

    /// Move the content of `source` into `self`, leaving `source` empty.
    ///
    /// When `self` already has room for the content it is copied in place and
    /// `source` keeps its (now empty) allocation. Otherwise `self` takes over
    /// the allocation of `source`, which becomes invalid. Moving from an
    /// invalid buffer invalidates `self`.
    ///
    /// An allocation larger than `self`'s capacity limit is not taken over.
    /// The content is copied into a fresh allocation instead, and if even
    /// that exceeds the limit `self` is invalidated and `source` is left
    /// untouched.
    pub fn move_from(&mut self, source: &mut TextBuffer) {
        if !source.is_valid() {
            self.invalidate();
            return;
        }
        if self.capacity >= source.len() {
            if let Some(data) = self.data.as_mut() {
                data.clear();
                data.extend_from_slice(source.as_bytes_with_nul());
                source.truncate_to_empty();
                return;
            }
        }
        if self.options.admits(source.capacity).is_err() {
            if self.assign_bytes(source.as_bytes()).is_ok() {
                source.truncate_to_empty();
            }
            return;
        }
        self.data = source.data.take();
        self.capacity = core::mem::take(&mut source.capacity);
    }

    /// Take the content out, leaving `self` invalid.
    #[must_use]
    pub fn take(&mut self) -> TextBuffer {
        let options = self.options;
        core::mem::replace(
            self,
            Self {
                options,
                ..Self::invalid()
            },
        )
    }

    /// Copy out up to `dst.len() - 1` bytes starting at `index` and terminate
    /// them with NUL. Returns the number of content bytes copied.
    ///
    /// An index at or past the end writes just the terminator.
    pub fn copy_to(&self, dst: &mut [u8], index: usize) -> usize {
        let Some(room) = dst.len().checked_sub(1) else {
            return 0;
        };
        let src = self.as_bytes().get(index..).unwrap_or_default();
        let n = room.min(src.len());
        dst[..n].copy_from_slice(&src[..n]);
        dst[n] = 0;
        n
    }

    /// The byte at `index`, or `0` past the end.
    #[must_use]
    pub fn char_at(&self, index: usize) -> u8 {
        self.as_bytes().get(index).copied().unwrap_or(0)
    }

    /// Overwrite the byte at `index`; out-of-range writes are ignored.
    pub fn set_char_at(&mut self, index: usize, byte: u8) {
        let len = self.len();
        if let Some(slot) = self.data.as_mut().and_then(|data| data[..len].get_mut(index)) {
            *slot = byte;
        }
    }

    /// Ensure capacity for `size` content bytes and hand out the storage.
    pub(crate) fn storage_for(&mut self, size: usize) -> Result<&mut Vec<u8>, BufferError> {
        if self.data.is_none() || self.capacity < size {
            self.grow(size)?;
        }
        self.data.as_mut().ok_or(BufferError::AllocationFailed { requested: size })
    }

    /// Mutable access to content plus terminator, if allocated.
    pub(crate) fn storage_mut(&mut self) -> Option<&mut Vec<u8>> {
        self.data.as_mut()
    }

    /// Reallocate to hold exactly `capacity` content bytes.
    fn grow(&mut self, capacity: usize) -> Result<(), BufferError> {
        self.options.admits(capacity)?;
        let total = capacity.checked_add(1).ok_or(BufferError::Overflow)?;
        let data = self.data.get_or_insert_with(Vec::new);
        let had_terminator = !data.is_empty();
        if let Err(err) = data.try_reserve_exact(total - data.len()) {
            log::debug!("growing buffer to {capacity} bytes failed: {err}");
            if !had_terminator {
                self.data = None;
            }
            return Err(BufferError::AllocationFailed {
                requested: capacity,
            });
        }
        if !had_terminator {
            data.push(0);
        }
        log::trace!("buffer capacity {} -> {capacity}", self.capacity);
        self.capacity = capacity;
        Ok(())
    }

    fn truncate_to_empty(&mut self) {
        if let Some(data) = self.data.as_mut() {
            data.clear();
            data.push(0);
        }
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TextBuffer {
    fn clone(&self) -> Self {
        if !self.is_valid() {
            return Self {
                options: self.options,
                ..Self::invalid()
            };
        }
        Self::from_bytes_with(self.as_bytes(), self.options).unwrap_or_else(|_| Self {
            options: self.options,
            ..Self::invalid()
        })
    }

    fn clone_from(&mut self, source: &Self) {
        // A failed copy leaves `self` invalid, matching plain assignment.
        let _ = self.assign(source);
    }
}

impl From<&[u8]> for TextBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }
}

impl AsRef<[u8]> for TextBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Index<usize> for TextBuffer {
    type Output = u8;

    /// Out-of-range reads yield a `0` byte instead of panicking.
    fn index(&self, index: usize) -> &u8 {
        self.as_bytes().get(index).unwrap_or(&0)
    }
}

impl hash::Hash for TextBuffer {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            fmt::Debug::fmt(BStr::new(self.as_bytes()), f)
        } else {
            f.write_str("<invalid>")
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(BStr::new(self.as_bytes()), f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn new_is_valid_and_terminated() {
        let buf = TextBuffer::new();
        assert!(buf.is_valid());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn invalid_behaves_like_empty() {
        let buf = TextBuffer::invalid();
        assert!(!buf.is_valid());
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), 0);
        assert!(buf.as_ptr().is_null());
        assert_eq!(buf.as_bytes_with_nul(), b"\0");
        assert_eq!(format!("{buf:?}"), "<invalid>");
    }

    #[test]
    fn from_bytes_sizes_capacity_exactly() {
        let buf = TextBuffer::from("hello");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.capacity(), 5);
        assert_eq!(buf.as_bytes_with_nul(), b"hello\0");
    }

    #[test]
    fn from_bytes_keeps_interior_nul() {
        let buf = TextBuffer::from_bytes(b"a\0b");
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.as_bytes(), b"a\0b");
    }

    #[test]
    fn reserve_at_capacity_does_not_reallocate() {
        let mut buf = TextBuffer::from("abc");
        let before = buf.as_ptr();
        buf.reserve(3).unwrap();
        assert_eq!(buf.as_ptr(), before);
        assert_eq!(buf.capacity(), 3);

        buf.reserve(4).unwrap();
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.as_bytes_with_nul(), b"abc\0");
    }

    #[test]
    fn reserve_never_shrinks() {
        let mut buf = TextBuffer::from("abcdef");
        buf.reserve(2).unwrap();
        assert_eq!(buf.capacity(), 6);
    }

    #[test]
    fn reserve_on_invalid_allocates_terminator() {
        let mut buf = TextBuffer::invalid();
        buf.reserve(10).unwrap();
        assert!(buf.is_valid());
        assert_eq!(buf.capacity(), 10);
        assert_eq!(buf.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn reserve_past_limit_leaves_buffer_alone() {
        let mut buf = TextBuffer::from_bytes_with(
            b"abc",
            BufferOptions {
                capacity_limit: Some(4),
            },
        )
        .unwrap();
        assert_eq!(
            buf.reserve(5),
            Err(BufferError::CapacityLimit {
                requested: 5,
                limit: 4
            })
        );
        assert_eq!(buf.as_bytes(), b"abc");
        assert_eq!(buf.capacity(), 3);
    }

    #[test]
    fn reserve_overflow_is_reported() {
        let mut buf = TextBuffer::new();
        assert_eq!(buf.reserve(usize::MAX), Err(BufferError::Overflow));
        assert!(buf.is_valid());
    }

    #[test]
    fn assign_reuses_allocation_when_it_fits() {
        let mut buf = TextBuffer::from("a longer value");
        let before = buf.as_ptr();
        buf.assign(&TextBuffer::from("short")).unwrap();
        assert_eq!(buf.as_bytes(), b"short");
        assert_eq!(buf.as_ptr(), before);
        assert_eq!(buf.capacity(), 14);
    }

    #[test]
    fn assign_invalid_invalidates() {
        let mut buf = TextBuffer::from("value");
        buf.assign(&TextBuffer::invalid()).unwrap();
        assert!(!buf.is_valid());
    }

    #[test]
    fn failed_assignment_invalidates() {
        let mut buf = TextBuffer::with_options(BufferOptions {
            capacity_limit: Some(2),
        });
        assert!(buf.assign_bytes(b"too long").is_err());
        assert!(!buf.is_valid());
    }

    #[test]
    fn move_absorbs_into_existing_capacity() {
        let mut dst = TextBuffer::from("0123456789");
        let dst_ptr = dst.as_ptr();
        let mut src = TextBuffer::from("abc");
        dst.move_from(&mut src);

        assert_eq!(dst.as_bytes(), b"abc");
        assert_eq!(dst.as_ptr(), dst_ptr);
        assert!(src.is_valid());
        assert!(src.is_empty());
        assert_eq!(src.as_bytes_with_nul(), b"\0");
    }

    #[test]
    fn move_transfers_allocation_when_too_small() {
        let mut dst = TextBuffer::from("ab");
        let mut src = TextBuffer::from("a longer string");
        let src_ptr = src.as_ptr();
        dst.move_from(&mut src);

        assert_eq!(dst.as_bytes(), b"a longer string");
        assert_eq!(dst.as_ptr(), src_ptr);
        assert!(!src.is_valid());
        assert_eq!(src.capacity(), 0);
    }

    #[test]
    fn move_respects_destination_limit() {
        let limited = BufferOptions {
            capacity_limit: Some(8),
        };
        let mut src = TextBuffer::from("abc");
        src.reserve(64).unwrap();
        let src_ptr = src.as_ptr();

        let mut dst = TextBuffer::with_options(limited);
        dst.move_from(&mut src);
        assert_eq!(dst.as_bytes(), b"abc");
        assert_ne!(dst.as_ptr(), src_ptr);
        assert!(dst.capacity() <= 8);
        assert!(src.is_valid() && src.is_empty());
        dst.assert_invariants();

        let mut too_long = TextBuffer::from("more than eight");
        let mut dst = TextBuffer::with_options(limited);
        dst.move_from(&mut too_long);
        assert!(!dst.is_valid());
        assert_eq!(too_long.as_bytes(), b"more than eight");
    }

    #[test]
    fn take_leaves_source_invalid() {
        let mut src = TextBuffer::from("moved");
        let dst = src.take();
        assert_eq!(dst.as_bytes(), b"moved");
        assert!(!src.is_valid());
    }

    #[test]
    fn clone_does_not_alias() {
        let original = TextBuffer::from("shared?");
        let mut copy = original.clone();
        copy.set_char_at(0, b'S');
        assert_eq!(original.as_bytes(), b"shared?");
        assert_eq!(copy.as_bytes(), b"Shared?");
        assert_ne!(original.as_ptr(), copy.as_ptr());
    }

    #[test]
    fn char_access_is_bounds_checked() {
        let mut buf = TextBuffer::from("abc");
        assert_eq!(buf.char_at(1), b'b');
        assert_eq!(buf.char_at(3), 0);
        assert_eq!(buf[2], b'c');
        assert_eq!(buf[99], 0);

        buf.set_char_at(1, b'X');
        buf.set_char_at(3, b'!');
        assert_eq!(buf.as_bytes_with_nul(), b"aXc\0");
    }

    #[test]
    fn copy_to_terminates_and_truncates() {
        let buf = TextBuffer::from("hello world");
        let mut out = [0xffu8; 6];
        assert_eq!(buf.copy_to(&mut out, 6), 5);
        assert_eq!(&out, b"world\0");

        let mut small = [0xffu8; 3];
        assert_eq!(buf.copy_to(&mut small, 0), 2);
        assert_eq!(&small, b"he\0");

        let mut past = [0xffu8; 4];
        assert_eq!(buf.copy_to(&mut past, 11), 0);
        assert_eq!(past[0], 0);

        assert_eq!(buf.copy_to(&mut [], 0), 0);
    }
}
