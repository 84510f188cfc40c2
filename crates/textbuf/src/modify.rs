//! In-place editing: substitution, case folding, trimming and slicing.
use core::cmp::Ordering;

use bstr::ByteSlice;

use crate::{BufferError, TextBuffer, numeric::is_c_space};

/// Count leftmost non-overlapping occurrences of `find`.
fn count_matches(hay: &[u8], find: &[u8]) -> usize {
    let mut from = 0;
    let mut count = 0;
    while let Some(at) = hay[from..].find(find) {
        from += at + find.len();
        count += 1;
    }
    count
}

/// Rewrite `data[read..end]` into `data[0..]`, substituting `with` for every
/// occurrence of `find`. Returns the end of the written region and the number
/// of substitutions.
///
/// The caller guarantees the write cursor never overtakes the read cursor:
/// either `with` is shorter than `find` and `read` starts at 0, or the
/// content was shifted right by exactly the growth the substitutions need.
fn compact(
    data: &mut [u8],
    mut read: usize,
    end: usize,
    find: &[u8],
    with: &[u8],
) -> (usize, usize) {
    let mut write = 0;
    let mut count = 0;
    while let Some(found) = data[read..end].find(find) {
        let at = read + found;
        data.copy_within(read..at, write);
        write += at - read;
        data[write..write + with.len()].copy_from_slice(with);
        write += with.len();
        read = at + find.len();
        count += 1;
    }
    data.copy_within(read..end, write);
    (write + (end - read), count)
}

impl TextBuffer {
    /// Replace every `find` byte with `with`.
    pub fn replace_byte(&mut self, find: u8, with: u8) {
        let len = self.len();
        if let Some(data) = self.storage_mut() {
            for byte in data[..len].iter_mut().filter(|b| **b == find) {
                *byte = with;
            }
        }
    }

    /// Replace every non-overlapping occurrence of `find`, scanning left to
    /// right, with `with`. Returns the number of substitutions.
    ///
    /// Equal-length replacement overwrites in place. A shorter replacement
    /// compacts the content leftward. A longer one sizes the result first,
    /// grows the allocation only if the current capacity is too small, shifts
    /// the content right by the total growth and then compacts it back.
    ///
    /// An empty buffer or an empty `find` is a no-op.
    ///
    /// # Errors
    ///
    /// If a longer replacement needs more room than the buffer can get, the
    /// error is returned and the buffer is left exactly as it was.
    pub fn replace(
        &mut self,
        find: impl AsRef<[u8]>,
        with: impl AsRef<[u8]>,
    ) -> Result<usize, BufferError> {
        let (find, with) = (find.as_ref(), with.as_ref());
        let len = self.len();
        if len == 0 || find.is_empty() {
            return Ok(0);
        }
        match with.len().cmp(&find.len()) {
            Ordering::Equal => Ok(self.replace_in_place(find, with)),
            Ordering::Less => Ok(self.replace_shrinking(find, with)),
            Ordering::Greater => self.replace_growing(find, with),
        }
    }

    fn replace_in_place(&mut self, find: &[u8], with: &[u8]) -> usize {
        let len = self.len();
        let Some(data) = self.storage_mut() else {
            return 0;
        };
        let mut from = 0;
        let mut count = 0;
        while let Some(found) = data[from..len].find(find) {
            let at = from + found;
            data[at..at + with.len()].copy_from_slice(with);
            from = at + with.len();
            count += 1;
        }
        count
    }

    fn replace_shrinking(&mut self, find: &[u8], with: &[u8]) -> usize {
        let len = self.len();
        let Some(data) = self.storage_mut() else {
            return 0;
        };
        let (new_len, count) = compact(data, 0, len, find, with);
        data.truncate(new_len);
        data.push(0);
        count
    }

    fn replace_growing(&mut self, find: &[u8], with: &[u8]) -> Result<usize, BufferError> {
        let len = self.len();
        let count = count_matches(self.as_bytes(), find);
        if count == 0 {
            return Ok(0);
        }
        let new_len = count
            .checked_mul(with.len() - find.len())
            .and_then(|growth| len.checked_add(growth))
            .ok_or(BufferError::Overflow)?;
        let data = self.storage_for(new_len).inspect_err(|err| {
            log::debug!("replace needs {new_len} bytes, leaving buffer unchanged: {err}");
        })?;

        let shift = new_len - len;
        data.resize(new_len + 1, 0);
        data.copy_within(0..len, shift);
        let (written, replaced) = compact(data, shift, new_len, find, with);
        debug_assert_eq!((written, replaced), (new_len, count));
        data[new_len] = 0;
        Ok(count)
    }

    /// Fold ASCII letters to lower case.
    pub fn make_ascii_lowercase(&mut self) {
        let len = self.len();
        if let Some(data) = self.storage_mut() {
            data[..len].make_ascii_lowercase();
        }
    }

    /// Fold ASCII letters to upper case.
    pub fn make_ascii_uppercase(&mut self) {
        let len = self.len();
        if let Some(data) = self.storage_mut() {
            data[..len].make_ascii_uppercase();
        }
    }

    /// Strip leading and trailing ASCII whitespace in place.
    ///
    /// All-whitespace content trims to empty. Capacity is unchanged.
    pub fn trim(&mut self) {
        let bytes = self.as_bytes();
        let start = bytes
            .iter()
            .position(|b| !is_c_space(*b))
            .unwrap_or(bytes.len());
        let end = bytes
            .iter()
            .rposition(|b| !is_c_space(*b))
            .map_or(start, |last| last + 1);
        if start == 0 && end == bytes.len() {
            return;
        }
        if let Some(data) = self.storage_mut() {
            if start > 0 {
                data.copy_within(start..end, 0);
            }
            data.truncate(end - start);
            data.push(0);
        }
    }

    /// A new buffer holding `[left, right)`.
    ///
    /// The bounds are swapped if `left > right` and `right` is clamped to the
    /// length. A `left` past the end yields an empty buffer. `self` is never
    /// modified.
    #[must_use]
    pub fn substring(&self, left: usize, right: usize) -> TextBuffer {
        let (left, right) = if left > right {
            (right, left)
        } else {
            (left, right)
        };
        let bytes = self.as_bytes();
        let right = right.min(bytes.len());
        let slice = bytes.get(left..right).unwrap_or_default();
        TextBuffer::from_bytes_with(slice, self.options())
            .unwrap_or_else(|_| TextBuffer::invalid())
    }

    /// A new buffer holding everything from `left` on.
    #[must_use]
    pub fn substring_from(&self, left: usize) -> TextBuffer {
        self.substring(left, self.len())
    }
}
