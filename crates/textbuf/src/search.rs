//! Forward and backward search. A miss, an empty needle and an out-of-range
//! start all report `None`.
use bstr::ByteSlice;

use crate::TextBuffer;

impl TextBuffer {
    /// First position of `byte`.
    #[must_use]
    pub fn index_of_byte(&self, byte: u8) -> Option<usize> {
        self.index_of_byte_from(byte, 0)
    }

    /// First position of `byte` at or after `from`.
    #[must_use]
    pub fn index_of_byte_from(&self, byte: u8, from: usize) -> Option<usize> {
        let hay = self.as_bytes().get(from..).filter(|rest| !rest.is_empty())?;
        hay.find_byte(byte).map(|at| at + from)
    }

    /// First position of `needle`.
    #[must_use]
    pub fn index_of(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        self.index_of_from(needle, 0)
    }

    /// First position of `needle` starting at or after `from`.
    #[must_use]
    pub fn index_of_from(&self, needle: impl AsRef<[u8]>, from: usize) -> Option<usize> {
        let needle = needle.as_ref();
        if needle.is_empty() {
            return None;
        }
        let hay = self.as_bytes().get(from..).filter(|rest| !rest.is_empty())?;
        hay.find(needle).map(|at| at + from)
    }

    /// Last position of `byte`.
    #[must_use]
    pub fn last_index_of_byte(&self, byte: u8) -> Option<usize> {
        self.as_bytes().rfind_byte(byte)
    }

    /// Last position of `byte` at or before `from`.
    #[must_use]
    pub fn last_index_of_byte_from(&self, byte: u8, from: usize) -> Option<usize> {
        let end = from.checked_add(1)?;
        self.as_bytes().get(..end)?.rfind_byte(byte)
    }

    /// Start of the last occurrence of `needle`.
    #[must_use]
    pub fn last_index_of(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        let needle = needle.as_ref();
        let from = self.len().checked_sub(needle.len())?;
        self.last_index_of_from(needle, from)
    }

    /// Start of the last occurrence of `needle` beginning at or before
    /// `from`. A `from` past the end is clamped to the last byte.
    #[must_use]
    pub fn last_index_of_from(
        &self,
        needle: impl AsRef<[u8]>,
        from: usize,
    ) -> Option<usize> {
        let needle = needle.as_ref();
        let hay = self.as_bytes();
        if needle.is_empty() || hay.is_empty() || needle.len() > hay.len() {
            return None;
        }
        let from = from.min(hay.len() - 1);
        // Any match starting at or before `from` ends within this window.
        let end = from.saturating_add(needle.len()).min(hay.len());
        hay[..end].rfind(needle)
    }
}
