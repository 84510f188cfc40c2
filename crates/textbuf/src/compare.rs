use core::cmp::Ordering;

use crate::TextBuffer;

impl TextBuffer {
    /// Byte-wise three-way comparison.
    ///
    /// Negative, zero or positive as `self` sorts before, equal to or after
    /// `other`. For valid buffers the magnitude is the difference of the
    /// first mismatching bytes, with a missing byte counting as the
    /// terminator. When either side is invalid, the first byte of whichever
    /// side has content decides (negated if it is `other`), and two
    /// contentless buffers compare equal.
    #[must_use]
    pub fn compare_to(&self, other: &TextBuffer) -> i32 {
        let (lhs, rhs) = (self.as_bytes(), other.as_bytes());
        if !self.is_valid() || !other.is_valid() {
            if let Some(&first) = rhs.first() {
                return -i32::from(first);
            }
            return lhs.first().map_or(0, |&first| i32::from(first));
        }
        if let Some((a, b)) = lhs.iter().zip(rhs).find(|(a, b)| a != b) {
            return i32::from(*a) - i32::from(*b);
        }
        // One is a prefix of the other. An interior NUL still has to sort
        // after the terminator, hence the `max(1)`.
        let common = lhs.len().min(rhs.len());
        match (lhs.get(common), rhs.get(common)) {
            (Some(&a), _) => i32::from(a).max(1),
            (_, Some(&b)) => -i32::from(b).max(1),
            (None, None) => 0,
        }
    }

    /// Same length and same bytes.
    #[must_use]
    pub fn equals(&self, other: &TextBuffer) -> bool {
        self.len() == other.len() && self.compare_to(other) == 0
    }

    /// Equality ignoring ASCII case.
    #[must_use]
    pub fn eq_ignore_case(&self, other: &TextBuffer) -> bool {
        if core::ptr::eq(self, other) {
            return true;
        }
        self.len() == other.len() && self.as_bytes().eq_ignore_ascii_case(other.as_bytes())
    }

    /// Whether the content begins with `prefix`.
    ///
    /// The prefix is taken by its bytes, so an invalid [`TextBuffer`] passed
    /// as `prefix` counts as empty and matches any valid buffer.
    #[must_use]
    pub fn starts_with(&self, prefix: impl AsRef<[u8]>) -> bool {
        self.starts_with_at(prefix, 0)
    }

    /// Whether `prefix` occurs at `offset`.
    ///
    /// False when the prefix would run past the end of the content or the
    /// buffer is invalid. An invalid `prefix` counts as empty.
    #[must_use]
    pub fn starts_with_at(&self, prefix: impl AsRef<[u8]>, offset: usize) -> bool {
        let prefix = prefix.as_ref();
        if !self.is_valid() {
            return false;
        }
        match offset.checked_add(prefix.len()) {
            Some(end) if end <= self.len() => &self.as_bytes()[offset..end] == prefix,
            _ => false,
        }
    }

    /// Whether the content ends with `suffix`. False for an invalid buffer;
    /// an invalid `suffix` counts as empty.
    #[must_use]
    pub fn ends_with(&self, suffix: impl AsRef<[u8]>) -> bool {
        self.is_valid() && self.as_bytes().ends_with(suffix.as_ref())
    }
}

impl PartialEq for TextBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for TextBuffer {}

impl PartialEq<[u8]> for TextBuffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for TextBuffer {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl PartialEq<str> for TextBuffer {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for TextBuffer {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<TextBuffer> for &str {
    fn eq(&self, other: &TextBuffer) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Ord for TextBuffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other).cmp(&0)
    }
}

impl PartialOrd for TextBuffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
