use core::{
    fmt,
    ops::{Add, AddAssign},
};

use crate::{
    BufferError, TextBuffer,
    numeric::{self, DEC, Integer},
};

impl TextBuffer {
    /// Append the content of `other`.
    ///
    /// # Errors
    ///
    /// [`BufferError::InvalidSource`] if `other` is invalid (the buffer is
    /// left untouched); otherwise see [`TextBuffer::concat_bytes`].
    pub fn concat(&mut self, other: &TextBuffer) -> Result<(), BufferError> {
        if !other.is_valid() {
            return Err(BufferError::InvalidSource);
        }
        self.concat_bytes(other.as_bytes())
    }

    /// Append a run of bytes. An empty run is a no-op.
    ///
    /// # Errors
    ///
    /// If the buffer cannot grow to hold the result it is invalidated and the
    /// cause returned.
    pub fn concat_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        if bytes.is_empty() {
            return Ok(());
        }
        let grown = self
            .len()
            .checked_add(bytes.len())
            .ok_or(BufferError::Overflow)
            .and_then(|new_len| self.storage_for(new_len));
        match grown {
            Ok(data) => {
                data.pop();
                data.extend_from_slice(bytes);
                data.push(0);
                Ok(())
            }
            Err(err) => {
                log::debug!("concatenating {} bytes failed: {err}", bytes.len());
                self.invalidate();
                Err(err)
            }
        }
    }

    /// Append UTF-8 text.
    ///
    /// # Errors
    ///
    /// See [`TextBuffer::concat_bytes`].
    pub fn concat_str(&mut self, text: &str) -> Result<(), BufferError> {
        self.concat_bytes(text.as_bytes())
    }

    /// Append a single byte.
    ///
    /// # Errors
    ///
    /// See [`TextBuffer::concat_bytes`].
    pub fn concat_byte(&mut self, byte: u8) -> Result<(), BufferError> {
        self.concat_bytes(&[byte])
    }

    /// Append the UTF-8 encoding of `ch`.
    ///
    /// # Errors
    ///
    /// See [`TextBuffer::concat_bytes`].
    pub fn concat_char(&mut self, ch: char) -> Result<(), BufferError> {
        let mut utf8 = [0; 4];
        self.concat_str(ch.encode_utf8(&mut utf8))
    }

    /// Append `value` rendered in decimal.
    ///
    /// # Errors
    ///
    /// See [`TextBuffer::concat_bytes`].
    pub fn concat_int<N: Integer>(&mut self, value: N) -> Result<(), BufferError> {
        self.concat_bytes(numeric::render(value, DEC).as_bytes())
    }

    /// Apply one link of a `+` chain: an invalid buffer stays invalid, and a
    /// failed append invalidates.
    fn chain(mut self, append: impl FnOnce(&mut Self) -> Result<(), BufferError>) -> Self {
        if self.is_valid() && append(&mut self).is_err() {
            self.invalidate();
        }
        self
    }
}

impl Add<&TextBuffer> for TextBuffer {
    type Output = TextBuffer;

    fn add(self, rhs: &TextBuffer) -> TextBuffer {
        self.chain(|buf| buf.concat(rhs))
    }
}

impl Add<TextBuffer> for TextBuffer {
    type Output = TextBuffer;

    fn add(self, rhs: TextBuffer) -> TextBuffer {
        self + &rhs
    }
}

impl Add<&TextBuffer> for &TextBuffer {
    type Output = TextBuffer;

    fn add(self, rhs: &TextBuffer) -> TextBuffer {
        self.clone() + rhs
    }
}

impl Add<&str> for TextBuffer {
    type Output = TextBuffer;

    fn add(self, rhs: &str) -> TextBuffer {
        self.chain(|buf| buf.concat_str(rhs))
    }
}

impl Add<&[u8]> for TextBuffer {
    type Output = TextBuffer;

    fn add(self, rhs: &[u8]) -> TextBuffer {
        self.chain(|buf| buf.concat_bytes(rhs))
    }
}

impl Add<char> for TextBuffer {
    type Output = TextBuffer;

    fn add(self, rhs: char) -> TextBuffer {
        self.chain(|buf| buf.concat_char(rhs))
    }
}

/// `"literal" + &buffer`: start the chain from a bare string.
impl Add<&TextBuffer> for &str {
    type Output = TextBuffer;

    fn add(self, rhs: &TextBuffer) -> TextBuffer {
        TextBuffer::from(self) + rhs
    }
}

impl AddAssign<&TextBuffer> for TextBuffer {
    fn add_assign(&mut self, rhs: &TextBuffer) {
        // Growth failure already invalidated `self`.
        let _ = self.concat(rhs);
    }
}

impl AddAssign<&str> for TextBuffer {
    fn add_assign(&mut self, rhs: &str) {
        let _ = self.concat_str(rhs);
    }
}

impl AddAssign<&[u8]> for TextBuffer {
    fn add_assign(&mut self, rhs: &[u8]) {
        let _ = self.concat_bytes(rhs);
    }
}

impl AddAssign<char> for TextBuffer {
    fn add_assign(&mut self, rhs: char) {
        let _ = self.concat_char(rhs);
    }
}

macro_rules! impl_add_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Add<$ty> for TextBuffer {
                type Output = TextBuffer;

                fn add(self, rhs: $ty) -> TextBuffer {
                    self.chain(|buf| buf.concat_int(rhs))
                }
            }

            impl AddAssign<$ty> for TextBuffer {
                fn add_assign(&mut self, rhs: $ty) {
                    let _ = self.concat_int(rhs);
                }
            }
        )*
    };
}

impl_add_integer!(u8, i16, u16, i32, u32, i64, u64, isize, usize);

/// `write!` appends; a growth failure surfaces as [`fmt::Error`] with the
/// buffer invalidated.
impl fmt::Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.concat_str(s).map_err(|_| fmt::Error)
    }
}
