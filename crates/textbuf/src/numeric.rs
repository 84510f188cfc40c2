//! Integer rendering and parsing.
//!
//! Rendering goes through a fixed-size stack scratch buffer so no allocation
//! happens until the text is copied into a [`TextBuffer`]. Supported bases are
//! [`OCT`], [`DEC`] and [`HEX`] (lower-case digits). Signed values in octal or
//! hexadecimal render their two's complement bit pattern, so `-1i32` in
//! [`HEX`] is `ffffffff`. Any other base renders the placeholder text
//! `unsupported base` instead of failing.
//!
//! Parsing follows the C locale: leading whitespace is skipped, one optional
//! sign is accepted, and digits are consumed up to the first non-digit.
//! Out-of-range values saturate.
use core::fmt::{self, Write};

use crate::TextBuffer;

/// Base 8.
pub const OCT: u8 = 8;
/// Base 10.
pub const DEC: u8 = 10;
/// Base 16.
pub const HEX: u8 = 16;

pub(crate) const UNSUPPORTED_BASE: &str = "unsupported base";

// u64::MAX in octal is 22 digits, the widest rendering of any supported type.
const SCRATCH_LEN: usize = 24;

mod sealed {
    pub trait Sealed {}
}

/// Integer types a [`TextBuffer`] can render.
pub trait Integer: Copy + fmt::Display + fmt::Octal + fmt::LowerHex + sealed::Sealed {}

macro_rules! impl_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}
            impl Integer for $ty {}
        )*
    };
}

impl_integer!(u8, i16, u16, i32, u32, i64, u64, isize, usize);

/// Fixed-capacity stack buffer for rendered numbers.
pub(crate) struct Scratch {
    buf: [u8; SCRATCH_LEN],
    len: usize,
}

impl Scratch {
    fn new() -> Self {
        Self {
            buf: [0; SCRATCH_LEN],
            len: 0,
        }
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Write for Scratch {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let dst = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Render `value` in `base`, or the placeholder for an unsupported base.
pub(crate) fn render<N: Integer>(value: N, base: u8) -> Scratch {
    let mut scratch = Scratch::new();
    let written = match base {
        OCT => write!(scratch, "{value:o}"),
        DEC => write!(scratch, "{value}"),
        HEX => write!(scratch, "{value:x}"),
        _ => {
            log::debug!("base {base} is not supported, rendering placeholder");
            scratch.write_str(UNSUPPORTED_BASE)
        }
    };
    debug_assert!(written.is_ok(), "scratch too small for {value}");
    scratch
}

/// C `isspace` in the "C" locale.
pub(crate) fn is_c_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Split off leading whitespace and an optional sign.
fn sign_and_digits(bytes: &[u8]) -> (bool, &[u8]) {
    let start = bytes.iter().position(|b| !is_c_space(*b)).unwrap_or(bytes.len());
    let rest = &bytes[start..];
    match rest.first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    }
}

fn digits(bytes: &[u8]) -> impl Iterator<Item = u8> + '_ {
    bytes
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .map(|b| b - b'0')
}

/// Parse a signed decimal prefix, saturating at the `i64` bounds.
pub(crate) fn parse_signed(bytes: &[u8]) -> i64 {
    let (negative, rest) = sign_and_digits(bytes);
    // Accumulate toward the sign so `i64::MIN` is reachable.
    digits(rest).fold(0i64, |acc, d| {
        let acc = acc.saturating_mul(10);
        if negative {
            acc.saturating_sub(i64::from(d))
        } else {
            acc.saturating_add(i64::from(d))
        }
    })
}

/// Parse an unsigned decimal prefix. Overflow saturates at `u64::MAX`; a
/// leading `-` negates the magnitude modulo 2^64, as `strtoul` does.
pub(crate) fn parse_unsigned(bytes: &[u8]) -> u64 {
    let (negative, rest) = sign_and_digits(bytes);
    let mut overflowed = false;
    let magnitude = digits(rest).fold(0u64, |acc, d| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(u64::from(d)))
            .unwrap_or_else(|| {
                overflowed = true;
                u64::MAX
            })
    });
    if negative && !overflowed {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

impl TextBuffer {
    /// Render `value` in `base` ([`OCT`], [`DEC`] or [`HEX`]).
    ///
    /// An unsupported base yields the text `unsupported base`.
    ///
    /// ```rust
    /// use textbuf::{HEX, TextBuffer};
    ///
    /// assert_eq!(TextBuffer::from_int(255u8, HEX), "ff");
    /// assert_eq!(TextBuffer::from_int(-7i64, 10), "-7");
    /// assert_eq!(TextBuffer::from_int(9u32, 3), "unsupported base");
    /// ```
    #[must_use]
    pub fn from_int<N: Integer>(value: N, base: u8) -> Self {
        Self::from_bytes(render(value, base).as_bytes())
    }

    /// Parse a leading signed decimal number; `0` when there is none.
    #[must_use]
    pub fn to_int(&self) -> i64 {
        parse_signed(self.as_bytes())
    }

    /// Parse a leading unsigned decimal number; `0` when there is none.
    #[must_use]
    pub fn to_uint(&self) -> u64 {
        parse_unsigned(self.as_bytes())
    }
}
