//! A growable, NUL-terminated byte string with value semantics.
//!
//! [`TextBuffer`] owns a heap allocation sized to an explicitly tracked
//! capacity and keeps its content terminated with a NUL byte, so it can be
//! handed to C-string consumers as is. It offers construction from bytes,
//! single bytes and integers (in octal, decimal or hexadecimal),
//! concatenation, comparison, search and in-place editing.
//!
//! Failure is soft. An operation that cannot allocate what it needs reports a
//! [`BufferError`] and drops the buffer to the *invalid* state (no allocation,
//! behaves as empty) rather than leaving partial content; out-of-range reads
//! and writes yield a `0` byte or do nothing; an unsupported numeric base
//! renders placeholder text.
//!
//! ```rust
//! use textbuf::{HEX, TextBuffer};
//!
//! let mut greeting = "hello " + &TextBuffer::from("world");
//! greeting.replace("o", "0").unwrap();
//! assert_eq!(greeting, "hell0 w0rld");
//! assert_eq!(greeting.index_of("w0"), Some(6));
//!
//! let hex = TextBuffer::from_int(48_879u16, HEX);
//! assert_eq!(hex, "beef");
//! ```
//!
//! The buffer is a single-owner value: it is `Send` and `Sync` like any
//! owned byte vector, but mutation requires `&mut`, so sharing one across
//! threads needs external locking.

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
mod compare;
mod concat;
mod error;
mod modify;
mod numeric;
mod options;
mod print;
mod search;
#[cfg(feature = "serde")]
mod serde_impl;

#[cfg(test)]
mod tests;

pub use buffer::TextBuffer;
pub use error::{BufferError, PrintError};
pub use numeric::{DEC, HEX, Integer, OCT};
pub use options::BufferOptions;
pub use print::Print;
#[cfg(feature = "std")]
pub use print::StreamPrinter;
