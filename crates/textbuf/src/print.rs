//! Byte sinks that consume rendered text.
//!
//! [`Print`] needs only two capabilities from an implementor, accepting one
//! byte and flushing, and builds text and number printing on top of them.
//! Lines end with `"\r\n"`.
use crate::{
    PrintError, TextBuffer,
    numeric::{self, Integer},
};

const LINE_END: &[u8] = b"\r\n";

/// A destination for formatted bytes.
///
/// Every printing method returns the number of bytes the sink accepted.
pub trait Print {
    /// Accept one byte. Returns 1 if it was taken, 0 otherwise.
    fn write(&mut self, byte: u8) -> usize;

    /// Push out anything the sink buffers.
    ///
    /// # Errors
    ///
    /// Whatever the underlying sink reports.
    fn flush(&mut self) -> Result<(), PrintError>;

    /// Write each byte in turn, continuing past rejected ones.
    fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        bytes.iter().map(|&byte| self.write(byte)).sum()
    }

    /// Print text or a buffer's content.
    fn print(&mut self, text: impl AsRef<[u8]>) -> usize
    where
        Self: Sized,
    {
        self.write_bytes(text.as_ref())
    }

    /// Print the UTF-8 encoding of `ch`.
    fn print_char(&mut self, ch: char) -> usize {
        let mut utf8 = [0; 4];
        self.write_bytes(ch.encode_utf8(&mut utf8).as_bytes())
    }

    /// Print `value` in `base`, with the same rendering as
    /// [`TextBuffer::from_int`].
    fn print_int<N: Integer>(&mut self, value: N, base: u8) -> usize
    where
        Self: Sized,
    {
        self.write_bytes(numeric::render(value, base).as_bytes())
    }

    /// End the current line.
    fn newline(&mut self) -> usize {
        self.write_bytes(LINE_END)
    }

    /// Print text followed by a line end.
    fn println(&mut self, text: impl AsRef<[u8]>) -> usize
    where
        Self: Sized,
    {
        self.print(text) + self.newline()
    }

    /// Print a number followed by a line end.
    fn println_int<N: Integer>(&mut self, value: N, base: u8) -> usize
    where
        Self: Sized,
    {
        self.print_int(value, base) + self.newline()
    }
}

/// Appending to a buffer. A byte is rejected once growth fails, and flushing
/// reports whether the content survived.
///
/// An invalid buffer accepts nothing, so content lost to a failed append is
/// never masked by bytes printed afterwards.
impl Print for TextBuffer {
    fn write(&mut self, byte: u8) -> usize {
        if !self.is_valid() {
            return 0;
        }
        usize::from(self.concat_byte(byte).is_ok())
    }

    fn flush(&mut self) -> Result<(), PrintError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(PrintError::Rejected)
        }
    }
}

#[cfg(feature = "std")]
pub use stream::StreamPrinter;

#[cfg(feature = "std")]
mod stream {
    use std::io::{self, Write};

    use super::Print;
    use crate::PrintError;

    /// Forwards every byte to an [`io::Write`] stream.
    ///
    /// Construct one per stream at the entry point and pass it where output
    /// is needed:
    ///
    /// ```rust,no_run
    /// use textbuf::{DEC, Print, StreamPrinter, TextBuffer};
    ///
    /// let mut out = StreamPrinter::stdout();
    /// let mut err = StreamPrinter::stderr();
    /// out.println(&TextBuffer::from("Hello World!"));
    /// err.println_int(-1, DEC);
    /// ```
    #[derive(Debug)]
    pub struct StreamPrinter<W> {
        inner: W,
    }

    impl StreamPrinter<io::Stdout> {
        /// A printer on standard output.
        #[must_use]
        pub fn stdout() -> Self {
            Self::new(io::stdout())
        }
    }

    impl StreamPrinter<io::Stderr> {
        /// A printer on standard error.
        #[must_use]
        pub fn stderr() -> Self {
            Self::new(io::stderr())
        }
    }

    impl<W: Write> StreamPrinter<W> {
        /// Wrap `inner`.
        pub fn new(inner: W) -> Self {
            Self { inner }
        }

        /// The wrapped stream.
        pub fn get_ref(&self) -> &W {
            &self.inner
        }

        /// Unwrap, returning the stream.
        pub fn into_inner(self) -> W {
            self.inner
        }
    }

    impl<W: Write> Print for StreamPrinter<W> {
        fn write(&mut self, byte: u8) -> usize {
            match self.inner.write_all(&[byte]) {
                Ok(()) => 1,
                Err(err) => {
                    log::warn!("stream rejected byte: {err}");
                    0
                }
            }
        }

        fn flush(&mut self) -> Result<(), PrintError> {
            self.inner.flush().map_err(PrintError::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferOptions, DEC, HEX};

    #[test]
    fn prints_into_a_buffer() {
        let mut sink = TextBuffer::new();
        assert_eq!(sink.print("n="), 2);
        assert_eq!(sink.print_int(-12i32, DEC), 3);
        assert_eq!(sink.print_char(' '), 1);
        assert_eq!(sink.println_int(255u8, HEX), 4);
        assert_eq!(sink.println(&TextBuffer::from("ok")), 4);
        assert_eq!(sink, "n=-12 ff\r\nok\r\n");
        assert!(sink.flush().is_ok());
    }

    #[test]
    fn rejected_bytes_are_not_counted() {
        let mut sink = TextBuffer::with_options(BufferOptions {
            capacity_limit: Some(2),
        });
        // "c" fails to fit, which also invalidates the buffer.
        assert_eq!(sink.print("abc"), 2);
        assert!(matches!(sink.flush(), Err(PrintError::Rejected)));
    }

    #[test]
    fn bytes_after_a_failure_are_rejected() {
        let mut sink = TextBuffer::with_options(BufferOptions {
            capacity_limit: Some(2),
        });
        assert_eq!(sink.print("abcd"), 2);
        assert!(!sink.is_valid());
        assert_eq!(sink.println_int(7u8, DEC), 0);
        assert!(matches!(sink.flush(), Err(PrintError::Rejected)));
    }

    #[test]
    fn unsupported_base_prints_placeholder() {
        let mut sink = TextBuffer::new();
        sink.print_int(10u32, 7);
        assert_eq!(sink, "unsupported base");
    }

    #[cfg(feature = "std")]
    mod stream {
        use std::{io, vec::Vec};

        use super::super::*;

        struct Broken;

        impl io::Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::other("closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Err(io::Error::other("closed"))
            }
        }

        #[test]
        fn forwards_bytes_to_writer() {
            let mut out = StreamPrinter::new(Vec::new());
            assert_eq!(out.println("Hello World!"), 14);
            assert!(out.flush().is_ok());
            assert_eq!(out.into_inner(), b"Hello World!\r\n");
        }

        #[test]
        fn writer_errors_surface() {
            let mut out = StreamPrinter::new(Broken);
            assert_eq!(out.print("abc"), 0);
            assert!(matches!(out.flush(), Err(PrintError::Flush(_))));
        }
    }
}
