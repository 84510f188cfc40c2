//! Print a greeting and a number through stream printers, building the
//! greeting with the buffer operations along the way.
//!
//! Run with `RUST_LOG=debug` to see the buffer's diagnostics.

use textbuf::{DEC, HEX, Print, StreamPrinter, TextBuffer};

fn main() {
    env_logger::init();

    let mut out = StreamPrinter::stdout();
    let mut err = StreamPrinter::stderr();

    let mut greeting = TextBuffer::from("hello") + ' ' + "world";
    if greeting.replace("hello", "Hello").is_err() {
        err.println("could not build greeting");
    }
    greeting.set_char_at(6, b'W');
    greeting += '!';

    out.println(&greeting);
    out.print("0x");
    out.println_int(greeting.len(), HEX);
    err.println_int(-1, DEC);

    // Unsupported bases render placeholder text instead of failing.
    out.println(&TextBuffer::from_int(5u8, 3));

    if let Err(e) = out.flush() {
        log::error!("stdout: {e}");
    }
}
