#![expect(missing_docs)]

use core::fmt::Write;

use insta::assert_snapshot;
use textbuf::{DEC, HEX, Integer, OCT, TextBuffer};

fn row<N: Integer>(out: &mut String, name: &str, value: N) {
    let [oct, dec, hex] = [OCT, DEC, HEX].map(|base| TextBuffer::from_int(value, base));
    writeln!(out, "{name}: oct={oct} dec={dec} hex={hex}").unwrap();
}

#[test]
fn rendering_table() {
    let mut out = String::new();
    row(&mut out, "255u8", 255u8);
    row(&mut out, "-1i16", -1i16);
    row(&mut out, "i16::MIN", i16::MIN);
    row(&mut out, "u16::MAX", u16::MAX);
    row(&mut out, "-42i32", -42i32);
    row(&mut out, "0xdead_beef", 0xdead_beef_u32);
    row(&mut out, "i64::MIN", i64::MIN);
    row(&mut out, "u64::MAX", u64::MAX);

    assert_snapshot!(out, @r"
    255u8: oct=377 dec=255 hex=ff
    -1i16: oct=177777 dec=-1 hex=ffff
    i16::MIN: oct=100000 dec=-32768 hex=8000
    u16::MAX: oct=177777 dec=65535 hex=ffff
    -42i32: oct=37777777726 dec=-42 hex=ffffffd6
    0xdead_beef: oct=33653337357 dec=3735928559 hex=deadbeef
    i64::MIN: oct=1000000000000000000000 dec=-9223372036854775808 hex=8000000000000000
    u64::MAX: oct=1777777777777777777777 dec=18446744073709551615 hex=ffffffffffffffff
    ");
}

#[test]
fn unsupported_bases() {
    let out: Vec<String> = [0u8, 1, 2, 7, 36]
        .iter()
        .map(|&base| format!("{base} -> {}", TextBuffer::from_int(123u32, base)))
        .collect();

    assert_snapshot!(out.join("\n"), @r"
    0 -> unsupported base
    1 -> unsupported base
    2 -> unsupported base
    7 -> unsupported base
    36 -> unsupported base
    ");
}

#[test]
fn parse_table() {
    let inputs = [
        "123abc",
        "   -42",
        "\t+7 apples",
        "0x1f",
        "",
        "-",
        "99999999999999999999",
        "-18446744073709551615",
    ];
    let mut out = String::new();
    for input in inputs {
        let buffer = TextBuffer::from(input);
        writeln!(
            out,
            "{:?}: int={} uint={}",
            input,
            buffer.to_int(),
            buffer.to_uint()
        )
        .unwrap();
    }

    assert_snapshot!(out, @r#"
    "123abc": int=123 uint=123
    "   -42": int=-42 uint=18446744073709551574
    "\t+7 apples": int=7 uint=7
    "0x1f": int=0 uint=0
    "": int=0 uint=0
    "-": int=0 uint=0
    "99999999999999999999": int=9223372036854775807 uint=18446744073709551615
    "-18446744073709551615": int=-9223372036854775808 uint=1
    "#);
}
