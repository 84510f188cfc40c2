#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use textbuf::{BufferOptions, TextBuffer};

#[derive(Arbitrary, Debug)]
enum Op {
    Concat(Vec<u8>),
    ConcatByte(u8),
    ConcatInt(i32),
    Assign(Vec<u8>),
    Reserve(u8),
    Replace(Vec<u8>, Vec<u8>),
    ReplaceByte(u8, u8),
    Trim,
    Lower,
    Upper,
    SetCharAt(u8, u8),
    Substring(u8, u8),
    MoveFromCopy,
    Invalidate,
}

#[derive(Arbitrary, Debug)]
struct Input {
    limit: Option<u8>,
    ops: Vec<Op>,
}

/// The reference model: `None` stands for the invalid state.
type Model = Option<Vec<u8>>;

fn replace_model(hay: &[u8], find: &[u8], with: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < hay.len() {
        if hay[i..].starts_with(find) {
            out.extend_from_slice(with);
            i += find.len();
        } else {
            out.push(hay[i]);
            i += 1;
        }
    }
    out
}

fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Appending either lands whole or, past the limit, invalidates. An empty
/// append never changes anything.
fn apply_append(model: &mut Model, ok: bool, bytes: &[u8], limit: Option<usize>) {
    if bytes.is_empty() {
        return;
    }
    if ok {
        model.get_or_insert_with(Vec::new).extend_from_slice(bytes);
    } else {
        assert!(limit.is_some(), "append failed without a capacity limit");
        *model = None;
    }
}

fuzz_target!(|input: Input| {
    let limit = input.limit.map(usize::from);
    let options = BufferOptions {
        capacity_limit: limit,
    };
    let mut buffer = TextBuffer::with_options(options);
    let mut model: Model = Some(Vec::new());

    for op in input.ops {
        match op {
            Op::Concat(bytes) => {
                let ok = buffer.concat_bytes(&bytes).is_ok();
                apply_append(&mut model, ok, &bytes, limit);
            }
            Op::ConcatByte(byte) => {
                let ok = buffer.concat_byte(byte).is_ok();
                apply_append(&mut model, ok, &[byte], limit);
            }
            Op::ConcatInt(value) => {
                let ok = buffer.concat_int(value).is_ok();
                apply_append(&mut model, ok, value.to_string().as_bytes(), limit);
            }
            Op::Assign(bytes) => {
                let ok = buffer.assign_bytes(&bytes).is_ok();
                assert!(ok || limit.is_some_and(|limit| bytes.len() > limit));
                model = ok.then_some(bytes);
            }
            Op::Reserve(size) => {
                let ok = buffer.reserve(usize::from(size)).is_ok();
                if ok && model.is_none() {
                    model = Some(Vec::new());
                }
            }
            Op::Replace(find, with) => {
                let before = buffer.as_bytes().to_vec();
                match buffer.replace(&find, &with) {
                    Ok(_) => {
                        if let Some(m) = model.as_mut() {
                            if !find.is_empty() && !m.is_empty() {
                                *m = replace_model(m, &find, &with);
                            }
                        }
                    }
                    Err(_) => assert_eq!(buffer.as_bytes(), before.as_slice()),
                }
            }
            Op::ReplaceByte(find, with) => {
                buffer.replace_byte(find, with);
                if let Some(m) = model.as_mut() {
                    m.iter_mut().filter(|b| **b == find).for_each(|b| *b = with);
                }
            }
            Op::Trim => {
                buffer.trim();
                if let Some(m) = model.as_mut() {
                    let start = m.iter().position(|b| !is_c_space(*b)).unwrap_or(m.len());
                    let end = m.iter().rposition(|b| !is_c_space(*b)).map_or(start, |at| at + 1);
                    *m = m[start..end].to_vec();
                }
            }
            Op::Lower => {
                buffer.make_ascii_lowercase();
                if let Some(m) = model.as_mut() {
                    m.make_ascii_lowercase();
                }
            }
            Op::Upper => {
                buffer.make_ascii_uppercase();
                if let Some(m) = model.as_mut() {
                    m.make_ascii_uppercase();
                }
            }
            Op::SetCharAt(index, byte) => {
                buffer.set_char_at(usize::from(index), byte);
                if let Some(slot) = model.as_mut().and_then(|m| m.get_mut(usize::from(index))) {
                    *slot = byte;
                }
            }
            Op::Substring(left, right) => {
                let sub = buffer.substring(usize::from(left), usize::from(right));
                sub.assert_invariants();
                let bytes = model.as_deref().unwrap_or_default();
                let (lo, hi) = (left.min(right), left.max(right));
                let hi = usize::from(hi).min(bytes.len());
                let expected = bytes.get(usize::from(lo)..hi).unwrap_or_default();
                assert_eq!(sub.as_bytes(), expected);
            }
            Op::MoveFromCopy => {
                let mut source = buffer.clone();
                let mut dest = TextBuffer::with_options(options);
                dest.move_from(&mut source);
                assert!(source.is_empty());
                assert_eq!(dest.as_bytes(), buffer.as_bytes());
                dest.assert_invariants();
            }
            Op::Invalidate => {
                buffer.invalidate();
                model = None;
            }
        }

        buffer.assert_invariants();
        assert_eq!(buffer.is_valid(), model.is_some(), "validity diverged");
        assert_eq!(buffer.as_bytes(), model.as_deref().unwrap_or_default());
    }
});
