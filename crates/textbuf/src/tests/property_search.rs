use quickcheck::QuickCheck;

use super::{
    arbitrary::{Needle, Text},
    quickcheck_tests,
};
use crate::TextBuffer;

fn naive_find(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    (from..hay.len()).find(|&at| hay[at..].starts_with(needle))
}

fn naive_rfind(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    (0..=from.min(hay.len().checked_sub(1)?))
        .rev()
        .find(|&at| hay[at..].starts_with(needle))
}

/// Property: forward and backward searches agree with a position-by-position
/// scan.
#[test]
fn search_matches_naive_scan_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: Text, needle: Needle, from: u8) -> bool {
        let buffer = TextBuffer::from_bytes(&text.0);
        let (hay, needle, from) = (&text.0, &needle.0, usize::from(from % 32));
        buffer.index_of_from(needle, from) == naive_find(hay, needle, from)
            && buffer.last_index_of_from(needle, from) == naive_rfind(hay, needle, from)
            && buffer.index_of(needle) == naive_find(hay, needle, 0)
            && buffer.last_index_of(needle) == naive_rfind(hay, needle, usize::MAX)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Text, Needle, u8) -> bool);
}

/// Property: single-byte searches agree with the slice iterators.
#[test]
fn byte_search_matches_iterators_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(text: Text, byte: Needle, from: u8) -> bool {
        let buffer = TextBuffer::from_bytes(&text.0);
        let (hay, byte, from) = (&text.0, byte.0[0], usize::from(from % 32));
        let forward = hay
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, b)| **b == byte)
            .map(|(at, _)| at);
        let backward = if from < hay.len() {
            hay[..=from].iter().rposition(|b| *b == byte)
        } else {
            None
        };
        buffer.index_of_byte_from(byte, from) == forward
            && buffer.last_index_of_byte_from(byte, from) == backward
            && buffer.last_index_of_byte(byte) == hay.iter().rposition(|b| *b == byte)
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Text, Needle, u8) -> bool);
}
