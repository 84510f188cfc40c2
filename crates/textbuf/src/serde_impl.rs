use alloc::vec::Vec;
use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, SeqAccess, Visitor},
};

use crate::TextBuffer;

impl Serialize for TextBuffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bytes(self.as_bytes())
    }
}

struct TextBufferVisitor;

impl TextBufferVisitor {
    fn build<E: de::Error>(bytes: &[u8]) -> Result<TextBuffer, E> {
        TextBuffer::try_from_bytes(bytes).map_err(E::custom)
    }
}

impl<'de> Visitor<'de> for TextBufferVisitor {
    type Value = TextBuffer;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a string or a byte sequence")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<TextBuffer, E> {
        Self::build(v.as_bytes())
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<TextBuffer, E> {
        Self::build(v)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<TextBuffer, A::Error> {
        let mut bytes = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(byte) = seq.next_element::<u8>()? {
            bytes.push(byte);
        }
        Self::build(&bytes)
    }
}

impl<'de> Deserialize<'de> for TextBuffer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_byte_buf(TextBufferVisitor)
    }
}
