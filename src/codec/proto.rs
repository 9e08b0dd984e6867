//! Structural sniffing of the protobuf wire format.
//!
//! There is no schema, so the best this can do is check that the buffer
//! splits cleanly into tag/payload records and print what it found, in the
//! same shape as `protoc --decode_raw`.

use tracing::debug;

use super::Detector;
use crate::types::Encoding;

const MAX_FIELD_NUMBER: u64 = (1 << 29) - 1;
const MAX_VARINT_LEN: usize = 10;
const MAX_DEPTH: usize = 32;

const WIRE_VARINT: u64 = 0;
const WIRE_FIXED64: u64 = 1;
const WIRE_LEN: u64 = 2;
const WIRE_FIXED32: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Value<'a> {
    Varint(u64),
    Fixed64(u64),
    Bytes(&'a [u8]),
    Fixed32(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field<'a> {
    number: u64,
    value: Value<'a>,
}

fn read_varint(buf: &[u8], pos: &mut usize) -> Option<u64> {
    let mut result: u64 = 0;
    for i in 0..MAX_VARINT_LEN {
        let byte = *buf.get(*pos)?;
        *pos += 1;
        // the tenth byte may only carry the top bit of a u64
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return None;
        }
        result |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Some(result);
        }
    }
    None
}

fn take<'a>(buf: &'a [u8], pos: &mut usize, len: usize) -> Option<&'a [u8]> {
    let end = pos.checked_add(len)?;
    let slice = buf.get(*pos..end)?;
    *pos = end;
    Some(slice)
}

/// Splits `buf` into records, failing unless every byte is accounted for.
fn parse_message(buf: &[u8]) -> Option<Vec<Field<'_>>> {
    if buf.is_empty() {
        return None;
    }

    let mut fields = Vec::new();
    let mut pos = 0;
    while pos < buf.len() {
        let tag = read_varint(buf, &mut pos)?;
        let number = tag >> 3;
        if number == 0 || number > MAX_FIELD_NUMBER {
            return None;
        }

        let value = match tag & 0x7 {
            WIRE_VARINT => Value::Varint(read_varint(buf, &mut pos)?),
            WIRE_FIXED64 => {
                let raw = take(buf, &mut pos, 8)?;
                Value::Fixed64(u64::from_le_bytes(raw.try_into().ok()?))
            }
            WIRE_LEN => {
                let len = usize::try_from(read_varint(buf, &mut pos)?).ok()?;
                Value::Bytes(take(buf, &mut pos, len)?)
            }
            WIRE_FIXED32 => {
                let raw = take(buf, &mut pos, 4)?;
                Value::Fixed32(u32::from_le_bytes(raw.try_into().ok()?))
            }
            // groups (3, 4) and the unassigned types
            _ => return None,
        };

        fields.push(Field { number, value });
    }

    Some(fields)
}

fn escape_bytes(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len());
    for &b in data {
        match b {
            b'"' => out.push_str("\\\""),
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            _ => out.push_str(&format!("\\{:03o}", b)),
        }
    }
    out
}

fn render(fields: &[Field<'_>], depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    for field in fields {
        let n = field.number;
        match &field.value {
            Value::Varint(v) => lines.push(format!("{}{}: {}", indent, n, v)),
            Value::Fixed64(v) => lines.push(format!("{}{}: 0x{:016x}", indent, n, v)),
            Value::Fixed32(v) => lines.push(format!("{}{}: 0x{:08x}", indent, n, v)),
            Value::Bytes(data) => {
                let nested = if depth + 1 < MAX_DEPTH {
                    parse_message(data)
                } else {
                    None
                };
                match nested {
                    Some(children) => {
                        lines.push(format!("{}{} {{", indent, n));
                        render(&children, depth + 1, lines);
                        lines.push(format!("{}}}", indent));
                    }
                    None => lines.push(format!("{}{}: \"{}\"", indent, n, escape_bytes(data))),
                }
            }
        }
    }
}

/// Protobuf wire format, rendered as text.
pub struct Proto;

impl Detector for Proto {
    fn encoding(&self) -> Encoding {
        Encoding::Proto
    }

    fn detect(&self, input: &[u8]) -> Option<Vec<u8>> {
        let Some(fields) = parse_message(input) else {
            debug!(len = input.len(), "proto: not a complete message");
            return None;
        };

        let mut lines = Vec::new();
        render(&fields, 0, &mut lines);
        Some(lines.join("\n").into_bytes())
    }
}
