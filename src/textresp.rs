//! A reference decoder for the text-RESP multibulk frames embedded behind
//! the passthrough shim (spec.md §4.4, §6).
//!
//! This module exists only so this crate's own tests can exercise the
//! `0xFFFF` passthrough path end to end. It is not re-exported from the
//! crate's default public surface: a production integration is expected to
//! bring its own text-RESP implementation (the Valkey `parseMultibulk`
//! equivalent spec.md §6 names), not this one. Gated behind the
//! `textresp-ref` feature so it never ships in a default build.

use crate::error::Error;

/// Decodes one text-RESP multibulk frame: `*<n>\r\n` followed by `n`
/// bulk strings (`$<len>\r\n<bytes>\r\n`).
///
/// Returns the decoded bulk strings (borrowed from `buf`) and the number of
/// bytes consumed. This is deliberately minimal — no inline commands, no
/// nested arrays, no null bulk strings — matching only the grammar spec.md
/// §6 gives for the embedded frame, not the full text-RESP protocol.
pub fn decode_multibulk(buf: &[u8]) -> Result<(Vec<&[u8]>, usize), Error> {
    let (count, mut pos) = read_prefixed_uint(buf, 0, b'*')?;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        let (len, next) = read_prefixed_uint(buf, pos, b'$')?;
        pos = next;
        let end = pos
            .checked_add(len)
            .ok_or(Error::TruncatedFrame { have: buf.len() - pos })?;
        if buf.len() < end + 2 {
            return Err(Error::TruncatedFrame { have: buf.len() - pos });
        }
        items.push(&buf[pos..end]);
        pos = end + 2; // skip trailing "\r\n"
    }
    Ok((items, pos))
}

/// Encodes a sequence of bulk strings as a text-RESP multibulk frame.
pub fn encode_multibulk(items: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(format!("*{}\r\n", items.len()).as_bytes());
    for item in items {
        out.extend_from_slice(format!("${}\r\n", item.len()).as_bytes());
        out.extend_from_slice(item);
        out.extend_from_slice(b"\r\n");
    }
    out
}

fn read_prefixed_uint(buf: &[u8], pos: usize, prefix: u8) -> Result<(usize, usize), Error> {
    if buf.get(pos) != Some(&prefix) {
        return Err(Error::TruncatedFrame { have: buf.len().saturating_sub(pos) });
    }
    let rest = &buf[pos + 1..];
    let crlf = rest
        .windows(2)
        .position(|w| w == b"\r\n")
        .ok_or(Error::TruncatedFrame { have: rest.len() })?;
    let digits = std::str::from_utf8(&rest[..crlf]).map_err(|_| Error::TruncatedFrame {
        have: rest.len(),
    })?;
    let n: usize = digits.parse().map_err(|_| Error::TruncatedFrame { have: rest.len() })?;
    Ok((n, pos + 1 + crlf + 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_ping() {
        let (items, consumed) = decode_multibulk(b"*1\r\n$4\r\nPING\r\n").unwrap();
        assert_eq!(items, vec![b"PING".as_ref()]);
        assert_eq!(consumed, b"*1\r\n$4\r\nPING\r\n".len());
    }

    #[test]
    fn encode_then_decode_round_trips() {
        let items: Vec<&[u8]> = vec![b"SET", b"k", b"v"];
        let wire = encode_multibulk(&items);
        let (decoded, consumed) = decode_multibulk(&wire).unwrap();
        assert_eq!(decoded, items);
        assert_eq!(consumed, wire.len());
    }

    #[test]
    fn truncated_frame_is_an_error() {
        assert!(decode_multibulk(b"*1\r\n$4\r\nPI").is_err());
    }
}
