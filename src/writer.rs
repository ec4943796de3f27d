//! The Frame Writer: the exact inverse of the Frame Reader (spec.md §4.5).
//!
//! `serialize` walks the same `&'static [Field]` grammar the reader walked
//! to produce a [`ParsedCommand`], pulling arguments, opaque blocks and
//! repetition counts back off in the same order they were pushed — so
//! `serialize(parse(x))` reproduces `x` byte for byte, including fields
//! like `SET`'s flags+expiry block that this crate never interprets.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::dispatch;
use crate::error::Error;
use crate::frame::{
    ParsedCommand, EXTENDED_HEADER_LEN, MODULE_OPCODE, PASSTHROUGH_OPCODE,
};
use crate::grammar::{Field, Grammar};
use crate::module;

struct Cursors<'a, 'b> {
    args: std::slice::Iter<'b, &'a [u8]>,
    opaque: std::slice::Iter<'b, &'a [u8]>,
    repeats: std::slice::Iter<'b, u16>,
}

fn write_field<'a, W: Write>(
    field: &Field,
    cur: &mut Cursors<'a, '_>,
    w: &mut W,
) -> Result<(), Error> {
    match field {
        Field::ShortString => {
            let a = cur.args.next().ok_or(Error::InsufficientCapacity)?;
            w.write_u16::<BigEndian>((*a).len() as u16)?;
            w.write_all(a)?;
        }
        Field::LongString => {
            let a = cur.args.next().ok_or(Error::InsufficientCapacity)?;
            w.write_u32::<BigEndian>((*a).len() as u32)?;
            w.write_all(a)?;
        }
        Field::Fixed(_) => {
            let a = cur.opaque.next().ok_or(Error::InsufficientCapacity)?;
            w.write_all(a)?;
        }
        Field::CountThen(sub) => {
            let count = *cur.repeats.next().ok_or(Error::InsufficientCapacity)?;
            w.write_u16::<BigEndian>(count)?;
            for _ in 0..count {
                for f in *sub {
                    write_field(f, cur, w)?;
                }
            }
        }
        Field::OptionalTail(sub) => {
            // Presence was decided by the reader from the remaining byte
            // count; here it is decided by whether there is anything left
            // to write for the first field of `sub`. Every grammar using
            // `OptionalTail` in this crate starts its tail with a `Fixed`
            // field, so an empty `opaque` cursor means "absent".
            if cur.opaque.len() > 0 || cur.args.len() > 0 {
                for f in *sub {
                    write_field(f, cur, w)?;
                }
            }
        }
    }
    Ok(())
}

fn grammar_for(pc: &ParsedCommand<'_>) -> Option<Grammar> {
    if let (Some(module_id), Some(command_id)) = (pc.module_id, pc.command_id) {
        return Some(match module::dispatch(module_id, command_id) {
            module::ModuleDispatch::Known(e) => e.grammar,
            module::ModuleDispatch::Fallback => module::FALLBACK_GRAMMAR,
        });
    }
    dispatch::lookup(pc.opcode).map(|e| e.grammar)
}

/// Serialises `pc` into `w`, reproducing its original wire bytes exactly.
///
/// Passthrough commands (`opcode == PASSTHROUGH_OPCODE`) are written as
/// their header plus the verbatim `resp_data` slice; everything else is
/// written as its header plus a grammar-driven payload.
pub fn serialize<W: Write>(pc: &ParsedCommand<'_>, w: &mut W) -> Result<(), Error> {
    if pc.opcode == PASSTHROUGH_OPCODE {
        w.write_u16::<BigEndian>(pc.opcode)?;
        w.write_u16::<BigEndian>(pc.mux_id)?;
        let data = pc.resp_data.unwrap_or(&[]);
        w.write_u32::<BigEndian>(data.len() as u32)?;
        w.write_all(data)?;
        return Ok(());
    }

    let grammar = grammar_for(pc).ok_or(Error::UnknownOpcode(pc.opcode))?;

    if pc.opcode == MODULE_OPCODE {
        let module_id = pc.module_id.unwrap_or_default();
        let command_id = pc.command_id.unwrap_or_default();
        w.write_u16::<BigEndian>(pc.opcode)?;
        w.write_u16::<BigEndian>(pc.mux_id)?;
        let subcmd = ((module_id as u32) << 16) | command_id as u32;
        w.write_u32::<BigEndian>(subcmd)?;
    } else {
        w.write_u16::<BigEndian>(pc.opcode)?;
        w.write_u16::<BigEndian>(pc.mux_id)?;
    }

    let mut cur = Cursors {
        args: pc.args.iter(),
        opaque: pc.opaque.iter(),
        repeats: pc.repeats.iter(),
    };
    for f in grammar.0 {
        write_field(f, &mut cur, w)?;
    }
    Ok(())
}

/// The exact on-wire length `serialize` will produce for `pc`.
pub fn serialized_len(pc: &ParsedCommand<'_>) -> usize {
    if pc.opcode == PASSTHROUGH_OPCODE {
        return EXTENDED_HEADER_LEN + pc.resp_data.map_or(0, |d| d.len());
    }

    let header_len = if pc.opcode == MODULE_OPCODE {
        EXTENDED_HEADER_LEN
    } else {
        crate::frame::CORE_HEADER_LEN
    };

    let mut args = pc.args.iter();
    let mut opaque = pc.opaque.iter();
    let mut repeats = pc.repeats.iter();

    fn field_len<'a>(
        field: &Field,
        args: &mut std::slice::Iter<'a, &'a [u8]>,
        opaque: &mut std::slice::Iter<'a, &'a [u8]>,
        repeats: &mut std::slice::Iter<'a, u16>,
    ) -> usize {
        match field {
            Field::ShortString => 2 + args.next().map_or(0, |a| a.len()),
            Field::LongString => 4 + args.next().map_or(0, |a| a.len()),
            Field::Fixed(n) => {
                opaque.next();
                *n as usize
            }
            Field::CountThen(sub) => {
                let count = repeats.next().copied().unwrap_or(0);
                let mut total = 2;
                for _ in 0..count {
                    for f in *sub {
                        total += field_len(f, args, opaque, repeats);
                    }
                }
                total
            }
            Field::OptionalTail(sub) => {
                if opaque.len() > 0 || args.len() > 0 {
                    sub.iter().map(|f| field_len(f, args, opaque, repeats)).sum()
                } else {
                    0
                }
            }
        }
    }

    let grammar = match grammar_for(pc) {
        Some(g) => g,
        None => return header_len,
    };

    let payload: usize = grammar
        .0
        .iter()
        .map(|f| field_len(f, &mut args, &mut opaque, &mut repeats))
        .sum();
    header_len + payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::ReaderLimits;
    use crate::reader::{parse_one, Outcome};

    fn round_trip(buf: &[u8]) {
        match parse_one(buf, 0, &ReaderLimits::default()) {
            Outcome::Complete(pc, off) => {
                assert_eq!(off, buf.len());
                let mut out = Vec::new();
                serialize(&pc, &mut out).expect("serialise");
                assert_eq!(out, buf, "round trip mismatch");
                assert_eq!(serialized_len(&pc), buf.len());
            }
            other => panic!("fixture failed to parse: {:?}", other),
        }
    }

    fn short_string(s: &str) -> Vec<u8> {
        let mut v = (s.len() as u16).to_be_bytes().to_vec();
        v.extend_from_slice(s.as_bytes());
        v
    }

    fn long_string(s: &str) -> Vec<u8> {
        let mut v = (s.len() as u32).to_be_bytes().to_vec();
        v.extend_from_slice(s.as_bytes());
        v
    }

    #[test]
    fn get_round_trips() {
        let mut buf = vec![0x00, 0x00, 0x00, 0x2a];
        buf.extend_from_slice(&short_string("user:1000"));
        round_trip(&buf);
    }

    #[test]
    fn set_flags_round_trip_bit_exact() {
        let mut buf = vec![0x00, 0x01, 0x00, 0x07];
        buf.extend_from_slice(&short_string("session:abc"));
        buf.extend_from_slice(&long_string("payload"));
        buf.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef, 0x01, 0x02, 0x03, 0x04, 0x99]);
        round_trip(&buf);
    }

    #[test]
    fn mget_round_trips() {
        let mut buf = vec![0x00, 0x0c, 0x00, 0x01];
        buf.extend_from_slice(&3u16.to_be_bytes());
        buf.extend_from_slice(&short_string("a"));
        buf.extend_from_slice(&short_string("bb"));
        buf.extend_from_slice(&short_string("ccc"));
        round_trip(&buf);
    }

    #[test]
    fn json_set_round_trips() {
        let mut buf = vec![0xf0, 0x00, 0x00, 0x09];
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&short_string("profile"));
        buf.extend_from_slice(&short_string(".name"));
        buf.extend_from_slice(&long_string("\"John Doe\""));
        buf.push(0x01);
        round_trip(&buf);
    }

    #[test]
    fn passthrough_round_trips() {
        let resp = b"*1\r\n$4\r\nPING\r\n";
        let mut buf = vec![0xff, 0xff, 0x00, 0x05];
        buf.extend_from_slice(&(resp.len() as u32).to_be_bytes());
        buf.extend_from_slice(resp);
        round_trip(&buf);
    }

    #[test]
    fn zadd_round_trips_with_interleaved_scores_and_members() {
        let mut buf = vec![0x00, 0xc0, 0x00, 0x00];
        buf.extend_from_slice(&short_string("leaderboard"));
        buf.push(0x00);
        buf.extend_from_slice(&2u16.to_be_bytes());
        buf.extend_from_slice(&1.5f64.to_be_bytes());
        buf.extend_from_slice(&short_string("alice"));
        buf.extend_from_slice(&2.5f64.to_be_bytes());
        buf.extend_from_slice(&short_string("bob"));
        round_trip(&buf);
    }

    #[test]
    fn spop_round_trips_with_and_without_optional_tail() {
        let mut without = vec![0x00, 0x86, 0x00, 0x00];
        without.extend_from_slice(&short_string("myset"));
        round_trip(&without);

        let mut with = vec![0x00, 0x86, 0x00, 0x00];
        with.extend_from_slice(&short_string("myset"));
        with.extend_from_slice(&7u64.to_be_bytes());
        round_trip(&with);
    }

    #[test]
    fn unknown_module_fallback_round_trips() {
        let mut buf = vec![0xf0, 0x00, 0x00, 0x00];
        buf.extend_from_slice(&((77u32) << 16 | 3).to_be_bytes());
        buf.extend_from_slice(&short_string("somekey"));
        round_trip(&buf);
    }

    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_get_round_trips(key in "[a-zA-Z0-9:_-]{0,200}", mux_id: u16) {
            let mut buf = vec![0x00, 0x00];
            buf.extend_from_slice(&mux_id.to_be_bytes());
            buf.extend_from_slice(&short_string(&key));
            round_trip(&buf);
        }

        #[test]
        fn prop_mget_round_trips(keys in prop::collection::vec("[a-zA-Z0-9:_-]{0,40}", 0..20)) {
            let mut buf = vec![0x00, 0x0c, 0x00, 0x00];
            buf.extend_from_slice(&(keys.len() as u16).to_be_bytes());
            for k in &keys {
                buf.extend_from_slice(&short_string(k));
            }
            round_trip(&buf);
        }

        #[test]
        fn prop_set_preserves_opaque_flags(
            key in "[a-zA-Z0-9:_-]{1,40}",
            value in prop::collection::vec(any::<u8>(), 0..64),
            flags in prop::collection::vec(any::<u8>(), 9..10),
        ) {
            let mut buf = vec![0x00, 0x01, 0x00, 0x00];
            buf.extend_from_slice(&short_string(&key));
            buf.extend_from_slice(&(value.len() as u32).to_be_bytes());
            buf.extend_from_slice(&value);
            buf.extend_from_slice(&flags);
            round_trip(&buf);
        }
    }
}
