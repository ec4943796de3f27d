//! The Frame Reader: stateless, incremental parsing of one frame at a time
//! (spec.md §4.1).
//!
//! `parse_one` never mutates its input and never blocks waiting for more
//! bytes — a short buffer yields [`Outcome::Incomplete`] and the caller is
//! expected to read more and retry from the same `offset`. This mirrors the
//! teacher crate's `RpcMessage::from_cursor`, generalised from a single
//! owning `Cursor` to an explicit `(buffer, offset)` pair so a caller can
//! hold the buffer across retries without the parser owning it.

use byteorder::{BigEndian, ByteOrder};

use crate::argument::{ArgVec, Argument, OpaqueVec, RepeatVec};
use crate::dispatch;
use crate::error::Error;
use crate::frame::{
    ParsedCommand, EXTENDED_HEADER_LEN, MODULE_OPCODE, PASSTHROUGH_OPCODE, RESERVED_RANGE_END,
    RESERVED_RANGE_START,
};
use crate::grammar::Field;
use crate::limits::ReaderLimits;
use crate::module;

/// The result of attempting to parse one frame starting at a given offset.
#[derive(Debug)]
pub enum Outcome<'a> {
    /// A full frame was parsed. The `usize` is the offset of the first
    /// byte after this frame — the offset to pass on the next call.
    Complete(ParsedCommand<'a>, usize),

    /// Not enough bytes are available yet to determine whether the frame
    /// at `offset` is even well-formed. Not an error (spec.md §7): the
    /// caller should read more bytes and call `parse_one` again at the
    /// same `offset`.
    Incomplete,

    /// The frame at `offset` is malformed in a way more bytes cannot fix.
    Error(Error),
}

/// Signals why a partial parse stopped, distinguishing "need more bytes"
/// from "this frame is invalid" without forcing every helper to match on
/// `Outcome` directly.
enum Stop {
    Incomplete,
    Err(Error),
}

impl From<Error> for Stop {
    fn from(e: Error) -> Self {
        Stop::Err(e)
    }
}

type PResult<T> = Result<T, Stop>;

fn need(buf: &[u8], pos: usize, len: usize) -> PResult<()> {
    if buf.len() < pos.saturating_add(len) {
        Err(Stop::Incomplete)
    } else {
        Ok(())
    }
}

fn read_u16_at(buf: &[u8], pos: usize) -> PResult<u16> {
    need(buf, pos, 2)?;
    Ok(BigEndian::read_u16(&buf[pos..pos + 2]))
}

fn read_u32_at(buf: &[u8], pos: usize) -> PResult<u32> {
    need(buf, pos, 4)?;
    Ok(BigEndian::read_u32(&buf[pos..pos + 4]))
}

/// Parses a single [`Field`] at `pos`, pushing its value into `args` or
/// `opaque` as appropriate, and returns the position just past it.
fn parse_field<'a>(
    buf: &'a [u8],
    pos: usize,
    field: &'static Field,
    limits: &ReaderLimits,
    args: &mut ArgVec<'a>,
    opaque: &mut OpaqueVec<'a>,
    repeats: &mut RepeatVec,
) -> PResult<usize> {
    match field {
        Field::ShortString => {
            let len = read_u16_at(buf, pos)? as usize;
            let start = pos + 2;
            need(buf, start, len)?;
            args.push(&buf[start..start + len]);
            Ok(start + len)
        }
        Field::LongString => {
            let len = read_u32_at(buf, pos)? as u64;
            let max = limits.max_long_string() as u64;
            if len > max {
                return Err(Error::OversizedString { len, max }.into());
            }
            let len = len as usize;
            let start = pos + 4;
            need(buf, start, len)?;
            args.push(&buf[start..start + len]);
            Ok(start + len)
        }
        Field::Fixed(n) => {
            let n = *n as usize;
            need(buf, pos, n)?;
            opaque.push(&buf[pos..pos + n]);
            Ok(pos + n)
        }
        Field::CountThen(sub) => {
            let count = read_u16_at(buf, pos)? as usize;
            let mut pos = pos + 2;
            if let Some(max) = limits.max_args() {
                if count > max {
                    return Err(Error::TooManyArgs { got: count, max }.into());
                }
            }
            repeats.push(count as u16);
            for _ in 0..count {
                for f in *sub {
                    pos = parse_field(buf, pos, f, limits, args, opaque, repeats)?;
                }
            }
            Ok(pos)
        }
        Field::OptionalTail(sub) => {
            let min: u32 = sub.iter().map(Field::min_size).sum();
            if (buf.len() - pos) as u64 >= min as u64 {
                let mut pos = pos;
                for f in *sub {
                    pos = parse_field(buf, pos, f, limits, args, opaque, repeats)?;
                }
                Ok(pos)
            } else {
                Ok(pos)
            }
        }
    }
}

fn parse_grammar<'a>(
    buf: &'a [u8],
    mut pos: usize,
    fields: &'static [Field],
    limits: &ReaderLimits,
    args: &mut ArgVec<'a>,
    opaque: &mut OpaqueVec<'a>,
    repeats: &mut RepeatVec,
) -> PResult<usize> {
    for f in fields {
        pos = parse_field(buf, pos, f, limits, args, opaque, repeats)?;
    }
    Ok(pos)
}

fn try_parse_one<'a>(
    buf: &'a [u8],
    offset: usize,
    limits: &ReaderLimits,
) -> PResult<(ParsedCommand<'a>, usize)> {
    let opcode = read_u16_at(buf, offset)?;
    let mux_id = read_u16_at(buf, offset + 2)?;

    match opcode {
        MODULE_OPCODE => {
            let subcmd = read_u32_at(buf, offset + 4)?;
            let module_id = (subcmd >> 16) as u16;
            let command_id = (subcmd & 0xFFFF) as u16;
            let grammar = match module::dispatch(module_id, command_id) {
                module::ModuleDispatch::Known(e) => e.grammar,
                module::ModuleDispatch::Fallback => module::FALLBACK_GRAMMAR,
            };
            let mut args = ArgVec::new();
            let mut opaque = OpaqueVec::new();
            let mut repeats = RepeatVec::new();
            let pos = parse_grammar(
                buf,
                offset + EXTENDED_HEADER_LEN,
                grammar.0,
                limits,
                &mut args,
                &mut opaque,
                &mut repeats,
            )?;
            Ok((
                ParsedCommand::module(mux_id, module_id, command_id, args, opaque, repeats),
                pos,
            ))
        }
        PASSTHROUGH_OPCODE => {
            let resp_length = read_u32_at(buf, offset + 4)? as usize;
            let body_start = offset + EXTENDED_HEADER_LEN;
            need(buf, body_start, resp_length)?;
            let data: Argument<'a> = &buf[body_start..body_start + resp_length];
            Ok((ParsedCommand::passthrough(mux_id, data), body_start + resp_length))
        }
        RESERVED_RANGE_START..=RESERVED_RANGE_END => {
            Err(Error::UnknownOpcode(opcode).into())
        }
        _ => {
            let entry = dispatch::lookup(opcode).ok_or(Stop::Err(Error::UnknownOpcode(opcode)))?;
            let mut args = ArgVec::new();
            let mut opaque = OpaqueVec::new();
            let mut repeats = RepeatVec::new();
            let pos = parse_grammar(
                buf,
                offset + 4,
                entry.grammar.0,
                limits,
                &mut args,
                &mut opaque,
                &mut repeats,
            )?;
            Ok((ParsedCommand::core(opcode, mux_id, args, opaque, repeats), pos))
        }
    }
}

/// Attempts to parse exactly one frame from `buf` starting at `offset`.
///
/// Never advances past `offset` itself and never copies: every argument
/// borrowed into the returned [`ParsedCommand`] is a slice of `buf`. On
/// [`Outcome::Incomplete`], `buf[offset..]` is unchanged and safe to retry
/// once more bytes are appended.
pub fn parse_one<'a>(buf: &'a [u8], offset: usize, limits: &ReaderLimits) -> Outcome<'a> {
    match try_parse_one(buf, offset, limits) {
        Ok((pc, new_offset)) => Outcome::Complete(pc, new_offset),
        Err(Stop::Incomplete) => Outcome::Incomplete,
        Err(Stop::Err(e)) => Outcome::Error(e),
    }
}
