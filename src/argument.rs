//! The borrowed argument type and the small capped collections that carry
//! a parsed command's arguments and opaque fixed-byte blocks.

use smallvec::SmallVec;

/// A single command argument: a slice borrowed from the caller's input
/// buffer. RESPB's zero-copy contract (spec.md §3.2 invariant 4) means no
/// argument is ever copied out of the input during parsing — the lifetime
/// `'a` ties every `Argument` to the buffer it was parsed from.
pub type Argument<'a> = &'a [u8];

/// The implementation's inline capacity for a command's argument list
/// before it spills onto the heap.
///
/// spec.md §9 raises the 64-argument cap as an Open Question: whether it is
/// a hard limit or an implementation detail. This crate resolves it as an
/// implementation detail only — 64 is the number of arguments that fit
/// inline in an [`ArgVec`] without heap allocation, not a limit on how many
/// a command may carry. A [`ReaderLimits`](crate::ReaderLimits) constructed
/// with [`ReaderLimits::strict`](crate::ReaderLimits::strict) can still
/// reject frames past a caller-chosen count.
pub const INLINE_ARGS: usize = 64;

/// The inline capacity for a command's opaque fixed-byte blocks (flags,
/// scores, offsets). Most grammars carry at most a handful of these, so the
/// inline capacity is much smaller than [`INLINE_ARGS`].
pub const INLINE_OPAQUE: usize = 4;

/// A command's ordered list of string-bearing arguments
/// (`short_string`/`long_string` fields), borrowed from the input buffer.
///
/// Spills to the heap past [`INLINE_ARGS`] entries rather than truncating,
/// so `serialize(parse(x)) == x` holds regardless of how many arguments a
/// frame declares.
pub type ArgVec<'a> = SmallVec<[Argument<'a>; INLINE_ARGS]>;

/// A command's ordered list of opaque fixed-byte blocks (`fixed(n)`
/// fields), borrowed from the input buffer in encounter order.
pub type OpaqueVec<'a> = SmallVec<[Argument<'a>; INLINE_OPAQUE]>;

/// The inline capacity for a command's `count_u16_then` repetition counts.
/// Almost every grammar has at most one such field.
pub const INLINE_REPEATS: usize = 2;

/// The repetition count read for each `count_u16_then` field encountered,
/// in grammar-declaration order.
///
/// The wire format only encodes a repetition count as a length prefix, not
/// as a marker carried alongside each argument, so this is the one piece
/// of state the flat [`ArgVec`]/[`OpaqueVec`] lists cannot reconstruct on
/// their own: the Frame Writer replays a grammar in the same order the
/// reader walked it, and needs each count back to know how many arguments
/// or opaque blocks belong to each repetition.
pub type RepeatVec = SmallVec<[u16; INLINE_REPEATS]>;

/// The opcode category a frame's opcode falls into.
///
/// Not part of the wire format; a diagnostic convenience so a caller's own
/// metrics/tracing can group frames without re-deriving the partition from
/// a raw `u16`. See spec.md §3.1 for the base-range partition this mirrors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Category {
    /// `GET`/`SET`/`MGET` and the rest of the string commands.
    Strings,
    /// `LPUSH`/`LRANGE`/`LMOVE`/`BLMOVE` and the rest of the list commands.
    Lists,
    /// `SADD`/`SMEMBERS`/`SINTER` and the rest of the set commands.
    Sets,
    /// `ZADD`/`ZRANGE`/`ZSCORE` and the rest of the sorted-set commands.
    SortedSets,
    /// `HSET`/`HGET`/`HGETALL` and the rest of the hash commands.
    Hashes,
    /// `SETBIT`/`GETBIT`/`BITCOUNT` and the rest of the bitmap commands.
    Bitmaps,
    /// `PFADD`/`PFCOUNT`/`PFMERGE`, the HyperLogLog commands.
    HyperLogLog,
    /// `GEOADD`/`GEOSEARCH`/`GEOSEARCHSTORE`, the geospatial commands.
    Geo,
    /// `XADD`/`XREAD`/`XGROUP` and the rest of the stream commands.
    Streams,
    /// `SUBSCRIBE`/`PUBLISH`/`PSUBSCRIBE`, the pub/sub commands.
    PubSub,
    /// `MULTI`/`EXEC`/`WATCH`, the transaction commands.
    Transactions,
    /// `EVAL`/`EVALSHA`/`FCALL`, the scripting commands.
    Scripting,
    /// `DEL`/`EXPIRE`/`MOVE`/`SORT` and the other key-agnostic-payload
    /// commands that operate on any key regardless of its value type.
    GenericKey,
    /// `PING`/`AUTH`/`HELLO`/`CLIENT`, the connection-management commands.
    Connection,
    /// `CLUSTER` and its subcommands.
    Cluster,
    /// `CONFIG`/`INFO`/`COMMAND` and the other server-admin commands.
    Server,
    /// `0xF000`, dispatched by `(module_id, command_id)` rather than by
    /// base opcode range.
    Module,
    /// `0xFFFF`, the RESP-passthrough shim.
    Passthrough,
    /// An opcode with no assigned grammar.
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argvec_spills_past_inline_capacity() {
        let backing = vec![0u8; INLINE_ARGS + 8];
        let mut args: ArgVec<'_> = ArgVec::new();
        for i in 0..INLINE_ARGS + 8 {
            args.push(&backing[i..i + 1]);
        }
        assert_eq!(args.len(), INLINE_ARGS + 8);
        assert!(args.spilled());
    }
}
