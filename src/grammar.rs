//! The declarative payload grammar described in spec.md §3.1 and §4.2.
//!
//! A [`Grammar`] is an ordered list of [`Field`] descriptors. The Frame
//! Reader and Frame Writer both walk the same `&'static [Field]` in lock
//! step — the reader pulling bytes off the wire into arguments and opaque
//! blocks, the writer pulling arguments and opaque blocks back onto the
//! wire — so a single declaration drives both directions, per spec.md §9's
//! note that a declarative table is "the idiomatic equivalent" of the
//! reference's `switch` statement.

/// One field in a payload grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// A 2-byte big-endian length prefix followed by that many bytes.
    /// Surfaced to the caller as an [`Argument`](crate::Argument).
    ShortString,

    /// A 4-byte big-endian length prefix followed by that many bytes.
    /// Surfaced to the caller as an [`Argument`](crate::Argument).
    LongString,

    /// `n` opaque bytes with no length prefix of their own (flags, scores,
    /// offsets, timestamps). Not surfaced as an argument: carried in the
    /// parsed command's opaque-bytes slots so the writer can re-emit the
    /// original bytes verbatim (spec.md §3.2 invariant 7, §9).
    Fixed(u32),

    /// A 2-byte big-endian count `N`, followed by `N` repetitions of the
    /// given sub-grammar.
    CountThen(&'static [Field]),

    /// The given sub-grammar is present only if at least its minimum
    /// encoded size remains in the buffer; otherwise it is treated as
    /// absent and no bytes are consumed.
    ///
    /// This is the reference's length-sniffing resolution of spec.md §9's
    /// optional-trailing-field ambiguity (option (c)): it is only safe when
    /// a buffer carries exactly one frame, which is how this crate's own
    /// tests and the upstream benchmark harness use it. See `DESIGN.md`.
    OptionalTail(&'static [Field]),
}

impl Field {
    /// The minimum number of bytes this field occupies on the wire.
    pub(crate) const fn min_size(&self) -> u32 {
        match self {
            Field::ShortString => 2,
            Field::LongString => 4,
            Field::Fixed(n) => *n,
            Field::CountThen(_) => 2,
            Field::OptionalTail(_) => 0,
        }
    }
}

/// A named, ordered payload grammar for one opcode (or a family of opcodes
/// that happen to share a shape).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grammar(pub &'static [Field]);

impl Grammar {
    /// The sum of the minimum sizes of this grammar's top-level fields.
    pub(crate) const fn min_size(&self) -> u32 {
        let mut total = 0u32;
        let mut i = 0;
        while i < self.0.len() {
            total += self.0[i].min_size();
            i += 1;
        }
        total
    }
}

macro_rules! grammar {
    ($name:ident = [$($field:expr),* $(,)?]) => {
        pub static $name: Grammar = Grammar(&[$($field),*]);
    };
}

// No payload at all (`PING`, `MULTI`, `EXEC`, ...).
grammar!(NO_ARGS = []);

// `[key:short_string]` — the single-key family (`GET`, `DECR`, `STRLEN`, ...).
grammar!(SHORT_KEY = [Field::ShortString]);

// `[key:short_string, operand:fixed(8)]` — single-key + int64 operand
// (`INCRBY`, `EXPIRE`, `GETBIT`, ...).
grammar!(SHORT_KEY_INT64 = [Field::ShortString, Field::Fixed(8)]);

// `[key:short_string, value:long_string]` — key-value write with no extra
// fields (`GETSET`, `APPEND`, `SETNX`, ...).
grammar!(KEY_VALUE = [Field::ShortString, Field::LongString]);

// `[key:short_string, value:long_string, flags+expiry:fixed(9)]` — `SET`'s
// family. The 9 opaque bytes must round-trip bit-exact (spec.md §9's `SET`
// note) so they are carried as an opaque block, never interpreted.
grammar!(KEY_VALUE_FLAGS_EXPIRY = [
    Field::ShortString,
    Field::LongString,
    Field::Fixed(9),
]);

// `[count_u16_then [key:short_string]]` — multi-key bulk read (`MGET`,
// `DEL`, `EXISTS`, `SUBSCRIBE`, ...).
grammar!(MULTI_KEY_BULK = [Field::CountThen(&[Field::ShortString])]);

// `[count_u16_then [key:short_string, value:long_string]]` — multi-pair
// write (`MSET`, `MSETNX`).
grammar!(MULTI_PAIR_WRITE = [Field::CountThen(&[
    Field::ShortString,
    Field::LongString,
])]);

// `[key:short_string, count_u16_then [elem:short_string]]` — list/set push
// (`LPUSH`, `SADD`, `HDEL`, ...).
grammar!(KEY_PUSH = [
    Field::ShortString,
    Field::CountThen(&[Field::ShortString]),
]);

// `[key:short_string, count_u16_then [path:short_string]]` — same shape as
// `KEY_PUSH`, named separately for `JSON.GET`'s count-prefixed path list
// (spec.md §4.3) so the dispatch table reads "path list", not "pushed
// elements".
grammar!(KEY_PATH_LIST = [
    Field::ShortString,
    Field::CountThen(&[Field::ShortString]),
]);

// `[key:short_string, count_u16_then [field:short_string, value:long_string]]`
// — hash write (`HSET`, `HMSET`).
grammar!(HASH_WRITE = [
    Field::ShortString,
    Field::CountThen(&[Field::ShortString, Field::LongString]),
]);

// `[key:short_string, start:fixed(8), stop:fixed(8)]` — range ops
// (`GETRANGE`, `LRANGE`, `ZCOUNT`, `BITCOUNT`, ...).
grammar!(RANGE_OP = [
    Field::ShortString,
    Field::Fixed(8),
    Field::Fixed(8),
]);

// `[a:short_string, b:short_string]` — two bare keys, no count prefix
// (`RENAME`, `COPY`, `RPOPLPUSH`, `SMOVE`'s key pair, ...).
grammar!(TWO_KEYS = [Field::ShortString, Field::ShortString]);

// `[a:short_string, b:short_string, c:short_string]` — three bare strings,
// used both for a two-key-plus-item shape (`SMOVE`) and a key-plus-two-items
// shape (`GEODIST`, `XRANGE`'s id pair) since the wire shape is identical.
grammar!(THREE_STRINGS = [
    Field::ShortString,
    Field::ShortString,
    Field::ShortString,
]);

// `[a:short_string, b:short_string, c:short_string, d:short_string]` — four
// bare strings (`LINSERT`'s key/BEFORE-or-AFTER/pivot/element).
grammar!(FOUR_STRINGS = [
    Field::ShortString,
    Field::ShortString,
    Field::ShortString,
    Field::ShortString,
]);

// `[key:short_string, item:short_string]` — key + single item
// (`SISMEMBER`, `ZSCORE`, `HGET`, `BF.ADD`, `BF.EXISTS`, ...).
grammar!(KEY_ITEM = [Field::ShortString, Field::ShortString]);

// `[key:short_string, offset:fixed(8), value:long_string]` — indexed write
// (`LSET`, `LREM`, `RESTORE`).
grammar!(KEY_FIXED8_LONGSTR = [
    Field::ShortString,
    Field::Fixed(8),
    Field::LongString,
]);

// `[key:short_string, offset:fixed(8), member:short_string]` — indexed write
// with a short member (`ZINCRBY`).
grammar!(KEY_FIXED8_SHORTSTR = [
    Field::ShortString,
    Field::Fixed(8),
    Field::ShortString,
]);

// `[key:short_string, field:short_string, operand:fixed(8)]` — hash field
// arithmetic (`HINCRBY`, `HINCRBYFLOAT`).
grammar!(KEY_FIELD_FIXED8 = [
    Field::ShortString,
    Field::ShortString,
    Field::Fixed(8),
]);

// `[key:short_string, offset:fixed(8), bit:fixed(1)]` — `SETBIT`.
grammar!(KEY_FIXED8_FIXED1 = [
    Field::ShortString,
    Field::Fixed(8),
    Field::Fixed(1),
]);

// `[key:short_string, bit:fixed(1)]` — `BITPOS`.
grammar!(KEY_FIXED1 = [Field::ShortString, Field::Fixed(1)]);

// `[a:short_string, b:short_string, range:fixed(16)]` — `ZRANGESTORE`
// (dest key, src key, start+stop packed as two 8-byte operands).
grammar!(TWO_KEYS_RANGE = [
    Field::ShortString,
    Field::ShortString,
    Field::Fixed(16),
]);

// `[value:long_string]` — a single message with no key (`ECHO`).
grammar!(SINGLE_VALUE = [Field::LongString]);

// `[n:fixed(8)]` — a single int64 operand and nothing else (`SELECT`).
grammar!(FIXED8 = [Field::Fixed(8)]);

// `[n:fixed(16)]` — two packed int64 operands (`SWAPDB`, `WAIT`).
grammar!(FIXED16 = [Field::Fixed(16)]);

// `[key:short_string, flags:fixed(1), count_u16_then [score:fixed(8),
// member:short_string]]` — `ZADD`, fully parsed per spec.md §9's note that
// a production parser (unlike the benchmark reference) must not skip the
// score/member pairs.
grammar!(ZADD = [
    Field::ShortString,
    Field::Fixed(1),
    Field::CountThen(&[Field::Fixed(8), Field::ShortString]),
]);

// `[key:short_string, id:fixed(8), count_u16_then [field:short_string,
// value:long_string]]` — `XADD`.
grammar!(XADD = [
    Field::ShortString,
    Field::Fixed(8),
    Field::CountThen(&[Field::ShortString, Field::LongString]),
]);

// `[key:short_string, count_u16_then [lon_lat:fixed(16), member:short_string]]`
// — `GEOADD`.
grammar!(GEOADD = [
    Field::ShortString,
    Field::CountThen(&[Field::Fixed(16), Field::ShortString]),
]);

// `[script:long_string, count_u16_then [key:short_string]]` — `EVAL`.
grammar!(EVAL = [
    Field::LongString,
    Field::CountThen(&[Field::ShortString]),
]);

// `[sha:short_string, count_u16_then [key:short_string]]` — `EVALSHA`,
// `FCALL`.
grammar!(EVALSHA = [
    Field::ShortString,
    Field::CountThen(&[Field::ShortString]),
]);

// `[key:short_string]` with an optional trailing `fixed(8)` count — `SPOP`,
// the canonical example of spec.md §9's optional-trailing-field ambiguity.
grammar!(SPOP = [
    Field::ShortString,
    Field::OptionalTail(&[Field::Fixed(8)]),
]);

// `[key:short_string]` with an optional trailing `fixed(9)` expiry block —
// `GETEX`.
grammar!(GETEX = [
    Field::ShortString,
    Field::OptionalTail(&[Field::Fixed(9)]),
]);

// `[src:short_string, dst:short_string, dirs:fixed(2)]` — `LMOVE` (the two
// `LEFT`/`RIGHT` direction flags packed as one opaque byte each).
grammar!(TWO_KEYS_FIXED2 = [
    Field::ShortString,
    Field::ShortString,
    Field::Fixed(2),
]);

// `[src:short_string, dst:short_string, dirs:fixed(2), timeout:fixed(8)]` —
// `BLMOVE` (`LMOVE`'s shape plus a blocking timeout).
grammar!(BLOCKING_MOVE = [
    Field::ShortString,
    Field::ShortString,
    Field::Fixed(2),
    Field::Fixed(8),
]);

// `[count_u16_then [key:short_string], timeout:fixed(8)]` — the blocking
// list pops (`BLPOP`, `BRPOP`).
grammar!(MULTI_KEY_TIMEOUT = [
    Field::CountThen(&[Field::ShortString]),
    Field::Fixed(8),
]);

// `[key:short_string, field:short_string, value:long_string]` — a single
// field/value write alongside its key, distinct from `KEY_VALUE` (`HSETNX`).
grammar!(KEY_FIELD_VALUE = [
    Field::ShortString,
    Field::ShortString,
    Field::LongString,
]);

// `[key:short_string, params:fixed(33), unit:short_string]` — `GEOSEARCH`
// (a center point plus a by-radius-or-box selector packed as 33 opaque
// bytes: one shape-tag byte followed by up to four 8-byte doubles).
grammar!(GEO_SEARCH = [
    Field::ShortString,
    Field::Fixed(33),
    Field::ShortString,
]);

// `[dst:short_string, src:short_string, params:fixed(33), unit:short_string]`
// — `GEOSEARCHSTORE` (`GEOSEARCH`'s shape with a destination key prepended).
grammar!(GEO_SEARCH_STORE = [
    Field::ShortString,
    Field::ShortString,
    Field::Fixed(33),
    Field::ShortString,
]);

// `[key:short_string, path:short_string, value:long_string, flags:fixed(1)]`
// — `JSON.SET`, verified byte-for-byte against the worked module scenario.
grammar!(KEY_PATH_VALUE_FLAGS = [
    Field::ShortString,
    Field::ShortString,
    Field::LongString,
    Field::Fixed(1),
]);
