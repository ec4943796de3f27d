//! RESPB: a binary wire format and zero-copy parsing/serialisation core for
//! Redis/Valkey-compatible commands.
//!
//! This crate implements the frame grammar, the opcode dispatch table, the
//! module sub-dispatch table, the RESP-passthrough shim, and the
//! incremental [`parse_one`] / [`serialize`] pair that together make up
//! the RESPB core. It deliberately has no server loop, no execution
//! semantics, and no client/connection machinery: see each module's docs
//! for the exact boundary.
#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::explicit_iter_loop,
    clippy::todo,
    clippy::unimplemented,
    clippy::use_self,
    clippy::doc_markdown,
    clippy::print_stdout,
    missing_debug_implementations,
    unreachable_pub,
    missing_docs,
    unused_crate_dependencies
)]

mod argument;
pub use argument::{ArgVec, Argument, Category, OpaqueVec, RepeatVec};

mod error;
pub use error::Error;

mod limits;
pub use limits::{ReaderLimits, DEFAULT_MAX_LONG_STRING};

mod grammar;
pub use grammar::{Field, Grammar};

pub mod dispatch;
pub use dispatch::{category_for, lookup, name_for, OpcodeEntry};

pub mod module;

mod frame;
pub use frame::{
    ParsedCommand, CORE_HEADER_LEN, EXTENDED_HEADER_LEN, MODULE_OPCODE, PASSTHROUGH_OPCODE,
    RESERVED_RANGE_END, RESERVED_RANGE_START,
};

mod reader;
pub use reader::{parse_one, Outcome};

mod writer;
pub use writer::{serialize, serialized_len};

#[cfg(feature = "textresp-ref")]
pub mod textresp;

// `hex-literal` and `proptest` are exercised directly by `reader`'s and
// `writer`'s own `#[cfg(test)]` modules. `criterion` is only used by
// `benches/bench.rs`, a separate target, so the lib's own test build needs
// this to satisfy `unused_crate_dependencies`.
#[cfg(test)]
use criterion as _;
