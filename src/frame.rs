//! Frame header shapes and the parsed-command record.
//!
//! RESPB frames come in three header shapes (spec.md §3.1): a 4-byte Core
//! header for ordinary opcodes, an 8-byte Module header for module
//! sub-dispatch, and an 8-byte Passthrough header that precedes a verbatim
//! embedded text-RESP frame.

use crate::argument::{ArgVec, Argument, OpaqueVec, RepeatVec};

/// The opcode reserved for module sub-dispatch (`0xF000`, spec.md §3.1).
pub const MODULE_OPCODE: u16 = 0xF000;

/// The opcode reserved for the RESP-passthrough shim (`0xFFFF`, spec.md
/// §3.1).
pub const PASSTHROUGH_OPCODE: u16 = 0xFFFF;

/// The first opcode of the reserved-but-unassigned range `[0xF001, 0xFFFE]`
/// (spec.md §3.1): neither a Core opcode, the Module tag, nor the
/// Passthrough tag.
pub const RESERVED_RANGE_START: u16 = 0xF001;

/// The last opcode of the reserved-but-unassigned range.
pub const RESERVED_RANGE_END: u16 = 0xFFFE;

/// Length in bytes of a Core header (`opcode:u16, mux_id:u16`).
pub const CORE_HEADER_LEN: usize = 4;

/// Length in bytes of a Module or Passthrough header (`tag:u16, mux_id:u16,
/// u32`).
pub const EXTENDED_HEADER_LEN: usize = 8;

/// A fully parsed RESPB command, borrowed from the input buffer it was
/// parsed out of.
///
/// Exactly one of the following holds, matching the three header shapes:
/// - `opcode` is in `[0x0000, 0xEFFF]`: a Core-header command. `module_id`,
///   `command_id`, `resp_length` and `resp_data` are all `None`.
/// - `opcode == MODULE_OPCODE`: a Module-header command. `module_id` and
///   `command_id` are `Some`; `resp_length`/`resp_data` are `None`.
/// - `opcode == PASSTHROUGH_OPCODE`: a Passthrough-header command.
///   `resp_length` and `resp_data` are `Some`; everything else bearing on
///   payload grammar (`args`, `opaque`) is empty, since the passthrough
///   payload is opaque text-RESP bytes, not a declarative grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The 16-bit opcode exactly as it appeared on the wire.
    pub opcode: u16,

    /// The 16-bit multiplexing id, used by pipelined/multiplexed callers to
    /// correlate a reply with its request. Opaque to this crate.
    pub mux_id: u16,

    /// The command's string-bearing arguments (`short_string`/`long_string`
    /// fields), in wire order.
    pub args: ArgVec<'a>,

    /// The command's opaque fixed-byte blocks (`fixed(n)` fields), in wire
    /// order. Carried bit-exact so the writer can reproduce them without
    /// interpreting their meaning (spec.md §9's note on `SET`'s
    /// flags+expiry field).
    pub opaque: OpaqueVec<'a>,

    /// The repetition count read for each `count_u16_then` field, in
    /// grammar-declaration order. See [`RepeatVec`] for why this can't be
    /// recovered from `args`/`opaque` alone.
    pub repeats: RepeatVec,

    /// The module id, present only for Module-header commands
    /// (`opcode == MODULE_OPCODE`).
    pub module_id: Option<u16>,

    /// The module command id, present only for Module-header commands.
    pub command_id: Option<u16>,

    /// The byte length of the embedded text-RESP frame, present only for
    /// Passthrough-header commands.
    pub resp_length: Option<u32>,

    /// The verbatim embedded text-RESP bytes, present only for
    /// Passthrough-header commands. Never parsed by this crate's core path;
    /// see [`crate::textresp`] (feature `textresp-ref`) for a reference
    /// decoder used only in this crate's own tests.
    pub resp_data: Option<Argument<'a>>,
}

impl<'a> ParsedCommand<'a> {
    /// The number of string-bearing arguments this command carries.
    pub fn argc(&self) -> usize {
        self.args.len()
    }

    /// Constructs a Core-header command with the given arguments and
    /// opaque blocks.
    pub(crate) fn core(
        opcode: u16,
        mux_id: u16,
        args: ArgVec<'a>,
        opaque: OpaqueVec<'a>,
        repeats: RepeatVec,
    ) -> Self {
        ParsedCommand {
            opcode,
            mux_id,
            args,
            opaque,
            repeats,
            module_id: None,
            command_id: None,
            resp_length: None,
            resp_data: None,
        }
    }

    /// Constructs a Module-header command.
    pub(crate) fn module(
        mux_id: u16,
        module_id: u16,
        command_id: u16,
        args: ArgVec<'a>,
        opaque: OpaqueVec<'a>,
        repeats: RepeatVec,
    ) -> Self {
        ParsedCommand {
            opcode: MODULE_OPCODE,
            mux_id,
            args,
            opaque,
            repeats,
            module_id: Some(module_id),
            command_id: Some(command_id),
            resp_length: None,
            resp_data: None,
        }
    }

    /// Constructs a Passthrough-header command.
    pub(crate) fn passthrough(mux_id: u16, resp_data: Argument<'a>) -> Self {
        ParsedCommand {
            opcode: PASSTHROUGH_OPCODE,
            mux_id,
            args: ArgVec::new(),
            opaque: OpaqueVec::new(),
            repeats: RepeatVec::new(),
            module_id: None,
            command_id: None,
            resp_length: Some(resp_data.len() as u32),
            resp_data: Some(resp_data),
        }
    }
}
