//! Module sub-dispatch for opcode `0xF000` (spec.md §4.3).
//!
//! A Module-header frame carries a `(module_id, command_id)` pair instead
//! of a Core opcode. Three modules are named (JSON, Bloom filter, Search);
//! anything else falls back to lenient, best-effort single-key framing
//! rather than a hard error, matching the reference's leniency for unknown
//! modules (spec.md §9).

use crate::grammar::*;

/// The JSON module id (`RedisJSON`/`ValkeyJSON`).
pub const MODULE_JSON: u16 = 0;
/// The Bloom filter module id (`RedisBloom`/`ValkeyBloom`).
pub const MODULE_BLOOM: u16 = 1;
/// The Search module id (`RediSearch`/`ValkeySearch`).
pub const MODULE_SEARCH: u16 = 2;

/// One row of a module's command table.
#[derive(Debug, Clone, Copy)]
pub struct ModuleCommandEntry {
    pub command_id: u16,
    pub name: &'static str,
    pub grammar: Grammar,
}

macro_rules! module_table {
    ($($command_id:expr, $name:expr, $grammar:expr;)*) => {
        &[$(ModuleCommandEntry { command_id: $command_id, name: $name, grammar: $grammar }),*]
    };
}

/// `module_id = 0` (JSON). `command_id = 0` is `JSON.SET`, pinned exactly
/// per spec.md §8 Scenario 4: `[key:short_string, path:short_string,
/// value:long_string, flags:fixed(1)]`. `command_id = 1` is `JSON.GET`,
/// per spec.md §4.3: a key plus a count-prefixed path list. Every other
/// JSON command_id falls back to [`FALLBACK_GRAMMAR`], per spec.md §4.3's
/// "~20 others falling back to a generic single-key grammar".
static JSON_COMMANDS: &[ModuleCommandEntry] = module_table! {
    0, "JSON.SET", KEY_PATH_VALUE_FLAGS;
    1, "JSON.GET", KEY_PATH_LIST;
};

/// `module_id = 1` (Bloom filter). Only `BF.ADD`/`BF.EXISTS` have an
/// assigned grammar (spec.md §4.3); every other Bloom command_id falls
/// back to [`FALLBACK_GRAMMAR`].
static BLOOM_COMMANDS: &[ModuleCommandEntry] = module_table! {
    0, "BF.ADD",    KEY_ITEM;
    1, "BF.EXISTS", KEY_ITEM;
};

/// `module_id = 2` (Search). Only `FT.SEARCH` has an assigned grammar
/// (spec.md §4.3); every other Search command_id falls back to
/// [`FALLBACK_GRAMMAR`].
static SEARCH_COMMANDS: &[ModuleCommandEntry] = module_table! {
    1, "FT.SEARCH", KEY_ITEM;
};

fn table_for(module_id: u16) -> Option<&'static [ModuleCommandEntry]> {
    match module_id {
        MODULE_JSON => Some(JSON_COMMANDS),
        MODULE_BLOOM => Some(BLOOM_COMMANDS),
        MODULE_SEARCH => Some(SEARCH_COMMANDS),
        _ => None,
    }
}

/// The outcome of a module sub-dispatch lookup.
#[derive(Debug, Clone, Copy)]
pub enum ModuleDispatch {
    /// A known `(module_id, command_id)` pair with an assigned grammar.
    Known(&'static ModuleCommandEntry),
    /// An unrecognised module id or command id. Per spec.md §9, this is
    /// not a hard error: the caller gets single-key best-effort framing
    /// (one `short_string` argument, argc == 1) instead.
    Fallback,
}

/// Looks up the grammar for a module sub-command, falling back leniently
/// for any module id or command id this table does not recognise.
pub fn dispatch(module_id: u16, command_id: u16) -> ModuleDispatch {
    match table_for(module_id).and_then(|t| t.iter().find(|e| e.command_id == command_id)) {
        Some(e) => ModuleDispatch::Known(e),
        None => ModuleDispatch::Fallback,
    }
}

/// The grammar used for the lenient single-key fallback: exactly one
/// `short_string` argument, so `argc() == 1` regardless of which unknown
/// module/command produced it.
pub static FALLBACK_GRAMMAR: Grammar = SHORT_KEY;
