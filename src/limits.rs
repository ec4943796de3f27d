/// The Redis bulk-string limit, and the default cap this crate enforces on
/// `long_string` fields (spec.md §3.2 invariant 3).
pub const DEFAULT_MAX_LONG_STRING: u32 = 512 * 1024 * 1024;

/// Caller-supplied, construction-time configuration for the Frame Reader.
///
/// The core has no environment variables and no configuration files — every
/// knob it exposes is an explicit parameter, passed the same way the teacher
/// crate threads a `max_len` cap through [`Opaque::from_wire`]-style calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderLimits {
    max_long_string: u32,
    max_args: Option<usize>,
}

impl ReaderLimits {
    /// The lenient default: `long_string` fields are capped at the Redis
    /// bulk-string limit, and a frame's argument count is unbounded (stored
    /// arguments spill onto the heap past the inline capacity rather than
    /// being truncated or rejected).
    ///
    /// This resolves the 64-argument-cap Open Question in spec.md §9 in
    /// favour of correctness: every argument the wire format declares is
    /// parsed and kept, so `serialize(parse(x))` round-trips regardless of
    /// argument count.
    pub const fn lenient() -> Self {
        ReaderLimits {
            max_long_string: DEFAULT_MAX_LONG_STRING,
            max_args: None,
        }
    }

    /// The strict resolution of the same Open Question: a `count_u16_then`
    /// field whose count exceeds `max_args` fails the frame with
    /// [`Error::TooManyArgs`](crate::Error::TooManyArgs) instead of spilling
    /// to the heap.
    pub const fn strict(max_args: usize) -> Self {
        ReaderLimits {
            max_long_string: DEFAULT_MAX_LONG_STRING,
            max_args: Some(max_args),
        }
    }

    /// Overrides the `long_string` cap (default: 512 MiB, the Redis
    /// bulk-string limit).
    pub const fn with_max_long_string(mut self, max: u32) -> Self {
        self.max_long_string = max;
        self
    }

    pub(crate) fn max_long_string(&self) -> u32 {
        self.max_long_string
    }

    pub(crate) fn max_args(&self) -> Option<usize> {
        self.max_args
    }
}

impl Default for ReaderLimits {
    fn default() -> Self {
        Self::lenient()
    }
}
