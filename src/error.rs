use thiserror::Error;

/// Error types returned by this crate.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// The 16-bit opcode has no assigned grammar.
    ///
    /// This covers both genuinely unassigned opcodes in `[0x0000, 0xEFFF]`
    /// and the reserved range `[0xF001, 0xFFFE]`. Fatal for this frame; the
    /// caller decides recovery (drop the connection, or fall back to
    /// passthrough framing if a frame boundary can be determined from
    /// context).
    #[error("unknown opcode {0:#06x}")]
    UnknownOpcode(u16),

    /// A length prefix (`short_string`, `long_string`, or a module/
    /// passthrough length field) exceeds the configured cap for that field.
    #[error("string length {len} exceeds cap of {max} bytes")]
    OversizedString {
        /// The length prefix read from the wire.
        len: u64,
        /// The configured cap for this field.
        max: u64,
    },

    /// A `count_u16_then` count exceeded the implementation's argument cap.
    ///
    /// Only returned when the [`ReaderLimits`](crate::ReaderLimits) in use
    /// selects the strict resolution of the 64-argument cap; the default,
    /// lenient resolution spills excess arguments onto the heap instead of
    /// failing. See `DESIGN.md` for the rationale.
    #[error("command carries {got} arguments, more than the configured cap of {max}")]
    TooManyArgs {
        /// The number of arguments the frame declared.
        got: usize,
        /// The configured cap.
        max: usize,
    },

    /// The output buffer did not have enough remaining capacity to hold the
    /// serialised frame.
    #[error("insufficient capacity to serialise frame")]
    InsufficientCapacity,

    /// The buffer ended mid-frame and the caller has signalled that no more
    /// bytes are coming (end of input).
    ///
    /// In streaming mode this condition is reported as
    /// [`Outcome::Incomplete`](crate::Outcome::Incomplete) instead, which is
    /// not an error — see spec.md §7. This variant exists only for callers
    /// that know the stream has ended and want a terminal error rather than
    /// an indefinite retry.
    #[error("truncated frame at end of input ({have} bytes available)")]
    TruncatedFrame {
        /// The number of bytes available from the read offset to the end of
        /// the buffer.
        have: usize,
    },

    /// An I/O error occurred writing to, or reading from, the underlying
    /// buffer.
    #[error("i/o error ({0:?}): {1}")]
    IoError(std::io::ErrorKind, String),
}

impl From<std::io::Error> for Error {
    fn from(v: std::io::Error) -> Self {
        Self::IoError(v.kind(), v.to_string())
    }
}
