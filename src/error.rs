use core::fmt;

/// The reason a decoding or encoding operation stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A byte found at a character boundary is neither ASCII nor the leading byte of a two, three
    /// or four bytes sequence.
    InvalidStartByte,
    /// A byte expected to continue a multi-byte sequence does not start with the `10` bits.
    InvalidContinuationByte,
    /// A complete multi-byte sequence encodes a value that fits in fewer bytes.
    OverlongSequence,
    /// The output code point buffer was filled before the input was exhausted.
    CharOverflow,
    /// The output byte buffer cannot hold the next encoded character.
    ByteOverflow,
    /// The input ended in the middle of a multi-byte sequence.
    UnexpectedTermination,
}

impl ErrorKind {
    /// Returns a short, static description of the error.
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidStartByte => "invalid start byte",
            Self::InvalidContinuationByte => "expected a continuation byte",
            Self::OverlongSequence => "overlong sequence",
            Self::CharOverflow => "code point buffer overflow",
            Self::ByteOverflow => "byte buffer overflow",
            Self::UnexpectedTermination => "input ended in the middle of a sequence",
        }
    }

    /// Returns whether this error was caused by malformed input, rather than by a lack of
    /// output space or a truncated input.
    #[inline]
    pub const fn is_malformed(self) -> bool {
        matches!(
            self,
            Self::InvalidStartByte | Self::InvalidContinuationByte | Self::OverlongSequence
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// An error that may occur whilst converting between UTF-8 bytes and code points.
///
/// Whatever was written to the output buffer before the error occurred remains valid and can be
/// used by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Error {
    /// What went wrong.
    pub kind: ErrorKind,
    /// The number of elements (code points when decoding, bytes when encoding) that were
    /// written to the output buffer before the operation stopped.
    pub written: usize,
}

impl Error {
    #[inline(always)]
    pub(crate) const fn new(kind: ErrorKind, written: usize) -> Self {
        Self { kind, written }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (after {} elements written)", self.kind, self.written)
    }
}

impl core::error::Error for Error {}

#[cfg(test)]
#[test]
fn display_mentions_progress() {
    use std::string::ToString;

    let err = Error::new(ErrorKind::OverlongSequence, 3);
    assert_eq!(err.to_string(), "overlong sequence (after 3 elements written)");
    assert_eq!(ErrorKind::ByteOverflow.to_string(), "byte buffer overflow");
}

#[cfg(test)]
#[test]
fn malformed_kinds() {
    assert!(ErrorKind::InvalidStartByte.is_malformed());
    assert!(ErrorKind::InvalidContinuationByte.is_malformed());
    assert!(ErrorKind::OverlongSequence.is_malformed());
    assert!(!ErrorKind::CharOverflow.is_malformed());
    assert!(!ErrorKind::ByteOverflow.is_malformed());
    assert!(!ErrorKind::UnexpectedTermination.is_malformed());
}
