use crate::{width_for, ErrorKind};

/// Where the decoder stands inside a multi-byte sequence.
///
/// Variants are named after the total length of the sequence and the number of continuation bytes
/// that are still expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Len2Left1,
    Len3Left2,
    Len3Left1,
    Len4Left3,
    Len4Left2,
    Len4Left1,
}

impl Expect {
    /// The total length of the sequence, as implied by its leading byte.
    #[inline(always)]
    const fn sequence_len(self) -> usize {
        match self {
            Self::Len2Left1 => 2,
            Self::Len3Left2 | Self::Len3Left1 => 3,
            Self::Len4Left3 | Self::Len4Left2 | Self::Len4Left1 => 4,
        }
    }

    #[inline(always)]
    const fn remaining(self) -> usize {
        match self {
            Self::Len2Left1 | Self::Len3Left1 | Self::Len4Left1 => 1,
            Self::Len3Left2 | Self::Len4Left2 => 2,
            Self::Len4Left3 => 3,
        }
    }

    /// The state after one more continuation byte, or [`None`] if that byte completes the
    /// sequence.
    #[inline(always)]
    const fn next(self) -> Option<Self> {
        match self {
            Self::Len3Left2 => Some(Self::Len3Left1),
            Self::Len4Left3 => Some(Self::Len4Left2),
            Self::Len4Left2 => Some(Self::Len4Left1),
            Self::Len2Left1 | Self::Len3Left1 | Self::Len4Left1 => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// At a character boundary.
    Ready,
    /// Inside of a multi-byte sequence.
    InSequence { expect: Expect, accumulator: u32 },
}

/// The result of feeding a chunk of bytes to [`Decoder::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// The number of input bytes that were consumed. A byte that caused an error is not counted.
    pub read: usize,
    /// The number of code points written to the output buffer.
    pub written: usize,
    /// The error that stopped decoding, if any.
    ///
    /// This is never [`ErrorKind::CharOverflow`] nor [`ErrorKind::UnexpectedTermination`]: running
    /// out of output space is reported through `read`, and the end of the stream is only known by
    /// the caller (see [`Decoder::can_terminate`]).
    pub error: Option<ErrorKind>,
}

/// A byte-at-a-time UTF-8 decoder.
///
/// Leading bytes must match one of the `0xxxxxxx`, `110xxxxx`, `1110xxxx` or `11110xxx` patterns,
/// continuation bytes must match `10xxxxxx`, and every sequence must be the shortest one able to
/// represent its value. Surrogates and values up to `0x1FFFFF` are *not* rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    state: State,
}

impl Default for Decoder {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// Creates a new [`Decoder`], ready to read the first byte of a character.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            state: State::Ready,
        }
    }

    /// Returns whether the decoder is at a character boundary, where the input may validly end.
    #[inline(always)]
    pub const fn can_terminate(&self) -> bool {
        matches!(self.state, State::Ready)
    }

    /// Returns the number of continuation bytes needed to complete the current character.
    #[inline]
    pub const fn pending(&self) -> usize {
        match self.state {
            State::Ready => 0,
            State::InSequence { expect, .. } => expect.remaining(),
        }
    }

    /// Discards any partially decoded character.
    #[inline(always)]
    pub fn reset(&mut self) {
        self.state = State::Ready;
    }

    /// Feeds a single byte to the decoder.
    ///
    /// Returns `Some(code_point)` when `byte` completes a character and `None` when more bytes
    /// are needed.
    ///
    /// # Errors
    ///
    /// On [`ErrorKind::InvalidStartByte`] and [`ErrorKind::InvalidContinuationByte`], the state of
    /// the decoder is left untouched. On [`ErrorKind::OverlongSequence`], the offending sequence
    /// has been consumed and the decoder is back at a character boundary.
    pub fn push(&mut self, byte: u8) -> Result<Option<u32>, ErrorKind> {
        match self.state {
            State::Ready => {
                let (expect, lead_bits) = if byte < 0x80 {
                    return Ok(Some(byte as u32));
                } else if byte & 0xE0 == 0xC0 {
                    (Expect::Len2Left1, byte & 0x1F)
                } else if byte & 0xF0 == 0xE0 {
                    (Expect::Len3Left2, byte & 0x0F)
                } else if byte & 0xF8 == 0xF0 {
                    (Expect::Len4Left3, byte & 0x07)
                } else {
                    return Err(ErrorKind::InvalidStartByte);
                };

                self.state = State::InSequence {
                    expect,
                    accumulator: lead_bits as u32,
                };
                Ok(None)
            }
            State::InSequence {
                expect,
                accumulator,
            } => {
                if byte & 0xC0 != 0x80 {
                    return Err(ErrorKind::InvalidContinuationByte);
                }

                let accumulator = accumulator << 6 | (byte & 0x3F) as u32;

                match expect.next() {
                    Some(expect) => {
                        self.state = State::InSequence {
                            expect,
                            accumulator,
                        };
                        Ok(None)
                    }
                    None => {
                        self.state = State::Ready;
                        if width_for(accumulator) == expect.sequence_len() {
                            Ok(Some(accumulator))
                        } else {
                            Err(ErrorKind::OverlongSequence)
                        }
                    }
                }
            }
        }
    }

    /// Decodes as much of `input` as fits in `output`, keeping any partial character for the next
    /// call.
    ///
    /// Unlike [`decode_array`], the decoder is not reset between calls, which makes it possible to
    /// decode a stream that is split into arbitrary chunks. Once the stream is over, the caller
    /// should check [`can_terminate`] to detect a truncated trailing character.
    ///
    /// [`decode_array`]: crate::decode_array
    /// [`can_terminate`]: Decoder::can_terminate
    pub fn decode(&mut self, input: &[u8], output: &mut [u32]) -> Progress {
        let mut progress = Progress {
            read: 0,
            written: 0,
            error: None,
        };

        while let (Some(&byte), Some(slot)) =
            (input.get(progress.read), output.get_mut(progress.written))
        {
            match self.push(byte) {
                Ok(Some(code_point)) => {
                    *slot = code_point;
                    progress.written += 1;
                }
                Ok(None) => (),
                Err(kind) => {
                    progress.error = Some(kind);
                    break;
                }
            }
            progress.read += 1;
        }

        progress
    }
}

#[cfg(test)]
fn push_all(decoder: &mut Decoder, bytes: &[u8]) -> Result<Option<u32>, ErrorKind> {
    let mut last = Ok(None);
    for &b in bytes {
        last = decoder.push(b);
        if last.is_err() {
            break;
        }
    }
    last
}

#[cfg(test)]
#[test]
fn ascii_is_immediate() {
    let mut d = Decoder::new();
    for b in 0..0x80u8 {
        assert_eq!(d.push(b), Ok(Some(b as u32)));
        assert!(d.can_terminate());
    }
}

#[cfg(test)]
#[test]
fn multi_byte_sequences() {
    let mut d = Decoder::new();
    assert_eq!(push_all(&mut d, &[0xC2, 0xA2]), Ok(Some(0xA2)));
    assert_eq!(push_all(&mut d, &[0xE2, 0x82, 0xAC]), Ok(Some(0x20AC)));
    assert_eq!(push_all(&mut d, &[0xF0, 0x90, 0x82, 0x82]), Ok(Some(0x10082)));
    assert!(d.can_terminate());
}

#[cfg(test)]
#[test]
fn pending_counts_down() {
    let mut d = Decoder::new();
    assert_eq!(d.pending(), 0);
    assert_eq!(d.push(0xF0), Ok(None));
    assert_eq!(d.pending(), 3);
    assert_eq!(d.push(0x9F), Ok(None));
    assert_eq!(d.pending(), 2);
    assert_eq!(d.push(0xA6), Ok(None));
    assert_eq!(d.pending(), 1);
    assert!(!d.can_terminate());
    assert_eq!(d.push(0x80), Ok(Some(0x1F980)));
    assert_eq!(d.pending(), 0);
    assert!(d.can_terminate());
}

#[cfg(test)]
#[test]
fn invalid_start_bytes() {
    for b in (0x80..0xC0u8).chain(0xF8..=0xFF) {
        let mut d = Decoder::new();
        assert_eq!(d.push(b), Err(ErrorKind::InvalidStartByte));
        assert!(d.can_terminate());
    }
}

#[cfg(test)]
#[test]
fn invalid_continuation_keeps_state() {
    let mut d = Decoder::new();
    assert_eq!(d.push(0xE2), Ok(None));
    assert_eq!(d.push(0x41), Err(ErrorKind::InvalidContinuationByte));
    assert_eq!(d.pending(), 2);

    d.reset();
    assert!(d.can_terminate());
    assert_eq!(d.push(0x41), Ok(Some(0x41)));
}

#[cfg(test)]
#[test]
fn overlong_sequences() {
    let overlong: [&[u8]; 6] = [
        &[0xC0, 0x80],
        &[0xC1, 0xBF],
        &[0xE0, 0x80, 0x80],
        &[0xE0, 0x9F, 0xBF],
        &[0xF0, 0x80, 0x80, 0x80],
        &[0xF0, 0x8F, 0xBF, 0xBF],
    ];

    for bytes in overlong {
        let mut d = Decoder::new();
        assert_eq!(
            push_all(&mut d, bytes),
            Err(ErrorKind::OverlongSequence),
            "{bytes:02x?}"
        );
        assert!(d.can_terminate());
    }
}

#[cfg(test)]
#[test]
fn permissive_values() {
    let mut d = Decoder::new();
    // U+D800, a lone surrogate.
    assert_eq!(push_all(&mut d, &[0xED, 0xA0, 0x80]), Ok(Some(0xD800)));
    // Above U+10FFFF.
    assert_eq!(push_all(&mut d, &[0xF4, 0x90, 0x80, 0x80]), Ok(Some(0x110000)));
    assert_eq!(push_all(&mut d, &[0xF7, 0xBF, 0xBF, 0xBF]), Ok(Some(0x1FFFFF)));
}

#[cfg(test)]
#[test]
fn chunked_decode() {
    let input = "a€🦀".as_bytes();
    let mut out = [0u32; 8];
    let mut written = 0;
    let mut d = Decoder::new();

    for chunk in input.chunks(2) {
        let progress = d.decode(chunk, &mut out[written..]);
        assert_eq!(progress.read, chunk.len());
        assert_eq!(progress.error, None);
        written += progress.written;
    }

    assert!(d.can_terminate());
    assert_eq!(&out[..written], &[0x61, 0x20AC, 0x1F980]);
}

#[cfg(test)]
#[test]
fn chunked_decode_stops_when_full() {
    let mut d = Decoder::new();
    let mut out = [0u32; 2];

    let progress = d.decode(b"abcd", &mut out);
    assert_eq!(
        progress,
        Progress {
            read: 2,
            written: 2,
            error: None,
        }
    );

    let progress = d.decode(b"cd", &mut out);
    assert_eq!(progress.read, 2);
    assert_eq!(out, [0x63, 0x64]);
}

#[cfg(test)]
#[test]
fn chunked_decode_error() {
    let mut d = Decoder::new();
    let mut out = [0u32; 8];

    let progress = d.decode(b"ab\xFFcd", &mut out);
    assert_eq!(
        progress,
        Progress {
            read: 2,
            written: 2,
            error: Some(ErrorKind::InvalidStartByte),
        }
    );
}
