use core::ops::Deref;

use crate::width_for;

/// A single UTF-8 encoded character, stored inline in a fixed-size array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedChar {
    bytes: [u8; 4],
    len: u8,
}

impl EncodedChar {
    /// Encodes the provided code point.
    ///
    /// Any 21-bit value is accepted, including surrogates and values above `0x10FFFF`. Bits above
    /// the 21st are ignored.
    pub const fn new(code_point: u32) -> Self {
        let c = code_point;
        let bytes = match width_for(c) {
            1 => [c as u8, 0, 0, 0],
            2 => [(c >> 6) as u8 | 0xC0, (c & 0x3F) as u8 | 0x80, 0, 0],
            3 => [
                (c >> 12) as u8 | 0xE0,
                ((c >> 6) & 0x3F) as u8 | 0x80,
                (c & 0x3F) as u8 | 0x80,
                0,
            ],
            _ => [
                ((c & 0x1F_FFFF) >> 18) as u8 | 0xF0,
                ((c >> 12) & 0x3F) as u8 | 0x80,
                ((c >> 6) & 0x3F) as u8 | 0x80,
                (c & 0x3F) as u8 | 0x80,
            ],
        };

        Self {
            bytes,
            len: width_for(c) as u8,
        }
    }

    /// Returns the encoded bytes.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

impl Deref for EncodedChar {
    type Target = [u8];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for EncodedChar {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq<[u8]> for EncodedChar {
    #[inline(always)]
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<const N: usize> PartialEq<[u8; N]> for EncodedChar {
    #[inline(always)]
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_bytes() == other
    }
}

#[cfg(test)]
#[test]
fn matches_core_encoding() {
    for c in ['\0', 'A', '\u{7F}', '\u{80}', 'é', '\u{7FF}', '\u{800}', '€', '\u{FFFF}', '🦀'] {
        let mut buf = [0u8; 4];
        let expected = c.encode_utf8(&mut buf).as_bytes();
        assert_eq!(EncodedChar::new(c as u32).as_bytes(), expected);
    }
}

#[cfg(test)]
#[test]
fn permissive_values() {
    // Lone surrogate.
    assert_eq!(EncodedChar::new(0xD800), [0xED, 0xA0, 0x80]);
    // Largest value representable with four bytes.
    assert_eq!(EncodedChar::new(0x1F_FFFF), [0xF7, 0xBF, 0xBF, 0xBF]);
}
