use crate::{EncodedChar, Error, ErrorKind};

/// Returns the number of bytes needed to encode `code_point` in UTF-8.
///
/// This is always the *shortest* encoding: `1` below `0x80`, `2` below `0x800`, `3` below
/// `0x10000` and `4` otherwise.
#[inline]
pub const fn width_for(code_point: u32) -> usize {
    if code_point < 0x80 {
        1
    } else if code_point < 0x800 {
        2
    } else if code_point < 0x10000 {
        3
    } else {
        4
    }
}

/// Returns the number of bytes needed to encode all of the provided code points.
pub fn encoded_len(code_points: &[u32]) -> usize {
    code_points.iter().map(|&c| width_for(c)).sum()
}

/// Encodes a single code point at the beginning of `output`.
///
/// On success, the number of bytes written is returned.
///
/// # Errors
///
/// If `output` is too small to hold the whole character, nothing is written and
/// [`ErrorKind::ByteOverflow`] is returned.
pub fn encode_char(code_point: u32, output: &mut [u8]) -> Result<usize, Error> {
    let encoded = EncodedChar::new(code_point);
    match output.get_mut(..encoded.len()) {
        Some(dst) => {
            dst.copy_from_slice(&encoded);
            Ok(encoded.len())
        }
        None => Err(Error::new(ErrorKind::ByteOverflow, 0)),
    }
}

/// Encodes `code_points` into `output`.
///
/// On success, the number of bytes written is returned.
///
/// # Errors
///
/// Characters are never partially written. When the next character does not fit in the space
/// left in `output`, encoding stops and [`ErrorKind::ByteOverflow`] is returned along with the
/// number of bytes written so far.
pub fn encode_array(code_points: &[u32], output: &mut [u8]) -> Result<usize, Error> {
    let mut written = 0;

    for &code_point in code_points {
        let width = width_for(code_point);
        let Some(dst) = output.get_mut(written..written + width) else {
            return Err(Error::new(ErrorKind::ByteOverflow, written));
        };
        dst.copy_from_slice(&EncodedChar::new(code_point));
        written += width;
    }

    Ok(written)
}

#[cfg(test)]
#[test]
fn width_boundaries() {
    assert_eq!(width_for(0), 1);
    assert_eq!(width_for(0x7F), 1);
    assert_eq!(width_for(0x80), 2);
    assert_eq!(width_for(0x7FF), 2);
    assert_eq!(width_for(0x800), 3);
    assert_eq!(width_for(0xFFFF), 3);
    assert_eq!(width_for(0x10000), 4);
    assert_eq!(width_for(0x10FFFF), 4);
    assert_eq!(width_for(0x1FFFFF), 4);
}

#[cfg(test)]
#[test]
fn encode_mixed() {
    let mut buf = [0u8; 16];
    let n = encode_array(&[0x41, 0xE9, 0x20AC, 0x1F980], &mut buf).unwrap();
    assert_eq!(n, 10);
    assert_eq!(&buf[..n], "Aé€🦀".as_bytes());
    assert_eq!(encoded_len(&[0x41, 0xE9, 0x20AC, 0x1F980]), 10);
}

#[cfg(test)]
#[test]
fn encode_overflow_is_atomic() {
    let mut buf = [0xFFu8; 3];
    let err = encode_array(&[0x41, 0x20AC], &mut buf).unwrap_err();
    assert_eq!(err.kind, ErrorKind::ByteOverflow);
    assert_eq!(err.written, 1);
    assert_eq!(buf, [0x41, 0xFF, 0xFF]);
}

#[cfg(test)]
#[test]
fn encode_exact_fit() {
    let mut buf = [0u8; 4];
    assert_eq!(encode_array(&[0x41, 0x20AC], &mut buf), Ok(4));
    assert_eq!(buf, [0x41, 0xE2, 0x82, 0xAC]);
}

#[cfg(test)]
#[test]
fn encode_nothing() {
    assert_eq!(encode_array(&[], &mut []), Ok(0));

    let err = encode_array(&[0x41], &mut []).unwrap_err();
    assert_eq!(err, Error::new(ErrorKind::ByteOverflow, 0));
}

#[cfg(test)]
#[test]
fn encode_single() {
    let mut buf = [0u8; 2];
    assert_eq!(encode_char(0xE9, &mut buf), Ok(2));
    assert_eq!(buf, [0xC3, 0xA9]);
    assert_eq!(
        encode_char(0x20AC, &mut buf),
        Err(Error::new(ErrorKind::ByteOverflow, 0))
    );
    assert_eq!(buf, [0xC3, 0xA9]);
}
