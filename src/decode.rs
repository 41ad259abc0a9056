use core::ffi::CStr;

use crate::{Decoder, Error, ErrorKind, Null, Sentinel};

/// Decodes the bytes yielded by `input` into `output`, one byte at a time.
///
/// Decoding ends when `input` is exhausted. This is the driver behind every other decoding
/// function of this crate; only the way the end of the input is detected differs between them.
///
/// On success, the number of code points written to `output` is returned.
///
/// # Errors
///
/// - Malformed input stops decoding at the offending byte, and the associated error is returned.
/// - [`ErrorKind::CharOverflow`] is returned when `output` is full but `input` still yields bytes.
/// - [`ErrorKind::UnexpectedTermination`] is returned when `input` ends in the middle of a
///   character.
///
/// In every case, [`Error::written`] is the number of code points written to `output`, all of
/// which are valid.
pub fn decode_from<I>(input: I, output: &mut [u32]) -> Result<usize, Error>
where
    I: IntoIterator<Item = u8>,
{
    let mut input = input.into_iter();
    let mut decoder = Decoder::new();
    let mut written = 0;

    loop {
        let Some(slot) = output.get_mut(written) else {
            if input.next().is_some() {
                return Err(Error::new(ErrorKind::CharOverflow, written));
            }
            break;
        };

        let Some(byte) = input.next() else {
            break;
        };

        match decoder.push(byte) {
            Ok(Some(code_point)) => {
                *slot = code_point;
                written += 1;
            }
            Ok(None) => (),
            Err(kind) => return Err(Error::new(kind, written)),
        }
    }

    if decoder.can_terminate() {
        Ok(written)
    } else {
        Err(Error::new(ErrorKind::UnexpectedTermination, written))
    }
}

/// Decodes the whole of `bytes` into `output`.
///
/// See [`decode_from`] for the possible errors.
#[inline]
pub fn decode_array(bytes: &[u8], output: &mut [u32]) -> Result<usize, Error> {
    decode_from(bytes.iter().copied(), output)
}

/// Decodes `bytes` into `output`, stopping at the first sentinel byte.
///
/// If `bytes` contains no sentinel, it is decoded whole.
///
/// See [`decode_from`] for the possible errors.
#[inline]
pub fn decode_terminated<S>(bytes: &[u8], output: &mut [u32]) -> Result<usize, Error>
where
    S: Sentinel<u8>,
{
    decode_array(S::terminated(bytes), output)
}

/// Decodes `bytes` into `output`, stopping at the first null byte.
///
/// If `bytes` contains no null byte, it is decoded whole.
///
/// See [`decode_from`] for the possible errors.
#[inline]
pub fn decode_null_terminated(bytes: &[u8], output: &mut [u32]) -> Result<usize, Error> {
    decode_terminated::<Null>(bytes, output)
}

/// Decodes the content of a [`CStr`] into `output`.
///
/// See [`decode_from`] for the possible errors.
#[inline]
pub fn decode_c_str(s: &CStr, output: &mut [u32]) -> Result<usize, Error> {
    decode_array(s.to_bytes(), output)
}

/// Decodes the null-terminated string referenced by `ptr` into `output`.
///
/// See [`decode_from`] for the possible errors.
///
/// ## Safety
///
/// `ptr` must reference a null-terminated string. Every byte up to (and including) the null
/// terminator must be part of the same allocated object, initialized, and valid for reads.
pub unsafe fn decode_c_ptr(ptr: *const u8, output: &mut [u32]) -> Result<usize, Error> {
    // SAFETY:
    //  The caller guarantees that a null byte exists in the allocated object, and that every
    //  byte up to it is readable.
    let bytes = unsafe {
        let len = <Null as Sentinel<u8>>::find_sentinel_infinite(ptr);
        core::slice::from_raw_parts(ptr, len)
    };
    decode_array(bytes, output)
}

/// Checks that `bytes` is well-formed and returns the number of code points it decodes to.
///
/// This is the exact output capacity [`decode_array`] needs to decode `bytes`.
///
/// # Errors
///
/// Malformed or truncated input is reported as in [`decode_from`], with [`Error::written`]
/// counting the code points that were validated before the error. [`ErrorKind::CharOverflow`]
/// is never returned.
pub fn measure(bytes: &[u8]) -> Result<usize, Error> {
    let mut decoder = Decoder::new();
    let mut count = 0;

    for &byte in bytes {
        match decoder.push(byte) {
            Ok(Some(_)) => count += 1,
            Ok(None) => (),
            Err(kind) => return Err(Error::new(kind, count)),
        }
    }

    if decoder.can_terminate() {
        Ok(count)
    } else {
        Err(Error::new(ErrorKind::UnexpectedTermination, count))
    }
}

#[cfg(test)]
#[test]
fn decode_valid() {
    let input = "h€llo, wörld 🦀".as_bytes();
    let mut out = [0u32; 32];
    let n = decode_array(input, &mut out).unwrap();

    let expected: std::vec::Vec<u32> = "h€llo, wörld 🦀".chars().map(|c| c as u32).collect();
    assert_eq!(&out[..n], &expected[..]);
}

#[cfg(test)]
#[test]
fn round_trip_all_scalar_values() {
    let mut bytes = [0u8; 4];
    let mut out = [0u32; 1];

    for c in (0..=0x10FFFFu32).filter(|c| !(0xD800..=0xDFFF).contains(c)) {
        let n = crate::encode_array(&[c], &mut bytes).unwrap();
        assert_eq!(decode_array(&bytes[..n], &mut out), Ok(1), "U+{c:04X}");
        assert_eq!(out[0], c);
    }
}

#[cfg(test)]
#[test]
fn ascii_identity() {
    let mut byte = [0u8; 1];
    let mut out = [0u32; 1];

    for c in 0..0x80u32 {
        assert_eq!(crate::encode_array(&[c], &mut byte), Ok(1));
        assert_eq!(byte[0] as u32, c);
        assert_eq!(decode_array(&byte, &mut out), Ok(1));
        assert_eq!(out[0], c);
    }
}

#[cfg(test)]
#[test]
fn overlong_nul() {
    let mut out = [0u32; 4];
    let err = decode_array(&[0xC0, 0x80], &mut out).unwrap_err();
    assert_eq!(err, Error::new(ErrorKind::OverlongSequence, 0));
}

#[cfg(test)]
#[test]
fn truncated_sequence() {
    let mut out = [0u32; 4];
    let err = decode_array(&[0xE2, 0x82], &mut out).unwrap_err();
    assert_eq!(err, Error::new(ErrorKind::UnexpectedTermination, 0));

    let err = decode_array(b"ab\xF0\x9F\xA6", &mut out).unwrap_err();
    assert_eq!(err, Error::new(ErrorKind::UnexpectedTermination, 2));
    assert_eq!(&out[..2], &[0x61, 0x62]);
}

#[cfg(test)]
#[test]
fn invalid_continuation() {
    let mut out = [0u32; 4];
    let err = decode_array(&[0xC2, 0x41], &mut out).unwrap_err();
    assert_eq!(err, Error::new(ErrorKind::InvalidContinuationByte, 0));
}

#[cfg(test)]
#[test]
fn errors_stop_immediately() {
    let mut out = [0u32; 8];
    let err = decode_array(b"ab\x80cd", &mut out).unwrap_err();
    assert_eq!(err, Error::new(ErrorKind::InvalidStartByte, 2));
    assert_eq!(&out[..2], &[0x61, 0x62]);
    assert_eq!(out[2], 0);
}

#[cfg(test)]
#[test]
fn char_overflow_boundary() {
    let input = "a€b".as_bytes();

    let mut out = [0u32; 2];
    let err = decode_array(input, &mut out).unwrap_err();
    assert_eq!(err, Error::new(ErrorKind::CharOverflow, 2));
    assert_eq!(out, [0x61, 0x20AC]);

    let mut out = [0u32; 3];
    assert_eq!(decode_array(input, &mut out), Ok(3));
    assert_eq!(out, [0x61, 0x20AC, 0x62]);
}

#[cfg(test)]
#[test]
fn overflow_ignores_unread_bytes() {
    let mut out = [0u32; 2];

    // Once the output is full, the remaining bytes are never decoded.
    assert_eq!(
        decode_array(b"ab\xFF", &mut out),
        Err(Error::new(ErrorKind::CharOverflow, 2))
    );
    assert_eq!(
        decode_array(b"ab\xE2", &mut out),
        Err(Error::new(ErrorKind::CharOverflow, 2))
    );
    assert_eq!(
        decode_array(b"ab\xC0\x80", &mut out),
        Err(Error::new(ErrorKind::CharOverflow, 2))
    );
    assert_eq!(
        decode_null_terminated(b"ab\xE2\0", &mut out),
        Err(Error::new(ErrorKind::CharOverflow, 2))
    );
    assert_eq!(out, [0x61, 0x62]);

    assert_eq!(
        decode_array(b"\xFF", &mut []),
        Err(Error::new(ErrorKind::CharOverflow, 0))
    );
}

#[cfg(test)]
#[test]
fn empty_buffers() {
    assert_eq!(decode_array(b"", &mut []), Ok(0));
    assert_eq!(
        decode_array(b"a", &mut []),
        Err(Error::new(ErrorKind::CharOverflow, 0))
    );
}

#[cfg(test)]
#[test]
fn null_terminated() {
    let mut out = [0u32; 8];

    assert_eq!(decode_null_terminated(b"h\xC3\xA9\0junk\xFF", &mut out), Ok(2));
    assert_eq!(&out[..2], &[0x68, 0xE9]);

    // No terminator: the whole slice is the string.
    assert_eq!(decode_null_terminated(b"abc", &mut out), Ok(3));

    assert_eq!(decode_null_terminated(b"\0abc", &mut out), Ok(0));

    let err = decode_null_terminated(b"\xE2\x82\0\xAC", &mut out).unwrap_err();
    assert_eq!(err, Error::new(ErrorKind::UnexpectedTermination, 0));

    let mut small = [0u32; 2];
    let err = decode_null_terminated(b"abc\0", &mut small).unwrap_err();
    assert_eq!(err, Error::new(ErrorKind::CharOverflow, 2));
    assert_eq!(decode_null_terminated(b"ab\0c", &mut small), Ok(2));
}

#[cfg(test)]
#[test]
fn custom_sentinel() {
    enum Newline {}

    unsafe impl Sentinel<u8> for Newline {
        fn is_sentinel(value: &u8) -> bool {
            *value == b'\n'
        }
    }

    let mut out = [0u32; 8];
    assert_eq!(decode_terminated::<Newline>(b"ok\n\xFF", &mut out), Ok(2));
}

#[cfg(test)]
#[test]
fn c_strings() {
    let mut out = [0u32; 8];

    let s = CStr::from_bytes_with_nul(b"\xE2\x82\xAC!\0").unwrap();
    assert_eq!(decode_c_str(s, &mut out), Ok(2));
    assert_eq!(&out[..2], &[0x20AC, 0x21]);

    let raw = b"\xC3\xA9t\xC3\xA9\0garbage";
    assert_eq!(unsafe { decode_c_ptr(raw.as_ptr(), &mut out) }, Ok(3));
    assert_eq!(&out[..3], &[0xE9, 0x74, 0xE9]);
}

#[cfg(test)]
#[test]
fn generic_source() {
    let mut out = [0u32; 4];
    let bytes = [0xF0u8, 0x9F, 0xA6, 0x80];
    assert_eq!(decode_from(bytes, &mut out), Ok(1));
    assert_eq!(out[0], 0x1F980);
}

#[cfg(test)]
#[test]
fn measure_counts() {
    assert_eq!(measure(b""), Ok(0));
    assert_eq!(measure("a€🦀".as_bytes()), Ok(3));
    assert_eq!(
        measure(b"ab\xC0\x80"),
        Err(Error::new(ErrorKind::OverlongSequence, 2))
    );
    assert_eq!(
        measure(b"a\xE2\x82"),
        Err(Error::new(ErrorKind::UnexpectedTermination, 1))
    );
}
