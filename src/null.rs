use crate::Sentinel;

/// The [`Sentinel`] that terminates C-like strings: the `0x00` byte.
///
/// [`decode_null_terminated`] and [`decode_c_ptr`] only hand the bytes before this terminator to
/// the decoder, so locating it is the one linear pass they make besides decoding. With the
/// `memchr` or `libc` features, that search is vectorized.
///
/// Both `u8` and `i8` (the C `char` on most targets) are supported.
///
/// [`decode_null_terminated`]: crate::decode_null_terminated
/// [`decode_c_ptr`]: crate::decode_c_ptr
pub enum Null {}

unsafe impl Sentinel<u8> for Null {
    #[inline(always)]
    fn is_sentinel(value: &u8) -> bool {
        *value == 0
    }

    #[inline(always)]
    #[cfg(all(feature = "memchr", not(feature = "libc")))]
    fn find_sentinel(slice: &[u8]) -> Option<usize> {
        memchr::memchr(0, slice)
    }

    #[inline(always)]
    #[cfg(feature = "libc")]
    fn find_sentinel(slice: &[u8]) -> Option<usize> {
        let ret =
            unsafe { libc::memchr(slice.as_ptr() as _, b'\0' as _, slice.len()) as *const u8 };
        if ret.is_null() {
            None
        } else {
            Some(unsafe { ret.offset_from(slice.as_ptr()) } as usize)
        }
    }

    #[cfg(feature = "libc")]
    #[inline(always)]
    unsafe fn find_sentinel_infinite(start: *const u8) -> usize {
        unsafe { libc::strlen(start as _) }
    }
}

unsafe impl Sentinel<i8> for Null {
    #[inline(always)]
    fn is_sentinel(value: &i8) -> bool {
        *value == 0
    }

    #[inline(always)]
    #[cfg(all(feature = "memchr", not(feature = "libc")))]
    fn find_sentinel(slice: &[i8]) -> Option<usize> {
        // SAFETY:
        //  `i8` and `u8` have the same size and alignment, and every bit pattern is valid for both.
        memchr::memchr(0, unsafe { &*(slice as *const [i8] as *const [u8]) })
    }

    #[inline(always)]
    #[cfg(feature = "libc")]
    fn find_sentinel(slice: &[i8]) -> Option<usize> {
        let ret =
            unsafe { libc::memchr(slice.as_ptr() as _, b'\0' as _, slice.len()) as *const i8 };
        if ret.is_null() {
            None
        } else {
            Some(unsafe { ret.offset_from(slice.as_ptr()) } as usize)
        }
    }

    #[cfg(feature = "libc")]
    #[inline(always)]
    unsafe fn find_sentinel_infinite(start: *const i8) -> usize {
        unsafe { libc::strlen(start as _) }
    }
}

#[cfg(test)]
#[test]
fn find_null() {
    assert_eq!(Null::find_sentinel(&b"abc\0def"[..]), Some(3));
    assert_eq!(Null::find_sentinel(&b"\0"[..]), Some(0));
    assert_eq!(Null::find_sentinel(&b"abc"[..]), None);
    assert_eq!(Null::find_sentinel(&b""[..]), None);
    assert_eq!(unsafe { Null::find_sentinel_infinite(b"h\xC3\xA9\0!".as_ptr()) }, 3);
}

#[cfg(test)]
#[test]
fn find_null_c_chars() {
    let chars: [i8; 5] = [0x68, -61, -87, 0, 0x21];
    assert_eq!(Null::find_sentinel(&chars[..]), Some(3));
    assert_eq!(Null::find_sentinel(&chars[..3]), None);
    assert_eq!(Null::find_sentinel(&[0i8, 1][..]), Some(0));
    assert_eq!(unsafe { Null::find_sentinel_infinite(chars.as_ptr()) }, 3);
}
