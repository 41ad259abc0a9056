/// Indicates a sentinel value for the type `T`, marking the end of a terminated sequence.
///
/// ## Safety
///
/// The associated [`is_sentinel`] method must be pure. For any given input, it must either always
/// return `true`, or always return `false`.
///
/// The associated [`find_sentinel`] method must be coherent with the [`is_sentinel`] method. It
/// must return the smallest index such that evaluating [`is_sentinel`] on the value returns
/// `true`. Same for [`find_sentinel_infinite`].
///
/// [`is_sentinel`]: Sentinel::is_sentinel
/// [`find_sentinel`]: Sentinel::find_sentinel
/// [`find_sentinel_infinite`]: Sentinel::find_sentinel_infinite
pub unsafe trait Sentinel<T> {
    /// Determines whether `value` is a sentinel value.
    fn is_sentinel(value: &T) -> bool;

    /// Returns the index of the first sentinel value referenced by the provided pointer.
    ///
    /// ## Safety
    ///
    /// A sentinel value must exist in the allocated object referenced by the pointer. Every
    /// element up to (and including) the sentinel, must be initialized and valid for reads.
    unsafe fn find_sentinel_infinite(start: *const T) -> usize {
        let mut len = 0;
        while !Self::is_sentinel(unsafe { &*start.add(len) }) {
            len += 1;
        }
        len
    }

    /// Returns the index of the first sentinel value of the provided slice.
    #[inline]
    fn find_sentinel(slice: &[T]) -> Option<usize> {
        slice.iter().position(Self::is_sentinel)
    }

    /// Returns the part of `slice` that comes before its first sentinel value.
    ///
    /// If `slice` contains no sentinel value, it is returned whole.
    #[inline]
    fn terminated(slice: &[T]) -> &[T] {
        match Self::find_sentinel(slice) {
            Some(index) => &slice[..index],
            None => slice,
        }
    }
}

#[cfg(test)]
#[test]
fn default_search() {
    struct Newline;

    unsafe impl Sentinel<u8> for Newline {
        fn is_sentinel(value: &u8) -> bool {
            *value == b'\n'
        }
    }

    assert_eq!(Newline::find_sentinel(&b"ab\ncd\n"[..]), Some(2));
    assert_eq!(Newline::find_sentinel(&b"abcd"[..]), None);
    assert_eq!(Newline::terminated(&b"ab\ncd"[..]), b"ab");
    assert_eq!(Newline::terminated(&b"abcd"[..]), b"abcd");
    assert_eq!(unsafe { Newline::find_sentinel_infinite(b"xyz\n".as_ptr()) }, 3);
    assert_eq!(unsafe { Newline::find_sentinel_infinite(b"\n".as_ptr()) }, 0);
}
