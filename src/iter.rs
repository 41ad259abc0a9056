use core::iter::FusedIterator;

use crate::{Decoder, ErrorKind};

/// Creates an iterator over the code points encoded by `bytes`.
///
/// See [`CodePoints`].
#[inline]
pub fn code_points<I>(bytes: I) -> CodePoints<I::IntoIter>
where
    I: IntoIterator<Item = u8>,
{
    CodePoints {
        bytes: bytes.into_iter(),
        decoder: Decoder::new(),
        done: false,
    }
}

/// An iterator that lazily decodes the bytes of an inner iterator.
///
/// The first error is yielded as an `Err(_)` item, after which the iterator is over. If the inner
/// iterator ends in the middle of a character, a final [`ErrorKind::UnexpectedTermination`] is
/// yielded.
#[derive(Debug, Clone)]
pub struct CodePoints<I> {
    bytes: I,
    decoder: Decoder,
    done: bool,
}

impl<I> CodePoints<I> {
    /// Returns the inner iterator over the bytes that have not been decoded yet.
    #[inline(always)]
    pub fn into_inner(self) -> I {
        self.bytes
    }
}

impl<I> Iterator for CodePoints<I>
where
    I: Iterator<Item = u8>,
{
    type Item = Result<u32, ErrorKind>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let Some(byte) = self.bytes.next() else {
                self.done = true;
                if self.decoder.can_terminate() {
                    return None;
                } else {
                    return Some(Err(ErrorKind::UnexpectedTermination));
                }
            };

            match self.decoder.push(byte) {
                Ok(Some(code_point)) => return Some(Ok(code_point)),
                Ok(None) => (),
                Err(kind) => {
                    self.done = true;
                    return Some(Err(kind));
                }
            }
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            // Every byte yields at most one item, plus a possible truncation error.
            let (_, upper) = self.bytes.size_hint();
            (0, upper.and_then(|n| n.checked_add(1)))
        }
    }
}

impl<I> FusedIterator for CodePoints<I> where I: Iterator<Item = u8> {}

#[cfg(test)]
#[test]
fn lazy_decoding() {
    let mut it = code_points("a€".bytes());
    assert_eq!(it.next(), Some(Ok(0x61)));
    assert_eq!(it.next(), Some(Ok(0x20AC)));
    assert_eq!(it.next(), None);
    assert_eq!(it.next(), None);
}

#[cfg(test)]
#[test]
fn stops_after_error() {
    let mut it = code_points(b"a\xC0\x80b".iter().copied());
    assert_eq!(it.next(), Some(Ok(0x61)));
    assert_eq!(it.next(), Some(Err(ErrorKind::OverlongSequence)));
    assert_eq!(it.next(), None);

    let mut rest = it.into_inner();
    assert_eq!(rest.next(), Some(b'b'));
}

#[cfg(test)]
#[test]
fn reports_truncation_once() {
    let mut it = code_points([0x61u8, 0xF0, 0x9F]);
    assert_eq!(it.next(), Some(Ok(0x61)));
    assert_eq!(it.next(), Some(Err(ErrorKind::UnexpectedTermination)));
    assert_eq!(it.next(), None);
}
