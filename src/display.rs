use core::fmt;
use core::fmt::Write;

/// Returns an implementation of [`fmt::Display`] and [`fmt::Debug`] for a sequence of code
/// points.
///
/// Values that are not Unicode scalar values (surrogates, or anything above `0x10FFFF`) are
/// displayed as the [`REPLACEMENT_CHARACTER`].
///
/// [`REPLACEMENT_CHARACTER`]: core::char::REPLACEMENT_CHARACTER
#[inline(always)]
pub fn display(code_points: &[u32]) -> Display<'_> {
    Display(code_points)
}

/// Implements [`fmt::Display`] and [`fmt::Debug`] for a slice of code points.
#[derive(Clone, Copy)]
pub struct Display<'a>(&'a [u32]);

impl Display<'_> {
    fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.0
            .iter()
            .map(|&c| char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER))
    }
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for c in self.chars() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_char('"')?;
        for c in self.chars() {
            fmt::Display::fmt(&c.escape_debug(), f)?;
        }
        f.write_char('"')
    }
}

#[cfg(test)]
#[test]
fn display_code_points() {
    use std::format;

    let cps = [0x68, 0xE9, 0x20AC, 0x1F980];
    assert_eq!(format!("{}", display(&cps)), "hé€🦀");
    assert_eq!(format!("{}", display(&[])), "");
}

#[cfg(test)]
#[test]
fn invalid_scalars_are_replaced() {
    use std::format;

    let cps = [0x61, 0xD800, 0x110000, 0x62];
    assert_eq!(format!("{}", display(&cps)), "a\u{FFFD}\u{FFFD}b");
    assert_eq!(format!("{:?}", display(&[0x61, 0x0A, 0x22])), "\"a\\n\\\"\"");
}
