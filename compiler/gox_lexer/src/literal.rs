//! Values of string and rune literals.
//!
//! The scanner validates literals and reports problems; these functions turn
//! the text of a valid literal into its value. They return `None` for text
//! that is not a well-formed literal instead of reporting anything.

use gox_lexer_core::rune::{self, Rune};
use memchr::{memchr, memchr2};

/// Result of one escape sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Escaped {
    /// `\NNN`, `\xHH` and the single-character escapes: one byte.
    Byte(u8),
    /// `\uHHHH` and `\UHHHHHHHH`: a scalar value, stored as UTF-8.
    Char(char),
}

impl Escaped {
    fn push_to(self, out: &mut Vec<u8>) {
        match self {
            Escaped::Byte(b) => out.push(b),
            Escaped::Char(c) => out.extend_from_slice(rune::encode(Rune::from(c)).as_bytes()),
        }
    }
}

/// Decode the escape at the start of `s` (just after the backslash).
/// Returns the value and the number of bytes used.
fn unescape(s: &[u8], quote: u8) -> Option<(Escaped, usize)> {
    let &c = s.first()?;
    let simple = match c {
        b'a' => Some(0x07),
        b'b' => Some(0x08),
        b'f' => Some(0x0C),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        b'v' => Some(0x0B),
        b'\\' => Some(b'\\'),
        _ if c == quote => Some(quote),
        _ => None,
    };
    if let Some(b) = simple {
        return Some((Escaped::Byte(b), 1));
    }

    let (skip, len, radix) = match c {
        b'0'..=b'7' => (0, 3, 8),
        b'x' => (1, 2, 16),
        b'u' => (1, 4, 16),
        b'U' => (1, 8, 16),
        _ => return None,
    };
    let digits = s.get(skip..skip + len)?;
    if !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let value = u32::from_str_radix(std::str::from_utf8(digits).ok()?, radix).ok()?;
    let escaped = match c {
        b'u' | b'U' => Escaped::Char(char::from_u32(value)?),
        _ => Escaped::Byte(u8::try_from(value).ok()?),
    };
    Some((escaped, skip + len))
}

/// The bytes of a string literal, either `"interpreted"` or `` `raw` ``.
///
/// Escapes are resolved; `\xHH` and octal escapes may produce bytes that are
/// not valid UTF-8. Carriage returns are dropped from raw strings.
pub fn string_value(lit: &str) -> Option<Vec<u8>> {
    match lit.as_bytes() {
        [b'`', body @ .., b'`'] => {
            if memchr(b'`', body).is_some() {
                return None;
            }
            if memchr(b'\r', body).is_none() {
                return Some(body.to_vec());
            }
            Some(body.iter().copied().filter(|&b| b != b'\r').collect())
        }
        [b'"', body @ .., b'"'] => interpreted(body, b'"'),
        _ => None,
    }
}

fn interpreted(body: &[u8], quote: u8) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(body.len());
    let mut rest = body;
    while let Some(i) = memchr(b'\\', rest) {
        let plain = &rest[..i];
        if memchr2(b'\n', quote, plain).is_some() {
            return None;
        }
        out.extend_from_slice(plain);
        let (value, used) = unescape(&rest[i + 1..], quote)?;
        value.push_to(&mut out);
        rest = &rest[i + 1 + used..];
    }
    if memchr2(b'\n', quote, rest).is_some() {
        return None;
    }
    out.extend_from_slice(rest);
    Some(out)
}

/// The character of a rune literal such as `'a'`, `'\n'` or `'é'`.
///
/// Byte escapes denote the code point of the same value: `'\xff'` is
/// U+00FF.
pub fn rune_value(lit: &str) -> Option<char> {
    let body = lit.strip_prefix('\'')?.strip_suffix('\'')?;
    if let Some(esc) = body.strip_prefix('\\') {
        let (value, used) = unescape(esc.as_bytes(), b'\'')?;
        if used != esc.len() {
            return None;
        }
        return Some(match value {
            Escaped::Byte(b) => char::from(b),
            Escaped::Char(c) => c,
        });
    }
    let mut chars = body.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c != '\n' && c != '\'' => Some(c),
        _ => None,
    }
}
