//! UTF-8 rune codec.
//!
//! Decoding is table driven: the first byte of a sequence is classified by a
//! 256-entry table that yields the expected sequence length and which of five
//! accept ranges the second byte must fall in. The narrow ranges exclude
//! overlong forms (`E0`, `F0`), UTF-16 surrogates (`ED`) and values above
//! U+10FFFF (`F4`).
//!
//! Every malformed input decodes to `(Rune::INVALID, 1)`, so a caller that
//! advances by the returned width always makes progress.

use std::fmt;

/// Maximum number of bytes in a UTF-8 encoded rune.
pub const UTF_MAX: usize = 4;

/// Bytes below this value are ASCII and represent themselves.
pub const RUNE_SELF: u8 = 0x80;

/// A decoded Unicode scalar value, or one of the sentinel states.
///
/// Sentinels: [`Rune::EOF`] (end of input), [`Rune::INVALID`] (U+FFFD, the
/// result of decoding a malformed sequence) and [`Rune::BOM`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rune(i32);

impl Rune {
    /// End of input.
    pub const EOF: Rune = Rune(-1);
    /// Replacement character produced for invalid encodings.
    pub const INVALID: Rune = Rune(0xFFFD);
    /// Byte order mark.
    pub const BOM: Rune = Rune(0xFEFF);
    /// Largest valid scalar value.
    pub const MAX: Rune = Rune(0x10_FFFF);

    /// Create a rune from a raw value. No validation is performed.
    #[inline]
    pub const fn new(value: i32) -> Self {
        Rune(value)
    }

    /// The raw value.
    #[inline]
    pub const fn value(self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn is_eof(self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn is_ascii(self) -> bool {
        0 <= self.0 && self.0 < RUNE_SELF as i32
    }

    /// The rune as a `char`, or `None` for EOF, surrogates and out-of-range
    /// values.
    #[inline]
    pub fn to_char(self) -> Option<char> {
        u32::try_from(self.0).ok().and_then(char::from_u32)
    }

    /// ASCII letter or underscore.
    #[inline]
    pub fn is_letter(self) -> bool {
        matches!(self.to_ascii(), Some(b'a'..=b'z' | b'A'..=b'Z' | b'_'))
    }

    #[inline]
    pub fn is_decimal(self) -> bool {
        matches!(self.to_ascii(), Some(b'0'..=b'9'))
    }

    #[inline]
    pub fn is_hex(self) -> bool {
        self.to_ascii().is_some_and(|b| b.is_ascii_hexdigit())
    }

    /// Any Unicode letter (including ASCII letters, excluding `_`).
    pub fn is_unicode_letter(self) -> bool {
        self.to_char().is_some_and(char::is_alphabetic)
    }

    /// Any Unicode digit.
    pub fn is_unicode_digit(self) -> bool {
        self.to_char().is_some_and(char::is_numeric)
    }

    /// The rune as an ASCII byte, if it is one.
    #[inline]
    pub fn to_ascii(self) -> Option<u8> {
        u8::try_from(self.0).ok().filter(u8::is_ascii)
    }

    /// ASCII lowercase of the rune; non-letters are returned unchanged.
    #[inline]
    #[must_use]
    pub fn to_ascii_lowercase(self) -> Rune {
        match self.to_ascii() {
            Some(b) => Rune::from(b.to_ascii_lowercase()),
            None => self,
        }
    }
}

impl From<u8> for Rune {
    #[inline]
    fn from(b: u8) -> Self {
        Rune(i32::from(b))
    }
}

impl From<char> for Rune {
    #[inline]
    #[allow(
        clippy::cast_possible_wrap,
        reason = "char values are at most 0x10FFFF and fit in i32"
    )]
    fn from(c: char) -> Self {
        Rune(c as i32)
    }
}

impl PartialEq<u8> for Rune {
    #[inline]
    fn eq(&self, other: &u8) -> bool {
        self.0 == i32::from(*other)
    }
}

impl PartialEq<char> for Rune {
    #[inline]
    fn eq(&self, other: &char) -> bool {
        *self == Rune::from(*other)
    }
}

impl PartialOrd<u8> for Rune {
    #[inline]
    fn partial_cmp(&self, other: &u8) -> Option<std::cmp::Ordering> {
        Some(self.0.cmp(&i32::from(*other)))
    }
}

impl fmt::Debug for Rune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rune({self})")
    }
}

/// Formats as `U+0041 'A'`; the quoted character is omitted for control
/// characters and non-scalar values.
impl fmt::Display for Rune {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            return f.write_str("EOF");
        }
        write!(f, "U+{:04X}", self.0)?;
        match self.to_char() {
            Some(c) if !c.is_control() => write!(f, " '{c}'"),
            _ => Ok(()),
        }
    }
}

// First-byte classification. The high nibble indexes `ACCEPT_RANGES`, the
// low three bits hold the sequence length.
const AS: u8 = 0xF0; // ASCII, size 1
const XX: u8 = 0xF1; // invalid, size 1
const S1: u8 = 0x02; // accept 0, size 2
const S2: u8 = 0x13; // accept 1, size 3
const S3: u8 = 0x03; // accept 0, size 3
const S4: u8 = 0x23; // accept 2, size 3
const S5: u8 = 0x34; // accept 3, size 4
const S6: u8 = 0x04; // accept 0, size 4
const S7: u8 = 0x44; // accept 4, size 4

/// Classification of every possible leading byte.
static FIRST: [u8; 256] = {
    let mut table = [XX; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = match i {
            0x00..=0x7F => AS,
            0xC2..=0xDF => S1,
            0xE0 => S2,
            0xE1..=0xEC | 0xEE..=0xEF => S3,
            0xED => S4,
            0xF0 => S5,
            0xF1..=0xF3 => S6,
            0xF4 => S7,
            _ => XX,
        };
        i += 1;
    }
    table
};

/// Valid range for the second byte of a multi-byte sequence.
#[derive(Clone, Copy)]
struct AcceptRange {
    lo: u8,
    hi: u8,
}

impl AcceptRange {
    #[inline]
    const fn contains(self, b: u8) -> bool {
        self.lo <= b && b <= self.hi
    }
}

const ACCEPT_RANGES: [AcceptRange; 5] = [
    AcceptRange { lo: 0x80, hi: 0xBF },
    AcceptRange { lo: 0xA0, hi: 0xBF },
    AcceptRange { lo: 0x80, hi: 0x9F },
    AcceptRange { lo: 0x90, hi: 0xBF },
    AcceptRange { lo: 0x80, hi: 0x8F },
];

/// Range of every continuation byte after the second.
const CONTINUATION: AcceptRange = ACCEPT_RANGES[0];

const MASK_X: u8 = 0b0011_1111;
const MASK_2: u8 = 0b0001_1111;
const MASK_3: u8 = 0b0000_1111;
const MASK_4: u8 = 0b0000_0111;

/// Decode the first rune in `p`, returning it and its width in bytes.
///
/// Malformed or truncated sequences yield `(Rune::INVALID, 1)`. An empty
/// slice yields `(Rune::EOF, 0)`, the only zero-width result.
pub fn decode(p: &[u8]) -> (Rune, usize) {
    let Some(&p0) = p.first() else {
        return (Rune::EOF, 0);
    };
    let x = FIRST[usize::from(p0)];
    if x == AS {
        return (Rune::from(p0), 1);
    }
    if x == XX {
        return (Rune::INVALID, 1);
    }

    let size = usize::from(x & 7);
    if p.len() < size {
        return (Rune::INVALID, 1);
    }
    let b1 = p[1];
    if !ACCEPT_RANGES[usize::from(x >> 4)].contains(b1) {
        return (Rune::INVALID, 1);
    }
    if size == 2 {
        let r = i32::from(p0 & MASK_2) << 6 | i32::from(b1 & MASK_X);
        return (Rune(r), 2);
    }
    let b2 = p[2];
    if !CONTINUATION.contains(b2) {
        return (Rune::INVALID, 1);
    }
    if size == 3 {
        let r = i32::from(p0 & MASK_3) << 12 | i32::from(b1 & MASK_X) << 6 | i32::from(b2 & MASK_X);
        return (Rune(r), 3);
    }
    let b3 = p[3];
    if !CONTINUATION.contains(b3) {
        return (Rune::INVALID, 1);
    }
    let r = i32::from(p0 & MASK_4) << 18
        | i32::from(b1 & MASK_X) << 12
        | i32::from(b2 & MASK_X) << 6
        | i32::from(b3 & MASK_X);
    (Rune(r), 4)
}

/// A rune encoded as 1 to 4 UTF-8 bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodedRune {
    bytes: [u8; UTF_MAX],
    width: u8,
}

impl EncodedRune {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.width)]
    }

    /// Number of bytes in the encoding (1..=4).
    #[inline]
    pub fn width(&self) -> usize {
        usize::from(self.width)
    }
}

/// Encode `r` as UTF-8.
///
/// Values that are not scalar values (EOF, surrogates, anything above
/// U+10FFFF) encode U+FFFD.
#[allow(
    clippy::cast_possible_truncation,
    reason = "UTF-8 encodings are at most 4 bytes"
)]
pub fn encode(r: Rune) -> EncodedRune {
    let c = r.to_char().unwrap_or(char::REPLACEMENT_CHARACTER);
    let mut bytes = [0; UTF_MAX];
    let width = c.encode_utf8(&mut bytes).len() as u8;
    EncodedRune { bytes, width }
}

/// Number of bytes needed to encode `r`, or `None` if it is not a scalar
/// value.
pub fn rune_len(r: Rune) -> Option<usize> {
    r.to_char().map(char::len_utf8)
}

/// Report whether `p` consists entirely of valid UTF-8 encoded runes.
pub fn valid(mut p: &[u8]) -> bool {
    while !p.is_empty() {
        let (r, width) = decode(p);
        if r == Rune::INVALID && width == 1 {
            return false;
        }
        p = &p[width..];
    }
    true
}

/// Report whether `p` begins with a full UTF-8 encoding of a rune.
///
/// An invalid encoding counts as full, since it decodes as a width-1
/// error rune. A strict prefix of a valid sequence does not.
pub fn full_rune(p: &[u8]) -> bool {
    let Some(&p0) = p.first() else {
        return false;
    };
    let x = FIRST[usize::from(p0)];
    if p.len() >= usize::from(x & 7) {
        // ASCII, invalid, or a complete valid length
        return true;
    }
    if p.len() > 1 && !ACCEPT_RANGES[usize::from(x >> 4)].contains(p[1]) {
        return true;
    }
    p.len() > 2 && !CONTINUATION.contains(p[2])
}
