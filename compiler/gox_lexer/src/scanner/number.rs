//! Numeric literals.
//!
//! Forms: decimal, `0x` hex, `0o` octal, `0b` binary and legacy octal (a
//! bare leading `0`); optional fraction, exponent (`e` for decimal, `p` for
//! hex) and imaginary suffix `i`; `_` separators between digits.
//!
//! Problems are collected while scanning and reported once the whole
//! literal is known, first failure wins: no digits, wrong exponent, invalid
//! digit, misplaced `_`.

use std::io::Read;

use super::Scanner;
use crate::token::{LitKind, Token};

/// `digsep` bit: at least one digit.
const DIGIT: u8 = 1;
/// `digsep` bit: at least one `_`.
const SEP: u8 = 2;

pub(crate) fn base_name(base: u32) -> &'static str {
    match base {
        2 => "binary",
        8 => "octal",
        10 => "decimal",
        _ => "hexadecimal",
    }
}

/// Letters that can never be hex digits but are swallowed into a hex
/// literal so `0x1g` stays one (bad) token. `p` and `i` keep their meaning
/// as exponent and imaginary suffix.
fn is_stray_hex_letter(b: u8) -> bool {
    let b = b.to_ascii_lowercase();
    matches!(b, b'g'..=b'z') && b != b'p' && b != b'i'
}

/// Index of the first misplaced `_` in a numeric literal, if any.
///
/// A `_` must sit between two digits; a base prefix counts as a digit.
pub(crate) fn invalid_sep(lit: &[u8]) -> Option<usize> {
    // previous character class: b'0' digit, b'_' separator, b'.' anything else
    let mut prefix = b' ';
    let mut d = b'.';
    let mut i = 0;

    if lit.len() >= 2 && lit[0] == b'0' {
        prefix = lit[1].to_ascii_lowercase();
        if matches!(prefix, b'x' | b'o' | b'b') {
            d = b'0';
            i = 2;
        }
    }

    while i < lit.len() {
        let p = d;
        d = lit[i];
        if d == b'_' {
            if p != b'0' {
                return Some(i);
            }
        } else if d.is_ascii_digit() || (prefix == b'x' && d.is_ascii_hexdigit()) {
            d = b'0';
        } else {
            if p == b'_' {
                return Some(i - 1);
            }
            d = b'.';
        }
        i += 1;
    }
    if d == b'_' {
        return Some(lit.len() - 1);
    }
    None
}

impl<R: Read> Scanner<R> {
    /// Scan a number starting at the current rune, or right after a `.` that
    /// has been consumed when `seen_point` is set.
    pub(super) fn number(&mut self, tok: &mut Token, mut seen_point: bool) {
        let start = tok.pos;
        let mut ok = true;
        let mut kind = LitKind::Int;
        let mut base = 10;
        // 0 (decimal), b'0' (legacy octal), b'x', b'o' or b'b'
        let mut prefix = 0u8;
        let mut digsep = 0u8;
        let mut invalid = None;

        if !seen_point {
            if self.ch() == b'0' {
                self.nextch();
                match self.ch().to_ascii_lowercase().to_ascii() {
                    Some(b'x') => {
                        self.nextch();
                        base = 16;
                        prefix = b'x';
                    }
                    Some(b'o') => {
                        self.nextch();
                        base = 8;
                        prefix = b'o';
                    }
                    Some(b'b') => {
                        self.nextch();
                        base = 2;
                        prefix = b'b';
                    }
                    _ => {
                        base = 8;
                        prefix = b'0';
                        // the leading 0 is a digit
                        digsep = DIGIT;
                    }
                }
            }
            digsep |= self.digits(base, start.offset, &mut invalid);
            if self.ch() == b'.' {
                if prefix == b'o' || prefix == b'b' {
                    self.error(format!("invalid radix point in {} literal", base_name(base)));
                    ok = false;
                }
                self.nextch();
                seen_point = true;
            }
        }

        if seen_point {
            kind = LitKind::Float;
            digsep |= self.digits(base, start.offset, &mut invalid);
        }

        if digsep & DIGIT == 0 && ok {
            self.error(format!("{} literal has no digits", base_name(base)));
            ok = false;
        }

        let e = self.ch().to_ascii_lowercase();
        if e == b'e' || e == b'p' {
            if ok {
                let marker = self.ch().to_char().unwrap_or('e');
                if e == b'e' && prefix != 0 && prefix != b'0' {
                    self.error(format!("{marker:?} exponent requires decimal mantissa"));
                    ok = false;
                } else if e == b'p' && prefix != b'x' {
                    self.error(format!("{marker:?} exponent requires hexadecimal mantissa"));
                    ok = false;
                }
            }
            self.nextch();
            kind = LitKind::Float;
            if self.ch() == b'+' || self.ch() == b'-' {
                self.nextch();
            }
            digsep = self.digits(10, start.offset, &mut None) | (digsep & SEP);
            if digsep & DIGIT == 0 && ok {
                self.error("exponent has no digits");
                ok = false;
            }
        } else if prefix == b'x' && kind == LitKind::Float && ok {
            self.error("hexadecimal mantissa requires a 'p' exponent");
            ok = false;
        }

        if self.ch() == b'i' {
            kind = LitKind::Imag;
            self.nextch();
        }

        let lit = String::from_utf8_lossy(self.source.segment()).into_owned();

        // A legacy-octal float or imaginary literal is decimal (`09.5`,
        // `09i`), so out-of-range digits only count for integers. Stray hex
        // letters are wrong in any form.
        if let Some(at) = invalid {
            if ok && (kind == LitKind::Int || base == 16) {
                // index the raw bytes: `lit` is lossy and may be longer
                let digit = char::from(self.source.segment()[at]);
                self.source.error_at(
                    start.shifted(offset_u32(at)),
                    format!("invalid digit {digit:?} in {} literal", base_name(base)),
                );
                ok = false;
            }
        }

        if digsep & SEP != 0 && ok {
            if let Some(at) = invalid_sep(self.source.segment()) {
                self.source.error_at(
                    start.shifted(offset_u32(at)),
                    "'_' must separate successive digits",
                );
                ok = false;
            }
        }

        self.set_literal(tok, kind, lit, ok);
    }

    /// Consume a run of digits and `_`, returning the `digsep` bits seen.
    /// The first digit not valid in `base` is recorded in `invalid` as an
    /// offset from `start`. Stray hex letters are consumed and recorded but
    /// do not count as digits.
    fn digits(&mut self, base: u32, start: usize, invalid: &mut Option<usize>) -> u8 {
        let mut digsep = 0;
        while let Some(b) = self.ch().to_ascii() {
            let (digit, valid) = match b {
                b'_' => {
                    digsep |= SEP;
                    self.nextch();
                    continue;
                }
                b'0'..=b'9' => (true, u32::from(b - b'0') < base),
                _ if base == 16 && b.is_ascii_hexdigit() => (true, true),
                _ if base == 16 && is_stray_hex_letter(b) => (false, false),
                _ => break,
            };
            if !valid && invalid.is_none() {
                *invalid = Some(self.source.pos().offset - start);
            }
            if digit {
                digsep |= DIGIT;
            }
            self.nextch();
        }
        digsep
    }
}

/// Offsets inside one literal on one line always fit.
fn offset_u32(offset: usize) -> u32 {
    u32::try_from(offset).unwrap_or(u32::MAX)
}
