//! String, raw string and rune literals.

use std::io::Read;

use gox_lexer_core::Rune;

use super::number::base_name;
use super::Scanner;
use crate::token::{LitKind, Token, TokenKind};

/// Go-style quoting of a rune for messages: `'g'`, `'\n'`.
fn quote_rune(ch: Rune) -> String {
    match ch.to_char() {
        Some(c) => format!("{c:?}"),
        None => ch.to_string(),
    }
}

impl<R: Read> Scanner<R> {
    /// Finish a literal token: copy out the text and arm the semicolon.
    pub(super) fn set_literal(&mut self, tok: &mut Token, kind: LitKind, lit: String, ok: bool) {
        tok.kind = TokenKind::Literal;
        tok.lit_kind = kind;
        tok.lit = lit;
        tok.bad = !ok;
        self.nlsemi = true;
    }

    fn segment_text(&self) -> String {
        String::from_utf8_lossy(self.source.segment()).into_owned()
    }

    pub(super) fn std_string(&mut self, tok: &mut Token) {
        let mut ok = true;
        let mut newline_reported = false;
        self.nextch();
        loop {
            let ch = self.ch();
            if ch == b'"' {
                self.nextch();
                break;
            }
            if ch == b'\\' {
                self.nextch();
                if !self.escape(b'"') {
                    ok = false;
                }
                continue;
            }
            if ch == b'\n' && !newline_reported {
                self.error("newline in string");
                newline_reported = true;
                ok = false;
            }
            if ch.is_eof() {
                self.source.error_at(tok.pos, "string literal not terminated");
                ok = false;
                break;
            }
            self.nextch();
        }
        let lit = self.segment_text();
        self.set_literal(tok, LitKind::String, lit, ok);
    }

    pub(super) fn raw_string(&mut self, tok: &mut Token) {
        let mut ok = true;
        self.nextch();
        loop {
            let ch = self.ch();
            if ch == b'`' {
                self.nextch();
                break;
            }
            if ch.is_eof() {
                self.source.error_at(tok.pos, "string literal not terminated");
                ok = false;
                break;
            }
            self.nextch();
        }
        let lit = self.segment_text();
        self.set_literal(tok, LitKind::String, lit, ok);
    }

    pub(super) fn rune(&mut self, tok: &mut Token) {
        let mut ok = true;
        let mut n = 0;
        self.nextch();
        loop {
            let ch = self.ch();
            if ch == b'\'' {
                if ok {
                    if n == 0 {
                        self.error("empty rune literal or unescaped ' in rune literal");
                        ok = false;
                    } else if n != 1 {
                        self.source
                            .error_at(tok.pos, "more than one character in rune literal");
                        ok = false;
                    }
                }
                self.nextch();
                break;
            }
            if ch == b'\\' {
                self.nextch();
                if !self.escape(b'\'') {
                    ok = false;
                }
                n += 1;
                continue;
            }
            if ch == b'\n' && ok {
                self.error("newline in rune literal");
                ok = false;
            }
            if ch.is_eof() {
                if ok {
                    self.source.error_at(tok.pos, "rune literal not terminated");
                    ok = false;
                }
                break;
            }
            self.nextch();
            n += 1;
        }
        let lit = self.segment_text();
        self.set_literal(tok, LitKind::Rune, lit, ok);
    }

    /// Check one escape sequence; the backslash has been consumed.
    ///
    /// Only `quote` (the enclosing quote) is a valid quote escape. Returns
    /// false after reporting a problem. At end of input it returns true and
    /// leaves the complaint to the caller.
    fn escape(&mut self, quote: u8) -> bool {
        let ch = self.ch();
        let (n, base, max): (u32, u32, u32) = match ch.to_ascii() {
            Some(c) if c == quote => {
                self.nextch();
                return true;
            }
            Some(b'a' | b'b' | b'f' | b'n' | b'r' | b't' | b'v' | b'\\') => {
                self.nextch();
                return true;
            }
            Some(b'0'..=b'7') => (3, 8, 255),
            Some(b'x') => {
                self.nextch();
                (2, 16, 255)
            }
            Some(b'u') => {
                self.nextch();
                (4, 16, 0x10_FFFF)
            }
            Some(b'U') => {
                self.nextch();
                (8, 16, 0x10_FFFF)
            }
            _ if ch.is_eof() => return true,
            _ => {
                self.error("unknown escape");
                return false;
            }
        };

        let mut x: u32 = 0;
        for _ in 0..n {
            let ch = self.ch();
            if ch.is_eof() {
                return true;
            }
            let d = match ch.to_ascii() {
                Some(b) if b.is_ascii_digit() => u32::from(b - b'0'),
                Some(b) if b.is_ascii_hexdigit() => u32::from(b.to_ascii_lowercase() - b'a') + 10,
                _ => base,
            };
            if d >= base {
                self.error(format!(
                    "invalid character {} in {} escape",
                    quote_rune(ch),
                    base_name(base)
                ));
                return false;
            }
            x = x * base + d;
            self.nextch();
        }

        if x > max && base == 8 {
            self.error(format!("octal escape value {x} > 255"));
            return false;
        }
        if x > max || (0xD800..0xE000).contains(&x) {
            self.error(format!("escape is invalid Unicode code point U+{x:04X}"));
            return false;
        }
        true
    }
}
