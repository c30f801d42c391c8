//! Line and block comments, and the directives hidden in them.

use std::io::Read;

use gox_lexer_core::Position;

use super::Scanner;
use crate::mode::Mode;

/// Flavor of a recorded comment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommentKind {
    /// `// ...`
    Line,
    /// `/* ... */`
    Block,
    /// `//go:...`, `//line ...` or `/*line ...*/`
    Directive,
}

/// A comment surfaced by [`Mode::COMMENTS`] or [`Mode::DIRECTIVES`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    pub pos: Position,
    pub kind: CommentKind,
    /// Full comment text including `//` or `/* */`; a line comment stops
    /// before the newline.
    pub text: String,
}

fn classify(text: &[u8]) -> CommentKind {
    match text {
        [b'/', b'/', rest @ ..] if rest.starts_with(b"go:") || rest.starts_with(b"line ") => {
            CommentKind::Directive
        }
        [b'/', b'*', rest @ ..] if rest.starts_with(b"line ") => CommentKind::Directive,
        [b'/', b'/', ..] => CommentKind::Line,
        _ => CommentKind::Block,
    }
}

impl<R: Read> Scanner<R> {
    /// Scan a line comment whose `//` has been consumed.
    pub(super) fn line_comment(&mut self, pos: Position) {
        if self.mode.contains(Mode::COMMENTS) {
            self.skip_line();
            self.record_comment(pos);
            return;
        }

        let prefix: &[u8] = match self.ch().to_ascii() {
            Some(b'g') => b"go:",
            Some(b'l') => b"line ",
            _ => b"",
        };
        if prefix.is_empty() || !self.mode.contains(Mode::DIRECTIVES) || !self.eat_prefix(prefix) {
            self.source.stop();
            self.skip_line();
            return;
        }
        self.skip_line();
        self.record_comment(pos);
    }

    /// Scan a block comment whose `/*` has been consumed.
    pub(super) fn full_comment(&mut self, pos: Position) {
        if self.mode.contains(Mode::COMMENTS) {
            if self.skip_comment(pos) {
                self.record_comment(pos);
            }
            return;
        }

        if !self.mode.contains(Mode::DIRECTIVES) || !self.eat_prefix(b"line ") {
            self.source.stop();
            self.skip_comment(pos);
            return;
        }
        if self.skip_comment(pos) {
            self.record_comment(pos);
        }
    }

    /// Consume `prefix` rune by rune; stops at the first mismatch.
    fn eat_prefix(&mut self, prefix: &[u8]) -> bool {
        for &b in prefix {
            if self.ch() != b {
                return false;
            }
            self.nextch();
        }
        true
    }

    /// Skip to the newline, leaving it for the semicolon logic.
    fn skip_line(&mut self) {
        while !self.ch().is_eof() && self.ch() != b'\n' {
            self.nextch();
        }
    }

    /// Skip past the closing `*/`. Reports at `pos` and returns false if the
    /// input ends first.
    fn skip_comment(&mut self, pos: Position) -> bool {
        while !self.ch().is_eof() {
            while self.ch() == b'*' {
                self.nextch();
                if self.ch() == b'/' {
                    self.nextch();
                    return true;
                }
            }
            self.nextch();
        }
        self.source.error_at(pos, "unterminated comment");
        false
    }

    fn record_comment(&mut self, pos: Position) {
        let text = self.source.segment();
        let kind = classify(text);
        let text = String::from_utf8_lossy(text).into_owned();
        self.comments.push(Comment { pos, kind, text });
    }
}
