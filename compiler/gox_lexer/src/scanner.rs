//! The scanner: bytes in, tokens out.
//!
//! [`Scanner::next_token`] skips white space, then dispatches on the current
//! rune. Identifiers, numbers, strings and comments each have their own
//! routine (see the submodules); punctuation and operators are resolved
//! inline with at most two runes of lookahead. The only backtracking is for
//! `..`, which is rescanned as `.` via [`SourceBuffer::rewind`].
//!
//! # Semicolons
//!
//! After a name, a literal, one of `break continue fallthrough return`,
//! `++`, `--`, `)`, `]` or `}`, the next newline (or end of input) becomes a
//! `Semi` token whose `lit` is `"newline"` (or `"EOF"`). A block comment that
//! spans a line break counts as a newline.
//!
//! # Errors
//!
//! Lexical problems are reported through the [`SourceBuffer`] (error handler,
//! then [`ErrorPolicy`]) and scanning continues. A malformed literal is still
//! returned, with `bad` set.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use gox_lexer_core::rune::RUNE_SELF;
use gox_lexer_core::{Diagnostic, ErrorPolicy, Position, Rune, SourceBuffer};
use tracing::trace;

use crate::keywords;
use crate::lex_error::LexError;
use crate::mode::Mode;
use crate::token::{Operator, Token, TokenKind};

mod comment;
mod number;
mod quoted;

pub use comment::{Comment, CommentKind};

/// Outcome of one pass through the dispatch loop.
enum Step {
    Token(Token),
    /// Something was skipped (comment, invalid character); scan again.
    Continue,
}

/// Streaming scanner over any [`Read`] source.
pub struct Scanner<R> {
    source: SourceBuffer<R>,
    mode: Mode,
    /// Turn the next newline or EOF into a `Semi`.
    nlsemi: bool,
    /// Inside `/*! ... */` with [`Mode::BANG_COMMENTS`].
    in_bang_comment: bool,
    comments: Vec<Comment>,
    /// The first rune has been loaded.
    primed: bool,
    /// The iterator has yielded EOF or an error.
    finished: bool,
}

impl<R: Read> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Scanner {
            source: SourceBuffer::new(reader),
            mode: Mode::empty(),
            nlsemi: false,
            in_bang_comment: false,
            comments: Vec::new(),
            primed: false,
            finished: false,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Install an error sink called with `(line, col, message)` for every
    /// problem, before the error policy applies.
    #[must_use]
    pub fn with_error_handler(mut self, handler: impl FnMut(u32, u32, &str) + 'static) -> Self {
        self.source.set_error_handler(Some(Box::new(handler)));
        self
    }

    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.source.set_error_policy(policy);
        self
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// A new scanner over `reader` with this scanner's configuration.
    ///
    /// Mode and error policy are copied. The error handler, collected
    /// diagnostics and comments, and all cursor state are not.
    pub fn fork<S: Read>(&self, reader: S) -> Scanner<S> {
        Scanner::new(reader)
            .with_mode(self.mode)
            .with_error_policy(self.source.error_policy())
    }

    /// Position of the next unread rune.
    pub fn pos(&self) -> Position {
        self.source.pos()
    }

    /// Comments recorded so far under [`Mode::COMMENTS`] or
    /// [`Mode::DIRECTIVES`].
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn take_comments(&mut self) -> Vec<Comment> {
        std::mem::take(&mut self.comments)
    }

    /// Diagnostics collected under [`ErrorPolicy::Collect`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.source.diagnostics()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.source.take_diagnostics()
    }

    /// Scan the next token.
    ///
    /// After the end of input this keeps returning `Eof`. An error means the
    /// stream failed or the error policy asked to abort; the scanner is at
    /// end of input afterwards.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        if !self.primed {
            self.primed = true;
            self.source.nextch();
        }

        let nlsemi = std::mem::take(&mut self.nlsemi);
        let token = loop {
            if let Step::Token(token) = self.scan(nlsemi)? {
                break token;
            }
        };

        if let Some(err) = self.source.take_fatal() {
            self.nlsemi = false;
            return Err(err.into());
        }
        trace!(kind = %token.kind, lit = %token.lit, pos = %token.pos, "token");
        Ok(token)
    }

    #[inline]
    fn ch(&self) -> Rune {
        self.source.ch()
    }

    #[inline]
    fn nextch(&mut self) {
        self.source.nextch();
    }

    #[inline]
    fn error(&mut self, msg: impl Into<String>) {
        self.source.error(msg);
    }

    /// One pass of the dispatch loop. `nlsemi` is the pending-semicolon
    /// state from before the pass started; it survives skipped comments.
    fn scan(&mut self, nlsemi: bool) -> Result<Step, LexError> {
        self.source.stop();
        let start = self.source.pos();
        while self.ch() == b' '
            || self.ch() == b'\t'
            || self.ch() == b'\r'
            || (self.ch() == b'\n' && !nlsemi)
        {
            self.nextch();
        }

        let pos = self.source.pos();
        let blank = pos.line > start.line || start.col == 1;
        self.source.start();
        let mut tok = Token::new(pos, blank);

        let ch = self.ch();
        if ch.is_letter() || (ch >= RUNE_SELF && self.at_ident_char(true)) {
            self.nextch();
            self.ident(&mut tok);
            return Ok(Step::Token(tok));
        }

        // every non-ASCII rune starts an identifier; only EOF is left
        let Some(b) = ch.to_ascii() else {
            if nlsemi {
                tok.set_terminator("EOF");
            } else {
                tok.kind = TokenKind::Eof;
            }
            return Ok(Step::Token(tok));
        };

        match b {
            b'\n' => {
                self.nextch();
                tok.set_terminator("newline");
            }
            b'0'..=b'9' => self.number(&mut tok, false),
            b'"' => self.std_string(&mut tok),
            b'`' => self.raw_string(&mut tok),
            b'\'' => self.rune(&mut tok),

            b'(' => self.punct(&mut tok, TokenKind::Lparen),
            b'[' => self.punct(&mut tok, TokenKind::Lbrack),
            b'{' => self.punct(&mut tok, TokenKind::Lbrace),
            b',' => self.punct(&mut tok, TokenKind::Comma),
            b';' => {
                self.nextch();
                tok.set_terminator("semicolon");
            }
            b')' | b']' | b'}' => {
                let kind = match b {
                    b')' => TokenKind::Rparen,
                    b']' => TokenKind::Rbrack,
                    _ => TokenKind::Rbrace,
                };
                self.punct(&mut tok, kind);
                self.nlsemi = true;
            }
            b':' => {
                self.nextch();
                if self.ch() == b'=' {
                    self.nextch();
                    tok.kind = TokenKind::Define;
                } else {
                    tok.kind = TokenKind::Colon;
                }
            }
            b'.' => {
                self.nextch();
                if self.ch().is_decimal() {
                    self.number(&mut tok, true);
                    return Ok(Step::Token(tok));
                }
                if self.ch() == b'.' {
                    self.nextch();
                    if self.ch() == b'.' {
                        self.nextch();
                        tok.kind = TokenKind::DotDotDot;
                        return Ok(Step::Token(tok));
                    }
                    // `..` is two dots: back up to the first and take it alone
                    self.source.rewind()?;
                    self.nextch();
                }
                tok.kind = TokenKind::Dot;
            }

            b'+' | b'-' => {
                self.nextch();
                let op = if b == b'+' { Operator::Add } else { Operator::Sub };
                if self.ch() == b {
                    self.nextch();
                    self.nlsemi = true;
                    tok.set_op(TokenKind::IncOp, op);
                } else {
                    self.assign_op(&mut tok, op);
                }
            }
            b'*' => {
                self.nextch();
                if self.in_bang_comment && self.ch() == b'/' {
                    self.nextch();
                    self.in_bang_comment = false;
                    return Ok(Step::Continue);
                }
                // `*` alone is Star, not Operator
                if self.ch() == b'=' {
                    self.nextch();
                    tok.set_op(TokenKind::AssignOp, Operator::Mul);
                } else {
                    tok.set_op(TokenKind::Star, Operator::Mul);
                }
            }
            b'/' => {
                self.nextch();
                if self.ch() == b'/' {
                    self.nextch();
                    self.line_comment(pos);
                    return Ok(Step::Continue);
                }
                if self.ch() == b'*' {
                    self.nextch();
                    if self.mode.contains(Mode::BANG_COMMENTS) && self.ch() == b'!' {
                        self.nextch();
                        self.in_bang_comment = true;
                        return Ok(Step::Continue);
                    }
                    self.full_comment(pos);
                    if nlsemi && self.source.pos().line != pos.line {
                        tok.set_terminator("newline");
                        return Ok(Step::Token(tok));
                    }
                    return Ok(Step::Continue);
                }
                self.assign_op(&mut tok, Operator::Div);
            }
            b'%' => {
                self.nextch();
                self.assign_op(&mut tok, Operator::Rem);
            }
            b'&' => {
                self.nextch();
                if self.ch() == b'&' {
                    self.nextch();
                    tok.set_op(TokenKind::Operator, Operator::AndAnd);
                } else if self.ch() == b'^' {
                    self.nextch();
                    self.assign_op(&mut tok, Operator::AndNot);
                } else {
                    self.assign_op(&mut tok, Operator::And);
                }
            }
            b'|' => {
                self.nextch();
                if self.ch() == b'|' {
                    self.nextch();
                    tok.set_op(TokenKind::Operator, Operator::OrOr);
                } else {
                    self.assign_op(&mut tok, Operator::Or);
                }
            }
            b'^' => {
                self.nextch();
                self.assign_op(&mut tok, Operator::Xor);
            }
            b'<' => {
                self.nextch();
                if self.ch() == b'=' {
                    self.nextch();
                    tok.set_op(TokenKind::Operator, Operator::Leq);
                } else if self.ch() == b'<' {
                    self.nextch();
                    self.assign_op(&mut tok, Operator::Shl);
                } else if self.ch() == b'-' {
                    self.nextch();
                    tok.set_op(TokenKind::Arrow, Operator::Recv);
                } else {
                    tok.set_op(TokenKind::Operator, Operator::Lss);
                }
            }
            b'>' => {
                self.nextch();
                if self.ch() == b'=' {
                    self.nextch();
                    tok.set_op(TokenKind::Operator, Operator::Geq);
                } else if self.ch() == b'>' {
                    self.nextch();
                    self.assign_op(&mut tok, Operator::Shr);
                } else {
                    tok.set_op(TokenKind::Operator, Operator::Gtr);
                }
            }
            b'=' => {
                self.nextch();
                if self.ch() == b'=' {
                    self.nextch();
                    tok.set_op(TokenKind::Operator, Operator::Eql);
                } else {
                    tok.kind = TokenKind::Assign;
                }
            }
            b'!' => {
                self.nextch();
                if self.ch() == b'=' {
                    self.nextch();
                    tok.set_op(TokenKind::Operator, Operator::Neq);
                } else {
                    tok.set_op(TokenKind::Operator, Operator::Not);
                }
            }
            b'~' => {
                self.nextch();
                tok.set_op(TokenKind::Operator, Operator::Tilde);
            }

            _ => {
                self.error(format!("invalid character {ch}"));
                self.nextch();
                return Ok(Step::Continue);
            }
        }

        Ok(Step::Token(tok))
    }

    fn punct(&mut self, tok: &mut Token, kind: TokenKind) {
        self.nextch();
        tok.kind = kind;
    }

    /// Shared tail of the assignable operators: `op` or `op=`.
    fn assign_op(&mut self, tok: &mut Token, op: Operator) {
        if self.ch() == b'=' {
            self.nextch();
            tok.set_op(TokenKind::AssignOp, op);
        } else {
            tok.set_op(TokenKind::Operator, op);
        }
    }

    fn ident(&mut self, tok: &mut Token) {
        while self.ch().is_letter() || self.ch().is_decimal() {
            self.nextch();
        }
        if self.ch() >= RUNE_SELF {
            while self.at_ident_char(false) {
                self.nextch();
            }
        }

        let word = self.source.segment();
        if let Some(kind) = keywords::lookup(word) {
            self.nlsemi = matches!(
                kind,
                TokenKind::Break | TokenKind::Continue | TokenKind::Fallthrough | TokenKind::Return
            );
            tok.kind = kind;
            return;
        }
        tok.kind = TokenKind::Name;
        tok.lit = String::from_utf8_lossy(word).into_owned();
        self.nlsemi = true;
    }

    /// Whether the current rune can continue (or, with `first`, start) an
    /// identifier. Digits cannot start one and non-letters are invalid, but
    /// both are reported and accepted so the identifier stays in one piece.
    fn at_ident_char(&mut self, first: bool) -> bool {
        let ch = self.ch();
        if ch.is_unicode_letter() || ch == b'_' {
            // ok
        } else if ch.is_unicode_digit() {
            if first {
                self.error(format!("identifier cannot begin with digit {ch}"));
            }
        } else if ch >= RUNE_SELF {
            self.error(format!("invalid character {ch} in identifier"));
        } else {
            return false;
        }
        true
    }
}

impl<'a> Scanner<&'a [u8]> {
    /// Scan an in-memory buffer.
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        Scanner::new(bytes)
    }
}

impl Scanner<File> {
    /// Scan a file, read incrementally.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LexError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LexError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Scanner::new(file))
    }
}

/// Yields tokens up to and including `Eof`, or up to the first error.
impl<R: Read> Iterator for Scanner<R> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let item = self.next_token();
        self.finished = !matches!(&item, Ok(tok) if tok.kind != TokenKind::Eof);
        Some(item)
    }
}

#[cfg(test)]
mod tests;
