//! Lexer for the gox language.
//!
//! gox is a brace-delimited, C-family language with optional semicolons:
//! the scanner inserts them at line ends after tokens that can end a
//! statement. This crate turns a byte stream into [`Token`]s.
//!
//! # Architecture
//!
//! ```text
//! Read ──► SourceBuffer ──► Scanner ──► Token
//!          (gox_lexer_core)    │
//!                              ├── keywords (perfect-hash table)
//!                              └── diagnostics / comments (side channels)
//! ```
//!
//! - [`Scanner`] pulls runes from a [`SourceBuffer`](gox_lexer_core::SourceBuffer),
//!   which refills from the reader on demand, so input of any size is
//!   scanned with a bounded window.
//! - Lexical problems never stop the scan. They go to the optional error
//!   handler and are collected as [`Diagnostic`]s (or, with
//!   [`ErrorPolicy::Abort`], end the scan with a [`LexError`]).
//! - [`literal`] decodes the values of string and rune literals.

mod keywords;
mod lex_error;
pub mod literal;
mod mode;
mod scanner;
mod token;

pub use gox_lexer_core::{Diagnostic, ErrorPolicy, Position, Rune, SourceError};
pub use keywords::{keyword_hash, KeywordTable, KeywordTableError, KEYWORDS};
pub use lex_error::LexError;
pub use mode::Mode;
pub use scanner::{Comment, CommentKind, Scanner};
pub use token::{
    operator_string, token_string, LitKind, Operator, Precedence, Token, TokenKind,
};

/// Every token of an in-memory source, with the problems found on the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tokenized {
    /// Tokens in order; the last one is `Eof`.
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Tokenized {
    /// Token kinds only, handy for assertions.
    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|tok| tok.kind).collect()
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Scan all of `source`.
///
/// Reading from memory cannot fail and diagnostics are collected, so the
/// only error is [`SourceError::Aborted`] under a non-default policy, which
/// this function never sets; the `Result` is kept for symmetry with
/// [`Scanner::next_token`].
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize(source: &[u8]) -> Result<Tokenized, LexError> {
    tokenize_with(source, Mode::empty())
}

/// [`tokenize`] with a scanner [`Mode`].
pub fn tokenize_with(source: &[u8], mode: Mode) -> Result<Tokenized, LexError> {
    let mut scanner = Scanner::from_bytes(source).with_mode(mode);
    let mut tokens = Vec::new();
    loop {
        let tok = scanner.next_token()?;
        let done = tok.kind == TokenKind::Eof;
        tokens.push(tok);
        if done {
            break;
        }
    }
    Ok(Tokenized {
        tokens,
        diagnostics: scanner.take_diagnostics(),
    })
}
