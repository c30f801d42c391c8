//! Low-level building blocks for the gox lexer.
//!
//! This crate has no knowledge of tokens or keywords. It provides:
//!
//! - [`rune`]: UTF-8 decode/encode primitives and the [`Rune`] type
//! - [`SourceBuffer`]: an incrementally refilled byte window over any
//!   [`std::io::Read`], with line/column tracking, lexeme segments and rewind
//! - [`Diagnostic`] and [`Position`]: how recoverable problems are reported
//!
//! The scanner in `gox_lexer` drives a `SourceBuffer` one rune at a time.

mod diagnostic;
mod error;
pub mod rune;
mod source;

pub use diagnostic::{Diagnostic, ErrorHandler, ErrorPolicy, Position};
pub use error::SourceError;
pub use rune::Rune;
pub use source::SourceBuffer;
