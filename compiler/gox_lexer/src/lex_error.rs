//! Errors that end a scan.
//!
//! Lexical problems (bad literals, stray characters, unterminated
//! comments) never surface here; they become diagnostics and the scanner
//! carries on.

use std::io;
use std::path::PathBuf;

use gox_lexer_core::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Source(#[from] SourceError),
}
