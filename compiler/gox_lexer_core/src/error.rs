//! Fatal source errors.

use std::io;

use thiserror::Error;

use crate::Diagnostic;

/// An error that stops scanning.
///
/// Lexical problems are not errors of this kind; they are reported as
/// [`Diagnostic`]s and scanning continues. These are the exceptions: the
/// stream failed, misbehaved, or the host asked to stop at the first
/// problem.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("no progress after {0} read attempts")]
    NoProgress(usize),

    #[error("reader returned {read} bytes for a {room}-byte buffer")]
    InvalidRead { read: usize, room: usize },

    #[error("rewind without an active segment")]
    NoActiveSegment,

    #[error("scan aborted at {0}")]
    Aborted(Diagnostic),
}
