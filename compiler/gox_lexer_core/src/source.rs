//! Incrementally refilled source window with rune decoding.
//!
//! `SourceBuffer` pulls bytes from any [`Read`] implementation on demand and
//! hands them out one rune at a time through [`SourceBuffer::nextch`]. The
//! scanner marks the start of a lexeme with [`SourceBuffer::start`] and reads
//! it back as a borrowed [`SourceBuffer::segment`] once the lexeme is
//! complete. Only bytes before the active segment (or before the read cursor
//! when no segment is active) are ever discarded.
//!
//! # Layout
//!
//! ```text
//! buf: [ discarded | segment ... | ch | unread ... | 0x80 | free ... ]
//!                  ^             ^    ^            ^
//!                  begin  read-width  read         end
//! ```
//!
//! The byte at `buf[end]` is always the sentinel `0x80`. Every ASCII byte
//! compares below it, so the fast path in `nextch` is a single comparison
//! that also detects "no more buffered input".

use std::io::{self, Read};

use tracing::{debug, trace};

use crate::diagnostic::{Diagnostic, ErrorHandler, ErrorPolicy, Position};
use crate::error::SourceError;
use crate::rune::{self, Rune, RUNE_SELF, UTF_MAX};

/// Stored at `buf[end]`; not a valid ASCII byte.
const SENTINEL: u8 = RUNE_SELF;

const MIN_CAPACITY: usize = 4 << 10;
const MAX_DOUBLING: usize = 1 << 20;

/// Consecutive empty-but-not-EOF reads tolerated before giving up.
const MAX_READ_ATTEMPTS: usize = 10;

const LINE_BASE: u32 = 1;
const COL_BASE: u32 = 1;

/// Next buffer capacity: 4 KiB minimum, doubling up to 1 MiB, then growing
/// linearly by 1 MiB.
fn next_capacity(size: usize) -> usize {
    if size < MIN_CAPACITY {
        MIN_CAPACITY
    } else if size <= MAX_DOUBLING {
        size << 1
    } else {
        size + MAX_DOUBLING
    }
}

fn to_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// A byte window over a stream, decoded one rune at a time.
///
/// Call [`nextch`](Self::nextch) once after construction to load the first
/// rune. A leading byte order mark is skipped silently.
pub struct SourceBuffer<R> {
    reader: R,
    buf: Vec<u8>,
    /// Start of the active segment.
    begin: Option<usize>,
    /// Just past the current rune.
    read: usize,
    /// Just past the last buffered byte; `buf[end]` is the sentinel.
    end: usize,
    /// Absolute stream offset of `buf[0]`.
    base: usize,

    /// 0-based line and byte column of `ch`.
    line: usize,
    col: usize,
    ch: Rune,
    /// Encoded width of `ch`; 0 at EOF.
    width: usize,

    /// The reader reported end of stream.
    eof: bool,
    /// A read failed; surfaced once the buffered bytes are consumed.
    ioerr: Option<SourceError>,
    /// Set once scanning must stop. `ch` stays EOF from then on.
    fatal: Option<SourceError>,

    handler: Option<ErrorHandler>,
    policy: ErrorPolicy,
    diagnostics: Vec<Diagnostic>,
}

impl<R: Read> SourceBuffer<R> {
    pub fn new(reader: R) -> Self {
        let mut buf = vec![0; next_capacity(0)];
        buf[0] = SENTINEL;
        SourceBuffer {
            reader,
            buf,
            begin: None,
            read: 0,
            end: 0,
            base: 0,
            line: 0,
            col: 0,
            ch: Rune::from(b' '),
            width: 0,
            eof: false,
            ioerr: None,
            fatal: None,
            handler: None,
            policy: ErrorPolicy::Collect,
            diagnostics: Vec::new(),
        }
    }

    /// Install an external error sink, called with `(line, col, message)`
    /// before the [`ErrorPolicy`] is applied.
    #[must_use]
    pub fn with_error_handler(mut self, handler: impl FnMut(u32, u32, &str) + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    #[must_use]
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn set_error_handler(&mut self, handler: Option<ErrorHandler>) {
        self.handler = handler;
    }

    pub fn set_error_policy(&mut self, policy: ErrorPolicy) {
        self.policy = policy;
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// The current rune, [`Rune::EOF`] once input is exhausted.
    #[inline]
    pub fn ch(&self) -> Rune {
        self.ch
    }

    /// Position of the current rune.
    pub fn pos(&self) -> Position {
        Position::new(
            LINE_BASE.saturating_add(to_u32(self.line)),
            COL_BASE.saturating_add(to_u32(self.col)),
            self.offset(),
        )
    }

    #[inline]
    fn offset(&self) -> usize {
        self.base + self.read - self.width
    }

    /// Begin a segment at the current rune.
    #[inline]
    pub fn start(&mut self) {
        self.begin = Some(self.read - self.width);
    }

    /// End the active segment. Bytes before the read cursor become
    /// discardable.
    #[inline]
    pub fn stop(&mut self) {
        self.begin = None;
    }

    /// Bytes from the segment start up to (not including) the current rune.
    /// Empty when no segment is active.
    pub fn segment(&self) -> &[u8] {
        match self.begin {
            Some(begin) => &self.buf[begin..self.read - self.width],
            None => &[],
        }
    }

    /// Reposition to the start of the active segment and re-read the rune
    /// there. The segment must not span a newline.
    pub fn rewind(&mut self) -> Result<(), SourceError> {
        let begin = self.begin.ok_or(SourceError::NoActiveSegment)?;
        self.col = self.col.saturating_sub(self.read - self.width - begin);
        self.read = begin;
        // anything but '\n', so nextch does not advance the line
        self.ch = Rune::from(b' ');
        self.width = 0;
        self.nextch();
        Ok(())
    }

    /// Advance to the next rune.
    ///
    /// NUL bytes, invalid encodings and a byte order mark past offset 0 are
    /// reported and skipped. At end of input `ch` becomes [`Rune::EOF`] with
    /// width 0.
    pub fn nextch(&mut self) {
        loop {
            if self.fatal.is_some() {
                self.ch = Rune::EOF;
                self.width = 0;
                return;
            }

            self.col += self.width;
            if self.ch == b'\n' {
                self.line += 1;
                self.col = 0;
            }

            // fast path: ASCII, and never the sentinel
            let b = self.buf[self.read];
            if b < SENTINEL {
                self.read += 1;
                self.width = 1;
                self.ch = Rune::from(b);
                if b == 0 {
                    self.error("invalid NUL character");
                    continue;
                }
                return;
            }

            while self.end - self.read < UTF_MAX
                && !rune::full_rune(&self.buf[self.read..self.end])
                && !self.eof
                && self.ioerr.is_none()
            {
                self.fill();
            }

            if self.read == self.end {
                if let Some(err) = self.ioerr.take() {
                    self.fail(err);
                }
                self.ch = Rune::EOF;
                self.width = 0;
                return;
            }

            let (ch, width) = rune::decode(&self.buf[self.read..self.end]);
            self.read += width;
            self.width = width;
            self.ch = ch;

            if ch == Rune::INVALID && width == 1 {
                self.error("invalid UTF-8 encoding");
                continue;
            }
            if ch == Rune::BOM {
                if self.offset() > 0 {
                    self.error("invalid BOM in the middle of the file");
                }
                continue;
            }
            return;
        }
    }

    /// Compact or grow the buffer, then read more input after `end`.
    fn fill(&mut self) {
        let keep = match self.begin {
            Some(begin) => {
                self.begin = Some(0);
                begin
            }
            None => self.read,
        };

        let live = self.end - keep;
        if live < self.buf.len() / 2 {
            if keep > 0 {
                self.buf.copy_within(keep..self.end, 0);
            }
        } else {
            let mut grown = vec![0; next_capacity(self.buf.len())];
            grown[..live].copy_from_slice(&self.buf[keep..self.end]);
            trace!(from = self.buf.len(), to = grown.len(), live, "grow source buffer");
            self.buf = grown;
        }
        self.read -= keep;
        self.end -= keep;
        self.base += keep;

        self.read_more();
        self.buf[self.end] = SENTINEL;
    }

    fn read_more(&mut self) {
        let room = self.buf.len() - 1 - self.end;
        for _ in 0..MAX_READ_ATTEMPTS {
            match self.reader.read(&mut self.buf[self.end..self.end + room]) {
                Ok(0) => {
                    self.eof = true;
                    return;
                }
                Ok(n) if n > room => {
                    self.ioerr = Some(SourceError::InvalidRead { read: n, room });
                    return;
                }
                Ok(n) => {
                    self.end += n;
                    return;
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    self.ioerr = Some(SourceError::Io(err));
                    return;
                }
            }
        }
        self.ioerr = Some(SourceError::NoProgress(MAX_READ_ATTEMPTS));
    }

    /// Report a problem at the current position.
    pub fn error(&mut self, msg: impl Into<String>) {
        let pos = self.pos();
        self.error_at(pos, msg);
    }

    /// Report a problem at `pos`: hand it to the error handler, then apply the
    /// error policy.
    pub fn error_at(&mut self, pos: Position, msg: impl Into<String>) {
        let diagnostic = Diagnostic::new(pos, msg);
        if let Some(handler) = self.handler.as_mut() {
            handler(pos.line, pos.col, &diagnostic.message);
        }
        match self.policy {
            ErrorPolicy::Collect => self.diagnostics.push(diagnostic),
            ErrorPolicy::Abort => {
                if self.fatal.is_none() {
                    self.halt(SourceError::Aborted(diagnostic));
                }
            }
        }
    }

    /// Report a stream failure to the handler and stop.
    fn fail(&mut self, err: SourceError) {
        let pos = self.pos();
        if let Some(handler) = self.handler.as_mut() {
            handler(pos.line, pos.col, &err.to_string());
        }
        self.halt(err);
    }

    fn halt(&mut self, err: SourceError) {
        debug!(error = %err, offset = self.offset(), "source halted");
        self.fatal = Some(err);
        self.ch = Rune::EOF;
    }

    /// Whether a fatal error has stopped this buffer.
    pub fn is_halted(&self) -> bool {
        self.fatal.is_some()
    }

    /// Take the fatal error, if any. The buffer stays at EOF afterwards.
    pub fn take_fatal(&mut self) -> Option<SourceError> {
        let err = self.fatal.take()?;
        // drop whatever is still buffered so the next read hits EOF
        self.begin = None;
        self.eof = true;
        self.read = self.end;
        self.width = 0;
        self.ch = Rune::EOF;
        Some(err)
    }

    /// Diagnostics collected under [`ErrorPolicy::Collect`].
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
