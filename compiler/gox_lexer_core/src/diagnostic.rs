//! Source positions and recoverable diagnostics.

use std::fmt;

/// A location in the input stream.
///
/// `line` and `col` are 1-based; `col` counts bytes, not runes. `offset` is
/// the 0-based byte offset from the start of the stream.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub col: u32,
    pub offset: usize,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, col: u32, offset: usize) -> Self {
        Position { line, col, offset }
    }

    /// The position `bytes` further along the same line.
    #[inline]
    #[must_use]
    pub const fn shifted(self, bytes: u32) -> Self {
        Position {
            line: self.line,
            col: self.col + bytes,
            offset: self.offset + bytes as usize,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// A recoverable lexical problem.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    pub pos: Position,
    pub message: String,
}

impl Diagnostic {
    pub fn new(pos: Position, message: impl Into<String>) -> Self {
        Diagnostic {
            pos,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pos, self.message)
    }
}

/// External error sink, called with `(line, col, message)` for every
/// reported problem.
pub type ErrorHandler = Box<dyn FnMut(u32, u32, &str)>;

/// What a [`SourceBuffer`](crate::SourceBuffer) does with a reported
/// problem after the optional [`ErrorHandler`] has seen it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorPolicy {
    /// Record a [`Diagnostic`] and keep scanning.
    #[default]
    Collect,
    /// Stop at the first problem with
    /// [`SourceError::Aborted`](crate::SourceError::Aborted).
    Abort,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn diagnostic_display() {
        let d = Diagnostic::new(Position::new(3, 14, 40), "invalid NUL character");
        assert_eq!(d.to_string(), "3:14: invalid NUL character");
    }

    #[test]
    fn shifted_moves_column_and_offset() {
        let p = Position::new(2, 5, 10).shifted(3);
        assert_eq!(p, Position::new(2, 8, 13));
    }

    #[test]
    fn positions_order_by_line_then_column() {
        assert!(Position::new(1, 9, 8) < Position::new(2, 1, 9));
        assert!(Position::new(2, 1, 9) < Position::new(2, 2, 10));
    }
}
