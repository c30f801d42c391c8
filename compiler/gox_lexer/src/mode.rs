//! Scanner configuration flags.

use bitflags::bitflags;

bitflags! {
    /// What the scanner does with comments.
    ///
    /// Fixed for the lifetime of a scanner and copied by
    /// [`Scanner::fork`](crate::Scanner::fork).
    #[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Debug)]
    pub struct Mode: u8 {
        /// Record every comment as a [`Comment`](crate::Comment).
        const COMMENTS = 1 << 0;
        /// Record `//go:` and `//line ` / `/*line ` comments as directives.
        const DIRECTIVES = 1 << 1;
        /// Scan the body of `/*! ... */` as ordinary tokens and drop the
        /// closing `*/`.
        const BANG_COMMENTS = 1 << 2;
    }
}
