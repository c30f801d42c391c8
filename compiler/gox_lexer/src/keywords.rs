//! Keyword resolution.
//!
//! Keywords live in a 128-slot table addressed by a hash of the first two
//! bytes and the length of the word. For the 25 keywords this hash is
//! perfect: every keyword gets its own slot, so a lookup is one hash, one
//! slot load and one spelling comparison (which rejects identifiers that
//! merely share a slot with a keyword).
//!
//! The hash is tuned to this keyword set. Collision-freedom is checked at
//! compile time for [`KEYWORDS`]; [`KeywordTable::build`] checks it again
//! for any other list and refuses to build a table that would shadow a
//! keyword.

use std::sync::OnceLock;

use thiserror::Error;
use tracing::debug;

use crate::token::TokenKind;

/// Number of slots; a power of two so the hash can be masked.
const TABLE_SIZE: usize = 128;

/// The keywords of the language, alphabetically.
pub const KEYWORDS: [(&str, TokenKind); 25] = [
    ("break", TokenKind::Break),
    ("case", TokenKind::Case),
    ("chan", TokenKind::Chan),
    ("const", TokenKind::Const),
    ("continue", TokenKind::Continue),
    ("default", TokenKind::Default),
    ("defer", TokenKind::Defer),
    ("else", TokenKind::Else),
    ("fallthrough", TokenKind::Fallthrough),
    ("for", TokenKind::For),
    ("func", TokenKind::Func),
    ("go", TokenKind::Go),
    ("goto", TokenKind::Goto),
    ("if", TokenKind::If),
    ("import", TokenKind::Import),
    ("interface", TokenKind::Interface),
    ("map", TokenKind::Map),
    ("package", TokenKind::Package),
    ("range", TokenKind::Range),
    ("return", TokenKind::Return),
    ("select", TokenKind::Select),
    ("struct", TokenKind::Struct),
    ("switch", TokenKind::Switch),
    ("type", TokenKind::Type),
    ("var", TokenKind::Var),
];

/// Slot of a word: `(b0 << 4) ^ (b1 + len)`, masked to the table size.
///
/// Only meaningful for words of at least two bytes; shorter input maps to
/// slot 0 and is never stored.
#[allow(clippy::cast_lossless, reason = "usize::from is not const")]
pub const fn keyword_hash(word: &[u8]) -> usize {
    if word.len() < 2 {
        return 0;
    }
    (((word[0] as usize) << 4) ^ (word[1] as usize + word.len())) & (TABLE_SIZE - 1)
}

const fn collision_free(keywords: &[(&str, TokenKind)]) -> bool {
    let mut seen = [false; TABLE_SIZE];
    let mut i = 0;
    while i < keywords.len() {
        let slot = keyword_hash(keywords[i].0.as_bytes());
        if seen[slot] {
            return false;
        }
        seen[slot] = true;
        i += 1;
    }
    true
}

const _: () = assert!(
    collision_free(&KEYWORDS),
    "keyword hash is not collision-free"
);

/// Reasons a keyword list cannot be turned into a table.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum KeywordTableError {
    #[error("keyword {word:?} collides with {existing:?} in slot {slot}")]
    Collision {
        word: &'static str,
        existing: &'static str,
        slot: usize,
    },
    #[error("keyword {word:?} is shorter than two bytes")]
    TooShort { word: &'static str },
}

/// Perfect-hash keyword table.
#[derive(Clone, Debug)]
pub struct KeywordTable {
    slots: [Option<(&'static str, TokenKind)>; TABLE_SIZE],
}

impl KeywordTable {
    /// Build a table, failing on the first keyword whose slot is taken.
    pub fn build(keywords: &[(&'static str, TokenKind)]) -> Result<Self, KeywordTableError> {
        let mut slots = [None; TABLE_SIZE];
        for &(word, kind) in keywords {
            if word.len() < 2 {
                return Err(KeywordTableError::TooShort { word });
            }
            let slot = keyword_hash(word.as_bytes());
            if let Some((existing, _)) = slots[slot] {
                return Err(KeywordTableError::Collision {
                    word,
                    existing,
                    slot,
                });
            }
            slots[slot] = Some((word, kind));
        }
        Ok(KeywordTable { slots })
    }

    /// The process-wide table for [`KEYWORDS`].
    pub fn global() -> &'static KeywordTable {
        static GLOBAL: OnceLock<KeywordTable> = OnceLock::new();
        GLOBAL.get_or_init(|| match KeywordTable::build(&KEYWORDS) {
            Ok(table) => {
                debug!(keywords = KEYWORDS.len(), slots = TABLE_SIZE, "keyword table built");
                table
            }
            // unreachable: the const assertion above rejects a colliding list
            Err(err) => panic!("built-in keyword table: {err}"),
        })
    }

    /// Resolve `word` to a keyword kind.
    #[inline]
    pub fn lookup(&self, word: &[u8]) -> Option<TokenKind> {
        if word.len() < 2 {
            return None;
        }
        match self.slots[keyword_hash(word)] {
            Some((spelling, kind)) if spelling.as_bytes() == word => Some(kind),
            _ => None,
        }
    }

    /// Number of keywords in the table.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

/// Resolve `word` against the global keyword table.
#[inline]
pub fn lookup(word: &[u8]) -> Option<TokenKind> {
    KeywordTable::global().lookup(word)
}
