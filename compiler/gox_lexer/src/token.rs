//! Token kinds, operators and the scanned `Token` record.
//!
//! Kinds and operators have stable numeric values (`TokenKind` 1..=46,
//! `Operator` 1..=23) so they can be passed across boundaries as raw
//! integers and named again with [`token_string`] / [`operator_string`].

use std::borrow::Cow;
use std::fmt;

use gox_lexer_core::Position;

/// Kind of a scanned token.
///
/// Keywords follow the punctuation, in alphabetical order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TokenKind {
    Eof = 1,

    // names and literals
    Name,
    Literal,

    // operators and operations
    /// Binary or unary operator; see [`Token::op`].
    Operator,
    /// `op=`
    AssignOp,
    /// `++` or `--`
    IncOp,
    Assign,
    Define,
    Arrow,
    Star,

    // delimiters
    Lparen,
    Lbrack,
    Lbrace,
    Rparen,
    Rbrack,
    Rbrace,
    Comma,
    Semi,
    Colon,
    Dot,
    DotDotDot,

    // keywords
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl TokenKind {
    /// Every kind, in numeric order.
    pub const ALL: [TokenKind; 46] = [
        TokenKind::Eof,
        TokenKind::Name,
        TokenKind::Literal,
        TokenKind::Operator,
        TokenKind::AssignOp,
        TokenKind::IncOp,
        TokenKind::Assign,
        TokenKind::Define,
        TokenKind::Arrow,
        TokenKind::Star,
        TokenKind::Lparen,
        TokenKind::Lbrack,
        TokenKind::Lbrace,
        TokenKind::Rparen,
        TokenKind::Rbrack,
        TokenKind::Rbrace,
        TokenKind::Comma,
        TokenKind::Semi,
        TokenKind::Colon,
        TokenKind::Dot,
        TokenKind::DotDotDot,
        TokenKind::Break,
        TokenKind::Case,
        TokenKind::Chan,
        TokenKind::Const,
        TokenKind::Continue,
        TokenKind::Default,
        TokenKind::Defer,
        TokenKind::Else,
        TokenKind::Fallthrough,
        TokenKind::For,
        TokenKind::Func,
        TokenKind::Go,
        TokenKind::Goto,
        TokenKind::If,
        TokenKind::Import,
        TokenKind::Interface,
        TokenKind::Map,
        TokenKind::Package,
        TokenKind::Range,
        TokenKind::Return,
        TokenKind::Select,
        TokenKind::Struct,
        TokenKind::Switch,
        TokenKind::Type,
        TokenKind::Var,
    ];

    /// Look up a kind by its numeric value.
    pub fn from_raw(raw: u32) -> Option<TokenKind> {
        let index = usize::try_from(raw).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Diagnostic name: the spelling for punctuation and keywords, a class
    /// name (`name`, `literal`, `op`, ...) otherwise.
    pub fn name(self) -> &'static str {
        TOKEN_NAMES[self as usize - 1]
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        self >= TokenKind::Break
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static TOKEN_NAMES: [&str; 46] = [
    "EOF",
    "name",
    "literal",
    "op",
    "op=",
    "opop",
    "=",
    ":=",
    "<-",
    "*",
    "(",
    "[",
    "{",
    ")",
    "]",
    "}",
    ",",
    ";",
    ":",
    ".",
    "...",
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Name of a raw token kind value; `token(N)` for values outside 1..=46.
pub fn token_string(raw: u32) -> Cow<'static, str> {
    match TokenKind::from_raw(raw) {
        Some(kind) => Cow::Borrowed(kind.name()),
        None => Cow::Owned(format!("token({raw})")),
    }
}

/// Kind of a literal token.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LitKind {
    #[default]
    Int = 0,
    Float,
    Imag,
    Rune,
    String,
}

/// Operator carried by `Operator`, `AssignOp`, `IncOp`, `Star` and `Arrow`
/// tokens.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Operator {
    /// `:`
    Def = 1,
    /// `!`
    Not,
    /// `<-`
    Recv,
    /// `~`
    Tilde,

    // precOrOr
    OrOr,

    // precAndAnd
    AndAnd,

    // precCmp
    Eql,
    Neq,
    Lss,
    Leq,
    Gtr,
    Geq,

    // precAdd
    Add,
    Sub,
    Or,
    Xor,

    // precMul
    Mul,
    Div,
    Rem,
    And,
    AndNot,
    Shl,
    Shr,
}

impl Operator {
    pub const ALL: [Operator; 23] = [
        Operator::Def,
        Operator::Not,
        Operator::Recv,
        Operator::Tilde,
        Operator::OrOr,
        Operator::AndAnd,
        Operator::Eql,
        Operator::Neq,
        Operator::Lss,
        Operator::Leq,
        Operator::Gtr,
        Operator::Geq,
        Operator::Add,
        Operator::Sub,
        Operator::Or,
        Operator::Xor,
        Operator::Mul,
        Operator::Div,
        Operator::Rem,
        Operator::And,
        Operator::AndNot,
        Operator::Shl,
        Operator::Shr,
    ];

    pub fn from_raw(raw: u32) -> Option<Operator> {
        let index = usize::try_from(raw).ok()?.checked_sub(1)?;
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Source spelling.
    pub fn name(self) -> &'static str {
        OPERATOR_NAMES[self as usize - 1]
    }

    /// Binary precedence class; `None` for operators that are never binary.
    pub const fn precedence(self) -> Precedence {
        match self {
            Operator::Def | Operator::Not | Operator::Recv | Operator::Tilde => Precedence::None,
            Operator::OrOr => Precedence::OrOr,
            Operator::AndAnd => Precedence::AndAnd,
            Operator::Eql
            | Operator::Neq
            | Operator::Lss
            | Operator::Leq
            | Operator::Gtr
            | Operator::Geq => Precedence::Cmp,
            Operator::Add | Operator::Sub | Operator::Or | Operator::Xor => Precedence::Add,
            Operator::Mul
            | Operator::Div
            | Operator::Rem
            | Operator::And
            | Operator::AndNot
            | Operator::Shl
            | Operator::Shr => Precedence::Mul,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

static OPERATOR_NAMES: [&str; 23] = [
    ":", "!", "<-", "~", "||", "&&", "==", "!=", "<", "<=", ">", ">=", "+", "-", "|", "^", "*",
    "/", "%", "&", "&^", "<<", ">>",
];

/// Spelling of a raw operator value; `Operator(N)` for values outside
/// 1..=23.
pub fn operator_string(raw: u32) -> Cow<'static, str> {
    match Operator::from_raw(raw) {
        Some(op) => Cow::Borrowed(op.name()),
        None => Cow::Owned(format!("Operator({raw})")),
    }
}

/// Binary operator precedence, lowest first.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Precedence {
    #[default]
    None = 0,
    OrOr,
    AndAnd,
    Cmp,
    Add,
    Mul,
}

/// A scanned token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of a `Name` or `Literal`. For a `Semi` it says why the
    /// terminator exists: `"semicolon"`, `"newline"` or `"EOF"`.
    pub lit: String,
    /// Meaningful for `Literal` tokens only.
    pub lit_kind: LitKind,
    /// The literal is malformed; a diagnostic was reported for it.
    pub bad: bool,
    pub op: Option<Operator>,
    pub prec: Precedence,
    pub pos: Position,
    /// The token is the first on its line, or follows a line break.
    pub blank: bool,
}

impl Token {
    pub(crate) fn new(pos: Position, blank: bool) -> Self {
        Token {
            kind: TokenKind::Eof,
            lit: String::new(),
            lit_kind: LitKind::Int,
            bad: false,
            op: None,
            prec: Precedence::None,
            pos,
            blank,
        }
    }

    pub(crate) fn set_terminator(&mut self, reason: &str) {
        self.kind = TokenKind::Semi;
        self.lit = reason.to_owned();
    }

    pub(crate) fn set_op(&mut self, kind: TokenKind, op: Operator) {
        self.kind = kind;
        self.op = Some(op);
        self.prec = match kind {
            TokenKind::IncOp => Precedence::None,
            _ => op.precedence(),
        };
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// A `Semi` inserted for a newline or end of input rather than written.
    pub fn is_implicit_semi(&self) -> bool {
        self.kind == TokenKind::Semi && self.lit != "semicolon"
    }
}

/// Source-like rendering: literal text for names and literals, the operator
/// spelling for operator tokens, the kind name otherwise.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.op) {
            (TokenKind::Name | TokenKind::Literal, _) => f.write_str(&self.lit),
            (TokenKind::Operator, Some(op)) => write!(f, "{op}"),
            (TokenKind::AssignOp, Some(op)) => write!(f, "{op}="),
            (TokenKind::IncOp, Some(op)) => write!(f, "{op}{op}"),
            (kind, _) => write!(f, "{kind}"),
        }
    }
}
