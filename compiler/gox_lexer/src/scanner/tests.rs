use std::cell::RefCell;
use std::rc::Rc;

use gox_lexer_core::SourceError;
use pretty_assertions::assert_eq;

use super::*;
use crate::token::{LitKind, Precedence};
use crate::{tokenize, tokenize_with, Tokenized};

fn lex(src: &str) -> Tokenized {
    tokenize(src.as_bytes()).unwrap()
}

/// Tokens rendered as source-like text, `;` shown with its reason.
fn render(src: &str) -> Vec<String> {
    lex(src)
        .tokens
        .iter()
        .map(|tok| match tok.kind {
            TokenKind::Semi => format!(";{}", tok.lit),
            _ => tok.to_string(),
        })
        .collect()
}

fn messages(out: &Tokenized) -> Vec<String> {
    out.diagnostics.iter().map(ToString::to_string).collect()
}

/// A single literal token followed by the EOF terminator.
fn literal(src: &str) -> (Token, Vec<String>) {
    let out = lex(src);
    assert_eq!(
        out.kinds(),
        [TokenKind::Literal, TokenKind::Semi, TokenKind::Eof],
        "{src}"
    );
    let msgs = messages(&out);
    (out.tokens.into_iter().next().unwrap(), msgs)
}

// === Basics ===

#[test]
fn empty_input() {
    let out = lex("");
    assert_eq!(out.kinds(), [TokenKind::Eof]);
    assert_eq!(out.tokens[0].pos, Position::new(1, 1, 0));
    assert!(!out.has_errors());
}

#[test]
fn short_variable_declaration() {
    let out = lex("x := 1\n");
    let summary: Vec<_> = out
        .tokens
        .iter()
        .map(|t| (t.kind, t.lit.as_str(), t.pos))
        .collect();
    assert_eq!(
        summary,
        [
            (TokenKind::Name, "x", Position::new(1, 1, 0)),
            (TokenKind::Define, "", Position::new(1, 3, 2)),
            (TokenKind::Literal, "1", Position::new(1, 6, 5)),
            (TokenKind::Semi, "newline", Position::new(1, 7, 6)),
            (TokenKind::Eof, "", Position::new(2, 1, 7)),
        ]
    );
    assert_eq!(out.tokens[2].lit_kind, LitKind::Int);
    assert!(!out.tokens[2].bad);
    assert!(!out.has_errors());
}

#[test]
fn whitespace_only() {
    assert_eq!(lex(" \t\r\n\n  ").kinds(), [TokenKind::Eof]);
}

#[test]
fn crlf_line_endings() {
    assert_eq!(render("a\r\nb\r\n"), ["a", ";newline", "b", ";newline", "EOF"]);
}

// === Semicolon insertion ===

#[test]
fn terminator_after_statement_enders() {
    assert_eq!(
        render("f()\nx[i]\n{}\ni++\nj--\n"),
        [
            "f", "(", ")", ";newline", "x", "[", "i", "]", ";newline", "{", "}", ";newline", "i",
            "++", ";newline", "j", "--", ";newline", "EOF"
        ]
    );
}

#[test]
fn no_terminator_after_operators_and_openers() {
    assert_eq!(render("a +\nb ,\nc (\n"), ["a", "+", "b", ",", "c", "(", "EOF"]);
}

#[test]
fn keywords_that_end_statements() {
    assert_eq!(
        render("break\ncontinue\nfallthrough\nreturn\ngoto\nif\n"),
        [
            "break",
            ";newline",
            "continue",
            ";newline",
            "fallthrough",
            ";newline",
            "return",
            ";newline",
            "goto",
            "if",
            "EOF"
        ]
    );
}

#[test]
fn terminator_at_eof() {
    assert_eq!(render("x"), ["x", ";EOF", "EOF"]);
    assert_eq!(render("x;"), ["x", ";semicolon", "EOF"]);
}

#[test]
fn line_comment_keeps_pending_terminator() {
    let out = lex("x // note\ny");
    assert_eq!(
        out.kinds(),
        [
            TokenKind::Name,
            TokenKind::Semi,
            TokenKind::Name,
            TokenKind::Semi,
            TokenKind::Eof
        ]
    );
    assert_eq!(out.tokens[1].lit, "newline");
    assert_eq!(out.tokens[1].pos, Position::new(1, 10, 9));
}

#[test]
fn multi_line_block_comment_acts_as_newline() {
    let out = lex("x /* a\nb */ y");
    assert_eq!(render("x /* a\nb */ y"), ["x", ";newline", "y", ";EOF", "EOF"]);
    assert_eq!(out.tokens[1].pos, Position::new(1, 3, 2));
    assert_eq!(render("x /* a */ y"), ["x", "y", ";EOF", "EOF"]);
    assert_eq!(render("+ /* a\nb */ y"), ["+", "y", ";EOF", "EOF"]);
}

// === Identifiers and keywords ===

#[test]
fn every_keyword() {
    for (word, kind) in crate::KEYWORDS {
        let out = lex(word);
        assert_eq!(out.tokens[0].kind, kind, "{word}");
        assert!(out.tokens[0].lit.is_empty());
    }
}

#[test]
fn names() {
    let out = lex("_1 foo_bar x9 héllo 世界 gosh in");
    let names: Vec<_> = out
        .tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Name)
        .map(|t| t.lit.as_str())
        .collect();
    assert_eq!(names, ["_1", "foo_bar", "x9", "héllo", "世界", "gosh", "in"]);
    assert!(!out.has_errors());
}

#[test]
fn identifier_starting_with_unicode_digit() {
    let out = lex("١x");
    assert_eq!(out.tokens[0].kind, TokenKind::Name);
    assert_eq!(out.tokens[0].lit, "١x");
    assert_eq!(
        messages(&out),
        ["1:1: identifier cannot begin with digit U+0661 '١'"]
    );
}

#[test]
fn invalid_character_in_identifier() {
    let out = lex("a€b");
    assert_eq!(render("a€b"), ["a€b", ";EOF", "EOF"]);
    assert_eq!(
        messages(&out),
        ["1:2: invalid character U+20AC '€' in identifier"]
    );
}

// === Operators and punctuation ===

#[test]
fn operators() {
    let src = "+ += ++ - -= -- * *= / /= % %= & &= && &^ &^= | |= || ^ ^= \
               << <<= >> >>= < <= <- > >= = == ! != ~ : :=";
    let out = lex(src);
    let got: Vec<_> = out
        .tokens
        .iter()
        .map(|t| (t.kind, t.op, t.prec))
        .collect();

    use Operator as O;
    use Precedence as P;
    use TokenKind as K;
    let want = vec![
        (K::Operator, Some(O::Add), P::Add),
        (K::AssignOp, Some(O::Add), P::Add),
        (K::IncOp, Some(O::Add), P::None),
        (K::Operator, Some(O::Sub), P::Add),
        (K::AssignOp, Some(O::Sub), P::Add),
        (K::IncOp, Some(O::Sub), P::None),
        (K::Star, Some(O::Mul), P::Mul),
        (K::AssignOp, Some(O::Mul), P::Mul),
        (K::Operator, Some(O::Div), P::Mul),
        (K::AssignOp, Some(O::Div), P::Mul),
        (K::Operator, Some(O::Rem), P::Mul),
        (K::AssignOp, Some(O::Rem), P::Mul),
        (K::Operator, Some(O::And), P::Mul),
        (K::AssignOp, Some(O::And), P::Mul),
        (K::Operator, Some(O::AndAnd), P::AndAnd),
        (K::Operator, Some(O::AndNot), P::Mul),
        (K::AssignOp, Some(O::AndNot), P::Mul),
        (K::Operator, Some(O::Or), P::Add),
        (K::AssignOp, Some(O::Or), P::Add),
        (K::Operator, Some(O::OrOr), P::OrOr),
        (K::Operator, Some(O::Xor), P::Add),
        (K::AssignOp, Some(O::Xor), P::Add),
        (K::Operator, Some(O::Shl), P::Mul),
        (K::AssignOp, Some(O::Shl), P::Mul),
        (K::Operator, Some(O::Shr), P::Mul),
        (K::AssignOp, Some(O::Shr), P::Mul),
        (K::Operator, Some(O::Lss), P::Cmp),
        (K::Operator, Some(O::Leq), P::Cmp),
        (K::Arrow, Some(O::Recv), P::None),
        (K::Operator, Some(O::Gtr), P::Cmp),
        (K::Operator, Some(O::Geq), P::Cmp),
        (K::Assign, None, P::None),
        (K::Operator, Some(O::Eql), P::Cmp),
        (K::Operator, Some(O::Not), P::None),
        (K::Operator, Some(O::Neq), P::Cmp),
        (K::Operator, Some(O::Tilde), P::None),
        (K::Colon, None, P::None),
        (K::Define, None, P::None),
        (K::Eof, None, P::None),
    ];
    assert_eq!(got, want);
    assert!(!out.has_errors());
}

#[test]
fn punctuation() {
    assert_eq!(
        lex("( [ { , ; . ... } ] )").kinds(),
        [
            TokenKind::Lparen,
            TokenKind::Lbrack,
            TokenKind::Lbrace,
            TokenKind::Comma,
            TokenKind::Semi,
            TokenKind::Dot,
            TokenKind::DotDotDot,
            TokenKind::Rbrace,
            TokenKind::Rbrack,
            TokenKind::Rparen,
            TokenKind::Semi,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn two_dots_are_two_tokens() {
    let out = lex("a..b");
    assert_eq!(
        out.kinds(),
        [
            TokenKind::Name,
            TokenKind::Dot,
            TokenKind::Dot,
            TokenKind::Name,
            TokenKind::Semi,
            TokenKind::Eof
        ]
    );
    assert_eq!(out.tokens[1].pos, Position::new(1, 2, 1));
    assert_eq!(out.tokens[2].pos, Position::new(1, 3, 2));
    assert_eq!(out.tokens[3].pos, Position::new(1, 4, 3));
}

#[test]
fn operators_without_spaces() {
    assert_eq!(
        render("a<-b&^=c...d"),
        ["a", "<-", "b", "&^=", "c", "...", "d", ";EOF", "EOF"]
    );
}

#[test]
fn invalid_character_is_skipped() {
    let out = lex("a @ b");
    assert_eq!(render("a @ b"), ["a", "b", ";EOF", "EOF"]);
    assert_eq!(messages(&out), ["1:3: invalid character U+0040 '@'"]);
}

// === Numbers ===

#[test]
fn valid_numbers() {
    let cases = [
        ("0", LitKind::Int),
        ("42", LitKind::Int),
        ("0755", LitKind::Int),
        ("0o17", LitKind::Int),
        ("0O17", LitKind::Int),
        ("0b1010", LitKind::Int),
        ("0xdead_BEEF", LitKind::Int),
        ("0x_1F", LitKind::Int),
        ("1_000_000", LitKind::Int),
        ("1_2", LitKind::Int),
        ("1.5", LitKind::Float),
        ("1.", LitKind::Float),
        (".5", LitKind::Float),
        ("1e10", LitKind::Float),
        ("1E+5", LitKind::Float),
        ("6.02e-23", LitKind::Float),
        ("0x1p-2", LitKind::Float),
        ("0x1.8p1", LitKind::Float),
        ("09.5", LitKind::Float),
        ("2i", LitKind::Imag),
        ("1.5i", LitKind::Imag),
        ("09i", LitKind::Imag),
        ("0x1i", LitKind::Imag),
    ];
    for (src, kind) in cases {
        let (tok, msgs) = literal(src);
        assert_eq!((tok.lit.as_str(), tok.lit_kind, tok.bad), (src, kind, false));
        assert!(msgs.is_empty(), "{src}: {msgs:?}");
    }
}

#[test]
fn invalid_numbers() {
    let cases = [
        ("0x1g", "1:4: invalid digit 'g' in hexadecimal literal"),
        ("0x1gp1", "1:4: invalid digit 'g' in hexadecimal literal"),
        ("089", "1:2: invalid digit '8' in octal literal"),
        ("0b102", "1:5: invalid digit '2' in binary literal"),
        ("0o8", "1:3: invalid digit '8' in octal literal"),
        ("1_", "1:2: '_' must separate successive digits"),
        ("1__2", "1:3: '_' must separate successive digits"),
        ("0x_", "1:4: hexadecimal literal has no digits"),
        ("0x", "1:3: hexadecimal literal has no digits"),
        ("0xg", "1:4: hexadecimal literal has no digits"),
        ("0x_g", "1:5: hexadecimal literal has no digits"),
        ("0b", "1:3: binary literal has no digits"),
        ("0x1.8", "1:6: hexadecimal mantissa requires a 'p' exponent"),
        ("0b1.0", "1:4: invalid radix point in binary literal"),
        ("0o7.1", "1:4: invalid radix point in octal literal"),
        ("1e", "1:3: exponent has no digits"),
        ("1e+", "1:4: exponent has no digits"),
        ("0b1e3", "1:4: 'e' exponent requires decimal mantissa"),
        ("1p3", "1:2: 'p' exponent requires hexadecimal mantissa"),
    ];
    for (src, msg) in cases {
        let (tok, msgs) = literal(src);
        assert_eq!(tok.lit, src);
        assert!(tok.bad, "{src} should be bad");
        assert_eq!(msgs, [msg], "{src}");
    }
}

#[test]
fn number_errors_index_raw_bytes() {
    let out = tokenize(b"0x1\xffg").unwrap();
    assert_eq!(out.kinds(), [TokenKind::Literal, TokenKind::Semi, TokenKind::Eof]);
    assert!(out.tokens[0].bad);
    assert_eq!(
        messages(&out),
        [
            "1:4: invalid UTF-8 encoding",
            "1:5: invalid digit 'g' in hexadecimal literal"
        ]
    );

    let out = tokenize(b"0x\xff_1").unwrap();
    assert_eq!(
        messages(&out),
        [
            "1:3: invalid UTF-8 encoding",
            "1:4: '_' must separate successive digits"
        ]
    );
}

#[test]
fn hex_with_invalid_letter_is_one_token() {
    let out = lex("0x1g");
    assert_eq!(out.tokens.len(), 3);
    assert_eq!(out.tokens[0].lit, "0x1g");
    assert!(out.tokens[0].bad);
    assert_eq!(out.diagnostics[0].pos, Position::new(1, 4, 3));
}

#[test]
fn number_followed_by_name() {
    assert_eq!(render("123abc"), ["123", "abc", ";EOF", "EOF"]);
}

#[test]
fn underscore_name_is_not_a_number() {
    let out = lex("_1");
    assert_eq!(out.tokens[0].kind, TokenKind::Name);
    assert!(!out.has_errors());
}

// === Strings and runes ===

#[test]
fn strings() {
    for src in [r#""""#, r#""abc""#, r#""a\tb\"c\\""#, r#""\x41\101é\U0001F600""#] {
        let (tok, msgs) = literal(src);
        assert_eq!((tok.lit.as_str(), tok.lit_kind, tok.bad), (src, LitKind::String, false));
        assert!(msgs.is_empty(), "{src}: {msgs:?}");
    }
}

#[test]
fn raw_strings_span_lines() {
    let out = lex("`a\\n\nb` x");
    assert_eq!(out.tokens[0].lit, "`a\\n\nb`");
    assert_eq!(out.tokens[0].lit_kind, LitKind::String);
    assert_eq!(out.tokens[1].pos, Position::new(2, 4, 8));
    assert!(!out.has_errors());
}

#[test]
fn bad_strings() {
    let cases = [
        (r#""\q""#, "1:3: unknown escape"),
        (r#""\'""#, "1:3: unknown escape"),
        (r#""\x4g""#, "1:5: invalid character 'g' in hexadecimal escape"),
        (r#""\08""#, "1:4: invalid character '8' in octal escape"),
        (r#""\400""#, "1:6: octal escape value 256 > 255"),
        (r#""\uD800""#, "1:8: escape is invalid Unicode code point U+D800"),
        (r#""\U00110000""#, "1:12: escape is invalid Unicode code point U+110000"),
        ("\"abc", "1:1: string literal not terminated"),
        ("`abc", "1:1: string literal not terminated"),
    ];
    for (src, msg) in cases {
        let (tok, msgs) = literal(src);
        assert!(tok.bad, "{src} should be bad");
        assert_eq!(msgs, [msg], "{src}");
    }
}

#[test]
fn newline_in_string_continues_to_closing_quote() {
    let out = lex("\"a\nb\" c");
    assert_eq!(out.tokens[0].lit, "\"a\nb\"");
    assert!(out.tokens[0].bad);
    assert_eq!(messages(&out), ["1:3: newline in string"]);
    assert_eq!(out.tokens[1].lit, "c");
}

#[test]
fn runes() {
    for src in ["'a'", "'é'", r"'\n'", r"'\''", r"'\x41'", r"'é'", r"'\000'"] {
        let (tok, msgs) = literal(src);
        assert_eq!((tok.lit.as_str(), tok.lit_kind, tok.bad), (src, LitKind::Rune, false));
        assert!(msgs.is_empty(), "{src}: {msgs:?}");
    }
}

#[test]
fn bad_runes() {
    let cases = [
        ("''", "1:2: empty rune literal or unescaped ' in rune literal"),
        ("'ab'", "1:1: more than one character in rune literal"),
        (r#"'\"'"#, "1:3: unknown escape"),
        ("'a", "1:1: rune literal not terminated"),
        ("'\n'", "1:2: newline in rune literal"),
    ];
    for (src, msg) in cases {
        let (tok, msgs) = literal(src);
        assert!(tok.bad, "{src} should be bad");
        assert_eq!(msgs, [msg], "{src}");
    }
}

// === Problem bytes ===

#[test]
fn bom_in_the_middle_is_skipped() {
    let out = lex("a \u{FEFF}b");
    assert_eq!(render("a \u{FEFF}b"), ["a", "b", ";EOF", "EOF"]);
    assert_eq!(messages(&out), ["1:3: invalid BOM in the middle of the file"]);
    assert_eq!(out.tokens[1].pos, Position::new(1, 6, 5));
}

#[test]
fn leading_bom_is_ignored() {
    let out = lex("\u{FEFF}package main");
    assert_eq!(out.tokens[0].kind, TokenKind::Package);
    assert!(!out.has_errors());
}

#[test]
fn invalid_utf8_between_tokens() {
    let out = tokenize(b"a \xff b").unwrap();
    assert_eq!(
        out.kinds(),
        [TokenKind::Name, TokenKind::Name, TokenKind::Semi, TokenKind::Eof]
    );
    assert_eq!(messages(&out), ["1:3: invalid UTF-8 encoding"]);
}

#[test]
fn nul_is_reported() {
    let out = tokenize(b"a \0b").unwrap();
    assert_eq!(
        out.kinds(),
        [TokenKind::Name, TokenKind::Name, TokenKind::Semi, TokenKind::Eof]
    );
    assert_eq!(messages(&out), ["1:3: invalid NUL character"]);
}

// === Blank flag ===

#[test]
fn blank_marks_first_token_on_a_line() {
    let out = lex("a b\n  c");
    let blanks: Vec<_> = out.tokens.iter().map(|t| (t.kind, t.blank)).collect();
    assert_eq!(
        blanks,
        [
            (TokenKind::Name, true),
            (TokenKind::Name, false),
            (TokenKind::Semi, false),
            (TokenKind::Name, true),
            (TokenKind::Semi, false),
            (TokenKind::Eof, false),
        ]
    );
}

// === Comments ===

const COMMENTED: &str = "// one\nx /* two */\n//go:noinline\n/*line a.go:3*/\n//gopher\n";

#[test]
fn unterminated_block_comment() {
    let out = lex("x /* open");
    assert_eq!(out.kinds(), [TokenKind::Name, TokenKind::Semi, TokenKind::Eof]);
    assert_eq!(messages(&out), ["1:3: unterminated comment"]);
}

#[test]
fn comments_mode_records_everything() {
    let mut scanner = Scanner::from_bytes(COMMENTED.as_bytes()).with_mode(Mode::COMMENTS);
    let kinds: Vec<_> = scanner.by_ref().map(|t| t.unwrap().kind).collect();
    assert_eq!(kinds, [TokenKind::Name, TokenKind::Semi, TokenKind::Eof]);
    let comments: Vec<_> = scanner
        .take_comments()
        .into_iter()
        .map(|c| (c.kind, c.text, c.pos))
        .collect();
    assert_eq!(
        comments,
        [
            (CommentKind::Line, "// one".to_string(), Position::new(1, 1, 0)),
            (CommentKind::Block, "/* two */".to_string(), Position::new(2, 3, 9)),
            (
                CommentKind::Directive,
                "//go:noinline".to_string(),
                Position::new(3, 1, 19)
            ),
            (
                CommentKind::Directive,
                "/*line a.go:3*/".to_string(),
                Position::new(4, 1, 33)
            ),
            (CommentKind::Line, "//gopher".to_string(), Position::new(5, 1, 49)),
        ]
    );
    assert!(scanner.comments().is_empty());
}

#[test]
fn directives_mode_records_directives_only() {
    let mut scanner = Scanner::from_bytes(COMMENTED.as_bytes()).with_mode(Mode::DIRECTIVES);
    scanner.by_ref().for_each(drop);
    let texts: Vec<_> = scanner.comments().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, ["//go:noinline", "/*line a.go:3*/"]);
    assert!(scanner
        .comments()
        .iter()
        .all(|c| c.kind == CommentKind::Directive));
}

#[test]
fn comments_are_dropped_by_default() {
    let mut scanner = Scanner::from_bytes(COMMENTED.as_bytes());
    scanner.by_ref().for_each(drop);
    assert!(scanner.comments().is_empty());
}

#[test]
fn bang_comment_body_is_scanned() {
    let out = tokenize_with(b"/*! x */ y", Mode::BANG_COMMENTS).unwrap();
    assert_eq!(
        out.kinds(),
        [TokenKind::Name, TokenKind::Name, TokenKind::Semi, TokenKind::Eof]
    );
    assert_eq!(out.tokens[0].lit, "x");
    assert!(!out.has_errors());

    // without the mode it is an ordinary comment
    assert_eq!(render("/*! x */ y"), ["y", ";EOF", "EOF"]);
}

#[test]
fn stray_closer_outside_bang_comment() {
    let out = tokenize_with(b"a */ b", Mode::BANG_COMMENTS).unwrap();
    assert_eq!(
        out.kinds(),
        [
            TokenKind::Name,
            TokenKind::Star,
            TokenKind::Operator,
            TokenKind::Name,
            TokenKind::Semi,
            TokenKind::Eof
        ]
    );
}

// === Configuration ===

#[test]
fn fork_copies_configuration_only() {
    let mut parent = Scanner::from_bytes(b"a @")
        .with_mode(Mode::COMMENTS | Mode::DIRECTIVES)
        .with_error_policy(ErrorPolicy::Collect);
    parent.by_ref().for_each(drop);
    assert_eq!(parent.diagnostics().len(), 1);

    let mut child = parent.fork(&b"// c\nz"[..]);
    assert_eq!(child.mode(), Mode::COMMENTS | Mode::DIRECTIVES);
    assert!(child.diagnostics().is_empty());
    let first = child.next_token().unwrap();
    assert_eq!((first.kind, first.lit.as_str()), (TokenKind::Name, "z"));
    assert_eq!(first.pos, Position::new(2, 1, 5));
    assert_eq!(child.comments().len(), 1);
}

#[test]
fn error_handler_sees_problems_first() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut scanner = Scanner::from_bytes(b"0x 'ab'").with_error_handler(move |line, col, msg| {
        sink.borrow_mut().push((line, col, msg.to_string()));
    });
    scanner.by_ref().for_each(drop);
    assert_eq!(
        *seen.borrow(),
        [
            (1, 3, "hexadecimal literal has no digits".to_string()),
            (1, 4, "more than one character in rune literal".to_string()),
        ]
    );
    assert_eq!(scanner.take_diagnostics().len(), 2);
}

#[test]
fn abort_policy_ends_the_scan() {
    let mut scanner = Scanner::from_bytes(b"a @ b").with_error_policy(ErrorPolicy::Abort);
    let first = scanner.next().unwrap().unwrap();
    assert_eq!(first.lit, "a");
    match scanner.next() {
        Some(Err(LexError::Source(SourceError::Aborted(d)))) => {
            assert_eq!(d.to_string(), "1:3: invalid character U+0040 '@'");
        }
        other => panic!("expected abort, got {other:?}"),
    }
    assert!(scanner.next().is_none());
    assert!(scanner.diagnostics().is_empty());
}

#[test]
fn eof_repeats() {
    let mut scanner = Scanner::from_bytes(b"");
    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Eof);
    assert_eq!(scanner.next_token().unwrap().kind, TokenKind::Eof);
}

#[test]
fn iterator_stops_after_eof() {
    let tokens: Vec<_> = Scanner::from_bytes(b"a b").collect::<Result<_, _>>().unwrap();
    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
}
