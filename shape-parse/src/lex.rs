use core::fmt::{self, Display};
use logos::{Lexer, Logos};

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'s> {
    #[token("rule")]
    Rule,

    #[token("shape")]
    Shape,

    #[token("apply")]
    Apply,

    #[token("done")]
    Done,

    #[token("quit")]
    Quit,

    #[token("load")]
    Load,

    #[token("latex")]
    Latex,

    #[token("(")]
    LPar,

    #[token(")")]
    RPar,

    #[token(",")]
    Comma,

    #[token("=")]
    Eq,

    #[token("!")]
    Bang,

    #[token(":")]
    Colon,

    #[regex(r"[\p{L}\p{N}_]+")]
    Ident(&'s str),

    /// string literal, without the surrounding quotes
    #[regex(r#""[^"\n]*""#, string)]
    Str(&'s str),

    /// string literal missing its closing quote
    #[regex(r#""[^"\n]*"#)]
    UnclosedStr,

    #[token("\n")]
    Eol,

    #[regex(r"[ \t\r\f]+")]
    Space,

    #[regex(r"#[^\n]*")]
    Comment,

    #[error]
    Error,
}

/// Failure to recognise a token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexError {
    UnclosedString,
    UnknownChar,
}

impl<'s> Token<'s> {
    /// Return the error that an error token stands for.
    pub fn error(&self) -> Option<LexError> {
        match self {
            Self::UnclosedStr => Some(LexError::UnclosedString),
            Self::Error => Some(LexError::UnknownChar),
            _ => None,
        }
    }
}

impl Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnclosedString => write!(f, "unclosed string literal"),
            Self::UnknownChar => write!(f, "unknown character"),
        }
    }
}

fn string<'s>(lex: &mut Lexer<'s, Token<'s>>) -> &'s str {
    let s = lex.slice();
    &s[1..s.len() - 1]
}

#[test]
fn keywords() {
    use alloc::vec::Vec;
    let tokens: Vec<_> = crate::lex("rule rules shape apply2 done quit load latex").collect();
    assert_eq!(
        tokens,
        [
            Token::Rule,
            Token::Ident("rules"),
            Token::Shape,
            Token::Ident("apply2"),
            Token::Done,
            Token::Quit,
            Token::Load,
            Token::Latex,
        ]
    );
}

#[test]
fn punctuation() {
    use alloc::vec::Vec;
    let tokens: Vec<_> = crate::lex("apply !swap: f(x, Y) = g() # comment\n").collect();
    assert_eq!(
        tokens,
        [
            Token::Apply,
            Token::Bang,
            Token::Ident("swap"),
            Token::Colon,
            Token::Ident("f"),
            Token::LPar,
            Token::Ident("x"),
            Token::Comma,
            Token::Ident("Y"),
            Token::RPar,
            Token::Eq,
            Token::Ident("g"),
            Token::LPar,
            Token::RPar,
            Token::Eol,
        ]
    );
}

#[test]
fn strings() {
    use alloc::vec::Vec;
    let tokens: Vec<_> = crate::lex(r#"load "demos/a b.shp""#).collect();
    assert_eq!(tokens, [Token::Load, Token::Str("demos/a b.shp")]);

    let tokens: Vec<_> = crate::lex(r#"load "demos/a.shp"#).collect();
    assert_eq!(tokens, [Token::Load, Token::UnclosedStr]);
    assert_eq!(tokens[1].error(), Some(LexError::UnclosedString));

    let tokens: Vec<_> = crate::lex(r#""""#).collect();
    assert_eq!(tokens, [Token::Str("")]);
}

#[test]
fn unknown() {
    use alloc::vec::Vec;
    let tokens: Vec<_> = crate::lex("f + g").collect();
    assert_eq!(tokens, [Token::Ident("f"), Token::Error, Token::Ident("g")]);
    assert_eq!(tokens[1].error(), Some(LexError::UnknownChar));
}

#[test]
fn unicode() {
    use alloc::vec::Vec;
    let tokens: Vec<_> = crate::lex("shape Δ(ξ1, x_2)").collect();
    assert_eq!(
        tokens,
        [
            Token::Shape,
            Token::Ident("Δ"),
            Token::LPar,
            Token::Ident("ξ1"),
            Token::Comma,
            Token::Ident("x_2"),
            Token::RPar,
        ]
    );
}
