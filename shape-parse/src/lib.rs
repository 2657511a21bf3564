//! Lexer and parser for the shaper term language.
//!
//! A line of input contains at most one command.
//! Terms are built from identifiers and parentheses;
//! identifiers starting with an uppercase letter are variables,
//! all other identifiers are symbols.
//!
//! Example usage:
//!
//! ~~~
//! use shape_parse::{Command, Error, Term};
//!
//! let cmd = Command::parse_line("shape pair(f(x), Y)")?;
//! let tm = match cmd {
//!     Some(Command::Shape(tm)) => tm,
//!     _ => panic!("shape command expected"),
//! };
//! assert_eq!(tm.args()[1], Term::Var("Y"));
//! assert_eq!(tm.to_string(), "pair(f(x), Y)");
//! # Ok::<_, Error>(())
//! ~~~
#![no_std]

extern crate alloc;

pub mod cmd;
pub mod lex;
mod parse;
pub mod term;

pub use cmd::{Command, Rule, RuleRef};
pub use lex::{LexError, Token};
pub use parse::{Error, Parse};
pub use term::{Latex, Term};

use logos::Logos;

/// Lex a line, dropping whitespace and comments.
pub fn lex(s: &str) -> impl Iterator<Item = Token<'_>> {
    Token::lexer(s).filter(|token| !matches!(token, Token::Space | Token::Comment))
}
