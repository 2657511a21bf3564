use crate::lex::LexError;
use crate::{Command, Rule, RuleRef, Term, Token};
use alloc::vec::Vec;
use core::fmt::{self, Display};
use core::iter::Peekable;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Lex(LexError),
    UnexpectedEnd,
    ExpectedTerm,
    ExpectedCommaOrRPar,
    ExpectedIdent,
    ExpectedEq,
    ExpectedString,
    ExpectedIdentOrRule,
    ExpectedCmd,
    ExpectedEnd,
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Self::Lex(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(e) => e.fmt(f),
            Self::UnexpectedEnd => write!(f, "unexpected end of input"),
            Self::ExpectedTerm => write!(f, "expected term"),
            Self::ExpectedCommaOrRPar => write!(f, "expected ',' or ')'"),
            Self::ExpectedIdent => write!(f, "expected identifier"),
            Self::ExpectedEq => write!(f, "expected '='"),
            Self::ExpectedString => write!(f, "expected string"),
            Self::ExpectedIdentOrRule => write!(f, "expected rule name or 'rule'"),
            Self::ExpectedCmd => write!(f, "expected command"),
            Self::ExpectedEnd => write!(f, "expected end of line"),
        }
    }
}

pub trait Parse<'s>: Sized {
    fn parse<I>(iter: &mut Peekable<I>) -> Result<Self, Error>
    where
        I: Iterator<Item = Token<'s>>;

    fn consume(iter: impl Iterator<Item = Token<'s>>) -> Result<Self, Error> {
        let mut iter = iter.peekable();
        let y = Self::parse(&mut iter)?;
        end(&mut iter)?;
        Ok(y)
    }

    fn parse_str(s: &'s str) -> Result<Self, Error> {
        Self::consume(crate::lex(s))
    }
}

/// Succeed if no tokens are left on the line.
fn end<'s>(iter: &mut impl Iterator<Item = Token<'s>>) -> Result<(), Error> {
    match iter.next() {
        None | Some(Token::Eol) => Ok(()),
        Some(tok) => Err(tok.error().map_or(Error::ExpectedEnd, Error::Lex)),
    }
}

/// Take the next token, failing at the end of the line and on lexing errors.
fn next<'s>(iter: &mut impl Iterator<Item = Token<'s>>) -> Result<Token<'s>, Error> {
    match iter.next() {
        None | Some(Token::Eol) => Err(Error::UnexpectedEnd),
        Some(tok) => match tok.error() {
            Some(e) => Err(Error::Lex(e)),
            None => Ok(tok),
        },
    }
}

impl<'s> Parse<'s> for Term<&'s str> {
    fn parse<I>(iter: &mut Peekable<I>) -> Result<Self, Error>
    where
        I: Iterator<Item = Token<'s>>,
    {
        let mut tm = match next(iter)? {
            Token::Ident(s) => Term::atom(s),
            _ => return Err(Error::ExpectedTerm),
        };
        // `f(x)(y)` is `f(x)` applied to `y`
        while iter.next_if_eq(&Token::LPar).is_some() {
            tm = Term::appl(tm, Self::parse_args(iter)?);
        }
        Ok(tm)
    }
}

impl<'s> Term<&'s str> {
    /// Parse arguments following an opening parenthesis '('.
    fn parse_args<I>(iter: &mut Peekable<I>) -> Result<Vec<Self>, Error>
    where
        I: Iterator<Item = Token<'s>>,
    {
        let mut args = Vec::new();
        if iter.next_if_eq(&Token::RPar).is_some() {
            return Ok(args);
        }
        loop {
            args.push(Self::parse(iter)?);
            match next(iter)? {
                Token::Comma => (),
                Token::RPar => return Ok(args),
                _ => return Err(Error::ExpectedCommaOrRPar),
            }
        }
    }
}

impl<'s> Parse<'s> for Rule<&'s str> {
    fn parse<I>(iter: &mut Peekable<I>) -> Result<Self, Error>
    where
        I: Iterator<Item = Token<'s>>,
    {
        let head = Term::parse(iter)?;
        if next(iter)? != Token::Eq {
            return Err(Error::ExpectedEq);
        }
        let body = Term::parse(iter)?;
        Ok(Rule { head, body })
    }
}

impl<'s> Parse<'s> for Command<&'s str> {
    fn parse<I>(iter: &mut Peekable<I>) -> Result<Self, Error>
    where
        I: Iterator<Item = Token<'s>>,
    {
        match next(iter)? {
            Token::Rule => {
                let name = match next(iter)? {
                    Token::Ident(id) => id,
                    _ => return Err(Error::ExpectedIdent),
                };
                iter.next_if_eq(&Token::Colon);
                Ok(Self::Rule(name, Rule::parse(iter)?))
            }
            Token::Shape => Ok(Self::Shape(Term::parse(iter)?)),
            Token::Apply => {
                let inv = iter.next_if_eq(&Token::Bang).is_some();
                let rule = match next(iter)? {
                    Token::Ident(name) => RuleRef::Named(name),
                    Token::Rule => RuleRef::Inline(Rule::parse(iter)?),
                    _ => return Err(Error::ExpectedIdentOrRule),
                };
                Ok(Self::Apply(inv, rule))
            }
            Token::Done => Ok(Self::Done),
            Token::Quit => Ok(Self::Quit),
            Token::Latex => Ok(Self::Latex),
            Token::Load => match next(iter)? {
                Token::Str(path) => Ok(Self::Load(path)),
                _ => Err(Error::ExpectedString),
            },
            _ => Err(Error::ExpectedCmd),
        }
    }
}

impl<'s> Command<&'s str> {
    /// Parse a line, yielding `None` if it is blank.
    ///
    /// ~~~
    /// # use shape_parse::{Command, Term};
    /// assert_eq!(Command::parse_line("  # nothing to see here")?, None);
    /// let shape = Command::Shape(Term::Symb("x"));
    /// assert_eq!(Command::parse_line("shape x")?, Some(shape));
    /// # Ok::<_, shape_parse::Error>(())
    /// ~~~
    pub fn parse_line(s: &'s str) -> Result<Option<Self>, Error> {
        let mut iter = crate::lex(s).peekable();
        if matches!(iter.peek(), None | Some(Token::Eol)) {
            return Ok(None);
        }
        let cmd = Self::parse(&mut iter)?;
        end(&mut iter)?;
        Ok(Some(cmd))
    }
}

#[test]
fn positive() -> Result<(), Error> {
    type Tm<'s> = Term<&'s str>;
    type Cmd<'s> = Command<&'s str>;
    Tm::parse_str("x")?;
    Tm::parse_str("f()")?;
    Tm::parse_str("f(x, g(Y), h())")?;
    Tm::parse_str("F(x)\n")?;
    Tm::parse_str("g(y)(x)")?;
    Cmd::parse_str("rule swap pair(A, B) = pair(B, A)")?;
    Cmd::parse_str("rule swap: pair(A, B) = pair(B, A)")?;
    Cmd::parse_str("shape pair(f(x), g(y))")?;
    Cmd::parse_str("apply swap")?;
    Cmd::parse_str("apply !swap")?;
    Cmd::parse_str("apply rule f(X) = X")?;
    Cmd::parse_str("apply !rule f(X) = X")?;
    Cmd::parse_str("done")?;
    Cmd::parse_str("quit")?;
    Cmd::parse_str("latex # toggle")?;
    Cmd::parse_str(r#"load "demos/swap.shp""#)?;
    Ok(())
}

#[test]
fn negative() {
    use Error::*;
    let term_err = |s| Term::<&str>::parse_str(s).unwrap_err();
    assert_eq!(term_err(""), UnexpectedEnd);
    assert_eq!(term_err("rule"), ExpectedTerm);
    assert_eq!(term_err("(x)"), ExpectedTerm);
    assert_eq!(term_err("f(x"), UnexpectedEnd);
    assert_eq!(term_err("f(x y)"), ExpectedCommaOrRPar);
    assert_eq!(term_err("f(x,)"), ExpectedTerm);
    assert_eq!(term_err("f(x))"), ExpectedEnd);
    assert_eq!(term_err("f(+)"), Lex(LexError::UnknownChar));

    let cmd_err = |s| Command::<&str>::parse_str(s).unwrap_err();
    assert_eq!(cmd_err("x"), ExpectedCmd);
    assert_eq!(cmd_err("rule f(x) = x"), ExpectedTerm);
    assert_eq!(cmd_err("rule = x"), ExpectedIdent);
    assert_eq!(cmd_err("rule r f(X) X"), ExpectedEq);
    assert_eq!(cmd_err("rule r f(X) ="), UnexpectedEnd);
    assert_eq!(cmd_err("shape rule"), ExpectedTerm);
    assert_eq!(cmd_err("apply"), UnexpectedEnd);
    assert_eq!(cmd_err("apply !!swap"), ExpectedIdentOrRule);
    assert_eq!(cmd_err("done now"), ExpectedEnd);
    assert_eq!(cmd_err("load demos"), ExpectedString);
    assert_eq!(cmd_err(r#"load "demos"#), Lex(LexError::UnclosedString));
}

#[test]
fn commands() -> Result<(), Error> {
    let swap = Rule::<&str>::parse_str("pair(A, B) = pair(B, A)")?;
    assert_eq!(swap.head, Term::parse_str("pair(A, B)")?);
    assert_eq!(swap.body.args(), &[Term::Var("B"), Term::Var("A")]);
    assert_eq!(
        Command::parse_str("rule swap: pair(A, B) = pair(B, A)")?,
        Command::Rule("swap", swap.clone())
    );
    assert_eq!(
        Command::parse_str("apply !rule pair(A, B) = pair(B, A)")?,
        Command::Apply(true, RuleRef::Inline(swap))
    );
    assert_eq!(
        Command::parse_str("apply swap")?,
        Command::Apply(false, RuleRef::Named("swap"))
    );
    assert_eq!(Command::parse_line("\n")?, None);
    Ok(())
}
