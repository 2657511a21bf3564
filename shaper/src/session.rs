//! Shaping sessions.

use crate::error::{Error, SessionError};
use crate::parse::{Command, RuleRef};
use crate::Rule;
use alloc::collections::{btree_map::Entry, BTreeMap};
use alloc::string::String;
use core::fmt::{self, Display};

type Term = crate::Term<String>;

/// Whether a term is currently being shaped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Idle,
    Shaping,
}

/// What a successfully run command did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// blank line
    Nothing,
    /// a rule was added under the given name
    Defined(String),
    /// shaping of the term started
    Shaping(Term),
    /// the shaped term was rewritten to the term
    Rewritten(Term),
    /// shaping of the term finished
    Finished(Term),
    /// LaTeX output was switched on (true) or off (false)
    Notation(bool),
    Quit,
    /// the file should be run in this session
    Load(String),
}

/// Rule table and the term being shaped.
///
/// Furthermore, record how terms should be shown and
/// whether the user asked to quit.
#[derive(Clone, Debug, Default)]
pub struct Session {
    rules: BTreeMap<String, Rule>,
    current: Option<Term>,
    /// show terms in LaTeX
    pub latex: bool,
    pub quit: bool,
}

impl Session {
    /// Construct an idle session without rules.
    ///
    /// ~~~
    /// # use shaper::{Session, State};
    /// let session = Session::new();
    /// assert_eq!(session.state(), State::Idle);
    /// assert!(session.latex == false);
    /// ~~~
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> State {
        match self.current {
            None => State::Idle,
            Some(_) => State::Shaping,
        }
    }

    /// Return the term being shaped.
    pub fn current(&self) -> Option<&Term> {
        self.current.as_ref()
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Return all rules, ordered by name.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.rules.iter().map(|(name, rule)| (name.as_str(), rule))
    }

    /// Add a rule under a name that was not used before.
    pub fn add_rule(&mut self, name: String, rule: Rule) -> Result<(), SessionError> {
        match self.rules.entry(name) {
            Entry::Occupied(e) => Err(SessionError::RuleExists(e.key().clone())),
            Entry::Vacant(e) => {
                info!("Add rule {}: {}", e.key(), rule);
                e.insert(rule);
                Ok(())
            }
        }
    }

    /// Start shaping a term.
    pub fn shape(&mut self, tm: Term) -> Result<&Term, SessionError> {
        if self.current.is_some() {
            return Err(SessionError::AlreadyShaping);
        }
        debug!("Shape {}", tm);
        Ok(self.current.insert(tm))
    }

    /// Rewrite the shaped term with a stored or an inline rule.
    ///
    /// If `inverse` is set, the rule is applied from its body to its head.
    pub fn apply(&mut self, inverse: bool, rule: RuleRef<String>) -> Result<&Term, SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NotShaping)?;
        let next = match rule {
            RuleRef::Named(name) => match self.rules.get(&name) {
                Some(rule) => rule.apply(inverse, current),
                None => return Err(SessionError::NoSuchRule(name)),
            },
            RuleRef::Inline(rule) => Rule::from(rule).apply(inverse, current),
        };
        debug!("Shaped {} to {}", current, next);
        Ok(self.current.insert(next))
    }

    /// Stop shaping, returning the shaped term.
    pub fn done(&mut self) -> Result<Term, SessionError> {
        self.current.take().ok_or(SessionError::NotShaping)
    }

    /// Switch between plain and LaTeX output, returning whether LaTeX is now on.
    pub fn toggle_latex(&mut self) -> bool {
        self.latex = !self.latex;
        self.latex
    }

    pub fn run(&mut self, cmd: Command<String>) -> Result<Outcome, SessionError> {
        match cmd {
            Command::Rule(name, rule) => {
                self.add_rule(name.clone(), rule.into())?;
                Ok(Outcome::Defined(name))
            }
            Command::Shape(tm) => self.shape(tm).cloned().map(Outcome::Shaping),
            Command::Apply(inverse, rule) => {
                self.apply(inverse, rule).cloned().map(Outcome::Rewritten)
            }
            Command::Done => self.done().map(Outcome::Finished),
            Command::Quit => {
                self.quit = true;
                Ok(Outcome::Quit)
            }
            Command::Latex => Ok(Outcome::Notation(self.toggle_latex())),
            Command::Load(path) => Ok(Outcome::Load(path)),
        }
    }

    /// Parse and run a line.
    ///
    /// If the line cannot be parsed, the session is left unchanged.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, Error> {
        match Command::parse_line(line)? {
            None => Ok(Outcome::Nothing),
            Some(cmd) => Ok(self.run(cmd.map(&String::from))?),
        }
    }

    /// Show a term in the current notation.
    pub fn show<'a>(&self, tm: &'a Term) -> Show<'a> {
        let latex = self.latex;
        Show { tm, latex }
    }
}

/// Term shown either in plain or in LaTeX notation.
pub struct Show<'a> {
    tm: &'a Term,
    latex: bool,
}

impl<'a> Display for Show<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.latex {
            self.tm.latex().fmt(f)
        } else {
            self.tm.fmt(f)
        }
    }
}

#[cfg(test)]
fn run_all(session: &mut Session, lines: &[&str]) -> Result<Outcome, Error> {
    let mut outcome = Outcome::Nothing;
    for line in lines {
        outcome = session.execute(line)?;
    }
    Ok(outcome)
}

#[cfg(test)]
fn term(s: &str) -> Term {
    use crate::parse::Parse;
    crate::Term::<&str>::parse_str(s).unwrap().map(&String::from)
}

#[test]
fn swap() -> Result<(), Error> {
    let mut session = Session::new();
    let lines = [
        "rule swap: pair(A, B) = pair(B, A)",
        "shape pair(f(x), g(y))",
        "apply swap",
    ];
    let outcome = run_all(&mut session, &lines)?;
    assert_eq!(outcome, Outcome::Rewritten(term("pair(g(y), f(x))")));
    assert_eq!(session.current(), Some(&term("pair(g(y), f(x))")));

    let outcome = session.execute("apply !swap")?;
    assert_eq!(outcome, Outcome::Rewritten(term("pair(f(x), g(y))")));
    assert_eq!(session.rule("swap"), Some(&Rule::from(term_rule("pair(A, B) = pair(B, A)"))));
    Ok(())
}

#[cfg(test)]
fn term_rule(s: &str) -> crate::parse::Rule<String> {
    use crate::parse::Parse;
    crate::parse::Rule::<&str>::parse_str(s).unwrap().map(&String::from)
}

#[test]
fn latex() -> Result<(), Error> {
    use alloc::string::ToString;
    let mut session = Session::new();
    session.execute("shape eq(x, y)")?;
    let tm = session.current().unwrap().clone();
    assert_eq!(session.show(&tm).to_string(), "eq(x, y)");
    assert_eq!(session.execute("latex")?, Outcome::Notation(true));
    assert_eq!(session.show(&tm).to_string(), "x = y");
    assert_eq!(session.execute("latex")?, Outcome::Notation(false));
    assert_eq!(session.show(&tm).to_string(), "eq(x, y)");
    Ok(())
}

#[test]
fn duplicate() -> Result<(), Error> {
    let mut session = Session::new();
    session.execute("rule r1: f(A) = f(A)")?;
    let err = session.execute("rule r1: g(B) = g(B)").unwrap_err();
    assert_eq!(err, SessionError::RuleExists("r1".into()).into());
    assert_eq!(session.rule("r1"), Some(&Rule::from(term_rule("f(A) = f(A)"))));
    assert_eq!(session.rules().count(), 1);
    Ok(())
}

#[test]
fn guards() -> Result<(), Error> {
    let mut session = Session::new();
    assert_eq!(session.done(), Err(SessionError::NotShaping));
    assert_eq!(session.state(), State::Idle);
    let err = session.execute("apply swap").unwrap_err();
    assert_eq!(err, Error::Session(SessionError::NotShaping));

    session.execute("shape f(x)")?;
    assert_eq!(session.state(), State::Shaping);
    let err = session.execute("shape g(y)").unwrap_err();
    assert_eq!(err, Error::Session(SessionError::AlreadyShaping));
    assert_eq!(session.current(), Some(&term("f(x)")));

    let err = session.execute("apply nope").unwrap_err();
    assert_eq!(err, Error::Session(SessionError::NoSuchRule("nope".into())));
    assert_eq!(session.current(), Some(&term("f(x)")));

    assert_eq!(session.execute("done")?, Outcome::Finished(term("f(x)")));
    assert_eq!(session.state(), State::Idle);
    assert_eq!(session.execute("done"), Err(Error::Session(SessionError::NotShaping)));
    Ok(())
}

#[test]
fn malformed() -> Result<(), Error> {
    use crate::parse::Error as ParseError;
    let mut session = Session::new();
    session.execute("shape f(x)")?;
    let err = session.execute("apply rule f(X) = g(X").unwrap_err();
    assert_eq!(err, Error::Parse(ParseError::UnexpectedEnd));
    let err = session.execute("rule r: f(X)").unwrap_err();
    assert_eq!(err, Error::Parse(ParseError::UnexpectedEnd));
    assert!(session.execute("frobnicate").is_err());
    assert_eq!(session.current(), Some(&term("f(x)")));
    assert_eq!(session.rules().count(), 0);
    Ok(())
}

#[test]
fn inline() -> Result<(), Error> {
    let mut session = Session::new();
    let lines = [
        "shape sum(a, zero)",
        "apply rule sum(X, zero) = X",
        "apply !rule sum(X, zero) = X",
    ];
    assert_eq!(run_all(&mut session, &lines)?, Outcome::Rewritten(term("sum(a, zero)")));
    // inline rules are not stored
    assert_eq!(session.rules().count(), 0);
    Ok(())
}

#[test]
fn misc() -> Result<(), Error> {
    let mut session = Session::new();
    assert_eq!(session.execute("   ")?, Outcome::Nothing);
    assert_eq!(
        session.execute(r#"load "demos/swap.shp""#)?,
        Outcome::Load("demos/swap.shp".into())
    );
    assert!(!session.quit);
    assert_eq!(session.execute("quit")?, Outcome::Quit);
    assert!(session.quit);
    assert_eq!(session.execute("rule b: x = y")?, Outcome::Defined("b".into()));
    assert_eq!(session.execute("rule a: y = x")?, Outcome::Defined("a".into()));
    let names: alloc::vec::Vec<_> = session.rules().map(|(name, _)| name).collect();
    assert_eq!(names, ["a", "b"]);
    Ok(())
}
