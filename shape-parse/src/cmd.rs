use crate::Term;
use core::fmt::{self, Display};

/// Rewrite rule as written by the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule<S> {
    /// pattern to match with
    pub head: Term<S>,
    /// term to replace with
    pub body: Term<S>,
}

/// Rule given to an `apply` command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleRef<S> {
    /// previously defined rule
    Named(S),
    /// rule given in place, e.g. `apply rule f(X) = X`
    Inline(Rule<S>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command<S> {
    /// Define a named rewrite rule
    Rule(S, Rule<S>),
    /// Start shaping a term
    Shape(Term<S>),
    /// Rewrite the shaped term, swapping the rule sides if the flag is set
    Apply(bool, RuleRef<S>),
    /// Stop shaping
    Done,
    Quit,
    /// Toggle LaTeX output
    Latex,
    /// Run the commands in a file
    Load(S),
}

impl<S> Rule<S> {
    pub fn map<T>(self, f: &impl Fn(S) -> T) -> Rule<T> {
        Rule {
            head: self.head.map(f),
            body: self.body.map(f),
        }
    }
}

impl<S> RuleRef<S> {
    pub fn map<T>(self, f: &impl Fn(S) -> T) -> RuleRef<T> {
        match self {
            Self::Named(name) => RuleRef::Named(f(name)),
            Self::Inline(rule) => RuleRef::Inline(rule.map(f)),
        }
    }
}

impl<S> Command<S> {
    pub fn map<T>(self, f: &impl Fn(S) -> T) -> Command<T> {
        match self {
            Self::Rule(name, rule) => Command::Rule(f(name), rule.map(f)),
            Self::Shape(tm) => Command::Shape(tm.map(f)),
            Self::Apply(inv, rule) => Command::Apply(inv, rule.map(f)),
            Self::Done => Command::Done,
            Self::Quit => Command::Quit,
            Self::Latex => Command::Latex,
            Self::Load(path) => Command::Load(f(path)),
        }
    }
}

impl<S: Display> Display for Rule<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.head, self.body)
    }
}

impl<S: Display> Display for Command<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule(name, rule) => write!(f, "rule {}: {}", name, rule),
            Self::Shape(tm) => write!(f, "shape {}", tm),
            Self::Apply(inv, rule) => {
                write!(f, "apply ")?;
                if *inv {
                    write!(f, "!")?;
                }
                match rule {
                    RuleRef::Named(name) => name.fmt(f),
                    RuleRef::Inline(rule) => write!(f, "rule {}", rule),
                }
            }
            Self::Done => write!(f, "done"),
            Self::Quit => write!(f, "quit"),
            Self::Latex => write!(f, "latex"),
            Self::Load(path) => write!(f, "load \"{}\"", path),
        }
    }
}
