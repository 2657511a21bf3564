//! Terms built from symbols, variables, and applications.

use alloc::{boxed::Box, vec::Vec};
use core::fmt::{self, Display};
use itertools::Itertools;

/// First-order term with names of type `S`.
///
/// Structural equality is the derived `PartialEq`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term<S> {
    /// constant, matching only itself
    Symb(S),
    /// pattern variable, matching any term
    Var(S),
    /// head applied to a possibly empty list of arguments
    Appl(Box<Term<S>>, Vec<Term<S>>),
}

impl<S> Term<S> {
    /// Construct a symbol or a variable depending on the case of its first letter.
    ///
    /// ~~~
    /// # use shape_parse::Term;
    /// assert_eq!(Term::atom("X1"), Term::Var("X1"));
    /// assert_eq!(Term::atom("x1"), Term::Symb("x1"));
    /// ~~~
    pub fn atom(name: S) -> Self
    where
        S: AsRef<str>,
    {
        match name.as_ref().chars().next() {
            Some(c) if c.is_uppercase() => Self::Var(name),
            _ => Self::Symb(name),
        }
    }

    pub fn appl(head: Self, args: Vec<Self>) -> Self {
        Self::Appl(Box::new(head), args)
    }

    /// Return the name of an atom, or the name of the innermost head of an application.
    pub fn name(&self) -> &S {
        match self {
            Self::Symb(s) | Self::Var(s) => s,
            Self::Appl(head, _) => head.name(),
        }
    }

    pub fn args(&self) -> &[Self] {
        match self {
            Self::Symb(_) | Self::Var(_) => &[],
            Self::Appl(_, args) => args,
        }
    }

    pub fn is_atom(&self) -> bool {
        !matches!(self, Self::Appl(..))
    }

    /// Return true if the term contains no variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Self::Symb(_) => true,
            Self::Var(_) => false,
            Self::Appl(head, args) => head.is_ground() && args.iter().all(Self::is_ground),
        }
    }

    pub fn map<T>(self, f: &impl Fn(S) -> T) -> Term<T> {
        match self {
            Self::Symb(s) => Term::Symb(f(s)),
            Self::Var(v) => Term::Var(f(v)),
            Self::Appl(head, args) => Term::Appl(
                Box::new(head.map(f)),
                args.into_iter().map(|a| a.map(f)).collect(),
            ),
        }
    }

    /// Render the term in LaTeX math notation.
    pub fn latex(&self) -> Latex<S> {
        Latex(self)
    }
}

impl<S: Display> Display for Term<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Symb(s) | Self::Var(s) => s.fmt(f),
            Self::Appl(head, args) => write!(f, "{}({})", head, args.iter().format(", ")),
        }
    }
}

/// LaTeX rendering of a term.
///
/// Binary applications of a few well-known operators are rendered
/// in mathematical notation; any other application is rendered
/// like [`Term`], including its arguments.
///
/// ~~~
/// # use shape_parse::{Parse, Term};
/// let tm = Term::<&str>::parse_str("eq(div(a, b), pow(x, two))")?;
/// assert_eq!(tm.latex().to_string(), r"\frac{a}{b} = \left(x\right)^{two}");
/// # Ok::<_, shape_parse::Error>(())
/// ~~~
pub struct Latex<'a, S>(pub &'a Term<S>);

impl<'a, S: AsRef<str> + Display> Display for Latex<'a, S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (head, args) = match self.0 {
            Term::Symb(s) | Term::Var(s) => return s.fmt(f),
            Term::Appl(head, args) => (head, args),
        };
        if let (Term::Symb(op), [a, b]) = (&**head, &args[..]) {
            let (a, b) = (a.latex(), b.latex());
            match op.as_ref() {
                "eq" => return write!(f, "{} = {}", a, b),
                "sum" => return write!(f, r"\left({} + {}\right)", a, b),
                "sub" => return write!(f, r"\left({} - {}\right)", a, b),
                "mul" => return write!(f, r"\left({} \cdot {}\right)", a, b),
                "div" => return write!(f, r"\frac{{{}}}{{{}}}", a, b),
                "pow" => return write!(f, r"\left({}\right)^{{{}}}", a, b),
                "lim" => return write!(f, r"\lim\limits_{{{}}}\left({}\right)", a, b),
                "to" => return write!(f, r"{}\to {}", a, b),
                _ => (),
            }
        }
        self.0.fmt(f)
    }
}

#[cfg(test)]
fn parse(s: &str) -> Term<&str> {
    use crate::Parse;
    Term::parse_str(s).unwrap()
}

#[test]
fn render() {
    use alloc::string::ToString;
    let tm = Term::appl(
        Term::Symb("pair"),
        [
            Term::appl(Term::Symb("f"), [Term::Symb("x")].into()),
            Term::Var("B"),
            Term::appl(Term::Symb("g"), Vec::new()),
        ]
        .into(),
    );
    assert_eq!(tm.to_string(), "pair(f(x), B, g())");
    assert_eq!(Term::Symb("x").to_string(), "x");
}

#[test]
fn roundtrip() {
    use alloc::string::ToString;
    for s in [
        "x",
        "X",
        "f()",
        "f(x)",
        "F(x, y)",
        "pair(f(x), g(Y, h()))",
        "g(y)(x)",
        "lim(to(n, inf), div(one, n))",
    ] {
        let tm = parse(s);
        assert_eq!(tm.to_string(), s);
        assert_eq!(parse(&tm.to_string()), tm);
    }
}

#[test]
fn accessors() {
    let tm = parse("F(x, y)");
    assert_eq!(*tm.name(), "F");
    assert_eq!(tm.args(), &[Term::Symb("x"), Term::Symb("y")]);
    assert!(!tm.is_atom());
    assert!(!tm.is_ground());
    assert!(parse("f(x, g())").is_ground());
    assert!(parse("x").args().is_empty());
    let tm = Term::appl(Term::Var("Δ"), [Term::Symb("ξ")].into());
    assert_eq!(parse("Δ(ξ)"), tm);
    assert_ne!(parse("f"), parse("f()"));
    assert_ne!(parse("f(x)"), parse("f(y)"));
    assert_ne!(parse("f(x)"), parse("f(x, x)"));
}

#[test]
fn latex() {
    use alloc::string::ToString;
    let latex = |s| parse(s).latex().to_string();
    assert_eq!(latex("eq(x, y)"), "x = y");
    assert_eq!(latex("sum(a, b)"), r"\left(a + b\right)");
    assert_eq!(latex("sub(a, b)"), r"\left(a - b\right)");
    assert_eq!(latex("mul(a, b)"), r"\left(a \cdot b\right)");
    assert_eq!(latex("div(a, b)"), r"\frac{a}{b}");
    assert_eq!(latex("pow(a, b)"), r"\left(a\right)^{b}");
    assert_eq!(latex("to(n, inf)"), r"n\to inf");
    assert_eq!(
        latex("lim(to(n, inf), div(one, n))"),
        r"\lim\limits_{n\to inf}\left(\frac{one}{n}\right)"
    );
    // wrong arity or unknown head
    assert_eq!(latex("sum(a, b, c)"), "sum(a, b, c)");
    assert_eq!(latex("eq(x)"), "eq(x)");
    assert_eq!(latex("f(sum(a, b))"), "f(sum(a, b))");
    assert_eq!(latex("eq(f(sum(a, b)), c)"), "f(sum(a, b)) = c");
    assert_eq!(latex("X"), "X");
}
