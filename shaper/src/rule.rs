//! Rewrite rules and their application.

use crate::matching::matches;
use crate::subst::subst;
use crate::{parse, Term};
use alloc::string::String;
use core::fmt::{self, Display};
use core::hash::Hash;

/// Rewrite rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule<S = String> {
    /// pattern to match with
    pub head: Term<S>,
    /// term to replace with
    pub body: Term<S>,
}

impl<S> From<parse::Rule<S>> for Rule<S> {
    fn from(rule: parse::Rule<S>) -> Self {
        let parse::Rule { head, body } = rule;
        Self { head, body }
    }
}

impl<S: Clone + Eq + Hash + Display> Rule<S> {
    /// Rewrite every outermost subterm of `tm` that matches the head of the rule.
    ///
    /// Rewritten subterms are not rewritten again,
    /// so applying a rule once never loops.
    ///
    /// ~~~
    /// # use shaper::{parse::{Parse, Term}, Rule};
    /// type Tm<'s> = Term<&'s str>;
    /// let rule = Rule {
    ///     head: Tm::parse_str("pair(A, B)")?,
    ///     body: Tm::parse_str("pair(B, A)")?,
    /// };
    /// let tm = Tm::parse_str("f(pair(x, y), pair(pair(a, b), c))")?;
    /// assert_eq!(rule.apply_all(&tm), Tm::parse_str("f(pair(y, x), pair(c, pair(a, b)))")?);
    /// # Ok::<_, shaper::parse::Error>(())
    /// ~~~
    pub fn apply_all(&self, tm: &Term<S>) -> Term<S> {
        rewrite(&self.head, &self.body, tm)
    }

    /// Same as [`Self::apply_all`], but rewriting from the body to the head.
    pub fn apply_inverse(&self, tm: &Term<S>) -> Term<S> {
        rewrite(&self.body, &self.head, tm)
    }

    pub fn apply(&self, inverse: bool, tm: &Term<S>) -> Term<S> {
        if inverse {
            self.apply_inverse(tm)
        } else {
            self.apply_all(tm)
        }
    }
}

fn rewrite<S: Clone + Eq + Hash + Display>(head: &Term<S>, body: &Term<S>, tm: &Term<S>) -> Term<S> {
    if let Some(bnd) = matches(head, tm) {
        let tm2 = subst(body, &bnd);
        trace!("rewrite: {} ⟶ {}", tm, tm2);
        return tm2;
    }
    match tm {
        Term::Symb(_) | Term::Var(_) => tm.clone(),
        Term::Appl(h, args) => {
            let args = args.iter().map(|a| rewrite(head, body, a)).collect();
            Term::appl(rewrite(head, body, h), args)
        }
    }
}

impl<S: Display> Display for Rule<S> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} = {}", self.head, self.body)
    }
}

#[cfg(test)]
fn rule(s: &str) -> Rule<&str> {
    use crate::parse::Parse;
    Rule::from(parse::Rule::<&str>::parse_str(s).unwrap())
}

#[cfg(test)]
fn term(s: &str) -> Term<&str> {
    use crate::parse::Parse;
    Term::parse_str(s).unwrap()
}

#[test]
fn outermost() {
    let r = rule("f(X) = g(X)");
    // the outer match wins and its result is not scanned again
    assert_eq!(r.apply_all(&term("f(f(x))")), term("g(f(x))"));
    assert_eq!(r.apply_all(&term("h(f(a), f(b))")), term("h(g(a), g(b))"));
    // the argument of an unmatched application is rewritten
    assert_eq!(r.apply_all(&term("h(f(f(a)))")), term("h(g(f(a)))"));
}

#[test]
fn single_pass() {
    let r = rule("X = f(X)");
    assert_eq!(r.apply_all(&term("a")), term("f(a)"));
    assert_eq!(r.apply_all(&term("f(a)")), term("f(f(a))"));

    let r = rule("s(N) = s(s(N))");
    let tm = r.apply_all(&term("s(z)"));
    assert_eq!(tm, term("s(s(z))"));
    assert_eq!(r.apply_all(&tm), term("s(s(s(z)))"));
}

#[test]
fn untouched() {
    let r = rule("pair(A, B) = pair(B, A)");
    for s in ["x", "f(x, y)", "pair(x)", "triple(a, b, c)", "g(h(), pair(a))"] {
        assert_eq!(r.apply_all(&term(s)), term(s));
    }
    // only the matching subtree changes
    assert_eq!(
        r.apply_all(&term("f(g(a), pair(b, c), h(d))")),
        term("f(g(a), pair(c, b), h(d))")
    );
}

#[test]
fn inverse() {
    let r = rule("sum(X, zero) = X");
    assert_eq!(r.apply_all(&term("f(sum(a, zero))")), term("f(a)"));
    assert_eq!(r.apply_inverse(&term("f(a)")), term("sum(f(a), zero)"));
    assert_eq!(r.apply(true, &term("a")), term("sum(a, zero)"));
    assert_eq!(r, rule("sum(X, zero) = X"));
}

#[test]
fn head_position() {
    let r = rule("call(F, X) = F(X)");
    assert_eq!(r.apply_all(&term("call(f, a)")), term("f(a)"));
    // variables in the head of a rule body are instantiated
    assert_eq!(r.apply_all(&term("h(call(g, b))")), term("h(g(b))"));
    // but variables in head position of the rule head only match themselves
    let r = rule("F(A) = h(A)");
    assert_eq!(r.apply_all(&term("g(y)")), term("g(y)"));
    let r = rule("f = g");
    assert_eq!(r.apply_all(&term("f(f)")), term("g(g)"));
    assert_eq!(r.apply_all(&term("f()(x)")), term("g()(x)"));
}
