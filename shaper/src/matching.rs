//! Pattern matching.

use crate::Term;
use core::hash::Hash;
use fnv::FnvHashMap;

/// Map from the variables of a pattern to the subterms they matched.
pub type Bindings<'a, S> = FnvHashMap<&'a S, &'a Term<S>>;

/// Match a pattern against a term, returning the bindings of the pattern variables.
///
/// Matching is one-directional: variables in `tm` are treated like symbols.
/// Patterns may be nonlinear; every further occurrence of a variable
/// must match a term structurally equal to the one it was first bound to.
///
/// ~~~
/// # use shaper::{matching::matches, parse::Parse, Term};
/// let pat = Term::<&str>::parse_str("eq(X, X)")?;
/// assert!(matches(&pat, &Term::<&str>::parse_str("eq(f(a), f(a))")?).is_some());
/// assert!(matches(&pat, &Term::<&str>::parse_str("eq(f(a), f(b))")?).is_none());
/// # Ok::<_, shaper::parse::Error>(())
/// ~~~
pub fn matches<'a, S: Eq + Hash>(pat: &'a Term<S>, tm: &'a Term<S>) -> Option<Bindings<'a, S>> {
    let mut bnd = Bindings::default();
    match_with(pat, tm, &mut bnd).then(|| bnd)
}

fn match_with<'a, S: Eq + Hash>(pat: &'a Term<S>, tm: &'a Term<S>, bnd: &mut Bindings<'a, S>) -> bool {
    match (pat, tm) {
        (Term::Symb(p), Term::Symb(s)) => p == s,
        (Term::Var(x), _) => match bnd.get(x) {
            Some(bound) => *bound == tm,
            None => {
                bnd.insert(x, tm);
                true
            }
        },
        (Term::Appl(phead, pargs), Term::Appl(head, args)) => {
            pargs.len() == args.len()
                && same_head(phead, head, bnd)
                && pargs.iter().zip(args).all(|(p, a)| match_with(p, a, bnd))
        }
        _ => false,
    }
}

/// Compare the heads of two applications.
///
/// Atomic heads are compared by name, so a variable head never binds.
/// An applied head, such as `f(x)` in `f(x)(y)`, is matched like an argument.
fn same_head<'a, S: Eq + Hash>(phead: &'a Term<S>, head: &'a Term<S>, bnd: &mut Bindings<'a, S>) -> bool {
    match (phead, head) {
        (Term::Appl(..), Term::Appl(..)) => match_with(phead, head, bnd),
        (Term::Appl(..), _) | (_, Term::Appl(..)) => false,
        _ => phead.name() == head.name(),
    }
}

#[cfg(test)]
fn parse(s: &str) -> Term<&str> {
    use crate::parse::Parse;
    Term::parse_str(s).unwrap()
}

#[test]
fn atoms() {
    assert!(matches(&parse("x"), &parse("x")).is_some());
    assert!(matches(&parse("x"), &parse("y")).is_none());
    assert!(matches(&parse("x"), &parse("x()")).is_none());
    assert!(matches(&parse("f()"), &parse("f")).is_none());
    assert!(matches(&parse("f()"), &parse("f()")).is_some());

    let (pat, tm) = (parse("X"), parse("f(x)"));
    let bnd = matches(&pat, &tm).unwrap();
    assert_eq!(bnd.len(), 1);
    assert_eq!(bnd[&"X"], &tm);
}

#[test]
fn appl() {
    let pat = parse("pair(A, B)");
    let tm = parse("pair(f(x), g(y))");
    let bnd = matches(&pat, &tm).unwrap();
    assert_eq!(*bnd[&"A"], parse("f(x)"));
    assert_eq!(*bnd[&"B"], parse("g(y)"));

    // different head, arity, or argument
    assert!(matches(&pat, &parse("tuple(x, y)")).is_none());
    assert!(matches(&pat, &parse("pair(x, y, z)")).is_none());
    assert!(matches(&parse("pair(A, y)"), &parse("pair(x, z)")).is_none());
}

#[test]
fn nonlinear() {
    let pat = parse("eq(X, X)");
    assert!(matches(&pat, &parse("eq(f(a, b), f(a, b))")).is_some());
    // same head name is not enough
    assert!(matches(&pat, &parse("eq(f(a), f(b))")).is_none());
    assert!(matches(&pat, &parse("eq(f(a), f(a, a))")).is_none());
}

#[test]
fn heads() {
    // a variable head is compared by name and binds nothing
    assert!(matches(&parse("F(A)"), &parse("g(y)")).is_none());
    assert!(matches(&parse("F(F(x))"), &parse("g(g(x))")).is_none());
    let (pat, tm) = (parse("F(A)"), parse("F(y)"));
    let bnd = matches(&pat, &tm).unwrap();
    assert_eq!(bnd.len(), 1);
    assert_eq!(*bnd[&"A"], parse("y"));

    // applied heads are matched structurally
    let (pat, tm) = (parse("f(X)(Y)"), parse("f(a)(b)"));
    let bnd = matches(&pat, &tm).unwrap();
    assert_eq!((bnd[&"X"], bnd[&"Y"]), (&parse("a"), &parse("b")));
    assert!(matches(&parse("f(a)(Y)"), &parse("f(c)(b)")).is_none());
    assert!(matches(&parse("f(Y)"), &parse("f()(b)")).is_none());
}

#[test]
fn soundness() {
    use crate::subst::subst;
    for (pat, tm) in [
        ("X", "f(x)"),
        ("pair(A, B)", "pair(f(x), g(y))"),
        ("eq(X, X)", "eq(h(), h())"),
        ("k(a, Y)", "k(a, m(n))"),
        ("sum(X, zero)", "sum(mul(a, b), zero)"),
    ] {
        let (pat, tm) = (parse(pat), parse(tm));
        let bnd = matches(&pat, &tm).unwrap();
        assert_eq!(subst(&pat, &bnd), tm);
    }
}
