//! Substitution of bound variables.

use crate::{Bindings, Term};
use core::hash::Hash;

/// Replace the variables in `tm` that are bound in `bnd`.
///
/// Unbound variables are left as they are.
/// Variables in head position are substituted as well,
/// so that `F(x)` becomes `g(x)` if `F` is bound to `g`.
pub fn subst<S: Clone + Eq + Hash>(tm: &Term<S>, bnd: &Bindings<S>) -> Term<S> {
    match tm {
        Term::Symb(_) => tm.clone(),
        Term::Var(x) => bnd.get(x).map_or_else(|| tm.clone(), |u| (*u).clone()),
        Term::Appl(head, args) => {
            let args = args.iter().map(|a| subst(a, bnd)).collect();
            Term::appl(subst(head, bnd), args)
        }
    }
}

#[test]
fn substitution() {
    use crate::parse::Parse;
    let parse = |s| Term::<&str>::parse_str(s).unwrap();

    let (x, y) = (parse("f(x)"), parse("g(y)"));
    let mut bnd = Bindings::default();
    bnd.insert(&"A", &x);
    bnd.insert(&"B", &y);

    assert_eq!(subst(&parse("pair(B, A)"), &bnd), parse("pair(g(y), f(x))"));
    assert_eq!(subst(&parse("h(C, a)"), &bnd), parse("h(C, a)"));
    assert_eq!(subst(&parse("A(B)"), &bnd), Term::appl(x.clone(), [y.clone()].into()));
    assert_eq!(subst(&parse("B"), &bnd), parse("g(y)"));
}
