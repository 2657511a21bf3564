use criterion::{criterion_group, criterion_main, Criterion};
use shaper::parse::{Command, Parse, Term};
use shaper::{Error, Rule, Session};

fn shape(lines: &[&str]) -> Result<(), Error> {
    let mut session = Session::new();
    for line in lines {
        session.execute(line)?;
    }
    Ok(())
}

/// Build `s(s(...s(z)...))` with `n` applications of `s`.
fn nat(n: usize) -> Term<String> {
    let s = || Term::Symb("s".to_string());
    (0..n).fold(Term::Symb("z".to_string()), |tm, _| Term::appl(s(), vec![tm]))
}

/// Build a balanced tree of `pair` applications with depth `n`.
fn tree(n: usize) -> Term<String> {
    if n == 0 {
        Term::Symb("x".to_string())
    } else {
        let sub = tree(n - 1);
        Term::appl(Term::Symb("pair".to_string()), vec![sub.clone(), sub])
    }
}

fn rule(s: &str) -> Rule<String> {
    let rule = shaper::parse::Rule::<&str>::parse_str(s).unwrap();
    Rule::from(rule.map(&String::from))
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let lines = include_str!("../../demos/calculus.shp");
    let lines: Vec<_> = lines.lines().collect();

    let swap = rule("pair(A, B) = pair(B, A)");
    let grow = rule("s(N) = s(s(N))");
    let eq = rule("pair(X, X) = X");
    let (t16, n1000) = (tree(16), nat(1000));

    c.bench_function("parse", |b| {
        b.iter(|| lines.iter().map(|l| Command::parse_line(l).unwrap()).count())
    });
    c.bench_function("calculus", |b| b.iter(|| shape(&lines).unwrap()));
    c.bench_function("swap16", |b| b.iter(|| swap.apply_all(&t16)));
    c.bench_function("grow1000", |b| b.iter(|| grow.apply_all(&n1000)));
    c.bench_function("nonlinear16", |b| b.iter(|| eq.apply_all(&t16)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
