#![no_std]
#![forbid(unsafe_code)]

//! Interactive shaping of first-order terms by rewrite rules.
//!
//! This is the library underlying the `shaperepl` shell.
//!
//! # Usage
//!
//! Users communicate with a [`Session`] using *commands*, one per line.
//! A command either
//! adds a named rewrite rule,
//! starts shaping a term,
//! rewrites the term being shaped with a rule, or
//! finishes shaping.
//! The state of a session consists of
//! a table of named [`Rule`]s and
//! the term currently being shaped, if any.
//!
//! How is a rule applied?
//! A rule `head = body` rewrites every outermost subterm that
//! [matches](matching::matches) its head to
//! its body [instantiated](subst::subst) with the bindings of the match.
//! Rewritten subterms are not visited again,
//! so every application of a rule terminates.
//!
//! The following example shapes a term with a stored rule and an inline rule:
//!
//! ~~~
//! # use shaper::{Error, Outcome, Session};
//! let cmds = [
//!     "rule swap: pair(A, B) = pair(B, A)",
//!     "shape pair(f(x), sum(y, zero))",
//!     "apply swap",
//!     // inline rules are not stored
//!     "apply rule sum(X, zero) = X",
//! ];
//!
//! let mut session = Session::new();
//! for c in cmds.iter() {
//!     session.execute(c)?;
//! }
//! assert_eq!(session.current().unwrap().to_string(), "pair(y, f(x))");
//!
//! match session.execute("done")? {
//!     Outcome::Finished(tm) => assert_eq!(tm.to_string(), "pair(y, f(x))"),
//!     _ => panic!("finished shaping expected"),
//! }
//! # Ok::<_, Error>(())
//! ~~~
//!
//! Reading files and printing results is left to the caller;
//! a [`Session`] only reports what happened as an [`Outcome`].

extern crate alloc;
#[macro_use]
extern crate log;

pub use shape_parse as parse;

pub mod error;
pub mod matching;
mod rule;
mod session;
pub mod subst;

pub use error::{Error, SessionError};
pub use matching::Bindings;
pub use parse::Term;
pub use rule::Rule;
pub use session::{Outcome, Session, Show, State};
