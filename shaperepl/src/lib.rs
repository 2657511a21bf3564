//! Shell for shaping terms interactively, one command per line.

mod error;
mod opt;
pub mod script;
mod shell;

pub use error::Error;
pub use opt::Opt;
pub use shell::Shell;
