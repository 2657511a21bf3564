//! Common error type.

use crate::parse::Error as ParseError;
use alloc::string::String;
use core::fmt::{self, Display};

/// Command that cannot be run in the current session state.
///
/// Such errors leave the session unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    RuleExists(String),
    NoSuchRule(String),
    AlreadyShaping,
    NotShaping,
}

/// Common error type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    Parse(ParseError),
    Session(SessionError),
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::Parse(err)
    }
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::RuleExists(name) => write!(f, "rule {} already exists", name),
            Self::NoSuchRule(name) => write!(f, "rule {} does not exist", name),
            Self::AlreadyShaping => write!(f, "already shaping"),
            Self::NotShaping => write!(f, "no shaping in place"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "parse error: {}", e),
            Self::Session(e) => e.fmt(f),
        }
    }
}
