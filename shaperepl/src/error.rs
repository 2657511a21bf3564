use std::fmt::{self, Display};
use std::io;
use std::path::PathBuf;

/// Central error type.
#[derive(Debug)]
pub enum Error {
    Io(io::Error),
    Shaper(shaper::Error),
    /// file does not have the extension of scripts
    NotAScript(PathBuf),
    /// script is loaded while it is already being loaded
    Recursive(PathBuf),
    /// line of a script failed
    Script {
        path: PathBuf,
        line: usize,
        error: Box<Error>,
    },
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<shaper::Error> for Error {
    fn from(err: shaper::Error) -> Self {
        Self::Shaper(err)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::Shaper(e) => e.fmt(f),
            Self::NotAScript(path) => write!(f, "{} is not a script file", path.display()),
            Self::Recursive(path) => write!(f, "{} is already being loaded", path.display()),
            Self::Script { path, line, error } => {
                write!(f, "{}:{}: {}", path.display(), line, error)
            }
        }
    }
}

impl std::error::Error for Error {}
