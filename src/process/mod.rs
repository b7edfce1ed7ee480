use std::fmt;

pub mod executor;
pub mod signal;

pub use executor::ProcessExecutor;

#[derive(Debug)]
pub enum ProcessError {
    CommandNotFound(String),
    /// The program could not be handed the terminal or the shell could not
    /// take it back afterwards.
    Terminal(std::io::Error),
    Io(std::io::Error),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::CommandNotFound(cmd) => write!(f, "command not found: {}", cmd),
            ProcessError::Terminal(e) => write!(f, "terminal control failed: {}", e),
            ProcessError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::CommandNotFound(_) => None,
            ProcessError::Terminal(e) | ProcessError::Io(e) => Some(e),
        }
    }
}
