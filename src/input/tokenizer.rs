use std::collections::TryReserveError;
use std::ffi::{CString, NulError};
use std::fmt;

const DELIMITER: char = ' ';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Nothing to execute: the line was empty or only delimiters.
    Empty,
    TooManyArgs { limit: usize },
    OutOfMemory,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty command"),
            ParseError::TooManyArgs { limit } => {
                write!(f, "too many arguments (limit is {})", limit)
            }
            ParseError::OutOfMemory => write!(f, "out of memory while parsing command"),
        }
    }
}

impl std::error::Error for ParseError {}

impl From<TryReserveError> for ParseError {
    fn from(_: TryReserveError) -> Self {
        ParseError::OutOfMemory
    }
}

/// The argument vector for one input line. Never empty.
///
/// Every token is an owned copy; dropping the command releases all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    args: Vec<String>,
}

impl ParsedCommand {
    pub fn program(&self) -> &str {
        self.args.first().map_or("", String::as_str)
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the token at `index`, or `None` once past the last token.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(String::as_str)
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    /// Converts the tokens into C strings suitable for an `execvp`-style call.
    pub fn to_exec_argv(&self) -> Result<Vec<CString>, NulError> {
        self.args.iter().map(|arg| CString::new(arg.as_str())).collect()
    }
}

impl AsRef<[String]> for ParsedCommand {
    fn as_ref(&self) -> &[String] {
        &self.args
    }
}

/// Splits `line` on single spaces into at most `max_args` owned tokens.
///
/// Runs of spaces never produce empty tokens. Tabs are not delimiters. On any
/// failure the tokens copied so far are dropped before returning.
pub fn cmd_parse(line: &str, max_args: usize) -> Result<ParsedCommand, ParseError> {
    let mut args: Vec<String> = Vec::new();

    for token in line.split(DELIMITER).filter(|t| !t.is_empty()) {
        if args.len() >= max_args {
            return Err(ParseError::TooManyArgs { limit: max_args });
        }

        args.try_reserve(1)?;
        let mut owned = String::new();
        owned.try_reserve_exact(token.len())?;
        owned.push_str(token);
        args.push(owned);
    }

    if args.is_empty() {
        return Err(ParseError::Empty);
    }

    Ok(ParsedCommand { args })
}
