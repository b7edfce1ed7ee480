use crate::core::commands::CommandError;
use crate::input::ParseError;
use crate::process::ProcessError;

#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    /// A terminal or process-group call failed while securing the session.
    Terminal {
        op: &'static str,
        source: std::io::Error,
    },
    FlagError(String),
    Parse(ParseError),
    Command(CommandError),
    Process(ProcessError),
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err)
    }
}

impl From<ParseError> for ShellError {
    fn from(err: ParseError) -> Self {
        ShellError::Parse(err)
    }
}

impl From<CommandError> for ShellError {
    fn from(err: CommandError) -> Self {
        ShellError::Command(err)
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::Process(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "Readline error: {}", e),
            ShellError::Terminal { op, source } => write!(f, "{}: {}", op, source),
            ShellError::FlagError(msg) => write!(f, "Flag error: {}", msg),
            ShellError::Parse(e) => write!(f, "Parse error: {}", e),
            ShellError::Command(e) => write!(f, "{}", e),
            ShellError::Process(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Readline(e) => Some(e),
            ShellError::Terminal { source, .. } => Some(source),
            ShellError::Parse(e) => Some(e),
            ShellError::Command(e) => Some(e),
            ShellError::Process(e) => Some(e),
            ShellError::FlagError(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn parse_line(line: &str) -> Result<(), ShellError> {
        crate::input::cmd_parse(line, 1)?;
        Ok(())
    }

    #[test]
    fn test_parse_error_converts() {
        let err = parse_line("a b").unwrap_err();
        assert!(matches!(
            err,
            ShellError::Parse(ParseError::TooManyArgs { limit: 1 })
        ));
        assert!(err.to_string().contains("too many arguments"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_command_and_process_errors_keep_their_message() {
        let err: ShellError = CommandError::HomeDirNotFound.into();
        assert_eq!(err.to_string(), "cd: home directory not found");

        let err: ShellError = ProcessError::CommandNotFound("nope".to_string()).into();
        assert_eq!(err.to_string(), "command not found: nope");
    }
}
