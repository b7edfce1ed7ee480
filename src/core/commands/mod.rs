use std::collections::BTreeMap;
use std::path::PathBuf;

mod cd;
mod exit;
mod history;

pub use cd::{change_dir, user_home_dir, CdCommand};
pub use exit::ExitCommand;
pub use history::{write_history, HistoryCommand};

use crate::core::ShellState;

#[derive(Debug)]
pub enum CommandError {
    HomeDirNotFound,
    ChangeDir { path: PathBuf, source: std::io::Error },
    IoError(std::io::Error),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::HomeDirNotFound => write!(f, "cd: home directory not found"),
            CommandError::ChangeDir { path, source } => {
                write!(f, "cd: {}: {}", path.display(), source)
            }
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandError::ChangeDir { source, .. } => Some(source),
            CommandError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

/// A command the shell runs itself. `args` excludes the command name.
pub trait Command {
    fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
    History(HistoryCommand),
}

impl Command for CommandType {
    fn execute(&self, state: &mut ShellState, args: &[String]) -> Result<(), CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(state, args),
            CommandType::Exit(cmd) => cmd.execute(state, args),
            CommandType::History(cmd) => cmd.execute(state, args),
        }
    }
}

/// Registry of builtin commands, keyed by name.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("history", CommandType::History(HistoryCommand::new()));
        Self { commands }
    }

    /// Runs `argv` if its first token names a builtin.
    ///
    /// Returns `None` when it does not, leaving `argv` for the caller.
    pub fn dispatch(
        &self,
        state: &mut ShellState,
        argv: &[String],
    ) -> Option<Result<(), CommandError>> {
        let (name, args) = argv.split_first()?;
        let cmd = self.commands.get(name.as_str())?;
        Some(cmd.execute(state, args))
    }

    /// Reports whether `argv` was a builtin. Failures are printed, not
    /// returned; the command still counts as handled.
    pub fn do_builtin(&self, state: &mut ShellState, argv: &[String]) -> bool {
        match self.dispatch(state, argv) {
            Some(Ok(())) => true,
            Some(Err(e)) => {
                eprintln!("atrium: {}", e);
                true
            }
            None => false,
        }
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().copied()
    }
}

/// Handles `argv` with the standard builtin set. See [`CommandExecutor::do_builtin`].
pub fn do_builtin(state: &mut ShellState, argv: &[String]) -> bool {
    CommandExecutor::new().do_builtin(state, argv)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::ShellConfig;
    use std::env;
    use std::fs::File;
    use std::os::unix::io::AsRawFd;
    use std::sync::{Mutex, MutexGuard, OnceLock};

    /// Serializes tests that change the process working directory.
    pub(crate) fn lock_current_dir() -> MutexGuard<'static, ()> {
        static MUTEX: OnceLock<Mutex<()>> = OnceLock::new();
        MUTEX
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn test_state() -> (ShellState, File) {
        let null = File::open("/dev/null").unwrap();
        let config = ShellConfig::from_env()
            .with_terminal(null.as_raw_fd())
            .with_prompt_var(None);
        (ShellState::init(config).unwrap(), null)
    }

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_builtin_command_detection() {
        let executor = CommandExecutor::new();

        assert!(executor.is_builtin("cd"));
        assert!(executor.is_builtin("exit"));
        assert!(executor.is_builtin("history"));
        assert!(!executor.is_builtin("ls"));
        assert!(!executor.is_builtin(""));
        assert_eq!(executor.names().collect::<Vec<_>>(), ["cd", "exit", "history"]);
    }

    #[test]
    fn test_not_a_builtin() {
        let (mut state, _null) = test_state();
        assert!(!do_builtin(&mut state, &argv(&["ls", "-l"])));
        assert!(CommandExecutor::new().dispatch(&mut state, &argv(&["ls"])).is_none());
    }

    #[test]
    fn test_empty_argv() {
        let (mut state, _null) = test_state();
        assert!(!do_builtin(&mut state, &[]));
    }

    #[test]
    fn test_builtin_name_must_be_first() {
        let (mut state, _null) = test_state();
        assert!(!do_builtin(&mut state, &argv(&["echo", "cd"])));
    }

    #[test]
    fn test_history_is_handled() {
        let (mut state, _null) = test_state();
        state.history_mut().add("ls");
        assert!(do_builtin(&mut state, &argv(&["history"])));
    }

    #[test]
    fn test_cd_dispatch() {
        let _lock = lock_current_dir();
        let (mut state, _null) = test_state();
        let before = env::current_dir().unwrap();

        let result = CommandExecutor::new()
            .dispatch(&mut state, &argv(&["cd", "/"]))
            .unwrap();
        assert!(result.is_ok());
        assert_eq!(env::current_dir().unwrap(), PathBuf::from("/"));

        // A failed cd is still handled.
        assert!(do_builtin(&mut state, &argv(&["cd", "/path/that/does/not/exist"])));
        assert_eq!(env::current_dir().unwrap(), PathBuf::from("/"));

        env::set_current_dir(before).unwrap();
    }

    #[test]
    fn test_command_error_display() {
        let errors = vec![
            CommandError::HomeDirNotFound,
            CommandError::ChangeDir {
                path: PathBuf::from("/missing"),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            },
            CommandError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "io error",
            )),
        ];

        for error in errors {
            assert!(!error.to_string().is_empty());
        }
    }
}
