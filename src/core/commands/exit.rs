use super::{Command, CommandError};
use crate::core::ShellState;

#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    /// Tears the shell down and ends the process with status 0.
    fn execute(&self, state: &mut ShellState, _args: &[String]) -> Result<(), CommandError> {
        state.destroy();
        std::process::exit(libc::EXIT_SUCCESS);
    }
}
