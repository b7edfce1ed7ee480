use super::{Command, CommandError};
use crate::core::ShellState;
use crate::input::History;
use std::io::{self, Write};

#[derive(Clone, Default)]
pub struct HistoryCommand;

impl HistoryCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for HistoryCommand {
    fn execute(&self, state: &mut ShellState, _args: &[String]) -> Result<(), CommandError> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        write_history(state.history(), &mut out)?;
        out.flush()?;
        Ok(())
    }
}

/// Writes `"<n>: <line>"` for every entry, oldest first.
pub fn write_history(history: &History, out: &mut impl Write) -> io::Result<()> {
    if history.is_empty() {
        return writeln!(out, "No history available");
    }

    for (index, line) in history.numbered() {
        writeln!(out, "{}: {}", index, line)?;
    }
    Ok(())
}
