use log::warn;

use crate::error::ShellError;
use crate::input::{cmd_parse, trim_white, ParseError};

pub(crate) trait CommandHandler {
    fn execute_line(&mut self, line: String) -> Result<(), ShellError>;
}

impl CommandHandler for super::Shell {
    fn execute_line(&mut self, mut line: String) -> Result<(), ShellError> {
        let line = trim_white(&mut line);
        if line.is_empty() {
            return Ok(());
        }

        if let Err(e) = self.editor.add_history_entry(line) {
            warn!("Couldn't add to line editor history: {}", e);
        }
        self.state.history_mut().add(line);

        let cmd = match cmd_parse(line, self.state.max_args()) {
            Ok(cmd) => cmd,
            Err(ParseError::Empty) => return Ok(()),
            Err(e) => return Err(e.into()),
        };

        match self.builtins.dispatch(&mut self.state, cmd.args()) {
            Some(result) => result?,
            None => {
                self.processes.run_foreground(&self.state, &cmd)?;
            }
        }
        Ok(())
    }
}
