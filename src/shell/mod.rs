use log::debug;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

mod executor;

use crate::{
    config::ShellConfig,
    core::{CommandExecutor, ShellState},
    error::ShellError,
    flags::Flags,
    highlight::DiagnosticStyle,
    process::ProcessExecutor,
};

use executor::CommandHandler;

/// The interactive read-eval-print loop around a [`ShellState`].
pub struct Shell {
    pub(crate) editor: DefaultEditor,
    pub(crate) state: ShellState,
    pub(crate) builtins: CommandExecutor,
    pub(crate) processes: ProcessExecutor,
    pub(crate) style: DiagnosticStyle,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        Self::with_config(flags, ShellConfig::from_env())
    }

    pub fn with_config(flags: Flags, config: ShellConfig) -> Result<Self, ShellError> {
        // Claim the terminal before the line editor starts touching it.
        let state = ShellState::init(config)?;
        let editor = DefaultEditor::new()?;

        Ok(Shell {
            editor,
            state,
            builtins: CommandExecutor::new(),
            processes: ProcessExecutor::new(&flags),
            style: DiagnosticStyle::new(),
            flags,
        })
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    /// Reads and runs lines until end of input, then tears the state down.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let result = self.run_loop();
        self.state.destroy();
        result
    }

    fn run_loop(&mut self) -> Result<(), ShellError> {
        loop {
            let prompt = format!("{} ", self.state.prompt());
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if let Err(e) = self.execute_line(line) {
                        self.report(&e);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    if !self.flags.is_set("quiet") {
                        println!("{}", self.style.hint("CTRL-C"));
                    }
                }
                Err(ReadlineError::Eof) => {
                    debug!("end of input");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub(crate) fn report(&self, err: &dyn std::fmt::Display) {
        if !self.flags.is_set("quiet") {
            eprintln!("{}", self.style.error(&format!("atrium: {}", err)));
        }
    }
}
