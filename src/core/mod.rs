pub mod commands;
mod state;
pub mod terminal;

pub use commands::{change_dir, do_builtin, CommandError, CommandExecutor};
pub use state::{JobControl, ShellState};
