use std::os::unix::process::CommandExt;
use std::process::{Command, ExitStatus, Stdio};

use log::{debug, warn};

use super::{signal, ProcessError};
use crate::core::{terminal, ShellState};
use crate::flags::Flags;
use crate::input::ParsedCommand;

/// Runs external programs in the foreground.
#[derive(Clone, Default)]
pub struct ProcessExecutor {
    quiet_mode: bool,
}

impl ProcessExecutor {
    pub fn new(flags: &Flags) -> Self {
        ProcessExecutor {
            quiet_mode: flags.is_set("quiet"),
        }
    }

    /// Spawns `cmd` and waits for it.
    ///
    /// In an interactive shell the child gets its own process group, default
    /// job-control signal dispositions and the terminal; the shell takes the
    /// terminal back and re-applies its saved modes once the child is gone.
    pub fn run_foreground(
        &self,
        state: &ShellState,
        cmd: &ParsedCommand,
    ) -> Result<ExitStatus, ProcessError> {
        let mut command = Command::new(cmd.program());
        command
            .args(cmd.iter().skip(1))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        if state.is_interactive() {
            command.process_group(0);
            // SAFETY: only async-signal-safe calls run between fork and exec.
            unsafe {
                command.pre_exec(signal::restore_default_signals);
            }
        }

        let mut child = command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ProcessError::CommandNotFound(cmd.program().to_string())
            } else {
                ProcessError::Io(e)
            }
        })?;
        let pid = child.id() as libc::pid_t;
        debug!("spawned {} as pid {}", cmd.program(), pid);

        if state.is_interactive() {
            if let Err(e) = terminal::set_foreground_group(state.terminal(), pid) {
                warn!("Failed to give the terminal to {}: {}", pid, e);
            }
        }

        let status = child.wait();

        if let Some(job) = state.job_control() {
            terminal::set_foreground_group(state.terminal(), job.process_group)
                .map_err(ProcessError::Terminal)?;
            if let Err(e) = terminal::set_modes(state.terminal(), &job.saved_modes) {
                warn!("Failed to restore terminal settings: {}", e);
            }
        }

        let status = status?;
        if !status.success() && !self.quiet_mode {
            println!("Process exited with status: {}", status);
        }
        Ok(status)
    }
}
