use std::os::unix::io::RawFd;

use libc::pid_t;
use log::{debug, warn};

use super::terminal::{self, TerminalModes};
use crate::config::ShellConfig;
use crate::error::ShellError;
use crate::input::{get_prompt, History};
use crate::process::signal;

/// Terminal ownership held by an interactive shell.
#[derive(Debug, Clone, Copy)]
pub struct JobControl {
    pub process_group: pid_t,
    pub saved_modes: TerminalModes,
}

/// Process-wide shell state, created once at startup and torn down once.
#[derive(Debug)]
pub struct ShellState {
    terminal: RawFd,
    job_control: Option<JobControl>,
    prompt: String,
    history: History,
    config: ShellConfig,
    destroyed: bool,
}

impl ShellState {
    /// Sets up the shell session described by `config`.
    ///
    /// When the terminal is a tty this waits for foreground status, ignores the
    /// job-control signals, moves the shell into its own process group, takes
    /// the terminal and saves its modes. Any failure there is returned as
    /// [`ShellError::Terminal`] and the shell should not continue.
    pub fn init(config: ShellConfig) -> Result<Self, ShellError> {
        let terminal = config.terminal;
        let interactive = terminal::is_terminal(terminal);
        debug!("terminal fd {} interactive: {}", terminal, interactive);

        let job_control = if interactive {
            Some(Self::claim_terminal(terminal)?)
        } else {
            None
        };

        let history = History::new(config.history_size);
        let prompt = get_prompt(config.prompt_var.as_deref());

        Ok(ShellState {
            terminal,
            job_control,
            prompt,
            history,
            config,
            destroyed: false,
        })
    }

    fn claim_terminal(fd: RawFd) -> Result<JobControl, ShellError> {
        terminal::wait_for_foreground(fd).map_err(|source| ShellError::Terminal {
            op: "Failed to wait for terminal foreground",
            source,
        })?;

        signal::ignore_job_control_signals().map_err(|source| ShellError::Terminal {
            op: "Failed to ignore job control signals",
            source,
        })?;
        debug!("ignoring job control signals");

        let pgid = terminal::current_pid();
        if needs_own_group(pgid, terminal::current_process_group()) {
            terminal::set_process_group(pgid, pgid).map_err(|source| ShellError::Terminal {
                op: "Couldn't put the shell in its own process group",
                source,
            })?;
        } else {
            debug!("shell already leads process group {}", pgid);
        }

        terminal::set_foreground_group(fd, pgid).map_err(|source| ShellError::Terminal {
            op: "Failed to take control of the terminal",
            source,
        })?;

        let saved_modes = terminal::get_modes(fd).map_err(|source| ShellError::Terminal {
            op: "Failed to get terminal attributes",
            source,
        })?;
        debug!("shell owns the terminal as process group {}", pgid);

        Ok(JobControl {
            process_group: pgid,
            saved_modes,
        })
    }

    /// Releases the prompt, restores the terminal modes and clears history.
    ///
    /// Restoration is best effort. Calling this again is a no-op.
    pub fn destroy(&mut self) {
        if self.destroyed {
            debug!("shell state already destroyed");
            return;
        }
        self.destroyed = true;

        self.prompt = String::new();

        if let Some(job) = &self.job_control {
            if let Err(e) = terminal::set_modes(self.terminal, &job.saved_modes) {
                warn!("Failed to restore terminal settings: {}", e);
            }
        }

        self.history.clear();
        debug!("shell state destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_interactive(&self) -> bool {
        self.job_control.is_some()
    }

    pub fn terminal(&self) -> RawFd {
        self.terminal
    }

    pub fn job_control(&self) -> Option<&JobControl> {
        self.job_control.as_ref()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    pub fn max_args(&self) -> usize {
        self.config.max_args
    }
}

/// A session leader cannot call `setpgid` on itself, and any shell that
/// already leads its group has nothing to change.
fn needs_own_group(pid: pid_t, current_group: pid_t) -> bool {
    pid != current_group
}

impl Drop for ShellState {
    fn drop(&mut self) {
        self.destroy();
    }
}
