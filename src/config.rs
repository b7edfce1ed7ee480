use std::os::unix::io::RawFd;

/// Environment variable consulted for the prompt.
pub const PROMPT_VAR: &str = "MY_PROMPT";

/// Used when `sysconf(_SC_ARG_MAX)` reports no limit or fails.
pub const FALLBACK_MAX_ARGS: usize = 4096;

pub const DEFAULT_HISTORY_SIZE: usize = 1000;

/// Startup settings for a [`ShellState`](crate::core::ShellState).
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub terminal: RawFd,
    pub prompt_var: Option<String>,
    pub max_args: usize,
    pub history_size: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self {
            terminal: libc::STDIN_FILENO,
            prompt_var: Some(PROMPT_VAR.to_string()),
            max_args: max_args_from_sysconf(),
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }

    pub fn with_terminal(mut self, fd: RawFd) -> Self {
        self.terminal = fd;
        self
    }

    pub fn with_prompt_var(mut self, name: Option<&str>) -> Self {
        self.prompt_var = name.map(str::to_string);
        self
    }

    pub fn with_max_args(mut self, max_args: usize) -> Self {
        self.max_args = max_args;
        self
    }

    pub fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }
}

fn max_args_from_sysconf() -> usize {
    // SAFETY: sysconf has no preconditions.
    let limit = unsafe { libc::sysconf(libc::_SC_ARG_MAX) };
    match usize::try_from(limit) {
        Ok(n) if n > 0 => n,
        _ => FALLBACK_MAX_ARGS,
    }
}
