use std::io;

use libc::{sighandler_t, signal, SIG_DFL, SIG_ERR, SIG_IGN};
use signal_hook::consts::signal::{SIGINT, SIGQUIT, SIGTSTP, SIGTTIN, SIGTTOU};

/// Signals an interactive shell must survive while children own the terminal.
pub const JOB_CONTROL_SIGNALS: [libc::c_int; 5] = [SIGINT, SIGQUIT, SIGTSTP, SIGTTIN, SIGTTOU];

fn set_disposition(handler: sighandler_t) -> io::Result<()> {
    for sig in JOB_CONTROL_SIGNALS {
        // SAFETY: SIG_IGN and SIG_DFL are not function pointers into our code.
        if unsafe { signal(sig, handler) } == SIG_ERR {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Ignores the job-control signals in the shell process. Never undone.
pub fn ignore_job_control_signals() -> io::Result<()> {
    set_disposition(SIG_IGN)
}

/// Puts the job-control signals back to their defaults.
///
/// Only calls `signal`, so it is safe to use between fork and exec.
pub fn restore_default_signals() -> io::Result<()> {
    set_disposition(SIG_DFL)
}
