//! Thin wrappers over the libc terminal and process-group calls.
//!
//! Every fallible call returns `io::Result` carrying `errno`.

use std::fmt;
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::io::RawFd;

use libc::pid_t;

/// Saved line-discipline settings of a terminal.
#[derive(Clone, Copy)]
pub struct TerminalModes(libc::termios);

#[cfg(test)]
impl TerminalModes {
    pub(crate) fn zeroed() -> Self {
        // SAFETY: termios is plain integers and arrays; all-zero is valid.
        TerminalModes(unsafe { std::mem::zeroed() })
    }
}

impl fmt::Debug for TerminalModes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminalModes").finish_non_exhaustive()
    }
}

fn check(ret: libc::c_int) -> io::Result<()> {
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

pub fn is_terminal(fd: RawFd) -> bool {
    // SAFETY: isatty accepts any descriptor and reports invalid ones as 0.
    unsafe { libc::isatty(fd) == 1 }
}

pub fn current_pid() -> pid_t {
    // SAFETY: getpid cannot fail.
    unsafe { libc::getpid() }
}

pub fn current_process_group() -> pid_t {
    // SAFETY: getpgrp cannot fail.
    unsafe { libc::getpgrp() }
}

pub fn foreground_group(fd: RawFd) -> io::Result<pid_t> {
    // SAFETY: tcgetpgrp only reads kernel state for `fd`.
    let pgid = unsafe { libc::tcgetpgrp(fd) };
    if pgid < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(pgid)
}

pub fn set_process_group(pid: pid_t, pgid: pid_t) -> io::Result<()> {
    // SAFETY: setpgid has no memory-safety preconditions.
    check(unsafe { libc::setpgid(pid, pgid) })
}

pub fn set_foreground_group(fd: RawFd, pgid: pid_t) -> io::Result<()> {
    // SAFETY: tcsetpgrp has no memory-safety preconditions.
    check(unsafe { libc::tcsetpgrp(fd, pgid) })
}

pub fn get_modes(fd: RawFd) -> io::Result<TerminalModes> {
    let mut modes = MaybeUninit::<libc::termios>::uninit();
    // SAFETY: tcgetattr fully initializes `modes` when it returns 0.
    check(unsafe { libc::tcgetattr(fd, modes.as_mut_ptr()) })?;
    Ok(TerminalModes(unsafe { modes.assume_init() }))
}

/// Applies `modes` once pending output has drained.
pub fn set_modes(fd: RawFd, modes: &TerminalModes) -> io::Result<()> {
    // SAFETY: `modes.0` is a valid termios captured by `get_modes`.
    check(unsafe { libc::tcsetattr(fd, libc::TCSADRAIN, &modes.0) })
}

/// Blocks until this process's group owns the terminal.
///
/// While in the background the whole group is sent `SIGTTIN`, which stops it
/// until a parent job-control shell brings it to the foreground.
pub fn wait_for_foreground(fd: RawFd) -> io::Result<pid_t> {
    loop {
        let pgid = current_process_group();
        if foreground_group(fd)? == pgid {
            return Ok(pgid);
        }
        // SAFETY: signalling our own process group.
        check(unsafe { libc::kill(-pgid, libc::SIGTTIN) })?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::unix::io::AsRawFd;

    #[test]
    fn test_regular_file_is_not_a_terminal() {
        let file = tempfile::tempfile().unwrap();
        assert!(!is_terminal(file.as_raw_fd()));
    }

    #[test]
    fn test_invalid_descriptor() {
        assert!(!is_terminal(-1));
        assert!(get_modes(-1).is_err());
        assert!(foreground_group(-1).is_err());
    }

    #[test]
    fn test_modes_need_a_terminal() {
        let null = File::open("/dev/null").unwrap();
        let err = get_modes(null.as_raw_fd()).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOTTY));
    }

    #[test]
    fn test_set_modes_needs_a_terminal() {
        let null = File::open("/dev/null").unwrap();
        assert!(set_modes(null.as_raw_fd(), &TerminalModes::zeroed()).is_err());
    }

    #[test]
    fn test_pid_queries() {
        assert_eq!(current_pid() as u32, std::process::id());
        assert!(current_process_group() > 0);
    }
}
