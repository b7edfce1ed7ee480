use super::{Command, CommandError};
use crate::core::ShellState;
use std::env;
use std::ffi::{CStr, OsStr};
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::ptr;

const PW_BUF_FALLBACK: usize = 1024;
const PW_BUF_MAX: usize = 1 << 20;

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    fn change_to(&self, path: Option<&str>) -> Result<(), CommandError> {
        let target = match path {
            Some(path) => PathBuf::from(path),
            None => user_home_dir()?,
        };

        env::set_current_dir(&target).map_err(|source| CommandError::ChangeDir {
            path: target,
            source,
        })
    }
}

impl Command for CdCommand {
    fn execute(&self, _state: &mut ShellState, args: &[String]) -> Result<(), CommandError> {
        self.change_to(args.first().map(String::as_str))
    }
}

/// Changes directory to `argv[1]`, or to the user's home directory when
/// there is no such argument. On failure the working directory is unchanged.
pub fn change_dir(argv: &[String]) -> Result<(), CommandError> {
    CdCommand::new().change_to(argv.get(1).map(String::as_str))
}

/// Looks up the home directory of the effective user in the user database.
pub fn user_home_dir() -> Result<PathBuf, CommandError> {
    // SAFETY: geteuid cannot fail.
    let uid = unsafe { libc::geteuid() };

    // SAFETY: sysconf has no preconditions.
    let mut buf_len = match unsafe { libc::sysconf(libc::_SC_GETPW_R_SIZE_MAX) } {
        n if n > 0 => n as usize,
        _ => PW_BUF_FALLBACK,
    };

    loop {
        let mut buf: Vec<libc::c_char> = vec![0; buf_len];
        let mut pwd = MaybeUninit::<libc::passwd>::uninit();
        let mut result: *mut libc::passwd = ptr::null_mut();

        // SAFETY: every pointer refers to live storage of the advertised size.
        let rc = unsafe {
            libc::getpwuid_r(uid, pwd.as_mut_ptr(), buf.as_mut_ptr(), buf_len, &mut result)
        };

        if rc == libc::ERANGE && buf_len < PW_BUF_MAX {
            buf_len *= 2;
            continue;
        }
        if rc != 0 || result.is_null() {
            return Err(CommandError::HomeDirNotFound);
        }

        // SAFETY: a non-null `result` means `pwd` was filled in, with its
        // strings stored in `buf`, which is still alive here.
        let pw_dir = unsafe { (*result).pw_dir };
        if pw_dir.is_null() {
            return Err(CommandError::HomeDirNotFound);
        }
        let dir = unsafe { CStr::from_ptr(pw_dir) };
        if dir.to_bytes().is_empty() {
            return Err(CommandError::HomeDirNotFound);
        }
        return Ok(Path::new(OsStr::from_bytes(dir.to_bytes())).to_path_buf());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::commands::tests::{lock_current_dir, test_state};
    use std::fs;

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cd_home() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();

        let result = change_dir(&argv(&["cd"]));
        match user_home_dir() {
            Ok(home) if home.is_dir() => {
                assert!(result.is_ok());
                let cwd = env::current_dir().unwrap();
                assert_eq!(cwd, fs::canonicalize(&home).unwrap());

                // $HOME can be overridden; compare only when it agrees with passwd.
                if let Some(env_home) = env::var_os("HOME").map(PathBuf::from) {
                    if env_home == home {
                        assert_eq!(cwd, fs::canonicalize(env_home).unwrap());
                    }
                }
            }
            _ => {
                assert!(result.is_err());
                assert_eq!(env::current_dir().unwrap(), before);
            }
        }

        env::set_current_dir(before).unwrap();
    }

    #[test]
    fn test_cd_root() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();

        assert!(change_dir(&argv(&["cd", "/"])).is_ok());
        assert_eq!(env::current_dir().unwrap(), PathBuf::from("/"));

        env::set_current_dir(before).unwrap();
    }

    #[test]
    fn test_cd_temp() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let (mut state, _null) = test_state();

        let cmd = CdCommand::new();
        assert!(cmd
            .execute(&mut state, &[dir.path().to_str().unwrap().to_string()])
            .is_ok());
        assert_eq!(
            env::current_dir().unwrap(),
            fs::canonicalize(dir.path()).unwrap()
        );

        env::set_current_dir(before).unwrap();
    }

    #[test]
    fn test_cd_non_existent() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();

        let result = change_dir(&argv(&["cd", "/thisdoesnotexist"]));
        let after = env::current_dir().unwrap();

        assert!(matches!(result, Err(CommandError::ChangeDir { .. })));
        assert_eq!(before, after);
    }

    #[test]
    fn test_cd_extra_arguments_ignored() {
        let _lock = lock_current_dir();
        let before = env::current_dir().unwrap();

        assert!(change_dir(&argv(&["cd", "/", "ignored"])).is_ok());
        assert_eq!(env::current_dir().unwrap(), PathBuf::from("/"));

        env::set_current_dir(before).unwrap();
    }

    #[test]
    fn test_home_lookup_is_absolute() {
        // Accounts without a passwd entry report an error instead.
        if let Ok(home) = user_home_dir() {
            assert!(home.is_absolute());
        }
    }
}
