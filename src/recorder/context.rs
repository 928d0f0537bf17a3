//! Read-only view of the invoking process.
//!
//! Everything the recorder knows about the process (arguments, environment,
//! host, user, clock) comes through [`ProcessContext`] so tests can pin it
//! down.

use chrono::NaiveDateTime;
use std::path::PathBuf;

/// Source of process facts recorded in `tinylogdir.yaml`.
pub trait ProcessContext {
    /// Program name followed by its arguments.
    fn args(&self) -> Vec<String>;

    /// Current working directory.
    fn cwd(&self) -> std::io::Result<PathBuf>;

    /// Name of this host.
    fn hostname(&self) -> String;

    /// Name of the invoking user.
    fn user(&self) -> String;

    /// Process id.
    fn pid(&self) -> u32;

    /// Value of an environment variable, if set.
    fn env_var(&self, key: &str) -> Option<String>;

    /// Current local wall-clock time.
    fn now(&self) -> NaiveDateTime;

    /// Directory containing the running program, where the repository
    /// search starts.
    fn program_dir(&self) -> Option<PathBuf>;
}

/// [`ProcessContext`] backed by the real process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemContext;

impl ProcessContext for SystemContext {
    fn args(&self) -> Vec<String> {
        std::env::args_os()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    fn cwd(&self) -> std::io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn hostname(&self) -> String {
        system_hostname()
            .or_else(|| non_empty_var("HOSTNAME"))
            .or_else(|| non_empty_var("COMPUTERNAME"))
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn user(&self) -> String {
        ["LOGNAME", "USER", "LNAME", "USERNAME"]
            .iter()
            .find_map(|key| non_empty_var(key))
            .or_else(passwd_user)
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn pid(&self) -> u32 {
        std::process::id()
    }

    fn env_var(&self, key: &str) -> Option<String> {
        std::env::var_os(key).map(|v| v.to_string_lossy().into_owned())
    }

    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }

    fn program_dir(&self) -> Option<PathBuf> {
        let exe = std::env::current_exe().ok()?;
        let exe = std::path::absolute(exe).ok()?;
        exe.parent().map(|p| p.to_path_buf())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(unix)]
fn system_hostname() -> Option<String> {
    let mut buf = [0u8; 256];
    // SAFETY: buf is valid for writes of buf.len() bytes
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return None;
    }
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let name = String::from_utf8_lossy(&buf[..end]).into_owned();
    (!name.is_empty()).then_some(name)
}

#[cfg(not(unix))]
fn system_hostname() -> Option<String> {
    None
}

#[cfg(unix)]
fn passwd_user() -> Option<String> {
    // SAFETY: getpwuid returns null or a pointer to static storage; the name
    // is copied out before any other passwd call can overwrite it
    unsafe {
        let pw = libc::getpwuid(libc::getuid());
        if pw.is_null() || (*pw).pw_name.is_null() {
            return None;
        }
        Some(
            std::ffi::CStr::from_ptr((*pw).pw_name)
                .to_string_lossy()
                .into_owned(),
        )
    }
}

#[cfg(not(unix))]
fn passwd_user() -> Option<String> {
    None
}
