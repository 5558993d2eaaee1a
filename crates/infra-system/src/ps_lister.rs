// Process listing via POSIX `ps`
// `ps -u <uid> -o pid= -o args=` is understood by AIX, Solaris and procps alike

use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use ogg_probe_core::domain::{Pid, ProcessHandle};
use ogg_probe_core::port::{ListError, ProcessLister};

/// Lists the invoking user's processes with full command lines
pub struct PsProcessLister {
    ps: PathBuf,
    uid: u32,
    user: String,
}

impl PsProcessLister {
    /// Lister for the real user running the probe
    ///
    /// # Errors
    /// - ListError::UnknownUser on platforms without a uid
    pub fn new(ps: impl Into<PathBuf>) -> Result<Self, ListError> {
        let (uid, user) = current_user()?;
        Ok(Self::for_user(ps, uid, user))
    }

    pub fn for_user(ps: impl Into<PathBuf>, uid: u32, user: impl Into<String>) -> Self {
        Self {
            ps: ps.into(),
            uid,
            user: user.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

#[cfg(unix)]
fn current_user() -> Result<(u32, String), ListError> {
    use nix::unistd::{getuid, User};

    let uid = getuid();
    let name = match User::from_uid(uid) {
        Ok(Some(user)) => user.name,
        // no passwd entry; the numeric uid still works with `ps -u`
        Ok(None) => uid.to_string(),
        Err(e) => return Err(ListError::UnknownUser(e.to_string())),
    };
    Ok((uid.as_raw(), name))
}

#[cfg(not(unix))]
fn current_user() -> Result<(u32, String), ListError> {
    Err(ListError::UnknownUser(
        "process listing requires a unix platform".to_string(),
    ))
}

/// Parse `pid args` lines; lines without a numeric pid are skipped
pub fn parse_ps_listing(output: &str, user: &str) -> Vec<ProcessHandle> {
    output
        .lines()
        .filter_map(|line| {
            let line = line.trim_start();
            let (pid, args) = line
                .split_once(char::is_whitespace)
                .unwrap_or((line, ""));
            let pid: Pid = pid.parse().ok()?;
            Some(ProcessHandle::new(pid, user, args.trim()))
        })
        .collect()
}

#[async_trait]
impl ProcessLister for PsProcessLister {
    async fn list_processes(&self) -> Result<Vec<ProcessHandle>, ListError> {
        let uid = self.uid.to_string();
        let output = Command::new(&self.ps)
            .args(["-u", uid.as_str(), "-o", "pid=", "-o", "args="])
            .env("LC_ALL", "C")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| ListError::Io(format!("{}: {}", self.ps.display(), e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            // procps exits 1 with no output when nothing matched
            if stdout.trim().is_empty() && stderr.trim().is_empty() {
                return Ok(Vec::new());
            }
            return Err(ListError::CommandFailed(stderr.trim().to_string()));
        }

        let processes = parse_ps_listing(&stdout, &self.user);
        debug!(user = %self.user, count = %processes.len(), "Listed user processes");
        Ok(processes)
    }
}
