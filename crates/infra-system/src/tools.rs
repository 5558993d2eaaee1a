// Native introspection tools
// Locations are configurable so packaged paths (e.g. /usr/bin/procwdx) can be pinned

use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use ogg_probe_core::domain::Pid;
use ogg_probe_core::port::AdapterError;

const DEFAULT_PROCFS_ROOT: &str = "/proc";

/// Where the per-platform tools and procfs live
#[derive(Debug, Clone)]
pub struct IntrospectionTools {
    /// `ps` (process listing, AIX environment dump)
    pub ps: PathBuf,
    /// AIX working directory query
    pub procwdx: PathBuf,
    /// SunOS environment dump
    pub pargs: PathBuf,
    /// SunOS working directory query
    pub pwdx: PathBuf,
    /// Linux procfs mount point
    pub procfs_root: PathBuf,
}

impl Default for IntrospectionTools {
    fn default() -> Self {
        Self {
            ps: PathBuf::from("ps"),
            procwdx: PathBuf::from("procwdx"),
            pargs: PathBuf::from("pargs"),
            pwdx: PathBuf::from("pwdx"),
            procfs_root: PathBuf::from(DEFAULT_PROCFS_ROOT),
        }
    }
}

/// Check if a process still exists (signal 0)
pub fn is_alive(pid: Pid) -> bool {
    #[cfg(unix)]
    {
        use nix::errno::Errno;
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid as NixPid;

        let Ok(raw) = i32::try_from(pid) else {
            return false;
        };
        // EPERM: exists but owned by someone else
        matches!(kill(NixPid::from_raw(raw), None::<Signal>), Ok(()) | Err(Errno::EPERM))
    }

    #[cfg(not(unix))]
    {
        let _ = pid;
        false
    }
}

/// Run an introspection tool against `pid` and return its stdout
///
/// A failing tool is reported as `ProcessVanished` when the pid is gone,
/// `ToolFailed` otherwise.
pub async fn run_tool(tool: &Path, args: &[&str], pid: Pid) -> Result<Vec<u8>, AdapterError> {
    debug!(tool = %tool.display(), args = ?args, pid = %pid, "Running introspection tool");

    let output = Command::new(tool)
        .args(args)
        .env("LC_ALL", "C")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| AdapterError::ToolFailed {
            tool: tool.display().to_string(),
            pid,
            message: e.to_string(),
        })?;

    if output.status.success() {
        return Ok(output.stdout);
    }

    if !is_alive(pid) {
        return Err(AdapterError::ProcessVanished(pid));
    }

    Err(AdapterError::ToolFailed {
        tool: tool.display().to_string(),
        pid,
        message: format!(
            "exit {}: {}",
            output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string()),
            String::from_utf8_lossy(&output.stderr).trim()
        ),
    })
}

/// Path from `pwdx` / `procwdx` output (`<pid>: <path>`)
pub fn parse_pid_path_output(output: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(output);
    let line = text.lines().find(|l| !l.trim().is_empty())?;
    let path = match line.split_once(':') {
        Some((_, rest)) => rest.trim(),
        None => line.trim(),
    };
    (!path.is_empty()).then(|| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pwdx_output() {
        assert_eq!(
            parse_pid_path_output(b"4321:\t/u01/app/ogg\n"),
            Some("/u01/app/ogg".to_string())
        );
        assert_eq!(
            parse_pid_path_output(b"4321: /opt/ogg 21c\n"),
            Some("/opt/ogg 21c".to_string())
        );
    }

    #[test]
    fn test_parse_pwdx_output_empty() {
        assert_eq!(parse_pid_path_output(b""), None);
        assert_eq!(parse_pid_path_output(b"4321:\n"), None);
    }

    #[test]
    fn test_is_alive_self() {
        assert!(is_alive(std::process::id()));
    }

    #[test]
    fn test_is_alive_out_of_range_pid() {
        assert!(!is_alive(u32::MAX));
    }

    #[tokio::test]
    async fn test_run_tool_missing_binary() {
        let result = run_tool(
            Path::new("/nonexistent/procwdx"),
            &["1"],
            std::process::id(),
        )
        .await;
        assert!(matches!(result, Err(AdapterError::ToolFailed { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_tool_failure_for_live_pid() {
        let result = run_tool(Path::new("false"), &[], std::process::id()).await;
        assert!(matches!(result, Err(AdapterError::ToolFailed { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_tool_captures_stdout() {
        let out = run_tool(Path::new("echo"), &["1234: /opt/ogg"], std::process::id())
            .await
            .unwrap();
        assert_eq!(parse_pid_path_output(&out), Some("/opt/ogg".to_string()));
    }
}
