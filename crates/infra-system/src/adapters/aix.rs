// AIX platform adapter
// Working directory via `procwdx <pid>`, environment via `ps eww <pid>` split on whitespace.
// Values containing spaces are cut at the first blank; `ps eww` gives no way to recover them.

use async_trait::async_trait;
use tracing::debug;

use ogg_probe_core::domain::{Pid, PlatformKind, ProcessHandle};
use ogg_probe_core::port::{AdapterError, EntrySeparator, PlatformAdapter, RawEnvironment};

use crate::tools::{is_alive, parse_pid_path_output, run_tool, IntrospectionTools};

pub struct AixAdapter {
    tools: IntrospectionTools,
}

impl AixAdapter {
    pub fn new(tools: IntrospectionTools) -> Self {
        Self { tools }
    }
}

/// The line of `ps eww` output describing `pid`, header skipped
pub fn select_ps_line(output: &[u8], pid: Pid) -> Option<&[u8]> {
    let pid = pid.to_string();
    output.split(|b| *b == b'\n').find(|line| {
        line.split(|b| b.is_ascii_whitespace())
            .find(|t| !t.is_empty())
            .is_some_and(|first| first == pid.as_bytes())
    })
}

#[async_trait]
impl PlatformAdapter for AixAdapter {
    fn platform(&self) -> PlatformKind {
        PlatformKind::Aix
    }

    async fn introspect(&self, process: &ProcessHandle) -> Result<RawEnvironment, AdapterError> {
        let pid = process.pid;
        let pid_arg = pid.to_string();

        let ps_output = run_tool(&self.tools.ps, &["eww", pid_arg.as_str()], pid).await?;
        let Some(line) = select_ps_line(&ps_output, pid) else {
            // ps printed only its header
            return Err(if is_alive(pid) {
                AdapterError::ToolFailed {
                    tool: self.tools.ps.display().to_string(),
                    pid,
                    message: "no process line in output".to_string(),
                }
            } else {
                AdapterError::ProcessVanished(pid)
            });
        };
        let entries = line.to_vec();

        let wd_output = run_tool(&self.tools.procwdx, &[pid_arg.as_str()], pid).await?;
        let working_dir = parse_pid_path_output(&wd_output).unwrap_or_default();

        debug!(pid = %pid, working_dir = %working_dir, "Read AIX process environment");

        Ok(RawEnvironment::new(
            entries,
            EntrySeparator::Whitespace,
            working_dir,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PS_EWW: &[u8] = b"      PID    TTY STAT  TIME COMMAND
  7340184      - A     3:12 ./mgr PARAMFILE /u01/ogg/dirprm/mgr.prm REPORTFILE /u01/ogg/dirrpt/MGR.rpt PROCESSID MGR _=/u01/ogg/ggsci LANG=C LIBPATH=/u01/app/oracle/product/19/lib ORACLE_HOME=/u01/app/oracle/product/19
";

    #[test]
    fn test_select_ps_line() {
        let line = select_ps_line(PS_EWW, 7340184).unwrap();
        let text = String::from_utf8_lossy(line);
        assert!(text.contains("LIBPATH=/u01/app/oracle/product/19/lib"));
        assert!(!text.contains("COMMAND"));
    }

    #[test]
    fn test_select_ps_line_header_only() {
        let header = b"      PID    TTY STAT  TIME COMMAND\n";
        assert!(select_ps_line(header, 7340184).is_none());
    }

    #[test]
    fn test_select_ps_line_pid_prefix_is_not_enough() {
        assert!(select_ps_line(PS_EWW, 734).is_none());
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported() {
        let tools = IntrospectionTools {
            ps: "/nonexistent/ps".into(),
            ..IntrospectionTools::default()
        };
        let adapter = AixAdapter::new(tools);
        let me = ProcessHandle::new(std::process::id(), "me", "test");

        let err = adapter.introspect(&me).await.unwrap_err();

        assert!(matches!(err, AdapterError::ToolFailed { .. }));
    }

    #[cfg(unix)]
    mod with_fake_tools {
        use super::*;
        use crate::adapters::fake_tool;
        use ogg_probe_core::application::Reconstructor;
        use ogg_probe_core::domain::EnvValue;
        use std::path::Path;

        const PS_LIVE: &str = r#"echo "      PID    TTY STAT  TIME COMMAND"
echo "  $2      - A     3:12 ./mgr PARAMFILE /u01/ogg/dirprm/mgr.prm LIBPATH=/u01/app/oracle/product/19/lib ORACLE_HOME=/u01/app/oracle/product/19""#;
        const PS_HEADER_ONLY: &str = r#"echo "      PID    TTY STAT  TIME COMMAND""#;
        const EXITED_PID: Pid = 9_999_999;

        fn adapter(dir: &Path, ps_body: &str) -> AixAdapter {
            AixAdapter::new(IntrospectionTools {
                ps: fake_tool(dir, "ps", ps_body),
                procwdx: fake_tool(dir, "procwdx", r#"echo "$1: /u01/ogg""#),
                ..IntrospectionTools::default()
            })
        }

        fn handle(pid: Pid) -> ProcessHandle {
            ProcessHandle::new(pid, "oracle", "./mgr PARAMFILE /u01/ogg/dirprm/mgr.prm")
        }

        #[tokio::test]
        async fn test_introspect_live_process() {
            let dir = tempfile::tempdir().unwrap();
            let adapter = adapter(dir.path(), PS_LIVE);

            let raw = adapter.introspect(&handle(std::process::id())).await.unwrap();

            assert_eq!(raw.separator, EntrySeparator::Whitespace);
            assert_eq!(raw.working_dir, "/u01/ogg");

            let d = Reconstructor::new(PlatformKind::Aix).reconstruct(&raw);
            assert_eq!(d.installation_home, EnvValue::Resolved("/u01/ogg".to_string()));
            assert_eq!(d.library_path.var, "LIBPATH");
            assert_eq!(
                d.library_path.value,
                EnvValue::Resolved("/u01/app/oracle/product/19/lib".to_string())
            );
            assert_eq!(
                d.product_home,
                EnvValue::Resolved("/u01/app/oracle/product/19".to_string())
            );
            assert_eq!(d.var_home, EnvValue::Unresolved);
        }

        #[tokio::test]
        async fn test_header_only_for_exited_pid_is_vanished() {
            let dir = tempfile::tempdir().unwrap();
            let adapter = adapter(dir.path(), PS_HEADER_ONLY);

            let err = adapter.introspect(&handle(EXITED_PID)).await.unwrap_err();

            assert!(matches!(err, AdapterError::ProcessVanished(EXITED_PID)));
        }

        #[tokio::test]
        async fn test_header_only_for_live_pid_is_tool_failure() {
            let dir = tempfile::tempdir().unwrap();
            let adapter = adapter(dir.path(), PS_HEADER_ONLY);

            let err = adapter.introspect(&handle(std::process::id())).await.unwrap_err();

            assert!(matches!(err, AdapterError::ToolFailed { .. }));
        }

        #[tokio::test]
        async fn test_failing_ps_for_exited_pid_is_vanished() {
            let dir = tempfile::tempdir().unwrap();
            let adapter = adapter(dir.path(), "echo 'ps: no such process' >&2; exit 1");

            let err = adapter.introspect(&handle(EXITED_PID)).await.unwrap_err();

            assert!(matches!(err, AdapterError::ProcessVanished(EXITED_PID)));
        }
    }
}
