// SunOS platform adapter
// Working directory via `pwdx <pid>`, environment via `pargs -e <pid>`

use async_trait::async_trait;
use tracing::debug;

use ogg_probe_core::domain::{PlatformKind, ProcessHandle};
use ogg_probe_core::port::{AdapterError, EntrySeparator, PlatformAdapter, RawEnvironment};

use crate::tools::{parse_pid_path_output, run_tool, IntrospectionTools};

pub struct SunOsAdapter {
    tools: IntrospectionTools,
}

impl SunOsAdapter {
    pub fn new(tools: IntrospectionTools) -> Self {
        Self { tools }
    }
}

/// `KEY=value` lines from `pargs -e` output
///
/// pargs prints `envp[N]: KEY=value`; the `envp[N]: ` prefix is dropped and
/// every other line (the leading `<pid>: <command>` line) is ignored.
pub fn parse_pargs_env(output: &[u8]) -> Vec<u8> {
    let mut entries = Vec::with_capacity(output.len());
    for line in output.split(|b| *b == b'\n') {
        if !line.starts_with(b"envp[") {
            continue;
        }
        let Some(pos) = line.windows(2).position(|w| w == b"]:") else {
            continue;
        };
        let value = &line[pos + 2..];
        let value = value.strip_prefix(b" ").unwrap_or(value);
        entries.extend_from_slice(value);
        entries.push(b'\n');
    }
    entries
}

#[async_trait]
impl PlatformAdapter for SunOsAdapter {
    fn platform(&self) -> PlatformKind {
        PlatformKind::SunOs
    }

    async fn introspect(&self, process: &ProcessHandle) -> Result<RawEnvironment, AdapterError> {
        let pid = process.pid;
        let pid_arg = pid.to_string();

        let pargs_output = run_tool(&self.tools.pargs, &["-e", pid_arg.as_str()], pid).await?;
        let entries = parse_pargs_env(&pargs_output);

        let wd_output = run_tool(&self.tools.pwdx, &[pid_arg.as_str()], pid).await?;
        let working_dir = parse_pid_path_output(&wd_output).unwrap_or_default();

        debug!(pid = %pid, working_dir = %working_dir, "Read SunOS process environment");

        Ok(RawEnvironment::new(entries, EntrySeparator::Newline, working_dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARGS: &[u8] = b"2817:\t./mgr PARAMFILE /export/ogg/dirprm/mgr.prm REPORTFILE /export/ogg/dirrpt/MGR.rpt
envp[0]: HOME=/export/home/oracle
envp[1]: LD_LIBRARY_PATH=/u01/app/oracle/product/19/lib:/usr/lib
envp[2]: ORACLE_HOME=/u01/app/oracle/product/19
envp[3]: PS1=[\\u@\\h]$ 
envp[10]: OGG_VAR_HOME=/export/ogg/var
";

    #[test]
    fn test_parse_pargs_env() {
        let entries = parse_pargs_env(PARGS);
        let text = String::from_utf8(entries).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "HOME=/export/home/oracle");
        assert_eq!(lines[2], "ORACLE_HOME=/u01/app/oracle/product/19");
        assert_eq!(lines[3], "PS1=[\\u@\\h]$ ");
        assert_eq!(lines[4], "OGG_VAR_HOME=/export/ogg/var");
    }

    #[test]
    fn test_parse_pargs_env_skips_command_line() {
        let entries = parse_pargs_env(b"2817:\t./mgr PARAMFILE FOO=bar\n");
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported() {
        let tools = IntrospectionTools {
            pargs: "/nonexistent/pargs".into(),
            ..IntrospectionTools::default()
        };
        let adapter = SunOsAdapter::new(tools);
        let me = ProcessHandle::new(std::process::id(), "me", "test");

        let err = adapter.introspect(&me).await.unwrap_err();

        assert!(matches!(err, AdapterError::ToolFailed { .. }));
    }

    #[cfg(unix)]
    mod with_fake_tools {
        use super::*;
        use crate::adapters::fake_tool;
        use ogg_probe_core::application::Reconstructor;
        use ogg_probe_core::domain::{EnvValue, Pid};
        use std::path::Path;

        const PARGS_LIVE: &str = r#"printf '%s:\t./mgr PARAMFILE /export/ogg/dirprm/mgr.prm\n' "$2"
echo "envp[0]: HOME=/export/home/oracle"
echo "envp[1]: LD_LIBRARY_PATH=/u01/app/oracle/product/19/lib:/usr/lib"
echo "envp[2]: ORACLE_HOME=/u01/app/oracle/product/19"
echo "envp[3]: OGG_VAR_HOME=/export/ogg/var""#;
        const PWDX_LIVE: &str = r#"echo "$1: /export/ogg""#;
        const FAILING: &str = "echo 'cannot examine' >&2; exit 1";
        const EXITED_PID: Pid = 9_999_999;

        fn adapter(dir: &Path, pargs_body: &str, pwdx_body: &str) -> SunOsAdapter {
            SunOsAdapter::new(IntrospectionTools {
                pargs: fake_tool(dir, "pargs", pargs_body),
                pwdx: fake_tool(dir, "pwdx", pwdx_body),
                ..IntrospectionTools::default()
            })
        }

        fn handle(pid: Pid) -> ProcessHandle {
            ProcessHandle::new(pid, "oracle", "./mgr PARAMFILE /export/ogg/dirprm/mgr.prm")
        }

        #[tokio::test]
        async fn test_introspect_live_process() {
            let dir = tempfile::tempdir().unwrap();
            let adapter = adapter(dir.path(), PARGS_LIVE, PWDX_LIVE);

            let raw = adapter.introspect(&handle(std::process::id())).await.unwrap();

            assert_eq!(raw.separator, EntrySeparator::Newline);
            assert_eq!(raw.working_dir, "/export/ogg");

            let d = Reconstructor::new(PlatformKind::SunOs).reconstruct(&raw);
            assert_eq!(d.installation_home, EnvValue::Resolved("/export/ogg".to_string()));
            assert_eq!(d.library_path.var, "LD_LIBRARY_PATH");
            assert_eq!(
                d.library_path.value,
                EnvValue::Resolved("/u01/app/oracle/product/19/lib:/usr/lib".to_string())
            );
            assert_eq!(d.var_home, EnvValue::Resolved("/export/ogg/var".to_string()));
            assert!(d.unresolved_fields().is_empty());
        }

        #[tokio::test]
        async fn test_failing_pargs_for_exited_pid_is_vanished() {
            let dir = tempfile::tempdir().unwrap();
            let adapter = adapter(dir.path(), FAILING, PWDX_LIVE);

            let err = adapter.introspect(&handle(EXITED_PID)).await.unwrap_err();

            assert!(matches!(err, AdapterError::ProcessVanished(EXITED_PID)));
        }

        #[tokio::test]
        async fn test_failing_pwdx_for_exited_pid_is_vanished() {
            let dir = tempfile::tempdir().unwrap();
            let adapter = adapter(dir.path(), PARGS_LIVE, FAILING);

            let err = adapter.introspect(&handle(EXITED_PID)).await.unwrap_err();

            assert!(matches!(err, AdapterError::ProcessVanished(EXITED_PID)));
        }

        #[tokio::test]
        async fn test_failing_pwdx_for_live_pid_is_tool_failure() {
            let dir = tempfile::tempdir().unwrap();
            let adapter = adapter(dir.path(), PARGS_LIVE, FAILING);

            let err = adapter.introspect(&handle(std::process::id())).await.unwrap_err();

            assert!(matches!(err, AdapterError::ToolFailed { ref tool, .. } if tool.ends_with("pwdx")));
        }
    }
}
