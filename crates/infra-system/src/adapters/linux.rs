// Linux platform adapter
// Environment from /proc/<pid>/environ (NUL separated), working directory from /proc/<pid>/cwd

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;

use ogg_probe_core::domain::{Pid, PlatformKind, ProcessHandle};
use ogg_probe_core::port::{AdapterError, EntrySeparator, PlatformAdapter, RawEnvironment};

/// ESRCH, returned by procfs reads racing a process exit
const ESRCH: i32 = 3;

pub struct LinuxAdapter {
    procfs_root: PathBuf,
}

impl LinuxAdapter {
    pub fn new(procfs_root: impl Into<PathBuf>) -> Self {
        Self {
            procfs_root: procfs_root.into(),
        }
    }

    fn map_io(&self, err: std::io::Error, pid: Pid, file: &str) -> AdapterError {
        if err.kind() == ErrorKind::NotFound || err.raw_os_error() == Some(ESRCH) {
            return AdapterError::ProcessVanished(pid);
        }
        AdapterError::Io(format!(
            "{}: {}",
            self.procfs_root.join(pid.to_string()).join(file).display(),
            err
        ))
    }
}

#[async_trait]
impl PlatformAdapter for LinuxAdapter {
    fn platform(&self) -> PlatformKind {
        PlatformKind::Linux
    }

    async fn introspect(&self, process: &ProcessHandle) -> Result<RawEnvironment, AdapterError> {
        let pid = process.pid;
        let proc_dir = self.procfs_root.join(pid.to_string());

        let environ = tokio::fs::read(proc_dir.join("environ"))
            .await
            .map_err(|e| self.map_io(e, pid, "environ"))?;
        let cwd = tokio::fs::read_link(proc_dir.join("cwd"))
            .await
            .map_err(|e| self.map_io(e, pid, "cwd"))?;

        debug!(pid = %pid, environ_bytes = %environ.len(), cwd = %cwd.display(), "Read procfs environment");

        Ok(RawEnvironment::new(
            environ,
            EntrySeparator::Nul,
            cwd.to_string_lossy().into_owned(),
        ))
    }
}
