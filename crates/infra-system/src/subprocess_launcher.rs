// Subprocess check launcher
// Fire-and-forget: the child is spawned and its handle dropped, nothing ever waits on it

use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::info;

use ogg_probe_core::domain::{EnvironmentDescriptor, ProcessHandle};
use ogg_probe_core::port::{CheckLauncher, LaunchError, LaunchHandle};

/// How to invoke the external monitoring check
#[derive(Debug, Clone)]
pub struct CheckCommand {
    pub program: PathBuf,
    /// Flag preceding the configuration file, `-c` by default
    pub config_flag: Option<String>,
    pub config_file: PathBuf,
    /// Appended after the configuration file
    pub extra_args: Vec<String>,
}

/// Subprocess launcher
///
/// Applies the descriptor on top of the probe's own environment. Unresolved
/// variables are removed from the child environment rather than set empty.
pub struct SubprocessLauncher {
    check: CheckCommand,
}

impl SubprocessLauncher {
    pub fn new(check: CheckCommand) -> Self {
        Self { check }
    }

    /// Build the check command for one descriptor
    pub fn build_command(&self, descriptor: &EnvironmentDescriptor) -> Command {
        let mut cmd = Command::new(&self.check.program);

        if let Some(flag) = &self.check.config_flag {
            cmd.arg(flag);
        }
        cmd.arg(&self.check.config_file).args(&self.check.extra_args);

        for (name, value) in descriptor.variables() {
            match value {
                Some(v) => cmd.env(name, v),
                None => cmd.env_remove(name),
            };
        }

        // check output joins our stderr; stdout belongs to the report
        cmd.stdin(Stdio::null())
            .stdout(std::io::stderr())
            .kill_on_drop(false);

        // own process group: a signal aimed at the probe does not reach the checks
        #[cfg(unix)]
        cmd.process_group(0);

        cmd
    }
}

impl CheckLauncher for SubprocessLauncher {
    fn launch(
        &self,
        process: &ProcessHandle,
        descriptor: EnvironmentDescriptor,
    ) -> Result<LaunchHandle, LaunchError> {
        let mut cmd = self.build_command(&descriptor);

        let child = cmd.spawn().map_err(|e| {
            LaunchError::SpawnFailed(format!("{}: {}", self.check.program.display(), e))
        })?;
        let check_pid = child.id();

        info!(
            pid = %process.pid,
            check_pid = ?check_pid,
            program = %self.check.program.display(),
            config_file = %self.check.config_file.display(),
            "Check process started"
        );

        // detached: dropping the handle neither kills nor waits for the child
        drop(child);

        Ok(LaunchHandle { check_pid })
    }
}
