// Scan pass report

use serde::Serialize;

use crate::domain::{EnvValue, EnvironmentDescriptor, Pid, PlatformKind};

/// Why a matched process got no check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// Exited between listing and introspection
    Vanished,
    /// Native tool or file read failed for a live process
    Introspection,
    /// The check could not be started
    Launch,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Vanished => write!(f, "VANISHED"),
            FailureKind::Introspection => write!(f, "INTROSPECTION"),
            FailureKind::Launch => write!(f, "LAUNCH"),
        }
    }
}

/// A matched process skipped for this pass
#[derive(Debug, Clone, Serialize)]
pub struct ProcessFailure {
    pub pid: Pid,
    pub kind: FailureKind,
    pub message: String,
}

/// A matched process whose check was started (or would be, in dry-run)
#[derive(Debug, Clone, Serialize)]
pub struct DispatchRecord {
    pub pid: Pid,
    pub command_line: String,
    pub installation_home: EnvValue,
    pub check_pid: Option<Pid>,
    pub unresolved: Vec<&'static str>,
    /// Full descriptor, kept only for dry-run passes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<EnvironmentDescriptor>,
}

/// Outcome of one scan pass
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub run_id: String,
    pub platform: PlatformKind,
    pub dry_run: bool,
    pub started_at_ms: i64,
    pub elapsed_ms: i64,
    /// Processes returned by the listing
    pub listed: usize,
    /// Processes matching a worker signature, self excluded
    pub matched: usize,
    pub dispatched: Vec<DispatchRecord>,
    pub failures: Vec<ProcessFailure>,
}

impl ScanReport {
    pub fn dispatched_count(&self) -> usize {
        self.dispatched.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn count_failures(&self, kind: FailureKind) -> usize {
        self.failures.iter().filter(|f| f.kind == kind).count()
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
