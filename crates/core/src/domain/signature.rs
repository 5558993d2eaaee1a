// Worker process signatures
//
// Matching is a plain substring test on the full command line. Unrelated processes
// that happen to contain one of the patterns are matched too.

use serde::{Deserialize, Serialize};

use super::process::ProcessHandle;

/// Classic manager started with a parameter file
pub const MANAGER_SIGNATURE: &str = "mgr PARAMFILE";

/// Microservices architecture service manager
pub const SERVICE_MANAGER_SIGNATURE: &str = "ServiceManager";

/// A literal command-line fragment identifying a worker process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerSignature(String);

impl WorkerSignature {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, command_line: &str) -> bool {
        !self.0.is_empty() && command_line.contains(self.0.as_str())
    }
}

/// Set of signatures; a command line matching any of them is a worker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSet {
    signatures: Vec<WorkerSignature>,
}

impl SignatureSet {
    pub fn new(signatures: Vec<WorkerSignature>) -> Self {
        Self { signatures }
    }

    pub fn from_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(patterns.into_iter().map(WorkerSignature::new).collect())
    }

    pub fn signatures(&self) -> &[WorkerSignature] {
        &self.signatures
    }

    pub fn matches(&self, command_line: &str) -> bool {
        self.signatures.iter().any(|s| s.matches(command_line))
    }

    pub fn matches_process(&self, process: &ProcessHandle) -> bool {
        self.matches(&process.command_line)
    }
}

impl Default for SignatureSet {
    fn default() -> Self {
        Self::from_patterns([MANAGER_SIGNATURE, SERVICE_MANAGER_SIGNATURE])
    }
}
