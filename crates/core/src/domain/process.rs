// Process Domain Model

use serde::{Deserialize, Serialize};

/// OS process identifier
pub type Pid = u32;

/// One live process seen by the process listing
///
/// Valid only for the scan pass that produced it; the process may exit at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessHandle {
    pub pid: Pid,
    /// Invoking user; the listing never crosses users
    pub user: String,
    /// Full command line as reported by the listing
    pub command_line: String,
}

impl ProcessHandle {
    pub fn new(pid: Pid, user: impl Into<String>, command_line: impl Into<String>) -> Self {
        Self {
            pid,
            user: user.into(),
            command_line: command_line.into(),
        }
    }
}

impl std::fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.pid, self.user)
    }
}
