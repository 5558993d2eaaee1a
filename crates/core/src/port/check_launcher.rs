// Check Launcher Port
// Starts the external monitoring check for one worker and returns without waiting

use thiserror::Error;

use crate::domain::{EnvironmentDescriptor, Pid, ProcessHandle};

/// What is known about a check right after launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchHandle {
    /// OS pid of the check, when the launcher spawns a process
    pub check_pid: Option<Pid>,
}

/// Launch errors
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),
}

/// Check launcher trait
///
/// `launch` must return as soon as the check is started. The check's lifetime,
/// exit status and output are not tracked.
pub trait CheckLauncher: Send + Sync {
    /// Start the check for `process` with `descriptor` applied as its environment
    ///
    /// # Errors
    /// - LaunchError::SpawnFailed if the check could not be started
    fn launch(
        &self,
        process: &ProcessHandle,
        descriptor: EnvironmentDescriptor,
    ) -> Result<LaunchHandle, LaunchError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Mock launcher behavior
    #[derive(Debug, Clone)]
    pub enum MockBehavior {
        /// Record and return immediately
        Success,
        /// Always fail with message
        Fail(String),
        /// Record and leave a check running that never finishes
        Hang,
    }

    /// Mock Check Launcher recording every dispatched descriptor
    pub struct MockCheckLauncher {
        behavior: MockBehavior,
        launched: Arc<Mutex<Vec<(Pid, EnvironmentDescriptor)>>>,
    }

    impl MockCheckLauncher {
        pub fn new(behavior: MockBehavior) -> Self {
            Self {
                behavior,
                launched: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub fn new_success() -> Self {
            Self::new(MockBehavior::Success)
        }

        pub fn new_fail(message: impl Into<String>) -> Self {
            Self::new(MockBehavior::Fail(message.into()))
        }

        pub fn new_hanging() -> Self {
            Self::new(MockBehavior::Hang)
        }

        pub fn call_count(&self) -> usize {
            self.launched.lock().unwrap().len()
        }

        pub fn launched(&self) -> Vec<(Pid, EnvironmentDescriptor)> {
            self.launched.lock().unwrap().clone()
        }
    }

    impl CheckLauncher for MockCheckLauncher {
        fn launch(
            &self,
            process: &ProcessHandle,
            descriptor: EnvironmentDescriptor,
        ) -> Result<LaunchHandle, LaunchError> {
            match &self.behavior {
                MockBehavior::Success => {}
                MockBehavior::Fail(msg) => return Err(LaunchError::SpawnFailed(msg.clone())),
                MockBehavior::Hang => {
                    // detached; nobody ever joins it
                    std::thread::spawn(|| loop {
                        std::thread::park();
                    });
                }
            }
            self.launched.lock().unwrap().push((process.pid, descriptor));
            Ok(LaunchHandle { check_pid: None })
        }
    }
}
