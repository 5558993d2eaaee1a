// Process Listing Port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ProcessHandle;

/// Process listing errors
#[derive(Error, Debug)]
pub enum ListError {
    #[error("Process listing command failed: {0}")]
    CommandFailed(String),

    #[error("Cannot resolve invoking user: {0}")]
    UnknownUser(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Enumerates live processes owned by the invoking user
#[async_trait]
pub trait ProcessLister: Send + Sync {
    /// List every live process of the invoking user with its full command line
    ///
    /// # Errors
    /// - ListError::CommandFailed if the listing facility fails
    async fn list_processes(&self) -> Result<Vec<ProcessHandle>, ListError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Mock lister returning a fixed process table
    pub struct MockProcessLister {
        processes: Vec<ProcessHandle>,
        fail: Option<String>,
        call_count: Mutex<usize>,
    }

    impl MockProcessLister {
        pub fn new(processes: Vec<ProcessHandle>) -> Self {
            Self {
                processes,
                fail: None,
                call_count: Mutex::new(0),
            }
        }

        pub fn new_fail(message: impl Into<String>) -> Self {
            Self {
                processes: Vec::new(),
                fail: Some(message.into()),
                call_count: Mutex::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl ProcessLister for MockProcessLister {
        async fn list_processes(&self) -> Result<Vec<ProcessHandle>, ListError> {
            *self.call_count.lock().unwrap() += 1;
            match &self.fail {
                Some(msg) => Err(ListError::CommandFailed(msg.clone())),
                None => Ok(self.processes.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::MockProcessLister;
    use super::*;

    #[test]
    fn test_mock_lister_counts_calls() {
        let lister = MockProcessLister::new(vec![ProcessHandle::new(7, "oracle", "./mgr PARAMFILE x")]);

        let first = tokio_test::block_on(lister.list_processes()).unwrap();
        let second = tokio_test::block_on(lister.list_processes()).unwrap();

        assert_eq!(first, second);
        assert_eq!(lister.call_count(), 2);
    }

    #[test]
    fn test_mock_lister_failure() {
        let lister = MockProcessLister::new_fail("ps exited 2");
        let result = tokio_test::block_on(lister.list_processes());
        assert!(matches!(result, Err(ListError::CommandFailed(msg)) if msg == "ps exited 2"));
    }
}
