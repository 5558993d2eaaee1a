// Platform Adapter Port
// One implementation per supported OS family, selected once per run

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::{Pid, PlatformKind, ProcessHandle};

/// How entries are delimited in an adapter's raw environment dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySeparator {
    /// `/proc/<pid>/environ`
    Nul,
    /// One `KEY=value` per line
    Newline,
    /// Command line and environment on a single line (`ps eww`)
    Whitespace,
}

impl EntrySeparator {
    /// Split raw bytes into non-empty entries
    pub fn split<'a>(&self, bytes: &'a [u8]) -> Vec<&'a [u8]> {
        match self {
            EntrySeparator::Nul => bytes.split(|b| *b == b'\0').filter(|e| !e.is_empty()).collect(),
            EntrySeparator::Newline => bytes
                .split(|b| *b == b'\n')
                .filter(|e| !e.is_empty())
                .collect(),
            EntrySeparator::Whitespace => bytes
                .split(|b| b.is_ascii_whitespace())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }
}

/// Uninterpreted introspection result for one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEnvironment {
    pub entries: Vec<u8>,
    pub separator: EntrySeparator,
    pub working_dir: String,
}

impl RawEnvironment {
    pub fn new(entries: impl Into<Vec<u8>>, separator: EntrySeparator, working_dir: impl Into<String>) -> Self {
        Self {
            entries: entries.into(),
            separator,
            working_dir: working_dir.into(),
        }
    }
}

/// Introspection errors
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Platform not supported: {0}")]
    UnsupportedPlatform(PlatformKind),

    #[error("Process {0} vanished before it could be inspected")]
    ProcessVanished(Pid),

    #[error("{tool} failed for pid {pid}: {message}")]
    ToolFailed {
        tool: String,
        pid: Pid,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(String),
}

impl AdapterError {
    pub fn is_vanished(&self) -> bool {
        matches!(self, AdapterError::ProcessVanished(_))
    }
}

/// Platform adapter trait
///
/// Implementations:
/// - AixAdapter: `procwdx` + `ps eww`
/// - SunOsAdapter: `pwdx` + `pargs -e`
/// - LinuxAdapter: `/proc/<pid>/environ` + `/proc/<pid>/cwd`
#[async_trait]
pub trait PlatformAdapter: Send + Sync {
    /// Platform this adapter introspects
    fn platform(&self) -> PlatformKind;

    /// Read the environment and working directory of a process
    ///
    /// # Errors
    /// - AdapterError::ProcessVanished if the process no longer exists
    /// - AdapterError::ToolFailed if the native tool failed for a live process
    async fn introspect(&self, process: &ProcessHandle) -> Result<RawEnvironment, AdapterError>;
}

/// Selects the adapter for a platform
pub trait AdapterProvider: Send + Sync {
    /// # Errors
    /// - AdapterError::UnsupportedPlatform if no adapter exists for `platform`
    fn adapter_for(&self, platform: PlatformKind) -> Result<Arc<dyn PlatformAdapter>, AdapterError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned introspection outcome for one pid
    #[derive(Debug, Clone)]
    pub enum MockIntrospection {
        Found(RawEnvironment),
        Vanished,
        ToolFailed(String),
    }

    /// Mock adapter answering from a pid table; unknown pids have vanished
    pub struct MockPlatformAdapter {
        platform: PlatformKind,
        responses: Mutex<HashMap<Pid, MockIntrospection>>,
        call_count: Mutex<usize>,
    }

    impl MockPlatformAdapter {
        pub fn new(platform: PlatformKind) -> Self {
            Self {
                platform,
                responses: Mutex::new(HashMap::new()),
                call_count: Mutex::new(0),
            }
        }

        pub fn with_process(self, pid: Pid, raw: RawEnvironment) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(pid, MockIntrospection::Found(raw));
            self
        }

        pub fn with_response(self, pid: Pid, response: MockIntrospection) -> Self {
            self.responses.lock().unwrap().insert(pid, response);
            self
        }

        pub fn call_count(&self) -> usize {
            *self.call_count.lock().unwrap()
        }
    }

    #[async_trait]
    impl PlatformAdapter for MockPlatformAdapter {
        fn platform(&self) -> PlatformKind {
            self.platform
        }

        async fn introspect(&self, process: &ProcessHandle) -> Result<RawEnvironment, AdapterError> {
            *self.call_count.lock().unwrap() += 1;

            let response = self.responses.lock().unwrap().get(&process.pid).cloned();
            match response {
                Some(MockIntrospection::Found(raw)) => Ok(raw),
                Some(MockIntrospection::ToolFailed(msg)) => Err(AdapterError::ToolFailed {
                    tool: "mock".to_string(),
                    pid: process.pid,
                    message: msg,
                }),
                Some(MockIntrospection::Vanished) | None => {
                    Err(AdapterError::ProcessVanished(process.pid))
                }
            }
        }
    }

    /// Mock provider returning one adapter for every supported platform
    pub struct MockAdapterProvider {
        adapter: Arc<MockPlatformAdapter>,
    }

    impl MockAdapterProvider {
        pub fn new(adapter: Arc<MockPlatformAdapter>) -> Self {
            Self { adapter }
        }
    }

    impl AdapterProvider for MockAdapterProvider {
        fn adapter_for(
            &self,
            platform: PlatformKind,
        ) -> Result<Arc<dyn PlatformAdapter>, AdapterError> {
            if !platform.is_supported() {
                return Err(AdapterError::UnsupportedPlatform(platform));
            }
            Ok(self.adapter.clone())
        }
    }
}
