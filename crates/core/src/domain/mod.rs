// Domain Layer - Pure types and matching rules

pub mod environment;
pub mod platform;
pub mod process;
pub mod signature;

// Re-exports
pub use environment::{EnvValue, EnvironmentDescriptor, LibraryPath};
pub use platform::PlatformKind;
pub use process::{Pid, ProcessHandle};
pub use signature::{SignatureSet, WorkerSignature};
