// OGG Probe Infrastructure - System Adapters
// Implements: PlatformAdapter (AIX, SunOS, Linux), ProcessLister, CheckLauncher

pub mod adapters;
pub mod ps_lister;
pub mod subprocess_launcher;
pub mod tools;

pub use adapters::{AixAdapter, LinuxAdapter, SunOsAdapter, SystemAdapterProvider};
pub use ps_lister::PsProcessLister;
pub use subprocess_launcher::{CheckCommand, SubprocessLauncher};
pub use tools::IntrospectionTools;
