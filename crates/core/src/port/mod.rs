// Port Layer - Interfaces for external dependencies

pub mod check_launcher;
pub mod id_provider; // For deterministic testing
pub mod platform_adapter;
pub mod process_lister;
pub mod time_provider;

// Re-exports
pub use check_launcher::{CheckLauncher, LaunchError, LaunchHandle};
pub use id_provider::IdProvider;
pub use platform_adapter::{
    AdapterError, AdapterProvider, EntrySeparator, PlatformAdapter, RawEnvironment,
};
pub use process_lister::{ListError, ProcessLister};
pub use time_provider::TimeProvider;
