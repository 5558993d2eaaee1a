// Application Layer - Use Cases

pub mod reconstructor;
pub mod scanner;

// Re-exports
pub use reconstructor::Reconstructor;
pub use scanner::{ScanOptions, ScanReport, Scanner};
