// OGG probe core
// Domain types, ports and the scan pass; every OS call sits behind a port in infra-system

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};
