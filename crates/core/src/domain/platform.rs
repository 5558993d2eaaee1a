// Platform detection

use serde::{Deserialize, Serialize};

/// Operating system family the probe is running on
///
/// Detected once per run; selects the platform adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformKind {
    Aix,
    SunOs,
    Linux,
    Unsupported,
}

impl PlatformKind {
    /// Platform of the running binary
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Map an OS name to a platform kind
    ///
    /// Accepts both `uname -s` output (`AIX`, `SunOS`, `Linux`) and Rust's
    /// `std::env::consts::OS` values (`aix`, `solaris`, `illumos`, `linux`).
    pub fn from_os_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "aix" => PlatformKind::Aix,
            "sunos" | "solaris" | "illumos" => PlatformKind::SunOs,
            "linux" => PlatformKind::Linux,
            _ => PlatformKind::Unsupported,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, PlatformKind::Unsupported)
    }

    /// Shared-library search path variable used by this platform
    pub fn library_path_var(&self) -> &'static str {
        match self {
            PlatformKind::Aix => "LIBPATH",
            _ => "LD_LIBRARY_PATH",
        }
    }
}

impl std::fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlatformKind::Aix => write!(f, "AIX"),
            PlatformKind::SunOs => write!(f, "SunOS"),
            PlatformKind::Linux => write!(f, "Linux"),
            PlatformKind::Unsupported => write!(f, "unsupported"),
        }
    }
}
