// Platform adapters, one per supported OS family

pub mod aix;
pub mod linux;
pub mod sunos;

pub use aix::AixAdapter;
pub use linux::LinuxAdapter;
pub use sunos::SunOsAdapter;

use std::sync::Arc;

use ogg_probe_core::domain::PlatformKind;
use ogg_probe_core::port::{AdapterError, AdapterProvider, PlatformAdapter};

use crate::tools::IntrospectionTools;

/// Picks the native adapter for a platform
#[derive(Debug, Clone, Default)]
pub struct SystemAdapterProvider {
    tools: IntrospectionTools,
}

impl SystemAdapterProvider {
    pub fn new(tools: IntrospectionTools) -> Self {
        Self { tools }
    }
}

impl AdapterProvider for SystemAdapterProvider {
    fn adapter_for(&self, platform: PlatformKind) -> Result<Arc<dyn PlatformAdapter>, AdapterError> {
        match platform {
            PlatformKind::Aix => Ok(Arc::new(AixAdapter::new(self.tools.clone()))),
            PlatformKind::SunOs => Ok(Arc::new(SunOsAdapter::new(self.tools.clone()))),
            PlatformKind::Linux => Ok(Arc::new(LinuxAdapter::new(self.tools.procfs_root.clone()))),
            PlatformKind::Unsupported => Err(AdapterError::UnsupportedPlatform(platform)),
        }
    }
}

/// Executable shell script standing in for a native tool
#[cfg(all(test, unix))]
pub(crate) fn fake_tool(dir: &std::path::Path, name: &str, body: &str) -> std::path::PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_selection() {
        let provider = SystemAdapterProvider::default();
        for platform in [PlatformKind::Aix, PlatformKind::SunOs, PlatformKind::Linux] {
            let adapter = provider.adapter_for(platform).unwrap();
            assert_eq!(adapter.platform(), platform);
        }
    }

    #[test]
    fn test_unsupported_platform() {
        let provider = SystemAdapterProvider::default();
        let result = provider.adapter_for(PlatformKind::Unsupported);
        assert!(matches!(
            result,
            Err(AdapterError::UnsupportedPlatform(PlatformKind::Unsupported))
        ));
    }
}
