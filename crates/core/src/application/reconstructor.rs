// Environment reconstruction
// Turns an adapter's raw dump into an EnvironmentDescriptor

use crate::domain::environment::{OGG_VAR_HOME, ORACLE_HOME};
use crate::domain::{EnvValue, EnvironmentDescriptor, LibraryPath, PlatformKind};
use crate::port::RawEnvironment;

/// Builds descriptors for one platform
///
/// Pure: the same raw input always yields the same descriptor, and missing
/// variables become `EnvValue::Unresolved` instead of errors.
#[derive(Debug, Clone, Copy)]
pub struct Reconstructor {
    platform: PlatformKind,
}

impl Reconstructor {
    pub fn new(platform: PlatformKind) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> PlatformKind {
        self.platform
    }

    pub fn reconstruct(&self, raw: &RawEnvironment) -> EnvironmentDescriptor {
        let entries = raw.separator.split(&raw.entries);
        let library_var = self.platform.library_path_var();

        let working_dir = if raw.working_dir.is_empty() {
            EnvValue::Unresolved
        } else {
            EnvValue::Resolved(raw.working_dir.clone())
        };

        EnvironmentDescriptor {
            // the worker runs from its installation home
            installation_home: working_dir.clone(),
            product_home: find_value(&entries, ORACLE_HOME).into(),
            var_home: find_value(&entries, OGG_VAR_HOME).into(),
            library_path: LibraryPath {
                var: library_var,
                value: find_value(&entries, library_var).into(),
            },
            working_dir,
        }
    }
}

/// Value of the first entry starting with exactly `KEY=`
///
/// Everything after the first `=` is returned verbatim.
pub fn find_value(entries: &[&[u8]], key: &str) -> Option<String> {
    let key = key.as_bytes();
    entries.iter().find_map(|entry| {
        entry
            .strip_prefix(key)
            .and_then(|rest| rest.strip_prefix(b"="))
            .map(|value| String::from_utf8_lossy(value).into_owned())
    })
}
