// Environment Descriptor Domain Model

use serde::Serialize;

/// Installation home of the worker (taken from its working directory)
pub const OGG_HOME: &str = "OGG_HOME";
/// Database client home
pub const ORACLE_HOME: &str = "ORACLE_HOME";
/// Variable data home (microservices deployments)
pub const OGG_VAR_HOME: &str = "OGG_VAR_HOME";

/// A value read from a process environment
///
/// `Unresolved` means the variable was absent; it is never folded into an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EnvValue {
    Resolved(String),
    Unresolved,
}

impl EnvValue {
    pub fn is_resolved(&self) -> bool {
        matches!(self, EnvValue::Resolved(_))
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            EnvValue::Resolved(v) => Some(v.as_str()),
            EnvValue::Unresolved => None,
        }
    }
}

impl From<Option<String>> for EnvValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(EnvValue::Unresolved, EnvValue::Resolved)
    }
}

impl std::fmt::Display for EnvValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvValue::Resolved(v) => write!(f, "{}", v),
            EnvValue::Unresolved => write!(f, "<unresolved>"),
        }
    }
}

/// Shared-library search path and the variable it lives in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LibraryPath {
    /// `LD_LIBRARY_PATH` or `LIBPATH` depending on platform
    pub var: &'static str,
    pub value: EnvValue,
}

/// Reconstructed runtime environment of one worker process
///
/// Built once, never mutated, consumed by the dispatch that launches its check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvironmentDescriptor {
    pub installation_home: EnvValue,
    pub product_home: EnvValue,
    pub var_home: EnvValue,
    pub library_path: LibraryPath,
    pub working_dir: EnvValue,
}

impl EnvironmentDescriptor {
    /// Variables to apply to the check, in a stable order
    ///
    /// Unresolved entries are returned as `None` so the caller can clear them.
    pub fn variables(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            (OGG_HOME, self.installation_home.as_deref()),
            (ORACLE_HOME, self.product_home.as_deref()),
            (OGG_VAR_HOME, self.var_home.as_deref()),
            (self.library_path.var, self.library_path.value.as_deref()),
        ]
    }

    /// Names of the variables that could not be resolved
    pub fn unresolved_fields(&self) -> Vec<&'static str> {
        self.variables()
            .into_iter()
            .filter(|(_, value)| value.is_none())
            .map(|(name, _)| name)
            .collect()
    }
}
