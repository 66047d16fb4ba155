//! Launch profiles and environment variable overrides.

use serde::{Deserialize, Serialize};

use super::TerminalKind;

/// A single environment variable override.
///
/// Overrides whose name is empty after trimming are ignored by the
/// environment composer and dropped when the store is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A named bundle of working directory, environment overrides, and preferred
/// terminal kind.
///
/// Field names mirror the JSON document on disk. An empty working directory
/// means "inherit the caller's current directory". The launch subsystem
/// consumes profiles read-only; ids and timestamps are managed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub description: String,
    pub working_directory: String,
    #[serde(rename = "terminalType")]
    pub terminal: TerminalKind,
    #[serde(rename = "environmentVariables")]
    pub environment: Vec<EnvVar>,
    pub created_at: String,
    pub updated_at: String,
}

impl Profile {
    /// Create an unsaved profile with the given name; the store assigns
    /// the id and timestamps when it is added.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Drop environment entries whose trimmed name is empty.
    pub fn prune_environment(&mut self) {
        self.environment.retain(|var| !var.name.trim().is_empty());
    }
}
