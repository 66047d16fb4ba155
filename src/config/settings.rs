//! Application-wide settings persisted alongside the profiles.

use serde::{Deserialize, Serialize};

use crate::domain::TerminalKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Terminal kind preselected for new profiles.
    #[serde(rename = "defaultTerminalType")]
    pub default_terminal: TerminalKind,

    /// Copy the document to the backups directory before each save.
    #[serde(rename = "autoBackup")]
    pub auto_backup: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_terminal: TerminalKind::Automatic,
            auto_backup: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_use_store_field_names() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["defaultTerminalType"], "auto");
        assert_eq!(json["autoBackup"], true);
    }

    #[test]
    fn missing_settings_fields_default() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
