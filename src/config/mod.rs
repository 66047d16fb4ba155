//! The profile store: a JSON document holding profiles and settings.
//!
//! The store owns profile identity - ids, creation and update timestamps -
//! and the document's lifecycle on disk (locking, atomic writes, backups,
//! import/export live in [`io`]). The launch subsystem only ever consumes
//! profile values.

mod io;
mod settings;

pub use settings::Settings;

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};

use crate::domain::Profile;

/// Current document format version.
const STORE_VERSION: &str = "1.0";

/// How many timestamped backups are kept before the oldest are pruned.
const MAX_BACKUPS: usize = 10;

/// The complete persisted document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Store {
    pub version: String,
    pub profiles: Vec<Profile>,
    pub settings: Settings,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            version: STORE_VERSION.to_string(),
            profiles: Vec::new(),
            settings: Settings::default(),
        }
    }
}

impl Store {
    /// Look up a profile by id.
    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// Look up a profile by id first, then by exact name.
    pub fn find(&self, needle: &str) -> Option<&Profile> {
        self.profile(needle)
            .or_else(|| self.profiles.iter().find(|p| p.name == needle))
    }

    /// Add a profile, assigning a fresh id and timestamps. Returns the id.
    pub fn add_profile(&mut self, mut profile: Profile) -> String {
        profile.id = generate_id();
        profile.created_at = timestamp();
        profile.updated_at = profile.created_at.clone();
        profile.prune_environment();
        let id = profile.id.clone();
        self.profiles.push(profile);
        id
    }

    /// Replace a profile's contents, preserving its id and creation time
    /// and refreshing the update time. Returns false if the id is unknown.
    pub fn update_profile(&mut self, id: &str, updated: Profile) -> bool {
        let Some(existing) = self.profiles.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        let id = existing.id.clone();
        let created_at = existing.created_at.clone();
        *existing = updated;
        existing.id = id;
        existing.created_at = created_at;
        existing.updated_at = timestamp();
        existing.prune_environment();
        true
    }

    /// Remove a profile by id. Returns false if the id is unknown.
    pub fn delete_profile(&mut self, id: &str) -> bool {
        let before = self.profiles.len();
        self.profiles.retain(|p| p.id != id);
        self.profiles.len() != before
    }

    /// Copy a profile under a new id and name; returns the new id.
    pub fn duplicate_profile(&mut self, id: &str) -> Option<String> {
        let mut copy = self.profile(id)?.clone();
        copy.name = format!("{} (copy)", copy.name);
        Some(self.add_profile(copy))
    }

    /// Load-time cleanup mirroring the composer's rules: environment
    /// entries with blank names never reach a launch.
    pub(crate) fn sanitize(&mut self) {
        for profile in &mut self.profiles {
            profile.prune_environment();
        }
    }
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EnvVar;

    #[test]
    fn add_assigns_identity() {
        let mut store = Store::default();
        let id = store.add_profile(Profile::named("dev"));
        let profile = store.profile(&id).unwrap();
        assert!(!profile.id.is_empty());
        assert!(!profile.created_at.is_empty());
        assert_eq!(profile.created_at, profile.updated_at);
    }

    #[test]
    fn update_preserves_identity() {
        let mut store = Store::default();
        let id = store.add_profile(Profile::named("dev"));
        let created_at = store.profile(&id).unwrap().created_at.clone();

        let mut edited = Profile::named("dev renamed");
        edited.id = "should-be-ignored".to_string();
        assert!(store.update_profile(&id, edited));

        let profile = store.profile(&id).unwrap();
        assert_eq!(profile.name, "dev renamed");
        assert_eq!(profile.id, id);
        assert_eq!(profile.created_at, created_at);
    }

    #[test]
    fn update_unknown_id_is_rejected() {
        let mut store = Store::default();
        assert!(!store.update_profile("nope", Profile::named("x")));
    }

    #[test]
    fn duplicate_gets_new_id_and_copy_suffix() {
        let mut store = Store::default();
        let id = store.add_profile(Profile::named("dev"));
        let copy_id = store.duplicate_profile(&id).unwrap();
        assert_ne!(copy_id, id);
        assert_eq!(store.profile(&copy_id).unwrap().name, "dev (copy)");
        assert_eq!(store.profiles.len(), 2);
    }

    #[test]
    fn find_matches_id_then_name() {
        let mut store = Store::default();
        let id = store.add_profile(Profile::named("dev"));
        assert_eq!(store.find(&id).unwrap().name, "dev");
        assert_eq!(store.find("dev").unwrap().id, id);
        assert!(store.find("missing").is_none());
    }

    #[test]
    fn sanitize_drops_blank_env_names() {
        let mut store = Store::default();
        let mut profile = Profile::named("dev");
        profile.environment = vec![EnvVar::new(" ", "x"), EnvVar::new("A", "1")];
        store.profiles.push(profile);
        store.sanitize();
        assert_eq!(store.profiles[0].environment.len(), 1);
    }
}
