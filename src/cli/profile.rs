//! Profile management commands (add, remove, duplicate)

use anyhow::{bail, Context, Result};

use termprof::config::Store;
use termprof::domain::{EnvVar, Profile, TerminalKind};

/// Parse a `NAME=VALUE` override from the command line.
pub fn parse_env_pair(raw: &str) -> Result<EnvVar> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("Environment override '{raw}' must look like NAME=VALUE");
    };
    if name.trim().is_empty() {
        bail!("Environment override '{raw}' has an empty name");
    }
    Ok(EnvVar::new(name, value))
}

/// Create and persist a new profile.
pub async fn add_command(
    name: &str,
    directory: Option<String>,
    terminal: Option<TerminalKind>,
    env: &[String],
    description: Option<String>,
) -> Result<()> {
    let mut store = Store::load()?;

    if store.find(name).is_some() {
        bail!("A profile named '{name}' already exists");
    }

    let mut profile = Profile::named(name);
    profile.working_directory = directory.unwrap_or_default();
    profile.terminal = terminal.unwrap_or(store.settings.default_terminal);
    profile.description = description.unwrap_or_default();
    profile.environment = env
        .iter()
        .map(|raw| parse_env_pair(raw))
        .collect::<Result<Vec<_>>>()?;

    let id = store.add_profile(profile);
    store.save().context("Failed to save profile store")?;

    println!("Created profile '{name}' ({id}).");
    Ok(())
}

/// Delete a profile by id or name.
pub async fn remove_command(target: &str) -> Result<()> {
    let mut store = Store::load()?;

    let Some(profile) = store.find(target) else {
        bail!("No profile named '{target}'");
    };
    let (id, name) = (profile.id.clone(), profile.name.clone());

    store.delete_profile(&id);
    store.save().context("Failed to save profile store")?;

    println!("Removed profile '{name}'.");
    Ok(())
}

/// Duplicate a profile by id or name.
pub async fn duplicate_command(target: &str) -> Result<()> {
    let mut store = Store::load()?;

    let Some(profile) = store.find(target) else {
        bail!("No profile named '{target}'");
    };
    let id = profile.id.clone();

    let copy_id = store
        .duplicate_profile(&id)
        .context("Profile vanished while duplicating")?;
    let copy_name = store
        .profile(&copy_id)
        .map(|p| p.name.clone())
        .unwrap_or_default();
    store.save().context("Failed to save profile store")?;

    println!("Created '{copy_name}'.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_pair_splits_on_first_equals() {
        let var = parse_env_pair("URL=https://example.com/?a=b").unwrap();
        assert_eq!(var.name, "URL");
        assert_eq!(var.value, "https://example.com/?a=b");
    }

    #[test]
    fn env_pair_allows_empty_value() {
        let var = parse_env_pair("EMPTY=").unwrap();
        assert_eq!(var.value, "");
    }

    #[test]
    fn env_pair_rejects_missing_equals_and_blank_name() {
        assert!(parse_env_pair("NOEQUALS").is_err());
        assert!(parse_env_pair("=value").is_err());
    }
}
