//! List command implementation

use anyhow::Result;

use termprof::config::Store;

/// Print all stored profiles.
pub async fn list_command() -> Result<()> {
    let store = Store::load()?;

    if store.profiles.is_empty() {
        println!("No profiles yet. Create one with `termprof add <name>`.");
        return Ok(());
    }

    println!("Profiles ({}):\n", store.profiles.len());
    for profile in &store.profiles {
        let directory = if profile.working_directory.is_empty() {
            "(inherit current)"
        } else {
            &profile.working_directory
        };
        println!(
            "  {} [{}] {} - {} override(s)",
            profile.name,
            profile.terminal.display_name(),
            directory,
            profile.environment.len()
        );
        if !profile.description.is_empty() {
            println!("    {}", profile.description);
        }
    }

    Ok(())
}
