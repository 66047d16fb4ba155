//! Launch command implementation

use anyhow::{bail, Context, Result};

use termprof::config::Store;
use termprof::launch::Launcher;

/// Launch the terminal configured by a profile, looked up by id or name.
pub async fn launch_command(target: &str) -> Result<()> {
    let store = Store::load()?;

    let Some(profile) = store.find(target) else {
        bail!("No profile named '{target}' (try `termprof list`)");
    };

    let name = profile.name.clone();
    Launcher::launch_detached(profile.clone())
        .await
        .with_context(|| format!("Could not launch profile '{name}'"))?;

    println!("Launched '{name}'.");
    Ok(())
}
