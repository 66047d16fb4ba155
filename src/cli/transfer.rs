//! Export and import commands

use std::path::Path;

use anyhow::Result;

use termprof::config::Store;

/// Copy the profile store document to a caller-chosen path.
pub async fn export_command(destination: &Path) -> Result<()> {
    // Ensure the document exists before copying it.
    Store::load()?;
    Store::export(&Store::store_path(), destination)?;
    println!("Exported profiles to {}.", destination.display());
    Ok(())
}

/// Replace the profile store with an exported document.
pub async fn import_command(source: &Path) -> Result<()> {
    let store = Store::import(&Store::store_path(), source)?;
    println!(
        "Imported {} profile(s) from {}.",
        store.profiles.len(),
        source.display()
    );
    Ok(())
}
