//! Terminals command implementation

use anyhow::Result;

use termprof::launch::{available_kinds, is_available, resolve_automatic};

/// Show the terminal kinds this platform offers and what Automatic
/// currently resolves to.
pub async fn terminals_command() -> Result<()> {
    println!("Terminal kinds on this platform:\n");
    for kind in available_kinds() {
        if kind.is_automatic() {
            continue;
        }
        let marker = if is_available(kind) { "available" } else { "not found" };
        println!("  {:<16} {:<16} [{}]", kind.tag(), kind.display_name(), marker);
    }

    let resolved = resolve_automatic();
    println!("\nAutomatic resolves to: {}", resolved.display_name());
    Ok(())
}
