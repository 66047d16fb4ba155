//! The cross-platform launch subsystem.
//!
//! Given a [`Profile`], the launcher composes the effective process
//! environment, resolves an `Automatic` terminal request to a concrete
//! kind, and spawns the terminal as a new, independent, visible process
//! using the native mechanism for the platform. The attempt is synchronous
//! from the caller's point of view and terminates in success or a
//! diagnostic failure; the spawned terminal is handed off, never
//! supervised.
//!
//! Everything here is transient: each call builds its state fresh and holds
//! nothing between launches, so concurrent launches from multiple threads
//! need no locking.

pub mod catalog;
pub mod env;
pub mod script;
mod strategy;

mod macos;
mod posix;
mod windows;

pub use catalog::{available_kinds, is_available, resolve_automatic};
pub use env::{compose, environment_block, ComposedEnvironment, NameComparison};
pub use strategy::{platform_strategy, LaunchRequest, LaunchStrategy};

use std::io;

use thiserror::Error;

use crate::domain::{Profile, TerminalKind};

/// Why a launch attempt failed. Every variant is terminal; nothing is
/// retried here, and the `Display` text is the user-facing reason.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("terminal launching is not supported on this platform")]
    UnsupportedPlatform,

    /// A pipe, temp file, or worker could not be set up before the spawn.
    #[error("failed to acquire {what}: {source}")]
    ResourceAcquisition {
        what: &'static str,
        #[source]
        source: io::Error,
    },

    /// The child could not enter the requested working directory; exec was
    /// never attempted.
    #[error("could not change to the requested directory: {}", io::Error::from_raw_os_error(*errno))]
    DirectoryChange { errno: i32 },

    /// The terminal executable is missing or not executable.
    #[error("could not execute {command}: {}", io::Error::from_raw_os_error(*errno))]
    Exec { command: String, errno: i32 },

    /// Native process creation failed; the code was captured immediately at
    /// the call site.
    #[error("process creation failed: {message} (code {code})")]
    ProcessCreation { code: u32, message: String },

    /// The script interpreter exited nonzero; `output` is its combined
    /// stdout/stderr text.
    #[error("script interpreter failed: {output}")]
    Interpreter { output: String },
}

/// The façade external collaborators use: compose, resolve, dispatch.
pub struct Launcher;

impl Launcher {
    /// Launch a terminal for the given profile, synchronously.
    ///
    /// Blocks until the platform strategy has confirmed process creation
    /// (or failure); it never waits for the terminal itself. The one
    /// potentially slow path is the macOS script bridge, where the
    /// interpreter's hand-off to the terminal application can take a few
    /// hundred milliseconds.
    pub fn launch(profile: &Profile) -> Result<(), LaunchError> {
        let kind = match profile.terminal {
            TerminalKind::Automatic => resolve_automatic(),
            kind => kind,
        };
        let snapshot: Vec<(String, String)> = std::env::vars().collect();
        let environment = compose(snapshot, &profile.environment, NameComparison::native());
        let strategy = platform_strategy()?;

        tracing::info!(
            profile = %profile.name,
            kind = %kind,
            directory = %profile.working_directory,
            overrides = profile.environment.len(),
            "launching terminal"
        );

        strategy.spawn(&LaunchRequest {
            working_directory: &profile.working_directory,
            kind,
            environment: &environment,
            overrides: &profile.environment,
            title: &profile.name,
        })
    }

    /// Run [`Launcher::launch`] on a blocking worker thread, for callers on
    /// an async or UI thread. No cancellation is exposed; once the spawn
    /// has started it runs to completion.
    pub async fn launch_detached(profile: Profile) -> Result<(), LaunchError> {
        match tokio::task::spawn_blocking(move || Self::launch(&profile)).await {
            Ok(result) => result,
            Err(e) => Err(LaunchError::ResourceAcquisition {
                what: "launch worker",
                source: io::Error::other(e),
            }),
        }
    }
}
