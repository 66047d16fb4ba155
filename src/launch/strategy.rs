//! The per-platform launch strategy seam.
//!
//! Each platform demands a structurally different spawning protocol
//! (synchronous `CreateProcessW`, racy fork/exec with a status pipe, or an
//! AppleScript bridge), so the protocols live behind one `spawn` contract
//! and a compile-time factory instead of scattered conditionals.

use super::env::ComposedEnvironment;
use super::LaunchError;
use crate::domain::{EnvVar, TerminalKind};

/// Everything one launch attempt needs, borrowed from the profile and the
/// composer. Strategies consume it read-only.
pub struct LaunchRequest<'a> {
    /// Target directory; empty means "inherit the caller's current directory".
    pub working_directory: &'a str,
    /// A concrete kind. Resolution happens before dispatch; strategies never
    /// see `Automatic`.
    pub kind: TerminalKind,
    /// The fully composed environment for the new process.
    pub environment: &'a ComposedEnvironment,
    /// The raw overrides, for the paths that re-apply them inside the
    /// session (init script, export chain) instead of via the process
    /// environment.
    pub overrides: &'a [EnvVar],
    /// Profile display name, used for window/tab titles where supported.
    pub title: &'a str,
}

/// The platform-specific algorithm that turns a request into an actual new
/// OS process. One short, linear attempt per call; nothing is retried and
/// the spawned terminal is handed off, not supervised.
pub trait LaunchStrategy: Send + Sync {
    fn spawn(&self, request: &LaunchRequest<'_>) -> Result<(), LaunchError>;
}

/// Select the strategy for the compile-time platform.
#[cfg(target_os = "windows")]
pub fn platform_strategy() -> Result<Box<dyn LaunchStrategy>, LaunchError> {
    Ok(Box::new(super::windows::CreateProcessStrategy))
}

#[cfg(target_os = "linux")]
pub fn platform_strategy() -> Result<Box<dyn LaunchStrategy>, LaunchError> {
    Ok(Box::new(super::posix::ForkExecStrategy))
}

#[cfg(target_os = "macos")]
pub fn platform_strategy() -> Result<Box<dyn LaunchStrategy>, LaunchError> {
    Ok(Box::new(super::macos::ScriptBridgeStrategy))
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
pub fn platform_strategy() -> Result<Box<dyn LaunchStrategy>, LaunchError> {
    Err(LaunchError::UnsupportedPlatform)
}
