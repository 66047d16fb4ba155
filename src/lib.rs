//! termprof - profile-based native terminal launcher.
//!
//! termprof stores named profiles (working directory, environment variable
//! overrides, preferred terminal) and opens a real, native terminal window
//! preconfigured with them. The launch subsystem composes the effective
//! environment under each platform's name-comparison rules, discovers which
//! terminal emulators are installed, resolves "automatic" to a concrete
//! kind, and spawns the terminal with the correct native mechanism:
//! `CreateProcessW` with a sorted environment block on Windows, a
//! pipe-synchronized fork/exec on Linux, and an AppleScript bridge on
//! macOS.

pub mod config;
pub mod domain;
pub mod launch;

pub use domain::*;
