//! Core domain types for termprof

mod profile;
mod terminal;

pub use profile::{EnvVar, Profile};
pub use terminal::{PlatformFamily, TerminalKind};
