//! CLI command implementations

pub mod launch;
pub mod list;
pub mod profile;
pub mod terminals;
pub mod transfer;
