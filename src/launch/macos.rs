//! AppleScript bridge launch strategy for macOS.
//!
//! GUI terminal applications on macOS are not addressed by exec'ing a
//! binary; the attempt instead hands a small control script to `osascript`,
//! which activates the application and issues one composite shell command
//! (directory change plus exports). The interpreter runs through `sh -c`
//! with stderr folded into stdout so a failure's diagnostic text comes back
//! as the error reason.

#![cfg(target_os = "macos")]

use std::process::Command;

use super::script::{bridge_invocation, control_script, terminal_command};
use super::strategy::{LaunchRequest, LaunchStrategy};
use super::LaunchError;

pub struct ScriptBridgeStrategy;

impl LaunchStrategy for ScriptBridgeStrategy {
    fn spawn(&self, request: &LaunchRequest<'_>) -> Result<(), LaunchError> {
        let command = terminal_command(request.working_directory, request.overrides);
        let script = control_script(request.kind, &command);
        let invocation = bridge_invocation("osascript", &script);
        tracing::debug!(kind = %request.kind, "invoking script bridge");

        // Blocks until osascript has handed the instruction to the terminal
        // application; typically a few hundred milliseconds.
        let output = Command::new("/bin/sh")
            .arg("-c")
            .arg(&invocation)
            .output()
            .map_err(|e| LaunchError::ResourceAcquisition {
                what: "script interpreter",
                source: e,
            })?;

        if output.status.success() {
            return Ok(());
        }
        let text = String::from_utf8_lossy(&output.stdout);
        Err(LaunchError::Interpreter {
            output: text.trim_end_matches('\n').to_string(),
        })
    }
}
