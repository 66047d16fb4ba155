//! CreateProcessW launch strategy for Windows.
//!
//! All kinds launch as a new process with a new, visible console and an
//! explicit UTF-16 environment block. Windows Terminal is special: it may
//! reuse an existing host process and silently ignore the block, so that
//! path writes a temporary PowerShell init script (UTF-8 with BOM, to keep
//! non-ASCII values intact) that re-applies the overrides and directory
//! inside the session, and points `wt.exe` at it.

#![cfg(target_os = "windows")]

use std::ffi::c_void;

use windows::core::{PCWSTR, PWSTR};
use windows::Win32::Foundation::CloseHandle;
use windows::Win32::System::Threading::{
    CreateProcessW, CREATE_NEW_CONSOLE, CREATE_UNICODE_ENVIRONMENT, PROCESS_INFORMATION,
    STARTUPINFOW,
};

use super::env::environment_block;
use super::script::{
    cmd_command_line, powershell_command_line, powershell_init_script, wt_command_line,
};
use super::strategy::{LaunchRequest, LaunchStrategy};
use super::LaunchError;
use crate::domain::TerminalKind;

pub struct CreateProcessStrategy;

impl LaunchStrategy for CreateProcessStrategy {
    fn spawn(&self, request: &LaunchRequest<'_>) -> Result<(), LaunchError> {
        let command_line = match request.kind {
            TerminalKind::WindowsTerminal => {
                let script_path = write_init_script(request)?;
                wt_command_line(request.title, &script_path)
            }
            TerminalKind::PowerShell => powershell_command_line(request.working_directory),
            _ => cmd_command_line(request.working_directory),
        };
        tracing::debug!(%command_line, "creating terminal process");

        // The block must stay alive across the call; sorting happens inside
        // the serializer per the lpEnvironment ordering requirement.
        let block = environment_block(request.environment);

        let mut command_w = wide(&command_line);
        let dir_w = (!request.working_directory.is_empty()).then(|| wide(request.working_directory));

        let startup = STARTUPINFOW {
            cb: std::mem::size_of::<STARTUPINFOW>() as u32,
            ..Default::default()
        };
        let mut process = PROCESS_INFORMATION::default();

        let created = unsafe {
            CreateProcessW(
                PCWSTR::null(),
                PWSTR(command_w.as_mut_ptr()),
                None,
                None,
                false,
                CREATE_UNICODE_ENVIRONMENT | CREATE_NEW_CONSOLE,
                Some(block.as_ptr() as *const c_void),
                dir_w
                    .as_ref()
                    .map(|d| PCWSTR(d.as_ptr()))
                    .unwrap_or(PCWSTR::null()),
                &startup,
                &mut process,
            )
        };

        match created {
            Ok(()) => {
                // The call returns as soon as the process and its primary
                // thread exist; the terminal itself is handed off.
                unsafe {
                    let _ = CloseHandle(process.hProcess);
                    let _ = CloseHandle(process.hThread);
                }
                Ok(())
            }
            // windows::core::Error captures GetLastError at the call site,
            // before any other OS call can overwrite it.
            Err(e) => Err(LaunchError::ProcessCreation {
                code: e.code().0 as u32,
                message: e.message().to_string(),
            }),
        }
    }
}

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Write the per-launch init script to the temp directory; the name is
/// timestamp-derived and the file is not cleaned up automatically.
fn write_init_script(request: &LaunchRequest<'_>) -> Result<String, LaunchError> {
    let path = std::env::temp_dir().join(format!(
        "termprof_init_{}.ps1",
        chrono::Utc::now().timestamp()
    ));

    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(
        powershell_init_script(request.working_directory, request.overrides).as_bytes(),
    );
    std::fs::write(&path, bytes).map_err(|e| LaunchError::ResourceAcquisition {
        what: "init script",
        source: e,
    })?;

    Ok(path.display().to_string())
}
