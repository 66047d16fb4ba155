//! Script text generation and quoting rules for the script-based launch
//! paths.
//!
//! Three distinct quoting passes live here and must not be mixed up:
//! POSIX single-quoting for values embedded in a shell command, PowerShell
//! single-quoting (quote doubling) for the Windows init script, and
//! AppleScript string quoting for the control script handed to `osascript`.
//! Everything is pure string work so the rules are unit-testable on any
//! host.

use crate::domain::{EnvVar, TerminalKind};

/// Quote for a POSIX shell: wrap in single quotes, escaping embedded single
/// quotes with the `'\''` sequence (close the quote, escaped quote, reopen).
pub fn shell_single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "'\\''"))
}

/// Quote for PowerShell: wrap in single quotes, doubling embedded ones per
/// that shell's quoting rule.
pub fn powershell_single_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Quote a string for AppleScript embedding: escape backslashes and double
/// quotes, then wrap in double quotes.
pub fn applescript_quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// The composite shell command the control script tells the terminal to run:
/// a directory change (if requested) chained with one export per override,
/// joined with `&&`. Override values and the directory are single-quoted.
pub fn terminal_command(working_directory: &str, overrides: &[EnvVar]) -> String {
    let mut parts = Vec::new();
    if !working_directory.is_empty() {
        parts.push(format!("cd {}", shell_single_quote(working_directory)));
    }
    for var in overrides {
        if var.name.trim().is_empty() {
            continue;
        }
        parts.push(format!(
            "export {}={}",
            var.name,
            shell_single_quote(&var.value)
        ));
    }
    parts.join(" && ")
}

/// The AppleScript control script that activates the terminal application
/// and hands it the composite command.
pub fn control_script(kind: TerminalKind, command: &str) -> String {
    match kind {
        TerminalKind::ITerm2 => format!(
            "tell application \"iTerm\"\n\
             \tactivate\n\
             \tcreate window with default profile\n\
             \ttell current session of current window\n\
             \t\twrite text {}\n\
             \tend tell\n\
             end tell",
            applescript_quote(command)
        ),
        _ => format!(
            "tell application \"Terminal\"\n\
             \tactivate\n\
             \tdo script {}\n\
             end tell",
            applescript_quote(command)
        ),
    }
}

/// The full interpreter invocation the bridge runs through `sh -c`.
///
/// The control script is embedded as a single-quoted argument; stderr is
/// folded into stdout so a failing interpreter's diagnostic is captured.
pub fn bridge_invocation(interpreter: &str, script: &str) -> String {
    format!("{} -e {} 2>&1", interpreter, shell_single_quote(script))
}

/// The PowerShell init script the Windows Terminal path writes to a temp
/// file: one `$env:` assignment per override, then a directory change.
///
/// Windows Terminal may reuse an existing host process, so a freshly built
/// environment block is not reliably inherited; the script re-applies the
/// overrides inside the session instead.
pub fn powershell_init_script(working_directory: &str, overrides: &[EnvVar]) -> String {
    let mut script = String::from("# termprof initialization script\n");
    for var in overrides {
        if var.name.trim().is_empty() {
            continue;
        }
        script.push_str(&format!(
            "$env:{} = {}\n",
            var.name,
            powershell_single_quote(&var.value)
        ));
    }
    if !working_directory.is_empty() {
        script.push_str(&format!(
            "Set-Location {}\n",
            powershell_single_quote(working_directory)
        ));
    }
    script
}

/// Command line for the Windows Terminal path: open a titled tab running
/// PowerShell pointed at the init script, kept open afterwards.
pub fn wt_command_line(title: &str, script_path: &str) -> String {
    format!(
        "wt.exe new-tab --title \"{title}\" powershell -NoExit -ExecutionPolicy Bypass -File \"{script_path}\""
    )
}

/// Command line for a plain PowerShell launch.
pub fn powershell_command_line(working_directory: &str) -> String {
    if working_directory.is_empty() {
        "powershell.exe -NoExit".to_string()
    } else {
        format!(
            "powershell.exe -NoExit -Command \"Set-Location '{working_directory}'\""
        )
    }
}

/// Command line for a cmd.exe launch; `/K` keeps the session open.
pub fn cmd_command_line(working_directory: &str) -> String {
    if working_directory.is_empty() {
        "cmd.exe /K".to_string()
    } else {
        format!("cmd.exe /K cd /d \"{working_directory}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_single_quote("hello"), "'hello'");
        assert_eq!(shell_single_quote("it's"), "'it'\\''s'");
    }

    #[test]
    fn powershell_quote_doubles_single_quotes() {
        assert_eq!(powershell_single_quote("o'brien"), "'o''brien'");
    }

    #[test]
    fn applescript_quote_escapes_backslash_and_quote() {
        assert_eq!(applescript_quote(r#"say "hi" \ bye"#), r#""say \"hi\" \\ bye""#);
    }

    #[test]
    fn terminal_command_chains_cd_and_exports() {
        let cmd = terminal_command(
            "/srv/app",
            &[EnvVar::new("FOO", "bar"), EnvVar::new("BAZ", "qux")],
        );
        assert_eq!(cmd, "cd '/srv/app' && export FOO='bar' && export BAZ='qux'");
    }

    #[test]
    fn terminal_command_without_directory_has_no_leading_join() {
        let cmd = terminal_command("", &[EnvVar::new("FOO", "bar")]);
        assert_eq!(cmd, "export FOO='bar'");
    }

    #[test]
    fn terminal_command_skips_blank_names() {
        let cmd = terminal_command("", &[EnvVar::new("  ", "x")]);
        assert!(cmd.is_empty());
    }

    #[test]
    fn control_script_targets_the_right_application() {
        let script = control_script(TerminalKind::TerminalApp, "cd '/tmp'");
        assert!(script.starts_with("tell application \"Terminal\""));
        assert!(script.contains("do script \"cd '/tmp'\""));

        let script = control_script(TerminalKind::ITerm2, "cd '/tmp'");
        assert!(script.starts_with("tell application \"iTerm\""));
        assert!(script.contains("write text \"cd '/tmp'\""));
    }

    #[test]
    fn init_script_sets_vars_then_changes_directory() {
        let script = powershell_init_script(
            "C:\\work",
            &[EnvVar::new("FOO", "it's")],
        );
        assert!(script.contains("$env:FOO = 'it''s'\n"));
        assert!(script.ends_with("Set-Location 'C:\\work'\n"));
    }

    #[test]
    fn wt_command_line_points_at_the_script() {
        let line = wt_command_line("Dev", "C:\\tmp\\init.ps1");
        assert_eq!(
            line,
            "wt.exe new-tab --title \"Dev\" powershell -NoExit -ExecutionPolicy Bypass -File \"C:\\tmp\\init.ps1\""
        );
    }

    #[test]
    fn shell_command_lines_keep_the_session_open() {
        assert_eq!(powershell_command_line(""), "powershell.exe -NoExit");
        assert_eq!(cmd_command_line(""), "cmd.exe /K");
        assert!(cmd_command_line("C:\\x").contains("cd /d \"C:\\x\""));
    }

    // The quoting rule itself, verified through a real shell: a directory
    // containing a single quote must round-trip byte for byte.
    #[cfg(unix)]
    #[test]
    fn shell_quote_round_trips_through_sh() {
        let original = "/home/o'brien";
        let output = std::process::Command::new("/bin/sh")
            .arg("-c")
            .arg(format!("printf %s {}", shell_single_quote(original)))
            .output()
            .unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), original);
    }

    // The second escaping pass: the whole control script embedded as the
    // interpreter's -e argument survives shell interpretation intact.
    #[cfg(unix)]
    #[test]
    fn bridge_invocation_round_trips_the_script() {
        let command = terminal_command("/home/o'brien", &[EnvVar::new("FOO", "it's")]);
        let script = control_script(TerminalKind::TerminalApp, &command);
        // Stub interpreter: capture the -e argument instead of running it.
        let invocation = bridge_invocation("printf '%s' --", &script);
        let output = std::process::Command::new("/bin/sh")
            .arg("-c")
            .arg(&invocation)
            .output()
            .unwrap();
        assert!(output.status.success());
        let captured = String::from_utf8_lossy(&output.stdout);
        assert_eq!(captured, format!("---e{script}"));
    }
}
