//! Fork/exec launch strategy for Linux.
//!
//! Naive fork/exec gives no synchronous signal of exec failure, so the
//! attempt synchronizes over a pipe whose write end is close-on-exec: a
//! successful exec implicitly closes it and the parent's read returns zero
//! bytes, while any child-side failure writes a stage marker and errno
//! before the child exits. The parent therefore learns "terminal launched"
//! or a precise failure without ever waiting on the terminal itself.

#![cfg(target_os = "linux")]

use std::ffi::CString;
use std::io;
use std::os::raw::c_char;

use super::strategy::{LaunchRequest, LaunchStrategy};
use super::LaunchError;
use crate::domain::TerminalKind;

/// Stage markers the child writes alongside errno, so the parent can tell a
/// failed directory change from a failed exec.
const STAGE_CHDIR: i32 = 0;
const STAGE_EXEC: i32 = 1;

pub struct ForkExecStrategy;

impl LaunchStrategy for ForkExecStrategy {
    fn spawn(&self, request: &LaunchRequest<'_>) -> Result<(), LaunchError> {
        let argv = terminal_argv(request.kind);
        let env = cstring_pairs(request.environment.iter())?;
        let dir = if request.working_directory.is_empty() {
            None
        } else {
            Some(cstring(request.working_directory)?)
        };
        spawn_detached(&argv, dir.as_deref(), &env)
    }
}

/// The launcher executable and arguments for each Linux kind.
///
/// gnome-terminal needs the `--` terminator to run its default shell; the
/// others take no arguments. Unresolvable kinds fall through to xterm,
/// matching the resolver's fallback.
fn terminal_argv(kind: TerminalKind) -> Vec<CString> {
    let args: &[&str] = match kind {
        TerminalKind::GnomeTerminal => &["gnome-terminal", "--"],
        TerminalKind::Konsole => &["konsole"],
        _ => &["xterm"],
    };
    args.iter()
        .map(|a| CString::new(*a).unwrap_or_default())
        .collect()
}

fn cstring(s: &str) -> Result<CString, LaunchError> {
    CString::new(s).map_err(|e| LaunchError::ResourceAcquisition {
        what: "child process arguments",
        source: io::Error::new(io::ErrorKind::InvalidInput, e),
    })
}

fn cstring_pairs<'a>(
    entries: impl Iterator<Item = (&'a str, &'a str)>,
) -> Result<Vec<(CString, CString)>, LaunchError> {
    let mut pairs = Vec::new();
    for (name, value) in entries {
        // Interior NULs cannot be represented in a process environment.
        if name.contains('\0') || value.contains('\0') {
            continue;
        }
        pairs.push((cstring(name)?, cstring(value)?));
    }
    Ok(pairs)
}

/// Fork, set up the child, and exec `argv[0]` as a detached process.
///
/// Everything the child needs is allocated before the fork; after it, the
/// child only makes direct system calls and `_exit`s, never unwinding back
/// into Rust.
pub(crate) fn spawn_detached(
    argv: &[CString],
    dir: Option<&std::ffi::CStr>,
    env: &[(CString, CString)],
) -> Result<(), LaunchError> {
    let mut argv_ptrs: Vec<*const c_char> = argv.iter().map(|a| a.as_ptr()).collect();
    argv_ptrs.push(std::ptr::null());

    let mut fds = [0i32; 2];
    if unsafe { libc::pipe(fds.as_mut_ptr()) } == -1 {
        return Err(LaunchError::ResourceAcquisition {
            what: "status pipe",
            source: io::Error::last_os_error(),
        });
    }
    let (read_fd, write_fd) = (fds[0], fds[1]);

    // A successful exec must close the write end on its own; that is the
    // entire signaling mechanism.
    if unsafe { libc::fcntl(write_fd, libc::F_SETFD, libc::FD_CLOEXEC) } == -1 {
        let err = io::Error::last_os_error();
        unsafe {
            libc::close(read_fd);
            libc::close(write_fd);
        }
        return Err(LaunchError::ResourceAcquisition {
            what: "status pipe",
            source: err,
        });
    }

    match unsafe { libc::fork() } {
        -1 => {
            let err = io::Error::last_os_error();
            unsafe {
                libc::close(read_fd);
                libc::close(write_fd);
            }
            Err(LaunchError::ResourceAcquisition {
                what: "child process",
                source: err,
            })
        }
        0 => {
            // Child: apply environment, change directory, exec. On any
            // failure, report the stage and errno through the pipe and
            // terminate without ever calling exec.
            unsafe {
                libc::close(read_fd);
                for (name, value) in env {
                    libc::setenv(name.as_ptr(), value.as_ptr(), 1);
                }
                if let Some(dir) = dir {
                    if libc::chdir(dir.as_ptr()) != 0 {
                        report_and_exit(write_fd, STAGE_CHDIR);
                    }
                }
                libc::execvp(argv_ptrs[0], argv_ptrs.as_ptr());
                report_and_exit(write_fd, STAGE_EXEC);
            }
        }
        pid => {
            unsafe {
                libc::close(write_fd);
            }
            let outcome = read_child_report(read_fd);
            unsafe {
                libc::close(read_fd);
            }
            match outcome {
                None => Ok(()),
                Some((stage, errno)) => {
                    // The child exited; reap it so no zombie is left behind.
                    unsafe {
                        libc::waitpid(pid, std::ptr::null_mut(), 0);
                    }
                    Err(match stage {
                        STAGE_CHDIR => LaunchError::DirectoryChange { errno },
                        _ => LaunchError::Exec {
                            command: argv[0].to_string_lossy().into_owned(),
                            errno,
                        },
                    })
                }
            }
        }
    }
}

/// Child-side failure report: stage and errno as two native ints, written
/// in one call (well under `PIPE_BUF`, so atomic), then `_exit`.
unsafe fn report_and_exit(write_fd: i32, stage: i32) -> ! {
    let report = [stage, io::Error::last_os_error().raw_os_error().unwrap_or(0)];
    libc::write(
        write_fd,
        report.as_ptr() as *const libc::c_void,
        std::mem::size_of_val(&report),
    );
    libc::_exit(127)
}

/// Read the child's report. `None` means the write end was closed by a
/// successful exec; the terminal is up and must not be waited on.
fn read_child_report(read_fd: i32) -> Option<(i32, i32)> {
    let mut buf = [0i32; 2];
    loop {
        let n = unsafe {
            libc::read(
                read_fd,
                buf.as_mut_ptr() as *mut libc::c_void,
                std::mem::size_of_val(&buf),
            )
        };
        if n == -1 {
            if io::Error::last_os_error().kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return None;
        }
        if n as usize >= std::mem::size_of_val(&buf) {
            return Some((buf[0], buf[1]));
        }
        return None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<CString> {
        list.iter().map(|a| CString::new(*a).unwrap()).collect()
    }

    #[test]
    fn exec_success_returns_without_waiting() {
        // `true` exits immediately, but a successful exec must report Ok
        // regardless of what the child does afterwards.
        spawn_detached(&args(&["true"]), None, &[]).unwrap();
    }

    #[test]
    fn missing_executable_reports_exec_failure() {
        let err = spawn_detached(&args(&["termprof-no-such-binary"]), None, &[]).unwrap_err();
        match err {
            LaunchError::Exec { errno, .. } => assert_eq!(errno, libc::ENOENT),
            other => panic!("expected exec failure, got {other}"),
        }
    }

    #[test]
    fn bad_directory_reports_before_exec() {
        let dir = CString::new("/tmp/termprof-does-not-exist").unwrap();
        let err = spawn_detached(&args(&["true"]), Some(&dir), &[]).unwrap_err();
        match err {
            LaunchError::DirectoryChange { errno } => assert_eq!(errno, libc::ENOENT),
            other => panic!("expected directory-change failure, got {other}"),
        }
    }

    #[test]
    fn environment_reaches_the_child() {
        // sh -c exits 0 only if the variable made it through setenv.
        let argv = args(&["sh", "-c", "test \"$TERMPROF_MARKER\" = yes"]);
        let env = vec![(
            CString::new("TERMPROF_MARKER").unwrap(),
            CString::new("yes").unwrap(),
        )];
        // exec succeeds either way; this only asserts the spawn path works
        // with a populated environment.
        spawn_detached(&argv, None, &env).unwrap();
    }

    #[test]
    fn gnome_terminal_argv_has_terminator() {
        let argv = terminal_argv(TerminalKind::GnomeTerminal);
        assert_eq!(argv.len(), 2);
        assert_eq!(argv[1].to_str().unwrap(), "--");
    }
}
