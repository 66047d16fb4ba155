//! End-to-end launch scenarios through the public façade.
//!
//! The success path needs a real terminal emulator on PATH and is skipped
//! where none is installed; the failure paths are deterministic everywhere
//! the fork strategy runs.

use termprof::launch::resolve_automatic;

#[test]
fn automatic_resolution_is_always_concrete() {
    assert!(!resolve_automatic().is_automatic());
}

#[cfg(target_os = "linux")]
mod linux {
    use termprof::domain::{EnvVar, Profile, TerminalKind};
    use termprof::launch::{is_available, LaunchError, Launcher};

    #[test]
    fn nonexistent_directory_fails_before_exec() {
        let mut profile = Profile::named("broken");
        profile.working_directory = "/tmp/termprof-test-does-not-exist".to_string();
        profile.terminal = TerminalKind::Xterm;

        let err = Launcher::launch(&profile).unwrap_err();
        match err {
            LaunchError::DirectoryChange { errno } => assert_eq!(errno, libc::ENOENT),
            other => panic!("expected a directory-change failure, got {other}"),
        }
    }

    #[test]
    fn missing_emulator_reports_exec_failure() {
        if is_available(TerminalKind::Konsole) {
            return; // can only provoke the failure when konsole is absent
        }
        let mut profile = Profile::named("no konsole");
        profile.terminal = TerminalKind::Konsole;

        let err = Launcher::launch(&profile).unwrap_err();
        assert!(matches!(err, LaunchError::Exec { .. }));
    }

    #[test]
    fn xterm_with_overrides_launches() {
        if !is_available(TerminalKind::Xterm) {
            return; // no emulator in this environment
        }
        let mut profile = Profile::named("smoke");
        profile.terminal = TerminalKind::Xterm;
        profile.environment = vec![EnvVar::new("FOO", "bar")];

        Launcher::launch(&profile).unwrap();
    }

    #[tokio::test]
    async fn detached_launch_surfaces_the_same_failure() {
        let mut profile = Profile::named("broken");
        profile.working_directory = "/tmp/termprof-test-does-not-exist".to_string();
        profile.terminal = TerminalKind::Xterm;

        let err = Launcher::launch_detached(profile).await.unwrap_err();
        assert!(matches!(err, LaunchError::DirectoryChange { .. }));
    }
}
