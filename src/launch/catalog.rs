//! Terminal catalog and automatic resolution.
//!
//! The catalog enumerates the kinds that exist in principle on the running
//! platform and probes which of them are actually installed. Resolution
//! turns an `Automatic` request into one concrete kind using a fixed
//! per-family priority list with a guaranteed fallback.

use crate::domain::{PlatformFamily, TerminalKind};

/// All kinds offered on the given family, in presentation order.
pub fn family_kinds(family: PlatformFamily) -> &'static [TerminalKind] {
    match family {
        PlatformFamily::Windows => &[
            TerminalKind::WindowsTerminal,
            TerminalKind::PowerShell,
            TerminalKind::Cmd,
        ],
        PlatformFamily::Linux => &[
            TerminalKind::GnomeTerminal,
            TerminalKind::Konsole,
            TerminalKind::Xterm,
        ],
        PlatformFamily::MacOs => &[TerminalKind::TerminalApp, TerminalKind::ITerm2],
    }
}

/// Kinds a selection control should offer on this platform, `Automatic` first.
pub fn available_kinds() -> Vec<TerminalKind> {
    let mut kinds = vec![TerminalKind::Automatic];
    if let Some(family) = PlatformFamily::current() {
        kinds.extend_from_slice(family_kinds(family));
    }
    kinds
}

/// Whether a kind can actually be launched right now.
///
/// Built-in shells report available unconditionally. Emulator applications
/// are probed on the executable search path. The macOS kinds are treated as
/// present without a filesystem probe; Terminal.app ships with the OS and
/// launching goes through the scripting bridge either way.
pub fn is_available(kind: TerminalKind) -> bool {
    if kind.family() != PlatformFamily::current() && !kind.is_automatic() {
        return false;
    }
    match kind {
        TerminalKind::Automatic => true,
        TerminalKind::WindowsTerminal => {
            which::which("wt.exe").or_else(|_| which::which("wt")).is_ok()
        }
        TerminalKind::PowerShell | TerminalKind::Cmd => true,
        TerminalKind::GnomeTerminal => which::which("gnome-terminal").is_ok(),
        TerminalKind::Konsole => which::which("konsole").is_ok(),
        TerminalKind::Xterm => which::which("xterm").is_ok(),
        TerminalKind::TerminalApp | TerminalKind::ITerm2 => true,
    }
}

/// The per-family auto-detection priority list. First available wins.
pub(crate) fn auto_priority(family: PlatformFamily) -> &'static [TerminalKind] {
    match family {
        PlatformFamily::Windows => &[TerminalKind::WindowsTerminal],
        PlatformFamily::Linux => &[TerminalKind::GnomeTerminal, TerminalKind::Konsole],
        PlatformFamily::MacOs => &[],
    }
}

/// The kind resolution falls back to when nothing higher-priority is
/// installed. Always launchable without a probe.
pub(crate) fn fallback_kind(family: PlatformFamily) -> TerminalKind {
    match family {
        PlatformFamily::Windows => TerminalKind::Cmd,
        PlatformFamily::Linux => TerminalKind::Xterm,
        PlatformFamily::MacOs => TerminalKind::TerminalApp,
    }
}

/// Resolution over an injected availability probe, separated out so every
/// family is testable on any host.
pub(crate) fn resolve_in(
    family: PlatformFamily,
    probe: impl Fn(TerminalKind) -> bool,
) -> TerminalKind {
    for &kind in auto_priority(family) {
        if probe(kind) {
            return kind;
        }
    }
    fallback_kind(family)
}

/// Resolve `Automatic` to one concrete kind for the running platform.
///
/// Never returns `Automatic` and never fails: when no emulator application
/// is installed the family's built-in fallback is returned. On a platform
/// with no family at all the Linux fallback is reported; the strategy
/// factory rejects such platforms before a launch is attempted.
pub fn resolve_automatic() -> TerminalKind {
    let family = PlatformFamily::current().unwrap_or(PlatformFamily::Linux);
    let kind = resolve_in(family, is_available);
    tracing::debug!(kind = %kind, "resolved automatic terminal");
    kind
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_kinds_starts_with_automatic() {
        let kinds = available_kinds();
        assert_eq!(kinds[0], TerminalKind::Automatic);
    }

    #[test]
    fn available_kinds_stay_in_current_family() {
        for kind in available_kinds().into_iter().skip(1) {
            assert_eq!(kind.family(), PlatformFamily::current());
        }
    }

    #[test]
    fn resolution_never_returns_automatic() {
        for family in [
            PlatformFamily::Windows,
            PlatformFamily::Linux,
            PlatformFamily::MacOs,
        ] {
            let kind = resolve_in(family, |_| false);
            assert!(!kind.is_automatic());
            assert_eq!(kind.family(), Some(family));
        }
    }

    #[test]
    fn resolution_prefers_priority_order() {
        let kind = resolve_in(PlatformFamily::Linux, |_| true);
        assert_eq!(kind, TerminalKind::GnomeTerminal);

        let kind = resolve_in(PlatformFamily::Linux, |k| k == TerminalKind::Konsole);
        assert_eq!(kind, TerminalKind::Konsole);
    }

    #[test]
    fn fallbacks_are_builtin() {
        assert_eq!(fallback_kind(PlatformFamily::Windows), TerminalKind::Cmd);
        assert_eq!(fallback_kind(PlatformFamily::Linux), TerminalKind::Xterm);
        assert_eq!(
            fallback_kind(PlatformFamily::MacOs),
            TerminalKind::TerminalApp
        );
    }

    #[test]
    fn resolve_automatic_is_concrete() {
        assert!(!resolve_automatic().is_automatic());
    }
}
