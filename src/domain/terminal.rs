//! Terminal kinds and platform families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The platform families termprof knows how to launch terminals on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    Windows,
    Linux,
    MacOs,
}

impl PlatformFamily {
    /// The family of the running platform, or `None` on anything else.
    pub fn current() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(PlatformFamily::Windows)
        } else if cfg!(target_os = "linux") {
            Some(PlatformFamily::Linux)
        } else if cfg!(target_os = "macos") {
            Some(PlatformFamily::MacOs)
        } else {
            None
        }
    }
}

/// One concrete terminal emulator/shell choice, or `Automatic` ("pick for me").
///
/// The enumeration is closed: every kind exists on every platform so that a
/// profile written on one machine still round-trips through the store on
/// another. Only kinds belonging to the running platform's family are ever
/// resolved or reported as available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalKind {
    /// Auto-detect the best terminal for the current platform.
    #[default]
    Automatic,
    // Windows
    WindowsTerminal,
    PowerShell,
    Cmd,
    // Linux
    GnomeTerminal,
    Konsole,
    Xterm,
    // macOS
    TerminalApp,
    ITerm2,
}

impl TerminalKind {
    /// The short tag used in the JSON store and on the command line.
    pub fn tag(&self) -> &'static str {
        match self {
            TerminalKind::Automatic => "auto",
            TerminalKind::WindowsTerminal => "wt",
            TerminalKind::PowerShell => "powershell",
            TerminalKind::Cmd => "cmd",
            TerminalKind::GnomeTerminal => "gnome-terminal",
            TerminalKind::Konsole => "konsole",
            TerminalKind::Xterm => "xterm",
            TerminalKind::TerminalApp => "terminal.app",
            TerminalKind::ITerm2 => "iterm2",
        }
    }

    /// Parse a stored tag, falling back to `Automatic` for anything unknown.
    ///
    /// Lenient on purpose: a store written by a newer version must still load,
    /// and an unrecognized kind degrades to auto-detection.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "wt" => TerminalKind::WindowsTerminal,
            "powershell" => TerminalKind::PowerShell,
            "cmd" => TerminalKind::Cmd,
            "gnome-terminal" => TerminalKind::GnomeTerminal,
            "konsole" => TerminalKind::Konsole,
            "xterm" => TerminalKind::Xterm,
            "terminal.app" => TerminalKind::TerminalApp,
            "iterm2" => TerminalKind::ITerm2,
            _ => TerminalKind::Automatic,
        }
    }

    /// Human-readable name for listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            TerminalKind::Automatic => "Automatic",
            TerminalKind::WindowsTerminal => "Windows Terminal",
            TerminalKind::PowerShell => "PowerShell",
            TerminalKind::Cmd => "CMD",
            TerminalKind::GnomeTerminal => "GNOME Terminal",
            TerminalKind::Konsole => "Konsole",
            TerminalKind::Xterm => "XTerm",
            TerminalKind::TerminalApp => "Terminal.app",
            TerminalKind::ITerm2 => "iTerm2",
        }
    }

    /// The family a concrete kind belongs to; `None` for `Automatic`.
    pub fn family(&self) -> Option<PlatformFamily> {
        match self {
            TerminalKind::Automatic => None,
            TerminalKind::WindowsTerminal | TerminalKind::PowerShell | TerminalKind::Cmd => {
                Some(PlatformFamily::Windows)
            }
            TerminalKind::GnomeTerminal | TerminalKind::Konsole | TerminalKind::Xterm => {
                Some(PlatformFamily::Linux)
            }
            TerminalKind::TerminalApp | TerminalKind::ITerm2 => Some(PlatformFamily::MacOs),
        }
    }

    pub fn is_automatic(&self) -> bool {
        matches!(self, TerminalKind::Automatic)
    }
}

impl fmt::Display for TerminalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Strict parser for user input; unknown tags are an error here, unlike
/// [`TerminalKind::from_tag`] which the store uses.
impl FromStr for TerminalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = TerminalKind::from_tag(s);
        if kind == TerminalKind::Automatic && s != "auto" {
            return Err(format!(
                "unknown terminal kind '{s}' (expected one of: auto, wt, powershell, cmd, \
                 gnome-terminal, konsole, xterm, terminal.app, iterm2)"
            ));
        }
        Ok(kind)
    }
}

impl Serialize for TerminalKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for TerminalKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(TerminalKind::from_tag(&tag))
    }
}
