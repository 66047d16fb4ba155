//! Environment composition.
//!
//! The composer merges a snapshot of the ambient process environment with a
//! profile's overrides. The snapshot is injected by the caller rather than
//! read here, which keeps composition pure and testable without touching
//! real process state.
//!
//! Name-comparison semantics differ per platform and are part of the
//! contract, not an implementation detail: Windows variable names are
//! case-insensitive (and an override's casing wins over the ambient one),
//! POSIX names are case-sensitive.

use crate::domain::EnvVar;

/// How variable names are compared when an override replaces an ambient entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameComparison {
    CaseSensitive,
    CaseInsensitive,
}

impl NameComparison {
    /// The comparison rule of the running platform.
    pub fn native() -> Self {
        if cfg!(target_os = "windows") {
            NameComparison::CaseInsensitive
        } else {
            NameComparison::CaseSensitive
        }
    }
}

/// The final name→value mapping handed to the launched process.
///
/// Entry order is not significant to callers; the Windows strategy sorts
/// when it serializes the native environment block.
#[derive(Debug, Clone, Default)]
pub struct ComposedEnvironment {
    entries: Vec<(String, String)>,
}

impl ComposedEnvironment {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Merge the ambient snapshot with profile overrides.
///
/// Overrides with an empty trimmed name are ignored. This function cannot
/// fail; an empty snapshot degrades to a pure-override map.
///
/// Under [`NameComparison::CaseInsensitive`] an override replaces an ambient
/// entry regardless of letter case, and the replacement carries the
/// override's casing, so the old entry is removed before the new one is
/// inserted rather than updated in place.
pub fn compose(
    snapshot: impl IntoIterator<Item = (String, String)>,
    overrides: &[EnvVar],
    comparison: NameComparison,
) -> ComposedEnvironment {
    let mut entries: Vec<(String, String)> = snapshot.into_iter().collect();

    for var in overrides {
        if var.name.trim().is_empty() {
            continue;
        }
        match comparison {
            NameComparison::CaseSensitive => {
                if let Some(entry) = entries.iter_mut().find(|(n, _)| *n == var.name) {
                    entry.1 = var.value.clone();
                } else {
                    entries.push((var.name.clone(), var.value.clone()));
                }
            }
            NameComparison::CaseInsensitive => {
                entries.retain(|(n, _)| !n.eq_ignore_ascii_case(&var.name));
                entries.push((var.name.clone(), var.value.clone()));
            }
        }
    }

    ComposedEnvironment { entries }
}

/// Serialize a composed environment as a native Windows environment block:
/// UTF-16 `NAME=value\0` entries, double-NUL terminated.
///
/// Entries are sorted by name, case-insensitively. The sort order is an
/// OS-documented requirement for `CreateProcessW`'s `lpEnvironment`, which
/// also makes the block independent of merge order. Kept free of `cfg`
/// gates so the property is testable on any host.
pub fn environment_block(env: &ComposedEnvironment) -> Vec<u16> {
    let mut entries: Vec<(&str, &str)> = env.iter().collect();
    entries.sort_by(|a, b| a.0.to_uppercase().cmp(&b.0.to_uppercase()));

    let mut block: Vec<u16> = Vec::new();
    for (name, value) in entries {
        block.extend(name.encode_utf16());
        block.push(u16::from(b'='));
        block.extend(value.encode_utf16());
        block.push(0);
    }
    block.push(0);
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_snapshot_yields_pure_override_map() {
        let env = compose(
            Vec::new(),
            &[EnvVar::new("FOO", "bar")],
            NameComparison::CaseSensitive,
        );
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("FOO"), Some("bar"));
    }

    #[test]
    fn blank_names_are_ignored() {
        let env = compose(
            Vec::new(),
            &[EnvVar::new("  ", "x"), EnvVar::new("", "y")],
            NameComparison::CaseSensitive,
        );
        assert!(env.is_empty());
    }

    #[test]
    fn case_insensitive_merge_keeps_override_casing() {
        let env = compose(
            snapshot(&[("Path", "/y")]),
            &[EnvVar::new("PATH", "/x")],
            NameComparison::CaseInsensitive,
        );
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("PATH"), Some("/x"));
        assert_eq!(env.get("Path"), None);
    }

    #[test]
    fn case_sensitive_merge_keeps_both_keys() {
        let env = compose(
            snapshot(&[("Path", "/y")]),
            &[EnvVar::new("PATH", "/x")],
            NameComparison::CaseSensitive,
        );
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("Path"), Some("/y"));
        assert_eq!(env.get("PATH"), Some("/x"));
    }

    #[test]
    fn case_sensitive_overwrite_in_place() {
        let env = compose(
            snapshot(&[("HOME", "/old")]),
            &[EnvVar::new("HOME", "/new")],
            NameComparison::CaseSensitive,
        );
        assert_eq!(env.len(), 1);
        assert_eq!(env.get("HOME"), Some("/new"));
    }

    #[test]
    fn block_is_sorted_regardless_of_merge_order() {
        let a = compose(
            snapshot(&[("B", "2"), ("a", "1")]),
            &[],
            NameComparison::CaseInsensitive,
        );
        let b = compose(
            snapshot(&[("a", "1"), ("B", "2")]),
            &[],
            NameComparison::CaseInsensitive,
        );
        assert_eq!(environment_block(&a), environment_block(&b));
    }

    #[test]
    fn block_layout_is_double_nul_terminated() {
        let env = compose(
            snapshot(&[("A", "1")]),
            &[],
            NameComparison::CaseInsensitive,
        );
        let block = environment_block(&env);
        let expected: Vec<u16> = "A=1"
            .encode_utf16()
            .chain([0, 0])
            .collect();
        assert_eq!(block, expected);
    }
}
