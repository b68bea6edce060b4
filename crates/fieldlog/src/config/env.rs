//! Environment overrides, captured once at construction.

use std::ffi::OsString;
use std::path::PathBuf;

/// Minimum level override.
pub const LOG_LEVEL: &str = "LOG_LEVEL";
/// Output format override.
pub const LOG_FORMAT: &str = "LOG_FORMAT";
/// Append log output to this file instead of stdout.
pub const LOG_FILE: &str = "LOG_FILE";
/// Any non-empty value disables ANSI colors in console output.
pub const NO_COLOR: &str = "NO_COLOR";

/// Snapshot of the recognized environment variables.
///
/// Empty values count as unset. A level or format that is not valid UTF-8 is
/// kept lossily and then fails validation; a non-UTF-8 `LOG_FILE` is used as
/// is, without `~` expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    pub level: Option<String>,
    pub format: Option<String>,
    pub file: Option<PathBuf>,
    pub no_color: bool,
}

impl Env {
    /// Read the process environment.
    pub fn from_process() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Read variables through `lookup`, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let text = |key: &str| get(key).map(lossy);
        Self {
            level: text(LOG_LEVEL),
            format: text(LOG_FORMAT),
            file: get(LOG_FILE).map(expand_path),
            no_color: get(NO_COLOR).is_some(),
        }
    }
}

fn lossy(value: OsString) -> String {
    value
        .into_string()
        .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
}

fn expand_path(value: OsString) -> PathBuf {
    match value.into_string() {
        Ok(path) => PathBuf::from(shellexpand::tilde(&path).into_owned()),
        Err(raw) => PathBuf::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> Env {
        let map: HashMap<String, OsString> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(*v)))
            .collect();
        Env::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_reads_all_variables() {
        let env = lookup(&[
            (LOG_LEVEL, "warn"),
            (LOG_FORMAT, "console"),
            (LOG_FILE, "/var/log/app.log"),
            (NO_COLOR, "1"),
        ]);
        assert_eq!(env.level.as_deref(), Some("warn"));
        assert_eq!(env.format.as_deref(), Some("console"));
        assert_eq!(env.file, Some(PathBuf::from("/var/log/app.log")));
        assert!(env.no_color);
    }

    #[test]
    fn test_empty_values_are_unset() {
        let env = lookup(&[(LOG_LEVEL, ""), (NO_COLOR, "")]);
        assert_eq!(env, Env::default());
    }

    #[test]
    fn test_tilde_expands_to_home() {
        let env = lookup(&[(LOG_FILE, "~/app.log")]);
        let expected = shellexpand::tilde("~/app.log").into_owned();
        assert_eq!(env.file, Some(PathBuf::from(expected)));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_values() {
        use std::os::unix::ffi::OsStringExt;

        let raw = OsString::from_vec(vec![b'/', b't', b'm', b'p', b'/', 0xff, b'.', b'l']);
        let bad_level = OsString::from_vec(vec![b'w', 0xfe]);
        let env = Env::from_lookup(|key| match key {
            LOG_FILE => Some(raw.clone()),
            LOG_LEVEL => Some(bad_level.clone()),
            _ => None,
        });
        assert_eq!(env.file, Some(PathBuf::from(raw.clone())));
        let level = env.level.unwrap();
        assert!(level.starts_with('w'));
        assert!(level.parse::<crate::types::Level>().is_err());
    }
}
