//! Data directory resolution.
//!
//! Follows the XDG Base Directory layout unless a directory is given explicitly:
//!
//! 1. `$WAGS_TAILS_DIR`
//! 2. `$XDG_DATA_HOME/wags_tails`
//! 3. first usable entry of `$XDG_DATA_DIRS`, joined with `wags_tails`
//! 4. `~/.local/share/wags_tails`

use crate::error::{Error, Result};
use crate::utils::io;
use std::env;
use std::path::{Path, PathBuf};

pub const ENV_DATA_DIR: &str = "WAGS_TAILS_DIR";
pub const ENV_XDG_DATA_HOME: &str = "XDG_DATA_HOME";
pub const ENV_XDG_DATA_DIRS: &str = "XDG_DATA_DIRS";

/// Directory name used under XDG locations and `~/.local/share`.
pub const APP_DIR_NAME: &str = "wags_tails";

/// Base data directory, created if missing.
pub fn data_base_dir() -> Result<PathBuf> {
    let base = resolve_data_base(|key| env::var(key).ok())?;
    io::ensure_dir(&base, "create data base directory")?;
    Ok(base)
}

/// Data directory for one source, created if missing.
///
/// An explicit directory wins over everything in the environment.
pub fn source_data_dir(source: &str, explicit: Option<&Path>) -> Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir.to_path_buf(),
        None => data_base_dir()?.join(source),
    };
    io::ensure_dir(&dir, "create source data directory")?;
    Ok(dir)
}

/// Expand `~` and `$VAR` references in a user-supplied path.
pub fn expand(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
    }
}

/// Pure resolution step, parameterized over the environment lookup.
pub(crate) fn resolve_data_base<F>(lookup: F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(dir) = var(ENV_DATA_DIR) {
        return Ok(expand(&dir));
    }

    if let Some(dir) = var(ENV_XDG_DATA_HOME) {
        return Ok(PathBuf::from(dir).join(APP_DIR_NAME));
    }

    if let Some(dirs) = var(ENV_XDG_DATA_DIRS) {
        let usable = dirs
            .split(':')
            .filter(|entry| !entry.is_empty())
            .map(|entry| PathBuf::from(entry).join(APP_DIR_NAME))
            .find(|candidate| !candidate.is_file());
        if let Some(dir) = usable {
            return Ok(dir);
        }
    }

    Ok(home_dir(&lookup)?
        .join(".local")
        .join("share")
        .join(APP_DIR_NAME))
}

fn home_dir<F>(lookup: &F) -> Result<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    #[cfg(windows)]
    let key = "USERPROFILE";
    #[cfg(not(windows))]
    let key = "HOME";

    lookup(key).map(PathBuf::from).ok_or_else(|| {
        Error::internal_unexpected(format!(
            "{} environment variable not set; set {} to choose a data directory",
            key, ENV_DATA_DIR
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn explicit_env_dir_wins() {
        let lookup = env_of(&[
            ("WAGS_TAILS_DIR", "/data/wt"),
            ("XDG_DATA_HOME", "/xdg/home"),
            ("HOME", "/home/u"),
        ]);
        assert_eq!(resolve_data_base(lookup).unwrap(), PathBuf::from("/data/wt"));
    }

    #[test]
    fn xdg_data_home_beats_data_dirs() {
        let lookup = env_of(&[
            ("XDG_DATA_HOME", "/xdg/home"),
            ("XDG_DATA_DIRS", "/xdg/a:/xdg/b"),
            ("HOME", "/home/u"),
        ]);
        assert_eq!(
            resolve_data_base(lookup).unwrap(),
            PathBuf::from("/xdg/home/wags_tails")
        );
    }

    #[test]
    fn xdg_data_dirs_skips_entries_occupied_by_files() {
        let tmp = TempDir::new().unwrap();
        let blocked = tmp.path().join("blocked");
        fs::create_dir_all(&blocked).unwrap();
        fs::write(blocked.join(APP_DIR_NAME), "not a dir").unwrap();
        let open = tmp.path().join("open");

        let dirs = format!("{}:{}", blocked.display(), open.display());
        let lookup = env_of(&[("XDG_DATA_DIRS", dirs.as_str()), ("HOME", "/home/u")]);

        assert_eq!(resolve_data_base(lookup).unwrap(), open.join(APP_DIR_NAME));
    }

    #[test]
    fn falls_back_to_home_when_all_data_dirs_blocked() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(APP_DIR_NAME), "file").unwrap();

        let dirs = tmp.path().display().to_string();
        let lookup = env_of(&[("XDG_DATA_DIRS", dirs.as_str()), ("HOME", "/home/u")]);

        assert_eq!(
            resolve_data_base(lookup).unwrap(),
            PathBuf::from("/home/u/.local/share/wags_tails")
        );
    }

    #[test]
    fn empty_values_count_as_unset() {
        let lookup = env_of(&[("WAGS_TAILS_DIR", ""), ("XDG_DATA_HOME", "  "), ("HOME", "/h")]);
        assert_eq!(
            resolve_data_base(lookup).unwrap(),
            PathBuf::from("/h/.local/share/wags_tails")
        );
    }

    #[test]
    fn missing_home_is_an_error() {
        let err = resolve_data_base(env_of(&[])).unwrap_err();
        assert_eq!(err.code.as_str(), "internal.unexpected");
    }

    #[test]
    fn explicit_source_dir_is_created() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("custom").join("mondo");

        let resolved = source_data_dir("mondo", Some(dir.as_path())).unwrap();
        assert_eq!(resolved, dir);
        assert!(dir.is_dir());

        // again, now that it exists
        assert_eq!(source_data_dir("mondo", Some(dir.as_path())).unwrap(), dir);
    }
}
