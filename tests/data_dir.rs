use std::env;
use std::fs;

use tempfile::TempDir;
use wags_tails::paths::{self, ENV_DATA_DIR, ENV_XDG_DATA_DIRS, ENV_XDG_DATA_HOME};
use wags_tails::registry;
use wags_tails::DataSource;
use wags_tails::MondoData;

/// Restores the data-dir variables when dropped, even if an assert fails first.
struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvGuard {
    fn save(keys: &[&'static str]) -> Self {
        Self {
            saved: keys.iter().map(|key| (*key, env::var(key).ok())).collect(),
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }
}

// Environment mutation stays inside one test so nothing runs concurrently with it.
#[test]
fn resolution_follows_environment_precedence() {
    let _env = EnvGuard::save(&[ENV_DATA_DIR, ENV_XDG_DATA_HOME, ENV_XDG_DATA_DIRS]);
    let tmp = TempDir::new().unwrap();

    let explicit = tmp.path().join("explicit");
    env::set_var(ENV_DATA_DIR, &explicit);
    env::set_var(ENV_XDG_DATA_HOME, tmp.path().join("xdg_home"));
    assert_eq!(paths::data_base_dir().unwrap(), explicit);
    assert!(explicit.is_dir());

    let summaries = registry::summaries().unwrap();
    let chembl = summaries.iter().find(|s| s.name == "chembl").unwrap();
    assert_eq!(chembl.data_dir, explicit.join("chembl"));
    assert!(!chembl.data_dir.exists());

    let source = MondoData::new(None, true).unwrap();
    assert_eq!(source.data_dir(), explicit.join("mondo"));
    assert!(explicit.join("mondo").is_dir());

    env::remove_var(ENV_DATA_DIR);
    assert_eq!(
        paths::data_base_dir().unwrap(),
        tmp.path().join("xdg_home").join("wags_tails")
    );

    env::set_var(ENV_XDG_DATA_HOME, "");
    let blocked = tmp.path().join("blocked");
    fs::create_dir_all(&blocked).unwrap();
    fs::write(blocked.join("wags_tails"), "not a directory").unwrap();
    let usable = tmp.path().join("usable");
    env::set_var(
        ENV_XDG_DATA_DIRS,
        format!("{}:{}", blocked.display(), usable.display()),
    );
    assert_eq!(paths::data_base_dir().unwrap(), usable.join("wags_tails"));

    let pinned = tmp.path().join("pinned");
    let source = MondoData::new(Some(pinned.as_path()), true).unwrap();
    assert_eq!(source.data_dir(), pinned);
}

#[test]
fn guard_restores_variables_on_drop() {
    const KEY: &str = "WAGS_TAILS_GUARD_CHECK";
    env::set_var(KEY, "before");
    {
        let _env = EnvGuard::save(&[KEY]);
        env::set_var(KEY, "during");
    }
    assert_eq!(env::var(KEY).unwrap(), "before");
    env::remove_var(KEY);
}
