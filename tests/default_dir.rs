//! Touches the real user data directory, so it only runs with `WAGS_TAILS_TEST_ENV=true`.

use std::env;
use std::path::PathBuf;

use wags_tails::paths::{self, ENV_DATA_DIR, ENV_XDG_DATA_DIRS, ENV_XDG_DATA_HOME};

fn test_env_enabled() -> bool {
    env::var("WAGS_TAILS_TEST_ENV").is_ok_and(|v| v.eq_ignore_ascii_case("true"))
}

#[test]
fn default_directory_under_home() {
    if !test_env_enabled() {
        return;
    }
    if [ENV_DATA_DIR, ENV_XDG_DATA_HOME, ENV_XDG_DATA_DIRS]
        .iter()
        .any(|key| env::var(key).is_ok_and(|v| !v.is_empty()))
    {
        return;
    }

    let home = env::var("HOME").map(PathBuf::from).unwrap();
    let expected = home.join(".local").join("share").join("wags_tails");
    assert_eq!(paths::data_base_dir().unwrap(), expected);
    assert!(expected.is_dir());
}
