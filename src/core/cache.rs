//! Filesystem locations and helpers.
//!
//! Session files live under the platform config dir, fetched data under the
//! platform cache dir, both in a `velo-pronos` subdirectory.

use std::{
    fs,
    io::{Read, Write},
    path::{Path, PathBuf},
};

const APP_DIR: &str = "velo-pronos";

fn config_base() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".config");
        home
    });
    base.join(APP_DIR)
}

fn cache_base() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join(APP_DIR)
}

/// Path: `<config>/velo-pronos/auth_token`
pub fn token_path() -> PathBuf {
    config_base().join("auth_token")
}

/// Path: `<config>/velo-pronos/session_cookie` — the route guard's side
/// channel, written on login alongside the token.
pub fn cookie_path() -> PathBuf {
    config_base().join("session_cookie")
}

/// Path: `<cache>/velo-pronos/pronos.db`
pub fn database_path() -> PathBuf {
    cache_base().join("pronos.db")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file, creating parent directories as needed
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}
