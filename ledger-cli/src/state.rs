use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub const HOME_ENV: &str = "LEDGERLITE_HOME";

/// `$LEDGERLITE_HOME`, else `~/.ledgerlite`.
pub fn ledgerlite_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".ledgerlite"))
}

pub fn ensure_ledgerlite_home() -> Result<PathBuf> {
    let dir = ledgerlite_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ledgerlite_home()?.join("config.toml"))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(ensure_ledgerlite_home()?.join("ledgerlite.log"))
}
