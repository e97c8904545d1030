use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::onboard::{OnboardDecision, SetupState, decide_next_step};
use crate::state::{config_path, ensure_ledgerlite_home};

pub const URL_PLACEHOLDER: &str = "YOUR_SUPABASE_PROJECT_URL";
pub const KEY_PLACEHOLDER: &str = "YOUR_SUPABASE_ANON_KEY";

pub const URL_ENV: &str = "LEDGERLITE_SUPABASE_URL";
pub const KEY_ENV: &str = "LEDGERLITE_SUPABASE_ANON_KEY";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub supabase: SupabaseSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupabaseSection {
    /// Project URL, e.g. https://xyzcompany.supabase.co
    #[serde(default)]
    pub url: String,
    /// Public anon key
    #[serde(default)]
    pub anon_key: String,
}

impl Default for SupabaseSection {
    fn default() -> Self {
        Self {
            url: URL_PLACEHOLDER.to_string(),
            anon_key: KEY_PLACEHOLDER.to_string(),
        }
    }
}

impl SupabaseSection {
    /// The URL, unless blank or still the template placeholder.
    pub fn url(&self) -> Option<&str> {
        present(&self.url, URL_PLACEHOLDER)
    }

    pub fn anon_key(&self) -> Option<&str> {
        present(&self.anon_key, KEY_PLACEHOLDER)
    }

    pub fn setup_state(&self) -> SetupState {
        SetupState {
            has_url: self.url().is_some(),
            has_key: self.anon_key().is_some(),
        }
    }
}

fn present<'a>(value: &'a str, placeholder: &str) -> Option<&'a str> {
    let v = value.trim();
    if v.is_empty() || v == placeholder {
        None
    } else {
        Some(v)
    }
}

/// Outcome of reading the connection settings.
#[derive(Debug, Clone, PartialEq)]
pub enum Connection {
    Ready { url: String, anon_key: String },
    /// Show onboarding instead of the ledger; make no network calls.
    SetupRequired(OnboardDecision),
}

pub fn resolve_connection(cfg: &Config) -> Connection {
    match (cfg.supabase.url(), cfg.supabase.anon_key()) {
        (Some(url), Some(anon_key)) => Connection::Ready {
            url: url.to_string(),
            anon_key: anon_key.to_string(),
        },
        _ => Connection::SetupRequired(decide_next_step(&cfg.supabase.setup_state())),
    }
}

/// Environment variables win over the file. Blank values are ignored.
pub fn with_env_overrides<F>(mut cfg: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(URL_ENV).filter(|v| !v.trim().is_empty()) {
        cfg.supabase.url = url;
    }
    if let Some(key) = lookup(KEY_ENV).filter(|v| !v.trim().is_empty()) {
        cfg.supabase.anon_key = key;
    }
    cfg
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

/// File config with environment overrides applied.
pub fn load_effective_config() -> Result<Config> {
    Ok(with_env_overrides(load_config()?, |k| std::env::var(k).ok()))
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn save_config(cfg: &Config) -> Result<PathBuf> {
    ensure_ledgerlite_home()?;
    let p = config_path()?;
    save_config_to(cfg, &p)?;
    Ok(p)
}

/// Write the placeholder template unless a config already exists.
pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    let p = save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    println!("Edit it, or run: ledgerlite setup");
    Ok(())
}
