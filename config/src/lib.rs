//! Configuration for OneirVision.
//!
//! Two layers:
//!
//! - [`load_and_apply`] merges XDG `config.toml` and a project `.env` into the process
//!   environment with priority **existing env > .env > XDG**.
//! - [`Settings`] reads the typed values (API keys, models, bind address, limits) from the
//!   environment once it has been populated.

mod dotenv;
mod settings;
mod xdg_toml;

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

pub use settings::{ImageProvider, LlmProvider, Settings};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Loads `$XDG_CONFIG_HOME/<app_name>/config.toml` (`[env]` table) and `.env`, then sets every
/// key that is **not** already present in the process environment.
///
/// * `app_name`: directory name under the XDG config home, e.g. `"oneirvision"`.
/// * `override_dir`: where to look for `.env`; defaults to the current directory.
///
/// Returns the keys that were applied.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<Vec<String>, LoadError> {
    let xdg = xdg_toml::load_env_map(app_name)?;
    let dotenv = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    let keys: HashSet<&String> = xdg.keys().chain(dotenv.keys()).collect();
    let mut applied = Vec::new();
    for key in keys {
        if std::env::var_os(key).is_some() {
            continue;
        }
        if let Some(value) = dotenv.get(key).or_else(|| xdg.get(key)) {
            std::env::set_var(key, value);
            applied.push(key.clone());
        }
    }
    applied.sort();
    Ok(applied)
}

/// Serialises tests that touch `XDG_CONFIG_HOME` or other shared env vars.
#[cfg(test)]
pub(crate) static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
