//! CLI-owned configuration: a small TOML file plus env/flag overrides.
//!
//! Core never sees these types -- it receives a pre-built `ClientConfig`.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use stocklet_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── TOML config struct ───────────────────────────────────────────────

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// API root URL, e.g. "http://127.0.0.1:8000".
    pub api_url: String,

    /// Where the token pair is persisted. Defaults to the platform data
    /// directory when unset.
    pub session_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000".into(),
            session_file: None,
        }
    }
}

// ── Paths ────────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "stocklet", "stocklet")
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| home_fallback(".config").join("config.toml"))
}

/// Default location for the persisted session.
pub fn default_session_file() -> PathBuf {
    project_dirs()
        .map(|dirs| dirs.data_dir().join("session.toml"))
        .unwrap_or_else(|| home_fallback(".local/share").join("session.toml"))
}

fn home_fallback(subdir: &str) -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(subdir);
    p.push("stocklet");
    p
}

// ── Config loading ───────────────────────────────────────────────────

/// Load the config from defaults, the TOML file, and `STOCKLET_*` env
/// vars, in increasing priority.
pub fn load_config() -> Result<Config, CliError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(config_path()))
        .merge(Env::prefixed("STOCKLET_"));

    Ok(figment.extract()?)
}

/// Translate the loaded config plus global flags into a `ClientConfig`.
/// The --api-url flag (and its env var, via clap) beats the file.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config()?;
    let url_str = global.api_url.as_deref().unwrap_or(&cfg.api_url);
    let base_url: Url = url_str.parse().map_err(|_| CliError::Validation {
        field: "api-url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let session_file = cfg.session_file.unwrap_or_else(default_session_file);
    Ok(ClientConfig::new(base_url).with_session_file(session_file))
}
