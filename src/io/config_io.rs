use std::fs;
use std::path::{Path, PathBuf};

use crate::model::ClientConfig;

pub const ENV_CONFIG: &str = "APIN_CONFIG";
pub const ENV_BASE_URL: &str = "APIN_BASE_URL";
pub const ENV_TOKEN: &str = "APIN_TOKEN";
pub const ENV_USER_ID: &str = "APIN_USER_ID";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not resolve home directory from HOME or USERPROFILE")]
    NoHomeDir,
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Environment lookup; swapped out in tests
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Process environment, ignoring unset and blank variables
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn resolve_home_dir(env: EnvLookup) -> Option<PathBuf> {
    env("HOME").or_else(|| env("USERPROFILE")).map(PathBuf::from)
}

/// `~/.config/apin/config.toml`, respecting XDG_CONFIG_HOME
pub fn default_config_path(env: EnvLookup) -> Result<PathBuf, ConfigError> {
    let config_dir = match env("XDG_CONFIG_HOME") {
        Some(dir) => PathBuf::from(dir),
        None => resolve_home_dir(env)
            .ok_or(ConfigError::NoHomeDir)?
            .join(".config"),
    };
    Ok(config_dir.join("apin").join("config.toml"))
}

/// Which file to read: `-c` wins over `APIN_CONFIG`, which wins over the default
pub fn config_path(explicit: Option<&Path>, env: EnvLookup) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match env(ENV_CONFIG) {
        Some(path) => Ok(PathBuf::from(path)),
        None => default_config_path(env),
    }
}

/// Read a config file. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<ClientConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(ClientConfig::default());
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// `APIN_BASE_URL`, `APIN_TOKEN` and `APIN_USER_ID` take precedence over the file
pub fn apply_env_overrides(config: &mut ClientConfig, env: EnvLookup) {
    if let Some(url) = env(ENV_BASE_URL) {
        config.server.base_url = url;
    }
    if let Some(token) = env(ENV_TOKEN) {
        config.credentials.token = Some(token);
    }
    if let Some(user_id) = env(ENV_USER_ID) {
        config.credentials.user_id = Some(user_id);
    }
}

/// Resolve, read and override in one step
pub fn load_config(explicit: Option<&Path>) -> Result<ClientConfig, ConfigError> {
    load_config_with(explicit, &process_env)
}

pub fn load_config_with(
    explicit: Option<&Path>,
    env: EnvLookup,
) -> Result<ClientConfig, ConfigError> {
    let path = config_path(explicit, env)?;
    let mut config = read_config(&path)?;
    apply_env_overrides(&mut config, env);
    tracing::debug!(path = %path.display(), base_url = %config.server.base_url, "config loaded");
    Ok(config)
}
