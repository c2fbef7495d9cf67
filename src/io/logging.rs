use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use super::config_io::{EnvLookup, resolve_home_dir};

pub const ENV_LOG: &str = "APIN_LOG";
pub const ENV_DATA_DIR: &str = "APIN_DATA_DIR";

/// Where logs and saved QR images go: `APIN_DATA_DIR`, else
/// `$XDG_DATA_HOME/apin`, else `~/.local/share/apin`. Falls back to the
/// working directory when no home can be found.
pub fn data_dir(env: EnvLookup) -> PathBuf {
    if let Some(dir) = env(ENV_DATA_DIR) {
        return PathBuf::from(dir);
    }
    if let Some(dir) = env("XDG_DATA_HOME") {
        return PathBuf::from(dir).join("apin");
    }
    resolve_home_dir(env)
        .map(|home| home.join(".local").join("share").join("apin"))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn log_file_path(data_dir: &Path) -> PathBuf {
    data_dir.join("apin.log")
}

/// Route `tracing` output to `<data dir>/apin.log`. The terminal belongs to
/// the TUI, so nothing is ever written to stderr from here.
pub fn init_file_logging(data_dir: &Path) -> Result<(), std::io::Error> {
    std::fs::create_dir_all(data_dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path(data_dir))?;

    let filter = EnvFilter::try_from_env(ENV_LOG).unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (tests, re-entry) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(log_file))
        .try_init();
    Ok(())
}
