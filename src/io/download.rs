use std::fs;
use std::path::{Path, PathBuf};

/// Write a downloaded file (QR image, letter, attachment) to `path`,
/// creating missing parent directories.
pub fn save_file(path: &Path, bytes: &[u8]) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), size = bytes.len(), "file saved");
    Ok(())
}

/// `--out` when given, else `default_name` in the working directory
pub fn output_path(out: Option<&Path>, default_name: &str) -> PathBuf {
    out.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(default_name))
}
