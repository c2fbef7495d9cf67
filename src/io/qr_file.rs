use std::fs;
use std::path::{Path, PathBuf};

/// On-disk copy of the QR image being shown, so it can be opened in an
/// image viewer or scanned from another screen.
///
/// Holds at most one file. Writing a new flow or dropping the cache removes
/// the previous file.
#[derive(Debug)]
pub struct QrFileCache {
    dir: PathBuf,
    current: Option<(u64, PathBuf)>,
}

impl QrFileCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        QrFileCache {
            dir: dir.into(),
            current: None,
        }
    }

    pub fn path_for(&self, flow_id: u64) -> PathBuf {
        self.dir.join(format!("qr-{}.png", flow_id))
    }

    /// The file for `flow_id`, if it is the one currently written
    pub fn current(&self, flow_id: u64) -> Option<&Path> {
        match &self.current {
            Some((id, path)) if *id == flow_id => Some(path),
            _ => None,
        }
    }

    /// Write `png` for `flow_id`, releasing whatever was there before
    pub fn store(&mut self, flow_id: u64, png: &[u8]) -> Result<PathBuf, std::io::Error> {
        if self.current(flow_id).is_some() {
            return Ok(self.path_for(flow_id));
        }
        self.release();
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(flow_id);
        fs::write(&path, png)?;
        tracing::debug!(flow_id, path = %path.display(), "qr image saved");
        self.current = Some((flow_id, path.clone()));
        Ok(path)
    }

    /// Remove the current file, if any
    pub fn release(&mut self) {
        if let Some((flow_id, path)) = self.current.take()
            && let Err(e) = fs::remove_file(&path)
        {
            tracing::debug!(flow_id, error = %e, "could not remove qr image");
        }
    }
}

impl Drop for QrFileCache {
    fn drop(&mut self) {
        self.release();
    }
}
