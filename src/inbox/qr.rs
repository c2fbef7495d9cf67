/// Fetched QR image for one approval step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrArtifact {
    pub flow_id: u64,
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrState {
    Loading,
    Ready(QrArtifact),
    /// Shown verbatim in the modal
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PngError {
    #[error("response is not a PNG image")]
    NotPng,
    #[error("PNG header is truncated")]
    Truncated,
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Check the PNG signature and read the IHDR dimensions
pub fn png_dimensions(bytes: &[u8]) -> Result<(u32, u32), PngError> {
    if bytes.len() < PNG_SIGNATURE.len() || bytes[..8] != PNG_SIGNATURE {
        return Err(PngError::NotPng);
    }
    // signature(8) + length(4) + "IHDR"(4) + width(4) + height(4)
    if bytes.len() < 24 {
        return Err(PngError::Truncated);
    }
    if &bytes[12..16] != b"IHDR" {
        return Err(PngError::NotPng);
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    Ok((width, height))
}

/// QR modal state. At most one flow is active; switching flows releases
/// the previous artifact before anything new can be shown.
#[derive(Debug, Default)]
pub struct QrViewer {
    active: Option<(u64, QrState)>,
}

impl QrViewer {
    /// Show the modal for `flow_id`. Returns `true` when a fetch is needed.
    pub fn open(&mut self, flow_id: u64) -> bool {
        if let Some((current, QrState::Loading | QrState::Ready(_))) = &self.active
            && *current == flow_id
        {
            return false;
        }
        // Drops any previous artifact
        self.active = Some((flow_id, QrState::Loading));
        true
    }

    pub fn close(&mut self) {
        self.active = None;
    }

    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    pub fn flow_id(&self) -> Option<u64> {
        self.active.as_ref().map(|(id, _)| *id)
    }

    pub fn state(&self) -> Option<&QrState> {
        self.active.as_ref().map(|(_, state)| state)
    }

    pub fn artifact(&self) -> Option<&QrArtifact> {
        match self.state() {
            Some(QrState::Ready(artifact)) => Some(artifact),
            _ => None,
        }
    }

    /// Apply a fetch result. Results for a flow that is no longer active
    /// are dropped and `false` is returned.
    pub fn apply(&mut self, flow_id: u64, result: Result<Vec<u8>, String>) -> bool {
        let state = match &mut self.active {
            Some((current, state)) if *current == flow_id => state,
            _ => return false,
        };
        *state = match result {
            Ok(png) => match png_dimensions(&png) {
                Ok((width, height)) => QrState::Ready(QrArtifact {
                    flow_id,
                    png,
                    width,
                    height,
                }),
                Err(e) => QrState::Failed(format!("QR code failed to load: {}", e)),
            },
            Err(message) => QrState::Failed(format!("QR code failed to load: {}", message)),
        };
        true
    }
}

#[cfg(test)]
pub(crate) fn fake_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 0, 0, 0, 0]);
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_dimensions() {
        assert_eq!(png_dimensions(&fake_png(200, 180)), Ok((200, 180)));
    }

    #[test]
    fn rejects_non_png() {
        assert_eq!(png_dimensions(b"<html>oops</html>"), Err(PngError::NotPng));
        assert_eq!(png_dimensions(&[]), Err(PngError::NotPng));
    }

    #[test]
    fn rejects_truncated() {
        let png = fake_png(1, 1);
        assert_eq!(png_dimensions(&png[..20]), Err(PngError::Truncated));
    }

    #[test]
    fn ready_after_fetch() {
        let mut qr = QrViewer::default();
        assert!(qr.open(3));
        assert_eq!(qr.state(), Some(&QrState::Loading));
        assert!(qr.apply(3, Ok(fake_png(64, 64))));
        let artifact = qr.artifact().unwrap();
        assert_eq!(artifact.flow_id, 3);
        assert_eq!((artifact.width, artifact.height), (64, 64));
    }

    #[test]
    fn late_result_for_previous_flow_is_dropped() {
        let mut qr = QrViewer::default();
        qr.open(3);
        qr.open(7);
        assert!(!qr.apply(3, Ok(fake_png(10, 10))));
        assert_eq!(qr.state(), Some(&QrState::Loading));
        assert!(qr.apply(7, Ok(fake_png(20, 20))));
        assert_eq!(qr.artifact().unwrap().flow_id, 7);
    }

    #[test]
    fn switching_flow_releases_previous_image() {
        let mut qr = QrViewer::default();
        qr.open(3);
        qr.apply(3, Ok(fake_png(10, 10)));
        assert!(qr.open(7));
        assert!(qr.artifact().is_none());
    }

    #[test]
    fn failure_has_explicit_message() {
        let mut qr = QrViewer::default();
        qr.open(3);
        qr.apply(3, Err("404 Not Found".into()));
        match qr.state() {
            Some(QrState::Failed(msg)) => assert!(msg.contains("404 Not Found")),
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[test]
    fn non_png_body_is_a_failure() {
        let mut qr = QrViewer::default();
        qr.open(3);
        qr.apply(3, Ok(b"{\"error\":true}".to_vec()));
        assert!(matches!(qr.state(), Some(QrState::Failed(_))));
    }

    #[test]
    fn reopen_same_flow_does_not_refetch() {
        let mut qr = QrViewer::default();
        assert!(qr.open(3));
        assert!(!qr.open(3));
        qr.apply(3, Err("boom".into()));
        // A failed flow can be retried
        assert!(qr.open(3));
    }

    #[test]
    fn closed_viewer_ignores_results() {
        let mut qr = QrViewer::default();
        qr.open(3);
        qr.close();
        assert!(!qr.apply(3, Ok(fake_png(1, 1))));
        assert!(!qr.is_open());
    }
}
