/// Client-side API error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status
    #[error("HTTP {status} {status_text}: {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },
    /// No response at all (connection refused, DNS, TLS, reset)
    #[error("network: {0}")]
    Transport(#[from] reqwest::Error),
    /// A 2xx body that does not match the expected schema
    #[error("decode {path}: {message}")]
    Decode { path: String, message: String },
    #[error("no approver id configured (set credentials.user_id or APIN_USER_ID)")]
    MissingUserId,
    #[error("invalid credential: {0}")]
    InvalidCredential(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    /// Short single-line form for notifications. Long bodies are cut so a
    /// backend stack trace cannot flood the status row.
    pub fn summary(&self) -> String {
        match self {
            ApiError::Status {
                status,
                status_text,
                body,
            } => {
                let body = body.trim();
                let head = format!("{} {}", status, status_text).trim_end().to_string();
                if body.is_empty() {
                    head
                } else {
                    let first_line = body.lines().next().unwrap_or("");
                    let clipped: String = first_line.chars().take(80).collect();
                    if clipped.len() < first_line.len() || body.lines().nth(1).is_some() {
                        format!("{}: {}\u{2026}", head, clipped)
                    } else {
                        format!("{}: {}", head, clipped)
                    }
                }
            }
            ApiError::Transport(e) => format!("network error: {}", e),
            other => other.to_string(),
        }
    }

    /// HTTP status, when the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
