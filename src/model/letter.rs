use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::parse_timestamp;

/// Status the backend reports once every step has approved
pub const COMPLETED: &str = "Completed";

/// What the backend knows about the approval letter for a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterMetadata {
    pub title: String,
    #[serde(default)]
    pub pdf_url: Option<String>,
    /// False until the last step has approved
    #[serde(default)]
    pub approved: bool,
}

/// One entry of `GET /approvalrequests`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RequestSummaryWire")]
pub struct RequestSummary {
    pub id: u64,
    pub title: String,
    pub approval_type: Option<String>,
    pub current_status: String,
    pub created_at: DateTime<Utc>,
}

impl RequestSummary {
    /// Fully approved; a letter can be downloaded
    pub fn is_completed(&self) -> bool {
        self.current_status == COMPLETED
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("request {id}: unparseable createdAt {value:?}")]
pub struct InvalidSummary {
    id: u64,
    value: String,
}

#[derive(Debug, Deserialize)]
struct TypeWire {
    name: Option<String>,
}

/// The list endpoint has shipped both a nested `approvalType` and a flat
/// `approvalTypeName`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestSummaryWire {
    id: u64,
    title: String,
    #[serde(default)]
    approval_type: Option<TypeWire>,
    #[serde(default)]
    approval_type_name: Option<String>,
    #[serde(default)]
    current_status: Option<String>,
    created_at: String,
}

impl TryFrom<RequestSummaryWire> for RequestSummary {
    type Error = InvalidSummary;

    fn try_from(wire: RequestSummaryWire) -> Result<Self, Self::Error> {
        let created_at = parse_timestamp(&wire.created_at).ok_or(InvalidSummary {
            id: wire.id,
            value: wire.created_at.clone(),
        })?;
        Ok(RequestSummary {
            id: wire.id,
            title: wire.title,
            approval_type: wire
                .approval_type
                .and_then(|t| t.name)
                .or(wire.approval_type_name),
            current_status: wire.current_status.unwrap_or_default(),
            created_at,
        })
    }
}

/// PDF files start with `%PDF-`
pub fn is_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}
