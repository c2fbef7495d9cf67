use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::parse_timestamp;

/// One approval step currently waiting on the logged-in approver.
///
/// Items are only ever built from an inbox fetch and are never edited in
/// place: a decision removes the item, a re-fetch replaces the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "InboxItemWire")]
pub struct InboxItem {
    /// Identifier of the underlying request (the store key)
    pub approval_request_id: u64,
    /// Human-facing request number
    pub request_id: String,
    /// Identifier of this approver's step in the flow
    pub flow_id: u64,
    pub title: String,
    pub requested_by_id: String,
    /// Status label as reported by the backend (normally "Pending")
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub current_step: u32,
    pub total_steps: u32,
}

impl InboxItem {
    /// "Step 1 of 2"
    pub fn progress_label(&self) -> String {
        format!("Step {} of {}", self.current_step, self.total_steps)
    }
}

/// Error for an inbox payload that parses as JSON but violates the item schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidItem {
    #[error("item {id}: unparseable createdAt {value:?}")]
    CreatedAt { id: u64, value: String },
    #[error("item {id}: currentStep {current} exceeds totalSteps {total}")]
    StepOutOfRange { id: u64, current: u32, total: u32 },
}

/// Shape of an inbox entry on the wire
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InboxItemWire {
    approval_request_id: u64,
    #[serde(default)]
    request_id: Option<String>,
    flow_id: u64,
    title: String,
    requested_by_id: String,
    status: String,
    created_at: String,
    current_step: u32,
    total_steps: u32,
}

impl TryFrom<InboxItemWire> for InboxItem {
    type Error = InvalidItem;

    fn try_from(wire: InboxItemWire) -> Result<Self, Self::Error> {
        let id = wire.approval_request_id;
        let created_at = parse_timestamp(&wire.created_at).ok_or(InvalidItem::CreatedAt {
            id,
            value: wire.created_at.clone(),
        })?;
        if wire.current_step > wire.total_steps {
            return Err(InvalidItem::StepOutOfRange {
                id,
                current: wire.current_step,
                total: wire.total_steps,
            });
        }
        Ok(InboxItem {
            approval_request_id: id,
            request_id: wire.request_id.unwrap_or_default(),
            flow_id: wire.flow_id,
            title: wire.title,
            requested_by_id: wire.requested_by_id,
            status: wire.status,
            created_at,
            current_step: wire.current_step,
            total_steps: wire.total_steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEAVE_REQUEST: &str = r#"{
        "approvalRequestId": 1,
        "requestId": "REQ-0001",
        "title": "Leave Request",
        "requestedById": "u-42",
        "status": "Pending",
        "createdAt": "2025-06-01T08:15:00",
        "currentStep": 1,
        "totalSteps": 2,
        "flowId": 10
    }"#;

    #[test]
    fn parses_wire_item() {
        let item: InboxItem = serde_json::from_str(LEAVE_REQUEST).unwrap();
        assert_eq!(item.approval_request_id, 1);
        assert_eq!(item.flow_id, 10);
        assert_eq!(item.request_id, "REQ-0001");
        assert_eq!(item.progress_label(), "Step 1 of 2");
    }

    #[test]
    fn missing_field_is_an_error() {
        let json = r#"{"approvalRequestId": 1, "title": "x"}"#;
        assert!(serde_json::from_str::<InboxItem>(json).is_err());
    }

    #[test]
    fn step_past_total_is_rejected() {
        let json = LEAVE_REQUEST.replace("\"currentStep\": 1", "\"currentStep\": 3");
        let err = serde_json::from_str::<InboxItem>(&json).unwrap_err();
        assert!(err.to_string().contains("exceeds totalSteps"));
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        let json = LEAVE_REQUEST.replace("2025-06-01T08:15:00", "last tuesday");
        let err = serde_json::from_str::<InboxItem>(&json).unwrap_err();
        assert!(err.to_string().contains("createdAt"));
    }

    #[test]
    fn request_id_is_optional() {
        let json = LEAVE_REQUEST.replace("\"requestId\": \"REQ-0001\",", "");
        let item: InboxItem = serde_json::from_str(&json).unwrap();
        assert_eq!(item.request_id, "");
    }

    #[test]
    fn serializes_camel_case() {
        let item: InboxItem = serde_json::from_str(LEAVE_REQUEST).unwrap();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["approvalRequestId"], 1);
        assert_eq!(value["flowId"], 10);
    }
}
