use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::timestamp::parse_timestamp;

/// A request with its full approval chain, as shown in the detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RequestDetailWire")]
pub struct RequestDetail {
    pub id: u64,
    pub request_number: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub approval_type: Option<String>,
    pub requester_name: Option<String>,
    pub requester_role: Option<String>,
    pub current_status: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Steps ordered by `order_index`
    pub approval_flows: Vec<ApprovalFlow>,
    pub attachments: Vec<Attachment>,
}

/// A file uploaded with the request, downloadable by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: u64,
    pub file_name: String,
    #[serde(default)]
    pub content_type: Option<String>,
}

/// One position's vote within the chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalFlow {
    pub id: u64,
    pub approver_name: Option<String>,
    pub position_title: Option<String>,
    pub status: String,
    pub order_index: u32,
    pub remark: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
}

impl RequestDetail {
    /// The first step still waiting for a decision, if any
    pub fn pending_flow(&self) -> Option<&ApprovalFlow> {
        self.approval_flows.iter().find(|f| f.status == "Pending")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidDetail {
    #[error("request {id}: unparseable createdAt {value:?}")]
    CreatedAt { id: u64, value: String },
    #[error("request {id}, flow {flow}: unparseable approvedAt {value:?}")]
    ApprovedAt { id: u64, flow: u64, value: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamedWire {
    #[serde(alias = "title")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserWire {
    full_name: Option<String>,
    role: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApprovalFlowWire {
    id: u64,
    approver_name: Option<String>,
    approver: Option<UserWire>,
    position_title: Option<String>,
    position: Option<NamedWire>,
    status: String,
    order_index: Option<u32>,
    remark: Option<String>,
    approved_at: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RequestDetailWire {
    id: u64,
    request_number: Option<String>,
    title: String,
    description: Option<String>,
    approval_type: Option<NamedWire>,
    requested_by_user: Option<UserWire>,
    current_status: Option<String>,
    created_at: String,
    #[serde(default)]
    approval_flows: Option<Vec<ApprovalFlowWire>>,
    #[serde(default)]
    attachments: Option<Vec<Attachment>>,
}

impl TryFrom<RequestDetailWire> for RequestDetail {
    type Error = InvalidDetail;

    fn try_from(wire: RequestDetailWire) -> Result<Self, Self::Error> {
        let id = wire.id;
        let created_at = parse_timestamp(&wire.created_at).ok_or(InvalidDetail::CreatedAt {
            id,
            value: wire.created_at.clone(),
        })?;

        let mut approval_flows = Vec::new();
        for (position, flow) in wire.approval_flows.unwrap_or_default().into_iter().enumerate() {
            let approved_at = match flow.approved_at.as_deref().filter(|s| !s.is_empty()) {
                Some(raw) => Some(parse_timestamp(raw).ok_or(InvalidDetail::ApprovedAt {
                    id,
                    flow: flow.id,
                    value: raw.to_string(),
                })?),
                None => None,
            };
            approval_flows.push(ApprovalFlow {
                id: flow.id,
                approver_name: flow
                    .approver_name
                    .or_else(|| flow.approver.and_then(|a| a.full_name)),
                position_title: flow
                    .position_title
                    .or_else(|| flow.position.and_then(|p| p.name)),
                status: flow.status,
                order_index: flow.order_index.unwrap_or(position as u32),
                remark: flow.remark.filter(|r| !r.trim().is_empty()),
                approved_at,
            });
        }
        // Stable: steps sharing an index keep backend order
        approval_flows.sort_by_key(|f| f.order_index);

        let (requester_name, requester_role) = match wire.requested_by_user {
            Some(user) => (user.full_name, user.role),
            None => (None, None),
        };

        Ok(RequestDetail {
            id,
            request_number: wire.request_number,
            title: wire.title,
            description: wire.description,
            approval_type: wire.approval_type.and_then(|t| t.name),
            requester_name,
            requester_role,
            current_status: wire.current_status,
            created_at,
            approval_flows,
            attachments: wire.attachments.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DETAIL: &str = r#"{
        "id": 1,
        "requestNumber": "REQ-0001",
        "title": "Leave Request",
        "description": "Two days off",
        "approvalType": { "name": "Leave" },
        "currentStatus": "InProgress",
        "createdAt": "2025-06-01T08:15:00Z",
        "requestedByUser": { "fullName": "Dana Putri", "role": "Staff" },
        "approvalFlows": [
            { "id": 11, "status": "Pending", "orderIndex": 2,
              "approver": { "fullName": "Budi" }, "position": { "title": "Director" },
              "remark": "", "approvedAt": null },
            { "id": 10, "status": "Approved", "orderIndex": 1,
              "approverName": "Sari", "positionTitle": "Manager",
              "remark": "fine by me", "approvedAt": "2025-06-02T09:00:00" }
        ],
        "attachments": [
            { "id": 3, "fileName": "leave-form.pdf", "contentType": "application/pdf" }
        ]
    }"#;

    #[test]
    fn flows_sorted_by_order_index() {
        let detail: RequestDetail = serde_json::from_str(DETAIL).unwrap();
        let ids: Vec<u64> = detail.approval_flows.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![10, 11]);
    }

    #[test]
    fn nested_names_fill_flat_fields() {
        let detail: RequestDetail = serde_json::from_str(DETAIL).unwrap();
        let pending = detail.pending_flow().unwrap();
        assert_eq!(pending.id, 11);
        assert_eq!(pending.approver_name.as_deref(), Some("Budi"));
        assert_eq!(pending.position_title.as_deref(), Some("Director"));
        assert_eq!(pending.remark, None);
        assert_eq!(pending.approved_at, None);
        assert_eq!(detail.approval_type.as_deref(), Some("Leave"));
        assert_eq!(detail.requester_name.as_deref(), Some("Dana Putri"));
    }

    #[test]
    fn missing_optional_objects() {
        let json = r#"{"id": 5, "title": "Bare", "createdAt": "2025-01-01T00:00:00Z"}"#;
        let detail: RequestDetail = serde_json::from_str(json).unwrap();
        assert!(detail.approval_flows.is_empty());
        assert!(detail.approval_type.is_none());
        assert!(detail.pending_flow().is_none());
        assert!(detail.attachments.is_empty());
    }

    #[test]
    fn attachments_parsed() {
        let detail: RequestDetail = serde_json::from_str(DETAIL).unwrap();
        assert_eq!(
            detail.attachments,
            vec![Attachment {
                id: 3,
                file_name: "leave-form.pdf".into(),
                content_type: Some("application/pdf".into()),
            }]
        );
    }

    #[test]
    fn bad_approved_at_is_rejected() {
        let json = DETAIL.replace("2025-06-02T09:00:00", "soon");
        assert!(serde_json::from_str::<RequestDetail>(&json).is_err());
    }
}
