use serde::{Deserialize, Serialize};

/// An approver's vote on one step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    Approved,
    Rejected,
}

impl Decision {
    /// Lowercase past tense, for messages ("approved")
    pub fn label(self) -> &'static str {
        match self {
            Decision::Approved => "approved",
            Decision::Rejected => "rejected",
        }
    }

    /// Imperative form, for prompts ("Approve")
    pub fn verb(self) -> &'static str {
        match self {
            Decision::Approved => "Approve",
            Decision::Rejected => "Reject",
        }
    }
}

/// Body of `PUT /approvalrequests/{id}/approve`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionPayload {
    pub approver_id: String,
    pub status: Decision,
    pub remark: String,
}

/// Action sent on the QR approval path, which uses verbs rather than
/// the past-tense status labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QrAction {
    Approve,
    Reject,
}

impl From<Decision> for QrAction {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approved => QrAction::Approve,
            Decision::Rejected => QrAction::Reject,
        }
    }
}

/// Body of `POST /approvalrequests/approval-via-qr`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrDecisionPayload {
    pub flow_id: u64,
    pub qr_token: String,
    pub action: QrAction,
    pub remark: String,
}
