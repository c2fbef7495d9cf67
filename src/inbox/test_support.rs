use chrono::{TimeZone, Utc};

use crate::model::InboxItem;

/// Plain pending item keyed by `id`, on flow `id * 10`
pub(crate) fn item(id: u64) -> InboxItem {
    InboxItem {
        approval_request_id: id,
        request_id: format!("REQ-{:04}", id),
        flow_id: id * 10,
        title: format!("Item {}", id),
        requested_by_id: "u-1".into(),
        status: "Pending".into(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        current_step: 1,
        total_steps: 2,
    }
}

/// The leave request used across the approve/reject scenarios
pub(crate) fn leave_request() -> InboxItem {
    InboxItem {
        approval_request_id: 1,
        request_id: "REQ-0001".into(),
        flow_id: 3,
        title: "Leave".into(),
        requested_by_id: "u-9".into(),
        status: "Pending".into(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        current_step: 1,
        total_steps: 2,
    }
}
