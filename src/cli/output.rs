use serde::Serialize;

use crate::model::{InboxItem, RequestDetail, RequestSummary};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct InboxJson<'a> {
    pub count: usize,
    pub items: &'a [InboxItem],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionJson {
    pub approval_request_id: u64,
    pub status: &'static str,
    pub remark: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrSavedJson {
    pub flow_id: u64,
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
}

#[derive(Serialize)]
pub struct RequestsJson<'a> {
    pub count: usize,
    pub requests: &'a [RequestSummary],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterSavedJson {
    pub approval_request_id: u64,
    pub title: String,
    pub path: String,
    pub bytes: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentSavedJson {
    pub attachment_id: u64,
    pub path: String,
    pub bytes: usize,
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// One line per pending item
pub fn format_inbox(items: &[InboxItem]) -> Vec<String> {
    if items.is_empty() {
        return vec!["No pending approvals.".to_string()];
    }
    let id_w = items
        .iter()
        .map(|i| i.approval_request_id.to_string().len())
        .max()
        .unwrap_or(1);
    items
        .iter()
        .map(|item| {
            let number = if item.request_id.is_empty() {
                String::new()
            } else {
                format!("{}  ", item.request_id)
            };
            format!(
                "{:>id_w$}  {}{}  [{}]  by {}  {}",
                item.approval_request_id,
                number,
                item.title,
                item.progress_label(),
                item.requested_by_id,
                item.created_at.format("%Y-%m-%d %H:%M"),
                id_w = id_w,
            )
        })
        .collect()
}

/// Request header followed by its approval chain
pub fn format_detail(detail: &RequestDetail) -> Vec<String> {
    let mut lines = Vec::new();
    match &detail.request_number {
        Some(number) => lines.push(format!("{}  {}", number, detail.title)),
        None => lines.push(detail.title.clone()),
    }
    if let Some(kind) = &detail.approval_type {
        lines.push(format!("  type:      {}", kind));
    }
    if let Some(name) = &detail.requester_name {
        match &detail.requester_role {
            Some(role) => lines.push(format!("  requester: {} ({})", name, role)),
            None => lines.push(format!("  requester: {}", name)),
        }
    }
    lines.push(format!(
        "  submitted: {}",
        detail.created_at.format("%Y-%m-%d %H:%M")
    ));
    if let Some(status) = &detail.current_status {
        lines.push(format!("  status:    {}", status));
    }
    if let Some(description) = detail.description.as_deref().filter(|d| !d.trim().is_empty()) {
        lines.push(String::new());
        for line in description.lines() {
            lines.push(format!("  {}", line));
        }
    }
    lines.push(String::new());
    lines.push("Approval steps:".to_string());
    for (i, flow) in detail.approval_flows.iter().enumerate() {
        let who = [flow.position_title.as_deref(), flow.approver_name.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" / ");
        let mut line = format!("  {}. [{}] {}", i + 1, flow.status, who);
        if let Some(at) = &flow.approved_at {
            line.push_str(&format!("  {}", at.format("%Y-%m-%d %H:%M")));
        }
        lines.push(line.trim_end().to_string());
        if let Some(remark) = &flow.remark {
            lines.push(format!("     \"{}\"", remark));
        }
    }
    if !detail.attachments.is_empty() {
        lines.push(String::new());
        lines.push("Attachments:".to_string());
        for attachment in &detail.attachments {
            lines.push(format!("  #{}  {}", attachment.id, attachment.file_name));
        }
    }
    lines
}

/// One line per request: id, status, date, title, type
pub fn format_requests(requests: &[RequestSummary]) -> Vec<String> {
    if requests.is_empty() {
        return vec!["No requests found.".to_string()];
    }
    let id_w = requests
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(1);
    let status_w = requests
        .iter()
        .map(|r| r.current_status.len())
        .max()
        .unwrap_or(0);
    requests
        .iter()
        .map(|r| {
            let mut line = format!(
                "{:>id_w$}  {:<status_w$}  {}  {}",
                r.id,
                r.current_status,
                r.created_at.format("%Y-%m-%d"),
                r.title,
            );
            if let Some(kind) = &r.approval_type {
                line.push_str(&format!("  ({})", kind));
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApprovalFlow, Attachment};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn item(id: u64, title: &str) -> InboxItem {
        InboxItem {
            approval_request_id: id,
            request_id: format!("REQ-{:04}", id),
            flow_id: id * 10,
            title: title.into(),
            requested_by_id: "u-1".into(),
            status: "Pending".into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            current_step: 1,
            total_steps: 2,
        }
    }

    #[test]
    fn inbox_lines() {
        let lines = format_inbox(&[item(1, "Leave"), item(12, "Laptop")]);
        assert_eq!(
            lines,
            vec![
                " 1  REQ-0001  Leave  [Step 1 of 2]  by u-1  2024-03-01 09:00",
                "12  REQ-0012  Laptop  [Step 1 of 2]  by u-1  2024-03-01 09:00",
            ]
        );
    }

    #[test]
    fn request_lines() {
        let request = |id: u64, status: &str, kind: Option<&str>| RequestSummary {
            id,
            title: format!("Request {}", id),
            approval_type: kind.map(str::to_string),
            current_status: status.into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        };
        let lines = format_requests(&[
            request(7, "Completed", Some("Leave")),
            request(12, "Rejected", None),
        ]);
        assert_eq!(
            lines,
            vec![
                " 7  Completed  2024-03-01  Request 7  (Leave)",
                "12  Rejected   2024-03-01  Request 12",
            ]
        );
        assert_eq!(format_requests(&[]), vec!["No requests found."]);
    }

    #[test]
    fn empty_inbox_line() {
        assert_eq!(format_inbox(&[]), vec!["No pending approvals."]);
    }

    #[test]
    fn detail_lines() {
        let detail = RequestDetail {
            id: 1,
            request_number: Some("REQ-0001".into()),
            title: "Leave".into(),
            description: None,
            approval_type: None,
            requester_name: Some("Ana".into()),
            requester_role: None,
            current_status: Some("Pending".into()),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
            approval_flows: vec![ApprovalFlow {
                id: 10,
                approver_name: Some("Budi".into()),
                position_title: Some("Manager".into()),
                status: "Approved".into(),
                order_index: 1,
                remark: Some("fine".into()),
                approved_at: Some(Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap()),
            }],
            attachments: vec![Attachment {
                id: 5,
                file_name: "quote.pdf".into(),
                content_type: None,
            }],
        };
        assert_eq!(
            format_detail(&detail),
            vec![
                "REQ-0001  Leave",
                "  requester: Ana",
                "  submitted: 2024-03-01 09:00",
                "  status:    Pending",
                "",
                "Approval steps:",
                "  1. [Approved] Manager / Budi  2024-03-02 10:00",
                "     \"fine\"",
                "",
                "Attachments:",
                "  #5  quote.pdf",
            ]
        );
    }
}
