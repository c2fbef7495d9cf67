use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{TimeZone, Utc};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::inbox::{ApiEvent, Effect};
use crate::model::{ApprovalFlow, Attachment, ClientConfig, InboxItem, RequestDetail};
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Pending item with predictable metadata
pub fn item(id: u64, title: &str) -> InboxItem {
    InboxItem {
        approval_request_id: id,
        request_id: format!("REQ-{:04}", id),
        flow_id: id * 10,
        title: title.to_string(),
        requested_by_id: "u-1".into(),
        status: "Pending".into(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        current_step: 1,
        total_steps: 2,
    }
}

/// Scratch directory for QR files, unique per call
fn scratch_dir() -> PathBuf {
    static NEXT: AtomicUsize = AtomicUsize::new(0);
    let n = NEXT.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("apin-test-{}-{}", std::process::id(), n))
}

/// An App whose screen has loaded `items` and is ready for input
pub fn app_with_items(items: Vec<InboxItem>) -> App {
    let mut config = ClientConfig::default();
    config.credentials.user_id = Some("u-7".into());
    let mut app = App::new(&config, scratch_dir());
    let ticket = match app.screen.open().as_slice() {
        [Effect::FetchInbox(ticket)] => *ticket,
        other => panic!("unexpected effects {:?}", other),
    };
    app.screen.apply(ApiEvent::InboxFetched {
        ticket,
        result: Ok(items),
    });
    app
}

/// Two-step leave request: first step approved, second pending
pub fn sample_detail() -> RequestDetail {
    RequestDetail {
        id: 1,
        request_number: Some("REQ-0001".into()),
        title: "Leave".into(),
        description: Some("Family event, back on Monday.".into()),
        approval_type: Some("Leave".into()),
        requester_name: Some("Ana".into()),
        requester_role: Some("Engineer".into()),
        current_status: Some("Pending".into()),
        created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        approval_flows: vec![
            ApprovalFlow {
                id: 10,
                approver_name: Some("Budi".into()),
                position_title: Some("Manager".into()),
                status: "Approved".into(),
                order_index: 1,
                remark: Some("fine".into()),
                approved_at: Some(Utc.with_ymd_and_hms(2024, 3, 2, 10, 0, 0).unwrap()),
            },
            ApprovalFlow {
                id: 11,
                approver_name: None,
                position_title: Some("Director".into()),
                status: "Pending".into(),
                order_index: 2,
                remark: None,
                approved_at: None,
            },
        ],
        attachments: vec![Attachment {
            id: 5,
            file_name: "leave-form.pdf".into(),
            content_type: Some("application/pdf".into()),
        }],
    }
}
