use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::api::InboxApi;

use super::screen::{ApiEvent, Effect};

/// Runs screen effects against the backend on worker threads and hands the
/// results back to the event loop.
///
/// Each effect gets its own thread: requests are independent and the API
/// has no queueing. A result whose receiver is gone (the screen was torn
/// down) is silently dropped.
pub struct Dispatcher {
    api: Arc<dyn InboxApi>,
    tx: mpsc::Sender<ApiEvent>,
    rx: mpsc::Receiver<ApiEvent>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn InboxApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Dispatcher { api, tx, rx }
    }

    pub fn dispatch(&self, effect: Effect) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let event = run(api.as_ref(), effect);
            let _ = tx.send(event);
        });
    }

    pub fn dispatch_all(&self, effects: impl IntoIterator<Item = Effect>) {
        for effect in effects {
            self.dispatch(effect);
        }
    }

    /// Non-blocking poll for completed effects.
    /// Returns all queued events (may be empty).
    pub fn poll(&self) -> Vec<ApiEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Wait up to `timeout` for the next completion
    pub fn recv_timeout(&self, timeout: Duration) -> Option<ApiEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}

/// Execute one effect synchronously
pub fn run(api: &dyn InboxApi, effect: Effect) -> ApiEvent {
    match effect {
        Effect::FetchInbox(ticket) => ApiEvent::InboxFetched {
            ticket,
            result: api.fetch_inbox(),
        },
        Effect::SubmitDecision {
            approval_request_id,
            payload,
        } => ApiEvent::DecisionSubmitted {
            approval_request_id,
            decision: payload.status,
            result: api.submit_decision(approval_request_id, &payload),
        },
        Effect::FetchQr { flow_id } => ApiEvent::QrFetched {
            flow_id,
            result: api.fetch_qr(flow_id),
        },
        Effect::FetchDetail {
            approval_request_id,
        } => ApiEvent::DetailFetched {
            approval_request_id,
            result: api.fetch_detail(approval_request_id),
        },
    }
}
