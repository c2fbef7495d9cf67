use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::api::ApiError;
use crate::model::{Decision, DecisionPayload, InboxItem, RequestDetail};

use super::confirm::{ConfirmFlow, SubmitRefusal};
use super::qr::QrViewer;
use super::store::{FetchTicket, InboxStore};

/// Where the screen is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Not opened yet, nothing requested
    Initial,
    /// Initial or manual fetch outstanding; list not interactive
    Loading,
    /// List interactive (possibly empty)
    Ready,
    /// Decision outstanding; list visible but not interactive
    ActionPending,
    /// Torn down; late results are ignored
    Closed,
}

/// Work the screen wants done. Executed by a [`Dispatcher`](super::Dispatcher)
/// or directly by a test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchInbox(FetchTicket),
    SubmitDecision {
        approval_request_id: u64,
        payload: DecisionPayload,
    },
    FetchQr {
        flow_id: u64,
    },
    FetchDetail {
        approval_request_id: u64,
    },
}

/// Result of an effect, fed back through [`InboxScreen::apply`]
#[derive(Debug)]
pub enum ApiEvent {
    InboxFetched {
        ticket: FetchTicket,
        result: Result<Vec<InboxItem>, ApiError>,
    },
    DecisionSubmitted {
        approval_request_id: u64,
        decision: Decision,
        result: Result<(), ApiError>,
    },
    QrFetched {
        flow_id: u64,
        result: Result<Vec<u8>, ApiError>,
    },
    DetailFetched {
        approval_request_id: u64,
        result: Result<RequestDetail, ApiError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// Transient, dismissable message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
    pub created: Instant,
}

const MAX_NOTIFICATIONS: usize = 3;

/// Detail sub-view for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailPane {
    Loading { approval_request_id: u64 },
    Loaded(RequestDetail),
    NotFound { approval_request_id: u64 },
}

impl DetailPane {
    pub fn approval_request_id(&self) -> u64 {
        match self {
            DetailPane::Loading {
                approval_request_id,
            }
            | DetailPane::NotFound {
                approval_request_id,
            } => *approval_request_id,
            DetailPane::Loaded(detail) => detail.id,
        }
    }
}

/// The approval inbox as a state machine.
///
/// Intents (`open`, `begin_decision`, `submit_decision`, ...) and backend
/// completions (`apply`) mutate the screen and return the effects to run.
/// The screen owns its store, confirmation flow and QR viewer.
#[derive(Debug)]
pub struct InboxScreen {
    store: InboxStore,
    confirm: ConfirmFlow,
    qr: QrViewer,
    detail: Option<DetailPane>,
    notifications: VecDeque<Notification>,
    approver_id: Option<String>,
    opened: bool,
    closed: bool,
}

impl InboxScreen {
    pub fn new(approver_id: Option<String>) -> Self {
        InboxScreen {
            store: InboxStore::new(),
            confirm: ConfirmFlow::default(),
            qr: QrViewer::default(),
            detail: None,
            notifications: VecDeque::new(),
            approver_id: approver_id.filter(|id| !id.trim().is_empty()),
            opened: false,
            closed: false,
        }
    }

    pub fn store(&self) -> &InboxStore {
        &self.store
    }

    pub fn confirm(&self) -> &ConfirmFlow {
        &self.confirm
    }

    /// Remark editing goes straight to the flow
    pub fn confirm_mut(&mut self) -> &mut ConfirmFlow {
        &mut self.confirm
    }

    pub fn qr(&self) -> &QrViewer {
        &self.qr
    }

    pub fn detail(&self) -> Option<&DetailPane> {
        self.detail.as_ref()
    }

    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }

    pub fn phase(&self) -> Phase {
        if self.closed {
            Phase::Closed
        } else if !self.opened {
            Phase::Initial
        } else if self.store.loading() {
            Phase::Loading
        } else if self.store.global_action_loading() {
            Phase::ActionPending
        } else {
            Phase::Ready
        }
    }

    /// Whether list actions are accepted right now
    pub fn is_interactive(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// Initial -> Loading
    pub fn open(&mut self) -> Vec<Effect> {
        if self.opened || self.closed {
            return Vec::new();
        }
        self.opened = true;
        self.start_fetch()
    }

    /// Re-fetch the list. Ignored while a fetch is already outstanding.
    pub fn refresh(&mut self) -> Vec<Effect> {
        if !self.opened || self.closed || self.store.loading() {
            return Vec::new();
        }
        self.start_fetch()
    }

    fn start_fetch(&mut self) -> Vec<Effect> {
        let ticket = self.store.begin_fetch();
        self.store.set_loading(true);
        tracing::debug!(?ticket, "inbox fetch issued");
        vec![Effect::FetchInbox(ticket)]
    }

    /// Open the confirmation modal for an item
    pub fn begin_decision(&mut self, approval_request_id: u64, decision: Decision) -> bool {
        if !self.is_interactive() || self.confirm.is_active() {
            return false;
        }
        match self.store.get(approval_request_id) {
            Some(item) => self.confirm.open(item, decision),
            None => false,
        }
    }

    /// Validate and send the open action
    pub fn submit_decision(&mut self) -> Vec<Effect> {
        if self.closed {
            return Vec::new();
        }
        if self.confirm.is_open() && self.approver_id.is_none() {
            self.notify(NoticeLevel::Error, ApiError::MissingUserId.to_string());
            return Vec::new();
        }
        let pending = match self.confirm.submit() {
            Ok(p) => p,
            Err(SubmitRefusal::EmptyRemark) => {
                tracing::debug!("decision refused: empty remark");
                return Vec::new();
            }
            Err(_) => return Vec::new(),
        };
        self.store.set_global_action_loading(true);
        let approval_request_id = pending.approval_request_id();
        tracing::info!(
            approval_request_id,
            decision = pending.decision.label(),
            "submitting decision"
        );
        vec![Effect::SubmitDecision {
            approval_request_id,
            payload: DecisionPayload {
                approver_id: self.approver_id.clone().unwrap_or_default(),
                status: pending.decision,
                remark: pending.remark,
            },
        }]
    }

    pub fn cancel_decision(&mut self) -> bool {
        self.confirm.cancel()
    }

    /// Show the QR modal for a step
    pub fn open_qr(&mut self, flow_id: u64) -> Vec<Effect> {
        if !self.is_interactive() {
            return Vec::new();
        }
        if self.qr.open(flow_id) {
            vec![Effect::FetchQr { flow_id }]
        } else {
            Vec::new()
        }
    }

    pub fn close_qr(&mut self) {
        self.qr.close();
    }

    /// Show the request's approval chain
    pub fn open_detail(&mut self, approval_request_id: u64) -> Vec<Effect> {
        if !self.is_interactive() {
            return Vec::new();
        }
        self.detail = Some(DetailPane::Loading {
            approval_request_id,
        });
        vec![Effect::FetchDetail {
            approval_request_id,
        }]
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
    }

    /// Navigate away: discard any uncommitted action and stray loading
    /// state. Results arriving afterwards are no-ops.
    pub fn close(&mut self) {
        self.closed = true;
        self.confirm.reset();
        self.qr.close();
        self.detail = None;
        self.store.set_loading(false);
        self.store.set_global_action_loading(false);
    }

    /// Feed a backend completion into the screen
    pub fn apply(&mut self, event: ApiEvent) {
        if self.closed {
            tracing::debug!(?event, "result after screen closed; ignored");
            return;
        }
        match event {
            ApiEvent::InboxFetched { ticket, result } => self.on_inbox_fetched(ticket, result),
            ApiEvent::DecisionSubmitted {
                approval_request_id,
                decision,
                result,
            } => self.on_decision_submitted(approval_request_id, decision, result),
            ApiEvent::QrFetched { flow_id, result } => {
                let result = result.map_err(|e| e.summary());
                if let Err(message) = &result
                    && self.qr.flow_id() == Some(flow_id)
                {
                    self.notify(
                        NoticeLevel::Error,
                        format!("Failed to load QR image: {}", message),
                    );
                }
                if !self.qr.apply(flow_id, result) {
                    tracing::debug!(flow_id, "qr result for inactive flow dropped");
                }
            }
            ApiEvent::DetailFetched {
                approval_request_id,
                result,
            } => self.on_detail_fetched(approval_request_id, result),
        }
    }

    fn on_inbox_fetched(&mut self, ticket: FetchTicket, result: Result<Vec<InboxItem>, ApiError>) {
        let latest = self.store.is_latest(ticket);
        match result {
            Ok(items) => {
                if self.store.apply_fetch(ticket, items) {
                    tracing::info!(count = self.store.len(), "inbox loaded");
                } else {
                    tracing::debug!(?ticket, "stale inbox result discarded");
                }
            }
            Err(e) => {
                tracing::warn!(?ticket, error = %e, "inbox fetch failed");
                if latest {
                    self.notify(
                        NoticeLevel::Error,
                        format!("Failed to load inbox: {}", e.summary()),
                    );
                }
            }
        }
        if latest {
            self.store.set_loading(false);
        }
    }

    fn on_decision_submitted(
        &mut self,
        approval_request_id: u64,
        decision: Decision,
        result: Result<(), ApiError>,
    ) {
        match result {
            Ok(()) => {
                if self.confirm.complete_success(approval_request_id).is_none() {
                    tracing::debug!(approval_request_id, "decision completion without open action");
                }
                // Reconciled against whatever list is current now
                self.store.remove(approval_request_id);
                self.notify(
                    NoticeLevel::Success,
                    format!("Request {} successfully", decision.label()),
                );
            }
            Err(e) => {
                tracing::warn!(approval_request_id, error = %e, "decision failed");
                self.confirm.complete_failure(approval_request_id);
                self.notify(NoticeLevel::Error, format!("Action failed: {}", e.summary()));
            }
        }
        self.store.set_global_action_loading(false);
    }

    fn on_detail_fetched(
        &mut self,
        approval_request_id: u64,
        result: Result<RequestDetail, ApiError>,
    ) {
        let waiting = matches!(
            self.detail,
            Some(DetailPane::Loading { approval_request_id: id }) if id == approval_request_id
        );
        if !waiting {
            return;
        }
        self.detail = Some(match result {
            Ok(detail) => DetailPane::Loaded(detail),
            Err(e) => {
                self.notify(
                    NoticeLevel::Error,
                    format!("Failed to fetch request detail: {}", e.summary()),
                );
                DetailPane::NotFound {
                    approval_request_id,
                }
            }
        });
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notifications.push_back(Notification {
            level,
            message: message.into(),
            created: Instant::now(),
        });
        while self.notifications.len() > MAX_NOTIFICATIONS {
            self.notifications.pop_front();
        }
    }

    /// Dismiss the oldest notification
    pub fn dismiss_notification(&mut self) -> bool {
        self.notifications.pop_front().is_some()
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Drop notifications older than `ttl`
    pub fn expire_notifications(&mut self, now: Instant, ttl: Duration) {
        self.notifications
            .retain(|n| now.saturating_duration_since(n.created) < ttl);
    }
}
