use unicode_segmentation::UnicodeSegmentation;

use crate::model::{Decision, InboxItem};

/// An approve/reject the user is composing, before it reaches the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAction {
    pub item: InboxItem,
    pub decision: Decision,
    pub remark: String,
}

impl PendingAction {
    pub fn approval_request_id(&self) -> u64 {
        self.item.approval_request_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmState {
    #[default]
    Closed,
    /// Modal visible, remark editable
    Open(PendingAction),
    /// Request outstanding; the action is kept so a failure can reopen it
    Submitting(PendingAction),
}

/// Why `submit` did not start a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRefusal {
    NotOpen,
    AlreadySubmitting,
    EmptyRemark,
}

pub const REMARK_REQUIRED: &str = "A remark is required";

/// The remark as it goes on the wire: trimmed, never blank
pub fn normalize_remark(remark: &str) -> Option<&str> {
    let remark = remark.trim();
    (!remark.is_empty()).then_some(remark)
}

/// Two-phase approve/reject with a mandatory remark.
///
/// Every exit path (cancel, success, screen teardown) clears the pending
/// action; a failed submission reopens it with the remark intact.
#[derive(Debug, Default)]
pub struct ConfirmFlow {
    state: ConfirmState,
    validation_error: Option<&'static str>,
}

impl ConfirmFlow {
    pub fn state(&self) -> &ConfirmState {
        &self.state
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        match &self.state {
            ConfirmState::Open(p) | ConfirmState::Submitting(p) => Some(p),
            ConfirmState::Closed => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ConfirmState::Open(_))
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, ConfirmState::Submitting(_))
    }

    /// Open or submitting
    pub fn is_active(&self) -> bool {
        !matches!(self.state, ConfirmState::Closed)
    }

    pub fn validation_error(&self) -> Option<&'static str> {
        self.validation_error
    }

    /// Closed -> Open for `item`. Refused while a submission is outstanding;
    /// an already open action is replaced.
    pub fn open(&mut self, item: &InboxItem, decision: Decision) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.state = ConfirmState::Open(PendingAction {
            item: item.clone(),
            decision,
            remark: String::new(),
        });
        self.validation_error = None;
        true
    }

    fn remark_mut(&mut self) -> Option<&mut String> {
        match &mut self.state {
            ConfirmState::Open(p) => Some(&mut p.remark),
            _ => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(remark) = self.remark_mut() {
            remark.push(c);
        }
        self.validation_error = None;
    }

    pub fn push_str(&mut self, text: &str) {
        if let Some(remark) = self.remark_mut() {
            remark.push_str(text);
        }
        self.validation_error = None;
    }

    /// Delete the last grapheme
    pub fn backspace(&mut self) {
        if let Some(remark) = self.remark_mut()
            && let Some((idx, _)) = remark.grapheme_indices(true).next_back()
        {
            remark.truncate(idx);
        }
    }

    /// Switch approve <-> reject without losing the remark
    pub fn set_decision(&mut self, decision: Decision) {
        if let ConfirmState::Open(p) = &mut self.state {
            p.decision = decision;
        }
    }

    /// Open -> Submitting. Returns the action to send.
    pub fn submit(&mut self) -> Result<PendingAction, SubmitRefusal> {
        let pending = match &self.state {
            ConfirmState::Closed => return Err(SubmitRefusal::NotOpen),
            ConfirmState::Submitting(_) => return Err(SubmitRefusal::AlreadySubmitting),
            ConfirmState::Open(p) => p,
        };
        let Some(remark) = normalize_remark(&pending.remark) else {
            self.validation_error = Some(REMARK_REQUIRED);
            return Err(SubmitRefusal::EmptyRemark);
        };
        // The dialog keeps what was typed; the request gets the trimmed text
        let sent = PendingAction {
            remark: remark.to_string(),
            ..pending.clone()
        };
        self.validation_error = None;
        self.state = ConfirmState::Submitting(pending.clone());
        Ok(sent)
    }

    /// Submitting -> Closed, if the completion is for the outstanding action
    pub fn complete_success(&mut self, approval_request_id: u64) -> Option<PendingAction> {
        match std::mem::take(&mut self.state) {
            ConfirmState::Submitting(p) if p.approval_request_id() == approval_request_id => {
                Some(p)
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Submitting -> Open with target and remark preserved
    pub fn complete_failure(&mut self, approval_request_id: u64) -> bool {
        match std::mem::take(&mut self.state) {
            ConfirmState::Submitting(p) if p.approval_request_id() == approval_request_id => {
                self.state = ConfirmState::Open(p);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Open -> Closed without sending anything. Ignored while submitting.
    pub fn cancel(&mut self) -> bool {
        if self.is_open() {
            self.state = ConfirmState::Closed;
            self.validation_error = None;
            true
        } else {
            false
        }
    }

    /// Drop everything regardless of state (screen going away)
    pub fn reset(&mut self) {
        self.state = ConfirmState::Closed;
        self.validation_error = None;
    }
}
