use std::collections::HashMap;

use indexmap::IndexMap;

use crate::model::InboxItem;

/// Identifies one inbox fetch. Tickets are issued in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

/// Authoritative list of pending items for one inbox screen.
///
/// The store performs no I/O and cannot fail. Readers always see either the
/// previous full list or the next full list, never a mix.
#[derive(Debug, Default)]
pub struct InboxStore {
    items: IndexMap<u64, InboxItem>,
    loading: bool,
    global_action_loading: bool,
    /// Last ticket handed out by `begin_fetch`
    issued: u64,
    /// Last ticket whose result was applied
    applied: u64,
    /// Locally removed ids -> value of `issued` at removal time
    removed: HashMap<u64, u64>,
}

impl InboxStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire collection. Order is preserved; a repeated id
    /// keeps its first position and its last value.
    pub fn load(&mut self, items: Vec<InboxItem>) {
        self.items = items
            .into_iter()
            .map(|item| (item.approval_request_id, item))
            .collect();
    }

    /// Remove the item with this request id. Absent ids are a no-op.
    ///
    /// The removal is remembered until a fetch issued after it is applied,
    /// so an older in-flight fetch cannot bring the item back.
    pub fn remove(&mut self, approval_request_id: u64) -> Option<InboxItem> {
        self.removed.insert(approval_request_id, self.issued);
        self.items.shift_remove(&approval_request_id)
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_global_action_loading(&mut self, loading: bool) {
        self.global_action_loading = loading;
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn global_action_loading(&self) -> bool {
        self.global_action_loading
    }

    /// Items in backend order
    pub fn items(&self) -> impl ExactSizeIterator<Item = &InboxItem> {
        self.items.values()
    }

    pub fn get(&self, approval_request_id: u64) -> Option<&InboxItem> {
        self.items.get(&approval_request_id)
    }

    pub fn get_index(&self, index: usize) -> Option<&InboxItem> {
        self.items.get_index(index).map(|(_, item)| item)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Start a fetch. The returned ticket must be handed back to
    /// [`apply_fetch`](Self::apply_fetch) with the result.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Whether `ticket` is the most recently issued fetch
    pub fn is_latest(&self, ticket: FetchTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Apply a fetch result against the current snapshot.
    ///
    /// Returns `false` (and changes nothing) when a newer fetch has already
    /// been applied. Items removed locally at or after the ticket was issued
    /// are dropped from the result: the backend may have answered before it
    /// saw the decision.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, items: Vec<InboxItem>) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        let removed = &self.removed;
        let items: Vec<InboxItem> = items
            .into_iter()
            .filter(|item| {
                removed
                    .get(&item.approval_request_id)
                    .is_none_or(|&at| at < ticket.0)
            })
            .collect();
        self.load(items);
        self.applied = ticket.0;
        // Fetches issued after a removal already reflect it
        self.removed.retain(|_, &mut at| at > ticket.0);
        true
    }
}
