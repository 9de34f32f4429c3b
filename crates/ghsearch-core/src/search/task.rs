use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(pub u64);

#[derive(Debug, Default)]
pub struct RequestSeq {
    next: u64,
}

impl RequestSeq {
    pub fn next_id(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// The one outstanding search request of a widget (stored in `SearchState`,
/// mutated only by its transitions).
#[derive(Debug, Default, Clone)]
pub struct PendingRequest {
    pub active: Option<RequestId>,
    pub cancel: Option<CancellationToken>,
}

impl PendingRequest {
    pub fn start(&mut self, id: RequestId, cancel: CancellationToken) {
        self.active = Some(id);
        self.cancel = Some(cancel);
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.active == Some(id)
    }

    /// Clears the slot if `id` is the active request.
    pub fn finish_if_active(&mut self, id: RequestId) -> bool {
        let ok = self.is_current(id);
        if ok {
            self.clear();
        }
        ok
    }

    /// Forgets the request and hands back its token so the caller can cancel it.
    pub fn take_cancel(&mut self) -> Option<CancellationToken> {
        self.active = None;
        self.cancel.take()
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.cancel = None;
    }
}
