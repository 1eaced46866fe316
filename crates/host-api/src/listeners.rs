//! Ownership of listener registrations.

use crate::document::Document;
use crate::event::{EventKind, EventTarget, ListenerId};

/// Listener registrations owned by one widget, tagged with the widget's own
/// handler discriminant.
///
/// Registrations are acquired one by one and released together, so a widget
/// that mounted only part of its handlers still tears down cleanly.
#[derive(Debug)]
pub struct ListenerSet<H> {
    entries: Vec<(ListenerId, H)>,
}

impl<H> Default for ListenerSet<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<H: Copy> ListenerSet<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind` events on `target`.
    pub fn listen(
        &mut self,
        doc: &mut dyn Document,
        target: EventTarget,
        kind: EventKind,
        handler: H,
    ) -> ListenerId {
        let id = doc.listen(target, kind);
        self.entries.push((id, handler));
        id
    }

    /// Handler registered under `id`, if this set owns it.
    pub fn handler(&self, id: ListenerId) -> Option<H> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == id)
            .map(|(_, handler)| *handler)
    }

    pub fn owns(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|(entry, _)| *entry == id)
    }

    /// Deregister everything. Calling it on an empty set does nothing.
    pub fn release(&mut self, doc: &mut dyn Document) {
        for (id, _) in self.entries.drain(..) {
            doc.unlisten(id);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
