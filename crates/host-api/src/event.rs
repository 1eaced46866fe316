//! Discrete UI events delivered by the host to the widgets.

use serde::Serialize;

use crate::node::NodeId;

/// Identifier of a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// Where a listener is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Node(NodeId),
    /// The document itself; sees every event after it bubbled through the tree.
    Document,
}

/// Event categories the widgets listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    Click,
    KeyDown,
    KeyUp,
    Input,
    Change,
    Scroll,
}

/// Keys the widgets distinguish.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Tab,
    Backspace,
    Char(char),
}

/// A single event dispatched at `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: NodeId,
    pub key: Option<Key>,
}

impl Event {
    pub fn click(target: NodeId) -> Self {
        Self {
            kind: EventKind::Click,
            target,
            key: None,
        }
    }

    pub fn key_down(target: NodeId, key: Key) -> Self {
        Self {
            kind: EventKind::KeyDown,
            target,
            key: Some(key),
        }
    }

    pub fn key_up(target: NodeId, key: Key) -> Self {
        Self {
            kind: EventKind::KeyUp,
            target,
            key: Some(key),
        }
    }

    pub fn input(target: NodeId) -> Self {
        Self {
            kind: EventKind::Input,
            target,
            key: None,
        }
    }

    pub fn change(target: NodeId) -> Self {
        Self {
            kind: EventKind::Change,
            target,
            key: None,
        }
    }

    pub fn scroll(target: NodeId) -> Self {
        Self {
            kind: EventKind::Scroll,
            target,
            key: None,
        }
    }

    /// Whether this event carries `key`.
    pub fn is_key(&self, key: Key) -> bool {
        self.key == Some(key)
    }
}

/// What a handler asked the host to do with the event after it ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The host must skip the event's default action.
    pub default_prevented: bool,
    /// The host must not deliver the event to further ancestors.
    pub propagation_stopped: bool,
}

impl EventResponse {
    /// Response of a handler that did not touch the event.
    pub const IGNORED: Self = Self {
        default_prevented: false,
        propagation_stopped: false,
    };

    #[must_use]
    pub fn prevent_default(mut self) -> Self {
        self.default_prevented = true;
        self
    }

    #[must_use]
    pub fn stop_propagation(mut self) -> Self {
        self.propagation_stopped = true;
        self
    }

    /// Fold another handler's response into this one.
    pub fn merge(&mut self, other: EventResponse) {
        self.default_prevented |= other.default_prevented;
        self.propagation_stopped |= other.propagation_stopped;
    }
}
