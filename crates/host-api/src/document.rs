//! The read/write contract between the widgets and their host page.

use crate::event::{EventKind, EventTarget, ListenerId};
use crate::node::{NodeId, Role};

/// Attribute toggled to hide an element.
pub const HIDDEN: &str = "hidden";

/// Host page as seen by the widgets.
///
/// Every lookup is optional: the widgets treat a missing element as a
/// configuration without that feature rather than as an error.
pub trait Document {
    /// First descendant of `scope` (excluding `scope`) carrying `role`, in document order.
    fn query(&self, scope: NodeId, role: Role) -> Option<NodeId>;

    /// Every descendant of `scope` carrying `role`, in document order.
    fn query_all(&self, scope: NodeId, role: Role) -> Vec<NodeId>;

    /// Whether `node` is `ancestor` or lives inside it.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Nearest inclusive ancestor of `node` carrying `role`.
    fn closest(&self, node: NodeId, role: Role) -> Option<NodeId>;

    /// Lower-case tag name of `node`.
    fn tag(&self, node: NodeId) -> Option<&str>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn remove_attribute(&mut self, node: NodeId, name: &str);

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Add the attribute with an empty value when `on`, remove it otherwise.
    fn toggle_attribute(&mut self, node: NodeId, name: &str, on: bool) {
        if on {
            if !self.has_attribute(node, name) {
                self.set_attribute(node, name, "");
            }
        } else {
            self.remove_attribute(node, name);
        }
    }

    /// Value of the `data-<key>` attribute.
    fn dataset(&self, node: NodeId, key: &str) -> Option<&str>;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn set_class(&mut self, node: NodeId, class: &str, on: bool);

    /// Current value of a form control; empty for other elements.
    fn value(&self, node: NodeId) -> &str;

    fn set_value(&mut self, node: NodeId, value: &str);

    fn text(&self, node: NodeId) -> &str;

    fn set_text(&mut self, node: NodeId, text: &str);

    fn focus(&mut self, node: NodeId);

    /// Element currently holding input focus.
    fn active_element(&self) -> Option<NodeId>;

    fn scroll_top(&self, node: NodeId) -> u32;

    fn set_scroll_top(&mut self, node: NodeId, offset: u32);

    /// Synchronously submit `form`.
    fn submit(&mut self, form: NodeId);

    /// Register interest in `kind` events reaching `target`.
    fn listen(&mut self, target: EventTarget, kind: EventKind) -> ListenerId;

    /// Drop a registration. Unknown ids are ignored.
    fn unlisten(&mut self, id: ListenerId);
}
