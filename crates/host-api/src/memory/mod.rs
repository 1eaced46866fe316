//! In-memory host document.
//!
//! Keeps a small element tree with attributes, classes, form values, focus,
//! scroll offsets and listener registrations. Hosts route events with
//! [`MemoryDocument::propagation_path`] and [`MemoryDocument::listeners_for`];
//! form submissions are recorded instead of navigating.

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::{debug, trace};

use crate::document::Document;
use crate::error::MarkupError;
use crate::event::{EventKind, EventTarget, ListenerId};
use crate::node::{Marker, NodeId, REF_ATTRIBUTE, Role};

#[cfg(test)]
mod tests;

/// Description of an element to append with [`MemoryDocument::append`].
#[derive(Clone, Debug, Default)]
pub struct NodeSpec {
    tag: String,
    attributes: IndexMap<String, String>,
    classes: IndexSet<String>,
    value: String,
    text: String,
}

impl NodeSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            ..Self::default()
        }
    }

    /// Apply the markup convention of `role`. Tag-based roles must be created
    /// with the matching tag; only their class part is added here.
    #[must_use]
    pub fn role(self, role: Role) -> Self {
        match role.marker() {
            Marker::Ref(value) => self.attr(REF_ATTRIBUTE, value),
            Marker::Class(class) | Marker::TagClass(_, class) => self.class(class),
            Marker::Tag(_) => self,
        }
    }

    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set `data-<key>`.
    #[must_use]
    pub fn data(self, key: &str, value: impl Into<String>) -> Self {
        self.attr(format!("data-{key}"), value)
    }

    #[must_use]
    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.insert(class.into());
        self
    }

    #[must_use]
    pub fn hidden(self) -> Self {
        self.attr("hidden", "")
    }

    #[must_use]
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

#[derive(Debug)]
struct Element {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: IndexMap<String, String>,
    classes: IndexSet<String>,
    value: String,
    text: String,
    scroll_top: u32,
}

#[derive(Clone, Copy, Debug)]
struct Registration {
    target: EventTarget,
    kind: EventKind,
}

/// A recorded form submission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub form: NodeId,
    /// Named controls of the form and their values at submission time.
    pub fields: IndexMap<String, String>,
}

/// Element tree implementing [`Document`].
#[derive(Debug)]
pub struct MemoryDocument {
    elements: Vec<Element>,
    listeners: IndexMap<ListenerId, Registration>,
    next_listener: u64,
    active: Option<NodeId>,
    submissions: Vec<Submission>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document containing only an empty `body`.
    pub fn new() -> Self {
        Self {
            elements: vec![Element {
                tag: "body".to_string(),
                parent: None,
                children: Vec::new(),
                attributes: IndexMap::new(),
                classes: IndexSet::new(),
                value: String::new(),
                text: String::new(),
                scroll_top: 0,
            }],
            listeners: IndexMap::new(),
            next_listener: 0,
            active: None,
            submissions: Vec::new(),
        }
    }

    /// The `body` element.
    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, spec: NodeSpec) -> Result<NodeId, MarkupError> {
        if spec.tag.is_empty() {
            return Err(MarkupError::EmptyTag);
        }
        if self.element(parent).is_none() {
            return Err(MarkupError::UnknownNode { node: parent });
        }

        let id = NodeId(self.elements.len() as u32);
        self.elements.push(Element {
            tag: spec.tag,
            parent: Some(parent),
            children: Vec::new(),
            attributes: spec.attributes,
            classes: spec.classes,
            value: spec.value,
            text: spec.text,
            scroll_top: 0,
        });
        self.elements[parent.0 as usize].children.push(id);
        Ok(id)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?.parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node)
            .map(|element| element.children.as_slice())
            .unwrap_or_default()
    }

    /// Whether `node` carries the markup convention of `role`.
    pub fn matches(&self, node: NodeId, role: Role) -> bool {
        let Some(element) = self.element(node) else {
            return false;
        };
        match role.marker() {
            Marker::Ref(value) => element
                .attributes
                .get(REF_ATTRIBUTE)
                .is_some_and(|found| found == value),
            Marker::Class(class) => element.classes.contains(class),
            Marker::Tag(tag) => element.tag == tag,
            Marker::TagClass(tag, class) => element.tag == tag && element.classes.contains(class),
        }
    }

    /// First descendant of `scope` whose attribute `name` equals `value`.
    pub fn find_by_attribute(&self, scope: NodeId, name: &str, value: &str) -> Option<NodeId> {
        self.descendants(scope).into_iter().find(|node| {
            self.element(*node)
                .and_then(|element| element.attributes.get(name))
                .is_some_and(|found| found == value)
        })
    }

    /// Descendants of `scope` in document order, excluding `scope`.
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    /// `target` followed by its ancestors up to `body`.
    pub fn propagation_path(&self, target: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.element(target).map(|_| target);
        while let Some(node) = current {
            path.push(node);
            current = self.parent(node);
        }
        path
    }

    /// Listeners registered on `target` for `kind`, in registration order.
    pub fn listeners_for(&self, target: EventTarget, kind: EventKind) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|(_, registration)| registration.target == target && registration.kind == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Registrations attached to the document itself.
    pub fn document_listener_count(&self) -> usize {
        self.listeners
            .values()
            .filter(|registration| registration.target == EventTarget::Document)
            .count()
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Drop focus without moving it elsewhere.
    pub fn blur(&mut self) {
        self.active = None;
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.elements.get(node.0 as usize)
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.elements.get_mut(node.0 as usize)
    }
}

impl Document for MemoryDocument {
    fn query(&self, scope: NodeId, role: Role) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|node| self.matches(*node, role))
    }

    fn query_all(&self, scope: NodeId, role: Role) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| self.matches(*node, role))
            .collect()
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.propagation_path(node).contains(&ancestor)
    }

    fn closest(&self, node: NodeId, role: Role) -> Option<NodeId> {
        self.propagation_path(node)
            .into_iter()
            .find(|candidate| self.matches(*candidate, role))
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|element| element.tag.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(element) = self.element_mut(node) {
            element.attributes.shift_remove(name);
        }
    }

    fn dataset(&self, node: NodeId, key: &str) -> Option<&str> {
        self.attribute(node, &format!("data-{key}"))
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.classes.contains(class))
    }

    fn set_class(&mut self, node: NodeId, class: &str, on: bool) {
        if let Some(element) = self.element_mut(node) {
            if on {
                element.classes.insert(class.to_string());
            } else {
                element.classes.shift_remove(class);
            }
        }
    }

    fn value(&self, node: NodeId) -> &str {
        self.element(node)
            .map(|element| element.value.as_str())
            .unwrap_or_default()
    }

    fn set_value(&mut self, node: NodeId, value: &str) {
        if let Some(element) = self.element_mut(node) {
            element.value = value.to_string();
        }
    }

    fn text(&self, node: NodeId) -> &str {
        self.element(node)
            .map(|element| element.text.as_str())
            .unwrap_or_default()
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(element) = self.element_mut(node) {
            element.text = text.to_string();
        }
    }

    fn focus(&mut self, node: NodeId) {
        if self.element(node).is_some() {
            trace!(%node, "focus");
            self.active = Some(node);
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    fn scroll_top(&self, node: NodeId) -> u32 {
        self.element(node).map_or(0, |element| element.scroll_top)
    }

    fn set_scroll_top(&mut self, node: NodeId, offset: u32) {
        if let Some(element) = self.element_mut(node) {
            element.scroll_top = offset;
        }
    }

    fn submit(&mut self, form: NodeId) {
        let fields: IndexMap<String, String> = self
            .descendants(form)
            .into_iter()
            .filter_map(|node| {
                let element = self.element(node)?;
                let name = element.attributes.get("name")?;
                Some((name.clone(), element.value.clone()))
            })
            .collect();
        debug!(%form, ?fields, "form submitted");
        self.submissions.push(Submission { form, fields });
    }

    fn listen(&mut self, target: EventTarget, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, Registration { target, kind });
        trace!(?id, ?target, ?kind, "listener registered");
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        if self.listeners.shift_remove(&id).is_some() {
            trace!(?id, "listener removed");
        }
    }
}
