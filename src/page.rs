//! Headless page hosting the picker.
//!
//! [`Page`] plays the browser's part: it owns the document and the virtual
//! clock, routes events through the widgets' listeners along the propagation
//! path, performs default actions that were not prevented, and hands due tasks
//! back to the panel.

use std::time::Duration;

use locale_host_api::{
    Document, Event, EventKind, EventResponse, EventTarget, Key, ManualScheduler, MarkupError,
    MemoryDocument, NodeId, Role, Submission,
};
use locale_widgets::{DisclosurePanel, PanelOptions, PanelTask};
use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::Catalog;
use crate::markup::{self, StorefrontMarkup};

/// Timing knobs of a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    pub panel: PanelOptions,
    pub frame_interval: Duration,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            panel: PanelOptions::default(),
            frame_interval: locale_host_api::DEFAULT_FRAME_INTERVAL,
        }
    }
}

/// A country row as currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleCountry {
    pub value: String,
    pub name: String,
    pub selected: bool,
}

/// Observable state of the picker at one instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub state: &'static str,
    pub expanded: bool,
    pub content_hidden: bool,
    pub active: bool,
    pub query: String,
    pub visible: Vec<VisibleCountry>,
    pub announcement: String,
    pub no_results: bool,
    pub reset_visible: bool,
    pub popular_visible: bool,
    pub scrolled: bool,
    pub focused: Option<String>,
    pub language: String,
    pub submissions: Vec<Submission>,
}

/// Document, clock and mounted widgets of one storefront page.
pub struct Page {
    doc: MemoryDocument,
    scheduler: ManualScheduler<PanelTask>,
    panel: DisclosurePanel,
    markup: StorefrontMarkup,
}

impl Page {
    /// Render `catalog` and mount the widgets on it.
    pub fn new(catalog: &Catalog, options: PageOptions) -> Result<Self, MarkupError> {
        let mut doc = MemoryDocument::new();
        let markup = markup::render(&mut doc, catalog)?;
        let panel = DisclosurePanel::mounted(&mut doc, markup.dropdown, options.panel);
        Ok(Self {
            doc,
            scheduler: ManualScheduler::new(options.frame_interval),
            panel,
            markup,
        })
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.doc
    }

    pub fn markup(&self) -> &StorefrontMarkup {
        &self.markup
    }

    pub fn panel(&self) -> &DisclosurePanel {
        &self.panel
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn submissions(&self) -> &[Submission] {
        self.doc.submissions()
    }

    /// Deliver `event` to every listener on its path, then to document
    /// listeners, and run the default action unless a handler prevented it.
    pub fn dispatch(&mut self, event: Event) -> EventResponse {
        let mut response = EventResponse::IGNORED;
        let mut targets: Vec<EventTarget> = self
            .doc
            .propagation_path(event.target)
            .into_iter()
            .map(EventTarget::Node)
            .collect();
        targets.push(EventTarget::Document);

        'targets: for target in targets {
            for listener in self.doc.listeners_for(target, event.kind) {
                let handled = if self.panel.owns(listener) {
                    self.panel
                        .handle_event(&mut self.doc, &mut self.scheduler, listener, &event)
                } else if let Some(list) = self.panel.list_mut()
                    && list.owns(listener)
                {
                    list.handle_event(&mut self.doc, listener, &event)
                } else {
                    continue;
                };
                response.merge(handled);
            }
            if response.propagation_stopped {
                trace!(?event, "propagation stopped");
                break 'targets;
            }
        }

        if !response.default_prevented {
            self.default_action(&event);
        }
        response
    }

    /// Browser default actions the picker relies on suppressing.
    fn default_action(&mut self, event: &Event) {
        let implicit_submit = match event.kind {
            EventKind::KeyDown => {
                event.is_key(Key::Enter) && self.doc.tag(event.target) == Some("input")
            }
            EventKind::Click => {
                self.doc.tag(event.target) == Some("button")
                    && self.doc.attribute(event.target, "type").unwrap_or("submit") == "submit"
            }
            _ => false,
        };
        if !implicit_submit {
            return;
        }
        if let Some(form) = self.doc.closest(event.target, Role::Form) {
            debug!(node = %event.target, "implicit form submission");
            self.doc.submit(form);
        }
    }

    /// Run every task due within `by`, then move the clock to the deadline.
    pub fn advance(&mut self, by: Duration) {
        let deadline = self.scheduler.now().saturating_add(by);
        while let Some((handle, task)) = self.scheduler.pop_due(deadline) {
            self.panel.run_task(&mut self.doc, handle, task);
        }
        self.scheduler.advance_to(deadline);
    }

    /// Run zero-delay tasks without moving the clock.
    pub fn settle(&mut self) {
        self.advance(Duration::ZERO);
    }

    pub fn open(&mut self) {
        self.panel.open(&mut self.doc, &mut self.scheduler);
    }

    pub fn close(&mut self) {
        self.panel.close(&mut self.doc, &mut self.scheduler);
    }

    /// Activate the trigger button.
    pub fn click_trigger(&mut self) -> EventResponse {
        self.dispatch(Event::click(self.markup.button))
    }

    pub fn click(&mut self, node: NodeId) -> EventResponse {
        self.dispatch(Event::click(node))
    }

    pub fn click_outside(&mut self) -> EventResponse {
        self.dispatch(Event::click(self.markup.outside))
    }

    pub fn click_reset(&mut self) -> EventResponse {
        self.dispatch(Event::click(self.markup.reset))
    }

    /// Key press on the focused element (the body when nothing has focus).
    pub fn key_down(&mut self, key: Key) -> EventResponse {
        let target = self.focus_target();
        self.dispatch(Event::key_down(target, key))
    }

    pub fn key_up(&mut self, key: Key) -> EventResponse {
        let target = self.focus_target();
        self.dispatch(Event::key_up(target, key))
    }

    /// Full key stroke: key-down then key-up, each on the then-focused element.
    pub fn press(&mut self, key: Key) {
        self.key_down(key);
        self.key_up(key);
    }

    /// Replace the search field's text and fire an input event.
    pub fn type_text(&mut self, text: &str) {
        self.doc.set_value(self.markup.search, text);
        self.dispatch(Event::input(self.markup.search));
    }

    /// Append a typed character when the search field has focus.
    pub fn type_char(&mut self, ch: char) -> bool {
        if self.doc.active_element() != Some(self.markup.search) {
            return false;
        }
        let mut text = self.doc.value(self.markup.search).to_string();
        text.push(ch);
        self.type_text(&text);
        true
    }

    /// Remove the last character when the search field has focus.
    pub fn backspace(&mut self) -> bool {
        if self.doc.active_element() != Some(self.markup.search) {
            return false;
        }
        let mut text = self.doc.value(self.markup.search).to_string();
        if text.pop().is_none() {
            return false;
        }
        self.type_text(&text);
        true
    }

    pub fn scroll_list(&mut self, offset: u32) {
        self.doc.set_scroll_top(self.markup.country_list, offset);
        self.dispatch(Event::scroll(self.markup.country_list));
    }

    /// Pick `code` in the language select.
    pub fn change_language(&mut self, code: &str) {
        self.doc.set_value(self.markup.language, code);
        self.dispatch(Event::change(self.markup.language));
    }

    pub fn focus_search(&mut self) {
        self.doc.focus(self.markup.search);
    }

    /// Tear the widgets down, releasing every listener and pending task.
    pub fn unmount(&mut self) {
        self.panel.unmount_with_list(&mut self.doc, &mut self.scheduler);
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let doc = &self.doc;
        let markup = &self.markup;
        let selected = self
            .panel
            .list()
            .and_then(|list| list.selected_entry())
            .map(|entry| entry.node());
        let visible = self
            .panel
            .list()
            .map(|list| {
                list.visible_entries()
                    .map(|entry| VisibleCountry {
                        value: entry.value().to_string(),
                        name: entry.name().to_string(),
                        selected: Some(entry.node()) == selected,
                    })
                    .collect()
            })
            .unwrap_or_default();

        PageSnapshot {
            state: self.panel.state().as_str(),
            expanded: doc.attribute(markup.button, "aria-expanded") == Some("true"),
            content_hidden: doc.has_attribute(markup.content, "hidden"),
            active: doc.has_class(markup.content, "is-active"),
            query: doc.value(markup.search).to_string(),
            visible,
            announcement: doc.text(markup.live_region).to_string(),
            no_results: !doc.has_attribute(markup.no_results, "hidden"),
            reset_visible: !doc.has_attribute(markup.reset, "hidden"),
            popular_visible: !doc.has_attribute(markup.popular, "hidden"),
            scrolled: doc.has_class(markup.filter_bar, "is-scrolled"),
            focused: doc.active_element().map(|node| self.describe(node)),
            language: doc.value(markup.language).to_string(),
            submissions: doc.submissions().to_vec(),
        }
    }

    fn focus_target(&self) -> NodeId {
        self.doc.active_element().unwrap_or_else(|| self.doc.body())
    }

    fn describe(&self, node: NodeId) -> String {
        let markup = &self.markup;
        if node == markup.search {
            "search".to_string()
        } else if node == markup.button {
            "trigger".to_string()
        } else if let Some(value) = markup.value_of(node) {
            format!("country:{value}")
        } else {
            self.doc.tag(node).unwrap_or("unknown").to_string()
        }
    }
}

#[cfg(test)]
mod tests;
