//! Searchable country list with roving keyboard selection.
//!
//! The list snapshots its entries once at mount. Filtering only toggles the
//! `hidden` flag of each entry, so the snapshot stays stable for the lifetime
//! of the mount and navigation works on the currently visible subset.

mod entry;
mod navigation;


use locale_host_api::document::HIDDEN;
use locale_host_api::{
    Document, Event, EventKind, EventResponse, EventTarget, Key, ListenerId, ListenerSet, NodeId,
    Role,
};
use tracing::{debug, trace};

use crate::capability::EmbeddedList;

pub use entry::{CountryEntry, SearchQuery};
pub use navigation::Direction;

/// Announcement used when the host does not provide `data-label-results-count`.
pub const DEFAULT_RESULTS_TEMPLATE: &str = "Found [count] country or region results.";

const TEMPLATE_KEY: &str = "label-results-count";
const COUNT_PLACEHOLDER: &str = "[count]";
const ARIA_SELECTED: &str = "aria-selected";
const ARIA_ACTIVE_DESCENDANT: &str = "aria-activedescendant";
const IS_SEARCHING: &str = "is-searching";
const IS_SCROLLED: &str = "is-scrolled";

/// Outcome of a filter pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSummary {
    pub query: SearchQuery,
    pub visible: usize,
    /// Text written to the live region.
    pub announcement: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Handler {
    ListClick,
    ListKeyDown,
    ListScroll,
    SearchInput,
    SearchKeyDown,
    ResetClick,
    LanguageChange,
}

/// Elements found inside the host subtree at mount. All optional.
#[derive(Clone, Copy, Debug, Default)]
struct Parts {
    form: Option<NodeId>,
    country_list: Option<NodeId>,
    country_input: Option<NodeId>,
    search: Option<NodeId>,
    reset_button: Option<NodeId>,
    live_region: Option<NodeId>,
    no_results: Option<NodeId>,
    language_input: Option<NodeId>,
    wrapper: Option<NodeId>,
    popular: Option<NodeId>,
    filter_bar: Option<NodeId>,
}

impl Parts {
    fn resolve(doc: &dyn Document, root: NodeId) -> Self {
        Self {
            form: doc.query(root, Role::Form),
            country_list: doc.query(root, Role::CountryList),
            country_input: doc.query(root, Role::CountryInput),
            search: doc.query(root, Role::Search),
            reset_button: doc.query(root, Role::ResetButton),
            live_region: doc.query(root, Role::LiveRegion),
            no_results: doc.query(root, Role::NoResultsMessage),
            language_input: doc.query(root, Role::LanguageInput),
            wrapper: doc.query(root, Role::Wrapper),
            popular: doc.query(root, Role::PopularCountries),
            filter_bar: doc.query(root, Role::CountryFilter),
        }
    }
}

/// Filterable country list mounted on a host element.
#[derive(Debug)]
pub struct SelectionList {
    root: NodeId,
    parts: Parts,
    entries: Vec<CountryEntry>,
    selected: Option<usize>,
    listeners: ListenerSet<Handler>,
    mounted: bool,
}

impl SelectionList {
    /// Create an unmounted list for the host element `root`.
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            parts: Parts::default(),
            entries: Vec::new(),
            selected: None,
            listeners: ListenerSet::new(),
            mounted: false,
        }
    }

    /// Create and mount in one step.
    pub fn mounted(doc: &mut dyn Document, root: NodeId) -> Self {
        let mut list = Self::new(root);
        list.mount(doc);
        list
    }

    /// Snapshot the entries and wire the input handlers.
    ///
    /// Mounting twice without an intervening [`SelectionList::unmount`] does
    /// nothing.
    pub fn mount(&mut self, doc: &mut dyn Document) {
        if self.mounted {
            debug!(root = %self.root, "selection list already mounted");
            return;
        }

        self.parts = Parts::resolve(doc, self.root);
        self.entries = doc
            .query_all(self.root, Role::CountryItem)
            .into_iter()
            .map(|node| CountryEntry::from_node(doc, node))
            .collect();
        self.selected = None;

        if let Some(list) = self.parts.country_list {
            let target = EventTarget::Node(list);
            self.listeners
                .listen(doc, target, EventKind::Click, Handler::ListClick);
            self.listeners
                .listen(doc, target, EventKind::KeyDown, Handler::ListKeyDown);
            self.listeners
                .listen(doc, target, EventKind::Scroll, Handler::ListScroll);
        }
        if let Some(search) = self.parts.search {
            let target = EventTarget::Node(search);
            self.listeners
                .listen(doc, target, EventKind::Input, Handler::SearchInput);
            self.listeners
                .listen(doc, target, EventKind::KeyDown, Handler::SearchKeyDown);
        }
        if let Some(reset) = self.parts.reset_button {
            self.listeners.listen(
                doc,
                EventTarget::Node(reset),
                EventKind::Click,
                Handler::ResetClick,
            );
        }
        if let Some(language) = self.parts.language_input {
            self.listeners.listen(
                doc,
                EventTarget::Node(language),
                EventKind::Change,
                Handler::LanguageChange,
            );
        }

        self.mounted = true;
        debug!(
            root = %self.root,
            entries = self.entries.len(),
            listeners = self.listeners.len(),
            "selection list mounted"
        );
    }

    /// Release every handler wired by [`SelectionList::mount`].
    pub fn unmount(&mut self, doc: &mut dyn Document) {
        self.listeners.release(doc);
        self.mounted = false;
        debug!(root = %self.root, "selection list unmounted");
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether `listener` belongs to this list.
    pub fn owns(&self, listener: ListenerId) -> bool {
        self.listeners.owns(listener)
    }

    /// Every snapshotted entry, hidden ones included.
    pub fn entries(&self) -> &[CountryEntry] {
        &self.entries
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = &CountryEntry> {
        self.entries.iter().filter(|entry| entry.is_visible())
    }

    /// Entry currently carrying the roving selection.
    pub fn selected_entry(&self) -> Option<&CountryEntry> {
        self.selected.and_then(|index| self.entries.get(index))
    }

    /// Dispatch an event delivered to one of this list's listeners.
    pub fn handle_event(
        &mut self,
        doc: &mut dyn Document,
        listener: ListenerId,
        event: &Event,
    ) -> EventResponse {
        let Some(handler) = self.listeners.handler(listener) else {
            return EventResponse::IGNORED;
        };
        trace!(?handler, ?event, "selection list event");

        match handler {
            Handler::ListClick => self.on_list_click(doc, event),
            Handler::ListKeyDown => self.on_list_key_down(doc, event),
            Handler::ListScroll => self.on_list_scroll(doc, event),
            Handler::SearchInput => {
                self.filter_from_search(doc);
                EventResponse::IGNORED
            }
            Handler::SearchKeyDown => {
                if event.is_key(Key::Enter) {
                    return EventResponse::IGNORED.prevent_default();
                }
                self.on_list_key_down(doc, event)
            }
            Handler::ResetClick => self.on_reset_click(doc),
            Handler::LanguageChange => self.on_language_change(doc, event),
        }
    }

    /// Recompute visibility for `query` and refresh every dependent element.
    pub fn apply_filter(&mut self, doc: &mut dyn Document, query: &str) -> FilterSummary {
        let query = SearchQuery::new(query);
        let mut visible = 0;

        for entry in &mut self.entries {
            let matched = query.matches(entry);
            entry.set_visible(matched);
            doc.toggle_attribute(entry.node(), HIDDEN, !matched);
            if matched {
                visible += 1;
            }
        }

        let searching = !query.is_empty();
        if let Some(wrapper) = self.parts.wrapper {
            doc.set_class(wrapper, IS_SEARCHING, searching);
        }
        if let Some(reset) = self.parts.reset_button {
            doc.toggle_attribute(reset, HIDDEN, !searching);
        }
        if let Some(popular) = self.parts.popular {
            doc.toggle_attribute(popular, HIDDEN, searching);
        }
        if let Some(no_results) = self.parts.no_results {
            doc.toggle_attribute(no_results, HIDDEN, visible > 0);
        }

        let template = doc
            .dataset(self.root, TEMPLATE_KEY)
            .filter(|template| !template.is_empty())
            .unwrap_or(DEFAULT_RESULTS_TEMPLATE);
        let announcement = template.replacen(COUNT_PLACEHOLDER, &visible.to_string(), 1);
        if let Some(live_region) = self.parts.live_region {
            doc.set_text(live_region, &announcement);
        }

        self.set_selected(doc, None);

        if let Some(list) = self.parts.country_list {
            doc.set_scroll_top(list, 0);
        }

        debug!(query = query.as_str(), visible, "filter applied");
        FilterSummary {
            query,
            visible,
            announcement,
        }
    }

    /// Move the roving selection one visible entry in `direction`, wrapping at
    /// both ends, and focus the new entry.
    pub fn move_focus(&mut self, doc: &mut dyn Document, direction: Direction) {
        let visible: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.is_visible())
            .map(|(index, _)| index)
            .collect();
        if visible.is_empty() {
            return;
        }

        let active = doc.active_element();
        let current = self
            .selected
            .and_then(|selected| visible.iter().position(|index| *index == selected))
            .or_else(|| {
                let active = active?;
                visible
                    .iter()
                    .position(|index| self.entries[*index].node() == active)
            })
            .unwrap_or(0);

        let next = visible[direction.step(current, visible.len())];
        self.set_selected(doc, Some(next));
        doc.focus(self.entries[next].node());
        trace!(?direction, value = self.entries[next].value(), "roving focus moved");
    }

    /// Write `value` into the hidden country field and submit the form.
    ///
    /// Returns whether a submission happened; an empty value or a missing
    /// field or form makes this a no-op.
    pub fn select_item(&self, doc: &mut dyn Document, value: &str) -> bool {
        let (Some(input), Some(form)) = (self.parts.country_input, self.parts.form) else {
            debug!(value, "country selection skipped: form or field missing");
            return false;
        };
        if value.is_empty() {
            return false;
        }

        doc.set_value(input, value);
        doc.submit(form);
        debug!(value, "country submitted");
        true
    }

    /// Focus the search field, or the first visible entry without one.
    pub fn focus_search_input(&self, doc: &mut dyn Document) {
        if let Some(search) = self.parts.search {
            doc.focus(search);
            return;
        }
        if let Some(first) = self.visible_entries().next() {
            doc.focus(first.node());
        }
    }

    /// Clear a non-empty search field and show every entry again.
    pub fn reset_form(&mut self, doc: &mut dyn Document) {
        let Some(search) = self.parts.search else {
            return;
        };
        if doc.value(search).is_empty() {
            return;
        }
        doc.set_value(search, "");
        self.apply_filter(doc, "");
    }

    fn filter_from_search(&mut self, doc: &mut dyn Document) -> Option<FilterSummary> {
        let search = self.parts.search?;
        let query = doc.value(search).to_string();
        Some(self.apply_filter(doc, &query))
    }

    fn set_selected(&mut self, doc: &mut dyn Document, selected: Option<usize>) {
        self.selected = selected;
        for (index, entry) in self.entries.iter().enumerate() {
            let flag = if Some(index) == selected {
                "true"
            } else {
                "false"
            };
            doc.set_attribute(entry.node(), ARIA_SELECTED, flag);
        }

        if let Some(search) = self.parts.search {
            let descendant = selected
                .and_then(|index| doc.attribute(self.entries[index].node(), "id"))
                .unwrap_or_default()
                .to_string();
            doc.set_attribute(search, ARIA_ACTIVE_DESCENDANT, &descendant);
        }
    }

    fn on_list_key_down(&mut self, doc: &mut dyn Document, event: &Event) -> EventResponse {
        if self.parts.country_list.is_none() {
            return EventResponse::IGNORED;
        }

        match event.key {
            Some(Key::ArrowUp) | Some(Key::ArrowDown) => {
                let direction = if event.is_key(Key::ArrowUp) {
                    Direction::Previous
                } else {
                    Direction::Next
                };
                self.move_focus(doc, direction);
                EventResponse::IGNORED.prevent_default().stop_propagation()
            }
            Some(Key::Enter) => {
                let Some(value) = self.selected_entry().map(|entry| entry.value().to_string())
                else {
                    return EventResponse::IGNORED;
                };
                self.select_item(doc, &value);
                EventResponse::IGNORED.prevent_default().stop_propagation()
            }
            _ => EventResponse::IGNORED,
        }
    }

    fn on_list_click(&mut self, doc: &mut dyn Document, event: &Event) -> EventResponse {
        let Some(item) = doc.closest(event.target, Role::CountryItem) else {
            return EventResponse::IGNORED;
        };
        if doc.has_attribute(item, HIDDEN) {
            return EventResponse::IGNORED;
        }
        let value = doc.dataset(item, "value").unwrap_or_default().to_string();
        self.select_item(doc, &value);
        EventResponse::IGNORED
    }

    fn on_list_scroll(&mut self, doc: &mut dyn Document, event: &Event) -> EventResponse {
        if let Some(filter_bar) = self.parts.filter_bar {
            let scrolled = doc.scroll_top(event.target) > 0;
            doc.set_class(filter_bar, IS_SCROLLED, scrolled);
        }
        EventResponse::IGNORED
    }

    fn on_reset_click(&mut self, doc: &mut dyn Document) -> EventResponse {
        let response = EventResponse::IGNORED.prevent_default();
        let Some(search) = self.parts.search else {
            return response;
        };
        doc.set_value(search, "");
        self.apply_filter(doc, "");
        doc.focus(search);
        response
    }

    fn on_language_change(&mut self, doc: &mut dyn Document, event: &Event) -> EventResponse {
        let (Some(form), Some(language)) = (self.parts.form, self.parts.language_input) else {
            return EventResponse::IGNORED;
        };
        if doc.tag(event.target) != Some("select") {
            return EventResponse::IGNORED;
        }

        let value = doc.value(event.target).to_string();
        doc.set_value(language, &value);
        doc.submit(form);
        debug!(value, "language submitted");
        EventResponse::IGNORED
    }
}

impl EmbeddedList for SelectionList {
    fn focus_search_input(&self, doc: &mut dyn Document) {
        SelectionList::focus_search_input(self, doc);
    }

    fn reset_form(&mut self, doc: &mut dyn Document) {
        SelectionList::reset_form(self, doc);
    }
}
