use std::time::Duration;

use locale_host_api::{
    Document, Event, EventResponse, EventTarget, Key, ManualScheduler, MemoryDocument, NodeId,
    NodeSpec, Role,
};

use super::*;

struct Harness {
    doc: MemoryDocument,
    scheduler: ManualScheduler<PanelTask>,
    panel: DisclosurePanel,
    button: NodeId,
    content: NodeId,
    search: NodeId,
    outside: NodeId,
    items: Vec<NodeId>,
}

impl Harness {
    fn new() -> Self {
        Self::with_options(PanelOptions::default())
    }

    fn with_options(options: PanelOptions) -> Self {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let outside = doc.append(body, NodeSpec::new("main")).unwrap();
        let root = doc
            .append(body, NodeSpec::new("dropdown-localization-component"))
            .unwrap();
        let button = doc
            .append(
                root,
                NodeSpec::new("button")
                    .role(Role::Button)
                    .attr("aria-expanded", "false"),
            )
            .unwrap();
        let content = doc
            .append(root, NodeSpec::new("div").role(Role::Panel).hidden())
            .unwrap();
        let host = doc
            .append(content, NodeSpec::new("localization-form-component"))
            .unwrap();
        let form = doc
            .append(host, NodeSpec::new("form").role(Role::Form))
            .unwrap();
        let search = doc
            .append(form, NodeSpec::new("input").role(Role::Search))
            .unwrap();
        let list = doc
            .append(form, NodeSpec::new("ul").role(Role::CountryList))
            .unwrap();
        let mut items = Vec::new();
        for (name, iso) in [("France", "FR"), ("Germany", "DE")] {
            items.push(
                doc.append(
                    list,
                    NodeSpec::new("li")
                        .role(Role::CountryItem)
                        .data("value", iso)
                        .data("name", name)
                        .data("iso", iso),
                )
                .unwrap(),
            );
        }

        let panel = DisclosurePanel::mounted(&mut doc, root, options);
        Self {
            doc,
            scheduler: ManualScheduler::default(),
            panel,
            button,
            content,
            search,
            outside,
            items,
        }
    }

    fn dispatch(&mut self, event: Event) -> EventResponse {
        let mut response = EventResponse::IGNORED;
        let mut targets: Vec<EventTarget> = self
            .doc
            .propagation_path(event.target)
            .into_iter()
            .map(EventTarget::Node)
            .collect();
        targets.push(EventTarget::Document);

        for target in targets {
            for listener in self.doc.listeners_for(target, event.kind) {
                if self.panel.owns(listener) {
                    response.merge(self.panel.handle_event(
                        &mut self.doc,
                        &mut self.scheduler,
                        listener,
                        &event,
                    ));
                } else if let Some(list) = self.panel.list_mut()
                    && list.owns(listener)
                {
                    response.merge(list.handle_event(&mut self.doc, listener, &event));
                }
            }
            if response.propagation_stopped {
                break;
            }
        }
        response
    }

    fn advance(&mut self, by: Duration) {
        let deadline = self.scheduler.now() + by;
        while let Some((handle, task)) = self.scheduler.pop_due(deadline) {
            self.panel.run_task(&mut self.doc, handle, task);
        }
        self.scheduler.advance_to(deadline);
    }

    fn advance_ms(&mut self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    fn content_hidden(&self) -> bool {
        self.doc.has_attribute(self.content, "hidden")
    }

    fn type_query(&mut self, text: &str) {
        self.doc.set_value(self.search, text);
        self.dispatch(Event::input(self.search));
    }
}

#[test]
fn starts_closed() {
    let h = Harness::new();
    assert_eq!(h.panel.state(), PanelState::Closed);
    assert!(h.content_hidden());
    assert!(!h.panel.listening_to_document());
    assert_eq!(h.doc.document_listener_count(), 0);
}

#[test]
fn trigger_click_opens_and_suppresses_default() {
    let mut h = Harness::new();

    let response = h.dispatch(Event::click(h.button));

    assert!(response.default_prevented);
    assert_eq!(h.panel.state(), PanelState::Opening);
    assert!(!h.content_hidden());
    assert_eq!(h.doc.attribute(h.button, "aria-expanded"), Some("true"));
    assert_eq!(h.doc.attribute(h.panel.root(), "data-open"), Some("true"));
    assert!(!h.doc.has_class(h.content, "is-active"));
    assert_eq!(h.doc.document_listener_count(), 2);
}

#[test]
fn deferred_effects_focus_the_search_then_activate() {
    let mut h = Harness::new();
    h.dispatch(Event::click(h.button));

    h.advance(Duration::ZERO);
    assert_eq!(h.doc.active_element(), Some(h.search));
    assert!(!h.doc.has_class(h.content, "is-active"));

    h.advance_ms(16);
    assert!(h.doc.has_class(h.content, "is-active"));
    assert_eq!(h.panel.state(), PanelState::Open);
}

#[test]
fn close_hides_only_after_the_delay() {
    let mut h = Harness::new();
    h.dispatch(Event::click(h.button));
    h.advance_ms(50);

    h.dispatch(Event::click(h.button));
    assert_eq!(h.panel.state(), PanelState::Closing);
    assert_eq!(h.doc.attribute(h.button, "aria-expanded"), Some("false"));
    assert!(!h.doc.has_attribute(h.panel.root(), "data-open"));
    assert!(!h.doc.has_class(h.content, "is-active"));
    assert_eq!(h.doc.document_listener_count(), 0);

    h.advance_ms(219);
    assert!(!h.content_hidden());
    assert!(h.panel.hide_pending());

    h.advance_ms(1);
    assert!(h.content_hidden());
    assert_eq!(h.panel.state(), PanelState::Closed);
    assert!(!h.panel.hide_pending());
}

#[test]
fn reopening_inside_the_window_cancels_the_hide() {
    let mut h = Harness::new();
    h.panel.open(&mut h.doc, &mut h.scheduler);
    h.advance_ms(30);
    h.panel.close(&mut h.doc, &mut h.scheduler);
    h.advance_ms(100);
    h.panel.open(&mut h.doc, &mut h.scheduler);
    assert!(!h.panel.hide_pending());

    for _ in 0..50 {
        h.advance_ms(10);
        assert!(!h.content_hidden());
    }
    assert_eq!(h.panel.state(), PanelState::Open);
    assert!(h.doc.has_class(h.content, "is-active"));
}

#[test]
fn closing_again_replaces_the_pending_hide() {
    let mut h = Harness::with_options(PanelOptions {
        hide_delay: Duration::from_millis(100),
    });
    h.panel.open(&mut h.doc, &mut h.scheduler);
    h.panel.close(&mut h.doc, &mut h.scheduler);
    h.advance_ms(60);
    h.panel.open(&mut h.doc, &mut h.scheduler);
    h.panel.close(&mut h.doc, &mut h.scheduler);

    h.advance_ms(60);
    assert!(!h.content_hidden());
    assert_eq!(h.scheduler.pending_len(), 1);

    h.advance_ms(40);
    assert!(h.content_hidden());
}

#[test]
fn close_before_the_frame_never_activates() {
    let mut h = Harness::new();
    h.panel.open(&mut h.doc, &mut h.scheduler);
    h.panel.close(&mut h.doc, &mut h.scheduler);

    h.advance_ms(300);

    assert!(!h.doc.has_class(h.content, "is-active"));
    assert!(h.content_hidden());
    assert_eq!(h.doc.active_element(), None);
}

#[test]
fn open_twice_registers_one_listener_pair() {
    let mut h = Harness::new();
    h.panel.open(&mut h.doc, &mut h.scheduler);
    let pending = h.scheduler.pending_len();
    h.panel.open(&mut h.doc, &mut h.scheduler);

    assert_eq!(h.doc.document_listener_count(), 2);
    assert_eq!(h.scheduler.pending_len(), pending);
}

#[test]
fn close_resets_the_embedded_list() {
    let mut h = Harness::new();
    h.dispatch(Event::click(h.button));
    h.type_query("fr");
    assert!(h.doc.has_attribute(h.items[1], "hidden"));

    h.dispatch(Event::click(h.button));

    assert_eq!(h.doc.value(h.search), "");
    assert!(!h.doc.has_attribute(h.items[1], "hidden"));
}

#[test]
fn outside_click_dismisses_but_inside_click_does_not() {
    let mut h = Harness::new();
    h.dispatch(Event::click(h.button));

    h.dispatch(Event::click(h.search));
    assert!(h.panel.is_open());

    h.dispatch(Event::click(h.outside));
    assert_eq!(h.panel.state(), PanelState::Closing);
    assert_eq!(h.doc.document_listener_count(), 0);
}

#[test]
fn escape_dismisses_and_returns_focus_to_the_trigger() {
    let mut h = Harness::new();
    h.dispatch(Event::click(h.button));
    h.advance_ms(20);

    h.dispatch(Event::key_up(h.search, Key::Char('a')));
    assert!(h.panel.is_open());

    h.dispatch(Event::key_up(h.search, Key::Escape));
    assert!(!h.panel.is_open());
    assert_eq!(h.doc.active_element(), Some(h.button));
}

#[test]
fn escape_while_closed_is_not_observed() {
    let mut h = Harness::new();
    h.dispatch(Event::key_up(h.outside, Key::Escape));
    assert_eq!(h.panel.state(), PanelState::Closed);
    assert_eq!(h.doc.active_element(), None);
}

#[test]
fn unmount_cancels_the_hide_and_drops_every_listener() {
    let mut h = Harness::new();
    h.panel.open(&mut h.doc, &mut h.scheduler);
    h.panel.close(&mut h.doc, &mut h.scheduler);
    h.panel.open(&mut h.doc, &mut h.scheduler);

    h.panel.unmount_with_list(&mut h.doc, &mut h.scheduler);

    assert_eq!(h.scheduler.pending_len(), 0);
    assert_eq!(h.doc.listener_count(), 0);
    assert!(!h.panel.listening_to_document());
}

#[test]
fn plain_unmount_leaves_the_list_listening() {
    let mut h = Harness::new();
    h.panel.unmount(&mut h.doc, &mut h.scheduler);
    assert!(h.doc.listener_count() > 0);

    h.panel.unmount_with_list(&mut h.doc, &mut h.scheduler);
    assert_eq!(h.doc.listener_count(), 0);
}

#[test]
fn repeated_cycles_do_not_leak_document_listeners() {
    let mut h = Harness::new();
    for _ in 0..10 {
        h.dispatch(Event::click(h.button));
        h.advance_ms(5);
        h.dispatch(Event::click(h.outside));
        h.advance_ms(5);
    }
    assert_eq!(h.doc.document_listener_count(), 0);
    assert_eq!(h.doc.listener_count(), 1 + h.panel.list().map_or(0, |_| 5));
}

#[test]
fn panel_without_embedded_list_still_toggles() {
    let mut doc = MemoryDocument::new();
    let root = doc
        .append(doc.body(), NodeSpec::new("dropdown-localization-component"))
        .unwrap();
    let button = doc
        .append(root, NodeSpec::new("button").role(Role::Button))
        .unwrap();
    let content = doc
        .append(root, NodeSpec::new("div").role(Role::Panel).hidden())
        .unwrap();
    let mut scheduler = ManualScheduler::default();
    let mut panel = DisclosurePanel::mounted(&mut doc, root, PanelOptions::default());
    assert!(panel.list().is_none());

    panel.toggle(&mut doc, &mut scheduler);
    while let Some((handle, task)) = scheduler.pop_due(Duration::from_millis(16)) {
        panel.run_task(&mut doc, handle, task);
    }
    assert!(doc.has_class(content, "is-active"));
    assert_eq!(doc.active_element(), None);

    panel.toggle(&mut doc, &mut scheduler);
    assert_eq!(doc.attribute(button, "aria-expanded"), Some("false"));
}

#[test]
fn missing_trigger_makes_open_a_no_op() {
    let mut doc = MemoryDocument::new();
    let root = doc
        .append(doc.body(), NodeSpec::new("dropdown-localization-component"))
        .unwrap();
    let content = doc
        .append(root, NodeSpec::new("div").role(Role::Panel).hidden())
        .unwrap();
    let mut scheduler = ManualScheduler::default();
    let mut panel: DisclosurePanel = DisclosurePanel::new(root, PanelOptions::default());
    panel.mount(&mut doc);

    panel.open(&mut doc, &mut scheduler);

    assert_eq!(panel.state(), PanelState::Closed);
    assert!(doc.has_attribute(content, "hidden"));
    assert_eq!(scheduler.pending_len(), 0);
    assert_eq!(doc.listener_count(), 0);
}

#[test]
fn stale_task_handles_are_ignored() {
    let mut h = Harness::new();
    h.panel.open(&mut h.doc, &mut h.scheduler);
    h.panel.close(&mut h.doc, &mut h.scheduler);
    let stale = h.scheduler.pop_due(Duration::from_secs(1)).unwrap();
    h.panel.open(&mut h.doc, &mut h.scheduler);

    h.panel.run_task(&mut h.doc, stale.0, stale.1);

    assert!(!h.content_hidden());
    assert_eq!(h.panel.state(), PanelState::Opening);
}
