//! Dropdown shell around an embedded selection list.
//!
//! Opening is immediate except for the visual activation, which waits for the
//! next animation frame so a CSS transition can run. Closing removes the
//! activation right away and hides the content only after the hide delay, so
//! the transition can play out. A reopen inside that window cancels the hide.

#[cfg(test)]
mod tests;

use std::time::Duration;

use locale_host_api::document::HIDDEN;
use locale_host_api::{
    Document, Event, EventKind, EventResponse, EventTarget, Key, ListenerId, ListenerSet, NodeId,
    Role, Scheduler, TaskHandle,
};
use tracing::{debug, trace};

use crate::capability::EmbeddedList;
use crate::selection_list::SelectionList;

/// Time between closing and hiding the content.
pub const DEFAULT_HIDE_DELAY: Duration = Duration::from_millis(220);

const IS_ACTIVE: &str = "is-active";
const ARIA_EXPANDED: &str = "aria-expanded";
const DATA_OPEN: &str = "data-open";

/// Tunables for a [`DisclosurePanel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanelOptions {
    pub hide_delay: Duration,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            hide_delay: DEFAULT_HIDE_DELAY,
        }
    }
}

/// Lifecycle of the panel content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    #[default]
    Closed,
    /// Content shown, waiting for the activation frame.
    Opening,
    Open,
    /// Activation removed, waiting for the deferred hide.
    Closing,
}

impl PanelState {
    pub fn is_open(self) -> bool {
        matches!(self, PanelState::Opening | PanelState::Open)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PanelState::Closed => "closed",
            PanelState::Opening => "opening",
            PanelState::Open => "open",
            PanelState::Closing => "closing",
        }
    }
}

/// Deferred work scheduled by a panel and handed back through
/// [`DisclosurePanel::run_task`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelTask {
    /// Apply the active style after the content became visible.
    Activate,
    /// Move focus into the embedded list.
    FocusList,
    /// Hide the content once the closing transition had time to run.
    Hide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Handler {
    Toggle,
    OutsideClick,
    Escape,
}

/// Disclosure dropdown hosting an [`EmbeddedList`].
#[derive(Debug)]
pub struct DisclosurePanel<L = SelectionList> {
    root: NodeId,
    button: Option<NodeId>,
    content: Option<NodeId>,
    list: Option<L>,
    options: PanelOptions,
    state: PanelState,
    button_listeners: ListenerSet<Handler>,
    /// Document-level click + key-up pair, held only while open.
    document_subscription: Option<ListenerSet<Handler>>,
    hide_timer: Option<TaskHandle>,
    activation_frame: Option<TaskHandle>,
    focus_task: Option<TaskHandle>,
    mounted: bool,
}

impl DisclosurePanel<SelectionList> {
    /// Mount a panel on `root` together with the selection list found inside it.
    pub fn mounted(doc: &mut dyn Document, root: NodeId, options: PanelOptions) -> Self {
        let mut panel = Self::new(root, options);
        if let Some(host) = doc.query(root, Role::LocalizationForm) {
            panel.list = Some(SelectionList::mounted(doc, host));
        }
        panel.mount(doc);
        panel
    }

    /// Unmount the panel and the list that [`DisclosurePanel::mounted`] mounted.
    pub fn unmount_with_list(
        &mut self,
        doc: &mut dyn Document,
        scheduler: &mut dyn Scheduler<PanelTask>,
    ) {
        self.unmount(doc, scheduler);
        if let Some(list) = self.list.as_mut() {
            list.unmount(doc);
        }
    }
}

impl<L: EmbeddedList> DisclosurePanel<L> {
    /// Create an unmounted panel without an embedded list.
    pub fn new(root: NodeId, options: PanelOptions) -> Self {
        Self {
            root,
            button: None,
            content: None,
            list: None,
            options,
            state: PanelState::Closed,
            button_listeners: ListenerSet::new(),
            document_subscription: None,
            hide_timer: None,
            activation_frame: None,
            focus_task: None,
            mounted: false,
        }
    }

    /// Attach the list that receives focus on open and is reset on close.
    #[must_use]
    pub fn with_list(mut self, list: L) -> Self {
        self.list = Some(list);
        self
    }

    /// Find the trigger and content and wire the trigger.
    pub fn mount(&mut self, doc: &mut dyn Document) {
        if self.mounted {
            debug!(root = %self.root, "disclosure panel already mounted");
            return;
        }

        self.button = doc.query(self.root, Role::Button);
        self.content = doc.query(self.root, Role::Panel);
        if let Some(button) = self.button {
            self.button_listeners.listen(
                doc,
                EventTarget::Node(button),
                EventKind::Click,
                Handler::Toggle,
            );
        }
        self.mounted = true;
        debug!(
            root = %self.root,
            has_button = self.button.is_some(),
            has_content = self.content.is_some(),
            "disclosure panel mounted"
        );
    }

    /// Cancel pending work and drop every listener this panel registered.
    ///
    /// The embedded list keeps its own lifecycle.
    pub fn unmount(&mut self, doc: &mut dyn Document, scheduler: &mut dyn Scheduler<PanelTask>) {
        cancel(scheduler, &mut self.hide_timer);
        cancel(scheduler, &mut self.activation_frame);
        cancel(scheduler, &mut self.focus_task);
        self.button_listeners.release(doc);
        self.release_document_listeners(doc);
        self.mounted = false;
        debug!(root = %self.root, "disclosure panel unmounted");
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    pub fn options(&self) -> PanelOptions {
        self.options
    }

    pub fn list(&self) -> Option<&L> {
        self.list.as_ref()
    }

    pub fn list_mut(&mut self) -> Option<&mut L> {
        self.list.as_mut()
    }

    /// Whether a deferred hide is outstanding.
    pub fn hide_pending(&self) -> bool {
        self.hide_timer.is_some()
    }

    /// Whether the document-level dismissal listeners are registered.
    pub fn listening_to_document(&self) -> bool {
        self.document_subscription.is_some()
    }

    /// Whether `listener` belongs to this panel itself (not its list).
    pub fn owns(&self, listener: ListenerId) -> bool {
        self.button_listeners.owns(listener)
            || self
                .document_subscription
                .as_ref()
                .is_some_and(|subscription| subscription.owns(listener))
    }

    /// Dispatch an event delivered to one of this panel's listeners.
    pub fn handle_event(
        &mut self,
        doc: &mut dyn Document,
        scheduler: &mut dyn Scheduler<PanelTask>,
        listener: ListenerId,
        event: &Event,
    ) -> EventResponse {
        let handler = self.button_listeners.handler(listener).or_else(|| {
            self.document_subscription
                .as_ref()
                .and_then(|subscription| subscription.handler(listener))
        });
        let Some(handler) = handler else {
            return EventResponse::IGNORED;
        };
        trace!(?handler, ?event, "disclosure panel event");

        match handler {
            Handler::Toggle => self.toggle(doc, scheduler),
            Handler::OutsideClick => {
                if !doc.contains(self.root, event.target) {
                    self.close(doc, scheduler);
                }
                EventResponse::IGNORED
            }
            Handler::Escape => {
                if event.is_key(Key::Escape) {
                    self.close(doc, scheduler);
                    if let Some(button) = self.button {
                        doc.focus(button);
                    }
                }
                EventResponse::IGNORED
            }
        }
    }

    /// Close when open, open when closed. The trigger's default action is
    /// always suppressed.
    pub fn toggle(
        &mut self,
        doc: &mut dyn Document,
        scheduler: &mut dyn Scheduler<PanelTask>,
    ) -> EventResponse {
        if self.is_open() {
            self.close(doc, scheduler);
        } else {
            self.open(doc, scheduler);
        }
        EventResponse::IGNORED.prevent_default()
    }

    /// Show the content and start listening for dismissal.
    pub fn open(&mut self, doc: &mut dyn Document, scheduler: &mut dyn Scheduler<PanelTask>) {
        let (Some(button), Some(content)) = (self.button, self.content) else {
            debug!(root = %self.root, "open skipped: trigger or content missing");
            return;
        };
        if self.is_open() {
            return;
        }

        cancel(scheduler, &mut self.hide_timer);

        doc.remove_attribute(content, HIDDEN);
        doc.set_attribute(button, ARIA_EXPANDED, "true");
        doc.set_attribute(self.root, DATA_OPEN, "true");

        cancel(scheduler, &mut self.activation_frame);
        self.activation_frame = Some(scheduler.request_animation_frame(PanelTask::Activate));

        if self.document_subscription.is_none() {
            let mut subscription = ListenerSet::new();
            subscription.listen(
                doc,
                EventTarget::Document,
                EventKind::Click,
                Handler::OutsideClick,
            );
            subscription.listen(doc, EventTarget::Document, EventKind::KeyUp, Handler::Escape);
            self.document_subscription = Some(subscription);
        }

        cancel(scheduler, &mut self.focus_task);
        self.focus_task = Some(scheduler.set_timeout(Duration::ZERO, PanelTask::FocusList));

        self.state = PanelState::Opening;
        debug!(root = %self.root, "disclosure panel opened");
    }

    /// Start the closing transition and schedule the deferred hide.
    pub fn close(&mut self, doc: &mut dyn Document, scheduler: &mut dyn Scheduler<PanelTask>) {
        let (Some(button), Some(content)) = (self.button, self.content) else {
            return;
        };
        if !self.is_open() {
            return;
        }

        doc.set_attribute(button, ARIA_EXPANDED, "false");
        doc.remove_attribute(self.root, DATA_OPEN);
        doc.set_class(content, IS_ACTIVE, false);

        cancel(scheduler, &mut self.activation_frame);
        cancel(scheduler, &mut self.focus_task);

        if let Some(list) = self.list.as_mut() {
            list.reset_form(doc);
        }

        self.release_document_listeners(doc);

        cancel(scheduler, &mut self.hide_timer);
        self.hide_timer = Some(scheduler.set_timeout(self.options.hide_delay, PanelTask::Hide));

        self.state = PanelState::Closing;
        debug!(root = %self.root, "disclosure panel closing");
    }

    /// Run a task this panel scheduled. Tasks whose handle is no longer the
    /// current one for their purpose are ignored.
    pub fn run_task(&mut self, doc: &mut dyn Document, handle: TaskHandle, task: PanelTask) {
        trace!(?handle, ?task, "disclosure panel task");
        match task {
            PanelTask::Activate => {
                if !take_if_current(&mut self.activation_frame, handle) {
                    return;
                }
                if let Some(content) = self.content {
                    doc.set_class(content, IS_ACTIVE, true);
                }
                if self.state == PanelState::Opening {
                    self.state = PanelState::Open;
                }
            }
            PanelTask::FocusList => {
                if !take_if_current(&mut self.focus_task, handle) {
                    return;
                }
                if let Some(list) = self.list.as_ref() {
                    list.focus_search_input(doc);
                }
            }
            PanelTask::Hide => {
                if !take_if_current(&mut self.hide_timer, handle) {
                    return;
                }
                if let Some(content) = self.content
                    && !doc.has_class(content, IS_ACTIVE)
                {
                    doc.toggle_attribute(content, HIDDEN, true);
                }
                if self.state == PanelState::Closing {
                    self.state = PanelState::Closed;
                }
                debug!(root = %self.root, "disclosure panel hidden");
            }
        }
    }

    fn release_document_listeners(&mut self, doc: &mut dyn Document) {
        if let Some(mut subscription) = self.document_subscription.take() {
            subscription.release(doc);
        }
    }
}

fn cancel(scheduler: &mut dyn Scheduler<PanelTask>, slot: &mut Option<TaskHandle>) {
    if let Some(handle) = slot.take() {
        scheduler.cancel(handle);
    }
}

fn take_if_current(slot: &mut Option<TaskHandle>, handle: TaskHandle) -> bool {
    if *slot == Some(handle) {
        *slot = None;
        true
    } else {
        false
    }
}
