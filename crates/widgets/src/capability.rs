use locale_host_api::Document;

/// What a [`DisclosurePanel`](crate::DisclosurePanel) needs from the list it hosts.
pub trait EmbeddedList {
    /// Move input focus into the list once the panel is visible.
    fn focus_search_input(&self, doc: &mut dyn Document);

    /// Drop any filter state when the panel closes.
    fn reset_form(&mut self, doc: &mut dyn Document);
}
