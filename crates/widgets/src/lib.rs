//! Headless widgets behind a storefront's language/region selector.
//!
//! [`SelectionList`] filters a snapshot of country entries and drives roving
//! keyboard selection over the visible ones. [`DisclosurePanel`] is the
//! dropdown that hosts it: it owns the open/close lifecycle, the deferred hide
//! and the document-level dismissal listeners, and reaches the embedded list
//! only through the [`EmbeddedList`] capability.

mod capability;
pub mod disclosure;
pub mod selection_list;

pub use capability::EmbeddedList;
pub use disclosure::{DEFAULT_HIDE_DELAY, DisclosurePanel, PanelOptions, PanelState, PanelTask};
pub use selection_list::{
    CountryEntry, DEFAULT_RESULTS_TEMPLATE, Direction, FilterSummary, SearchQuery, SelectionList,
};
