//! Storefront country/region and language picker.
//!
//! The widgets live in `locale-widgets` and only talk to a
//! [`Document`](locale_host_api::Document). This crate supplies the rest of a
//! page: a catalog, the markup rendered from it, a host that routes events and
//! runs timers ([`page::Page`]), a script format for replaying interactions and
//! a terminal front end.

pub mod app_dirs;
pub mod catalog;
pub mod logging;
pub mod markup;
pub mod page;
pub mod script;
pub mod session;
pub mod tui;

pub use catalog::{Catalog, CatalogError, Country, Language};
pub use page::{Page, PageOptions, PageSnapshot, VisibleCountry};
pub use script::{ScriptError, Step};
pub use session::{Session, SessionError, SessionReport};
