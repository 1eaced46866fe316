//! Interactive terminal host for the picker.
//!
//! The terminal plays the browser: keys become page events, real elapsed time
//! drives the page clock, and every frame renders the current snapshot.

mod actions;
mod render;
mod runtime;

#[cfg(test)]
mod tests;

use locale_host_api::Document;

use crate::session::Session;

pub use runtime::run;

/// Rows moved by one PageUp/PageDown.
const SCROLL_STEP: u32 = 3;

/// Why the interactive loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The form was submitted.
    Submitted,
    /// The user quit without choosing.
    Quit,
}

/// State of the interactive picker between frames.
pub struct PickerApp {
    session: Session,
    languages: Vec<String>,
    scroll: u32,
    status: Option<String>,
}

impl PickerApp {
    pub fn new(session: Session, languages: Vec<String>) -> Self {
        Self {
            session,
            languages,
            scroll: 0,
            status: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn search_focused(&self) -> bool {
        let page = self.session.page();
        page.document().active_element() == Some(page.markup().search)
    }
}
