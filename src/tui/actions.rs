use locale_host_api::Document;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::warn;

use super::{Exit, PickerApp, SCROLL_STEP};
use crate::script::Step;

impl PickerApp {
    /// Translate a key press into a picker step. Returns an exit reason once
    /// the session is over.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Option<Exit> {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let step = match key.code {
            KeyCode::Char('c') if control => return Some(Exit::Quit),
            KeyCode::Char('o') if control => Step::ClickOutside,
            KeyCode::Char('r') if control => Step::Reset,
            KeyCode::Char('l') if control => match self.next_language() {
                Some(code) => Step::Language(code),
                None => return None,
            },
            KeyCode::Esc if !self.session.page().panel().is_open() => return Some(Exit::Quit),
            KeyCode::Esc => Step::Escape,
            KeyCode::Tab | KeyCode::F(2) => Step::Toggle,
            KeyCode::Up => Step::Up,
            KeyCode::Down => Step::Down,
            KeyCode::Enter => Step::Enter,
            KeyCode::PageDown => {
                self.scroll = self.scroll.saturating_add(SCROLL_STEP);
                Step::Scroll(self.scroll)
            }
            KeyCode::PageUp => {
                self.scroll = self.scroll.saturating_sub(SCROLL_STEP);
                Step::Scroll(self.scroll)
            }
            KeyCode::Backspace if self.search_focused() => {
                let mut query = self.query();
                if query.pop().is_none() {
                    return None;
                }
                Step::Type(query)
            }
            KeyCode::Char(ch) if self.search_focused() && !control => {
                let mut query = self.query();
                query.push(ch);
                Step::Type(query)
            }
            _ => return None,
        };

        if matches!(step, Step::Type(_)) {
            self.scroll = 0;
        }
        if let Err(err) = self.session.apply(&step) {
            warn!(%err, "step rejected");
            self.status = Some(err.to_string());
            return None;
        }
        self.status = None;

        if self.session.page().submissions().is_empty() {
            None
        } else {
            Some(Exit::Submitted)
        }
    }

    fn query(&self) -> String {
        let page = self.session.page();
        page.document().value(page.markup().search).to_string()
    }

    /// Language code after the current one, wrapping around.
    fn next_language(&self) -> Option<String> {
        let page = self.session.page();
        let current = page.document().value(page.markup().language);
        let position = self.languages.iter().position(|code| code == current);
        let next = match position {
            Some(index) => (index + 1) % self.languages.len(),
            None => 0,
        };
        self.languages.get(next).cloned()
    }
}
