//! Replay a script against a [`Page`] and report where it ended up.

use std::time::Duration;

use locale_host_api::{Key, MarkupError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::page::{Page, PageOptions, PageSnapshot};
use crate::script::Step;

/// Failures while replaying a script.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to render the picker markup")]
    Markup(#[from] MarkupError),

    #[error("step {index} ({step}): no country with value '{value}'")]
    UnknownCountry {
        index: usize,
        step: String,
        value: String,
    },

    #[error("step {index} ({step}): no language with code '{code}'")]
    UnknownLanguage {
        index: usize,
        step: String,
        code: String,
    },
}

/// Final state of a scripted session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub steps: usize,
    /// Virtual time consumed by the session, in milliseconds.
    pub elapsed_ms: u64,
    #[serde(flatten)]
    pub page: PageSnapshot,
}

impl SessionReport {
    /// Value of the entry holding the roving selection.
    pub fn selected(&self) -> Option<&str> {
        self.page
            .visible
            .iter()
            .find(|country| country.selected)
            .map(|country| country.value.as_str())
    }
}

/// A page plus the catalog it was rendered from.
pub struct Session {
    catalog: Catalog,
    page: Page,
    steps: usize,
}

impl Session {
    pub fn new(catalog: Catalog, options: PageOptions) -> Result<Self, SessionError> {
        let page = Page::new(&catalog, options)?;
        Ok(Self {
            catalog,
            page,
            steps: 0,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Apply one step, then let zero-delay work run as an event loop would.
    pub fn apply(&mut self, step: &Step) -> Result<(), SessionError> {
        self.steps += 1;
        let index = self.steps;
        debug!(index, %step, "applying step");

        let page = &mut self.page;
        match step {
            Step::Open => page.open(),
            Step::Close => page.close(),
            Step::Toggle => {
                page.click_trigger();
            }
            Step::Type(text) => page.type_text(text),
            Step::Clear => page.type_text(""),
            Step::Down => page.press(Key::ArrowDown),
            Step::Up => page.press(Key::ArrowUp),
            Step::Enter => page.press(Key::Enter),
            Step::Escape => page.press(Key::Escape),
            Step::ClickOutside => {
                page.click_outside();
            }
            Step::Click(value) => {
                let node = page
                    .markup()
                    .item(value)
                    .ok_or_else(|| SessionError::UnknownCountry {
                        index,
                        step: step.to_string(),
                        value: value.clone(),
                    })?;
                page.click(node);
            }
            Step::Reset => {
                page.click_reset();
            }
            Step::Scroll(offset) => page.scroll_list(*offset),
            Step::Language(code) => {
                if self.catalog.language(code).is_none() {
                    return Err(SessionError::UnknownLanguage {
                        index,
                        step: step.to_string(),
                        code: code.clone(),
                    });
                }
                page.change_language(code);
            }
            Step::Wait(delay) => page.advance(*delay),
        }

        self.page.settle();
        Ok(())
    }

    /// Apply every step in order, stopping at the first failure.
    pub fn run<'a>(
        &mut self,
        steps: impl IntoIterator<Item = &'a Step>,
    ) -> Result<SessionReport, SessionError> {
        for step in steps {
            self.apply(step)?;
        }
        let report = self.report();
        info!(
            steps = report.steps,
            state = report.page.state,
            submissions = report.page.submissions.len(),
            "session finished"
        );
        Ok(report)
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            steps: self.steps,
            elapsed_ms: u64::try_from(self.page.now().as_millis()).unwrap_or(u64::MAX),
            page: self.page.snapshot(),
        }
    }

    /// Move the clock forward by `by`, running whatever falls due.
    pub fn advance(&mut self, by: Duration) {
        self.page.advance(by);
    }
}
