use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::render::truncate;
use super::*;
use crate::catalog::Catalog;
use crate::page::PageOptions;

fn app() -> PickerApp {
    let catalog = Catalog::builtin().unwrap();
    let languages = catalog
        .languages
        .iter()
        .map(|language| language.code.clone())
        .collect();
    let session = Session::new(catalog, PageOptions::default()).unwrap();
    PickerApp::new(session, languages)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ctrl(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

fn type_str(app: &mut PickerApp, text: &str) {
    for ch in text.chars() {
        assert_eq!(app.handle_key(key(KeyCode::Char(ch))), None);
    }
}

fn render(app: &PickerApp) -> String {
    let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
    terminal.draw(|frame| app.draw(frame)).unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn buffer_to_string(buf: &Buffer) -> String {
    let mut lines = Vec::new();
    for y in 0..buf.area.height {
        let mut line = String::new();
        for x in 0..buf.area.width {
            line.push_str(buf[(x, y)].symbol());
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[test]
fn typing_is_ignored_until_the_search_field_has_focus() {
    let mut app = app();
    type_str(&mut app, "ger");
    assert_eq!(app.session().page().snapshot().query, "");

    app.handle_key(key(KeyCode::Tab));
    type_str(&mut app, "germ");
    assert_eq!(app.session().page().snapshot().query, "germ");

    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.session().page().snapshot().query, "ger");
}

#[test]
fn choosing_a_country_ends_the_session() {
    let mut app = app();
    app.handle_key(key(KeyCode::Tab));
    type_str(&mut app, "japan");
    assert_eq!(app.handle_key(key(KeyCode::Down)), None);
    assert_eq!(app.handle_key(key(KeyCode::Enter)), Some(Exit::Submitted));

    let report = app.session().report();
    assert_eq!(report.page.submissions[0].fields["country_code"], "JP");
}

#[test]
fn escape_closes_an_open_panel_and_quits_a_closed_one() {
    let mut app = app();
    app.handle_key(key(KeyCode::Tab));
    assert_eq!(app.handle_key(key(KeyCode::Esc)), None);
    assert_eq!(app.session().page().snapshot().state, "closing");

    assert_eq!(app.handle_key(key(KeyCode::Esc)), Some(Exit::Quit));
    assert_eq!(app.handle_key(ctrl('c')), Some(Exit::Quit));
}

#[test]
fn language_shortcut_submits_the_next_language() {
    let mut app = app();
    assert_eq!(app.handle_key(ctrl('l')), Some(Exit::Submitted));
    let report = app.session().report();
    assert_eq!(report.page.submissions[0].fields["language_code"], "fr");
}

#[test]
fn render_shows_the_panel_only_while_visible() {
    let mut app = app();
    let closed = render(&app);
    assert!(closed.contains("Country/region ▾"));
    assert!(!closed.contains("Search:"));

    app.handle_key(key(KeyCode::Tab));
    app.session.advance(Duration::from_millis(16));
    type_str(&mut app, "united");
    let open = render(&app);
    assert!(open.contains("Country/region ▴"));
    assert!(open.contains("Search: united"));
    assert!(open.contains("United Kingdom (GB)"));
    assert!(open.contains("Found 2 country or region results."));
}

#[test]
fn rejected_steps_surface_in_the_status_line() {
    let mut app = app();
    app.languages.push("tlh".into());
    app.handle_key(ctrl('l'));
    app.session.page_mut().change_language("ja");
    assert_eq!(app.handle_key(ctrl('l')), None);
    assert!(app.status.as_deref().is_some_and(|status| status.contains("tlh")));
}

#[test]
fn truncate_respects_display_width() {
    assert_eq!(truncate("Japan", 10), "Japan");
    assert_eq!(truncate("United Kingdom", 6), "Unite…");
    assert_eq!(truncate("日本語", 4), "日…");
    assert_eq!(truncate("anything", 0), "");
}
