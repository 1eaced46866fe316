use std::time::Duration;

use locale_host_api::{Document, Key};

use super::*;

fn page() -> Page {
    Page::new(&Catalog::builtin().unwrap(), PageOptions::default()).unwrap()
}

fn visible_values(page: &Page) -> Vec<String> {
    page.snapshot()
        .visible
        .into_iter()
        .map(|country| country.value)
        .collect()
}

fn opened() -> Page {
    let mut page = page();
    page.click_trigger();
    page.settle();
    page.advance(Duration::from_millis(16));
    page
}

#[test]
fn trigger_opens_then_activates_on_the_next_frame() {
    let mut page = page();
    let response = page.click_trigger();
    assert!(response.default_prevented);

    let snapshot = page.snapshot();
    assert_eq!(snapshot.state, "opening");
    assert!(snapshot.expanded);
    assert!(!snapshot.content_hidden);
    assert!(!snapshot.active);

    page.settle();
    assert_eq!(page.snapshot().focused.as_deref(), Some("search"));

    page.advance(Duration::from_millis(16));
    let snapshot = page.snapshot();
    assert_eq!(snapshot.state, "open");
    assert!(snapshot.active);
}

#[test]
fn trigger_click_does_not_submit_anything() {
    let mut page = opened();
    page.click_trigger();
    assert!(page.submissions().is_empty());
}

#[test]
fn typing_filters_and_announces() {
    let mut page = opened();
    page.type_text("eur");

    let snapshot = page.snapshot();
    assert_eq!(snapshot.visible.len(), 8);
    assert_eq!(snapshot.announcement, "Found 8 country or region results.");
    assert!(snapshot.reset_visible);
    assert!(!snapshot.popular_visible);
    assert!(!snapshot.no_results);
}

#[test]
fn iso_codes_match_exactly() {
    let mut page = opened();
    page.type_text("jp");
    assert_eq!(visible_values(&page), ["JP"]);

    page.type_text("zzz");
    let snapshot = page.snapshot();
    assert!(snapshot.visible.is_empty());
    assert!(snapshot.no_results);
    assert_eq!(snapshot.announcement, "Found 0 country or region results.");
}

#[test]
fn typed_characters_only_reach_a_focused_search_field() {
    let mut page = page();
    assert!(!page.type_char('g'));

    let mut page = opened();
    for ch in "germ".chars() {
        assert!(page.type_char(ch));
    }
    assert_eq!(visible_values(&page), ["DE"]);
    assert!(page.backspace());
    assert_eq!(page.snapshot().query, "ger");
}

#[test]
fn arrow_then_enter_submits_the_selected_country() {
    let mut page = opened();
    page.type_text("germ");
    page.press(Key::ArrowDown);

    let snapshot = page.snapshot();
    assert_eq!(snapshot.focused.as_deref(), Some("country:DE"));
    assert!(snapshot.visible[0].selected);
    assert_eq!(
        page.document().attribute(page.markup().search, "aria-activedescendant"),
        Some("country-DE")
    );

    page.press(Key::Enter);
    let submissions = page.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].fields["country_code"], "DE");
    assert_eq!(submissions[0].fields["language_code"], "en");
}

#[test]
fn enter_in_the_search_field_never_submits() {
    let mut page = opened();
    page.type_text("germ");
    page.press(Key::Enter);
    assert!(page.submissions().is_empty());
}

#[test]
fn arrows_wrap_around_the_visible_entries() {
    let mut page = opened();
    page.type_text("eur");
    page.press(Key::ArrowUp);
    assert_eq!(page.snapshot().focused.as_deref(), Some("country:ES"));
    page.press(Key::ArrowDown);
    assert_eq!(page.snapshot().focused.as_deref(), Some("country:AT"));
}

#[test]
fn clicking_a_country_submits_it() {
    let mut page = opened();
    let japan = page.markup().item("JP").unwrap();
    page.click(japan);
    assert_eq!(page.submissions().len(), 1);
    assert_eq!(page.submissions()[0].fields["country_code"], "JP");
}

#[test]
fn reset_button_clears_the_query_and_refocuses_search() {
    let mut page = opened();
    page.type_text("germ");
    page.press(Key::ArrowDown);
    page.click_reset();

    let snapshot = page.snapshot();
    assert_eq!(snapshot.query, "");
    assert_eq!(snapshot.visible.len(), 20);
    assert!(!snapshot.reset_visible);
    assert!(snapshot.popular_visible);
    assert_eq!(snapshot.focused.as_deref(), Some("search"));
    assert!(page.submissions().is_empty());
}

#[test]
fn escape_closes_and_returns_focus_to_the_trigger() {
    let mut page = opened();
    page.type_text("germ");
    page.press(Key::Escape);

    let snapshot = page.snapshot();
    assert_eq!(snapshot.state, "closing");
    assert!(!snapshot.expanded);
    assert!(!snapshot.active);
    assert!(!snapshot.content_hidden);
    assert_eq!(snapshot.query, "");
    assert_eq!(snapshot.focused.as_deref(), Some("trigger"));

    page.advance(Duration::from_millis(219));
    assert!(!page.snapshot().content_hidden);
    page.advance(Duration::from_millis(1));
    let snapshot = page.snapshot();
    assert!(snapshot.content_hidden);
    assert_eq!(snapshot.state, "closed");
}

#[test]
fn outside_click_closes_but_inside_clicks_do_not() {
    let mut page = opened();
    page.click(page.markup().search);
    assert_eq!(page.snapshot().state, "open");

    page.click_outside();
    assert_eq!(page.snapshot().state, "closing");
    assert_eq!(page.document().document_listener_count(), 0);
}

#[test]
fn reopening_inside_the_hide_window_keeps_the_content_visible() {
    let mut page = opened();
    page.click_trigger();
    page.advance(Duration::from_millis(100));
    page.click_trigger();
    page.settle();
    page.advance(Duration::from_millis(300));

    let snapshot = page.snapshot();
    assert_eq!(snapshot.state, "open");
    assert!(!snapshot.content_hidden);
    assert!(snapshot.active);
}

#[test]
fn scrolling_the_list_marks_the_filter_bar() {
    let mut page = opened();
    page.scroll_list(40);
    assert!(page.snapshot().scrolled);
    page.scroll_list(0);
    assert!(!page.snapshot().scrolled);
}

#[test]
fn language_change_submits_the_form() {
    let mut page = opened();
    page.change_language("fr");
    let submissions = page.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].fields["language_code"], "fr");
    assert_eq!(submissions[0].fields["country_code"], "US");
}

#[test]
fn custom_hide_delay_is_honored() {
    let options = PageOptions {
        panel: PanelOptions {
            hide_delay: Duration::from_millis(50),
        },
        ..PageOptions::default()
    };
    let mut page = Page::new(&Catalog::builtin().unwrap(), options).unwrap();
    page.open();
    page.advance(Duration::from_millis(16));
    page.close();
    page.advance(Duration::from_millis(50));
    assert!(page.snapshot().content_hidden);
}

#[test]
fn unmount_releases_every_listener() {
    let mut page = opened();
    page.unmount();
    assert_eq!(page.document().listener_count(), 0);

    page.click_trigger();
    assert_eq!(page.snapshot().state, "open");
}
