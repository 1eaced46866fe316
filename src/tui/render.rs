use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::PickerApp;
use crate::page::PageSnapshot;

const HIGHLIGHT_SYMBOL: &str = "> ";
const HELP: &str = "Tab open/close  ↑↓ move  Enter choose  Esc close  ^O outside  ^R reset  ^L language  ^C quit";

impl PickerApp {
    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area().inner(Margin {
            vertical: 0,
            horizontal: 1,
        });
        let snapshot = self.session.page().snapshot();

        let [trigger_area, panel_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .areas(area);

        render_trigger(frame, trigger_area, &snapshot);
        if !snapshot.content_hidden {
            render_panel(frame, panel_area, &snapshot);
        }
        self.render_status(frame, status_area, &snapshot);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect, snapshot: &PageSnapshot) {
        let width = usize::from(area.width);
        let state = format!(
            "{} · {} ms · language {}",
            snapshot.state,
            self.session.page().now().as_millis(),
            snapshot.language
        );
        let second = match &self.status {
            Some(message) => Line::styled(truncate(message, width), Style::new().fg(Color::Red)),
            None => Line::styled(truncate(HELP, width), Style::new().fg(Color::DarkGray)),
        };
        let lines = vec![Line::raw(truncate(&state, width)), second];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn render_trigger(frame: &mut Frame, area: Rect, snapshot: &PageSnapshot) {
    let marker = if snapshot.expanded { "▴" } else { "▾" };
    let mut style = Style::new().add_modifier(Modifier::BOLD);
    if snapshot.focused.as_deref() == Some("trigger") {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let label = format!("[ Country/region {marker} ]");
    frame.render_widget(
        Paragraph::new(Line::styled(truncate(&label, usize::from(area.width)), style)),
        area,
    );
}

fn render_panel(frame: &mut Frame, area: Rect, snapshot: &PageSnapshot) {
    // Inactive content is either waiting for its first frame or fading out.
    let border = if snapshot.active {
        Style::new().fg(Color::Cyan)
    } else {
        Style::new().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [search_area, list_area, live_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(inner);
    let width = usize::from(inner.width);

    let mut search = vec![Span::raw("Search: "), Span::raw(snapshot.query.clone())];
    if snapshot.focused.as_deref() == Some("search") {
        search.push(Span::styled(" ", Style::new().add_modifier(Modifier::REVERSED)));
    }
    if snapshot.reset_visible {
        search.push(Span::styled("  [reset]", Style::new().fg(Color::DarkGray)));
    }
    frame.render_widget(Paragraph::new(Line::from(search)), search_area);

    if snapshot.no_results {
        frame.render_widget(
            Paragraph::new(truncate("No countries or regions found.", width))
                .style(Style::new().fg(Color::Yellow)),
            list_area,
        );
    } else {
        frame.render_widget(country_list(snapshot, list_area, width), list_area);
    }

    frame.render_widget(
        Paragraph::new(truncate(&snapshot.announcement, width))
            .style(Style::new().add_modifier(Modifier::ITALIC)),
        live_area,
    );
}

fn country_list<'a>(snapshot: &'a PageSnapshot, area: Rect, width: usize) -> List<'a> {
    let focused = snapshot
        .focused
        .as_deref()
        .and_then(|focused| focused.strip_prefix("country:"));
    let selected_index = snapshot.visible.iter().position(|country| country.selected);

    // Keep the selected row on screen.
    let rows = usize::from(area.height).max(1);
    let skip = selected_index.map_or(0, |index| index.saturating_sub(rows - 1));
    let label_width = width.saturating_sub(HIGHLIGHT_SYMBOL.width());

    let items = snapshot.visible.iter().skip(skip).map(|country| {
        let prefix = if country.selected { HIGHLIGHT_SYMBOL } else { "  " };
        let label = format!("{} ({})", country.name, country.value);
        let mut style = Style::new();
        if country.selected {
            style = style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
        }
        if focused == Some(country.value.as_str()) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        ListItem::new(Line::styled(
            format!("{prefix}{}", truncate(&label, label_width)),
            style,
        ))
    });
    List::new(items)
}

/// Cut `text` to at most `width` terminal columns, marking the cut with `…`.
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - 1;
    let mut used = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push('…');
    out
}
