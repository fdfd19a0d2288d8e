//! Gallery layout and frame rendering.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use desk_widgets::ui::theme::Theme;

use super::state::GalleryState;

const HINT: &str = "q quit · o flip split · z zebra · e places · right-click for menus";

/// Screen regions of the gallery.
pub struct GalleryLayout {
    pub menubar: Rect,
    pub body: Rect,
    pub status: Rect,
}

impl GalleryLayout {
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);
        Self {
            menubar: chunks[0],
            body: chunks[1],
            status: chunks[2],
        }
    }
}

/// Draw the whole gallery.  Also refreshes every widget's hit regions, so
/// event dispatch always works against the last frame.
pub fn render(state: &mut GalleryState, area: Rect, buf: &mut Buffer) {
    let layout = GalleryLayout::from_area(area);

    (&mut state.menubar).render(layout.menubar, buf);
    (&mut state.panes).render(layout.body, buf);

    let panes = state.panes.pane_areas();
    if let Some(&left) = panes.first() {
        (&mut state.expander).render(left, buf);
        if let Some(content) = state.expander.content_area(left) {
            (&mut state.icons).render(content, buf);
        }
    }
    if let Some(&right) = panes.get(1) {
        (&mut state.tabs).render(right, buf);
        let pane = state.tabs.pane_area(right);
        match state.tabs.active() {
            0 => (&mut state.list).render(pane, buf),
            _ => about(state).render(pane, buf),
        }
    }

    let status = state.status_message.as_deref().unwrap_or(HINT);
    Paragraph::new(status)
        .style(Theme::status_bar_style())
        .render(layout.status, buf);

    if state.menu.is_visible() {
        (&mut state.menu).render(area, buf);
    }
}

fn about(state: &GalleryState) -> Paragraph<'static> {
    let sizes: Vec<String> = state
        .panes
        .current_sizes()
        .as_slice()
        .iter()
        .map(|s| s.map_or_else(|| "flex".to_string(), |n| format!("{n} cells")))
        .collect();
    let listeners = state.document.listener_count();
    Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            Theme::title_style(),
        )),
        Line::default(),
        Line::from(format!("split: {}", state.panes.get_orientation().label())),
        Line::from(format!("pane sizes: {}", sizes.join(", "))),
        Line::from(format!("double-tap window: {} ms", state.config.double_tap_ms)),
        Line::from(format!("pointer listeners: {listeners}")),
        Line::default(),
        Line::from("Drag the divider to resize the panes."),
    ])
    .style(Theme::text_style())
    .wrap(Wrap { trim: true })
}
