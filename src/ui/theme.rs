//! Colour palette and text styles used across the widgets.

use ratatui::style::{Color, Modifier, Style};

/// Central theme; every widget takes its colours from here.
pub struct Theme;

impl Theme {
    // ── entries ────────────────────────────────────────────────
    pub fn dir_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn icon_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn text_style() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn selected_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    }

    pub fn zebra_style() -> Style {
        Style::default().bg(Color::Indexed(235))
    }

    pub fn header_style() -> Style {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn disabled_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn active_tab_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn spacer_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn spacer_active_style() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn menu_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::White)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
