//! UI / rendering layer. Every widget draws into a Ratatui buffer and turns
//! [`UiEvent`](crate::core::event::UiEvent)s that land on what it drew into
//! callbacks.
//!
//! Widgets are long-lived values holding their props, local state and the
//! hit regions of the last frame.  Rendering goes through
//! `impl Widget for &mut W`, so `frame.render_widget(&mut widget, area)`
//! works as usual.

pub mod element;
pub mod expander;
pub mod hit;
pub mod icon;
pub mod icon_view;
pub mod list_view;
pub mod menu;
pub mod menubar;
pub mod panes;
pub mod tabs;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_util {
    use ratatui::buffer::Buffer;

    /// Text content of row `y`, trailing blanks trimmed.
    pub fn row_text(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        let mut s = String::new();
        for x in area.x..area.x + area.width {
            s.push_str(buf[(x, y)].symbol());
        }
        s.trim_end().to_string()
    }
}
