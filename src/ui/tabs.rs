//! Tabbed container: a header row of labels over one visible pane.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::hit::HitMap;
use super::theme::Theme;
use crate::core::event::{UiEvent, UiEventKind};

type TabHandler = Box<dyn FnMut(&UiEvent, usize, &str)>;

pub struct Tabs {
    labels: Vec<String>,
    selected_index: usize,
    on_change: TabHandler,
    on_context_menu: TabHandler,
    hits: HitMap<usize>,
}

impl Tabs {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            selected_index: 0,
            on_change: Box::new(|_, _, _| {}),
            on_context_menu: Box::new(|_, _, _| {}),
            hits: HitMap::default(),
        }
    }

    /// Initial selection.
    pub fn selected_index(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }

    pub fn on_change(mut self, f: impl FnMut(&UiEvent, usize, &str) + 'static) -> Self {
        self.on_change = Box::new(f);
        self
    }

    pub fn on_context_menu(mut self, f: impl FnMut(&UiEvent, usize, &str) + 'static) -> Self {
        self.on_context_menu = Box::new(f);
        self
    }

    pub fn active(&self) -> usize {
        self.selected_index
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Area for the active pane's content, below the header row.
    pub fn pane_area(&self, area: Rect) -> Rect {
        Rect::new(
            area.x,
            area.y.saturating_add(2).min(area.bottom()),
            area.width,
            area.height.saturating_sub(2),
        )
    }

    pub fn handle_event(&mut self, event: &UiEvent) -> bool {
        let Some(&index) = self.hits.hit(event.column, event.row) else {
            return false;
        };
        let Some(label) = self.labels.get(index) else {
            return false;
        };
        match event.kind {
            UiEventKind::Click | UiEventKind::TouchEnd => {
                if index != self.selected_index {
                    tracing::debug!(from = self.selected_index, to = index, "tab switch");
                }
                self.selected_index = index;
                (self.on_change)(event, index, label);
                true
            }
            UiEventKind::ContextMenu => {
                (self.on_context_menu)(event, index, label);
                true
            }
            _ => false,
        }
    }
}

impl Widget for &mut Tabs {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.hits.clear();
        if area.height == 0 {
            return;
        }

        let mut x = area.x;
        for (index, label) in self.labels.iter().enumerate() {
            let text = format!(" {label} ");
            let width = (text.chars().count() as u16).min(area.right().saturating_sub(x));
            if width == 0 {
                break;
            }
            let style = if index == self.selected_index {
                Theme::active_tab_style()
            } else {
                Theme::text_style()
            };
            buf.set_line(x, area.y, &Line::from(Span::styled(text, style)), width);
            self.hits.push(Rect::new(x, area.y, width, 1), index);
            x = x.saturating_add(width + 1);
            if x >= area.right() {
                break;
            }
        }

        if area.height > 1 {
            let rule = "─".repeat(area.width as usize);
            buf.set_string(area.x, area.y + 1, rule, Theme::border_style());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::ui::test_util::row_text;

    fn render(tabs: &mut Tabs, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        tabs.render(area, &mut buf);
        buf
    }

    #[test]
    fn first_tab_active_by_default_and_click_moves_it() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        let mut tabs = Tabs::new(["A", "B", "C"])
            .on_change(move |_, i, l| sink.borrow_mut().push((i, l.to_string())));
        let area = Rect::new(0, 0, 30, 4);

        let buf = render(&mut tabs, area);
        assert_eq!(tabs.active(), 0);
        assert_eq!(row_text(&buf, 0), " A   B   C");
        assert_eq!(buf[(1, 0)].bg, Theme::active_tab_style().bg.unwrap());

        // " C " starts at column 8.
        assert!(tabs.handle_event(&UiEvent::new(UiEventKind::Click, 9, 0)));
        assert_eq!(*changes.borrow(), vec![(2, "C".to_string())]);
        assert_eq!(tabs.active(), 2);

        let buf = render(&mut tabs, area);
        assert_eq!(buf[(9, 0)].bg, Theme::active_tab_style().bg.unwrap());
        assert_ne!(buf[(1, 0)].bg, Theme::active_tab_style().bg.unwrap());
    }

    #[test]
    fn right_click_reports_without_switching() {
        let menus = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&menus);
        let mut tabs = Tabs::new(vec!["One".to_string(), "Two".to_string()])
            .on_context_menu(move |_, i, l| sink.borrow_mut().push((i, l.to_string())));
        render(&mut tabs, Rect::new(0, 0, 20, 3));

        assert!(tabs.handle_event(&UiEvent::new(UiEventKind::ContextMenu, 7, 0)));
        assert_eq!(*menus.borrow(), vec![(1, "Two".to_string())]);
        assert_eq!(tabs.active(), 0);
        assert_eq!(tabs.labels().to_vec(), vec!["One".to_string(), "Two".to_string()]);
    }

    #[test]
    fn pane_area_sits_under_header() {
        let tabs = Tabs::new(["x"]).selected_index(0);
        assert_eq!(tabs.pane_area(Rect::new(0, 0, 10, 8)), Rect::new(0, 2, 10, 6));
        assert_eq!(tabs.pane_area(Rect::new(0, 0, 10, 1)).height, 0);
    }

    #[test]
    fn clicks_off_headers_are_ignored() {
        let mut tabs = Tabs::new(["A"]).selected_index(0);
        render(&mut tabs, Rect::new(0, 0, 20, 3));
        assert!(!tabs.handle_event(&UiEvent::new(UiEventKind::Click, 15, 0)));
        assert!(!tabs.handle_event(&UiEvent::new(UiEventKind::Click, 1, 2)));
    }
}
