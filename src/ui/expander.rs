//! Collapsible section with a clickable header.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::element::BoxProps;
use super::theme::Theme;
use crate::core::event::{UiEvent, UiEventKind};

type ToggleHandler = Box<dyn FnMut(&UiEvent, bool)>;

/// Header + content region; the content is only laid out while active.
pub struct Expander {
    label: String,
    active: bool,
    box_props: BoxProps,
    on_toggle: ToggleHandler,
    header_area: Option<Rect>,
}

impl Expander {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            active: false,
            box_props: BoxProps::default(),
            on_toggle: Box::new(|_, _| {}),
            header_area: None,
        }
    }

    /// Initial active state.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn box_props(mut self, props: BoxProps) -> Self {
        self.box_props = props;
        self
    }

    pub fn on_toggle(mut self, f: impl FnMut(&UiEvent, bool) + 'static) -> Self {
        self.on_toggle = Box::new(f);
        self
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flip the active flag, telling the callback the state it flips *to*.
    pub fn toggle(&mut self, event: &UiEvent) {
        let next = !self.active;
        (self.on_toggle)(event, next);
        self.active = next;
    }

    /// Area the caller should draw children into, `None` while collapsed.
    pub fn content_area(&self, area: Rect) -> Option<Rect> {
        if !self.active {
            return None;
        }
        let inner = self.box_props.inner(area);
        let content = Rect::new(
            inner.x,
            inner.y.saturating_add(1),
            inner.width,
            inner.height.saturating_sub(1),
        );
        (content.height > 0).then_some(content)
    }

    /// Toggle when the header is clicked or tapped.
    pub fn handle_event(&mut self, event: &UiEvent) -> bool {
        if !matches!(event.kind, UiEventKind::Click | UiEventKind::TouchEnd) {
            return false;
        }
        match self.header_area {
            Some(header) if event.is_inside(header) => {
                self.toggle(event);
                true
            }
            _ => false,
        }
    }
}

impl Widget for &mut Expander {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.box_props.render(area, buf);
        if inner.height == 0 {
            self.header_area = None;
            return;
        }
        let header = Rect::new(inner.x, inner.y, inner.width, 1);
        let arrow = if self.active { "▼ " } else { "▶ " };
        let line = Line::from(vec![
            Span::styled(arrow, Theme::icon_style()),
            Span::styled(self.label.as_str(), Theme::title_style()),
        ]);
        buf.set_line(header.x, header.y, &line, header.width);
        self.header_area = Some(header);
    }
}
