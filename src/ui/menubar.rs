//! Single-row menu bar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::element::BoxProps;
use super::hit::HitMap;
use super::theme::Theme;
use crate::core::event::{UiEvent, UiEventKind};

type BarHandler<T> = Box<dyn FnMut(&UiEvent, &T, usize)>;

pub struct MenubarItem<T> {
    pub label: String,
    pub data: Option<T>,
    pub on_click: Option<BarHandler<T>>,
}

impl<T> MenubarItem<T> {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: None,
            on_click: None,
        }
    }

    pub fn data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    /// Item-specific handler; takes precedence over the bar's.
    pub fn on_click(mut self, f: impl FnMut(&UiEvent, &T, usize) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }
}

pub struct Menubar<T> {
    items: Vec<MenubarItem<T>>,
    box_props: BoxProps,
    on_click: Option<BarHandler<T>>,
    hits: HitMap<usize>,
}

impl<T: Default> Menubar<T> {
    pub fn new(items: Vec<MenubarItem<T>>) -> Self {
        Self {
            items,
            box_props: BoxProps::default(),
            on_click: None,
            hits: HitMap::default(),
        }
    }

    pub fn box_props(mut self, props: BoxProps) -> Self {
        self.box_props = props;
        self
    }

    pub fn on_click(mut self, f: impl FnMut(&UiEvent, &T, usize) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Screen area of item `index` from the last render (to anchor a menu).
    pub fn item_area(&self, index: usize) -> Option<Rect> {
        self.hits.area_of(|i| *i == index)
    }

    pub fn handle_event(&mut self, event: &UiEvent) -> bool {
        if !matches!(event.kind, UiEventKind::Click | UiEventKind::TouchEnd) {
            return false;
        }
        let Some(&index) = self.hits.hit(event.column, event.row) else {
            return false;
        };
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        let fallback = T::default();
        let data = item.data.as_ref().unwrap_or(&fallback);
        match (item.on_click.as_mut(), self.on_click.as_mut()) {
            (Some(f), _) | (None, Some(f)) => {
                f(event, data, index);
                true
            }
            (None, None) => false,
        }
    }
}

impl<T> Widget for &mut Menubar<T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.box_props.render(area, buf);
        self.hits.clear();
        if inner.height == 0 {
            return;
        }
        buf.set_style(Rect::new(inner.x, inner.y, inner.width, 1), Theme::status_bar_style());

        let mut x = inner.x;
        for (index, item) in self.items.iter().enumerate() {
            let text = format!(" {} ", item.label);
            let width = (text.chars().count() as u16).min(inner.right().saturating_sub(x));
            if width == 0 {
                break;
            }
            buf.set_line(
                x,
                inner.y,
                &Line::from(Span::styled(text, Theme::status_bar_style())),
                width,
            );
            self.hits.push(Rect::new(x, inner.y, width, 1), index);
            x = x.saturating_add(width);
        }
    }
}
