//! Box-layout wrapper shared by every widget that takes box properties.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, BorderType, Borders, Widget},
};

use super::theme::Theme;

/// Spacing and framing applied around a widget's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxProps {
    pub margin: u16,
    pub padding: u16,
    pub border: bool,
    pub title: Option<String>,
}

impl BoxProps {
    pub fn bordered() -> Self {
        Self {
            border: true,
            ..Self::default()
        }
    }

    pub fn margin(mut self, margin: u16) -> Self {
        self.margin = margin;
        self
    }

    pub fn padding(mut self, padding: u16) -> Self {
        self.padding = padding;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.border = true;
        self
    }

    /// Content area left inside `area`.
    pub fn inner(&self, area: Rect) -> Rect {
        let outer = shrink(area, self.margin);
        let framed = if self.border {
            self.block().inner(outer)
        } else {
            outer
        };
        shrink(framed, self.padding)
    }

    /// Draw the frame (if any) and return the content area.
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> Rect {
        if self.border {
            self.block().render(shrink(area, self.margin), buf);
        }
        self.inner(area)
    }

    fn block(&self) -> Block<'_> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style());
        if let Some(ref title) = self.title {
            block = block
                .title(format!(" {title} "))
                .title_style(Theme::title_style());
        }
        block
    }
}

fn shrink(area: Rect, by: u16) -> Rect {
    let w = area.width.saturating_sub(by.saturating_mul(2));
    let h = area.height.saturating_sub(by.saturating_mul(2));
    Rect::new(
        area.x.saturating_add(by.min(area.width / 2)),
        area.y.saturating_add(by.min(area.height / 2)),
        w,
        h,
    )
}
