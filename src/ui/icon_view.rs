//! Icon grid: entries laid out left-to-right in fixed-size cells.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::element::BoxProps;
use super::hit::HitMap;
use super::icon::{GlyphIcons, IconResolver, IconSpec, DEFAULT_ENTRY_ICON};
use super::theme::Theme;
use crate::core::event::{noop, EntryCreated, EntryEvent, Handler, UiEvent, UiEventKind};
use crate::core::tap::DoubleTap;

const CELL_WIDTH: u16 = 14;
/// Icon row + label row + gap.
const CELL_HEIGHT: u16 = 3;

/// One icon in the grid.
#[derive(Debug, Clone)]
pub struct IconEntry<T> {
    pub label: String,
    pub icon: Option<IconSpec>,
    pub data: T,
}

impl<T> IconEntry<T> {
    pub fn new(label: impl Into<String>, data: T) -> Self {
        Self {
            label: label.into(),
            icon: None,
            data,
        }
    }

    pub fn icon(mut self, icon: IconSpec) -> Self {
        self.icon = Some(icon);
        self
    }
}

pub struct IconView<T> {
    entries: Vec<IconEntry<T>>,
    selected_index: Option<usize>,
    scroll_top: usize,
    box_props: BoxProps,
    icons: Box<dyn IconResolver>,
    tapper: DoubleTap,
    on_select: Handler<EntryEvent<T>>,
    on_activate: Handler<EntryEvent<T>>,
    on_context_menu: Handler<EntryEvent<T>>,
    on_create: Handler<EntryCreated<T>>,
    // ── local state ──
    offset: usize,
    mounted: bool,
    /// Re-apply `scroll_top` on the next frame if nothing is selected.
    restore_scroll: bool,
    created: Vec<bool>,
    hits: HitMap<usize>,
    area: Rect,
}

impl<T: Clone + 'static> IconView<T> {
    pub fn new(entries: Vec<IconEntry<T>>) -> Self {
        let created = vec![false; entries.len()];
        Self {
            entries,
            selected_index: None,
            scroll_top: 0,
            box_props: BoxProps::default(),
            icons: Box::new(GlyphIcons),
            tapper: DoubleTap::default(),
            on_select: noop(),
            on_activate: noop(),
            on_context_menu: noop(),
            on_create: noop(),
            offset: 0,
            mounted: false,
            restore_scroll: false,
            created,
            hits: HitMap::default(),
            area: Rect::default(),
        }
    }

    pub fn selected_index(mut self, index: Option<usize>) -> Self {
        self.selected_index = index;
        self
    }

    pub fn scroll_top(mut self, rows: usize) -> Self {
        self.scroll_top = rows;
        self
    }

    pub fn box_props(mut self, props: BoxProps) -> Self {
        self.box_props = props;
        self
    }

    pub fn icons(mut self, resolver: impl IconResolver + 'static) -> Self {
        self.icons = Box::new(resolver);
        self
    }

    /// Detector used to turn two touch-starts into "activate".
    pub fn double_tap(mut self, tapper: DoubleTap) -> Self {
        self.tapper = tapper;
        self
    }

    pub fn on_select(mut self, f: impl FnMut(EntryEvent<T>) + 'static) -> Self {
        self.on_select = Box::new(f);
        self
    }

    pub fn on_activate(mut self, f: impl FnMut(EntryEvent<T>) + 'static) -> Self {
        self.on_activate = Box::new(f);
        self
    }

    pub fn on_context_menu(mut self, f: impl FnMut(EntryEvent<T>) + 'static) -> Self {
        self.on_context_menu = Box::new(f);
        self
    }

    pub fn on_create(mut self, f: impl FnMut(EntryCreated<T>) + 'static) -> Self {
        self.on_create = Box::new(f);
        self
    }

    // ── prop updates ────────────────────────────────────────────

    pub fn set_selected_index(&mut self, index: Option<usize>) {
        self.restore_scroll |= index.is_none();
        self.selected_index = index;
    }

    pub fn set_scroll_top(&mut self, rows: usize) {
        self.scroll_top = rows;
        self.restore_scroll = true;
    }

    pub fn set_entries(&mut self, entries: Vec<IconEntry<T>>) {
        self.created = vec![false; entries.len()];
        self.entries = entries;
        self.hits.clear();
    }

    pub fn entries(&self) -> &[IconEntry<T>] {
        &self.entries
    }

    pub fn get_selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    /// First visible grid row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    // ── events ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: &UiEvent) -> bool {
        match event.kind {
            UiEventKind::ScrollUp | UiEventKind::ScrollDown if event.is_inside(self.area) => {
                self.scroll(event.kind == UiEventKind::ScrollDown);
                return true;
            }
            _ => {}
        }

        let Some(&index) = self.hits.hit(event.column, event.row) else {
            return false;
        };
        let Some(entry) = self.entries.get(index) else {
            return false;
        };
        let payload = EntryEvent {
            data: entry.data.clone(),
            index,
            event: event.clone(),
        };

        match event.kind {
            UiEventKind::Click => (self.on_select)(payload),
            UiEventKind::DoubleClick => (self.on_activate)(payload),
            UiEventKind::ContextMenu => (self.on_context_menu)(payload),
            UiEventKind::TouchStart => {
                if self.tapper.tap(index, event.at) {
                    (self.on_activate)(payload);
                }
            }
            _ => return false,
        }
        true
    }

    fn scroll(&mut self, down: bool) {
        let total_rows = grid_rows(self.entries.len(), columns_for(self.area.width));
        let visible = (self.area.height / CELL_HEIGHT).max(1) as usize;
        let max = total_rows.saturating_sub(visible);
        self.offset = if down {
            (self.offset + 1).min(max)
        } else {
            self.offset.saturating_sub(1)
        };
    }

    fn sync_offset(&mut self, columns: usize, visible_rows: usize) {
        match self.selected_index {
            _ if !self.mounted => self.offset = self.scroll_top,
            // Nothing selected: back to the scroll prop once it is re-set.
            None if self.restore_scroll => self.offset = self.scroll_top,
            None => {}
            Some(sel) => {
                let row = sel / columns;
                if row < self.offset {
                    self.offset = row;
                } else if visible_rows > 0 && row >= self.offset + visible_rows {
                    self.offset = row + 1 - visible_rows;
                }
            }
        }
        self.restore_scroll = false;
        self.mounted = true;
    }
}

fn columns_for(width: u16) -> usize {
    (width / CELL_WIDTH).max(1) as usize
}

fn grid_rows(count: usize, columns: usize) -> usize {
    count.div_ceil(columns)
}

/// Cut `s` to at most `width` chars, marking the cut with `…`.
fn ellipsize(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let keep = width.saturating_sub(1);
    let mut out: String = s.chars().take(keep).collect();
    out.push('…');
    out
}

impl<T: Clone + 'static> Widget for &mut IconView<T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.box_props.render(area, buf);
        self.area = inner;
        self.hits.clear();
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let columns = columns_for(inner.width);
        let visible_rows = (inner.height / CELL_HEIGHT) as usize;
        self.sync_offset(columns, visible_rows);

        let first = self.offset * columns;
        let last = (first + visible_rows.max(1) * columns).min(self.entries.len());

        for index in first..last {
            let slot = index - first;
            let x = inner.x + (slot % columns) as u16 * CELL_WIDTH;
            let y = inner.y + (slot / columns) as u16 * CELL_HEIGHT;
            let cell = Rect::new(
                x,
                y,
                CELL_WIDTH.min(inner.right().saturating_sub(x)),
                CELL_HEIGHT.min(inner.bottom().saturating_sub(y)),
            );
            let entry = &self.entries[index];
            let selected = self.selected_index == Some(index);
            let text_width = cell.width.saturating_sub(2) as usize;

            let icon = entry
                .icon
                .clone()
                .unwrap_or_else(|| IconSpec::new(DEFAULT_ENTRY_ICON));
            let glyph = self.icons.resolve(&icon);
            let pad = (text_width.saturating_sub(1)) / 2 + 1;
            buf.set_line(
                cell.x,
                cell.y,
                &Line::from(vec![Span::raw(" ".repeat(pad)), glyph]),
                cell.width,
            );

            if cell.height > 1 {
                let label = ellipsize(&entry.label, text_width);
                let pad = (text_width.saturating_sub(label.chars().count())) / 2 + 1;
                let style = if selected {
                    Theme::selected_style()
                } else {
                    Theme::text_style()
                };
                buf.set_line(
                    cell.x,
                    cell.y + 1,
                    &Line::from(vec![
                        Span::raw(" ".repeat(pad)),
                        Span::styled(label, style),
                    ]),
                    cell.width,
                );
            }

            if index < self.created.len() && !self.created[index] {
                self.created[index] = true;
                (self.on_create)(EntryCreated {
                    data: entry.data.clone(),
                    index,
                    area: cell,
                });
            }

            self.hits.push(cell, index);
        }
    }
}
