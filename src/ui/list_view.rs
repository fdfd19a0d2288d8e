//! Multi-column list: one header + body pane per column definition.

use std::collections::HashSet;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Widget,
};

use super::element::BoxProps;
use super::hit::HitMap;
use super::icon::{GlyphIcons, IconResolver, IconSpec};
use super::theme::Theme;
use crate::core::event::{noop, EntryCreated, EntryEvent, Handler, UiEvent, UiEventKind};
use crate::core::tap::DoubleTap;

/// Column definition.  Without a width the column shares leftover space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListColumn {
    pub label: String,
    pub width: Option<u16>,
}

impl ListColumn {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            width: None,
        }
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCell {
    pub label: String,
    pub icon: Option<IconSpec>,
}

impl ListCell {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon: None,
        }
    }

    pub fn icon(mut self, icon: IconSpec) -> Self {
        self.icon = Some(icon);
        self
    }
}

impl From<&str> for ListCell {
    fn from(s: &str) -> Self {
        ListCell::new(s)
    }
}

impl From<String> for ListCell {
    fn from(s: String) -> Self {
        ListCell::new(s)
    }
}

/// One row; `columns[i]` is shown in column pane `i`.
#[derive(Debug, Clone)]
pub struct ListRow<T> {
    pub columns: Vec<ListCell>,
    pub data: T,
}

impl<T> ListRow<T> {
    pub fn new(columns: Vec<ListCell>, data: T) -> Self {
        Self { columns, data }
    }
}

pub struct ListView<T> {
    columns: Vec<ListColumn>,
    rows: Vec<ListRow<T>>,
    selected_index: Option<usize>,
    zebra: bool,
    hide_columns: bool,
    scroll_top: usize,
    box_props: BoxProps,
    icons: Box<dyn IconResolver>,
    tapper: DoubleTap,
    on_select: Handler<EntryEvent<T>>,
    on_activate: Handler<EntryEvent<T>>,
    on_context_menu: Handler<EntryEvent<T>>,
    on_create: Handler<EntryCreated<T>>,
    offset: usize,
    mounted: bool,
    /// Re-apply `scroll_top` on the next frame if nothing is selected.
    restore_scroll: bool,
    /// `(row, column)` cells already reported through `on_create`.
    created: HashSet<(usize, usize)>,
    hits: HitMap<usize>,
    area: Rect,
}

impl<T: Clone + 'static> ListView<T> {
    pub fn new(columns: Vec<ListColumn>, rows: Vec<ListRow<T>>) -> Self {
        Self {
            columns,
            rows,
            selected_index: None,
            zebra: true,
            hide_columns: false,
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
            created: HashSet::new(),
            hits: HitMap::default(),
            area: Rect::default(),
        }
    }

    pub fn selected_index(mut self, index: Option<usize>) -> Self {
        self.selected_index = index;
        self
    }

    pub fn zebra(mut self, zebra: bool) -> Self {
        self.zebra = zebra;
        self
    }

    pub fn hide_columns(mut self, hide: bool) -> Self {
        self.hide_columns = hide;
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

    pub fn set_selected_index(&mut self, index: Option<usize>) {
        self.restore_scroll |= index.is_none();
        self.selected_index = index;
    }

    pub fn set_scroll_top(&mut self, rows: usize) {
        self.scroll_top = rows;
        self.restore_scroll = true;
    }

    pub fn set_zebra(&mut self, zebra: bool) {
        self.zebra = zebra;
    }

    pub fn set_rows(&mut self, rows: Vec<ListRow<T>>) {
        self.created.clear();
        self.rows = rows;
        self.hits.clear();
    }

    pub fn rows(&self) -> &[ListRow<T>] {
        &self.rows
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn header_height(&self) -> u16 {
        if self.hide_columns {
            0
        } else {
            1
        }
    }

    pub fn handle_event(&mut self, event: &UiEvent) -> bool {
        if matches!(event.kind, UiEventKind::ScrollUp | UiEventKind::ScrollDown)
            && event.is_inside(self.area)
        {
            let visible = self.area.height.saturating_sub(self.header_height()) as usize;
            let max = self.rows.len().saturating_sub(visible);
            self.offset = if event.kind == UiEventKind::ScrollDown {
                (self.offset + 1).min(max)
            } else {
                self.offset.saturating_sub(1)
            };
            return true;
        }

        let Some(&index) = self.hits.hit(event.column, event.row) else {
            return false;
        };
        let Some(row) = self.rows.get(index) else {
            return false;
        };
        let payload = EntryEvent {
            data: row.data.clone(),
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

    fn sync_offset(&mut self, visible_rows: usize) {
        match self.selected_index {
            _ if !self.mounted => self.offset = self.scroll_top,
            None if self.restore_scroll => self.offset = self.scroll_top,
            // Wheel position stands until the props change.
            None => {}
            Some(sel) => {
                if sel < self.offset {
                    self.offset = sel;
                } else if visible_rows > 0 && sel >= self.offset + visible_rows {
                    self.offset = sel + 1 - visible_rows;
                }
            }
        }
        self.restore_scroll = false;
        self.mounted = true;
    }
}

impl<T: Clone + 'static> Widget for &mut ListView<T> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = self.box_props.render(area, buf);
        self.area = inner;
        self.hits.clear();
        if inner.width == 0 || inner.height == 0 || self.columns.is_empty() {
            return;
        }

        let header_h = self.header_height();
        let visible_rows = inner.height.saturating_sub(header_h) as usize;
        self.sync_offset(visible_rows);

        let constraints: Vec<Constraint> = self
            .columns
            .iter()
            .map(|c| match c.width {
                Some(w) => Constraint::Length(w),
                None => Constraint::Fill(1),
            })
            .collect();
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(inner);

        let last = (self.offset + visible_rows).min(self.rows.len());

        for (pane_index, pane) in panes.iter().enumerate() {
            if header_h > 0 {
                let column = &self.columns[pane_index];
                buf.set_line(
                    pane.x,
                    pane.y,
                    &Line::from(Span::styled(column.label.as_str(), Theme::header_style())),
                    pane.width,
                );
            }

            for row_index in self.offset..last {
                let y = pane.y + header_h + (row_index - self.offset) as u16;
                let cell_area = Rect::new(pane.x, y, pane.width, 1);
                let row = &self.rows[row_index];

                let style = if self.selected_index == Some(row_index) {
                    Theme::selected_style()
                } else if self.zebra && row_index % 2 == 1 {
                    Theme::zebra_style()
                } else {
                    Theme::text_style()
                };
                buf.set_style(cell_area, style);

                let mut spans = Vec::new();
                let cell = row.columns.get(pane_index);
                if let Some(icon) = cell.and_then(|c| c.icon.as_ref()) {
                    spans.push(self.icons.resolve(icon));
                    spans.push(Span::raw(" "));
                }
                let label = cell.map(|c| c.label.as_str()).unwrap_or("");
                spans.push(Span::styled(label, style));
                buf.set_line(cell_area.x, y, &Line::from(spans), cell_area.width);

                self.hits.push(cell_area, row_index);

                if self.created.insert((row_index, pane_index)) {
                    (self.on_create)(EntryCreated {
                        data: row.data.clone(),
                        index: row_index,
                        area: cell_area,
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use super::*;
    use crate::ui::test_util::row_text;

    type Log = Rc<RefCell<Vec<(&'static str, usize, u32)>>>;

    fn list(log: &Log) -> ListView<u32> {
        let columns = vec![ListColumn::new("Name").width(10), ListColumn::new("Size")];
        let rows = (0..5u32)
            .map(|i| {
                ListRow::new(
                    vec![ListCell::from(format!("row{i}")), ListCell::from(format!("{}k", i * 10))],
                    100 + i,
                )
            })
            .collect();
        let (s, a, c) = (Rc::clone(log), Rc::clone(log), Rc::clone(log));
        ListView::new(columns, rows)
            .on_select(move |e| s.borrow_mut().push(("select", e.index, e.data)))
            .on_activate(move |e| a.borrow_mut().push(("activate", e.index, e.data)))
            .on_context_menu(move |e| c.borrow_mut().push(("context", e.index, e.data)))
    }

    fn render(v: &mut ListView<u32>, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        v.render(area, &mut buf);
        buf
    }

    #[test]
    fn renders_header_and_cells_per_column() {
        let log: Log = Rc::default();
        let mut v = list(&log);
        let buf = render(&mut v, Rect::new(0, 0, 20, 6));
        assert_eq!(row_text(&buf, 0), "Name      Size");
        assert_eq!(row_text(&buf, 1), "row0      0k");
        assert_eq!(row_text(&buf, 3), "row2      20k");
    }

    #[test]
    fn click_in_any_column_selects_the_row() {
        let log: Log = Rc::default();
        let mut v = list(&log);
        render(&mut v, Rect::new(0, 0, 20, 6));

        v.handle_event(&UiEvent::new(UiEventKind::Click, 2, 3));
        v.handle_event(&UiEvent::new(UiEventKind::Click, 15, 3));
        assert_eq!(*log.borrow(), vec![("select", 2, 102), ("select", 2, 102)]);
    }

    #[test]
    fn double_click_and_right_click() {
        let log: Log = Rc::default();
        let mut v = list(&log);
        render(&mut v, Rect::new(0, 0, 20, 6));

        v.handle_event(&UiEvent::new(UiEventKind::DoubleClick, 1, 2));
        v.handle_event(&UiEvent::new(UiEventKind::ContextMenu, 12, 5));
        assert_eq!(*log.borrow(), vec![("activate", 1, 101), ("context", 4, 104)]);
    }

    #[test]
    fn header_is_not_clickable() {
        let log: Log = Rc::default();
        let mut v = list(&log);
        render(&mut v, Rect::new(0, 0, 20, 6));
        assert!(!v.handle_event(&UiEvent::new(UiEventKind::Click, 1, 0)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn hidden_columns_shift_rows_up() {
        let log: Log = Rc::default();
        let mut v = list(&log).hide_columns(true);
        let buf = render(&mut v, Rect::new(0, 0, 20, 6));
        assert_eq!(row_text(&buf, 0), "row0      0k");
        v.handle_event(&UiEvent::new(UiEventKind::Click, 1, 0));
        assert_eq!(*log.borrow(), vec![("select", 0, 100)]);
    }

    #[test]
    fn zebra_stripes_odd_rows_only_when_enabled() {
        let log: Log = Rc::default();
        let zebra_bg = Theme::zebra_style().bg.unwrap();

        let mut v = list(&log);
        let buf = render(&mut v, Rect::new(0, 0, 20, 6));
        assert_ne!(buf[(0, 1)].bg, zebra_bg);
        assert_eq!(buf[(0, 2)].bg, zebra_bg);

        v.set_zebra(false);
        let buf = render(&mut v, Rect::new(0, 0, 20, 6));
        assert_ne!(buf[(0, 2)].bg, zebra_bg);
    }

    #[test]
    fn missing_cells_render_empty() {
        let columns = vec![ListColumn::new("A").width(4), ListColumn::new("B")];
        let rows = vec![ListRow::new(vec![ListCell::from("x")], ())];
        let mut v = ListView::new(columns, rows);
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        (&mut v).render(area, &mut buf);
        assert_eq!(row_text(&buf, 1), "x");
    }

    #[test]
    fn selected_row_kept_in_view() {
        let log: Log = Rc::default();
        let mut v = list(&log).selected_index(Some(0));
        let area = Rect::new(0, 0, 20, 3);
        render(&mut v, area);
        assert_eq!(v.offset(), 0);
        v.set_selected_index(Some(4));
        let buf = render(&mut v, area);
        assert_eq!(v.offset(), 3);
        assert_eq!(row_text(&buf, 2), "row4      40k");
    }

    #[test]
    fn on_create_reports_each_cell_once() {
        let created = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&created);
        let log: Log = Rc::default();
        let mut v = list(&log).on_create(move |e| {
            sink.borrow_mut().push((e.index, e.data, e.area.x, e.area.width))
        });
        render(&mut v, Rect::new(0, 0, 20, 6));
        render(&mut v, Rect::new(0, 0, 20, 6));

        let created = created.borrow();
        assert_eq!(created.len(), 5 * 2);
        let name_cells: Vec<_> = created.iter().filter(|c| c.2 == 0).collect();
        let size_cells: Vec<_> = created.iter().filter(|c| c.2 == 10).collect();
        assert_eq!(name_cells.len(), 5);
        assert_eq!(size_cells.len(), 5);
        assert_eq!(*size_cells[3], (3, 103, 10, 10));
        assert_eq!(*name_cells[0], (0, 100, 0, 10));
    }

    #[test]
    fn on_create_reports_cells_scrolled_into_view() {
        let created = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&created);
        let log: Log = Rc::default();
        let mut v = list(&log).on_create(move |e| sink.borrow_mut().push(e.index));
        let area = Rect::new(0, 0, 20, 3);
        render(&mut v, area);
        assert_eq!(*created.borrow(), vec![0, 1, 0, 1]);

        v.handle_event(&UiEvent::new(UiEventKind::ScrollDown, 1, 1));
        render(&mut v, area);
        assert_eq!(*created.borrow(), vec![0, 1, 0, 1, 2, 2]);
    }

    #[test]
    fn double_tap_activates_second_touch_on_same_row() {
        let log: Log = Rc::default();
        let mut v = list(&log).double_tap(DoubleTap::new(Duration::from_millis(200)));
        render(&mut v, Rect::new(0, 0, 20, 6));

        let t0 = Instant::now();
        let touch = |x, y, ms| UiEvent::at(UiEventKind::TouchStart, x, y, t0 + Duration::from_millis(ms));
        // Row 1 in the name column, then row 1 in the size column.
        assert!(v.handle_event(&touch(1, 2, 0)));
        assert!(log.borrow().is_empty());
        v.handle_event(&touch(12, 2, 80));
        assert_eq!(*log.borrow(), vec![("activate", 1, 101)]);
    }

    #[test]
    fn touch_on_another_row_breaks_the_double_tap() {
        let log: Log = Rc::default();
        let mut v = list(&log).double_tap(DoubleTap::new(Duration::from_millis(200)));
        render(&mut v, Rect::new(0, 0, 20, 6));

        let t0 = Instant::now();
        let touch = |y, ms| UiEvent::at(UiEventKind::TouchStart, 1, y, t0 + Duration::from_millis(ms));
        v.handle_event(&touch(2, 0));
        v.handle_event(&touch(3, 40));
        v.handle_event(&touch(2, 80));
        assert!(log.borrow().is_empty());
        // Too slow after the last touch on row 1.
        v.handle_event(&touch(2, 400));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn wheel_scrolls_and_clearing_selection_restores_scroll_prop() {
        let log: Log = Rc::default();
        // Two body rows visible out of five.
        let mut v = list(&log).scroll_top(1);
        let area = Rect::new(0, 0, 20, 3);
        render(&mut v, area);
        assert_eq!(v.offset(), 1);

        assert!(v.handle_event(&UiEvent::new(UiEventKind::ScrollDown, 1, 1)));
        let buf = render(&mut v, area);
        assert_eq!(v.offset(), 2);
        assert_eq!(row_text(&buf, 1), "row2      20k");

        v.set_selected_index(None);
        render(&mut v, area);
        assert_eq!(v.offset(), 1);

        v.set_scroll_top(3);
        let buf = render(&mut v, area);
        assert_eq!(v.offset(), 3);
        assert_eq!(row_text(&buf, 2), "row4      40k");
    }

    struct Letters;

    impl IconResolver for Letters {
        fn resolve(&self, icon: &IconSpec) -> Span<'static> {
            Span::raw(icon.name.chars().next().map(String::from).unwrap_or_default())
        }
    }

    #[test]
    fn cell_icons_come_from_the_injected_resolver() {
        let columns = vec![ListColumn::new("Name")];
        let rows = vec![
            ListRow::new(vec![ListCell::from("docs").icon(IconSpec::new("folder"))], 0u8),
            ListRow::new(vec![ListCell::from("notes")], 1u8),
        ];
        let mut v = ListView::new(columns, rows).icons(Letters);
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        (&mut v).render(area, &mut buf);
        assert_eq!(row_text(&buf, 1), "f docs");
        assert_eq!(row_text(&buf, 2), "notes");

        v.set_rows(vec![ListRow::new(vec![ListCell::from("only")], 7u8)]);
        assert_eq!(v.rows().len(), 1);
        assert_eq!(v.rows()[0].data, 7);
    }
}
