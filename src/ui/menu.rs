//! Context / dropdown menu with nested submenus.
//!
//! The root list is drawn at `position`; every submenu on the open path is
//! drawn to the right of its parent row.  Hovering (or lifting a touch on)
//! a submenu row opens it; clicking it does nothing.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use super::hit::HitMap;
use super::icon::{GlyphIcons, IconResolver};
use super::theme::Theme;
use crate::core::event::{point_in_rect, UiEvent, UiEventKind};
use crate::core::menu::{item_at, item_at_mut, ItemHandler, ItemInfo, MenuItem, MenuItemKind, MenuPath};

type ShowHandler = Box<dyn FnMut(&UiEvent, &[usize])>;

/// Top-left corner of the root list, in screen cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuPosition {
    pub top: u16,
    pub left: u16,
}

pub struct Menu {
    items: Vec<MenuItem>,
    visible: bool,
    position: MenuPosition,
    icons: Box<dyn IconResolver>,
    on_click: Option<ItemHandler>,
    on_show: ShowHandler,
    open_path: MenuPath,
    hits: HitMap<MenuPath>,
    panels: Vec<Rect>,
}

impl Menu {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            visible: true,
            position: MenuPosition::default(),
            icons: Box::new(GlyphIcons),
            on_click: None,
            on_show: Box::new(|_, _| {}),
            open_path: Vec::new(),
            hits: HitMap::default(),
            panels: Vec::new(),
        }
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn position(mut self, position: MenuPosition) -> Self {
        self.position = position;
        self
    }

    pub fn icons(mut self, resolver: impl IconResolver + 'static) -> Self {
        self.icons = Box::new(resolver);
        self
    }

    /// Called after an item's own handler for every clicked item.
    pub fn on_click(mut self, f: impl FnMut(&ItemInfo, &UiEvent) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Called when a submenu opens, with the submenu item's path.
    pub fn on_show(mut self, f: impl FnMut(&UiEvent, &[usize]) + 'static) -> Self {
        self.on_show = Box::new(f);
        self
    }

    // ── prop updates ────────────────────────────────────────────

    pub fn show_at(&mut self, position: MenuPosition) {
        self.position = position;
        self.visible = true;
        self.open_path.clear();
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.open_path.clear();
        self.hits.clear();
        self.panels.clear();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_items(&mut self, items: Vec<MenuItem>) {
        self.items = items;
        self.open_path.clear();
    }

    /// Update a checkbox item in place; other kinds are left alone.
    pub fn set_checked(&mut self, path: &[usize], checked: bool) {
        if let Some(item) = item_at_mut(&mut self.items, path) {
            if let MenuItemKind::Checkbox { checked: ref mut c } = item.kind {
                *c = checked;
            }
        }
    }

    pub fn item(&self, path: &[usize]) -> Option<&MenuItem> {
        item_at(&self.items, path)
    }

    /// Path of the deepest open submenu (empty when only the root is shown).
    pub fn open_path(&self) -> &[usize] {
        &self.open_path
    }

    /// Is `(x, y)` over any drawn panel?
    pub fn contains(&self, x: u16, y: u16) -> bool {
        self.visible && self.panels.iter().any(|p| point_in_rect(*p, x, y))
    }

    // ── events ──────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: &UiEvent) -> bool {
        if !self.visible {
            return false;
        }
        let Some(path) = self.hits.hit(event.column, event.row).cloned() else {
            return self.contains(event.column, event.row);
        };
        let Some(item) = item_at(&self.items, &path) else {
            return false;
        };
        let is_submenu = item.children().is_some();

        match event.kind {
            UiEventKind::Hover | UiEventKind::PointerMove | UiEventKind::TouchEnd if is_submenu => {
                self.open(event, path);
                true
            }
            UiEventKind::Hover | UiEventKind::PointerMove => {
                // Hovering a plain row closes deeper submenus of other rows.
                let parent = &path[..path.len() - 1];
                if !self.open_path.starts_with(&path) {
                    self.open_path.truncate(parent.len());
                }
                true
            }
            UiEventKind::Click | UiEventKind::TouchEnd => {
                if item.is_clickable() {
                    self.click(event, &path);
                }
                true
            }
            _ => true,
        }
    }

    fn open(&mut self, event: &UiEvent, path: MenuPath) {
        if self.open_path == path {
            return;
        }
        tracing::trace!(?path, "submenu opened");
        (self.on_show)(event, &path);
        self.open_path = path;
    }

    fn click(&mut self, event: &UiEvent, path: &[usize]) {
        let Some(item) = item_at_mut(&mut self.items, path) else {
            return;
        };
        let info = ItemInfo {
            path: path.to_vec(),
            label: item.label.clone(),
            checked: item.checked(),
        };
        if let Some(f) = item.on_click.as_mut() {
            f(&info, event);
        }
        if let Some(f) = self.on_click.as_mut() {
            f(&info, event);
        }
    }

    fn render_list(
        &mut self,
        items_path: &[usize],
        anchor: (u16, u16),
        area: Rect,
        buf: &mut Buffer,
    ) -> Option<Vec<Rect>> {
        let items: &[MenuItem] = if items_path.is_empty() {
            &self.items
        } else {
            item_at(&self.items, items_path)?.children()?
        };

        let content_width = items.iter().map(row_width).max().unwrap_or(0);
        let width = (content_width + 2).min(area.width);
        let height = (items.len() as u16 + 2).min(area.height);
        if width < 3 || height < 3 {
            return None;
        }
        let x = anchor.0.min(area.right().saturating_sub(width)).max(area.x);
        let y = anchor.1.min(area.bottom().saturating_sub(height)).max(area.y);
        let panel = Rect::new(x, y, width, height);

        Clear.render(panel, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border_style())
            .style(Theme::menu_style());
        let inner = block.inner(panel);
        block.render(panel, buf);

        let mut rows = Vec::new();
        let mut row_hits = Vec::new();
        for (i, item) in items.iter().enumerate().take(inner.height as usize) {
            let row = Rect::new(inner.x, inner.y + i as u16, inner.width, 1);
            let open = self.open_path.get(items_path.len()) == Some(&i)
                && self.open_path.starts_with(items_path);
            let line = row_line(item, row.width, open, self.icons.as_ref());
            buf.set_line(row.x, row.y, &line, row.width);

            let mut path = items_path.to_vec();
            path.push(i);
            row_hits.push((row, path));
            rows.push(row);
        }

        self.panels.push(panel);
        for (row, path) in row_hits {
            self.hits.push(row, path);
        }
        Some(rows)
    }
}

/// Cells a row needs: marker column + label + submenu arrow.
fn row_width(item: &MenuItem) -> u16 {
    let label = match &item.kind {
        MenuItemKind::Custom { element } => element().width(),
        MenuItemKind::Separator => 1,
        MenuItemKind::Checkbox { .. } => item.label.chars().count() + 2,
        _ => item.label.chars().count(),
    };
    (label + 5) as u16
}

fn row_line(item: &MenuItem, width: u16, open: bool, icons: &dyn IconResolver) -> Line<'static> {
    let style = if item.disabled {
        Theme::disabled_style()
    } else if open {
        Theme::selected_style()
    } else {
        Theme::menu_style()
    };

    let marker = |icon: Option<Span<'static>>| icon.unwrap_or_else(|| Span::raw(" "));
    let mut spans = match &item.kind {
        MenuItemKind::Separator => {
            return Line::from(Span::styled(
                "─".repeat(width as usize),
                Theme::border_style(),
            ));
        }
        MenuItemKind::Custom { element } => return element(),
        MenuItemKind::Checkbox { checked } => vec![
            Span::styled(if *checked { "[x]" } else { "[ ]" }, style),
            Span::raw(" "),
            Span::styled(item.label.clone(), style),
        ],
        MenuItemKind::Action | MenuItemKind::Submenu { .. } => vec![
            marker(item.icon.as_ref().map(|i| icons.resolve(i))),
            Span::raw(" "),
            Span::styled(item.label.clone(), style),
        ],
    };

    if let MenuItemKind::Submenu { .. } = item.kind {
        let used: usize = spans.iter().map(|s| s.width()).sum();
        let gap = (width as usize).saturating_sub(used + 1);
        spans.push(Span::styled(" ".repeat(gap), style));
        spans.push(Span::styled("▸", style));
    }
    Line::from(spans)
}

impl Widget for &mut Menu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.hits.clear();
        self.panels.clear();
        if !self.visible {
            return;
        }

        let root_anchor = (self.position.left, self.position.top);
        let Some(mut rows) = self.render_list(&[], root_anchor, area, buf) else {
            return;
        };

        let open_path = self.open_path.clone();
        for depth in 1..=open_path.len() {
            let parent_row = open_path[depth - 1];
            let Some(row) = rows.get(parent_row).copied() else {
                break;
            };
            // Border column of the parent panel sits right of the row.
            let anchor = (row.right().saturating_add(1), row.y.saturating_sub(1));
            match self.render_list(&open_path[..depth], anchor, area, buf) {
                Some(next) => rows = next,
                None => break,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::ui::test_util::row_text;

    type Log = Rc<RefCell<Vec<String>>>;

    fn menu(log: &Log) -> Menu {
        let item_log = Rc::clone(log);
        let menu_log = Rc::clone(log);
        Menu::new(vec![
            MenuItem::action("Open").on_click(move |info, _| {
                item_log.borrow_mut().push(format!("item:{}", info.label))
            }),
            MenuItem::separator(),
            MenuItem::checkbox("Hidden", true),
            MenuItem::submenu(
                "Sort",
                vec![MenuItem::action("Name"), MenuItem::action("Size")],
            ),
            MenuItem::action("Quit").disabled(true),
            MenuItem::custom(|| Line::raw(" ~custom~")),
        ])
        .on_click(move |info, _| menu_log.borrow_mut().push(format!("menu:{:?}", info.path)))
    }

    fn render(m: &mut Menu, area: Rect) -> Buffer {
        let mut buf = Buffer::empty(area);
        m.render(area, &mut buf);
        buf
    }

    fn click(x: u16, y: u16) -> UiEvent {
        UiEvent::new(UiEventKind::Click, x, y)
    }

    #[test]
    fn renders_each_kind() {
        let log: Log = Rc::default();
        let mut m = menu(&log);
        let buf = render(&mut m, Rect::new(0, 0, 40, 12));
        assert!(row_text(&buf, 1).contains("Open"));
        assert!(row_text(&buf, 2).contains("───"));
        assert!(row_text(&buf, 3).contains("[x] Hidden"));
        assert!(row_text(&buf, 4).contains("Sort"));
        assert!(row_text(&buf, 4).contains('▸'));
        assert!(row_text(&buf, 5).contains("Quit"));
        assert!(row_text(&buf, 6).contains("~custom~"));
    }

    #[test]
    fn click_runs_item_then_menu_handler() {
        let log: Log = Rc::default();
        let mut m = menu(&log);
        render(&mut m, Rect::new(0, 0, 40, 12));
        assert!(m.handle_event(&click(3, 1)));
        assert_eq!(*log.borrow(), vec!["item:Open", "menu:[0]"]);
    }

    #[test]
    fn separator_submenu_and_disabled_do_not_click() {
        let log: Log = Rc::default();
        let mut m = menu(&log);
        render(&mut m, Rect::new(0, 0, 40, 12));
        m.handle_event(&click(3, 2));
        m.handle_event(&click(3, 4));
        m.handle_event(&click(3, 5));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn checkbox_reports_state_and_can_be_updated() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut m = Menu::new(vec![MenuItem::checkbox("Zebra", false)])
            .on_click(move |info, _| sink.borrow_mut().push(info.checked));
        let area = Rect::new(0, 0, 20, 5);
        let buf = render(&mut m, area);
        assert!(row_text(&buf, 1).contains("[ ] Zebra"));

        m.handle_event(&click(2, 1));
        m.set_checked(&[0], true);
        let buf = render(&mut m, area);
        assert!(row_text(&buf, 1).contains("[x] Zebra"));
        assert_eq!(*seen.borrow(), vec![Some(false)]);
        assert!(matches!(
            m.item(&[0]).map(|item| &item.kind),
            Some(MenuItemKind::Checkbox { checked: true })
        ));
        assert!(m.item(&[3]).is_none());
    }

    #[test]
    fn hover_opens_submenu_and_child_click_reports_path() {
        let log: Log = Rc::default();
        let shown = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&shown);
        let mut m = menu(&log).on_show(move |_, p| sink.borrow_mut().push(p.to_vec()));
        let area = Rect::new(0, 0, 40, 12);
        render(&mut m, area);

        m.handle_event(&UiEvent::new(UiEventKind::Hover, 3, 4));
        m.handle_event(&UiEvent::new(UiEventKind::Hover, 4, 4));
        assert_eq!(m.open_path(), &[3]);
        assert_eq!(*shown.borrow(), vec![vec![3]]);

        let buf = render(&mut m, area);
        // Submenu panel opens beside row 4; its first row is level with it.
        let text = row_text(&buf, 4);
        assert!(text.contains("Sort"));
        assert!(text.contains("Name"));

        let name_x = (0..40u16).find(|&x| buf[(x, 4)].symbol() == "N").unwrap();
        m.handle_event(&click(name_x, 4));
        assert_eq!(*log.borrow(), vec!["menu:[3, 0]"]);
    }

    #[test]
    fn touch_end_on_submenu_opens_it() {
        let log: Log = Rc::default();
        let mut m = menu(&log);
        render(&mut m, Rect::new(0, 0, 40, 12));
        m.handle_event(&UiEvent::new(UiEventKind::TouchEnd, 3, 4));
        assert_eq!(m.open_path(), &[3]);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn hovering_plain_row_closes_submenu() {
        let log: Log = Rc::default();
        let mut m = menu(&log);
        render(&mut m, Rect::new(0, 0, 40, 12));
        m.handle_event(&UiEvent::new(UiEventKind::Hover, 3, 4));
        m.handle_event(&UiEvent::new(UiEventKind::Hover, 3, 1));
        assert!(m.open_path().is_empty());
    }

    #[test]
    fn hidden_menu_draws_and_consumes_nothing() {
        let log: Log = Rc::default();
        let mut m = menu(&log).visible(false);
        let buf = render(&mut m, Rect::new(0, 0, 40, 12));
        assert_eq!(row_text(&buf, 1), "");
        assert!(!m.handle_event(&click(3, 1)));
        assert!(!m.contains(3, 1));
    }

    #[test]
    fn position_is_clamped_into_area() {
        let log: Log = Rc::default();
        let mut m = menu(&log).position(MenuPosition { top: 50, left: 50 });
        let area = Rect::new(0, 0, 30, 10);
        render(&mut m, area);
        assert!(m.contains(29, 9));
        assert!(!m.contains(0, 0));
    }

    #[test]
    fn click_outside_is_not_consumed() {
        let log: Log = Rc::default();
        let mut m = menu(&log).position(MenuPosition { top: 0, left: 0 });
        render(&mut m, Rect::new(0, 0, 40, 12));
        assert!(!m.handle_event(&click(35, 11)));
        // Border clicks are swallowed without firing anything.
        assert!(m.handle_event(&click(0, 0)));
        assert!(log.borrow().is_empty());
    }
}
