//! Resizable split panes.
//!
//! Children are laid out along the orientation's axis with a one-cell
//! spacer after every pane but the last.  Pressing on a spacer opens a
//! [`DragSession`] for the pane before it and captures the document's
//! pointer-move/up streams until release, so the drag keeps tracking
//! wherever the pointer goes.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::Widget,
};

use super::theme::Theme;
use crate::core::drag::{DragSession, Orientation, PaneSizes, SizeUpdate, Slot};
use crate::core::event::{noop, point_in_rect, Handler, UiEvent, UiEventKind};
use crate::core::listeners::{Document, PointerCapture, WidgetId};

/// Width of the first pane before anything is resized.
pub const DEFAULT_FIRST_PANE: u16 = 30;

/// An open drag and the listeners it holds.
struct ActiveDrag {
    session: DragSession,
    _capture: PointerCapture,
}

pub struct Panes {
    id: WidgetId,
    document: Document,
    orientation: Orientation,
    pane_count: usize,
    sizes: PaneSizes,
    on_resize: Handler<SizeUpdate>,
    drag: Option<ActiveDrag>,
    // ── last layout ──
    area: Rect,
    slots: Vec<Slot>,
    slot_areas: Vec<Rect>,
}

impl Panes {
    pub fn new(document: &Document, pane_count: usize) -> Self {
        Self {
            id: document.allocate_id(),
            document: document.clone(),
            orientation: Orientation::default(),
            pane_count,
            sizes: PaneSizes::new(vec![Some(DEFAULT_FIRST_PANE)]),
            on_resize: noop(),
            drag: None,
            area: Rect::default(),
            slots: Vec::new(),
            slot_areas: Vec::new(),
        }
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Initial pane sizes.
    pub fn sizes(mut self, sizes: PaneSizes) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn on_resize(mut self, f: impl FnMut(SizeUpdate) + 'static) -> Self {
        self.on_resize = Box::new(f);
        self
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn current_sizes(&self) -> &PaneSizes {
        &self.sizes
    }

    pub fn get_orientation(&self) -> Orientation {
        self.orientation
    }

    /// Switch axis.  Any open drag is dropped since its axis no longer applies.
    pub fn set_orientation(&mut self, orientation: Orientation) {
        if orientation != self.orientation {
            self.cancel_drag();
            self.orientation = orientation;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// End a drag without a pointer-up (pane removed, focus lost, ...).
    pub fn cancel_drag(&mut self) {
        if self.drag.take().is_some() {
            tracing::debug!(owner = ?self.id, "pane drag cancelled");
        }
    }

    // ── layout ──────────────────────────────────────────────────

    /// Lay out panes and spacers inside `area` and remember the result for
    /// hit-testing.  Returns one rect per pane.
    pub fn split(&mut self, area: Rect) -> Vec<Rect> {
        let mut slots = Vec::new();
        let mut constraints = Vec::new();
        for index in 0..self.pane_count {
            constraints.push(match self.sizes.get(index) {
                Some(size) => Constraint::Length(size),
                None => Constraint::Fill(1),
            });
            slots.push(Slot::Pane { index, extent: 0 });
            if index + 1 < self.pane_count {
                constraints.push(Constraint::Length(1));
                slots.push(Slot::Spacer);
            }
        }

        let direction = match self.orientation {
            Orientation::Vertical => Direction::Horizontal,
            Orientation::Horizontal => Direction::Vertical,
        };
        let areas = Layout::default()
            .direction(direction)
            .constraints(constraints)
            .split(area);

        let mut panes = Vec::with_capacity(self.pane_count);
        for (slot, rect) in slots.iter_mut().zip(areas.iter()) {
            if let Slot::Pane { extent, .. } = slot {
                *extent = match self.orientation {
                    Orientation::Vertical => rect.width,
                    Orientation::Horizontal => rect.height,
                };
                panes.push(*rect);
            }
        }

        self.area = area;
        self.slots = slots;
        self.slot_areas = areas.to_vec();
        panes
    }

    /// Pane rects from the last layout.
    pub fn pane_areas(&self) -> Vec<Rect> {
        self.slots
            .iter()
            .zip(&self.slot_areas)
            .filter(|(slot, _)| matches!(slot, Slot::Pane { .. }))
            .map(|(_, rect)| *rect)
            .collect()
    }

    fn spacer_at(&self, x: u16, y: u16) -> Option<usize> {
        self.slots
            .iter()
            .zip(&self.slot_areas)
            .position(|(slot, rect)| *slot == Slot::Spacer && point_in_rect(*rect, x, y))
    }

    // ── events ──────────────────────────────────────────────────

    /// Feed pointer events.  Move/up events should be routed here whenever
    /// this widget is listed on the document's streams, whatever their
    /// position.
    pub fn handle_event(&mut self, event: &mut UiEvent) -> bool {
        match event.kind {
            UiEventKind::PointerDown => self.pointer_down(event),
            UiEventKind::PointerMove => {
                let Some(drag) = self.drag.as_ref() else {
                    return false;
                };
                event.prevent_default();
                let update = drag.session.update(event.column, event.row);
                tracing::trace!(index = update.index, size = update.size, "pane resize");
                self.sizes = self.sizes.with_update(update);
                (self.on_resize)(update);
                true
            }
            UiEventKind::PointerUp => {
                if self.drag.is_none() {
                    return false;
                }
                event.prevent_default();
                self.drag = None;
                tracing::debug!(owner = ?self.id, "pane drag finished");
                true
            }
            _ => false,
        }
    }

    fn pointer_down(&mut self, event: &mut UiEvent) -> bool {
        let Some(spacer) = self.spacer_at(event.column, event.row) else {
            return false;
        };
        if self.drag.is_some() {
            // Listeners from the open session are still attached.
            return true;
        }
        let container = match self.orientation {
            Orientation::Vertical => self.area.width,
            Orientation::Horizontal => self.area.height,
        };
        let coord = self.orientation.axis(event.column, event.row);
        let Some(session) =
            DragSession::begin(&self.slots, spacer, self.orientation, container, coord)
        else {
            return false;
        };

        event.prevent_default();
        tracing::debug!(
            pane = session.index,
            start = session.start_extent,
            max = session.max_extent,
            orientation = self.orientation.label(),
            "pane drag started"
        );
        self.drag = Some(ActiveDrag {
            session,
            _capture: self.document.capture(self.id),
        });
        true
    }
}

impl Widget for &mut Panes {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.split(area);
        let active = self.drag.as_ref().map(|d| d.session.index);
        let mut pane_before = None;
        for (slot, rect) in self.slots.iter().zip(&self.slot_areas) {
            match slot {
                Slot::Pane { index, .. } => pane_before = Some(*index),
                Slot::Spacer => {
                    let style = if active.is_some() && active == pane_before {
                        Theme::spacer_active_style()
                    } else {
                        Theme::spacer_style()
                    };
                    let glyph = match self.orientation {
                        Orientation::Vertical => "│",
                        Orientation::Horizontal => "─",
                    };
                    for y in rect.top()..rect.bottom() {
                        for x in rect.left()..rect.right() {
                            buf[(x, y)].set_symbol(glyph).set_style(style);
                        }
                    }
                }
            }
        }
    }
}
