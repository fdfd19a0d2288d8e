//! Host-agnostic input events and the payloads widgets hand to callbacks.
//!
//! The hosting loop (see the gallery's `app::event`) translates whatever the
//! terminal or platform delivers into [`UiEvent`]s.  Widgets never look at
//! crossterm types directly, which keeps them testable with synthetic input.

use std::time::Instant;

use ratatui::layout::Rect;

// ───────────────────────────────────────── events ────────────

/// What kind of input a [`UiEvent`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEventKind {
    /// Primary button pressed and released on the same spot.
    Click,
    /// Second click inside the double-click window.
    DoubleClick,
    /// Secondary button (right click).
    ContextMenu,
    PointerDown,
    PointerMove,
    PointerUp,
    /// Pointer moved without a button held.
    Hover,
    TouchStart,
    TouchEnd,
    ScrollUp,
    ScrollDown,
}

/// A single input event positioned in terminal cells.
#[derive(Debug, Clone)]
pub struct UiEvent {
    pub kind: UiEventKind,
    pub column: u16,
    pub row: u16,
    pub at: Instant,
    default_prevented: bool,
}

impl UiEvent {
    pub fn new(kind: UiEventKind, column: u16, row: u16) -> Self {
        Self::at(kind, column, row, Instant::now())
    }

    /// Build an event with an explicit timestamp (used by gesture detection).
    pub fn at(kind: UiEventKind, column: u16, row: u16, at: Instant) -> Self {
        Self {
            kind,
            column,
            row,
            at,
            default_prevented: false,
        }
    }

    /// Suppress the host's default handling (selection, scrolling).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Does the event fall inside `area`?
    pub fn is_inside(&self, area: Rect) -> bool {
        point_in_rect(area, self.column, self.row)
    }
}

/// Cell-level hit test.
pub fn point_in_rect(rect: Rect, x: u16, y: u16) -> bool {
    x >= rect.x
        && x < rect.x.saturating_add(rect.width)
        && y >= rect.y
        && y < rect.y.saturating_add(rect.height)
}

// ───────────────────────────────────────── payloads ──────────

/// Payload for entry-level events of IconView and ListView.
#[derive(Debug, Clone)]
pub struct EntryEvent<T> {
    pub data: T,
    pub index: usize,
    pub event: UiEvent,
}

/// Payload for `on_create`: fired once when an entry is first laid out.
#[derive(Debug, Clone)]
pub struct EntryCreated<T> {
    pub data: T,
    pub index: usize,
    pub area: Rect,
}

// ───────────────────────────────────────── handlers ──────────

/// Boxed single-argument callback.
pub type Handler<T> = Box<dyn FnMut(T)>;

/// The default for every omitted callback.
pub fn noop<T>() -> Handler<T> {
    Box::new(|_| {})
}
