//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task that
//! forwards them over a channel so the main loop stays non-blocking.  Mouse
//! reports are then turned into widget-level [`UiEvent`]s by a
//! [`PointerTranslator`].

use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use tokio::sync::mpsc;

use desk_widgets::core::event::{UiEvent, UiEventKind};
use desk_widgets::core::tap::DoubleTap;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
}

/// Spawns a background task that polls the terminal for events and sends them
/// through the returned channel.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            let has_event = event::poll(tick_rate).unwrap_or(false);
            if has_event {
                if let Ok(ev) = event::read() {
                    let app_event = match ev {
                        CtEvent::Key(k) => AppEvent::Key(k),
                        CtEvent::Mouse(m) => AppEvent::Mouse(m),
                        CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                        _ => continue,
                    };
                    if tx.send(app_event).is_err() {
                        break; // receiver dropped
                    }
                }
            } else if tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });

    rx
}

// ───────────────────────────────────────── pointer ───────────

/// Turns raw terminal mouse reports into the pointer/click vocabulary the
/// widgets understand.  Terminals only report presses, so a second left
/// press on the same cell inside the window becomes a `DoubleClick`.
pub struct PointerTranslator {
    clicks: DoubleTap<(u16, u16)>,
}

impl PointerTranslator {
    pub fn new(window: Duration) -> Self {
        Self {
            clicks: DoubleTap::new(window),
        }
    }

    pub fn translate(&mut self, mouse: MouseEvent, at: Instant) -> Vec<UiEvent> {
        let (x, y) = (mouse.column, mouse.row);
        let ev = |kind| UiEvent::at(kind, x, y, at);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let click = if self.clicks.tap((x, y), at) {
                    UiEventKind::DoubleClick
                } else {
                    UiEventKind::Click
                };
                vec![ev(UiEventKind::PointerDown), ev(click)]
            }
            MouseEventKind::Down(MouseButton::Right) => {
                self.clicks.reset();
                vec![ev(UiEventKind::ContextMenu)]
            }
            MouseEventKind::Drag(MouseButton::Left) => vec![ev(UiEventKind::PointerMove)],
            MouseEventKind::Up(MouseButton::Left) => vec![ev(UiEventKind::PointerUp)],
            MouseEventKind::Moved => vec![ev(UiEventKind::Hover)],
            MouseEventKind::ScrollUp => vec![ev(UiEventKind::ScrollUp)],
            MouseEventKind::ScrollDown => vec![ev(UiEventKind::ScrollDown)],
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn kinds(events: &[UiEvent]) -> Vec<UiEventKind> {
        events.iter().map(|e| e.kind).collect()
    }

    #[test]
    fn second_press_on_same_cell_is_a_double_click() {
        let mut t = PointerTranslator::new(Duration::from_millis(300));
        let t0 = Instant::now();
        let down = MouseEventKind::Down(MouseButton::Left);

        let first = t.translate(mouse(down, 4, 2), t0);
        assert_eq!(kinds(&first), vec![UiEventKind::PointerDown, UiEventKind::Click]);
        assert_eq!((first[1].column, first[1].row), (4, 2));

        let second = t.translate(mouse(down, 4, 2), t0 + Duration::from_millis(120));
        assert_eq!(
            kinds(&second),
            vec![UiEventKind::PointerDown, UiEventKind::DoubleClick]
        );

        let third = t.translate(mouse(down, 4, 2), t0 + Duration::from_millis(200));
        assert_eq!(third[1].kind, UiEventKind::Click);
    }

    #[test]
    fn presses_on_different_cells_or_too_slow_stay_single() {
        let mut t = PointerTranslator::new(Duration::from_millis(300));
        let t0 = Instant::now();
        let down = MouseEventKind::Down(MouseButton::Left);

        t.translate(mouse(down, 1, 1), t0);
        let moved = t.translate(mouse(down, 2, 1), t0 + Duration::from_millis(50));
        assert_eq!(moved[1].kind, UiEventKind::Click);
        let slow = t.translate(mouse(down, 2, 1), t0 + Duration::from_millis(600));
        assert_eq!(slow[1].kind, UiEventKind::Click);
    }

    #[test]
    fn buttons_drags_and_wheel_map_to_pointer_kinds() {
        let mut t = PointerTranslator::new(Duration::from_millis(300));
        let now = Instant::now();
        let cases = [
            (MouseEventKind::Down(MouseButton::Right), vec![UiEventKind::ContextMenu]),
            (MouseEventKind::Drag(MouseButton::Left), vec![UiEventKind::PointerMove]),
            (MouseEventKind::Up(MouseButton::Left), vec![UiEventKind::PointerUp]),
            (MouseEventKind::Moved, vec![UiEventKind::Hover]),
            (MouseEventKind::ScrollDown, vec![UiEventKind::ScrollDown]),
            (MouseEventKind::Down(MouseButton::Middle), vec![]),
        ];
        for (kind, expected) in cases {
            assert_eq!(kinds(&t.translate(mouse(kind, 0, 0), now)), expected);
        }
    }
}
