//! Input handling: maps key/mouse events to widget events and state
//! mutations.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};

use desk_widgets::core::event::{UiEvent, UiEventKind};
use desk_widgets::core::listeners::PointerStream;
use desk_widgets::core::menu::MenuItem;
use desk_widgets::ui::menu::MenuPosition;

use super::state::{GalleryMsg, GalleryState};

/// Process a key event.
pub fn handle_key(state: &mut GalleryState, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match key.code {
        KeyCode::Esc if state.menu.is_visible() => state.menu.hide(),
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Char('o') => {
            let next = state.config.orientation.flipped();
            apply(state, GalleryMsg::SetOrientation(next));
        }
        KeyCode::Char('z') => {
            let next = !state.config.zebra;
            apply(state, GalleryMsg::SetZebra(next));
        }
        KeyCode::Char('e') => {
            let ev = UiEvent::new(UiEventKind::Click, 0, 0);
            state.expander.toggle(&ev);
        }
        _ => {}
    }
    drain_messages(state);
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut GalleryState, mouse: MouseEvent) {
    for mut ev in state.pointer.translate(mouse, Instant::now()) {
        dispatch(state, &mut ev);
    }
    drain_messages(state);
}

/// Offer `ev` to the widgets, topmost first, until one consumes it.
fn dispatch(state: &mut GalleryState, ev: &mut UiEvent) {
    // Captured pointer streams go to their listener wherever the pointer is.
    let stream = match ev.kind {
        UiEventKind::PointerMove => Some(PointerStream::Move),
        UiEventKind::PointerUp => Some(PointerStream::Up),
        _ => None,
    };
    if let Some(stream) = stream {
        if state.document.listeners(stream).contains(&state.panes.id())
            && state.panes.handle_event(ev)
        {
            return;
        }
    }

    if state.menu.is_visible() {
        if state.menu.handle_event(ev) {
            return;
        }
        // Anything pressed outside an open menu closes it and goes no further.
        match ev.kind {
            UiEventKind::Click | UiEventKind::DoubleClick | UiEventKind::ContextMenu => {
                state.menu.hide();
                return;
            }
            UiEventKind::PointerDown => return,
            _ => {}
        }
    }

    if state.menubar.handle_event(ev) || state.panes.handle_event(ev) {
        return;
    }
    if state.expander.handle_event(ev)
        || (state.expander.is_active() && state.icons.handle_event(ev))
    {
        return;
    }
    if !state.tabs.handle_event(ev) && state.tabs.active() == 0 {
        state.list.handle_event(ev);
    }
}

/// Apply every message widget callbacks posted since the last call.
pub fn drain_messages(state: &mut GalleryState) {
    while let Ok(msg) = state.rx.try_recv() {
        apply(state, msg);
    }
}

fn apply(state: &mut GalleryState, msg: GalleryMsg) {
    match msg {
        GalleryMsg::Status(text) => state.status_message = Some(text),
        GalleryMsg::IconSelected(index) => state.icons.set_selected_index(Some(index)),
        GalleryMsg::RowSelected(index) => state.list.set_selected_index(Some(index)),
        GalleryMsg::Activated(name) => {
            tracing::info!(%name, "entry activated");
            state.status_message = Some(format!("opened {name}"));
        }
        GalleryMsg::EntryMenu { column, row, name } => {
            let items = state.entry_menu_items(&name);
            open_menu(state, items, column, row);
        }
        GalleryMsg::TabMenu { column, row, label } => {
            let items = state.tab_menu_items(&label);
            open_menu(state, items, column, row);
        }
        GalleryMsg::OpenBarMenu { menu, index } => {
            if let Some(anchor) = state.menubar.item_area(index) {
                let items = state.bar_menu_items(menu);
                open_menu(state, items, anchor.x, anchor.bottom());
            }
        }
        GalleryMsg::MenuClosed => state.menu.hide(),
        GalleryMsg::SetZebra(zebra) => {
            state.config.zebra = zebra;
            state.list.set_zebra(zebra);
        }
        GalleryMsg::SetOrientation(orientation) => {
            state.config.orientation = orientation;
            state.panes.set_orientation(orientation);
            state.status_message = Some(format!("split: {}", orientation.label()));
        }
        GalleryMsg::Resized(update) => {
            state.config.pane_sizes = state.config.pane_sizes.with_update(update);
            state.status_message = Some(format!("pane {} → {} cells", update.index, update.size));
        }
        GalleryMsg::SaveConfig => match state.config.save() {
            Ok(()) => state.status_message = Some("settings saved".into()),
            Err(err) => {
                tracing::error!(%err, "failed to save config");
                state.status_message = Some(format!("save failed: {err}"));
            }
        },
        GalleryMsg::Quit => state.should_quit = true,
    }
}

fn open_menu(state: &mut GalleryState, items: Vec<MenuItem>, left: u16, top: u16) {
    state.menu.set_items(items);
    state.menu.show_at(MenuPosition { top, left });
}
