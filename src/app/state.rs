//! Central gallery state.
//!
//! All mutable state lives here so that rendering is a function over
//! `&mut GalleryState` and event handling a function over the same value.
//! Widget callbacks are `'static` closures and cannot borrow the state, so
//! they post [`GalleryMsg`]s on a channel that the handler drains after
//! every input event.

use std::time::Duration;

use ratatui::text::{Line, Span};
use tokio::sync::mpsc;

use desk_widgets::config::GalleryConfig;
use desk_widgets::core::drag::{Orientation, SizeUpdate};
use desk_widgets::core::listeners::Document;
use desk_widgets::core::menu::MenuItem;
use desk_widgets::core::tap::DoubleTap;
use desk_widgets::ui::{
    element::BoxProps,
    expander::Expander,
    icon::IconSpec,
    icon_view::{IconEntry, IconView},
    list_view::{ListCell, ListColumn, ListRow, ListView},
    menu::Menu,
    menubar::{Menubar, MenubarItem},
    panes::Panes,
    tabs::Tabs,
    theme::Theme,
};

use super::event::PointerTranslator;

/// Which dropdown a menubar item opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarMenu {
    #[default]
    File,
    View,
    Help,
}

/// Everything a widget callback can ask the gallery to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryMsg {
    Status(String),
    IconSelected(usize),
    RowSelected(usize),
    Activated(String),
    EntryMenu { column: u16, row: u16, name: String },
    TabMenu { column: u16, row: u16, label: String },
    OpenBarMenu { menu: BarMenu, index: usize },
    MenuClosed,
    SetZebra(bool),
    SetOrientation(Orientation),
    Resized(SizeUpdate),
    SaveConfig,
    Quit,
}

pub type MsgSender = mpsc::UnboundedSender<GalleryMsg>;

/// Post `msg`.  The receiver only goes away at shutdown, so a failed send
/// is dropped.
fn send(tx: &MsgSender, msg: GalleryMsg) {
    let _ = tx.send(msg);
}

/// Top-level gallery state.
pub struct GalleryState {
    pub config: GalleryConfig,
    /// Global pointer listener registry shared with the panes.
    pub document: Document,
    pub pointer: PointerTranslator,
    pub menubar: Menubar<BarMenu>,
    /// The one overlay menu, reused for dropdowns and context menus.
    pub menu: Menu,
    pub panes: Panes,
    pub expander: Expander,
    pub icons: IconView<String>,
    pub tabs: Tabs,
    pub list: ListView<String>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    pub tx: MsgSender,
    pub rx: mpsc::UnboundedReceiver<GalleryMsg>,
}

impl GalleryState {
    pub fn new(config: GalleryConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let document = Document::new();
        let window = Duration::from_millis(config.double_tap_ms);

        let t = tx.clone();
        let menubar = Menubar::new(vec![
            MenubarItem::new("File").data(BarMenu::File),
            MenubarItem::new("View").data(BarMenu::View),
            MenubarItem::new("Help").data(BarMenu::Help),
        ])
        .on_click(move |_, menu, index| {
            send(&t, GalleryMsg::OpenBarMenu { menu: *menu, index });
        });

        let t = tx.clone();
        let menu = Menu::new(Vec::new())
            .visible(false)
            .on_click(move |_, _| send(&t, GalleryMsg::MenuClosed));

        let t = tx.clone();
        let panes = Panes::new(&document, 2)
            .orientation(config.orientation)
            .sizes(config.pane_sizes.clone())
            .on_resize(move |update| send(&t, GalleryMsg::Resized(update)));

        let t = tx.clone();
        let expander = Expander::new("Places")
            .active(true)
            .box_props(BoxProps::bordered().title("Browse"))
            .on_toggle(move |_, open| {
                let what = if open { "shown" } else { "hidden" };
                send(&t, GalleryMsg::Status(format!("places {what}")));
            });

        let (t1, t2, t3) = (tx.clone(), tx.clone(), tx.clone());
        let icons = IconView::new(sample_places())
            .double_tap(DoubleTap::new(window))
            .on_select(move |e| send(&t1, GalleryMsg::IconSelected(e.index)))
            .on_activate(move |e| send(&t2, GalleryMsg::Activated(e.data)))
            .on_context_menu(move |e| {
                send(
                    &t3,
                    GalleryMsg::EntryMenu {
                        column: e.event.column,
                        row: e.event.row,
                        name: e.data,
                    },
                );
            });

        let (t1, t2) = (tx.clone(), tx.clone());
        let tabs = Tabs::new(["Files", "About"])
            .on_change(move |_, _, label| send(&t1, GalleryMsg::Status(format!("tab: {label}"))))
            .on_context_menu(move |ev, _, label| {
                send(
                    &t2,
                    GalleryMsg::TabMenu {
                        column: ev.column,
                        row: ev.row,
                        label: label.to_string(),
                    },
                );
            });

        let (t1, t2, t3) = (tx.clone(), tx.clone(), tx.clone());
        let list = ListView::new(
            vec![
                ListColumn::new("Name"),
                ListColumn::new("Size").width(10),
                ListColumn::new("Type").width(12),
            ],
            sample_files(),
        )
        .zebra(config.zebra)
        .double_tap(DoubleTap::new(window))
        .on_select(move |e| send(&t1, GalleryMsg::RowSelected(e.index)))
        .on_activate(move |e| send(&t2, GalleryMsg::Activated(e.data)))
        .on_context_menu(move |e| {
            send(
                &t3,
                GalleryMsg::EntryMenu {
                    column: e.event.column,
                    row: e.event.row,
                    name: e.data,
                },
            );
        });

        Self {
            pointer: PointerTranslator::new(window),
            config,
            document,
            menubar,
            menu,
            panes,
            expander,
            icons,
            tabs,
            list,
            status_message: None,
            should_quit: false,
            tx,
            rx,
        }
    }

    // ── menus ───────────────────────────────────────────────────

    /// Items of the dropdown behind a menubar entry.
    pub fn bar_menu_items(&self, menu: BarMenu) -> Vec<MenuItem> {
        let (t1, t2, t3) = (self.tx.clone(), self.tx.clone(), self.tx.clone());
        match menu {
            BarMenu::File => vec![
                MenuItem::action("Open")
                    .icon(IconSpec::new("document-open"))
                    .on_click(move |_, _| send(&t1, GalleryMsg::Status("nothing to open".into()))),
                MenuItem::action("Save settings")
                    .icon(IconSpec::new("document-save"))
                    .on_click(move |_, _| send(&t2, GalleryMsg::SaveConfig)),
                MenuItem::separator(),
                MenuItem::action("Quit")
                    .icon(IconSpec::new("application-exit"))
                    .on_click(move |_, _| send(&t3, GalleryMsg::Quit)),
            ],
            BarMenu::View => {
                let ms = self.config.double_tap_ms;
                vec![
                    MenuItem::checkbox("Zebra rows", self.config.zebra).on_click(move |info, _| {
                        // `checked` is the state before this click.
                        send(&t1, GalleryMsg::SetZebra(!info.checked.unwrap_or(false)));
                    }),
                    MenuItem::submenu(
                        "Split",
                        vec![
                            MenuItem::action("Side by side").on_click(move |_, _| {
                                send(&t2, GalleryMsg::SetOrientation(Orientation::Vertical));
                            }),
                            MenuItem::action("Stacked").on_click(move |_, _| {
                                send(&t3, GalleryMsg::SetOrientation(Orientation::Horizontal));
                            }),
                        ],
                    ),
                    MenuItem::separator(),
                    MenuItem::custom(move || {
                        Line::from(Span::styled(
                            format!(" double-tap {ms} ms"),
                            Theme::disabled_style(),
                        ))
                    }),
                ]
            }
            BarMenu::Help => vec![
                MenuItem::action("About")
                    .icon(IconSpec::new("help-about"))
                    .on_click(move |_, _| {
                        let about = format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                        send(&t1, GalleryMsg::Status(about));
                    }),
                MenuItem::action("Check for updates").disabled(true),
            ],
        }
    }

    /// Right-click menu for an icon or list entry.
    pub fn entry_menu_items(&self, name: &str) -> Vec<MenuItem> {
        let (t1, t2) = (self.tx.clone(), self.tx.clone());
        let (open, copy) = (name.to_string(), name.to_string());
        vec![
            MenuItem::action("Open")
                .icon(IconSpec::new("document-open"))
                .on_click(move |_, _| send(&t1, GalleryMsg::Activated(open.clone()))),
            MenuItem::action("Copy name")
                .icon(IconSpec::new("edit-copy"))
                .on_click(move |_, _| send(&t2, GalleryMsg::Status(format!("copied {copy}")))),
            MenuItem::separator(),
            MenuItem::action("Delete").disabled(true),
        ]
    }

    /// Right-click menu for a tab header.
    pub fn tab_menu_items(&self, label: &str) -> Vec<MenuItem> {
        let t = self.tx.clone();
        let label = label.to_string();
        vec![
            MenuItem::action(format!("Close {label}")).disabled(true),
            MenuItem::action("Reload")
                .on_click(move |_, _| send(&t, GalleryMsg::Status(format!("reloaded {label}")))),
        ]
    }
}

// ───────────────────────────────────────── sample data ───────

fn sample_places() -> Vec<IconEntry<String>> {
    let folder = IconSpec::new("folder");
    let mut entries: Vec<IconEntry<String>> = ["Home", "Desktop", "Documents", "Music", "Pictures"]
        .into_iter()
        .map(|name| IconEntry::new(name, name.to_string()).icon(folder.clone()))
        .collect();
    entries.push(IconEntry::new("Terminal", "Terminal".to_string()));
    entries
}

fn sample_files() -> Vec<ListRow<String>> {
    [
        ("notes.txt", "2 KiB", "text-x-generic", "text"),
        ("holiday.png", "1.4 MiB", "image-x-generic", "image"),
        ("theme.ogg", "880 KiB", "audio-x-generic", "audio"),
        ("trailer.webm", "24 MiB", "video-x-generic", "video"),
        ("build.sh", "640 B", "application-x-executable", "script"),
        ("archive", "", "folder", "folder"),
    ]
    .into_iter()
    .map(|(name, size, icon, kind)| {
        ListRow::new(
            vec![
                ListCell::new(name).icon(IconSpec::new(icon)),
                ListCell::from(size),
                ListCell::from(kind),
            ],
            name.to_string(),
        )
    })
    .collect()
}
