//! Menu tree model.
//!
//! Every item is exactly one [`MenuItemKind`]; renderers and click dispatch
//! match on the kind instead of probing optional fields.

use ratatui::text::Line;

use super::event::UiEvent;
use super::icon::IconSpec;

/// Position of an item in the tree: child indices from the root list.
pub type MenuPath = Vec<usize>;

/// Snapshot of the clicked item handed to click callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInfo {
    pub path: MenuPath,
    pub label: String,
    /// `Some` for checkbox items: the state *before* the click.
    pub checked: Option<bool>,
}

/// Click callback attached to an item or to a whole menu.
pub type ItemHandler = Box<dyn FnMut(&ItemInfo, &UiEvent)>;

/// Producer of a custom row that bypasses standard label rendering.
pub type ElementFn = Box<dyn Fn() -> Line<'static>>;

pub enum MenuItemKind {
    /// Plain clickable entry.
    Action,
    Checkbox { checked: bool },
    /// Opens a nested list; never fires click itself.
    Submenu { items: Vec<MenuItem> },
    Separator,
    Custom { element: ElementFn },
}

pub struct MenuItem {
    pub label: String,
    pub icon: Option<IconSpec>,
    pub disabled: bool,
    pub kind: MenuItemKind,
    pub on_click: Option<ItemHandler>,
}

impl MenuItem {
    fn with_kind(label: impl Into<String>, kind: MenuItemKind) -> Self {
        Self {
            label: label.into(),
            icon: None,
            disabled: false,
            kind,
            on_click: None,
        }
    }

    pub fn action(label: impl Into<String>) -> Self {
        Self::with_kind(label, MenuItemKind::Action)
    }

    pub fn checkbox(label: impl Into<String>, checked: bool) -> Self {
        Self::with_kind(label, MenuItemKind::Checkbox { checked })
    }

    pub fn submenu(label: impl Into<String>, items: Vec<MenuItem>) -> Self {
        Self::with_kind(label, MenuItemKind::Submenu { items })
    }

    pub fn separator() -> Self {
        Self::with_kind(String::new(), MenuItemKind::Separator)
    }

    pub fn custom(element: impl Fn() -> Line<'static> + 'static) -> Self {
        Self::with_kind(
            String::new(),
            MenuItemKind::Custom {
                element: Box::new(element),
            },
        )
    }

    pub fn icon(mut self, icon: IconSpec) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn on_click(mut self, f: impl FnMut(&ItemInfo, &UiEvent) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    pub fn children(&self) -> Option<&[MenuItem]> {
        match &self.kind {
            MenuItemKind::Submenu { items } => Some(items),
            _ => None,
        }
    }

    /// Separators and submenu parents never fire click callbacks;
    /// neither do disabled items.
    pub fn is_clickable(&self) -> bool {
        !self.disabled
            && !matches!(
                self.kind,
                MenuItemKind::Separator | MenuItemKind::Submenu { .. }
            )
    }

    pub fn checked(&self) -> Option<bool> {
        match self.kind {
            MenuItemKind::Checkbox { checked } => Some(checked),
            _ => None,
        }
    }
}

/// Resolve `path` against a root list.
pub fn item_at<'a>(items: &'a [MenuItem], path: &[usize]) -> Option<&'a MenuItem> {
    let (first, rest) = path.split_first()?;
    let item = items.get(*first)?;
    if rest.is_empty() {
        Some(item)
    } else {
        item_at(item.children()?, rest)
    }
}

/// Mutable variant of [`item_at`].
pub fn item_at_mut<'a>(items: &'a mut [MenuItem], path: &[usize]) -> Option<&'a mut MenuItem> {
    let (first, rest) = path.split_first()?;
    let item = items.get_mut(*first)?;
    if rest.is_empty() {
        return Some(item);
    }
    match &mut item.kind {
        MenuItemKind::Submenu { items } => item_at_mut(items, rest),
        _ => None,
    }
}
