//! Icon references shared by the menu model and the widgets.

/// Reference to an icon by freedesktop-style name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub name: String,
}

impl IconSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
