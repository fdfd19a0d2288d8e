//! Icon resolution: turn an icon name into a terminal glyph.

use ratatui::{style::Style, text::Span};

use super::theme::Theme;
pub use crate::core::icon::IconSpec;

/// Icon used for entries that don't name one.
pub const DEFAULT_ENTRY_ICON: &str = "application-x-executable";

/// Maps an [`IconSpec`] to something drawable.
pub trait IconResolver {
    fn resolve(&self, icon: &IconSpec) -> Span<'static>;
}

/// Built-in single-cell glyph table.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphIcons;

impl GlyphIcons {
    fn glyph(name: &str) -> &'static str {
        match name {
            "folder" | "inode-directory" => "▣",
            "text-x-generic" | "text-plain" => "≡",
            "image-x-generic" => "▨",
            "audio-x-generic" => "♪",
            "video-x-generic" => "▶",
            "application-x-executable" => "◆",
            "document-open" => "↗",
            "document-save" => "↓",
            "edit-copy" => "⧉",
            "application-exit" => "×",
            "help-about" => "?",
            _ => "•",
        }
    }
}

impl IconResolver for GlyphIcons {
    fn resolve(&self, icon: &IconSpec) -> Span<'static> {
        let style: Style = if icon.name.starts_with("folder") || icon.name == "inode-directory" {
            Theme::dir_style()
        } else {
            Theme::icon_style()
        };
        Span::styled(Self::glyph(&icon.name), style)
    }
}
