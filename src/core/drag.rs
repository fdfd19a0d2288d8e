//! Drag-resize engine for split panes.
//!
//! A pane container lays its children out as a run of [`Slot`]s, with a
//! spacer after each resizable pane.  Pressing the pointer on a spacer opens
//! a [`DragSession`] for the pane right before it; every subsequent move
//! yields a [`SizeUpdate`] until the pointer is released.
//!
//! Sizes are terminal cells.  The upper bound is 80 % of the container's
//! extent on the drag axis; the lower bound is zero.

/// Axis along which panes are laid out.
///
/// `Vertical` panes stand side by side and are resized along their width;
/// `Horizontal` panes are stacked and resized along their height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn label(self) -> &'static str {
        match self {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "vertical" | "v" => Some(Orientation::Vertical),
            "horizontal" | "h" => Some(Orientation::Horizontal),
            _ => None,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Orientation::Vertical => Orientation::Horizontal,
            Orientation::Horizontal => Orientation::Vertical,
        }
    }

    /// Pick the coordinate that moves along this axis.
    pub fn axis(self, column: u16, row: u16) -> u16 {
        match self {
            Orientation::Vertical => column,
            Orientation::Horizontal => row,
        }
    }
}

// ───────────────────────────────────────── slots ─────────────

/// One child of a pane container, in sibling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A content pane and its pane index.
    Pane { index: usize, extent: u16 },
    Spacer,
}

// ───────────────────────────────────────── sizes ─────────────

/// Emitted on every pointer move of an open session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeUpdate {
    pub index: usize,
    pub size: u16,
}

/// Explicit pane extents by pane index.  `None` means "flex".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneSizes(Vec<Option<u16>>);

impl PaneSizes {
    pub fn new(sizes: Vec<Option<u16>>) -> Self {
        Self(sizes)
    }

    pub fn get(&self, index: usize) -> Option<u16> {
        self.0.get(index).copied().flatten()
    }

    pub fn as_slice(&self) -> &[Option<u16>] {
        &self.0
    }

    /// Build the successor value with `update` applied; `self` is untouched.
    #[must_use]
    pub fn with_update(&self, update: SizeUpdate) -> Self {
        let len = self.0.len().max(update.index + 1);
        let sizes = (0..len)
            .map(|i| {
                if i == update.index {
                    Some(update.size)
                } else {
                    self.0.get(i).copied().flatten()
                }
            })
            .collect();
        Self(sizes)
    }
}

impl From<Vec<u16>> for PaneSizes {
    fn from(v: Vec<u16>) -> Self {
        Self(v.into_iter().map(Some).collect())
    }
}

// ───────────────────────────────────────── session ───────────

/// State of one pointer-down → pointer-up drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub index: usize,
    pub orientation: Orientation,
    pub start_extent: u16,
    pub start_coord: u16,
    pub max_extent: u16,
}

impl DragSession {
    /// Open a session for the spacer at `spacer_slot`.
    ///
    /// Returns `None` when the spacer has no preceding pane sibling.
    pub fn begin(
        slots: &[Slot],
        spacer_slot: usize,
        orientation: Orientation,
        container_extent: u16,
        pointer_coord: u16,
    ) -> Option<Self> {
        let previous = spacer_slot.checked_sub(1).and_then(|i| slots.get(i))?;
        let Slot::Pane { index, extent } = *previous else {
            return None;
        };
        Some(Self {
            index,
            orientation,
            start_extent: extent,
            start_coord: pointer_coord,
            max_extent: max_extent(container_extent),
        })
    }

    /// Size the pane should take with the pointer at `(column, row)`.
    pub fn update(&self, column: u16, row: u16) -> SizeUpdate {
        let coord = i32::from(self.orientation.axis(column, row));
        let delta = coord - i32::from(self.start_coord);
        let candidate = i32::from(self.start_extent) + delta;
        let size = candidate.min(i32::from(self.max_extent)).max(0);
        SizeUpdate {
            index: self.index,
            // Bounded by `max_extent`, which is itself a u16.
            size: size as u16,
        }
    }
}

/// 80 % of the container extent, rounded down.
pub fn max_extent(container_extent: u16) -> u16 {
    (u32::from(container_extent) * 4 / 5) as u16
}
