//! Desktop-style widgets for Ratatui: expander, icon grid, multi-column
//! list, nested menus, menubar, resizable panes and tabs.
//!
//! [`core`] holds the host-agnostic pieces (input events, double-tap
//! detection, the drag-resize engine, document pointer listeners and the
//! menu model); [`ui`] holds the widgets themselves.

pub mod config;
pub mod core;
pub mod ui;
