//! Core logic – input events, gesture recognition, drag-resize and the menu
//! model.
//!
//! Nothing in this module draws.  Geometry is borrowed from Ratatui
//! (`Rect`, `Line`) so the widgets can hand results straight to a buffer.

pub mod drag;
pub mod event;
pub mod icon;
pub mod listeners;
pub mod menu;
pub mod tap;
