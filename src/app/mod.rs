//! Gallery orchestration: state, terminal events, input handling and the
//! frame layout.

pub mod event;
pub mod handler;
pub mod state;
pub mod view;
