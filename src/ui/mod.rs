//! Ratatui front-end split across screen state, forms, and the draw loop.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
