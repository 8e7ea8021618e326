//! Core library surface for the feihua poem collection.
//!
//! The query, matching, segmenting and rendering pieces are pure functions over
//! [`Poem`]; [`PoemStore`] keeps them in sync with SQLite. The `bin` target
//! wires these to the command line and the terminal UI.
pub mod config;
pub mod dataset;
pub mod db;
pub mod logging;
pub mod matcher;
pub mod models;
pub mod query;
pub mod render;
pub mod segment;
pub mod store;
pub mod ui;

pub use config::{Cli, Command, Config, LogTarget};
pub use db::open_database;
pub use logging::init_logging;
pub use models::Poem;
pub use query::Search;
pub use render::{detail_markdown, preview_markdown};
pub use store::{PoemStore, StoreError, StoreResult};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
