//! Persistence module split across logical submodules.

mod connection;
mod poems;

pub use connection::{
    data_dir, default_db_path, open_database, open_in_memory, with_transaction, DATA_DIR_NAME,
};
pub use poems::{
    clear_poems, count_poems, delete_poem, fetch_poems, fetch_segments, insert_poem, update_poem,
};
