use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::BaseDirs;
use rusqlite::{Connection, Transaction};
use tracing::{debug, warn};

/// Folder name used beneath the user's home directory for application data.
pub const DATA_DIR_NAME: &str = ".feihua";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "poems.sqlite";

/// Open (creating if needed) the SQLite file at `path` and bring its schema up
/// to date. Safe to call repeatedly on the same file.
pub fn open_database(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(path).context("failed to open SQLite database")?;
    ensure_schema(&conn)?;
    debug!(path = %path.display(), "opened poem database");
    Ok(conn)
}

/// Throwaway database with the full schema, used by tests.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Create both tables if missing and apply additive column migrations. The
/// function also toggles `PRAGMA foreign_keys = ON` so segment rows cascade
/// with their poem.
fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign keys")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS poems (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            dynasty TEXT NOT NULL,
            author TEXT NOT NULL,
            content TEXT NOT NULL,
            favorite INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .context("failed to create poems table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS segments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            poem_id INTEGER NOT NULL,
            ordinal INTEGER NOT NULL,
            text TEXT NOT NULL,
            FOREIGN KEY(poem_id) REFERENCES poems(id) ON DELETE CASCADE ON UPDATE CASCADE
        )",
        [],
    )
    .context("failed to create segments table")?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS segments_poem_id ON segments (poem_id, ordinal)",
        [],
    )
    .context("failed to create segments index")?;

    if !has_column(conn, "poems", "favorite")? {
        conn.execute(
            "ALTER TABLE poems ADD COLUMN favorite INTEGER NOT NULL DEFAULT 0",
            [],
        )
        .context("failed to add favorite column")?;
    }

    Ok(())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .context("failed to prepare table info query")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .context("failed to read table info")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect column names")?;
    Ok(names.iter().any(|name| name == column))
}

/// Run `op` inside a transaction. Success commits; an error rolls back
/// explicitly before being returned. A panic inside `op` drops the
/// transaction, which also rolls back.
pub fn with_transaction<T>(
    conn: &mut Connection,
    op: impl FnOnce(&Transaction<'_>) -> Result<T>,
) -> Result<T> {
    let tx = conn.transaction().context("failed to begin transaction")?;
    match op(&tx) {
        Ok(value) => {
            tx.commit().context("failed to commit transaction")?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback() {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}

/// Resolve the default SQLite path inside the user's home.
pub fn default_db_path() -> Result<PathBuf> {
    Ok(data_dir()?.join(DB_FILE_NAME))
}

/// Application data directory inside the user's home.
pub fn data_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_creation_is_idempotent() {
        let conn = open_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        assert!(has_column(&conn, "poems", "favorite").unwrap());
    }

    #[test]
    fn favorite_column_is_added_to_old_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute(
            "CREATE TABLE poems (
                id INTEGER PRIMARY KEY,
                title TEXT NOT NULL,
                dynasty TEXT NOT NULL,
                author TEXT NOT NULL,
                content TEXT NOT NULL
            )",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO poems (id, title, dynasty, author, content) VALUES (1, 't', 'd', 'a', 'c')",
            [],
        )
        .unwrap();

        ensure_schema(&conn).unwrap();

        let favorite: bool = conn
            .query_row("SELECT favorite FROM poems WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert!(!favorite);
    }

    #[test]
    fn failed_transaction_rolls_back() {
        let mut conn = open_in_memory().unwrap();
        let result: Result<()> = with_transaction(&mut conn, |tx| {
            tx.execute(
                "INSERT INTO poems (id, title, dynasty, author, content) VALUES (1, 't', 'd', 'a', 'c')",
                [],
            )?;
            Err(anyhow!("boom"))
        });
        assert!(result.is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM poems", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
