use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::models::Poem;

/// Retrieve every poem ordered by number. Segments are recomputed from the
/// content by [`Poem::new`] instead of being read back.
pub fn fetch_poems(conn: &Connection) -> Result<Vec<Poem>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, title, dynasty, author, content, favorite
             FROM poems
             ORDER BY id",
        )
        .context("failed to prepare poem query")?;

    let poems = stmt
        .query_map([], |row| {
            let favorite: bool = row.get(5)?;
            Ok(Poem::new(
                row.get(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            )
            .with_favorite(favorite))
        })
        .context("failed to load poems")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect poems")?;

    Ok(poems)
}

/// Insert a poem row together with its segment rows.
pub fn insert_poem(conn: &Connection, poem: &Poem) -> Result<()> {
    conn.execute(
        "INSERT INTO poems (id, title, dynasty, author, content, favorite)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            poem.id(),
            poem.title(),
            poem.dynasty(),
            poem.author(),
            poem.content(),
            poem.favorite()
        ],
    )
    .context("failed to insert poem")?;

    insert_segments(conn, poem)
}

/// Overwrite the row stored under `old_id` with `poem` (which may carry a new
/// number) and rebuild its segments. Returns `false` when no such row exists.
pub fn update_poem(conn: &Connection, old_id: i64, poem: &Poem) -> Result<bool> {
    let updated = conn
        .execute(
            "UPDATE poems
             SET id = ?1, title = ?2, dynasty = ?3, author = ?4, content = ?5, favorite = ?6
             WHERE id = ?7",
            params![
                poem.id(),
                poem.title(),
                poem.dynasty(),
                poem.author(),
                poem.content(),
                poem.favorite(),
                old_id
            ],
        )
        .context("failed to update poem")?;

    if updated == 0 {
        return Ok(false);
    }

    // Stale clauses followed the row through ON UPDATE CASCADE.
    conn.execute("DELETE FROM segments WHERE poem_id = ?1", params![poem.id()])
        .context("failed to clear poem segments")?;
    insert_segments(conn, poem)?;
    Ok(true)
}

/// Remove a poem row; segments cascade. Returns `false` if nothing was stored
/// under `id`.
pub fn delete_poem(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM poems WHERE id = ?1", params![id])
        .context("failed to delete poem")?;
    Ok(deleted > 0)
}

/// Drop every poem (and through the cascade every segment).
pub fn clear_poems(conn: &Connection) -> Result<usize> {
    conn.execute("DELETE FROM poems", [])
        .context("failed to clear poems")
}

pub fn count_poems(conn: &Connection) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM poems", [], |row| row.get(0))
        .context("failed to count poems")
}

/// Stored clauses for one poem in their original order.
pub fn fetch_segments(conn: &Connection, poem_id: i64) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT text FROM segments WHERE poem_id = ?1 ORDER BY ordinal")
        .context("failed to prepare segment query")?;

    let segments = stmt
        .query_map([poem_id], |row| row.get(0))
        .context("failed to load segments")?
        .collect::<Result<Vec<String>, _>>()
        .context("failed to collect segments")?;

    Ok(segments)
}

fn insert_segments(conn: &Connection, poem: &Poem) -> Result<()> {
    let mut stmt = conn
        .prepare_cached("INSERT INTO segments (poem_id, ordinal, text) VALUES (?1, ?2, ?3)")
        .context("failed to prepare segment insert")?;

    for (ordinal, text) in poem.segments().iter().enumerate() {
        stmt.execute(params![poem.id(), ordinal as i64, text])
            .context("failed to insert segment")?;
    }

    Ok(())
}
