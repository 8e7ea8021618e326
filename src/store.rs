//! The authoritative poem collection. `PoemStore` owns both the SQLite
//! connection and the in-memory list, and every mutation follows the same
//! order: write durably inside a transaction first, then update the list. A
//! failed write therefore leaves the list exactly as it was.
//!
//! Mutating methods take `&mut self`, so a store shared between threads has to
//! sit behind a single `Mutex`; that also covers the `next_no`-then-`add`
//! sequence.

use std::io::{Read, Write};

use anyhow::Context;
use rusqlite::{Connection, ErrorCode};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::dataset::{default_poems, encode_dataset, parse_dataset};
use crate::db::{clear_poems, delete_poem, fetch_poems, insert_poem, update_poem, with_transaction};
use crate::models::Poem;
use crate::query::Search;

/// Failures surfaced by the store. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("poem {0} not found")]
    NotFound(i64),
    #[error("poem number {0} already exists")]
    DuplicateId(i64),
    #[error("no free poem number left")]
    NoFreeId,
    #[error("invalid poem dataset: {0}")]
    InvalidDataset(#[source] serde_json::Error),
    #[error("storage failure: {0}")]
    Storage(#[source] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub struct PoemStore {
    conn: Connection,
    poems: Vec<Poem>,
}

impl PoemStore {
    /// Load whatever the database holds.
    pub fn open(conn: Connection) -> StoreResult<Self> {
        let poems = fetch_poems(&conn).map_err(StoreError::Storage)?;
        debug!(count = poems.len(), "loaded poems");
        Ok(Self { conn, poems })
    }

    /// Load the database, seeding it from the bundled dataset when it holds no
    /// poems yet.
    pub fn open_or_seed(conn: Connection) -> StoreResult<Self> {
        let mut store = Self::open(conn)?;
        if store.poems.is_empty() {
            let defaults = default_poems().map_err(StoreError::InvalidDataset)?;
            let count = store.replace_all(defaults)?;
            info!(count, "seeded empty database with bundled poems");
        }
        Ok(store)
    }

    /// Poems in collection order.
    pub fn poems(&self) -> &[Poem] {
        &self.poems
    }

    pub fn len(&self) -> usize {
        self.poems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poems.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Poem> {
        self.poems.iter().find(|poem| poem.id() == id)
    }

    /// One more than the highest number in use, or 1 when empty. `None` once
    /// `i64::MAX` is taken. Advisory only; [`PoemStore::add`] does the real
    /// assignment.
    pub fn next_no(&self) -> Option<i64> {
        self.poems.iter().map(Poem::id).max().unwrap_or(0).checked_add(1)
    }

    /// Poems matching `search`, in collection order.
    pub fn filter(&self, search: &Search) -> Vec<&Poem> {
        self.poems.iter().filter(|poem| search.matches(poem)).collect()
    }

    /// Persist a new poem and append it. A poem without a positive number is
    /// given [`PoemStore::next_no`]; the number is only consumed on success.
    pub fn add(&mut self, poem: Poem) -> StoreResult<&Poem> {
        let poem = if poem.id() <= 0 {
            poem.with_id(self.next_no().ok_or(StoreError::NoFreeId)?)
        } else {
            poem
        };
        let id = poem.id();

        with_transaction(&mut self.conn, |tx| insert_poem(tx, &poem))
            .map_err(|err| classify(err, id))
            .inspect_err(|err| warn!(id, error = %err, "failed to add poem"))?;

        info!(id, title = poem.title(), "added poem");
        self.poems.push(poem);
        Ok(&self.poems[self.poems.len() - 1])
    }

    /// Replace the poem stored under `old`'s number with `new`, segments
    /// included. `new` may carry a different number; without one it keeps the
    /// old number.
    pub fn modify(&mut self, old: &Poem, new: Poem) -> StoreResult<&Poem> {
        let old_id = old.id();
        let new = if new.id() <= 0 { new.with_id(old_id) } else { new };
        let new_id = new.id();

        let found = with_transaction(&mut self.conn, |tx| update_poem(tx, old_id, &new))
            .map_err(|err| classify(err, new_id))
            .inspect_err(|err| warn!(old_id, new_id, error = %err, "failed to modify poem"))?;
        if !found {
            return Err(StoreError::NotFound(old_id));
        }

        info!(old_id, new_id, "modified poem");
        let index = match self.poems.iter().position(|poem| poem.id() == old_id) {
            Some(index) => {
                self.poems[index] = new;
                index
            }
            None => {
                warn!(old_id, "modified poem was missing from memory");
                self.poems.push(new);
                self.poems.len() - 1
            }
        };
        Ok(&self.poems[index])
    }

    /// Flip the favorite flag of poem `id`, persisting it through
    /// [`PoemStore::modify`].
    pub fn toggle_favorite(&mut self, id: i64) -> StoreResult<&Poem> {
        let current = self.get(id).cloned().ok_or(StoreError::NotFound(id))?;
        let toggled = current.clone().with_favorite(!current.favorite());
        self.modify(&current, toggled)
    }

    /// Delete a poem and its segments. Removing something already gone is a
    /// no-op rather than an error.
    pub fn remove(&mut self, poem: &Poem) -> StoreResult<()> {
        let id = poem.id();
        let deleted = with_transaction(&mut self.conn, |tx| delete_poem(tx, id))
            .map_err(StoreError::Storage)
            .inspect_err(|err| warn!(id, error = %err, "failed to remove poem"))?;
        if !deleted {
            debug!(id, "poem was not stored; nothing to delete");
        }

        let index = self
            .poems
            .iter()
            .position(|candidate| candidate == poem)
            .or_else(|| self.poems.iter().position(|candidate| candidate.id() == id));
        if let Some(index) = index {
            self.poems.remove(index);
            info!(id, "removed poem");
        }
        Ok(())
    }

    /// Replace the whole collection with the dataset read from `source`.
    /// Clearing and inserting share one transaction, so a failure anywhere
    /// leaves both the database and the list untouched.
    pub fn import<R: Read>(&mut self, mut source: R) -> StoreResult<usize> {
        let mut bytes = Vec::new();
        source
            .read_to_end(&mut bytes)
            .context("failed to read dataset")
            .map_err(StoreError::Storage)?;
        let poems = parse_dataset(&bytes)
            .map_err(StoreError::InvalidDataset)
            .inspect_err(|err| warn!(error = %err, "rejected dataset"))?;

        let count = self.replace_all(poems)?;
        info!(count, "imported poems");
        Ok(count)
    }

    /// Write the collection (without segments) to `sink` as a dataset.
    pub fn export<W: Write>(&self, mut sink: W) -> StoreResult<usize> {
        let bytes = encode_dataset(&self.poems)
            .context("failed to encode dataset")
            .map_err(StoreError::Storage)?;
        sink.write_all(&bytes)
            .and_then(|()| sink.flush())
            .context("failed to write dataset")
            .map_err(StoreError::Storage)
            .inspect_err(|err| warn!(error = %err, "export failed"))?;

        info!(count = self.poems.len(), bytes = bytes.len(), "exported poems");
        Ok(self.poems.len())
    }

    fn replace_all(&mut self, poems: Vec<Poem>) -> StoreResult<usize> {
        let mut failed_id = 0;
        let result = with_transaction(&mut self.conn, |tx| {
            clear_poems(tx)?;
            for poem in &poems {
                insert_poem(tx, poem).inspect_err(|_| failed_id = poem.id())?;
            }
            Ok(())
        });
        result
            .map_err(|err| classify(err, failed_id))
            .inspect_err(|err| warn!(error = %err, "bulk insert rolled back"))?;

        self.poems = poems;
        Ok(self.poems.len())
    }
}

/// Coerce SQLite constraint errors into [`StoreError::DuplicateId`]. The only
/// constraint our writes can trip is the poem number primary key.
fn classify(err: anyhow::Error, id: i64) -> StoreError {
    let constraint = err
        .downcast_ref::<rusqlite::Error>()
        .and_then(rusqlite::Error::sqlite_error_code)
        == Some(ErrorCode::ConstraintViolation);
    if constraint {
        StoreError::DuplicateId(id)
    } else {
        StoreError::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{count_poems, fetch_segments, open_in_memory};

    fn poem(id: i64, title: &str, content: &str) -> Poem {
        Poem::new(id, title, "唐", "佚名", content)
    }

    fn store_with(poems: &[Poem]) -> PoemStore {
        let mut store = PoemStore::open(open_in_memory().unwrap()).unwrap();
        for poem in poems {
            store.add(poem.clone()).unwrap();
        }
        store
    }

    fn ids(store: &PoemStore) -> Vec<i64> {
        store.poems().iter().map(Poem::id).collect()
    }

    #[test]
    fn add_assigns_next_number() {
        let mut store = store_with(&[poem(3, "a", "一。"), poem(7, "b", "二。")]);
        let added = store.add(poem(0, "c", "三，四。")).unwrap().clone();
        assert_eq!(added.id(), 8);

        let found = store.filter(&Search::parse("8", false));
        assert_eq!(found, vec![&added]);
        assert_eq!(
            fetch_segments(&store.conn, 8).unwrap(),
            vec!["三，", "四。"]
        );
    }

    #[test]
    fn next_no_starts_at_one() {
        let store = store_with(&[]);
        assert_eq!(store.next_no(), Some(1));
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_add_leaves_list_unchanged() {
        let mut store = store_with(&[poem(1, "a", "一。")]);
        let err = store.add(poem(1, "b", "二。")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(1)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.poems()[0].title(), "a");
    }

    #[test]
    fn failed_write_does_not_consume_number() {
        let mut store = store_with(&[poem(2, "a", "一。")]);
        store.conn.execute("DROP TABLE segments", []).unwrap();

        let err = store.add(poem(0, "b", "二。")).unwrap_err();
        assert!(matches!(err, StoreError::Storage(_)));
        assert_eq!(ids(&store), vec![2]);
        assert_eq!(store.next_no(), Some(3));
        assert_eq!(count_poems(&store.conn).unwrap(), 1);
    }

    #[test]
    fn modify_replaces_record_and_segments() {
        let mut store = store_with(&[poem(1, "a", "一。"), poem(2, "b", "二。")]);
        let old = store.get(1).cloned().unwrap();
        store.modify(&old, poem(5, "c", "三，四。")).unwrap();

        assert_eq!(ids(&store), vec![5, 2]);
        assert_eq!(store.get(5).unwrap().segments(), ["三，", "四。"]);
        assert!(fetch_segments(&store.conn, 1).unwrap().is_empty());
        assert_eq!(fetch_segments(&store.conn, 5).unwrap(), vec!["三，", "四。"]);
    }

    #[test]
    fn modify_missing_poem_is_not_found() {
        let mut store = store_with(&[poem(1, "a", "一。")]);
        let err = store.modify(&poem(9, "x", ""), poem(9, "y", "")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(9)));
        assert_eq!(store.poems()[0].title(), "a");
    }

    #[test]
    fn modify_onto_taken_number_is_rejected() {
        let mut store = store_with(&[poem(1, "a", "一。"), poem(2, "b", "二。")]);
        let old = store.get(1).cloned().unwrap();
        let err = store.modify(&old, poem(2, "c", "三。")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(2)));
        assert_eq!(store.get(1).unwrap().title(), "a");
        assert_eq!(store.get(2).unwrap().title(), "b");
    }

    #[test]
    fn toggle_favorite_persists() {
        let mut store = store_with(&[poem(1, "a", "一。")]);
        assert!(store.toggle_favorite(1).unwrap().favorite());

        let reloaded = fetch_poems(&store.conn).unwrap();
        assert!(reloaded[0].favorite());
        assert_eq!(store.filter(&Search::parse("", true)).len(), 1);
    }

    #[test]
    fn remove_deletes_row_and_segments() {
        let mut store = store_with(&[poem(1, "a", "一，二。"), poem(2, "b", "三。")]);
        let target = store.get(1).cloned().unwrap();
        store.remove(&target).unwrap();

        assert_eq!(ids(&store), vec![2]);
        assert_eq!(count_poems(&store.conn).unwrap(), 1);
        assert!(fetch_segments(&store.conn, 1).unwrap().is_empty());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = store_with(&[poem(1, "a", "一。")]);
        let target = store.get(1).cloned().unwrap();
        store.remove(&target).unwrap();
        store.remove(&target).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn remove_of_poem_only_in_database_does_not_raise() {
        let mut store = store_with(&[]);
        let stray = poem(4, "a", "一。");
        insert_poem(&store.conn, &stray).unwrap();

        store.remove(&stray).unwrap();
        assert!(store.is_empty());
        assert_eq!(count_poems(&store.conn).unwrap(), 0);
    }

    #[test]
    fn remove_falls_back_to_number() {
        let mut store = store_with(&[poem(1, "a", "一。")]);
        store.remove(&poem(1, "stale title", "")).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn filter_keeps_collection_order() {
        let store = store_with(&[
            poem(3, "a", "明月几时有。"),
            poem(1, "b", "春风又绿江南岸。"),
            poem(2, "c", "举头望明月。"),
        ]);
        let titles: Vec<&str> = store
            .filter(&Search::parse("明月", false))
            .into_iter()
            .map(Poem::title)
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(store.filter(&Search::default()).len(), 3);
    }

    #[test]
    fn import_replaces_collection() {
        let mut store = store_with(&[poem(1, "old", "旧。")]);
        let json = r#"[
            {"id": 10, "title": "x", "dynasty": "宋", "author": "a", "content": "一，二。"},
            {"id": 11, "title": "y", "dynasty": "宋", "author": "b", "content": "三。", "favorite": true}
        ]"#;
        assert_eq!(store.import(json.as_bytes()).unwrap(), 2);

        assert_eq!(ids(&store), vec![10, 11]);
        assert_eq!(count_poems(&store.conn).unwrap(), 2);
        assert_eq!(fetch_segments(&store.conn, 10).unwrap(), vec!["一，", "二。"]);
        assert!(store.get(11).unwrap().favorite());
    }

    #[test]
    fn malformed_import_changes_nothing() {
        let mut store = store_with(&[poem(1, "a", "一。"), poem(2, "b", "二。")]);
        let json = r#"[
            {"id": 10, "title": "x", "dynasty": "宋", "author": "a", "content": "一。"},
            {"id": 11, "title": null},
            {"id": 12, "title": "z", "dynasty": "宋", "author": "c", "content": "三。"}
        ]"#;
        let err = store.import(json.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDataset(_)));
        assert_eq!(count_poems(&store.conn).unwrap(), 2);
        assert_eq!(ids(&store), vec![1, 2]);
    }

    #[test]
    fn failed_insert_rolls_back_whole_import() {
        let mut store = store_with(&[poem(1, "a", "一。"), poem(2, "b", "二。")]);
        let json = r#"[
            {"id": 10, "title": "x", "dynasty": "宋", "author": "a", "content": "一。"},
            {"id": 11, "title": "y", "dynasty": "宋", "author": "b", "content": "二。"},
            {"id": 11, "title": "z", "dynasty": "宋", "author": "c", "content": "三。"}
        ]"#;
        let err = store.import(json.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(11)));
        assert_eq!(count_poems(&store.conn).unwrap(), 2);
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(fetch_segments(&store.conn, 1).unwrap(), vec!["一。"]);
    }

    #[test]
    fn export_then_import_round_trips() {
        let source = store_with(&[
            poem(1, "a", "一，二。").with_favorite(true),
            poem(4, "b", "三。"),
        ]);
        let mut buffer = Vec::new();
        assert_eq!(source.export(&mut buffer).unwrap(), 2);

        let mut target = store_with(&[]);
        target.import(buffer.as_slice()).unwrap();
        assert_eq!(target.poems(), source.poems());
    }

    #[test]
    fn export_reports_sink_failures() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Ok(0)
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let store = store_with(&[poem(1, "a", "一。")]);
        assert!(matches!(store.export(Broken), Err(StoreError::Storage(_))));
    }

    #[test]
    fn empty_database_is_seeded() {
        let store = PoemStore::open_or_seed(open_in_memory().unwrap()).unwrap();
        assert!(!store.is_empty());
        assert_eq!(count_poems(&store.conn).unwrap(), store.len() as i64);
    }

    #[test]
    fn auto_number_after_largest_id_is_refused() {
        let mut store = store_with(&[poem(i64::MAX, "a", "一。")]);
        assert_eq!(store.next_no(), None);

        let err = store.add(poem(0, "b", "二。")).unwrap_err();
        assert!(matches!(err, StoreError::NoFreeId));
        assert_eq!(ids(&store), vec![i64::MAX]);
        assert_eq!(count_poems(&store.conn).unwrap(), 1);
    }

    #[test]
    fn import_without_free_number_is_rejected() {
        let mut store = store_with(&[poem(1, "a", "一。")]);
        let dataset = format!(
            r#"[{{"id": {}, "title": "t", "dynasty": "d", "author": "a", "content": "c。"}},
               {{"title": "u", "dynasty": "d", "author": "a", "content": "c。"}}]"#,
            i64::MAX
        );
        let err = store.import(dataset.as_bytes()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDataset(_)));
        assert_eq!(ids(&store), vec![1]);
    }
}
