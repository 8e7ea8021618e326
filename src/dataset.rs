//! Bulk JSON format shared by the bundled default collection and user
//! import/export. Only the base poem fields travel; segments are recomputed
//! whenever a record becomes a [`Poem`].

use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::models::Poem;

/// Collection shipped with the binary and used to seed an empty store.
const DEFAULT_DATASET: &str = include_str!("../data/poems.json");

/// One poem as it appears in a dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoemRecord {
    #[serde(default)]
    pub id: i64,
    pub title: String,
    pub dynasty: String,
    pub author: String,
    pub content: String,
    /// Added after the first dataset revision, so older files may omit it.
    #[serde(default)]
    pub favorite: bool,
}

impl From<&Poem> for PoemRecord {
    fn from(poem: &Poem) -> Self {
        Self {
            id: poem.id(),
            title: poem.title().to_string(),
            dynasty: poem.dynasty().to_string(),
            author: poem.author().to_string(),
            content: poem.content().to_string(),
            favorite: poem.favorite(),
        }
    }
}

impl From<PoemRecord> for Poem {
    fn from(record: PoemRecord) -> Self {
        Poem::new(
            record.id,
            record.title,
            record.dynasty,
            record.author,
            record.content,
        )
        .with_favorite(record.favorite)
    }
}

/// Decode a dataset. Records without a positive id are numbered after the
/// highest id present in the batch, in file order. Running past `i64::MAX`
/// is reported as a data error.
pub fn parse_dataset(bytes: &[u8]) -> Result<Vec<Poem>, serde_json::Error> {
    let records: Vec<PoemRecord> = serde_json::from_slice(bytes)?;
    let mut next_id = records.iter().map(|record| record.id).max().unwrap_or(0).max(0);

    records
        .into_iter()
        .map(|mut record| {
            if record.id <= 0 {
                next_id = next_id.checked_add(1).ok_or_else(|| {
                    serde_json::Error::custom(format!(
                        "no poem number left for \"{}\"",
                        record.title
                    ))
                })?;
                record.id = next_id;
            }
            Ok(Poem::from(record))
        })
        .collect()
}

/// Encode poems as a pretty-printed dataset.
pub fn encode_dataset(poems: &[Poem]) -> Result<Vec<u8>, serde_json::Error> {
    let records: Vec<PoemRecord> = poems.iter().map(PoemRecord::from).collect();
    serde_json::to_vec_pretty(&records)
}

/// Poems from the bundled default dataset.
pub fn default_poems() -> Result<Vec<Poem>, serde_json::Error> {
    parse_dataset(DEFAULT_DATASET.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_dataset_parses_with_unique_ids() {
        let poems = default_poems().unwrap();
        assert!(!poems.is_empty());
        let mut ids: Vec<i64> = poems.iter().map(Poem::id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), poems.len());
        assert!(poems.iter().all(|poem| !poem.segments().is_empty()));
    }

    #[test]
    fn missing_favorite_defaults_to_false() {
        let json = r#"[{"id": 2, "title": "t", "dynasty": "d", "author": "a", "content": "c。"}]"#;
        let poems = parse_dataset(json.as_bytes()).unwrap();
        assert_eq!(poems.len(), 1);
        assert!(!poems[0].favorite());
        assert_eq!(poems[0].segments(), ["c。"]);
    }

    #[test]
    fn unnumbered_records_follow_the_batch_maximum() {
        let json = r#"[
            {"title": "a", "dynasty": "d", "author": "x", "content": "1"},
            {"id": 5, "title": "b", "dynasty": "d", "author": "x", "content": "2"},
            {"id": 0, "title": "c", "dynasty": "d", "author": "x", "content": "3"}
        ]"#;
        let ids: Vec<i64> = parse_dataset(json.as_bytes())
            .unwrap()
            .iter()
            .map(Poem::id)
            .collect();
        assert_eq!(ids, vec![6, 5, 7]);
    }

    #[test]
    fn malformed_record_rejects_whole_batch() {
        let json = r#"[
            {"id": 1, "title": "a", "dynasty": "d", "author": "x", "content": "1"},
            {"id": 2, "title": 42},
            {"id": 3, "title": "c", "dynasty": "d", "author": "x", "content": "3"}
        ]"#;
        assert!(parse_dataset(json.as_bytes()).is_err());
    }

    #[test]
    fn encoding_omits_segments() {
        let poem = Poem::new(9, "t", "d", "a", "一，二。").with_favorite(true);
        let bytes = encode_dataset(std::slice::from_ref(&poem)).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(!text.contains("segments"));
        assert!(text.contains("\"favorite\": true"));
    }

    #[test]
    fn numbering_stops_at_the_largest_id() {
        let bytes = format!(
            r#"[{{"id": {}, "title": "满", "dynasty": "d", "author": "a", "content": "c。"}},
               {{"title": "溢", "dynasty": "d", "author": "a", "content": "c。"}}]"#,
            i64::MAX
        );
        let err = parse_dataset(bytes.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("溢"));
    }
}
