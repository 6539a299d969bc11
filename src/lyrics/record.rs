//! Lyrics records as stored by the song library
//!
//! A song may have several lyrics records (translations, karaoke versions);
//! each carries its own offset correction.

use super::timecode::TimePoint;
use super::LyricsFormat;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LyricsRecord {
    pub id: u64,
    pub name: String,
    /// Sort key among the records of one song.
    pub index: i32,
    pub content: String,
    pub description: String,
    /// Added to the playback position (ms) before lookup.
    pub offset: TimePoint,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<LyricsRecord>),
    One(LyricsRecord),
}

impl LyricsRecord {
    pub fn new(id: u64, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_offset(mut self, offset: TimePoint) -> Self {
        self.offset = offset;
        self
    }

    /// Karaoke records carry word-level timing.
    pub fn is_karaoke(&self) -> bool {
        LyricsFormat::detect(&self.content) == LyricsFormat::Lrcp
    }

    /// Read a JSON file holding one record or an array of records,
    /// returned in display order (`index`, then `id`).
    pub fn load_json(path: &Path) -> anyhow::Result<Vec<Self>> {
        let raw = std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parse {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Vec<Self>> {
        let mut records = match serde_json::from_str::<OneOrMany>(raw).context("decode lyrics records")? {
            OneOrMany::Many(records) => records,
            OneOrMany::One(record) => vec![record],
        };
        records.sort_by_key(|r| (r.index, r.id));
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_single() {
        let records = LyricsRecord::from_json(
            r#"{"id": 7, "name": "Original", "content": "[00:01]hi", "offset": -300, "createdAt": "2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 7);
        assert_eq!(records[0].offset, -300);
        assert_eq!(records[0].description, "");
    }

    #[test]
    fn test_from_json_many_sorted() {
        let records = LyricsRecord::from_json(
            r#"[{"id": 2, "index": 1, "name": "b"}, {"id": 3, "index": 0, "name": "c"}, {"id": 1, "index": 1, "name": "a"}]"#,
        )
        .unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(LyricsRecord::from_json("not json").is_err());
        assert!(LyricsRecord::from_json(r#"{"content": 5}"#).is_err());
    }

    #[test]
    fn test_is_karaoke() {
        assert!(LyricsRecord::new(1, "k", "[00:01]a[00:02]b").is_karaoke());
        assert!(!LyricsRecord::new(2, "p", "[00:01]ab").is_karaoke());
    }
}
