//! Playback-side lyrics state
//!
//! A session owns the lyrics records of the current song, the parsed timeline
//! of the selected one and its offset. The player feeds it the playback
//! position on every tick and gets back what to highlight.

use super::cache::TimelineCache;
use super::record::LyricsRecord;
use super::timecode::TimePoint;
use super::{LyricsFormat, Timeline};
use std::sync::Arc;
use tracing::debug;

/// What to show at one playback position.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Lookup time after the offset was applied.
    pub time: TimePoint,
    pub line_index: Option<usize>,
    pub text: String,
    pub word_index: Option<usize>,
    pub progress: f64,
    /// The active line differs from the previous frame's.
    pub changed: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub format: LyricsFormat,
    /// Add the document's `[offset:]` tag on top of the record offset.
    pub honor_offset_tag: bool,
    pub cache_capacity: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            format: LyricsFormat::Auto,
            honor_offset_tag: true,
            cache_capacity: TimelineCache::DEFAULT_CAPACITY,
        }
    }
}

pub struct LyricsSession {
    options: SessionOptions,
    cache: TimelineCache,
    records: Vec<LyricsRecord>,
    selected: Option<usize>,
    timeline: Arc<Timeline>,
    offset: TimePoint,
    last_line: Option<usize>,
}

impl LyricsSession {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            cache: TimelineCache::new(options.cache_capacity),
            records: Vec::new(),
            selected: None,
            timeline: Arc::new(Timeline::default()),
            offset: 0,
            last_line: None,
        }
    }

    /// Replace the song's records and select the first one in display order.
    pub fn load_records(&mut self, mut records: Vec<LyricsRecord>) {
        records.sort_by_key(|r| (r.index, r.id));
        let (content, offset) = records
            .first()
            .map(|r| (r.content.clone(), r.offset))
            .unwrap_or_default();
        self.apply(&content, offset);
        self.selected = (!records.is_empty()).then_some(0);
        self.records = records;
    }

    /// Switch to another record of the current song.
    pub fn select(&mut self, id: u64) -> anyhow::Result<()> {
        let Some(pos) = self.records.iter().position(|r| r.id == id) else {
            anyhow::bail!("no lyrics record with id {id}");
        };
        let record = self.records[pos].clone();
        self.apply(&record.content, record.offset);
        self.selected = Some(pos);
        Ok(())
    }

    /// Use ad-hoc content that is not backed by a record.
    pub fn set_content(&mut self, content: &str, offset: TimePoint) {
        self.records.clear();
        self.selected = None;
        self.apply(content, offset);
    }

    fn apply(&mut self, content: &str, record_offset: TimePoint) {
        let timeline = self.cache.get_or_parse(content, self.options.format);
        let tag_offset = if self.options.honor_offset_tag {
            timeline.offset_tag().unwrap_or(0)
        } else {
            0
        };

        self.offset = record_offset.saturating_add(tag_offset);
        self.timeline = timeline;
        self.last_line = None;
        debug!(
            lines = self.timeline.len(),
            offset = self.offset,
            karaoke = self.timeline.has_word_timing(),
            "lyrics selected"
        );
    }

    pub fn records(&self) -> &[LyricsRecord] {
        &self.records
    }

    pub fn selected(&self) -> Option<&LyricsRecord> {
        self.selected.map(|i| &self.records[i])
    }

    /// Shared handle to the current timeline; stays valid after a switch.
    pub fn timeline(&self) -> Arc<Timeline> {
        Arc::clone(&self.timeline)
    }

    /// Effective offset in milliseconds.
    pub fn offset(&self) -> TimePoint {
        self.offset
    }

    pub fn is_karaoke(&self) -> bool {
        self.timeline.has_word_timing()
    }

    /// Lookup time for a playback position given in seconds.
    pub fn query_time(&self, playback_secs: f64) -> TimePoint {
        ((playback_secs * 1000.0).round() as TimePoint).saturating_add(self.offset)
    }

    pub fn frame(&mut self, playback_secs: f64) -> Frame {
        let time = self.query_time(playback_secs);
        let active = self.timeline.active_at(time);

        let line_index = active.map(|a| a.line_index);
        let changed = line_index != self.last_line;
        self.last_line = line_index;

        Frame {
            time,
            line_index,
            text: active.map(|a| a.line.text()).unwrap_or_default(),
            word_index: active.and_then(|a| a.word_index),
            progress: active.map_or(0.0, |a| a.progress),
            changed,
        }
    }

    /// Playback position (seconds) at which a line becomes active, for
    /// click-to-seek.
    pub fn seek_target_secs(&self, line_index: usize) -> Option<f64> {
        let line = self.timeline.lines().get(line_index)?;
        Some(line.start.saturating_sub(self.offset).max(0) as f64 / 1000.0)
    }
}

impl Default for LyricsSession {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}
