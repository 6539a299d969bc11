//! In-memory lyrics timeline
//!
//! A [`Timeline`] is built once per lyrics document and never mutated
//! afterwards; lookups only borrow it.

use super::timecode::TimePoint;
use serde::Serialize;

/// A timed run of text inside a line (a word or syllable in karaoke mode).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordSegment {
    pub start: TimePoint,
    /// `None` while the segment runs until the end of the track.
    pub end: Option<TimePoint>,
    pub text: String,
}

impl WordSegment {
    pub fn new(start: TimePoint, text: impl Into<String>) -> Self {
        Self {
            start,
            end: None,
            text: text.into(),
        }
    }
}

/// A single lyrics line with its word segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub start: TimePoint,
    /// Explicit end tag, or the next line's start; `None` for an open last line.
    pub end: Option<TimePoint>,
    pub segments: Vec<WordSegment>,
}

impl Line {
    /// Line without segments, used for instrumental breaks.
    pub fn empty(start: TimePoint) -> Self {
        Self {
            start,
            end: None,
            segments: Vec::new(),
        }
    }

    /// Full display text of the line.
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Parsed lyrics document: lines ordered by start time plus metadata tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timeline {
    lines: Vec<Line>,
    tags: Vec<(String, String)>,
}

impl Timeline {
    /// Build a timeline from unordered lines.
    ///
    /// Lines are stably sorted by start, then every open end is closed with
    /// the next line's start. The last segment of each line ends with its line.
    pub fn from_lines(mut lines: Vec<Line>, tags: Vec<(String, String)>) -> Self {
        lines.sort_by_key(|l| l.start);

        for i in 0..lines.len() {
            let next_start = lines.get(i + 1).map(|l| l.start);
            let line = &mut lines[i];
            if line.end.is_none() {
                line.end = next_start;
            }

            let line_end = line.end;
            for j in 0..line.segments.len() {
                line.segments[j].end = match line.segments.get(j + 1) {
                    Some(next) => Some(next.start),
                    None => line_end,
                };
            }
        }

        Self { lines, tags }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Metadata tags such as `ti`, `ar` or `offset`, in document order.
    pub fn tags(&self) -> &[(String, String)] {
        &self.tags
    }

    /// Value of a metadata tag (case-insensitive key); the last occurrence wins.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .rev()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// The standard LRC `[offset:+/-ms]` tag, if present and numeric.
    pub fn offset_tag(&self) -> Option<TimePoint> {
        let raw = self.tag("offset")?.trim();
        raw.strip_prefix('+').unwrap_or(raw).parse().ok()
    }

    /// Whether any line carries more than one timed segment.
    pub fn has_word_timing(&self) -> bool {
        self.lines.iter().any(|l| l.segments.len() > 1)
    }
}
