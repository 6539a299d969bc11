//! Time point lookups over a [`Timeline`].
//!
//! The active line is the last line whose start is at or before the query
//! time. There is no upper bound: after the last line starts it stays active.
//! All lookups are binary searches, so they are cheap enough to run on every
//! playback tick.

use super::timecode::TimePoint;
use super::timeline::{Line, Timeline, WordSegment};

/// Everything a renderer needs for one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Active<'a> {
    pub line_index: usize,
    pub line: &'a Line,
    pub word_index: Option<usize>,
    /// How far through the active word we are, from 0.0 to 1.0.
    /// Words without a known end report 0.0.
    pub progress: f64,
}

impl Timeline {
    /// Index of the active line, or `None` before the first line.
    pub fn line_index_at(&self, t: TimePoint) -> Option<usize> {
        self.lines().partition_point(|l| l.start <= t).checked_sub(1)
    }

    pub fn line_at(&self, t: TimePoint) -> Option<&Line> {
        self.line_index_at(t).map(|i| &self.lines()[i])
    }

    /// Display text of the active line, or an empty string.
    pub fn line_text_at(&self, t: TimePoint) -> String {
        self.line_at(t).map(Line::text).unwrap_or_default()
    }

    /// Index of the active word inside the active line.
    pub fn word_index_at(&self, t: TimePoint) -> Option<usize> {
        self.line_at(t)?.word_index_at(t)
    }

    pub fn word_at(&self, t: TimePoint) -> Option<&WordSegment> {
        let line = self.line_at(t)?;
        line.word_index_at(t).map(|i| &line.segments[i])
    }

    pub fn active_at(&self, t: TimePoint) -> Option<Active<'_>> {
        let line_index = self.line_index_at(t)?;
        let line = &self.lines()[line_index];
        let word_index = line.word_index_at(t);
        let progress = word_index
            .map(|i| line.segments[i].progress_at(t))
            .unwrap_or(0.0);

        Some(Active {
            line_index,
            line,
            word_index,
            progress,
        })
    }
}

impl Line {
    /// Index of the last segment starting at or before `t`.
    pub fn word_index_at(&self, t: TimePoint) -> Option<usize> {
        self.segments.partition_point(|s| s.start <= t).checked_sub(1)
    }
}

impl WordSegment {
    pub fn progress_at(&self, t: TimePoint) -> f64 {
        match self.end {
            Some(end) if end > self.start => {
                ((t - self.start) as f64 / (end - self.start) as f64).clamp(0.0, 1.0)
            }
            Some(_) if t >= self.start => 1.0,
            _ => 0.0,
        }
    }
}
