//! Lyrics module for parsing and querying synchronized lyrics
//!
//! This module provides:
//! - Timecode parsing and formatting
//! - LRC and LRCP (word-timed karaoke) parsers
//! - Time point lookups for the active line and word
//! - Serialization back to text
//! - A playback session that applies the per-record offset

pub mod cache;
pub mod lookup;
pub mod parser;
pub mod record;
pub mod serializer;
pub mod session;
pub mod timecode;
pub mod timeline;

pub use cache::TimelineCache;
pub use lookup::Active;
pub use parser::{parse, parse_standard_lrc};
pub use record::LyricsRecord;
pub use serializer::{serialize, serialize_standard_lrc};
pub use session::{Frame, LyricsSession, SessionOptions};
pub use timecode::{format_timecode, parse_timecode, TimePoint};
pub use timeline::{Line, Timeline, WordSegment};

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Which grammar to read lyrics content with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LyricsFormat {
    /// LRCP when the content carries word-level tags, plain LRC otherwise.
    #[default]
    Auto,
    /// Word-timed superset (karaoke).
    Lrcp,
    /// Plain line-timed LRC.
    Standard,
}

impl LyricsFormat {
    /// Pick the concrete format for some content.
    pub fn detect(content: &str) -> Self {
        if parser::has_word_timing(content) {
            Self::Lrcp
        } else {
            Self::Standard
        }
    }

    /// Resolve `Auto` against the content; concrete formats are kept.
    pub fn resolve(self, content: &str) -> Self {
        match self {
            Self::Auto => Self::detect(content),
            other => other,
        }
    }

    pub fn parse(self, content: &str) -> Timeline {
        match self.resolve(content) {
            Self::Standard => parser::parse_standard_lrc(content),
            _ => parser::parse(content),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Lrcp => "lrcp",
            Self::Standard => "standard",
        }
    }
}

impl Timeline {
    /// Parse raw bytes; fails only when the content is not UTF-8.
    pub fn from_utf8(bytes: &[u8], format: LyricsFormat) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(bytes).context("lyrics content is not valid UTF-8")?;
        Ok(format.parse(content))
    }
}
