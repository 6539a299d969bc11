//! LRC / LRCP parser
//!
//! Parses synchronized lyrics. Every line starts with one or more time tags;
//! in LRCP the body may carry more tags, each starting a new word segment:
//!
//! [00:12.34] Hello world
//! [00:15.00][00:45.00]Chorus, sung twice
//! [01:30]tagged[01:31]word[01:32]segments[01:33]
//!
//! A trailing tag with nothing after it closes the line. Malformed tags read
//! as `00:00.000` rather than failing the document.

use super::timecode::{parse_timecode, TimePoint};
use super::timeline::{Line, Timeline, WordSegment};
use tracing::trace;

/// How the body of a line (after the leading time tags) is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
    /// Embedded tags split the body into word segments.
    WordTimed,
    /// The body is literal text, brackets included.
    Literal,
}

/// Parse LRCP lyrics, including embedded word-level tags.
pub fn parse(content: &str) -> Timeline {
    parse_with(content, Body::WordTimed)
}

/// Parse plain LRC: one segment per line, no word-level timing.
pub fn parse_standard_lrc(content: &str) -> Timeline {
    parse_with(content, Body::Literal)
}

/// Whether any line carries word-level tags after its body text.
///
/// Leading anchors alone do not count: `[00:01][00:02]text` is a plain LRC
/// line repeated at two times, not karaoke, even though it holds two
/// consecutive timecodes.
pub fn has_word_timing(content: &str) -> bool {
    content.lines().any(|raw| {
        let line = raw.trim_start();
        if parse_metadata(line).is_some() {
            return false;
        }
        let (anchors, body) = split_anchors(line);
        !anchors.is_empty() && next_tag(body).is_some()
    })
}

fn parse_with(content: &str, body_mode: Body) -> Timeline {
    let mut lines = Vec::new();
    let mut tags = Vec::new();

    for (number, raw) in content.lines().enumerate() {
        let line = raw.trim_start();
        if line.trim_end().is_empty() {
            continue;
        }

        if let Some((key, value)) = parse_metadata(line) {
            tags.push((key.to_string(), value.to_string()));
            continue;
        }

        let (anchors, body) = split_anchors(line);
        let Some(&first) = anchors.first() else {
            trace!(line = number + 1, "skipping line without time tag");
            continue;
        };

        let shape = match body_mode {
            Body::WordTimed => Shape::word_timed(first, body),
            Body::Literal => Shape::literal(first, body),
        };
        lines.extend(anchors.iter().map(|&anchor| shape.anchored_at(first, anchor)));
    }

    trace!(lines = lines.len(), tags = tags.len(), "parsed lyrics");
    Timeline::from_lines(lines, tags)
}

/// Parse a metadata line like `[ti:Title]` or `[offset:+200]`.
///
/// Only a line consisting of a single tag with an alphabetic key counts.
fn parse_metadata(line: &str) -> Option<(&str, &str)> {
    let inner = line.trim_end().strip_prefix('[')?.strip_suffix(']')?;
    if inner.contains(['[', ']']) {
        return None;
    }
    let (key, value) = inner.split_once(':')?;
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    Some((key, value))
}

/// Consume the leading `[time]` tags of a line, returning them and the body.
fn split_anchors(line: &str) -> (Vec<TimePoint>, &str) {
    let mut anchors = Vec::new();
    let mut rest = line;

    while rest.starts_with('[') {
        let Some(end) = rest.find(']') else {
            break;
        };
        anchors.push(parse_timecode(&rest[1..end]));
        rest = &rest[end + 1..];
    }

    (anchors, rest)
}

/// Find the next complete `[...]` tag: `(text before, tag contents, rest)`.
fn next_tag(s: &str) -> Option<(&str, &str, &str)> {
    let open = s.find('[')?;
    let close = open + s[open..].find(']')?;
    Some((&s[..open], &s[open + 1..close], &s[close + 1..]))
}

/// The structure of one physical line, parsed once and then placed at each
/// of its anchors.
struct Shape {
    segments: Vec<(TimePoint, String)>,
    end: Option<TimePoint>,
}

impl Shape {
    fn word_timed(anchor: TimePoint, body: &str) -> Self {
        if body.is_empty() {
            return Self::literal(anchor, body);
        }

        let mut segments = Vec::new();
        let mut start = anchor;
        let mut rest = body;
        while let Some((text, tag, after)) = next_tag(rest) {
            segments.push((start, text.to_string()));
            // Segment starts never go backwards, even for malformed tags.
            start = parse_timecode(tag).max(start);
            rest = after;
        }

        // A tag at the very end closes the line instead of opening a segment.
        let end = if rest.is_empty() {
            Some(start)
        } else {
            segments.push((start, rest.to_string()));
            None
        };

        Self { segments, end }
    }

    fn literal(anchor: TimePoint, body: &str) -> Self {
        let segments = if body.is_empty() {
            Vec::new()
        } else {
            vec![(anchor, body.to_string())]
        };
        Self {
            segments,
            end: None,
        }
    }

    /// Re-anchor the shape: every time is shifted by `anchor - first`.
    ///
    /// Shape times are never below `first`, so shifted times stay at or after
    /// `anchor` even when the addition saturates.
    fn anchored_at(&self, first: TimePoint, anchor: TimePoint) -> Line {
        let shift = |t: TimePoint| t.saturating_add(anchor).saturating_sub(first).max(anchor);
        Line {
            start: anchor,
            end: self.end.map(shift),
            segments: self
                .segments
                .iter()
                .enumerate()
                .map(|(i, (start, text))| {
                    // The first segment always starts with its line.
                    let start = if i == 0 { anchor } else { shift(*start) };
                    WordSegment::new(start, text.as_str())
                })
                .collect(),
        }
    }
}
