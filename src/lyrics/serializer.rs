//! Render a [`Timeline`] back to LRCP / LRC text.

use super::timecode::format_timecode;
use super::timeline::{Line, Timeline};
use std::fmt::Write;

/// Serialize to LRCP, keeping word segments and explicit line ends.
///
/// `parse(&serialize(&t))` reproduces any timeline that `parse` produced.
pub fn serialize(timeline: &Timeline) -> String {
    let mut out = String::new();
    write_tags(&mut out, timeline);

    let lines = timeline.lines();
    for (i, line) in lines.iter().enumerate() {
        out.push_str(&format_timecode(line.start));
        for (j, segment) in line.segments.iter().enumerate() {
            if j > 0 {
                out.push_str(&format_timecode(segment.start));
            }
            out.push_str(&segment.text);
        }

        if let Some(end) = line.end
            && needs_end_tag(line, lines.get(i + 1))
        {
            out.push_str(&format_timecode(end));
        }
        out.push('\n');
    }

    out
}

/// Serialize to plain LRC: one `[mm:ss.fff]text` line per line, word timing dropped.
pub fn serialize_standard_lrc(timeline: &Timeline) -> String {
    let mut out = String::new();
    write_tags(&mut out, timeline);

    for line in timeline.lines() {
        out.push_str(&format_timecode(line.start));
        out.push_str(&line.text());
        out.push('\n');
    }

    out
}

fn write_tags(out: &mut String, timeline: &Timeline) {
    for (key, value) in timeline.tags() {
        let _ = writeln!(out, "[{key}:{value}]");
    }
}

/// An end tag is only written when parsing could not derive the same end again.
fn needs_end_tag(line: &Line, next: Option<&Line>) -> bool {
    let Some(last) = line.segments.last() else {
        // A bare tag after an empty body would read as another anchor.
        return false;
    };
    // An empty last segment would otherwise be taken for the end tag itself.
    last.text.is_empty() || line.end != next.map(|n| n.start)
}
