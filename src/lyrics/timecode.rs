//! Timecode parsing and formatting
//!
//! Accepts the bracket contents used by LRC/LRCP tags:
//! `mm`, `mm:`, `mm:ss`, `mm:ss.`, `mm:ss.f`, `mm:ss.ff`, `mm:ss.fff` (any
//! fraction length) and a bare integer, which is read as minutes.

/// Milliseconds from the start of the track.
pub type TimePoint = i64;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;

/// Parse a timecode like `[03:03.3]` or `04:03.321` into milliseconds.
///
/// Parsing is lenient: anything that is not a well-formed timecode yields `0`
/// instead of an error, so a half-typed tag never breaks the document.
pub fn parse_timecode(raw: &str) -> TimePoint {
    try_parse_timecode(raw).unwrap_or(0)
}

fn try_parse_timecode(raw: &str) -> Option<TimePoint> {
    let inner = raw.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    let mut parts = inner.split(':');
    let minutes_part = parts.next()?;
    let seconds_part = parts.next();
    if parts.next().is_some() {
        return None;
    }

    let minutes_part = minutes_part.trim();
    let minutes = match seconds_part {
        // "5." means five minutes, no seconds given
        None => parse_digits(minutes_part.strip_suffix('.').unwrap_or(minutes_part))?,
        Some(_) => parse_digits(minutes_part)?,
    };

    let (seconds, millis) = match seconds_part.map(str::trim) {
        None | Some("") => (0, 0),
        Some(s) => {
            let (whole, fraction) = s.split_once('.').unwrap_or((s, ""));
            (parse_digits(whole)?, parse_fraction(fraction)?)
        }
    };

    minutes
        .checked_mul(MS_PER_MINUTE)?
        .checked_add(seconds.checked_mul(MS_PER_SECOND)?)?
        .checked_add(millis)
}

/// Empty fields count as zero; anything but ASCII digits is rejected.
fn parse_digits(s: &str) -> Option<i64> {
    if s.is_empty() {
        return Some(0);
    }
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Normalise a fractional-second suffix to milliseconds: "3" -> 300, "32" -> 320,
/// "321" -> 321, "3219" -> 321.
fn parse_fraction(s: &str) -> Option<i64> {
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mut millis = 0;
    let mut digits = s.bytes();
    for _ in 0..3 {
        millis = millis * 10 + digits.next().map_or(0, |b| i64::from(b - b'0'));
    }
    Some(millis)
}

/// Render a time point as `[mm:ss.fff]`. Negative values clamp to zero.
pub fn format_timecode(tp: TimePoint) -> String {
    let tp = tp.max(0);
    let minutes = tp / MS_PER_MINUTE;
    let seconds = (tp % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = tp % MS_PER_SECOND;
    format!("[{minutes:02}:{seconds:02}.{millis:03}]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_forms() {
        assert_eq!(parse_timecode("[01]"), 60_000);
        assert_eq!(parse_timecode("[02:]"), 120_000);
        assert_eq!(parse_timecode("[03:00]"), 180_000);
        assert_eq!(parse_timecode("[03:01]"), 181_000);
        assert_eq!(parse_timecode("[03:02.]"), 182_000);
        assert_eq!(parse_timecode("[03:03.3]"), 183_300);
        assert_eq!(parse_timecode("[04:03.321]"), 243_321);
        assert_eq!(parse_timecode("5"), 300_000);
        assert_eq!(parse_timecode("5."), 300_000);
        assert_eq!(parse_timecode("5:1"), 301_000);
        assert_eq!(parse_timecode("5:1.111"), 301_111);
    }

    #[test]
    fn test_fraction_normalisation() {
        assert_eq!(parse_timecode("00:12.34"), 12_340);
        assert_eq!(parse_timecode("00:12.3456"), 12_345);
        assert_eq!(parse_timecode("00:00.05"), 50);
    }

    #[test]
    fn test_malformed_is_zero() {
        assert_eq!(parse_timecode("6:abc"), 0);
        assert_eq!(parse_timecode("7:abc:123:abc"), 0);
        assert_eq!(parse_timecode("[05:00.abc]"), 0);
        assert_eq!(parse_timecode("abc"), 0);
        assert_eq!(parse_timecode("-1:00"), 0);
        assert_eq!(parse_timecode("ti:Title"), 0);
        assert_eq!(parse_timecode("99999999999999999999"), 0);
        assert_eq!(parse_timecode(""), 0);
    }

    #[test]
    fn test_format() {
        assert_eq!(format_timecode(0), "[00:00.000]");
        assert_eq!(format_timecode(183_300), "[03:03.300]");
        assert_eq!(format_timecode(6_000_001), "[100:00.001]");
        assert_eq!(format_timecode(-5), "[00:00.000]");
    }

    #[test]
    fn test_format_reparses() {
        for tp in [0, 1, 999, 1_000, 59_999, 60_000, 243_321, 6_000_001] {
            assert_eq!(parse_timecode(&format_timecode(tp)), tp);
        }
    }
}
