use homesong_lyrics::lyrics::{
    parse, parse_standard_lrc, parse_timecode, serialize, serialize_standard_lrc, LyricsRecord,
    LyricsSession,
};

// https://guoyunhe.github.io/rabbit-lyrics
const EXAMPLE: &str = "
[00:00.00] 谁のことを考えてるの?
[00:03.10] ハートのスペース争夺戦
[00:05.76] 戦况的に 一进一退で
[00:10.56] 油断ならないな
[00:11.70] あのね 今のとこ ほんの数％しか
[00:16.73] アイツの心に 居场所がないんだ
";

const KARAOKE: &str = "[ti:Demo]
[00:00.00] text before first tag
[00:03.10][00:03.50]more text with two anchors
[01:23.456]Line with millisecond precision
[01:25]   leading space preserved
[01:30][01:31]tagged[01:32]word[01:33]segments
";

#[test]
fn test_timecodes() {
    assert_eq!(parse_timecode("[03:03.3]"), 183_300);
    assert_eq!(parse_timecode("[04:03.321]"), 243_321);
    assert_eq!(parse_timecode("5"), 300_000);
    assert_eq!(parse_timecode("abc"), 0);
    assert_eq!(parse_timecode("6:abc"), 0);
}

#[test]
fn test_example_lines() {
    let l = parse(EXAMPLE);
    assert_eq!(l.len(), 6);

    let starts: Vec<_> = l.lines().iter().map(|line| line.start).collect();
    assert_eq!(starts, vec![0, 3_100, 5_760, 10_560, 11_700, 16_730]);

    let first = &l.lines()[0];
    assert_eq!(first.end, Some(3_100));
    assert_eq!(first.segments[0].start, 0);
    assert_eq!(first.segments[0].end, Some(3_100));
    assert_eq!(first.segments[0].text, " 谁のことを考えてるの?");

    let last = &l.lines()[5];
    assert_eq!(last.start, 16_730);
    assert_eq!(last.end, None);
    assert_eq!(last.segments[0].end, None);
    assert_eq!(last.segments[0].text, " アイツの心に 居场所がないんだ");
}

#[test]
fn test_example_lookups() {
    let l = parse(EXAMPLE);

    assert_eq!(l.line_index_at(2_000), Some(0));
    assert_eq!(l.line_index_at(6_000), Some(2));
    assert_eq!(l.line_index_at(17_000), Some(5));
    assert_eq!(l.line_index_at(-1), None);
    assert_eq!(l.line_index_at(-999), None);
    assert_eq!(l.line_index_at(999_999_999), Some(5));

    let l3 = l.line_at(6_000).unwrap();
    assert_eq!(l3.start, 5_760);
    assert_eq!(l3.end, Some(10_560));
    assert_eq!(l3.segments[0].text, " 戦况的に 一进一退で");

    assert_eq!(l.line_text_at(2_000), " 谁のことを考えてるの?");
    assert_eq!(l.line_text_at(17_000), " アイツの心に 居场所がないんだ");
    assert_eq!(l.line_text_at(-1), "");
}

#[test]
fn test_standard_adapter_matches_on_plain_lrc() {
    assert_eq!(parse_standard_lrc(EXAMPLE), parse(EXAMPLE));
}

#[test]
fn test_round_trip() {
    for content in [EXAMPLE, KARAOKE] {
        let tl = parse(content);
        let again = parse(&serialize(&tl));
        assert_eq!(again.len(), tl.len());
        for (a, b) in tl.lines().iter().zip(again.lines()) {
            assert_eq!(a.start, b.start);
            assert_eq!(a.text(), b.text());
        }
        assert_eq!(again, tl);
    }

    let plain = parse_standard_lrc(EXAMPLE);
    assert_eq!(parse_standard_lrc(&serialize_standard_lrc(&plain)), plain);
}

#[test]
fn test_karaoke_document() {
    let tl = parse(KARAOKE);
    assert_eq!(tl.tag("ti"), Some("Demo"));
    // Two anchored lines expand twice each.
    assert_eq!(tl.len(), 7);
    assert_eq!(tl.line_text_at(85_500), "   leading space preserved");

    assert_eq!(tl.line_index_at(90_500), Some(5));
    assert_eq!(tl.word_at(90_500).unwrap().text, "tagged");

    // The second anchor replays the line one second later.
    assert_eq!(tl.line_index_at(92_500), Some(6));
    assert_eq!(tl.word_at(92_500).unwrap().text, "tagged");
    assert_eq!(tl.word_at(93_200).unwrap().text, "word");
    assert_eq!(tl.word_at(94_000).unwrap().text, "segments");
}

#[test]
fn test_session_over_records() {
    let mut session = LyricsSession::default();
    session.load_records(vec![
        LyricsRecord::new(1, "rabbit", EXAMPLE).with_offset(-1_000),
        LyricsRecord {
            index: 1,
            ..LyricsRecord::new(2, "demo", KARAOKE)
        },
    ]);

    // 4.0s - 1000ms = 3000ms, still on the first line.
    let frame = session.frame(4.0);
    assert_eq!(frame.line_index, Some(0));
    assert!(frame.changed);

    session.select(2).unwrap();
    assert!(session.is_karaoke());
    let frame = session.frame(93.5);
    assert_eq!(frame.text, "taggedwordsegments");
    assert_eq!(frame.word_index, Some(1));
}
