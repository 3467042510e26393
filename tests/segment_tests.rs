use recap::utils::segment::{paginate, segment};

fn lines_of(segments: &[String]) -> Vec<String> {
    segments
        .iter()
        .flat_map(|s| s.strip_suffix('\n').unwrap_or(s).split('\n'))
        .map(str::to_string)
        .collect()
}

#[test]
fn test_segments_preserve_line_order() {
    let text = (1..=40)
        .map(|i| format!("2024-12-17 10:{i:02}:00 | user{i}: message number {i}"))
        .collect::<Vec<_>>()
        .join("\n");

    let segments = segment(&text, 200);
    assert!(segments.len() > 1);

    let original: Vec<String> = text.split('\n').map(str::to_string).collect();
    assert_eq!(lines_of(&segments), original);
}

#[test]
fn test_segments_respect_limit_unless_single_line() {
    let text = format!(
        "short\n{}\nanother short line\n{}\ntail",
        "y".repeat(80),
        "z".repeat(25)
    );
    let max_len = 30;

    for seg in segment(&text, max_len) {
        let len = seg.chars().count();
        let line_count = seg.matches('\n').count();
        assert!(
            len <= max_len || line_count == 1,
            "segment of {len} chars with {line_count} lines: {seg:?}"
        );
    }
}

#[test]
fn test_three_line_example() {
    assert_eq!(
        segment("line1\nline2\nline3", 12),
        vec!["line1\nline2\n", "line3\n"]
    );
}

#[test]
fn test_empty_input_has_no_segments() {
    assert!(segment("", 2000).is_empty());
}

#[test]
fn test_resegmenting_a_conformant_segment_is_stable() {
    let first = segment("alpha\nbeta\ngamma\ndelta", 12);
    assert_eq!(first, vec!["alpha\nbeta\n", "gamma\ndelta\n"]);
    for seg in &first {
        assert_eq!(segment(seg, 12), vec![seg.clone()]);
    }

    let three = segment("line1\nline2\nline3", 12);
    assert_eq!(segment(&three[0], 12), vec!["line1\nline2\n"]);
}

#[test]
fn test_paginate_summary_text() {
    let summary = "## Topics\n- release date\n- review owners\n\n## Decisions\n- ship friday";
    let pages = paginate(summary, 45);

    assert!(pages.iter().all(|p| p.chars().count() <= 45));
    assert!(pages.iter().all(|p| p == p.trim() && !p.is_empty()));
    assert_eq!(pages.first().map(String::as_str), Some("## Topics\n- release date\n- review owners"));
    assert_eq!(pages.last().map(String::as_str), Some("## Decisions\n- ship friday"));
}
