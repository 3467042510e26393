//! Line-preserving text segmentation.
//!
//! Both the summarization input and the rendered output have hard size limits,
//! so text is packed greedily into segments at line boundaries. Lengths are
//! counted in `char`s. A line is never split: a single line longer than the
//! limit becomes its own oversized segment.

/// Splits `text` into segments of at most `max_len` characters, breaking only
/// at newlines. Every line keeps its trailing `\n`.
///
/// # Examples
///
/// ```
/// use recap::utils::segment::segment;
///
/// let chunks = segment("line1\nline2\nline3", 12);
/// assert_eq!(chunks, vec!["line1\nline2\n", "line3\n"]);
/// ```
#[must_use]
pub fn segment(text: &str, max_len: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    pack_lines(text, max_len)
}

/// Splits `text` into display pages of at most `max_len` characters.
///
/// Same packing as [`segment`], but each page is trimmed and pages that are
/// only whitespace are dropped, so nothing renders a blank trailing page.
#[must_use]
pub fn paginate(text: &str, max_len: usize) -> Vec<String> {
    pack_lines(text, max_len)
        .into_iter()
        .filter_map(|page| {
            let trimmed = page.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .collect()
}

fn pack_lines(text: &str, max_len: usize) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    // A final `\n` terminates the last line; it does not start an empty one.
    let body = text.strip_suffix('\n').unwrap_or(text);
    for line in body.split('\n') {
        let line_len = line.chars().count();
        if current_len + line_len + 1 > max_len && !current.is_empty() {
            segments.push(std::mem::take(&mut current));
            current_len = 0;
        }
        current.push_str(line);
        current.push('\n');
        current_len += line_len + 1;
    }

    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_fills_exactly_to_limit() {
        let chunks = segment("line1\nline2\nline3", 12);
        assert_eq!(chunks, vec!["line1\nline2\n", "line3\n"]);
        assert_eq!(chunks[0].chars().count(), 12);
    }

    #[test]
    fn test_segment_empty_input() {
        assert!(segment("", 10).is_empty());
        assert!(paginate("", 10).is_empty());
    }

    #[test]
    fn test_oversized_line_is_kept_whole() {
        let long = "x".repeat(30);
        let text = format!("a\n{long}\nb");
        let chunks = segment(&text, 10);
        assert_eq!(chunks, vec!["a\n".to_string(), format!("{long}\n"), "b\n".to_string()]);
    }

    #[test]
    fn test_trailing_newline_ends_last_line() {
        assert_eq!(segment("line1\nline2\n", 12), vec!["line1\nline2\n"]);
        assert_eq!(segment("a\n\n", 10), vec!["a\n\n"]);
    }

    #[test]
    fn test_lengths_counted_in_chars() {
        // Four two-byte chars plus newline is five chars, not nine bytes.
        let chunks = segment("éééé\néééé", 10);
        assert_eq!(chunks, vec!["éééé\néééé\n"]);
    }

    #[test]
    fn test_paginate_trims_and_drops_blank_pages() {
        let pages = paginate("first\nsecond\n\n\n", 8);
        assert_eq!(pages, vec!["first", "second"]);
    }

    #[test]
    fn test_paginate_whitespace_only_input() {
        assert!(paginate("  \n\n \n", 100).is_empty());
    }
}
