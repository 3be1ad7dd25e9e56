//! Greedy word wrapping.
//!
//! Widths are measured in characters, not glyph advances: the page uses a
//! single font at a single size, so a fixed column count is all the layout
//! needs.

/// Wrap a line into segments of at most `max_width` characters.
///
/// The line is trimmed of ASCII control characters and spaces, then split
/// on ASCII whitespace only; a no-break space (U+00A0) or other Unicode
/// space stays inside its word. Words are rejoined with a
/// single space and a new segment starts whenever the next word would not
/// fit. Words are never split, so a single word wider than `max_width`
/// becomes a segment of its own.
///
/// An empty or all-whitespace line yields exactly one empty segment, never
/// zero, so blank lines still advance the text cursor.
///
/// # Examples
///
/// ```
/// use mdpdf::text::wrap_line;
///
/// assert_eq!(wrap_line("alpha beta gamma", 10), vec!["alpha beta", "gamma"]);
/// assert_eq!(wrap_line("   ", 10), vec![""]);
/// ```
pub fn wrap_line(line: &str, max_width: usize) -> Vec<String> {
    let trimmed = line.trim_matches(|c: char| c <= ' ');
    if trimmed.is_empty() {
        return vec![String::new()];
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in trimmed.split(is_separator).filter(|w| !w.is_empty()) {
        let word_len = word.chars().count();
        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= max_width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            segments.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }

    segments
}

/// ASCII whitespace, including vertical tab.
fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_line_unchanged() {
        assert_eq!(wrap_line("Title: Report", 95), vec!["Title: Report"]);
    }

    #[test]
    fn test_blank_lines_yield_one_empty_segment() {
        assert_eq!(wrap_line("", 95), vec![""]);
        assert_eq!(wrap_line(" \t  ", 95), vec![""]);
    }

    #[test]
    fn test_collapses_inner_whitespace() {
        assert_eq!(wrap_line("  a   b\tc  ", 95), vec!["a b c"]);
    }

    #[test]
    fn test_no_break_space_is_not_a_separator() {
        assert_eq!(wrap_line("a\u{a0}b c", 95), vec!["a\u{a0}b c"]);
        assert_eq!(wrap_line("\u{a0}", 95), vec!["\u{a0}"]);
        assert_eq!(wrap_line("a\u{2003}b", 95), vec!["a\u{2003}b"]);
    }

    #[test]
    fn test_control_characters_trimmed_at_ends() {
        assert_eq!(wrap_line("\x01\x0Bword\x0C\x1F", 95), vec!["word"]);
        assert_eq!(wrap_line("a\x0Bb", 95), vec!["a b"]);
    }

    #[test]
    fn test_exact_fit() {
        // "aaaa bbbb" is exactly 9 characters
        assert_eq!(wrap_line("aaaa bbbb", 9), vec!["aaaa bbbb"]);
        assert_eq!(wrap_line("aaaa bbbb", 8), vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn test_long_line_wraps_at_word_boundaries() {
        let words: Vec<String> = (0..40).map(|i| format!("word{}", i)).collect();
        let line = words.join(" ");
        let segments = wrap_line(&line, 95);

        assert!(segments.len() > 1);
        for segment in &segments {
            assert!(segment.chars().count() <= 95, "segment too long: {}", segment);
        }
        assert_eq!(segments.join(" "), line);
    }

    #[test]
    fn test_overlong_word_kept_whole() {
        let long = "x".repeat(120);
        let line = format!("a {} b", long);
        assert_eq!(wrap_line(&line, 95), vec!["a".to_string(), long, "b".to_string()]);
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        // Each word is 3 chars but 6 bytes in UTF-8
        let line = "\u{e9}\u{e9}\u{e9} \u{e9}\u{e9}\u{e9}";
        assert_eq!(wrap_line(line, 7), vec![line]);
    }
}
