//! Shared rendering helpers.
//!
//! All widths and ranges are in characters, not bytes.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `row`/`col`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Prints `text` with the given `(start, end)` character ranges in the match
/// highlight colors.
///
/// Selected rows print plain so highlights don't fight the selection
/// background.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        print!("{}", chars[current_pos..start].iter().collect::<String>());
        print!(
            "{}{}{}",
            Theme::fg(&theme.colors.match_highlight_fg),
            Theme::bg(&theme.colors.match_highlight_bg),
            chars[start..end].iter().collect::<String>()
        );
        print!("{}{}", Theme::reset(), Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    print!("{}", chars[current_pos..].iter().collect::<String>());
}

/// Character count, used as display width.
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Greedy word wrap to `width` columns. Words longer than a line are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let line_width = text_width(&line);
        if line_width > 0 && line_width + 1 + word.len() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.extend(word);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_text("Gotham's caped vigilante faces the Joker.", 16),
            vec!["Gotham's caped", "vigilante faces", "the Joker."]
        );
    }

    #[test]
    fn splits_words_longer_than_a_line() {
        assert_eq!(wrap_text("a abcdefghij b", 4), vec!["a", "abcd", "efgh", "ij b"]);
    }

    #[test]
    fn collapses_whitespace_and_handles_empty_input() {
        assert_eq!(wrap_text("  one \n two  ", 20), vec!["one two"]);
        assert!(wrap_text("   ", 10).is_empty());
    }

    #[test]
    fn width_counts_characters() {
        assert_eq!(text_width("Amélie"), 6);
    }
}
