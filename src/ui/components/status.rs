//! Centered status message for the results area.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::StatusMessage;

/// Draws the message two rows below `row`, with its subtitle under it.
pub fn render_status(row: usize, status: &StatusMessage, theme: &Theme, cols: usize) {
    if status.message.is_empty() {
        return;
    }

    let color = if status.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.status_fg
    };
    centered_line(row + 2, &status.message, &Theme::fg(color), cols);

    if !status.subtitle.is_empty() {
        let style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
        centered_line(row + 3, &status.subtitle, &style, cols);
    }
}

fn centered_line(row: usize, text: &str, style: &str, cols: usize) {
    let text: String = text.chars().take(cols).collect();
    let len = text_width(&text);
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{style}{}{text}{}", " ".repeat(padding), " ".repeat(cols.saturating_sub(padding + len)));
    print!("{}", Theme::reset());
}
