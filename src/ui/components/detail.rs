//! Detail pane for the selected movie.

use crate::ui::helpers::{position_cursor, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

const INDENT: usize = 2;

/// Fills rows `row..last_row` with the movie's title, release date, poster
/// link and wrapped overview. Overview lines that don't fit are dropped.
pub fn render_detail(row: usize, last_row: usize, detail: &DetailInfo, theme: &Theme, cols: usize) {
    let indent = " ".repeat(INDENT);
    let width = cols.saturating_sub(INDENT * 2);
    let mut current_row = row + 1;

    let mut line = |text: &str, style: String| {
        if current_row < last_row {
            position_cursor(current_row, 1);
            let text: String = text.chars().take(width).collect();
            print!("{indent}{style}{text}{}", Theme::reset());
        }
        current_row += 1;
    };

    line(
        &detail.title,
        format!("{}{}", Theme::bold(), Theme::fg(&theme.colors.accent_fg)),
    );
    line(&detail.release_date, Theme::fg(&theme.colors.text_dim));
    if let Some(url) = &detail.poster_url {
        line(url, format!("{}{}", Theme::italic(), Theme::fg(&theme.colors.text_dim)));
    }
    line("", String::new());

    match &detail.overview {
        Some(overview) => {
            for text in wrap_text(overview, width) {
                line(&text, Theme::fg(&theme.colors.text_normal));
            }
        }
        None => line("No overview available.", format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim))),
    }
}
