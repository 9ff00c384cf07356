//! Result list.

use crate::ui::helpers::{self, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Draws one row per item starting at `row` and returns the next free row.
pub fn render_results(row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_result_row(current_row, item, theme, cols);
    }
    current_row
}

/// `▸ Title ............ 1989`, padded to the full width so the selection
/// background spans the row.
fn render_result_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg));
        print!("▸ ");
    } else {
        print!("{}  ", Theme::fg(&theme.colors.text_normal));
    }

    helpers::render_highlighted_text(&item.title, &item.highlight_ranges, theme, item.is_selected);

    let used = 2 + text_width(&item.title) + text_width(&item.year) + 1;
    print!("{}", " ".repeat(cols.saturating_sub(used)));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{} ", item.year);

    print!("{}", Theme::reset());
    row + 1
}
