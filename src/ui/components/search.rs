//! Search input box.

use crate::ui::helpers::{position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

const SEARCH_BOX_MARGIN: usize = 2;

/// Draws a three-line bordered box holding the query and, right-aligned, the
/// activity hint. Returns the row after the box.
///
/// ```text
///   ┌──────────────────────────────┐
///   │ Search: batm    searching... │
///   └──────────────────────────────┘
/// ```
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = Theme::fg(&theme.colors.search_bar_border);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);

    position_cursor(row, 1);
    print!("{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset());

    let activity = search.activity.as_deref().map(|a| format!("{a} ")).unwrap_or_default();
    let activity_len = text_width(&activity);
    let query_room = inner_width.saturating_sub(activity_len);

    // Long queries scroll so the end stays visible.
    let prompt = format!(" Search: {}", search.query);
    let prompt_len = text_width(&prompt);
    let shown: String = if prompt_len > query_room {
        prompt.chars().skip(prompt_len - query_room).collect()
    } else {
        prompt
    };
    let padding = inner_width.saturating_sub(text_width(&shown) + activity_len);

    position_cursor(row + 1, 1);
    print!("{margin}{border}│");
    print!("{}{shown}", Theme::fg(&theme.colors.text_normal));
    print!("{}", " ".repeat(padding));
    print!("{}{}{activity}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print!("{}{border}│{}", Theme::reset(), Theme::reset());

    position_cursor(row + 2, 1);
    print!("{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset());

    row + 3
}
