//! Pane components.
//!
//! ```text
//! [blank]
//! [Header]
//! [Border]
//! [Search bar, 3 rows]
//! [Results list | status message | detail pane]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod footer;
mod header;
mod results;
mod search;
mod status;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ResultsBody, UIViewModel};

use detail::render_detail;
use footer::render_footer;
use header::render_header;
use results::render_results;
use search::render_search_bar;
use status::render_status;

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset());
    row + 1
}

/// Draws one full frame. The detail pane, when open, takes the place of the
/// results area.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    let footer_row = rows.saturating_sub(1).max(current_row + 1);
    let border_row = footer_row - 1;

    match (&vm.detail, &vm.body) {
        (Some(detail), _) => render_detail(current_row, border_row, detail, theme, cols),
        (None, ResultsBody::List { items, .. }) => {
            render_results(current_row, items, theme, cols);
        }
        (None, ResultsBody::Message(status)) => render_status(current_row, status, theme, cols),
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, &vm.footer, theme, cols);
}
