//! Rendering entry point.

use crate::app::AppState;
use crate::ui::components;

/// Draws the whole pane to stdout.
///
/// The runtime calls this from `render` after every state change that asked
/// for a redraw; it never mutates state.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_frame(&viewmodel, &state.theme, rows, cols);
}
