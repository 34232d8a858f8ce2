//! Ratatui widgets for the orgdir TUI.

pub mod chip_bar;
pub mod command_bar;
pub mod detail;
pub mod filter_panel;
pub mod help;
pub mod line_input;
pub mod login_form;
pub mod results;
pub mod search_bar;
pub mod tab_bar;

use ratatui::layout::Rect;

/// A `width` x `height` rect centred in `area`, clipped to it.
pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
