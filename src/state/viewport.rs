//! Visible-window arithmetic for the game list and the detail pane.

/// Rows one game card takes: rounded border plus status, away, home, venue
/// and kickoff lines.
pub const GAME_CARD_HEIGHT: u16 = 7;

/// Rows around the game list that are not cards: header bar (3), list status
/// line (1) and help footer (1).
pub const LIST_CHROME: u16 = 5;

/// How many items of `per_item` rows fit in `height` once `reserved` rows are
/// taken. Never less than one.
pub fn visible_count(height: u16, reserved: u16, per_item: u16) -> usize {
    let per_item = per_item.max(1);
    usize::from(height.saturating_sub(reserved) / per_item).max(1)
}

/// Largest offset that still fills the window.
pub fn max_offset(total: usize, visible: usize) -> usize {
    total.saturating_sub(visible)
}

/// Move `offset` by the least amount that keeps `cursor` inside
/// `[offset, offset + visible)`, then clamp to [`max_offset`].
pub fn follow_cursor(offset: usize, cursor: usize, visible: usize, total: usize) -> usize {
    let visible = visible.max(1);
    let offset = if cursor < offset {
        cursor
    } else if cursor >= offset + visible {
        cursor + 1 - visible
    } else {
        offset
    };
    offset.min(max_offset(total, visible))
}

/// Render-time clamp for free-scrolling content.
pub fn clamp_offset(offset: usize, total_lines: usize, available_lines: usize) -> usize {
    offset.min(max_offset(total_lines, available_lines))
}
