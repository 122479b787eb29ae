//! Layout definitions for the TUI
//!
//! Entry form on top, expense table below, status bar at the bottom.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the entry form including its border
pub const FORM_HEIGHT: u16 = 7;

/// Layout regions for the TUI
pub struct AppLayout {
    /// Entry form area
    pub form: Rect,
    /// Expense table area
    pub table: Rect,
    /// Status bar at the bottom
    pub status_bar: Rect,
}

impl AppLayout {
    /// Calculate layout from available area
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            form: chunks[0],
            table: chunks[1],
            status_bar: chunks[2],
        }
    }
}

/// Create a fixed-size centered rect for dialogs
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
