//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: the section stage, a one-line scroll gauge and a
/// bottom status bar.
pub struct AppLayout {
    pub stage_area: Rect,
    pub gauge_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // stage (takes all remaining space)
                Constraint::Length(1), // page scroll gauge
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            stage_area: chunks[0],
            gauge_area: chunks[1],
            status_area: chunks[2],
        }
    }
}
