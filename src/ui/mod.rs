//! UI / rendering layer: everything that touches Ratatui widgets.
//!
//! This layer takes the section controllers and turns their visual state
//! into cells on the terminal.  No timers are advanced here.

pub mod blit;
pub mod dome_widget;
pub mod globe_widget;
pub mod layout;
pub mod panels;
pub mod smooth_scroll;
pub mod stage;
pub mod story_widget;
pub mod theme;
pub mod timeline_widget;
pub mod tribute_widget;
