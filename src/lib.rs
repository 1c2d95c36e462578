//! Scroll-driven animation core for the MyKolachi heritage page, plus a
//! terminal preview that drives it.
//!
//! [`core`] holds the UI-independent pieces: scroll progress, segment
//! mapping, the phase state machine and their supporting timers.  [`app`]
//! and [`ui`] lay the page out in virtual pixels and draw it with Ratatui.

pub mod app;
pub mod config;
pub mod core;
pub mod ui;
