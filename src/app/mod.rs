//! Application orchestration: the virtual page, its section controllers,
//! the event loop plumbing and input handling.

pub mod content;
pub mod event;
pub mod handler;
pub mod page;
pub mod sections;
pub mod state;
