//! Core motion controllers – scroll progress, segment mapping, phase
//! transitions, and the smaller timed effects built on them.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Inputs are
//! plain geometry and `Instant`s; outputs are plain numbers.

pub mod card_stack;
pub mod easing;
pub mod geo;
pub mod lifecycle;
pub mod marquee;
pub mod phase;
pub mod progress;
pub mod rotation;
pub mod segments;
pub mod stl;
pub mod typewriter;
