//! Layout decisions: which mode each display gets and how the displays
//! are arranged.
//!
//! The `select` module resolves a preset or explicit resolution against one
//! display. The `plan` module splits detected displays into internal and
//! external, enforces that the request's displays exist, and turns the
//! selections into xrandr arguments plus the reported result.

pub mod plan;
pub mod select;
