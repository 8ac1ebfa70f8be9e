//! External tool plumbing: process execution and the xrandr text format.

pub mod runner;
pub mod xrandr;
