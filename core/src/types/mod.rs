//! Data model shared by the parser, selector, planner, and facade.

pub mod config;
pub mod display;
pub mod request;
