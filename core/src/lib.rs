//! dmon core: detect displays through xrandr, pick modes, and apply layouts.
//!
//! The CLI builds a `Command`, hands it to `Sys`, and prints the `Response`.
//! Everything that talks to xrandr goes through the `CommandRunner`
//! capability so the whole pipeline can run against canned text in tests.

pub mod command;
pub mod error;
pub mod help;
pub mod infrastructure;
pub mod layout;
pub mod response;
pub mod service;
pub mod sys;
pub mod types;

pub use error::DmonError;
