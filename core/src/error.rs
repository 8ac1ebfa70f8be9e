//! Error taxonomy shared by every dmon operation.

use std::path::PathBuf;

use thiserror::Error;


#[derive(Debug, Error)]
pub enum DmonError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} failed ({status})\nOutput: {output}")]
    ToolFailed {
        command: String,
        status: String,
        output: String,
    },

    #[error("no internal display found (internal prefixes: {})", .prefixes.join(", "))]
    NoInternalDisplay { prefixes: Vec<String> },

    #[error("no external displays found. Try 'dmon list' to see available displays")]
    NoExternalDisplay,

    #[error(
        "resolution {requested} is not available on {display}. Available modes: {}",
        .available.join(", ")
    )]
    ResolutionUnavailable {
        display: String,
        requested: String,
        available: Vec<String>,
    },

    #[error("invalid resolution '{0}': expected WIDTHxHEIGHT, e.g. 1920x1080")]
    InvalidResolution(String),

    #[error("invalid target: {0} (valid: internal/i, external/e, both/b)")]
    InvalidTarget(String),

    #[error("invalid mode: {0} (valid: normal/n, zoom/z, native/max, or WIDTHxHEIGHT)")]
    InvalidPreset(String),

    #[error("invalid position: {0} (valid: left/l, right/r, above/a, below/b, none)")]
    InvalidPosition(String),

    #[error("display {0} not found")]
    DisplayNotFound(String),

    #[error("failed to load config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}
