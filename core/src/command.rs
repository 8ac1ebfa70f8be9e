//! Command: the typed interface for all dmon operations.

use serde::{Deserialize, Serialize};

use crate::types::request::{Position, ResolutionMode, Target};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "command")]
pub enum Command {
    // -----------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------

    #[serde(rename = "list")]
    List {
        #[serde(default)]
        json: bool,
    },

    #[serde(rename = "detect")]
    Detect {
        #[serde(default)]
        json: bool,
    },

    #[serde(rename = "check")]
    Check {
        #[serde(default)]
        json: bool,
    },

    #[serde(rename = "modes")]
    Modes {
        display: String,
    },

    // -----------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------

    #[serde(rename = "single")]
    Single {
        #[serde(default)]
        mode: ResolutionMode,
    },

    #[serde(rename = "dual")]
    Dual {
        #[serde(default)]
        mode: ResolutionMode,
        #[serde(default = "default_dual_position")]
        position: Position,
    },

    #[serde(rename = "set")]
    Set {
        target: Target,
        mode: ResolutionMode,
        #[serde(default = "default_dual_position")]
        position: Position,
    },

    // -----------------------------------------------------------------
    // Help / Version
    // -----------------------------------------------------------------

    #[serde(rename = "help")]
    Help {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
    },

    #[serde(rename = "version")]
    Version,
}


fn default_dual_position() -> Position {
    Position::Right
}
