//! Configuration requests and what was applied in response to them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DmonError;
use crate::types::display::{Category, Resolution};


/// Which displays a configuration turns on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Internal,
    External,
    Both,
}

impl FromStr for Target {
    type Err = DmonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" | "i" => Ok(Target::Internal),
            "external" | "e" => Ok(Target::External),
            "both" | "b" => Ok(Target::Both),
            _ => Err(DmonError::InvalidTarget(s.to_string())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Internal => f.write_str("internal"),
            Target::External => f.write_str("external"),
            Target::Both => f.write_str("both"),
        }
    }
}


/// Named resolution presets. The numeric target depends on the category
/// of the display it is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Normal,
    Zoom,
    Native,
}

impl Preset {
    /// Exact resolution this preset asks for, or `None` for `Native`,
    /// which always takes the largest mode.
    pub fn target(self, category: Category) -> Option<Resolution> {
        match (self, category) {
            (Preset::Normal, Category::Internal) => Some(Resolution::new(1920, 1200)),
            (Preset::Normal, Category::External) => Some(Resolution::new(1920, 1080)),
            (Preset::Zoom, Category::Internal) => Some(Resolution::new(1600, 1000)),
            (Preset::Zoom, Category::External) => Some(Resolution::new(1280, 720)),
            (Preset::Native, _) => None,
        }
    }
}

impl FromStr for Preset {
    type Err = DmonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" | "n" => Ok(Preset::Normal),
            "zoom" | "z" => Ok(Preset::Zoom),
            "native" | "max" => Ok(Preset::Native),
            _ => Err(DmonError::InvalidPreset(s.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Normal => f.write_str("normal"),
            Preset::Zoom => f.write_str("zoom"),
            Preset::Native => f.write_str("native"),
        }
    }
}


/// Either a named preset or a literal `WIDTHxHEIGHT` that must exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ResolutionMode {
    Preset(Preset),
    Explicit(Resolution),
}

impl Default for ResolutionMode {
    fn default() -> Self {
        ResolutionMode::Preset(Preset::Normal)
    }
}

impl FromStr for ResolutionMode {
    type Err = DmonError;

    /// Anything starting with a digit is an explicit resolution and must
    /// be well formed; everything else must name a preset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with(|c: char| c.is_ascii_digit()) {
            return s.parse().map(ResolutionMode::Explicit);
        }
        s.parse().map(ResolutionMode::Preset)
    }
}

impl TryFrom<String> for ResolutionMode {
    type Error = DmonError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResolutionMode> for String {
    fn from(mode: ResolutionMode) -> String {
        mode.to_string()
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionMode::Preset(p) => fmt::Display::fmt(p, f),
            ResolutionMode::Explicit(r) => fmt::Display::fmt(r, f),
        }
    }
}


/// Where the internal display sits relative to the external one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[default]
    None,
    Left,
    Right,
    Above,
    Below,
}

impl FromStr for Position {
    type Err = DmonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" | "l" => Ok(Position::Left),
            "right" | "r" => Ok(Position::Right),
            "above" | "a" => Ok(Position::Above),
            "below" | "b" => Ok(Position::Below),
            "none" | "" => Ok(Position::None),
            _ => Err(DmonError::InvalidPosition(s.to_string())),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::None => f.write_str("none"),
            Position::Left => f.write_str("left"),
            Position::Right => f.write_str("right"),
            Position::Above => f.write_str("above"),
            Position::Below => f.write_str("below"),
        }
    }
}


/// A requested layout. `position` only matters when `target` is `Both`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRequest {
    pub target: Target,
    pub mode: ResolutionMode,
    pub position: Position,
}


/// One display as it was applied. `resolution` is empty for a display
/// that was switched off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredDisplay {
    pub id: String,
    pub category: Category,
    pub resolution: String,
    pub active: bool,
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigResult {
    pub displays: Vec<ConfiguredDisplay>,
    pub request: ConfigRequest,
}

impl ConfigResult {
    pub fn active(&self) -> impl Iterator<Item = &ConfiguredDisplay> {
        self.displays.iter().filter(|d| d.active)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_target_names() {
        assert_eq!("i".parse::<Target>().unwrap(), Target::Internal);
        assert_eq!("external".parse::<Target>().unwrap(), Target::External);
        assert_eq!("b".parse::<Target>().unwrap(), Target::Both);
        assert!(matches!("side".parse::<Target>(), Err(DmonError::InvalidTarget(_))));
    }

    #[test]
    fn preset_targets_depend_on_category() {
        assert_eq!(Preset::Normal.target(Category::Internal), Some(Resolution::new(1920, 1200)));
        assert_eq!(Preset::Normal.target(Category::External), Some(Resolution::new(1920, 1080)));
        assert_eq!(Preset::Zoom.target(Category::Internal), Some(Resolution::new(1600, 1000)));
        assert_eq!(Preset::Zoom.target(Category::External), Some(Resolution::new(1280, 720)));
        assert_eq!(Preset::Native.target(Category::External), None);
    }

    #[test]
    fn mode_argument_is_preset_or_explicit() {
        assert_eq!(
            "max".parse::<ResolutionMode>().unwrap(),
            ResolutionMode::Preset(Preset::Native)
        );
        assert_eq!(
            "2560x1440".parse::<ResolutionMode>().unwrap(),
            ResolutionMode::Explicit(Resolution::new(2560, 1440))
        );
        assert!(matches!(
            "1920-1200".parse::<ResolutionMode>(),
            Err(DmonError::InvalidResolution(_))
        ));
        assert!(matches!("huge".parse::<ResolutionMode>(), Err(DmonError::InvalidPreset(_))));
    }

    #[test]
    fn position_b_means_below() {
        assert_eq!("b".parse::<Position>().unwrap(), Position::Below);
        assert_eq!("".parse::<Position>().unwrap(), Position::None);
        assert!("behind".parse::<Position>().is_err());
    }

    #[test]
    fn request_serializes_mode_as_text() {
        let req = ConfigRequest {
            target: Target::Both,
            mode: ResolutionMode::Explicit(Resolution::new(1920, 1080)),
            position: Position::Left,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"mode\":\"1920x1080\""));
        assert!(json.contains("\"target\":\"both\""));
    }
}
