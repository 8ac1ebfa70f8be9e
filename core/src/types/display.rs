//! Detected displays and their modes.
//!
//! Every value here is rebuilt from a fresh xrandr query; nothing is
//! mutated after parsing and nothing carries identity across queries.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DmonError;


/// Whether an output is the built-in panel or something plugged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Internal,
    External,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Internal => f.write_str("Internal"),
            Category::External => f.write_str("External"),
        }
    }
}


/// A width/height pair, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Resolution {
        Resolution { width, height }
    }

    pub fn pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for Resolution {
    type Err = DmonError;

    /// Parse `WIDTHxHEIGHT` where both sides are positive decimal integers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DmonError::InvalidResolution(s.to_string());
        let (w, h) = s.trim().split_once('x').ok_or_else(invalid)?;
        if !all_digits(w) || !all_digits(h) {
            return Err(invalid());
        }
        let width: u32 = w.parse().map_err(|_| invalid())?;
        let height: u32 = h.parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Resolution { width, height })
    }
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}


/// One supported width/height/refresh combination of a display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    pub width: u32,
    pub height: u32,
    pub rate: f64,
    pub current: bool,
    pub preferred: bool,
    #[serde(default)]
    pub interlaced: bool,
}

impl Mode {
    pub fn resolution(&self) -> Resolution {
        Resolution::new(self.width, self.height)
    }

    /// The xrandr mode name: `WIDTHxHEIGHT`, with an `i` suffix when
    /// interlaced.
    pub fn name(&self) -> String {
        if self.interlaced {
            format!("{}i", self.resolution())
        } else {
            self.resolution().to_string()
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:.2}Hz", self.name(), self.rate)?;
        if self.current {
            f.write_str("*")?;
        }
        if self.preferred {
            f.write_str("+")?;
        }
        Ok(())
    }
}


/// One output as reported by xrandr.
///
/// `current_mode` is a copy of the first mode flagged active, if any.
/// Disconnected displays never carry modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Display {
    pub id: String,
    pub category: Category,
    pub connected: bool,
    pub modes: Vec<Mode>,
    pub current_mode: Option<Mode>,
}

impl Display {
    /// Mode labels in source order, used when reporting alternatives.
    pub fn mode_labels(&self) -> Vec<String> {
        self.modes.iter().map(|m| m.to_string()).collect()
    }

    pub fn is_active(&self) -> bool {
        self.connected && self.current_mode.is_some()
    }
}


/// All detected displays plus the primary one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub displays: Vec<Display>,
    pub primary: Option<String>,
}

impl Layout {
    /// The primary is the first connected display with an active mode,
    /// in detection order.
    pub fn from_displays(displays: Vec<Display>) -> Layout {
        let primary = displays
            .iter()
            .find(|d| d.is_active())
            .map(|d| d.id.clone());
        Layout { displays, primary }
    }

    pub fn active(&self) -> impl Iterator<Item = &Display> {
        self.displays.iter().filter(|d| d.is_active())
    }

    pub fn is_primary(&self, display: &Display) -> bool {
        self.primary.as_deref() == Some(display.id.as_str())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn mode(width: u32, height: u32, current: bool) -> Mode {
        Mode {
            width,
            height,
            rate: 60.0,
            current,
            preferred: false,
            interlaced: false,
        }
    }

    fn display(id: &str, connected: bool, modes: Vec<Mode>) -> Display {
        let current_mode = modes.iter().find(|m| m.current).cloned();
        Display {
            id: id.into(),
            category: Category::External,
            connected,
            modes,
            current_mode,
        }
    }

    #[test]
    fn resolution_parses_width_and_height() {
        let res: Resolution = "2560x1440".parse().unwrap();
        assert_eq!(res, Resolution::new(2560, 1440));
        assert_eq!(res.to_string(), "2560x1440");
    }

    #[test]
    fn resolution_rejects_wrong_separator() {
        let err = "1920-1200".parse::<Resolution>().unwrap_err();
        assert!(matches!(err, DmonError::InvalidResolution(ref s) if s == "1920-1200"));
        assert!(err.to_string().contains("WIDTHxHEIGHT"));
    }

    #[test]
    fn resolution_rejects_zero_and_garbage() {
        assert!("0x1080".parse::<Resolution>().is_err());
        assert!("1920x".parse::<Resolution>().is_err());
        assert!("axb".parse::<Resolution>().is_err());
        assert!("1920x1080x60".parse::<Resolution>().is_err());
    }

    #[test]
    fn resolution_rejects_signs_and_spaces_inside() {
        for input in ["1920x+1080", "+1920x1080", "1920x-1080", "1920 x1080", "1920x1080i"] {
            let err = input.parse::<Resolution>().unwrap_err();
            assert!(matches!(err, DmonError::InvalidResolution(ref s) if s == input));
        }
    }

    #[test]
    fn mode_label_carries_markers() {
        let mut m = mode(1920, 1200, true);
        m.preferred = true;
        assert_eq!(m.to_string(), "1920x1200@60.00Hz*+");
        assert_eq!(mode(1280, 720, false).to_string(), "1280x720@60.00Hz");
    }

    #[test]
    fn interlaced_mode_name_keeps_suffix() {
        let mut m = mode(1920, 1080, false);
        m.interlaced = true;
        assert_eq!(m.name(), "1920x1080i");
        assert_eq!(m.resolution(), Resolution::new(1920, 1080));
        assert_eq!(m.to_string(), "1920x1080i@60.00Hz");
    }

    #[test]
    fn primary_is_first_active_display() {
        let layout = Layout::from_displays(vec![
            display("DP-1", false, vec![]),
            display("HDMI-1", true, vec![mode(1280, 720, false)]),
            display("HDMI-2", true, vec![mode(1920, 1080, true)]),
            display("DP-2", true, vec![mode(2560, 1440, true)]),
        ]);
        assert_eq!(layout.primary.as_deref(), Some("HDMI-2"));
        assert_eq!(layout.active().count(), 2);
    }

    #[test]
    fn no_primary_without_active_mode() {
        let layout =
            Layout::from_displays(vec![display("HDMI-1", true, vec![mode(1280, 720, false)])]);
        assert_eq!(layout.primary, None);
    }
}
