//! Mode selector: pick the resolution to apply to one display.
//!
//! Presets look for an exact width/height match first (source order, first
//! match wins). Without one, the display's current mode is kept; without a
//! current mode, the largest mode by pixel area is used; with no modes at
//! all, `auto`. Explicit resolutions never fall back.

use log::{debug, warn};

use crate::error::DmonError;
use crate::infrastructure::xrandr::AUTO_MODE;
use crate::types::display::{Display, Mode, Resolution};
use crate::types::request::{Preset, ResolutionMode};


/// Resolve `mode` against `display`, returning an xrandr mode name or
/// `auto`.
pub fn select_resolution(display: &Display, mode: &ResolutionMode) -> Result<String, DmonError> {
    match mode {
        ResolutionMode::Preset(preset) => Ok(select_preset(display, *preset)),
        ResolutionMode::Explicit(res) => select_explicit(display, *res),
    }
}


pub fn select_preset(display: &Display, preset: Preset) -> String {
    let target = match preset.target(display.category) {
        Some(t) => t,
        None => return largest_mode(display),
    };

    if let Some(mode) = display.modes.iter().find(|m| m.resolution() == target) {
        debug!("{}: {} preset matched {}", display.id, preset, mode);
        return mode.name();
    }

    if let Some(current) = &display.current_mode {
        warn!(
            "{}: target resolution {} not available, keeping current mode {}",
            display.id,
            target,
            current.name()
        );
        return current.name();
    }

    largest_mode(display)
}


/// An explicit resolution must be listed exactly; the error carries every
/// mode the display does offer.
pub fn select_explicit(display: &Display, res: Resolution) -> Result<String, DmonError> {
    if let Some(mode) = display.modes.iter().find(|m| m.resolution() == res) {
        return Ok(mode.name());
    }
    Err(DmonError::ResolutionUnavailable {
        display: display.id.clone(),
        requested: res.to_string(),
        available: display.mode_labels(),
    })
}


/// Largest mode by pixel area, earliest on ties, or `auto` if none.
pub fn largest_mode(display: &Display) -> String {
    let mut best: Option<&Mode> = None;
    for mode in &display.modes {
        let pixels = mode.resolution().pixels();
        if best.map_or(true, |b| pixels > b.resolution().pixels()) {
            best = Some(mode);
        }
    }
    match best {
        Some(mode) => mode.name(),
        None => AUTO_MODE.to_string(),
    }
}
