//! xrandr text format: parse `xrandr --query` and build configure arguments.
//!
//! Parsing is a single line-oriented pass. A header line
//! `<id> connected|disconnected ...` opens a display; indented mode lines
//! `<W>x<H>  <rate>[*][+] [<rate>[*][+] ...]` attach to the open display
//! while it is connected. Everything else is skipped.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::types::config::DmonSettings;
use crate::types::display::{Category, Display, Mode};
use crate::types::request::Position;

/// Argument passed to xrandr to list outputs and modes.
pub const QUERY_FLAG: &str = "--query";

/// Resolution returned by the selector when a display lists no modes.
pub const AUTO_MODE: &str = "auto";

lazy_static! {
    static ref DISPLAY_LINE: Regex =
        Regex::new(r"^(\S+)\s+(connected|disconnected)").unwrap();
    static ref MODE_LINE: Regex = Regex::new(r"^\s+(\d+)x(\d+)(i?)\s+([0-9].*)$").unwrap();
    static ref RATE: Regex = Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*([*+]*)").unwrap();
}


/// Decides `Category` from an output name prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    prefixes: Vec<String>,
}

impl Classifier {
    pub fn new(prefixes: Vec<String>) -> Classifier {
        Classifier { prefixes }
    }

    pub fn classify(&self, id: &str) -> Category {
        if self.prefixes.iter().any(|p| id.starts_with(p.as_str())) {
            Category::Internal
        } else {
            Category::External
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new(DmonSettings::default().internal_prefixes)
    }
}


/// Parse `xrandr --query` output into displays, in first-seen order.
pub fn parse_query(output: &str, classifier: &Classifier) -> Vec<Display> {
    let mut displays = Vec::new();
    let mut open: Option<Display> = None;

    for line in output.lines() {
        if let Some(caps) = DISPLAY_LINE.captures(line) {
            if let Some(done) = open.take() {
                displays.push(done);
            }
            let id = caps[1].to_string();
            open = Some(Display {
                category: classifier.classify(&id),
                connected: &caps[2] == "connected",
                id,
                modes: Vec::new(),
                current_mode: None,
            });
            continue;
        }

        let display = match open.as_mut() {
            Some(d) if d.connected => d,
            _ => continue,
        };
        match parse_mode_line(line) {
            Some(mode) => {
                if mode.current && display.current_mode.is_none() {
                    display.current_mode = Some(mode.clone());
                }
                display.modes.push(mode);
            }
            None => {
                if !line.trim().is_empty() {
                    debug!("skipping line under {}: {:?}", display.id, line);
                }
            }
        }
    }

    if let Some(done) = open.take() {
        displays.push(done);
    }
    displays
}


/// Parse one indented mode line. The rate is the active one if the line
/// has a `*`, otherwise the first listed.
fn parse_mode_line(line: &str) -> Option<Mode> {
    let caps = MODE_LINE.captures(line)?;
    let width: u32 = caps[1].parse().ok()?;
    let height: u32 = caps[2].parse().ok()?;
    if width == 0 || height == 0 {
        return None;
    }

    let mut first_rate = None;
    let mut active_rate = None;
    let mut preferred = false;
    for rate in RATE.captures_iter(&caps[4]) {
        let value: f64 = match rate[1].parse() {
            Ok(v) => v,
            Err(_) => continue,
        };
        let flags = &rate[2];
        first_rate.get_or_insert(value);
        if flags.contains('*') {
            active_rate.get_or_insert(value);
        }
        if flags.contains('+') {
            preferred = true;
        }
    }

    let rate = active_rate.or(first_rate)?;
    if rate <= 0.0 {
        return None;
    }
    Some(Mode {
        width,
        height,
        rate,
        current: active_rate.is_some(),
        preferred,
        interlaced: &caps[3] == "i",
    })
}


/// One output switched on at a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSetting {
    pub id: String,
    pub resolution: String,
}

impl OutputSetting {
    pub fn new(id: &str, resolution: &str) -> OutputSetting {
        OutputSetting {
            id: id.to_string(),
            resolution: resolution.to_string(),
        }
    }
}


/// A resolved layout, ready to turn into xrandr arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arrangement {
    InternalOnly {
        internal: OutputSetting,
    },
    ExternalOnly {
        external: OutputSetting,
        /// Internal outputs to switch off.
        internals: Vec<String>,
    },
    Both {
        external: OutputSetting,
        internal: OutputSetting,
        position: Position,
    },
}


/// Builds an xrandr argument list, one `--output` block at a time.
#[derive(Debug, Clone, Default)]
pub struct XrandrArgs {
    args: Vec<String>,
}

impl XrandrArgs {
    pub fn new() -> Self {
        XrandrArgs { args: Vec::new() }
    }

    pub fn output(mut self, id: &str) -> Self {
        self.args.push("--output".into());
        self.args.push(id.into());
        self
    }

    /// `--mode <res>`, or `--auto` for the `auto` sentinel.
    pub fn mode(mut self, resolution: &str) -> Self {
        if resolution == AUTO_MODE {
            self.args.push("--auto".into());
        } else {
            self.args.push("--mode".into());
            self.args.push(resolution.into());
        }
        self
    }

    pub fn primary(mut self) -> Self {
        self.args.push("--primary".into());
        self
    }

    pub fn off(mut self) -> Self {
        self.args.push("--off".into());
        self
    }

    /// Place the current output relative to `anchor`. `None` means right-of.
    pub fn relative_to(mut self, position: Position, anchor: &str) -> Self {
        let flag = match position {
            Position::Left => "--left-of",
            Position::Right | Position::None => "--right-of",
            Position::Above => "--above",
            Position::Below => "--below",
        };
        self.args.push(flag.into());
        self.args.push(anchor.into());
        self
    }

    pub fn build(self) -> Vec<String> {
        self.args
    }
}


/// Arguments for applying `arrangement`. Pure; performs no I/O.
pub fn build_args(arrangement: &Arrangement) -> Vec<String> {
    match arrangement {
        Arrangement::InternalOnly { internal } => XrandrArgs::new()
            .output(&internal.id)
            .mode(&internal.resolution)
            .primary()
            .build(),
        Arrangement::ExternalOnly { external, internals } => internals
            .iter()
            .fold(
                XrandrArgs::new()
                    .output(&external.id)
                    .mode(&external.resolution)
                    .primary(),
                |args, id| args.output(id).off(),
            )
            .build(),
        Arrangement::Both {
            external,
            internal,
            position,
        } => XrandrArgs::new()
            .output(&external.id)
            .mode(&external.resolution)
            .primary()
            .output(&internal.id)
            .mode(&internal.resolution)
            .relative_to(*position, &external.id)
            .build(),
    }
}
