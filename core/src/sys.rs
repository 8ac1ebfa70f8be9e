use crate::command::Command;
use crate::infrastructure::runner::{CommandRunner, SystemRunner};
use crate::response::Response;
use crate::service::DisplayService;
use crate::types::config::DmonSettings;
use crate::types::display::{Display, Layout, Mode};
use crate::types::request::{ConfigRequest, ConfigResult, Position, ResolutionMode, Target};


/// Central runtime for dmon. Dispatches each command to the display service
/// and renders the outcome.
pub struct Sys<R: CommandRunner> {
    service: DisplayService<R>,
}


impl Sys<SystemRunner> {
    pub fn from_settings(settings: &DmonSettings) -> Sys<SystemRunner> {
        Sys::new(DisplayService::system(settings))
    }
}


impl<R: CommandRunner> Sys<R> {
    pub fn new(service: DisplayService<R>) -> Sys<R> {
        Sys { service }
    }

    /// The single dispatch method.
    pub fn execute(&self, cmd: Command) -> Response {
        let result = match cmd {
            Command::List { json } => self.cmd_list(json),
            Command::Detect { json } => self.cmd_detect(json),
            Command::Check { json } => self.cmd_check(json),
            Command::Modes { display } => self.cmd_modes(&display),
            Command::Single { mode } => self.cmd_single(mode),
            Command::Dual { mode, position } => self.cmd_dual(mode, position),
            Command::Set { target, mode, position } => self.cmd_set(target, mode, position),
            Command::Help { topic } => Ok(crate::help::help_text(topic.as_deref())),
            Command::Version => Ok(version_text()),
        };
        match result {
            Ok(output) => Response::ok(output),
            Err(message) => Response::error(message),
        }
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    fn cmd_list(&self, json: bool) -> Result<String, String> {
        let displays = self
            .service
            .list_displays()
            .map_err(|e| format!("failed to list displays: {}", e))?;
        if json {
            return to_json(&displays);
        }
        Ok(render_list(&displays))
    }

    fn cmd_detect(&self, json: bool) -> Result<String, String> {
        let displays = self
            .service
            .detect_displays()
            .map_err(|e| format!("display detection failed: {}", e))?;
        if json {
            let connected = displays.iter().filter(|d| d.connected).count();
            return to_json(&serde_json::json!({
                "total": displays.len(),
                "connected": connected,
                "displays": displays,
            }));
        }
        Ok(render_detect(&displays))
    }

    fn cmd_check(&self, json: bool) -> Result<String, String> {
        let layout = self
            .service
            .current_layout()
            .map_err(|e| format!("failed to check displays: {}", e))?;
        if json {
            return to_json(&layout);
        }
        Ok(render_layout(&layout))
    }

    fn cmd_modes(&self, display: &str) -> Result<String, String> {
        let modes = self
            .service
            .supported_modes(display)
            .map_err(|e| format!("failed to get modes: {}", e))?;
        Ok(render_modes(display, &modes))
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    fn cmd_single(&self, mode: ResolutionMode) -> Result<String, String> {
        let result = self
            .service
            .setup_single(mode)
            .map_err(|e| format!("single display setup failed: {}", e))?;
        Ok(render_result("Single display mode (internal only)", &result))
    }

    fn cmd_dual(
        &self,
        mode: ResolutionMode,
        position: Position,
    ) -> Result<String, String> {
        let result = self
            .service
            .setup_dual(mode, position)
            .map_err(|e| format!("dual display setup failed: {}", e))?;
        let headline = format!("Dual display configured ({} mode, {})", mode, position);
        Ok(render_result(&headline, &result))
    }

    fn cmd_set(
        &self,
        target: Target,
        mode: ResolutionMode,
        position: Position,
    ) -> Result<String, String> {
        let request = ConfigRequest { target, mode, position };
        let result = self
            .service
            .configure(&request)
            .map_err(|e| format!("display configuration failed: {}", e))?;
        let headline = match target {
            Target::Both => format!("Display configured ({}, {}, {})", target, mode, position),
            Target::Internal | Target::External => {
                format!("Display configured ({}, {})", target, mode)
            }
        };
        Ok(render_result(&headline, &result))
    }
}


// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("failed to encode JSON: {}", e))
}

fn mode_row(mode: &Mode) -> String {
    let marker = if mode.current {
        "* "
    } else if mode.preferred {
        "+ "
    } else {
        "  "
    };
    format!("    {} {}", marker, mode)
}

fn render_list(displays: &[Display]) -> String {
    if displays.is_empty() {
        return "No displays found".into();
    }
    let mut out = format!("Found {} display(s):\n\n", displays.len());
    for d in displays.iter().filter(|d| d.connected) {
        out.push_str(&format!("▸ {} ({})\n", d.id, d.category));
        if !d.modes.is_empty() {
            out.push_str("  Available modes:\n");
            for m in &d.modes {
                out.push_str(&mode_row(m));
                out.push('\n');
            }
        }
        out.push('\n');
    }
    out.push_str("Legend: * = current, + = preferred");
    out
}

fn render_detect(displays: &[Display]) -> String {
    let connected: Vec<&Display> = displays.iter().filter(|d| d.connected).collect();
    let mut out = String::from("✓ Display scan complete\n");
    out.push_str(&format!("  Total displays: {}\n", displays.len()));
    out.push_str(&format!("  Connected: {}", connected.len()));
    if !connected.is_empty() {
        out.push_str("\n\nConnected displays:\n");
        for d in &connected {
            out.push_str(&format!(
                "  ▸ {} ({}) - {} modes available\n",
                d.id,
                d.category,
                d.modes.len()
            ));
        }
        out.push_str("\nUse 'dmon list' to see detailed mode information");
    }
    out
}

fn render_layout(layout: &Layout) -> String {
    let mut out = String::from("Current Display Layout:\n");
    let mut active = 0;
    for d in layout.active() {
        active += 1;
        let marker = if layout.is_primary(d) { " [PRIMARY]" } else { "" };
        out.push_str(&format!("\n▸ {} ({}){}\n", d.id, d.category, marker));
        if let Some(mode) = &d.current_mode {
            out.push_str(&format!("  Resolution: {}\n", mode));
        }
    }
    if active == 0 {
        out.push_str("\nNo active displays found");
    }
    out.trim_end().to_string()
}

fn render_modes(display: &str, modes: &[Mode]) -> String {
    if modes.is_empty() {
        return format!("{} reports no modes", display);
    }
    let mut out = format!("Modes for {}:\n", display);
    for m in modes {
        out.push_str(&mode_row(m));
        out.push('\n');
    }
    out.push_str("\nLegend: * = current, + = preferred");
    out
}

fn render_result(headline: &str, result: &ConfigResult) -> String {
    let mut out = format!("✓ {}\n\nConfigured displays:", headline);
    for d in &result.displays {
        if d.active {
            out.push_str(&format!("\n  ▸ {} ({}) → {}", d.id, d.category, d.resolution));
        } else {
            out.push_str(&format!("\n  ▸ {} ({}) → off", d.id, d.category));
        }
    }
    out
}

fn version_text() -> String {
    format!(
        "dmon {}\nRuntime: {}/{}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}
