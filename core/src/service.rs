//! Display service: every user-facing operation as detect, then act.
//!
//! Each call re-queries xrandr; nothing is cached between calls. The process
//! runner is injected so the service can be driven by canned output.

use log::{debug, error, info};

use crate::error::DmonError;
use crate::infrastructure::runner::{CommandRunner, SystemRunner};
use crate::infrastructure::xrandr::{parse_query, Classifier, QUERY_FLAG};
use crate::layout::plan::plan;
use crate::types::config::DmonSettings;
use crate::types::display::{Display, Layout, Mode};
use crate::types::request::{ConfigRequest, ConfigResult, Position, ResolutionMode, Target};


pub struct DisplayService<R: CommandRunner> {
    runner: R,
    program: String,
    classifier: Classifier,
}


impl DisplayService<SystemRunner> {
    /// A service that runs the real xrandr named in `settings`.
    pub fn system(settings: &DmonSettings) -> Self {
        DisplayService::new(SystemRunner, settings)
    }
}


impl<R: CommandRunner> DisplayService<R> {
    pub fn new(runner: R, settings: &DmonSettings) -> Self {
        DisplayService {
            runner,
            program: settings.xrandr_path.clone(),
            classifier: Classifier::new(settings.internal_prefixes.clone()),
        }
    }

    /// Query xrandr and parse its report.
    pub fn detect_displays(&self) -> Result<Vec<Display>, DmonError> {
        debug!("detecting displays via {} {}", self.program, QUERY_FLAG);
        let args = [QUERY_FLAG.to_string()];
        let output = self.runner.run(&self.program, &args)?;
        if !output.success {
            let combined = output.combined();
            error!("{} {} failed: {}", self.program, QUERY_FLAG, combined);
            return Err(DmonError::ToolFailed {
                command: command_line(&self.program, &args),
                status: output.status,
                output: combined,
            });
        }

        let displays = parse_query(&output.stdout, &self.classifier);
        let connected = displays.iter().filter(|d| d.connected).count();
        info!("displays detected: total={} connected={}", displays.len(), connected);
        for d in &displays {
            debug!(
                "display id={} type={} connected={} modes={}",
                d.id,
                d.category,
                d.connected,
                d.modes.len()
            );
        }
        Ok(displays)
    }

    pub fn list_displays(&self) -> Result<Vec<Display>, DmonError> {
        info!("listing displays");
        self.detect_displays()
    }

    pub fn current_layout(&self) -> Result<Layout, DmonError> {
        info!("checking current display layout");
        Ok(Layout::from_displays(self.detect_displays()?))
    }

    pub fn supported_modes(&self, display_id: &str) -> Result<Vec<Mode>, DmonError> {
        debug!("getting supported modes for {}", display_id);
        self.detect_displays()?
            .into_iter()
            .find(|d| d.id == display_id)
            .map(|d| d.modes)
            .ok_or_else(|| DmonError::DisplayNotFound(display_id.to_string()))
    }

    /// Detect, plan, and apply `request`. On xrandr failure the error holds
    /// the attempted command line and xrandr's own output.
    pub fn configure(&self, request: &ConfigRequest) -> Result<ConfigResult, DmonError> {
        info!(
            "configuring displays: target={} mode={} position={}",
            request.target, request.mode, request.position
        );
        let displays = self.detect_displays()?;
        let plan = plan(&displays, request, &self.classifier)?;

        let command = command_line(&self.program, &plan.args);
        debug!("executing: {}", command);
        let output = self.runner.run(&self.program, &plan.args)?;
        if !output.success || !output.stderr.trim().is_empty() {
            let combined = output.combined();
            error!("xrandr configuration failed: {}", combined);
            return Err(DmonError::ToolFailed {
                command,
                status: output.status,
                output: combined,
            });
        }

        info!("display configuration applied");
        Ok(plan.result)
    }

    /// Internal display only.
    pub fn setup_single(&self, mode: ResolutionMode) -> Result<ConfigResult, DmonError> {
        self.configure(&ConfigRequest {
            target: Target::Internal,
            mode,
            position: Position::None,
        })
    }

    /// External primary with the internal display placed at `position`.
    pub fn setup_dual(
        &self,
        mode: ResolutionMode,
        position: Position,
    ) -> Result<ConfigResult, DmonError> {
        self.configure(&ConfigRequest {
            target: Target::Both,
            mode,
            position,
        })
    }
}


fn command_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}
