//! Process execution capability.
//!
//! `DisplayService` never spawns processes directly; it asks a
//! `CommandRunner`. Production code uses `SystemRunner`; tests substitute a
//! runner that returns canned xrandr text.

use std::process::Command;

use log::debug;

use crate::error::DmonError;


/// Captured result of one external invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolOutput {
    pub success: bool,
    /// Human-readable exit status, e.g. "exit status: 1".
    pub status: String,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    /// Stdout and stderr joined, trimmed, for error reports.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.trim_end().to_string();
        let err = self.stderr.trim_end();
        if !err.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(err);
        }
        out
    }
}


pub trait CommandRunner {
    /// Run `program` with `args` to completion. Only failure to start the
    /// process is an `Err`; exit status is reported in `ToolOutput`.
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput, DmonError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput, DmonError> {
        (**self).run(program, args)
    }
}


/// Runs real processes via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput, DmonError> {
        debug!("exec: {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| DmonError::Spawn {
                program: program.to_string(),
                source,
            })?;
        Ok(ToolOutput {
            success: output.status.success(),
            status: output.status.to_string(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
