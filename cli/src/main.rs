//! dmon CLI: the command-line entry point.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::process;

use dmon_core::command::Command;
use dmon_core::response::Response;
use dmon_core::sys::Sys;
use dmon_core::types::config::DmonSettings;
use dmon_core::types::request::{Position, ResolutionMode};
use log::{LevelFilter, Log, Metadata, Record};


#[derive(Debug, PartialEq)]
struct Invocation {
    verbose: bool,
    cmd: Command,
}


fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let arg_refs: Vec<&str> = args.iter().map(|s| s.as_str()).collect();

    let invocation = match parse_args(&arg_refs) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("dmon: {}", e);
            process::exit(1);
        }
    };

    let config_path = resolve_config_dir().join("config.yaml");
    let settings = match DmonSettings::load(&config_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("dmon: {}", e);
            process::exit(1);
        }
    };

    let filters = std::env::var("DMON_LOG").ok();
    if let Err(e) = init_logging(invocation.verbose, &settings, filters.as_deref()) {
        eprintln!("dmon: {}", e);
        process::exit(1);
    }
    log::debug!("config: {}", config_path.display());

    let sys = Sys::from_settings(&settings);
    match sys.execute(invocation.cmd) {
        Response::Ok { output } => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Response::Error { message } => {
            eprintln!("dmon error: {}", message);
            process::exit(1);
        }
    }
}


fn resolve_config_dir() -> PathBuf {
    config_dir(
        std::env::var("DMON_CONFIG_DIR").ok(),
        std::env::var("HOME").ok(),
    )
}


/// `$DMON_CONFIG_DIR` when set, else `$HOME/.config/dmon`.
fn config_dir(override_dir: Option<String>, home: Option<String>) -> PathBuf {
    if let Some(dir) = override_dir {
        return PathBuf::from(dir);
    }
    let home = home.unwrap_or_else(|| "/tmp".into());
    PathBuf::from(home).join(".config").join("dmon")
}


/// Terminal logger plus an optional append-only file logger. Each keeps its
/// own level, so warnings still reach stderr while the file takes debug.
struct SplitLogger {
    terminal: env_logger::Logger,
    file: Option<env_logger::Logger>,
}

impl SplitLogger {
    fn max_level(&self) -> LevelFilter {
        let file = self.file.as_ref().map_or(LevelFilter::Off, |f| f.filter());
        self.terminal.filter().max(file)
    }
}

impl Log for SplitLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.terminal.enabled(metadata)
            || self.file.as_ref().map_or(false, |f| f.enabled(metadata))
    }

    fn log(&self, record: &Record<'_>) {
        self.terminal.log(record);
        if let Some(file) = &self.file {
            file.log(record);
        }
    }

    fn flush(&self) {
        self.terminal.flush();
        if let Some(file) = &self.file {
            file.flush();
        }
    }
}


/// Warnings to stderr by default, debug with `-v`, and `filters` (from
/// `DMON_LOG`) override the terminal level. A configured log file is
/// appended to at debug level.
fn build_logger(
    verbose: bool,
    settings: &DmonSettings,
    filters: Option<&str>,
) -> Result<SplitLogger, String> {
    let mut terminal = env_logger::Builder::new();
    terminal.filter_level(if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    });
    terminal.format_timestamp(None);
    if let Some(filters) = filters {
        terminal.parse_filters(filters);
    }

    let file = match &settings.log_file {
        Some(path) => {
            let handle = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| format!("failed to open log file {}: {}", path.display(), e))?;
            let mut builder = env_logger::Builder::new();
            builder.filter_level(LevelFilter::Debug);
            builder.target(env_logger::Target::Pipe(Box::new(handle)));
            Some(builder.build())
        }
        None => None,
    };

    Ok(SplitLogger {
        terminal: terminal.build(),
        file,
    })
}


fn init_logging(
    verbose: bool,
    settings: &DmonSettings,
    filters: Option<&str>,
) -> Result<(), String> {
    let logger = build_logger(verbose, settings, filters)?;
    let max_level = logger.max_level();
    log::set_boxed_logger(Box::new(logger)).map_err(|e| e.to_string())?;
    log::set_max_level(max_level);
    Ok(())
}


fn parse_args(args: &[&str]) -> Result<Invocation, String> {
    let verbose = args.iter().any(|a| *a == "-v" || *a == "--verbose");
    let args: Vec<&str> = args
        .iter()
        .copied()
        .filter(|a| *a != "-v" && *a != "--verbose")
        .collect();

    if args.is_empty() {
        return Err("No command specified. Run 'dmon help' for usage.".into());
    }

    let json = has_flag(&args, "--json");
    let pos = positionals(&args);

    let cmd = match args[0] {
        "list" => Command::List { json },
        "detect" => Command::Detect { json },
        "check" => Command::Check { json },
        "modes" => {
            let display = pos.get(1).ok_or("Usage: dmon modes <display>")?;
            Command::Modes {
                display: display.to_string(),
            }
        }
        "single" => Command::Single {
            mode: parse_mode(pos.get(1))?,
        },
        "dual" => Command::Dual {
            mode: parse_mode(pos.get(1))?,
            position: parse_position(pos.get(2))?,
        },
        "set" => {
            if pos.len() < 3 {
                return Err("Usage: dmon set <target> <mode> [position]".into());
            }
            Command::Set {
                target: pos[1].parse().map_err(|e: dmon_core::DmonError| e.to_string())?,
                mode: parse_mode(pos.get(2))?,
                position: parse_position(pos.get(3))?,
            }
        }
        "help" | "-h" | "--help" => Command::Help {
            topic: pos.get(1).map(|s| s.to_string()),
        },
        "version" | "--version" => Command::Version,
        _ => {
            return Err(format!(
                "Unknown command: '{}'. Run 'dmon help' for usage.",
                args[0]
            ))
        }
    };

    Ok(Invocation { verbose, cmd })
}


fn parse_mode(arg: Option<&&str>) -> Result<ResolutionMode, String> {
    match arg {
        Some(s) => s.parse().map_err(|e: dmon_core::DmonError| e.to_string()),
        None => Ok(ResolutionMode::default()),
    }
}


fn parse_position(arg: Option<&&str>) -> Result<Position, String> {
    match arg {
        Some(s) => s.parse().map_err(|e: dmon_core::DmonError| e.to_string()),
        None => Ok(Position::Right),
    }
}


fn has_flag(args: &[&str], flag: &str) -> bool {
    args.iter().any(|a| *a == flag)
}


fn positionals<'a>(args: &[&'a str]) -> Vec<&'a str> {
    args.iter().copied().filter(|a| !a.starts_with("--")).collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use dmon_core::types::display::Resolution;
    use dmon_core::types::request::{Preset, Target};
    use log::Level;

    fn cmd(args: &[&str]) -> Command {
        parse_args(args).unwrap().cmd
    }

    #[test]
    fn no_args_is_an_error() {
        assert!(parse_args(&[]).unwrap_err().contains("No command specified"));
    }

    #[test]
    fn verbose_flag_anywhere() {
        let inv = parse_args(&["list", "-v"]).unwrap();
        assert!(inv.verbose);
        assert_eq!(inv.cmd, Command::List { json: false });
        assert!(parse_args(&["--verbose", "check"]).unwrap().verbose);
    }

    #[test]
    fn json_flag_on_inspection_commands() {
        assert_eq!(cmd(&["detect", "--json"]), Command::Detect { json: true });
        assert_eq!(cmd(&["check", "--json"]), Command::Check { json: true });
    }

    #[test]
    fn dual_defaults() {
        assert_eq!(
            cmd(&["dual"]),
            Command::Dual {
                mode: ResolutionMode::Preset(Preset::Normal),
                position: Position::Right,
            }
        );
        assert_eq!(
            cmd(&["dual", "max", "l"]),
            Command::Dual {
                mode: ResolutionMode::Preset(Preset::Native),
                position: Position::Left,
            }
        );
    }

    #[test]
    fn set_with_short_names() {
        assert_eq!(
            cmd(&["set", "b", "z", "a"]),
            Command::Set {
                target: Target::Both,
                mode: ResolutionMode::Preset(Preset::Zoom),
                position: Position::Above,
            }
        );
    }

    #[test]
    fn set_with_explicit_resolution() {
        assert_eq!(
            cmd(&["set", "external", "2560x1440"]),
            Command::Set {
                target: Target::External,
                mode: ResolutionMode::Explicit(Resolution::new(2560, 1440)),
                position: Position::Right,
            }
        );
    }

    #[test]
    fn malformed_resolution_fails_during_parsing() {
        let err = parse_args(&["set", "both", "1920-1200"]).unwrap_err();
        assert!(err.contains("expected WIDTHxHEIGHT"));
    }

    #[test]
    fn set_requires_target_and_mode() {
        assert!(parse_args(&["set", "both"]).unwrap_err().starts_with("Usage:"));
        assert!(parse_args(&["set", "sideways", "normal"]).unwrap_err().contains("invalid target"));
    }

    #[test]
    fn modes_requires_display() {
        assert!(parse_args(&["modes"]).is_err());
        assert_eq!(
            cmd(&["modes", "HDMI-1"]),
            Command::Modes { display: "HDMI-1".into() }
        );
    }

    #[test]
    fn unknown_command() {
        assert!(parse_args(&["mirror"]).unwrap_err().contains("Unknown command"));
    }

    #[test]
    fn config_dir_override_wins_over_home() {
        assert_eq!(
            config_dir(Some("/etc/dmon".into()), Some("/home/ana".into())),
            PathBuf::from("/etc/dmon")
        );
        assert_eq!(
            config_dir(None, Some("/home/ana".into())),
            PathBuf::from("/home/ana/.config/dmon")
        );
        assert_eq!(config_dir(None, None), PathBuf::from("/tmp/.config/dmon"));
    }

    #[test]
    fn terminal_level_follows_verbose_and_filters() {
        let settings = DmonSettings::default();
        let quiet = build_logger(false, &settings, None).unwrap();
        assert!(quiet.file.is_none());
        assert_eq!(quiet.max_level(), LevelFilter::Warn);
        assert_eq!(build_logger(true, &settings, None).unwrap().max_level(), LevelFilter::Debug);
        let filtered = build_logger(false, &settings, Some("info")).unwrap();
        assert_eq!(filtered.max_level(), LevelFilter::Info);
    }

    #[test]
    fn log_file_takes_debug_while_terminal_keeps_warnings() {
        let path = std::env::temp_dir().join(format!("dmon-cli-test-{}.log", process::id()));
        let _ = std::fs::remove_file(&path);
        let settings = DmonSettings {
            log_file: Some(path.clone()),
            ..DmonSettings::default()
        };

        for message in ["first run", "second run"] {
            let logger = build_logger(false, &settings, None).unwrap();
            assert_eq!(logger.max_level(), LevelFilter::Debug);
            let debug = Metadata::builder().level(Level::Debug).build();
            let warn = Metadata::builder().level(Level::Warn).build();
            assert!(!logger.terminal.enabled(&debug));
            assert!(logger.terminal.enabled(&warn));
            assert!(logger.enabled(&debug));
            logger.log(
                &Record::builder()
                    .args(format_args!("executing: xrandr --query ({})", message))
                    .level(Level::Debug)
                    .target("dmon_core::service")
                    .build(),
            );
            logger.flush();
        }

        let written = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(written.contains("executing: xrandr --query (first run)"));
        assert!(written.contains("executing: xrandr --query (second run)"));
    }

    #[test]
    fn unwritable_log_file_is_reported() {
        let settings = DmonSettings {
            log_file: Some(PathBuf::from("/nonexistent-dmon-dir/dmon.log")),
            ..DmonSettings::default()
        };
        let err = build_logger(false, &settings, None).err().unwrap();
        assert!(err.contains("failed to open log file"));
    }
}
