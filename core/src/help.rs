//! Help system for dmon commands.

pub fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => overview(),
        Some(t) => {
            if let Some(text) = command_help(t) {
                return text;
            }
            if let Some(text) = group_help(t) {
                return text;
            }
            format!("Unknown help topic: '{}'. Run 'dmon help' for a list of commands.", t)
        }
    }
}


fn overview() -> String {
    "\
dmon - manage display layouts through xrandr

Usage: dmon [-v|--verbose] <command> [args...]

Inspection commands:
  list [--json]                        Show connected displays and their modes
  detect [--json]                      Re-scan displays and report what was found
  check [--json]                       Show the current layout and primary display
  modes <display>                      Show the modes of one display

Layout commands:
  single [mode]                        Internal display only
  dual [mode] [position]               External primary, internal beside it
  set <target> <mode> [position]       Full control over target, mode, position

Other:
  version                              Show version information
  help [topic]                         Show help

Run 'dmon help <command>' for detailed help on a specific command.
Run 'dmon help values' for the accepted targets, modes, and positions."
        .into()
}


fn group_help(group: &str) -> Option<String> {
    let text = match group {
        "values" => "\
Accepted values

Targets:
  internal, i  - Internal display only
  external, e  - External display only (internal is switched off)
  both, b      - Both displays, external primary

Modes:
  normal, n    - 1920x1200 internal, 1920x1080 external
  zoom, z      - 1600x1000 internal, 1280x720 external
  native, max  - Highest available resolution
  WIDTHxHEIGHT - Exact resolution, must be listed by the display

Positions (only for 'both'):
  left, l      - Internal display to the left of external
  right, r     - Internal display to the right of external (default)
  above, a     - Internal display above external
  below, b     - Internal display below external

When a preset resolution is not offered, the current mode is kept;
without a current mode the highest resolution is used.",

        "layout" => "\
Layout commands

  single [mode]
    Switch to the internal display only. Mode defaults to normal.

  dual [mode] [position]
    External display as primary, internal placed beside it.
    Mode defaults to normal, position to right.

  set <target> <mode> [position]
    Configure target, mode, and position explicitly.",

        _ => return None,
    };
    Some(text.into())
}


fn command_help(command: &str) -> Option<String> {
    let text = match command {
        "list" => "dmon list - show connected displays with available modes\n\nUsage: dmon list [--json]\n\nLegend: * = current, + = preferred",
        "detect" => "dmon detect - re-scan displays\n\nUsage: dmon detect [--json]\n\nUseful after plugging or unplugging a monitor.",
        "check" => "dmon check - show the current layout\n\nUsage: dmon check [--json]",
        "modes" => "dmon modes - show the modes of one display\n\nUsage: dmon modes <display>\n\nExample: dmon modes HDMI-1",
        "single" => "dmon single - internal display only\n\nUsage: dmon single [mode]\n\nExample: dmon single zoom",
        "dual" => "dmon dual - external primary, internal beside it\n\nUsage: dmon dual [mode] [position]\n\nExamples:\n  dmon dual\n  dmon dual zoom\n  dmon dual native left",
        "set" => "dmon set - full control over display configuration\n\nUsage: dmon set <target> <mode> [position]\n\nExamples:\n  dmon set internal native\n  dmon set external zoom\n  dmon set both normal left\n  dmon set b 2560x1440 above\n  dmon set i z",
        "version" => "dmon version - show version information\n\nUsage: dmon version",
        "help" => "dmon help - show help\n\nUsage: dmon help [topic]",
        _ => return None,
    };
    Some(text.into())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overview_lists_command_groups() {
        let text = help_text(None);
        assert!(text.contains("Inspection commands:"));
        assert!(text.contains("Layout commands:"));
    }

    #[test]
    fn values_lists_presets() {
        let text = help_text(Some("values"));
        assert!(text.contains("1600x1000 internal, 1280x720 external"));
        assert!(text.contains("WIDTHxHEIGHT"));
    }

    #[test]
    fn command_help_set() {
        let text = help_text(Some("set"));
        assert!(text.contains("Usage:"));
        assert!(text.contains("<target> <mode> [position]"));
    }

    #[test]
    fn unknown_topic() {
        let text = help_text(Some("bogus"));
        assert!(text.contains("Unknown help topic"));
    }
}
