use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::DmonError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DmonSettings {
    /// Executable used for both querying and configuring. Default: "xrandr".
    #[serde(default = "default_xrandr_path")]
    pub xrandr_path: String,
    /// Output name prefixes treated as the built-in panel. Default: eDP, LVDS.
    #[serde(default = "default_internal_prefixes")]
    pub internal_prefixes: Vec<String>,
    /// Append debug-level logs here. Warnings still go to stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_xrandr_path() -> String {
    "xrandr".into()
}

fn default_internal_prefixes() -> Vec<String> {
    vec!["eDP".into(), "LVDS".into()]
}

impl Default for DmonSettings {
    fn default() -> Self {
        DmonSettings {
            xrandr_path: default_xrandr_path(),
            internal_prefixes: default_internal_prefixes(),
            log_file: None,
        }
    }
}

impl DmonSettings {
    /// Parse settings from YAML text. Missing fields take their defaults.
    pub fn from_yaml(input: &str) -> Result<DmonSettings, serde_yaml::Error> {
        if input.trim().is_empty() {
            return Ok(DmonSettings::default());
        }
        serde_yaml::from_str(input)
    }

    /// Load settings from a file path. Returns defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<DmonSettings, DmonError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(DmonSettings::default());
            }
            Err(e) => {
                return Err(DmonError::Config {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        Self::from_yaml(&content).map_err(|e| DmonError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let settings = DmonSettings::from_yaml("").unwrap();
        assert_eq!(settings, DmonSettings::default());
        assert_eq!(settings.internal_prefixes, vec!["eDP", "LVDS"]);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let settings = DmonSettings::from_yaml("internal_prefixes: [DSI, eDP]\n").unwrap();
        assert_eq!(settings.internal_prefixes, vec!["DSI", "eDP"]);
        assert_eq!(settings.xrandr_path, "xrandr");
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!("dmon-missing-{}.yaml", std::process::id()));
        let settings = DmonSettings::load(&path).unwrap();
        assert_eq!(settings, DmonSettings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("dmon-config-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(&path, "internal_prefixes: {not: [a list\n").unwrap();
        let err = DmonSettings::load(&path).unwrap_err();
        assert!(matches!(err, DmonError::Config { .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
