// utils/settings.rs
//
// The tool's own settings, read from paths::SETTINGS. Every field has a
// default so the file can be partial, or missing altogether.

use crate::error::{FleetError, Result};
use crate::paths;
use serde::{Serialize, Deserialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {

    /// Shell used with `-c` to run job commands
    #[serde(default = "use_default_shell")]
    pub shell: String,
    #[serde(default = "use_default_inventory")]
    pub inventory: String,
    #[serde(default = "use_default_job_command")]
    pub job_command: String,
    /// Group the demo scenario associates its VMs with
    #[serde(default = "use_default_resource_group")]
    pub resource_group: String,
}

fn use_default_shell() -> String {
    "bash".to_string()
}

fn use_default_inventory() -> String {
    paths::DEFAULT_INVENTORY.to_string()
}

fn use_default_job_command() -> String {
    "ping -c 4 google.com".to_string()
}

fn use_default_resource_group() -> String {
    "empire".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            shell: use_default_shell(),
            inventory: use_default_inventory(),
            job_command: use_default_job_command(),
            resource_group: use_default_resource_group(),
        }
    }
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    let display = path.to_string_lossy().to_string();
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(FleetError::Io { path: display, source: e }),
    };
    if text.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(&text).map_err(|e| FleetError::Parse { source_name: display, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings(dir.path().join("fleet.yml")).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.shell, "bash");
        assert_eq!(s.inventory, "config.yaml");
        assert_eq!(s.resource_group, "empire");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.yml");
        fs::write(&path, "shell: sh\njob_command: uptime\n").unwrap();

        let s = load_settings(&path).unwrap();
        assert_eq!(s.shell, "sh");
        assert_eq!(s.job_command, "uptime");
        assert_eq!(s.inventory, "config.yaml");
        assert_eq!(s.resource_group, "empire");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.yml");
        fs::write(&path, "shell: [sh\n").unwrap();

        assert!(matches!(load_settings(&path), Err(FleetError::Parse { .. })));
    }
}
