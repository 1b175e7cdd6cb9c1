// src/infra/paths.rs — Config file location
//
// WORKBOT_HOME overrides everything; otherwise the platform config dir
// (e.g. ~/.config/workbot on Linux) is used.

use directories::ProjectDirs;
use std::path::PathBuf;

/// Returns the WORKBOT_HOME override, if set.
fn workbot_home() -> Option<PathBuf> {
    std::env::var_os("WORKBOT_HOME").map(PathBuf::from)
}

pub fn config_dir() -> PathBuf {
    if let Some(home) = workbot_home() {
        return home;
    }
    ProjectDirs::from("", "", "workbot")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}
