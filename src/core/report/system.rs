//! Run metadata shown at the top of every report

use chrono::Local;
use std::env;

/// Where and by whom a run was made
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    /// Local time at run start
    pub date: String,
    pub user: String,
    pub host_version: String,

    /// OS family, e.g. `macOS`
    pub os: String,
    pub os_version: String,
}

impl SystemInfo {
    /// Capture the current machine's details
    pub fn capture(host_version: impl Into<String>) -> Self {
        Self {
            date: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            user: current_user(),
            host_version: host_version.into(),
            os: os_family().to_string(),
            os_version: format!("{}/{}", env::consts::OS, env::consts::ARCH),
        }
    }

    /// Placeholder values everywhere except the host version
    pub fn unknown(host_version: impl Into<String>) -> Self {
        Self {
            date: "Unknown".to_string(),
            user: "Unknown".to_string(),
            host_version: host_version.into(),
            os: "Unknown".to_string(),
            os_version: "Unknown".to_string(),
        }
    }
}

fn current_user() -> String {
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn os_family() -> &'static str {
    match env::consts::OS {
        "windows" => "Windows",
        "macos" => "macOS",
        "linux" => "Linux",
        _ => "Unknown",
    }
}
