use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::launcher::Browser;
use crate::paths;

/// External executables used by the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Chrome executable; spawned with `[--incognito] url...`.
    pub chrome_path: PathBuf,
    /// Text editor install locations, tried in order.
    pub editor_candidates: Vec<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            chrome_path: PathBuf::from(DEFAULT_CHROME_PATH),
            editor_candidates: DEFAULT_EDITOR_CANDIDATES
                .iter()
                .map(PathBuf::from)
                .collect(),
        }
    }
}

#[cfg(windows)]
const DEFAULT_CHROME_PATH: &str = r"C:\Program Files\Google\Chrome\Application\chrome.exe";
#[cfg(windows)]
const DEFAULT_EDITOR_CANDIDATES: &[&str] = &[
    r"C:\Program Files\Notepad++\notepad++.exe",
    r"C:\Program Files (x86)\Notepad++\notepad++.exe",
];

#[cfg(target_os = "macos")]
const DEFAULT_CHROME_PATH: &str = "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome";
#[cfg(target_os = "macos")]
const DEFAULT_EDITOR_CANDIDATES: &[&str] = &[
    "/Applications/Sublime Text.app/Contents/SharedSupport/bin/subl",
    "/Applications/TextMate.app/Contents/MacOS/TextMate",
];

#[cfg(not(any(windows, target_os = "macos")))]
const DEFAULT_CHROME_PATH: &str = "/usr/bin/google-chrome";
#[cfg(not(any(windows, target_os = "macos")))]
const DEFAULT_EDITOR_CANDIDATES: &[&str] = &[
    "/snap/bin/notepad-plus-plus",
    "/usr/bin/gedit",
    "/usr/bin/kate",
];

/// Initial window options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Browser selected when the window opens.
    pub default_browser: Browser,
    /// Whether the incognito box starts checked (only used with Chrome).
    pub incognito: bool,
    pub window_width: f32,
    pub window_height: f32,
    /// Size of the URL editor popups.
    pub editor_width: f32,
    pub editor_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_browser: Browser::Chrome,
            incognito: true,
            window_width: 520.0,
            window_height: 520.0,
            editor_width: 640.0,
            editor_height: 460.0,
        }
    }
}

/// Global configuration loaded from `~/.config/urlgroups/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub launcher: LauncherConfig,
    pub ui: UiConfig,
}

pub fn config_path() -> Result<PathBuf> {
    paths::config_file()
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AppConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<AppConfig> {
    if !path.exists() {
        let default_cfg = AppConfig::default();
        let toml = toml::to_string_pretty(&default_cfg).context("serialize default config")?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create dir: {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: AppConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
