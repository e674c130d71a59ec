//! Launcher: opens URL lists in a browser and files in an external editor.
//!
//! Opening is best-effort. A missing executable or failed spawn degrades to
//! the next opener (Chrome -> registered browser -> OS "open" utility) and is
//! only logged; nothing here returns an error to the caller.

mod browser;
mod platform;

pub use browser::{Browser, UnknownBrowser};
pub use platform::{Platform, SystemPlatform};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::config::LauncherConfig;
use crate::url::normalize_url;

const INCOGNITO_FLAG: &str = "--incognito";

/// Opens URLs and files using the executables from [`LauncherConfig`].
pub struct Launcher<P: Platform = SystemPlatform> {
    config: LauncherConfig,
    platform: P,
}

impl Launcher<SystemPlatform> {
    pub fn new(config: LauncherConfig) -> Self {
        Self::with_platform(config, SystemPlatform)
    }
}

impl<P: Platform> Launcher<P> {
    pub fn with_platform(config: LauncherConfig, platform: P) -> Self {
        Self { config, platform }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Opens every URL of a group. `incognito` only applies to [`Browser::Chrome`].
    pub fn open(&self, urls: &[String], incognito: bool, browser: Browser) {
        if urls.is_empty() {
            return;
        }
        match browser {
            Browser::Chrome => self.open_chrome(urls, incognito),
            Browser::Default => self.open_default(urls),
        }
    }

    /// Opens one link from the editor: normalized, default browser.
    pub fn open_link(&self, url: &str) {
        let url = normalize_url(url);
        if url.is_empty() {
            return;
        }
        self.open_default(std::slice::from_ref(&url));
    }

    fn open_chrome(&self, urls: &[String], incognito: bool) {
        let chrome = &self.config.chrome_path;
        if !self.platform.exists(chrome) {
            tracing::warn!(
                "chrome not found at {}, using default browser",
                chrome.display()
            );
            self.open_default(urls);
            return;
        }

        let args = chrome_args(urls, incognito);
        match self.platform.spawn_detached(chrome, &args) {
            Ok(()) => tracing::info!(
                "opened {} url(s) in chrome (incognito={})",
                urls.len(),
                incognito
            ),
            Err(e) => {
                tracing::warn!(
                    "spawning {} failed: {}; using default browser",
                    chrome.display(),
                    e
                );
                self.open_default(urls);
            }
        }
    }

    fn open_default(&self, urls: &[String]) {
        for url in urls {
            let Err(e) = self.platform.open_url(url) else {
                tracing::debug!("opened {} in default browser", url);
                continue;
            };
            tracing::debug!("default browser failed for {}: {}", url, e);
            if let Err(e) = self.platform.open_with_system(url.as_ref()) {
                tracing::warn!("could not open {}: {}", url, e);
            }
        }
    }

    /// First configured editor that exists on this machine.
    pub fn find_editor(&self) -> Option<PathBuf> {
        self.config
            .editor_candidates
            .iter()
            .find(|candidate| self.platform.exists(candidate))
            .cloned()
    }

    /// Opens `path` in the configured text editor, or with the OS default
    /// handler when no editor is installed or it fails to start.
    pub fn open_in_external_editor(&self, path: &Path) {
        if path.as_os_str().is_empty() {
            return;
        }
        if let Some(editor) = self.find_editor() {
            match self
                .platform
                .spawn_detached(&editor, &[path.as_os_str().to_os_string()])
            {
                Ok(()) => {
                    tracing::info!("opened {} with {}", path.display(), editor.display());
                    return;
                }
                Err(e) => tracing::warn!("spawning {} failed: {}", editor.display(), e),
            }
        }
        if let Err(e) = self.platform.open_with_system(path.as_os_str()) {
            tracing::warn!("could not open {}: {}", path.display(), e);
        }
    }
}

/// `[--incognito] url...`
fn chrome_args(urls: &[String], incognito: bool) -> Vec<OsString> {
    let mut args = Vec::with_capacity(urls.len() + 1);
    if incognito {
        args.push(OsString::from(INCOGNITO_FLAG));
    }
    args.extend(urls.iter().map(OsString::from));
    args
}
