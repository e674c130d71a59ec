//! OS side effects used by the launcher: file checks, detached spawns and
//! the system URL/file handlers.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Everything the launcher does to the outside world goes through this trait.
pub trait Platform {
    fn exists(&self, path: &Path) -> bool;

    /// Starts `program` with `args` and returns without waiting for it.
    fn spawn_detached(&self, program: &Path, args: &[OsString]) -> io::Result<()>;

    /// Opens a URL with the registered browser.
    fn open_url(&self, url: &str) -> io::Result<()>;

    /// Opens a URL or path with the OS "open" utility
    /// (`start` on Windows, `open` on macOS, `xdg-open` and friends elsewhere).
    fn open_with_system(&self, target: &OsStr) -> io::Result<()>;
}

/// The real OS.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPlatform;

impl Platform for SystemPlatform {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn spawn_detached(&self, program: &Path, args: &[OsString]) -> io::Result<()> {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::debug!("spawned {} (pid {})", program.display(), child.id());
        Ok(())
    }

    fn open_url(&self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }

    fn open_with_system(&self, target: &OsStr) -> io::Result<()> {
        open::that_detached(target)
    }
}
