//! Logging init: file under the per-user state dir, or graceful fallback to stderr.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, EitherWriter};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::paths;

const DEFAULT_FILTER: &str = "info,urlgroups=debug,urlgroups_core=debug";
const LOG_FILE_NAME: &str = "urlgroups.log";

/// Appends every event to one shared log file. An event whose file handle
/// can't be cloned goes to stderr instead of being lost.
struct LogFile {
    file: fs::File,
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = EitherWriter<fs::File, io::Stderr>;

    fn make_writer(&'a self) -> Self::Writer {
        match self.file.try_clone() {
            Ok(file) => EitherWriter::A(file),
            Err(_) => EitherWriter::B(io::stderr()),
        }
    }
}

/// Creates `dir` if needed and opens `urlgroups.log` in it for appending.
fn open_log_file(dir: &Path) -> Result<(LogFile, PathBuf)> {
    fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
    let path = dir.join(LOG_FILE_NAME);
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;
    Ok((LogFile { file }, path))
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize structured logging to `urlgroups.log` in the state dir
/// (`~/.local/state/urlgroups/` on Linux) and return the log path.
/// On failure (e.g. log dir unwritable), returns Err so the caller can fall back to stderr.
pub fn init_logging() -> Result<PathBuf> {
    let (log_file, path) = open_log_file(&paths::state_dir()?)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(BoxMakeWriter::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    tracing::info!("urlgroups logging initialized at {}", path.display());
    Ok(path)
}

/// Initialize logging to stderr only. Use when `init_logging()` fails so the window still opens.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_ansi(false)
        .try_init();
}
