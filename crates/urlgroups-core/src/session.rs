//! Session mapping: named groups of URLs, loaded from and saved to a JSON object.
//!
//! The file is a JSON object whose keys are group names and whose values are
//! arrays of URL strings. Group order is the order of the keys in the file and
//! is kept on save.

use indexmap::IndexMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Load/save failures. Loading never mutates an existing session, so the
/// caller can keep its previous state on any of these.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("the file does not contain a JSON object mapping group -> urls")]
    NotAnObject,

    #[error("group {group:?} is not a list of URL strings")]
    InvalidGroup { group: String },

    #[error("serialize session: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("group {0:?} is not in the session")]
    UnknownGroup(String),
}

impl SessionError {
    /// True for errors caused by the file's shape rather than I/O or syntax.
    pub fn is_shape_error(&self) -> bool {
        matches!(self, SessionError::NotAnObject | SessionError::InvalidGroup { .. })
    }
}

/// Ordered mapping group name -> URL list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    groups: IndexMap<String, Vec<String>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a session from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, SessionError> {
        let value: serde_json::Value = serde_json::from_str(text).map_err(SessionError::Parse)?;
        let serde_json::Value::Object(object) = value else {
            return Err(SessionError::NotAnObject);
        };

        let mut groups = IndexMap::with_capacity(object.len());
        for (group, urls) in object {
            let urls = match urls {
                serde_json::Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        serde_json::Value::String(url) => Some(url),
                        _ => None,
                    })
                    .collect::<Option<Vec<_>>>(),
                _ => None,
            };
            match urls {
                Some(urls) => {
                    groups.insert(group, urls);
                }
                None => return Err(SessionError::InvalidGroup { group }),
            }
        }
        Ok(Self { groups })
    }

    /// Reads and parses a UTF-8 session file.
    pub fn load_from_path(path: &Path) -> Result<Self, SessionError> {
        let text = fs::read_to_string(path).map_err(|source| SessionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let session = Self::from_json_str(&text)?;
        tracing::info!(
            "loaded {} group(s) from {}",
            session.len(),
            path.display()
        );
        Ok(session)
    }

    /// Pretty JSON (2-space indent, non-ASCII kept verbatim) with a trailing newline.
    pub fn to_json_string(&self) -> Result<String, SessionError> {
        let mut json =
            serde_json::to_string_pretty(&self.groups).map_err(SessionError::Serialize)?;
        json.push('\n');
        Ok(json)
    }

    /// Writes the whole session to `path`, replacing any existing file.
    pub fn save_to_path(&self, path: &Path) -> Result<(), SessionError> {
        let json = self.to_json_string()?;
        fs::write(path, json).map_err(|source| SessionError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!("saved {} group(s) to {}", self.len(), path.display());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in display order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, urls)| (name.as_str(), urls.as_slice()))
    }

    pub fn urls(&self, group: &str) -> Option<&[String]> {
        self.groups.get(group).map(Vec::as_slice)
    }

    /// Adds a group at the end, or replaces the list of an existing one in place.
    pub fn insert(&mut self, group: impl Into<String>, urls: Vec<String>) {
        self.groups.insert(group.into(), urls);
    }

    /// Replaces the whole URL list of an existing group; its position is unchanged.
    pub fn commit(&mut self, group: &str, urls: Vec<String>) -> Result<(), SessionError> {
        let slot = self
            .groups
            .get_mut(group)
            .ok_or_else(|| SessionError::UnknownGroup(group.to_string()))?;
        *slot = urls;
        Ok(())
    }
}
