//! Browser choice for "open group" actions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which browser opens a group's URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    /// The system's registered URL handler.
    #[default]
    Default,
    /// The Chrome executable from the launcher config (supports incognito).
    Chrome,
}

impl Browser {
    pub const ALL: [Browser; 2] = [Browser::Default, Browser::Chrome];

    pub fn as_str(self) -> &'static str {
        match self {
            Browser::Default => "default",
            Browser::Chrome => "chrome",
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `Browser::from_str` for names other than `default`/`chrome`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBrowser(pub String);

impl fmt::Display for UnknownBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown browser {:?} (expected \"default\" or \"chrome\")", self.0)
    }
}

impl std::error::Error for UnknownBrowser {}

impl FromStr for Browser {
    type Err = UnknownBrowser;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Browser::Default),
            "chrome" => Ok(Browser::Chrome),
            _ => Err(UnknownBrowser(s.to_string())),
        }
    }
}
