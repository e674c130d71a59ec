pub mod config;
pub mod logging;
pub mod paths;

pub mod editor;
pub mod launcher;
pub mod placement;
pub mod session;
pub mod url;
