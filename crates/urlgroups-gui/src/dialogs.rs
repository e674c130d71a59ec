//! Native file pickers and message boxes (rfd). All of them block until closed.

use std::path::{Path, PathBuf};

const SESSION_FILTER_NAME: &str = "JSON or text";
const SESSION_FILTER_EXTS: &[&str] = &["json", "txt", "jsonl", "ndjson"];

fn session_dialog(title: &str, directory: Option<&Path>) -> rfd::FileDialog {
    let mut dlg = rfd::FileDialog::new()
        .set_title(title)
        .add_filter(SESSION_FILTER_NAME, SESSION_FILTER_EXTS)
        .add_filter("All files", &["*"]);
    if let Some(dir) = directory {
        dlg = dlg.set_directory(dir);
    }
    dlg
}

pub fn pick_session_file(directory: Option<&Path>) -> Option<PathBuf> {
    session_dialog("Select sessions file (JSON)", directory).pick_file()
}

pub fn pick_save_path(file_name: &str, directory: Option<&Path>) -> Option<PathBuf> {
    session_dialog("Save sessions as", directory)
        .set_file_name(file_name)
        .save_file()
}

fn message(level: rfd::MessageLevel, title: &str, description: &str) {
    rfd::MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

pub fn error(title: &str, description: &str) {
    message(rfd::MessageLevel::Error, title, description);
}

pub fn warning(title: &str, description: &str) {
    message(rfd::MessageLevel::Warning, title, description);
}

pub fn info(title: &str, description: &str) {
    message(rfd::MessageLevel::Info, title, description);
}
