//! Main window: file controls, global open options and one row per group.

use std::path::{Path, PathBuf};

use eframe::egui::{self, Align, Layout, ViewportCommand};
use urlgroups_core::config::{AppConfig, UiConfig};
use urlgroups_core::editor::GroupEditor;
use urlgroups_core::launcher::{Browser, Launcher};
use urlgroups_core::placement::{popup_position, ScreenRect};
use urlgroups_core::session::{Session, SessionError};

use crate::dialogs;
use crate::popup::{EditorPopup, PopupOutcome};

const APP_TITLE: &str = "Grouped URL Opener";
const DEFAULT_SAVE_NAME: &str = "sessions.json";
const APPLIED_MESSAGE: &str = "Changes applied to the group in memory.";

pub fn run(config: AppConfig) -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([config.ui.window_width, config.ui.window_height]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(UrlGroupsApp::new(config)))),
    )
}

pub struct UrlGroupsApp {
    session: Session,
    /// File the session was loaded from; enables save and external editing.
    current_file: Option<PathBuf>,
    incognito: bool,
    browser: Browser,
    launcher: Launcher,
    editors: Vec<EditorPopup>,
    editor_size: [f32; 2],
    clipboard: Option<arboard::Clipboard>,
    status: Option<String>,
    focus_pending: bool,
}

impl UrlGroupsApp {
    pub fn new(config: AppConfig) -> Self {
        let AppConfig { launcher, ui } = config;
        let UiConfig {
            default_browser,
            incognito,
            editor_width,
            editor_height,
            ..
        } = ui;
        Self {
            session: Session::new(),
            current_file: None,
            incognito,
            browser: default_browser,
            launcher: Launcher::new(launcher),
            editors: Vec::new(),
            editor_size: [editor_width, editor_height],
            clipboard: None,
            status: None,
            focus_pending: true,
        }
    }

    /// Replaces the session with the file's content. On error nothing changes.
    pub fn load_path(&mut self, path: &Path) -> Result<(), SessionError> {
        let session = Session::load_from_path(path)?;
        self.session = session;
        self.current_file = Some(path.to_path_buf());
        // Popups edit groups of the replaced session.
        self.editors.clear();
        self.status = None;
        Ok(())
    }

    /// Default file name offered by "Save sessions as...".
    pub fn suggested_save_name(&self) -> String {
        self.current_file
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_SAVE_NAME.to_string())
    }

    /// Saves to `path` (`.json` appended when it has no extension); returns the path written.
    pub fn save_to(&self, path: &Path) -> Result<PathBuf, SessionError> {
        let path = with_json_extension(path);
        self.session.save_to_path(&path)?;
        Ok(path)
    }

    /// Registers an editor popup for `group`. Returns false if one is already
    /// open (or the group is gone).
    pub fn open_editor(&mut self, group: &str, position: Option<[f32; 2]>) -> bool {
        if self.editors.iter().any(|popup| popup.group() == group) {
            return false;
        }
        match GroupEditor::for_group(&self.session, group) {
            Ok(editor) => {
                self.editors
                    .push(EditorPopup::new(editor, self.editor_size, position));
                true
            }
            Err(e) => {
                tracing::warn!("cannot edit group: {}", e);
                false
            }
        }
    }

    /// Handles a popup's outcome; gives the popup back if it stays open.
    fn finish_popup(&mut self, popup: EditorPopup, outcome: PopupOutcome) -> Option<EditorPopup> {
        match outcome {
            PopupOutcome::Open => Some(popup),
            PopupOutcome::Copy(text) => {
                self.copy_to_clipboard(text);
                Some(popup)
            }
            PopupOutcome::Apply => {
                match popup.into_editor().apply(&mut self.session) {
                    Ok(_) => self.status = Some(APPLIED_MESSAGE.to_string()),
                    Err(e) => {
                        tracing::warn!("apply failed: {}", e);
                        self.status = Some(format!("Could not apply changes: {e}"));
                    }
                }
                None
            }
            PopupOutcome::Discard => {
                tracing::debug!("editor for {:?} closed without applying", popup.group());
                None
            }
        }
    }

    fn copy_to_clipboard(&mut self, text: String) {
        if self.clipboard.is_none() {
            match arboard::Clipboard::new() {
                Ok(clipboard) => self.clipboard = Some(clipboard),
                Err(e) => {
                    tracing::warn!("clipboard unavailable: {}", e);
                    return;
                }
            }
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            if let Err(e) = clipboard.set_text(text) {
                tracing::warn!("copy to clipboard failed: {}", e);
            }
        }
    }

    fn select_file(&mut self) {
        let directory = self.current_file.as_deref().and_then(Path::parent);
        let Some(path) = dialogs::pick_session_file(directory) else {
            return;
        };
        if let Err(e) = self.load_path(&path) {
            tracing::warn!("load {} failed: {}", path.display(), e);
            if e.is_shape_error() {
                let message = format!(
                    "Selected file does not contain a JSON object mapping group->urls.\n\n{e}"
                );
                dialogs::error("Invalid file", &message);
            } else {
                dialogs::error("Error loading file", &format!("Failed to load JSON: {e}"));
            }
        }
    }

    fn save_as(&mut self) {
        if self.session.is_empty() {
            dialogs::warning("No data", "No session data to save.");
            return;
        }
        let directory = self.current_file.as_deref().and_then(Path::parent);
        let Some(path) = dialogs::pick_save_path(&self.suggested_save_name(), directory) else {
            return;
        };
        match self.save_to(&path) {
            Ok(saved) => {
                dialogs::info("Saved", &format!("Sessions saved to {}", saved.display()))
            }
            Err(e) => {
                tracing::warn!("save failed: {}", e);
                dialogs::error("Save failed", &format!("Failed to save file: {e}"));
            }
        }
    }

    fn open_in_external_editor(&self) {
        if let Some(path) = &self.current_file {
            self.launcher.open_in_external_editor(path);
        }
    }

    fn file_controls(&mut self, ui: &mut egui::Ui) {
        let loaded = self.current_file.is_some();
        ui.horizontal(|ui| {
            let select = ui.button("Select sessions file...");
            if self.focus_pending {
                select.request_focus();
                self.focus_pending = false;
            }
            if select.clicked() {
                self.select_file();
            }
            if ui
                .add_enabled(loaded, egui::Button::new("Open in text editor"))
                .clicked()
            {
                self.open_in_external_editor();
            }
            if ui
                .add_enabled(loaded, egui::Button::new("Save sessions as..."))
                .clicked()
            {
                self.save_as();
            }
        });

        let file_label = self
            .current_file
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "No file selected".to_string());
        ui.label(file_label);

        ui.horizontal(|ui| {
            ui.checkbox(&mut self.incognito, "Use incognito mode (Chrome only)");
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                egui::ComboBox::from_label("Browser")
                    .selected_text(self.browser.as_str())
                    .show_ui(ui, |ui| {
                        for browser in Browser::ALL {
                            ui.selectable_value(&mut self.browser, browser, browser.as_str());
                        }
                    });
            });
        });
    }

    fn group_rows(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let mut open_group = None;
        let mut edit_group = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (name, _) in self.session.groups() {
                    ui.horizontal(|ui| {
                        ui.label(name);
                        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                            if ui.button("Open this group").clicked() {
                                open_group = Some(name.to_string());
                            }
                            if ui.button("Edit URLs").clicked() {
                                edit_group = Some(name.to_string());
                            }
                        });
                    });
                }
            });

        if let Some(group) = open_group {
            if let Some(urls) = self.session.urls(&group) {
                tracing::info!(
                    "opening group {:?} ({} url(s)) with {}",
                    group,
                    urls.len(),
                    self.browser
                );
                self.launcher.open(urls, self.incognito, self.browser);
            }
        }
        if let Some(group) = edit_group {
            let position = self.editor_position(ctx);
            if !self.open_editor(&group, position) {
                if let Some(popup) = self.editors.iter().find(|p| p.group() == group) {
                    ctx.send_viewport_cmd_to(popup.id(), ViewportCommand::Focus);
                }
            }
        }
    }

    /// Right of the main window, kept on screen. None when the window
    /// geometry is unknown (the popup then uses the default placement).
    fn editor_position(&self, ctx: &egui::Context) -> Option<[f32; 2]> {
        let (outer, monitor) = ctx.input(|i| (i.viewport().outer_rect, i.viewport().monitor_size));
        let (outer, monitor) = (outer?, monitor?);
        let anchor = ScreenRect {
            x: outer.min.x,
            y: outer.min.y,
            width: outer.width(),
            height: outer.height(),
        };
        let (x, y) = popup_position(
            anchor,
            (self.editor_size[0], self.editor_size[1]),
            (monitor.x, monitor.y),
        );
        Some([x, y])
    }

    fn show_editors(&mut self, ctx: &egui::Context) {
        let popups = std::mem::take(&mut self.editors);
        for mut popup in popups {
            let outcome = popup.show(ctx, &self.launcher);
            if let Some(popup) = self.finish_popup(popup, outcome) {
                self.editors.push(popup);
            }
        }
    }
}

impl eframe::App for UrlGroupsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("file_controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.file_controls(ui);
            ui.add_space(4.0);
        });

        if let Some(status) = &self.status {
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.label(status.as_str());
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| self.group_rows(ctx, ui));

        self.show_editors(ctx);
    }
}

fn with_json_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("json")
    }
}
