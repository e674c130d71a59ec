//! "Edit URLs" popup: a native child window around a [`GroupEditor`].

use std::sync::Arc;

use eframe::egui::{
    self, text::LayoutJob, Align, CursorIcon, Galley, Key, Layout, Modifiers, Stroke, TextFormat,
    TextStyle, Vec2, ViewportClass, ViewportId,
};
use urlgroups_core::editor::{char_to_byte, scan_links, GroupEditor};
use urlgroups_core::launcher::Launcher;

/// What the user did with a popup this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupOutcome {
    /// Still open.
    Open,
    /// "Copy" with the text to put on the clipboard.
    Copy(String),
    /// "Apply & Close".
    Apply,
    /// Closed through the window's close control; edits are dropped.
    Discard,
}

pub struct EditorPopup {
    id: ViewportId,
    editor: GroupEditor,
    size: [f32; 2],
    position: Option<[f32; 2]>,
}

impl EditorPopup {
    pub fn new(editor: GroupEditor, size: [f32; 2], position: Option<[f32; 2]>) -> Self {
        let id = ViewportId::from_hash_of(("urlgroups-editor", editor.group().name()));
        Self {
            id,
            editor,
            size,
            position,
        }
    }

    pub fn id(&self) -> ViewportId {
        self.id
    }

    pub fn group(&self) -> &str {
        self.editor.group().name()
    }

    pub fn into_editor(self) -> GroupEditor {
        self.editor
    }

    /// Draws the popup for one frame.
    pub fn show(&mut self, ctx: &egui::Context, launcher: &Launcher) -> PopupOutcome {
        let title = self.editor.title();
        let mut builder = egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size(self.size);
        if let Some(position) = self.position {
            builder = builder.with_position(position);
        }

        ctx.show_viewport_immediate(self.id, builder, |ctx, class| {
            if class == ViewportClass::Embedded {
                // Backend without multi-window support: fall back to an egui window.
                let mut open = true;
                let mut outcome = PopupOutcome::Open;
                egui::Window::new(title.as_str())
                    .id(egui::Id::new(self.id))
                    .open(&mut open)
                    .default_size(self.size)
                    .show(ctx, |ui| outcome = self.contents(ui, launcher));
                return if open { outcome } else { PopupOutcome::Discard };
            }

            if ctx.input(|i| i.viewport().close_requested()) {
                return PopupOutcome::Discard;
            }
            egui::CentralPanel::default()
                .show(ctx, |ui| self.contents(ui, launcher))
                .inner
        })
    }

    fn contents(&mut self, ui: &mut egui::Ui, launcher: &Launcher) -> PopupOutcome {
        let mut enabled = self.editor.links_enabled();
        if ui.checkbox(&mut enabled, "Enable clickable links").changed() {
            self.editor.set_links_enabled(enabled);
        }
        ui.separator();

        let mut outcome = PopupOutcome::Open;
        ui.with_layout(Layout::bottom_up(Align::Max), |ui| {
            ui.horizontal(|ui| {
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Apply & Close").clicked() {
                        outcome = PopupOutcome::Apply;
                    }
                    if ui.button("Copy").clicked() {
                        if let Some(text) = self.editor.clipboard_text() {
                            outcome = PopupOutcome::Copy(text);
                        }
                    }
                });
            });
            ui.separator();
            ui.with_layout(Layout::top_down(Align::Min), |ui| self.text_area(ui, launcher));
        });
        outcome
    }

    fn text_id(&self) -> egui::Id {
        egui::Id::new(self.id).with("urls")
    }

    fn text_area(&mut self, ui: &mut egui::Ui, launcher: &Launcher) {
        let text_id = self.text_id();
        self.handle_history_keys(ui, text_id);

        let links_enabled = self.editor.links_enabled();
        let mut layouter = |ui: &egui::Ui, text: &str, _wrap_width: f32| -> Arc<Galley> {
            let job = layout_job(ui, text, links_enabled);
            ui.fonts(|fonts| fonts.layout_job(job))
        };

        let width = ui.available_width();
        let mut buffer = self.editor.text().to_owned();
        let output = egui::ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::TextEdit::multiline(&mut buffer)
                    .id(text_id)
                    .font(TextStyle::Monospace)
                    .desired_width(width)
                    .desired_rows(20)
                    .clip_text(false)
                    .lock_focus(true)
                    .layouter(&mut layouter)
                    .show(ui)
            })
            .inner;

        if output.response.changed() {
            self.editor.set_text(buffer);
        }

        let Some(pointer) = output.response.hover_pos() else {
            return;
        };
        let local = pointer - output.galley_pos;
        let Some((line, url)) = link_under(&self.editor, &output.galley, local) else {
            return;
        };
        ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        if output.response.clicked() {
            tracing::debug!("link on line {} of {} clicked", line + 1, self.group());
            launcher.open_link(&url);
        }
    }

    /// Undo: Ctrl/Cmd+Z. Redo: Ctrl/Cmd+Y or Ctrl/Cmd+Shift+Z. Consumed before
    /// the text widget sees them so only the editor's own history applies.
    fn handle_history_keys(&mut self, ui: &mut egui::Ui, text_id: egui::Id) {
        if !ui.memory(|m| m.has_focus(text_id)) {
            return;
        }
        let (undo, redo) = ui.input_mut(|i| {
            let redo_shift = i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
            let redo_y = i.consume_key(Modifiers::COMMAND, Key::Y);
            let undo = i.consume_key(Modifiers::COMMAND, Key::Z);
            (undo, redo_shift || redo_y)
        });
        if undo {
            self.editor.undo();
        }
        if redo {
            self.editor.redo();
        }
    }
}

/// Monospace text; with links on, every non-blank line is drawn as a hyperlink.
/// Spans are scanned from the text being laid out, so they always match it.
fn layout_job(ui: &egui::Ui, text: &str, links_enabled: bool) -> LayoutJob {
    let font_id = TextStyle::Monospace.resolve(ui.style());
    let plain = TextFormat {
        font_id: font_id.clone(),
        color: ui.visuals().text_color(),
        ..Default::default()
    };
    let link_color = ui.visuals().hyperlink_color;
    let link = TextFormat {
        font_id,
        color: link_color,
        underline: Stroke::new(1.0, link_color),
        ..Default::default()
    };

    let mut job = LayoutJob::default();
    let mut cursor = 0;
    if links_enabled {
        for span in scan_links(text) {
            job.append(&text[cursor..span.range.start], 0.0, plain.clone());
            job.append(&text[span.range.clone()], 0.0, link.clone());
            cursor = span.range.end;
        }
    }
    job.append(&text[cursor..], 0.0, plain);
    job.wrap.max_width = f32::INFINITY;
    job
}

/// Line number and URL of the link under `local` (galley coordinates), if
/// link mode is on and the pointer is over a non-blank line's text.
fn link_under(editor: &GroupEditor, galley: &Galley, local: Vec2) -> Option<(usize, String)> {
    if !editor.links_enabled() || !on_glyphs(galley, local) {
        return None;
    }
    let char_index = galley.cursor_from_pos(local).ccursor.index;
    let offset = char_to_byte(editor.text(), char_index);
    let line = editor.link_at(offset)?.line;
    let url = editor.link_url_at(offset)?;
    Some((line, url))
}

/// True when `local` (galley coordinates) is over laid-out text rather than
/// the empty space after a line.
fn on_glyphs(galley: &Galley, local: Vec2) -> bool {
    let pos = local.to_pos2();
    galley.rows.iter().any(|row| row.rect.contains(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{Color32, Event, FontId, Pos2, RawInput, Rect};
    use urlgroups_core::config::LauncherConfig;
    use urlgroups_core::editor::GroupHandle;

    struct Harness {
        ctx: egui::Context,
        popup: EditorPopup,
        launcher: Launcher,
    }

    impl Harness {
        fn new(urls: &[&str]) -> Self {
            let urls: Vec<String> = urls.iter().map(|u| u.to_string()).collect();
            let editor = GroupEditor::new(GroupHandle::new("g"), &urls);
            let mut harness = Self {
                ctx: egui::Context::default(),
                popup: EditorPopup::new(editor, [640.0, 460.0], None),
                launcher: Launcher::new(LauncherConfig::default()),
            };
            harness.frame(Vec::new());
            harness
        }

        fn frame(&mut self, events: Vec<Event>) {
            let input = RawInput {
                screen_rect: Some(Rect::from_min_size(Pos2::ZERO, egui::vec2(640.0, 460.0))),
                events,
                ..Default::default()
            };
            let Self {
                ctx,
                popup,
                launcher,
            } = self;
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| popup.contents(ui, launcher));
            });
        }

        fn focus_text(&mut self) {
            let id = self.popup.text_id();
            self.ctx.memory_mut(|m| m.request_focus(id));
            self.frame(Vec::new());
            assert!(self.ctx.memory(|m| m.has_focus(id)));
        }

        fn press(&mut self, key: Key, modifiers: Modifiers) {
            self.frame(vec![Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }]);
        }

        fn text(&self) -> &str {
            self.popup.editor.text()
        }
    }

    fn edited() -> Harness {
        let mut harness = Harness::new(&["a.test"]);
        harness.popup.editor.set_text("a.test\nb.test");
        harness.popup.editor.set_text("a.test\nb.test c");
        harness.frame(Vec::new());
        harness
    }

    #[test]
    fn shortcuts_drive_editor_history() {
        let mut h = edited();
        h.focus_text();

        h.press(Key::Z, Modifiers::COMMAND);
        assert_eq!(h.text(), "a.test\nb.test");
        h.press(Key::Z, Modifiers::COMMAND | Modifiers::SHIFT);
        assert_eq!(h.text(), "a.test\nb.test c");

        for _ in 0..3 {
            h.press(Key::Z, Modifiers::COMMAND);
        }
        // Stops at the seeded text.
        assert_eq!(h.text(), "a.test");
        assert!(!h.popup.editor.can_undo());

        h.press(Key::Y, Modifiers::COMMAND);
        assert_eq!(h.text(), "a.test\nb.test");
    }

    #[test]
    fn shift_z_redoes_without_undoing() {
        let mut h = edited();
        h.focus_text();
        h.press(Key::Z, Modifiers::COMMAND);
        h.press(Key::Z, Modifiers::COMMAND);
        assert_eq!(h.text(), "a.test");

        h.press(Key::Z, Modifiers::COMMAND | Modifiers::SHIFT);
        assert_eq!(h.text(), "a.test\nb.test");
        assert!(h.popup.editor.can_redo());
    }

    #[test]
    fn shortcuts_ignored_without_focus() {
        let mut h = edited();
        h.press(Key::Z, Modifiers::COMMAND);
        assert_eq!(h.text(), "a.test\nb.test c");
    }

    #[test]
    fn plain_z_is_not_a_shortcut() {
        let mut h = edited();
        h.focus_text();
        h.press(Key::Z, Modifiers::NONE);
        assert_eq!(h.text(), "a.test\nb.test c");
    }

    #[test]
    fn shown_as_embedded_window_without_native_viewports() {
        let mut h = Harness::new(&["a.test"]);
        let mut outcomes = Vec::new();
        for _ in 0..2 {
            let Harness {
                ctx,
                popup,
                launcher,
            } = &mut h;
            let _ = ctx.run(RawInput::default(), |ctx| outcomes.push(popup.show(ctx, launcher)));
        }
        assert!(!outcomes.is_empty());
        assert!(outcomes.iter().all(|o| *o == PopupOutcome::Open));
        assert_eq!(h.text(), "a.test");
    }

    #[test]
    fn pointer_resolves_to_link_under_it() {
        let mut h = Harness::new(&["a.test"]);
        h.popup.editor.set_text("a.test\n\nhttps://b.test");
        h.popup.editor.set_links_enabled(true);
        let text = h.text().to_owned();
        let galley = h
            .ctx
            .fonts(|f| f.layout_no_wrap(text, FontId::monospace(14.0), Color32::WHITE));
        let row = |i: usize| galley.rows[i].rect;
        let editor = &h.popup.editor;

        assert_eq!(
            link_under(editor, &galley, row(0).center().to_vec2()),
            Some((0, "http://a.test".to_string()))
        );
        assert_eq!(
            link_under(editor, &galley, row(2).center().to_vec2()),
            Some((2, "https://b.test".to_string()))
        );
        // Blank line and the empty space after a line's text.
        assert_eq!(link_under(editor, &galley, row(1).center().to_vec2()), None);
        let past_end = egui::vec2(row(0).right() + 40.0, row(0).center().y);
        assert_eq!(link_under(editor, &galley, past_end), None);
    }

    #[test]
    fn no_links_when_mode_is_off() {
        let h = Harness::new(&["a.test"]);
        let text = h.text().to_owned();
        let galley = h
            .ctx
            .fonts(|f| f.layout_no_wrap(text, FontId::monospace(14.0), Color32::WHITE));
        let center = galley.rows[0].rect.center().to_vec2();
        assert_eq!(link_under(&h.popup.editor, &galley, center), None);
    }
}
