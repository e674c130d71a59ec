//! Group editor: the text model behind the "Edit URLs" popup.
//!
//! The editor never holds the session's list. It is seeded from a copy and
//! writes back only through [`GroupEditor::apply`], which commits the parsed
//! lines into the session. Dropping the editor discards the edits.

mod history;
mod links;

pub use history::UndoHistory;
pub use links::{char_to_byte, scan_links, LinkSpan};

use std::fmt;

use crate::session::{Session, SessionError};
use crate::url::{normalize_url, parse_url_lines};

/// Names the session entry an editor commits to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupHandle(String);

impl GroupHandle {
    pub fn new(group: impl Into<String>) -> Self {
        Self(group.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct GroupEditor {
    group: GroupHandle,
    text: String,
    history: UndoHistory,
    links_enabled: bool,
    links: Vec<LinkSpan>,
}

impl GroupEditor {
    /// Seeds the text with one URL per line (blank entries skipped). The
    /// seeding is not part of the undo history.
    pub fn new(group: GroupHandle, urls: &[String]) -> Self {
        let text = urls
            .iter()
            .map(|url| url.trim())
            .filter(|url| !url.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            group,
            text,
            history: UndoHistory::new(),
            links_enabled: false,
            links: Vec::new(),
        }
    }

    /// Opens an editor on `group` as currently stored in `session`.
    pub fn for_group(session: &Session, group: &str) -> Result<Self, SessionError> {
        let urls = session
            .urls(group)
            .ok_or_else(|| SessionError::UnknownGroup(group.to_string()))?;
        Ok(Self::new(GroupHandle::new(group), urls))
    }

    pub fn group(&self) -> &GroupHandle {
        &self.group
    }

    /// Window title: `URLs - <group>`.
    pub fn title(&self) -> String {
        if self.group.name().is_empty() {
            "URLs".to_string()
        } else {
            format!("URLs - {}", self.group)
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text (one modification event). Returns false if nothing changed.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.history.record(&self.text, &text);
        self.text = text;
        self.refresh_links();
        true
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.text);
        if changed {
            self.refresh_links();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.text);
        if changed {
            self.refresh_links();
        }
        changed
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn links_enabled(&self) -> bool {
        self.links_enabled
    }

    pub fn set_links_enabled(&mut self, enabled: bool) {
        self.links_enabled = enabled;
        self.refresh_links();
    }

    /// Current spans; empty while link mode is off.
    pub fn link_spans(&self) -> &[LinkSpan] {
        &self.links
    }

    /// Span under a cursor byte offset, if link mode is on.
    pub fn link_at(&self, offset: usize) -> Option<&LinkSpan> {
        self.links.iter().find(|span| span.contains(offset))
    }

    /// URL to open for a click at `offset`: the span's text, normalized.
    pub fn link_url_at(&self, offset: usize) -> Option<String> {
        self.link_at(offset)
            .map(|span| normalize_url(&span.text))
            .filter(|url| !url.is_empty())
    }

    fn refresh_links(&mut self) {
        self.links = if self.links_enabled {
            scan_links(&self.text)
        } else {
            Vec::new()
        };
    }

    /// Text for "Copy": outer whitespace trimmed, None when there is nothing to copy.
    pub fn clipboard_text(&self) -> Option<String> {
        let text = self.text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// The list "Apply" would commit.
    pub fn parsed_urls(&self) -> Vec<String> {
        parse_url_lines(&self.text)
    }

    /// Commits the edited list into the session, replacing the group's whole
    /// list. Returns the number of URLs stored.
    pub fn apply(self, session: &mut Session) -> Result<usize, SessionError> {
        let urls = self.parsed_urls();
        let count = urls.len();
        session.commit(self.group.name(), urls)?;
        tracing::info!("applied {} url(s) to group {:?}", count, self.group.name());
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn work_session() -> Session {
        Session::from_json_str(r#"{"Work": ["example.com", "https://x.test"], "Home": ["h.test"]}"#)
            .unwrap()
    }

    #[test]
    fn seeds_one_url_per_line() {
        let editor = GroupEditor::new(
            GroupHandle::new("g"),
            &strings(&[" a.test ", "", "   ", "https://b.test"]),
        );
        assert_eq!(editor.text(), "a.test\nhttps://b.test");
        assert_eq!(editor.title(), "URLs - g");
        assert_eq!(GroupEditor::new(GroupHandle::new(""), &[]).title(), "URLs");
    }

    #[test]
    fn undo_right_after_opening_is_noop() {
        let session = work_session();
        let mut editor = GroupEditor::for_group(&session, "Work").unwrap();
        assert!(!editor.can_undo());
        assert!(!editor.undo());
        assert!(!editor.redo());
        assert_eq!(editor.text(), "example.com\nhttps://x.test");
    }

    #[test]
    fn undo_reverts_only_user_edits() {
        let mut editor = GroupEditor::new(GroupHandle::new("g"), &strings(&["a.test"]));
        editor.set_text("a.test\nb.test");
        assert!(editor.undo());
        assert_eq!(editor.text(), "a.test");
        assert!(!editor.undo());
        assert!(editor.redo());
        assert_eq!(editor.text(), "a.test\nb.test");
    }

    #[test]
    fn set_text_same_content_is_not_an_edit() {
        let mut editor = GroupEditor::new(GroupHandle::new("g"), &strings(&["a"]));
        assert!(!editor.set_text("a"));
        assert!(!editor.can_undo());
    }

    #[test]
    fn links_follow_current_content() {
        let mut editor = GroupEditor::new(GroupHandle::new("g"), &strings(&["a.test", "b.test"]));
        assert!(editor.link_spans().is_empty());

        editor.set_links_enabled(true);
        let texts: Vec<&str> = editor.link_spans().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["a.test", "b.test"]);

        // A line added while enabled is a link after the modification.
        editor.set_text("a.test\nb.test\nc.test");
        let c_offset = editor.text().find("c.test").unwrap();
        assert_eq!(editor.link_url_at(c_offset + 1).as_deref(), Some("http://c.test"));

        // A removed line no longer resolves to its old URL.
        editor.set_text("c.test");
        assert_eq!(editor.link_spans().len(), 1);
        assert_eq!(editor.link_url_at(0).as_deref(), Some("http://c.test"));
        assert_eq!(editor.link_url_at(8), None);
    }

    #[test]
    fn enabling_after_edit_uses_current_text() {
        let mut editor = GroupEditor::new(GroupHandle::new("g"), &strings(&["old.test"]));
        editor.set_text("new.test\nhttps://other.test");
        editor.set_links_enabled(true);
        let texts: Vec<&str> = editor.link_spans().iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["new.test", "https://other.test"]);

        editor.set_links_enabled(false);
        assert!(editor.link_spans().is_empty());
        assert_eq!(editor.link_url_at(0), None);
    }

    #[test]
    fn undo_refreshes_links() {
        let mut editor = GroupEditor::new(GroupHandle::new("g"), &strings(&["a.test"]));
        editor.set_links_enabled(true);
        editor.set_text("a.test\nb.test");
        assert_eq!(editor.link_spans().len(), 2);
        editor.undo();
        assert_eq!(editor.link_spans().len(), 1);
    }

    #[test]
    fn link_display_is_raw_and_open_is_normalized() {
        let mut editor = GroupEditor::new(GroupHandle::new("g"), &strings(&["x.test"]));
        editor.set_text("  x.test");
        editor.set_links_enabled(true);
        assert_eq!(editor.link_spans()[0].text, "  x.test");
        assert_eq!(editor.link_url_at(3).as_deref(), Some("http://x.test"));
    }

    #[test]
    fn clipboard_text_trims_outer_whitespace() {
        let mut editor = GroupEditor::new(GroupHandle::new("g"), &[]);
        assert_eq!(editor.clipboard_text(), None);
        editor.set_text("\n  a.test  \n b.test \n\n");
        assert_eq!(editor.clipboard_text().as_deref(), Some("a.test  \n b.test"));
    }

    #[test]
    fn apply_commits_trimmed_non_blank_lines() {
        let mut session = work_session();
        let mut editor = GroupEditor::for_group(&session, "Work").unwrap();
        editor.set_text("example.com\n\nhttps://y.test");
        assert_eq!(editor.apply(&mut session).unwrap(), 2);
        assert_eq!(
            session.urls("Work").unwrap(),
            strings(&["example.com", "https://y.test"]).as_slice()
        );
        assert_eq!(session.urls("Home").unwrap(), strings(&["h.test"]).as_slice());
    }

    #[test]
    fn dropping_editor_discards_edits() {
        let session = work_session();
        let mut editor = GroupEditor::for_group(&session, "Work").unwrap();
        editor.set_text("");
        drop(editor);
        assert_eq!(session, work_session());
    }

    #[test]
    fn apply_to_missing_group_fails() {
        let session = work_session();
        let editor = GroupEditor::for_group(&session, "Work").unwrap();
        let mut other = Session::new();
        assert!(matches!(
            editor.apply(&mut other),
            Err(SessionError::UnknownGroup(_))
        ));
        assert!(GroupEditor::for_group(&session, "Nope").is_err());
    }
}
