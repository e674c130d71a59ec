//! Undo/redo history for the editor text.

/// One reversible change: `removed` was replaced by `inserted` at byte `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    start: usize,
    removed: String,
    inserted: String,
}

impl Edit {
    /// Smallest replacement turning `before` into `after`, or None if equal.
    fn between(before: &str, after: &str) -> Option<Edit> {
        if before == after {
            return None;
        }
        let prefix: usize = before
            .chars()
            .zip(after.chars())
            .take_while(|(a, b)| a == b)
            .map(|(c, _)| c.len_utf8())
            .sum();
        // Zipping the remainders keeps the suffix from overlapping the prefix.
        let suffix: usize = before[prefix..]
            .chars()
            .rev()
            .zip(after[prefix..].chars().rev())
            .take_while(|(a, b)| a == b)
            .map(|(c, _)| c.len_utf8())
            .sum();
        Some(Edit {
            start: prefix,
            removed: before[prefix..before.len() - suffix].to_string(),
            inserted: after[prefix..after.len() - suffix].to_string(),
        })
    }

    fn is_word_typing(&self) -> bool {
        self.removed.is_empty()
            && !self.inserted.is_empty()
            && !self.inserted.chars().any(char::is_whitespace)
    }

    /// Continues a typing run: both are word insertions and `next` starts where `self` ended.
    fn extends(&self, next: &Edit) -> bool {
        self.is_word_typing()
            && next.is_word_typing()
            && next.start == self.start + self.inserted.len()
    }

    fn undo(&self, text: &mut String) {
        text.replace_range(self.start..self.start + self.inserted.len(), &self.removed);
    }

    fn redo(&self, text: &mut String) {
        text.replace_range(self.start..self.start + self.removed.len(), &self.inserted);
    }
}

/// Unbounded undo/redo stacks.
///
/// Consecutive word characters typed at the cursor form one undo step;
/// whitespace, line breaks, deletions and pastes each start a new one.
#[derive(Debug, Default)]
pub struct UndoHistory {
    undo: Vec<Edit>,
    redo: Vec<Edit>,
    /// Whether the top undo step may still absorb typing.
    open_run: bool,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the change `before` -> `after`. Clears the redo stack.
    pub fn record(&mut self, before: &str, after: &str) {
        let Some(edit) = Edit::between(before, after) else {
            return;
        };
        self.redo.clear();
        match self.undo.last_mut() {
            Some(last) if self.open_run && last.extends(&edit) => {
                last.inserted.push_str(&edit.inserted);
            }
            _ => {
                self.open_run = edit.is_word_typing();
                self.undo.push(edit);
            }
        }
    }

    /// Reverts the latest step on `text`. False when there is nothing to undo.
    pub fn undo(&mut self, text: &mut String) -> bool {
        let Some(edit) = self.undo.pop() else {
            return false;
        };
        edit.undo(text);
        self.redo.push(edit);
        self.open_run = false;
        true
    }

    /// Reapplies the latest undone step on `text`. False when there is nothing to redo.
    pub fn redo(&mut self, text: &mut String) -> bool {
        let Some(edit) = self.redo.pop() else {
            return false;
        };
        edit.redo(text);
        self.undo.push(edit);
        self.open_run = false;
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }
}
