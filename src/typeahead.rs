//! Generic typeahead field: one implementation, configured per use site.
//!
//! Skills and languages use it in collection mode (commits append chips),
//! country/program/school in single-value mode (the caller mirrors the raw
//! text into the draft and a commit overwrites it). The field owns its raw
//! input, the derived suggestion list, the keyboard highlight, and the
//! debounce timer that defers filtering until typing pauses.

use crate::suggest::{self, Entry, MatchMode};
use crate::timer::Debounce;

/// Quiet period after the last keystroke before suggestions recompute.
pub const DEBOUNCE_MS: f64 = 200.0;

/// What a backspace press did, so the caller can react to chip removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backspace {
    /// A character was deleted from the input text.
    DeletedChar,
    /// The input was already empty: the caller should remove the most
    /// recently committed entry from its collection.
    RemoveLastEntry,
}

/// Ephemeral typing state for one typeahead field.
pub struct Typeahead {
    source: &'static [Entry],
    mode: MatchMode,
    input: String,
    suggestions: Vec<&'static Entry>,
    /// Highlighted suggestion index; `None` means no highlight.
    highlight: Option<usize>,
    debounce: Debounce,
}

impl Typeahead {
    pub fn new(source: &'static [Entry], mode: MatchMode) -> Self {
        Self {
            source,
            mode,
            input: String::new(),
            suggestions: Vec::new(),
            highlight: None,
            debounce: Debounce::new(DEBOUNCE_MS),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn suggestions(&self) -> &[&'static Entry] {
        &self.suggestions
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Append a typed character and reschedule the suggestion recompute.
    pub fn type_char(&mut self, c: char, now_ms: f64) {
        self.input.push(c);
        self.debounce.schedule(now_ms);
    }

    /// Replace the raw text without deriving suggestions (used when restoring
    /// a persisted draft's display text).
    pub fn set_text(&mut self, text: &str) {
        self.input = text.to_string();
        self.suggestions.clear();
        self.highlight = None;
        self.debounce.cancel();
    }

    /// Handle backspace. On an empty input this reports
    /// [`Backspace::RemoveLastEntry`] so collection fields can drop their
    /// last chip.
    pub fn backspace(&mut self, now_ms: f64) -> Backspace {
        if self.input.is_empty() {
            return Backspace::RemoveLastEntry;
        }
        self.input.pop();
        if self.input.is_empty() {
            // No fallback list for an empty query; drop the pending timer too.
            self.suggestions.clear();
            self.highlight = None;
            self.debounce.cancel();
        } else {
            self.debounce.schedule(now_ms);
        }
        Backspace::DeletedChar
    }

    /// Poll the debounce timer and recompute suggestions when it fires.
    /// Returns true when the suggestion list changed this frame.
    pub fn tick(&mut self, now_ms: f64, exclude: &[String]) -> bool {
        if !self.debounce.poll(now_ms) {
            return false;
        }
        self.suggestions = suggest::query(self.source, &self.input, self.mode, exclude);
        self.highlight = None;
        true
    }

    /// Move the highlight down, wrapping from the last suggestion to the
    /// first. With no suggestions this is a no-op.
    pub fn move_down(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.highlight = Some(match self.highlight {
            Some(i) if i + 1 < self.suggestions.len() => i + 1,
            Some(_) => 0,
            None => 0,
        });
    }

    /// Move the highlight up, wrapping from the first suggestion to the last.
    pub fn move_up(&mut self) {
        if self.suggestions.is_empty() {
            return;
        }
        self.highlight = Some(match self.highlight {
            Some(0) | None => self.suggestions.len() - 1,
            Some(i) => i - 1,
        });
    }

    /// Commit on Enter: the highlighted suggestion if there is one, otherwise
    /// the raw typed text verbatim (free-text entries are allowed). Returns
    /// `None` when there is nothing to commit. Always clears the field.
    pub fn commit(&mut self) -> Option<String> {
        let value = match self.highlight {
            Some(i) => self.suggestions.get(i).map(|e| e.label.to_string()),
            None => {
                let trimmed = self.input.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        };
        self.reset();
        value
    }

    /// Commit a clicked suggestion by index.
    pub fn select(&mut self, index: usize) -> Option<String> {
        let value = self.suggestions.get(index).map(|e| e.label.to_string());
        if value.is_some() {
            self.reset();
        }
        value
    }

    /// Drop the suggestion popup (Esc / focus loss) without touching the text.
    pub fn dismiss(&mut self) {
        self.suggestions.clear();
        self.highlight = None;
        self.debounce.cancel();
    }

    fn reset(&mut self) {
        self.input.clear();
        self.suggestions.clear();
        self.highlight = None;
        self.debounce.cancel();
    }
}
