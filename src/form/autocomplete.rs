use crate::ops::candidates::{Candidate, Corpus, MAX_CANDIDATES, filter_candidates_with_limit};
use crate::parse::tag::{Tag, TagKind, locate_tag};

/// Keys the autocomplete dropdown reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    /// Anything else; text changes arrive separately
    Other,
}

/// What a key did to the dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Dropdown closed, or a key it does not handle
    Ignored,
    /// Highlight moved (or stayed put at an edge)
    Moved,
    /// Enter with nothing highlighted: swallowed so the form is not submitted
    Held,
    /// Enter on a highlighted entry; the caller commits it
    Accept(Candidate),
    /// Escape closed the dropdown
    Dismissed,
}

/// Dropdown state for the tag under the caret.
///
/// Rebuilt from the buffer on every change. While closed there is no tag, no
/// candidates and no highlight.
#[derive(Debug, Clone)]
pub struct AutocompleteState {
    tag: Option<Tag>,
    filtered: Vec<Candidate>,
    highlighted: Option<usize>,
    max_results: usize,
}

impl Default for AutocompleteState {
    fn default() -> Self {
        AutocompleteState::new(MAX_CANDIDATES)
    }
}

impl AutocompleteState {
    pub fn new(max_results: usize) -> Self {
        AutocompleteState {
            tag: None,
            filtered: Vec::new(),
            highlighted: None,
            max_results,
        }
    }

    pub fn set_max_results(&mut self, max_results: usize) {
        self.max_results = max_results;
    }

    pub fn is_active(&self) -> bool {
        self.tag.is_some()
    }

    /// Open with at least one entry to show
    pub fn is_visible(&self) -> bool {
        self.is_active() && !self.filtered.is_empty()
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    pub fn kind(&self) -> Option<TagKind> {
        self.tag.as_ref().map(|t| t.kind)
    }

    pub fn query(&self) -> &str {
        self.tag.as_ref().map_or("", |t| t.query.as_str())
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.filtered
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_entry(&self) -> Option<&Candidate> {
        self.highlighted.and_then(|i| self.filtered.get(i))
    }

    /// Re-locate the tag and refilter.
    ///
    /// Staying on the same tag keeps the highlight, clamped to the new
    /// candidate count. Moving to another tag, or out of one, drops it.
    pub fn refresh(&mut self, buffer: &str, caret: usize, corpus: &Corpus) {
        let Some(tag) = locate_tag(buffer, caret) else {
            if self.is_active() {
                log::debug!("autocomplete closed: caret left the tag");
            }
            self.close();
            return;
        };

        let same_tag = self
            .tag
            .as_ref()
            .is_some_and(|prev| prev.start() == tag.start() && prev.kind == tag.kind);

        self.filtered = filter_candidates_with_limit(&tag.query, tag.kind, corpus, self.max_results);
        self.highlighted = if same_tag {
            self.clamped(self.highlighted)
        } else {
            None
        };
        log::debug!(
            "autocomplete {} query {:?}: {} candidates",
            tag.kind.label(),
            tag.query,
            self.filtered.len()
        );
        self.tag = Some(tag);
    }

    fn clamped(&self, index: Option<usize>) -> Option<usize> {
        let last = self.filtered.len().checked_sub(1)?;
        index.map(|i| i.min(last))
    }

    pub fn close(&mut self) {
        self.tag = None;
        self.filtered.clear();
        self.highlighted = None;
    }

    pub fn move_down(&mut self) {
        let Some(last) = self.filtered.len().checked_sub(1) else {
            self.highlighted = None;
            return;
        };
        self.highlighted = Some(match self.highlighted {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    pub fn move_up(&mut self) {
        self.highlighted = match self.highlighted {
            None | Some(0) => None,
            Some(i) => self.clamped(Some(i - 1)),
        };
    }

    pub fn handle_key(&mut self, key: Key) -> Navigation {
        if !self.is_active() {
            return Navigation::Ignored;
        }
        match key {
            Key::ArrowDown => {
                self.move_down();
                Navigation::Moved
            }
            Key::ArrowUp => {
                self.move_up();
                Navigation::Moved
            }
            Key::Enter => match self.highlighted_entry() {
                Some(entry) => Navigation::Accept(entry.clone()),
                None => Navigation::Held,
            },
            Key::Escape => {
                self.close();
                Navigation::Dismissed
            }
            Key::Other => Navigation::Ignored,
        }
    }
}
