//! Completion controller
//!
//! Filters a candidate dictionary by the text at the caret and tracks the
//! suggestion popup through two states, hidden and visible. The controller
//! only decides; the editor applies its decisions to the host.

use serde::{Deserialize, Serialize};

use crate::host::Point;

/// How candidates are compared with the prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchCase {
    Sensitive,
    #[default]
    Insensitive,
}

impl MatchCase {
    /// Whether `candidate` starts with `prefix` under this policy
    pub fn starts_with(&self, candidate: &str, prefix: &str) -> bool {
        match self {
            MatchCase::Sensitive => candidate.starts_with(prefix),
            MatchCase::Insensitive => candidate
                .to_lowercase()
                .starts_with(&prefix.to_lowercase()),
        }
    }
}

/// Popup state, mutated in place across keystrokes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompletionState {
    pub visible: bool,
    pub candidates: Vec<String>,
    /// Always within `[0, candidates.len())` while visible
    pub selected: usize,
    pub anchor: Point,
}

impl CompletionState {
    /// The highlighted candidate, if the popup is showing
    pub fn selected_candidate(&self) -> Option<&str> {
        if !self.visible {
            return None;
        }
        self.candidates.get(self.selected).map(String::as_str)
    }
}

/// What the host should do with the popup after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Show (or refresh) the popup with the current candidates
    Show,
    /// Hide the popup
    Hide,
}

/// Prefix-filtered completion over an ordered dictionary
#[derive(Debug, Clone, Default)]
pub struct CompletionController {
    dictionary: Vec<String>,
    match_case: MatchCase,
    state: CompletionState,
}

impl CompletionController {
    pub fn new(match_case: MatchCase) -> Self {
        Self {
            dictionary: Vec::new(),
            match_case,
            state: CompletionState::default(),
        }
    }

    /// Replace the candidate dictionary; order is preserved as given
    pub fn set_dictionary<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dictionary = candidates.into_iter().map(Into::into).collect();
    }

    pub fn dictionary(&self) -> &[String] {
        &self.dictionary
    }

    pub fn match_case(&self) -> MatchCase {
        self.match_case
    }

    pub fn state(&self) -> &CompletionState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    /// Dictionary entries starting with `prefix`, in dictionary order
    pub fn filter(&self, prefix: &str) -> Vec<String> {
        self.dictionary
            .iter()
            .filter(|candidate| self.match_case.starts_with(candidate, prefix))
            .cloned()
            .collect()
    }

    /// Re-filter after a text change
    ///
    /// The popup shows only for a non-empty prefix that does not end in
    /// a call delimiter and matches at least one candidate.
    pub fn update(&mut self, prefix: &str, anchor: Point) -> Transition {
        let candidates = self.filter(prefix);
        if candidates.is_empty() || prefix.is_empty() || prefix.ends_with(['(', ')']) {
            self.hide();
            return Transition::Hide;
        }
        self.state = CompletionState {
            visible: true,
            candidates,
            selected: 0,
            anchor,
        };
        Transition::Show
    }

    /// Move the selection down, stopping at the last candidate
    pub fn move_down(&mut self) -> bool {
        if !self.state.visible {
            return false;
        }
        let last = self.state.candidates.len().saturating_sub(1);
        self.state.selected = (self.state.selected + 1).min(last);
        true
    }

    /// Move the selection up, stopping at the first candidate
    pub fn move_up(&mut self) -> bool {
        if !self.state.visible {
            return false;
        }
        self.state.selected = self.state.selected.saturating_sub(1);
        true
    }

    /// Hide without committing; returns whether the popup was showing
    pub fn cancel(&mut self) -> bool {
        let was_visible = self.state.visible;
        self.hide();
        was_visible
    }

    /// Take the selected candidate and hide; `None` while hidden
    pub fn accept(&mut self) -> Option<String> {
        let chosen = self.state.selected_candidate().map(str::to_string);
        if chosen.is_some() {
            self.hide();
        }
        chosen
    }

    fn hide(&mut self) {
        self.state.visible = false;
        self.state.candidates.clear();
        self.state.selected = 0;
    }
}
