//! The editor-facing core
//!
//! `CodeBox` wires the caret resolver, completion controller, and line
//! highlighter to a host widget. The host forwards its text-change and key
//! notifications here; everything runs synchronously on the caller's thread
//! in the order resolve caret, update completion, highlight.

use tracing::{debug, trace};

use crate::caret;
use crate::completion::{CompletionController, CompletionState, Transition};
use crate::config::Config;
use crate::error::Result;
use crate::guard::SuppressionGuard;
use crate::highlighter::LineHighlighter;
use crate::host::Host;
use crate::input::Key;

/// Whether the core consumed a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The host must not apply the key's default action
    Handled,
    /// The host should process the key normally
    Ignored,
}

/// Highlighting and completion over one host widget
pub struct CodeBox<H: Host> {
    host: H,
    highlighter: LineHighlighter,
    completion: CompletionController,
    guard: SuppressionGuard,
    popup_offset: (i32, i32),
    passes: usize,
    /// Set when an accept key's press was consumed by the popup
    accept_armed: bool,
}

impl<H: Host> CodeBox<H> {
    /// Create a core for `host` with the given settings
    ///
    /// Fails only if a classifier pattern does not compile.
    pub fn new(host: H, config: &Config) -> Result<Self> {
        let highlighter = LineHighlighter::new(config.classifiers()?, config.colors.clone());
        let completion = CompletionController::new(config.match_case());
        Ok(Self::with_parts(
            host,
            highlighter,
            completion,
            (config.popup_offset_x, config.popup_offset_y),
        ))
    }

    /// Assemble a core from prebuilt parts
    pub fn with_parts(
        host: H,
        highlighter: LineHighlighter,
        completion: CompletionController,
        popup_offset: (i32, i32),
    ) -> Self {
        Self {
            host,
            highlighter,
            completion,
            guard: SuppressionGuard::new(),
            popup_offset,
            passes: 0,
            accept_armed: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Handle on this editor's suppression flag
    pub fn suppression(&self) -> SuppressionGuard {
        self.guard.clone()
    }

    /// Replace the completion dictionary
    pub fn set_dictionary<I, S>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completion.set_dictionary(candidates);
    }

    pub fn completion_state(&self) -> &CompletionState {
        self.completion.state()
    }

    pub fn highlighter(&self) -> &LineHighlighter {
        &self.highlighter
    }

    /// Highlight passes run since creation
    pub fn highlight_passes(&self) -> usize {
        self.passes
    }

    pub fn current_line_index(&self) -> usize {
        caret::current_line_index(&self.host)
    }

    pub fn current_line_text(&self) -> String {
        caret::current_line_text(&self.host)
    }

    /// The host's text changed
    ///
    /// Ignored while this editor is writing derived state; otherwise
    /// refilters completion and recolors the caret's line.
    pub fn on_text_changed(&mut self) {
        if self.guard.is_suppressed() {
            trace!("text change ignored while suppressed");
            return;
        }

        let line = self.current_line_index();
        let prefix = self.current_line_text();
        let (dx, dy) = self.popup_offset;
        let anchor = self.host.caret_position().offset(dx, dy);

        match self.completion.update(&prefix, anchor) {
            Transition::Show => {
                let state = self.completion.state();
                debug!(prefix = %prefix, count = state.candidates.len(), "showing suggestions");
                self.host.show_suggestions(&state.candidates, state.anchor);
            }
            Transition::Hide => self.host.hide_suggestions(),
        }

        self.highlight_line(line);
    }

    /// A key went down
    ///
    /// While suggestions are showing, Down/Up move the selection, Escape
    /// cancels, and the accept keys are swallowed so that the matching
    /// key-up can commit.
    pub fn on_key_down(&mut self, key: Key) -> KeyOutcome {
        self.accept_armed = false;
        if !self.completion.is_visible() {
            return KeyOutcome::Ignored;
        }

        match key {
            Key::Down => {
                self.completion.move_down();
                self.host.select_suggestion(self.completion.state().selected);
                KeyOutcome::Handled
            }
            Key::Up => {
                self.completion.move_up();
                self.host.select_suggestion(self.completion.state().selected);
                KeyOutcome::Handled
            }
            Key::Enter | Key::Space => {
                self.accept_armed = true;
                KeyOutcome::Handled
            }
            Key::Escape => {
                self.cancel();
                KeyOutcome::Handled
            }
            _ => {
                if self.current_line_text().is_empty() {
                    self.cancel();
                }
                KeyOutcome::Ignored
            }
        }
    }

    /// A key came up
    ///
    /// Commits only when the matching accept press was swallowed by the
    /// popup, never for an accept key the host already applied.
    pub fn on_key_up(&mut self, key: Key) {
        let armed = std::mem::take(&mut self.accept_armed);
        if armed && key.is_accept() {
            self.commit();
        }
    }

    /// Replace the caret's line with the selected candidate
    ///
    /// Returns false, changing nothing, when no suggestion is showing.
    pub fn commit(&mut self) -> bool {
        if !self.completion.is_visible() {
            return false;
        }
        let line = self.current_line_index();
        let Some(chosen) = self.completion.accept() else {
            return false;
        };
        let lines = self.host.lines();
        let Some(old) = lines.get(line) else {
            self.host.hide_suggestions();
            return false;
        };

        {
            let _suppressed = self.guard.suppress();
            let line_start = self.host.first_char_index_of_line(line);
            let old_len = old.chars().count();
            let text: Vec<char> = self.host.text().chars().collect();
            let mut replaced: String = text[..line_start].iter().collect();
            replaced.push_str(&chosen);
            replaced.extend(&text[line_start + old_len..]);

            self.host.set_text(&replaced);
            self.host
                .set_selection(line_start + chosen.chars().count(), 0);
        }

        debug!(line, candidate = %chosen, "completion committed");
        self.host.hide_suggestions();
        self.host.focus_editor();
        self.highlight_all();
        true
    }

    /// Hide suggestions without touching the text
    pub fn cancel(&mut self) -> bool {
        let was_visible = self.completion.cancel();
        if was_visible {
            debug!("suggestions cancelled");
            self.host.hide_suggestions();
        }
        was_visible
    }

    /// Recolor one line; out-of-range indices are ignored
    pub fn highlight_line(&mut self, line: usize) -> bool {
        let ran = self
            .highlighter
            .highlight_line(&mut self.host, &self.guard, line);
        if ran {
            self.passes += 1;
        }
        ran
    }

    /// Recolor every line, e.g. after loading a document
    pub fn highlight_all(&mut self) -> usize {
        let passes = self.highlighter.highlight_all(&mut self.host, &self.guard);
        self.passes += passes;
        passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Point, Selection};
    use crate::memory::MemoryHost;
    use crate::syntax::Color;

    fn codebox(text: &str, words: &[&str]) -> CodeBox<MemoryHost> {
        let mut host = MemoryHost::with_text(text);
        host.set_selection(text.chars().count(), 0);
        let mut cb = CodeBox::new(host, &Config::default()).unwrap();
        cb.set_dictionary(words.iter().copied());
        let guard = cb.suppression();
        cb.host_mut().bind(guard);
        cb
    }

    fn press(cb: &mut CodeBox<MemoryHost>, key: Key) -> KeyOutcome {
        let outcome = cb.on_key_down(key);
        cb.on_key_up(key);
        outcome
    }

    #[test]
    fn test_call_colors() {
        let mut cb = codebox("foo(123)", &[]);
        cb.on_text_changed();
        let p = cb.highlighter().palette().clone();
        let colors = cb.host().line_colors(0);
        assert_eq!(&colors[..3], &[p.default; 3]);
        assert_eq!(colors[3], p.punctuation);
        assert_eq!(&colors[4..7], &[p.number; 3]);
        assert_eq!(colors[7], p.punctuation);
    }

    #[test]
    fn test_commit_selected_candidate() {
        let mut cb = codebox("Att", &["Attack", "AttackAir"]);
        cb.on_text_changed();
        assert!(cb.completion_state().visible);
        assert_eq!(cb.completion_state().candidates, vec!["Attack", "AttackAir"]);
        assert!(cb.host().popup().is_some());

        assert_eq!(press(&mut cb, Key::Down), KeyOutcome::Handled);
        assert_eq!(cb.host().popup().map(|p| p.selected), Some(1));
        assert_eq!(press(&mut cb, Key::Enter), KeyOutcome::Handled);

        assert_eq!(cb.host().text(), "AttackAir");
        assert_eq!(cb.host().selection(), Selection::caret(9));
        assert!(!cb.completion_state().visible);
        assert!(cb.host().popup().is_none());
        assert!(cb.host().is_focused());
    }

    #[test]
    fn test_commit_on_middle_line() {
        let mut cb = codebox("1\nAtt\n// end", &["Attack"]);
        cb.host_mut().set_selection(5, 0);
        cb.on_text_changed();
        assert!(cb.completion_state().visible);

        press(&mut cb, Key::Space);
        assert_eq!(cb.host().text(), "1\nAttack\n// end");
        assert_eq!(cb.host().caret(), 8);
        let p = cb.highlighter().palette().clone();
        assert_eq!(cb.host().line_colors(0), vec![p.number]);
        assert!(cb.host().line_colors(2).iter().all(|c| *c == p.comment));
    }

    #[test]
    fn test_empty_line_never_shows() {
        let mut cb = codebox("", &["Attack", "AttackAir"]);
        cb.on_text_changed();
        assert!(!cb.completion_state().visible);
        assert!(cb.host().popup().is_none());
    }

    #[test]
    fn test_trailing_paren_hides() {
        let mut cb = codebox("Foo(", &["Foo"]);
        cb.on_text_changed();
        assert!(!cb.completion_state().visible);
    }

    #[test]
    fn test_hex_and_comment() {
        let mut cb = codebox("0x1F // comment", &[]);
        cb.on_text_changed();
        let p = cb.highlighter().palette().clone();
        let colors = cb.host().line_colors(0);
        assert_eq!(&colors[..4], &[p.hex; 4]);
        assert_eq!(colors[4], p.default);
        assert!(colors[5..].iter().all(|c| *c == p.comment));
    }

    #[test]
    fn test_cancel_keeps_text_and_caret() {
        let mut cb = codebox("Att", &["Attack"]);
        cb.on_text_changed();
        assert!(cb.completion_state().visible);

        assert_eq!(press(&mut cb, Key::Escape), KeyOutcome::Handled);
        assert!(!cb.completion_state().visible);
        assert!(cb.host().popup().is_none());
        assert_eq!(cb.host().text(), "Att");
        assert_eq!(cb.host().selection(), Selection::caret(3));
    }

    #[test]
    fn test_keys_pass_through_when_hidden() {
        let mut cb = codebox("x", &["Attack"]);
        cb.on_text_changed();
        assert_eq!(press(&mut cb, Key::Enter), KeyOutcome::Ignored);
        assert_eq!(press(&mut cb, Key::Down), KeyOutcome::Ignored);
        assert_eq!(cb.host().text(), "x");
        assert!(!cb.commit());
    }

    #[test]
    fn test_typed_space_does_not_commit() {
        let mut cb = codebox("Set", &["Set Flag"]);
        cb.on_text_changed();
        assert!(cb.completion_state().visible);
        assert_eq!(press(&mut cb, Key::Escape), KeyOutcome::Handled);

        // Space lands in the text, and the refilter reopens the popup
        assert_eq!(cb.on_key_down(Key::Space), KeyOutcome::Ignored);
        cb.host_mut().type_str(" ");
        cb.on_text_changed();
        assert!(cb.completion_state().visible);
        cb.on_key_up(Key::Space);

        assert_eq!(cb.host().text(), "Set ");
        assert!(cb.completion_state().visible);

        assert_eq!(press(&mut cb, Key::Space), KeyOutcome::Handled);
        assert_eq!(cb.host().text(), "Set Flag");
    }

    #[test]
    fn test_key_up_without_consumed_press() {
        let mut cb = codebox("Att", &["Attack"]);
        cb.on_text_changed();
        cb.on_key_up(Key::Enter);
        assert_eq!(cb.host().text(), "Att");
        assert!(cb.completion_state().visible);
    }

    #[test]
    fn test_empty_line_cancels_and_passes_through() {
        let mut cb = codebox("Att", &["Attack"]);
        cb.on_text_changed();
        assert!(cb.completion_state().visible);

        // Delete the whole line through a selection without refiltering
        cb.host_mut().set_selection(0, 3);
        cb.host_mut().backspace();
        assert_eq!(cb.current_line_text(), "");

        assert_eq!(cb.on_key_down(Key::Backspace), KeyOutcome::Ignored);
        assert!(!cb.completion_state().visible);
        assert!(cb.host().popup().is_none());
        assert_eq!(cb.host().text(), "");
    }

    #[test]
    fn test_typing_refilters() {
        let mut cb = codebox("", &["Attack", "AttackAir", "Defend"]);
        cb.host_mut().type_str("A");
        cb.on_text_changed();
        assert_eq!(cb.completion_state().candidates.len(), 2);

        cb.host_mut().type_str("ttackA");
        cb.on_text_changed();
        assert_eq!(cb.completion_state().candidates, vec!["AttackAir"]);

        cb.host_mut().type_str("x");
        cb.on_text_changed();
        assert!(!cb.completion_state().visible);
        assert!(cb.host().popup().is_none());
    }

    #[test]
    fn test_popup_anchor_offset() {
        let host = MemoryHost::with_text("Att").with_cell_size(8, 16);
        let config = Config {
            popup_offset_x: 2,
            ..Config::default()
        };
        let mut cb = CodeBox::new(host, &config).unwrap();
        cb.set_dictionary(["Attack"]);
        cb.host_mut().set_selection(3, 0);
        cb.on_text_changed();
        assert_eq!(cb.host().popup().map(|p| p.anchor), Some(Point::new(26, 10)));
    }

    #[test]
    fn test_single_pass_per_change() {
        let mut cb = codebox("", &["foo"]);
        cb.host_mut().type_str("f(1)");
        let user_notices = cb.host_mut().take_notices();
        assert_eq!(user_notices.len(), 1);
        assert!(!user_notices[0].suppressed);

        cb.on_text_changed();
        assert_eq!(cb.highlight_passes(), 1);

        // Feed back every notification the pass raised, as a host would
        let raised = cb.host_mut().take_notices();
        assert!(!raised.is_empty());
        for notice in raised {
            if !notice.suppressed {
                cb.on_text_changed();
            }
        }
        assert_eq!(cb.highlight_passes(), 1);
        assert!(!cb.suppression().is_suppressed());
    }

    #[test]
    fn test_suppressed_change_is_noop() {
        let mut cb = codebox("Att 1", &["Att"]);
        let guard = cb.suppression();
        {
            let _token = guard.suppress();
            cb.on_text_changed();
        }
        assert_eq!(cb.highlight_passes(), 0);
        assert_eq!(cb.host().color_writes(), 0);
        assert!(!cb.completion_state().visible);
    }

    #[test]
    fn test_editors_do_not_share_suppression() {
        let mut a = codebox("1", &[]);
        let mut b = codebox("2", &[]);
        let guard = a.suppression();
        let _token = guard.suppress();
        a.on_text_changed();
        b.on_text_changed();
        assert_eq!(a.highlight_passes(), 0);
        assert_eq!(b.highlight_passes(), 1);
    }

    #[test]
    fn test_commit_notifications_suppressed() {
        let mut cb = codebox("Att", &["Attack"]);
        cb.on_text_changed();
        cb.host_mut().take_notices();
        press(&mut cb, Key::Enter);
        assert!(cb.host_mut().take_notices().iter().all(|n| n.suppressed));
        assert_eq!(cb.host().typing_color(), Color::Default);
    }

    #[test]
    fn test_highlight_all_on_load() {
        let mut cb = codebox("", &[]);
        cb.host_mut().load("1\n\"two\"\n0x3");
        assert_eq!(cb.highlight_all(), 3);
        let p = cb.highlighter().palette().clone();
        assert_eq!(cb.host().line_colors(2), vec![p.hex; 3]);
    }
}
