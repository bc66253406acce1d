//! Host widget capabilities
//!
//! The core never owns rendering, scrolling, or input routing. Everything
//! it needs from the editable text surface goes through this trait.
//! Offsets are character offsets into the whole buffer, with lines joined
//! by a single `'\n'`.

use crate::syntax::Color;

/// A screen position in host coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shift by a fixed margin
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The host's selection: a caret offset plus a selected length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub len: usize,
}

impl Selection {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// An empty selection at `start`
    pub fn caret(start: usize) -> Self {
        Self { start, len: 0 }
    }
}

/// Capabilities the editable text surface must expose
pub trait Host {
    /// Whole-buffer text
    fn text(&self) -> String;

    /// Replace the whole buffer
    fn set_text(&mut self, text: &str);

    /// Line-split view of the buffer
    fn lines(&self) -> Vec<String>;

    /// Offset of the first character of line `line`
    fn first_char_index_of_line(&self, line: usize) -> usize;

    /// Line containing the character at `index`
    fn line_from_char_index(&self, index: usize) -> usize;

    /// Character offset nearest to a screen position
    fn char_index_from_position(&self, point: Point) -> usize;

    /// Current selection
    fn selection(&self) -> Selection;

    /// Select `len` characters starting at `start`
    fn set_selection(&mut self, start: usize, len: usize);

    /// Color the current selection; an empty selection sets the color
    /// used for the next typed input
    fn set_selection_color(&mut self, color: Color);

    /// Screen position of the caret
    fn caret_position(&self) -> Point;

    /// Show the suggestion list at `anchor`
    fn show_suggestions(&mut self, candidates: &[String], anchor: Point);

    /// Move the suggestion list's highlight to `index`
    fn select_suggestion(&mut self, index: usize) {
        let _ = index;
    }

    /// Hide the suggestion list
    fn hide_suggestions(&mut self);

    /// Return keyboard focus to the editing surface
    fn focus_editor(&mut self);
}
