//! In-memory host
//!
//! A complete `Host` over a plain character buffer with per-character
//! colors, a caret/selection, popup state, and fixed-size screen cells.
//! It backs the terminal front end and the test suite.

use tracing::trace;

use crate::guard::SuppressionGuard;
use crate::host::{Host, Point, Selection};
use crate::line::{split_lines, Line};
use crate::syntax::Color;

/// The suggestion list as last shown by the core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub candidates: Vec<String>,
    pub anchor: Point,
    /// Highlighted entry
    pub selected: usize,
}

/// A change notification raised by a write to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeNotice {
    /// Whether the bound guard was raised when the write happened
    pub suppressed: bool,
}

/// Host backed by memory
#[derive(Debug, Clone)]
pub struct MemoryHost {
    chars: Vec<char>,
    /// One color per character, newlines included
    colors: Vec<Color>,
    selection: Selection,
    /// Color applied to the next typed characters
    typing_color: Color,
    popup: Option<Popup>,
    focused: bool,
    cell_width: i32,
    line_height: i32,
    guard: Option<SuppressionGuard>,
    notices: Vec<ChangeNotice>,
    color_writes: usize,
}

impl MemoryHost {
    /// Create an empty buffer with one-unit screen cells
    pub fn new() -> Self {
        Self {
            chars: Vec::new(),
            colors: Vec::new(),
            selection: Selection::default(),
            typing_color: Color::Default,
            popup: None,
            focused: true,
            cell_width: 1,
            line_height: 1,
            guard: None,
            notices: Vec::new(),
            color_writes: 0,
        }
    }

    /// Create a buffer holding `text`, caret at the start
    pub fn with_text(text: &str) -> Self {
        let mut host = Self::new();
        host.load(text);
        host
    }

    /// Use `width` x `height` screen units per character cell
    pub fn with_cell_size(mut self, width: i32, height: i32) -> Self {
        self.cell_width = width.max(1);
        self.line_height = height.max(1);
        self
    }

    /// Record, for every change notification, whether `guard` was raised
    pub fn bind(&mut self, guard: SuppressionGuard) {
        self.guard = Some(guard);
    }

    /// Replace the buffer without raising a notification
    pub fn load(&mut self, text: &str) {
        self.chars = text.replace("\r\n", "\n").chars().collect();
        self.colors = vec![Color::Default; self.chars.len()];
        self.selection = Selection::default();
    }

    fn notify(&mut self) {
        let suppressed = self.guard.as_ref().is_some_and(|g| g.is_suppressed());
        trace!(suppressed, "buffer change notification");
        self.notices.push(ChangeNotice { suppressed });
    }

    /// Notifications raised since the last call
    pub fn take_notices(&mut self) -> Vec<ChangeNotice> {
        std::mem::take(&mut self.notices)
    }

    /// Number of color writes performed so far
    pub fn color_writes(&self) -> usize {
        self.color_writes
    }

    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    pub fn caret(&self) -> usize {
        self.selection.start
    }

    /// Colors of every character on line `line`
    pub fn line_colors(&self, line: usize) -> Vec<Color> {
        let Some(text) = self.lines().into_iter().nth(line) else {
            return Vec::new();
        };
        let start = self.first_char_index_of_line(line);
        self.colors[start..start + text.chars().count()].to_vec()
    }

    pub fn typing_color(&self) -> Color {
        self.typing_color
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Type `text` at the caret, replacing any selection
    pub fn type_str(&mut self, text: &str) {
        let start = self.selection.start;
        let end = start + self.selection.len;
        let inserted: Vec<char> = text.chars().collect();
        let count = inserted.len();
        self.chars.splice(start..end, inserted);
        self.colors
            .splice(start..end, std::iter::repeat(self.typing_color).take(count));
        self.selection = Selection::caret(start + count);
        self.notify();
    }

    /// Delete the selection, or the character before the caret
    pub fn backspace(&mut self) {
        let Selection { start, len } = self.selection;
        let range = if len > 0 {
            start..start + len
        } else if start > 0 {
            start - 1..start
        } else {
            return;
        };
        let new_caret = range.start;
        self.chars.drain(range.clone());
        self.colors.drain(range);
        self.selection = Selection::caret(new_caret);
        self.notify();
    }

    /// Move the caret by `delta` characters
    pub fn move_caret(&mut self, delta: isize) {
        let target = self.selection.start.saturating_add_signed(delta);
        self.set_selection(target.min(self.chars.len()), 0);
    }

    /// Move the caret up or down by `delta` lines, keeping the column
    pub fn move_caret_lines(&mut self, delta: i32) {
        let caret = self.caret_position();
        let target = caret.offset(0, delta * self.line_height);
        if target.y < 0 {
            return;
        }
        let offset = self.char_index_from_position(target);
        self.set_selection(offset, 0);
    }

    fn line_count(&self) -> usize {
        self.chars.iter().filter(|&&c| c == '\n').count() + 1
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryHost {
    fn text(&self) -> String {
        self.chars.iter().collect()
    }

    fn set_text(&mut self, text: &str) {
        self.load(text);
        self.notify();
    }

    fn lines(&self) -> Vec<String> {
        split_lines(&self.text())
    }

    fn first_char_index_of_line(&self, line: usize) -> usize {
        if line == 0 {
            return 0;
        }
        let mut seen = 0;
        for (idx, ch) in self.chars.iter().enumerate() {
            if *ch == '\n' {
                seen += 1;
                if seen == line {
                    return idx + 1;
                }
            }
        }
        self.chars.len()
    }

    fn line_from_char_index(&self, index: usize) -> usize {
        let end = index.min(self.chars.len());
        self.chars[..end].iter().filter(|&&c| c == '\n').count()
    }

    fn char_index_from_position(&self, point: Point) -> usize {
        if self.chars.is_empty() {
            return 0;
        }
        let row = (point.y.max(0) / self.line_height) as usize;
        let row = row.min(self.line_count() - 1);
        let col = (point.x.max(0) / self.cell_width) as usize;
        let text = self.lines().into_iter().nth(row).unwrap_or_default();
        self.first_char_index_of_line(row) + Line::new(text).col_to_char(col)
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, start: usize, len: usize) {
        let start = start.min(self.chars.len());
        let len = len.min(self.chars.len() - start);
        self.selection = Selection::new(start, len);
    }

    fn set_selection_color(&mut self, color: Color) {
        let Selection { start, len } = self.selection;
        if len == 0 {
            self.typing_color = color;
        } else {
            for slot in &mut self.colors[start..start + len] {
                *slot = color;
            }
        }
        self.color_writes += 1;
        self.notify();
    }

    fn caret_position(&self) -> Point {
        let offset = self.selection.start;
        let row = self.line_from_char_index(offset);
        let line_start = self.first_char_index_of_line(row);
        let text = self.lines().into_iter().nth(row).unwrap_or_default();
        let col = Line::new(text).char_to_col(offset - line_start);
        Point::new(col as i32 * self.cell_width, row as i32 * self.line_height)
    }

    fn show_suggestions(&mut self, candidates: &[String], anchor: Point) {
        self.popup = Some(Popup {
            candidates: candidates.to_vec(),
            anchor,
            selected: 0,
        });
    }

    fn select_suggestion(&mut self, index: usize) {
        if let Some(popup) = &mut self.popup {
            popup.selected = index.min(popup.candidates.len().saturating_sub(1));
        }
    }

    fn hide_suggestions(&mut self) {
        self.popup = None;
    }

    fn focus_editor(&mut self) {
        self.focused = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_offsets() {
        let host = MemoryHost::with_text("ab\ncde\n\nf");
        assert_eq!(host.lines(), vec!["ab", "cde", "", "f"]);
        assert_eq!(host.first_char_index_of_line(0), 0);
        assert_eq!(host.first_char_index_of_line(1), 3);
        assert_eq!(host.first_char_index_of_line(3), 8);
        assert_eq!(host.line_from_char_index(2), 0);
        assert_eq!(host.line_from_char_index(3), 1);
        assert_eq!(host.line_from_char_index(100), 3);
    }

    #[test]
    fn test_caret_position_roundtrip() {
        let mut host = MemoryHost::with_text("ab\ncde").with_cell_size(8, 16);
        host.set_selection(5, 0);
        let point = host.caret_position();
        assert_eq!(point, Point::new(16, 16));
        assert_eq!(host.char_index_from_position(point), 5);
    }

    #[test]
    fn test_selection_coloring() {
        let mut host = MemoryHost::with_text("abcd");
        host.set_selection(1, 2);
        host.set_selection_color(Color::Red);
        assert_eq!(host.line_colors(0), vec![Color::Default, Color::Red, Color::Red, Color::Default]);

        host.set_selection(4, 0);
        host.set_selection_color(Color::Blue);
        assert_eq!(host.typing_color(), Color::Blue);
        assert_eq!(host.color_writes(), 2);
    }

    #[test]
    fn test_selection_clamped() {
        let mut host = MemoryHost::with_text("abc");
        host.set_selection(10, 5);
        assert_eq!(host.selection(), Selection::new(3, 0));
        host.set_selection(1, 10);
        assert_eq!(host.selection(), Selection::new(1, 2));
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut host = MemoryHost::new();
        host.type_str("Att");
        assert_eq!(host.text(), "Att");
        assert_eq!(host.caret(), 3);
        host.backspace();
        assert_eq!(host.text(), "At");
        assert_eq!(host.caret(), 2);
        assert_eq!(host.take_notices().len(), 2);
    }

    #[test]
    fn test_notices_record_guard_state() {
        let guard = SuppressionGuard::new();
        let mut host = MemoryHost::with_text("x");
        host.bind(guard.clone());
        host.set_text("y");
        {
            let _token = guard.suppress();
            host.set_text("z");
        }
        assert_eq!(
            host.take_notices(),
            vec![ChangeNotice { suppressed: false }, ChangeNotice { suppressed: true }]
        );
    }

    #[test]
    fn test_move_caret_lines() {
        let mut host = MemoryHost::with_text("abcd\nef");
        host.set_selection(3, 0);
        host.move_caret_lines(1);
        assert_eq!(host.caret(), 7);
        host.move_caret_lines(-1);
        assert_eq!(host.caret(), 2);
    }
}
