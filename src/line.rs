//! Transient line views over a host buffer

use unicode_width::UnicodeWidthChar;

/// One line of the host buffer, copied out for a single pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// The text content (without trailing newline)
    text: String,
}

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Display column of the character at `char_idx`
    pub fn char_to_col(&self, char_idx: usize) -> usize {
        self.text
            .chars()
            .take(char_idx)
            .map(|ch| ch.width().unwrap_or(1))
            .sum()
    }

    /// Character index at display column `col`, clamped to the line end
    pub fn col_to_char(&self, col: usize) -> usize {
        let mut current_col = 0;
        for (idx, ch) in self.text.chars().enumerate() {
            let width = ch.width().unwrap_or(1);
            if current_col + width > col {
                return idx;
            }
            current_col += width;
        }
        self.char_len()
    }
}

/// Split buffer text into lines the way hosts report them
///
/// An empty buffer has zero lines; a trailing newline yields a final
/// empty line.
pub fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n').map(str::to_string).collect()
}
