//! Caret to line resolution
//!
//! The caret can move without any text change (arrow keys, mouse), so
//! nothing here is cached: every query asks the host live.

use crate::host::Host;
use crate::line::Line;

/// Index of the line containing the caret
pub fn current_line_index<H: Host + ?Sized>(host: &H) -> usize {
    let offset = host.char_index_from_position(host.caret_position());
    host.line_from_char_index(offset)
}

/// The line containing the caret, if the buffer has any lines
pub fn current_line<H: Host + ?Sized>(host: &H) -> Option<Line> {
    let index = current_line_index(host);
    host.lines().into_iter().nth(index).map(Line::new)
}

/// Text of the line containing the caret, or `""` for an empty buffer
pub fn current_line_text<H: Host + ?Sized>(host: &H) -> String {
    current_line(host)
        .map(|line| line.text().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;

    #[test]
    fn test_empty_buffer() {
        let host = MemoryHost::new();
        assert_eq!(current_line_index(&host), 0);
        assert!(current_line(&host).is_none());
        assert_eq!(current_line_text(&host), "");
    }

    #[test]
    fn test_follows_caret() {
        let mut host = MemoryHost::with_text("first\nsecond\nthird");
        host.set_selection(8, 0);
        assert_eq!(current_line_index(&host), 1);
        assert_eq!(current_line_text(&host), "second");

        // Caret moves without any text change
        host.set_selection(14, 0);
        assert_eq!(current_line_index(&host), 2);
        assert_eq!(current_line_text(&host), "third");
    }

    #[test]
    fn test_caret_at_line_end() {
        let mut host = MemoryHost::with_text("ab\ncd");
        host.set_selection(2, 0);
        assert_eq!(current_line_text(&host), "ab");
        host.set_selection(5, 0);
        assert_eq!(current_line_text(&host), "cd");
    }

    #[test]
    fn test_trailing_empty_line() {
        let mut host = MemoryHost::with_text("ab\n");
        host.set_selection(3, 0);
        assert_eq!(current_line_index(&host), 1);
        assert_eq!(current_line_text(&host), "");
    }
}
