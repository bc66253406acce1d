//! Pattern rules for line classification
//!
//! A classifier pairs a regex with the category it paints. Every
//! classifier scans the whole line independently; overlap between
//! classifiers is resolved by the order they are applied in.

use regex::{Regex, RegexBuilder};

use super::tokens::Category;
use crate::error::{CodeBoxError, Result};

/// Decimal literals, optionally with a fractional part
pub const NUMBER_PATTERN: &str = r"\b(?:[0-9]*\.)?[0-9]+\b";
/// Hexadecimal literals
pub const HEX_PATTERN: &str = r"\b0x[a-fA-F\d]+\b";
/// `(` `)` `*` `+` `,`
pub const PUNCTUATION_PATTERN: &str = r"[\x28-\x2c]";
/// Double-quoted strings with backslash escapes
pub const STRING_PATTERN: &str = r#""[^"\\\r\n]*(?:\\.[^"\\\r\n]*)*""#;
/// Line comment to end of line
pub const COMMENT_PATTERN: &str = r"//.*$";
/// Accessor identifiers such as `Bone-ab[1F]`
pub const IDENTIFIER_PATTERN: &str = r"[A-Za-z\x5F\x2D]+-.{1,5}\[[0-9A-Fa-f]+\]";

/// A single classifier rule
///
/// Matches a regex pattern against a line and assigns a category to
/// every match.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Category to assign to matches
    pub category: Category,
}

impl Classifier {
    /// Create a new classifier; patterns always match case-insensitively
    pub fn new(name: &str, pattern: &str, category: Category) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| CodeBoxError::InvalidPattern {
                name: name.to_string(),
                source,
            })?;
        Ok(Self {
            name: name.to_string(),
            pattern: regex,
            category,
        })
    }

    /// Build a keyword classifier matching any of `words` as whole words
    pub fn keywords<S: AsRef<str>>(name: &str, words: &[S]) -> Result<Self> {
        let alternation = words
            .iter()
            .map(|w| regex::escape(w.as_ref()))
            .collect::<Vec<_>>()
            .join("|");
        Self::new(name, &format!(r"\b(?:{})\b", alternation), Category::Keyword)
    }

    /// Find every match in `text` as (start, len) character ranges
    pub fn find_all(&self, text: &str) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        // Matches arrive in ascending order, so char counts accumulate.
        let mut byte_pos = 0;
        let mut char_pos = 0;
        for m in self.pattern.find_iter(text) {
            if m.start() == m.end() {
                continue;
            }
            char_pos += text[byte_pos..m.start()].chars().count();
            let len = m.as_str().chars().count();
            ranges.push((char_pos, len));
            char_pos += len;
            byte_pos = m.end();
        }
        ranges
    }
}
