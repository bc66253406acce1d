//! Colors and spans produced by the classifiers
//!
//! This module provides the foundation for colored text, used both
//! when painting a host buffer and when rendering to a terminal.

use serde::{Deserialize, Serialize};

use super::tokens::Category;

/// Named text colors understood by hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    /// Plain text color of the host
    #[default]
    Default,
    Black,
    Red,
    DarkRed,
    Green,
    DarkGreen,
    Yellow,
    DarkYellow,
    Blue,
    DarkBlue,
    Magenta,
    DarkMagenta,
    Cyan,
    DarkCyan,
    Grey,
    DarkGrey,
    White,
}

/// A categorized range of characters within one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Index of the line this span belongs to
    pub line: usize,
    /// Character offset where this span starts (inclusive)
    pub start: usize,
    /// Number of characters covered
    pub len: usize,
    /// Category assigned by the classifier that produced it
    pub category: Category,
}

impl Span {
    /// Create a new span
    pub fn new(line: usize, start: usize, len: usize, category: Category) -> Self {
        Self {
            line,
            start,
            len,
            category,
        }
    }

    /// Character offset one past the end of this span
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}
