//! Categories for classified text
//!
//! This module defines the syntactic categories a classifier can
//! assign to a range of text and their default colors.

use serde::{Deserialize, Serialize};

use super::style::Color;

/// Syntactic categories for line highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Decimal literals (12, 3.5, .5)
    Number,
    /// Hexadecimal literals (0x1F)
    Hex,
    /// Call delimiters and separators
    Punctuation,
    /// Double-quoted string literals
    String,
    /// Line comments (// ...)
    Comment,
    /// Control keywords (if, else, try, catch)
    Keyword,
    /// Accessor identifiers (name-xx[0])
    Identifier,
}

impl Category {
    /// All categories, in declaration order
    pub const ALL: [Category; 7] = [
        Category::Number,
        Category::Hex,
        Category::Punctuation,
        Category::String,
        Category::Comment,
        Category::Keyword,
        Category::Identifier,
    ];

    /// Get the default color for this category
    pub fn default_color(&self) -> Color {
        match self {
            Category::Number => Color::Red,
            Category::Hex => Color::DarkCyan,
            Category::Punctuation => Color::Blue,
            Category::String => Color::DarkRed,
            Category::Comment => Color::DarkGreen,
            Category::Keyword => Color::Blue,
            Category::Identifier => Color::Blue,
        }
    }

    /// Get a human-readable name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Category::Number => "Number",
            Category::Hex => "Hex",
            Category::Punctuation => "Punctuation",
            Category::String => "String",
            Category::Comment => "Comment",
            Category::Keyword => "Keyword",
            Category::Identifier => "Identifier",
        }
    }
}
