//! Ordered classifier sets
//!
//! A `ClassifierSet` holds the rules that are applied to a line, in
//! the order they are applied. Later rules paint over earlier ones,
//! so strings and comments are applied last to dominate any number
//! or delimiter nested inside them.

use super::rules::{
    Classifier, COMMENT_PATTERN, HEX_PATTERN, IDENTIFIER_PATTERN, NUMBER_PATTERN,
    PUNCTUATION_PATTERN, STRING_PATTERN,
};
use super::style::Span;
use super::tokens::Category;
use crate::error::Result;

/// Keywords colored by the extended set unless configured otherwise
pub const DEFAULT_KEYWORDS: [&str; 4] = ["if", "else", "try", "catch"];

/// An ordered list of classifiers
#[derive(Debug, Clone)]
pub struct ClassifierSet {
    /// Rules in application order
    classifiers: Vec<Classifier>,
}

impl ClassifierSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            classifiers: Vec::new(),
        }
    }

    /// Number, Hex, Punctuation, String, Comment
    pub fn standard() -> Result<Self> {
        let mut set = Self::new();
        set.push(Classifier::new("number", NUMBER_PATTERN, Category::Number)?);
        set.push(Classifier::new("hex", HEX_PATTERN, Category::Hex)?);
        set.push(Classifier::new("punctuation", PUNCTUATION_PATTERN, Category::Punctuation)?);
        set.push(Classifier::new("string", STRING_PATTERN, Category::String)?);
        set.push(Classifier::new("comment", COMMENT_PATTERN, Category::Comment)?);
        Ok(set)
    }

    /// The standard set with keywords first and accessor identifiers
    /// painted just before strings
    pub fn extended<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let mut set = Self::standard()?;
        let identifier = Classifier::new("identifier", IDENTIFIER_PATTERN, Category::Identifier)?;
        set.insert_before(Category::String, identifier);
        if !keywords.is_empty() {
            set.classifiers.insert(0, Classifier::keywords("keyword", keywords)?);
        }
        Ok(set)
    }

    /// Insert a classifier ahead of the first one painting `category`,
    /// or at the end if none does
    pub fn insert_before(&mut self, category: Category, classifier: Classifier) {
        let index = self
            .classifiers
            .iter()
            .position(|c| c.category == category)
            .unwrap_or(self.classifiers.len());
        self.classifiers.insert(index, classifier);
    }

    /// Append a classifier; it will be applied after all existing ones
    pub fn push(&mut self, classifier: Classifier) {
        self.classifiers.push(classifier);
    }

    /// Classifiers in application order
    pub fn classifiers(&self) -> &[Classifier] {
        &self.classifiers
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    /// Classify one line
    ///
    /// Returns spans in application order. Spans may overlap; a later
    /// span wins wherever it overlaps an earlier one.
    pub fn classify(&self, line: usize, text: &str) -> Vec<Span> {
        let mut spans = Vec::new();
        for classifier in &self.classifiers {
            for (start, len) in classifier.find_all(text) {
                spans.push(Span::new(line, start, len, classifier.category));
            }
        }
        spans
    }

    /// Resolve overlaps into one category per character
    ///
    /// `None` marks characters left in the default color.
    pub fn resolve(&self, text: &str) -> Vec<Option<Category>> {
        let mut categories = vec![None; text.chars().count()];
        for span in self.classify(0, text) {
            for slot in &mut categories[span.start..span.end()] {
                *slot = Some(span.category);
            }
        }
        categories
    }
}

impl Default for ClassifierSet {
    fn default() -> Self {
        Self::new()
    }
}
