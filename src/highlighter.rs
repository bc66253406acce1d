//! Line highlighter
//!
//! Paints one line of the host buffer by selection: the whole line is reset
//! to the plain color, then every classifier match is selected and colored
//! in classifier order, so later categories paint over earlier ones. The
//! caller's selection is restored afterwards and all writes happen with the
//! suppression guard raised.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::guard::SuppressionGuard;
use crate::host::Host;
use crate::syntax::{Category, ClassifierSet, Color};

/// Colors used for each category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Plain text, also used for the caret's typing color
    pub default: Color,
    pub number: Color,
    pub hex: Color,
    pub punctuation: Color,
    pub string: Color,
    pub comment: Color,
    pub keyword: Color,
    pub identifier: Color,
}

impl Palette {
    pub fn color(&self, category: Category) -> Color {
        match category {
            Category::Number => self.number,
            Category::Hex => self.hex,
            Category::Punctuation => self.punctuation,
            Category::String => self.string,
            Category::Comment => self.comment,
            Category::Keyword => self.keyword,
            Category::Identifier => self.identifier,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            default: Color::Default,
            number: Category::Number.default_color(),
            hex: Category::Hex.default_color(),
            punctuation: Category::Punctuation.default_color(),
            string: Category::String.default_color(),
            comment: Category::Comment.default_color(),
            keyword: Category::Keyword.default_color(),
            identifier: Category::Identifier.default_color(),
        }
    }
}

/// Applies a classifier set to host lines
#[derive(Debug, Clone)]
pub struct LineHighlighter {
    classifiers: ClassifierSet,
    palette: Palette,
}

impl LineHighlighter {
    pub fn new(classifiers: ClassifierSet, palette: Palette) -> Self {
        Self {
            classifiers,
            palette,
        }
    }

    pub fn classifiers(&self) -> &ClassifierSet {
        &self.classifiers
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Recolor line `line`
    ///
    /// Does nothing for an empty buffer or an index past the last line,
    /// which can happen when the caret and the line count race. Returns
    /// whether a pass ran.
    pub fn highlight_line<H: Host + ?Sized>(
        &self,
        host: &mut H,
        guard: &SuppressionGuard,
        line: usize,
    ) -> bool {
        let lines = host.lines();
        let Some(text) = lines.get(line) else {
            trace!(line, count = lines.len(), "highlight skipped, line out of range");
            return false;
        };

        let _suppressed = guard.suppress();
        let saved = host.selection();
        let line_start = host.first_char_index_of_line(line);

        host.set_selection(line_start, text.chars().count());
        host.set_selection_color(self.palette.default);

        let spans = self.classifiers.classify(line, text);
        for span in &spans {
            host.set_selection(line_start + span.start, span.len);
            host.set_selection_color(self.palette.color(span.category));
        }

        // Typed input must not inherit the last painted color
        host.set_selection(saved.start, 0);
        host.set_selection_color(self.palette.default);
        if saved.len > 0 {
            host.set_selection(saved.start, saved.len);
        }

        trace!(line, spans = spans.len(), "line highlighted");
        true
    }

    /// Recolor every line in increasing order; returns the number of passes
    pub fn highlight_all<H: Host + ?Sized>(&self, host: &mut H, guard: &SuppressionGuard) -> usize {
        let count = host.lines().len();
        let passes = (0..count)
            .filter(|&line| self.highlight_line(host, guard, line))
            .count();
        debug!(lines = count, "buffer highlighted");
        passes
    }
}
