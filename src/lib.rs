//! codebox - syntax highlighting and word completion for a plain text widget
//!
//! The core watches a host editing surface, recolors the caret's line on
//! every edit, and offers dictionary completions for the word being typed.
//! Hosts implement [`Host`]; [`MemoryHost`] is a complete in-memory one.

pub mod caret;
pub mod codebox;
pub mod completion;
pub mod config;
pub mod error;
pub mod guard;
pub mod highlighter;
pub mod host;
pub mod input;
pub mod line;
pub mod memory;
pub mod syntax;
pub mod terminal;

pub use crate::codebox::{CodeBox, KeyOutcome};
pub use completion::{CompletionController, CompletionState, MatchCase, Transition};
pub use config::{load_dictionary, Config};
pub use error::{CodeBoxError, Result};
pub use guard::{Suppressed, SuppressionGuard};
pub use highlighter::{LineHighlighter, Palette};
pub use host::{Host, Point, Selection};
pub use input::Key;
pub use line::Line;
pub use memory::MemoryHost;
pub use syntax::{Category, Classifier, ClassifierSet, Color, Span, DEFAULT_KEYWORDS};
