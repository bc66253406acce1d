//! Syntax classification module
//!
//! This module provides the classifier rules and sets used for:
//! - Per-line highlighting through a host buffer
//! - Range tagging for renderers that draw their own colors

mod classifier;
mod rules;
mod style;
mod tokens;

pub use classifier::{ClassifierSet, DEFAULT_KEYWORDS};
pub use rules::Classifier;
pub use style::{Color, Span};
pub use tokens::Category;
