//! Configuration file support
//!
//! Loads settings from ~/.codebox.toml (or %USERPROFILE%\.codebox.toml on
//! Windows). Missing keys fall back to their defaults.
//!
//! Example:
//! ```text
//! # codebox configuration
//! case_sensitive = false
//! popup_offset_x = 0
//! popup_offset_y = 10
//! extended = true
//! keywords = ["if", "else", "try", "catch"]
//!
//! [colors]
//! number = "red"
//! comment = "dark-green"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::completion::MatchCase;
use crate::error::Result;
use crate::highlighter::Palette;
use crate::syntax::{ClassifierSet, DEFAULT_KEYWORDS};

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Match candidates case-sensitively
    pub case_sensitive: bool,
    /// Horizontal popup distance from the caret
    pub popup_offset_x: i32,
    /// Vertical popup distance from the caret
    pub popup_offset_y: i32,
    /// Also color keywords and accessor identifiers
    pub extended: bool,
    /// Keywords colored when `extended` is set
    pub keywords: Vec<String>,
    /// Category colors
    pub colors: Palette,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            popup_offset_x: 0,
            popup_offset_y: 10,
            extended: false,
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            colors: Palette::default(),
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".codebox.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".codebox.toml"))
        }
    }

    /// Load configuration from the default path, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Failed to load {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::parse(&contents)?;
        debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn match_case(&self) -> MatchCase {
        if self.case_sensitive {
            MatchCase::Sensitive
        } else {
            MatchCase::Insensitive
        }
    }

    /// Build the classifier set these settings describe
    pub fn classifiers(&self) -> Result<ClassifierSet> {
        if self.extended {
            ClassifierSet::extended(self.keywords.as_slice())
        } else {
            ClassifierSet::standard()
        }
    }
}

/// Read a completion dictionary: one candidate per line
///
/// Blank lines and lines starting with `#` are skipped. Order is kept.
pub fn load_dictionary(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)?;
    Ok(parse_dictionary(&contents))
}

fn parse_dictionary(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
