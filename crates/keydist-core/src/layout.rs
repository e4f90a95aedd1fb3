// Keydist Layout Module
// Rows of parallel key-strings describing a physical keyboard

use std::sync::LazyLock;

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::Deserialize;

/// Default "no key here" marker used to pad rows so columns line up
pub const PLACEHOLDER: char = '\u{3}';

/// Built-in QWERTY layout with its shifted variants
static QWERTY: LazyLock<Layout> = LazyLock::new(|| {
    Layout::new(vec![
        vec!["`1234567890-=", "~!@#$%^&*()_+"],
        vec!["\u{3}qwertyuiop[]\\", "\u{3}QWERTYUIOP{}|"],
        vec!["\u{3}asdfghjkl;'", "\u{3}ASDFGHJKL:\""],
        vec!["\u{3}zxcvbnm,./", "\u{3}ZXCVBNM<>?"],
        vec!["\u{3}\u{3}\u{3}\u{3}    ", "\u{3}\u{3}\u{3}\u{3}    "],
    ])
});

/// Errors that can occur when loading a layout description
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid placeholder: {0:?} (expected exactly one character)")]
    InvalidPlaceholder(String),
}

/// A keyboard layout: ordered rows, each holding parallel key-strings
///
/// Every key-string in a row describes the same physical keys, e.g. the
/// unshifted and shifted characters. Column `k` of a key-string lines up
/// with column `k` of the same variant in the rows above and below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rows: Vec<Vec<String>>,
    placeholder: char,
}

/// TOML representation of a layout file
#[cfg(feature = "config")]
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct LayoutToml {
    #[serde(default)]
    placeholder: Option<String>,
    rows: Vec<Vec<String>>,
}

impl Layout {
    /// Create a layout using the default placeholder
    pub fn new<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
            placeholder: PLACEHOLDER,
        }
    }

    /// Replace the "no key here" marker
    pub fn with_placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// The shared built-in QWERTY layout
    pub fn qwerty() -> &'static Layout {
        &QWERTY
    }

    /// Load a layout from a TOML string
    #[cfg(feature = "config")]
    pub fn from_toml(content: &str) -> Result<Self, LayoutError> {
        let parsed: LayoutToml =
            toml::from_str(content).map_err(|e| LayoutError::TomlParse(e.to_string()))?;

        let mut layout = Self::new(parsed.rows);
        if let Some(placeholder) = parsed.placeholder {
            let mut chars = placeholder.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => layout.placeholder = c,
                _ => return Err(LayoutError::InvalidPlaceholder(placeholder)),
            }
        }
        Ok(layout)
    }

    /// Load a layout from a TOML file
    #[cfg(feature = "config")]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get one key-string by row and variant index
    pub fn key_string(&self, row: usize, variant: usize) -> Option<&str> {
        self.rows.get(row)?.get(variant).map(String::as_str)
    }

    /// True if `c` names a real key somewhere in this layout
    pub fn has_key(&self, c: char) -> bool {
        c != self.placeholder
            && self
                .rows
                .iter()
                .flatten()
                .any(|keys| keys.chars().any(|k| k == c))
    }
}

impl Default for Layout {
    fn default() -> Self {
        QWERTY.clone()
    }
}
