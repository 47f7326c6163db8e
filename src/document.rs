//! Typed document tree for parsed configuration files.
//!
//! The YAML parser hands back an untyped `serde_yaml::Value`; detection
//! works on [`Document`] instead so every shape decision is an explicit
//! pattern match.

use std::fmt::{self, Write as _};

use indexmap::IndexMap;
use serde_yaml::Value;

/// Parsed content of one configuration file.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// Ordered mapping, keys unique within one level.
    Mapping(IndexMap<Key, Document>),
    /// Ordered sequence.
    Sequence(Vec<Document>),
    /// Leaf value.
    Scalar(Scalar),
}

/// Key of a [`Document::Mapping`].
///
/// String keys and keys of any other type are kept apart, so `"1"` and
/// `1` are two distinct keys of one mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// String key.
    String(String),
    /// Any other key, held in canonical form (`1`, `true`, `null`, `[a]`).
    Other(String),
}

impl Key {
    /// Returns the key text if this is a string key.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Other(_) => None,
        }
    }

    fn write_canonical(&self, out: &mut String) {
        match self {
            Self::String(s) => write_quoted(out, s),
            Self::Other(canonical) => out.push_str(canonical),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<Value> for Key {
    fn from(key: Value) -> Self {
        match Document::from(key) {
            Document::Scalar(Scalar::String(s)) => Self::String(s),
            other => Self::Other(other.canonical()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Other(s) => f.write_str(s),
        }
    }
}

/// Leaf value of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scalar {
    /// `null` or `~`, also the value of an empty file.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number, kept in the parser's textual form.
    Number(String),
    /// String.
    String(String),
}

impl Document {
    /// The empty document (what an empty file parses to).
    pub const EMPTY: Self = Self::Scalar(Scalar::Null);

    /// Returns the mapping entries if this document is a mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&IndexMap<Key, Self>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a string key if this document is a mapping.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_mapping().and_then(|map| map.get(&Key::from(key)))
    }

    /// Renders an order-stable textual form of this document.
    ///
    /// Mapping keys are sorted, so two mappings holding the same entries in
    /// a different insertion order render identically. Strings are quoted
    /// and escaped, which keeps `"1"` distinct from `1`.
    #[must_use]
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }

    fn write_canonical(&self, out: &mut String) {
        match self {
            Self::Scalar(scalar) => scalar.write_canonical(out),
            Self::Sequence(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_canonical(out);
                }
                out.push(']');
            }
            Self::Mapping(map) => {
                let mut entries: Vec<_> = map.iter().collect();
                entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
                out.push('{');
                for (i, (key, value)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    key.write_canonical(out);
                    out.push(':');
                    value.write_canonical(out);
                }
                out.push('}');
            }
        }
    }

    /// Renders this document for messages: scalars unquoted, everything
    /// else in canonical form.
    #[must_use]
    pub fn display_text(&self) -> String {
        match self {
            Self::Scalar(scalar) => scalar.plain_text(),
            _ => self.canonical(),
        }
    }
}

impl Scalar {
    fn write_canonical(&self, out: &mut String) {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(b) => {
                let _ = write!(out, "{b}");
            }
            Self::Number(n) => out.push_str(n),
            Self::String(s) => write_quoted(out, s),
        }
    }

    /// Unquoted rendering.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) | Self::String(n) => n.clone(),
        }
    }
}

fn write_quoted(out: &mut String, s: &str) {
    // JSON string escaping; Display on a JSON value cannot fail
    let _ = write!(out, "{}", serde_json::Value::String(s.to_owned()));
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Scalar(Scalar::Null),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n.to_string())),
            Value::String(s) => Self::Scalar(Scalar::String(s)),
            Value::Sequence(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (Key::from(key), Self::from(value)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Self::from(tagged.value),
        }
    }
}
