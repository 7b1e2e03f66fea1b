//! AttrKey parsing and formatting.
//!
//! Grammar:
//!   "text"            -> the element's text content
//!   "style.<name>"    -> an inline style property
//!   "attr.<name>"     -> an attribute (explicit form)
//!   "<name>"          -> an attribute (shorthand)
//!
//! Names must be non-empty and contain no whitespace. AttrKey serializes as
//! its canonical string form.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttrKey {
    /// Markup attribute such as `width` or `transform`.
    Attr(String),
    /// Inline style property such as `fill`.
    Style(String),
    /// Text content of the element.
    Text,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttrKeyError {
    #[error("empty attribute key")]
    Empty,
    #[error("attribute key '{0}' has an empty name")]
    EmptyName(String),
    #[error("attribute key '{0}' contains whitespace")]
    Whitespace(String),
}

fn check_name(full: &str, name: &str) -> Result<(), AttrKeyError> {
    if name.is_empty() {
        return Err(AttrKeyError::EmptyName(full.to_string()));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(AttrKeyError::Whitespace(full.to_string()));
    }
    Ok(())
}

impl AttrKey {
    pub fn attr(name: impl Into<String>) -> Self {
        AttrKey::Attr(name.into())
    }

    pub fn style(name: impl Into<String>) -> Self {
        AttrKey::Style(name.into())
    }

    /// Parse a key string according to the grammar described above.
    pub fn parse(s: &str) -> Result<Self, AttrKeyError> {
        if s.is_empty() {
            return Err(AttrKeyError::Empty);
        }
        if s == "text" {
            return Ok(AttrKey::Text);
        }
        if let Some(name) = s.strip_prefix("style.") {
            check_name(s, name)?;
            return Ok(AttrKey::Style(name.to_string()));
        }
        let name = s.strip_prefix("attr.").unwrap_or(s);
        check_name(s, name)?;
        Ok(AttrKey::Attr(name.to_string()))
    }

    /// Bare name without the `style.`/`attr.` prefix.
    pub fn name(&self) -> &str {
        match self {
            AttrKey::Attr(n) | AttrKey::Style(n) => n,
            AttrKey::Text => "text",
        }
    }
}

impl fmt::Display for AttrKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrKey::Attr(n) => f.write_str(n),
            AttrKey::Style(n) => write!(f, "style.{n}"),
            AttrKey::Text => f.write_str("text"),
        }
    }
}

impl FromStr for AttrKey {
    type Err = AttrKeyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AttrKey::parse(s)
    }
}

// Serde support: serialize as string, deserialize from string
impl Serialize for AttrKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AttrKey {
    fn deserialize<D>(deserializer: D) -> Result<AttrKey, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AttrKey::parse(&s).map_err(de::Error::custom)
    }
}
