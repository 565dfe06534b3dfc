//! Dialect identifiers.

use std::fmt;

/// A JSON Schema dialect identifier: the bare URI naming a version of the
/// specification, e.g. `https://json-schema.org/draft/2020-12/schema`.
///
/// The URI is stored without quote characters. Conversions at the two
/// places quoting matters - caller configuration and string lexemes - go
/// through [`Dialect::new`] and [`Dialect::from_lexeme`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dialect(String);

impl Dialect {
    /// Create a dialect from a URI. Surrounding quote characters are
    /// stripped if present, so callers may pass the URI either way.
    pub fn new(uri: impl Into<String>) -> Self {
        let uri = uri.into();
        let mut bare = uri.as_str();
        if let Some(rest) = bare.strip_prefix('"') {
            bare = rest;
        }
        if let Some(rest) = bare.strip_suffix('"') {
            bare = rest;
        }
        if bare.len() == uri.len() {
            Self(uri)
        } else {
            Self(bare.to_owned())
        }
    }

    /// Create a dialect from a quoted string lexeme.
    pub fn from_lexeme(lexeme: &str) -> Self {
        Self::new(lexeme)
    }

    /// The bare URI.
    pub fn as_uri(&self) -> &str {
        &self.0
    }

    /// The URI as it appears in source text, wrapped in quote characters.
    pub fn to_lexeme(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Dialect {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl From<String> for Dialect {
    fn from(uri: String) -> Self {
        Self::new(uri)
    }
}
