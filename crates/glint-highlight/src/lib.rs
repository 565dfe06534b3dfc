//! Dialect-aware syntax classification for JSON Schema documents.
//!
//! A JSON Schema document may declare its dialect with a `"$schema"` member
//! at the root, and nested subschemas may declare a different one, scoped by
//! the nearest enclosing identifier keyword (`"$id"`, or `"id"` in the
//! legacy drafts). This crate re-classifies a flat JSON token stream so that
//! member names light up as keywords of whichever dialect governs their
//! position, and string values naming a primitive type light up as type
//! literals.
//!
//! # Example
//!
//! ```
//! use glint_highlight::{HighlightClass, SchemaHighlighter};
//!
//! let highlighter = SchemaHighlighter::new();
//! let source = r#"{"$schema": "https://json-schema.org/draft/2020-12/schema", "type": "object"}"#;
//! let classes: Vec<HighlightClass> = highlighter
//!     .highlight(source)
//!     .map(|token| token.class)
//!     .collect();
//! assert!(classes.contains(&HighlightClass::Keyword));
//! assert!(classes.contains(&HighlightClass::DataType));
//! ```

mod stack;

mod resolve;

mod classify;
pub use classify::{HighlightClass, HighlightedToken};

mod highlighter;
pub use highlighter::{Highlight, SchemaHighlighter};

pub use glint_dialect::{Dialect, DialectDescriptor, DialectRegistry, PRIMITIVE_TYPES};
pub use glint_tokenizer::{Span, Token, TokenKind, Tokenizer};
