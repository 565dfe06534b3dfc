//! Keyword tables for JSON Schema dialects.
//!
//! Each dialect of the JSON Schema specification defines its own keyword
//! vocabulary and its own identifier keyword (`$id`, or `id` in the legacy
//! drafts). This crate bundles that data for the published drafts and lets
//! callers register additional dialects from JSON descriptor files.

mod dialect;
pub use dialect::Dialect;

mod registry;
pub use registry::{DialectDescriptor, DialectRegistry};

/// The JSON Schema primitive type names. A string value equal to one of
/// these is a type literal in every dialect.
pub const PRIMITIVE_TYPES: [&str; 7] = [
    "object", "integer", "string", "number", "array", "boolean", "null",
];
