//! The per-dialect keyword registry.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use tracing::trace;

use crate::Dialect;

/// Keyword data for one dialect, as stored in a descriptor file.
#[derive(Debug, Clone, Deserialize)]
pub struct DialectDescriptor {
    /// The dialect URI.
    pub dialect: String,
    /// The identifier keyword marking a schema resource boundary.
    pub identifier: String,
    /// Member names recognized as keywords.
    pub keywords: Vec<String>,
}

impl DialectDescriptor {
    /// Parse a descriptor from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Keyword data for one registered dialect.
#[derive(Debug, Clone)]
struct DialectInfo {
    identifier: String,
    keywords: HashSet<String>,
}

/// Maps dialect identifiers to their keyword sets and identifier keyword
/// names. Built before a classification pass begins and read-only while
/// one runs; lookups for unknown dialects return `None` rather than fail.
#[derive(Debug, Clone, Default)]
pub struct DialectRegistry {
    dialects: HashMap<Dialect, DialectInfo>,
}

/// Embedded descriptors for the published drafts.
const BUNDLED: [&str; 6] = [
    include_str!("../data/draft-03.json"),
    include_str!("../data/draft-04.json"),
    include_str!("../data/draft-06.json"),
    include_str!("../data/draft-07.json"),
    include_str!("../data/draft-2019-09.json"),
    include_str!("../data/draft-2020-12.json"),
];

impl DialectRegistry {
    /// A registry with no dialects.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A registry preloaded with the bundled drafts: 3 and 4 (identifier
    /// `id`) and 6, 7, 2019-09, 2020-12 (identifier `$id`).
    pub fn bundled() -> Self {
        let mut registry = Self::empty();
        for source in BUNDLED {
            let descriptor = DialectDescriptor::from_json(source)
                .expect("bundled dialect descriptor is valid JSON");
            registry.register(descriptor);
        }
        registry
    }

    /// Add a dialect, replacing an earlier registration of the same URI.
    pub fn register(&mut self, descriptor: DialectDescriptor) {
        let DialectDescriptor {
            dialect,
            identifier,
            keywords,
        } = descriptor;
        trace!(
            "Registering dialect {:?} with {} keywords",
            dialect,
            keywords.len()
        );
        self.dialects.insert(
            Dialect::new(dialect),
            DialectInfo {
                identifier,
                keywords: keywords.into_iter().collect(),
            },
        );
    }

    /// The identifier keyword name for a dialect: `$id`, or `id` for the
    /// legacy drafts. `None` for unknown dialects.
    pub fn identifier_for(&self, dialect: &Dialect) -> Option<&str> {
        self.dialects
            .get(dialect)
            .map(|info| info.identifier.as_str())
    }

    /// The keyword set for a dialect. `None` for unknown dialects.
    pub fn keywords(&self, dialect: &Dialect) -> Option<&HashSet<String>> {
        self.dialects.get(dialect).map(|info| &info.keywords)
    }

    /// Whether a dialect is registered.
    pub fn contains(&self, dialect: &Dialect) -> bool {
        self.dialects.contains_key(dialect)
    }

    /// Number of registered dialects.
    pub fn len(&self) -> usize {
        self.dialects.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.dialects.is_empty()
    }
}
