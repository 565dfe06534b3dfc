//! Nearest-valid-dialect resolution.
//!
//! A `"$schema"` declaration only establishes a dialect scope when the same
//! object also declares the dialect's identifier keyword, or when it sits at
//! the document root. Resolution therefore walks the syntax stack backward
//! from the current position, skipping unscoped declarations outward until
//! one validates, the root is reached, or nothing is left.

use glint_dialect::{Dialect, DialectRegistry};
use glint_tokenizer::{Token, TokenKind};
use tracing::trace;

use crate::stack::SyntaxStack;

const SCHEMA_LEXEME: &str = "\"$schema\"";

/// Identifier keyword lexemes across all drafts, for the top-of-stack guard.
const IDENTIFIER_LEXEMES: [&str; 2] = ["\"$id\"", "\"id\""];

/// Resolve the dialect governing the current lexical position, or fall
/// through to `default`.
///
/// The search boundary starts at the top of the stack and strictly
/// decreases on every continuation, so the loop runs at most `stack.len()`
/// iterations.
pub(crate) fn resolve(
    tokens: &[Token<'_>],
    stack: &SyntaxStack<'_>,
    registry: &DialectRegistry,
    default: Option<&Dialect>,
) -> Option<Dialect> {
    let Some(mut boundary) = stack.len().checked_sub(1) else {
        return default.cloned();
    };

    loop {
        let Some(schema_index) = stack.rfind(boundary, SCHEMA_LEXEME) else {
            break;
        };
        let schema_entry = stack.entry(schema_index);
        let schema_depth = schema_entry.depth;

        // The declared value: the first string token at or after the member
        // name, in the token sequence. The member name itself is a Key
        // token, so it does not match.
        let Some(candidate) = tokens[schema_entry.token_index..]
            .iter()
            .find(|token| token.kind == TokenKind::Str)
            .map(|token| Dialect::from_lexeme(token.text))
        else {
            // Malformed document with no value in sight.
            break;
        };

        let identifier = registry.identifier_for(&candidate);
        // A root declaration is honored even for an unknown dialect; a
        // nested one needs a known identifier keyword to pair with.
        let provisionally_valid = identifier.is_some() || schema_depth == 0;

        let identifier_index =
            identifier.and_then(|name| stack.rfind(boundary, &format!("\"{name}\"")));

        let identifier_in_same_object = identifier_index
            .is_some_and(|index| stack.entry(index).depth == schema_depth);

        if identifier_in_same_object || schema_depth == 0 {
            trace!(
                "Resolved dialect {:?} declared at depth {}",
                candidate.as_uri(),
                schema_depth
            );
            return Some(candidate);
        }

        let top_is_identifier = stack
            .last()
            .is_some_and(|entry| IDENTIFIER_LEXEMES.contains(&entry.lexeme));

        // The identifier found at another depth may pair with an outer
        // "$schema"; resume the search just before it. With no identifier
        // in reach, look outward past this unscoped declaration instead.
        let next_boundary = match identifier_index {
            Some(index) if provisionally_valid => index.checked_sub(1),
            None if provisionally_valid && !top_is_identifier => schema_index.checked_sub(1),
            _ => None,
        };
        match next_boundary {
            Some(next) => boundary = next,
            None => break,
        }
    }

    default.cloned()
}
