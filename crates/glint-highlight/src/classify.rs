//! Token reclassification.

use std::collections::HashSet;

use glint_dialect::PRIMITIVE_TYPES;
use glint_tokenizer::{Span, Token, TokenKind};

/// The schema-aware classification of an output token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightClass {
    /// `{` `}` `[` `]` `,` `:`
    Punctuation,
    /// Object member name not recognized as a keyword
    Key,
    /// Member name recognized as a keyword of the governing dialect
    Keyword,
    /// String value
    Str,
    /// String value naming one of the primitive types
    DataType,
    /// Number literal
    Number,
    /// `true` or `false`
    Bool,
    /// `null`
    Null,
    /// Whitespace, including newlines
    Whitespace,
    /// Line or block comment
    Comment,
    /// Unrecognized input
    Error,
}

impl From<TokenKind> for HighlightClass {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::Comma
            | TokenKind::Colon => HighlightClass::Punctuation,
            TokenKind::Key => HighlightClass::Key,
            TokenKind::Str => HighlightClass::Str,
            TokenKind::Number => HighlightClass::Number,
            TokenKind::Bool => HighlightClass::Bool,
            TokenKind::Null => HighlightClass::Null,
            TokenKind::Whitespace | TokenKind::Newline => HighlightClass::Whitespace,
            TokenKind::LineComment | TokenKind::BlockComment => HighlightClass::Comment,
            TokenKind::Error | TokenKind::Eof => HighlightClass::Error,
        }
    }
}

/// A token with its schema-aware classification. Span and text are carried
/// over from the input token untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightedToken<'src> {
    /// The classification.
    pub class: HighlightClass,
    /// The span in the source text.
    pub span: Span,
    /// The source text of this token.
    pub text: &'src str,
}

/// The lexeme without its surrounding quote characters, if it has both.
fn unquote(lexeme: &str) -> Option<&str> {
    lexeme.strip_prefix('"')?.strip_suffix('"')
}

/// Classify one token against the keyword set of the governing dialect.
/// `None` stands for "no dialect applies" and classifies like an empty set.
pub(crate) fn classify<'src>(
    token: &Token<'src>,
    keywords: Option<&HashSet<String>>,
) -> HighlightedToken<'src> {
    let class = match token.kind {
        TokenKind::Key => match unquote(token.text) {
            Some(name) if keywords.is_some_and(|set| set.contains(name)) => {
                HighlightClass::Keyword
            }
            _ => HighlightClass::Key,
        },
        TokenKind::Str => match unquote(token.text) {
            Some(value) if PRIMITIVE_TYPES.contains(&value) => HighlightClass::DataType,
            _ => HighlightClass::Str,
        },
        kind => HighlightClass::from(kind),
    };
    HighlightedToken {
        class,
        span: token.span,
        text: token.text,
    }
}
