//! The classification pass: scope tracking, dialect resolution, and token
//! reclassification tied together into a lazy stream.

use glint_dialect::{Dialect, DialectRegistry};
use glint_tokenizer::{Token, TokenKind, Tokenizer};

use crate::classify::{HighlightedToken, classify};
use crate::resolve::resolve;
use crate::stack::SyntaxStack;

/// Reclassifies JSON tokens according to the JSON Schema dialect governing
/// each position.
///
/// One highlighter can serve any number of documents; each call to
/// [`highlight`](Self::highlight) or
/// [`classify_tokens`](Self::classify_tokens) starts an independent pass
/// with its own scope stack.
#[derive(Debug, Clone)]
pub struct SchemaHighlighter {
    registry: DialectRegistry,
    default_dialect: Option<Dialect>,
}

impl SchemaHighlighter {
    /// A highlighter over the bundled dialects.
    pub fn new() -> Self {
        Self::with_registry(DialectRegistry::bundled())
    }

    /// A highlighter over a caller-supplied registry.
    pub fn with_registry(registry: DialectRegistry) -> Self {
        Self {
            registry,
            default_dialect: None,
        }
    }

    /// Set the dialect assumed when a document declares none. The URI may
    /// be given with or without surrounding quote characters.
    pub fn with_default_dialect(mut self, dialect: impl Into<Dialect>) -> Self {
        self.default_dialect = Some(dialect.into());
        self
    }

    /// The registry this highlighter resolves against.
    pub fn registry(&self) -> &DialectRegistry {
        &self.registry
    }

    /// Tokenize `source` and reclassify the resulting tokens.
    pub fn highlight<'src>(&self, source: &'src str) -> Highlight<'src, '_> {
        self.classify_tokens(Tokenizer::new(source).collect())
    }

    /// Reclassify an already-tokenized document. The output is one-to-one
    /// with the input in count and order; only the classification differs.
    pub fn classify_tokens<'src>(&self, tokens: Vec<Token<'src>>) -> Highlight<'src, '_> {
        Highlight {
            tokens,
            index: 0,
            stack: SyntaxStack::new(),
            highlighter: self,
        }
    }
}

impl Default for SchemaHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy stream of reclassified tokens for one document. Dropping it early
/// simply abandons the pass; nothing outlives it.
pub struct Highlight<'src, 'hl> {
    tokens: Vec<Token<'src>>,
    index: usize,
    stack: SyntaxStack<'src>,
    highlighter: &'hl SchemaHighlighter,
}

impl<'src> Iterator for Highlight<'src, '_> {
    type Item = HighlightedToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = *self.tokens.get(self.index)?;
        let index = self.index;
        self.index += 1;

        self.stack.track(index, token.text);

        if token.kind == TokenKind::RBrace {
            // The object is complete: discard its entries so its member
            // names stop scoping anything that follows.
            self.stack.pop_object();
            return Some(classify(&token, None));
        }

        let dialect = resolve(
            &self.tokens,
            &self.stack,
            &self.highlighter.registry,
            self.highlighter.default_dialect.as_ref(),
        );
        let keywords = dialect
            .as_ref()
            .and_then(|dialect| self.highlighter.registry.keywords(dialect));
        Some(classify(&token, keywords))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.tokens.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Highlight<'_, '_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::HighlightClass;

    const MODERN: &str = "https://json-schema.org/draft/2020-12/schema";

    fn classes(source: &str, highlighter: &SchemaHighlighter) -> Vec<(HighlightClass, String)> {
        highlighter
            .highlight(source)
            .filter(|token| token.class != HighlightClass::Whitespace)
            .map(|token| (token.class, token.text.to_owned()))
            .collect()
    }

    /// The class assigned to the member name `name` (quoted) in `source`.
    fn class_of(source: &str, highlighter: &SchemaHighlighter, lexeme: &str) -> HighlightClass {
        highlighter
            .highlight(source)
            .find(|token| token.text == lexeme)
            .map(|token| token.class)
            .unwrap_or_else(|| panic!("lexeme {lexeme:?} not found in {source:?}"))
    }

    #[test]
    fn test_output_is_one_to_one_with_input() {
        let source = r#"{"a": [1, true, null], "b": {"c": "d"}}"#;
        let highlighter = SchemaHighlighter::new();
        let input_count = Tokenizer::new(source).count();
        let output: Vec<_> = highlighter.highlight(source).collect();
        assert_eq!(output.len(), input_count);
        let rebuilt: String = output.iter().map(|token| token.text).collect();
        assert_eq!(rebuilt, source);
    }

    #[test]
    fn test_root_dialect_governs_whole_document() {
        let source = format!(
            r#"{{"$schema": "{MODERN}", "properties": {{"name": {{"type": "string"}}}}}}"#
        );
        let highlighter = SchemaHighlighter::new();
        assert_eq!(
            class_of(&source, &highlighter, "\"$schema\""),
            HighlightClass::Keyword
        );
        assert_eq!(
            class_of(&source, &highlighter, "\"properties\""),
            HighlightClass::Keyword
        );
        // Deeply nested keyword still resolves to the root dialect
        assert_eq!(
            class_of(&source, &highlighter, "\"type\""),
            HighlightClass::Keyword
        );
        // A member name the dialect does not define stays plain
        assert_eq!(
            class_of(&source, &highlighter, "\"name\""),
            HighlightClass::Key
        );
    }

    #[test]
    fn test_no_dialect_means_no_keywords() {
        let source = r#"{"type": "unrelated"}"#;
        let highlighter = SchemaHighlighter::new();
        assert_eq!(
            class_of(source, &highlighter, "\"type\""),
            HighlightClass::Key
        );
    }

    #[test]
    fn test_closing_brace_passes_through() {
        let source = r#"{"a": {}}"#;
        let highlighter = SchemaHighlighter::new();
        let braces: Vec<_> = highlighter
            .highlight(source)
            .filter(|token| token.text == "}")
            .collect();
        assert_eq!(braces.len(), 2);
        assert!(
            braces
                .iter()
                .all(|token| token.class == HighlightClass::Punctuation)
        );
    }

    #[test]
    fn test_early_stop_is_safe() {
        let source = r#"{"$schema": "x", "a": 1}"#;
        let highlighter = SchemaHighlighter::new();
        let mut pass = highlighter.highlight(source);
        assert!(pass.next().is_some());
        drop(pass);
    }

    #[test]
    fn test_unbalanced_document_does_not_panic() {
        let highlighter = SchemaHighlighter::new();
        for source in ["}", "}}}", r#"{"a": 1}}"#, r#"{"#] {
            let rebuilt: String = highlighter.highlight(source).map(|token| token.text).collect();
            assert_eq!(rebuilt, source);
        }
    }

    #[test]
    fn test_classification_count_snapshot() {
        let source = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "title": "Product",
  "type": "object",
  "properties": {
    "productId": {
      "description": "The unique identifier for a product",
      "type": "integer"
    }
  }
}"#;
        let highlighter = SchemaHighlighter::new();
        let rendered = classes(source, &highlighter)
            .into_iter()
            .map(|(class, text)| format!("{class:?} {text}"))
            .collect::<Vec<_>>()
            .join("\n");
        insta::assert_snapshot!(rendered, @r#"
        Punctuation {
        Keyword "$schema"
        Punctuation :
        Str "https://json-schema.org/draft/2020-12/schema"
        Punctuation ,
        Keyword "title"
        Punctuation :
        Str "Product"
        Punctuation ,
        Keyword "type"
        Punctuation :
        DataType "object"
        Punctuation ,
        Keyword "properties"
        Punctuation :
        Punctuation {
        Key "productId"
        Punctuation :
        Punctuation {
        Keyword "description"
        Punctuation :
        Str "The unique identifier for a product"
        Punctuation ,
        Keyword "type"
        Punctuation :
        DataType "integer"
        Punctuation }
        Punctuation }
        Punctuation }
        "#);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn member_name() -> impl Strategy<Value = String> {
        prop::string::string_regex(r"[a-zA-Z$][a-zA-Z0-9_]{0,10}").unwrap()
    }

    fn json_document() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            Just("true".to_owned()),
            Just("false".to_owned()),
            Just("null".to_owned()),
            prop::string::string_regex(r"-?[0-9]{1,6}(\.[0-9]{1,3})?").unwrap(),
            prop::string::string_regex(r"[a-zA-Z0-9 _$-]{0,12}")
                .unwrap()
                .prop_map(|s| format!("\"{s}\"")),
        ];
        leaf.prop_recursive(4, 64, 6, |value| {
            prop_oneof![
                prop::collection::vec(value.clone(), 0..5)
                    .prop_map(|values| format!("[{}]", values.join(","))),
                prop::collection::vec((member_name(), value), 0..5).prop_map(|members| {
                    let members: Vec<String> = members
                        .into_iter()
                        .map(|(name, value)| format!("\"{name}\": {value}"))
                        .collect();
                    format!("{{{}}}", members.join(", "))
                }),
            ]
        })
    }

    proptest! {
        /// Concatenating the output lexemes reproduces the input text.
        #[test]
        fn round_trip_is_lossless(source in json_document()) {
            let highlighter = SchemaHighlighter::new();
            let rebuilt: String = highlighter.highlight(&source).map(|token| token.text).collect();
            prop_assert_eq!(rebuilt, source);
        }

        /// Classification is a pure function of the input text: rendering
        /// the output back to text and classifying again changes nothing.
        #[test]
        fn classification_is_idempotent(source in json_document()) {
            let highlighter = SchemaHighlighter::new()
                .with_default_dialect("https://json-schema.org/draft/2020-12/schema");
            let first: Vec<_> = highlighter
                .highlight(&source)
                .map(|token| (token.class, token.text.to_owned()))
                .collect();
            let rebuilt: String = first.iter().map(|(_, text)| text.as_str()).collect();
            let second: Vec<_> = highlighter
                .highlight(&rebuilt)
                .map(|token| (token.class, token.text.to_owned()))
                .collect();
            prop_assert_eq!(first, second);
        }
    }
}
