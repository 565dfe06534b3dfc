//! Tokenizer for JSON documents.

use crate::{Span, Token, TokenKind};
use tracing::trace;

/// An open container, innermost last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// A tokenizer that produces tokens from JSON source text.
///
/// Strings in object member-name position are reported as [`TokenKind::Key`],
/// strings in value position as [`TokenKind::Str`]. The concatenated text of
/// the produced tokens reproduces the input exactly.
#[derive(Clone)]
pub struct Tokenizer<'src> {
    /// The source text being tokenized.
    source: &'src str,
    /// The remaining source text (suffix of `source`).
    remaining: &'src str,
    /// Current byte position in `source`.
    pos: u32,

    /// Stack of open containers.
    containers: Vec<Container>,
    /// Whether a string at the current position is an object member name.
    expect_key: bool,
}

impl<'src> Tokenizer<'src> {
    /// Create a new tokenizer for the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            remaining: source,
            pos: 0,
            containers: Vec::new(),
            expect_key: false,
        }
    }

    /// Get the current byte position.
    #[inline]
    pub fn position(&self) -> u32 {
        self.pos
    }

    /// Check if we're at the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Peek at the next character without consuming it.
    #[inline]
    fn peek(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    /// Peek at the nth character (0-indexed) without consuming.
    #[inline]
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.remaining.chars().nth(n)
    }

    /// Advance by one character and return it.
    #[inline]
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8() as u32;
        self.remaining = &self.remaining[c.len_utf8()..];
        Some(c)
    }

    /// Check if the remaining text starts with the given prefix.
    #[inline]
    fn starts_with(&self, prefix: &str) -> bool {
        self.remaining.starts_with(prefix)
    }

    /// Whether the innermost open container is an object.
    #[inline]
    fn in_object(&self) -> bool {
        self.containers.last() == Some(&Container::Object)
    }

    /// Create a token from the given start position to current position.
    fn token(&self, kind: TokenKind, start: u32) -> Token<'src> {
        let span = Span::new(start, self.pos);
        let text = &self.source[start as usize..self.pos as usize];
        trace!("Token {:?} at {:?}: {:?}", kind, span, text);
        Token::new(kind, span, text)
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token<'src> {
        // Check for EOF
        if self.is_eof() {
            return self.token(TokenKind::Eof, self.pos);
        }

        let start = self.pos;
        let c = self.peek().unwrap();

        match c {
            // Structural tokens
            '{' => {
                self.advance();
                self.containers.push(Container::Object);
                self.expect_key = true;
                self.token(TokenKind::LBrace, start)
            }
            '}' => {
                self.advance();
                self.containers.pop();
                self.expect_key = false;
                self.token(TokenKind::RBrace, start)
            }
            '[' => {
                self.advance();
                self.containers.push(Container::Array);
                self.expect_key = false;
                self.token(TokenKind::LBracket, start)
            }
            ']' => {
                self.advance();
                self.containers.pop();
                self.expect_key = false;
                self.token(TokenKind::RBracket, start)
            }
            ',' => {
                self.advance();
                // A comma re-arms member-name position inside an object.
                self.expect_key = self.in_object();
                self.token(TokenKind::Comma, start)
            }
            ':' => {
                self.advance();
                self.expect_key = false;
                self.token(TokenKind::Colon, start)
            }

            // String
            '"' => self.tokenize_string(),

            // Comments
            '/' if self.starts_with("//") => self.tokenize_line_comment(),
            '/' if self.starts_with("/*") => self.tokenize_block_comment(),

            // Whitespace
            ' ' | '\t' => self.tokenize_whitespace(),

            // Newline
            '\n' => {
                self.advance();
                self.token(TokenKind::Newline, start)
            }
            '\r' => {
                self.advance();
                if self.peek() == Some('\n') {
                    self.advance();
                }
                self.token(TokenKind::Newline, start)
            }

            // Number
            '-' => self.tokenize_number(),
            _ if c.is_ascii_digit() => self.tokenize_number(),

            // Bare word: `true`, `false`, `null`
            _ if c.is_ascii_alphabetic() => self.tokenize_word(),

            // Error: unrecognized character
            _ => {
                self.advance();
                self.token(TokenKind::Error, start)
            }
        }
    }

    /// Tokenize horizontal whitespace (spaces and tabs).
    fn tokenize_whitespace(&mut self) -> Token<'src> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' {
                self.advance();
            } else {
                break;
            }
        }
        self.token(TokenKind::Whitespace, start)
    }

    /// Tokenize a double-quoted string: `"..."`.
    ///
    /// Whether it is a member name or a value is decided by where it
    /// appears, matching where a JSON parser would expect a member name.
    fn tokenize_string(&mut self) -> Token<'src> {
        let start = self.pos;
        let is_key = self.expect_key && self.in_object();

        // Consume opening quote
        self.advance();

        loop {
            match self.peek() {
                None => {
                    // Unterminated string - return error
                    return self.token(TokenKind::Error, start);
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    // Escape sequence - consume backslash and next char
                    self.advance();
                    if self.peek().is_some() {
                        self.advance();
                    }
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        if is_key {
            self.expect_key = false;
            self.token(TokenKind::Key, start)
        } else {
            self.token(TokenKind::Str, start)
        }
    }

    /// Tokenize a number per the JSON grammar: `-?int frac? exp?`.
    fn tokenize_number(&mut self) -> Token<'src> {
        let start = self.pos;

        if self.peek() == Some('-') {
            self.advance();
        }

        // Integer part: at least one digit
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
            // A lone minus is not a number
            _ => return self.token(TokenKind::Error, start),
        }

        // Fraction: `.` followed by at least one digit
        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            while let Some(c) = self.peek() {
                if c.is_ascii_digit() {
                    self.advance();
                } else {
                    break;
                }
            }
        }

        // Exponent: `e`/`E`, optional sign, at least one digit
        if matches!(self.peek(), Some('e' | 'E')) {
            let digits_at = if matches!(self.peek_nth(1), Some('+' | '-')) {
                2
            } else {
                1
            };
            if self.peek_nth(digits_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digits_at {
                    self.advance();
                }
                while let Some(c) = self.peek() {
                    if c.is_ascii_digit() {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
        }

        self.token(TokenKind::Number, start)
    }

    /// Tokenize a bare word. Only `true`, `false`, and `null` are valid.
    fn tokenize_word(&mut self) -> Token<'src> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
        let kind = match &self.source[start as usize..self.pos as usize] {
            "true" | "false" => TokenKind::Bool,
            "null" => TokenKind::Null,
            _ => TokenKind::Error,
        };
        self.token(kind, start)
    }

    /// Tokenize a line comment: `// ...`.
    fn tokenize_line_comment(&mut self) -> Token<'src> {
        let start = self.pos;

        // Consume `//`
        self.advance();
        self.advance();

        // Consume until end of line
        while let Some(c) = self.peek() {
            if c == '\n' || c == '\r' {
                break;
            }
            self.advance();
        }

        self.token(TokenKind::LineComment, start)
    }

    /// Tokenize a block comment: `/* ... */`.
    fn tokenize_block_comment(&mut self) -> Token<'src> {
        let start = self.pos;

        // Consume `/*`
        self.advance();
        self.advance();

        loop {
            match self.peek() {
                None => {
                    // Unterminated block comment - return error
                    return self.token(TokenKind::Error, start);
                }
                Some('*') if self.peek_nth(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }

        self.token(TokenKind::BlockComment, start)
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every input reassembles from its tokens, no matter how damaged.
        #[test]
        fn tokens_cover_arbitrary_input(source in any::<String>()) {
            let rebuilt: String = Tokenizer::new(&source).map(|t| t.text).collect();
            prop_assert_eq!(rebuilt, source);
        }

        /// Spans are contiguous and gap-free.
        #[test]
        fn spans_are_contiguous(source in any::<String>()) {
            let mut pos = 0u32;
            for token in Tokenizer::new(&source) {
                prop_assert_eq!(token.span.start, pos);
                pos = token.span.end;
            }
            prop_assert_eq!(pos as usize, source.len());
        }
    }
}
