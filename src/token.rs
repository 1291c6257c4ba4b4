//! The token definition for the search language.

use crate::ast::Command;

/// A token is a single unit of the language, with a specific kind and location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub span: Span,
}

/// The kind of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind<'a> {
    // Punctuation
    At,  // @
    Dot, // .

    // Operators: = + - /
    Operator(Command),

    /// A run of word characters (alphanumerics and `_`), digits included.
    Word(&'a str),

    // Special
    Illegal, // Anything else outside a clause (free text, punctuation)
}

/// Represents a span in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// The starting byte offset.
    pub start: usize,
    /// The ending byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Two spans touch when one ends exactly where the other starts.
    pub fn touches(&self, next: &Span) -> bool {
        self.end == next.start
    }
}
