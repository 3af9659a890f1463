// Copyright 2025 Cowboy AI, LLC.

//! Tokens of the ontology DSL

use std::fmt;

/// Reserved words; matching is case-sensitive
pub const KEYWORDS: [&str; 19] = [
    "ONTOLOGY",
    "OBJECT",
    "MORPHISM",
    "FUNCTOR",
    "OPERATION",
    "VALIDATE",
    "WITH",
    "MAP",
    "RULE",
    "COPRODUCT",
    "PRODUCT",
    "PULLBACK",
    "PUSHOUT",
    "DIFFERENCE",
    "APPLY",
    "COMPOSE",
    "attributes",
    "semantic",
    "type",
];

/// `true` when `word` is a reserved word
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// Token classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Reserved word
    Keyword,
    /// Name of an ontology, object, morphism, functor or result
    Identifier,
    /// Double-quoted text, quotes stripped
    String,
    /// Punctuation: `{ } [ ] ( ) : , =` or `->`
    Symbol,
    /// Digits and decimal points
    Number,
    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::String => "string",
            TokenKind::Symbol => "symbol",
            TokenKind::Number => "number",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A token with its source position (1-based line and column)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token class
    pub kind: TokenKind,
    /// Token text
    pub text: String,
    /// Line of the first character
    pub line: usize,
    /// Column of the first character
    pub column: usize,
}

impl Token {
    /// Create a token
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    /// `true` when the token has this kind and, if given, this text
    pub fn is(&self, kind: TokenKind, text: Option<&str>) -> bool {
        self.kind == kind && text.map_or(true, |text| self.text == text)
    }

    /// `true` for the keyword `word`
    pub fn is_keyword(&self, word: &str) -> bool {
        self.is(TokenKind::Keyword, Some(word))
    }

    /// `true` for the symbol `symbol`
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.is(TokenKind::Symbol, Some(symbol))
    }

    /// `true` for the end-of-input token
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("end of input"),
            TokenKind::String => write!(f, "string \"{}\"", self.text),
            TokenKind::Symbol => write!(f, "'{}'", self.text),
            kind => write!(f, "{} '{}'", kind, self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert!(is_keyword("ONTOLOGY"));
        assert!(is_keyword("semantic"));
        assert!(!is_keyword("ontology"));
        assert!(!is_keyword("SEMANTIC"));
    }

    #[test]
    fn test_token_matching_and_display() {
        let token = Token::new(TokenKind::Symbol, "->", 1, 3);
        assert!(token.is_symbol("->"));
        assert!(token.is(TokenKind::Symbol, None));
        assert!(!token.is_keyword("->"));
        assert_eq!(token.to_string(), "'->'");

        let ident = Token::new(TokenKind::Identifier, "Boiler", 2, 5);
        assert_eq!(ident.to_string(), "identifier 'Boiler'");
        assert_eq!(Token::new(TokenKind::Eof, "", 3, 1).to_string(), "end of input");
    }
}
