// Copyright 2025 Cowboy AI, LLC.

//! Tokenizer for the ontology DSL
//!
//! Tokenizing never fails. Characters outside every token class are dropped,
//! an unterminated string runs to the end of input, and the output always ends
//! with exactly one [`TokenKind::Eof`] token.

use super::token::{is_keyword, Token, TokenKind};

const SINGLE_SYMBOLS: [char; 9] = ['{', '}', '[', ']', '(', ')', ':', ',', '='];

/// Converts source text into tokens
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a lexer over `source`
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Consume the whole input
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        while let Some(ch) = self.peek() {
            match ch {
                ' ' | '\t' | '\r' => {
                    self.bump();
                }
                '\n' => {
                    self.bump();
                }
                '#' => self.skip_comment(),
                '"' => tokens.push(self.read_string()),
                '-' if self.peek_at(1) == Some('>') => {
                    tokens.push(Token::new(TokenKind::Symbol, "->", self.line, self.column));
                    self.bump();
                    self.bump();
                }
                c if SINGLE_SYMBOLS.contains(&c) => {
                    tokens.push(Token::new(TokenKind::Symbol, c.to_string(), self.line, self.column));
                    self.bump();
                }
                c if c.is_alphabetic() || c == '_' => tokens.push(self.read_word()),
                c if c.is_ascii_digit() => tokens.push(self.read_number()),
                _ => {
                    self.bump();
                }
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.line, self.column));
        tokens
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn read_string(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        self.bump();
        let mut text = String::new();
        while let Some(ch) = self.bump() {
            if ch == '"' {
                break;
            }
            text.push(ch);
        }
        Token::new(TokenKind::String, text, line, column)
    }

    fn read_word(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let text = self.take_while(|c| c.is_alphanumeric() || c == '_');
        let kind = if is_keyword(&text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        Token::new(kind, text, line, column)
    }

    fn read_number(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let text = self.take_while(|c| c.is_ascii_digit() || c == '.');
        Token::new(TokenKind::Number, text, line, column)
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if !accept(ch) {
                break;
            }
            text.push(ch);
            self.bump();
        }
        text
    }
}

/// Tokenize `source`
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).tokenize()
}
