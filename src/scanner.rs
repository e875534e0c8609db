use std::str::Chars;

use peekmore::{PeekMore, PeekMoreIterator};

use crate::error::ScanError;
use crate::literal::Literal;
use crate::token::{Token, Type};

/// Converts source text into a token stream, continuing past lex errors
/// instead of aborting on the first one.
pub struct Scanner<'a> {
    source: PeekMoreIterator<Chars<'a>>,
    tokens: Vec<Token>,
    errors: Vec<ScanError>,
    start_line: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Scanner<'a> {
        Scanner {
            source: source.chars().peekmore(),
            tokens: vec![],
            errors: vec![],
            start_line: 1,
            line: 1,
        }
    }

    /// Scans the whole source and returns the tokens (EOF-terminated) and
    /// any lex errors encountered along the way.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<ScanError>) {
        while !self.is_at_end() {
            self.start_line = self.line;
            self.scan_token();
        }

        self.tokens.push(Token::new(Type::Eof, String::new(), None, self.line));

        (self.tokens, self.errors)
    }

    fn advance(&mut self) -> char {
        self.source.next().expect("advance past end of input")
    }

    /// Returns the next character without consuming it, or `'\0'` at end of input.
    fn peek(&mut self) -> char {
        *self.source.peek().unwrap_or(&'\0')
    }

    fn peek_next(&mut self) -> char {
        *self.source.peek_next().unwrap_or(&'\0')
    }

    fn match_next(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_at_end(&mut self) -> bool {
        self.source.peek().is_none()
    }

    fn add_token(&mut self, kind: Type, lexeme: String, literal: Option<Literal>) {
        self.tokens.push(Token::new(kind, lexeme, literal, self.start_line));
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(ScanError { line: self.line, message: message.into() });
    }

    /// Handles a string literal. Assumes the opening quote has not yet been consumed.
    fn string(&mut self) {
        self.advance(); // opening quote
        let mut value = String::new();

        while self.peek() != '"' && !self.is_at_end() {
            let c = self.advance();
            if c == '\n' {
                self.line += 1;
            }
            value.push(c);
        }

        if self.is_at_end() {
            self.error("Unterminated string.");
            return;
        }

        self.advance(); // closing quote

        self.add_token(Type::String, value.clone(), Some(Literal::String(value)));
    }

    /// Handles a number literal. Assumes no digits have yet been consumed.
    fn number(&mut self) {
        let mut value = String::new();

        while self.peek().is_ascii_digit() {
            value.push(self.advance());
        }

        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            value.push(self.advance()); // consume '.'
            while self.peek().is_ascii_digit() {
                value.push(self.advance());
            }
        }

        let number: f64 = value.parse().expect("validated digit sequence");
        self.add_token(Type::Number, value, Some(Literal::Number(number)));
    }

    /// Handles an identifier or keyword. Assumes no characters have yet been consumed.
    fn identifier(&mut self) {
        let mut value = String::new();

        while self.peek().is_alphanumeric() || self.peek() == '_' {
            value.push(self.advance());
        }

        let kind = match value.as_str() {
            "and" => Type::And,
            "class" => Type::Class,
            "else" => Type::Else,
            "false" => Type::False,
            "for" => Type::For,
            "fun" => Type::Fun,
            "if" => Type::If,
            "nil" => Type::Nil,
            "or" => Type::Or,
            "print" => Type::Print,
            "return" => Type::Return,
            "super" => Type::Super,
            "this" => Type::This,
            "true" => Type::True,
            "var" => Type::Var,
            "while" => Type::While,
            _ => Type::Identifier,
        };

        self.add_token(kind, value, None);
    }

    fn scan_token(&mut self) {
        let c = self.peek();
        match c {
            '(' => { self.advance(); self.add_token(Type::LeftParen, c.to_string(), None); }
            ')' => { self.advance(); self.add_token(Type::RightParen, c.to_string(), None); }
            '{' => { self.advance(); self.add_token(Type::LeftBrace, c.to_string(), None); }
            '}' => { self.advance(); self.add_token(Type::RightBrace, c.to_string(), None); }
            ',' => { self.advance(); self.add_token(Type::Comma, c.to_string(), None); }
            '.' => { self.advance(); self.add_token(Type::Dot, c.to_string(), None); }
            '-' => { self.advance(); self.add_token(Type::Minus, c.to_string(), None); }
            '+' => { self.advance(); self.add_token(Type::Plus, c.to_string(), None); }
            ';' => { self.advance(); self.add_token(Type::Semicolon, c.to_string(), None); }
            '*' => { self.advance(); self.add_token(Type::Star, c.to_string(), None); }
            '%' => { self.advance(); self.add_token(Type::Percent, c.to_string(), None); }
            '^' => { self.advance(); self.add_token(Type::Caret, c.to_string(), None); }

            '!' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::BangEqual, "!=".to_string(), None);
                } else {
                    self.add_token(Type::Bang, "!".to_string(), None);
                }
            }
            '=' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::EqualEqual, "==".to_string(), None);
                } else {
                    self.add_token(Type::Equal, "=".to_string(), None);
                }
            }
            '<' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::LessEqual, "<=".to_string(), None);
                } else {
                    self.add_token(Type::Less, "<".to_string(), None);
                }
            }
            '>' => {
                self.advance();
                if self.match_next('=') {
                    self.add_token(Type::GreaterEqual, ">=".to_string(), None);
                } else {
                    self.add_token(Type::Greater, ">".to_string(), None);
                }
            }
            '/' => {
                self.advance();
                if self.match_next('/') {
                    while self.peek() != '\n' && !self.is_at_end() {
                        self.advance();
                    }
                } else {
                    self.add_token(Type::Slash, "/".to_string(), None);
                }
            }

            ' ' | '\r' | '\t' => { self.advance(); }

            '\n' => {
                self.advance();
                self.line += 1;
            }

            '"' => self.string(),

            c if c.is_ascii_digit() => self.number(),
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            _ => {
                self.advance();
                self.error("Unexpected character.");
            }
        }
    }
}
