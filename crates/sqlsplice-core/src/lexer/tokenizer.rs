//! SQL Tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};

/// A lexer that tokenizes SQL input.
pub struct Lexer<'a> {
    /// The input source code.
    input: &'a str,
    /// The current byte position.
    pos: usize,
    /// The byte position of the start of the current token.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Returns the next character without advancing.
    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Advances to the next character and returns it.
    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Advances while `predicate` holds.
    fn advance_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.advance();
        }
    }

    /// Skips whitespace and comments.
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            self.advance_while(char::is_whitespace);

            // -- and # comments run to the end of the line
            let line_comment = (self.peek() == Some('-') && self.peek_next() == Some('-'))
                || self.peek() == Some('#');
            if line_comment {
                self.advance_while(|c| c != '\n');
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance(); // /
                self.advance(); // *
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        None => break,
                        _ => {}
                    }
                }
                continue;
            }

            break;
        }
    }

    /// Creates a token spanning from the token start to the current position.
    const fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    /// Creates an error token.
    fn make_error(&self, message: &str) -> Token {
        self.make_token(TokenKind::Error(String::from(message)))
    }

    /// Scans an identifier or keyword.
    fn scan_word(&mut self) -> Token {
        self.advance_while(|c| c.is_alphanumeric() || c == '_' || c == '$');

        let text = &self.input[self.start..self.pos];
        match Keyword::from_str(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::Word),
        }
    }

    /// Scans text enclosed in `quote`; a doubled quote is an escaped quote.
    ///
    /// Backslash escapes are honoured inside string literals only.
    fn scan_quoted(&mut self, quote: char, kind: TokenKind, unterminated: &str) -> Token {
        self.advance(); // opening quote
        loop {
            match self.advance() {
                Some(c) if c == quote => {
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        return self.make_token(kind);
                    }
                }
                Some('\\') if kind == TokenKind::String => {
                    self.advance();
                }
                Some(_) => {}
                None => return self.make_error(unterminated),
            }
        }
    }

    /// Scans a number, including hexadecimal and exponent forms.
    fn scan_number(&mut self) -> Token {
        if self.peek() == Some('0') && matches!(self.peek_next(), Some('x' | 'X')) {
            self.advance();
            self.advance();
            self.advance_while(|c| c.is_ascii_hexdigit());
            return self.make_token(TokenKind::Number);
        }

        self.advance_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // .
            self.advance_while(|c| c.is_ascii_digit());
        }

        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            self.advance();
            if self.peek().is_some_and(|c| c == '+' || c == '-') {
                self.advance();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return self.make_error("Invalid number: missing exponent digits");
            }
            self.advance_while(|c| c.is_ascii_digit());
        }

        self.make_token(TokenKind::Number)
    }

    /// Scans `@name`, `@@name` or a quoted user variable.
    fn scan_variable(&mut self) -> Token {
        if self.peek() == Some('@') {
            self.advance();
        }
        match self.peek() {
            Some(quote @ ('\'' | '"' | '`')) => {
                return self.scan_quoted(quote, TokenKind::Variable, "Unterminated variable");
            }
            Some(c) if c.is_alphanumeric() || c == '_' || c == '$' => {}
            _ => return self.make_error("Expected variable name after @"),
        }
        self.advance_while(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.');
        self.make_token(TokenKind::Variable)
    }

    /// Consumes `follow` if it is the next character, then makes an operator.
    fn operator_with(&mut self, follow: &[char]) -> Token {
        if self.peek().is_some_and(|c| follow.contains(&c)) {
            self.advance();
        }
        self.make_token(TokenKind::Operator)
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.start = self.pos;

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '?' => self.make_token(TokenKind::Question),
            '*' => self.make_token(TokenKind::Star),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                self.pos = self.start;
                self.scan_number()
            }
            '.' => self.make_token(TokenKind::Dot),

            '+' | '-' | '/' | '%' | '^' | '~' => self.make_token(TokenKind::Operator),
            '=' => self.operator_with(&['=']),
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::Operator)
                } else {
                    self.make_error("Unexpected character: !")
                }
            }
            '<' => {
                if self.peek() == Some('=') && self.peek_next() == Some('>') {
                    self.advance();
                    self.advance();
                    self.make_token(TokenKind::Operator)
                } else {
                    self.operator_with(&['=', '>', '<'])
                }
            }
            '>' => self.operator_with(&['=', '>']),
            '|' => self.operator_with(&['|']),
            '&' => self.operator_with(&['&']),
            ':' => self.operator_with(&[':', '=']),

            '\'' => {
                self.pos = self.start;
                self.scan_quoted('\'', TokenKind::String, "Unterminated string literal")
            }
            '"' | '`' => {
                self.pos = self.start;
                self.scan_quoted(c, TokenKind::Word, "Unterminated quoted identifier")
            }
            'X' | 'x' | 'B' | 'b' | 'N' | 'n' if self.peek() == Some('\'') => {
                self.scan_quoted('\'', TokenKind::String, "Unterminated string literal")
            }
            '@' => self.scan_variable(),

            c if c.is_ascii_digit() => {
                self.pos = self.start;
                self.scan_number()
            }
            c if c.is_alphabetic() || c == '_' => {
                self.pos = self.start;
                self.scan_word()
            }

            _ => self.make_token(TokenKind::Error(format!("Unexpected character: {c}"))),
        }
    }

    /// Tokenizes the entire input and returns all tokens, ending with EOF.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}
