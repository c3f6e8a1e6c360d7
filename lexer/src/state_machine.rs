use model::{Literal, Token, TokenKind};
use crate::error::{LexError, LexResult};
use crate::keywords::{is_identifier_continue, is_identifier_start, keyword};
use crate::literals::{parse_number_literal, unescape_string_body};

pub struct StateMachineLexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    token_start: usize,
    start_line: usize,
    start_column: usize,
}

impl<'a> StateMachineLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            token_start: 0,
            start_line: 1,
            start_column: 1,
        }
    }

    pub fn tokenize(&mut self) -> LexResult<Vec<Token<'a>>> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            match self.lex_next_token()? {
                Some(token) => tokens.push(token),
                None => continue, // Whitespace or comment consumed
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.line, self.column));
        Ok(tokens)
    }

    fn lex_next_token(&mut self) -> LexResult<Option<Token<'a>>> {
        self.skip_whitespace();

        let Some(ch) = self.current_char() else {
            return Ok(None);
        };

        self.token_start = self.pos;
        self.start_line = self.line;
        self.start_column = self.column;

        match ch {
            '/' if self.peek(1) == Some('/') => {
                self.skip_line_comment();
                Ok(None)
            }
            '"' => self.lex_string().map(Some),
            '0'..='9' => Ok(Some(self.lex_number())),
            c if is_identifier_start(c) => Ok(Some(self.lex_identifier())),
            _ => self.lex_operator_or_punctuation(ch).map(Some),
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    /// Consume one character, keeping line/column in step.
    fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn current_slice(&self) -> &'a str {
        &self.input[self.token_start..self.pos]
    }

    fn make_token(&self, kind: TokenKind) -> Token<'a> {
        Token::new(kind, self.current_slice(), self.start_line, self.start_column)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.current_char() {
            self.advance();
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn lex_string(&mut self) -> LexResult<Token<'a>> {
        self.advance(); // Skip opening quote
        let body_start = self.pos;

        loop {
            match self.current_char() {
                None => {
                    return Err(LexError::UnterminatedString {
                        line: self.start_line,
                        column: self.start_column,
                    });
                }
                Some('"') if self.peek(1) == Some('"') => {
                    self.advance();
                    self.advance();
                }
                Some('"') => break,
                Some(_) => {
                    self.advance();
                }
            }
        }

        let body = &self.input[body_start..self.pos];
        self.advance(); // Skip closing quote

        let value = unescape_string_body(body);
        Ok(self.make_token(TokenKind::String).with_literal(Literal::Str(value)))
    }

    fn lex_number(&mut self) -> Token<'a> {
        self.consume_digits();

        // The dot belongs to the number only when a digit follows it
        if self.current_char() == Some('.') && self.peek(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
        }

        let text = self.current_slice();
        match parse_number_literal(text) {
            Some(value) => self.make_token(TokenKind::Number).with_literal(Literal::Number(value)),
            None => self
                .make_token(TokenKind::Illegal)
                .with_literal(Literal::Text(text.to_string())),
        }
    }

    fn consume_digits(&mut self) {
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn lex_identifier(&mut self) -> Token<'a> {
        while self.current_char().is_some_and(is_identifier_continue) {
            self.advance();
        }

        let text = self.current_slice();
        match keyword(text) {
            Some(kind) => self.make_token(kind),
            None => self
                .make_token(TokenKind::Identifier)
                .with_literal(Literal::Text(text.to_string())),
        }
    }

    fn lex_operator_or_punctuation(&mut self, ch: char) -> LexResult<Token<'a>> {
        self.advance();

        // Two-character operators
        let two_char_kind = match (ch, self.current_char()) {
            ('=', Some('=')) => Some(TokenKind::EqualEqual),
            ('!', Some('=')) => Some(TokenKind::BangEqual),
            ('<', Some('=')) => Some(TokenKind::LessEqual),
            ('>', Some('=')) => Some(TokenKind::GreaterEqual),
            _ => None,
        };

        if let Some(kind) = two_char_kind {
            self.advance();
            return Ok(self.make_token(kind));
        }

        // Single-character operators and punctuation
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '=' => TokenKind::Equal,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '(' => TokenKind::OpenParenthesis,
            ')' => TokenKind::CloseParenthesis,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,
            '{' => TokenKind::OpenBrace,
            '}' => TokenKind::CloseBrace,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            '!' => {
                return Err(LexError::IncompleteNotEqual {
                    line: self.start_line,
                    column: self.start_column,
                });
            }
            character => {
                return Err(LexError::UnexpectedCharacter {
                    character,
                    line: self.start_line,
                    column: self.start_column,
                });
            }
        };

        Ok(self.make_token(kind))
    }
}
