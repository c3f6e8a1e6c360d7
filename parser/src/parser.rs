use model::{Program, Token, TokenKind};
use crate::error::{Construct, ParseError, ParseResult};
use crate::statements::StatementParser;

/// Blocks and parenthesized expressions nested deeper than this are rejected.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Core parser struct that maintains parsing state
pub(crate) struct Parser<'a> {
    pub(crate) tokens: &'a [Token<'a>],
    pub(crate) pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Parser {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse the entire program: statements until end of input
    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            statements.push(self.parse_stmt()?);
        }
        Ok(Program { statements })
    }

    pub(crate) fn peek(&self) -> Option<&'a Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().map_or(TokenKind::Eof, |t| t.kind)
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek_kind() == TokenKind::Eof
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn advance(&mut self) -> Option<&'a Token<'a>> {
        let token = self.tokens.get(self.pos)?;
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        Some(token)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(
        &mut self,
        kind: TokenKind,
        expected: &'static str,
        construct: Construct,
    ) -> ParseResult<&'a Token<'a>> {
        if self.check(kind) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.error_here(expected, construct))
    }

    /// Position of the current token, or of the last token once input runs out.
    pub(crate) fn position(&self) -> (usize, usize) {
        self.peek()
            .or_else(|| self.tokens.last())
            .map_or((1, 1), |t| (t.line, t.column))
    }

    pub(crate) fn error_here(&self, expected: &'static str, construct: Construct) -> ParseError {
        let (line, column) = self.position();
        match self.peek() {
            Some(token) if token.kind == TokenKind::Illegal => ParseError::IllegalToken {
                lexeme: token.lexeme.to_string(),
                line,
                column,
            },
            _ => ParseError::UnexpectedToken {
                expected,
                found: self.peek_kind(),
                construct,
                line,
                column,
            },
        }
    }

    pub(crate) fn enter_nesting(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            let (line, column) = self.position();
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
                line,
                column,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
