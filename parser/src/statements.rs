use model::{Stmt, TokenKind};
use crate::error::{Construct, ParseResult};
use crate::expressions::ExpressionParser;
use crate::parser::Parser;

/// Statement parsing functionality
pub(crate) trait StatementParser {
    fn parse_stmt(&mut self) -> ParseResult<Stmt>;
    fn parse_block(&mut self, construct: Construct) -> ParseResult<Vec<Stmt>>;
}

impl<'a> StatementParser for Parser<'a> {
    fn parse_block(&mut self, construct: Construct) -> ParseResult<Vec<Stmt>> {
        self.expect(TokenKind::OpenBrace, "'{'", construct)?;
        self.enter_nesting()?;
        let mut statements = Vec::new();
        while !self.check(TokenKind::CloseBrace) && !self.is_at_end() {
            statements.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::CloseBrace, "'}'", Construct::Block)?;
        self.leave_nesting();
        Ok(statements)
    }

    /// Alternatives are tried in a fixed order: print, assignment, if, while.
    /// Once the leading token matches, the alternative is committed to.
    fn parse_stmt(&mut self) -> ParseResult<Stmt> {
        if self.match_token(TokenKind::Print) {
            if !self.at_term_start() {
                return Err(self.error_here("an expression", Construct::Print));
            }
            let expr = self.parse_expr()?;
            return Ok(Stmt::Print(expr));
        }

        if matches!(
            self.peek_kind(),
            TokenKind::Identifier | TokenKind::True | TokenKind::False | TokenKind::Nil
        ) {
            return self.parse_assignment();
        }

        if self.match_token(TokenKind::If) {
            let cond = self.parse_expr()?;
            let body = self.parse_block(Construct::If)?;
            return Ok(Stmt::If { cond, body });
        }

        if self.match_token(TokenKind::While) {
            let cond = self.parse_expr()?;
            let body = self.parse_block(Construct::While)?;
            return Ok(Stmt::While { cond, body });
        }

        Err(self.error_here("'print', an assignment, 'if' or 'while'", Construct::Statement))
    }
}

impl<'a> Parser<'a> {
    // `true`, `false` and `nil` are accepted as targets here; the
    // interpreter decides what assigning to them means.
    fn parse_assignment(&mut self) -> ParseResult<Stmt> {
        let name = match self.advance() {
            Some(token) => token.lexeme.to_string(),
            None => return Err(self.error_here("identifier", Construct::Assignment)),
        };
        self.expect(TokenKind::Equal, "'='", Construct::Assignment)?;
        let value = self.parse_expr()?;
        Ok(Stmt::Assignment { name, value })
    }
}
