use model::{Expr, Literal, OpTerm, Term, Token, TokenKind};
use crate::error::{Construct, ParseError, ParseResult};
use crate::parser::Parser;

/// Expression parsing: one flat, left-associative operator chain.
///
/// There are no precedence tiers, so `1 + 2 * 3` is `(1 + 2) * 3`.
pub(crate) trait ExpressionParser {
    fn parse_expr(&mut self) -> ParseResult<Expr>;
    fn parse_term(&mut self) -> ParseResult<Term>;
}

impl<'a> ExpressionParser for Parser<'a> {
    fn parse_expr(&mut self) -> ParseResult<Expr> {
        let left = self.parse_term()?;
        let mut rest = Vec::new();

        while let Some(op) = self.peek_kind().binary_op() {
            self.advance();
            let term = self.parse_term()?;
            rest.push(OpTerm { op, term });
        }

        Ok(Expr { left, rest })
    }

    fn parse_term(&mut self) -> ParseResult<Term> {
        let Some(token) = self.peek() else {
            return Err(self.error_here("an expression", Construct::Term));
        };

        match token.kind {
            TokenKind::Number => {
                self.advance();
                number_term(token)
            }
            TokenKind::String => {
                self.advance();
                match &token.literal {
                    Some(Literal::Str(value)) => Ok(Term::String(value.clone())),
                    _ => Err(illegal(token)),
                }
            }
            TokenKind::Identifier | TokenKind::True | TokenKind::False | TokenKind::Nil => {
                self.advance();
                Ok(Term::Identifier(token.lexeme.to_string()))
            }
            TokenKind::OpenParenthesis => {
                self.advance();
                self.enter_nesting()?;
                let expr = self.parse_expr()?;
                self.expect(TokenKind::CloseParenthesis, "')'", Construct::Term)?;
                self.leave_nesting();
                Ok(Term::Parenthesized(Box::new(expr)))
            }
            _ => Err(self.error_here("a number, string, identifier or '('", Construct::Term)),
        }
    }
}

impl<'a> Parser<'a> {
    /// Whether the current token can begin a term.
    pub(crate) fn at_term_start(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::Number
                | TokenKind::String
                | TokenKind::Identifier
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Nil
                | TokenKind::OpenParenthesis
        )
    }
}

/// Numerals without a decimal point become integers, the rest floats.
fn number_term(token: &Token<'_>) -> ParseResult<Term> {
    if token.lexeme.contains('.') {
        return match token.literal {
            Some(Literal::Number(value)) => Ok(Term::Float(value)),
            _ => Err(illegal(token)),
        };
    }

    token
        .lexeme
        .parse::<i64>()
        .map(Term::Int)
        .map_err(|_| ParseError::IntegerOutOfRange {
            literal: token.lexeme.to_string(),
            line: token.line,
            column: token.column,
        })
}

fn illegal(token: &Token<'_>) -> ParseError {
    ParseError::IllegalToken {
        lexeme: token.lexeme.to_string(),
        line: token.line,
        column: token.column,
    }
}
