use std::fmt;

use lexer::LexError;
use model::TokenKind;
use thiserror::Error;

/// The grammar rule that was being parsed when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Statement,
    Print,
    Assignment,
    If,
    While,
    Block,
    Term,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Construct::Statement => "statement",
            Construct::Print => "print statement",
            Construct::Assignment => "assignment",
            Construct::If => "if statement",
            Construct::While => "while loop",
            Construct::Block => "block",
            Construct::Term => "term",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("[line {line}:{column}] expected {expected} in {construct}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
        construct: Construct,
        line: usize,
        column: usize,
    },
    #[error("[line {line}:{column}] illegal token '{lexeme}'")]
    IllegalToken {
        lexeme: String,
        line: usize,
        column: usize,
    },
    #[error("[line {line}:{column}] integer literal {literal} does not fit in 64 bits")]
    IntegerOutOfRange {
        literal: String,
        line: usize,
        column: usize,
    },
    #[error("[line {line}:{column}] nesting is deeper than {limit} levels")]
    NestingTooDeep {
        limit: usize,
        line: usize,
        column: usize,
    },
}

pub type ParseResult<T> = Result<T, ParseError>;
