use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("[line {line}:{column}] unexpected character '{character}'")]
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
    },
    #[error("[line {line}:{column}] unexpected character '!' (did you mean \"!=\")")]
    IncompleteNotEqual { line: usize, column: usize },
    #[error("[line {line}:{column}] unterminated string literal")]
    UnterminatedString { line: usize, column: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. }
            | LexError::IncompleteNotEqual { line, .. }
            | LexError::UnterminatedString { line, .. } => *line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { column, .. }
            | LexError::IncompleteNotEqual { column, .. }
            | LexError::UnterminatedString { column, .. } => *column,
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
