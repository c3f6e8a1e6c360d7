use model::BinaryOp;
use thiserror::Error;

use crate::value::ValueKind;

/// Typed errors produced while evaluating a program.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("'{construct}' condition must be a bool, got {found}")]
    TypeMismatch {
        construct: &'static str,
        found: ValueKind,
    },
    #[error("incompatible operand types for '{op}': {left} and {right}")]
    IncompatibleTypes {
        op: BinaryOp,
        left: ValueKind,
        right: ValueKind,
    },
    #[error("operator '{op}' is not supported for {operand}")]
    UnsupportedOperator { op: BinaryOp, operand: ValueKind },
    #[error("integer division by zero")]
    DivisionByZero,
    #[error("integer overflow in '{op}'")]
    IntegerOverflow { op: BinaryOp },
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },
    #[error("cannot assign to reserved word '{name}'")]
    ReservedAssignment { name: String },
    #[error("nesting exceeds the runtime limit of {limit} levels")]
    StackOverflow { limit: usize },
    #[error("failed to write output: {0}")]
    Output(String),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
