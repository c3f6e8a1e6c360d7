use model::BinaryOp;

use crate::error::{RuntimeError, RuntimeResult};
use crate::value::{Value, ValueKind};

/// Apply a binary operator to two evaluated operands.
///
/// Dispatch is on the left operand's kind; the right operand must have the
/// same kind. Ints and floats are never promoted into each other.
pub fn apply(left: Value, op: BinaryOp, right: Value) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::Nil, _) => Err(RuntimeError::UnsupportedOperator {
            op,
            operand: ValueKind::Nil,
        }),
        (Value::Int(l), Value::Int(r)) => int_op(l, op, r),
        (Value::Float(l), Value::Float(r)) => Ok(float_op(l, op, r)),
        (Value::Str(l), Value::Str(r)) => string_op(l, op, &r),
        (Value::Bool(l), Value::Bool(r)) => bool_op(l, op, r),
        (l, r) => Err(RuntimeError::IncompatibleTypes {
            op,
            left: l.kind(),
            right: r.kind(),
        }),
    }
}

fn int_op(l: i64, op: BinaryOp, r: i64) -> RuntimeResult<Value> {
    let result = match op {
        BinaryOp::Add => l.checked_add(r),
        BinaryOp::Sub => l.checked_sub(r),
        BinaryOp::Mul => l.checked_mul(r),
        BinaryOp::Div => {
            if r == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            // Truncates toward zero; only i64::MIN / -1 overflows
            l.checked_div(r)
        }
        BinaryOp::Equal => return Ok(Value::Bool(l == r)),
        BinaryOp::NotEqual => return Ok(Value::Bool(l != r)),
        BinaryOp::Greater => return Ok(Value::Bool(l > r)),
        BinaryOp::Less => return Ok(Value::Bool(l < r)),
        BinaryOp::GreaterEqual => return Ok(Value::Bool(l >= r)),
        BinaryOp::LessEqual => return Ok(Value::Bool(l <= r)),
    };
    result
        .map(Value::Int)
        .ok_or(RuntimeError::IntegerOverflow { op })
}

// IEEE-754 throughout: x / 0.0 is ±inf, 0.0 / 0.0 is NaN.
fn float_op(l: f64, op: BinaryOp, r: f64) -> Value {
    match op {
        BinaryOp::Add => Value::Float(l + r),
        BinaryOp::Sub => Value::Float(l - r),
        BinaryOp::Mul => Value::Float(l * r),
        BinaryOp::Div => Value::Float(l / r),
        BinaryOp::Equal => Value::Bool(l == r),
        BinaryOp::NotEqual => Value::Bool(l != r),
        BinaryOp::Greater => Value::Bool(l > r),
        BinaryOp::Less => Value::Bool(l < r),
        BinaryOp::GreaterEqual => Value::Bool(l >= r),
        BinaryOp::LessEqual => Value::Bool(l <= r),
    }
}

fn string_op(mut l: String, op: BinaryOp, r: &str) -> RuntimeResult<Value> {
    match op {
        BinaryOp::Add => {
            l.push_str(r);
            Ok(Value::Str(l))
        }
        BinaryOp::Equal => Ok(Value::Bool(l == r)),
        BinaryOp::NotEqual => Ok(Value::Bool(l != r)),
        _ => Err(RuntimeError::UnsupportedOperator {
            op,
            operand: ValueKind::String,
        }),
    }
}

fn bool_op(l: bool, op: BinaryOp, r: bool) -> RuntimeResult<Value> {
    match op {
        BinaryOp::Equal => Ok(Value::Bool(l == r)),
        BinaryOp::NotEqual => Ok(Value::Bool(l != r)),
        _ => Err(RuntimeError::UnsupportedOperator {
            op,
            operand: ValueKind::Bool,
        }),
    }
}
