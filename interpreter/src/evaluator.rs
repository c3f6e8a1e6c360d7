use std::io::Write;

use model::{Expr, Program, Stmt, Term};

use crate::config::RuntimeConfig;
use crate::environment::Environment;
use crate::error::{RuntimeError, RuntimeResult};
use crate::operators::apply;
use crate::value::Value;

/// Tree-walking evaluator. Printed values go to `out`, one per line.
pub struct Interpreter<W: Write> {
    out: W,
    config: RuntimeConfig,
    depth: usize,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self::with_config(out, RuntimeConfig::default())
    }

    pub fn with_config(out: W, config: RuntimeConfig) -> Self {
        Self {
            out,
            config,
            depth: 0,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Execute every statement in program order, stopping at the first error.
    pub fn run(&mut self, program: &Program, env: &mut Environment) -> RuntimeResult<()> {
        self.depth = 0;
        self.exec_block(&program.statements, env)?;
        self.out
            .flush()
            .map_err(|e| RuntimeError::Output(e.to_string()))
    }

    fn exec_block(&mut self, statements: &[Stmt], env: &mut Environment) -> RuntimeResult<()> {
        for stmt in statements {
            self.exec_stmt(stmt, env)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt, env: &mut Environment) -> RuntimeResult<()> {
        match stmt {
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr, env)?;
                writeln!(self.out, "{value}").map_err(|e| RuntimeError::Output(e.to_string()))
            }
            Stmt::Assignment { name, value } => {
                if Value::from_literal_name(name).is_some() {
                    return Err(RuntimeError::ReservedAssignment { name: name.clone() });
                }
                let value = self.eval_expr(value, env)?;
                env.assign(name.clone(), value);
                Ok(())
            }
            // Bodies run in the enclosing environment; there is no block scope.
            Stmt::If { cond, body } => {
                if self.eval_condition(cond, "if", env)? {
                    self.nested(|this| this.exec_block(body, env))?;
                }
                Ok(())
            }
            Stmt::While { cond, body } => {
                while self.eval_condition(cond, "while", env)? {
                    self.nested(|this| this.exec_block(body, env))?;
                }
                Ok(())
            }
        }
    }

    fn eval_condition(&mut self, cond: &Expr, construct: &'static str, env: &Environment) -> RuntimeResult<bool> {
        match self.eval_expr(cond, env)? {
            Value::Bool(b) => Ok(b),
            other => Err(RuntimeError::TypeMismatch {
                construct,
                found: other.kind(),
            }),
        }
    }

    /// Left to right, no precedence: each operator folds into the running result.
    fn eval_expr(&mut self, expr: &Expr, env: &Environment) -> RuntimeResult<Value> {
        let mut result = self.eval_term(&expr.left, env)?;
        for op_term in &expr.rest {
            let right = self.eval_term(&op_term.term, env)?;
            result = apply(result, op_term.op, right)?;
        }
        Ok(result)
    }

    fn eval_term(&mut self, term: &Term, env: &Environment) -> RuntimeResult<Value> {
        match term {
            Term::Int(v) => Ok(Value::Int(*v)),
            Term::Float(v) => Ok(Value::Float(*v)),
            Term::String(s) => Ok(Value::Str(s.clone())),
            Term::Identifier(name) => lookup(name, env),
            Term::Parenthesized(inner) => self.nested(|this| this.eval_expr(inner, env)),
        }
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> RuntimeResult<T>) -> RuntimeResult<T> {
        if self.depth >= self.config.max_depth {
            return Err(RuntimeError::StackOverflow {
                limit: self.config.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

// Literal words resolve before the environment is consulted.
fn lookup(name: &str, env: &Environment) -> RuntimeResult<Value> {
    if let Some(value) = Value::from_literal_name(name) {
        return Ok(value);
    }
    env.get(name)
        .cloned()
        .ok_or_else(|| RuntimeError::UndefinedVariable {
            name: name.to_string(),
        })
}
