// Interpreter module: evaluates a Program AST against a mutable Environment
//
// Module organization:
// - evaluator.rs: the recursive statement/expression walk
// - operators.rs: binary operator dispatch over dynamic values
// - value.rs: Value and ValueKind
// - environment.rs: the flat variable namespace
// - config.rs: runtime limits
// - error.rs: RuntimeError

mod config;
mod environment;
mod error;
mod evaluator;
mod operators;
mod value;

pub use config::{DEFAULT_MAX_DEPTH, RuntimeConfig};
pub use environment::Environment;
pub use error::{RuntimeError, RuntimeResult};
pub use evaluator::Interpreter;
pub use operators::apply;
pub use value::{Value, ValueKind};

use model::Program;

/// Run a program, printing to standard output.
pub fn run(program: &Program, env: &mut Environment) -> RuntimeResult<()> {
    let stdout = std::io::stdout();
    let mut interpreter = Interpreter::new(stdout.lock());
    interpreter.run(program, env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{Expr, Stmt, Term};
    use std::io;

    struct ClosedSink;

    impl io::Write for ClosedSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn execute(src: &str) -> (RuntimeResult<()>, String, Environment) {
        execute_with(src, RuntimeConfig::default())
    }

    fn execute_with(src: &str, config: RuntimeConfig) -> (RuntimeResult<()>, String, Environment) {
        let program = parser::parse(src).expect("program should parse");
        let mut env = Environment::new();
        let mut interpreter = Interpreter::with_config(Vec::new(), config);
        let result = interpreter.run(&program, &mut env);
        let output = String::from_utf8(interpreter.into_output()).expect("output is UTF-8");
        (result, output, env)
    }

    fn output_of(src: &str) -> String {
        let (result, output, _) = execute(src);
        assert_eq!(result, Ok(()), "program failed: {src}");
        output
    }

    fn error_of(src: &str) -> RuntimeError {
        execute(src).0.expect_err("program should fail")
    }

    // ─── Expression evaluation ──────────────────────────────────
    #[test]
    fn evaluates_left_to_right_without_precedence() {
        assert_eq!(output_of("print 1 + 2 * 3"), "9\n");
        assert_eq!(output_of("print 10 - 4 - 3"), "3\n");
        assert_eq!(output_of("print 2 + 8 / 2"), "5\n");
    }

    #[test]
    fn parentheses_group() {
        assert_eq!(output_of("print 1 + (2 * 3)"), "7\n");
        assert_eq!(output_of("print ((4))"), "4\n");
    }

    #[test]
    fn comparison_in_chain_yields_bool() {
        assert_eq!(output_of("print 1 + 1 == 2"), "true\n");
        assert_eq!(output_of("print 3 > 2 == true"), "true\n");
    }

    #[test]
    fn prints_each_value_kind() {
        let src = "print 7\nprint 2.5\nprint 4.0\nprint \"hi\"\nprint true\nprint false\nprint nil";
        assert_eq!(output_of(src), "7\n2.5\n4.0\nhi\ntrue\nfalse\nnil\n");
    }

    #[test]
    fn string_concatenation_and_escapes() {
        assert_eq!(output_of(r#"print "He said ""hi""" + "!""#), "He said \"hi\"!\n");
    }

    #[test]
    fn float_division_by_zero_prints_infinity() {
        assert_eq!(output_of("print 1.0 / 0.0"), "inf\n");
        assert_eq!(output_of("print 0.0 / 0.0"), "NaN\n");
    }

    #[test]
    fn integer_division_by_zero_fails() {
        assert_eq!(error_of("print 1 / 0"), RuntimeError::DivisionByZero);
    }

    #[test]
    fn mixed_types_fail() {
        assert_eq!(
            error_of("print 1 + \"a\""),
            RuntimeError::IncompatibleTypes {
                op: model::BinaryOp::Add,
                left: ValueKind::Int,
                right: ValueKind::String,
            }
        );
        assert!(matches!(error_of("print 1 + 1.0"), RuntimeError::IncompatibleTypes { .. }));
    }

    #[test]
    fn nil_operand_fails() {
        assert_eq!(
            error_of("print nil == nil"),
            RuntimeError::UnsupportedOperator { op: model::BinaryOp::Equal, operand: ValueKind::Nil }
        );
    }

    // ─── Assignment and environment ─────────────────────────────
    #[test]
    fn assignment_persists_across_statements() {
        assert_eq!(output_of("x = 1\nx = x + 1\nprint x"), "2\n");
    }

    #[test]
    fn assignment_can_change_kind() {
        assert_eq!(output_of("x = 1\nx = \"one\"\nprint x"), "one\n");
    }

    #[test]
    fn final_environment_is_observable() {
        let (result, _, env) = execute("a = 1\nb = a + 1.5");
        assert!(matches!(result, Err(RuntimeError::IncompatibleTypes { .. })));
        assert_eq!(env.get("a"), Some(&Value::Int(1)));
        assert!(!env.contains("b"));

        let (result, _, env) = execute("a = 1\nb = \"x\"");
        assert_eq!(result, Ok(()));
        assert_eq!(env.len(), 2);
        assert_eq!(env.get("b"), Some(&Value::Str("x".to_string())));
    }

    #[test]
    fn undefined_variable_fails() {
        assert_eq!(
            error_of("print y"),
            RuntimeError::UndefinedVariable { name: "y".to_string() }
        );
    }

    #[test]
    fn literal_words_never_enter_environment() {
        let (result, output, env) = execute("t = true\nprint t == true");
        assert_eq!(result, Ok(()));
        assert_eq!(output, "true\n");
        assert!(!env.contains("true"));
    }

    #[test]
    fn assigning_to_reserved_word_fails() {
        for word in ["true", "false", "nil"] {
            let (result, _, env) = execute(&format!("{word} = 5"));
            assert_eq!(result, Err(RuntimeError::ReservedAssignment { name: word.to_string() }));
            assert!(env.is_empty());
        }
    }

    #[test]
    fn reserved_assignment_is_checked_before_evaluation() {
        // The right-hand side would fail with UndefinedVariable if evaluated
        assert_eq!(
            error_of("nil = missing"),
            RuntimeError::ReservedAssignment { name: "nil".to_string() }
        );
    }

    // ─── Control flow ───────────────────────────────────────────
    #[test]
    fn if_true_runs_body_in_shared_environment() {
        assert_eq!(output_of("if 1 < 2 { x = 5 } print x"), "5\n");
    }

    #[test]
    fn if_false_has_no_side_effects() {
        let (result, output, env) = execute("if false { x = 1 } print x");
        assert_eq!(result, Err(RuntimeError::UndefinedVariable { name: "x".to_string() }));
        assert_eq!(output, "");
        assert!(env.is_empty());
    }

    #[test]
    fn if_condition_must_be_bool() {
        assert_eq!(
            error_of("if 1 { print 1 }"),
            RuntimeError::TypeMismatch { construct: "if", found: ValueKind::Int }
        );
    }

    #[test]
    fn while_loop_mutations_visible_after_loop() {
        assert_eq!(output_of("i = 0\nwhile i < 3 { i = i + 1 } print i"), "3\n");
    }

    #[test]
    fn while_condition_checked_before_first_iteration() {
        assert_eq!(output_of("while false { print 1 } print 2"), "2\n");
    }

    #[test]
    fn while_body_prints_each_iteration() {
        let src = "i = 0\nwhile i < 3 {\n  print i\n  i = i + 1\n}";
        assert_eq!(output_of(src), "0\n1\n2\n");
    }

    #[test]
    fn while_condition_must_be_bool() {
        assert_eq!(
            error_of("while \"yes\" { }"),
            RuntimeError::TypeMismatch { construct: "while", found: ValueKind::String }
        );
    }

    #[test]
    fn while_condition_type_checked_every_iteration() {
        let src = "x = 0\nwhile x < 2 { x = x + 1 if x == 2 { x = nil } }";
        assert!(matches!(error_of(src), RuntimeError::UnsupportedOperator { operand: ValueKind::Nil, .. }));
    }

    #[test]
    fn nested_loops() {
        let src = "
            total = 0
            i = 0
            while i < 3 {
                j = 0
                while j < 4 {
                    total = total + 1
                    j = j + 1
                }
                i = i + 1
            }
            print total
        ";
        assert_eq!(output_of(src), "12\n");
    }

    #[test]
    fn output_before_error_is_kept() {
        let (result, output, _) = execute("print 1\nprint 2\nprint z\nprint 3");
        assert!(matches!(result, Err(RuntimeError::UndefinedVariable { .. })));
        assert_eq!(output, "1\n2\n");
    }

    // ─── Output sink ────────────────────────────────────────────
    #[test]
    fn failing_sink_is_output_error() {
        let program = parser::parse("x = 1\nprint x\nx = 2").unwrap();
        let mut env = Environment::new();
        let mut interpreter = Interpreter::new(ClosedSink);
        let result = interpreter.run(&program, &mut env);
        assert!(matches!(result, Err(RuntimeError::Output(ref msg)) if msg.contains("closed")));
        assert_eq!(env.get("x"), Some(&Value::Int(1)));
    }

    #[test]
    fn run_to_stdout_updates_environment() {
        let program = parser::parse("a = 2\nb = a * 3").unwrap();
        let mut env = Environment::new();
        assert_eq!(run(&program, &mut env), Ok(()));
        assert_eq!(env.get("b"), Some(&Value::Int(6)));
    }

    // ─── Limits ─────────────────────────────────────────────────
    #[test]
    fn nesting_beyond_limit_is_stack_overflow() {
        let config = RuntimeConfig::default().with_max_depth(2);
        let (result, _, _) = execute_with("print (((1)))", config);
        assert_eq!(result, Err(RuntimeError::StackOverflow { limit: 2 }));

        let (result, output, _) = execute_with("print ((1))", config);
        assert_eq!(result, Ok(()));
        assert_eq!(output, "1\n");
    }

    #[test]
    fn nested_blocks_count_toward_limit() {
        let config = RuntimeConfig::default().with_max_depth(1);
        let (result, _, _) = execute_with("if true { if true { print 1 } }", config);
        assert_eq!(result, Err(RuntimeError::StackOverflow { limit: 1 }));
    }

    #[test]
    fn depth_resets_after_loop_iterations() {
        let config = RuntimeConfig::default().with_max_depth(1);
        let (result, output, _) = execute_with("i = 0 while i < 5 { i = i + 1 } print i", config);
        assert_eq!(result, Ok(()));
        assert_eq!(output, "5\n");
    }

    #[test]
    fn deep_hand_built_program_fails_cleanly() {
        let mut stmt = Stmt::Print(Expr::term(Term::Int(1)));
        for _ in 0..(DEFAULT_MAX_DEPTH + 10) {
            stmt = Stmt::If {
                cond: Expr::term(Term::Identifier("true".to_string())),
                body: vec![stmt],
            };
        }
        let program = Program { statements: vec![stmt] };
        let mut interpreter = Interpreter::new(Vec::new());
        let result = interpreter.run(&program, &mut Environment::new());
        assert_eq!(result, Err(RuntimeError::StackOverflow { limit: DEFAULT_MAX_DEPTH }));
    }

    #[test]
    fn interpreter_can_run_twice() {
        let program = parser::parse("x = x + 1").unwrap();
        let mut env = Environment::new();
        env.assign("x", Value::Int(0));
        let mut interpreter = Interpreter::new(Vec::new());
        interpreter.run(&program, &mut env).unwrap();
        interpreter.run(&program, &mut env).unwrap();
        assert_eq!(env.get("x"), Some(&Value::Int(2)));
    }

    #[test]
    fn tokens_then_parse_then_run() {
        let tokens = lexer::lex("print \"a\" + \"b\"").unwrap();
        let program = parser::parse_tokens(&tokens).unwrap();
        let mut interpreter = Interpreter::new(Vec::new());
        interpreter.run(&program, &mut Environment::new()).unwrap();
        assert_eq!(interpreter.into_output(), b"ab\n");
    }
}
