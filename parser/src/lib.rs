// Parser module: Converts a list of tokens into an abstract syntax tree (AST)
//
// Module organization:
// - parser.rs: Core Parser struct, token cursor helpers and nesting guard
// - statements.rs: Statement parsing (print, assignment, if, while, blocks)
// - expressions.rs: Flat left-to-right expression chains and terms
// - error.rs: ParseError and the Construct being parsed when it occurred

mod error;
mod expressions;
mod parser;
mod statements;

pub use error::{Construct, ParseError, ParseResult};
pub use parser::MAX_NESTING_DEPTH;

use model::{Program, Token};
use parser::Parser;

/// Parse a list of tokens into a Program AST
///
/// # Arguments
/// * `tokens` - Slice of tokens from the lexer, normally ending in `Eof`
///
/// # Returns
/// * `Ok(Program)` - Successfully parsed program
/// * `Err(ParseError)` - The first syntax error; no recovery is attempted
pub fn parse_tokens(tokens: &[Token<'_>]) -> ParseResult<Program> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

/// Lex and parse source text in one step.
pub fn parse(source: &str) -> ParseResult<Program> {
    let tokens = lexer::lex(source)?;
    parse_tokens(&tokens)
}
