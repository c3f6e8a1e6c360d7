mod error;
mod keywords;
mod literals;
mod state_machine;

pub use error::{LexError, LexResult};
use model::Token;
use state_machine::StateMachineLexer;

/// Scan MiniScript source into tokens, ending with an `Eof` token.
///
/// Single pass, no backtracking; the first malformed character aborts the scan.
pub fn lex(input: &str) -> LexResult<Vec<Token<'_>>> {
    let mut lexer = StateMachineLexer::new(input);
    lexer.tokenize()
}
