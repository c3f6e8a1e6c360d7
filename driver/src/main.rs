use anyhow::{Context, Result};
use clap::Parser; // clap crate for CLI argument parsing
use interpreter::{Environment, Interpreter, RuntimeConfig, DEFAULT_MAX_DEPTH};
use std::{fs, io::Write, path::PathBuf, process::ExitCode};
use tracing::{debug, Level};

/*
Stages run in order: lex -> parse -> interpret.
--lex and --parse stop early so each stage can be inspected on its own.
Diagnostics and logs go to stderr; stdout only carries program output.
*/

#[derive(Parser, Debug)]
#[command(version, about = "Run a MiniScript program", long_about = None)]
struct Args {
    /// Path to the MiniScript source file
    input_path: PathBuf,

    /// Run lexer only and print the tokens
    #[arg(short, long)]
    lex: bool,

    /// Run lexer and parser only and report the statement count
    #[arg(short, long)]
    parse: bool,

    /// Print the final variable bindings after a successful run
    #[arg(short, long)]
    env: bool,

    /// Maximum nesting depth during evaluation
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let source = fs::read_to_string(&args.input_path)
        .with_context(|| format!("reading {}", args.input_path.display()))?;
    debug!(path = %args.input_path.display(), bytes = source.len(), "read source");

    let tokens = lexer::lex(&source).context("lexing failed")?;
    debug!(tokens = tokens.len(), "lexed");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.lex {
        for token in &tokens {
            writeln!(out, "{token:?}")?;
        }
        return Ok(());
    }

    let program = parser::parse_tokens(&tokens).context("parsing failed")?;
    debug!(statements = program.statements.len(), "parsed");

    if args.parse {
        writeln!(out, "parsed {} statement(s)", program.statements.len())?;
        return Ok(());
    }

    let config = RuntimeConfig::default().with_max_depth(args.max_depth);
    let mut env = Environment::new();
    let mut interpreter = Interpreter::with_config(&mut out, config);
    interpreter.run(&program, &mut env).context("runtime error")?;
    debug!(variables = env.len(), "finished");

    if args.env {
        for (name, value) in env.sorted() {
            writeln!(out, "{name} = {value}")?;
        }
    }

    Ok(())
}
