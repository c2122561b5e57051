use clap::{ArgAction, Parser as ClapParser, Subcommand};
use mex_lang::{
    cache::DEFAULT_CAPACITY,
    cli::{self, CheckOptions, CliError, SourceDiagnostic},
    parser::DEFAULT_MAX_DEPTH,
    Lexer, MexError, Parser, Transpiler, TranspilerOptions,
};
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "mex")]
#[command(about = "MeX - a compact math shorthand that transpiles to LaTeX")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Number of results kept in the transpile cache
    #[arg(long, default_value_t = DEFAULT_CAPACITY, global = true)]
    cache_size: usize,

    /// Maximum expression nesting depth
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, global = true)]
    max_depth: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Transpile expressions to LaTeX
    Convert {
        /// Expressions to transpile (reads stdin line by line if not provided)
        expressions: Vec<String>,

        /// Print one JSON object per expression
        #[arg(long)]
        json: bool,
    },

    /// Check that an expression produces the expected LaTeX
    Check {
        /// The MeX expression
        expression: String,

        /// Expected LaTeX, compared ignoring incidental whitespace
        #[arg(short, long)]
        expect: String,
    },

    /// Show the tokens of an expression
    Tokens {
        expression: String,
    },

    /// Show the syntax tree of an expression
    Ast {
        expression: String,
    },

    /// Show documentation, optionally for one category
    Docs {
        /// Category name (omit to list categories)
        category: Option<String>,
    },
}

fn init_logging(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = TranspilerOptions {
        cache_size: cli.cache_size,
        max_depth: cli.max_depth,
    };

    let result = match cli.command {
        Commands::Convert { expressions, json } => run_convert(expressions, json, options),
        Commands::Check { expression, expect } => run_check(expression, expect, options),
        Commands::Tokens { expression } => run_tokens(&expression),
        Commands::Ast { expression } => run_ast(&expression, options),
        Commands::Docs { category: None } => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Docs {
            category: Some(category),
        } => cli::get_doc_category(&category).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Prints a transpile failure with the offending span marked in `source`.
fn report(error: MexError, source: &str) {
    let report = miette::Report::new(SourceDiagnostic::new(error, source));
    eprintln!("{:?}", report);
}

fn run_convert(
    expressions: Vec<String>,
    json: bool,
    options: TranspilerOptions,
) -> Result<(), CliError> {
    let expressions = if !expressions.is_empty() {
        expressions
    } else if !atty::is(atty::Stream::Stdin) {
        cli::read_expressions(io::stdin().lock())?
    } else {
        return Err(CliError::NoInput);
    };

    let transpiler = Transpiler::with_options(options);
    let mut failed = false;

    for record in cli::convert_all(&transpiler, expressions) {
        if json {
            println!("{}", serde_json::to_string(&record.to_json())?);
            failed |= record.result.is_err();
            continue;
        }
        match record.result {
            Ok(latex) => println!("{}", latex),
            Err(error) => {
                failed = true;
                report(error, &record.input);
            }
        }
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn run_check(expression: String, expected: String, options: TranspilerOptions) -> Result<(), CliError> {
    let check = CheckOptions {
        expression,
        expected,
        transpiler: options,
    };

    match cli::execute_check(&check) {
        Ok(result) => {
            let latex = result.into_result()?;
            println!("OK: {}", latex);
            Ok(())
        }
        Err(CliError::Mex(error)) => {
            report(error, &check.expression);
            std::process::exit(1);
        }
        Err(e) => Err(e),
    }
}

fn run_tokens(expression: &str) -> Result<(), CliError> {
    let tokens = match Lexer::new(expression).tokenize() {
        Ok(tokens) => tokens,
        Err(error) => {
            report(error, expression);
            std::process::exit(1);
        }
    };

    for token in tokens {
        println!("{:<6} {:<12} {:?}", token.span.to_string(), format!("{:?}", token.kind), token.text);
    }
    Ok(())
}

fn run_ast(expression: &str, options: TranspilerOptions) -> Result<(), CliError> {
    let parsed = Parser::new(Lexer::new(expression))
        .and_then(|parser| parser.with_max_depth(options.max_depth).parse());

    match parsed {
        Ok(Some(ast)) => println!("{:#?}", ast),
        Ok(None) => println!("(empty)"),
        Err(error) => {
            report(error, expression);
            std::process::exit(1);
        }
    }
    Ok(())
}
