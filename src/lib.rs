pub mod ast;
pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod emitter;
pub mod error;
pub mod keywords;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod transpiler;

pub use ast::{BinOp, Delimiter, Expr, Span, Token, TokenKind, UnaryOp};
pub use cache::CacheMap;
pub use emitter::Emitter;
pub use error::{ErrorKind, MexError, MexResult};
pub use keywords::Keywords;
pub use lexer::Lexer;
pub use parser::Parser;
pub use transpiler::{CacheStats, Transpiler, TranspilerOptions};

/// Transpiles MeX to LaTeX through the shared, cached [`Transpiler`].
///
/// ```
/// assert_eq!(mex_lang::transpile("x^2_3").unwrap(), "x_{3}^{2}");
/// ```
pub fn transpile(text: &str) -> MexResult<String> {
    transpiler::global().transpile(text)
}

/// Lexes `text` into tokens ending with `Eof`.
pub fn tokenize(text: &str) -> MexResult<Vec<Token>> {
    Lexer::new(text).tokenize()
}

/// Parses `text`; `None` when it holds no expression.
pub fn parse(text: &str) -> MexResult<Option<Expr>> {
    Parser::new(Lexer::new(text))?.parse()
}

/// Emits a parsed tree. An absent tree renders as the empty string.
pub fn emit(expr: Option<&Expr>) -> MexResult<String> {
    match expr {
        Some(expr) => {
            let latex = Emitter::new().emit(expr)?;
            Ok(emitter::trim_command_space(&latex).to_string())
        }
        None => Ok(String::new()),
    }
}
