//! Compare a transpiled expression against expected LaTeX

use super::CliError;
use crate::{
    normalize::latex_equals,
    transpiler::{Transpiler, TranspilerOptions},
};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The MeX expression to transpile
    pub expression: String,
    /// LaTeX the expression should produce
    pub expected: String,
    /// Pipeline limits
    pub transpiler: TranspilerOptions,
}

/// Result of a check operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckResult {
    /// Output matched, up to incidental whitespace
    Match { latex: String },
    /// Output differed
    Mismatch { expected: String, actual: String },
}

impl CheckResult {
    pub fn into_result(self) -> Result<String, CliError> {
        match self {
            CheckResult::Match { latex } => Ok(latex),
            CheckResult::Mismatch { expected, actual } => {
                Err(CliError::Mismatch { expected, actual })
            }
        }
    }
}

/// Execute a mex check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let transpiler = Transpiler::with_options(options.transpiler);
    let actual = transpiler.transpile(&options.expression)?;

    if latex_equals(&actual, &options.expected) {
        Ok(CheckResult::Match { latex: actual })
    } else {
        Ok(CheckResult::Mismatch {
            expected: options.expected.clone(),
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(expression: &str, expected: &str) -> Result<CheckResult, CliError> {
        execute_check(&CheckOptions {
            expression: expression.to_string(),
            expected: expected.to_string(),
            ..CheckOptions::default()
        })
    }

    #[test]
    fn test_match_ignores_spacing() {
        let result = check("sqrt(x)", "\\sqrt{ x }").unwrap();
        assert_eq!(
            result,
            CheckResult::Match {
                latex: "\\sqrt{x}".to_string()
            }
        );
    }

    #[test]
    fn test_mismatch() {
        let result = check("a/b", "\\frac{b}{a}").unwrap();
        assert!(matches!(result, CheckResult::Mismatch { .. }));
        assert!(matches!(result.into_result(), Err(CliError::Mismatch { .. })));
    }

    #[test]
    fn test_transpile_error_propagates() {
        assert!(matches!(check("sqrt", ""), Err(CliError::Mex(_))));
    }
}
