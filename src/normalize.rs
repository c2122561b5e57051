//! Whitespace-insensitive comparison of LaTeX strings.
//!
//! Two renderings that differ only in incidental spacing (around braces,
//! brackets and parentheses, or in the width of a run of blanks) compare
//! equal.
//!
//! ```
//! use mex_lang::normalize::latex_equals;
//!
//! assert!(latex_equals("\\frac{ a }{ b }", "\\frac{a}{b}"));
//! assert!(!latex_equals("ab", "a b"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static SPACE_AROUND_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*([{}()\[\]])\s*").unwrap());

pub fn normalize_latex(latex: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(latex.trim(), " ");
    SPACE_AROUND_DELIMITER
        .replace_all(&collapsed, "$1")
        .into_owned()
}

pub fn latex_equals(a: &str, b: &str) -> bool {
    normalize_latex(a) == normalize_latex(b)
}

#[test]
fn test_normalize_latex() {
    assert_eq!(normalize_latex("  x  +   y "), "x + y");
    assert_eq!(normalize_latex("\\sqrt{ x }"), "\\sqrt{x}");
    assert_eq!(normalize_latex("\\sin ( x )"), "\\sin(x)");
    assert_eq!(normalize_latex("\\int_{0}^{1} f \\, dx"), "\\int_{0}^{1}f \\, dx");
}

#[test]
fn test_latex_equals_keeps_command_boundaries() {
    assert!(latex_equals("\\alpha x", "\\alpha  x"));
    assert!(!latex_equals("\\alpha x", "\\alphax"));
}
