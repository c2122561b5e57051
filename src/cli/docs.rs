//! Reference documentation for the mex CLI, generated from the lookup tables

use std::fmt::Write;

use super::CliError;
use crate::{
    emitter::special::SpecialFunction,
    keywords::{
        FUNCTIONS, FUNCTION_ALIASES, GREEK_LETTERS, KEYWORD_OPERATORS, PREFIX_OPERATORS,
        RELATION_COMMANDS, SYMBOLS, TEXT_FUNCTIONS,
    },
};

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Greek,
    Symbols,
    Functions,
    Operators,
    Special,
    Modes,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "greek" | "letters" => Some(Self::Greek),
            "symbols" | "symbol" => Some(Self::Symbols),
            "functions" | "function" | "fn" => Some(Self::Functions),
            "operators" | "ops" => Some(Self::Operators),
            "special" | "special_functions" => Some(Self::Special),
            "modes" | "mode" | "escapes" => Some(Self::Modes),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"MEX DOCUMENTATION

MeX is a compact plain-text math shorthand that expands into LaTeX math markup.
Adjacent atoms multiply implicitly, scripts attach in any order, and named
constructs such as integrals and sums take positional arguments.

DOCUMENTATION CATEGORIES

  greek             Greek letters and letter-like names
  symbols           Named symbols, number sets and standalone operators
  functions         Function names, aliases and upright text functions
  operators         Symbolic, relation and keyword operators with precedence
  special           Integrals, limits, sums and other positional constructs
  modes             Raw LaTeX, text and italic escape hatches

QUICK REFERENCE

  1/2x              \frac{1}{2x}
  x^2_3             x_{3}^{2}
  sqrt[3](x)        \sqrt[3]{x}
  [[a, b], [c, d]]  \begin{bmatrix} a & b \\ c & d \end{bmatrix}
  a equiv b (mod n) a \equiv b \pmod{n}

Run 'mex docs <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<String, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Greek) => Ok(greek_doc()),
        Some(DocCategory::Symbols) => Ok(symbols_doc()),
        Some(DocCategory::Functions) => Ok(functions_doc()),
        Some(DocCategory::Operators) => Ok(operators_doc()),
        Some(DocCategory::Special) => Ok(special_doc()),
        Some(DocCategory::Modes) => Ok(MODES_DOC.to_string()),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

fn table(out: &mut String, rows: impl IntoIterator<Item = (String, String)>) {
    for (left, right) in rows {
        let _ = writeln!(out, "  {:<18}{}", left, right);
    }
}

fn greek_doc() -> String {
    let mut out = String::from("GREEK - Letters\n\n");
    table(
        &mut out,
        GREEK_LETTERS
            .iter()
            .map(|(name, command)| (name.to_string(), format!("\\{}", command))),
    );
    out.push_str("\n  laplacian         \\nabla^{2}\n");
    out
}

fn symbols_doc() -> String {
    let mut out = String::from("SYMBOLS - Named Symbols\n\n");
    table(
        &mut out,
        SYMBOLS.iter().map(|(name, latex)| {
            let rendered = if latex.starts_with('^') || latex.starts_with('_') {
                latex.to_string()
            } else {
                format!("\\{}", latex)
            };
            (name.to_string(), rendered)
        }),
    );
    out
}

fn functions_doc() -> String {
    let mut out = String::from("FUNCTIONS - Named Functions\n\n");
    out.push_str("A listed name followed by '(' becomes a call; alone it renders as \\name.\n\n");
    table(
        &mut out,
        FUNCTIONS
            .iter()
            .filter(|name| !TEXT_FUNCTIONS.contains(name))
            .map(|name| (format!("{}(x)", name), format!("\\{}(x)", name))),
    );

    out.push_str("\nTEXT FUNCTIONS\n\n");
    table(
        &mut out,
        TEXT_FUNCTIONS
            .iter()
            .map(|name| (format!("{}(x)", name), format!("\\text{{{}}}(x)", name))),
    );

    out.push_str("\nALIASES\n\n");
    table(
        &mut out,
        FUNCTION_ALIASES
            .iter()
            .map(|(alias, canonical)| (alias.to_string(), canonical.to_string())),
    );

    out.push_str("\nROOTS\n\n");
    table(
        &mut out,
        [
            ("sqrt(x)".to_string(), "\\sqrt{x}".to_string()),
            ("sqrt[n](x)".to_string(), "\\sqrt[n]{x}".to_string()),
        ],
    );
    out
}

fn operators_doc() -> String {
    let mut out = String::from("OPERATORS - Precedence, Loosest First\n\n");
    table(
        &mut out,
        [
            ("= < > |".to_string(), "relations, dense".to_string()),
            ("<= >= << >> !=".to_string(), "relations, spaced commands".to_string()),
            ("-> ~ ~~".to_string(), "relations, spaced commands".to_string()),
            ("+ - +-".to_string(), "additive".to_string()),
            ("keywords".to_string(), "additive, spaced commands".to_string()),
            ("* /".to_string(), "\\cdot and \\frac".to_string()),
            ("adjacency".to_string(), "implicit multiplication".to_string()),
            ("- not forall".to_string(), "prefix".to_string()),
            ("^ _ __".to_string(), "scripts".to_string()),
        ],
    );

    out.push_str("\nRELATIONS\n\n");
    table(
        &mut out,
        RELATION_COMMANDS
            .iter()
            .map(|(symbol, command)| (symbol.to_string(), format!("\\{}", command))),
    );

    out.push_str("\nKEYWORD OPERATORS\n\n");
    table(
        &mut out,
        KEYWORD_OPERATORS
            .iter()
            .map(|(word, command)| (format!("a {} b", word), format!("a \\{} b", command))),
    );

    out.push_str("\nPREFIX OPERATORS\n\n");
    table(
        &mut out,
        PREFIX_OPERATORS.iter().map(|(word, command)| {
            let rendered = if *word == "mod" {
                format!("\\{}{{x}}", command)
            } else {
                format!("\\{} x", command)
            };
            (format!("{} x", word), rendered)
        }),
    );
    out
}

fn special_doc() -> String {
    let mut out = String::from("SPECIAL - Positional Constructs\n\n");
    for function in SpecialFunction::ALL {
        let _ = writeln!(out, "  {}", function.template());
        let _ = writeln!(out, "      takes {}\n", function.arity());
    }
    out
}

const MODES_DOC: &str = r#"MODES - Escape Hatches

RAW LATEX
  l{{ ... }}l
    Copied to the output verbatim.

    Example:
      l{{\mathcal{L}}}l    \mathcal{L}

TEXT
  t{{ ... }}t
    Upright text.

    Example:
      t{{if }}t x > 0      \text{if }x>0

ITALIC
  m{{ ... }}m
    Italic math letters.

    Example:
      m{{speed}}m          \mathit{speed}

    Constraints:
      - The closing marker must use the same letter as the opening one
      - An unclosed region is an error
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_category_renders() {
        for name in ["greek", "symbols", "functions", "operators", "special", "modes"] {
            let doc = get_doc_category(name).unwrap();
            assert!(!doc.is_empty(), "{} is empty", name);
        }
    }

    #[test]
    fn test_generated_from_tables() {
        assert!(get_doc_category("greek").unwrap().contains("\\alpha"));
        assert!(get_doc_category("ops").unwrap().contains("\\setminus"));
        assert!(get_doc_category("special").unwrap().contains("1, 2, or 4 arguments"));
    }

    #[test]
    fn test_unknown_category() {
        assert!(matches!(
            get_doc_category("tensors"),
            Err(CliError::UnknownCategory(_))
        ));
    }
}
