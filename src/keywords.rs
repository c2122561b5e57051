//! Read-only lookup tables shared by the parser and emitter.
//!
//! The tables are declared as ordered slices (so documentation can list them
//! in a stable order) and indexed once into [`Keywords`], built lazily on
//! first use and never mutated afterward.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Greek letters and letter-like operators: identifier -> LaTeX command name.
pub const GREEK_LETTERS: &[(&str, &str)] = &[
    // Variants
    ("vartheta", "vartheta"),
    ("varepsilon", "varepsilon"),
    ("varpi", "varpi"),
    ("varsigma", "varsigma"),
    ("varrho", "varrho"),
    ("varphi", "varphi"),
    // Lowercase
    ("alpha", "alpha"),
    ("beta", "beta"),
    ("gamma", "gamma"),
    ("delta", "delta"),
    ("epsilon", "epsilon"),
    ("zeta", "zeta"),
    ("eta", "eta"),
    ("theta", "theta"),
    ("iota", "iota"),
    ("kappa", "kappa"),
    ("lambda", "lambda"),
    ("mu", "mu"),
    ("nu", "nu"),
    ("xi", "xi"),
    ("pi", "pi"),
    ("rho", "rho"),
    ("sigma", "sigma"),
    ("tau", "tau"),
    ("upsilon", "upsilon"),
    ("phi", "phi"),
    ("chi", "chi"),
    ("psi", "psi"),
    ("omega", "omega"),
    // Uppercase
    ("Gamma", "Gamma"),
    ("Delta", "Delta"),
    ("Theta", "Theta"),
    ("Lambda", "Lambda"),
    ("Xi", "Xi"),
    ("Pi", "Pi"),
    ("Sigma", "Sigma"),
    ("Upsilon", "Upsilon"),
    ("Phi", "Phi"),
    ("Psi", "Psi"),
    ("Omega", "Omega"),
    // Aliases
    ("micro", "mu"),
    ("partial", "partial"),
];

/// Names that become a `Call` when followed by `(`, emitted as `\name`.
pub const FUNCTIONS: &[&str] = &[
    "sin", "cos", "tan", "cot", "ln", "log", "exp", "sec", "csc",
    "arcsin", "arccos", "arctan",
    "sinh", "cosh", "tanh",
    "lim", "int", "sum", "prod", "oint",
    "det", "gcd",
    "binom", "floor", "ceil", "abs",
    "arg", "conj",
    "Var", "Cov", "Re", "Im",
    "tr", "rank",
    "lcm",
    "N",
    "Beta",
];

/// Alternative spellings resolved to a canonical function name.
pub const FUNCTION_ALIASES: &[(&str, &str)] = &[("ctg", "cot"), ("tg", "tan")];

/// Symbols: identifier -> LaTeX command name, or a pre-formatted script
/// fragment when the value starts with `^` or `_`.
///
/// Operator spellings are included so a bare operator in atom position
/// (`+-` on its own) still renders as its command.
pub const SYMBOLS: &[(&str, &str)] = &[
    ("infty", "infty"),
    ("inf", "infty"),
    ("pm", "pm"),
    ("mp", "mp"),
    ("times", "times"),
    ("div", "div"),
    ("cdot", "cdot"),
    ("leq", "leq"),
    ("geq", "geq"),
    ("sim", "sim"),
    ("ll", "ll"),
    ("gg", "gg"),
    ("to", "to"),
    ("land", "land"),
    ("lor", "lor"),
    ("dots", "dots"),
    ("deg", "^{\\circ}"),
    ("emptyset", "emptyset"),
    ("nabla", "nabla"),
    // Number sets
    ("N", "mathbb{N}"),
    ("Z", "mathbb{Z}"),
    ("Q", "mathbb{Q}"),
    ("R", "mathbb{R}"),
    ("C", "mathbb{C}"),
    // Operators standing alone
    ("+-", "pm"),
    ("->", "to"),
    ("~~", "approx"),
    ("~", "sim"),
    ("<=", "leq"),
    (">=", "geq"),
    ("!=", "neq"),
    ("<<", "ll"),
    (">>", "gg"),
];

/// Words that act as infix operators at additive binding power.
pub const KEYWORD_OPERATORS: &[(&str, &str)] = &[
    // Logic
    ("and", "land"),
    ("or", "lor"),
    ("implies", "implies"),
    ("iff", "iff"),
    // Sets
    ("in", "in"),
    ("notin", "notin"),
    ("union", "cup"),
    ("intersect", "cap"),
    ("setminus", "setminus"),
    ("subset", "subset"),
    ("subseteq", "subseteq"),
    // Number theory
    ("mod", "bmod"),
    ("equiv", "equiv"),
    ("approx", "approx"),
    ("neq", "neq"),
    // Vector products
    ("dot", "cdot"),
    ("cross", "times"),
];

/// Words that act as prefix operators.
pub const PREFIX_OPERATORS: &[(&str, &str)] = &[
    ("not", "neg"),
    ("forall", "forall"),
    ("exists", "exists"),
    ("mod", "pmod"),
];

/// Functions whose name is set upright with `\text{}`.
pub const TEXT_FUNCTIONS: &[&str] = &["Var", "Cov", "Re", "Im", "tr", "rank", "lcm"];

/// Operator symbols spanning several characters, most specific first.
pub const MULTI_CHAR_OPS: &[&str] = &["__", "<<", ">>", "~~", "!=", ">=", "<=", "->", "+-"];

/// Relation operators rendered as a spaced named command.
pub const RELATION_COMMANDS: &[(&str, &str)] = &[
    ("<=", "leq"),
    (">=", "geq"),
    ("<<", "ll"),
    (">>", "gg"),
    ("!=", "neq"),
    ("->", "to"),
    ("~~", "approx"),
    ("~", "sim"),
    ("+-", "pm"),
];

/// Indexed view over all lookup tables.
#[derive(Debug)]
pub struct Keywords {
    greek: HashMap<&'static str, &'static str>,
    functions: HashSet<&'static str>,
    function_aliases: HashMap<&'static str, &'static str>,
    symbols: HashMap<&'static str, &'static str>,
    keyword_operators: HashMap<&'static str, &'static str>,
    prefix_operators: HashMap<&'static str, &'static str>,
    text_functions: HashSet<&'static str>,
    relation_commands: HashMap<&'static str, &'static str>,
}

static STANDARD: Lazy<Keywords> = Lazy::new(Keywords::build);

impl Keywords {
    /// The process-wide tables.
    pub fn standard() -> &'static Keywords {
        &STANDARD
    }

    fn build() -> Keywords {
        Keywords {
            greek: GREEK_LETTERS.iter().copied().collect(),
            functions: FUNCTIONS.iter().copied().collect(),
            function_aliases: FUNCTION_ALIASES.iter().copied().collect(),
            symbols: SYMBOLS.iter().copied().collect(),
            keyword_operators: KEYWORD_OPERATORS.iter().copied().collect(),
            prefix_operators: PREFIX_OPERATORS.iter().copied().collect(),
            text_functions: TEXT_FUNCTIONS.iter().copied().collect(),
            relation_commands: RELATION_COMMANDS.iter().copied().collect(),
        }
    }

    pub fn greek(&self, name: &str) -> Option<&'static str> {
        self.greek.get(name).copied()
    }

    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    /// Canonical spelling of a function name, resolving aliases.
    pub fn canonical_function<'a>(&self, name: &'a str) -> &'a str {
        match self.function_aliases.get(name) {
            Some(canonical) => canonical,
            None => name,
        }
    }

    pub fn symbol(&self, name: &str) -> Option<&'static str> {
        self.symbols.get(name).copied()
    }

    pub fn keyword_operator(&self, word: &str) -> Option<&'static str> {
        self.keyword_operators.get(word).copied()
    }

    pub fn prefix_operator(&self, word: &str) -> Option<&'static str> {
        self.prefix_operators.get(word).copied()
    }

    pub fn is_text_function(&self, name: &str) -> bool {
        self.text_functions.contains(name)
    }

    pub fn relation_command(&self, symbol: &str) -> Option<&'static str> {
        self.relation_commands.get(symbol).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve_to_functions() {
        let kw = Keywords::standard();
        for (alias, canonical) in FUNCTION_ALIASES {
            assert_eq!(kw.canonical_function(alias), *canonical);
            assert!(kw.is_function(canonical), "{} is not a function", canonical);
        }
        assert_eq!(kw.canonical_function("sin"), "sin");
    }

    #[test]
    fn test_text_functions_are_functions() {
        let kw = Keywords::standard();
        for name in TEXT_FUNCTIONS {
            assert!(kw.is_function(name), "{} is not a function", name);
        }
    }

    #[test]
    fn test_multi_char_ops_never_shadowed() {
        // An entry that is a prefix of a later entry would hide it.
        for (i, op) in MULTI_CHAR_OPS.iter().enumerate() {
            for later in &MULTI_CHAR_OPS[i + 1..] {
                assert!(
                    !later.starts_with(op) || later.len() <= op.len(),
                    "{} shadows {}",
                    op,
                    later
                );
            }
        }
    }

    #[test]
    fn test_mod_is_both_prefix_and_infix() {
        let kw = Keywords::standard();
        assert_eq!(kw.prefix_operator("mod"), Some("pmod"));
        assert_eq!(kw.keyword_operator("mod"), Some("bmod"));
    }
}
