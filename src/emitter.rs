//! LaTeX emission for parsed MeX expressions.
//!
//! The [`Emitter`] walks an [`Expr`] tree and renders each node kind with a
//! small formatting policy. A few structural [`predicates`] decide the
//! special shapes (matrices, continued fractions, modulus, partial
//! derivatives), and calls to the named constructs in [`special`] get their
//! own layouts with validated argument counts.
//!
//! # Spacing
//!
//! Commands such as `\alpha ` are emitted with a trailing space so adjacent
//! letters cannot fuse into a longer command name. Wherever the next
//! character is fixed markup (a brace, an operator, a script), that space is
//! trimmed again.
//!
//! # Examples
//!
//! ```
//! use mex_lang::emitter::Emitter;
//! use mex_lang::ast::{BinOp, Expr};
//!
//! let expr = Expr::binary(BinOp::Divide, Expr::number("1"), Expr::ident("alpha"));
//! assert_eq!(Emitter::new().emit(&expr).unwrap(), "\\frac{1}{\\alpha}");
//! ```

pub mod predicates;
pub mod special;

use crate::{
    ast::{BinOp, Delimiter, Expr, UnaryOp},
    error::{ErrorKind, MexError, MexResult},
    keywords::Keywords,
};

use special::SpecialFunction;

pub struct Emitter {
    keywords: &'static Keywords,
}

impl Default for Emitter {
    fn default() -> Self {
        Emitter::new()
    }
}

impl Emitter {
    pub fn new() -> Self {
        Emitter {
            keywords: Keywords::standard(),
        }
    }

    pub fn emit(&self, expr: &Expr) -> MexResult<String> {
        match expr {
            Expr::Number(value) => Ok(value.clone()),
            Expr::Ident(name) => Ok(self.emit_ident(name)),
            Expr::RawLatex(value) => Ok(value.clone()),
            Expr::Text(value) => Ok(format!("\\text{{{}}}", value)),
            Expr::Mathit(value) => Ok(format!("\\mathit{{{}}}", value)),
            Expr::Group { delim, expr } => self.emit_group(*delim, expr.as_deref()),
            Expr::Unary { op, expr } => self.emit_unary(op, expr),
            Expr::Binary {
                op,
                left,
                right,
                implicit,
            } => self.emit_binary(op, left, right, *implicit),
            Expr::Script {
                base,
                sub,
                sup,
                is_double_script,
            } => self.emit_script(base, sub.as_deref(), sup.as_deref(), *is_double_script),
            Expr::Call { name, args } => self.emit_call(name, args),
            Expr::Sqrt { index, radicand } => {
                self.emit_sqrt(index.as_deref(), radicand.as_deref())
            }
            Expr::Sequence(items) => self.emit_sequence(items),
        }
    }

    /// Emits `expr` with trailing command spacing removed.
    pub(crate) fn trimmed(&self, expr: &Expr) -> MexResult<String> {
        let latex = self.emit(expr)?;
        Ok(trim_command_space(&latex).to_string())
    }

    /// Like [`Emitter::trimmed`], but drops one enclosing `( )` pair.
    fn unwrapped(&self, expr: &Expr) -> MexResult<String> {
        match expr {
            Expr::Group {
                delim: Delimiter::Paren,
                expr: Some(inner),
            } => self.trimmed(inner),
            _ => self.trimmed(expr),
        }
    }

    fn emit_ident(&self, name: &str) -> String {
        if name == "laplacian" {
            return "\\nabla^{2}".to_string();
        }

        if let Some(letter) = self.keywords.greek(name) {
            return format!("\\{} ", letter);
        }

        if let Some(symbol) = self.keywords.symbol(name) {
            // Pre-formatted fragments such as deg -> ^{\circ}
            if symbol.starts_with('^') || symbol.starts_with('_') {
                return symbol.to_string();
            }
            return format!("\\{} ", symbol);
        }

        let canonical = self.keywords.canonical_function(name);
        if self.keywords.is_function(canonical) {
            return format!("\\{} ", canonical);
        }

        name.to_string()
    }

    fn emit_group(&self, delim: Delimiter, inner: Option<&Expr>) -> MexResult<String> {
        if let (Delimiter::Paren, Some(inner)) = (delim, inner) {
            // (mod n) -> \pmod{n}
            if let Some(modulus) = predicates::modulus_operand(inner) {
                return Ok(format!("\\pmod{{{}}}", self.trimmed(modulus)?));
            }
            if predicates::starts_with_pmod(inner) {
                return self.emit(inner);
            }
        }

        if let (Delimiter::Bracket, Some(Expr::Sequence(rows))) = (delim, inner)
            && predicates::is_matrix_rows(rows)
        {
            return self.emit_matrix(rows);
        }

        let content = match inner {
            Some(expr) => self.trimmed(expr)?,
            None => String::new(),
        };

        Ok(match delim {
            Delimiter::Paren => format!("({})", content),
            Delimiter::Bracket => format!("[{}]", content),
            Delimiter::Brace => format!("\\{{{}\\}}", content),
            Delimiter::Angle => format!("\\langle {} \\rangle", content),
            Delimiter::Norm => format!("\\|{}\\|", content),
        })
    }

    fn emit_matrix(&self, rows: &[Expr]) -> MexResult<String> {
        let mut lines = Vec::with_capacity(rows.len());
        for row in rows {
            let line = match row {
                Expr::Group {
                    expr: Some(content),
                    ..
                } => match content.as_ref() {
                    Expr::Sequence(cells) => cells
                        .iter()
                        .map(|cell| self.trimmed(cell))
                        .collect::<MexResult<Vec<_>>>()?
                        .join(" & "),
                    single => self.trimmed(single)?,
                },
                _ => String::new(),
            };
            lines.push(line);
        }

        Ok(format!(
            "\\begin{{bmatrix}} {} \\end{{bmatrix}}",
            lines.join(" \\\\ ")
        ))
    }

    fn emit_unary(&self, op: &UnaryOp, expr: &Expr) -> MexResult<String> {
        match op {
            UnaryOp::Negate => Ok(format!("-{}", self.emit(expr)?)),
            UnaryOp::Keyword(word) => {
                let command = self.keywords.prefix_operator(word).ok_or_else(|| {
                    MexError::bare(ErrorKind::InvalidNode {
                        kind: "Unary",
                        reason: "unknown prefix operator",
                    })
                })?;

                if op.is_keyword("mod") {
                    Ok(format!("\\{}{{{}}}", command, self.trimmed(expr)?))
                } else {
                    Ok(format!("\\{} {}", command, self.emit(expr)?))
                }
            }
        }
    }

    fn emit_binary(
        &self,
        op: &BinOp,
        left: &Expr,
        right: &Expr,
        implicit: bool,
    ) -> MexResult<String> {
        match op {
            BinOp::Divide => {
                let numerator = self.unwrapped(left)?;
                // Only continued fractions lose their parentheses
                let denominator = if right.is_group(Delimiter::Paren)
                    && predicates::contains_fraction(right)
                {
                    self.unwrapped(right)?
                } else {
                    self.trimmed(right)?
                };
                Ok(format!("\\frac{{{}}}{{{}}}", numerator, denominator))
            }

            BinOp::Multiply if implicit => {
                let l = self.emit(left)?;
                let r = self.emit(right)?;
                if (predicates::contains_partial(left) && predicates::is_partial(right))
                    || predicates::is_pmod_group(right)
                {
                    return Ok(format!("{} {}", trim_command_space(&l), r));
                }
                Ok(format!("{}{}", l, r))
            }

            BinOp::Multiply => Ok(format!(
                "{} \\cdot {}",
                self.trimmed(left)?,
                self.emit(right)?
            )),

            BinOp::Add
            | BinOp::Subtract
            | BinOp::Equal
            | BinOp::LessThan
            | BinOp::GreaterThan
            | BinOp::Given => Ok(format!(
                "{}{}{}",
                self.trimmed(left)?,
                op.symbol(),
                self.emit(right)?
            )),

            BinOp::NotEqual
            | BinOp::LessEqual
            | BinOp::GreaterEqual
            | BinOp::MuchLess
            | BinOp::MuchGreater
            | BinOp::Arrow
            | BinOp::Approx
            | BinOp::Similar
            | BinOp::PlusMinus => {
                let command = self.keywords.relation_command(op.symbol()).ok_or_else(|| {
                    MexError::bare(ErrorKind::InvalidNode {
                        kind: "Binary",
                        reason: "relation without a command",
                    })
                })?;
                self.spaced(left, command, right)
            }

            BinOp::Keyword(word) => {
                let command = self.keywords.keyword_operator(word).ok_or_else(|| {
                    MexError::bare(ErrorKind::InvalidNode {
                        kind: "Binary",
                        reason: "unknown keyword operator",
                    })
                })?;
                self.spaced(left, command, right)
            }
        }
    }

    fn spaced(&self, left: &Expr, command: &str, right: &Expr) -> MexResult<String> {
        Ok(format!(
            "{} \\{} {}",
            self.trimmed(left)?,
            command,
            self.emit(right)?
        ))
    }

    /// Subscript always precedes superscript.
    fn emit_script(
        &self,
        base: &Expr,
        sub: Option<&Expr>,
        sup: Option<&Expr>,
        is_double_script: bool,
    ) -> MexResult<String> {
        if sub.is_none() && sup.is_none() {
            return Err(MexError::bare(ErrorKind::InvalidNode {
                kind: "Script",
                reason: "neither subscript nor superscript",
            }));
        }

        let mut result = self.trimmed(base)?;

        if let Some(sub) = sub {
            let sub = self.unwrapped(sub)?;
            if is_double_script {
                result.push_str(&format!("_{{_{{{}}}}}", sub));
            } else {
                result.push_str(&format!("_{{{}}}", sub));
            }
        }

        if let Some(sup) = sup {
            result.push_str(&format!("^{{{}}}", self.unwrapped(sup)?));
        }

        Ok(result)
    }

    fn emit_call(&self, name: &str, args: &[Expr]) -> MexResult<String> {
        if let Some(special) = SpecialFunction::from_name(name) {
            return special.emit(self, args);
        }

        let args = self.join(args, ",")?;

        if self.keywords.is_text_function(name) {
            return Ok(format!("\\text{{{}}}({})", name, args));
        }

        // N(...) -> \mathbb{N}(...)
        if let Some(symbol) = self.keywords.symbol(name) {
            return Ok(format!("\\{}({})", symbol, args));
        }

        Ok(format!("\\{}({})", name, args))
    }

    fn emit_sqrt(&self, index: Option<&Expr>, radicand: Option<&Expr>) -> MexResult<String> {
        let radicand = match radicand {
            Some(radicand) => self.trimmed(radicand)?,
            None => String::new(),
        };
        match index {
            Some(index) => Ok(format!("\\sqrt[{}]{{{}}}", self.trimmed(index)?, radicand)),
            None => Ok(format!("\\sqrt{{{}}}", radicand)),
        }
    }

    fn emit_sequence(&self, items: &[Expr]) -> MexResult<String> {
        if items.len() < 2 {
            return Err(MexError::bare(ErrorKind::InvalidNode {
                kind: "Sequence",
                reason: "fewer than two items",
            }));
        }
        self.join(items, ",")
    }

    pub(crate) fn join(&self, items: &[Expr], separator: &str) -> MexResult<String> {
        Ok(items
            .iter()
            .map(|item| self.trimmed(item))
            .collect::<MexResult<Vec<_>>>()?
            .join(separator))
    }
}

/// Strips trailing spaces left by command emission. An escaped space
/// (`\ `) is content and stays.
pub fn trim_command_space(latex: &str) -> &str {
    let mut end = latex.len();
    while latex[..end].ends_with(' ') && !latex[..end - 1].ends_with('\\') {
        end -= 1;
    }
    &latex[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_command_space() {
        assert_eq!(trim_command_space("\\alpha "), "\\alpha");
        assert_eq!(trim_command_space("x  "), "x");
        assert_eq!(trim_command_space("a\\ "), "a\\ ");
        assert_eq!(trim_command_space(""), "");
    }

    #[test]
    fn test_script_without_scripts_is_invalid() {
        let expr = Expr::Script {
            base: Box::new(Expr::ident("x")),
            sub: None,
            sup: None,
            is_double_script: false,
        };
        let err = Emitter::new().emit(&expr).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidNode { kind: "Script", .. }));
    }

    #[test]
    fn test_short_sequence_is_invalid() {
        let expr = Expr::Sequence(vec![Expr::ident("x")]);
        assert!(Emitter::new().emit(&expr).is_err());
    }
}
