//! Named constructs whose layout depends on argument position.

use crate::{
    ast::Expr,
    error::{MexError, MexResult},
};

use super::{predicates, Emitter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialFunction {
    Integral,
    ContourIntegral,
    Limit,
    Sum,
    Product,
    Binomial,
    Floor,
    Ceiling,
    AbsoluteValue,
    Conjugate,
    Gcd,
    Determinant,
    Argument,
    Beta,
}

impl SpecialFunction {
    pub const ALL: [SpecialFunction; 14] = [
        SpecialFunction::Integral,
        SpecialFunction::ContourIntegral,
        SpecialFunction::Limit,
        SpecialFunction::Sum,
        SpecialFunction::Product,
        SpecialFunction::Binomial,
        SpecialFunction::Floor,
        SpecialFunction::Ceiling,
        SpecialFunction::AbsoluteValue,
        SpecialFunction::Conjugate,
        SpecialFunction::Gcd,
        SpecialFunction::Determinant,
        SpecialFunction::Argument,
        SpecialFunction::Beta,
    ];

    pub fn from_name(name: &str) -> Option<SpecialFunction> {
        let function = match name {
            "int" => SpecialFunction::Integral,
            "oint" => SpecialFunction::ContourIntegral,
            "lim" => SpecialFunction::Limit,
            "sum" => SpecialFunction::Sum,
            "prod" => SpecialFunction::Product,
            "binom" => SpecialFunction::Binomial,
            "floor" => SpecialFunction::Floor,
            "ceil" => SpecialFunction::Ceiling,
            "abs" => SpecialFunction::AbsoluteValue,
            "conj" => SpecialFunction::Conjugate,
            "gcd" => SpecialFunction::Gcd,
            "det" => SpecialFunction::Determinant,
            "arg" => SpecialFunction::Argument,
            "Beta" => SpecialFunction::Beta,
            _ => return None,
        };
        Some(function)
    }

    pub fn name(self) -> &'static str {
        match self {
            SpecialFunction::Integral => "int",
            SpecialFunction::ContourIntegral => "oint",
            SpecialFunction::Limit => "lim",
            SpecialFunction::Sum => "sum",
            SpecialFunction::Product => "prod",
            SpecialFunction::Binomial => "binom",
            SpecialFunction::Floor => "floor",
            SpecialFunction::Ceiling => "ceil",
            SpecialFunction::AbsoluteValue => "abs",
            SpecialFunction::Conjugate => "conj",
            SpecialFunction::Gcd => "gcd",
            SpecialFunction::Determinant => "det",
            SpecialFunction::Argument => "arg",
            SpecialFunction::Beta => "Beta",
        }
    }

    /// Accepted argument counts, as worded in arity errors.
    pub fn arity(self) -> &'static str {
        match self {
            SpecialFunction::Integral | SpecialFunction::ContourIntegral => "1, 2, or 4 arguments",
            SpecialFunction::Limit => "3 arguments",
            SpecialFunction::Sum | SpecialFunction::Product => "4 arguments",
            SpecialFunction::Binomial | SpecialFunction::Beta => "2 arguments",
            SpecialFunction::Gcd => "at least 2 arguments",
            SpecialFunction::Floor
            | SpecialFunction::Ceiling
            | SpecialFunction::AbsoluteValue
            | SpecialFunction::Conjugate
            | SpecialFunction::Determinant
            | SpecialFunction::Argument => "1 argument",
        }
    }

    pub fn accepts(self, count: usize) -> bool {
        match self {
            SpecialFunction::Integral | SpecialFunction::ContourIntegral => {
                matches!(count, 1 | 2 | 4)
            }
            SpecialFunction::Limit => count == 3,
            SpecialFunction::Sum | SpecialFunction::Product => count == 4,
            SpecialFunction::Binomial | SpecialFunction::Beta => count == 2,
            SpecialFunction::Gcd => count >= 2,
            SpecialFunction::Floor
            | SpecialFunction::Ceiling
            | SpecialFunction::AbsoluteValue
            | SpecialFunction::Conjugate
            | SpecialFunction::Determinant
            | SpecialFunction::Argument => count == 1,
        }
    }

    /// Shape of the output, for reference listings.
    pub fn template(self) -> &'static str {
        match self {
            SpecialFunction::Integral => "int(f, x, a, b) -> \\int_{a}^{b} f \\, dx",
            SpecialFunction::ContourIntegral => "oint(f, x, a, b) -> \\oint_{a}^{b} f \\, dx",
            SpecialFunction::Limit => "lim(x, a, f) -> \\lim_{x \\to a} f",
            SpecialFunction::Sum => "sum(i, a, b, f) -> \\sum_{i=a}^{b} f",
            SpecialFunction::Product => "prod(i, a, b, f) -> \\prod_{i=a}^{b} f",
            SpecialFunction::Binomial => "binom(n, k) -> \\binom{n}{k}",
            SpecialFunction::Floor => "floor(x) -> \\lfloor x \\rfloor",
            SpecialFunction::Ceiling => "ceil(x) -> \\lceil x \\rceil",
            SpecialFunction::AbsoluteValue => "abs(x) -> |x|",
            SpecialFunction::Conjugate => "conj(z) -> \\overline{z}",
            SpecialFunction::Gcd => "gcd(a, b) -> \\gcd(a,b)",
            SpecialFunction::Determinant => "det(A) -> \\det(A)",
            SpecialFunction::Argument => "arg(z) -> \\arg(z)",
            SpecialFunction::Beta => "Beta(x, y) -> \\text{B}(x,y)",
        }
    }

    pub(crate) fn emit(self, emitter: &Emitter, args: &[Expr]) -> MexResult<String> {
        if !self.accepts(args.len()) {
            return Err(MexError::invalid_arity(self.name(), self.arity(), args.len()));
        }

        let emitted = args
            .iter()
            .map(|arg| emitter.trimmed(arg))
            .collect::<MexResult<Vec<_>>>()?;
        let a = emitted.as_slice();

        let latex = match self {
            SpecialFunction::Integral | SpecialFunction::ContourIntegral => {
                let command = format!("\\{}", self.name());
                match a {
                    [body] => format!("{} {}", command, body),
                    // The second argument is the whole differential
                    [body, differential] => format!("{} {} \\, {}", command, body, differential),
                    [body, var, lower, upper] => {
                        format!("{}_{{{}}}^{{{}}} {} \\, d{}", command, lower, upper, body, var)
                    }
                    _ => {
                        return Err(MexError::invalid_arity(self.name(), self.arity(), a.len()));
                    }
                }
            }
            SpecialFunction::Limit => format!("\\lim_{{{} \\to {}}} {}", a[0], a[1], a[2]),
            SpecialFunction::Sum => format!("\\sum_{{{}={}}}^{{{}}} {}", a[0], a[1], a[2], a[3]),
            SpecialFunction::Product => {
                format!("\\prod_{{{}={}}}^{{{}}} {}", a[0], a[1], a[2], a[3])
            }
            SpecialFunction::Binomial => format!("\\binom{{{}}}{{{}}}", a[0], a[1]),
            SpecialFunction::Floor => format!("\\lfloor {} \\rfloor", a[0]),
            SpecialFunction::Ceiling => format!("\\lceil {} \\rceil", a[0]),
            SpecialFunction::AbsoluteValue => format!("|{}|", a[0]),
            SpecialFunction::Conjugate => format!("\\overline{{{}}}", a[0]),
            SpecialFunction::Gcd => format!("\\gcd({})", a.join(",")),
            SpecialFunction::Determinant => {
                // Matrices and groups already carry their own delimiters
                if predicates::is_matrix(&args[0]) || matches!(args[0], Expr::Group { .. }) {
                    format!("\\det {}", a[0])
                } else {
                    format!("\\det({})", a[0])
                }
            }
            SpecialFunction::Argument => format!("\\arg({})", a[0]),
            SpecialFunction::Beta => format!("\\text{{B}}({},{})", a[0], a[1]),
        };

        Ok(latex)
    }
}
