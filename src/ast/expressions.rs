use crate::ast::{BinOp, Delimiter, UnaryOp};

/// Abstract Syntax Tree node representing a parsed MeX expression.
///
/// Each node exclusively owns its children. The tree is built once by the
/// parser and only read by the emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    // Literals
    /// Numeric literal, emitted verbatim
    ///
    /// # Example
    /// ```text
    /// 2.5(3)
    /// ```
    Number(String),

    /// Bare identifier: variable, Greek letter, symbol or standalone function name
    ///
    /// # Examples
    /// ```text
    /// x
    /// alpha
    /// infty
    /// ```
    Ident(String),

    // Escape hatches
    /// `l{{...}}l` payload, emitted verbatim
    RawLatex(String),

    /// `t{{...}}t` payload, emitted as `\text{...}`
    Text(String),

    /// `m{{...}}m` payload, emitted as `\mathit{...}`
    Mathit(String),

    // Structure
    /// One balanced bracket pair and its (possibly empty) content
    ///
    /// # Examples
    /// ```text
    /// (a+b)
    /// [[a, b], [c, d]]
    /// <u, v>
    /// ||x||
    /// ```
    Group {
        delim: Delimiter,
        expr: Option<Box<Expr>>,
    },

    /// Prefix operator application
    ///
    /// # Examples
    /// ```text
    /// -x
    /// not p
    /// forall x
    /// ```
    Unary { op: UnaryOp, expr: Box<Expr> },

    /// Infix application; `implicit` marks adjacency multiplication (`2x`)
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        implicit: bool,
    },

    /// Sub/superscript attachment. At least one of `sub`/`sup` is set.
    ///
    /// `is_double_script` marks a subscript introduced by `__`, rendered as
    /// a stacked subscript. The flag lives on this node and `sub` holds the
    /// bare argument, rather than nesting an empty `Script` inside `sub`.
    ///
    /// # Examples
    /// ```text
    /// x^2_3
    /// X__1
    /// ```
    Script {
        base: Box<Expr>,
        sub: Option<Box<Expr>>,
        sup: Option<Box<Expr>>,
        is_double_script: bool,
    },

    /// Named function application
    ///
    /// # Examples
    /// ```text
    /// sin(x)
    /// int(f(x), x, 0, 1)
    /// ```
    Call { name: String, args: Vec<Expr> },

    /// Root extraction with optional index. `sqrt()` has no radicand.
    ///
    /// # Examples
    /// ```text
    /// sqrt(x)
    /// sqrt[3](x)
    /// ```
    Sqrt {
        index: Option<Box<Expr>>,
        radicand: Option<Box<Expr>>,
    },

    /// Comma-joined list of at least two items
    Sequence(Vec<Expr>),
}

impl Expr {
    pub fn number(value: impl Into<String>) -> Expr {
        Expr::Number(value.into())
    }

    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Ident(name.into())
    }

    pub fn group(delim: Delimiter, expr: Option<Expr>) -> Expr {
        Expr::Group {
            delim,
            expr: expr.map(Box::new),
        }
    }

    pub fn unary(op: UnaryOp, expr: Expr) -> Expr {
        Expr::Unary {
            op,
            expr: Box::new(expr),
        }
    }

    /// Explicit infix application.
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            implicit: false,
        }
    }

    /// Adjacency multiplication.
    pub fn implicit(left: Expr, right: Expr) -> Expr {
        Expr::Binary {
            op: BinOp::Multiply,
            left: Box::new(left),
            right: Box::new(right),
            implicit: true,
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    /// Node kind name, as used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Number(_) => "Number",
            Expr::Ident(_) => "Ident",
            Expr::RawLatex(_) => "RawLatex",
            Expr::Text(_) => "Text",
            Expr::Mathit(_) => "Mathit",
            Expr::Group { .. } => "Group",
            Expr::Unary { .. } => "Unary",
            Expr::Binary { .. } => "Binary",
            Expr::Script { .. } => "Script",
            Expr::Call { .. } => "Call",
            Expr::Sqrt { .. } => "Sqrt",
            Expr::Sequence(_) => "Sequence",
        }
    }

    /// True for a group with the given delimiter.
    pub fn is_group(&self, delimiter: Delimiter) -> bool {
        matches!(self, Expr::Group { delim, .. } if *delim == delimiter)
    }
}
