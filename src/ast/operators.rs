/// Binding powers used by the precedence-climbing parser, low to high.
///
/// Implicit multiplication binds tighter than explicit `*` and `/`, so
/// `1/2x` reads as `1/(2x)`.
pub mod bp {
    pub const NONE: u8 = 0;
    pub const EQUALS: u8 = 10;
    pub const ADDITIVE: u8 = 20;
    pub const MULTIPLICATIVE: u8 = 30;
    pub const IMPLICIT_MUL: u8 = 40;
    pub const UNARY: u8 = 50;
    pub const CALL: u8 = 60;
    pub const SCRIPT: u8 = 70;
}

/// Binary operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinOp {
    // Relations
    /// Equal (`=`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Less than (`<`)
    LessThan,
    /// Greater than (`>`)
    GreaterThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Much less than (`<<`)
    MuchLess,
    /// Much greater than (`>>`)
    MuchGreater,
    /// Tends to (`->`)
    Arrow,
    /// Approximately (`~~`)
    Approx,
    /// Similar to (`~`)
    Similar,
    /// Conditional bar (`|`)
    Given,

    // Arithmetic
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Plus-minus (`+-`)
    PlusMinus,
    /// Multiplication, explicit `*` or implicit adjacency
    Multiply,
    /// Division (`/`), rendered as a fraction
    Divide,

    /// Word operator from the keyword table (`and`, `in`, `union`, ...)
    Keyword(String),
}

impl BinOp {
    /// Maps an operator token's text to its binary operator.
    pub fn from_symbol(symbol: &str) -> Option<BinOp> {
        let op = match symbol {
            "=" => BinOp::Equal,
            "!=" => BinOp::NotEqual,
            "<" => BinOp::LessThan,
            ">" => BinOp::GreaterThan,
            "<=" => BinOp::LessEqual,
            ">=" => BinOp::GreaterEqual,
            "<<" => BinOp::MuchLess,
            ">>" => BinOp::MuchGreater,
            "->" => BinOp::Arrow,
            "~~" => BinOp::Approx,
            "~" => BinOp::Similar,
            "|" => BinOp::Given,
            "+" => BinOp::Add,
            "-" => BinOp::Subtract,
            "+-" => BinOp::PlusMinus,
            "*" => BinOp::Multiply,
            "/" => BinOp::Divide,
            _ => return None,
        };
        Some(op)
    }

    /// Left binding power; the right side is parsed at this plus one.
    pub fn binding_power(&self) -> u8 {
        match self {
            BinOp::Equal
            | BinOp::NotEqual
            | BinOp::LessThan
            | BinOp::GreaterThan
            | BinOp::LessEqual
            | BinOp::GreaterEqual
            | BinOp::MuchLess
            | BinOp::MuchGreater
            | BinOp::Arrow
            | BinOp::Approx
            | BinOp::Similar
            | BinOp::Given => bp::EQUALS,
            BinOp::Add | BinOp::Subtract | BinOp::PlusMinus | BinOp::Keyword(_) => bp::ADDITIVE,
            BinOp::Multiply | BinOp::Divide => bp::MULTIPLICATIVE,
        }
    }

    /// Source spelling of the operator.
    pub fn symbol(&self) -> &str {
        match self {
            BinOp::Equal => "=",
            BinOp::NotEqual => "!=",
            BinOp::LessThan => "<",
            BinOp::GreaterThan => ">",
            BinOp::LessEqual => "<=",
            BinOp::GreaterEqual => ">=",
            BinOp::MuchLess => "<<",
            BinOp::MuchGreater => ">>",
            BinOp::Arrow => "->",
            BinOp::Approx => "~~",
            BinOp::Similar => "~",
            BinOp::Given => "|",
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::PlusMinus => "+-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Keyword(word) => word,
        }
    }
}

/// Prefix operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation (`-x`)
    Negate,
    /// Word operator from the prefix table (`not`, `forall`, `exists`, `mod`)
    Keyword(String),
}

impl UnaryOp {
    pub fn is_keyword(&self, word: &str) -> bool {
        matches!(self, UnaryOp::Keyword(w) if w == word)
    }
}

/// Bracket pair enclosing a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `( )`
    Paren,
    /// `[ ]`
    Bracket,
    /// `{ }`
    Brace,
    /// `< >`, an inner product
    Angle,
    /// `|| ||`, a norm
    Norm,
}

impl Delimiter {
    pub fn open(self) -> &'static str {
        match self {
            Delimiter::Paren => "(",
            Delimiter::Bracket => "[",
            Delimiter::Brace => "{",
            Delimiter::Angle => "<",
            Delimiter::Norm => "||",
        }
    }

    pub fn close(self) -> &'static str {
        match self {
            Delimiter::Paren => ")",
            Delimiter::Bracket => "]",
            Delimiter::Brace => "}",
            Delimiter::Angle => ">",
            Delimiter::Norm => "||",
        }
    }
}
