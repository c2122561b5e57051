use std::fmt;

/// Byte-offset range into the source text (start inclusive, end exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Classification of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    /// Unsigned numeric literal, optionally with a repeating-decimal suffix
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// 0.(3)
    /// ```
    Number,

    /// Maximal run of ASCII letters, or a single unclassified character
    ///
    /// # Examples
    /// ```text
    /// x
    /// alpha
    /// Gamma
    /// !
    /// ```
    Ident,

    /// Operator symbol, single or multi-character
    ///
    /// # Examples
    /// ```text
    /// +  -  *  /  ^  _  __
    /// <=  >=  !=  <<  >>  ->  +-  ~~
    /// ```
    Op,

    // Delimiters
    LParen,
    RParen,
    LBrack,
    RBrack,
    LBrace,
    RBrace,

    /// Opening `||` of a norm
    LNorm,

    /// Closing `||` of a norm
    RNorm,

    /// Separates sequence items and call arguments
    Comma,

    // Escape hatches
    /// Raw LaTeX passed through verbatim
    ///
    /// # Example
    /// ```text
    /// l{{\frac{a}{b}}}l
    /// ```
    RawLatex,

    /// Text-mode payload
    ///
    /// # Example
    /// ```text
    /// t{{for all}}t
    /// ```
    Text,

    /// Italic math payload
    ///
    /// # Example
    /// ```text
    /// m{{speed}}m
    /// ```
    Mathit,

    /// Line break; terminates an expression
    Newline,

    /// End of input
    Eof,
}

impl TokenKind {
    /// Human-readable name used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::Ident => "identifier",
            TokenKind::Op => "operator",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrack => "'['",
            TokenKind::RBrack => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LNorm => "opening '||'",
            TokenKind::RNorm => "closing '||'",
            TokenKind::Comma => "','",
            TokenKind::RawLatex => "raw LaTeX",
            TokenKind::Text => "text",
            TokenKind::Mathit => "mathit",
            TokenKind::Newline => "newline",
            TokenKind::Eof => "end of input",
        }
    }
}

/// A classified slice of the source.
///
/// For escape hatches `text` holds the payload between the markers; for
/// every other kind it is the exact source text of the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    /// True for an `Op` token with exactly this text.
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }

    /// Text shown in "unexpected token" style messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof | TokenKind::Newline => self.kind.describe().to_string(),
            TokenKind::RawLatex | TokenKind::Text | TokenKind::Mathit => {
                self.kind.describe().to_string()
            }
            _ => self.text.clone(),
        }
    }
}
