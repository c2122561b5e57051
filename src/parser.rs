use crate::{
    ast::{bp, BinOp, Delimiter, Expr, Span, Token, TokenKind, UnaryOp},
    error::{ErrorKind, MexError, MexResult},
    keywords::Keywords,
    lexer::Lexer,
};

/// Default bound on parser recursion.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Where an expression parse must halt regardless of operator power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Never,
    /// Inside `< ... >`, an unparenthesized `>` closes the group
    AtAngleClose,
}

/// Precedence-climbing parser over a lexed token stream.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    keywords: &'static Keywords,
    depth: usize,
    max_depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> MexResult<Self> {
        Ok(Parser::from_tokens(lexer.tokenize()?))
    }

    /// Builds a parser over already-lexed tokens; a missing `Eof` is appended.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let end = tokens.last().map_or(0, |t| t.span.end);
            tokens.push(Token::new(TokenKind::Eof, "", Span::new(end, end)));
        }
        Parser {
            tokens,
            position: 0,
            keywords: Keywords::standard(),
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn peek(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.position + offset).min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.position += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn skip_newlines(&mut self) {
        while self.check(TokenKind::Newline) {
            self.advance();
        }
    }

    fn unexpected(&self) -> MexError {
        let token = self.current();
        MexError::unexpected_token(token.describe(), token.span)
    }

    /// An operand the grammar requires; absence means the input ended early.
    fn require(&self, expr: Option<Expr>) -> MexResult<Expr> {
        expr.ok_or_else(|| self.unexpected())
    }

    fn enter(&mut self) -> MexResult<()> {
        if self.depth >= self.max_depth {
            return Err(MexError::at(
                ErrorKind::NestingTooDeep {
                    limit: self.max_depth,
                },
                self.current().span,
            ));
        }
        self.depth += 1;
        Ok(())
    }


    /// Parses the whole stream. `None` only for input with no expression.
    pub fn parse(&mut self) -> MexResult<Option<Expr>> {
        if self.check(TokenKind::Eof) {
            return Ok(None);
        }

        let expr = self.parse_sequence(bp::NONE, Stop::Never)?;

        self.skip_newlines();
        if !self.check(TokenKind::Eof) {
            return Err(self.unexpected());
        }
        Ok(expr)
    }

    fn parse_sequence(&mut self, min_bp: u8, stop: Stop) -> MexResult<Option<Expr>> {
        let Some(first) = self.parse_expr(min_bp, stop)? else {
            return Ok(None);
        };

        if !self.check(TokenKind::Comma) {
            return Ok(Some(first));
        }

        let mut items = vec![first];
        while self.check(TokenKind::Comma) {
            self.advance();
            if let Some(next) = self.parse_expr(min_bp, stop)? {
                items.push(next);
            }
        }

        if items.len() >= 2 {
            Ok(Some(Expr::Sequence(items)))
        } else {
            Ok(Some(items.swap_remove(0)))
        }
    }

    /// Every fold in the operator loop deepens the tree, so each one is
    /// counted against the limit until this level returns.
    fn parse_expr(&mut self, min_bp: u8, stop: Stop) -> MexResult<Option<Expr>> {
        let outer = self.depth;
        let result = self
            .enter()
            .and_then(|()| self.parse_expr_inner(min_bp, stop));
        self.depth = outer;
        result
    }

    fn parse_expr_inner(&mut self, min_bp: u8, stop: Stop) -> MexResult<Option<Expr>> {
        let Some(mut left) = self.parse_atom(stop)? else {
            return Ok(None);
        };

        loop {
            let token = self.current();

            if stop == Stop::AtAngleClose && token.is_op(">") {
                break;
            }

            if is_script_op(token) {
                if bp::SCRIPT >= min_bp {
                    self.enter()?;
                    left = self.parse_script(left)?;
                    continue;
                }
                break;
            }

            if let Some(op) = self.infix_operator(token) {
                if op.binding_power() >= min_bp {
                    self.enter()?;
                    left = self.parse_infix(left, op, stop)?;
                    continue;
                }
                // An operator too weak to bind here is never an implicit factor
                break;
            }

            if self.can_start_atom() && bp::IMPLICIT_MUL >= min_bp {
                self.enter()?;
                let right = self.parse_expr(bp::IMPLICIT_MUL + 1, stop)?;
                let right = self.require(right)?;
                left = Expr::implicit(left, right);
                continue;
            }

            break;
        }

        Ok(Some(left))
    }

    fn infix_operator(&self, token: &Token) -> Option<BinOp> {
        match token.kind {
            TokenKind::Op => BinOp::from_symbol(&token.text),
            TokenKind::Ident => self
                .keywords
                .keyword_operator(&token.text)
                .map(|_| BinOp::Keyword(token.text.clone())),
            _ => None,
        }
    }

    fn parse_infix(&mut self, left: Expr, op: BinOp, stop: Stop) -> MexResult<Expr> {
        self.advance();
        self.skip_newlines();

        let right = self.parse_expr(op.binding_power() + 1, stop)?;
        let right = self.require(right)?;

        Ok(Expr::binary(op, left, right))
    }

    fn can_start_atom(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Number
                | TokenKind::Ident
                | TokenKind::RawLatex
                | TokenKind::Text
                | TokenKind::Mathit
                | TokenKind::LParen
                | TokenKind::LBrack
                | TokenKind::LBrace
        )
    }

    /// Parse primary expressions (atoms). `None` only at end of input.
    fn parse_atom(&mut self, stop: Stop) -> MexResult<Option<Expr>> {
        self.skip_newlines();
        let token = self.current().clone();

        let expr = match token.kind {
            TokenKind::Number => {
                self.advance();
                Expr::Number(token.text)
            }
            TokenKind::Ident => self.parse_ident_or_call()?,
            TokenKind::RawLatex => {
                self.advance();
                Expr::RawLatex(token.text)
            }
            TokenKind::Text => {
                self.advance();
                Expr::Text(token.text)
            }
            TokenKind::Mathit => {
                self.advance();
                Expr::Mathit(token.text)
            }
            TokenKind::LParen => self.parse_group(Delimiter::Paren)?,
            TokenKind::LBrack => self.parse_group(Delimiter::Bracket)?,
            TokenKind::LBrace => self.parse_group(Delimiter::Brace)?,
            TokenKind::LNorm => self.parse_group(Delimiter::Norm)?,
            TokenKind::Op => match token.text.as_str() {
                // In operand position `<` opens an inner product
                "<" => self.parse_group(Delimiter::Angle)?,
                "-" => {
                    self.advance();
                    let operand = self.parse_expr(bp::UNARY, stop)?;
                    Expr::unary(UnaryOp::Negate, self.require(operand)?)
                }
                "+" => {
                    self.advance();
                    let operand = self.parse_expr(bp::UNARY, stop)?;
                    self.require(operand)?
                }
                _ => {
                    // A bare operator symbol stands for itself
                    self.advance();
                    Expr::Ident(token.text)
                }
            },
            TokenKind::Eof => return Ok(None),
            _ => return Err(self.unexpected()),
        };

        Ok(Some(expr))
    }

    fn parse_ident_or_call(&mut self) -> MexResult<Expr> {
        let token = self.advance();
        let name = token.text;

        if self.keywords.prefix_operator(&name).is_some() {
            let operand = self.parse_expr(bp::UNARY, Stop::Never)?;
            let operand = self.require(operand)?;
            return Ok(Expr::unary(UnaryOp::Keyword(name), operand));
        }

        let canonical = self.keywords.canonical_function(&name);

        if canonical == "sqrt" {
            return self.parse_sqrt();
        }

        if self.keywords.is_function(canonical) && self.check(TokenKind::LParen) {
            let canonical = canonical.to_string();
            return self.parse_call(canonical);
        }

        Ok(Expr::Ident(name))
    }

    fn parse_call(&mut self, name: String) -> MexResult<Expr> {
        self.advance(); // Consume '('

        let mut args = Vec::new();
        if self.check(TokenKind::RParen) {
            self.advance();
            return Ok(Expr::Call { name, args });
        }

        loop {
            let arg = self.parse_expr(bp::NONE, Stop::Never)?;
            args.push(self.require(arg)?);

            if !self.check(TokenKind::Comma) {
                break;
            }
            self.advance();
        }

        self.skip_newlines();
        if !self.check(TokenKind::RParen) {
            return Err(MexError::at(
                ErrorKind::ExpectedClosingDelimiter { expected: ")" },
                self.current().span,
            ));
        }
        self.advance();

        Ok(Expr::Call { name, args })
    }

    /// `sqrt(x)` or `sqrt[n](x)`. The parentheses are mandatory, their content is not.
    fn parse_sqrt(&mut self) -> MexResult<Expr> {
        let mut index = None;
        if self.check(TokenKind::LBrack) {
            index = self.parse_group_contents(Delimiter::Bracket)?;
        }

        if !self.check(TokenKind::LParen) {
            return Err(MexError::at(
                ErrorKind::SqrtRequiresParentheses,
                self.current().span,
            ));
        }
        let radicand = self.parse_group_contents(Delimiter::Paren)?;

        Ok(Expr::Sqrt {
            index: index.map(Box::new),
            radicand: radicand.map(Box::new),
        })
    }

    fn parse_group(&mut self, delim: Delimiter) -> MexResult<Expr> {
        let expr = self.parse_group_contents(delim)?;
        Ok(Expr::group(delim, expr))
    }

    fn at_group_close(&self, delim: Delimiter) -> bool {
        match delim {
            Delimiter::Paren => self.check(TokenKind::RParen),
            Delimiter::Bracket => self.check(TokenKind::RBrack),
            Delimiter::Brace => self.check(TokenKind::RBrace),
            Delimiter::Norm => self.check(TokenKind::RNorm),
            Delimiter::Angle => self.current().is_op(">"),
        }
    }

    /// Consumes an opener, the content and the matching closer.
    fn parse_group_contents(&mut self, delim: Delimiter) -> MexResult<Option<Expr>> {
        self.advance(); // Consume opener

        if self.at_group_close(delim) {
            self.advance();
            return Ok(None);
        }

        let stop = match delim {
            Delimiter::Angle => Stop::AtAngleClose,
            _ => Stop::Never,
        };
        let expr = self.parse_sequence(bp::NONE, stop)?;

        self.skip_newlines();
        if !self.at_group_close(delim) {
            return Err(MexError::at(
                ErrorKind::ExpectedClosingDelimiter {
                    expected: delim.close(),
                },
                self.current().span,
            ));
        }
        self.advance();

        Ok(expr)
    }

    /// Consumes a chain of `^`, `_` and `__`, each slot at most once.
    fn parse_script(&mut self, base: Expr) -> MexResult<Expr> {
        let mut sub: Option<Box<Expr>> = None;
        let mut sup: Option<Box<Expr>> = None;
        let mut is_double_script = false;

        loop {
            let token = self.current();
            if token.is_op("^") && sup.is_none() {
                self.advance();
                sup = Some(Box::new(self.parse_script_arg()?));
            } else if token.is_op("_") && sub.is_none() {
                self.advance();
                sub = Some(Box::new(self.parse_script_arg()?));
            } else if token.is_op("__") && sub.is_none() {
                self.advance();
                sub = Some(Box::new(self.parse_script_arg()?));
                is_double_script = true;
            } else {
                break;
            }
        }

        Ok(Expr::Script {
            base: Box::new(base),
            sub,
            sup,
            is_double_script,
        })
    }

    /// A script argument is a single atom, not a full expression.
    fn parse_script_arg(&mut self) -> MexResult<Expr> {
        let token = self.current().clone();

        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(Expr::Number(token.text))
            }
            TokenKind::Ident => self.parse_ident_or_call(),
            TokenKind::LParen => self.parse_group(Delimiter::Paren),
            TokenKind::LBrack => self.parse_group(Delimiter::Bracket),
            TokenKind::LBrace => self.parse_group(Delimiter::Brace),
            TokenKind::RawLatex => {
                self.advance();
                Ok(Expr::RawLatex(token.text))
            }
            TokenKind::Text => {
                self.advance();
                Ok(Expr::Text(token.text))
            }
            TokenKind::Mathit => {
                self.advance();
                Ok(Expr::Mathit(token.text))
            }
            TokenKind::Op
                if token.text == "-"
                    && matches!(
                        self.peek(1).kind,
                        TokenKind::Number | TokenKind::Ident | TokenKind::LParen
                    ) =>
            {
                self.advance();
                let outer = self.depth;
                let operand = self.enter().and_then(|()| self.parse_script_arg());
                self.depth = outer;
                Ok(Expr::unary(UnaryOp::Negate, operand?))
            }
            // Bare signs as in one-sided limits: a^+, a^-
            TokenKind::Op if token.text == "+" || token.text == "-" => {
                self.advance();
                Ok(Expr::RawLatex(token.text))
            }
            _ => Err(MexError::at(
                ErrorKind::ExpectedScriptArgument {
                    found: token.describe(),
                },
                token.span,
            )),
        }
    }
}

fn is_script_op(token: &Token) -> bool {
    token.is_op("^") || token.is_op("_") || token.is_op("__")
}

#[cfg(test)]
fn parse_str(input: &str) -> MexResult<Option<Expr>> {
    Parser::new(Lexer::new(input))?.parse()
}

#[test]
fn test_empty_input() {
    assert_eq!(parse_str("").unwrap(), None);
    assert_eq!(parse_str("   % only a comment").unwrap(), None);
}

#[test]
fn test_weak_keyword_operator_is_not_an_implicit_factor() {
    // `and` after a denominator closes the fraction instead of multiplying into it
    let expr = parse_str("a/b and c").unwrap().unwrap();
    assert!(matches!(
        expr,
        Expr::Binary { op: BinOp::Keyword(ref w), .. } if w == "and"
    ));
}

#[test]
fn test_operator_folds_count_toward_depth() {
    let parse_with_limit = |input: &str| {
        Parser::new(Lexer::new(input))
            .unwrap()
            .with_max_depth(16)
            .parse()
    };

    assert!(parse_with_limit(&vec!["a"; 15].join("+")).is_ok());
    for input in [vec!["a"; 40].join("+"), vec!["a"; 40].join(" "), format!("x{}", "_1".repeat(40))] {
        let err = parse_with_limit(&input).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NestingTooDeep { limit: 16 }, "Failed for input: {}", input);
    }
}

#[test]
fn test_depth_limit() {
    let input = format!("{}x{}", "(".repeat(40), ")".repeat(40));
    let err = Parser::new(Lexer::new(&input))
        .unwrap()
        .with_max_depth(16)
        .parse()
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NestingTooDeep { limit: 16 });
}
