use crate::ast::{Span, Token, TokenKind};
use crate::error::{MexError, MexResult};
use crate::keywords::MULTI_CHAR_OPS;

/// Single-pass scanner turning MeX source into spanned tokens.
///
/// Positions are byte offsets into the input.
pub struct Lexer {
    input: String,
    position: usize,
    previous: Option<TokenKind>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.to_string(),
            position: 0,
            previous: None,
        }
    }

    fn rest(&self) -> &str {
        &self.input[self.position..]
    }

    fn current_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.rest().chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    /// Skips blanks and `%` comments. Newlines are tokens, so they stay.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char() {
            match ch {
                ' ' | '\t' | '\r' => self.advance(),
                '%' => {
                    while let Some(c) = self.current_char() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn consume_digits(&mut self) -> usize {
        let mut count = 0;
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            count += 1;
        }
        count
    }

    fn read_number(&mut self) -> TokenKind {
        self.consume_digits();

        if self.current_char() == Some('.') {
            self.advance();
            self.consume_digits();

            // Repeating decimal suffix: 0.(3). Rolled back unless closed.
            if self.current_char() == Some('(') {
                let saved = self.position;
                self.advance();
                let digits = self.consume_digits();
                if digits > 0 && self.current_char() == Some(')') {
                    self.advance();
                } else {
                    self.position = saved;
                }
            }
        }

        TokenKind::Number
    }

    fn read_identifier(&mut self) -> TokenKind {
        while self.current_char().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        TokenKind::Ident
    }

    /// Scans `x{{ ... }}x` and returns the token with the payload as text.
    fn read_range_mode(&mut self, mode: char) -> MexResult<Token> {
        let start = self.position;
        let closing = format!("}}}}{}", mode);

        // Opening marker is three ASCII bytes
        let content_start = start + 3;
        match self.input[content_start..].find(&closing) {
            Some(offset) => {
                let content_end = content_start + offset;
                self.position = content_end + closing.len();

                let kind = match mode {
                    'l' => TokenKind::RawLatex,
                    't' => TokenKind::Text,
                    _ => TokenKind::Mathit,
                };
                let content = &self.input[content_start..content_end];
                Ok(Token::new(kind, content, Span::new(start, self.position)))
            }
            None => {
                self.position = self.input.len();
                Err(MexError::unclosed_range_mode(
                    format!("{}{{{{", mode),
                    Span::new(start, self.position),
                ))
            }
        }
    }

    fn read_operator(&mut self) -> TokenKind {
        for op in MULTI_CHAR_OPS {
            if self.rest().starts_with(op) {
                self.position += op.len();
                return TokenKind::Op;
            }
        }

        let Some(ch) = self.current_char() else {
            return TokenKind::Eof;
        };
        self.advance();

        match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBrack,
            ']' => TokenKind::RBrack,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            '+' | '-' | '*' | '/' | '=' | '^' | '_' | '<' | '>' | '~' => TokenKind::Op,
            '|' if self.current_char() == Some('|') => {
                self.advance();
                // Local heuristic: a norm opens where an operand is expected
                match self.previous {
                    None
                    | Some(TokenKind::Op)
                    | Some(TokenKind::LParen)
                    | Some(TokenKind::Comma) => TokenKind::LNorm,
                    _ => TokenKind::RNorm,
                }
            }
            '|' => TokenKind::Op,
            // Anything else is accepted as a one-character identifier
            _ => TokenKind::Ident,
        }
    }

    pub fn next_token(&mut self) -> MexResult<Token> {
        self.skip_trivia();
        let start = self.position;

        let kind = match self.current_char() {
            None => TokenKind::Eof,
            Some('\n') => {
                self.advance();
                TokenKind::Newline
            }
            Some(mode @ ('l' | 't' | 'm'))
                if self.peek_char(1) == Some('{') && self.peek_char(2) == Some('{') =>
            {
                let token = self.read_range_mode(mode)?;
                self.previous = Some(token.kind);
                return Ok(token);
            }
            Some(ch) if ch.is_ascii_digit() => self.read_number(),
            Some('.') if self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.read_number()
            }
            Some(ch) if ch.is_ascii_alphabetic() => self.read_identifier(),
            Some(_) => self.read_operator(),
        };

        self.previous = Some(kind);
        Ok(Token::new(
            kind,
            &self.input[start..self.position],
            Span::new(start, self.position),
        ))
    }

    /// Scans the whole input. The result always ends with exactly one `Eof`.
    pub fn tokenize(&mut self) -> MexResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

#[cfg(test)]
fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

#[test]
fn test_norm_disambiguation() {
    assert_eq!(
        kinds("||x|| + ||y||"),
        vec![
            TokenKind::LNorm,
            TokenKind::Ident,
            TokenKind::RNorm,
            TokenKind::Op,
            TokenKind::LNorm,
            TokenKind::Ident,
            TokenKind::RNorm,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_repeating_decimal_rollback() {
    let tokens = Lexer::new("0.5(x)").tokenize().unwrap();
    assert_eq!(tokens[0].text, "0.5");
    assert_eq!(tokens[1].kind, TokenKind::LParen);

    let tokens = Lexer::new("0.(3)").tokenize().unwrap();
    assert_eq!(tokens[0].text, "0.(3)");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn test_unclosed_range_mode_span() {
    let err = Lexer::new("1 + t{{abc").tokenize().unwrap_err();
    assert_eq!(err.span, Some(Span::new(4, 10)));
    assert_eq!(err.message(), "Unclosed range mode: t{{");
}
