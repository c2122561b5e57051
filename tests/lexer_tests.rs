// tests/lexer_tests.rs

use mex_lang::ast::{Span, TokenKind};
use mex_lang::error::ErrorKind;
use mex_lang::lexer::Lexer;

fn kinds(input: &str) -> Vec<TokenKind> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn texts(input: &str) -> Vec<String> {
    Lexer::new(input)
        .tokenize()
        .unwrap()
        .into_iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| t.text)
        .collect()
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("(", TokenKind::LParen),
        (")", TokenKind::RParen),
        ("[", TokenKind::LBrack),
        ("]", TokenKind::RBrack),
        ("{", TokenKind::LBrace),
        ("}", TokenKind::RBrace),
        (",", TokenKind::Comma),
        ("+", TokenKind::Op),
        ("-", TokenKind::Op),
        ("*", TokenKind::Op),
        ("/", TokenKind::Op),
        ("=", TokenKind::Op),
        ("^", TokenKind::Op),
        ("_", TokenKind::Op),
        ("<", TokenKind::Op),
        (">", TokenKind::Op),
        ("~", TokenKind::Op),
        ("|", TokenKind::Op),
        ("\n", TokenKind::Newline),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, expected, "Failed for input: {:?}", input);
        assert_eq!(token.text, input, "Failed for input: {:?}", input);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }
}

#[test]
fn test_unknown_char_is_identifier() {
    let mut lexer = Lexer::new("!");
    let token = lexer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::Ident);
    assert_eq!(token.text, "!");
}

// ============================================================================
// Multi Character Operators
// ============================================================================

#[test]
fn test_multi_char_operators() {
    let test_cases = vec!["__", "<<", ">>", "~~", "!=", ">=", "<=", "->", "+-"];

    for input in test_cases {
        let tokens = Lexer::new(input).tokenize().unwrap();
        assert_eq!(tokens.len(), 2, "Failed for input: {}", input);
        assert_eq!(tokens[0].kind, TokenKind::Op, "Failed for input: {}", input);
        assert_eq!(tokens[0].text, input, "Failed for input: {}", input);
    }
}

#[test]
fn test_longest_operator_wins() {
    assert_eq!(texts("x__1"), vec!["x", "__", "1"]);
    assert_eq!(texts("a<=b"), vec!["a", "<=", "b"]);
    assert_eq!(texts("a<-b"), vec!["a", "<", "-", "b"]);
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_numbers() {
    let test_cases = vec![
        ("0", "0"),
        ("42", "42"),
        ("3.14", "3.14"),
        ("2.", "2."),
        (".5", ".5"),
        ("0.(3)", "0.(3)"),
        ("1.2(34)", "1.2(34)"),
    ];

    for (input, expected) in test_cases {
        let tokens = Lexer::new(input).tokenize().unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Number, "Failed for input: {}", input);
        assert_eq!(tokens[0].text, expected, "Failed for input: {}", input);
        assert_eq!(tokens[1].kind, TokenKind::Eof, "Failed for input: {}", input);
    }
}

#[test]
fn test_repeating_suffix_rolls_back() {
    // Unclosed or non-numeric suffixes are left for the parser
    assert_eq!(texts("0.5(x)"), vec!["0.5", "(", "x", ")"]);
    assert_eq!(texts("2.(3"), vec!["2.", "(", "3"]);
    assert_eq!(texts("1.()"), vec!["1.", "(", ")"]);
}

#[test]
fn test_paren_after_integer_is_not_repeating() {
    assert_eq!(texts("2(3)"), vec!["2", "(", "3", ")"]);
}

// ============================================================================
// Identifiers
// ============================================================================

#[test]
fn test_identifiers_are_letter_runs() {
    assert_eq!(texts("alpha"), vec!["alpha"]);
    assert_eq!(texts("xy"), vec!["xy"]);
    assert_eq!(texts("x2"), vec!["x", "2"]);
    assert_eq!(texts("2x"), vec!["2", "x"]);
}

// ============================================================================
// Norm Bars
// ============================================================================

#[test]
fn test_norm_bars() {
    let test_cases = vec![
        ("||x||", vec![TokenKind::LNorm, TokenKind::Ident, TokenKind::RNorm]),
        (
            "a+||x||",
            vec![
                TokenKind::Ident,
                TokenKind::Op,
                TokenKind::LNorm,
                TokenKind::Ident,
                TokenKind::RNorm,
            ],
        ),
        (
            "(||v||)",
            vec![
                TokenKind::LParen,
                TokenKind::LNorm,
                TokenKind::Ident,
                TokenKind::RNorm,
                TokenKind::RParen,
            ],
        ),
        (
            "f(a,||b||)",
            vec![
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::Ident,
                TokenKind::Comma,
                TokenKind::LNorm,
                TokenKind::Ident,
                TokenKind::RNorm,
                TokenKind::RParen,
            ],
        ),
    ];

    for (input, mut expected) in test_cases {
        expected.push(TokenKind::Eof);
        assert_eq!(kinds(input), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_single_bar_is_operator() {
    assert_eq!(
        kinds("P(A|B)"),
        vec![
            TokenKind::Ident,
            TokenKind::LParen,
            TokenKind::Ident,
            TokenKind::Op,
            TokenKind::Ident,
            TokenKind::RParen,
            TokenKind::Eof,
        ]
    );
}

// ============================================================================
// Range Modes
// ============================================================================

#[test]
fn test_range_modes() {
    let test_cases = vec![
        ("l{{\\mathcal{L}}}l", TokenKind::RawLatex, "\\mathcal{L}"),
        ("t{{if }}t", TokenKind::Text, "if "),
        ("m{{speed}}m", TokenKind::Mathit, "speed"),
        ("t{{}}t", TokenKind::Text, ""),
    ];

    for (input, kind, payload) in test_cases {
        let tokens = Lexer::new(input).tokenize().unwrap();
        assert_eq!(tokens[0].kind, kind, "Failed for input: {}", input);
        assert_eq!(tokens[0].text, payload, "Failed for input: {}", input);
        assert_eq!(tokens[0].span, Span::new(0, input.len()), "Failed for input: {}", input);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }
}

#[test]
fn test_range_mode_needs_matching_letter() {
    // }}t does not close an l{{ region
    let err = Lexer::new("l{{a}}t").tokenize().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnclosedRangeMode { .. }));
}

#[test]
fn test_mode_letter_without_braces_is_identifier() {
    assert_eq!(texts("l + t"), vec!["l", "+", "t"]);
    assert_eq!(texts("m{x}"), vec!["m", "{", "x", "}"]);
}

#[test]
fn test_unclosed_range_mode() {
    let input = "l{{unfinished";
    let err = Lexer::new(input).tokenize().unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::UnclosedRangeMode {
            delimiter: "l{{".to_string()
        }
    );
    assert_eq!(err.span, Some(Span::new(0, input.len())));
}

// ============================================================================
// Trivia and Spans
// ============================================================================

#[test]
fn test_whitespace_and_comments_are_skipped() {
    assert_eq!(texts("  a \t+\r b  % trailing note"), vec!["a", "+", "b"]);
    assert_eq!(
        kinds("a % note\nb"),
        vec![
            TokenKind::Ident,
            TokenKind::Newline,
            TokenKind::Ident,
            TokenKind::Eof
        ]
    );
}

#[test]
fn test_spans_are_byte_offsets() {
    let tokens = Lexer::new("ab + 12").tokenize().unwrap();
    let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(
        spans,
        vec![
            Span::new(0, 2),
            Span::new(3, 4),
            Span::new(5, 7),
            Span::new(7, 7)
        ]
    );
}

#[test]
fn test_exactly_one_eof() {
    for input in ["", "x", "a+b\n", "   "] {
        let tokens = Lexer::new(input).tokenize().unwrap();
        let eofs = tokens.iter().filter(|t| t.kind == TokenKind::Eof).count();
        assert_eq!(eofs, 1, "Failed for input: {:?}", input);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}
