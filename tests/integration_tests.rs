use mex_lang::{
    ast::Span, CacheStats, ErrorKind, MexError, Transpiler, TranspilerOptions,
};
use std::sync::Arc;
use std::thread;

fn fresh() -> Transpiler {
    Transpiler::new()
}

#[test]
fn test_transpile_pipeline() {
    let transpiler = fresh();
    assert_eq!(
        transpiler.transpile("E = m c^2").unwrap(),
        "E=mc^{2}"
    );
    assert_eq!(
        transpiler.transpile("x = (-b +- sqrt(b^2 - 4a c))/2a").unwrap(),
        "x=\\frac{-b \\pm \\sqrt{b^{2}-4ac}}{2a}"
    );
}

#[test]
fn test_empty_input_is_empty_output() {
    let transpiler = fresh();
    assert_eq!(transpiler.transpile("").unwrap(), "");
    assert_eq!(transpiler.transpile("  \n ").unwrap(), "");
}

#[test]
fn test_trailing_command_space_is_trimmed() {
    let transpiler = fresh();
    assert_eq!(transpiler.transpile("alpha").unwrap(), "\\alpha");
    assert_eq!(transpiler.transpile("x + pi").unwrap(), "x+\\pi");
    // An escaped space is content
    assert_eq!(transpiler.transpile("l{{a\\ }}l").unwrap(), "a\\ ");
}

#[test]
fn test_multiline_continuation() {
    let transpiler = fresh();
    assert_eq!(
        transpiler.transpile("a +\nb +\nc").unwrap(),
        "a+b+c"
    );
}

// ===== Cache =====

#[test]
fn test_cache_hit_skips_pipeline() {
    let transpiler = fresh();
    let first = transpiler.transpile("sum(i, 1, n, i)").unwrap();
    let second = transpiler.transpile("sum(i, 1, n, i)").unwrap();

    assert_eq!(first, second);
    assert_eq!(transpiler.stats(), CacheStats { hits: 1, misses: 1 });
    assert_eq!(transpiler.cached_entries(), 1);
}

#[test]
fn test_cache_is_keyed_by_exact_input() {
    let transpiler = fresh();
    transpiler.transpile("a+b").unwrap();
    transpiler.transpile("a + b").unwrap();

    assert_eq!(transpiler.stats().misses, 2);
    assert_eq!(transpiler.cached_entries(), 2);
}

#[test]
fn test_cache_is_bounded() {
    let transpiler = Transpiler::with_options(TranspilerOptions {
        cache_size: 2,
        ..TranspilerOptions::default()
    });
    transpiler.transpile("a").unwrap();
    transpiler.transpile("b").unwrap();
    transpiler.transpile("a").unwrap();
    transpiler.transpile("c").unwrap();

    assert_eq!(transpiler.cached_entries(), 2);

    // "b" was least recently used and is gone
    transpiler.transpile("b").unwrap();
    assert_eq!(transpiler.stats(), CacheStats { hits: 1, misses: 4 });
}

#[test]
fn test_clear_cache() {
    let transpiler = fresh();
    transpiler.transpile("x").unwrap();
    transpiler.clear_cache();
    assert_eq!(transpiler.cached_entries(), 0);

    transpiler.transpile("x").unwrap();
    assert_eq!(transpiler.stats().misses, 2);
}

#[test]
fn test_failed_transpile_is_not_cached() {
    let transpiler = fresh();
    assert!(transpiler.transpile("(a").is_err());
    assert_eq!(transpiler.cached_entries(), 0);
}

#[test]
fn test_shared_across_threads() {
    let transpiler = Arc::new(fresh());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let transpiler = Arc::clone(&transpiler);
            thread::spawn(move || transpiler.transpile("int(f, x, 0, 1)").unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "\\int_{0}^{1} f \\, dx");
    }
    let stats = transpiler.stats();
    assert_eq!(stats.hits + stats.misses, 4);
    assert_eq!(transpiler.cached_entries(), 1);
}

// ===== Errors =====

#[test]
fn test_error_display() {
    let transpiler = fresh();

    let err = transpiler.transpile("l{{abc").unwrap_err();
    assert_eq!(err.to_string(), "Unclosed range mode: l{{ at 0-6");

    let err = transpiler.transpile("binom(n)").unwrap_err();
    assert_eq!(err.to_string(), "binom() requires 2 arguments, got 1");
    assert_eq!(err.span(), None);
}

#[test]
fn test_error_kinds_by_stage() {
    let transpiler = fresh();
    let test_cases: Vec<(&str, fn(&ErrorKind) -> bool)> = vec![
        ("m{{x", |k| matches!(k, ErrorKind::UnclosedRangeMode { .. })),
        ("a ]", |k| matches!(k, ErrorKind::UnexpectedToken { .. })),
        ("[a", |k| matches!(k, ErrorKind::ExpectedClosingDelimiter { .. })),
        ("x_)", |k| matches!(k, ErrorKind::ExpectedScriptArgument { .. })),
        ("sqrt 2", |k| matches!(k, ErrorKind::SqrtRequiresParentheses)),
        ("floor()", |k| matches!(k, ErrorKind::InvalidArity { .. })),
    ];

    for (input, check) in test_cases {
        let err = transpiler.transpile(input).unwrap_err();
        assert!(check(&err.kind), "Failed for input: {}: {:?}", input, err);
    }
}

#[test]
fn test_max_depth_option() {
    let transpiler = Transpiler::with_options(TranspilerOptions {
        max_depth: 4,
        ..TranspilerOptions::default()
    });

    assert!(transpiler.transpile("((x))").is_ok());

    let err: MexError = transpiler.transpile("((((((x))))))").unwrap_err();
    assert_eq!(err.kind, ErrorKind::NestingTooDeep { limit: 4 });
    assert!(err.span.is_some());
}

#[test]
fn test_tokenize_convenience() {
    let tokens = mex_lang::tokenize("a+b").unwrap();
    let spans: Vec<Span> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(
        spans,
        vec![Span::new(0, 1), Span::new(1, 2), Span::new(2, 3), Span::new(3, 3)]
    );
}

#[test]
fn test_global_transpile() {
    assert_eq!(mex_lang::transpile("binom(n, k)").unwrap(), "\\binom{n}{k}");
}

#[test]
fn test_long_chains_fail_instead_of_overflowing() {
    let transpiler = fresh();
    let sum = format!("{}a", "a+".repeat(500));
    let err = transpiler.transpile(&sum).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NestingTooDeep { limit: 256 });

    let transpiler = Transpiler::with_options(TranspilerOptions {
        max_depth: 16,
        ..TranspilerOptions::default()
    });
    let subscripts = format!("x{}", "_1".repeat(1_000));
    let err = transpiler.transpile(&subscripts).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NestingTooDeep { limit: 16 });
    assert!(transpiler.transpile("x_1_2_3").is_ok());
}
