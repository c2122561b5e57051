//! The MeX → LaTeX entry point.
//!
//! A [`Transpiler`] runs lexer, parser and emitter in sequence and memoizes
//! finished output per exact input string. It is `Sync`: the cache sits
//! behind a mutex that is held only for lookups and inserts, never while
//! the pipeline runs.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex, MutexGuard, PoisonError,
};

use once_cell::sync::Lazy;
use tracing::{debug, trace};

use crate::{
    cache::{CacheMap, DEFAULT_CAPACITY},
    emitter::{trim_command_space, Emitter},
    error::MexResult,
    lexer::Lexer,
    parser::{Parser, DEFAULT_MAX_DEPTH},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranspilerOptions {
    /// Entries kept in the result cache; 0 disables caching
    pub cache_size: usize,
    /// Deepest parser recursion accepted before failing
    pub max_depth: usize,
}

impl Default for TranspilerOptions {
    fn default() -> Self {
        TranspilerOptions {
            cache_size: DEFAULT_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Cache counters. Every miss is one full pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct Transpiler {
    options: TranspilerOptions,
    cache: Mutex<CacheMap>,
    emitter: Emitter,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for Transpiler {
    fn default() -> Self {
        Transpiler::new()
    }
}

impl Transpiler {
    pub fn new() -> Self {
        Transpiler::with_options(TranspilerOptions::default())
    }

    pub fn with_options(options: TranspilerOptions) -> Self {
        Transpiler {
            options,
            cache: Mutex::new(CacheMap::new(options.cache_size)),
            emitter: Emitter::new(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn options(&self) -> TranspilerOptions {
        self.options
    }

    fn cache(&self) -> MutexGuard<'_, CacheMap> {
        // Entries are immutable strings, so a poisoned map is still consistent
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Transpiles one MeX string. Failures are never cached.
    pub fn transpile(&self, text: &str) -> MexResult<String> {
        if let Some(latex) = self.cache().get(text) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!(input = text, "cache hit");
            return Ok(latex.to_string());
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!(input = text, "cache miss");

        let latex = self.run_pipeline(text)?;

        self.cache().insert(text, latex.as_str());
        Ok(latex)
    }

    fn run_pipeline(&self, text: &str) -> MexResult<String> {
        let tokens = Lexer::new(text).tokenize()?;
        trace!(?tokens, "lexed");

        let ast = Parser::from_tokens(tokens)
            .with_max_depth(self.options.max_depth)
            .parse()?;
        trace!(?ast, "parsed");

        let latex = match ast {
            Some(expr) => self.emitter.emit(&expr)?,
            None => String::new(),
        };
        let latex = trim_command_space(&latex).to_string();
        debug!(latex = latex.as_str(), "emitted");

        Ok(latex)
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache().len()
    }

    /// Empties the cache; counters keep running.
    pub fn clear_cache(&self) {
        self.cache().clear();
    }
}

static GLOBAL: Lazy<Transpiler> = Lazy::new(Transpiler::new);

/// The process-wide transpiler behind [`crate::transpile`].
pub fn global() -> &'static Transpiler {
    &GLOBAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_call_is_a_hit() {
        let transpiler = Transpiler::new();
        let first = transpiler.transpile("x^2_3").unwrap();
        let second = transpiler.transpile("x^2_3").unwrap();

        assert_eq!(first, second);
        assert_eq!(transpiler.stats(), CacheStats { hits: 1, misses: 1 });
    }

    #[test]
    fn test_failures_are_not_cached() {
        let transpiler = Transpiler::new();
        assert!(transpiler.transpile("sqrt").is_err());
        assert!(transpiler.transpile("sqrt").is_err());

        assert_eq!(transpiler.cached_entries(), 0);
        assert_eq!(transpiler.stats().misses, 2);
    }

    #[test]
    fn test_zero_cache_size_always_runs_pipeline() {
        let transpiler = Transpiler::with_options(TranspilerOptions {
            cache_size: 0,
            ..TranspilerOptions::default()
        });
        transpiler.transpile("a").unwrap();
        transpiler.transpile("a").unwrap();
        assert_eq!(transpiler.stats(), CacheStats { hits: 0, misses: 2 });
    }
}
