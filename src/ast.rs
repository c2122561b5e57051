//! # MeX - Abstract Syntax Tree
//!
//! This module defines the tokens and the Abstract Syntax Tree (AST) for MeX,
//! a compact plain-text math shorthand that expands deterministically into
//! LaTeX math markup.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens and byte spans produced by the lexer
//! - **[expressions]** - Expression nodes (literals, groups, operators, scripts, calls)
//! - **[operators]** - Binary/prefix operators, group delimiters and binding powers
//!
//! ## Quick Start
//!
//! ```text
//! sqrt(3/4^2)
//! ```
//!
//! This expression transpiles to `\sqrt{\frac{3}{4^{2}}}`.
//!
//! ## Core Concepts
//!
//! ### Implicit Multiplication
//!
//! Adjacent atoms multiply without an operator, and adjacency binds tighter
//! than an explicit `*` or `/`:
//!
//! ```text
//! 1/2x      // \frac{1}{2x}
//! a/b*c     // \frac{a}{b} \cdot c
//! ```
//!
//! ### Scripts
//!
//! `^`, `_` and `__` attach to the preceding atom in any order and are always
//! emitted subscript first:
//!
//! ```text
//! x^2_3     // x_{3}^{2}
//! X__1      // X_{_{1}}
//! ```
//!
//! ### Escape Hatches
//!
//! - `l{{...}}l` - raw LaTeX
//! - `t{{...}}t` - text mode
//! - `m{{...}}m` - italic math
//!
//! ## Examples
//!
//! ### Definite Integral
//!
//! ```text
//! int(sin(x), x, 0, pi)     // \int_{0}^{\pi} \sin(x) \, dx
//! ```
//!
//! ### Matrix
//!
//! ```text
//! [[a, b], [c, d]]          // \begin{bmatrix} a & b \\ c & d \end{bmatrix}
//! ```
pub mod tokens;
pub mod expressions;
pub mod operators;

pub use tokens::{Span, Token, TokenKind};
pub use expressions::Expr;
pub use operators::{bp, BinOp, Delimiter, UnaryOp};
