//! Rewriting of named call arguments inside model formulas.
//!
//! A formula like `price ~ color + cut(carat, breaks = c(0, 1, 2))` is an
//! unevaluated expression tree. This crate parses such trees, rewrites the
//! named argument of every call to a chosen function, and hands the result
//! back with the formula's binding intact, ready for whatever fits the
//! model downstream.

pub mod error;
pub mod expr;
pub mod parse;
pub mod report;
pub mod rewrite;
pub mod utils;

pub use error::RewriteError;
pub use expr::{Arg, Call, EnvRef, Expr, Formula};
pub use parse::{ParseError, parse_expr, parse_formula, parse_formula_in};
pub use rewrite::{Target, find_matching_calls, rewrite_argument};
