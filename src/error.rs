//! Error types for argument rewriting.

use thiserror::Error;

use crate::expr::OwnedPath;

/// Errors that can occur when rewriting call arguments.
///
/// Both variants surface immediately to the caller; a failed rewrite never
/// returns a partially rebuilt tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RewriteError {
    /// The input has a shape no rewrite can process
    #[error("invalid expression: {reason}")]
    InvalidExpression { reason: String },

    /// The target pattern also names a plain variable, so the caller's
    /// intent is ambiguous
    #[error("target `{name}` also appears as a variable at {path}")]
    AmbiguousTarget { name: String, path: OwnedPath },
}
