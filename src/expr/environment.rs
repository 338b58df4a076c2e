//! Variable-resolution contexts attached to formulas.
//!
//! An environment is never inspected by the rewriter itself; it is carried
//! alongside a formula so that a downstream evaluator can resolve the
//! variable names the formula mentions. Handles are compared by identity:
//! two environments that happen to share a name are still distinct bindings.

use std::fmt;
use std::sync::{Arc, OnceLock};

/// A named variable-resolution context.
#[derive(Debug)]
pub struct Environment {
    name: String,
}

impl Environment {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A shared, identity-compared handle to an [`Environment`].
///
/// Cloning the handle yields the same binding; [`EnvRef::new`] yields a new
/// one. Rewriting a formula clones the handle, never the environment.
#[derive(Clone, Debug)]
pub struct EnvRef(Arc<Environment>);

impl EnvRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::new(Environment { name: name.into() }))
    }

    /// The process-wide default environment.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<EnvRef> = OnceLock::new();
        GLOBAL.get_or_init(|| EnvRef::new("global")).clone()
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Returns `true` if both handles refer to the same environment.
    pub fn same_as(&self, other: &EnvRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for EnvRef {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl Eq for EnvRef {}

impl fmt::Display for EnvRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<environment: {}>", self.name())
    }
}
