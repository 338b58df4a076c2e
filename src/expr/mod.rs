//! Expression trees for model formulas.
//!
//! An [`Expr`] is either a leaf (number, string or symbol) or a [`Call`]
//! whose first child identifies the function being invoked and whose
//! remaining children are positional or named arguments. Trees are owned
//! outright, inspected immutably, and only ever copied-with-modification.

pub mod display;
pub mod environment;
pub mod formula;
pub mod path;

pub use environment::EnvRef;
pub use formula::Formula;
pub use path::{OwnedPath, Path, SubexpressionPathIterator};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::RewriteError;

/// A node in a symbolic, unevaluated expression tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// A numeric literal
    Number(f64),
    /// A string literal
    Str(String),
    /// A name: a variable reference or a function/operator symbol
    Symbol(String),
    /// A function or operator applied to arguments
    Call(Call),
}

/// A function application: head expression plus ordered arguments.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Call {
    pub head: Box<Expr>,
    pub args: Vec<Arg>,
}

/// A single call argument, referenced by position or by name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arg {
    pub name: Option<String>,
    pub value: Expr,
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Expr::Number(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    /// A call with a symbol head.
    pub fn call(head: impl Into<String>, args: Vec<Arg>) -> Self {
        Expr::Call(Call {
            head: Box::new(Expr::symbol(head)),
            args,
        })
    }

    /// A binary operator application, e.g. `color + clarity`.
    pub fn binary(operator: impl Into<String>, left: Expr, right: Expr) -> Self {
        Expr::call(operator, vec![Arg::positional(left), Arg::positional(right)])
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Expr::Call(_))
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_call(&self) -> Option<&Call> {
        match self {
            Expr::Call(call) => Some(call),
            _ => None,
        }
    }

    /// The children of this node: the head followed by the argument values.
    /// `None` for leaves.
    pub fn children(&self) -> Option<Vec<&Expr>> {
        match self {
            Expr::Call(call) => Some(
                std::iter::once(call.head.as_ref())
                    .chain(call.args.iter().map(|arg| &arg.value))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn subexpression<'e>(&'e self, path: Path) -> Option<&'e Expr> {
        if let Some(head) = path.head() {
            self.children()
                .and_then(|children| children.get(head)?.subexpression(path.child()))
        } else {
            Some(self)
        }
    }

    pub fn iter_paths(&self) -> SubexpressionPathIterator<'_> {
        SubexpressionPathIterator::new(self)
    }

    pub fn iter_subexpressions(&self) -> impl Iterator<Item = &Expr> {
        self.iter_paths()
            .filter_map(|path| self.subexpression(path.as_path()))
    }

    /// Rejects the malformed shapes the type still allows: a literal in
    /// call-head position and named arguments with an empty name.
    pub fn check_well_formed(&self) -> Result<(), RewriteError> {
        let Expr::Call(call) = self else {
            return Ok(());
        };

        if matches!(call.head.as_ref(), Expr::Number(_) | Expr::Str(_)) {
            return Err(RewriteError::InvalidExpression {
                reason: format!("call head must be a symbol or call, found `{}`", call.head),
            });
        }
        call.head.check_well_formed()?;

        for arg in &call.args {
            if let Some(name) = &arg.name
                && name.is_empty()
            {
                return Err(RewriteError::InvalidExpression {
                    reason: String::from("named argument with an empty name"),
                });
            }
            arg.value.check_well_formed()?;
        }

        Ok(())
    }
}

impl Call {
    /// The head symbol's name, or `None` when the head is not a plain symbol.
    pub fn head_name(&self) -> Option<&str> {
        self.head.as_symbol()
    }

    /// The value of the named argument, if present.
    pub fn argument(&self, name: &str) -> Option<&Expr> {
        self.args
            .iter()
            .find(|arg| arg.name.as_deref() == Some(name))
            .map(|arg| &arg.value)
    }

    /// A copy of this call with the named argument set to `value`:
    /// overwritten in place when present, appended when absent. All other
    /// arguments keep their order and names.
    pub fn with_argument(&self, name: &str, value: Expr) -> Call {
        let position = self
            .args
            .iter()
            .find_position(|arg| arg.name.as_deref() == Some(name))
            .map(|(position, _)| position);

        let mut rebuilt = self.clone();
        match position {
            Some(position) => rebuilt.args[position].value = value,
            None => rebuilt.args.push(Arg::named(name, value)),
        }
        rebuilt
    }
}

impl Arg {
    pub fn positional(value: Expr) -> Self {
        Self { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: Expr) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}
