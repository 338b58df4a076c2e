use serde::{Deserialize, Serialize};

use super::Expr;

/// Owned path to a subexpression in an expression tree.
///
/// Each element indexes into the children of a node: 0 is the call head,
/// 1.. are the argument values in order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedPath(Vec<usize>);

impl OwnedPath {
    pub fn as_path(&self) -> Path<'_> {
        Path(&self.0)
    }

    /// Returns the child path of this path
    pub fn child(&self) -> Path<'_> {
        self.as_path().child()
    }

    /// Returns the first element on the path, or `None` if the path is empty
    pub fn head(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// Adds a new position at the end of the path
    pub fn push(&mut self, location: usize) {
        self.0.push(location)
    }

    /// Removes the last position from the path
    pub fn pop(&mut self) -> Option<usize> {
        self.0.pop()
    }

    /// Splits off the last position, returning the path to the parent node
    /// and the index under it. `None` for the root path.
    pub fn parent(&self) -> Option<(Path<'_>, usize)> {
        let (last, rest) = self.0.split_last()?;
        Some((Path(rest), *last))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for OwnedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, location) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{location}")?;
        }
        write!(f, "]")
    }
}

/// Path to a subexpression in an expression
#[derive(Clone, Debug, PartialEq)]
pub struct Path<'p>(&'p [usize]);

impl<'p> Path<'p> {
    /// Returns the child path of this path
    pub fn child(&self) -> Self {
        Path(&self.0[1..])
    }

    /// Returns the first element on the path, or `None` if the path is empty
    pub fn head(&self) -> Option<usize> {
        self.0.first().copied()
    }
}

/// Depth-first, pre-order iterator over the paths of all subexpressions,
/// starting with the root path.
#[derive(Clone, Debug)]
pub struct SubexpressionPathIterator<'e> {
    stack: Vec<(OwnedPath, &'e Expr)>,
}

impl<'e> SubexpressionPathIterator<'e> {
    pub fn new(expression: &'e Expr) -> Self {
        Self {
            stack: vec![(OwnedPath::default(), expression)],
        }
    }
}

impl<'e> Iterator for SubexpressionPathIterator<'e> {
    type Item = OwnedPath;

    fn next(&mut self) -> Option<Self::Item> {
        let (path, expression) = self.stack.pop()?;

        if let Some(children) = expression.children() {
            for (location, child) in children.iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(location);
                self.stack.push((child_path, child));
            }
        }

        Some(path)
    }
}
