//! Formula roots: a two-sided model description with an attached binding.

use std::fmt;

use super::{EnvRef, Expr};
use crate::error::RewriteError;
use crate::rewrite::{Target, rewrite_argument};

/// A model formula.
///
/// The response side is optional (`~ x + y` is a valid formula). The
/// attached [`EnvRef`] is metadata riding alongside the tree, not part of
/// it; every operation that rebuilds the tree carries it over unchanged.
#[derive(Clone, Debug, PartialEq)]
pub struct Formula {
    /// The response (left-hand) side
    pub lhs: Option<Expr>,
    /// The predictor (right-hand) side
    pub rhs: Expr,
    /// The binding used later to resolve variable names
    pub env: EnvRef,
}

impl Formula {
    pub fn new(lhs: Option<Expr>, rhs: Expr, env: EnvRef) -> Self {
        Self { lhs, rhs, env }
    }

    /// Rewrites the named argument of every call on either side whose head
    /// matches `target`, reattaching the same binding to the result.
    ///
    /// See [`rewrite_argument`] for the traversal contract.
    pub fn rewrite(
        &self,
        target: &Target,
        argument: &str,
        value: Expr,
    ) -> Result<Formula, RewriteError> {
        let lhs = self
            .lhs
            .as_ref()
            .map(|side| rewrite_argument(side, target, argument, &value))
            .transpose()?;
        let rhs = rewrite_argument(&self.rhs, target, argument, &value)?;

        Ok(Formula {
            lhs,
            rhs,
            env: self.env.clone(),
        })
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.lhs {
            Some(lhs) => write!(f, "{lhs} ~ {}", self.rhs),
            None => write!(f, "~{}", self.rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{parse_formula, parse_formula_in};

    #[test]
    fn display_two_sided() {
        let formula = parse_formula("price ~ color + clarity").unwrap();
        assert_eq!(formula.to_string(), "price ~ color + clarity");
    }

    #[test]
    fn display_one_sided() {
        let formula = parse_formula("~ color + clarity").unwrap();
        assert_eq!(formula.to_string(), "~color + clarity");
    }

    #[test]
    fn rewrite_preserves_the_binding() {
        let env = EnvRef::new("model_frame");
        let formula =
            parse_formula_in("price ~ color + cut(carat, breaks = c(0, 1))", env.clone()).unwrap();

        let rewritten = formula
            .rewrite(
                &Target::exact("cut"),
                "breaks",
                crate::parse::parse_expr("c(0, 2)").unwrap(),
            )
            .unwrap();

        assert!(rewritten.env.same_as(&env));
        assert_eq!(
            rewritten.to_string(),
            "price ~ color + cut(carat, breaks = c(0, 2))"
        );
    }

    #[test]
    fn rewrite_touches_both_sides() {
        let formula = parse_formula("log(price, base = 10) ~ log(carat, base = 10)").unwrap();
        let rewritten = formula
            .rewrite(
                &Target::exact("log"),
                "base",
                crate::parse::parse_expr("2").unwrap(),
            )
            .unwrap();
        assert_eq!(
            rewritten.to_string(),
            "log(price, base = 2) ~ log(carat, base = 2)"
        );
    }

    #[test]
    fn formulas_with_different_bindings_are_not_equal() {
        let a = parse_formula_in("price ~ carat", EnvRef::new("a")).unwrap();
        let b = parse_formula_in("price ~ carat", EnvRef::new("b")).unwrap();
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }
}
