//! Deparsing of expressions back to formula syntax.
//!
//! Printing is precedence-aware: operator calls come out infix with the
//! minimal parentheses needed to reparse to the same tree, everything else
//! as `head(arg, name = value)` call syntax.

use std::fmt;

use super::{Arg, Call, Expr};

const ADD_PREC: u8 = 1;
const MUL_PREC: u8 = 2;
const INTERACT_PREC: u8 = 3;
const NEG_PREC: u8 = 4;
const POW_PREC: u8 = 5;
const ATOM_PREC: u8 = 6;

/// Precedence of a binary operator symbol, `None` for non-operators.
fn binary_precedence(operator: &str) -> Option<u8> {
    match operator {
        "+" | "-" => Some(ADD_PREC),
        "*" | "/" => Some(MUL_PREC),
        ":" => Some(INTERACT_PREC),
        "^" => Some(POW_PREC),
        _ => None,
    }
}

impl Call {
    /// Views this call as a binary operator application, if it is one.
    fn as_binary(&self) -> Option<(&str, &Expr, &Expr)> {
        let operator = self.head_name()?;
        binary_precedence(operator)?;
        match self.args.as_slice() {
            [
                Arg { name: None, value: left },
                Arg { name: None, value: right },
            ] => Some((operator, left, right)),
            _ => None,
        }
    }

    /// Views this call as a unary minus, if it is one.
    fn as_unary_minus(&self) -> Option<&Expr> {
        if self.head_name() != Some("-") {
            return None;
        }
        match self.args.as_slice() {
            [Arg { name: None, value }] => Some(value),
            _ => None,
        }
    }
}

impl Expr {
    fn precedence(&self) -> u8 {
        let Expr::Call(call) = self else {
            return ATOM_PREC;
        };

        if let Some((operator, _, _)) = call.as_binary() {
            binary_precedence(operator).unwrap_or(ATOM_PREC)
        } else if call.as_unary_minus().is_some() {
            NEG_PREC
        } else {
            ATOM_PREC
        }
    }
}

fn write_child(f: &mut fmt::Formatter<'_>, child: &Expr, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({child})")
    } else {
        write!(f, "{child}")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Expr::Str(s) => write!(f, "\"{s}\""),
            Expr::Symbol(name) => write!(f, "{name}"),
            Expr::Call(call) => write!(f, "{call}"),
        }
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((operator, left, right)) = self.as_binary() {
            let my_prec = binary_precedence(operator).unwrap_or(ATOM_PREC);
            // `^` is right-associative, `-` and `/` are not associative;
            // the rest reparse identically without parentheses on ties.
            let (left_needs, right_needs) = match operator {
                "^" => (left.precedence() <= my_prec, right.precedence() < my_prec),
                "-" | "/" => (left.precedence() < my_prec, right.precedence() <= my_prec),
                _ => (left.precedence() < my_prec, right.precedence() < my_prec),
            };
            write_child(f, left, left_needs)?;
            // `:` and `^` deparse without surrounding spaces
            if matches!(operator, ":" | "^") {
                write!(f, "{operator}")?;
            } else {
                write!(f, " {operator} ")?;
            }
            return write_child(f, right, right_needs);
        }

        if let Some(operand) = self.as_unary_minus() {
            write!(f, "-")?;
            return write_child(f, operand, operand.precedence() < NEG_PREC);
        }

        write_child(f, &self.head, self.head.precedence() < ATOM_PREC)?;
        write!(f, "(")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name} = {}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}
