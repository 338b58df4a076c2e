//! Parsing of formula syntax into expression trees.
//!
//! The surface syntax is the R-style model formula language: an optional
//! response, `~`, and a predictor expression built from operators, calls
//! with positional and named arguments, identifiers and literals.

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use thiserror::Error;

use crate::expr::{Arg, EnvRef, Expr, Formula};

#[derive(Parser)]
#[grammar = "parse/formula.pest"]
pub struct FormulaParser;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("syntax error: {0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),
    #[error("invalid number literal `{0}`")]
    Number(String),
    #[error("malformed parse tree: {0}")]
    Malformed(&'static str),
}

/// Parses a standalone expression, e.g. `c(0, 18.5, 100)`.
pub fn parse_expr(source: &str) -> Result<Expr, ParseError> {
    let mut pairs = FormulaParser::parse(Rule::expression, source).map_err(Box::new)?;
    let root = pairs
        .next()
        .ok_or(ParseError::Malformed("empty expression"))?;
    let inner = root
        .into_inner()
        .find(|pair| pair.as_rule() == Rule::expr)
        .ok_or(ParseError::Malformed("expression without a body"))?;
    build_expr(inner)
}

/// Parses a formula and attaches the global environment to it.
pub fn parse_formula(source: &str) -> Result<Formula, ParseError> {
    parse_formula_in(source, EnvRef::global())
}

/// Parses a formula and attaches the given environment to it.
pub fn parse_formula_in(source: &str, env: EnvRef) -> Result<Formula, ParseError> {
    let mut pairs = FormulaParser::parse(Rule::formula, source).map_err(Box::new)?;
    let root = pairs.next().ok_or(ParseError::Malformed("empty formula"))?;

    let mut lhs = None;
    let mut rhs = None;
    for pair in root.into_inner() {
        match pair.as_rule() {
            Rule::lhs => {
                let side = pair
                    .into_inner()
                    .next()
                    .ok_or(ParseError::Malformed("empty response side"))?;
                lhs = Some(build_expr(side)?);
            }
            Rule::expr => rhs = Some(build_expr(pair)?),
            Rule::EOI => {}
            _ => return Err(ParseError::Malformed("unexpected node in formula")),
        }
    }

    let rhs = rhs.ok_or(ParseError::Malformed("formula without a predictor side"))?;
    Ok(Formula::new(lhs, rhs, env))
}

fn build_expr(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    match pair.as_rule() {
        Rule::expr | Rule::term | Rule::interact => build_infix_chain(pair),
        Rule::unary => build_unary(pair),
        Rule::power => build_power(pair),
        Rule::primary => {
            let inner = pair
                .into_inner()
                .next()
                .ok_or(ParseError::Malformed("empty primary"))?;
            build_expr(inner)
        }
        Rule::call => build_call(pair),
        Rule::number => {
            let text = pair.as_str();
            text.parse::<f64>()
                .map(Expr::Number)
                .map_err(|_| ParseError::Number(text.to_string()))
        }
        Rule::string => {
            let text = pair.as_str();
            Ok(Expr::string(&text[1..text.len() - 1]))
        }
        Rule::ident => Ok(Expr::symbol(pair.as_str())),
        _ => Err(ParseError::Malformed("unexpected node in expression")),
    }
}

/// Folds `operand (op operand)*` into left-associated operator calls.
fn build_infix_chain(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    let mut inner = pair.into_inner();
    let first = inner
        .next()
        .ok_or(ParseError::Malformed("operator chain without operands"))?;
    let mut left = build_expr(first)?;

    while let Some(op) = inner.next() {
        let right = inner
            .next()
            .ok_or(ParseError::Malformed("operator without right operand"))?;
        left = Expr::binary(op.as_str(), left, build_expr(right)?);
    }

    Ok(left)
}

fn build_unary(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    let mut inner = pair.into_inner();
    let first = inner.next().ok_or(ParseError::Malformed("empty unary"))?;

    if first.as_rule() == Rule::neg_op {
        let operand = inner
            .next()
            .ok_or(ParseError::Malformed("`-` without operand"))?;
        Ok(Expr::call("-", vec![Arg::positional(build_expr(operand)?)]))
    } else {
        build_expr(first)
    }
}

fn build_power(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    let mut inner = pair.into_inner();
    let base = inner.next().ok_or(ParseError::Malformed("empty power"))?;
    let mut expr = build_expr(base)?;

    if let Some(op) = inner.next() {
        let exponent = inner
            .next()
            .ok_or(ParseError::Malformed("`^` without exponent"))?;
        expr = Expr::binary(op.as_str(), expr, build_expr(exponent)?);
    }

    Ok(expr)
}

fn build_call(pair: Pair<Rule>) -> Result<Expr, ParseError> {
    let mut inner = pair.into_inner();
    let head = inner.next().ok_or(ParseError::Malformed("call without head"))?;

    let mut args = Vec::new();
    if let Some(list) = inner.next() {
        for arg in list.into_inner() {
            let content = arg
                .into_inner()
                .next()
                .ok_or(ParseError::Malformed("empty argument"))?;
            match content.as_rule() {
                Rule::named_arg => {
                    let mut parts = content.into_inner();
                    let name = parts
                        .next()
                        .ok_or(ParseError::Malformed("named argument without name"))?;
                    let value = parts
                        .next()
                        .ok_or(ParseError::Malformed("named argument without value"))?;
                    args.push(Arg::named(name.as_str(), build_expr(value)?));
                }
                _ => args.push(Arg::positional(build_expr(content)?)),
            }
        }
    }

    Ok(Expr::call(head.as_str(), args))
}
