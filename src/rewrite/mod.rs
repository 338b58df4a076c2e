//! Argument rewriting for calls inside expression trees.
//!
//! The rewrite walks a tree depth-first and, on every call whose head
//! matches a [`Target`], sets one named argument to a new value. Matched
//! calls are terminal: the rewrite does not descend into their arguments,
//! so a matching call nested inside another match is left to the outer
//! one. Everything else is rebuilt unchanged, and the input tree is never
//! mutated.

pub mod target;

pub use target::Target;

use crate::error::RewriteError;
use crate::expr::{Arg, Call, Expr, OwnedPath};

/// Replaces the named argument of every call whose head matches `target`.
///
/// The argument is overwritten in place when present and appended when
/// absent; all other arguments keep their names, values and order. If
/// `target` matches no call head the result is structurally equal to the
/// input.
///
/// # Errors
///
/// [`RewriteError::InvalidExpression`] when the input tree is malformed,
/// and [`RewriteError::AmbiguousTarget`] when `target` also matches a
/// plain variable somewhere in the tree, since rewriting would then rest
/// on a name collision the caller probably did not intend. No partial
/// result is returned in either case.
pub fn rewrite_argument(
    expr: &Expr,
    target: &Target,
    argument: &str,
    value: &Expr,
) -> Result<Expr, RewriteError> {
    expr.check_well_formed()?;
    value.check_well_formed()?;

    if let Some((name, path)) = find_shadowing_symbol(expr, target) {
        return Err(RewriteError::AmbiguousTarget { name, path });
    }

    Ok(replace(expr, target, argument, value))
}

fn replace(expr: &Expr, target: &Target, argument: &str, value: &Expr) -> Expr {
    let Expr::Call(call) = expr else {
        return expr.clone();
    };

    if call.head_name().is_some_and(|head| target.matches(head)) {
        return Expr::Call(call.with_argument(argument, value.clone()));
    }

    Expr::Call(Call {
        head: Box::new(replace(&call.head, target, argument, value)),
        args: call
            .args
            .iter()
            .map(|arg| Arg {
                name: arg.name.clone(),
                value: replace(&arg.value, target, argument, value),
            })
            .collect(),
    })
}

/// Paths of the calls [`rewrite_argument`] would modify, in traversal order.
///
/// Mirrors the rewrite semantics: matched calls are terminal, so calls
/// nested inside a match are not reported.
pub fn find_matching_calls(expr: &Expr, target: &Target) -> Vec<OwnedPath> {
    let mut found = Vec::new();
    collect_matches(expr, target, &mut OwnedPath::default(), &mut found);
    found
}

fn collect_matches(
    expr: &Expr,
    target: &Target,
    path: &mut OwnedPath,
    found: &mut Vec<OwnedPath>,
) {
    let Expr::Call(call) = expr else {
        return;
    };

    if call.head_name().is_some_and(|head| target.matches(head)) {
        found.push(path.clone());
        return;
    }

    if let Some(children) = expr.children() {
        for (location, child) in children.iter().enumerate() {
            path.push(location);
            collect_matches(child, target, path, found);
            path.pop();
        }
    }
}

/// Finds a symbol leaf outside head position whose name matches `target`.
fn find_shadowing_symbol(expr: &Expr, target: &Target) -> Option<(String, OwnedPath)> {
    for path in expr.iter_paths() {
        let Some(sub) = expr.subexpression(path.as_path()) else {
            continue;
        };
        if let Expr::Symbol(name) = sub
            && target.matches(name)
            && !is_head_position(expr, &path)
        {
            return Some((name.clone(), path));
        }
    }
    None
}

fn is_head_position(root: &Expr, path: &OwnedPath) -> bool {
    match path.parent() {
        Some((parent, location)) => {
            location == 0 && matches!(root.subexpression(parent), Some(Expr::Call(_)))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::EnvRef;
    use crate::parse::{parse_expr, parse_formula_in};

    fn expr(source: &str) -> Expr {
        parse_expr(source).unwrap()
    }

    fn rewrite(source: &str, target: &str, argument: &str, value: &str) -> Expr {
        rewrite_argument(
            &expr(source),
            &Target::exact(target),
            argument,
            &expr(value),
        )
        .unwrap()
    }

    #[test]
    fn identity_when_nothing_matches() {
        let original = expr("color + log(carat, base = 10)");
        let rewritten =
            rewrite_argument(&original, &Target::exact("cut"), "breaks", &expr("c(0, 1)")).unwrap();
        assert_eq!(rewritten, original);
    }

    #[test]
    fn leaves_pass_through_unchanged() {
        for source in ["carat", "3.5", "\"Ideal\""] {
            assert_eq!(rewrite(source, "cut", "breaks", "1"), expr(source));
        }
    }

    #[test]
    fn replaces_an_existing_argument() {
        assert_eq!(
            rewrite("f(x, a = 1, b = 2)", "f", "a", "2"),
            expr("f(x, a = 2, b = 2)")
        );
    }

    #[test]
    fn inserts_a_missing_argument_after_existing_ones() {
        assert_eq!(rewrite("f(x, b = 2)", "f", "a", "5"), expr("f(x, b = 2, a = 5)"));
    }

    #[test]
    fn rewrites_every_independent_match() {
        assert_eq!(
            rewrite("f(x, a = 1) + g(f(y, a = 1))", "f", "a", "9"),
            expr("f(x, a = 9) + g(f(y, a = 9))")
        );
    }

    #[test]
    fn matched_calls_are_terminal() {
        // The outer `f` is rewritten; the `f` inside its own arguments is not.
        assert_eq!(
            rewrite("f(f(x, a = 1), b = 2)", "f", "a", "9"),
            expr("f(f(x, a = 1), b = 2, a = 9)")
        );
    }

    #[test]
    fn untouched_siblings_are_byte_identical() {
        let original = expr("price + color + cut(carat, breaks = c(0, 1))");
        let rewritten = rewrite_argument(
            &original,
            &Target::exact("cut"),
            "breaks",
            &expr("c(0, 2)"),
        )
        .unwrap();
        assert_eq!(
            rewritten.to_string(),
            "price + color + cut(carat, breaks = c(0, 2))"
        );
        // input untouched
        assert_eq!(
            original.to_string(),
            "price + color + cut(carat, breaks = c(0, 1))"
        );
    }

    #[test]
    fn diamonds_breaks_scenario() {
        let env = EnvRef::new("diamonds_fit");
        let formula = parse_formula_in(
            "price ~ color + cut(carat, breaks = c(0, 1, 2, 3, 4, 5))",
            env.clone(),
        )
        .unwrap();

        let rewritten = formula
            .rewrite(&Target::exact("cut"), "breaks", expr("c(0, 1, 3, 5)"))
            .unwrap();

        assert_eq!(
            rewritten.to_string(),
            "price ~ color + cut(carat, breaks = c(0, 1, 3, 5))"
        );
        assert_eq!(rewritten.lhs, Some(expr("price")));
        assert!(rewritten.env.same_as(&env));
    }

    #[test]
    fn allow_list_targets() {
        assert_eq!(
            rewrite_argument(
                &expr("cut(x) + bin(y) + log(z)"),
                &Target::any_of(["cut", "bin"]),
                "breaks",
                &expr("5"),
            )
            .unwrap(),
            expr("cut(x, breaks = 5) + bin(y, breaks = 5) + log(z)")
        );
    }

    #[test]
    fn find_matching_calls_reports_rewritten_paths() {
        let e = expr("cut(x) + cut(y)");
        let paths = find_matching_calls(&e, &Target::exact("cut"));
        assert_eq!(paths.len(), 2);
        for path in &paths {
            let Some(Expr::Call(call)) = e.subexpression(path.as_path()) else {
                panic!("path does not lead to a call");
            };
            assert_eq!(call.head_name(), Some("cut"));
        }
    }

    #[test]
    fn find_matching_calls_skips_nested_matches() {
        let e = expr("f(f(x))");
        assert_eq!(find_matching_calls(&e, &Target::exact("f")).len(), 1);
    }

    #[test]
    fn shadowed_target_name_is_ambiguous() {
        // `cut` appears both as a call head and as a plain variable.
        let result = rewrite_argument(
            &expr("cut + cut(carat)"),
            &Target::exact("cut"),
            "breaks",
            &expr("1"),
        );
        let Err(RewriteError::AmbiguousTarget { name, path }) = result else {
            panic!("expected an ambiguity error");
        };
        assert_eq!(name, "cut");
        assert_eq!(path.to_string(), "[1]");
    }

    #[test]
    fn malformed_input_is_rejected() {
        let bad = Expr::Call(Call {
            head: Box::new(Expr::number(1.0)),
            args: vec![Arg::positional(Expr::symbol("x"))],
        });
        assert!(matches!(
            rewrite_argument(&bad, &Target::exact("f"), "a", &Expr::number(1.0)),
            Err(RewriteError::InvalidExpression { .. })
        ));
    }

    mod random_trees {
        use super::*;
        use rand::Rng;

        const HEADS: [&str; 4] = ["log", "scale", "poly", "c"];
        const NAMES: [&str; 4] = ["carat", "depth", "table", "price"];
        const ARG_NAMES: [&str; 2] = ["base", "degree"];

        fn random_expr(rng: &mut impl Rng, depth: usize) -> Expr {
            if depth == 0 || rng.gen_bool(0.3) {
                return if rng.gen_bool(0.5) {
                    Expr::number(rng.gen_range(0..100) as f64)
                } else {
                    Expr::symbol(NAMES[rng.gen_range(0..NAMES.len())])
                };
            }

            let head = HEADS[rng.gen_range(0..HEADS.len())];
            let args = (0..rng.gen_range(1..4))
                .map(|_| {
                    let value = random_expr(rng, depth - 1);
                    if rng.gen_bool(0.3) {
                        Arg::named(ARG_NAMES[rng.gen_range(0..ARG_NAMES.len())], value)
                    } else {
                        Arg::positional(value)
                    }
                })
                .collect();
            Expr::call(head, args)
        }

        #[test]
        fn rewrite_without_matches_is_the_identity() {
            let mut rng = rand::thread_rng();
            let target = Target::exact("cut");

            for _ in 0..100 {
                let original = random_expr(&mut rng, 4);
                let rewritten =
                    rewrite_argument(&original, &target, "breaks", &Expr::number(1.0)).unwrap();
                assert_eq!(rewritten, original);
            }
        }

        #[test]
        fn rewritten_trees_deparse_and_reparse() {
            let mut rng = rand::thread_rng();
            let target = Target::exact("log");

            for _ in 0..100 {
                let original = random_expr(&mut rng, 4);
                let rewritten =
                    rewrite_argument(&original, &target, "base", &Expr::number(2.0)).unwrap();
                let reparsed = parse_expr(&rewritten.to_string()).unwrap();
                assert_eq!(reparsed, rewritten);
            }
        }
    }
}
