use forma::parse::{parse_expr, parse_formula};
use forma::report::{Outcome, PrettyFormatter};
use forma::rewrite::{Target, find_matching_calls};

fn main() -> anyhow::Result<()> {
    let formula = parse_formula("price ~ color + cut(carat, breaks = c(0, 1, 2, 3, 4, 5))")?;
    let target = Target::exact("cut");

    let rewritten = formula.rewrite(&target, "breaks", parse_expr("c(0, 1, 3, 5)")?)?;

    let outcome = Outcome {
        original: formula.to_string(),
        rewritten: rewritten.to_string(),
        matches: find_matching_calls(&formula.rhs, &target).len(),
        changed: formula.to_string() != rewritten.to_string(),
    };
    println!("{}", PrettyFormatter::format(&[outcome]));

    Ok(())
}
