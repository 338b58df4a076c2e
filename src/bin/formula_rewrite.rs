//! Binary for rewriting named call arguments inside model formulas.
//!
//! This binary:
//! 1. Reads one rewrite job from flags, or a list of jobs from a JSON file
//! 2. Parses each formula and the replacement value
//! 3. Rewrites the named argument of every call to the target function
//! 4. Prints the outcomes as a pretty table or CSV
//! 5. Optionally saves the outcomes as JSON

use anyhow::{Context, bail};
use clap::Parser;
use colored::Colorize;
use forma::parse::{parse_expr, parse_formula};
use forma::report::{CsvFormatter, Outcome, PrettyFormatter};
use forma::rewrite::{Target, find_matching_calls};
use forma::utils::json::{load_json, save_json};
use serde::Deserialize;
use std::path::PathBuf;

/// CLI arguments for formula rewriting
#[derive(Parser, Debug)]
#[command(author, version, about = "Rewrite a named argument of function calls inside model formulas", long_about = None)]
struct Args {
    /// Formula to rewrite, e.g. "price ~ color + cut(carat, breaks = c(0, 1, 2))"
    #[arg(short = 'f', long)]
    formula: Option<String>,

    /// Function name whose argument is replaced; comma-separated names form an allow-list
    #[arg(short = 't', long)]
    target: Option<String>,

    /// Name of the argument to set
    #[arg(short = 'a', long)]
    argument: Option<String>,

    /// Replacement value, parsed as an expression
    #[arg(short = 'v', long)]
    value: Option<String>,

    /// Path to a JSON file containing a list of rewrite jobs
    #[arg(short = 'b', long)]
    batch: Option<PathBuf>,

    /// Output format: "pretty" or "csv"
    #[arg(long, default_value = "pretty")]
    format: String,

    /// Write the outcomes as JSON to this path
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

/// One rewrite job as stored in a batch file
#[derive(Deserialize, Debug)]
struct RewriteJob {
    formula: String,
    target: String,
    argument: String,
    value: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let jobs = collect_jobs(&args)?;
    let mut outcomes = Vec::with_capacity(jobs.len());
    for job in &jobs {
        let outcome = run_job(job).with_context(|| format!("rewriting `{}`", job.formula))?;
        outcomes.push(outcome);
    }

    match args.format.as_str() {
        "pretty" => println!("{}", PrettyFormatter::format(&outcomes)),
        "csv" => print!("{}", CsvFormatter::format(&outcomes)),
        other => bail!("unknown format `{other}` (expected \"pretty\" or \"csv\")"),
    }

    if let Some(path) = &args.output {
        save_json(&outcomes, path)?;
        let message = format!("Saved {} outcome(s) to {}", outcomes.len(), path.display());
        println!("{}", message.green());
    }

    Ok(())
}

fn collect_jobs(args: &Args) -> anyhow::Result<Vec<RewriteJob>> {
    if let Some(path) = &args.batch {
        return load_json(path).with_context(|| format!("loading batch file {}", path.display()));
    }

    match (&args.formula, &args.target, &args.argument, &args.value) {
        (Some(formula), Some(target), Some(argument), Some(value)) => Ok(vec![RewriteJob {
            formula: formula.clone(),
            target: target.clone(),
            argument: argument.clone(),
            value: value.clone(),
        }]),
        _ => bail!("either --batch or all of --formula, --target, --argument and --value are required"),
    }
}

fn parse_target(raw: &str) -> Target {
    let names: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect();

    match names.as_slice() {
        [single] => Target::exact(*single),
        _ => Target::any_of(names),
    }
}

fn run_job(job: &RewriteJob) -> anyhow::Result<Outcome> {
    let formula = parse_formula(&job.formula)?;
    let target = parse_target(&job.target);
    let value = parse_expr(&job.value)?;

    let matches = find_matching_calls(&formula.rhs, &target).len()
        + formula
            .lhs
            .as_ref()
            .map_or(0, |lhs| find_matching_calls(lhs, &target).len());

    let rewritten = formula.rewrite(&target, &job.argument, value)?;

    let original = formula.to_string();
    let rewritten = rewritten.to_string();
    Ok(Outcome {
        changed: original != rewritten,
        original,
        rewritten,
        matches,
    })
}
