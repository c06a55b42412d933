use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Format};
use expa_expand::{process, Expansion};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod cli;
mod export;
mod repl;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!("error: {:#}", err);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("EXPA_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if let Some(expr) = cli.expr.clone() {
        return expand_one(&expr, &cli);
    }

    if let Some(file) = cli.batch.clone() {
        return run_batch(&file, &cli);
    }

    if io::stdin().is_terminal() {
        repl::run(&cli)
    } else {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("failed to read stdin")?;
        run_lines(input.lines(), &cli)
    }
}

/// Expands a single expression given on the command line.
fn expand_one(expr: &str, cli: &Cli) -> Result<()> {
    let expansion = match process(expr, cli.latex) {
        Ok(expansion) => expansion,
        Err(err) => {
            if !cli.latex {
                print_problems(expr);
            }
            err.report_to_stderr("input")
                .context("failed to write the error report")?;
            bail!("could not expand the expression");
        },
    };

    print_expansion(&expansion, cli);

    if let Some(path) = &cli.pdf {
        export::write_pdf(&expansion, path)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}

/// Expands every expression in the given file, one per line. A line that fails to expand is
/// reported but does not stop the remaining lines; the process exits nonzero if any line failed.
fn run_batch(path: &Path, cli: &Cli) -> Result<()> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    run_lines(content.lines(), cli)
}

fn run_lines<'a>(lines: impl Iterator<Item = &'a str>, cli: &Cli) -> Result<()> {
    let mut failures = 0usize;

    for (index, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match process(line, cli.latex) {
            Ok(expansion) => {
                println!("> {line}");
                print_expansion(&expansion, cli);
            },
            Err(err) => {
                failures += 1;
                eprintln!("line {}: could not expand `{}`", index + 1, line);
                if !cli.latex {
                    print_problems(line);
                }
                err.report_to_stderr("input")
                    .context("failed to write the error report")?;
            },
        }
    }

    if failures > 0 {
        bail!("{failures} line(s) could not be expanded");
    }
    Ok(())
}

/// Prints the heuristic pre-parse problems found in the input, if any.
pub(crate) fn print_problems(input: &str) {
    for problem in expa_parser::validate::check(input) {
        eprintln!("hint: {problem}");
    }
}

/// Prints one expansion according to the output options.
pub(crate) fn print_expansion(expansion: &Expansion, cli: &Cli) {
    match cli.format {
        Format::Text => println!("{}", expansion.text()),
        Format::Latex => println!("{}", expansion.latex()),
        Format::Both => {
            println!("text : {}", expansion.text());
            println!("latex: {}", expansion.latex());
        },
    }

    if cli.steps {
        for step in &expansion.steps {
            println!("step : {step}");
        }
    }

    if cli.report {
        let report = expansion.report();
        println!("terms: {}", report.term_count);
        match report.degree {
            Some(degree) => println!("degree: {degree}"),
            None => println!("degree: not a polynomial"),
        }
        println!("variables: {}", report.variables.join(", "));
    }
}
