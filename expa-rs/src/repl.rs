//! The interactive mode, entered when no expression is given and stdin is a terminal.
//!
//! Each line is expanded on its own. A `latex:` prefix switches that line to LaTeX input, and a
//! `steps:` prefix prints the rewrite trace for that line; `exit` or `quit` leaves the loop.

use crate::cli::Cli;
use anyhow::Result;
use expa_expand::process;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub fn run(cli: &Cli) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    println!("expa: expression expander (type `exit` to leave)");

    fn process_line(rl: &mut DefaultEditor, cli: &Cli) -> Result<bool, ReadlineError> {
        let input = rl.readline("expa> ")?;
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Ok(true);
        }
        if trimmed == "exit" || trimmed == "quit" {
            return Ok(false);
        }
        rl.add_history_entry(&input)?;

        let (line, latex, steps) = if let Some(rest) = trimmed.strip_prefix("latex:") {
            (rest.trim(), true, cli.steps)
        } else if let Some(rest) = trimmed.strip_prefix("steps:") {
            (rest.trim(), cli.latex, true)
        } else {
            (trimmed, cli.latex, cli.steps)
        };

        match process(line, latex) {
            Ok(expansion) => {
                crate::print_expansion(&expansion, cli);
                if steps && !cli.steps {
                    for step in &expansion.steps {
                        println!("step : {step}");
                    }
                }
            },
            Err(err) => {
                if !latex {
                    crate::print_problems(line);
                }
                if let Err(io_err) = err.report_to_stderr("input") {
                    eprintln!("failed to write the error report: {io_err}");
                }
            },
        }

        Ok(true)
    }

    loop {
        match process_line(&mut rl, cli) {
            Ok(true) => {},
            Ok(false) => break,
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(err) => {
                eprintln!("{err}");
                break;
            },
        }
    }

    Ok(())
}
