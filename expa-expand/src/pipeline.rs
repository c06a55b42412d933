//! The end-to-end expansion pipeline: source text in, expanded expression out.
//!
//! This is the one-call entry point shared by the command-line tool and the integration tests.
//! LaTeX input is normalized first, so errors may refer either to the original text (normalizer
//! errors) or to the normalized text (parse errors); [`PipelineError`] carries the text its
//! spans point into.

use crate::analysis::{self, ExpansionReport};
use crate::expand::expand_with;
use crate::expr::SymExpr;
use crate::fmt;
use crate::simplify::step::Step;
use expa_parser::latex;
use expa_parser::parser::error::Error;

/// The result of expanding one expression.
#[derive(Debug)]
pub struct Expansion {
    /// The text that was parsed: the input itself, or its normalized form for LaTeX input.
    pub source: String,

    /// The expression as parsed.
    pub input: SymExpr,

    /// The expanded expression.
    pub output: SymExpr,

    /// The rewrite rules that were applied, in order.
    pub steps: Vec<Step>,
}

impl Expansion {
    /// Renders the expanded expression as canonically-ordered linear text.
    pub fn text(&self) -> String {
        fmt::text(&self.output)
    }

    /// Renders the expanded expression as canonically-ordered LaTeX.
    pub fn latex(&self) -> String {
        fmt::latex(&self.output)
    }

    /// Summarizes the expansion.
    pub fn report(&self) -> ExpansionReport {
        analysis::report(&self.input)
    }
}

/// An error from the pipeline, bundled with the text its spans point into.
#[derive(Debug)]
pub struct PipelineError {
    /// The text the error spans refer to.
    pub source: String,

    /// The underlying error.
    pub error: Error,
}

impl PipelineError {
    /// Report this error to stderr as an `ariadne` report.
    pub fn report_to_stderr(&self, src_id: &str) -> std::io::Result<()> {
        self.error.report_to_stderr(src_id, &self.source)
    }
}

/// Parses and expands one expression.
///
/// When `latex_input` is true, the input is run through the LaTeX normalizer first.
pub fn process(input: &str, latex_input: bool) -> Result<Expansion, PipelineError> {
    let source = if latex_input {
        latex::normalize(input).map_err(|error| PipelineError {
            source: input.to_string(),
            error,
        })?
    } else {
        input.to_string()
    };

    let ast = expa_parser::parse(&source).map_err(|error| PipelineError {
        source: source.clone(),
        error,
    })?;

    let parsed = SymExpr::from(ast);
    let mut steps = Vec::new();
    let output = expand_with(&parsed, &mut steps);

    Ok(Expansion {
        source,
        input: parsed,
        output,
        steps,
    })
}
