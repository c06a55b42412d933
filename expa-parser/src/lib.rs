//! Parsing front-end for expa.
//!
//! This crate turns user input into the AST consumed by `expa-expand`. Input arrives in one of
//! two notations:
//!
//! - **linear notation**, e.g. `(x + 1)^2 (x - 2)`, which goes straight through the
//!   [`parser`]; and
//! - **LaTeX**, e.g. `\left(x+1\right)^2 \left(x-2\right)`, which is first rewritten into linear
//!   notation by the [`latex`] normalizer.
//!
//! The [`validate`] module contains cheap heuristic checks (bracket balance, character
//! whitelist, operator placement) that run before the parser to produce friendlier feedback for
//! obviously broken input. They are deliberately weaker than the grammar: anything they reject
//! would also fail to parse.

pub mod latex;
pub mod parser;
pub mod tokenizer;
pub mod validate;

use expa_error::Error;
use parser::{expr::Expr, Parser};

/// Parses a complete expression in linear notation.
pub fn parse(source: &str) -> Result<Expr, Error> {
    Parser::new(source).try_parse_full::<Expr>()
}

/// Normalizes a LaTeX expression and parses the result.
///
/// Errors produced by the normalizer point into `source`; errors produced by the parser point
/// into the normalized text. Callers that want to report parse errors against the normalized
/// string should call [`latex::normalize`] and [`parse`] separately.
pub fn parse_latex(source: &str) -> Result<Expr, Error> {
    let normalized = latex::normalize(source)?;
    parse(&normalized)
}
