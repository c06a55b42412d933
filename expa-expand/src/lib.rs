//! Symbolic expansion and simplification of algebraic expressions.
//!
//! This crate takes the AST produced by `expa-parser`, flattens it into the [`SymExpr`] sum-of-
//! products representation, and rewrites it with a small rule engine. The headline operation is
//! [`expand`], which distributes products and integer powers over sums and combines like terms,
//! turning `(x + 1)^2 (x - 2)` into `x^3 - 3x - 2`.
//!
//! The crate is organized as follows:
//!
//! - [`expr`] — the [`SymExpr`] representation and its strict-equality semantics;
//! - [`simplify`] — the rewrite rules and the fixpoint driver;
//! - [`expand`](mod@expand) — the expansion entry points;
//! - [`analysis`] — polynomial structure queries and the [`ExpansionReport`];
//! - [`fmt`] — canonical ordering, text and LaTeX rendering;
//! - [`pipeline`] — the one-call source-text-to-expansion entry point.

pub mod analysis;
pub mod expand;
pub mod expr;
pub mod fmt;
pub mod pipeline;
pub mod primitive;
pub mod simplify;
pub mod step_collector;

pub use analysis::{report, ExpansionReport};
pub use expand::{expand, expand_with_steps};
pub use expr::{Primary, SymExpr};
pub use fmt::Latex;
pub use pipeline::{process, Expansion, PipelineError};
pub use simplify::{simplify, simplify_with_steps, step::Step};
