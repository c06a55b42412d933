//! CLI argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "expa")]
#[command(author, version, about = "Expand algebraic expressions", long_about = None)]
pub struct Cli {
    /// Expression to expand; without it, expa reads stdin or starts the REPL
    #[arg(short = 'e', long = "expr", value_name = "EXPR")]
    pub expr: Option<String>,

    /// Treat input as LaTeX
    #[arg(long)]
    pub latex: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "both")]
    pub format: Format,

    /// Print the rewrite rules applied during expansion
    #[arg(long)]
    pub steps: bool,

    /// Print the analysis report (degree, terms, variables)
    #[arg(long)]
    pub report: bool,

    /// Expand each line of FILE; blank lines and `#` comments are skipped
    #[arg(long, value_name = "FILE", conflicts_with = "expr")]
    pub batch: Option<PathBuf>,

    /// Compile the expansion to a PDF at PATH (requires -e and a pdflatex binary)
    #[arg(long, value_name = "PATH", requires = "expr")]
    pub pdf: Option<PathBuf>,

    /// Enable debug logging (the EXPA_LOG environment variable overrides this)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Canonically-ordered linear text
    Text,
    /// LaTeX math
    Latex,
    /// Both, labeled
    Both,
}
