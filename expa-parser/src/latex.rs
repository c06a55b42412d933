//! Rewrites a small algebraic subset of LaTeX into linear notation.
//!
//! The normalizer is intentionally textual: it does not parse LaTeX, it rewrites it with a fixed
//! set of regex passes until the result stops changing, then hands the result to the ordinary
//! [`parser`](crate::parser). Structural commands (`\frac`, `\sqrt`, braced exponents) are
//! rewritten innermost-first, so nested input like `\frac{x^{2}}{y}` converges after a few
//! passes.
//!
//! Any backslash command left over after all passes is reported as an error rather than silently
//! dropped.

use crate::parser::error::{kind, Error};
use once_cell::sync::Lazy;
use regex::Regex;

/// `\frac{A}{B}`, where neither `A` nor `B` contains further braces.
static FRAC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\frac\s*\{([^{}]*)\}\s*\{([^{}]*)\}").unwrap()
});

/// `\sqrt{A}`, where `A` contains no further braces.
static SQRT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\sqrt\s*\{([^{}]*)\}").unwrap()
});

/// `^{A}`, where `A` contains no further braces.
static BRACED_EXP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\^\s*\{([^{}]*)\}").unwrap()
});

/// Any backslash command, including a lone trailing backslash. Whitespace separating the command
/// from its operand is part of the match, so that `2\cdot x` rewrites to `2*x` rather than `2* x`.
static COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\[a-zA-Z]*\s*").unwrap()
});

/// Replacements for the simple, non-structural commands. The spelled-out constants are padded
/// with spaces so that `2\pi r` keeps its token boundaries after rewriting.
fn replace_command(name: &str) -> Option<&'static str> {
    match name {
        r"\left" | r"\right" => Some(""),
        r"\cdot" | r"\times" => Some("*"),
        r"\div" => Some("/"),
        r"\pi" => Some(" pi "),
        r"\infty" => Some(" inf "),
        _ => None,
    }
}

/// Rewrites a LaTeX expression into linear notation.
///
/// Returns an error pointing into `source` if the input uses a LaTeX command outside the
/// supported algebraic subset.
pub fn normalize(source: &str) -> Result<String, Error> {
    let mut result = source.to_string();

    // structural passes run together until a fixed point, since each one can expose new matches
    // for the others (`\frac{x^{2}}{y}` only matches FRAC once the exponent is rewritten)
    loop {
        let before = result.clone();

        result = FRAC.replace_all(&result, "($1)/($2)").into_owned();
        result = SQRT.replace_all(&result, "sqrt($1)").into_owned();
        result = BRACED_EXP.replace_all(&result, "^($1)").into_owned();

        if result == before {
            break;
        }
    }

    // every remaining command must be one of the simple substitutions; anything else (including
    // `\frac` or `\sqrt` that the structural passes could not consume) is an error
    if let Some(found) = COMMAND
        .find_iter(&result)
        .find(|found| replace_command(found.as_str().trim_end()).is_none())
    {
        let command = found.as_str().trim_end().to_string();
        // the match position is in the rewritten text; report the command where it appears in
        // the input, matching on the full command name so `\sq` is not pinned to an earlier
        // `\sqrt`
        let span = COMMAND
            .find_iter(source)
            .find(|candidate| candidate.as_str().trim_end() == command)
            .map_or(0..source.len(), |found| found.start()..found.start() + command.len());
        return Err(Error::new(vec![span], kind::UnknownLatexCommand { command }));
    }
    result = COMMAND
        .replace_all(&result, |caps: &regex::Captures| {
            // unknown commands were rejected above
            replace_command(caps[0].trim_end()).unwrap()
        })
        .into_owned();

    // leftover grouping braces (e.g. from `\left\{`-less input such as `2{x+1}`) act as plain
    // parentheses
    let result = result.replace('{', "(").replace('}', ")");

    tracing::debug!(source, normalized = %result, "normalized latex input");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn frac() {
        assert_eq!(normalize(r"\frac{x+1}{2}").unwrap(), "(x+1)/(2)");
    }

    #[test]
    fn nested_frac() {
        assert_eq!(normalize(r"\frac{\frac{1}{2}}{3}").unwrap(), "((1)/(2))/(3)");
    }

    #[test]
    fn frac_with_braced_exponent() {
        assert_eq!(normalize(r"\frac{x^{2}}{y}").unwrap(), "(x^(2))/(y)");
    }

    #[test]
    fn left_right_delimiters() {
        assert_eq!(normalize(r"\left(x+1\right)^{2}").unwrap(), "(x+1)^(2)");
    }

    #[test]
    fn sqrt() {
        assert_eq!(normalize(r"\sqrt{x+1}").unwrap(), "sqrt(x+1)");
    }

    #[test]
    fn multiplication_signs() {
        assert_eq!(normalize(r"2\cdot x\times y").unwrap(), "2*x*y");
    }

    #[test]
    fn division_sign() {
        assert_eq!(normalize(r"6\div 2").unwrap(), "6/2");
    }

    #[test]
    fn constants_keep_token_boundaries() {
        assert_eq!(normalize(r"2\pi r").unwrap(), "2 pi r");
    }

    #[test]
    fn unknown_command() {
        let err = normalize(r"\int_0^1 x").unwrap_err();
        assert!(!err.fatal);
        assert_eq!(err.spans, vec![0..4]);
    }

    #[test]
    fn unknown_command_span_points_at_the_command() {
        // `\sq` is a prefix of the legitimate `\sqrt` before it; the span must not land there
        let err = normalize(r"\sqrt{x} + \sq").unwrap_err();
        assert_eq!(err.spans, vec![11..14]);
    }

    #[test]
    fn unsupported_sqrt_index_is_rejected() {
        assert!(normalize(r"\sqrt[3]{x}").is_err());
    }

    #[test]
    fn plain_input_passes_through() {
        assert_eq!(normalize("(x+1)(x-2)").unwrap(), "(x+1)(x-2)");
    }
}
