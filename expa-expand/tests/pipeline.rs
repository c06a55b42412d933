//! End-to-end tests: source text in, rendered expansion out.

use expa_expand::pipeline::process;
use expa_expand::Step;
use pretty_assertions::assert_eq;

#[test]
fn expand_plain_text() {
    let expansion = process("(x + 1)^2", false).unwrap();
    assert_eq!(expansion.text(), "x^2 + 2 * x + 1");
    assert_eq!(expansion.latex(), "x^{2} + 2 x + 1");
}

#[test]
fn expand_product_of_binomials() {
    let expansion = process("(x + 1)^2 (x - 2)", false).unwrap();
    assert_eq!(expansion.text(), "x^3 - 3 * x - 2");
}

#[test]
fn expand_latex_input() {
    let expansion = process(r"\left(x+1\right)^{2}", true).unwrap();
    assert_eq!(expansion.source, "(x+1)^(2)");
    assert_eq!(expansion.text(), "x^2 + 2 * x + 1");
}

#[test]
fn expand_latex_fractions() {
    let expansion = process(r"\frac{x}{2} + \frac{x}{3}", true).unwrap();
    assert_eq!(expansion.text(), "5 * x / 6");
    assert_eq!(expansion.latex(), "\\frac{5 x}{6}");
}

#[test]
fn steps_trace_the_expansion() {
    let expansion = process("(x + 1)(x + 2)", false).unwrap();
    assert!(expansion.steps.contains(&Step::DistributiveProperty));
    assert!(expansion.steps.contains(&Step::CombineLikeTerms));
}

#[test]
fn report_summarizes_the_input() {
    let expansion = process("(x + y)^2", false).unwrap();
    let report = expansion.report();
    assert!(report.changed);
    assert_eq!(report.variables, vec!["x", "y"]);
    assert_eq!(report.degree, Some(2));
    assert_eq!(report.term_count, 3);
}

#[test]
fn parse_errors_carry_the_parsed_text() {
    let err = process("(x + 1", false).unwrap_err();
    assert_eq!(err.source, "(x + 1");
    assert!(err.error.fatal);
}

#[test]
fn unknown_latex_commands_are_rejected() {
    let err = process(r"\int_0^1 x", true).unwrap_err();
    // normalizer errors point into the original input
    assert_eq!(err.source, r"\int_0^1 x");
    assert_eq!(err.error.spans, vec![0..4]);
}
