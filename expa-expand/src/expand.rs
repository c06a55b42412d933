//! Expansion of algebraic expressions.
//!
//! Expansion applies the full rule set: the combining rules plus the distribution rules. The
//! result is a flat sum of products with like terms combined, e.g. `(x + 1)^2` becomes
//! `x^2 + 2x + 1`. Expansion is idempotent: expanding an already-expanded expression returns it
//! unchanged.

use crate::expr::SymExpr;
use crate::simplify::{rewrite_fixpoint, rules, step::Step};
use crate::step_collector::StepCollector;

/// Expands the expression into a flat sum of products.
pub fn expand(expr: &SymExpr) -> SymExpr {
    expand_with(expr, &mut ())
}

/// Expands the expression into a flat sum of products, reporting the rules that were applied to
/// the given step collector.
pub fn expand_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    let result = rewrite_fixpoint(expr, rules::all, step_collector);
    tracing::debug!(input = %expr, output = %result, "expanded expression");
    result
}

/// Expands the expression, returning the expanded expression and the rules that were applied.
pub fn expand_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let result = expand_with(expr, &mut steps);
    (result, steps)
}

#[cfg(test)]
mod tests {
    use expa_parser::parser::{expr::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse and expand the given expression.
    fn expand_str(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        expand(&SymExpr::from(expr))
    }

    #[test]
    fn binomial_product() {
        assert_eq!(expand_str("(x + 1)(x + 2)"), expand_str("x^2 + 3x + 2"));
    }

    #[test]
    fn binomial_square() {
        assert_eq!(expand_str("(x + 1)^2"), expand_str("x^2 + 2x + 1"));
    }

    #[test]
    fn binomial_cube() {
        assert_eq!(expand_str("(x + 1)^3"), expand_str("x^3 + 3x^2 + 3x + 1"));
    }

    #[test]
    fn difference_of_squares() {
        assert_eq!(expand_str("(x + y)(x - y)"), expand_str("x^2 - y^2"));
    }

    #[test]
    fn distribute_monomial() {
        assert_eq!(expand_str("2x(x + 3)"), expand_str("2x^2 + 6x"));
    }

    #[test]
    fn multivariate() {
        assert_eq!(expand_str("(a + b)(c + d)"), expand_str("ac + ad + bc + bd"));
    }

    #[test]
    fn nested_parentheses() {
        assert_eq!(expand_str("((x + 1)(x - 1) + 1) * x"), expand_str("x^3"));
    }

    #[test]
    fn expanded_sums_are_flat() {
        let expr = expand_str("(x + 1)^2 + (x + 2)^2");
        let SymExpr::Add(terms) = &expr else {
            panic!("expected a sum");
        };
        assert!(terms.iter().all(|term| !matches!(term, SymExpr::Add(_))));
        assert_eq!(expr, expand_str("2x^2 + 6x + 5"));
    }

    #[test]
    fn expansion_is_idempotent() {
        let once = expand_str("(x + 2)^3 (x - 1)");
        let twice = expand(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn already_expanded_input_is_unchanged() {
        assert_eq!(expand_str("x^2 + 2x + 1"), expand_str("x^2 + 2x + 1"));
    }

    #[test]
    fn opaque_calls_are_preserved() {
        // sqrt(x + 1) is not a polynomial; it is carried through untouched
        let expanded = expand_str("2(sqrt(x + 1) + 3)");
        assert_eq!(expanded, expand_str("2 sqrt(x + 1) + 6"));
    }

    #[test]
    fn steps_mention_distribution() {
        let expr = Parser::new("(x + 1)(x + 2)").try_parse_full::<AstExpr>().unwrap();
        let (_, steps) = expand_with_steps(&SymExpr::from(expr));
        assert!(steps.contains(&crate::simplify::step::Step::DistributiveProperty));
    }
}
