//! Simplification of algebraic expressions.
//!
//! Simplification works by repeatedly applying rewrite rules to the expression until no more
//! rules apply. Each pass walks the tree bottom-up: the children of a node are rewritten first,
//! then the rules are applied to the node itself. The functions here only ever apply the
//! **combining** rules, which never distribute products over sums, so the overall shape of the
//! input (factored or expanded) is preserved. Use [`expand`](crate::expand::expand) to normalize
//! an expression into a flat sum of products.

pub mod fraction;
pub mod rules;
pub mod step;

use crate::expr::{Primary, SymExpr};
use crate::step_collector::StepCollector;
use step::Step;

/// A set of rewrite rules, applied as one unit.
pub(crate) type Rules = fn(&SymExpr, &mut dyn StepCollector<Step>) -> Option<SymExpr>;

/// Rewrite passes are repeated until the expression stops changing; a cycling rule set would
/// otherwise loop forever. The rules are designed to terminate, so reaching this limit is a bug.
const MAX_PASSES: usize = 1_000;

/// Walks the expression bottom-up once, applying the given rules to every node.
///
/// Returns the rewritten expression, and whether any rule applied anywhere in the tree.
fn rewrite_pass(
    expr: &SymExpr,
    rules: Rules,
    step_collector: &mut dyn StepCollector<Step>,
) -> (SymExpr, bool) {
    let mut changed = false;

    // rewrite the children first, so the rules see normalized operands
    let mut expr = match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            let args = args.iter()
                .map(|arg| {
                    let (arg, arg_changed) = rewrite_pass(arg, rules, step_collector);
                    changed |= arg_changed;
                    arg
                })
                .collect();
            SymExpr::Primary(Primary::Call(name.clone(), args))
        },
        SymExpr::Primary(primary) => SymExpr::Primary(primary.clone()),
        SymExpr::Add(terms) => {
            // rebuild through `+=`, so a term that was rewritten into a sum (e.g. by the
            // distribution rules) is spliced in flat instead of nesting an `Add` inside an `Add`
            let mut sum = SymExpr::Add(Vec::with_capacity(terms.len()));
            for term in terms {
                let (term, term_changed) = rewrite_pass(term, rules, step_collector);
                changed |= term_changed;
                sum += term;
            }
            sum
        },
        SymExpr::Mul(factors) => {
            // same as above: `*=` splices factors that were rewritten into products
            let mut product = SymExpr::Mul(Vec::with_capacity(factors.len()));
            for factor in factors {
                let (factor, factor_changed) = rewrite_pass(factor, rules, step_collector);
                changed |= factor_changed;
                product *= factor;
            }
            product
        },
        SymExpr::Exp(lhs, rhs) => {
            let (lhs, lhs_changed) = rewrite_pass(lhs, rules, step_collector);
            let (rhs, rhs_changed) = rewrite_pass(rhs, rules, step_collector);
            changed |= lhs_changed || rhs_changed;
            SymExpr::Exp(Box::new(lhs), Box::new(rhs))
        },
    };

    let mut applications = 0;
    while let Some(new_expr) = rules(&expr, step_collector) {
        expr = new_expr;
        changed = true;

        applications += 1;
        if applications == MAX_PASSES {
            tracing::warn!(%expr, "rules kept applying to one node after {MAX_PASSES} rewrites");
            break;
        }
    }

    (expr, changed)
}

/// Repeatedly applies the given rules to the expression until a full pass leaves it unchanged.
pub(crate) fn rewrite_fixpoint(
    expr: &SymExpr,
    rules: Rules,
    step_collector: &mut dyn StepCollector<Step>,
) -> SymExpr {
    let mut expr = expr.clone();

    for _ in 0..MAX_PASSES {
        let (new_expr, changed) = rewrite_pass(&expr, rules, step_collector);
        expr = new_expr;
        if !changed {
            return expr;
        }
    }

    tracing::warn!(%expr, "rewriting did not converge after {MAX_PASSES} passes");
    expr
}

/// Simplifies the expression, using the combining rules only.
pub fn simplify(expr: &SymExpr) -> SymExpr {
    simplify_with(expr, &mut ())
}

/// Simplifies the expression, using the combining rules only, reporting the rules that were
/// applied to the given step collector.
pub fn simplify_with(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> SymExpr {
    rewrite_fixpoint(expr, rules::combining, step_collector)
}

/// Simplifies the expression, returning the simplified expression and the rules that were
/// applied.
pub fn simplify_with_steps(expr: &SymExpr) -> (SymExpr, Vec<Step>) {
    let mut steps = Vec::new();
    let result = simplify_with(expr, &mut steps);
    (result, steps)
}

#[cfg(test)]
mod tests {
    use crate::expr::SymExpr;
    use expa_parser::parser::{expr::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse and simplify the given expression.
    fn simplify_str(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        simplify(&SymExpr::from(expr))
    }

    #[test]
    fn combine_like_terms() {
        assert_eq!(simplify_str("2x + 3x"), simplify_str("5x"));
    }

    #[test]
    fn combine_like_factors() {
        assert_eq!(simplify_str("x^2 * x^3"), simplify_str("x^5"));
    }

    #[test]
    fn add_and_multiply_identities() {
        assert_eq!(simplify_str("0 + x * 1"), simplify_str("x"));
        assert_eq!(simplify_str("0 * (x + y)"), simplify_str("0"));
    }

    #[test]
    fn reduce_fraction() {
        assert_eq!(simplify_str("3/12"), simplify_str("1/4"));
        assert_eq!(simplify_str("12/3"), simplify_str("4"));
    }

    #[test]
    fn fractional_coefficients() {
        // 1/2 x + 1/3 x = 5/6 x
        assert_eq!(simplify_str("x/2 + x/3"), simplify_str("5x/6"));
    }

    #[test]
    fn mixed_numeric_terms_fold_to_float() {
        use crate::expr::Primary;
        assert_eq!(simplify_str("1 + 0.5"), SymExpr::Primary(Primary::Float(1.5)));
        assert_eq!(simplify_str("0.5 + 1/4"), SymExpr::Primary(Primary::Float(0.75)));
    }

    #[test]
    fn simplify_preserves_factored_form() {
        // the combining rules never distribute
        let expr = simplify_str("(x + 1)(x + 2)");
        assert_eq!(expr, simplify_str("(x + 2)(x + 1)"));
        assert!(matches!(expr, SymExpr::Mul(_)));
    }

    #[test]
    fn steps_are_collected() {
        let expr = Parser::new("2x + 3x + 0").try_parse_full::<AstExpr>().unwrap();
        let (_, steps) = simplify_with_steps(&SymExpr::from(expr));
        assert!(steps.contains(&Step::AddZero));
        assert!(steps.contains(&Step::CombineLikeTerms));
    }
}
