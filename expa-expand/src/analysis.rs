//! Polynomial analysis of expressions.
//!
//! These functions inspect an expression (usually after [`expand`]) and answer questions about
//! its polynomial structure: which variables appear, the total degree, how many terms it has, and
//! how its terms group by a chosen set of variables. Expressions containing function calls or
//! symbolic exponents are not polynomials; degree queries return [`None`] for them.

use crate::expand::expand;
use crate::expr::{Primary, SymExpr};
use crate::simplify::simplify;
use num_traits::{Signed, ToPrimitive};
use std::collections::BTreeSet;

/// Returns every symbol appearing anywhere in the expression, sorted and deduplicated.
///
/// Constants like `pi` are symbols too, and are included.
pub fn free_symbols(expr: &SymExpr) -> Vec<String> {
    let symbols: BTreeSet<&str> = expr.nodes()
        .filter_map(|node| node.as_symbol())
        .collect();
    symbols.into_iter().map(String::from).collect()
}

/// Returns the number of top-level terms in the expression.
pub fn term_count(expr: &SymExpr) -> usize {
    match expr {
        SymExpr::Add(terms) => terms.len(),
        _ => 1,
    }
}

/// Returns the degree of a single term (a monomial), or [`None`] if the term is not a monomial.
///
/// Numbers have degree 0, symbols degree 1, and `x^n` degree `n` for non-negative integer `n`.
/// Integer reciprocals (`6^-1`, the canonical form of a fraction) count as numeric factors of
/// degree 0. Function calls, symbolic exponents, and nested sums make the term non-polynomial.
pub fn monomial_degree(expr: &SymExpr) -> Option<u64> {
    match expr {
        SymExpr::Primary(Primary::Integer(_)) | SymExpr::Primary(Primary::Float(_)) => Some(0),
        SymExpr::Primary(Primary::Symbol(_)) => Some(1),
        SymExpr::Primary(Primary::Call(..)) => None,
        SymExpr::Mul(factors) => factors.iter().map(monomial_degree).sum::<Option<u64>>(),
        SymExpr::Exp(base, exp) => {
            let exp = exp.as_integer()?;
            if base.is_integer() {
                // a numeric factor, e.g. the 6^-1 in 5x/6
                Some(0)
            } else if base.as_symbol().is_some() && !exp.is_negative() {
                exp.to_u64()
            } else {
                None
            }
        },
        SymExpr::Add(_) => None,
    }
}

/// Returns the total degree of the expression, or [`None`] if it is not a polynomial.
pub fn total_degree(expr: &SymExpr) -> Option<u64> {
    match expr {
        SymExpr::Add(terms) => terms.iter()
            .map(monomial_degree)
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .max(),
        _ => monomial_degree(expr),
    }
}

/// Returns true if expanding the expression changes it, i.e. if the expression still contains
/// unexpanded products or powers of sums.
pub fn is_factored_form(expr: &SymExpr) -> bool {
    expand(expr) != *expr
}

/// Groups the expanded terms of the expression by their power product over the given variables.
///
/// Each entry pairs a power product (e.g. `x^2`, `x*y`, or `1` for the constant group) with the
/// sum of the coefficients of the terms that carry it. Entries are sorted by descending degree of
/// the power product.
pub fn collect(expr: &SymExpr, vars: &[&str]) -> Vec<(SymExpr, SymExpr)> {
    /// Splits a term into its power product over `vars` and the remaining coefficient.
    fn split_term(term: SymExpr, vars: &[&str]) -> (SymExpr, SymExpr) {
        fn belongs_to_key(factor: &SymExpr, vars: &[&str]) -> bool {
            match factor {
                SymExpr::Primary(Primary::Symbol(sym)) => vars.contains(&sym.as_str()),
                SymExpr::Exp(base, _) => base.as_symbol()
                    .map(|sym| vars.contains(&sym))
                    .unwrap_or(false),
                _ => false,
            }
        }

        let factors = match term {
            SymExpr::Mul(factors) => factors,
            other => vec![other],
        };
        let (key, coeff): (Vec<_>, Vec<_>) = factors.into_iter()
            .partition(|factor| belongs_to_key(factor, vars));

        (SymExpr::Mul(key).downgrade(), SymExpr::Mul(coeff).downgrade())
    }

    let expanded = expand(expr);
    let terms = match expanded {
        SymExpr::Add(terms) => terms,
        other => vec![other],
    };

    let mut groups: Vec<(SymExpr, Vec<SymExpr>)> = Vec::new();
    for term in terms {
        let (key, coeff) = split_term(term, vars);
        if let Some((_, coeffs)) = groups.iter_mut().find(|(existing, _)| *existing == key) {
            coeffs.push(coeff);
        } else {
            groups.push((key, vec![coeff]));
        }
    }

    let mut result = groups.into_iter()
        .map(|(key, coeffs)| {
            let coefficient = simplify(&SymExpr::Add(coeffs).downgrade());
            (key, coefficient)
        })
        .collect::<Vec<_>>();
    result.sort_by(|(a, _), (b, _)| {
        let degree_a = monomial_degree(a).unwrap_or(0);
        let degree_b = monomial_degree(b).unwrap_or(0);
        degree_b.cmp(&degree_a).then_with(|| a.to_string().cmp(&b.to_string()))
    });
    result
}

/// A summary of an expansion, suitable for display to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionReport {
    /// The expression as it was given.
    pub original: SymExpr,

    /// The expanded expression.
    pub expanded: SymExpr,

    /// Whether expansion changed the expression.
    pub changed: bool,

    /// The variables appearing in the expanded expression, sorted.
    pub variables: Vec<String>,

    /// The total degree of the expanded expression, if it is a polynomial.
    pub degree: Option<u64>,

    /// The number of terms in the expanded expression.
    pub term_count: usize,
}

/// Expands the expression and summarizes the result.
pub fn report(expr: &SymExpr) -> ExpansionReport {
    let expanded = expand(expr);
    ExpansionReport {
        changed: expanded != *expr,
        variables: free_symbols(&expanded),
        degree: total_degree(&expanded),
        term_count: term_count(&expanded),
        original: expr.clone(),
        expanded,
    }
}

#[cfg(test)]
mod tests {
    use expa_parser::parser::{expr::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from(expr)
    }

    #[test]
    fn symbols_are_sorted_and_deduped() {
        let expr = parse("y x + x^2 + sin(z)");
        assert_eq!(free_symbols(&expr), vec!["x", "y", "z"]);
    }

    #[test]
    fn degree_of_polynomial() {
        assert_eq!(total_degree(&expand(&parse("(x + 1)^3"))), Some(3));
        assert_eq!(total_degree(&expand(&parse("x^2 y + x y"))), Some(3));
        assert_eq!(total_degree(&parse("42")), Some(0));
    }

    #[test]
    fn degree_of_non_polynomial() {
        assert_eq!(total_degree(&parse("sqrt(x) + 1")), None);
        assert_eq!(total_degree(&expand(&parse("1/x"))), None);
    }

    #[test]
    fn fractional_coefficients_are_still_polynomial() {
        assert_eq!(total_degree(&expand(&parse("x/2 + 1/3"))), Some(1));
    }

    #[test]
    fn factored_form() {
        assert!(is_factored_form(&parse("(x + 1)(x + 2)")));
        assert!(!is_factored_form(&expand(&parse("(x + 1)(x + 2)"))));
    }

    #[test]
    fn collect_groups_by_power_product() {
        let groups = collect(&parse("(x + y)^2"), &["x"]);
        assert_eq!(groups, vec![
            (parse("x^2"), parse("1")),
            (parse("x"), parse("2y")),
            (parse("1"), parse("y^2")),
        ]);
    }

    #[test]
    fn report_summarizes_expansion() {
        let report = report(&parse("(x + 1)^2"));
        assert!(report.changed);
        assert_eq!(report.variables, vec!["x"]);
        assert_eq!(report.degree, Some(2));
        assert_eq!(report.term_count, 3);
    }
}
