//! Rewrite rules for expressions involving addition, including combining like terms.

use crate::expr::{Primary, SymExpr};
use crate::primitive::int;
use crate::simplify::{
    fraction::{extract_explicit_frac, extract_fractional, make_fraction},
    rules::do_add,
    step::Step,
};
use crate::step_collector::StepCollector;
use num_traits::{One, ToPrimitive, Zero};

/// Reads a numeric coefficient as an `f64`: a float directly, or an integer / integer fraction
/// converted.
fn as_f64(expr: &SymExpr) -> Option<f64> {
    if let SymExpr::Primary(Primary::Float(float)) = expr {
        return Some(*float);
    }

    let (numerator, denominator) = extract_explicit_frac(&mut expr.clone())?;
    Some(numerator.to_f64()? / denominator.to_f64()?)
}

/// Folds two numeric coefficients into one, writing the result into `lhs`. Integer and integer
/// fraction coefficients combine exactly; if either side is a float, the result is a float.
///
/// Returns false, leaving `lhs` untouched, when the coefficients cannot be folded into a single
/// numeric primary. Callers must keep the terms separate in that case; anything else would hand
/// the rewrite loop a shape it cannot reduce.
fn add_assign(lhs: &mut SymExpr, rhs: &SymExpr) -> bool {
    if lhs.is_float() || rhs.is_float() {
        if let (Some(a), Some(b)) = (as_f64(lhs), as_f64(rhs)) {
            *lhs = SymExpr::Primary(Primary::Float(a + b));
            return true;
        }
        return false;
    }

    match (extract_explicit_frac(&mut lhs.clone()), extract_explicit_frac(&mut rhs.clone())) {
        (Some((num1, den1)), Some((num2, den2))) => {
            // (a / b) + (c / d) = (a*d + b*c) / (b*d)
            let numerator = num1 * &den2 + num2 * &den1;
            let denominator = den1 * den2;
            if denominator.is_one() {
                *lhs = SymExpr::Primary(Primary::Integer(numerator));
            } else {
                *lhs = make_fraction(
                    SymExpr::Primary(Primary::Integer(numerator)),
                    SymExpr::Primary(Primary::Integer(denominator)),
                );
            }
            true
        },
        _ => false,
    }
}

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let new_terms = terms.iter()
            .filter(|term| {
                // keep all non-zero terms
                term.as_integer()
                    .map(|n| !n.is_zero())
                    .unwrap_or(true)
            })
            .cloned()
            .collect::<Vec<_>>();

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// Combines like terms.
///
/// `a+a = 2a`
/// `a+a+a = 3a`
/// `2a+3a = 5a`
/// etc.
pub fn combine_like_terms(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_add(expr, |terms| {
        let mut new_terms = terms.to_vec();
        let mut current_term_idx = 0;

        /// Utility function to extract the numeric coefficient and factors of an expression. If
        /// the expression is not [`SymExpr::Mul`], the coefficient is 1.
        ///
        /// - `5` -> `(5, 1)`
        /// - `3*a` -> `(3, a)`
        /// - `1/4*a*b` -> `(1/4, a*b)`
        /// - `sqrt(6)` -> `(1, sqrt(6))`
        /// - `a` -> `(1, a)`
        fn get_coeff(expr: &SymExpr) -> (SymExpr, SymExpr) {
            match expr {
                SymExpr::Primary(Primary::Integer(_)) | SymExpr::Primary(Primary::Float(_)) => {
                    (expr.clone(), SymExpr::Primary(Primary::Integer(int(1))))
                },
                SymExpr::Mul(factors) => {
                    let mut factors = factors.clone();
                    let fraction = extract_fractional(&mut factors)
                        .unwrap_or(SymExpr::Primary(Primary::Integer(int(1))));

                    (
                        fraction,
                        SymExpr::Mul(factors).downgrade(),
                    )
                },
                SymExpr::Exp(..) => {
                    if expr.is_integer_recip() {
                        (expr.clone(), SymExpr::Primary(Primary::Integer(int(1))))
                    } else {
                        (SymExpr::Primary(Primary::Integer(int(1))), expr.clone())
                    }
                },
                _ => (SymExpr::Primary(Primary::Integer(int(1))), expr.clone()),
            }
        }

        // this is O(n^2) worst case, due to scanning the whole vec for each term
        while current_term_idx < new_terms.len() {
            let (mut current_term_coeff, current_term_factors) = get_coeff(&new_terms[current_term_idx]);

            // look at every term after `current_term`
            let mut next_term_idx = current_term_idx + 1;
            while next_term_idx < new_terms.len() {
                let (next_term_coeff, next_term_factors) = get_coeff(&new_terms[next_term_idx]);

                // factors must be strictly equal, and the coefficients must actually fold
                if current_term_factors == next_term_factors
                    && add_assign(&mut current_term_coeff, &next_term_coeff)
                {
                    // if so, apply a*n + a*m = (n+m)*a
                    new_terms.swap_remove(next_term_idx);
                } else {
                    next_term_idx += 1;
                }
            }

            if current_term_coeff.as_integer().map(|n| n.is_one()).unwrap_or(false) {
                new_terms[current_term_idx] = current_term_factors;
            } else {
                new_terms[current_term_idx] =
                    current_term_coeff * current_term_factors;
            }

            current_term_idx += 1;
        }

        if new_terms.len() == terms.len() {
            None
        } else {
            Some(SymExpr::Add(new_terms).downgrade())
        }
    })?;

    step_collector.push(Step::CombineLikeTerms);
    Some(opt)
}

/// Applies all addition rules.
///
/// All addition rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    add_zero(expr, step_collector)
        .or_else(|| combine_like_terms(expr, step_collector))
}
