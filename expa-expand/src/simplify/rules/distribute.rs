//! Rewrite rules related to the distributive property.
//!
//! These rules drive expansion. They may or may not reduce the complexity of the expression,
//! since they can introduce additional operations, but repeated application (together with the
//! combining rules) normalizes any polynomial into a flat sum of products.

use crate::expr::{Primary, SymExpr};
use crate::primitive::int;
use crate::simplify::{rules::{do_multiply, do_power}, step::Step};
use crate::step_collector::StepCollector;

/// `a*(b+c) = a*b + a*c`
pub fn distributive_property(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_multiply(expr, |factors| {
        // find the first `SymExpr::Add`, and distribute every other factor over it
        let mut factors_to_distribute = factors.to_vec();
        let add_factor_terms = {
            let idx = factors_to_distribute.iter()
                .position(|factor| matches!(factor, SymExpr::Add(_)));
            if let Some(idx) = idx {
                if let SymExpr::Add(terms) = factors_to_distribute.swap_remove(idx) {
                    terms
                } else {
                    unreachable!()
                }
            } else {
                return None;
            }
        };

        let new_terms = add_factor_terms.into_iter()
            .map(|term| {
                SymExpr::Mul(factors_to_distribute.clone()) * term
            })
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DistributiveProperty);
    Some(opt)
}

/// `(a*b)^c = a^c * b^c`
pub fn distribute_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let SymExpr::Mul(factors) = lhs {
            let new_factors = factors.iter()
                .map(|factor| SymExpr::Exp(
                    Box::new(factor.clone()),
                    Box::new(rhs.clone()),
                ))
                .collect::<Vec<_>>();

            return Some(SymExpr::Mul(new_factors));
        }

        None
    })?;

    step_collector.push(Step::DistributePower);
    Some(opt)
}

/// `(a+b)^n = a*(a+b)^(n-1) + b*(a+b)^(n-1)`, for integer `n >= 2`.
///
/// One round of distribution is applied immediately, rather than unrolling into a product of `n`
/// equal sums; otherwise [`combine_like_factors`](super::multiply::combine_like_factors) would
/// recombine the product right back into the original power.
pub fn expand_integer_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let terms = match lhs {
            SymExpr::Add(terms) => terms,
            _ => return None,
        };
        let exp = rhs.as_integer()?;
        if *exp < int(2) {
            return None;
        }

        let reduced_power = SymExpr::Exp(
            Box::new(lhs.clone()),
            Box::new(SymExpr::Primary(Primary::Integer(exp - int(1)))),
        );
        let new_terms = terms.iter()
            .map(|term| term.clone() * reduced_power.clone())
            .collect::<Vec<_>>();
        Some(SymExpr::Add(new_terms))
    })?;

    step_collector.push(Step::ExpandIntegerPower);
    Some(opt)
}

/// Applies all distribution rules.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    distributive_property(expr, step_collector)
        .or_else(|| distribute_power(expr, step_collector))
        .or_else(|| expand_integer_power(expr, step_collector))
}
