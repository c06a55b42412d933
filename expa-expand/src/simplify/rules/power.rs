//! Rewrite rules for expressions involving exponentiation.

use crate::expr::{Primary, SymExpr};
use crate::primitive::int;
use crate::simplify::{rules::do_power, step::Step};
use crate::step_collector::StepCollector;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};

/// `a^0 = 1`
///
/// This includes `0^0 = 1`, which is the more useful convention for polynomial manipulation.
pub fn power_zero(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |_, rhs| {
        if rhs.as_integer().map(|n| n.is_zero()).unwrap_or(false) {
            Some(SymExpr::Primary(Primary::Integer(int(1))))
        } else {
            None
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::PowerZero);
    Some(opt)
}

/// `a^1 = a`
pub fn power_one(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if rhs.as_integer().map(|n| n.is_one()).unwrap_or(false) {
            Some(lhs.clone())
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOne);
    Some(opt)
}

/// `1^a = 1`
pub fn one_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, _| {
        if lhs.as_integer().map(|n| n.is_one()).unwrap_or(false) {
            Some(SymExpr::Primary(Primary::Integer(int(1))))
        } else {
            None
        }
    })?;

    step_collector.push(Step::OnePower);
    Some(opt)
}

/// `0^a = 0`, for positive integer `a`.
pub fn zero_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base_is_zero = lhs.as_integer().map(|n| n.is_zero()).unwrap_or(false);
        let exp_is_positive = rhs.as_integer().map(|n| n.is_positive()).unwrap_or(false);
        if base_is_zero && exp_is_positive {
            Some(SymExpr::Primary(Primary::Integer(int(0))))
        } else {
            None
        }
    })?;

    step_collector.push(Step::ZeroPower);
    Some(opt)
}

/// Evaluates integer powers of integers.
///
/// `2^5 = 32`
///
/// Negative exponents are left alone; `n^-1` is the canonical representation of a fraction.
pub fn integer_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        let base = lhs.as_integer()?;
        let exp = rhs.as_integer()?;
        if *exp < int(2) {
            return None;
        }

        // an exponent too large for `u32` would produce an astronomically large integer anyway
        let exp = exp.to_u32()?;
        Some(SymExpr::Primary(Primary::Integer(base.pow(exp))))
    })?;

    step_collector.push(Step::IntegerPower);
    Some(opt)
}

/// `(a^b)^c = a^(b*c)`
pub fn power_of_power(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    let opt = do_power(expr, |lhs, rhs| {
        if let SymExpr::Exp(base, inner_exp) = lhs {
            Some(SymExpr::Exp(
                Box::new(*base.clone()),
                Box::new(*inner_exp.clone() * rhs.clone()),
            ))
        } else {
            None
        }
    })?;

    step_collector.push(Step::PowerOfPower);
    Some(opt)
}

/// Applies all power rules.
///
/// All power rules will reduce the complexity of the expression.
pub fn all(expr: &SymExpr, step_collector: &mut dyn StepCollector<Step>) -> Option<SymExpr> {
    power_zero(expr, step_collector)
        .or_else(|| power_one(expr, step_collector))
        .or_else(|| one_power(expr, step_collector))
        .or_else(|| zero_power(expr, step_collector))
        .or_else(|| integer_power(expr, step_collector))
        .or_else(|| power_of_power(expr, step_collector))
}
