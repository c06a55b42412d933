//! Human-readable descriptions of the rules applied during simplification and expansion.

use std::fmt;

/// A rewrite rule that was applied to an expression.
///
/// Steps are reported in the order the rules fired, which gives a rough trace of the
/// transformation. They do not include the intermediate expressions themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `0+a = a`
    AddZero,

    /// `2a+3a = 5a`
    CombineLikeTerms,

    /// `0*a = 0`
    MultiplyZero,

    /// `1*a = a`
    MultiplyOne,

    /// `3/12 = 1/4`
    ReduceFraction,

    /// `a^b*a^c = a^(b+c)`
    CombineLikeFactors,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `1^a = 1`
    OnePower,

    /// `0^a = 0`
    ZeroPower,

    /// `2^5 = 32`
    IntegerPower,

    /// `(a^b)^c = a^(b*c)`
    PowerOfPower,

    /// `a*(b+c) = a*b + a*c`
    DistributiveProperty,

    /// `(a*b)^c = a^c * b^c`
    DistributePower,

    /// `(a+b)^2 = (a+b)*(a+b)^1`
    ExpandIntegerPower,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::AddZero => write!(f, "remove addition of zero"),
            Step::CombineLikeTerms => write!(f, "combine like terms"),
            Step::MultiplyZero => write!(f, "multiplication by zero is zero"),
            Step::MultiplyOne => write!(f, "remove multiplication by one"),
            Step::ReduceFraction => write!(f, "reduce numerical fraction"),
            Step::CombineLikeFactors => write!(f, "combine like factors"),
            Step::PowerZero => write!(f, "power of zero is one"),
            Step::PowerOne => write!(f, "remove power of one"),
            Step::OnePower => write!(f, "one raised to any power is one"),
            Step::ZeroPower => write!(f, "zero raised to a positive power is zero"),
            Step::IntegerPower => write!(f, "evaluate integer power"),
            Step::PowerOfPower => write!(f, "multiply stacked exponents"),
            Step::DistributiveProperty => write!(f, "apply the distributive property"),
            Step::DistributePower => write!(f, "distribute power over factors"),
            Step::ExpandIntegerPower => write!(f, "unroll integer power of a sum"),
        }
    }
}
