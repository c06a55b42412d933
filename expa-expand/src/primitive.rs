//! Functions to construct [`BigInt`]s from various types.

use num_bigint::BigInt;

/// Creates a [`BigInt`] with the given value.
pub fn int<T>(n: T) -> BigInt
where
    BigInt: From<T>,
{
    BigInt::from(n)
}

/// Creates a [`BigInt`] from a string of decimal digits.
///
/// The caller must guarantee that the string only contains decimal digits, which is enforced by
/// the tokenizer for anything that comes out of the parser.
pub fn int_from_str(s: &str) -> BigInt {
    s.parse().unwrap()
}
