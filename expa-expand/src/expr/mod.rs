//! A representation of algebraic expressions that is easier to manipulate than an AST.
//!
//! The [`Expr`](expa_parser::parser::expr::Expr) type from `expa_parser` is a recursive `enum`
//! that represents the AST of an algebraic expression. It's convenient for parsing, but not so
//! much for algebraic manipulation.
//!
//! This module defines a separate type, [`SymExpr`], which simplifies the AST by recursively
//! flattening it into a list of terms or factors, depending on the operation, and normalizing the
//! expression into a sum of products. For example, the expression `x + (y + z)` becomes a single
//! [`SymExpr::Add`] node with _three_ children, `x`, `y`, and `z`. Subtraction is normalized into
//! addition of a `-1` multiple, and division into multiplication by a `-1` power.
//!
//! All submodules in this crate that deal with symbolic manipulation use [`SymExpr`].
//!
//! # Strict equality
//!
//! A common problem that arises in symbolic computation is determining if two expressions are
//! semantically equal, in order to determine if terms / factors are similar enough to be
//! combined. This is extremely difficult to do in general, because there are an infinite number
//! of ways to represent the same expression: consider `x^2 + 2x + 1` and `(x + 1)^2`. To simplify,
//! we need to check semantic equality, but to check semantic equality, we need to simplify!
//!
//! To alleviate this, we define a subset of semantic equality for expressions, called **strict
//! equality**. Two expressions are strictly equal if:
//!
//! - They are the same type of expression (i.e. both [`SymExpr::Primary`], both [`SymExpr::Add`],
//! etc.).
//! - If both are [`SymExpr::Primary`], both expressions must have strictly equal values.
//! - If both are [`SymExpr::Add`] or [`SymExpr::Mul`], both expressions must have strictly equal
//! terms / factors, in any order.
//! - If both are [`SymExpr::Exp`], both expressions must have strictly equal base and exponent.
//!
//! Strict equality can never report false positives: if two expressions are strictly equal, they
//! are semantically equal. It is simple and fast to compute, and it does not depend on any
//! simplification to work, so it can be used **in conjunction** with simplification to determine
//! if two expressions are similar enough to be combined.
//!
//! The [`PartialEq`] and [`Eq`] implementations for [`SymExpr`] implement **strict equality**,
//! not semantic equality.

use crate::primitive::{int, int_from_str};
use crate::simplify::fraction::make_fraction;
use expa_parser::parser::{
    expr::Expr as AstExpr,
    literal::Literal,
    token::op::{BinOpKind, UnaryOpKind},
    Precedence,
};
use num_bigint::BigInt;
use num_traits::{One, Signed};
use std::{cmp::Ordering, ops::{Add, AddAssign, Mul, MulAssign, Neg}};

/// A single term / factor, such as a number, variable, or function call.
#[derive(Debug, Clone, PartialEq)]
pub enum Primary {
    /// An integer, such as `2` or `144`.
    Integer(BigInt),

    /// A floating-point number, such as `3.14` or `0.5`.
    Float(f64),

    /// A variable, such as `x` or `y`.
    Symbol(String),

    /// A function call, such as `sin(x)` or `sqrt(2)`. Calls are treated as opaque: their
    /// arguments are converted, but the call itself is never expanded.
    Call(String, Vec<SymExpr>),
}

/// [`Hash`] is implemented manually to allow hashing [`Primary::Float`]s. This module **must
/// never** produce non-normal floats (such as `NaN`)! Report any bugs that cause this to happen.
impl std::hash::Hash for Primary {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Self::Integer(int) => int.hash(state),
            // this must be safe for the `Hash` impl to be valid
            Self::Float(float) => float.to_bits().hash(state),
            Self::Symbol(sym) => sym.hash(state),
            Self::Call(name, args) => {
                name.hash(state);
                args.hash(state);
            },
        }
    }
}

impl std::fmt::Display for Primary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", num),
            Self::Symbol(sym) => write!(f, "{}", sym),
            Self::Call(name, args) => {
                write!(f, "{}(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    write!(f, "{}", arg)?;
                    for arg in iter {
                        write!(f, ", {}", arg)?;
                    }
                }
                write!(f, ")")
            },
        }
    }
}

/// [`Eq`] is implemented manually to allow comparing [`Primary::Float`]s. This module **must
/// never** produce non-normal floats (such as `NaN`)! Report any bugs that cause this to happen.
impl Eq for Primary {}

/// Adds two [`Primary`]s together. If both are the **same numeric type**, the numbers are added
/// together. Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Add`].
///
/// Note this means that adding an integer and a float will result in a **[`SymExpr::Add`]**.
impl Add<Primary> for Primary {
    type Output = SymExpr;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs + rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                SymExpr::Primary(Primary::Float(lhs + rhs))
            },
            (lhs, rhs) => SymExpr::Add(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// Multiplies two [`Primary`]s together. If both are the **same numeric type**, the numbers are
/// multiplied together. Otherwise, the two [`Primary`]s are wrapped in a [`SymExpr::Mul`].
impl Mul<Primary> for Primary {
    type Output = SymExpr;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Primary::Integer(lhs), Primary::Integer(rhs)) => {
                SymExpr::Primary(Primary::Integer(lhs * rhs))
            },
            (Primary::Float(lhs), Primary::Float(rhs)) => {
                SymExpr::Primary(Primary::Float(lhs * rhs))
            },
            (lhs, rhs) => SymExpr::Mul(vec![
                SymExpr::Primary(lhs),
                SymExpr::Primary(rhs),
            ]),
        }
    }
}

/// An algebraic expression with information about its terms and factors.
///
/// For more information about this type, see the [module-level documentation](self).
#[derive(Debug, Clone, Eq, Hash)]
pub enum SymExpr {
    /// A single term or factor.
    Primary(Primary),

    /// Multiple terms added together.
    Add(Vec<SymExpr>),

    /// Multiple factors multiplied together.
    Mul(Vec<SymExpr>),

    /// An expression raised to a power.
    Exp(Box<SymExpr>, Box<SymExpr>),
}

impl std::fmt::Display for SymExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Primary(primary) => write!(f, "{}", primary),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    // negated terms print as subtraction: `x - y` instead of `x + -1 * y`
                    match term.as_negated() {
                        Some(positive) => write!(f, "-{}", positive)?,
                        None => write!(f, "{}", term)?,
                    }
                    for term in iter {
                        match term.as_negated() {
                            Some(positive) => write!(f, " - {}", positive)?,
                            None => write!(f, " + {}", term)?,
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                // integer reciprocals print as division: `x / 6` instead of `x * 6^-1`
                let (recips, others): (Vec<&SymExpr>, Vec<&SymExpr>) =
                    factors.iter().partition(|factor| factor.is_integer_recip());

                let mut iter = others.into_iter();
                if let Some(factor) = iter.next() {
                    if matches!(factor.cmp_precedence(self), Ordering::Less) {
                        write!(f, "({})", factor)?;
                    } else {
                        write!(f, "{}", factor)?;
                    }
                    for factor in iter {
                        if matches!(factor.cmp_precedence(self), Ordering::Less) {
                            write!(f, " * ({})", factor)?;
                        } else {
                            write!(f, " * {}", factor)?;
                        }
                    }
                } else {
                    write!(f, "1")?;
                }

                for recip in recips {
                    write!(f, " / {}", recip.as_integer_recip().unwrap())?;
                }
                Ok(())
            },
            Self::Exp(base, exp) => {
                if matches!(base.cmp_precedence(self), Ordering::Less) {
                    write!(f, "({})", base)?;
                } else {
                    write!(f, "{}", base)?;
                }
                write!(f, "^")?;
                if matches!(exp.cmp_precedence(self), Ordering::Less) {
                    write!(f, "({})", exp)?;
                } else {
                    write!(f, "{}", exp)?;
                }
                Ok(())
            },
        }
    }
}

impl SymExpr {
    /// Returns the precedence of the expression.
    fn precedence(&self) -> Option<Precedence> {
        match self {
            Self::Primary(_) => None,
            Self::Add(_) => Some(BinOpKind::Add.precedence()),
            Self::Mul(_) => Some(BinOpKind::Mul.precedence()),
            Self::Exp(_, _) => Some(BinOpKind::Exp.precedence()),
        }
    }

    /// Compares the precedence of this expression with another expression.
    ///
    /// This is used to determine if parentheses are needed around this expression when printing
    /// it as a child of `other`.
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        #[derive(PartialEq, Eq)]
        enum PrecedenceExt {
            Primary,
            Op(Precedence),
        }

        impl PartialOrd for PrecedenceExt {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }

        impl Ord for PrecedenceExt {
            fn cmp(&self, other: &Self) -> Ordering {
                match (self, other) {
                    (Self::Primary, Self::Primary) => Ordering::Equal,
                    (Self::Primary, Self::Op(_)) => Ordering::Greater,
                    (Self::Op(_), Self::Primary) => Ordering::Less,
                    (Self::Op(lhs), Self::Op(rhs)) => lhs.cmp(rhs),
                }
            }
        }

        let lhs = self.precedence().map(PrecedenceExt::Op).unwrap_or(PrecedenceExt::Primary);
        let rhs = other.precedence().map(PrecedenceExt::Op).unwrap_or(PrecedenceExt::Primary);
        lhs.cmp(&rhs)
    }

    /// If the expression is a [`Primary::Integer`], returns a reference to the contained integer.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// If the expression is a [`Primary::Integer`], returns the contained integer.
    pub fn into_integer(self) -> Option<BigInt> {
        match self {
            Self::Primary(Primary::Integer(int)) => Some(int),
            _ => None,
        }
    }

    /// Returns true if the expression is a [`Primary::Integer`].
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Primary(Primary::Integer(_)))
    }

    /// Returns true if the expression is a [`Primary::Integer`] raised to the power of -1.
    pub fn is_integer_recip(&self) -> bool {
        self.as_integer_recip().is_some()
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of -1, returns a reference
    /// to the contained integer (the denominator of the fraction).
    pub fn as_integer_recip(&self) -> Option<&BigInt> {
        if let Self::Exp(base, exp) = self {
            if let Self::Primary(Primary::Integer(exp)) = &**exp {
                if *exp == int(-1) {
                    return base.as_integer();
                }
            }
        }

        None
    }

    /// If the expression is a [`Primary::Integer`] raised to the power of -1, returns the
    /// contained integer (the denominator of the fraction).
    pub fn into_integer_recip(self) -> Option<BigInt> {
        if let Self::Exp(base, exp) = self {
            if let Self::Primary(Primary::Integer(exp)) = *exp {
                if exp == int(-1) {
                    return base.into_integer();
                }
            }
        }

        None
    }

    /// Returns true if the expression is a [`Primary::Float`].
    pub fn is_float(&self) -> bool {
        matches!(self, Self::Primary(Primary::Float(_)))
    }

    /// If the expression is a [`Primary::Symbol`], returns a reference to the contained symbol.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Primary(Primary::Symbol(sym)) => Some(sym),
            _ => None,
        }
    }

    /// If the expression is a negative number, or a product with a negative numeric coefficient,
    /// returns the expression with the sign flipped. Used when printing sums as subtraction.
    pub(crate) fn as_negated(&self) -> Option<SymExpr> {
        fn is_negative(expr: &SymExpr) -> bool {
            match expr {
                SymExpr::Primary(Primary::Integer(n)) => n.is_negative(),
                SymExpr::Primary(Primary::Float(x)) => *x < 0.0,
                _ => false,
            }
        }

        match self {
            Self::Primary(Primary::Integer(_)) | Self::Primary(Primary::Float(_)) => {
                if is_negative(self) {
                    Some(self.clone().neg())
                } else {
                    None
                }
            },
            Self::Mul(factors) => {
                let idx = factors.iter().position(is_negative)?;
                let mut factors = factors.clone();
                let negated = factors[idx].clone().neg();
                if negated.as_integer().map(|n| n.is_one()).unwrap_or(false) && factors.len() > 1 {
                    factors.remove(idx);
                } else {
                    factors[idx] = negated;
                }
                Some(Self::Mul(factors).downgrade())
            },
            _ => None,
        }
    }

    /// Trivially downgrades the expression into a simpler form.
    ///
    /// Some operations may result in a [`SymExpr::Add`] with zero / one term, or a
    /// [`SymExpr::Mul`] with zero / one factor. This function checks for these cases and
    /// simplifies the expression into the single term / factor, or a [`SymExpr::Primary`]
    /// containing the integer 0 or 1.
    pub(crate) fn downgrade(self) -> Self {
        match self {
            Self::Add(mut terms) => {
                if terms.is_empty() {
                    Self::Primary(Primary::Integer(int(0)))
                } else if terms.len() == 1 {
                    terms.remove(0)
                } else {
                    Self::Add(terms)
                }
            },
            Self::Mul(mut factors) => {
                if factors.is_empty() {
                    Self::Primary(Primary::Integer(int(1)))
                } else if factors.len() == 1 {
                    factors.remove(0)
                } else {
                    Self::Mul(factors)
                }
            },
            _ => self,
        }
    }

    /// Returns an iterator over every node in the expression, including the expression itself,
    /// in depth-first order. Function call arguments are visited too, since symbols inside a call
    /// still belong to the expression.
    pub fn nodes(&self) -> Nodes {
        Nodes { stack: vec![self] }
    }
}

/// Iterator over every node of an expression, created by [`SymExpr::nodes`].
pub struct Nodes<'a> {
    stack: Vec<&'a SymExpr>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        let expr = self.stack.pop()?;
        match expr {
            SymExpr::Primary(Primary::Call(_, args)) => self.stack.extend(args),
            SymExpr::Primary(_) => {},
            SymExpr::Add(children) | SymExpr::Mul(children) => self.stack.extend(children),
            SymExpr::Exp(base, exp) => {
                self.stack.push(exp.as_ref());
                self.stack.push(base.as_ref());
            },
        }
        Some(expr)
    }
}

/// Checks if two expressions are **strictly** equal.
///
/// For more information about strict equality, see the [module-level documentation](self).
impl PartialEq for SymExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs == rhs,
            (Self::Add(lhs), Self::Add(rhs)) | (Self::Mul(lhs), Self::Mul(rhs)) => {
                lhs.len() == rhs.len()
                    && lhs.iter().all(|lhs| rhs.contains(lhs))
            },
            (Self::Exp(lhs_base, lhs_exp), Self::Exp(rhs_base, rhs_exp)) => {
                lhs_base == rhs_base && lhs_exp == rhs_exp
            },
            _ => false,
        }
    }
}

impl From<AstExpr> for SymExpr {
    fn from(expr: AstExpr) -> Self {
        match expr {
            AstExpr::Literal(literal) => match literal {
                Literal::Integer(int) => Self::Primary(Primary::Integer(int_from_str(&int.value))),
                Literal::Float(float) => Self::Primary(Primary::Float(float.value)),
                Literal::Symbol(sym) => Self::Primary(Primary::Symbol(sym.name)),
            },
            AstExpr::Paren(paren) => Self::from(*paren.expr),
            AstExpr::Call(call) => {
                let args = call.args.into_iter().map(Self::from).collect();
                Self::Primary(Primary::Call(call.name.name, args))
            },
            AstExpr::Unary(unary) => match unary.op.kind {
                // treat this as -1 * operand
                UnaryOpKind::Neg => Self::from(*unary.operand).neg(),
            },
            AstExpr::Binary(bin) => {
                match bin.op.kind {
                    BinOpKind::Exp => {
                        Self::Exp(Box::new(Self::from(*bin.lhs)), Box::new(Self::from(*bin.rhs)))
                    },
                    BinOpKind::Mul => {
                        // iteratively flatten binary expressions into factors
                        // because the AST obviously exists, `factors` will never end up as a
                        // `SymExpr::Mul` with zero factors
                        let mut factors = Self::Mul(Vec::new());
                        let mut stack = vec![AstExpr::Binary(bin)];
                        while let Some(expr) = stack.pop() {
                            match expr {
                                AstExpr::Binary(bin) if bin.op.kind == BinOpKind::Mul => {
                                    stack.push(*bin.lhs);
                                    stack.push(*bin.rhs);
                                },
                                expr => {
                                    // if the generated `SymExpr` is another `SymExpr::Mul`, its
                                    // factors are added to the current list of factors instead
                                    // we call this "flattening" the expression
                                    factors *= Self::from(expr);
                                },
                            }
                        }
                        factors
                    },
                    // treat this as lhs * rhs^-1
                    BinOpKind::Div => make_fraction(
                        Self::from(*bin.lhs),
                        Self::from(*bin.rhs),
                    ),
                    BinOpKind::Add => {
                        // iteratively flatten binary expressions into terms
                        let mut terms = Self::Add(Vec::new());
                        let mut stack = vec![AstExpr::Binary(bin)];
                        while let Some(expr) = stack.pop() {
                            match expr {
                                AstExpr::Binary(bin) if bin.op.kind == BinOpKind::Add => {
                                    stack.push(*bin.lhs);
                                    stack.push(*bin.rhs);
                                },
                                expr => {
                                    // flattening, same as in the `Mul` branch
                                    terms += Self::from(expr);
                                },
                            }
                        }
                        terms
                    },
                    // treat this as lhs + -1 * rhs
                    BinOpKind::Sub => Self::from(*bin.lhs) + Self::from(*bin.rhs).neg(),
                }
            },
        }
    }
}

/// Adds two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Add`], in which case both are combined
/// into one list of terms (flattening).
impl Add for SymExpr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs + rhs,
            (Self::Add(mut terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
                Self::Add(terms)
            },
            (Self::Add(mut terms), other) | (other, Self::Add(mut terms)) => {
                terms.push(other);
                Self::Add(terms)
            },
            (lhs, rhs) => Self::Add(vec![lhs, rhs]),
        }
    }
}

/// Adds two [`SymExpr`]s together. The behavior is the same as [`Add`], reusing the allocated
/// memory of `self` where possible.
impl AddAssign for SymExpr {
    fn add_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Primary(Primary::Integer(lhs)), Self::Primary(Primary::Integer(rhs))) => {
                *lhs += rhs;
            },
            (Self::Primary(Primary::Float(lhs)), Self::Primary(Primary::Float(rhs))) => {
                *lhs += rhs;
            },
            (Self::Add(terms), Self::Add(rhs_terms)) => {
                terms.extend(rhs_terms);
            },
            (Self::Add(terms), other) => {
                terms.push(other);
            },
            (lhs, rhs) => {
                let owned = std::mem::replace(lhs, Self::Add(Vec::new()));
                *lhs = owned + rhs;
            },
        }
    }
}

/// Multiplies two [`SymExpr`]s together. No simplification is done, except for the case where the
/// operands are a mix of [`Primary`] and / or [`SymExpr::Mul`], in which case both are combined
/// into one list of factors (flattening).
impl Mul for SymExpr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        match (self, rhs) {
            (Self::Primary(lhs), Self::Primary(rhs)) => lhs * rhs,
            (Self::Mul(mut factors), Self::Mul(other)) => {
                factors.extend(other);
                Self::Mul(factors)
            },
            (Self::Mul(mut factors), other) | (other, Self::Mul(mut factors)) => {
                factors.push(other);
                Self::Mul(factors)
            },
            (lhs, rhs) => Self::Mul(vec![lhs, rhs]),
        }
    }
}

/// Multiplies two [`SymExpr`]s together. The behavior is the same as [`Mul`], reusing the
/// allocated memory of `self` where possible.
impl MulAssign for SymExpr {
    fn mul_assign(&mut self, rhs: Self) {
        match (self, rhs) {
            (Self::Primary(Primary::Integer(lhs)), Self::Primary(Primary::Integer(rhs))) => {
                *lhs *= rhs;
            },
            (Self::Primary(Primary::Float(lhs)), Self::Primary(Primary::Float(rhs))) => {
                *lhs *= rhs;
            },
            (Self::Mul(factors), Self::Mul(rhs_factors)) => {
                factors.extend(rhs_factors);
            },
            (Self::Mul(factors), other) => {
                factors.push(other);
            },
            (lhs, rhs) => {
                let owned = std::mem::replace(lhs, Self::Mul(Vec::new()));
                *lhs = owned * rhs;
            },
        }
    }
}

/// Multiplies this expression by -1. No simplification is done, except for the case where the
/// expression is a numeric [`Primary`], in which case the number is negated.
impl Neg for SymExpr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Primary(Primary::Integer(int)) => Self::Primary(Primary::Integer(-int)),
            Self::Primary(Primary::Float(float)) => Self::Primary(Primary::Float(-float)),
            expr => Self::Primary(Primary::Integer(int(-1))) * expr,
        }
    }
}

/// NOTE: The output of `pretty_assertions` for failing tests is horrifically ugly here, mainly
/// because of strict equality. Strict equality allows different orderings of terms and factors,
/// but `pretty_assertions` doesn't care about order. If a test fails and the expected terms and
/// factors are in a different order than the generated terms and factors, the output will be a
/// mess. Just a forewarning!
#[cfg(test)]
mod tests {
    use expa_parser::parser::{expr::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`SymExpr`] representation.
    fn parse_expr(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        SymExpr::from(expr)
    }

    #[test]
    fn strict_equality() {
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("(y - 5 + x) * 2");
        assert_eq!(a, b);
    }

    #[test]
    fn strict_equality_is_not_semantic_equality() {
        // these are NOT strictly equal (but are semantically equal)
        // `b` is an expanded version of `a`
        let a = parse_expr("2(x + (y - 5))");
        let b = parse_expr("2x + 2y - 10");
        assert_ne!(a, b);
    }

    #[test]
    fn simple_expr() {
        let expr = parse_expr("x^2 + 5x + 6");

        // NOTE: the order of the terms and factors is not guaranteed, but the output is still
        // semantically correct
        assert_eq!(expr, SymExpr::Add(vec![
            // 6
            SymExpr::Primary(Primary::Integer(int(6))),
            // + 5x
            SymExpr::Mul(vec![
                SymExpr::Primary(Primary::Symbol(String::from("x"))),
                SymExpr::Primary(Primary::Integer(int(5))),
            ]),
            // + x^2
            SymExpr::Exp(
                Box::new(SymExpr::Primary(Primary::Symbol(String::from("x")))),
                Box::new(SymExpr::Primary(Primary::Integer(int(2)))),
            ),
        ]));
    }

    #[test]
    fn factors_only() {
        let expr = parse_expr("-2x^2y^3/5");
        assert_eq!(expr, SymExpr::Mul(vec![
            // y^3
            SymExpr::Exp(
                Box::new(SymExpr::Primary(Primary::Symbol(String::from("y")))),
                Box::new(SymExpr::Primary(Primary::Integer(int(3)))),
            ),
            // * x^2
            SymExpr::Exp(
                Box::new(SymExpr::Primary(Primary::Symbol(String::from("x")))),
                Box::new(SymExpr::Primary(Primary::Integer(int(2)))),
            ),
            // * -2
            SymExpr::Primary(Primary::Integer(int(-2))),
            // / 5
            SymExpr::Exp(
                Box::new(SymExpr::Primary(Primary::Integer(int(5)))),
                Box::new(SymExpr::Primary(Primary::Integer(int(-1)))),
            ),
        ]));
    }

    #[test]
    fn subtraction_becomes_negated_term() {
        let expr = parse_expr("3x - (x + t)y");
        assert_eq!(expr, SymExpr::Add(vec![
            // 3 * x
            SymExpr::Mul(vec![
                SymExpr::Primary(Primary::Symbol(String::from("x"))),
                SymExpr::Primary(Primary::Integer(int(3))),
            ]),
            // + -1 * (x + t) * y
            SymExpr::Mul(vec![
                SymExpr::Primary(Primary::Symbol(String::from("y"))),
                SymExpr::Add(vec![
                    SymExpr::Primary(Primary::Symbol(String::from("t"))),
                    SymExpr::Primary(Primary::Symbol(String::from("x"))),
                ]),
                SymExpr::Primary(Primary::Integer(int(-1))),
            ]),
        ]));
    }

    #[test]
    fn calls_are_opaque() {
        let expr = parse_expr("2 sqrt(x + 1)");
        assert_eq!(expr, SymExpr::Mul(vec![
            SymExpr::Primary(Primary::Call(String::from("sqrt"), vec![
                SymExpr::Add(vec![
                    SymExpr::Primary(Primary::Symbol(String::from("x"))),
                    SymExpr::Primary(Primary::Integer(int(1))),
                ]),
            ])),
            SymExpr::Primary(Primary::Integer(int(2))),
        ]));
    }

    #[test]
    fn nodes_visit_call_arguments() {
        let expr = parse_expr("2 sqrt(x + 1) y");
        let symbols = expr.nodes()
            .filter(|node| node.as_symbol().is_some())
            .count();
        assert_eq!(symbols, 2);
        // the product, the call, the sum inside it, and four leaves
        assert_eq!(expr.nodes().count(), 7);
    }

    #[test]
    fn fmt_expr() {
        let expr = parse_expr("(((((((((a) b) c) d) e + f) g) h) i) j)");
        assert_eq!(expr.to_string(), "j * i * h * g * (f + e * d * c * b * a)");
    }
}
