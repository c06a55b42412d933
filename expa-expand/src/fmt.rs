//! Canonical ordering and LaTeX rendering of expressions.
//!
//! Term and factor order inside [`SymExpr`] is whatever the rewrite rules happened to produce,
//! since strict equality is order-insensitive. [`canonicalize`] imposes a stable, human-friendly
//! order for display: within a product, the numeric coefficient first, then symbols and powers
//! alphabetically, with integer reciprocals last; within a sum, terms by descending degree, ties
//! broken lexicographically.
//!
//! The [`Latex`] trait renders an expression as LaTeX math. Rendering is nicest on canonicalized
//! expressions, so the [`latex`] and [`text`] convenience functions canonicalize first.

use crate::analysis::monomial_degree;
use crate::expr::{Primary, SymExpr};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

impl Latex for Primary {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Integer(num) => write!(f, "{}", num),
            Self::Float(num) => write!(f, "{}", num),
            Self::Symbol(sym) => match sym.as_str() {
                "pi" => write!(f, "\\pi"),
                "inf" => write!(f, "\\infty"),
                sym => write!(f, "{}", sym),
            },
            Self::Call(name, args) if name == "sqrt" && args.len() == 1 => {
                write!(f, "\\sqrt{{")?;
                args[0].fmt_latex(f)?;
                write!(f, "}}")
            },
            Self::Call(name, args) => {
                write!(f, "\\mathrm{{{}}}\\left(", name)?;
                let mut iter = args.iter();
                if let Some(arg) = iter.next() {
                    arg.fmt_latex(f)?;
                    for arg in iter {
                        write!(f, ", ")?;
                        arg.fmt_latex(f)?;
                    }
                }
                write!(f, "\\right)")
            },
        }
    }
}

impl Latex for SymExpr {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Primary(primary) => primary.fmt_latex(f),
            Self::Add(terms) => {
                let mut iter = terms.iter();
                if let Some(term) = iter.next() {
                    match term.as_negated() {
                        Some(positive) => {
                            write!(f, "-")?;
                            positive.fmt_latex(f)?;
                        },
                        None => term.fmt_latex(f)?,
                    }
                    for term in iter {
                        match term.as_negated() {
                            Some(positive) => {
                                write!(f, " - ")?;
                                positive.fmt_latex(f)?;
                            },
                            None => {
                                write!(f, " + ")?;
                                term.fmt_latex(f)?;
                            },
                        }
                    }
                }
                Ok(())
            },
            Self::Mul(factors) => {
                let (recips, others): (Vec<&SymExpr>, Vec<&SymExpr>) =
                    factors.iter().partition(|factor| factor.is_integer_recip());

                if recips.is_empty() {
                    return fmt_latex_factors(f, self, &others);
                }

                write!(f, "\\frac{{")?;
                if others.is_empty() {
                    write!(f, "1")?;
                } else {
                    fmt_latex_factors(f, self, &others)?;
                }
                write!(f, "}}{{")?;
                let denominator = recips.iter()
                    .map(|recip| recip.as_integer_recip().unwrap().clone())
                    .product::<num_bigint::BigInt>();
                write!(f, "{}", denominator)?;
                write!(f, "}}")
            },
            Self::Exp(base, exp) => {
                if let Some(denominator) = self.as_integer_recip() {
                    return write!(f, "\\frac{{1}}{{{}}}", denominator);
                }

                if matches!(base.cmp_precedence(self), Ordering::Less) {
                    write!(f, "\\left(")?;
                    base.fmt_latex(f)?;
                    write!(f, "\\right)")?;
                } else {
                    base.fmt_latex(f)?;
                }
                write!(f, "^{{")?;
                exp.fmt_latex(f)?;
                write!(f, "}}")
            },
        }
    }
}

/// Writes the factors of a product, parenthesizing where precedence requires, inserting `\cdot`
/// only where removing it would glue two numbers together.
fn fmt_latex_factors(f: &mut Formatter, parent: &SymExpr, factors: &[&SymExpr]) -> Result {
    let mut prev_rendered: Option<String> = None;
    for factor in factors {
        let rendered = if matches!(factor.cmp_precedence(parent), Ordering::Less) {
            format!("\\left({}\\right)", factor.as_display())
        } else {
            factor.as_display().to_string()
        };

        if let Some(prev) = prev_rendered {
            let prev_is_numeric = prev.chars().last().map_or(false, |c| c.is_ascii_digit());
            let next_is_numeric = rendered.chars().next().map_or(false, |c| c.is_ascii_digit());
            if prev_is_numeric && next_is_numeric {
                write!(f, " \\cdot ")?;
            } else {
                write!(f, " ")?;
            }
        }

        write!(f, "{}", rendered)?;
        prev_rendered = Some(rendered);
    }
    Ok(())
}

/// Reorders terms and factors into a stable display order, recursively.
///
/// Canonicalization changes nothing semantically; the result is strictly equal to the input.
pub fn canonicalize(expr: &SymExpr) -> SymExpr {
    match expr {
        SymExpr::Primary(Primary::Call(name, args)) => {
            let args = args.iter().map(canonicalize).collect();
            SymExpr::Primary(Primary::Call(name.clone(), args))
        },
        SymExpr::Primary(primary) => SymExpr::Primary(primary.clone()),
        SymExpr::Add(terms) => {
            let mut terms = terms.iter().map(canonicalize).collect::<Vec<_>>();
            terms.sort_by(term_order);
            SymExpr::Add(terms)
        },
        SymExpr::Mul(factors) => {
            let mut factors = factors.iter().map(canonicalize).collect::<Vec<_>>();
            factors.sort_by(factor_order);
            SymExpr::Mul(factors)
        },
        SymExpr::Exp(lhs, rhs) => SymExpr::Exp(
            Box::new(canonicalize(lhs)),
            Box::new(canonicalize(rhs)),
        ),
    }
}

/// Terms sort by descending degree, ties broken by the rendered text. The sign is ignored when
/// comparing, so `x^2 - y^2` does not sort the negated term first.
fn term_order(a: &SymExpr, b: &SymExpr) -> Ordering {
    fn abs_text(expr: &SymExpr) -> String {
        expr.as_negated().unwrap_or_else(|| expr.clone()).to_string()
    }

    let degree_a = monomial_degree(a).unwrap_or(0);
    let degree_b = monomial_degree(b).unwrap_or(0);
    degree_b.cmp(&degree_a).then_with(|| abs_text(a).cmp(&abs_text(b)))
}

/// Factors sort numbers first, then symbols and powers alphabetically by base, then everything
/// else, with integer reciprocals (denominators) last.
fn factor_order(a: &SymExpr, b: &SymExpr) -> Ordering {
    fn rank(expr: &SymExpr) -> u8 {
        match expr {
            _ if expr.is_integer_recip() => 3,
            SymExpr::Primary(Primary::Integer(_)) | SymExpr::Primary(Primary::Float(_)) => 0,
            SymExpr::Primary(Primary::Symbol(_)) => 1,
            SymExpr::Exp(base, _) if base.as_symbol().is_some() => 1,
            _ => 2,
        }
    }

    fn base_key(expr: &SymExpr) -> String {
        match expr {
            SymExpr::Exp(base, _) => base.to_string(),
            expr => expr.to_string(),
        }
    }

    rank(a).cmp(&rank(b))
        .then_with(|| base_key(a).cmp(&base_key(b)))
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

static ONE_CDOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|[\s{(])1\s*\\cdot\s*").unwrap());
static CDOT_ONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\\cdot\s*1($|[\s})+-])").unwrap());
static PLUS_MINUS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\+\s*-").unwrap());

/// Removes rendering residue from a LaTeX string: multiplications by a bare `1`, and `+ -`
/// sequences. Passes repeat until the string stops changing, since one removal can expose
/// another.
pub fn clean_latex(source: &str) -> String {
    let mut result = source.to_string();
    loop {
        let mut changed = false;
        for (regex, replacement) in [
            (&ONE_CDOT, "$1"),
            (&CDOT_ONE, "$1"),
            (&PLUS_MINUS, "- "),
        ] {
            let replaced = regex.replace_all(&result, replacement);
            if replaced != result {
                result = replaced.into_owned();
                changed = true;
            }
        }
        if !changed {
            return result;
        }
    }
}

/// Renders the expression as canonically-ordered linear text.
pub fn text(expr: &SymExpr) -> String {
    canonicalize(expr).to_string()
}

/// Renders the expression as canonically-ordered LaTeX.
pub fn latex(expr: &SymExpr) -> String {
    clean_latex(&canonicalize(expr).as_display().to_string())
}

#[cfg(test)]
mod tests {
    use crate::expand::expand;
    use expa_parser::parser::{expr::Expr as AstExpr, Parser};
    use pretty_assertions::assert_eq;
    use super::*;

    fn expand_str(input: &str) -> SymExpr {
        let expr = Parser::new(input).try_parse_full::<AstExpr>().unwrap();
        expand(&SymExpr::from(expr))
    }

    #[test]
    fn canonical_text_order() {
        assert_eq!(text(&expand_str("(x + 1)^2")), "x^2 + 2 * x + 1");
        assert_eq!(text(&expand_str("(1 + x)(2 + x)")), "x^2 + 3 * x + 2");
    }

    #[test]
    fn canonical_text_subtraction() {
        assert_eq!(text(&expand_str("(x + y)(x - y)")), "x^2 - y^2");
    }

    #[test]
    fn canonical_text_fractions() {
        assert_eq!(text(&expand_str("x/2 + x/3")), "5 * x / 6");
    }

    #[test]
    fn latex_powers_and_coefficients() {
        assert_eq!(latex(&expand_str("(x + 1)^2")), "x^{2} + 2 x + 1");
    }

    #[test]
    fn latex_fractions() {
        assert_eq!(latex(&expand_str("x/6")), "\\frac{x}{6}");
        assert_eq!(latex(&expand_str("1/6")), "\\frac{1}{6}");
    }

    #[test]
    fn latex_constants_and_calls() {
        assert_eq!(latex(&expand_str("2 pi r")), "2 \\pi r");
        assert_eq!(latex(&expand_str("sqrt(x + 1)")), "\\sqrt{x + 1}");
    }

    #[test]
    fn latex_parenthesizes_sums_in_powers() {
        // an exponent keeps the sum from expanding
        assert_eq!(latex(&expand_str("(x + 1)^y")), "\\left(x + 1\\right)^{y}");
    }

    #[test]
    fn clean_latex_removes_residue() {
        assert_eq!(clean_latex("1 \\cdot x"), "x");
        assert_eq!(clean_latex("x + -3"), "x - 3");
        assert_eq!(clean_latex("x^{2} + 2 x + 1"), "x^{2} + 2 x + 1");
    }
}
