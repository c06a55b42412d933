use std::ops::Range;
use crate::{
    parser::{
        binary::Binary,
        expr::{Expr, Primary},
        error::Error,
        token::op::UnaryOp,
        Parse,
        Parser,
    },
    try_parse_catch_fatal,
};

/// A unary expression, such as `-x`. Unary expressions can include nested expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary expression, or lower precedence expressions.
    pub fn parse_or_lower(input: &mut Parser) -> Result<Expr, Error> {
        let _ = try_parse_catch_fatal!(input.try_parse::<Unary>().map(Expr::Unary));
        input.try_parse::<Primary>().map(Into::into)
    }
}

impl Parse for Unary {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let op = input.try_parse::<UnaryOp>()?;
        let start_span = op.span.start;

        // the operand binds everything with higher precedence than the operator, so that `-x^2`
        // parses as `-(x^2)` while `-x + 2` parses as `(-x) + 2`
        let operand = {
            let lhs = input.try_parse_with_fn(Self::parse_or_lower)?;
            Binary::parse_expr(input, lhs, op.precedence())?
        };
        let end_span = operand.span().end;

        Ok(Self {
            operand: Box::new(operand),
            op,
            span: start_span..end_span,
        })
    }
}
