use std::ops::Range;
use super::{
    error::Error,
    token::{Float, Int, Name},
    Parse,
    Parser,
};

/// An integer literal, such as `123`.
///
/// The digits are kept as a string so that arbitrarily large integers survive parsing; conversion
/// to a big integer happens when the expression is lowered into its symbolic form.
#[derive(Debug, Clone, PartialEq)]
pub struct LitInt {
    /// The digits of the integer literal.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitInt {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Int>()?;
        Ok(Self {
            value: token.lexeme,
            span: token.span,
        })
    }
}

/// A floating-point literal, such as `2.5`.
#[derive(Debug, Clone, PartialEq)]
pub struct LitFloat {
    /// The value of the float literal.
    pub value: f64,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitFloat {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Float>()?;
        Ok(Self {
            // the token regex only admits digits and a dot, so this cannot fail
            value: token.lexeme.parse().unwrap(),
            span: token.span,
        })
    }
}

/// A symbol / identifier literal, such as `x`. Symbols are used to represent variables and
/// function names.
#[derive(Debug, Clone, PartialEq)]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl Parse for LitSym {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let token = input.try_parse::<Name>()?;
        Ok(Self {
            name: token.lexeme,
            span: token.span,
        })
    }
}

/// Represents a literal value.
///
/// A literal is any value that is written directly into the source code, such as the number `1`
/// or the variable `x`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// An integer literal, such as `123`.
    Integer(LitInt),

    /// A floating-point literal, such as `2.5`.
    Float(LitFloat),

    /// A symbol / identifier literal, such as `x`.
    Symbol(LitSym),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Integer(int) => int.span.clone(),
            Literal::Float(float) => float.span.clone(),
            Literal::Symbol(name) => name.span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        input.try_parse::<LitFloat>().map(Literal::Float)
            .or_else(|_| input.try_parse::<LitInt>().map(Literal::Integer))
            .or_else(|_| input.try_parse::<LitSym>().map(Literal::Symbol))
    }
}
