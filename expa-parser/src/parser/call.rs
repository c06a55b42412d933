use std::ops::Range;
use super::{
    error::{kind, Error},
    expr::Expr,
    literal::LitSym,
    token::{CloseParen, OpenParen},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

/// A function call, such as `sqrt(2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// The name of the function to call.
    pub name: LitSym,

    /// The arguments to the function.
    pub args: Vec<Expr>,

    /// The region of the source code that this function call was parsed from.
    pub span: Range<usize>,

    /// The span of the parentheses that surround the arguments.
    pub paren_span: Range<usize>,
}

impl Call {
    /// Returns the span of the function call.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Call {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        let name = input.try_parse::<LitSym>()?;
        let open_paren = input.try_parse::<OpenParen>()?;

        // an empty argument list must be caught here; `Expr::parse` would otherwise see the `)`
        // and report it as a stray closing parenthesis
        if let Ok(close_paren) = input.clone().try_parse::<CloseParen>() {
            return Err(Error::new_fatal(
                vec![name.span.start..close_paren.span.end],
                kind::MissingCallArguments { name: name.name },
            ));
        }

        let args = match input.try_parse_delimited::<Expr>(TokenKind::Comma) {
            Ok(args) => args,
            Err(err) if err.fatal => return Err(err),
            Err(_) => Vec::new(),
        };

        let close_paren = input.try_parse::<CloseParen>()
            .map_err(|_| Error::new_fatal(
                vec![open_paren.span.clone()],
                kind::UnclosedParenthesis { opening: true },
            ))?;

        if args.is_empty() {
            return Err(Error::new_fatal(
                vec![name.span.start..close_paren.span.end],
                kind::MissingCallArguments { name: name.name },
            ));
        }

        let span = name.span.start..close_paren.span.end;
        Ok(Self {
            name,
            args,
            span,
            paren_span: open_paren.span.start..close_paren.span.end,
        })
    }
}
