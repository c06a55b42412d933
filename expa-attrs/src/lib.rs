mod error_kind;

use error_kind::ReportParts;
use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `ErrorKind` trait for the given type.
///
/// The information of the error is supplied through the `error` attribute by adding the
/// corresponding tags to it:
///
/// ```ignore
/// use expa_attrs::ErrorKind;
/// use expa_error::ErrorKind;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(message = "unexpected end of file", labels = ["add something here"])]
/// pub struct Foo;
/// ```
///
/// The following tags are available:
///
/// | Tag       | Description                                                                  |
/// | --------- | ---------------------------------------------------------------------------- |
/// | `message` | The message displayed at the top of the error when it is displayed.          |
/// | `labels`  | An array of label texts, paired with the error's spans in order.             |
/// | `help`    | Optional help text for the error, describing what the user can do to fix it. |
///
/// Each tag accepts an expression that is evaluated with `self` in scope, so the error's fields
/// can be used in the expression as `self.field`.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    match ReportParts::from_derive_input(&input) {
        Ok(parts) => parts.build_impl(&input).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
