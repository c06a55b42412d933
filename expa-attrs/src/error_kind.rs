use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Expr, Result};

/// The pieces of the report, read from the `#[error(...)]` attribute.
///
/// Each piece is an arbitrary expression, evaluated inside the generated `build_report` with
/// `self` in scope, so error fields are reachable as `self.field`.
pub struct ReportParts {
    /// The message displayed at the top of the report.
    message: Expr,

    /// An array of label texts, one per span. An empty text produces an unlabeled highlight.
    labels: Expr,

    /// Optional help text displayed at the bottom of the report.
    help: Option<Expr>,
}

impl ReportParts {
    /// Reads the report pieces out of the `#[error(...)]` attribute on the deriving type.
    pub fn from_derive_input(input: &DeriveInput) -> Result<Self> {
        let attr = input.attrs.iter()
            .find(|attr| attr.path().is_ident("error"))
            .ok_or_else(|| syn::Error::new_spanned(
                &input.ident,
                "deriving `ErrorKind` requires an `#[error(...)]` attribute",
            ))?;

        let mut message = None;
        let mut labels = None;
        let mut help = None;

        attr.parse_nested_meta(|meta| {
            let value: Expr = meta.value()?.parse()?;
            if meta.path.is_ident("message") {
                message = Some(value);
            } else if meta.path.is_ident("labels") {
                labels = Some(value);
            } else if meta.path.is_ident("help") {
                help = Some(value);
            } else {
                return Err(meta.error("expected `message`, `labels`, or `help`"));
            }
            Ok(())
        })?;

        Ok(Self {
            message: message.ok_or_else(|| syn::Error::new_spanned(attr, "missing `message`"))?,
            labels: labels.ok_or_else(|| syn::Error::new_spanned(attr, "missing `labels`"))?,
            help,
        })
    }

    /// Generates the body of the `ErrorKind` implementation.
    pub fn build_impl(&self, input: &DeriveInput) -> TokenStream {
        let name = &input.ident;
        let message = &self.message;
        let labels = &self.labels;
        let help = self.help.as_ref().map(|expr| quote! { builder.set_help(#expr); });

        quote! {
            impl ErrorKind for #name {
                fn build_report<'a>(
                    &self,
                    src_id: &'a str,
                    spans: &[std::ops::Range<usize>],
                ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                    let mut builder = ariadne::Report::build(
                        ariadne::ReportKind::Error,
                        src_id,
                        spans[0].start,
                    )
                        .with_message(#message)
                        .with_labels(
                            #labels
                                .into_iter()
                                .zip(spans)
                                .map(|(text, span)| {
                                    let mut label = ariadne::Label::new((src_id, span.clone()))
                                        .with_color(expa_error::EXPR);
                                    if !text.is_empty() {
                                        label = label.with_message(text);
                                    }
                                    label
                                })
                                .collect::<Vec<_>>(),
                        );

                    #help
                    builder.finish()
                }
            }
        }
    }
}
