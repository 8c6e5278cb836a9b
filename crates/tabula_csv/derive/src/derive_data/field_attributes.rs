use syn::{Attribute, Ident, LitStr, spanned::Spanned};

use crate::CSV_ATTRIBUTE_NAME;

/// What a `#[csv(...)]` attribute says about one field.
///
/// - `#[csv("name")]`, `#[csv("name,omitempty")]`, `#[csv(",omitempty")]`:
///   a leaf column with an annotation.
/// - `#[csv(flatten)]`: an embedded sub-record.
/// - no attribute: a leaf column named after the field.
#[derive(Default, Debug)]
pub(crate) enum FieldAttributes {
    #[default]
    Plain,
    Annotated(LitStr),
    Flatten,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = FieldAttributes::Plain;

        for attr in attrs.iter().filter(|a| a.path().is_ident(CSV_ATTRIBUTE_NAME)) {
            if !matches!(result, FieldAttributes::Plain) {
                return Err(syn::Error::new(
                    attr.span(),
                    "a field accepts a single `#[csv(...)]` attribute",
                ));
            }

            result = attr.parse_args_with(|input: syn::parse::ParseStream| {
                if input.peek(LitStr) {
                    return Ok(FieldAttributes::Annotated(input.parse()?));
                }

                let ident: Ident = input.parse()?;
                if ident == "flatten" {
                    Ok(FieldAttributes::Flatten)
                } else {
                    Err(syn::Error::new(
                        ident.span(),
                        "expected a column annotation such as `\"name,omitempty\"` or `flatten`",
                    ))
                }
            })?;
        }

        Ok(result)
    }
}
