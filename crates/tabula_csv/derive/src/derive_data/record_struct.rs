use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, Generics, Ident, Type, spanned::Spanned};

use super::FieldAttributes;

/// A named field of the deriving struct.
pub(crate) struct RecordField<'a> {
    pub ident: &'a Ident,
    /// The declared name, without any `r#` prefix.
    pub name: String,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

/// The deriving struct: a struct with named fields.
pub(crate) struct RecordStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub fields: Vec<RecordField<'a>>,
}

impl<'a> RecordStruct<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let named = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                Fields::Unit => {
                    return Ok(Self {
                        ident: &input.ident,
                        generics: &input.generics,
                        fields: Vec::new(),
                    });
                }
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "`Tabular` records need named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`Tabular` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`Tabular` cannot be derived for unions",
                ));
            }
        };

        let fields = named
            .named
            .iter()
            .map(|field| {
                // Named fields always carry an ident.
                let ident = field
                    .ident
                    .as_ref()
                    .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;
                Ok(RecordField {
                    ident,
                    name: ident.unraw().to_string(),
                    ty: &field.ty,
                    attrs: FieldAttributes::parse_attrs(&field.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        Ok(Self {
            ident: &input.ident,
            generics: &input.generics,
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_fields_in_order() {
        let input: DeriveInput = syn::parse_quote! {
            struct Row {
                #[csv("id")]
                id: u64,
                r#type: String,
                #[csv(flatten)]
                base: Option<Box<Base>>,
            }
        };
        let record = RecordStruct::from_input(&input).unwrap();
        let names: Vec<_> = record.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["id", "type", "base"]);
        assert!(matches!(record.fields[2].attrs, FieldAttributes::Flatten));
    }

    #[test]
    fn rejects_other_shapes() {
        let tuple: DeriveInput = syn::parse_quote!(struct Pair(u8, u8););
        assert!(RecordStruct::from_input(&tuple).is_err());

        let enumeration: DeriveInput = syn::parse_quote!(enum Kind { A, B });
        assert!(RecordStruct::from_input(&enumeration).is_err());

        let unit: DeriveInput = syn::parse_quote!(struct Nothing;);
        assert!(RecordStruct::from_input(&unit).unwrap().fields.is_empty());
    }
}
