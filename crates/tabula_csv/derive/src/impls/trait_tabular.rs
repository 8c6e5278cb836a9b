use proc_macro2::TokenStream;
use quote::quote;
use syn::WhereClause;

use crate::derive_data::{FieldAttributes, RecordField, RecordStruct};

/// Generate `Tabular`, declaring fields in their source order.
///
/// ```ignore
/// impl Tabular for Row {
///     fn record_type() -> RecordType<Self> {
///         RecordType::new("Row")
///             .field("id", Some("id,omitempty"), |r: &Self| &r.id, |r: &mut Self| &mut r.id)
///             .embed("base", |r: &Self| &r.base, |r: &mut Self| &mut r.base)
///     }
/// }
/// ```
pub(crate) fn impl_tabular(
    record: &RecordStruct,
    csv_path: &syn::Path,
    where_clause: &Option<WhereClause>,
) -> TokenStream {
    let tabular_ = crate::path::tabular_(csv_path);
    let record_type_ = crate::path::record_type_(csv_path);

    let ident = record.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, _) = record.generics.split_for_impl();

    let declarations = record.fields.iter().map(declare_field);

    quote! {
        impl #impl_generics #tabular_ for #ident #ty_generics #where_clause {
            fn record_type() -> #record_type_<Self> {
                #record_type_::new(#type_name)
                    #(#declarations)*
            }
        }
    }
}

fn declare_field(field: &RecordField) -> TokenStream {
    let RecordField {
        ident, name, attrs, ..
    } = field;

    match attrs {
        FieldAttributes::Flatten => quote! {
            .embed(#name, |r: &Self| &r.#ident, |r: &mut Self| &mut r.#ident)
        },
        FieldAttributes::Annotated(annotation) => quote! {
            .field(
                #name,
                ::core::option::Option::Some(#annotation),
                |r: &Self| &r.#ident,
                |r: &mut Self| &mut r.#ident,
            )
        },
        FieldAttributes::Plain => quote! {
            .field(
                #name,
                ::core::option::Option::None,
                |r: &Self| &r.#ident,
                |r: &mut Self| &mut r.#ident,
            )
        },
    }
}
