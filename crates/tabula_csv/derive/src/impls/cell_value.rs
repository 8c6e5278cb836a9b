use proc_macro2::TokenStream;
use quote::quote;
use syn::WhereClause;

use crate::derive_data::RecordStruct;

/// Generate a `CellValue` that reports the record as an unsupported kind.
///
/// A record used as a plain field, without `#[csv(flatten)]`, then fails
/// with `UnsupportedKind` when encoded or decoded instead of failing to
/// compile, matching the other container types.
pub(crate) fn impl_cell_value(
    record: &RecordStruct,
    csv_path: &syn::Path,
    where_clause: &Option<WhereClause>,
) -> TokenStream {
    let cell_value_ = crate::path::cell_value_(csv_path);
    let cell_kind_ = crate::path::cell_kind_(csv_path);
    let cell_error_ = crate::path::cell_error_(csv_path);

    let ident = record.ident;
    let (impl_generics, ty_generics, _) = record.generics.split_for_impl();

    quote! {
        impl #impl_generics #cell_value_ for #ident #ty_generics #where_clause {
            const KIND: #cell_kind_ = #cell_kind_::Unsupported;

            #[inline]
            fn to_cell(&self) -> ::core::result::Result<::std::string::String, #cell_error_> {
                ::core::result::Result::Err(#cell_error_::unsupported::<Self>())
            }

            #[inline]
            fn from_cell(&mut self, _text: &str) -> ::core::result::Result<(), #cell_error_> {
                ::core::result::Result::Err(#cell_error_::unsupported::<Self>())
            }

            #[inline]
            fn is_empty_value(&self) -> bool {
                false
            }
        }
    }
}
