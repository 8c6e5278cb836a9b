use proc_macro2::TokenStream;
use quote::quote;
use syn::WhereClause;

use crate::derive_data::RecordStruct;

/// Generate the shape traits that let a record stand for itself:
/// `Embedded`, `AsRecord`, `FromRecord`, `Records` and `Target`.
///
/// These are emitted per record instead of as blanket impls so that the
/// pointer and container impls in `tabula_csv` stay coherent.
pub(crate) fn impl_shape_traits(
    record: &RecordStruct,
    csv_path: &syn::Path,
    where_clause: &Option<WhereClause>,
) -> TokenStream {
    let embedded_ = crate::path::embedded_(csv_path);
    let as_record_ = crate::path::as_record_(csv_path);
    let from_record_ = crate::path::from_record_(csv_path);
    let records_ = crate::path::records_(csv_path);
    let target_ = crate::path::target_(csv_path);
    let csv_error_ = crate::path::csv_error_(csv_path);
    let macro_exports_ = crate::path::macro_exports_(csv_path);

    let ident = record.ident;
    let (impl_generics, ty_generics, _) = record.generics.split_for_impl();

    quote! {
        impl #impl_generics #embedded_ for #ident #ty_generics #where_clause {
            type Record = Self;
            const OPTIONAL: bool = false;

            #[inline]
            fn record(&self) -> ::core::option::Option<&Self> {
                ::core::option::Option::Some(self)
            }

            #[inline]
            fn record_mut(&mut self) -> &mut Self {
                self
            }
        }

        impl #impl_generics #as_record_ for #ident #ty_generics #where_clause {
            type Record = Self;

            #[inline]
            fn as_record(&self) -> ::core::option::Option<&Self> {
                ::core::option::Option::Some(self)
            }
        }

        impl #impl_generics #from_record_ for #ident #ty_generics #where_clause {
            type Record = Self;

            #[inline]
            fn from_record(record: Self) -> Self {
                record
            }
        }

        impl #impl_generics #records_ for #ident #ty_generics #where_clause {
            type Record = Self;

            #[inline]
            fn records(&self) -> ::core::result::Result<::std::vec::Vec<&Self>, #csv_error_> {
                ::core::result::Result::Ok(::std::vec![self])
            }
        }

        impl #impl_generics #target_ for #ident #ty_generics #where_clause {
            type Record = Self;

            fn fill(
                &mut self,
                records: ::std::vec::Vec<Self>,
            ) -> ::core::result::Result<(), #csv_error_> {
                *self = #macro_exports_::first_record(records)?;
                ::core::result::Result::Ok(())
            }
        }
    }
}
