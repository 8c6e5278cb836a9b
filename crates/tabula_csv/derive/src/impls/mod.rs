//! Generate the trait implementations of `#[derive(Tabular)]`.

// -----------------------------------------------------------------------------
// Modules

mod cell_value;
mod shape_traits;
mod trait_tabular;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, WhereClause, parse_quote};

use crate::derive_data::{FieldAttributes, RecordStruct};

/// Expand `#[derive(Tabular)]` for `input`.
///
/// Everything is emitted inside an anonymous `const _` block so that the
/// crate path and helper imports never leak into the caller's scope.
pub(crate) fn derive_tabular(input: &DeriveInput) -> syn::Result<TokenStream> {
    let record = RecordStruct::from_input(input)?;
    let csv_path = crate::path::tabula_csv();

    let where_clause = record_where_clause(&record, &csv_path);

    let tabular = trait_tabular::impl_tabular(&record, &csv_path, &where_clause);
    let shapes = shape_traits::impl_shape_traits(&record, &csv_path, &where_clause);
    let cell_value = cell_value::impl_cell_value(&record, &csv_path, &where_clause);

    Ok(quote! {
        const _: () = {
            #tabular
            #shapes
            #cell_value
        };
    })
}

/// The caller's where clause, plus the bounds generic records need.
///
/// Non-generic records get the caller's clause unchanged, so mistakes in
/// field types are reported at the field rather than at the impl.
fn record_where_clause(record: &RecordStruct, csv_path: &syn::Path) -> Option<WhereClause> {
    if record.generics.params.is_empty() {
        return record.generics.where_clause.clone();
    }

    let mut where_clause = record
        .generics
        .where_clause
        .clone()
        .unwrap_or_else(|| parse_quote!(where));

    let cell_value_ = crate::path::cell_value_(csv_path);
    let embedded_ = crate::path::embedded_(csv_path);

    where_clause
        .predicates
        .push(parse_quote!(Self: ::core::default::Default + 'static));

    for field in &record.fields {
        let ty = field.ty;
        where_clause.predicates.push(match field.attrs {
            FieldAttributes::Flatten => parse_quote!(#ty: #embedded_),
            FieldAttributes::Plain | FieldAttributes::Annotated(_) => {
                parse_quote!(#ty: #cell_value_ + 'static)
            }
        });
    }

    Some(where_clause)
}
