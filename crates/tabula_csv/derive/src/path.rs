//! Paths of runtime items named by generated code.
//!
//! Kept in one place so a change in the `tabula_csv` layout touches only
//! this module.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the access path to the `tabula_csv` crate.
///
/// 1. For crates that depend on `tabula_csv`, `::tabula_csv` is returned.
/// 2. For crates that depend on `tabula`, `::tabula::csv` is returned.
/// 3. For other situations, `::tabula_csv` is returned, which may be incorrect.
///
/// Reading the caller's manifest is not cheap, so the path is resolved once
/// per expansion and passed around.
pub(crate) fn tabula_csv() -> syn::Path {
    tabula_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("tabula_csv"))
}

#[inline(always)]
pub(crate) fn tabular_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::Tabular)
}

#[inline(always)]
pub(crate) fn record_type_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::RecordType)
}

#[inline(always)]
pub(crate) fn embedded_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::Embedded)
}

#[inline(always)]
pub(crate) fn as_record_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::AsRecord)
}

#[inline(always)]
pub(crate) fn from_record_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::FromRecord)
}

#[inline(always)]
pub(crate) fn records_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::Records)
}

#[inline(always)]
pub(crate) fn target_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::Target)
}

#[inline(always)]
pub(crate) fn cell_value_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::CellValue)
}

#[inline(always)]
pub(crate) fn cell_kind_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::CellKind)
}

#[inline(always)]
pub(crate) fn cell_error_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::CellError)
}

#[inline(always)]
pub(crate) fn csv_error_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::CsvError)
}

#[inline(always)]
pub(crate) fn macro_exports_(csv_path: &syn::Path) -> TokenStream {
    quote!(#csv_path::__macro_exports)
}
