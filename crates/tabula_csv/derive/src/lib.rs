//! See [`Tabular`](derive_tabular).
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static CSV_ATTRIBUTE_NAME: &str = "csv";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Tabular Derivation
///
/// `#[derive(Tabular)]` describes a struct with named fields as a CSV record
/// and implements the following traits:
///
/// - `Tabular`: the ordered field declarations.
/// - `Embedded`: so the record can be flattened into another one.
/// - `AsRecord` and `Records`: so the record, references to it and
///   sequences of it can be encoded.
/// - `FromRecord` and `Target`: so the record and vectors of it can be
///   decoded into.
/// - `CellValue`: reporting `UnsupportedKind`, for a record used as a
///   plain field.
///
/// The record must also implement `Default`; decoded rows start from it.
///
/// ## Columns
///
/// Every field is a column, in declaration order. The column is named
/// after the field unless an annotation gives another name:
///
/// ```rust, ignore
/// #[derive(Tabular, Default)]
/// struct User {
///     #[csv("user_id")]
///     id: String,          // column `user_id`
///     name: String,        // column `name`
///     #[csv(",omitempty")]
///     nickname: String,    // column `nickname`, may be left out
/// }
/// ```
///
/// The annotation is `"name"` or `"name,omitempty"`. An empty name keeps
/// the field name. Spaces around tokens are ignored.
///
/// ## Omit Empty
///
/// A column marked `omitempty` is left out of the encoded document when
/// the field is empty in every record: zero numbers, `false`, the empty
/// string, an absent `Option`. It is written for all records as soon as
/// one of them is non-empty.
///
/// ## Flatten
///
/// `#[csv(flatten)]` splices the columns of a sub-record in place of the
/// field. The sub-record may be held directly, in a `Box`, or in an
/// `Option`:
///
/// ```rust, ignore
/// #[derive(Tabular, Default)]
/// struct Base {
///     #[csv("id")]
///     id: u64,
/// }
///
/// #[derive(Tabular, Default)]
/// struct Entry {
///     #[csv(flatten)]
///     base: Option<Box<Base>>, // columns: `id`
///     #[csv("note")]
///     note: String,            // columns: `id,note`
/// }
/// ```
///
/// An absent optional sub-record encodes as a default one and is allocated
/// when a decoded row writes to one of its columns.
///
/// Sub-records are resolved recursively, so a record must not flatten
/// itself, directly or through others.
///
/// ## Generics
///
/// Generic records are supported. The generated impls require each plain
/// field type to be a `CellValue` and each flattened one to be `Embedded`.
///
/// This attribute can only be used on structs with named fields and on
/// unit structs.
#[proc_macro_derive(Tabular, attributes(csv))]
pub fn derive_tabular(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match impls::derive_tabular(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
