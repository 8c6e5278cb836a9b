//! Transcode record types to and from comma-separated text.
//!
//! A record type describes its fields through [`Tabular`], usually by
//! deriving it. Leaf fields become columns, in declaration order, and
//! `#[csv(flatten)]` sub-records splice their own columns in place:
//!
//! ```
//! use tabula_csv::Tabular;
//!
//! #[derive(Tabular, Default, Debug, PartialEq)]
//! struct Base {
//!     #[csv("id")]
//!     id: u64,
//!     #[csv("name")]
//!     name: String,
//! }
//!
//! #[derive(Tabular, Default, Debug, PartialEq)]
//! struct Entry {
//!     #[csv(flatten)]
//!     base: Base,
//!     #[csv("extra,omitempty")]
//!     extra: String,
//! }
//!
//! let entries = vec![Entry {
//!     base: Base { id: 7, name: "Alice".into() },
//!     extra: String::new(),
//! }];
//!
//! // `extra` is empty in every record, so its column is left out.
//! let text = tabula_csv::marshal(&entries).unwrap();
//! assert_eq!(text, b"id,name\n7,Alice\n");
//!
//! let mut decoded: Vec<Entry> = Vec::new();
//! tabula_csv::unmarshal(&text, &mut decoded).unwrap();
//! assert_eq!(decoded, entries);
//! ```

// Derive output names this crate `::tabula_csv`, also from inside it.
extern crate self as tabula_csv;

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod codec;
mod decode;
mod encode;
mod error;
mod field;
mod record;
mod shape;
mod text;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use cell::{CellKind, CellValue};
pub use codec::{Codec, CsvOptions, marshal, unmarshal};
pub use error::{CellError, CsvError, ParseError};
pub use field::{LeafField, PathStep, resolve_fields};
pub use record::{Embedded, RecordType, Tabular};
pub use shape::{AsRecord, FromRecord, Records, Target};

#[cfg(feature = "derive")]
pub use tabula_csv_derive::Tabular;

#[doc(hidden)]
pub mod __macro_exports {
    pub use crate::shape::first_record;
}
