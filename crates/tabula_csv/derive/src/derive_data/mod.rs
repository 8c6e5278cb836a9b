//! Parse the input of `#[derive(Tabular)]`.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod record_struct;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use record_struct::{RecordField, RecordStruct};
