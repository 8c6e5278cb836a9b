//! Small helpers shared by the `tabula` crates.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Modules

mod default;

pub mod cond;

// -----------------------------------------------------------------------------
// Top-level exports

pub use default::default;
