#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use tabula_csv as csv;
pub use tabula_utils as utils;

#[cfg(feature = "fs")]
pub use tabula_fs as fs;
