//! Read and write whole documents on disk.
//!
//! The file extension picks a [`Format`] from a [`Formats`] registry, so
//! the CSV codec sits next to JSON, TOML and YAML without knowing about files.
//! Paths written through [`save_file`] may contain `*`, replaced by the
//! current local time, and patterns read through [`read_file`] resolve to
//! the latest matching file:
//!
//! ```no_run
//! use tabula_csv::Tabular;
//! use tabula_fs::{Formats, read_file, write_file};
//!
//! #[derive(Tabular, Default, serde::Serialize, serde::Deserialize)]
//! struct Ticket {
//!     #[csv("name")]
//!     name: String,
//! }
//!
//! let formats = Formats::<Vec<Ticket>>::standard();
//! let tickets = vec![Ticket { name: "Alice".into() }];
//!
//! // Written to e.g. `out/tickets_20240229_123000.csv`.
//! write_file(&tickets, "out/tickets_*.csv", &formats)?;
//!
//! let mut latest = Vec::new();
//! read_file(&mut latest, "out/tickets_*.csv", &formats)?;
//! # Ok::<(), tabula_fs::FsError>(())
//! ```

// -----------------------------------------------------------------------------
// Modules

mod error;
mod file;
mod format;
mod path;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::FsError;
pub use file::{read_file, read_file_with, save_file, write_file, write_file_with};
pub use format::{CsvFormat, Format, Formats, JsonFormat, TomlFormat, YamlFormat};
pub use path::{
    TIMESTAMP_FORMAT, latest_file_by_mod_time, latest_file_by_name, timestamp_file_name,
    timestamp_file_name_at,
};
