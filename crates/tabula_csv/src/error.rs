use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

// -----------------------------------------------------------------------------
// CellError

/// Failure to convert one value to or from a text cell.
///
/// Cell errors carry no position; the codec attaches the row and column
/// when it promotes them to a [`CsvError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CellError {
    #[error("type `{kind}` has no cell representation")]
    UnsupportedKind { kind: &'static str },

    #[error("invalid integer `{text}`: {source}")]
    Int { text: String, source: ParseIntError },

    #[error("invalid float `{text}`: {source}")]
    Float { text: String, source: ParseFloatError },

    #[error("invalid boolean `{text}`")]
    Bool { text: String },

    #[error("invalid date-time `{text}`: {source}")]
    DateTime {
        text: String,
        source: chrono::ParseError,
    },
}

impl CellError {
    /// The error every unsupported kind reports for both directions.
    #[inline]
    pub fn unsupported<T: ?Sized>() -> Self {
        Self::UnsupportedKind {
            kind: core::any::type_name::<T>(),
        }
    }
}

// -----------------------------------------------------------------------------
// ParseError

/// Failure to split a document into rows. Lines count from 1.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    #[error("line {line}: `\"` in unquoted field")]
    BareQuote { line: u64 },

    #[error("line {line}: extraneous `\"` after quoted field")]
    ExtraneousQuote { line: u64 },

    #[error("line {line}: quoted field is never closed")]
    UnterminatedQuote { line: u64 },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

// -----------------------------------------------------------------------------
// CsvError

/// Every way a [`marshal`](crate::marshal) or [`unmarshal`](crate::unmarshal)
/// call can fail. All of them abort the whole call.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CsvError {
    #[error("input record is absent")]
    NilInput,

    #[error("record at index {index} is absent")]
    NilElement { index: usize },

    #[error("column `{column}` holds unsupported type `{kind}`")]
    UnsupportedKind { column: String, kind: &'static str },

    #[error("row {row}, column `{column}`: {source}")]
    Conversion {
        row: usize,
        column: String,
        source: CellError,
    },

    #[error("column `{column}` is declared by more than one field")]
    DuplicateColumn { column: String },

    #[error("document has no rows")]
    EmptyDocument,

    #[error("document has a header but no data rows")]
    NoDataRows,

    #[error("malformed document: {0}")]
    Parse(#[source] ParseError),

    #[error("failed to render document: {0}")]
    Render(#[source] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CsvError {
    /// Attach a position to a [`CellError`].
    ///
    /// `row` is the document row, the header being row 0.
    pub(crate) fn at_cell(error: CellError, row: usize, column: &str) -> Self {
        match error {
            CellError::UnsupportedKind { kind } => Self::UnsupportedKind {
                column: column.to_owned(),
                kind,
            },
            source => Self::Conversion {
                row,
                column: column.to_owned(),
                source,
            },
        }
    }
}
