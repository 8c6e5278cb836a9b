//! Conversion between field values and text cells.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, FixedOffset, Local, SecondsFormat, Utc};

use crate::error::CellError;

// -----------------------------------------------------------------------------
// CellKind

/// The kind of value a leaf field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    Int,
    Uint,
    Float,
    Bool,
    Text,
    DateTime,
    /// A kind with no cell representation. Converting it fails with
    /// [`CellError::UnsupportedKind`].
    Unsupported,
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => f.pad("Int"),
            Self::Uint => f.pad("Uint"),
            Self::Float => f.pad("Float"),
            Self::Bool => f.pad("Bool"),
            Self::Text => f.pad("Text"),
            Self::DateTime => f.pad("DateTime"),
            Self::Unsupported => f.pad("Unsupported"),
        }
    }
}

// -----------------------------------------------------------------------------
// CellValue

/// A value that can be stored in a single text cell.
///
/// Implemented for the signed and unsigned integers, floats, `bool`,
/// [`String`] and the `chrono` date-time types. A few container types
/// implement it only to report [`CellError::UnsupportedKind`] at run time,
/// as does every `#[derive(Tabular)]` record used as a plain field.
///
/// # Examples
///
/// ```
/// use tabula_csv::CellValue;
///
/// let mut n = 0_u16;
/// n.from_cell("8080").unwrap();
/// assert_eq!(n.to_cell().unwrap(), "8080");
///
/// // An empty cell decodes to the zero value.
/// n.from_cell("").unwrap();
/// assert_eq!(n, 0);
/// ```
pub trait CellValue {
    const KIND: CellKind;

    /// Render the value as cell text.
    fn to_cell(&self) -> Result<String, CellError>;

    /// Overwrite the value with the content of `text`.
    fn from_cell(&mut self, text: &str) -> Result<(), CellError>;

    /// Whether the value counts as empty for `omitempty` columns.
    fn is_empty_value(&self) -> bool;
}

// -----------------------------------------------------------------------------
// Numbers

macro_rules! impl_integer {
    ($kind:ident: $($ty:ty),*) => {$(
        impl CellValue for $ty {
            const KIND: CellKind = CellKind::$kind;

            #[inline]
            fn to_cell(&self) -> Result<String, CellError> {
                Ok(self.to_string())
            }

            fn from_cell(&mut self, text: &str) -> Result<(), CellError> {
                *self = if text.is_empty() {
                    0
                } else {
                    text.parse().map_err(|source| CellError::Int {
                        text: text.to_owned(),
                        source,
                    })?
                };
                Ok(())
            }

            #[inline]
            fn is_empty_value(&self) -> bool {
                *self == 0
            }
        }
    )*};
}

impl_integer!(Int: i8, i16, i32, i64, i128, isize);
impl_integer!(Uint: u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),*) => {$(
        impl CellValue for $ty {
            const KIND: CellKind = CellKind::Float;

            // `Display` for floats is the shortest text that parses back
            // to the same value, and never uses an exponent.
            #[inline]
            fn to_cell(&self) -> Result<String, CellError> {
                Ok(self.to_string())
            }

            fn from_cell(&mut self, text: &str) -> Result<(), CellError> {
                *self = if text.is_empty() {
                    0.0
                } else {
                    text.parse().map_err(|source| CellError::Float {
                        text: text.to_owned(),
                        source,
                    })?
                };
                Ok(())
            }

            #[inline]
            fn is_empty_value(&self) -> bool {
                *self == 0.0
            }
        }
    )*};
}

impl_float!(f32, f64);

// -----------------------------------------------------------------------------
// Bool & Text

impl CellValue for bool {
    const KIND: CellKind = CellKind::Bool;

    #[inline]
    fn to_cell(&self) -> Result<String, CellError> {
        Ok(self.to_string())
    }

    fn from_cell(&mut self, text: &str) -> Result<(), CellError> {
        *self = match text {
            "" | "0" | "f" | "F" | "false" | "FALSE" | "False" => false,
            "1" | "t" | "T" | "true" | "TRUE" | "True" => true,
            _ => {
                return Err(CellError::Bool {
                    text: text.to_owned(),
                });
            }
        };
        Ok(())
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        !*self
    }
}

impl CellValue for String {
    const KIND: CellKind = CellKind::Text;

    #[inline]
    fn to_cell(&self) -> Result<String, CellError> {
        Ok(self.clone())
    }

    #[inline]
    fn from_cell(&mut self, text: &str) -> Result<(), CellError> {
        self.clear();
        self.push_str(text);
        Ok(())
    }

    #[inline]
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Date-time

fn parse_rfc3339(text: &str) -> Result<DateTime<FixedOffset>, CellError> {
    DateTime::parse_from_rfc3339(text).map_err(|source| CellError::DateTime {
        text: text.to_owned(),
        source,
    })
}

macro_rules! impl_date_time {
    ($($tz:ty => $convert:expr),*) => {$(
        /// RFC 3339 text, with only as many fractional digits as needed.
        /// The zero instant is the Unix epoch.
        impl CellValue for DateTime<$tz> {
            const KIND: CellKind = CellKind::DateTime;

            #[inline]
            fn to_cell(&self) -> Result<String, CellError> {
                Ok(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }

            fn from_cell(&mut self, text: &str) -> Result<(), CellError> {
                let convert: fn(DateTime<FixedOffset>) -> Self = $convert;
                *self = convert(parse_rfc3339(text)?);
                Ok(())
            }

            #[inline]
            fn is_empty_value(&self) -> bool {
                self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
            }
        }
    )*};
}

impl_date_time! {
    Utc => |t| t.with_timezone(&Utc),
    FixedOffset => |t| t,
    Local => |t| t.with_timezone(&Local)
}

// -----------------------------------------------------------------------------
// Unsupported

macro_rules! impl_unsupported {
    ($([$($generics:tt)*] $ty:ty => $is_empty:expr),*) => {$(
        impl<$($generics)*> CellValue for $ty {
            const KIND: CellKind = CellKind::Unsupported;

            #[inline]
            fn to_cell(&self) -> Result<String, CellError> {
                Err(CellError::unsupported::<Self>())
            }

            #[inline]
            fn from_cell(&mut self, _text: &str) -> Result<(), CellError> {
                Err(CellError::unsupported::<Self>())
            }

            #[inline]
            fn is_empty_value(&self) -> bool {
                let is_empty: fn(&Self) -> bool = $is_empty;
                is_empty(self)
            }
        }
    )*};
}

impl_unsupported! {
    [V] Option<V> => Option::is_none,
    [V] Vec<V> => |_| false,
    [K, V, S] HashMap<K, V, S> => |_| false,
    [K, V] BTreeMap<K, V> => |_| false
}
