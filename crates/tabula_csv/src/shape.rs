//! Accepted input and target shapes.
//!
//! Encoding accepts a single record, a nullable reference to one, or a
//! sequence of records or record references ([`Records`]). Decoding fills a
//! single record or appends to a vector ([`Target`]). Any other shape is
//! rejected at compile time.

use std::rc::Rc;
use std::sync::Arc;

use crate::error::CsvError;
use crate::record::Tabular;

// -----------------------------------------------------------------------------
// AsRecord

/// An element of an encoded sequence: a record or a reference to one.
///
/// `#[derive(Tabular)]` implements it for the record itself.
pub trait AsRecord {
    type Record: Tabular;

    /// The referenced record, `None` for an absent reference.
    fn as_record(&self) -> Option<&Self::Record>;
}

impl<E: AsRecord + ?Sized> AsRecord for &E {
    type Record = E::Record;

    #[inline]
    fn as_record(&self) -> Option<&Self::Record> {
        (**self).as_record()
    }
}

macro_rules! impl_as_record_deref {
    ($($ptr:ident),*) => {$(
        impl<E: AsRecord + ?Sized> AsRecord for $ptr<E> {
            type Record = E::Record;

            #[inline]
            fn as_record(&self) -> Option<&Self::Record> {
                (**self).as_record()
            }
        }
    )*};
}

impl_as_record_deref!(Box, Rc, Arc);

impl<E: AsRecord> AsRecord for Option<E> {
    type Record = E::Record;

    #[inline]
    fn as_record(&self) -> Option<&Self::Record> {
        self.as_ref().and_then(AsRecord::as_record)
    }
}

// -----------------------------------------------------------------------------
// Records

/// Something that can be encoded: normalizes into an ordered list of records.
pub trait Records {
    type Record: Tabular;

    /// Collect the records in order.
    ///
    /// Fails with [`CsvError::NilInput`] for an absent top-level reference and
    /// [`CsvError::NilElement`] for an absent element of a sequence.
    fn records(&self) -> Result<Vec<&Self::Record>, CsvError>;
}

impl<E: AsRecord> Records for [E] {
    type Record = E::Record;

    fn records(&self) -> Result<Vec<&Self::Record>, CsvError> {
        self.iter()
            .enumerate()
            .map(|(index, element)| element.as_record().ok_or(CsvError::NilElement { index }))
            .collect()
    }
}

impl<E: AsRecord> Records for Vec<E> {
    type Record = E::Record;

    #[inline]
    fn records(&self) -> Result<Vec<&Self::Record>, CsvError> {
        self.as_slice().records()
    }
}

impl<E: AsRecord, const N: usize> Records for [E; N] {
    type Record = E::Record;

    #[inline]
    fn records(&self) -> Result<Vec<&Self::Record>, CsvError> {
        self.as_slice().records()
    }
}

/// A nullable reference to a single record.
impl<E: AsRecord> Records for Option<E> {
    type Record = E::Record;

    fn records(&self) -> Result<Vec<&Self::Record>, CsvError> {
        self.as_record()
            .map(|record| vec![record])
            .ok_or(CsvError::NilInput)
    }
}

impl<S: Records + ?Sized> Records for &S {
    type Record = S::Record;

    #[inline]
    fn records(&self) -> Result<Vec<&Self::Record>, CsvError> {
        (**self).records()
    }
}

impl<S: Records + ?Sized> Records for Box<S> {
    type Record = S::Record;

    #[inline]
    fn records(&self) -> Result<Vec<&Self::Record>, CsvError> {
        (**self).records()
    }
}

// -----------------------------------------------------------------------------
// FromRecord

/// An element of a decoded vector: a record or an owning reference to one.
///
/// `#[derive(Tabular)]` implements it for the record itself.
pub trait FromRecord: Sized {
    type Record: Tabular;

    fn from_record(record: Self::Record) -> Self;
}

macro_rules! impl_from_record_wrapper {
    ($($wrapper:ident => $wrap:expr),*) => {$(
        impl<E: FromRecord> FromRecord for $wrapper<E> {
            type Record = E::Record;

            #[inline]
            fn from_record(record: Self::Record) -> Self {
                $wrap(E::from_record(record))
            }
        }
    )*};
}

impl_from_record_wrapper! {
    Box => Box::new,
    Rc => Rc::new,
    Arc => Arc::new,
    Option => Some
}

// -----------------------------------------------------------------------------
// Target

/// Something decoded records can be stored into.
pub trait Target {
    type Record: Tabular;

    /// Store the decoded records, in document order.
    fn fill(&mut self, records: Vec<Self::Record>) -> Result<(), CsvError>;
}

/// Decoded records are appended after the existing elements.
impl<E: FromRecord> Target for Vec<E> {
    type Record = E::Record;

    fn fill(&mut self, records: Vec<Self::Record>) -> Result<(), CsvError> {
        self.extend(records.into_iter().map(E::from_record));
        Ok(())
    }
}

/// A single optional record, set to the first decoded record.
impl<E: FromRecord> Target for Option<E> {
    type Record = E::Record;

    fn fill(&mut self, records: Vec<Self::Record>) -> Result<(), CsvError> {
        *self = Some(E::from_record(first_record(records)?));
        Ok(())
    }
}

/// Take the record a single-record target keeps.
///
/// Later records were decoded all the same and are dropped here.
#[doc(hidden)]
pub fn first_record<R>(records: Vec<R>) -> Result<R, CsvError> {
    records.into_iter().next().ok_or(CsvError::NoDataRows)
}
