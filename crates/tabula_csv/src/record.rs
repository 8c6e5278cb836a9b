//! Record type descriptors.
//!
//! A [`RecordType`] lists a record's declared fields in declaration order.
//! It is usually produced by `#[derive(Tabular)]`, but can be built by hand:
//!
//! ```
//! use tabula_csv::{RecordType, Tabular, resolve_fields};
//!
//! #[derive(Default)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! impl Tabular for Point {
//!     fn record_type() -> RecordType<Self> {
//!         RecordType::new("Point")
//!             .field("x", Some("pos_x"), |p: &Self| &p.x, |p: &mut Self| &mut p.x)
//!             .field("y", None, |p: &Self| &p.y, |p: &mut Self| &mut p.y)
//!     }
//! }
//!
//! let columns: Vec<_> = resolve_fields::<Point>()
//!     .iter()
//!     .map(|f| f.column().to_owned())
//!     .collect();
//! assert_eq!(columns, ["pos_x", "y"]);
//! ```

use std::fmt;

use crate::cell::CellValue;
use crate::field::{Access, LeafField, PathStep, resolve_fields};

// -----------------------------------------------------------------------------
// Tabular

/// A record type that can be transcoded to and from rows.
///
/// `Default` supplies the zero-valued record each decoded row starts from.
pub trait Tabular: Default + 'static {
    /// Describe the declared fields of this record type.
    fn record_type() -> RecordType<Self>;
}

// -----------------------------------------------------------------------------
// Embedded

/// A field holder whose content is an embedded sub-record.
///
/// Sub-records may be held directly, boxed, or optionally. An absent
/// optional sub-record reads as a default one and is allocated on write.
pub trait Embedded: 'static {
    type Record: Tabular;

    /// `true` if the sub-record may be absent.
    const OPTIONAL: bool;

    fn record(&self) -> Option<&Self::Record>;

    /// Return the sub-record, allocating it first if it is absent.
    fn record_mut(&mut self) -> &mut Self::Record;
}

impl<E: Embedded> Embedded for Box<E> {
    type Record = E::Record;
    const OPTIONAL: bool = E::OPTIONAL;

    #[inline]
    fn record(&self) -> Option<&Self::Record> {
        (**self).record()
    }

    #[inline]
    fn record_mut(&mut self) -> &mut Self::Record {
        (**self).record_mut()
    }
}

impl<E: Embedded + Default> Embedded for Option<E> {
    type Record = E::Record;
    const OPTIONAL: bool = true;

    #[inline]
    fn record(&self) -> Option<&Self::Record> {
        self.as_ref().and_then(Embedded::record)
    }

    #[inline]
    fn record_mut(&mut self) -> &mut Self::Record {
        self.get_or_insert_with(E::default).record_mut()
    }
}

// -----------------------------------------------------------------------------
// RecordType

/// The declared fields of record type `T`, in declaration order.
pub struct RecordType<T> {
    type_name: &'static str,
    fields: Vec<DeclaredField<T>>,
}

pub(crate) enum DeclaredField<T> {
    Leaf {
        name: &'static str,
        annotation: Option<&'static str>,
        access: Access<T>,
    },
    Embedded {
        name: &'static str,
        optional: bool,
        // Resolves the sub-record and lifts its leaves onto `T`.
        resolve: Box<dyn Fn() -> Vec<LeafField<T>>>,
    },
}

impl<T: 'static> RecordType<T> {
    #[inline]
    pub const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Declare a leaf field.
    ///
    /// `annotation` is the column annotation, `"name"` or `"name,omitempty"`.
    pub fn field<V: CellValue + 'static>(
        mut self,
        name: &'static str,
        annotation: Option<&'static str>,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        self.fields.push(DeclaredField::Leaf {
            name,
            annotation,
            access: Access::leaf(get, get_mut),
        });
        self
    }

    /// Declare an embedded sub-record whose fields are spliced in here.
    pub fn embed<E: Embedded>(
        mut self,
        name: &'static str,
        get: fn(&T) -> &E,
        get_mut: fn(&mut T) -> &mut E,
    ) -> Self {
        let step = PathStep {
            field: name,
            optional: E::OPTIONAL,
        };
        let resolve = move || {
            resolve_fields::<E::Record>()
                .into_iter()
                .map(|leaf| {
                    leaf.lift(
                        step,
                        move |outer: &T| get(outer).record(),
                        move |outer: &mut T| get_mut(outer).record_mut(),
                    )
                })
                .collect()
        };
        self.fields.push(DeclaredField::Embedded {
            name,
            optional: E::OPTIONAL,
            resolve: Box::new(resolve),
        });
        self
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Number of declared fields, embedded ones counting once.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub(crate) fn declared(&self) -> &[DeclaredField<T>] {
        &self.fields
    }
}

impl<T> fmt::Debug for RecordType<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self
            .fields
            .iter()
            .map(|field| match field {
                DeclaredField::Leaf {
                    name, annotation, ..
                } => format!("{name}: {annotation:?}"),
                DeclaredField::Embedded { name, optional, .. } => {
                    format!("{name}: embedded(optional = {optional})")
                }
            })
            .collect::<Vec<_>>();
        f.debug_struct("RecordType")
            .field("type_name", &self.type_name)
            .field("fields", &fields)
            .finish()
    }
}
