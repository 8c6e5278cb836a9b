//! Field resolution: flattening a [`RecordType`] into leaf fields.
//!
//! [`RecordType`]: crate::RecordType

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::cell::{CellKind, CellValue};
use crate::error::{CellError, CsvError};
use crate::record::{DeclaredField, Tabular};

/// The annotation option that makes a column omittable.
const OMIT_EMPTY: &str = "omitempty";

// -----------------------------------------------------------------------------
// Access

type ReadFn<T> = dyn Fn(&T) -> Result<String, CellError> + Send + Sync;
type IsEmptyFn<T> = dyn Fn(&T) -> bool + Send + Sync;
type WriteFn<T> = dyn Fn(&mut T, &str) -> Result<(), CellError> + Send + Sync;

/// Type-erased conversions of one leaf value reached from a `T`.
pub(crate) struct Access<T> {
    kind: CellKind,
    value_type: &'static str,
    read: Arc<ReadFn<T>>,
    is_empty: Arc<IsEmptyFn<T>>,
    write: Arc<WriteFn<T>>,
}

impl<T> Clone for Access<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            value_type: self.value_type,
            read: Arc::clone(&self.read),
            is_empty: Arc::clone(&self.is_empty),
            write: Arc::clone(&self.write),
        }
    }
}

impl<T: 'static> Access<T> {
    pub(crate) fn leaf<V: CellValue + 'static>(
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        Self {
            kind: V::KIND,
            value_type: core::any::type_name::<V>(),
            read: Arc::new(move |record: &T| get(record).to_cell()),
            is_empty: Arc::new(move |record: &T| get(record).is_empty_value()),
            write: Arc::new(move |record: &mut T, text: &str| get_mut(record).from_cell(text)),
        }
    }

    /// Reach this value through a sub-record of an outer type `O`.
    ///
    /// Reading through an absent sub-record reads a default one. Writing
    /// allocates it.
    fn lift<O, G, M>(self, get: G, get_mut: M) -> Access<O>
    where
        T: Tabular,
        O: 'static,
        G: for<'a> Fn(&'a O) -> Option<&'a T> + Send + Sync + Clone + 'static,
        M: for<'a> Fn(&'a mut O) -> &'a mut T + Send + Sync + 'static,
    {
        let Self {
            kind,
            value_type,
            read,
            is_empty,
            write,
        } = self;
        let get_for_empty = get.clone();

        Access {
            kind,
            value_type,
            read: Arc::new(move |outer: &O| match get(outer) {
                Some(inner) => read(inner),
                None => read(&T::default()),
            }),
            is_empty: Arc::new(move |outer: &O| {
                get_for_empty(outer).is_none_or(|inner| is_empty(inner))
            }),
            write: Arc::new(move |outer: &mut O, text: &str| write(get_mut(outer), text)),
        }
    }
}

// -----------------------------------------------------------------------------
// PathStep

/// One field access on the way from the record root to a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
    /// Declared name of the field.
    pub field: &'static str,
    /// The field holds an optional sub-record, allocated on demand.
    pub optional: bool,
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "{}?", self.field)
        } else {
            f.write_str(self.field)
        }
    }
}

// -----------------------------------------------------------------------------
// LeafField

/// A terminal field of a flattened record type.
///
/// # Examples
///
/// ```
/// use tabula_csv::{Tabular, resolve_fields};
///
/// #[derive(Tabular, Default)]
/// struct Base {
///     #[csv("id")]
///     id: u64,
/// }
///
/// #[derive(Tabular, Default)]
/// struct Row {
///     #[csv(flatten)]
///     base: Option<Base>,
///     #[csv("note, omitempty")]
///     note: String,
/// }
///
/// let fields = resolve_fields::<Row>();
/// assert_eq!(fields[0].column(), "id");
/// assert_eq!(fields[0].path_string(), "base?.id");
/// assert!(fields[1].omit_empty());
/// ```
pub struct LeafField<T> {
    column: &'static str,
    omit_empty: bool,
    path: Vec<PathStep>,
    access: Access<T>,
}

impl<T> Clone for LeafField<T> {
    fn clone(&self) -> Self {
        Self {
            column: self.column,
            omit_empty: self.omit_empty,
            path: self.path.clone(),
            access: self.access.clone(),
        }
    }
}

impl<T> fmt::Debug for LeafField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafField")
            .field("column", &self.column)
            .field("omit_empty", &self.omit_empty)
            .field("path", &self.path_string())
            .field("kind", &self.access.kind)
            .field("value_type", &self.access.value_type)
            .finish()
    }
}

impl<T> LeafField<T> {
    /// The column name.
    #[inline]
    pub fn column(&self) -> &'static str {
        self.column
    }

    /// Whether the column is dropped when empty in every record.
    #[inline]
    pub fn omit_empty(&self) -> bool {
        self.omit_empty
    }

    /// Field accesses from the record root, the leaf itself last.
    #[inline]
    pub fn path(&self) -> &[PathStep] {
        &self.path
    }

    /// The path in dotted form, optional steps marked with `?`.
    pub fn path_string(&self) -> String {
        self.path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    #[inline]
    pub fn kind(&self) -> CellKind {
        self.access.kind
    }

    /// The Rust type of the leaf value.
    #[inline]
    pub fn value_type(&self) -> &'static str {
        self.access.value_type
    }

    /// Render this field of `record` as cell text.
    #[inline]
    pub fn read(&self, record: &T) -> Result<String, CellError> {
        (self.access.read)(record)
    }

    #[inline]
    pub fn is_empty(&self, record: &T) -> bool {
        (self.access.is_empty)(record)
    }

    /// Parse `text` into this field of `record`.
    #[inline]
    pub fn write(&self, record: &mut T, text: &str) -> Result<(), CellError> {
        (self.access.write)(record, text)
    }
}

impl<T: Tabular> LeafField<T> {
    /// Prefix this leaf with the embedding `step` of an outer type `O`.
    pub(crate) fn lift<O, G, M>(self, step: PathStep, get: G, get_mut: M) -> LeafField<O>
    where
        O: 'static,
        G: for<'a> Fn(&'a O) -> Option<&'a T> + Send + Sync + Clone + 'static,
        M: for<'a> Fn(&'a mut O) -> &'a mut T + Send + Sync + 'static,
    {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.push(step);
        path.extend(self.path);

        LeafField {
            column: self.column,
            omit_empty: self.omit_empty,
            path,
            access: self.access.lift(get, get_mut),
        }
    }
}

// -----------------------------------------------------------------------------
// Resolution

/// Split an annotation into its column name and `omitempty` flag.
///
/// Tokens are separated by `,` and trimmed of spaces and tabs. The first
/// token is the name; an empty one yields `None`.
pub(crate) fn parse_annotation(annotation: &str) -> (Option<&str>, bool) {
    let mut tokens = annotation
        .split(',')
        .map(|token| token.trim_matches([' ', '\t']));

    let name = tokens.next().filter(|name| !name.is_empty());
    let omit_empty = tokens.any(|option| option == OMIT_EMPTY);
    (name, omit_empty)
}

/// Flatten the fields of `T` into leaf fields.
///
/// Embedded sub-records are resolved depth-first and their leaves spliced
/// in at the position of the embedding field. Nothing is validated here:
/// unsupported kinds fail on conversion, and duplicate column names are
/// kept.
pub fn resolve_fields<T: Tabular>() -> Vec<LeafField<T>> {
    let record_type = T::record_type();
    let mut leaves = Vec::with_capacity(record_type.len());

    for field in record_type.declared() {
        match field {
            DeclaredField::Leaf {
                name,
                annotation,
                access,
            } => {
                let (column, omit_empty) = match annotation.map(parse_annotation) {
                    Some((Some(column), omit_empty)) => (column, omit_empty),
                    Some((None, omit_empty)) => (*name, omit_empty),
                    None => (*name, false),
                };
                leaves.push(LeafField {
                    column,
                    omit_empty,
                    path: vec![PathStep {
                        field: *name,
                        optional: false,
                    }],
                    access: access.clone(),
                });
            }
            DeclaredField::Embedded { resolve, .. } => leaves.extend(resolve()),
        }
    }

    leaves
}

/// Map each column name to its field; the last field declaring a name wins.
///
/// With `reject_duplicates` a shared name fails with
/// [`CsvError::DuplicateColumn`] instead.
pub(crate) fn column_lookup<'f, T>(
    fields: &'f [LeafField<T>],
    reject_duplicates: bool,
) -> Result<HashMap<&'static str, &'f LeafField<T>>, CsvError> {
    let mut lookup = HashMap::with_capacity(fields.len());

    for field in fields {
        if let Some(previous) = lookup.insert(field.column(), field) {
            if reject_duplicates {
                return Err(CsvError::DuplicateColumn {
                    column: field.column().to_owned(),
                });
            }
            log::warn!(
                "column `{}` is declared by both `{}` and `{}`, using the latter",
                field.column(),
                previous.path_string(),
                field.path_string(),
            );
        }
    }

    Ok(lookup)
}
