use crate::codec::CsvOptions;
use crate::error::CsvError;
use crate::field::{LeafField, column_lookup, resolve_fields};
use crate::shape::Records;
use crate::text::render_rows;

/// Select the columns an encode call emits.
///
/// Every field is kept unless it is `omitempty` and empty in all records.
pub(crate) fn column_set<'f, T>(fields: &'f [LeafField<T>], records: &[&T]) -> Vec<&'f LeafField<T>> {
    fields
        .iter()
        .filter(|field| {
            let keep = !field.omit_empty() || records.iter().any(|record| !field.is_empty(record));
            if !keep {
                log::trace!("omitting empty column `{}`", field.column());
            }
            keep
        })
        .collect()
}

pub(crate) fn encode<S: Records + ?Sized>(input: &S, options: &CsvOptions) -> Result<Vec<u8>, CsvError> {
    let records = input.records()?;
    let fields = resolve_fields::<S::Record>();
    if options.reject_duplicate_columns {
        column_lookup(&fields, true)?;
    }

    let columns = column_set(&fields, &records);

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(columns.iter().map(|field| field.column().to_owned()).collect());

    for (index, record) in records.iter().enumerate() {
        let row = columns
            .iter()
            .map(|field| {
                field
                    .read(record)
                    .map_err(|err| CsvError::at_cell(err, index + 1, field.column()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    log::debug!(
        "encoded {} records into {} of {} columns",
        records.len(),
        columns.len(),
        fields.len(),
    );

    render_rows(&rows, options)
}
