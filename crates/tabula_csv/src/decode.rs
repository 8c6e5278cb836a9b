use crate::codec::CsvOptions;
use crate::error::CsvError;
use crate::field::{column_lookup, resolve_fields};
use crate::shape::Target;
use crate::text::parse_rows;

pub(crate) fn decode<T: Target + ?Sized>(
    data: &[u8],
    target: &mut T,
    options: &CsvOptions,
) -> Result<(), CsvError> {
    let rows = parse_rows(data, options)?;
    let (header, body) = rows.split_first().ok_or(CsvError::EmptyDocument)?;

    let fields = resolve_fields::<T::Record>();
    let lookup = column_lookup(&fields, options.reject_duplicate_columns)?;

    // One slot per header position; unmapped columns are skipped.
    let slots = header
        .iter()
        .map(|name| {
            let field = lookup.get(name.as_str()).copied();
            if field.is_none() {
                log::trace!("ignoring unmapped column `{name}`");
            }
            field
        })
        .collect::<Vec<_>>();

    let mut records = Vec::with_capacity(body.len());

    for (index, row) in body.iter().enumerate() {
        let mut record = T::Record::default();
        // `zip` stops at the shorter of header and row.
        for (slot, cell) in slots.iter().zip(row) {
            if let Some(field) = slot {
                field
                    .write(&mut record, cell)
                    .map_err(|err| CsvError::at_cell(err, index + 1, field.column()))?;
            }
        }
        records.push(record);
    }

    log::debug!("decoded {} records from {} columns", records.len(), header.len());

    target.fill(records)
}
