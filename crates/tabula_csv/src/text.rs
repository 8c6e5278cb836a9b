//! The tabular-text collaborator: rows of cells to and from bytes.

use csv::{ReaderBuilder, Trim, WriterBuilder};

use crate::codec::CsvOptions;
use crate::error::{CsvError, ParseError};

/// Reject quoting the `csv` reader would otherwise accept leniently.
///
/// A quote may only open a field, a quoted field must be closed, and a
/// closing quote must be followed by a delimiter or a line end. Trimming
/// does not apply around quotes.
fn check_quoting(data: &[u8], options: &CsvOptions) -> Result<(), ParseError> {
    #[derive(Clone, Copy)]
    enum State {
        FieldStart,
        Unquoted,
        Quoted { opened: u64 },
        AfterQuote,
    }

    let mut state = State::FieldStart;
    let mut line = 1_u64;
    let mut bytes = data.iter().copied().peekable();

    while let Some(byte) = bytes.next() {
        state = match state {
            State::FieldStart | State::Unquoted if byte == options.delimiter || byte == b'\n' => {
                State::FieldStart
            }
            State::FieldStart if byte == b'"' => State::Quoted { opened: line },
            State::FieldStart | State::Unquoted if byte == b'"' => {
                return Err(ParseError::BareQuote { line });
            }
            State::FieldStart | State::Unquoted => State::Unquoted,
            State::Quoted { opened } if byte == b'"' => {
                if bytes.next_if_eq(&b'"').is_some() {
                    State::Quoted { opened }
                } else {
                    State::AfterQuote
                }
            }
            quoted @ State::Quoted { .. } => quoted,
            State::AfterQuote if byte == options.delimiter || byte == b'\n' => State::FieldStart,
            State::AfterQuote if byte == b'\r' && bytes.peek() == Some(&b'\n') => State::AfterQuote,
            State::AfterQuote => return Err(ParseError::ExtraneousQuote { line }),
        };
        if byte == b'\n' {
            line += 1;
        }
    }

    match state {
        State::Quoted { opened } => Err(ParseError::UnterminatedQuote { line: opened }),
        _ => Ok(()),
    }
}

/// Parse `data` into rows of cells.
///
/// Rows may differ in length; blank lines are skipped. Malformed quoting
/// fails with [`CsvError::Parse`].
pub(crate) fn parse_rows(data: &[u8], options: &CsvOptions) -> Result<Vec<Vec<String>>, CsvError> {
    check_quoting(data, options).map_err(CsvError::Parse)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(options.delimiter)
        .trim(if options.trim { Trim::All } else { Trim::None })
        .from_reader(data);

    reader
        .records()
        .map(|record| {
            record
                .map(|record| record.iter().map(str::to_owned).collect())
                .map_err(|err| CsvError::Parse(ParseError::Csv(err)))
        })
        .collect()
}

/// Render rows of cells, each followed by `\n`.
pub(crate) fn render_rows(rows: &[Vec<String>], options: &CsvOptions) -> Result<Vec<u8>, CsvError> {
    let mut writer = WriterBuilder::new()
        .delimiter(options.delimiter)
        .from_writer(Vec::new());

    for row in rows {
        writer.write_record(row).map_err(CsvError::Render)?;
    }

    writer
        .into_inner()
        .map_err(|err| CsvError::Io(err.into_error()))
}
