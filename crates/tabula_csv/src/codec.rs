use crate::decode::decode;
use crate::encode::encode;
use crate::error::CsvError;
use crate::shape::{Records, Target};

// -----------------------------------------------------------------------------
// CsvOptions

/// Settings shared by encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter, `b','` by default.
    pub delimiter: u8,
    /// Fail with [`CsvError::DuplicateColumn`] when two fields share a
    /// column name, instead of letting the last one win on decode.
    pub reject_duplicate_columns: bool,
    /// Trim surrounding whitespace from every decoded cell and header.
    /// Blanks around a quoted cell are still malformed quoting.
    pub trim: bool,
}

impl Default for CsvOptions {
    #[inline]
    fn default() -> Self {
        Self {
            delimiter: b',',
            reject_duplicate_columns: false,
            trim: false,
        }
    }
}

impl CsvOptions {
    #[inline]
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[inline]
    pub fn with_reject_duplicate_columns(mut self, reject: bool) -> Self {
        self.reject_duplicate_columns = reject;
        self
    }

    #[inline]
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

// -----------------------------------------------------------------------------
// Codec

/// Encoder and decoder bound to a set of [`CsvOptions`].
///
/// Holds no state besides the options, so one codec can serve any number
/// of calls, from any thread.
///
/// # Examples
///
/// ```
/// use tabula_csv::{Codec, CsvOptions, Tabular};
///
/// #[derive(Tabular, Default, Debug, PartialEq)]
/// struct Line {
///     #[csv("sku")]
///     sku: String,
///     #[csv("qty")]
///     qty: u32,
/// }
///
/// let codec = Codec::new(CsvOptions::default().with_delimiter(b';'));
/// let text = codec.marshal(&[Line { sku: "A-1".into(), qty: 3 }]).unwrap();
/// assert_eq!(text, b"sku;qty\nA-1;3\n");
///
/// let mut lines: Vec<Line> = Vec::new();
/// codec.unmarshal(&text, &mut lines).unwrap();
/// assert_eq!(lines[0].qty, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Codec {
    options: CsvOptions,
}

impl Codec {
    #[inline]
    pub const fn new(options: CsvOptions) -> Self {
        Self { options }
    }

    #[inline]
    pub fn options(&self) -> &CsvOptions {
        &self.options
    }

    /// Encode a record, a reference to one, or a sequence of them.
    ///
    /// The header lists every leaf field of the record type in order,
    /// except `omitempty` fields that are empty in every record.
    pub fn marshal<S: Records + ?Sized>(&self, input: &S) -> Result<Vec<u8>, CsvError> {
        encode(input, &self.options)
    }

    /// Decode `data` into a single record or append to a vector.
    ///
    /// Header columns without a matching field are ignored, as are cells
    /// beyond the header. Missing trailing cells leave their fields at
    /// the zero value.
    pub fn unmarshal<T: Target + ?Sized>(&self, data: &[u8], target: &mut T) -> Result<(), CsvError> {
        decode(data, target, &self.options)
    }
}

/// [`Codec::marshal`] with default options.
///
/// # Examples
///
/// ```
/// use tabula_csv::Tabular;
///
/// #[derive(Tabular, Default)]
/// struct Ticket {
///     #[csv("name")]
///     name: String,
///     #[csv("ticket")]
///     ticket: i64,
/// }
///
/// let tickets = vec![
///     Ticket { name: "Alice".into(), ticket: 1 },
///     Ticket { name: "Bob".into(), ticket: 2 },
/// ];
/// let text = tabula_csv::marshal(&tickets).unwrap();
/// assert_eq!(text, b"name,ticket\nAlice,1\nBob,2\n");
/// ```
#[inline]
pub fn marshal<S: Records + ?Sized>(input: &S) -> Result<Vec<u8>, CsvError> {
    Codec::default().marshal(input)
}

/// [`Codec::unmarshal`] with default options.
#[inline]
pub fn unmarshal<T: Target + ?Sized>(data: &[u8], target: &mut T) -> Result<(), CsvError> {
    Codec::default().unmarshal(data, target)
}
