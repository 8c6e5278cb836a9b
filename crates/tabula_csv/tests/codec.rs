use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use tabula_csv::{Codec, CsvError, CsvOptions, ParseError, Tabular, marshal, resolve_fields, unmarshal};

// -----------------------------------------------------------------------------
// Records

#[derive(Tabular, Default, Debug, Clone, PartialEq)]
struct User {
    #[csv("user_id")]
    user_id: String,
    #[csv("ticket")]
    ticket: i64,
}

#[derive(Tabular, Default, Debug, Clone, PartialEq)]
struct Source {
    #[csv("record_id")]
    record_id: String,
    #[csv("source")]
    source: String,
}

#[derive(Tabular, Default, Debug, Clone, PartialEq)]
struct Ticket {
    #[csv("name")]
    name: String,
    #[csv(flatten)]
    user: User,
    #[csv(flatten)]
    source: Box<Source>,
}

#[derive(Tabular, Default, Debug, Clone, PartialEq)]
struct Base {
    #[csv("id")]
    id: u64,
    #[csv("name")]
    name: String,
}

#[derive(Tabular, Default, Debug, Clone, PartialEq)]
struct Entry {
    #[csv(flatten)]
    base: Base,
    #[csv("extra,omitempty")]
    extra: String,
}

#[derive(Tabular, Default, Debug, Clone, PartialEq)]
struct Sparse {
    #[csv(flatten)]
    base: Option<Box<Base>>,
    #[csv("note")]
    note: String,
}

#[derive(Tabular, Default, Debug, Clone, PartialEq)]
struct Name {
    #[csv("name")]
    name: String,
}

#[derive(Tabular, Default, Debug, Clone, PartialEq)]
struct Measure {
    #[csv("count")]
    count: i32,
    #[csv("ratio")]
    ratio: f64,
    #[csv("active")]
    active: bool,
    #[csv("seen")]
    seen: DateTime<Utc>,
}

#[derive(Tabular, Default, Debug)]
struct Tagged {
    #[csv("id")]
    id: u32,
    #[csv("tags")]
    tags: Vec<String>,
}

#[derive(Tabular, Default, Debug)]
struct Twice {
    #[csv("code")]
    first: String,
    #[csv("code")]
    second: String,
}

fn text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap()
}

fn tickets() -> Vec<Ticket> {
    vec![
        Ticket {
            name: "Alice".into(),
            user: User {
                user_id: "U001".into(),
                ticket: 1,
            },
            source: Box::new(Source {
                record_id: "R001".into(),
                source: "S001".into(),
            }),
        },
        Ticket {
            name: "Bob".into(),
            user: User {
                user_id: "U002".into(),
                ticket: 2,
            },
            source: Box::new(Source {
                record_id: "R002".into(),
                source: "S002".into(),
            }),
        },
    ]
}

const TICKETS: &str = "name,user_id,ticket,record_id,source\nAlice,U001,1,R001,S001\nBob,U002,2,R002,S002\n";

// -----------------------------------------------------------------------------
// Encode

#[test]
fn nested_records_flatten_in_declaration_order() {
    let columns: Vec<_> = resolve_fields::<Ticket>()
        .iter()
        .map(|field| field.column())
        .collect();
    assert_eq!(columns, ["name", "user_id", "ticket", "record_id", "source"]);

    assert_eq!(text(marshal(&tickets()).unwrap()), TICKETS);
}

#[test]
fn accepted_input_shapes() {
    let records = tickets();

    // Slices, arrays and references to them.
    assert_eq!(text(marshal(records.as_slice()).unwrap()), TICKETS);
    assert_eq!(text(marshal(&&records).unwrap()), TICKETS);

    // Sequences of references.
    let refs: Vec<&Ticket> = records.iter().collect();
    assert_eq!(text(marshal(&refs).unwrap()), TICKETS);
    let shared: Vec<Rc<Ticket>> = records.iter().cloned().map(Rc::new).collect();
    assert_eq!(text(marshal(&shared).unwrap()), TICKETS);

    // A single record, plain or behind a reference.
    let single = "name,user_id,ticket,record_id,source\nAlice,U001,1,R001,S001\n";
    assert_eq!(text(marshal(&records[0]).unwrap()), single);
    assert_eq!(text(marshal(&Some(&records[0])).unwrap()), single);
}

#[test]
fn absent_references_fail_without_output() {
    let nil: Option<&Ticket> = None;
    assert!(matches!(marshal(&nil), Err(CsvError::NilInput)));

    let records = tickets();
    let with_hole = vec![Some(&records[0]), None, Some(&records[1])];
    assert!(matches!(
        marshal(&with_hole),
        Err(CsvError::NilElement { index: 1 })
    ));
}

#[test]
fn omit_empty_column_set() {
    let mut entries = vec![
        Entry {
            base: Base {
                id: 1,
                name: "a".into(),
            },
            extra: String::new(),
        },
        Entry {
            base: Base {
                id: 2,
                name: "b".into(),
            },
            extra: String::new(),
        },
    ];
    assert_eq!(text(marshal(&entries).unwrap()), "id,name\n1,a\n2,b\n");

    entries[1].extra = "x".into();
    assert_eq!(
        text(marshal(&entries).unwrap()),
        "id,name,extra\n1,a,\n2,b,x\n"
    );
}

#[test]
fn empty_sequence_keeps_the_header() {
    let none: Vec<Entry> = Vec::new();
    assert_eq!(text(marshal(&none).unwrap()), "id,name\n");
}

#[test]
fn absent_optional_sub_record_encodes_as_default() {
    let rows = vec![
        Sparse {
            base: None,
            note: "first".into(),
        },
        Sparse {
            base: Some(Box::new(Base {
                id: 9,
                name: "z".into(),
            })),
            note: "second".into(),
        },
    ];
    assert_eq!(
        text(marshal(&rows).unwrap()),
        "id,name,note\n0,,first\n9,z,second\n"
    );
    assert!(rows[0].base.is_none());
}

#[test]
fn unsupported_field_kind() {
    let rows = vec![Tagged {
        id: 1,
        tags: vec!["a".into()],
    }];
    match marshal(&rows) {
        Err(CsvError::UnsupportedKind { column, kind }) => {
            assert_eq!(column, "tags");
            assert!(kind.contains("Vec"));
        }
        other => panic!("unexpected {other:?}"),
    }

    let mut decoded: Vec<Tagged> = Vec::new();
    assert!(matches!(
        unmarshal(b"id,tags\n1,a\n", &mut decoded),
        Err(CsvError::UnsupportedKind { .. })
    ));
}

// -----------------------------------------------------------------------------
// Decode

#[test]
fn round_trip_into_vectors() {
    let records = tickets();

    let mut owned: Vec<Ticket> = Vec::new();
    unmarshal(TICKETS.as_bytes(), &mut owned).unwrap();
    assert_eq!(owned, records);

    let mut boxed: Vec<Box<Ticket>> = Vec::new();
    unmarshal(TICKETS.as_bytes(), &mut boxed).unwrap();
    assert_eq!(*boxed[1], records[1]);
}

#[test]
fn single_versus_sequence_target() {
    let data = b"name\nAlice\nBob\n";

    let mut many: Vec<Name> = Vec::new();
    unmarshal(data, &mut many).unwrap();
    assert_eq!(many.len(), 2);

    let mut one = Name::default();
    unmarshal(data, &mut one).unwrap();
    assert_eq!(one.name, "Alice");

    let mut maybe: Option<Name> = None;
    unmarshal(data, &mut maybe).unwrap();
    assert_eq!(maybe.map(|n| n.name).as_deref(), Some("Alice"));
}

#[test]
fn empty_documents() {
    let mut one = Name::default();
    assert!(matches!(unmarshal(b"", &mut one), Err(CsvError::EmptyDocument)));
    assert!(matches!(
        unmarshal(b"name\n", &mut one),
        Err(CsvError::NoDataRows)
    ));

    let mut many: Vec<Name> = Vec::new();
    assert!(matches!(unmarshal(b"", &mut many), Err(CsvError::EmptyDocument)));
    unmarshal(b"name\n", &mut many).unwrap();
    assert!(many.is_empty());
}

#[test]
fn tolerant_rows_and_columns() {
    let data = b"name,user_id,unknown,ticket\nAlice,U001,zzz,7,trailing\nBob\n";
    let mut decoded: Vec<Ticket> = Vec::new();
    unmarshal(data, &mut decoded).unwrap();

    assert_eq!(decoded[0].name, "Alice");
    assert_eq!(decoded[0].user.user_id, "U001");
    assert_eq!(decoded[0].user.ticket, 7);
    assert_eq!(decoded[1].name, "Bob");
    assert_eq!(decoded[1].user, User::default());
}

#[test]
fn empty_cells_decode_to_zero() {
    let mut decoded: Vec<Ticket> = Vec::new();
    unmarshal(b"name,ticket\nAlice,\n", &mut decoded).unwrap();
    assert_eq!(decoded[0].user.ticket, 0);
}

#[test]
fn optional_sub_record_allocated_on_write() {
    let mut decoded: Vec<Sparse> = Vec::new();
    unmarshal(b"note,id\nfirst\nsecond,4\n", &mut decoded).unwrap();

    assert!(decoded[0].base.is_none());
    assert_eq!(decoded[0].note, "first");
    let base = decoded[1].base.as_deref().unwrap();
    assert_eq!(base.id, 4);
    assert_eq!(base.name, "");
}

#[test]
fn scalar_kinds_round_trip() {
    let seen = Utc.with_ymd_and_hms(2024, 2, 29, 12, 30, 0).unwrap();
    let rows = vec![Measure {
        count: -3,
        ratio: 0.25,
        active: true,
        seen,
    }];
    let data = marshal(&rows).unwrap();
    assert_eq!(
        text(data.clone()),
        "count,ratio,active,seen\n-3,0.25,true,2024-02-29T12:30:00Z\n"
    );

    let mut decoded: Vec<Measure> = Vec::new();
    unmarshal(&data, &mut decoded).unwrap();
    assert_eq!(decoded, rows);
}

#[test]
fn conversion_errors_carry_position() {
    let mut decoded: Vec<Measure> = Vec::new();
    match unmarshal(b"count,active\n1,true\nlots,false\n", &mut decoded) {
        Err(CsvError::Conversion { row, column, .. }) => {
            assert_eq!(row, 2);
            assert_eq!(column, "count");
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(decoded.is_empty());

    let mut decoded: Vec<Measure> = Vec::new();
    assert!(matches!(
        unmarshal(b"active\nmaybe\n", &mut decoded),
        Err(CsvError::Conversion { .. })
    ));
}

#[test]
fn invalid_text_is_a_parse_error() {
    let mut decoded: Vec<Name> = Vec::new();
    assert!(matches!(
        unmarshal(b"name\n\xff\xfe\n", &mut decoded),
        Err(CsvError::Parse(_))
    ));
}

#[test]
fn malformed_quoting_is_a_parse_error() {
    // An unclosed quote must not swallow the rows after it.
    let mut decoded: Vec<Name> = Vec::new();
    assert!(matches!(
        unmarshal(b"name\n\"Alice\nBob\nCarol\n", &mut decoded),
        Err(CsvError::Parse(ParseError::UnterminatedQuote { line: 2 }))
    ));
    assert!(decoded.is_empty());

    assert!(matches!(
        unmarshal(b"name\na\"b\n", &mut decoded),
        Err(CsvError::Parse(ParseError::BareQuote { line: 2 }))
    ));
    assert!(matches!(
        unmarshal(b"name\n\"Alice\"x\n", &mut decoded),
        Err(CsvError::Parse(ParseError::ExtraneousQuote { line: 2 }))
    ));
    assert!(decoded.is_empty());
}

#[test]
fn duplicate_columns() {
    // The last field declaring a column wins on decode.
    let mut lenient = Twice::default();
    unmarshal(b"code\nA\n", &mut lenient).unwrap();
    assert_eq!(lenient.first, "");
    assert_eq!(lenient.second, "A");

    let strict = Codec::new(CsvOptions::default().with_reject_duplicate_columns(true));
    let mut rejected = Twice::default();
    match strict.unmarshal(b"code\nA\n", &mut rejected) {
        Err(CsvError::DuplicateColumn { column }) => assert_eq!(column, "code"),
        other => panic!("unexpected {other:?}"),
    }
    assert!(matches!(
        strict.marshal(&Twice::default()),
        Err(CsvError::DuplicateColumn { .. })
    ));
}

#[test]
fn quoted_cells_round_trip() {
    let rows = vec![Name {
        name: "Smith, \"Jo\"\nJr.".into(),
    }];
    let data = marshal(&rows).unwrap();
    assert_eq!(text(data.clone()), "name\n\"Smith, \"\"Jo\"\"\nJr.\"\n");

    let mut decoded: Vec<Name> = Vec::new();
    unmarshal(&data, &mut decoded).unwrap();
    assert_eq!(decoded, rows);
}

#[test]
fn vector_targets_append() {
    let mut names = vec![Name {
        name: "Zed".into(),
    }];
    unmarshal(b"name\nAlice\n", &mut names).unwrap();
    let names: Vec<_> = names.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["Zed", "Alice"]);
}
