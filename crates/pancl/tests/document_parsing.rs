//! End-to-end tests driving `Parser` only through its public API, the way
//! `crates/jsonmodem/tests/factory_std.rs` exercises `jsonmodem` from
//! outside the crate.

use pancl::{Error, ParseOptions, Parser, Value};

fn tables(src: &str) -> Vec<pancl::Table> {
    Parser::from_slice(src.as_bytes(), ParseOptions::default())
        .into_tables()
        .collect::<Result<Vec<_>, Error>>()
        .expect("document should parse")
}

#[test]
fn root_and_named_tables_round_trip() {
    let doc = "name = \"demo\"\ncount = 3\n\n[server]\nhost = \"localhost\"\nport = 8080\n";
    let got = tables(doc);
    assert_eq!(got.len(), 2);

    assert!(got[0].is_root());
    assert_eq!(got[0].entries[0].name.as_str(), "name");
    assert_eq!(got[0].entries[1].value, Value::Integer(3));

    assert_eq!(got[1].name.as_ref().unwrap().as_str(), "server");
    assert_eq!(got[1].entries[1].value, Value::Integer(8080));
}

#[test]
fn custom_constructors_rewrite_to_typed_integers() {
    let doc = "byte = ::Uint8(\"255\")\nsigned = ::Int16(\"-1000\")\n";
    let got = tables(doc);
    assert_eq!(got[0].entries[0].value, Value::Uint8(255));
    assert_eq!(got[0].entries[1].value, Value::Int16(-1000));
}

#[test]
fn nested_containers() {
    let doc = "point = (1, 2, \"label\")\nopts = { a = true, b = false }\nnums = [1, 2, 3]\n";
    let got = tables(doc);
    assert_eq!(
        got[0].entries[0].value,
        Value::Tuple(vec![
            Value::Integer(1),
            Value::Integer(2),
            Value::String("label".into()),
        ])
    );
    match &got[0].entries[2].value {
        Value::Array(items) => assert_eq!(items.len(), 3),
        other => panic!("expected array, got {other:?}"),
    }
}

#[test]
fn array_type_mismatch_is_reported_at_offending_element() {
    let doc = "arr = [1, \"two\"]\n";
    let mut parser = Parser::from_slice(doc.as_bytes(), ParseOptions::default());
    let err = parser.get_next_table().unwrap_err();
    assert!(matches!(err, Error::ArrayMemberType(_)));
}

#[test]
fn leading_zero_decimal_is_rejected() {
    let doc = "n = 007\n";
    let mut parser = Parser::from_slice(doc.as_bytes(), ParseOptions::default());
    let err = parser.get_next_table().unwrap_err();
    assert!(matches!(err, Error::IntLeadingZeros(_)));
}

#[test]
fn reading_from_a_std_io_reader() {
    let doc = b"a = true\n".to_vec();
    let mut parser = Parser::from_reader(doc.as_slice(), ParseOptions::default());
    let root = parser.get_next_table().unwrap().unwrap();
    assert_eq!(root.entries[0].value, Value::Boolean(true));
}
