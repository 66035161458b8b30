//! Integration tests for the parsing backend surface.

use docgrid::{
    from_json, from_json_with_options, BoundingBox, Cell, DocumentBuilder, Error, JsonBackend,
    PageInfo, ParseBackend, ParseOptions, Table,
};

fn bbox(y0: f32, y1: f32) -> BoundingBox {
    BoundingBox::new(50.0, y0, 500.0, y1)
}

fn sample_document_json() -> Vec<u8> {
    let mut builder = DocumentBuilder::new()
        .page(PageInfo::letter(0))
        .page(PageInfo::a4(1));
    builder.add_header(0, bbox(40.0, 60.0), "Report", 1);
    builder.add_text_block(0, bbox(80.0, 110.0), "Introduction paragraph.");
    let table = Table::new(
        2,
        2,
        vec![
            Cell::text(0, 0, "k"),
            Cell::text(0, 1, "v"),
            Cell::text(1, 0, "a"),
            Cell::text(1, 1, "2024-01-31"),
        ],
    )
    .unwrap();
    builder.add_table(1, bbox(100.0, 220.0), table);
    let doc = builder.build().unwrap();
    serde_json::to_vec(&doc).unwrap()
}

#[test]
fn round_trip_preserves_structure() {
    let doc = from_json(&sample_document_json()).unwrap();

    assert_eq!(doc.page_count(), 2);
    assert_eq!(doc.element_count(), 3);
    assert_eq!(doc.table_indices(), vec![2]);

    let indices: Vec<_> = doc.elements().iter().map(|el| el.index).collect();
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(indices, sorted, "indices unique and strictly increasing");
}

#[test]
fn garbage_input_is_a_parse_error() {
    assert!(matches!(from_json(b"{ nope"), Err(Error::Parse(_))));
    assert!(matches!(from_json(b""), Err(Error::Parse(_))));
}

#[test]
fn overlapping_cells_in_input_are_structural() {
    // Tamper with a valid serialized document so two cells claim the same
    // grid position; the backend must reject it, not repair it.
    let mut value: serde_json::Value =
        serde_json::from_slice(&sample_document_json()).unwrap();
    let cells = value["elements"][2]["cells"].as_array_mut().unwrap();
    let mut duplicate = cells[0].clone();
    duplicate["text"] = serde_json::Value::String("duplicate".to_string());
    cells.push(duplicate);
    let tampered = serde_json::to_vec(&value).unwrap();

    assert!(matches!(from_json(&tampered), Err(Error::Structural(_))));
}

#[test]
fn shuffled_indices_in_input_are_structural() {
    let mut value: serde_json::Value =
        serde_json::from_slice(&sample_document_json()).unwrap();
    value["elements"][0]["index"] = serde_json::Value::from(9);
    let tampered = serde_json::to_vec(&value).unwrap();

    assert!(matches!(from_json(&tampered), Err(Error::Structural(_))));
}

#[test]
fn out_of_range_options_are_rejected() {
    let options = ParseOptions::new().with_layout_sensitivity(1.2);
    let result = from_json_with_options(&sample_document_json(), &options);
    assert!(matches!(result, Err(Error::InvalidOption(_))));
}

#[test]
fn backend_trait_object_is_usable() {
    let backend: Box<dyn ParseBackend> = Box::new(JsonBackend::new());
    assert_eq!(backend.name(), "json");

    let doc = backend
        .parse(&sample_document_json(), &ParseOptions::default())
        .unwrap();
    assert_eq!(doc.element_count(), 3);
}

#[test]
fn errors_do_not_poison_subsequent_parses() {
    let backend = JsonBackend::new();
    let options = ParseOptions::default();

    assert!(backend.parse(b"broken", &options).is_err());
    // The same backend still parses valid input afterwards.
    assert!(backend.parse(&sample_document_json(), &options).is_ok());
}
