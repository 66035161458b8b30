//! Integration tests for rendering a resolved document.

use docgrid::{
    render, resolve_titles, to_html, to_markdown, to_records, BoundingBox, Cell, DocumentBuilder,
    OutputFormat, PageInfo, RenderOptions, ResolveOptions, Table,
};

fn bbox(y0: f32, y1: f32) -> BoundingBox {
    BoundingBox::new(50.0, y0, 500.0, y1)
}

/// Two-page document: heading, prose, captioned table, merged-cell table.
fn report_document() -> docgrid::Document {
    let mut builder = DocumentBuilder::new()
        .page(PageInfo::letter(0))
        .page(PageInfo::letter(1));

    builder.add_header(0, bbox(40.0, 60.0), "Annual Report", 1);
    builder.add_text_block(0, bbox(80.0, 110.0), "Revenue grew in all segments.");
    builder.add_text_block(0, bbox(140.0, 152.0), "Table 1: Revenue by Segment");
    let revenue = Table::new(
        3,
        2,
        vec![
            Cell::text(0, 0, "Segment"),
            Cell::text(0, 1, "Revenue"),
            Cell::text(1, 0, "Cloud"),
            Cell::text(1, 1, "1,200"),
            Cell::text(2, 0, "Devices"),
            Cell::text(2, 1, "860"),
        ],
    )
    .unwrap();
    builder.add_table(0, bbox(170.0, 300.0), revenue);

    builder.add_header(1, bbox(40.0, 60.0), "Appendix", 2);
    let merged = Table::new(
        2,
        3,
        vec![
            Cell::text(0, 0, "Quarter").row_span(2),
            Cell::text(0, 1, "H1").col_span(2),
            Cell::text(1, 1, "Q1"),
            Cell::text(1, 2, "Q2"),
        ],
    )
    .unwrap();
    builder.add_table(1, bbox(100.0, 200.0), merged);

    let mut doc = builder.build().unwrap();
    resolve_titles(&mut doc, &ResolveOptions::new().sequential()).unwrap();
    doc
}

#[test]
fn markdown_renders_full_pipeline() {
    let doc = report_document();
    let md = to_markdown(&doc, &RenderOptions::default()).unwrap();

    assert!(md.starts_with("# Annual Report"));
    assert!(md.contains("Revenue grew in all segments."));
    // Caption attached to the table, not duplicated as a paragraph.
    assert!(md.contains("**Table 1: Revenue by Segment**"));
    assert_eq!(md.matches("Table 1: Revenue by Segment").count(), 1);
    assert!(md.contains("| Segment | Revenue |"));
    assert!(md.contains("| Devices | 860 |"));
}

#[test]
fn second_table_gets_section_context() {
    let doc = report_document();
    // The appendix table has no caption-like text above it; the resolver
    // falls back to the "Appendix" header.
    let appendix_table = doc.by_index(5).unwrap().as_table().unwrap();
    assert_eq!(appendix_table.title, Some(4));
}

#[test]
fn html_renders_spans_and_captions() {
    let doc = report_document();
    let html = to_html(&doc, &RenderOptions::default()).unwrap();

    assert!(html.contains("<h1>Annual Report</h1>"));
    assert!(html.contains("<caption>Table 1: Revenue by Segment</caption>"));
    assert!(html.contains("rowspan=\"2\""));
    assert!(html.contains("colspan=\"2\""));
}

#[test]
fn records_carry_resolved_titles() {
    let doc = report_document();
    let records = to_records(&doc).unwrap();

    assert_eq!(records.table_count(), 2);
    assert_eq!(
        records.tables[0].title.as_deref(),
        Some("Table 1: Revenue by Segment")
    );
    assert_eq!(records.tables[1].title.as_deref(), Some("Appendix"));
    // 3x2 grid fully expanded.
    assert_eq!(records.tables[0].records.len(), 6);
    // Merged 2x3 grid: spans repeat their value.
    let merged = &records.tables[1].records;
    assert_eq!(merged.len(), 6);
    assert_eq!(merged[1].value, "H1");
    assert_eq!(merged[2].value, "H1");
    assert_eq!(merged[3].value, "Quarter");
}

#[test]
fn render_dispatch_matches_direct_calls() {
    let doc = report_document();
    let options = RenderOptions::default();

    assert_eq!(
        render(&doc, OutputFormat::Markdown, &options).unwrap(),
        to_markdown(&doc, &options).unwrap()
    );
    assert_eq!(
        render(&doc, OutputFormat::Html, &options).unwrap(),
        to_html(&doc, &options).unwrap()
    );
    assert!(render(&doc, OutputFormat::Records, &options)
        .unwrap()
        .contains("\"table_index\""));
}

#[test]
fn empty_document_renders_empty_output() {
    let doc = DocumentBuilder::new().page(PageInfo::letter(0)).build().unwrap();
    let md = to_markdown(&doc, &RenderOptions::default()).unwrap();
    assert!(md.is_empty());

    let records = to_records(&doc).unwrap();
    assert!(records.is_empty());
}
