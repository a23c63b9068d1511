//! Benchmarks for untable rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks render synthetic document trees, so archive and XML
//! reading stay out of the measurement except in `docx_parsing`.

use std::io::{Cursor, Write};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use untable::{marker, Block, Cell, Document, Metadata, Paragraph, RenderOptions, Row};

/// Creates a document with alternating prose and tables of the given size.
fn create_test_document(tables: usize, rows: usize) -> Document {
    let mut blocks = Vec::with_capacity(tables * 2);

    for t in 0..tables {
        blocks.push(Block::Paragraphs(vec![Paragraph::with_text(format!(
            "Section {} - Benchmark prose for untable performance measurement.",
            t + 1
        ))]));

        let mut table = vec![Row::new(
            ["Item", "Quantity", "Price", "Notes"]
                .iter()
                .map(|h| Cell::with_text(*h))
                .collect(),
        )];
        for r in 0..rows {
            table.push(Row::new(vec![
                Cell::with_text(format!("Item {}", r)),
                Cell::with_text(r.to_string()),
                Cell::with_text(format!("{}.99", r)),
                Cell::new(vec![
                    Paragraph::with_text("first line"),
                    Paragraph::with_text("second line"),
                ]),
            ]));
        }
        blocks.push(Block::Table(table));
    }

    Document::with_tree(marker::inject(blocks), Metadata::default())
}

/// Creates a minimal DOCX archive with one table of the given size.
fn create_test_docx(rows: usize) -> Vec<u8> {
    let cell = |text: &str| format!("<w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc>", text);
    let mut body = format!("<w:tr>{}{}</w:tr>", cell("Name"), cell("Value"));
    for r in 0..rows {
        body.push_str(&format!(
            "<w:tr>{}{}</w:tr>",
            cell(&format!("name {}", r)),
            cell(&r.to_string())
        ));
    }
    let xml = format!(
        "<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body><w:tbl>{}</w:tbl></w:body></w:document>",
        body
    );

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", zip::write::SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap().into_inner()
}

/// Benchmark text rendering at various table sizes.
fn bench_text_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_rendering");
    let options = RenderOptions::default();

    for rows in [10, 100, 1000].iter() {
        let doc = create_test_document(5, *rows);

        group.bench_function(format!("{}_rows", rows), |b| {
            b.iter(|| untable::render::to_text(black_box(&doc), &options).unwrap());
        });
    }

    group.finish();
}

/// Benchmark header combination on stacked header rows.
fn bench_header_combination(c: &mut Criterion) {
    let rows: Vec<Row> = (0..8)
        .map(|level| {
            Row::new(
                (0..16)
                    .map(|col| {
                        // Only the last level makes every column unique
                        if level == 7 {
                            Cell::with_text(format!("col {}", col))
                        } else {
                            Cell::with_text(format!("group {}", level))
                        }
                    })
                    .collect(),
            )
        })
        .collect();
    let options = RenderOptions::default();

    c.bench_function("combine_headers_8_levels", |b| {
        b.iter(|| untable::render::combine_headers(0, black_box(&rows), &options, None).unwrap());
    });
}

/// Benchmark the full path from archive bytes to text.
fn bench_docx_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("docx_parsing");

    for rows in [10, 100].iter() {
        let data = create_test_docx(*rows);

        group.bench_function(format!("{}_rows", rows), |b| {
            b.iter(|| {
                let doc = untable::parse_bytes(black_box(&data)).unwrap();
                untable::render::to_text(&doc, &RenderOptions::default()).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_text_rendering,
    bench_header_combination,
    bench_docx_parsing,
);
criterion_main!(benches);
