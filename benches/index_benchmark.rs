//! Benchmarks for numbering and list generation.
//!
//! Run with: cargo bench
//!
//! These benchmarks build synthetic documents of chapters, sections and
//! figures and measure the layout pass and table-of-contents generation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagetree::layout::{run_layout_pass, SequentialLayout};
use pagetree::list::ListBuilder;
use pagetree::model::{ContentType, Document, Image, Text};
use pagetree::numbering::Numberable;

/// Creates a document with `chapters` chapters of five sections each.
fn create_test_document(chapters: usize) -> Document {
    let mut doc = Document::new();
    let root = doc.root();
    for c in 0..chapters {
        let chapter = doc.add_section(root, format!("Chapter {}", c + 1)).unwrap();
        for s in 0..5 {
            let section = doc.add_section(chapter, format!("Section {}", s + 1)).unwrap();
            doc.add_text(section, Text::new("Benchmark body text.")).unwrap();
            doc.add_image(section, Image::new(format!("fig-{}-{}.png", c, s)))
                .unwrap();
            doc.add_section(section, "Details").unwrap();
        }
    }
    doc
}

/// Benchmark number formatting of every node.
fn bench_numbering(c: &mut Criterion) {
    let doc = create_test_document(20);
    let ids: Vec<_> = doc
        .traverse(Default::default())
        .map(|visit| visit.node.id())
        .collect();

    c.bench_function("formatted_numbers", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(doc.get(*id).unwrap().formatted_numbers());
            }
        });
    });
}

/// Benchmark list previews at various sizes.
fn bench_list_preview(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_preview");

    for chapters in [1, 10, 50].iter() {
        let doc = create_test_document(*chapters);

        group.bench_function(format!("{}_chapters", chapters), |b| {
            b.iter(|| {
                let output = ListBuilder::new(black_box(&doc))
                    .with_display_types([ContentType::Section, ContentType::Image])
                    .preview();
                black_box(output.rows.len());
            });
        });
    }

    group.finish();
}

/// Benchmark the layout pass followed by the final table of contents.
fn bench_layout_and_materialize(c: &mut Criterion) {
    c.bench_function("layout_and_materialize", |b| {
        b.iter(|| {
            let mut doc = create_test_document(10);
            run_layout_pass(&mut doc, &mut SequentialLayout::new(3)).unwrap();
            let output = ListBuilder::new(&doc).materialize().unwrap();
            black_box(output.rows.len());
        });
    });
}

criterion_group!(
    benches,
    bench_numbering,
    bench_list_preview,
    bench_layout_and_materialize,
);
criterion_main!(benches);
