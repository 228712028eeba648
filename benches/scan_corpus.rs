//! This bench test simulates extracting items from a large documentation
//! corpus held in memory.

#![allow(missing_docs)]

use std::{fmt::Write, path::PathBuf};

use criterion::{Criterion, criterion_group, criterion_main};
use reqtrace::{Document, Extractor, ReadError};

/// Generates a corpus of interlinked requirement/design/test triples.
fn synthetic_corpus(documents: usize, triples_per_doc: usize) -> Vec<Document> {
    (0..documents)
        .map(|doc| {
            let mut text = String::new();
            for i in 0..triples_per_doc {
                let prefix = format!("HW-{doc:03}-{i:03}");
                writeln!(text, "ID: {prefix}-RQ-001").unwrap();
                writeln!(text, "Parent: SYS-001").unwrap();
                writeln!(text, "Verification: {prefix}-TST-001").unwrap();
                writeln!(text, "Some prose describing the requirement.").unwrap();
                writeln!(text, "ID: {prefix}-DSN-001").unwrap();
                writeln!(text, "Satisfies: {prefix}-RQ-001").unwrap();
                writeln!(text, "ID: {prefix}-TST-001").unwrap();
                writeln!(text, "Verifies: {prefix}-RQ-001").unwrap();
            }
            Document {
                path: PathBuf::from(format!("spec/doc-{doc:03}.md")),
                lines: text.lines().map(ToString::to_string).collect(),
            }
        })
        .collect()
}

fn scan_corpus(c: &mut Criterion) {
    let extractor = Extractor::new();
    let corpus = synthetic_corpus(50, 20);

    c.bench_function("scan 3000 items", |b| {
        b.iter(|| {
            let documents = corpus.iter().map(|doc| Ok::<_, ReadError>(doc.clone()));
            extractor.scan(documents)
        });
    });
}

criterion_group!(benches, scan_corpus);
criterion_main!(benches);
