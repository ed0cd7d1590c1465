//! Criterion benchmarks for bounded settings documents.
//!
//! Measures parse and encode latency for a document close to the 1 KiB
//! capacity, the worst case a device pays on every boot and every save.
//!
//! Run with:
//! ```bash
//! cargo bench --package settings-core --bench document_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::Value;
use settings_core::{BoundedDocument, MAX_FILE_SIZE};

/// Builds a document whose encoding is just under `MAX_FILE_SIZE`.
fn near_capacity_document() -> BoundedDocument {
    let mut doc = BoundedDocument::new();
    let mut index = 0;
    loop {
        let key = format!("setting_{index:03}");
        doc.root_mut()
            .insert(key.clone(), Value::from("value-value-value"));
        let len = doc.to_bytes().map(|b| b.len()).unwrap_or(usize::MAX);
        if len > MAX_FILE_SIZE {
            doc.root_mut().remove(&key);
            return doc;
        }
        index += 1;
    }
}

fn bench_encode(c: &mut Criterion) {
    let doc = near_capacity_document();
    c.bench_function("document_encode_near_capacity", |b| {
        b.iter(|| black_box(&doc).to_bytes())
    });
}

fn bench_parse(c: &mut Criterion) {
    let bytes = near_capacity_document()
        .to_bytes()
        .expect("fixture fits capacity");
    c.bench_function("document_parse_near_capacity", |b| {
        b.iter(|| BoundedDocument::from_slice(black_box(&bytes), MAX_FILE_SIZE))
    });
}

fn bench_reject_oversized(c: &mut Criterion) {
    let bytes = vec![b' '; MAX_FILE_SIZE + 1];
    c.bench_function("document_reject_oversized", |b| {
        b.iter(|| BoundedDocument::from_slice(black_box(&bytes), MAX_FILE_SIZE))
    });
}

criterion_group!(benches, bench_encode, bench_parse, bench_reject_oversized);
criterion_main!(benches);
