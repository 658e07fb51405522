// Benchmarks for Drafty formatting.

use criterion::{criterion_group, criterion_main, Criterion};
use drafty_format::{format, parse_document, Span, SpanType};
use serde_json::json;

fn bench_simple(c: &mut Criterion) {
    let json = r#"{"children":[
        {"text":"This is "},
        {"tp":"ST","children":[{"text":"simple"}]},
        {"text":" text with a "},
        {"tp":"LN","data":{"url":"https://example.com"},"children":[{"text":"link"}]}
    ]}"#;
    let doc = parse_document(json).unwrap();
    c.bench_function("simple_document", |b| {
        b.iter(|| format(&doc));
    });
}

fn bench_form(c: &mut Criterion) {
    let rows = (0..50)
        .map(|i| {
            Span::typed(SpanType::Row).with_children(vec![
                Span::typed(SpanType::Button)
                    .with_data(json!({"act": "pub", "name": "choice", "val": i}))
                    .with_children(vec![Span::text(format!("Option {i}"))]),
            ])
        })
        .collect();
    let doc = Span::typed(SpanType::Quote)
        .with_children(vec![Span::typed(SpanType::Form).with_children(rows)]);
    c.bench_function("quoted_form", |b| {
        b.iter(|| format(&doc));
    });
}

criterion_group!(benches, bench_simple, bench_form);
criterion_main!(benches);
