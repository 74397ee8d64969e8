//! Compiler benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scenec::{compile, compile_with_options, CompileOptions};
use serde_json::{json, Value};

const PRICING: &str = include_str!("../tests/fixtures/pricing.json");

/// A vertical list of `rows` cards, each with a title, body and badge.
fn grid_document(rows: usize) -> String {
    let cards: Vec<Value> = (0..rows)
        .map(|i| {
            let y = (i * 120) as f64;
            json!({
                "id": format!("2:{}", i), "type": "FRAME", "name": format!("Card {}", i % 4),
                "absoluteBoundingBox": {"x": 0, "y": y, "width": 320, "height": 112},
                "layoutMode": "VERTICAL", "padding": 16, "itemSpacing": 8,
                "fills": [{"type": "SOLID", "color": {"r": 1, "g": 1, "b": 1, "a": 1}}],
                "children": [
                    {
                        "id": format!("3:{}", i), "type": "TEXT", "name": "Title",
                        "absoluteBoundingBox": {"x": 16, "y": y + 16.0, "width": 288, "height": 24},
                        "characters": format!("Card number {}", i),
                        "style": {"fontFamily": "Inter", "fontWeight": 600, "fontSize": 18},
                        "characterStyleOverrides": [0, 0, 0, 0, 1, 1, 1, 1],
                        "styleOverrideTable": {"1": {"italic": true}}
                    },
                    {
                        "id": format!("4:{}", i), "type": "ELLIPSE", "name": "Badge",
                        "absoluteBoundingBox": {"x": 16, "y": y + 48.0, "width": 24, "height": 24},
                        "fills": [{"type": "SOLID", "color": {"r": 0.2, "g": 0.6, "b": 0.3, "a": 1}}]
                    }
                ]
            })
        })
        .collect();
    json!({
        "id": "1:1", "type": "FRAME", "name": "Grid",
        "absoluteBoundingBox": {"x": 0, "y": 0, "width": 320, "height": rows * 120},
        "layoutMode": "VERTICAL",
        "children": cards
    })
    .to_string()
}

fn compile_fixture(c: &mut Criterion) {
    c.bench_function("compile_pricing", |b| b.iter(|| compile(black_box(PRICING))));
}

fn compile_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile_grid");
    let options = CompileOptions::new().with_class_prefix("g-");
    for rows in [10, 100, 1000] {
        let doc = grid_document(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &doc, |b, doc| {
            b.iter(|| compile_with_options(black_box(doc), &options))
        });
    }
    group.finish();
}

criterion_group!(benches, compile_fixture, compile_grid);
criterion_main!(benches);
